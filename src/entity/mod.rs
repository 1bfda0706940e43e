//! SeaORM entity definitions

pub mod ota;

/// A stored catalog entry, exactly as persisted.
pub type Ota = ota::Model;
