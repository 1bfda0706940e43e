pub mod ota;

pub use ota::Catalog;
