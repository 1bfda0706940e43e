//! OTA catalog - versioned build artifacts for launcher applications
//!
//! Architecture:
//! - SeaORM repository (SQLite or PostgreSQL) behind the `Repository` trait
//! - Catalog service validating every intent before it reaches storage
//! - Axum HTTP API with rate limiting
//! - Tokio for async runtime

pub mod config;
pub mod entity;
pub mod error;
pub mod model;
pub mod plugins;
pub mod prelude;
pub mod repo;
pub mod state;
pub mod sv;
