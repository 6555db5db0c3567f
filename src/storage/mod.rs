//! SQLite storage layer for products.
//!
//! Provides:
//! - Schema initialization and per-connection pragmas
//! - A pooled read-write store enforcing field constraints at write time

pub mod schema;
pub mod store;

pub use store::{ProductStore, StoreError};
