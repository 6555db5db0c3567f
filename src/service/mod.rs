//! Product business operations.

pub mod products;

pub use products::ProductService;

use thiserror::Error;

use crate::storage::StoreError;

/// Error type for service operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("product with id {0} not found")]
    NotFound(i64),

    #[error(transparent)]
    Store(#[from] StoreError),
}
