//! Product record, inbound draft, outbound view, and the price type.
//!
//! Prices are held as fixed-point cents so the database never sees a float.
//! The wire format stays a plain JSON number; range and scale are enforced
//! when the value is converted.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error type for request field validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("title must be between 2 and 255 characters")]
    Title,

    #[error("description cannot exceed 1000 characters")]
    Description,

    #[error("{0}")]
    Price(&'static str),
}

/// A product price in cents.
///
/// Invariants: greater than zero, at most 2 fraction digits, at most
/// 8 integer digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Price(i64);

impl Price {
    /// Largest representable price: 99,999,999.99.
    pub const MAX_CENTS: i64 = 9_999_999_999;

    /// Build a price from a cent count, enforcing the range invariants.
    pub fn from_cents(cents: i64) -> Result<Self, ValidationError> {
        if cents <= 0 {
            return Err(ValidationError::Price("price must be greater than 0"));
        }
        if cents > Self::MAX_CENTS {
            return Err(ValidationError::Price(
                "price must have at most 8 integer digits",
            ));
        }
        Ok(Self(cents))
    }

    /// The raw cent count.
    pub fn cents(self) -> i64 {
        self.0
    }
}

impl TryFrom<f64> for Price {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() || value <= 0.0 {
            return Err(ValidationError::Price("price must be greater than 0"));
        }
        let scaled = value * 100.0;
        let cents = scaled.round();
        if (scaled - cents).abs() > 1e-4 {
            return Err(ValidationError::Price(
                "price must have at most 2 decimal places",
            ));
        }
        Self::from_cents(cents as i64)
    }
}

impl From<Price> for f64 {
    fn from(price: Price) -> Self {
        price.0 as f64 / 100.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

/// A persisted product.
///
/// `id`, `created_at`, and `updated_at` are assigned by the storage layer;
/// callers never choose them.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub price: Price,
    pub updated_at: i64,
    pub created_at: i64,
}

/// Inbound request payload for create and update.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductDraft {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: Price,
}

impl ProductDraft {
    /// Validate field constraints before the draft reaches the service.
    ///
    /// Price constraints are already enforced during deserialization.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let title_len = self.title.chars().count();
        if self.title.trim().is_empty() || !(2..=255).contains(&title_len) {
            return Err(ValidationError::Title);
        }
        if let Some(description) = &self.description {
            if description.chars().count() > 1000 {
                return Err(ValidationError::Description);
            }
        }
        Ok(())
    }
}

/// Outbound wire representation of a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductView {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub price: Price,
    pub updated_at: i64,
    pub created_at: i64,
}
