//! Pure transforms between persisted products and wire shapes.
//!
//! These never touch storage and never mutate their inputs, with the one
//! documented exception of [`apply`], which overwrites the mutable fields of
//! an existing record in place.

use crate::model::{Product, ProductDraft, ProductView};

/// Map a persisted product to its wire representation.
pub fn view(product: &Product) -> ProductView {
    ProductView {
        id: product.id,
        title: product.title.clone(),
        description: product.description.clone(),
        price: product.price,
        updated_at: product.updated_at,
        created_at: product.created_at,
    }
}

/// Overwrite the caller-editable fields of `existing` with the draft values.
///
/// Identity and timestamps are untouched; the storage layer refreshes
/// `updated_at` when the record is saved.
pub fn apply(existing: &mut Product, draft: &ProductDraft) {
    existing.title = draft.title.clone();
    existing.description = draft.description.clone();
    existing.price = draft.price;
}
