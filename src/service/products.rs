//! CRUD operations over the product store.
//!
//! Only the read path is instrumented: a use counter plus a root span with
//! two children, one around the store fetch and one around the response
//! mapping. The write operations carry no spans or counters.

use std::sync::Arc;

use crate::mapper;
use crate::model::{Product, ProductDraft, ProductView};
use crate::storage::ProductStore;
use crate::telemetry::span::SpanScope;
use crate::telemetry::Telemetry;

use super::ServiceError;

/// Product operations backed by the store, with an injected telemetry
/// handle.
pub struct ProductService {
    store: ProductStore,
    telemetry: Arc<Telemetry>,
}

impl ProductService {
    /// Create a new product service.
    pub fn new(store: ProductStore, telemetry: Arc<Telemetry>) -> Self {
        Self { store, telemetry }
    }

    /// List every product in insertion order.
    ///
    /// The counter is bumped before any work so it reflects use, not
    /// outcome. Each scope ends its span when it drops, so a store failure
    /// closes the open spans and then propagates unchanged; the mapping
    /// span is never started in that case.
    pub fn list_all(&self) -> Result<Vec<ProductView>, ServiceError> {
        self.telemetry.record_db_request();
        tracing::info!("List request received");

        let root = SpanScope::root(self.telemetry.tracer(), "database fetch and mapping");

        let products: Vec<Product> = {
            let _fetch =
                SpanScope::child(self.telemetry.tracer(), "fetch products from store", &root);
            self.store.find_all()?
        };
        tracing::debug!(count = products.len(), "Fetched products");

        let views: Vec<ProductView> = {
            let _mapping =
                SpanScope::child(self.telemetry.tracer(), "map products to response", &root);
            products.iter().map(mapper::view).collect()
        };
        tracing::debug!("Mapped products to response");

        Ok(views)
    }

    /// Create a product from the draft fields; id and timestamps are
    /// assigned by the store.
    pub fn create(&self, draft: &ProductDraft) -> Result<ProductView, ServiceError> {
        let product = self.store.insert(draft)?;
        tracing::info!(id = product.id, "Product created");
        Ok(mapper::view(&product))
    }

    /// Overwrite the editable fields of an existing product.
    pub fn update(&self, id: i64, draft: &ProductDraft) -> Result<ProductView, ServiceError> {
        let mut product = self
            .store
            .find_by_id(id)?
            .ok_or(ServiceError::NotFound(id))?;

        mapper::apply(&mut product, draft);
        let saved = self.store.update(&product)?;
        tracing::info!(id = saved.id, "Product updated");
        Ok(mapper::view(&saved))
    }

    /// Delete a product, returning its last known state.
    pub fn delete(&self, id: i64) -> Result<ProductView, ServiceError> {
        let product = self
            .store
            .find_by_id(id)?
            .ok_or(ServiceError::NotFound(id))?;

        self.store.delete(product.id)?;
        tracing::info!(id = product.id, "Product deleted");
        Ok(mapper::view(&product))
    }
}
