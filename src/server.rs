//! HTTP server setup and lifecycle.
//!
//! Routes, request validation, error-to-status mapping, and graceful
//! shutdown. Everything here is glue in front of [`ProductService`].

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::json;
use tokio::sync::watch;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::model::{ProductDraft, ProductView, ValidationError};
use crate::service::{ProductService, ServiceError};
use crate::storage::StoreError;

/// Server state shared across handlers.
pub struct AppState {
    pub service: ProductService,
}

/// Build the product API router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/v1/products/all", get(list_all))
        .route("/api/v1/products/create", post(create))
        .route("/api/v1/products/update/:id", put(update))
        .route("/api/v1/products/delete/:id", post(delete))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Wire-level error with its HTTP status.
enum ApiError {
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Internal(String),
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match &err {
            ServiceError::NotFound(_) => ApiError::NotFound(err.to_string()),
            ServiceError::Store(StoreError::Constraint(_)) => ApiError::Conflict(err.to_string()),
            ServiceError::Store(_) => ApiError::Internal(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, message),
            ApiError::Conflict(message) => (StatusCode::CONFLICT, message),
            ApiError::Internal(message) => {
                tracing::error!(error = %message, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

async fn list_all(State(state): State<Arc<AppState>>) -> Result<Json<Vec<ProductView>>, ApiError> {
    Ok(Json(state.service.list_all()?))
}

async fn create(
    State(state): State<Arc<AppState>>,
    Json(draft): Json<ProductDraft>,
) -> Result<(StatusCode, Json<ProductView>), ApiError> {
    draft.validate()?;
    let view = state.service.create(&draft)?;
    Ok((StatusCode::CREATED, Json(view)))
}

async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(draft): Json<ProductDraft>,
) -> Result<Json<ProductView>, ApiError> {
    draft.validate()?;
    Ok(Json(state.service.update(id, &draft)?))
}

async fn delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<ProductView>, ApiError> {
    Ok(Json(state.service.delete(id)?))
}

/// Run the products HTTP server.
///
/// # Arguments
///
/// * `config` - Server configuration
/// * `state` - Shared handler state
/// * `shutdown_rx` - Receiver for shutdown signal
///
/// # Returns
///
/// Returns when the server has shut down.
pub async fn run_server(
    config: &Config,
    state: Arc<AppState>,
    mut shutdown_rx: watch::Receiver<bool>,
) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!(address = %addr, "Starting products HTTP server");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.changed().await;
            tracing::info!("Shutdown signal received, stopping server");
        })
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}
