//! Stockmill API Library
//!
//! Append-only stock ledger and production posting core for small
//! manufacturers, exposed over HTTP.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

// Core modules
pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod events;
pub mod handlers;
pub mod migrator;
pub mod openapi;
pub mod queries;
pub mod services;
pub mod tracing;

use axum::{
    response::Json,
    routing::{delete, get, post},
    Router,
};
use chrono::Utc;
use sea_orm::DatabaseConnection;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

// App state definition
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: config::AppConfig,
    pub event_sender: events::EventSender,
    pub services: handlers::AppServices,
}

// Common response wrappers
#[derive(Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    pub errors: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<ResponseMeta>,
}

#[derive(Serialize, ToSchema)]
pub struct ResponseMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    pub timestamp: String,
}

impl ResponseMeta {
    fn capture() -> Self {
        Self {
            request_id: crate::tracing::current_request_id().map(|rid| rid.as_str().to_string()),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            errors: None,
            meta: Some(ResponseMeta::capture()),
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message),
            errors: None,
            meta: Some(ResponseMeta::capture()),
        }
    }

    pub fn validation_errors(errors: Vec<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some("Validation failed".to_string()),
            errors: Some(errors),
            meta: Some(ResponseMeta::capture()),
        }
    }
}


/// Standard API result type for JSON responses
pub type ApiResult<T> = Result<Json<ApiResponse<T>>, errors::ServiceError>;

// Versioned API routes
pub fn api_v1_routes() -> Router<AppState> {
    let stock = Router::new()
        .route(
            "/stock/balance/:item_id/:warehouse_id",
            get(handlers::stock::get_stock_balance),
        )
        .route("/stock/balances", get(handlers::stock::list_stock_balances))
        .route(
            "/stock/movements/:item_id/:warehouse_id",
            get(handlers::stock::list_stock_movements),
        )
        .route("/stock/adjustments", post(handlers::stock::adjust_stock))
        .route("/stock/rebuild", post(handlers::stock::rebuild_ledger));

    let production = Router::new()
        .route(
            "/production/runs",
            get(handlers::production::list_runs).post(handlers::production::create_run),
        )
        .route(
            "/production/runs/:id",
            get(handlers::production::get_run)
                .put(handlers::production::update_run)
                .delete(handlers::production::delete_run),
        )
        .route(
            "/production/runs/:id/restore",
            post(handlers::production::restore_run),
        )
        .route(
            "/production/standards",
            get(handlers::production::standard_consumptions),
        );

    let documents = Router::new()
        .route(
            "/documents/purchase-receipts",
            post(handlers::documents::record_purchase_receipt),
        )
        .route(
            "/documents/purchase-receipts/:id",
            delete(handlers::documents::delete_purchase_receipt),
        )
        .route(
            "/documents/purchase-receipts/:id/restore",
            post(handlers::documents::restore_purchase_receipt),
        )
        .route(
            "/documents/sales-shipments",
            post(handlers::documents::record_sales_shipment),
        )
        .route(
            "/documents/sales-shipments/:id",
            delete(handlers::documents::delete_sales_shipment),
        )
        .route(
            "/documents/sales-shipments/:id/restore",
            post(handlers::documents::restore_sales_shipment),
        )
        .route(
            "/documents/transfers",
            post(handlers::documents::record_transfer),
        )
        .route(
            "/documents/transfers/:id",
            delete(handlers::documents::delete_transfer),
        )
        .route(
            "/documents/transfers/:id/restore",
            post(handlers::documents::restore_transfer),
        );

    stock.merge(production).merge(documents)
}

/// Full application router: health probes, versioned API and Swagger UI.
/// Extracted from `main` so integration tests can drive the same surface.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .merge(handlers::health::health_routes())
        .nest("/api/v1", api_v1_routes())
        .merge(openapi::swagger_ui())
        .layer(tracing::configure_http_tracing())
        .layer(axum::middleware::from_fn(tracing::request_id_middleware))
        .with_state(state)
}
