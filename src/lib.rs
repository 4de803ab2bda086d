//! Read-only statistics API over a SQLite table of product transactions.
//!
//! Listing, monthly statistics, a price histogram and a category breakdown
//! are served as JSON. The binary in `main.rs` wires configuration,
//! logging and the database pool around [`build_router`].

use std::time::Duration;

use axum::{Router, error_handling::HandleErrorLayer, routing::get};
use tower::{BoxError, ServiceBuilder, timeout::TimeoutLayer};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::error::AppError;

pub mod aggregation;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;

#[cfg(test)]
pub(crate) mod test_utils;

pub use handlers::AppState;

/// Create the router with every endpoint and the middleware stack
///
/// A request running past `request_timeout` is answered like any other
/// failure: a 500 with the generic error body.
pub fn build_router(state: AppState, request_timeout: Duration) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let middleware = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(HandleErrorLayer::new(handle_middleware_error))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(cors);

    Router::new()
        .route("/health", get(handlers::health))
        .route("/transactions", get(handlers::transactions::list_transactions))
        .route("/statistics", get(handlers::reports::statistics))
        .route("/bar-chart", get(handlers::reports::bar_chart))
        .route("/pie-chart", get(handlers::reports::pie_chart))
        .route("/combined-data", get(handlers::reports::combined_data))
        .layer(middleware)
        .with_state(state)
}

async fn handle_middleware_error(error: BoxError) -> AppError {
    AppError::from(error)
}
