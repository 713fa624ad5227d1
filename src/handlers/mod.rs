// src/handlers/mod.rs
pub mod api;
pub mod ui;

use crate::middleware::logging::request_logging_middleware;
use crate::AppState;
use axum::{Extension, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Full application router: browser page, JSON API, logging and CORS.
pub fn app_router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(ui::ui_routes())
        .merge(api::api_routes())
        .layer(axum::middleware::from_fn(request_logging_middleware))
        .layer(CorsLayer::permissive())
        .layer(Extension(state))
}
