// src/handlers/api.rs
// JSON endpoints driven by the browser page. Every reply carries the fresh state snapshot.

use crate::backend_client::BackendError;
use crate::controllers::{InfoError, SubmissionError};
use crate::AppState;
use axum::{
    extract::Extension,
    http::StatusCode,
    response::Json,
    routing::{delete, get, post},
    Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

pub fn api_routes() -> Router {
    Router::new()
        .route("/api/state", get(get_state))
        .route("/api/videos", post(submit_video))
        .route("/api/videos/current", delete(close_video))
        .route("/api/videos/current/info", get(current_video_info))
        .route("/api/messages", post(send_message))
        .route("/api/status", get(api_status))
}

#[derive(Debug, Deserialize)]
pub struct SubmitVideoBody {
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct SendMessageBody {
    #[serde(default)]
    pub question: String,
}

type ApiError = (StatusCode, Json<Value>);

fn backend_status(err: &BackendError) -> StatusCode {
    match err {
        BackendError::Timeout => StatusCode::GATEWAY_TIMEOUT,
        _ => StatusCode::BAD_GATEWAY,
    }
}

fn submission_status(err: &SubmissionError) -> StatusCode {
    match err {
        SubmissionError::EmptyUrl | SubmissionError::InvalidUrl => StatusCode::BAD_REQUEST,
        SubmissionError::InProgress => StatusCode::CONFLICT,
        SubmissionError::Backend(e) => backend_status(e),
    }
}

async fn get_state(Extension(state): Extension<Arc<AppState>>) -> Json<Value> {
    Json(json!({ "state": state.coordinator.snapshot().await }))
}

async fn submit_video(
    Extension(state): Extension<Arc<AppState>>,
    Json(body): Json<SubmitVideoBody>,
) -> Result<Json<Value>, ApiError> {
    match state.coordinator.submit_video(&body.url).await {
        Ok(session) => Ok(Json(json!({
            "session": session,
            "state": state.coordinator.snapshot().await,
        }))),
        Err(e) => Err((
            submission_status(&e),
            Json(json!({
                "error": e.to_string(),
                "state": state.coordinator.snapshot().await,
            })),
        )),
    }
}

async fn close_video(Extension(state): Extension<Arc<AppState>>) -> Result<Json<Value>, ApiError> {
    match state.coordinator.close_video().await {
        Ok(()) => Ok(Json(json!({ "state": state.coordinator.snapshot().await }))),
        Err(e) => Err((
            submission_status(&e),
            Json(json!({
                "error": e.to_string(),
                "state": state.coordinator.snapshot().await,
            })),
        )),
    }
}

async fn current_video_info(Extension(state): Extension<Arc<AppState>>) -> Result<Json<Value>, ApiError> {
    match state.coordinator.refresh_video_info().await {
        Ok(info) => Ok(Json(json!({
            "info": info,
            "state": state.coordinator.snapshot().await,
        }))),
        Err(e) => {
            let status = match &e {
                InfoError::NoVideo => StatusCode::NOT_FOUND,
                InfoError::Backend(inner) => backend_status(inner),
            };
            Err((status, Json(json!({ "error": e.to_string() }))))
        }
    }
}

async fn send_message(
    Extension(state): Extension<Arc<AppState>>,
    Json(body): Json<SendMessageBody>,
) -> Json<Value> {
    let result = state.coordinator.send(&body.question).await;
    Json(json!({
        "result": result,
        "state": state.coordinator.snapshot().await,
    }))
}

async fn api_status(Extension(state): Extension<Arc<AppState>>) -> Json<Value> {
    let backend = match state.coordinator.backend_health().await {
        Ok(code) if (200..300).contains(&code) => json!({ "status": "healthy", "http_status": code }),
        Ok(code) => json!({ "status": "reachable", "http_status": code }),
        Err(e) => json!({ "status": "unreachable", "error": e.to_string() }),
    };

    Json(json!({
        "status": "operational",
        "version": env!("CARGO_PKG_VERSION"),
        "backend_url": state.backend_url,
        "backend": backend,
        "endpoints": {
            "ui": "/",
            "state": "/api/state",
            "submit_video": "/api/videos",
            "send_message": "/api/messages",
            "status": "/api/status"
        }
    }))
}
