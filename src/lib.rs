// lib.rs - chat client for asking questions about YouTube videos
pub mod backend_client;
pub mod config;
pub mod controllers;
pub mod handlers;
pub mod logging;
pub mod middleware;
pub mod models;
pub mod youtube_url;

use controllers::ChatCoordinator;
use std::sync::Arc;

// Re-export commonly used types for convenience
pub use backend_client::{BackendClient, BackendError, VideoChatBackend};
pub use config::{AppConfig, ConfigError};
pub use controllers::{ChatSnapshot, SendOutcome, SubmissionError};
pub use models::chat::{Message, Role};
pub use models::video::VideoSession;
pub use youtube_url::{extract_video_id, is_valid_youtube_url};

/// Shared state handed to every HTTP handler.
pub struct AppState {
    pub coordinator: Arc<ChatCoordinator>,
    pub backend_url: String,
}

impl AppState {
    pub fn new(backend: Arc<dyn VideoChatBackend>, backend_url: impl Into<String>) -> Self {
        Self {
            coordinator: Arc::new(ChatCoordinator::new(backend)),
            backend_url: backend_url.into(),
        }
    }
}
