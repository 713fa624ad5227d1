// HTTP client for the transcript/RAG backend.
// The backend owns transcript fetching and answering; we only post JSON and read JSON back.

use crate::models::chat::{ChatAnswer, ChatRequest};
use crate::models::video::{ProcessVideoRequest, ProcessVideoResponse, VideoInfo, VideoSession};
use crate::youtube_url::extract_video_id;
use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, info, warn};

pub const DEFAULT_SERVER_ERROR: &str = "Server error occurred";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    #[error("Request timed out. The video might be too long or the server is busy.")]
    Timeout,
    #[error("Unable to connect to server. Please check your connection.")]
    Connection(String),
    #[error("{message}")]
    Server { status: u16, message: String },
    #[error("Unexpected response from server: {0}")]
    InvalidResponse(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

impl BackendError {
    fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            BackendError::Timeout
        } else if err.is_connect() {
            BackendError::Connection(err.to_string())
        } else if err.is_decode() || err.is_body() {
            BackendError::InvalidResponse(err.to_string())
        } else {
            BackendError::Unexpected(err.to_string())
        }
    }

    /// Status code for server-reported errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            BackendError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// The operations the chat front ends need from the backend.
///
/// Controllers only see this trait, so tests can swap in an in-memory backend.
#[async_trait]
pub trait VideoChatBackend: Send + Sync {
    /// Ask the backend to ingest a video. Returns the normalized session.
    async fn process_video(&self, video_url: &str) -> Result<VideoSession, BackendError>;

    /// Ask a question about an already processed video.
    async fn ask(&self, video_id: &str, question: &str) -> Result<ChatAnswer, BackendError>;

    async fn video_info(&self, video_id: &str) -> Result<VideoInfo, BackendError>;

    /// Any HTTP reply counts as reachable; the status code is returned as-is.
    async fn health(&self) -> Result<u16, BackendError>;
}

#[derive(Debug, Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, BackendError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BackendError::Unexpected(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send_json<T, B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<T, BackendError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.endpoint(path);
        debug!("API Request: {} {}", method, url);

        let mut request = self.client.request(method.clone(), &url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            let err = BackendError::from_transport(e);
            error!("API Request Error: {} {}: {}", method, url, err);
            err
        })?;

        let status = response.status();
        let text = response.text().await.map_err(BackendError::from_transport)?;
        debug!("API Response: {} {}", status.as_u16(), url);

        if !status.is_success() {
            let message = server_error_message(&text);
            warn!(status = status.as_u16(), url = %url, "backend returned error: {}", message);
            return Err(BackendError::Server {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str::<T>(&text).map_err(|e| {
            error!("Failed to decode backend response from {}: {}", url, e);
            BackendError::InvalidResponse(e.to_string())
        })
    }
}

/// Pull a human-readable message out of an error body.
///
/// Flask-style backends use `error`, FastAPI uses `detail`; `message` is a last resort.
pub fn server_error_message(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return DEFAULT_SERVER_ERROR.to_string();
    };

    ["error", "detail", "message"]
        .iter()
        .filter_map(|key| value.get(*key))
        .filter_map(|v| v.as_str())
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(|s| s.to_string())
        .unwrap_or_else(|| DEFAULT_SERVER_ERROR.to_string())
}

#[async_trait]
impl VideoChatBackend for BackendClient {
    async fn process_video(&self, video_url: &str) -> Result<VideoSession, BackendError> {
        info!("🎬 Submitting video for processing: {}", video_url);

        let reply: ProcessVideoResponse = self
            .send_json(Method::POST, "/process-video", Some(&ProcessVideoRequest { video_url }))
            .await?;

        if let Some(message) = reply.reported_error() {
            warn!("Backend refused video {}: {}", video_url, message);
            return Err(BackendError::Server {
                status: StatusCode::OK.as_u16(),
                message,
            });
        }

        let video_id = reply
            .video_id
            .clone()
            .filter(|id| !id.trim().is_empty())
            .or_else(|| extract_video_id(video_url))
            .ok_or_else(|| BackendError::InvalidResponse("response did not include a video_id".to_string()))?;

        let title = reply.resolved_title().unwrap_or_else(|| video_id.clone());
        let status = reply.status.clone().unwrap_or_else(|| "processed".to_string());

        info!("✅ Video ready: {} ({}) [{}]", title, video_id, status);

        Ok(VideoSession {
            video_id,
            title,
            status,
            url: video_url.to_string(),
        })
    }

    async fn ask(&self, video_id: &str, question: &str) -> Result<ChatAnswer, BackendError> {
        debug!(video_id = %video_id, question_len = question.len(), "sending chat question");
        self.send_json(Method::POST, "/chat", Some(&ChatRequest { video_id, question }))
            .await
    }

    async fn video_info(&self, video_id: &str) -> Result<VideoInfo, BackendError> {
        let path = format!("/video-info/{}", urlencoding::encode(video_id));
        self.send_json::<VideoInfo, ()>(Method::GET, &path, None).await
    }

    async fn health(&self) -> Result<u16, BackendError> {
        let response = self
            .client
            .get(&self.base_url)
            .send()
            .await
            .map_err(BackendError::from_transport)?;
        Ok(response.status().as_u16())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_prefers_error_then_detail() {
        assert_eq!(server_error_message(r#"{"error":"Invalid YouTube URL"}"#), "Invalid YouTube URL");
        assert_eq!(server_error_message(r#"{"detail":"Video not found"}"#), "Video not found");
        assert_eq!(
            server_error_message(r#"{"error":"","message":"fallback message"}"#),
            "fallback message"
        );
    }

    #[test]
    fn error_message_defaults_for_unreadable_bodies() {
        assert_eq!(server_error_message("<html>502</html>"), DEFAULT_SERVER_ERROR);
        assert_eq!(server_error_message(r#"{"detail":[{"loc":["body"]}]}"#), DEFAULT_SERVER_ERROR);
        assert_eq!(server_error_message(""), DEFAULT_SERVER_ERROR);
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = BackendClient::new("http://localhost:5000/api/", Duration::from_secs(5)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:5000/api");
        assert_eq!(client.endpoint("/chat"), "http://localhost:5000/api/chat");
    }

    #[test]
    fn display_text_matches_user_facing_messages() {
        assert_eq!(
            BackendError::Timeout.to_string(),
            "Request timed out. The video might be too long or the server is busy."
        );
        let err = BackendError::Server { status: 400, message: "Invalid YouTube URL".into() };
        assert_eq!(err.to_string(), "Invalid YouTube URL");
        assert_eq!(err.status(), Some(400));
    }
}
