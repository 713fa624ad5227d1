// src/models/video.rs
use serde::{Deserialize, Serialize};

/// The video currently being discussed.
///
/// Created once per successful submission and replaced wholesale when a new
/// video is submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoSession {
    pub video_id: String,
    pub title: String,
    /// Backend processing status, e.g. `processed` or `already_processed`.
    pub status: String,
    pub url: String,
}

impl VideoSession {
    pub fn was_cached(&self) -> bool {
        self.status == "already_processed"
    }
}

#[derive(Debug, Serialize)]
pub struct ProcessVideoRequest<'a> {
    pub video_url: &'a str,
}

/// Raw `/process-video` reply. Backends disagree on the exact shape, so
/// everything is optional and normalized by the client.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProcessVideoResponse {
    #[serde(default)]
    pub video_id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub video_info: Option<serde_json::Value>,
}

impl ProcessVideoResponse {
    /// Title from the top level, then from the nested `video_info` object.
    pub fn resolved_title(&self) -> Option<String> {
        self.title
            .clone()
            .filter(|t| !t.trim().is_empty())
            .or_else(|| {
                self.video_info
                    .as_ref()
                    .and_then(|info| info.get("title"))
                    .and_then(|t| t.as_str())
                    .filter(|t| !t.trim().is_empty())
                    .map(|t| t.to_string())
            })
    }

    /// Server-reported failure carried in a 2xx body. An `error` key or
    /// `success: false` marks the failure; blank texts fall through.
    pub fn reported_error(&self) -> Option<String> {
        if self.error.is_none() && self.success != Some(false) {
            return None;
        }
        let message = [&self.error, &self.message]
            .into_iter()
            .flatten()
            .find(|text| !text.trim().is_empty())
            .cloned()
            .unwrap_or_else(|| "Failed to process video".to_string());
        Some(message)
    }
}

/// `GET /video-info/{video_id}` reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoInfo {
    pub video_id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}
