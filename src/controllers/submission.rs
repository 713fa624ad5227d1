// src/controllers/submission.rs
use crate::backend_client::{BackendError, VideoChatBackend};
use crate::models::video::VideoSession;
use crate::youtube_url::is_valid_youtube_url;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("Please enter a YouTube URL.")]
    EmptyUrl,
    #[error("Please enter a valid YouTube URL (watch?v=, youtu.be/ or embed/ link).")]
    InvalidUrl,
    #[error("A video is already being processed. Please wait.")]
    InProgress,
    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl SubmissionError {
    /// Rejected locally, before any request was made.
    pub fn is_validation(&self) -> bool {
        matches!(self, SubmissionError::EmptyUrl | SubmissionError::InvalidUrl)
    }
}

/// Where the submit control currently stands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SubmissionStatus {
    Idle,
    Processing { url: String },
    Ready { video_id: String },
    Failed { message: String },
}

impl SubmissionStatus {
    pub fn is_processing(&self) -> bool {
        matches!(self, SubmissionStatus::Processing { .. })
    }
}

/// Validates a URL and hands it to the backend, one submission at a time.
pub struct SubmissionController {
    backend: Arc<dyn VideoChatBackend>,
    status: RwLock<SubmissionStatus>,
}

impl SubmissionController {
    pub fn new(backend: Arc<dyn VideoChatBackend>) -> Self {
        Self {
            backend,
            status: RwLock::new(SubmissionStatus::Idle),
        }
    }

    pub async fn status(&self) -> SubmissionStatus {
        self.status.read().await.clone()
    }

    /// Back to `Idle`. Refused while a submission is in flight.
    pub async fn reset(&self) -> Result<(), SubmissionError> {
        let mut status = self.status.write().await;
        if status.is_processing() {
            return Err(SubmissionError::InProgress);
        }
        *status = SubmissionStatus::Idle;
        Ok(())
    }

    pub async fn submit(&self, url: &str) -> Result<VideoSession, SubmissionError> {
        let url = self.begin(url).await?;
        let result = self.fetch(&url).await;
        self.complete(&url, result).await
    }

    /// Validate `url` and move to `Processing`. Returns the trimmed URL.
    pub(crate) async fn begin(&self, url: &str) -> Result<String, SubmissionError> {
        let url = url.trim();
        let mut status = self.status.write().await;
        if status.is_processing() {
            tracing::debug!("Ignoring submission of {} while another is in flight", url);
            return Err(SubmissionError::InProgress);
        }

        if let Err(e) = validate(url) {
            tracing::info!("Rejected video URL {:?}: {}", url, e);
            *status = SubmissionStatus::Failed { message: e.to_string() };
            return Err(e);
        }

        *status = SubmissionStatus::Processing { url: url.to_string() };
        Ok(url.to_string())
    }

    /// The backend call itself. No lock is held while it runs.
    pub(crate) async fn fetch(&self, url: &str) -> Result<VideoSession, BackendError> {
        self.backend.process_video(url).await
    }

    /// Publish the outcome of `fetch` and leave `Processing`.
    pub(crate) async fn complete(
        &self,
        url: &str,
        result: Result<VideoSession, BackendError>,
    ) -> Result<VideoSession, SubmissionError> {
        let mut status = self.status.write().await;
        match result {
            Ok(session) => {
                *status = SubmissionStatus::Ready {
                    video_id: session.video_id.clone(),
                };
                Ok(session)
            }
            Err(e) => {
                tracing::error!("❌ Failed to process video {}: {}", url, e);
                *status = SubmissionStatus::Failed { message: e.to_string() };
                Err(e.into())
            }
        }
    }
}

fn validate(url: &str) -> Result<(), SubmissionError> {
    if url.is_empty() {
        return Err(SubmissionError::EmptyUrl);
    }
    if !is_valid_youtube_url(url) {
        return Err(SubmissionError::InvalidUrl);
    }
    Ok(())
}
