// src/controllers/coordinator.rs
//! Top-level owner of all chat UI state.
//!
//! Front ends never touch the controllers directly. They call into the
//! coordinator and render the `ChatSnapshot` it hands back.

use super::conversation::{ConversationController, SendOutcome};
use super::submission::{SubmissionController, SubmissionError, SubmissionStatus};
use crate::backend_client::{BackendError, VideoChatBackend};
use crate::models::chat::Message;
use crate::models::video::{VideoInfo, VideoSession};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InfoError {
    #[error("No video has been loaded yet.")]
    NoVideo,
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Immutable view of everything a renderer needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatSnapshot {
    pub session: Option<VideoSession>,
    pub submission: SubmissionStatus,
    pub messages: Vec<Message>,
    pub pending: bool,
}

pub struct ChatCoordinator {
    backend: Arc<dyn VideoChatBackend>,
    submission: SubmissionController,
    conversation: ConversationController,
    // Lock order: session before conversation.
    session: RwLock<Option<VideoSession>>,
}

impl ChatCoordinator {
    pub fn new(backend: Arc<dyn VideoChatBackend>) -> Self {
        Self {
            submission: SubmissionController::new(backend.clone()),
            conversation: ConversationController::new(backend.clone()),
            backend,
            session: RwLock::new(None),
        }
    }

    /// Submit a video. On success the session is replaced and the
    /// conversation restarts with a single greeting.
    pub async fn submit_video(&self, url: &str) -> Result<VideoSession, SubmissionError> {
        let url = self.submission.begin(url).await?;
        let result = self.submission.fetch(&url).await;

        // `Ready` and the new session become visible together.
        let mut current = self.session.write().await;
        let session = self.submission.complete(&url, result).await?;
        self.conversation.reset(&session).await;
        *current = Some(session.clone());

        Ok(session)
    }

    pub async fn send(&self, question: &str) -> SendOutcome {
        self.conversation.send(question).await
    }

    /// Re-read the current video's info from the backend and refresh its title.
    pub async fn refresh_video_info(&self) -> Result<VideoInfo, InfoError> {
        let video_id = self
            .session
            .read()
            .await
            .as_ref()
            .map(|s| s.video_id.clone())
            .ok_or(InfoError::NoVideo)?;

        let info = self.backend.video_info(&video_id).await?;

        let mut current = self.session.write().await;
        if let Some(session) = current.as_mut().filter(|s| s.video_id == info.video_id) {
            if let Some(title) = info.title.as_ref().filter(|t| !t.trim().is_empty()) {
                session.title = title.clone();
            }
            if let Some(status) = &info.status {
                session.status = status.clone();
            }
        }

        Ok(info)
    }

    /// Drop the current video and its transcript. Refused with
    /// `InProgress` while a submission is in flight.
    pub async fn close_video(&self) -> Result<(), SubmissionError> {
        let mut current = self.session.write().await;
        self.submission.reset().await?;
        self.conversation.clear().await;
        if let Some(session) = current.take() {
            tracing::info!("Closed video {}", session.video_id);
        }
        Ok(())
    }

    pub async fn session(&self) -> Option<VideoSession> {
        self.session.read().await.clone()
    }

    pub async fn backend_health(&self) -> Result<u16, BackendError> {
        self.backend.health().await
    }

    pub async fn snapshot(&self) -> ChatSnapshot {
        let session = self.session.read().await;
        let (messages, pending) = self.conversation.snapshot().await;
        ChatSnapshot {
            session: session.clone(),
            submission: self.submission.status().await,
            messages,
            pending,
        }
    }
}
