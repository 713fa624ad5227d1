// src/controllers/conversation.rs
use crate::backend_client::VideoChatBackend;
use crate::models::chat::Message;
use crate::models::video::VideoSession;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Appended in place of an answer when the backend call fails.
pub const FALLBACK_ERROR_MESSAGE: &str = "Error: Could not fetch response.";

/// Why a `send` did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IgnoreReason {
    BlankQuestion,
    RequestPending,
    NoVideo,
}

/// Result of one `send` call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SendOutcome {
    /// The bot reply was appended.
    Answered { reply: Message },
    /// The fallback message was appended.
    Failed { reply: Message, error: String },
    /// Nothing was sent and the transcript is unchanged.
    Ignored { reason: IgnoreReason },
    /// The video changed while the request was in flight; the reply was dropped.
    Discarded,
}

#[derive(Debug, Default)]
struct ConversationState {
    video_id: Option<String>,
    messages: Vec<Message>,
    pending: bool,
    // Bumped on every reset so late replies can be recognized.
    epoch: u64,
}

/// Transcript for the current video plus the `Idle -> Pending -> Idle` request cycle.
pub struct ConversationController {
    backend: Arc<dyn VideoChatBackend>,
    state: RwLock<ConversationState>,
}

impl ConversationController {
    pub fn new(backend: Arc<dyn VideoChatBackend>) -> Self {
        Self {
            backend,
            state: RwLock::new(ConversationState::default()),
        }
    }

    /// Start a fresh transcript for `session` with a single greeting.
    pub async fn reset(&self, session: &VideoSession) {
        let mut state = self.state.write().await;
        state.video_id = Some(session.video_id.clone());
        state.messages = vec![Message::bot(greeting(session))];
        state.pending = false;
        state.epoch += 1;
        tracing::info!("💬 Conversation reset for video {}", session.video_id);
    }

    /// Forget the current video entirely.
    pub async fn clear(&self) {
        let mut state = self.state.write().await;
        state.video_id = None;
        state.messages.clear();
        state.pending = false;
        state.epoch += 1;
    }

    pub async fn messages(&self) -> Vec<Message> {
        self.state.read().await.messages.clone()
    }

    pub async fn is_pending(&self) -> bool {
        self.state.read().await.pending
    }

    pub async fn video_id(&self) -> Option<String> {
        self.state.read().await.video_id.clone()
    }

    /// Messages and pending flag read under one lock.
    pub async fn snapshot(&self) -> (Vec<Message>, bool) {
        let state = self.state.read().await;
        (state.messages.clone(), state.pending)
    }

    pub async fn send(&self, question: &str) -> SendOutcome {
        let question = question.trim();

        let (video_id, epoch) = {
            let mut state = self.state.write().await;
            if question.is_empty() {
                return SendOutcome::Ignored { reason: IgnoreReason::BlankQuestion };
            }
            if state.pending {
                tracing::debug!("Question dropped: a request is already pending");
                return SendOutcome::Ignored { reason: IgnoreReason::RequestPending };
            }
            let Some(video_id) = state.video_id.clone() else {
                return SendOutcome::Ignored { reason: IgnoreReason::NoVideo };
            };

            state.messages.push(Message::user(question));
            state.pending = true;
            (video_id, state.epoch)
        };

        let result = self.backend.ask(&video_id, question).await;

        let mut state = self.state.write().await;
        if state.epoch != epoch {
            tracing::debug!("Dropping reply for video {}: conversation was reset", video_id);
            return SendOutcome::Discarded;
        }
        state.pending = false;

        match result {
            Ok(answer) => {
                let reply = Message::bot(answer.response);
                state.messages.push(reply.clone());
                SendOutcome::Answered { reply }
            }
            Err(e) => {
                tracing::warn!(video_id = %video_id, "Chat request failed: {}", e);
                let reply = Message::bot(FALLBACK_ERROR_MESSAGE);
                state.messages.push(reply.clone());
                SendOutcome::Failed {
                    reply,
                    error: e.to_string(),
                }
            }
        }
    }
}

fn greeting(session: &VideoSession) -> String {
    if session.was_cached() {
        format!(
            "\"{}\" was already processed. Ask me anything about it!",
            session.title
        )
    } else {
        format!(
            "\"{}\" is ready. Ask me anything about the video!",
            session.title
        )
    }
}
