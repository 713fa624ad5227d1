// src/controllers/mod.rs
//! UI state machines for the video chat front ends.

pub mod conversation;
pub mod coordinator;
pub mod submission;

pub use conversation::{ConversationController, IgnoreReason, SendOutcome, FALLBACK_ERROR_MESSAGE};
pub use coordinator::{ChatCoordinator, ChatSnapshot, InfoError};
pub use submission::{SubmissionController, SubmissionError, SubmissionStatus};
