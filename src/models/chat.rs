// src/models/chat.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who authored a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Bot,
}

/// One entry of the on-screen chat transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn bot(content: impl Into<String>) -> Self {
        Self {
            role: Role::Bot,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }
}

// Backend wire types for POST /chat

#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub video_id: &'a str,
    pub question: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatAnswer {
    pub response: String,
    #[serde(default)]
    pub video_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_serialize_lowercase() {
        let json = serde_json::to_value(Message::bot("hi")).unwrap();
        assert_eq!(json["role"], "bot");
        assert_eq!(json["content"], "hi");
        assert!(json["timestamp"].is_string());

        let json = serde_json::to_value(Message::user("q")).unwrap();
        assert_eq!(json["role"], "user");
    }

    #[test]
    fn chat_request_uses_question_field() {
        let body = serde_json::to_value(ChatRequest { video_id: "abc123", question: "Why?" }).unwrap();
        assert_eq!(body, serde_json::json!({ "video_id": "abc123", "question": "Why?" }));
    }

    #[test]
    fn chat_answer_ignores_extra_fields() {
        let answer: ChatAnswer = serde_json::from_str(
            r#"{"response":"It covers X.","video_id":"abc123","context_used":true}"#,
        )
        .unwrap();
        assert_eq!(answer.response, "It covers X.");
        assert_eq!(answer.video_id.as_deref(), Some("abc123"));
    }
}
