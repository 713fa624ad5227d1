#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tokio::sync::Notify;
use video_chat::models::chat::ChatAnswer;
use video_chat::models::video::VideoInfo;
use video_chat::{BackendError, VideoChatBackend, VideoSession};

/// In-memory backend with queued replies and an optional gate on `ask`.
#[derive(Default)]
pub struct ScriptedBackend {
    pub process_calls: AtomicUsize,
    pub ask_calls: AtomicUsize,
    pub asked: Mutex<Vec<(String, String)>>,
    sessions: Mutex<VecDeque<Result<VideoSession, BackendError>>>,
    answers: Mutex<VecDeque<Result<String, BackendError>>>,
    gate: Option<Notify>,
    process_gate: Option<Notify>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// `ask` blocks until `release_ask` is called.
    pub fn gated() -> Self {
        Self {
            gate: Some(Notify::new()),
            ..Self::default()
        }
    }

    /// `process_video` blocks until `release_process` is called.
    pub fn gated_processing() -> Self {
        Self {
            process_gate: Some(Notify::new()),
            ..Self::default()
        }
    }

    pub fn with_session(self, video_id: &str, title: &str) -> Self {
        self.sessions.lock().unwrap().push_back(Ok(session(video_id, title)));
        self
    }

    pub fn with_session_error(self, err: BackendError) -> Self {
        self.sessions.lock().unwrap().push_back(Err(err));
        self
    }

    pub fn with_answer(self, answer: &str) -> Self {
        self.answers.lock().unwrap().push_back(Ok(answer.to_string()));
        self
    }

    pub fn with_answer_error(self, err: BackendError) -> Self {
        self.answers.lock().unwrap().push_back(Err(err));
        self
    }

    pub fn release_ask(&self) {
        if let Some(gate) = &self.gate {
            gate.notify_one();
        }
    }

    pub fn release_process(&self) {
        if let Some(gate) = &self.process_gate {
            gate.notify_one();
        }
    }
}

pub fn session(video_id: &str, title: &str) -> VideoSession {
    VideoSession {
        video_id: video_id.to_string(),
        title: title.to_string(),
        status: "processed".to_string(),
        url: format!("https://youtu.be/{}", video_id),
    }
}

#[async_trait]
impl VideoChatBackend for ScriptedBackend {
    async fn process_video(&self, video_url: &str) -> Result<VideoSession, BackendError> {
        self.process_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.process_gate {
            gate.notified().await;
        }
        let next = self.sessions.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Err(BackendError::Unexpected(format!("no scripted session for {}", video_url))))
            .map(|mut s| {
                s.url = video_url.trim().to_string();
                s
            })
    }

    async fn ask(&self, video_id: &str, question: &str) -> Result<ChatAnswer, BackendError> {
        self.ask_calls.fetch_add(1, Ordering::SeqCst);
        self.asked
            .lock()
            .unwrap()
            .push((video_id.to_string(), question.to_string()));
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        let next = self.answers.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Err(BackendError::Connection("no scripted answer".to_string())))
            .map(|response| ChatAnswer {
                response,
                video_id: Some(video_id.to_string()),
            })
    }

    async fn video_info(&self, video_id: &str) -> Result<VideoInfo, BackendError> {
        Ok(VideoInfo {
            video_id: video_id.to_string(),
            title: Some("Refreshed title".to_string()),
            status: Some("processed".to_string()),
        })
    }

    async fn health(&self) -> Result<u16, BackendError> {
        Ok(200)
    }
}

/// Spin until `check` holds, yielding to other tasks in between.
pub async fn wait_until<F, Fut>(mut check: F)
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = bool>,
{
    for _ in 0..1000 {
        if check().await {
            return;
        }
        tokio::task::yield_now().await;
    }
    panic!("condition not reached");
}
