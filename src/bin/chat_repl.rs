use std::io::{self, Write};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use video_chat::controllers::{ChatCoordinator, ChatSnapshot, IgnoreReason, SendOutcome};
use video_chat::{logging, AppConfig, BackendClient, Role};

/// Prints only the transcript entries the user has not seen yet.
#[derive(Default)]
struct TranscriptPrinter {
    video_id: Option<String>,
    printed: usize,
}

impl TranscriptPrinter {
    /// Forget what was printed, so the next snapshot is shown in full.
    fn restart(&mut self) {
        self.video_id = None;
        self.printed = 0;
    }

    fn render_new(&mut self, snapshot: &ChatSnapshot) -> Vec<String> {
        let mut lines = Vec::new();
        let video_id = snapshot.session.as_ref().map(|s| s.video_id.clone());
        // A shorter transcript means it was reset underneath us.
        if video_id != self.video_id || snapshot.messages.len() < self.printed {
            self.video_id = video_id;
            self.printed = 0;
            if let Some(session) = &snapshot.session {
                lines.push(format!("\n📺 {} ({})", session.title, session.video_id));
            }
        }

        for message in snapshot.messages.iter().skip(self.printed) {
            let who = match message.role {
                Role::User => "you",
                Role::Bot => "bot",
            };
            lines.push(format!("[{}] {}: {}", message.timestamp.format("%H:%M:%S"), who, message.content));
        }
        self.printed = snapshot.messages.len();
        lines
    }

    fn print_new(&mut self, snapshot: &ChatSnapshot) {
        for line in self.render_new(snapshot) {
            println!("{}", line);
        }
    }
}

fn print_help() {
    println!("Commands:");
    println!("  /video <youtube url>   process a video and start a new conversation");
    println!("  /info                  refresh info for the current video");
    println!("  /close                 forget the current video");
    println!("  /quit                  exit");
    println!("Anything else is sent as a question about the current video.");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    logging::init_logging("chat REPL")?;

    let config = AppConfig::from_env()?;
    let backend = BackendClient::new(config.backend_url.clone(), config.request_timeout)?;
    let coordinator = ChatCoordinator::new(Arc::new(backend));
    let mut printer = TranscriptPrinter::default();

    println!("🎬 YouTube Chatbot (backend: {})", config.backend_url);
    print_help();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();

        if line == "/quit" || line == "/exit" {
            break;
        } else if line == "/help" {
            print_help();
        } else if let Some(url) = line.strip_prefix("/video") {
            println!("Processing...");
            match coordinator.submit_video(url).await {
                Ok(_) => printer.restart(),
                Err(e) => eprintln!("❌ {}", e),
            }
        } else if line == "/info" {
            match coordinator.refresh_video_info().await {
                Ok(info) => println!(
                    "ℹ️  {} - {} [{}]",
                    info.video_id,
                    info.title.as_deref().unwrap_or("untitled"),
                    info.status.as_deref().unwrap_or("unknown")
                ),
                Err(e) => eprintln!("❌ {}", e),
            }
        } else if line == "/close" {
            match coordinator.close_video().await {
                Ok(()) => println!("Video closed."),
                Err(e) => eprintln!("❌ {}", e),
            }
        } else {
            match coordinator.send(line).await {
                SendOutcome::Ignored { reason: IgnoreReason::NoVideo } => {
                    eprintln!("Load a video first with /video <url>.");
                }
                SendOutcome::Ignored { .. } => {}
                SendOutcome::Failed { error, .. } => tracing::debug!("chat request failed: {}", error),
                SendOutcome::Answered { .. } | SendOutcome::Discarded => {}
            }
        }

        printer.print_new(&coordinator.snapshot().await);
    }

    println!("Bye!");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use video_chat::controllers::SubmissionStatus;
    use video_chat::{Message, VideoSession};

    fn snapshot(video_id: &str, messages: Vec<Message>) -> ChatSnapshot {
        ChatSnapshot {
            session: Some(VideoSession {
                video_id: video_id.to_string(),
                title: "Demo".to_string(),
                status: "processed".to_string(),
                url: format!("https://youtu.be/{}", video_id),
            }),
            submission: SubmissionStatus::Ready { video_id: video_id.to_string() },
            messages,
            pending: false,
        }
    }

    #[test]
    fn only_new_messages_are_rendered() {
        let mut printer = TranscriptPrinter::default();
        let greeting = Message::bot("Video \"Demo\" processed!");

        let lines = printer.render_new(&snapshot("abc123", vec![greeting.clone()]));
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("Demo (abc123)"));

        let lines = printer.render_new(&snapshot(
            "abc123",
            vec![greeting, Message::user("Summarize this"), Message::bot("It covers X.")],
        ));
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("you: Summarize this"));
        assert!(lines[1].ends_with("bot: It covers X."));
    }

    #[test]
    fn resubmitting_the_same_video_shows_the_new_greeting() {
        let mut printer = TranscriptPrinter::default();
        printer.render_new(&snapshot(
            "abc123",
            vec![Message::bot("hello"), Message::user("q"), Message::bot("a")],
        ));

        // Same id, transcript reset to a single greeting.
        let lines = printer.render_new(&snapshot("abc123", vec![Message::bot("hello again")]));
        assert!(lines.iter().any(|l| l.ends_with("bot: hello again")));
    }

    #[test]
    fn restart_reprints_a_transcript_of_equal_length() {
        let mut printer = TranscriptPrinter::default();
        printer.render_new(&snapshot("abc123", vec![Message::bot("hello")]));

        printer.restart();
        let lines = printer.render_new(&snapshot("abc123", vec![Message::bot("welcome back")]));
        assert!(lines.iter().any(|l| l.ends_with("bot: welcome back")));
    }
}
