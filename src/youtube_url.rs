// src/youtube_url.rs
//! YouTube URL shape checks shared by the submission flow and the front ends.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// `watch?v=ID`, `youtu.be/ID` and `embed/ID`, optionally followed by a query or fragment.
    static ref ACCEPTED_SHAPE: Regex = Regex::new(
        r"^(?:https?://)?(?:(?:www\.|m\.)?youtube\.com/(?:watch\?v=|embed/)|(?:www\.)?youtu\.be/)[A-Za-z0-9_-]+(?:[?&#/]\S*)?$"
    )
    .expect("accepted shape pattern compiles");

    // Looser patterns used only to pull the id out of a URL, in priority order.
    static ref ID_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"(?:youtube\.com/watch\?v=|youtu\.be/|youtube\.com/embed/)([A-Za-z0-9_-]+)")
            .expect("primary id pattern compiles"),
        Regex::new(r"youtube\.com/watch\?(?:\S*&)?v=([A-Za-z0-9_-]+)")
            .expect("query id pattern compiles"),
        Regex::new(r"youtube\.com/v/([A-Za-z0-9_-]+)").expect("legacy id pattern compiles"),
    ];
}

/// Returns true when `candidate` looks like a YouTube video link.
///
/// Leading and trailing whitespace is ignored. Anything else that does not
/// match one of the accepted shapes is simply `false`.
pub fn is_valid_youtube_url(candidate: &str) -> bool {
    ACCEPTED_SHAPE.is_match(candidate.trim())
}

/// Pull the video id out of a YouTube URL.
pub fn extract_video_id(url: &str) -> Option<String> {
    let url = url.trim();
    if url.is_empty() {
        return None;
    }

    ID_PATTERNS
        .iter()
        .find_map(|pattern| pattern.captures(url))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

pub fn canonical_watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={}", video_id)
}
