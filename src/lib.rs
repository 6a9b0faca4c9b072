pub mod cli;
pub mod server;
pub mod store;
pub mod youtube;

use serde::Serialize;

/// Token grammar shared by the extractor and the watch-URL validator, so
/// the two checks can never disagree on what counts as a video ID.
const VIDEO_ID: &str = "[a-zA-Z0-9_-]+";

/// A single captioned segment
#[derive(Debug, Clone, Serialize)]
pub struct Segment {
    pub text: String,
    pub start: f64,
    pub duration: f64,
}

/// Extract video ID from various YouTube URL formats
pub fn extract_video_id(input: &str) -> Option<String> {
    let input = input.trim();

    // youtube.com/watch?v=ID (v= anywhere in the query string)
    if let Some(caps) = regex::Regex::new(&format!(r"youtube\.com/watch\?(?:[^#]*&)?v=({VIDEO_ID})"))
        .unwrap()
        .captures(input)
    {
        return Some(caps[1].to_string());
    }

    // youtu.be/ID
    if let Some(caps) = regex::Regex::new(&format!(r"youtu\.be/({VIDEO_ID})"))
        .unwrap()
        .captures(input)
    {
        return Some(caps[1].to_string());
    }

    // youtube.com/embed/ID
    if let Some(caps) = regex::Regex::new(&format!(r"youtube\.com/embed/({VIDEO_ID})"))
        .unwrap()
        .captures(input)
    {
        return Some(caps[1].to_string());
    }

    // youtube.com/shorts/ID
    if let Some(caps) = regex::Regex::new(&format!(r"youtube\.com/shorts/({VIDEO_ID})"))
        .unwrap()
        .captures(input)
    {
        return Some(caps[1].to_string());
    }

    // youtube.com/v/ID
    if let Some(caps) = regex::Regex::new(&format!(r"youtube\.com/v/({VIDEO_ID})"))
        .unwrap()
        .captures(input)
    {
        return Some(caps[1].to_string());
    }

    None
}

/// Canonical watch-URL check used as the request precondition. Stricter
/// than the extractor (watch pages only), but any URL it accepts is
/// guaranteed to extract an identifier.
pub fn is_watch_url(input: &str) -> bool {
    regex::Regex::new(&format!(
        r"^(https?://)?(www\.)?youtube\.com/watch\?v={VIDEO_ID}([#&?].*)?$"
    ))
    .unwrap()
    .is_match(input.trim())
}

/// Join caption fragments into the stored transcript text, each fragment
/// separated by a space and a newline. Empty input means no transcript.
pub fn join_transcript(segments: &[Segment]) -> Option<String> {
    if segments.is_empty() {
        return None;
    }
    Some(
        segments
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(" \n"),
    )
}
