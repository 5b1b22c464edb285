//! Content classification: picks how a response body is handled.

/// How a response body is consumed. Selected once per response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentStrategy {
    /// Decode chunks as UTF-8 and write each to stdout as it arrives.
    Streaming,
    /// Save the raw bytes to a file.
    Binary,
    /// Buffer, parse, and pretty-print as JSON.
    Json,
    /// Buffer and print verbatim.
    Text,
}

const STREAMING_MARKERS: &[&str] = &["text/event-stream", "chunked"];

const BINARY_MARKERS: &[&str] = &[
    "application/octet-stream",
    "application/zip",
    "application/pdf",
    "image/",
    "audio/",
    "video/",
    "application/vnd.",
    "application/x-executable",
];

const JSON_MARKER: &str = "application/json";

/// Classifies a `content-type` value. First match wins:
/// streaming, then binary, then JSON, then text.
///
/// Matching is a case-insensitive substring test; an empty or unknown
/// content type is [`ContentStrategy::Text`].
#[must_use]
pub fn classify(content_type: &str) -> ContentStrategy {
    let content_type = content_type.to_ascii_lowercase();
    let contains = |marker: &&str| content_type.contains(*marker);

    if STREAMING_MARKERS.iter().any(contains) {
        ContentStrategy::Streaming
    } else if BINARY_MARKERS.iter().any(contains) {
        ContentStrategy::Binary
    } else if content_type.contains(JSON_MARKER) {
        ContentStrategy::Json
    } else {
        ContentStrategy::Text
    }
}
