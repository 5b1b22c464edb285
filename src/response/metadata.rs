//! Read-only view of a response head.

use std::io;

use reqwest::StatusCode;
use reqwest::header::{CONTENT_DISPOSITION, CONTENT_LENGTH, CONTENT_TYPE, HeaderMap, HeaderName};

use super::output::OutputSink;

/// Status, headers and the derived fields the dispatcher needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseMetadata {
    /// Numeric status code.
    pub status: u16,
    /// Canonical reason phrase, empty when the code has none.
    pub status_text: String,
    /// Headers in iteration order; non-UTF-8 values are decoded lossily.
    pub headers: Vec<(String, String)>,
    /// `Content-Type` value, empty when absent.
    pub content_type: String,
    /// `Content-Length` when present and numeric.
    pub content_length: Option<u64>,
    /// `Content-Disposition` value when present.
    pub content_disposition: Option<String>,
}

impl ResponseMetadata {
    /// Builds the view from a transport response.
    #[must_use]
    pub fn from_response(response: &reqwest::Response) -> Self {
        Self::from_parts(response.status(), response.headers())
    }

    /// Builds the view from a status code and header map.
    #[must_use]
    pub fn from_parts(status: StatusCode, headers: &HeaderMap) -> Self {
        let header_str = |name: HeaderName| {
            headers
                .get(name)
                .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
        };

        Self {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            headers: headers
                .iter()
                .map(|(k, v)| {
                    (
                        k.as_str().to_string(),
                        String::from_utf8_lossy(v.as_bytes()).into_owned(),
                    )
                })
                .collect(),
            content_type: header_str(CONTENT_TYPE).unwrap_or_default(),
            content_length: header_str(CONTENT_LENGTH).and_then(|v| v.trim().parse().ok()),
            content_disposition: header_str(CONTENT_DISPOSITION),
        }
    }

    /// Whether the status is in `200..400`.
    #[must_use]
    pub fn is_success(&self) -> bool {
        is_success_status(self.status)
    }

    /// `HTTP/1.1 <status> <statusText>`.
    #[must_use]
    pub fn status_line(&self) -> String {
        format!("HTTP/1.1 {} {}", self.status, self.status_text)
            .trim_end()
            .to_string()
    }

    /// Writes the status line, one `<key> <value>` line per header, then a blank line.
    ///
    /// # Errors
    ///
    /// Returns any error from `out`.
    pub fn write_verbose<O: OutputSink + ?Sized>(&self, out: &mut O) -> io::Result<()> {
        out.line(&self.status_line())?;
        for (key, value) in &self.headers {
            out.line(&format!("{key} {value}"))?;
        }
        out.line("")
    }
}

/// Whether `status` counts as success (`200 <= status < 400`).
#[must_use]
pub fn is_success_status(status: u16) -> bool {
    (200..400).contains(&status)
}
