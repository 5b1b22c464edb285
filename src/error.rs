//! Error types for performing a request and rendering its response.
//!
//! Display strings carry the summary only; the underlying cause is kept as
//! the error source so `{:#}` renders `<summary>: <detail>`.

use std::error::Error as StdError;
use std::path::PathBuf;

use thiserror::Error;

/// Boxed error produced by a body stream.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Errors that can end a request.
///
/// Every variant is fatal for the invocation; none are retried.
#[derive(Debug, Error)]
pub enum HttpError {
    /// The request could not be sent or no complete response was received.
    #[error("unable to reach {url}")]
    Transport {
        /// The target URL.
        url: String,
        /// The underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// A request header name or value could not be encoded.
    #[error("invalid request header {name:?}")]
    InvalidHeader {
        /// The offending header name.
        name: String,
    },

    /// The response status is outside `200..400`.
    #[error("request failed: {status} {status_text}")]
    Status {
        /// Numeric status code.
        status: u16,
        /// Reason phrase (empty when the code has none).
        status_text: String,
    },

    /// Reading a streaming body failed mid-transfer.
    ///
    /// Output already written to stdout is not retracted.
    #[error("streaming error")]
    Streaming {
        /// The underlying read error.
        #[source]
        source: BoxError,
    },

    /// No filename could be derived for a binary response.
    #[error("cannot determine filename for content type {content_type:?}")]
    FilenameResolution {
        /// The response content type (empty when absent).
        content_type: String,
    },

    /// Reading the body or writing the destination file failed during a download.
    ///
    /// The partial file is left on disk.
    #[error("write file error for {}", path.display())]
    Write {
        /// The destination file.
        path: PathBuf,
        /// What failed: the body read or the disk write.
        #[source]
        source: TransferError,
    },

    /// A body declared as JSON is not valid JSON.
    #[error("invalid JSON response body")]
    Parse {
        /// The parser error.
        #[source]
        source: serde_json::Error,
    },

    /// Writing to the output sink (normally stdout) failed.
    #[error("failed to write output")]
    Output {
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

/// Failure inside the progress-reporting byte sink.
#[derive(Debug, Error)]
pub enum TransferError {
    /// The body stream returned an error.
    #[error("reading response body failed after {written} bytes")]
    Read {
        /// Bytes written before the failure.
        written: u64,
        /// The stream error.
        #[source]
        source: BoxError,
    },

    /// The destination rejected a write.
    #[error("writing to disk failed after {written} bytes")]
    Write {
        /// Bytes written before the failure.
        written: u64,
        /// The IO error.
        #[source]
        source: std::io::Error,
    },
}

impl HttpError {
    /// Creates a transport error for `url`.
    pub fn transport(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Transport {
            url: url.into(),
            source,
        }
    }

    /// Creates an invalid header error.
    pub fn invalid_header(name: impl Into<String>) -> Self {
        Self::InvalidHeader { name: name.into() }
    }

    /// Creates a status error.
    pub fn status(status: u16, status_text: impl Into<String>) -> Self {
        Self::Status {
            status,
            status_text: status_text.into(),
        }
    }

    /// Creates a streaming error.
    pub fn streaming(source: impl Into<BoxError>) -> Self {
        Self::Streaming {
            source: source.into(),
        }
    }

    /// Creates a filename resolution error.
    pub fn filename_resolution(content_type: impl Into<String>) -> Self {
        Self::FilenameResolution {
            content_type: content_type.into(),
        }
    }

    /// Creates a write error for `path`.
    pub fn write(path: impl Into<PathBuf>, source: TransferError) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }

    /// Creates a JSON parse error.
    #[must_use]
    pub fn parse(source: serde_json::Error) -> Self {
        Self::Parse { source }
    }

    /// Creates an output error.
    #[must_use]
    pub fn output(source: std::io::Error) -> Self {
        Self::Output { source }
    }
}
