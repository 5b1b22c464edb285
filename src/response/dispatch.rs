//! Response dispatcher: performs one request and renders or saves the body.
//!
//! Flow: send, read the head, optionally echo it, check the status, then
//! hand the body to exactly one of the streaming, binary, JSON or text
//! handlers selected by [`classify`].

use std::path::{Path, PathBuf};

use reqwest::{Response, StatusCode};
use tokio::fs::File;
use tracing::{debug, info, instrument};

use super::classify::{ContentStrategy, classify};
use super::filename::{destination_path, resolve_filename};
use super::metadata::ResponseMetadata;
use super::mime::{ExtensionLookup, extension_for};
use super::output::OutputSink;
use super::sink::{BarProgress, DownloadState, write_body};
use super::streaming::stream_text;
use crate::error::{HttpError, TransferError};
use crate::request::{HttpClient, HttpMethod, RequestOptions};

/// What a successful [`Dispatcher::perform`] did with the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Chunks were written to the output as they arrived.
    Streamed {
        /// Raw bytes received.
        bytes: u64,
    },
    /// The body was saved to a file.
    Saved {
        /// Destination path.
        path: PathBuf,
        /// Bytes written.
        bytes: u64,
    },
    /// The body was pretty-printed as JSON.
    Json,
    /// The body was printed verbatim.
    Text {
        /// Length of the printed body in bytes.
        bytes: usize,
    },
    /// The response carries no body (`HEAD`, 204, 205, 304).
    NoBody,
}

/// Performs requests and routes each response to its handler.
///
/// Output goes through the injected [`OutputSink`]; binary bodies are
/// written under `output_dir`.
#[derive(Debug)]
pub struct Dispatcher<O: OutputSink> {
    client: HttpClient,
    output: O,
    output_dir: PathBuf,
    show_progress: bool,
    extension_lookup: ExtensionLookup,
}

impl<O: OutputSink> Dispatcher<O> {
    /// Creates a dispatcher saving into the current directory, without a
    /// visible progress bar.
    #[must_use]
    pub fn new(client: HttpClient, output: O) -> Self {
        Self {
            client,
            output,
            output_dir: PathBuf::from("."),
            show_progress: false,
            extension_lookup: extension_for,
        }
    }

    /// Sets the directory binary downloads are saved into.
    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Draws the download progress bar on stderr when `show` is set.
    #[must_use]
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Replaces the content-type to extension table.
    #[must_use]
    pub fn with_extension_lookup(mut self, lookup: ExtensionLookup) -> Self {
        self.extension_lookup = lookup;
        self
    }

    /// The output sink.
    #[must_use]
    pub fn output(&self) -> &O {
        &self.output
    }

    /// Consumes the dispatcher, returning the output sink.
    #[must_use]
    pub fn into_output(self) -> O {
        self.output
    }

    /// Sends the request and handles the response body.
    ///
    /// With `verbose` set, the status line and headers are written before
    /// the status check, so they appear for failed responses too.
    ///
    /// # Errors
    ///
    /// - [`HttpError::Transport`] / [`HttpError::InvalidHeader`] from sending
    /// - [`HttpError::Status`] when the status is outside `200..400`
    /// - [`HttpError::Streaming`] if a streamed body fails mid-transfer
    /// - [`HttpError::FilenameResolution`] / [`HttpError::Write`] for binary bodies
    /// - [`HttpError::Parse`] for a JSON body that does not parse
    /// - [`HttpError::Output`] if the output sink fails
    #[instrument(skip(self, options), fields(method = %options.method, url = %options.url))]
    pub async fn perform(&mut self, options: RequestOptions) -> Result<Outcome, HttpError> {
        let response = self.client.send(&options).await?;
        let metadata = ResponseMetadata::from_response(&response);
        debug!(
            status = metadata.status,
            content_type = %metadata.content_type,
            "response received"
        );

        if options.verbose {
            metadata
                .write_verbose(&mut self.output)
                .map_err(HttpError::output)?;
        }

        if !metadata.is_success() {
            return Err(HttpError::status(
                metadata.status,
                metadata.status_text.clone(),
            ));
        }

        if !has_body(options.method, response.status()) {
            debug!("response has no body");
            return Ok(Outcome::NoBody);
        }

        let strategy = classify(&metadata.content_type);
        debug!(?strategy, "dispatching body");

        match strategy {
            ContentStrategy::Streaming => {
                let bytes = stream_text(response.bytes_stream(), &mut self.output).await?;
                Ok(Outcome::Streamed { bytes })
            }
            ContentStrategy::Binary => self.save_binary(response, &metadata).await,
            ContentStrategy::Json => {
                let url = options.url.to_string();
                let body = response
                    .bytes()
                    .await
                    .map_err(|e| HttpError::transport(url, e))?;
                let rendered = render_json(&body)?;
                self.output.line(&rendered).map_err(HttpError::output)?;
                Ok(Outcome::Json)
            }
            ContentStrategy::Text => {
                let url = options.url.to_string();
                let body = response
                    .text()
                    .await
                    .map_err(|e| HttpError::transport(url, e))?;
                self.output.line(&body).map_err(HttpError::output)?;
                Ok(Outcome::Text { bytes: body.len() })
            }
        }
    }

    async fn save_binary(
        &self,
        response: Response,
        metadata: &ResponseMetadata,
    ) -> Result<Outcome, HttpError> {
        let filename = resolve_filename(
            metadata.content_disposition.as_deref(),
            &metadata.content_type,
            self.extension_lookup,
        )
        .ok_or_else(|| HttpError::filename_resolution(metadata.content_type.clone()))?;
        let path = destination_path(&self.output_dir, &filename);
        debug!(filename = %filename, path = %path.display(), "resolved output path");

        let mut file = open_destination(&path).await?;
        let mut state = DownloadState::new(filename, metadata.content_length);
        let mut progress = BarProgress::new(state.total(), self.show_progress);

        let bytes = write_body(response.bytes_stream(), &mut file, &mut state, &mut progress)
            .await
            .map_err(|e| HttpError::write(path.clone(), e))?;

        info!(path = %path.display(), bytes, "download complete");
        Ok(Outcome::Saved { path, bytes })
    }
}

/// Creates (or truncates) the destination file.
async fn open_destination(path: &Path) -> Result<File, HttpError> {
    File::create(path).await.map_err(|source| {
        HttpError::write(path.to_path_buf(), TransferError::Write { written: 0, source })
    })
}

/// Whether a response to `method` with `status` can carry a body.
fn has_body(method: HttpMethod, status: StatusCode) -> bool {
    method != HttpMethod::Head
        && !matches!(
            status,
            StatusCode::NO_CONTENT | StatusCode::RESET_CONTENT | StatusCode::NOT_MODIFIED
        )
}

/// Parses `body` as JSON and pretty-prints it with 2-space indentation.
///
/// Object keys keep the order they had in the body.
///
/// # Errors
///
/// Returns [`HttpError::Parse`] if `body` is not valid JSON.
pub fn render_json(body: &[u8]) -> Result<String, HttpError> {
    let value: serde_json::Value = serde_json::from_slice(body).map_err(HttpError::parse)?;
    serde_json::to_string_pretty(&value).map_err(HttpError::parse)
}
