//! HTTP client wrapper for issuing a single request.
//!
//! This module provides the `HttpClient` struct which configures timeouts,
//! decompression, and the User-Agent, and maps transport failures to
//! [`HttpError::Transport`].

use std::time::Duration;

use reqwest::header::{HeaderName, HeaderValue};
use reqwest::{Client, Response};
use tracing::{debug, instrument};

use super::options::RequestOptions;
use crate::constants::{CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS};
use crate::error::HttpError;
use crate::user_agent;

/// HTTP client used to send the request.
///
/// There is no total-request timeout: only connecting and each body read
/// are bounded, so long-lived event streams keep flowing.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient {
    /// Creates a new HTTP client with default timeouts.
    ///
    /// Default configuration:
    /// - Connect timeout: 30 seconds
    /// - Read timeout: 5 minutes between reads
    /// - Gzip decompression: enabled
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails to build with the static
    /// configuration. This should never happen in practice.
    #[must_use]
    pub fn new() -> Self {
        Self::new_with_timeouts(CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS)
    }

    /// Creates a new HTTP client with explicit timeout values.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails to build with the supplied
    /// timeout configuration.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new_with_timeouts(connect_timeout_secs: u64, read_timeout_secs: u64) -> Self {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(connect_timeout_secs))
            .read_timeout(Duration::from_secs(read_timeout_secs))
            .gzip(true)
            .user_agent(user_agent::default_user_agent())
            .build()
            .expect("failed to build HTTP client with static configuration");
        Self { client }
    }

    /// Sends the request described by `options` and returns the response head.
    ///
    /// The status code is not checked here; the body is left unread.
    ///
    /// # Errors
    ///
    /// - [`HttpError::InvalidHeader`] if a header cannot be encoded
    /// - [`HttpError::Transport`] if the request could not be sent or no
    ///   response was received (DNS, refused connection, timeout)
    #[instrument(skip(self, options), fields(method = %options.method, url = %options.url))]
    pub async fn send(&self, options: &RequestOptions) -> Result<Response, HttpError> {
        let mut request = self
            .client
            .request(options.method.into(), options.url.clone());

        for (name, value) in &options.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| HttpError::invalid_header(name))?;
            let header_value =
                HeaderValue::from_str(value).map_err(|_| HttpError::invalid_header(name))?;
            request = request.header(header_name, header_value);
        }

        if let Some(body) = &options.data {
            request = request.body(body.clone());
        }

        debug!("sending request");
        let response = request
            .send()
            .await
            .map_err(|e| HttpError::transport(options.url.as_str(), e))?;
        debug!(status = response.status().as_u16(), "response received");
        Ok(response)
    }

    /// Returns a reference to the underlying reqwest client.
    #[must_use]
    pub fn inner(&self) -> &Client {
        &self.client
    }
}
