//! Request options: method, target URL, headers, and body for a single request.

use std::fmt;
use std::str::FromStr;

use tracing::{trace, warn};
use url::Url;

use super::error::OptionsError;

/// HTTP methods accepted by the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
}

impl HttpMethod {
    /// All accepted methods, in help-text order.
    pub const ALL: [HttpMethod; 7] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Delete,
        HttpMethod::Patch,
        HttpMethod::Head,
        HttpMethod::Options,
    ];

    /// Upper-case wire name of the method.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
        }
    }

    /// Comma-separated list of accepted method names.
    #[must_use]
    pub fn names() -> String {
        Self::ALL
            .iter()
            .map(|m| m.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = OptionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == upper)
            .ok_or_else(|| OptionsError::invalid_method(upper))
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Head => reqwest::Method::HEAD,
            HttpMethod::Options => reqwest::Method::OPTIONS,
        }
    }
}

/// Everything needed to issue one request.
///
/// Built once by the caller and handed by value to
/// [`Dispatcher::perform`](crate::response::Dispatcher::perform).
#[derive(Debug, Clone)]
pub struct RequestOptions {
    /// Target URL (always `http` or `https`).
    pub url: Url,
    /// HTTP method.
    pub method: HttpMethod,
    /// Request headers in insertion order. Keys are kept as provided.
    pub headers: Vec<(String, String)>,
    /// Optional request body.
    pub data: Option<String>,
    /// Print the status line and response headers before the body.
    pub verbose: bool,
}

impl RequestOptions {
    /// Creates a `GET` request for `url` with no headers or body.
    #[must_use]
    pub fn new(url: Url) -> Self {
        Self {
            url,
            method: HttpMethod::Get,
            headers: Vec::new(),
            data: None,
            verbose: false,
        }
    }

    /// Sets the HTTP method.
    #[must_use]
    pub fn method(mut self, method: HttpMethod) -> Self {
        self.method = method;
        self
    }

    /// Adds a header. A repeated key replaces the earlier value.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        let value = value.into();
        if let Some(existing) = self.headers.iter_mut().find(|(k, _)| *k == key) {
            existing.1 = value;
        } else {
            self.headers.push((key, value));
        }
        self
    }

    /// Sets the request body.
    #[must_use]
    pub fn data(mut self, data: impl Into<String>) -> Self {
        self.data = Some(data.into());
        self
    }

    /// Enables or disables verbose output.
    #[must_use]
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

/// Parses a `Key: Value` header argument.
///
/// Splits at the first `:` so values such as `Bearer a:b` survive intact.
/// Returns `None` when the key or value is empty.
#[must_use]
pub fn parse_header(raw: &str) -> Option<(String, String)> {
    let Some((key, value)) = raw.split_once(':') else {
        warn!(header = %raw, "ignoring header without ':' separator");
        return None;
    };
    let key = key.trim();
    let value = value.trim();
    if key.is_empty() || value.is_empty() {
        warn!(header = %raw, "ignoring header with empty key or value");
        return None;
    }
    Some((key.to_string(), value.to_string()))
}

/// Parses the target URL, prefixing `http://` when no HTTP(S) scheme is given.
///
/// # Errors
///
/// Returns [`OptionsError::InvalidUrl`] when neither form is a valid HTTP(S) URL.
pub fn parse_target_url(input: &str) -> Result<Url, OptionsError> {
    let input = input.trim();
    if let Ok(url) = Url::parse(input)
        && is_http(&url)
    {
        return Ok(url);
    }

    let prefixed = format!("http://{input}");
    trace!(url = %prefixed, "retrying target with http:// prefix");
    match Url::parse(&prefixed) {
        Ok(url) if is_http(&url) => Ok(url),
        _ => Err(OptionsError::invalid_url(input)),
    }
}

fn is_http(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https") && url.host_str().is_some_and(|h| !h.is_empty())
}
