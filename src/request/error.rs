//! Error types for building request options.

use thiserror::Error;

use super::options::HttpMethod;

/// Errors raised while turning command-line input into [`RequestOptions`](super::RequestOptions).
#[derive(Debug, Error)]
pub enum OptionsError {
    /// The method is not one of the supported HTTP methods.
    #[error("{method} is not a valid HTTP method. Available methods: {}", HttpMethod::names())]
    InvalidMethod {
        /// The rejected method, upper-cased.
        method: String,
    },

    /// The target could not be parsed as an HTTP(S) URL, even with an `http://` prefix.
    #[error("{input} is not a valid URL")]
    InvalidUrl {
        /// The raw user input.
        input: String,
    },
}

impl OptionsError {
    /// Creates an invalid method error.
    pub fn invalid_method(method: impl Into<String>) -> Self {
        Self::InvalidMethod {
            method: method.into(),
        }
    }

    /// Creates an invalid URL error.
    pub fn invalid_url(input: impl Into<String>) -> Self {
        Self::InvalidUrl {
            input: input.into(),
        }
    }
}
