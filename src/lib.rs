//! mhttp core library
//!
//! Performs a single HTTP request and handles the response according to its
//! content type: event streams are echoed as they arrive, binary bodies are
//! saved to disk with a progress bar, JSON is pretty-printed and everything
//! else is printed as text.
//!
//! # Architecture
//!
//! - [`request`] - request options and the transport client
//! - [`response`] - classification, filename resolution, and body handlers
//! - [`error`] - error types shared by both sides
//!
//! # Example
//!
//! ```no_run
//! use mhttp_core::{Dispatcher, HttpClient, RequestOptions, StdoutSink, parse_target_url};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let options = RequestOptions::new(parse_target_url("https://example.com/data.json")?);
//! let mut dispatcher = Dispatcher::new(HttpClient::new(), StdoutSink);
//! dispatcher.perform(options).await?;
//! # Ok(())
//! # }
//! ```

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod constants;
pub mod error;
pub mod request;
pub mod response;
mod user_agent;

// Re-export commonly used types
pub use error::{BoxError, HttpError, TransferError};
pub use request::{
    HttpClient, HttpMethod, OptionsError, RequestOptions, parse_header, parse_target_url,
};
pub use response::{
    BufferSink, ContentStrategy, Dispatcher, ExtensionLookup, Outcome, OutputSink, StdoutSink,
    classify, extension_for, resolve_filename,
};
