//! Request side: options parsed from the command line and the transport client.
//!
//! # Example
//!
//! ```no_run
//! use mhttp_core::request::{HttpClient, HttpMethod, RequestOptions, parse_target_url};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let options = RequestOptions::new(parse_target_url("example.com/api")?)
//!     .method(HttpMethod::Post)
//!     .header("Content-Type", "application/json")
//!     .data(r#"{"name":"mhttp"}"#);
//! let response = HttpClient::new().send(&options).await?;
//! println!("{}", response.status());
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod options;

pub use client::HttpClient;
pub use error::OptionsError;
pub use options::{HttpMethod, RequestOptions, parse_header, parse_target_url};
