//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;
use mhttp_core::constants::{CONNECT_TIMEOUT_SECS, MAX_TIMEOUT_SECS, READ_TIMEOUT_SECS};
use mhttp_core::{HttpMethod, OptionsError, RequestOptions, parse_header, parse_target_url};

/// A curl-like HTTP tool.
///
/// JSON responses are pretty-printed, event streams are echoed as they
/// arrive, and binary responses are saved to a file.
#[derive(Parser, Debug)]
#[command(name = "mhttp")]
#[command(author, version, about)]
pub struct Args {
    /// Target URL (`http://` is assumed when no scheme is given)
    pub url: String,

    /// HTTP method (GET, POST, PUT, DELETE, PATCH, HEAD, OPTIONS)
    #[arg(short = 'X', long, default_value = "GET")]
    pub method: HttpMethod,

    /// Request header as "Key: Value" (repeatable)
    #[arg(short = 'H', long = "header", value_name = "HEADER")]
    pub headers: Vec<String>,

    /// Request body
    #[arg(short, long)]
    pub data: Option<String>,

    /// Print the status line and response headers
    #[arg(short, long)]
    pub verbose: bool,

    /// Directory binary downloads are saved into
    #[arg(short, long, default_value = ".", value_name = "DIR")]
    pub output_dir: PathBuf,

    /// Connect timeout in seconds (1-3600)
    #[arg(long, default_value_t = CONNECT_TIMEOUT_SECS, value_parser = clap::value_parser!(u64).range(1..=MAX_TIMEOUT_SECS))]
    pub connect_timeout: u64,

    /// Maximum idle time between body reads in seconds (1-3600)
    #[arg(long, default_value_t = READ_TIMEOUT_SECS, value_parser = clap::value_parser!(u64).range(1..=MAX_TIMEOUT_SECS))]
    pub read_timeout: u64,
}

impl Args {
    /// Builds the request described by the arguments.
    ///
    /// Malformed headers are skipped with a warning.
    pub fn to_request_options(&self) -> Result<RequestOptions, OptionsError> {
        let url = parse_target_url(&self.url)?;
        let mut options = RequestOptions::new(url)
            .method(self.method)
            .verbose(self.verbose);
        for (key, value) in self.headers.iter().filter_map(|raw| parse_header(raw)) {
            options = options.header(key, value);
        }
        if let Some(data) = &self.data {
            options = options.data(data.clone());
        }
        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_default_args_parses_successfully() {
        let args = Args::try_parse_from(["mhttp", "example.com"]).unwrap();
        assert_eq!(args.url, "example.com");
        assert_eq!(args.method, HttpMethod::Get);
        assert!(args.headers.is_empty());
        assert_eq!(args.data, None);
        assert!(!args.verbose);
        assert_eq!(args.output_dir, PathBuf::from("."));
        assert_eq!(args.connect_timeout, 30);
        assert_eq!(args.read_timeout, 300);
    }

    #[test]
    fn test_cli_url_is_required() {
        let err = Args::try_parse_from(["mhttp"]).unwrap_err();
        assert_eq!(
            err.kind(),
            clap::error::ErrorKind::MissingRequiredArgument
        );
    }

    #[test]
    fn test_cli_help_flag_shows_usage() {
        let err = Args::try_parse_from(["mhttp", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_cli_version_flag_shows_version() {
        let err = Args::try_parse_from(["mhttp", "--version"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_cli_method_is_case_insensitive() {
        let args = Args::try_parse_from(["mhttp", "-X", "post", "example.com"]).unwrap();
        assert_eq!(args.method, HttpMethod::Post);

        let args = Args::try_parse_from(["mhttp", "--method", "Delete", "example.com"]).unwrap();
        assert_eq!(args.method, HttpMethod::Delete);
    }

    #[test]
    fn test_cli_invalid_method_rejected() {
        let err = Args::try_parse_from(["mhttp", "-X", "FETCH", "example.com"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
        assert!(err.to_string().contains("Available methods"), "{err}");
    }

    #[test]
    fn test_cli_headers_repeatable() {
        let args = Args::try_parse_from([
            "mhttp",
            "-H",
            "Accept: application/json",
            "--header",
            "X-Trace: a:b",
            "example.com",
        ])
        .unwrap();
        assert_eq!(args.headers, vec!["Accept: application/json", "X-Trace: a:b"]);
    }

    #[test]
    fn test_cli_timeout_range() {
        let args =
            Args::try_parse_from(["mhttp", "--connect-timeout", "1", "--read-timeout", "3600", "x"])
                .unwrap();
        assert_eq!(args.connect_timeout, 1);
        assert_eq!(args.read_timeout, 3600);

        let err = Args::try_parse_from(["mhttp", "--connect-timeout", "0", "x"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);

        let err = Args::try_parse_from(["mhttp", "--read-timeout", "3601", "x"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn test_to_request_options_builds_request() {
        let args = Args::try_parse_from([
            "mhttp",
            "-X",
            "PUT",
            "-H",
            "Content-Type: application/json",
            "-H",
            "broken",
            "-d",
            r#"{"a":1}"#,
            "-v",
            "localhost:8080/items",
        ])
        .unwrap();

        let options = args.to_request_options().unwrap();

        assert_eq!(options.url.as_str(), "http://localhost:8080/items");
        assert_eq!(options.method, HttpMethod::Put);
        assert_eq!(
            options.headers,
            vec![("Content-Type".to_string(), "application/json".to_string())]
        );
        assert_eq!(options.data.as_deref(), Some(r#"{"a":1}"#));
        assert!(options.verbose);
    }

    #[test]
    fn test_to_request_options_repeated_header_keeps_last() {
        let args = Args::try_parse_from([
            "mhttp",
            "-H",
            "Accept: text/plain",
            "-H",
            "Accept: application/json",
            "example.com",
        ])
        .unwrap();
        let options = args.to_request_options().unwrap();
        assert_eq!(
            options.headers,
            vec![("Accept".to_string(), "application/json".to_string())]
        );
    }

    #[test]
    fn test_to_request_options_invalid_url() {
        let args = Args::try_parse_from(["mhttp", "[::1"]).unwrap();
        let err = args.to_request_options().unwrap_err();
        assert_eq!(err.to_string(), "[::1 is not a valid URL");
    }
}
