//! Filename resolution for binary downloads.
//!
//! A name comes from the `Content-Disposition` header when one of its
//! matchers succeeds, otherwise from the content type as `Untitled.<ext>`.

use std::path::{Component, Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::mime::ExtensionLookup;
use crate::constants::{DEFAULT_EXTENSION, DEFAULT_FILE_STEM};

#[allow(clippy::expect_used)]
static QUOTED_FILENAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)filename="([^"]*)""#).expect("quoted filename regex is valid") // Static pattern, safe to panic
});

#[allow(clippy::expect_used)]
static UNQUOTED_FILENAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)filename=([^;\n]*)").expect("unquoted filename regex is valid") // Static pattern, safe to panic
});

#[allow(clippy::expect_used)]
static EXTENDED_FILENAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)filename\*=UTF-8'[^']*'([^;\n]*)").expect("extended filename regex is valid") // Static pattern, safe to panic
});

/// A single `Content-Disposition` matcher. `Some` means the parameter was present.
type DispositionMatcher = fn(&str) -> Option<String>;

/// Matchers in precedence order: quoted beats unquoted beats extended.
const DISPOSITION_MATCHERS: [DispositionMatcher; 3] =
    [quoted_filename, unquoted_filename, extended_filename];

/// `filename="..."`, returned exactly as written.
fn quoted_filename(header: &str) -> Option<String> {
    QUOTED_FILENAME
        .captures(header)
        .map(|caps| caps[1].to_string())
}

/// `filename=...` up to `;` or newline, trimmed.
fn unquoted_filename(header: &str) -> Option<String> {
    UNQUOTED_FILENAME
        .captures(header)
        .map(|caps| caps[1].trim().to_string())
}

/// `filename*=UTF-8''...` (RFC 5987), percent-decoded.
///
/// Invalid percent-encoding counts as no match.
fn extended_filename(header: &str) -> Option<String> {
    let caps = EXTENDED_FILENAME.captures(header)?;
    let encoded = caps[1].trim();
    match urlencoding::decode(encoded) {
        Ok(decoded) => Some(decoded.into_owned()),
        Err(e) => {
            debug!(value = %encoded, error = %e, "undecodable extended filename");
            None
        }
    }
}

/// Extracts a filename from a `Content-Disposition` value.
///
/// The first matcher that finds its parameter decides; an empty value from
/// that matcher yields `None` rather than falling through to later ones.
#[must_use]
pub fn filename_from_disposition(header: &str) -> Option<String> {
    DISPOSITION_MATCHERS
        .iter()
        .find_map(|matcher| matcher(header))
        .filter(|name| !name.is_empty())
}

/// Builds `Untitled.<ext>` from the content type.
///
/// An unmapped content type gets the `bin` extension; an empty one yields
/// `None` because no name can be formed.
#[must_use]
pub fn default_filename(content_type: &str, lookup: ExtensionLookup) -> Option<String> {
    if content_type.trim().is_empty() {
        return None;
    }
    let ext = lookup(content_type).unwrap_or(DEFAULT_EXTENSION);
    Some(format!("{DEFAULT_FILE_STEM}.{ext}"))
}

/// Resolves the save-to filename for a binary response.
///
/// Returns `None` when neither the disposition header nor the content type
/// can produce a name; the caller must not create a file in that case.
#[must_use]
pub fn resolve_filename(
    content_disposition: Option<&str>,
    content_type: &str,
    lookup: ExtensionLookup,
) -> Option<String> {
    content_disposition
        .and_then(filename_from_disposition)
        .or_else(|| default_filename(content_type, lookup))
}

/// Reduces a server-suggested name to a single safe path segment.
///
/// Replaces characters that are invalid on common filesystems
/// (`/ \ : * ? " < > |` and control characters) with `_`, and rewrites
/// `.`/`..` so the result never leaves the output directory.
#[must_use]
pub fn sanitize_filename(name: &str) -> String {
    let sanitized: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if sanitized.trim().is_empty() {
        return "_".to_string();
    }

    if is_safe_filename_segment(&sanitized) {
        sanitized
    } else {
        sanitized.replace('.', "_")
    }
}

/// Joins the sanitized `filename` onto `dir`.
#[must_use]
pub fn destination_path(dir: &Path, filename: &str) -> PathBuf {
    dir.join(sanitize_filename(filename))
}

fn is_safe_filename_segment(name: &str) -> bool {
    !Path::new(name).components().any(|component| {
        matches!(
            component,
            Component::CurDir | Component::ParentDir | Component::RootDir | Component::Prefix(_)
        )
    })
}
