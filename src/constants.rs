//! Constants for the HTTP client (timeouts, defaults).

/// Default HTTP connect timeout (30 seconds).
pub const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Default idle read timeout (5 minutes between body reads).
///
/// Applied per read rather than to the whole request so long-lived
/// event streams are not cut off.
pub const READ_TIMEOUT_SECS: u64 = 300;

/// Upper bound accepted for either timeout on the command line.
pub const MAX_TIMEOUT_SECS: u64 = 3600;

/// Stem used when a download has no server-suggested filename.
pub const DEFAULT_FILE_STEM: &str = "Untitled";

/// Extension used when a content type is present but not in the lookup table.
pub const DEFAULT_EXTENSION: &str = "bin";
