//! Response side: classification, filename resolution, and the handlers
//! that stream, save, or print a body.
//!
//! [`Dispatcher`] is the entry point; the remaining items are exposed for
//! callers that want to reuse a single stage.

mod classify;
mod dispatch;
mod filename;
mod metadata;
mod mime;
mod output;
mod sink;
mod streaming;

pub use classify::{ContentStrategy, classify};
pub use dispatch::{Dispatcher, Outcome, render_json};
pub use filename::{
    default_filename, destination_path, filename_from_disposition, resolve_filename,
    sanitize_filename,
};
pub use metadata::{ResponseMetadata, is_success_status};
pub use mime::{ExtensionLookup, extension_for};
pub use output::{BufferSink, OutputSink, StdoutSink};
pub use sink::{BarProgress, DownloadState, NoProgress, ProgressObserver, write_body};
pub use streaming::{Utf8ChunkDecoder, stream_text};
