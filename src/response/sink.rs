//! Progress-reporting byte sink for binary downloads.
//!
//! Bytes flow one chunk at a time from the body stream to the destination;
//! progress is reported through a separate [`ProgressObserver`] so the write
//! path does not depend on how (or whether) progress is displayed.

use std::pin::pin;

use futures_util::{Stream, StreamExt};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::trace;

use crate::error::{BoxError, TransferError};

const PROGRESS_TEMPLATE: &str = "Progress [{bar:40}] {percent}% | {bytes}/{total_bytes}";
const PROGRESS_REFRESH_HZ: u8 = 5;

/// Per-download bookkeeping, owned by the binary handler for one transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadState {
    filename: String,
    total: Option<u64>,
    written: u64,
}

impl DownloadState {
    /// Starts a download of `filename` with an optional expected length.
    #[must_use]
    pub fn new(filename: impl Into<String>, total: Option<u64>) -> Self {
        Self {
            filename: filename.into(),
            total,
            written: 0,
        }
    }

    /// The resolved target filename.
    #[must_use]
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Expected length when known and positive.
    #[must_use]
    pub fn total(&self) -> Option<u64> {
        self.total.filter(|&total| total > 0)
    }

    /// Bytes written so far.
    #[must_use]
    pub fn written(&self) -> u64 {
        self.written
    }

    fn record(&mut self, len: usize) -> u64 {
        self.written = self.written.saturating_add(len as u64);
        self.written
    }
}

/// Side channel receiving transfer progress.
pub trait ProgressObserver {
    /// Called after each chunk is written with the cumulative byte count.
    fn advance(&mut self, written: u64);

    /// Called exactly once when the transfer ends, successfully or not.
    fn finish(&mut self);
}

/// Observer that ignores progress.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn advance(&mut self, _written: u64) {}
    fn finish(&mut self) {}
}

/// Terminal progress bar, present only when the total length is known.
#[derive(Debug)]
pub struct BarProgress {
    bar: Option<ProgressBar>,
}

impl BarProgress {
    /// Creates a bar for `total` bytes, drawn on stderr when `visible`.
    ///
    /// With an unknown or zero total there is no bar at all.
    #[must_use]
    pub fn new(total: Option<u64>, visible: bool) -> Self {
        let bar = total.filter(|&t| t > 0).map(|total| {
            let target = if visible {
                ProgressDrawTarget::stderr_with_hz(PROGRESS_REFRESH_HZ)
            } else {
                ProgressDrawTarget::hidden()
            };
            let bar = ProgressBar::with_draw_target(Some(total), target);
            bar.set_style(
                ProgressStyle::with_template(PROGRESS_TEMPLATE)
                    .map(|style| style.progress_chars("\u{2588}\u{2591}"))
                    .unwrap_or_else(|_| ProgressStyle::default_bar()),
            );
            bar
        });
        Self { bar }
    }

    /// Current bar position, or `None` when no bar is shown.
    #[must_use]
    pub fn position(&self) -> Option<u64> {
        self.bar.as_ref().map(ProgressBar::position)
    }

    /// Whether the bar has been cleared.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.bar.as_ref().is_none_or(ProgressBar::is_finished)
    }
}

impl ProgressObserver for BarProgress {
    fn advance(&mut self, written: u64) {
        if let Some(bar) = &self.bar {
            bar.set_position(written);
        }
    }

    fn finish(&mut self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }
}

/// Copies `body` into `dest` chunk by chunk, in order and unmodified.
///
/// Each chunk is written as received, counted in `state`, and reported to
/// `progress`. The first read or write error aborts the copy; bytes already
/// written stay in `dest`. `progress.finish()` runs on every exit path.
///
/// # Errors
///
/// - [`TransferError::Read`] if the body stream yields an error
/// - [`TransferError::Write`] if writing or flushing `dest` fails
pub async fn write_body<S, B, E, W, P>(
    body: S,
    dest: &mut W,
    state: &mut DownloadState,
    progress: &mut P,
) -> Result<u64, TransferError>
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
    E: Into<BoxError>,
    W: AsyncWrite + Unpin,
    P: ProgressObserver,
{
    let result = copy_chunks(body, dest, state, progress).await;
    progress.finish();
    result
}

async fn copy_chunks<S, B, E, W, P>(
    body: S,
    dest: &mut W,
    state: &mut DownloadState,
    progress: &mut P,
) -> Result<u64, TransferError>
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
    E: Into<BoxError>,
    W: AsyncWrite + Unpin,
    P: ProgressObserver,
{
    let mut body = pin!(body);

    while let Some(chunk) = body.next().await {
        let chunk = chunk.map_err(|e| TransferError::Read {
            written: state.written(),
            source: e.into(),
        })?;
        let bytes = chunk.as_ref();

        dest.write_all(bytes)
            .await
            .map_err(|e| TransferError::Write {
                written: state.written(),
                source: e,
            })?;

        let written = state.record(bytes.len());
        trace!(chunk = bytes.len(), written, "chunk written");
        progress.advance(written);
    }

    dest.flush().await.map_err(|e| TransferError::Write {
        written: state.written(),
        source: e,
    })?;

    Ok(state.written())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io;
    use std::pin::Pin;
    use std::task::{Context, Poll};

    use futures_util::stream;

    use super::*;

    #[derive(Default)]
    struct RecordingProgress {
        updates: Vec<u64>,
        finished: usize,
    }

    impl ProgressObserver for RecordingProgress {
        fn advance(&mut self, written: u64) {
            self.updates.push(written);
        }
        fn finish(&mut self) {
            self.finished += 1;
        }
    }

    /// Writer that accepts `limit` bytes and then fails.
    struct FailingWriter {
        accepted: Vec<u8>,
        limit: usize,
    }

    impl AsyncWrite for FailingWriter {
        fn poll_write(
            mut self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
            buf: &[u8],
        ) -> Poll<io::Result<usize>> {
            if self.accepted.len() + buf.len() > self.limit {
                return Poll::Ready(Err(io::Error::new(io::ErrorKind::StorageFull, "disk full")));
            }
            self.accepted.extend_from_slice(buf);
            Poll::Ready(Ok(buf.len()))
        }

        fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
            Poll::Ready(Ok(()))
        }

        fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
            Poll::Ready(Ok(()))
        }
    }

    fn chunks(parts: &[&'static [u8]]) -> impl Stream<Item = Result<&'static [u8], io::Error>> {
        stream::iter(parts.iter().copied().map(Ok).collect::<Vec<_>>())
    }

    #[tokio::test]
    async fn test_write_body_concatenates_chunks_in_order() {
        let parts: &[&[u8]] = &[b"ab", b"", b"cdefg", b"h", b"ij"];
        let mut dest = Vec::new();
        let mut state = DownloadState::new("Untitled.bin", Some(10));
        let mut progress = RecordingProgress::default();

        let written = write_body(chunks(parts), &mut dest, &mut state, &mut progress)
            .await
            .unwrap();

        assert_eq!(written, 10);
        assert_eq!(dest, b"abcdefghij");
        assert_eq!(state.written(), 10);
        assert_eq!(progress.updates, vec![2, 2, 7, 8, 10]);
        assert_eq!(progress.finished, 1);
    }

    #[tokio::test]
    async fn test_write_body_into_file_matches_source() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("out.bin");
        let mut file = tokio::fs::File::create(&path).await.unwrap();
        let payload: Vec<u8> = (0..=255u8).cycle().take(70_000).collect();
        let body = stream::iter(
            payload
                .chunks(4093)
                .map(|c| Ok::<_, io::Error>(c.to_vec()))
                .collect::<Vec<_>>(),
        );
        let mut state = DownloadState::new("out.bin", None);

        write_body(body, &mut file, &mut state, &mut NoProgress)
            .await
            .unwrap();
        drop(file);

        assert_eq!(std::fs::read(&path).unwrap(), payload);
        assert_eq!(state.written(), 70_000);
    }

    #[tokio::test]
    async fn test_write_body_read_error_aborts_and_keeps_partial_output() {
        let body = stream::iter(vec![
            Ok(b"part".to_vec()),
            Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset")),
            Ok(b"never".to_vec()),
        ]);
        let mut dest = Vec::new();
        let mut state = DownloadState::new("f", Some(100));
        let mut progress = RecordingProgress::default();

        let error = write_body(body, &mut dest, &mut state, &mut progress)
            .await
            .unwrap_err();

        assert!(matches!(error, TransferError::Read { written: 4, .. }));
        assert_eq!(dest, b"part");
        assert_eq!(progress.finished, 1, "progress must be stopped on failure");
    }

    #[tokio::test]
    async fn test_write_body_write_error_is_reported() {
        let parts: &[&[u8]] = &[b"1234", b"5678"];
        let mut dest = FailingWriter {
            accepted: Vec::new(),
            limit: 6,
        };
        let mut state = DownloadState::new("f", None);
        let mut progress = RecordingProgress::default();

        let error = write_body(chunks(parts), &mut dest, &mut state, &mut progress)
            .await
            .unwrap_err();

        assert!(matches!(error, TransferError::Write { written: 4, .. }));
        assert_eq!(dest.accepted, b"1234");
        assert_eq!(progress.finished, 1);
    }

    #[test]
    fn test_download_state_total_ignores_non_positive() {
        assert_eq!(DownloadState::new("a", Some(0)).total(), None);
        assert_eq!(DownloadState::new("a", None).total(), None);
        assert_eq!(DownloadState::new("a", Some(5)).total(), Some(5));
        assert_eq!(DownloadState::new("a", Some(5)).filename(), "a");
    }

    #[test]
    fn test_bar_progress_absent_without_total() {
        let mut progress = BarProgress::new(None, false);
        progress.advance(10);
        assert_eq!(progress.position(), None);
        assert!(progress.is_finished());

        assert_eq!(BarProgress::new(Some(0), false).position(), None);
    }

    #[test]
    fn test_bar_progress_tracks_and_clears() {
        let mut progress = BarProgress::new(Some(10), false);
        progress.advance(4);
        assert_eq!(progress.position(), Some(4));
        assert!(!progress.is_finished());

        progress.finish();
        assert!(progress.is_finished());
    }
}
