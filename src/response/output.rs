//! Output sinks for rendered responses.
//!
//! The dispatcher writes through an [`OutputSink`] instead of printing
//! directly, so callers decide where lines go and tests can capture them.

use std::io::{self, Write};

/// Destination for rendered response text.
pub trait OutputSink {
    /// Writes `text` followed by a newline.
    fn line(&mut self, text: &str) -> io::Result<()>;

    /// Writes `text` as-is and makes it visible immediately.
    fn chunk(&mut self, text: &str) -> io::Result<()>;
}

impl<T: OutputSink + ?Sized> OutputSink for &mut T {
    fn line(&mut self, text: &str) -> io::Result<()> {
        (**self).line(text)
    }

    fn chunk(&mut self, text: &str) -> io::Result<()> {
        (**self).chunk(text)
    }
}

/// Writes to the process's standard output.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl OutputSink for StdoutSink {
    fn line(&mut self, text: &str) -> io::Result<()> {
        let mut out = io::stdout().lock();
        writeln!(out, "{text}")?;
        out.flush()
    }

    fn chunk(&mut self, text: &str) -> io::Result<()> {
        let mut out = io::stdout().lock();
        out.write_all(text.as_bytes())?;
        out.flush()
    }
}

/// Collects output in memory.
#[derive(Debug, Default, Clone)]
pub struct BufferSink {
    buffer: String,
    chunks: usize,
}

impl BufferSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far.
    #[must_use]
    pub fn contents(&self) -> &str {
        &self.buffer
    }

    /// Number of [`OutputSink::chunk`] calls received.
    #[must_use]
    pub fn chunk_count(&self) -> usize {
        self.chunks
    }

    /// Written lines (the trailing empty segment after a final newline is dropped).
    #[must_use]
    pub fn lines(&self) -> Vec<&str> {
        self.buffer.lines().collect()
    }
}

impl OutputSink for BufferSink {
    fn line(&mut self, text: &str) -> io::Result<()> {
        self.buffer.push_str(text);
        self.buffer.push('\n');
        Ok(())
    }

    fn chunk(&mut self, text: &str) -> io::Result<()> {
        self.buffer.push_str(text);
        self.chunks += 1;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_sink_line_appends_newline() {
        let mut sink = BufferSink::new();
        sink.line("HTTP/1.1 200 OK").unwrap();
        sink.line("").unwrap();
        assert_eq!(sink.contents(), "HTTP/1.1 200 OK\n\n");
        assert_eq!(sink.lines(), vec!["HTTP/1.1 200 OK", ""]);
    }

    #[test]
    fn test_buffer_sink_chunk_is_verbatim() {
        let mut sink = BufferSink::new();
        sink.chunk("data: 1\n").unwrap();
        sink.chunk("data: 2").unwrap();
        assert_eq!(sink.contents(), "data: 1\ndata: 2");
        assert_eq!(sink.chunk_count(), 2);
    }

    #[test]
    fn test_mut_ref_forwards() {
        fn write_via<O: OutputSink>(mut out: O) {
            out.line("x").unwrap();
        }

        let mut sink = BufferSink::new();
        write_via(&mut sink);
        assert_eq!(sink.contents(), "x\n");
    }
}
