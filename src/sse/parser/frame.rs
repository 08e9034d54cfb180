//! Byte-level frame splitting.
//!
//! Chunks from the HTTP body are appended to a byte buffer and cut at the
//! blank-line delimiter. Buffering bytes rather than strings keeps UTF-8
//! sequences that straddle two chunks intact.

/// Accumulates body chunks and yields complete SSE frames.
#[derive(Debug, Default)]
pub struct FrameBuffer {
    buf: Vec<u8>,
    /// Bytes already searched without finding a delimiter
    scanned: usize,
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chunk read from the transport.
    pub fn push(&mut self, chunk: &[u8]) {
        self.buf.extend_from_slice(chunk);
    }

    /// Pop the next complete frame, without its delimiter.
    pub fn next_frame(&mut self) -> Option<String> {
        // a delimiter may straddle the previous scan boundary
        let from = self.scanned.saturating_sub(3);
        let Some((pos, len)) = find_delimiter(&self.buf, from) else {
            self.scanned = self.buf.len();
            return None;
        };
        let frame = String::from_utf8_lossy(&self.buf[..pos]).into_owned();
        self.buf.drain(..pos + len);
        self.scanned = 0;
        Some(frame)
    }

    /// Take whatever is left once the body has ended.
    pub fn take_remainder(&mut self) -> Option<String> {
        self.scanned = 0;
        if self.buf.iter().all(u8::is_ascii_whitespace) {
            self.buf.clear();
            return None;
        }
        let rest = String::from_utf8_lossy(&self.buf).into_owned();
        self.buf.clear();
        Some(rest)
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}

/// Earliest `\n\n` or `\r\n\r\n` at or after `from`, as (start, delimiter length).
fn find_delimiter(buf: &[u8], from: usize) -> Option<(usize, usize)> {
    (from..buf.len()).find_map(|i| {
        let rest = &buf[i..];
        if rest.starts_with(b"\r\n\r\n") {
            Some((i, 4))
        } else if rest.starts_with(b"\n\n") {
            Some((i, 2))
        } else {
            None
        }
    })
}
