//! Incremental line decoder
//!
//! Splits a chunked byte stream into text lines. Chunk boundaries may fall
//! anywhere, including inside a line or inside a multi-byte character, so
//! bytes are buffered until a `\n` arrives and only whole lines are decoded.
//! Splitting on the raw `\n` byte is safe for UTF-8: it never occurs inside
//! a multi-byte sequence.

/// Buffers partial lines across chunks
#[derive(Debug, Default)]
pub struct LineDecoder {
    pending: Vec<u8>,
    // Bytes of `pending` already known to contain no newline
    scanned: usize,
}

impl LineDecoder {
    /// Create an empty decoder
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one chunk and take every line it completes
    ///
    /// Returned lines have their `\n` (and a trailing `\r`) removed. Invalid
    /// UTF-8 is replaced with U+FFFD rather than rejected.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.pending.extend_from_slice(chunk);

        let mut lines = Vec::new();
        let mut start = 0;
        let mut cursor = self.scanned;
        while let Some(offset) = self.pending[cursor..].iter().position(|b| *b == b'\n') {
            let end = cursor + offset;
            lines.push(decode_line(&self.pending[start..end]));
            start = end + 1;
            cursor = start;
        }

        self.pending.drain(..start);
        self.scanned = self.pending.len();
        lines
    }

    /// Take the unterminated tail left when the stream ends
    pub fn finish(&mut self) -> Option<String> {
        if self.pending.is_empty() {
            return None;
        }
        let line = decode_line(&self.pending);
        self.pending.clear();
        self.scanned = 0;
        Some(line)
    }

    /// Number of buffered bytes not yet returned as a line
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}

fn decode_line(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    text.strip_suffix('\r').unwrap_or(&text).to_string()
}
