//! # Corpus Cursor

use std::io::{self, BufRead, Seek, SeekFrom};

/// The synthetic end-of-sentence token.
pub const EOS: &[u8] = b"</s>";

/// Is `b` a token delimiter?
///
/// The delimiter set is space, LF, CR, TAB, VT, FF and NUL.
#[inline]
pub fn is_token_delimiter(b: u8) -> bool {
    matches!(b, b' ' | b'\n' | b'\r' | b'\t' | 0x0b | 0x0c | 0x00)
}

/// A token reader over a seekable byte stream.
///
/// Tracks the end-of-input condition separately from the stream, so that
/// [`CorpusCursor::reset_if_at_end`] can rewind for the next epoch.
#[derive(Debug)]
pub struct CorpusCursor<R> {
    reader: R,
    at_end: bool,
}

impl<R> CorpusCursor<R>
where
    R: BufRead + Seek,
{
    /// Wrap a reader.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            at_end: false,
        }
    }

    /// Has the cursor hit end-of-input?
    pub fn at_end(&self) -> bool {
        self.at_end
    }

    /// Release the underlying reader.
    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Read the next token into `token`.
    ///
    /// A LF with no pending bytes yields [`EOS`]; a LF that ends a pending
    /// token is left in the stream, so the next call yields [`EOS`].
    ///
    /// ## Returns
    /// `false` when end-of-input is reached with no pending bytes.
    pub fn read_token(
        &mut self,
        token: &mut Vec<u8>,
    ) -> io::Result<bool> {
        token.clear();
        loop {
            let (consumed, done) = {
                let buf = self.reader.fill_buf()?;
                if buf.is_empty() {
                    self.at_end = true;
                    return Ok(!token.is_empty());
                }
                scan_token(buf, token)
            };
            self.reader.consume(consumed);
            if done {
                return Ok(true);
            }
        }
    }

    /// Rewind to the start of the stream if the cursor hit end-of-input.
    pub fn reset_if_at_end(&mut self) -> io::Result<()> {
        if self.at_end {
            self.reader.seek(SeekFrom::Start(0))?;
            self.at_end = false;
        }
        Ok(())
    }
}

/// Scan `buf` for the rest of a token.
///
/// ## Returns
/// ``(consumed, done)``: bytes to consume, and whether the token is complete.
fn scan_token(
    buf: &[u8],
    token: &mut Vec<u8>,
) -> (usize, bool) {
    for (idx, &b) in buf.iter().enumerate() {
        if !is_token_delimiter(b) {
            token.push(b);
            continue;
        }
        if !token.is_empty() {
            // A trailing LF stays in the stream for the next EOS.
            let consumed = if b == b'\n' { idx } else { idx + 1 };
            return (consumed, true);
        }
        if b == b'\n' {
            token.extend_from_slice(EOS);
            return (idx + 1, true);
        }
    }
    (buf.len(), false)
}
