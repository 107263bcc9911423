//! # Corpus Streams
//!
//! Whitespace tokenization over a seekable byte stream.
//!
//! Each reader thread owns its own [`CorpusCursor`]; cursors loop back to
//! the start of the stream on demand, so a finite corpus can feed an
//! unbounded number of epochs.

mod corpus_cursor;

#[doc(inline)]
pub use corpus_cursor::{CorpusCursor, EOS, is_token_delimiter};
