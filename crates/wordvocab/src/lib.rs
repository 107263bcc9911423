//! # `wordvocab` Vocabulary Index
//!
//! The vocabulary index of a word/label embedding trainer.
//!
//! `wordvocab` turns a whitespace-tokenized corpus into a dense id space:
//! * a fixed-capacity, linear-probing slot table that is never resized,
//! * word ids ``[0, nwords)`` followed by label ids ``[nwords, nwords + nlabels)``,
//! * frequency counts and subsampling thresholds,
//! * vocabulary pruning for model compression,
//! * a fixed binary format, see [`io`].
//!
//! See:
//! * [`vocab`] for the builder and the index.
//! * [`corpus`] for the per-reader token cursor.
//! * [`io`] for persistence.
//!
//! ## Crate Features
//!
//! #### feature: ``ahash``
//!
//! Default. Swaps the prune index HashMap for ``ahash``.
//!
//! #### feature: ``tracing``
//!
//! This enables a number of ``tracing`` instrumentation points.
//! This is only useful for timing tracing of the library itself.
//!
//! ## Building a Vocabulary
//!
//! ```rust,no_run
//! use std::{fs::File, io::BufReader};
//!
//! use rand::{SeedableRng, rngs::StdRng};
//! use wordvocab::{CorpusCursor, VocabOptions, Vocabulary};
//!
//! fn example(path: &str) -> wordvocab::VocabResult<()> {
//!     let options = VocabOptions::default().with_min_count(5);
//!
//!     let vocab = Vocabulary::read_from_stream(
//!         options,
//!         BufReader::new(File::open(path)?),
//!     )?;
//!
//!     // One cursor and one rng per reader thread.
//!     let mut cursor = CorpusCursor::new(BufReader::new(File::open(path)?));
//!     let mut rng = StdRng::seed_from_u64(0);
//!     let mut words = Vec::new();
//!     let ntokens = vocab.read_line(&mut cursor, &mut rng, &mut words)?;
//!     println!("{ntokens} tokens, {} kept", words.len());
//!
//!     wordvocab::io::save_vocab_path(&vocab, "vocab.bin")?;
//!     Ok(())
//! }
//! ```
#![warn(missing_docs, unused)]

pub mod compat;
pub mod corpus;
pub mod errors;
pub mod io;
pub mod types;
pub mod vocab;

#[doc(inline)]
pub use corpus::{CorpusCursor, EOS};
#[doc(inline)]
pub use errors::{VocabError, VocabResult};
#[doc(inline)]
pub use vocab::{
    EntryKind,
    IdRemap,
    PruneResult,
    TrainingMode,
    VocabBuilder,
    VocabEntry,
    VocabOptions,
    Vocabulary,
};
