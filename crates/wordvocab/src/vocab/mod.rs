//! # Vocabulary
//!
//! The word/label vocabulary index and its build pass.
//!
//! ## Build Pass
//!
//! A [`VocabBuilder`] (from [`VocabOptions::init`]) counts tokens into a
//! fixed-capacity [`EntryTable`], thresholding early whenever the slot table
//! passes 75% full. [`VocabBuilder::finish`] consumes the builder into a
//! [`Vocabulary`].
//!
//! ## Ids
//!
//! Ids are positions: words occupy ``[0, nwords)`` and labels
//! ``[nwords, nwords + nlabels)``. Thresholding, pruning, and loading all
//! renumber ids; re-resolve text rather than holding ids across them.
pub mod builder;
pub mod entry;
pub mod entry_table;
pub mod hashing;
pub mod line_reader;
pub mod options;
pub mod prune_index;
pub mod slot_table;
pub mod vocabulary;

#[doc(inline)]
pub use builder::VocabBuilder;
#[doc(inline)]
pub use entry::{EntryKind, VocabEntry};
#[doc(inline)]
pub use entry_table::{EntryTable, IdRemap};
#[doc(inline)]
pub use hashing::hash_text;
#[doc(inline)]
pub use line_reader::MAX_LINE_SIZE;
#[doc(inline)]
pub use options::{TrainingMode, VocabOptions};
#[doc(inline)]
pub use prune_index::PruneIndex;
#[doc(inline)]
pub use slot_table::SlotTable;
#[doc(inline)]
pub use vocabulary::{PruneResult, Vocabulary};
