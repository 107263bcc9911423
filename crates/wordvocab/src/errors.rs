//! # Error Types

/// Errors from vocabulary operations.
#[derive(Debug, thiserror::Error)]
pub enum VocabError {
    /// The build pass finished with no surviving entries.
    #[error(
        "empty vocabulary after thresholding (min_count={min_count}, \
         min_count_label={min_count_label}); try a smaller min_count"
    )]
    EmptyVocabulary {
        /// The configured minimum word count.
        min_count: u64,
        /// The configured minimum label count.
        min_count_label: u64,
    },

    /// Label id outside of the label range.
    #[error("label id {label_id} is out of range [0, {nlabels})")]
    LabelOutOfRange {
        /// The requested label id.
        label_id: usize,
        /// The number of labels.
        nlabels: usize,
    },

    /// Entry id outside of the entry table.
    #[error("entry id {id} is out of range [0, {size})")]
    IdOutOfRange {
        /// The requested id.
        id: usize,
        /// The entry table size.
        size: usize,
    },

    /// The slot table has no free slot left for a new entry.
    #[error("slot table capacity ({capacity}) exhausted")]
    CapacityExhausted {
        /// The slot table capacity.
        capacity: usize,
    },

    /// Bad magic or format version on a tagged stream.
    #[error("bad magic or format version")]
    BadHeader,

    /// The serialized stream is structurally invalid.
    #[error("corrupt vocabulary stream: {0}")]
    Corrupt(String),

    /// I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type for vocabulary operations.
pub type VocabResult<T> = core::result::Result<T, VocabError>;
