//! # Vocabulary Options

use crate::vocab::builder::VocabBuilder;

/// The default slot table capacity.
pub const DEFAULT_CAPACITY: usize = 30_000_000;

/// The default label prefix.
pub const DEFAULT_LABEL_PREFIX: &str = "__label__";

/// The default subsampling parameter.
pub const DEFAULT_SAMPLING_THRESHOLD: f64 = 1e-4;

/// The default number of tokens between progress log lines.
pub const DEFAULT_PROGRESS_INTERVAL: u64 = 1_000_000;

/// The model the vocabulary feeds.
///
/// Only [`TrainingMode::Supervised`] changes vocabulary behavior: it
/// disables subsampling.
#[derive(
    Default,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    strum_macros::EnumString,
    strum_macros::EnumIter,
    strum_macros::Display,
)]
#[strum(serialize_all = "lowercase")]
#[non_exhaustive]
pub enum TrainingMode {
    /// Supervised classification; no subsampling.
    Supervised,

    /// Skip-gram embeddings.
    #[default]
    SkipGram,

    /// Continuous bag-of-words embeddings.
    Cbow,
}

impl TrainingMode {
    /// Does this mode subsample frequent words?
    pub fn subsamples(self) -> bool {
        !matches!(self, Self::Supervised)
    }
}

/// Options for [`VocabBuilder`] and [`crate::Vocabulary`].
#[derive(Debug, Clone, PartialEq)]
pub struct VocabOptions {
    /// The fixed slot table capacity.
    pub capacity: usize,

    /// Minimum count for a word to survive the final threshold.
    pub min_count: u64,

    /// Minimum count for a label to survive the final threshold.
    pub min_count_label: u64,

    /// Texts starting with this prefix are labels.
    pub label_prefix: Vec<u8>,

    /// The subsampling parameter `t`.
    pub sampling_threshold: f64,

    /// The training mode.
    pub mode: TrainingMode,

    /// Tokens between progress log lines.
    pub progress_interval: u64,
}

impl Default for VocabOptions {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            min_count: 1,
            min_count_label: 0,
            label_prefix: DEFAULT_LABEL_PREFIX.as_bytes().to_vec(),
            sampling_threshold: DEFAULT_SAMPLING_THRESHOLD,
            mode: TrainingMode::default(),
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }
}

impl VocabOptions {
    /// Sets the slot table capacity.
    ///
    /// ## Panics
    /// Panics if `capacity` is zero.
    pub fn with_capacity(
        self,
        capacity: usize,
    ) -> Self {
        assert!(capacity > 0, "capacity must be > 0");
        Self { capacity, ..self }
    }

    /// Sets the minimum word count.
    pub fn with_min_count(
        self,
        min_count: u64,
    ) -> Self {
        Self { min_count, ..self }
    }

    /// Sets the minimum label count.
    pub fn with_min_count_label(
        self,
        min_count_label: u64,
    ) -> Self {
        Self {
            min_count_label,
            ..self
        }
    }

    /// Sets the label prefix.
    pub fn with_label_prefix<P: AsRef<[u8]>>(
        self,
        label_prefix: P,
    ) -> Self {
        Self {
            label_prefix: label_prefix.as_ref().to_vec(),
            ..self
        }
    }

    /// Sets the subsampling parameter.
    pub fn with_sampling_threshold(
        self,
        sampling_threshold: f64,
    ) -> Self {
        Self {
            sampling_threshold,
            ..self
        }
    }

    /// Sets the training mode.
    pub fn with_mode(
        self,
        mode: TrainingMode,
    ) -> Self {
        Self { mode, ..self }
    }

    /// Sets the progress log interval, in tokens.
    pub fn with_progress_interval(
        self,
        progress_interval: u64,
    ) -> Self {
        Self {
            progress_interval,
            ..self
        }
    }

    /// Initializes a [`VocabBuilder`] from these options.
    pub fn init(self) -> VocabBuilder {
        VocabBuilder::new(self)
    }
}
