//! # Vocabulary Entries

/// The kind of a vocabulary entry.
///
/// Word entries always sort before label entries; the persisted tag is
/// the discriminant.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum_macros::EnumString,
    strum_macros::EnumIter,
    strum_macros::Display,
)]
#[strum(serialize_all = "lowercase")]
pub enum EntryKind {
    /// A plain word.
    Word = 0,

    /// A label; text carries the configured label prefix.
    Label = 1,
}

impl EntryKind {
    /// The persisted tag byte.
    pub fn tag(self) -> u8 {
        self as u8
    }

    /// Decode a persisted tag byte.
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(Self::Word),
            1 => Some(Self::Label),
            _ => None,
        }
    }

    /// Classify `text` by the label prefix rule.
    pub fn classify(
        text: &[u8],
        label_prefix: &[u8],
    ) -> Self {
        if text.starts_with(label_prefix) {
            Self::Label
        } else {
            Self::Word
        }
    }
}

/// A single vocabulary entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocabEntry {
    /// The entry text; fixed once created.
    pub text: Vec<u8>,

    /// Occurrences seen during the build pass.
    pub count: u64,

    /// The entry kind; fixed once created.
    pub kind: EntryKind,
}

impl VocabEntry {
    /// Create a new entry.
    pub fn new(
        text: Vec<u8>,
        count: u64,
        kind: EntryKind,
    ) -> Self {
        Self { text, count, kind }
    }
}
