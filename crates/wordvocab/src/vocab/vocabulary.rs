//! # Vocabulary Index
//!
//! The post-build vocabulary. Read operations take `&self` and hold no
//! per-call state, so a [`Vocabulary`] can be shared across reader threads,
//! each with its own [`CorpusCursor`] and random stream.
//!
//! Structural changes ([`Vocabulary::threshold`], [`Vocabulary::prune`],
//! [`Vocabulary::load`]) take `&mut self` and renumber every id.

use std::io::{BufRead, Seek};

use crate::{
    corpus::CorpusCursor,
    errors::{VocabError, VocabResult},
    io::binary_format::read_vocab_parts,
    types::Real,
    vocab::{
        entry::{EntryKind, VocabEntry},
        entry_table::{EntryTable, IdRemap},
        options::VocabOptions,
        prune_index::PruneIndex,
    },
};

/// The outcome of [`Vocabulary::prune`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PruneResult {
    /// The retained word ids, filtered to the word range, sorted and
    /// deduplicated; in the order the surviving words now occupy.
    pub retained: Vec<usize>,

    /// Old id to new id translation, labels included.
    pub remap: IdRemap,
}

/// An immutable word/label vocabulary index.
#[derive(Debug, Clone, PartialEq)]
pub struct Vocabulary {
    options: VocabOptions,
    table: EntryTable,
    ntokens: u64,
    discard_table: Vec<Real>,
    prune_index: PruneIndex,
}

impl Vocabulary {
    /// Run a full build pass over a corpus stream.
    ///
    /// Streams every token through [`crate::VocabBuilder::push_token`], then
    /// finishes the builder.
    pub fn read_from_stream<R>(
        options: VocabOptions,
        reader: R,
    ) -> VocabResult<Self>
    where
        R: BufRead + Seek,
    {
        let mut cursor = CorpusCursor::new(reader);
        let mut builder = options.init();
        builder.update_from_stream(&mut cursor)?;
        builder.finish()
    }

    /// Read a vocabulary from the binary format.
    ///
    /// See [`crate::io::read_vocab`].
    pub fn read_from<R: BufRead>(
        options: VocabOptions,
        reader: &mut R,
    ) -> VocabResult<Self> {
        let parts = read_vocab_parts(reader, options.capacity)?;
        Ok(Self::from_parts(
            options,
            parts.table,
            parts.ntokens,
            parts.prune_index,
        ))
    }

    pub(crate) fn from_parts(
        options: VocabOptions,
        table: EntryTable,
        ntokens: u64,
        prune_index: PruneIndex,
    ) -> Self {
        let mut vocab = Self {
            options,
            table,
            ntokens,
            discard_table: Vec::new(),
            prune_index,
        };
        vocab.init_discard_table();
        vocab
    }

    /// Replace this vocabulary with one read from the binary format.
    ///
    /// On error, `self` is left unchanged.
    pub fn load<R: BufRead>(
        &mut self,
        reader: &mut R,
    ) -> VocabResult<()> {
        let parts = read_vocab_parts(reader, self.options.capacity)?;
        self.table = parts.table;
        self.ntokens = parts.ntokens;
        self.prune_index = parts.prune_index;
        self.init_discard_table();
        log::info!(
            "Loaded vocabulary: {} words, {} labels, {} tokens",
            self.nwords(),
            self.nlabels(),
            self.ntokens
        );
        Ok(())
    }

    /// The options.
    pub fn options(&self) -> &VocabOptions {
        &self.options
    }

    /// The number of word entries.
    pub fn nwords(&self) -> usize {
        self.table.nwords()
    }

    /// The number of label entries.
    pub fn nlabels(&self) -> usize {
        self.table.nlabels()
    }

    /// The number of tokens seen in the build pass.
    pub fn ntokens(&self) -> u64 {
        self.ntokens
    }

    /// The total number of entries.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Is the vocabulary empty?
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// The entries, in id order.
    pub fn entries(&self) -> &[VocabEntry] {
        self.table.entries()
    }

    /// The slot index for `text`; see [`crate::vocab::SlotTable::locate`].
    pub fn locate_slot(
        &self,
        text: &[u8],
    ) -> Option<usize> {
        self.table.locate_slot(text)
    }

    /// Resolve `text` to its id.
    pub fn lookup_id(
        &self,
        text: &[u8],
    ) -> Option<usize> {
        self.table.lookup(text)
    }

    /// Classify `text` by the label prefix rule.
    pub fn classify(
        &self,
        text: &[u8],
    ) -> EntryKind {
        EntryKind::classify(text, &self.options.label_prefix)
    }

    /// The kind of the entry at `id`.
    pub fn kind_of(
        &self,
        id: usize,
    ) -> Option<EntryKind> {
        self.table.get(id).map(|e| e.kind)
    }

    /// The text of the entry at `id`.
    pub fn id_to_text(
        &self,
        id: usize,
    ) -> VocabResult<&[u8]> {
        self.table
            .get(id)
            .map(|e| e.text.as_slice())
            .ok_or(VocabError::IdOutOfRange {
                id,
                size: self.len(),
            })
    }

    /// The text of label `label_id`, an offset into the label range.
    pub fn label_text(
        &self,
        label_id: usize,
    ) -> VocabResult<&[u8]> {
        if label_id >= self.nlabels() {
            return Err(VocabError::LabelOutOfRange {
                label_id,
                nlabels: self.nlabels(),
            });
        }
        self.id_to_text(self.nwords() + label_id)
    }

    /// The counts of every entry of `kind`, in id order.
    pub fn counts_by_kind(
        &self,
        kind: EntryKind,
    ) -> Vec<u64> {
        self.table.counts_by_kind(kind)
    }

    /// The keep threshold of word `id`.
    pub fn discard_threshold(
        &self,
        id: usize,
    ) -> Option<Real> {
        self.discard_table.get(id).copied()
    }

    /// Should this occurrence of word `id` be subsampled away?
    ///
    /// ## Arguments
    /// * `id` - a word id.
    /// * `r` - a uniform draw in `[0, 1)`.
    ///
    /// Never discards in supervised mode, or ids outside the word range.
    /// Thresholds above 1 mean the word is never discarded.
    pub fn discard(
        &self,
        id: usize,
        r: Real,
    ) -> bool {
        if !self.options.mode.subsamples() {
            return false;
        }
        self.discard_table.get(id).is_some_and(|&p| r > p)
    }

    /// Append the feature id for hash bucket `candidate`.
    ///
    /// Negative candidates are ignored. Once pruned, candidates are
    /// remapped through the prune index and unmapped ones are dropped.
    /// Emitted ids are offset by `nwords` into the shared feature space.
    pub fn push_hash(
        &self,
        features: &mut Vec<usize>,
        candidate: i32,
    ) {
        if let Some(bucket) = self.prune_index.resolve(candidate)
            && let Ok(bucket) = usize::try_from(bucket)
        {
            features.push(self.nwords() + bucket);
        }
    }

    /// Has pruning been applied?
    pub fn is_pruned(&self) -> bool {
        self.prune_index.is_active()
    }

    /// The prune index.
    pub fn prune_index(&self) -> &PruneIndex {
        &self.prune_index
    }

    /// Mutable access to the prune index, to stage bucket remappings
    /// before [`Vocabulary::prune`].
    ///
    /// ## Returns
    /// `None` once pruned; the index and its size flag are fixed by
    /// [`Vocabulary::prune`] and by [`Vocabulary::load`].
    pub fn prune_index_mut(&mut self) -> Option<&mut PruneIndex> {
        if self.prune_index.is_active() {
            None
        } else {
            Some(&mut self.prune_index)
        }
    }

    /// Re-threshold the entries and recompute the discard table.
    ///
    /// Ids are renumbered.
    pub fn threshold(
        &mut self,
        min_word: u64,
        min_label: u64,
    ) {
        self.table.threshold(min_word, min_label);
        self.init_discard_table();
    }

    /// Compact the vocabulary to the `retained` words and every label.
    ///
    /// Ids `>= nwords` in `retained` are ignored. Activates the prune index
    /// with whatever mappings were staged, and recomputes the discard
    /// table. Every id is renumbered; use [`PruneResult::remap`] to
    /// translate ids held from before the call.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, retained)))]
    pub fn prune(
        &mut self,
        retained: &[usize],
    ) -> PruneResult {
        let nwords = self.nwords();
        let mut retained: Vec<usize> = retained.iter().copied().filter(|&id| id < nwords).collect();
        retained.sort_unstable();
        retained.dedup();

        let remap = self.table.retain_words(&retained);
        self.prune_index.activate();
        self.init_discard_table();

        log::info!(
            "Pruned vocabulary: {} -> {} words, {} labels, {} hash buckets",
            nwords,
            self.nwords(),
            self.nlabels(),
            self.prune_index.len()
        );

        PruneResult { retained, remap }
    }

    /// Recompute the per-word keep thresholds: `sqrt(t / f) + t / f`.
    fn init_discard_table(&mut self) {
        let t = self.options.sampling_threshold;
        let ntokens = self.ntokens as Real;
        self.discard_table = self.table.entries()[..self.table.nwords()]
            .iter()
            .map(|e| {
                let f = e.count as Real / ntokens;
                let ratio = t / f as f64;
                (ratio.sqrt() + ratio) as Real
            })
            .collect();
    }

    pub(crate) fn table(&self) -> &EntryTable {
        &self.table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{compat::traits::static_is_send_sync_check, vocab::TrainingMode};

    fn build(
        options: VocabOptions,
        tokens: &[&str],
    ) -> Vocabulary {
        let mut builder = options.init();
        builder.update_from_tokens(tokens).unwrap();
        builder.finish().unwrap()
    }

    fn options() -> VocabOptions {
        VocabOptions::default().with_capacity(1009)
    }

    fn corpus() -> Vec<&'static str> {
        vec![
            "the", "the", "the", "the", "cat", "cat", "sat", "mat", "__label__a", "__label__b",
            "__label__b",
        ]
    }

    #[test]
    fn test_send_sync() {
        let vocab = build(options(), &corpus());
        static_is_send_sync_check(&vocab);
    }

    #[test]
    fn test_identity_round_trip() {
        let vocab = build(options(), &corpus());
        for id in 0..vocab.len() {
            let text = vocab.id_to_text(id).unwrap();
            assert_eq!(vocab.lookup_id(text), Some(id));
        }
        for text in ["the", "cat", "sat", "mat", "__label__a", "__label__b"] {
            let id = vocab.lookup_id(text.as_bytes()).unwrap();
            assert_eq!(vocab.id_to_text(id).unwrap(), text.as_bytes());
        }
    }

    #[test]
    fn test_id_ranges() {
        let vocab = build(options(), &corpus());
        assert_eq!(vocab.nwords(), 4);
        assert_eq!(vocab.nlabels(), 2);
        for id in 0..vocab.nwords() {
            assert_eq!(vocab.kind_of(id), Some(EntryKind::Word));
        }
        for id in vocab.nwords()..vocab.len() {
            assert_eq!(vocab.kind_of(id), Some(EntryKind::Label));
        }
        assert_eq!(vocab.kind_of(vocab.len()), None);
    }

    #[test]
    fn test_accessors() {
        let vocab = build(options(), &corpus());
        assert_eq!(vocab.label_text(0).unwrap(), b"__label__b");
        assert_eq!(vocab.label_text(1).unwrap(), b"__label__a");
        assert!(matches!(
            vocab.label_text(2),
            Err(VocabError::LabelOutOfRange {
                label_id: 2,
                nlabels: 2
            })
        ));
        assert!(matches!(
            vocab.id_to_text(6),
            Err(VocabError::IdOutOfRange { id: 6, size: 6 })
        ));
        assert_eq!(vocab.counts_by_kind(EntryKind::Word), vec![4, 2, 1, 1]);
        assert_eq!(vocab.counts_by_kind(EntryKind::Label), vec![2, 1]);
        assert_eq!(vocab.classify(b"__label__zzz"), EntryKind::Label);
        assert!(vocab.locate_slot(b"the").is_some());
    }

    #[test]
    fn test_discard_table_values() {
        let vocab = build(options().with_sampling_threshold(0.01), &corpus());
        // "the": f = 4 / 11.
        let f = 4.0f32 / 11.0;
        let ratio = 0.01 / f as f64;
        let expected = (ratio.sqrt() + ratio) as f32;
        assert_eq!(vocab.discard_threshold(0), Some(expected));
        assert_eq!(vocab.discard_threshold(vocab.nwords()), None);

        assert!(vocab.discard(0, 0.99));
        assert!(!vocab.discard(0, 0.01));
    }

    #[test]
    fn test_discard_zero_parameter() {
        let vocab = build(options().with_sampling_threshold(0.0), &corpus());
        for id in 0..vocab.nwords() {
            for r in [1e-6, 0.25, 0.5, 0.999] {
                assert!(vocab.discard(id, r));
            }
        }

        let vocab = build(
            options()
                .with_sampling_threshold(0.0)
                .with_mode(TrainingMode::Supervised),
            &corpus(),
        );
        for id in 0..vocab.nwords() {
            assert!(!vocab.discard(id, 0.999));
        }
    }

    #[test]
    fn test_frequent_words_boosted() {
        // A large parameter pushes every threshold above 1.
        let vocab = build(options().with_sampling_threshold(1.0), &corpus());
        for id in 0..vocab.nwords() {
            assert!(vocab.discard_threshold(id).unwrap() > 1.0);
            assert!(!vocab.discard(id, 0.999));
        }
    }

    #[test]
    fn test_threshold_idempotent() {
        let mut vocab = build(options().with_min_count(2), &corpus());
        let before = vocab.clone();
        vocab.threshold(2, 0);
        assert_eq!(vocab, before);

        vocab.threshold(3, 2);
        assert_eq!(vocab.nwords(), 1);
        assert_eq!(vocab.nlabels(), 1);
        assert_eq!(vocab.discard_threshold(1), None);
    }

    #[test]
    fn test_push_hash_unpruned() {
        let vocab = build(options(), &corpus());
        let mut features = vec![];
        vocab.push_hash(&mut features, 3);
        vocab.push_hash(&mut features, -1);
        vocab.push_hash(&mut features, 0);
        assert_eq!(features, vec![4 + 3, 4]);
        assert!(!vocab.is_pruned());
    }

    #[test]
    fn test_prune() {
        let mut vocab = build(options(), &corpus());
        // the=0, cat=1, sat=2, mat=3, labels 4, 5.
        let result = vocab.prune(&[3, 0, 5, 3, 17]);

        assert_eq!(result.retained, vec![0, 3]);
        assert_eq!(vocab.nwords(), 2);
        assert_eq!(vocab.nlabels(), 2);
        assert_eq!(vocab.lookup_id(b"the"), Some(0));
        assert_eq!(vocab.lookup_id(b"mat"), Some(1));
        assert_eq!(vocab.lookup_id(b"cat"), None);
        assert_eq!(vocab.label_text(0).unwrap(), b"__label__b");
        assert_eq!(vocab.label_text(1).unwrap(), b"__label__a");

        assert_eq!(result.remap.get(0), Some(0));
        assert_eq!(result.remap.get(1), None);
        assert_eq!(result.remap.get(3), Some(1));
        assert_eq!(result.remap.get(4), Some(2));
        assert_eq!(result.remap.get(5), Some(3));

        assert!(vocab.is_pruned());
        assert_eq!(vocab.prune_index().size_flag(), 0);
        assert!(vocab.discard_threshold(1).is_some());
        assert_eq!(vocab.discard_threshold(2), None);

        // Active and empty: every bucket is dropped.
        let mut features = vec![];
        vocab.push_hash(&mut features, 3);
        assert!(features.is_empty());
    }

    #[test]
    fn test_prune_with_staged_buckets() {
        let mut vocab = build(options(), &corpus());
        let staged = vocab.prune_index_mut().unwrap();
        staged.insert(100, 0);
        staged.insert(250, 1);
        vocab.prune(&[0, 1, 2, 3]);

        assert_eq!(vocab.nwords(), 4);
        assert_eq!(vocab.prune_index().size_flag(), 2);

        let mut features = vec![];
        vocab.push_hash(&mut features, 250);
        vocab.push_hash(&mut features, 7);
        vocab.push_hash(&mut features, 100);
        assert_eq!(features, vec![4 + 1, 4]);
    }

    #[test]
    fn test_prune_index_fixed_after_prune() {
        let mut vocab = build(options(), &corpus());
        vocab.prune(&[0, 1]);
        assert_eq!(vocab.prune_index().size_flag(), 0);

        // Active and empty stays that way: no late staging.
        assert!(vocab.prune_index_mut().is_none());

        let mut features = vec![];
        vocab.push_hash(&mut features, 7);
        assert!(features.is_empty());
        assert_eq!(vocab.prune_index().size_flag(), 0);
    }

    #[test]
    fn test_words_only() {
        let vocab = build(options(), &["x", "y", "x"]);
        assert_eq!(vocab.nlabels(), 0);
        assert!(vocab.label_text(0).is_err());
        assert_eq!(vocab.counts_by_kind(EntryKind::Label), Vec::<u64>::new());
    }
}
