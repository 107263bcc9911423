//! # Entry Table
//!
//! The ordered entry list and the slot table that indexes it.
//!
//! Ids are positions in the entry list. Every structural change
//! ([`EntryTable::threshold`], [`EntryTable::retain_words`]) reorders the
//! list and rebuilds the slot table; ids held across such a change are
//! dangling.

use crate::{
    errors::{VocabError, VocabResult},
    vocab::{
        entry::{EntryKind, VocabEntry},
        slot_table::SlotTable,
    },
};

/// Translation of pre-compaction ids to post-compaction ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdRemap {
    old_to_new: Vec<Option<usize>>,
}

impl IdRemap {
    /// The new id of `old_id`, or `None` if it was removed.
    pub fn get(
        &self,
        old_id: usize,
    ) -> Option<usize> {
        self.old_to_new.get(old_id).copied().flatten()
    }

    /// The number of pre-compaction ids.
    pub fn len(&self) -> usize {
        self.old_to_new.len()
    }

    /// Is the remap empty?
    pub fn is_empty(&self) -> bool {
        self.old_to_new.is_empty()
    }
}

/// Entries plus their slot index.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryTable {
    entries: Vec<VocabEntry>,
    slots: SlotTable,
    nwords: usize,
    nlabels: usize,
}

impl EntryTable {
    /// Create an empty table backed by `capacity` slots.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            slots: SlotTable::new(capacity),
            nwords: 0,
            nlabels: 0,
        }
    }

    /// Build a table from entries already in word-then-label order.
    ///
    /// ## Returns
    /// `Corrupt` if the entries exceed `capacity` or repeat a text.
    pub fn from_entries(
        capacity: usize,
        entries: Vec<VocabEntry>,
    ) -> VocabResult<Self> {
        if entries.len() > capacity {
            return Err(VocabError::Corrupt(format!(
                "{} entries exceed slot capacity {capacity}",
                entries.len()
            )));
        }
        let mut table = Self::new(capacity);
        table.entries = entries;
        for id in 0..table.entries.len() {
            let text = &table.entries[id].text;
            let slot = table
                .slots
                .locate(text, &table.entries)
                .ok_or(VocabError::CapacityExhausted { capacity })?;
            if table.slots.get(slot).is_some() {
                return Err(VocabError::Corrupt(format!(
                    "duplicate entry text {:?}",
                    String::from_utf8_lossy(text)
                )));
            }
            table.slots.bind(slot, id);
        }
        table.recount();
        Ok(table)
    }

    /// The number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Is the table empty?
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The slot capacity.
    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// The number of word entries, as of the last rebuild.
    pub fn nwords(&self) -> usize {
        self.nwords
    }

    /// The number of label entries, as of the last rebuild.
    pub fn nlabels(&self) -> usize {
        self.nlabels
    }

    /// The entries, in id order.
    pub fn entries(&self) -> &[VocabEntry] {
        &self.entries
    }

    /// The entry at `id`.
    pub fn get(
        &self,
        id: usize,
    ) -> Option<&VocabEntry> {
        self.entries.get(id)
    }

    /// Find the slot for `text`; see [`SlotTable::locate`].
    pub fn locate_slot(
        &self,
        text: &[u8],
    ) -> Option<usize> {
        self.slots.locate(text, &self.entries)
    }

    /// Resolve `text` to its id.
    pub fn lookup(
        &self,
        text: &[u8],
    ) -> Option<usize> {
        self.locate_slot(text).and_then(|slot| self.slots.get(slot))
    }

    /// Count one occurrence of `text`.
    ///
    /// New texts are appended with `count = 1` and `kind`'s classification.
    /// `nwords`/`nlabels` are not updated until the next rebuild.
    ///
    /// ## Returns
    /// The id of the entry.
    pub fn increment<F>(
        &mut self,
        text: &[u8],
        classify: F,
    ) -> VocabResult<usize>
    where
        F: FnOnce(&[u8]) -> EntryKind,
    {
        let slot = self
            .locate_slot(text)
            .ok_or(VocabError::CapacityExhausted {
                capacity: self.capacity(),
            })?;
        match self.slots.get(slot) {
            Some(id) => {
                self.entries[id].count += 1;
                Ok(id)
            }
            None => {
                let id = self.entries.len();
                self.entries
                    .push(VocabEntry::new(text.to_vec(), 1, classify(text)));
                self.slots.bind(slot, id);
                Ok(id)
            }
        }
    }

    /// Sort, drop rare entries, and rebuild.
    ///
    /// Entries are stable-sorted by ``(kind, count desc)``; words with
    /// `count < min_word` and labels with `count < min_label` are dropped.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self)))]
    pub fn threshold(
        &mut self,
        min_word: u64,
        min_label: u64,
    ) {
        self.entries
            .sort_by(|a, b| a.kind.cmp(&b.kind).then(b.count.cmp(&a.count)));
        self.entries.retain(|e| match e.kind {
            EntryKind::Word => e.count >= min_word,
            EntryKind::Label => e.count >= min_label,
        });
        self.entries.shrink_to_fit();
        self.rebuild();
    }

    /// Keep the words in `retained` and every label, and rebuild.
    ///
    /// ## Arguments
    /// * `retained` - ascending, deduplicated word ids.
    ///
    /// ## Returns
    /// The old-to-new id translation.
    pub fn retain_words(
        &mut self,
        retained: &[usize],
    ) -> IdRemap {
        let mut old_to_new = vec![None; self.entries.len()];
        let mut keep = retained.iter().peekable();
        let mut next = 0;
        for (old_id, entry) in self.entries.iter().enumerate() {
            let survives = match entry.kind {
                EntryKind::Label => true,
                EntryKind::Word => keep.next_if(|&&id| id == old_id).is_some(),
            };
            if survives {
                old_to_new[old_id] = Some(next);
                next += 1;
            }
        }

        let mut old_id = 0;
        self.entries.retain(|_| {
            let survives = old_to_new[old_id].is_some();
            old_id += 1;
            survives
        });
        self.rebuild();

        IdRemap { old_to_new }
    }

    /// The counts of every entry of `kind`, in id order.
    pub fn counts_by_kind(
        &self,
        kind: EntryKind,
    ) -> Vec<u64> {
        self.entries
            .iter()
            .filter(|e| e.kind == kind)
            .map(|e| e.count)
            .collect()
    }

    /// Rebind every entry to its current position.
    fn rebuild(&mut self) {
        self.slots.clear();
        for id in 0..self.entries.len() {
            // Entries are distinct and never exceed capacity here.
            if let Some(slot) = self.slots.locate(&self.entries[id].text, &self.entries) {
                self.slots.bind(slot, id);
            }
        }
        self.recount();
    }

    fn recount(&mut self) {
        self.nwords = self
            .entries
            .iter()
            .filter(|e| e.kind == EntryKind::Word)
            .count();
        self.nlabels = self.entries.len() - self.nwords;
    }
}
