//! # Fixed-Capacity Slot Table
//!
//! Open addressing with linear probing over a flat array that is never
//! resized. There are no tombstones: the table is only ever cleared and
//! rebuilt wholesale.

use crate::vocab::{entry::VocabEntry, hashing::hash_text};

const EMPTY_SLOT: u32 = u32::MAX;

/// Flat ``{ slot -> id }`` table.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotTable {
    slots: Vec<u32>,
}

impl SlotTable {
    /// Create an empty table with `capacity` slots.
    ///
    /// ## Panics
    /// If `capacity` is zero or does not fit the slot id width.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "slot table capacity must be > 0");
        assert!(
            capacity < EMPTY_SLOT as usize,
            "slot table capacity ({capacity}) exceeds id width"
        );
        Self {
            slots: vec![EMPTY_SLOT; capacity],
        }
    }

    /// The number of slots.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Mark every slot empty.
    pub fn clear(&mut self) {
        self.slots.fill(EMPTY_SLOT);
    }

    /// Find the slot for `text`.
    ///
    /// Probes forward from `hash(text) mod capacity` until an empty slot or
    /// a slot bound to an entry with the same text.
    ///
    /// ## Returns
    /// The slot index, or `None` when every slot is bound to other texts.
    pub fn locate(
        &self,
        text: &[u8],
        entries: &[VocabEntry],
    ) -> Option<usize> {
        let capacity = self.slots.len();
        let mut slot = hash_text(text) as usize % capacity;
        for _ in 0..capacity {
            let bound = self.slots[slot];
            if bound == EMPTY_SLOT || entries[bound as usize].text == text {
                return Some(slot);
            }
            slot = (slot + 1) % capacity;
        }
        None
    }

    /// The id bound at `slot`, if any.
    #[inline]
    pub fn get(
        &self,
        slot: usize,
    ) -> Option<usize> {
        match self.slots[slot] {
            EMPTY_SLOT => None,
            id => Some(id as usize),
        }
    }

    /// Bind `slot` to `id`.
    #[inline]
    pub fn bind(
        &mut self,
        slot: usize,
        id: usize,
    ) {
        self.slots[slot] = id as u32;
    }
}
