//! # Feature-Hash Prune Index
//!
//! Maps external hash-bucket ids to compacted ids after model compression.
//!
//! The index has three states, persisted as a signed size flag:
//! * unset (`-1`): pruning was never applied; bucket ids pass through.
//! * active and empty (`0`): every bucket id is dropped.
//! * active (`n > 0`): bucket ids are remapped, unmapped ids are dropped.
//!
//! Both sides of every mapping are non-negative.

use crate::types::{VocabHashMap, hash_map_new};

/// Bucket remapping table for pruned models.
#[derive(Debug, Clone)]
pub struct PruneIndex {
    mapping: VocabHashMap<i32, i32>,
    active: bool,
}

impl Default for PruneIndex {
    fn default() -> Self {
        Self {
            mapping: hash_map_new(),
            active: false,
        }
    }
}

impl PartialEq for PruneIndex {
    fn eq(
        &self,
        other: &Self,
    ) -> bool {
        self.active == other.active && self.sorted_pairs() == other.sorted_pairs()
    }
}

impl PruneIndex {
    /// Build an active index from ``(original, mapped)`` pairs.
    ///
    /// ## Panics
    /// If any id is negative.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (i32, i32)>,
    {
        let mut index = Self::default();
        for (original, mapped) in pairs {
            index.insert(original, mapped);
        }
        index.active = true;
        index
    }

    /// Has pruning been applied?
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Switch the index on; called by prune.
    pub fn activate(&mut self) {
        self.active = true;
    }

    /// The persisted size flag: `-1` when unset, else the mapping size.
    pub fn size_flag(&self) -> i64 {
        if self.active {
            self.mapping.len() as i64
        } else {
            -1
        }
    }

    /// Stage a remapping of `original` to `mapped`.
    ///
    /// Staged mappings take effect once the index is active.
    ///
    /// ## Panics
    /// If `original` or `mapped` is negative.
    pub fn insert(
        &mut self,
        original: i32,
        mapped: i32,
    ) {
        assert!(
            original >= 0 && mapped >= 0,
            "negative bucket mapping: {original} -> {mapped}"
        );
        self.mapping.insert(original, mapped);
    }

    /// The mapped id of `original`.
    pub fn get(
        &self,
        original: i32,
    ) -> Option<i32> {
        self.mapping.get(&original).copied()
    }

    /// The number of mappings.
    pub fn len(&self) -> usize {
        self.mapping.len()
    }

    /// Is the mapping empty?
    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty()
    }

    /// The mappings sorted by original id.
    pub fn sorted_pairs(&self) -> Vec<(i32, i32)> {
        let mut pairs: Vec<(i32, i32)> = self.mapping.iter().map(|(&k, &v)| (k, v)).collect();
        pairs.sort_unstable();
        pairs
    }

    /// Resolve a candidate bucket id.
    ///
    /// ## Returns
    /// The bucket to emit, or `None` when the candidate is dropped.
    pub fn resolve(
        &self,
        candidate: i32,
    ) -> Option<i32> {
        if candidate < 0 {
            return None;
        }
        if !self.active {
            return Some(candidate);
        }
        self.get(candidate)
    }
}
