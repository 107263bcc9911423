//! # Common Types

/// Floating point type used for subsampling probabilities.
pub type Real = f32;

cfg_if::cfg_if! {
    if #[cfg(feature = "ahash")] {
        /// Type Alias for hash maps in this crate.
        pub type VocabHashMap<K, V> = ahash::AHashMap<K, V>;

        /// Create a new empty hash map.
        pub fn hash_map_new<K, V>() -> VocabHashMap<K, V> {
            VocabHashMap::new()
        }

        /// Iterator over hash map entries.
        ///
        /// Note: `ahash::AHashMap` is a specialization of `std::collections::HashMap`.
        pub type VocabHashIter<'a, K, V> = std::collections::hash_map::Iter<'a, K, V>;
    } else {
        /// Type Alias for hash maps in this crate.
        pub type VocabHashMap<K, V> = std::collections::HashMap<K, V>;

        /// Create a new empty hash map.
        pub fn hash_map_new<K, V>() -> VocabHashMap<K, V> {
            VocabHashMap::new()
        }

        /// Iterator over hash map entries.
        pub type VocabHashIter<'a, K, V> = std::collections::hash_map::Iter<'a, K, V>;
    }
}
