//! # Vocabulary Builder
//!
//! The single-threaded build pass. A [`VocabBuilder`] owns all mutable build
//! state and is consumed by [`VocabBuilder::finish`] into an immutable
//! [`Vocabulary`].

use std::io::{BufRead, Seek};

use crate::{
    corpus::CorpusCursor,
    errors::{VocabError, VocabResult},
    vocab::{
        entry::EntryKind,
        entry_table::EntryTable,
        options::VocabOptions,
        prune_index::PruneIndex,
        vocabulary::Vocabulary,
    },
};

/// Streaming vocabulary builder.
#[derive(Debug, Clone)]
pub struct VocabBuilder {
    options: VocabOptions,
    table: EntryTable,
    ntokens: u64,
    interim_floor: u64,
}

impl VocabBuilder {
    /// Create an empty builder.
    pub fn new(options: VocabOptions) -> Self {
        let table = EntryTable::new(options.capacity);
        Self {
            options,
            table,
            ntokens: 0,
            interim_floor: 1,
        }
    }

    /// The builder options.
    pub fn options(&self) -> &VocabOptions {
        &self.options
    }

    /// The entry table, as built so far.
    pub fn table(&self) -> &EntryTable {
        &self.table
    }

    /// Tokens seen so far.
    pub fn ntokens(&self) -> u64 {
        self.ntokens
    }

    /// The last interim threshold floor; `1` until the first interim pass.
    pub fn interim_floor(&self) -> u64 {
        self.interim_floor
    }

    /// Count one occurrence of `text`.
    ///
    /// This does not run the memory-bound control loop;
    /// see [`VocabBuilder::push_token`].
    pub fn add<S: AsRef<[u8]>>(
        &mut self,
        text: S,
    ) -> VocabResult<()> {
        let prefix = &self.options.label_prefix;
        self.table
            .increment(text.as_ref(), |t| EntryKind::classify(t, prefix))?;
        self.ntokens += 1;
        Ok(())
    }

    /// Count one occurrence of `text`, then keep the slot table sparse.
    ///
    /// Once the table holds more than 75% of capacity, the interim floor is
    /// raised by one and both kinds are thresholded at that floor. The floor
    /// only grows, and can exceed the configured final minimums.
    pub fn push_token<S: AsRef<[u8]>>(
        &mut self,
        text: S,
    ) -> VocabResult<()> {
        self.add(text)?;

        let interval = self.options.progress_interval;
        if interval > 0 && self.ntokens % interval == 0 {
            log::debug!("Read {} tokens", self.ntokens);
        }

        if 4 * self.table.len() > 3 * self.table.capacity() {
            self.interim_floor += 1;
            log::debug!(
                "Slot table over 75% ({}/{}); interim threshold at {}",
                self.table.len(),
                self.table.capacity(),
                self.interim_floor
            );
            self.table
                .threshold(self.interim_floor, self.interim_floor);
        }
        Ok(())
    }

    /// Push every token of an iterator; see [`VocabBuilder::push_token`].
    pub fn update_from_tokens<I>(
        &mut self,
        tokens: I,
    ) -> VocabResult<()>
    where
        I: IntoIterator,
        I::Item: AsRef<[u8]>,
    {
        for token in tokens {
            self.push_token(token)?;
        }
        Ok(())
    }

    /// Push every token of a corpus stream, until end-of-input.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, cursor)))]
    pub fn update_from_stream<R>(
        &mut self,
        cursor: &mut CorpusCursor<R>,
    ) -> VocabResult<()>
    where
        R: BufRead + Seek,
    {
        let mut token = Vec::new();
        while cursor.read_token(&mut token)? {
            self.push_token(&token)?;
        }
        Ok(())
    }

    /// Threshold the entries in place; see [`EntryTable::threshold`].
    pub fn threshold(
        &mut self,
        min_word: u64,
        min_label: u64,
    ) {
        self.table.threshold(min_word, min_label);
    }

    /// Finish the build pass.
    ///
    /// Runs the final threshold at the configured minimum counts and
    /// computes the discard table.
    ///
    /// ## Returns
    /// `EmptyVocabulary` if nothing survives the final threshold.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self)))]
    pub fn finish(mut self) -> VocabResult<Vocabulary> {
        let VocabOptions {
            min_count,
            min_count_label,
            ..
        } = self.options;
        self.table.threshold(min_count, min_count_label);

        log::info!("Read {} tokens", self.ntokens);
        log::info!("Number of words:  {}", self.table.nwords());
        log::info!("Number of labels: {}", self.table.nlabels());

        if self.table.is_empty() {
            return Err(VocabError::EmptyVocabulary {
                min_count,
                min_count_label,
            });
        }

        Ok(Vocabulary::from_parts(
            self.options,
            self.table,
            self.ntokens,
            PruneIndex::default(),
        ))
    }
}
