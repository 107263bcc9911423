//! # Binary Vocabulary Format
//!
//! Layout, native byte order, no padding:
//! ```text
//! i32 size
//! i32 nwords
//! i32 nlabels
//! i64 ntokens
//! i64 prune_size        (-1 unset, 0 active/empty, n > 0 active)
//! size times:
//!   bytes  text, NUL-terminated
//!   i64    count
//!   u8     kind (0 word, 1 label)
//! prune_size times (only if > 0):
//!   i32    original
//!   i32    mapped
//! ```
//!
//! The tagged variant prefixes the same body with [`TAGGED_MAGIC`] and a
//! `u32` [`FORMAT_VERSION`].
//!
//! Readers validate the structure rather than trusting the stream; the
//! discard table is never persisted and is recomputed on load.

use std::io::{BufRead, Write};

use byteorder::{NativeEndian as NE, ReadBytesExt, WriteBytesExt};

use crate::{
    errors::{VocabError, VocabResult},
    vocab::{EntryKind, EntryTable, PruneIndex, VocabEntry, VocabOptions, Vocabulary},
};

/// Magic bytes of the tagged format.
pub const TAGGED_MAGIC: &[u8; 4] = b"WVOC";

/// Version of the tagged format.
pub const FORMAT_VERSION: u32 = 1;

/// The decoded contents of a vocabulary stream.
pub(crate) struct VocabParts {
    pub table: EntryTable,
    pub ntokens: u64,
    pub prune_index: PruneIndex,
}

fn corrupt<T>(msg: impl Into<String>) -> VocabResult<T> {
    Err(VocabError::Corrupt(msg.into()))
}

fn to_i32(
    value: usize,
    what: &str,
) -> VocabResult<i32> {
    i32::try_from(value).map_err(|_| VocabError::Corrupt(format!("{what} ({value}) exceeds i32")))
}

fn to_i64(
    value: u64,
    what: &str,
) -> VocabResult<i64> {
    i64::try_from(value).map_err(|_| VocabError::Corrupt(format!("{what} ({value}) exceeds i64")))
}

/// Write a [`Vocabulary`] in the binary format.
///
/// Prune mappings are written in ascending order of original id.
pub fn write_vocab<W: Write>(
    vocab: &Vocabulary,
    writer: &mut W,
) -> VocabResult<()> {
    let table = vocab.table();
    writer.write_i32::<NE>(to_i32(table.len(), "size")?)?;
    writer.write_i32::<NE>(to_i32(table.nwords(), "nwords")?)?;
    writer.write_i32::<NE>(to_i32(table.nlabels(), "nlabels")?)?;
    writer.write_i64::<NE>(to_i64(vocab.ntokens(), "ntokens")?)?;

    let prune_index = vocab.prune_index();
    let prune_size = prune_index.size_flag();
    writer.write_i64::<NE>(prune_size)?;

    for entry in table.entries() {
        writer.write_all(&entry.text)?;
        writer.write_u8(0)?;
        writer.write_i64::<NE>(to_i64(entry.count, "count")?)?;
        writer.write_u8(entry.kind.tag())?;
    }

    if prune_size > 0 {
        for (original, mapped) in prune_index.sorted_pairs() {
            writer.write_i32::<NE>(original)?;
            writer.write_i32::<NE>(mapped)?;
        }
    }
    Ok(())
}

/// Read a [`Vocabulary`] from the binary format.
///
/// ## Arguments
/// * `options` - options of the loaded vocabulary; `capacity` bounds the
///   accepted entry count.
/// * `reader` - the stream.
pub fn read_vocab<R: BufRead>(
    options: VocabOptions,
    reader: &mut R,
) -> VocabResult<Vocabulary> {
    Vocabulary::read_from(options, reader)
}

/// Write a [`Vocabulary`] in the tagged binary format.
pub fn write_vocab_tagged<W: Write>(
    vocab: &Vocabulary,
    writer: &mut W,
) -> VocabResult<()> {
    writer.write_all(TAGGED_MAGIC)?;
    writer.write_u32::<NE>(FORMAT_VERSION)?;
    write_vocab(vocab, writer)
}

/// Read a [`Vocabulary`] from the tagged binary format.
///
/// ## Returns
/// `BadHeader` on a magic or version mismatch.
pub fn read_vocab_tagged<R: BufRead>(
    options: VocabOptions,
    reader: &mut R,
) -> VocabResult<Vocabulary> {
    let mut magic = [0u8; 4];
    reader.read_exact(&mut magic)?;
    if &magic != TAGGED_MAGIC {
        return Err(VocabError::BadHeader);
    }
    if reader.read_u32::<NE>()? != FORMAT_VERSION {
        return Err(VocabError::BadHeader);
    }
    read_vocab(options, reader)
}

/// Decode and validate a vocabulary body.
pub(crate) fn read_vocab_parts<R: BufRead>(
    reader: &mut R,
    capacity: usize,
) -> VocabResult<VocabParts> {
    let size = reader.read_i32::<NE>()?;
    let nwords = reader.read_i32::<NE>()?;
    let nlabels = reader.read_i32::<NE>()?;
    let ntokens = reader.read_i64::<NE>()?;
    let prune_size = reader.read_i64::<NE>()?;

    if size < 0 || nwords < 0 || nlabels < 0 {
        return corrupt(format!(
            "negative header counts: size={size} nwords={nwords} nlabels={nlabels}"
        ));
    }
    let (size, nwords, nlabels) = (size as usize, nwords as usize, nlabels as usize);
    if nwords + nlabels != size {
        return corrupt(format!("nwords ({nwords}) + nlabels ({nlabels}) != size ({size})"));
    }
    if size > capacity {
        return corrupt(format!("size ({size}) exceeds capacity ({capacity})"));
    }
    if ntokens < 0 {
        return corrupt(format!("negative ntokens: {ntokens}"));
    }
    if prune_size < -1 {
        return corrupt(format!("invalid prune size: {prune_size}"));
    }

    let mut entries = Vec::with_capacity(size);
    for id in 0..size {
        let entry = read_entry(reader)?;
        let expected = if id < nwords {
            EntryKind::Word
        } else {
            EntryKind::Label
        };
        if entry.kind != expected {
            return corrupt(format!("entry {id} is a {}, expected a {expected}", entry.kind));
        }
        entries.push(entry);
    }
    let table = EntryTable::from_entries(capacity, entries)?;

    let mut prune_index = PruneIndex::default();
    if prune_size >= 0 {
        for _ in 0..prune_size {
            let original = reader.read_i32::<NE>()?;
            let mapped = reader.read_i32::<NE>()?;
            if original < 0 || mapped < 0 {
                return corrupt(format!("negative prune mapping: {original} -> {mapped}"));
            }
            prune_index.insert(original, mapped);
        }
        if prune_index.len() as i64 != prune_size {
            return corrupt("duplicate prune index keys");
        }
        prune_index.activate();
    }

    Ok(VocabParts {
        table,
        ntokens: ntokens as u64,
        prune_index,
    })
}

fn read_entry<R: BufRead>(reader: &mut R) -> VocabResult<VocabEntry> {
    let mut text = Vec::new();
    reader.read_until(0, &mut text)?;
    if text.pop() != Some(0) {
        return corrupt("unterminated entry text");
    }

    let count = reader.read_i64::<NE>()?;
    if count < 0 {
        return corrupt(format!("negative entry count: {count}"));
    }

    let tag = reader.read_u8()?;
    let kind = EntryKind::from_tag(tag)
        .ok_or_else(|| VocabError::Corrupt(format!("unknown entry kind tag: {tag}")))?;

    Ok(VocabEntry::new(text, count as u64, kind))
}
