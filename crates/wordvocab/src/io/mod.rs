//! # Vocabulary IO
//!
//! The binary vocabulary format, and path helpers around it.
//!
//! Multi-byte fields are written in the native byte order of the writer;
//! files are not portable between hosts of different endianness.

pub mod binary_format;

use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
};

#[doc(inline)]
pub use binary_format::{
    FORMAT_VERSION,
    TAGGED_MAGIC,
    read_vocab,
    read_vocab_tagged,
    write_vocab,
    write_vocab_tagged,
};

use crate::{errors::VocabResult, vocab::{VocabOptions, Vocabulary}};

/// Save a [`Vocabulary`] to a binary vocab file.
///
/// # Arguments
/// * `vocab` - the vocabulary to save.
/// * `path` - the path to save the vocabulary to.
pub fn save_vocab_path<P: AsRef<Path>>(
    vocab: &Vocabulary,
    path: P,
) -> VocabResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_vocab(vocab, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Load a [`Vocabulary`] from a binary vocab file.
///
/// # Arguments
/// * `options` - the options for the loaded vocabulary.
/// * `path` - the path to the vocabulary file.
pub fn load_vocab_path<P: AsRef<Path>>(
    options: VocabOptions,
    path: P,
) -> VocabResult<Vocabulary> {
    let mut reader = BufReader::new(File::open(path)?);
    read_vocab(options, &mut reader)
}
