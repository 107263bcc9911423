//! # Line Reading
//!
//! Turns corpus lines into id sequences for the training loop.

use std::io::{self, BufRead, Seek};

use rand::Rng;

use crate::{
    corpus::{CorpusCursor, EOS},
    types::Real,
    vocab::{entry::EntryKind, vocabulary::Vocabulary},
};

/// The most tokens an unsupervised line may consume.
pub const MAX_LINE_SIZE: usize = 1024;

impl Vocabulary {
    /// Read the next unsupervised line of word ids.
    ///
    /// Rewinds `cursor` first if it hit end-of-input. Unknown tokens and
    /// labels are skipped; known words are subsampled with draws from `rng`.
    /// Stops at [`EOS`], end-of-input, or after [`MAX_LINE_SIZE`] tokens.
    ///
    /// ## Arguments
    /// * `cursor` - this reader's corpus cursor.
    /// * `rng` - this reader's random stream.
    /// * `words` - cleared, then filled with the kept word ids.
    ///
    /// ## Returns
    /// The raw number of tokens read, including dropped ones.
    pub fn read_line<R, G>(
        &self,
        cursor: &mut CorpusCursor<R>,
        rng: &mut G,
        words: &mut Vec<usize>,
    ) -> io::Result<usize>
    where
        R: BufRead + Seek,
        G: Rng,
    {
        cursor.reset_if_at_end()?;
        words.clear();

        let mut token = Vec::new();
        let mut ntokens = 0;
        while cursor.read_token(&mut token)? {
            ntokens += 1;
            if let Some(id) = self.lookup_id(&token)
                && self.kind_of(id) == Some(EntryKind::Word)
                && !self.discard(id, rng.random::<Real>())
            {
                words.push(id);
            }
            if ntokens >= MAX_LINE_SIZE || token == EOS {
                break;
            }
        }
        Ok(ntokens)
    }

    /// Read the next supervised line of word ids and label ids.
    ///
    /// Rewinds `cursor` first if it hit end-of-input. No subsampling and no
    /// length cap; stops at [`EOS`] or end-of-input.
    ///
    /// Tokens are classified by their entry, or by the label prefix when
    /// unknown. Words are pushed as `Some(id)`, or `None` when unknown.
    /// Known labels are pushed as offsets into the label range; unknown
    /// labels are dropped.
    ///
    /// ## Returns
    /// The number of tokens read.
    pub fn read_supervised_line<R>(
        &self,
        cursor: &mut CorpusCursor<R>,
        words: &mut Vec<Option<usize>>,
        labels: &mut Vec<usize>,
    ) -> io::Result<usize>
    where
        R: BufRead + Seek,
    {
        cursor.reset_if_at_end()?;
        words.clear();
        labels.clear();

        let mut token = Vec::new();
        let mut ntokens = 0;
        while cursor.read_token(&mut token)? {
            ntokens += 1;
            let id = self.lookup_id(&token);
            let kind = id
                .and_then(|id| self.kind_of(id))
                .unwrap_or_else(|| self.classify(&token));
            match (kind, id) {
                (EntryKind::Word, id) => words.push(id),
                (EntryKind::Label, Some(id)) => labels.push(id - self.nwords()),
                (EntryKind::Label, None) => {}
            }
            if token == EOS {
                break;
            }
        }
        Ok(ntokens)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::vocab::{TrainingMode, VocabOptions};

    const CORPUS: &[u8] = b"__label__pos good movie\n__label__neg bad movie\n";

    fn vocab(mode: TrainingMode) -> Vocabulary {
        let options = VocabOptions::default()
            .with_capacity(1009)
            .with_mode(mode)
            // Large enough that nothing is ever subsampled.
            .with_sampling_threshold(10.0);
        Vocabulary::read_from_stream(options, Cursor::new(CORPUS)).unwrap()
    }

    fn id(
        vocab: &Vocabulary,
        text: &str,
    ) -> usize {
        vocab.lookup_id(text.as_bytes()).unwrap()
    }

    #[test]
    fn test_read_line() {
        let vocab = vocab(TrainingMode::SkipGram);
        let mut cursor = CorpusCursor::new(Cursor::new(b"good zzz movie\nbad\n".as_slice()));
        let mut rng = StdRng::seed_from_u64(7);
        let mut words = vec![];

        let n = vocab.read_line(&mut cursor, &mut rng, &mut words).unwrap();
        assert_eq!(n, 4);
        assert_eq!(
            words,
            vec![id(&vocab, "good"), id(&vocab, "movie"), id(&vocab, "</s>")]
        );

        let n = vocab.read_line(&mut cursor, &mut rng, &mut words).unwrap();
        assert_eq!(n, 2);
        assert_eq!(words, vec![id(&vocab, "bad"), id(&vocab, "</s>")]);

        // End-of-input, then the cursor wraps to the next epoch.
        let n = vocab.read_line(&mut cursor, &mut rng, &mut words).unwrap();
        assert_eq!(n, 0);
        assert!(words.is_empty());
        assert!(cursor.at_end());

        let n = vocab.read_line(&mut cursor, &mut rng, &mut words).unwrap();
        assert_eq!(n, 4);
        assert_eq!(words[0], id(&vocab, "good"));
    }

    #[test]
    fn test_read_line_skips_labels() {
        let vocab = vocab(TrainingMode::SkipGram);
        let mut cursor = CorpusCursor::new(Cursor::new(CORPUS));
        let mut rng = StdRng::seed_from_u64(7);
        let mut words = vec![];

        let n = vocab.read_line(&mut cursor, &mut rng, &mut words).unwrap();
        assert_eq!(n, 4);
        assert_eq!(
            words,
            vec![id(&vocab, "good"), id(&vocab, "movie"), id(&vocab, "</s>")]
        );
    }

    #[test]
    fn test_read_line_cap() {
        let vocab = vocab(TrainingMode::SkipGram);
        let line = "movie ".repeat(MAX_LINE_SIZE + 10);
        let mut cursor = CorpusCursor::new(Cursor::new(line.into_bytes()));
        let mut rng = StdRng::seed_from_u64(1);
        let mut words = vec![];

        let n = vocab.read_line(&mut cursor, &mut rng, &mut words).unwrap();
        assert_eq!(n, MAX_LINE_SIZE);
        assert_eq!(words.len(), MAX_LINE_SIZE);

        let n = vocab.read_line(&mut cursor, &mut rng, &mut words).unwrap();
        assert_eq!(n, 10);
    }

    #[test]
    fn test_read_line_subsamples() {
        let options = VocabOptions::default()
            .with_capacity(1009)
            .with_sampling_threshold(0.0);
        let vocab = Vocabulary::read_from_stream(options, Cursor::new(CORPUS)).unwrap();

        let mut cursor = CorpusCursor::new(Cursor::new(CORPUS));
        let mut rng = StdRng::seed_from_u64(3);
        let mut words = vec![];
        let n = vocab.read_line(&mut cursor, &mut rng, &mut words).unwrap();

        // Every word threshold is 0; only an exact 0.0 draw keeps a word.
        assert_eq!(n, 4);
        assert!(words.len() <= 1);
    }

    #[test]
    fn test_read_supervised_line() {
        let vocab = vocab(TrainingMode::Supervised);
        let mut cursor = CorpusCursor::new(Cursor::new(
            b"__label__neg __label__new bad unseen\n".as_slice(),
        ));
        let mut words = vec![];
        let mut labels = vec![];

        let n = vocab
            .read_supervised_line(&mut cursor, &mut words, &mut labels)
            .unwrap();
        assert_eq!(n, 5);
        assert_eq!(
            words,
            vec![Some(id(&vocab, "bad")), None, Some(id(&vocab, "</s>"))]
        );
        let neg = id(&vocab, "__label__neg") - vocab.nwords();
        assert_eq!(labels, vec![neg]);
        assert_eq!(vocab.label_text(neg).unwrap(), b"__label__neg");
    }

    #[test]
    fn test_read_supervised_line_no_cap() {
        let vocab = vocab(TrainingMode::Supervised);
        let line = "good ".repeat(MAX_LINE_SIZE + 10);
        let mut cursor = CorpusCursor::new(Cursor::new(line.into_bytes()));
        let mut words = vec![];
        let mut labels = vec![];

        let n = vocab
            .read_supervised_line(&mut cursor, &mut words, &mut labels)
            .unwrap();
        assert_eq!(n, MAX_LINE_SIZE + 10);
        assert_eq!(words.len(), MAX_LINE_SIZE + 10);
        assert!(labels.is_empty());
    }
}
