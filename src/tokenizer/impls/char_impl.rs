//! Character-level tokenizer: one token per character, vocab built from a
//! corpus (BOS + sorted unique chars).

use std::collections::BTreeSet;

use super::super::{Tokenizer, TokenizerError, Vocab};

/// Character-level tokenizer. Vocab = BOS (at id 0) + the corpus's unique
/// characters in sorted order, so ids are stable across runs for the same
/// corpus regardless of document order.
#[derive(Clone, Debug)]
pub struct CharTokenizer {
    vocab: Vocab,
    bos_id: usize,
}

impl CharTokenizer {
    /// Builds a char tokenizer from a corpus string.
    #[must_use]
    pub fn from_corpus(corpus: &str, bos_symbol: &str) -> Self {
        let unique: BTreeSet<char> = corpus.chars().collect();
        let mut symbols = vec![bos_symbol.to_string()];
        symbols.extend(unique.into_iter().map(|c| c.to_string()));
        let vocab = Vocab::new(symbols);
        CharTokenizer { vocab, bos_id: 0 }
    }
}

impl Tokenizer for CharTokenizer {
    fn encode(&self, s: &str) -> Result<Vec<usize>, TokenizerError> {
        let mut ids = Vec::with_capacity(s.chars().count());
        for ch in s.chars() {
            let sym = ch.to_string();
            let id = self
                .vocab
                .get_id(&sym)
                .ok_or(TokenizerError::UnknownSymbol(sym))?;
            ids.push(id);
        }
        Ok(ids)
    }

    fn decode(&self, ids: &[usize]) -> Result<String, TokenizerError> {
        let mut s = String::new();
        for &id in ids {
            let sym = self
                .vocab
                .get_symbol(id)
                .ok_or(TokenizerError::InvalidId(id))?;
            s.push_str(sym);
        }
        Ok(s)
    }

    fn vocab_size(&self) -> usize {
        self.vocab.len()
    }

    fn bos_id(&self) -> usize {
        self.bos_id
    }
}
