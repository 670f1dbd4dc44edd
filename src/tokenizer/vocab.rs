//! Vocabulary: mapping between token ids and symbols.

use std::collections::HashMap;

/// Maps token ids to symbols and back. Ids are contiguous from `0` to `len - 1`.
///
/// Symbols are stored as strings so the same vocab works for single-character
/// tokens and multi-character markers (e.g. the BOS symbol).
#[derive(Clone, Debug)]
pub struct Vocab {
    id_to_sym: Vec<String>,
    sym_to_id: HashMap<String, usize>,
}

impl Vocab {
    /// Builds a new vocab with the given symbols in order. Duplicate symbols
    /// are skipped (first occurrence wins).
    #[must_use]
    pub fn new(symbols: impl IntoIterator<Item = String>) -> Self {
        let mut id_to_sym = Vec::new();
        let mut sym_to_id = HashMap::new();
        for s in symbols {
            if sym_to_id.contains_key(&s) {
                continue;
            }
            let id = id_to_sym.len();
            id_to_sym.push(s.clone());
            sym_to_id.insert(s, id);
        }
        Vocab {
            id_to_sym,
            sym_to_id,
        }
    }

    /// Returns the number of symbols (vocab size).
    #[must_use]
    pub fn len(&self) -> usize {
        self.id_to_sym.len()
    }

    /// Returns `true` if the vocab is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.id_to_sym.is_empty()
    }

    /// Returns the symbol for `id`, or `None` if out of range.
    #[must_use]
    pub fn get_symbol(&self, id: usize) -> Option<&str> {
        self.id_to_sym.get(id).map(String::as_str)
    }

    /// Returns the id for `symbol`, or `None` if not in vocab.
    #[must_use]
    pub fn get_id(&self, symbol: &str) -> Option<usize> {
        self.sym_to_id.get(symbol).copied()
    }
}
