//! Errors produced when encoding or decoding with a tokenizer.

use std::fmt;

/// Errors produced by the tokenizer module.
///
/// - **UnknownSymbol**: a symbol not in the vocabulary was encountered during
///   encode. Build the tokenizer from a corpus that includes the symbol.
/// - **InvalidId**: a token id outside `[0, vocab_size)` during decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenizerError {
    /// A symbol not in the vocabulary was encountered during encode.
    UnknownSymbol(String),

    /// A token id is out of range during decode.
    InvalidId(usize),
}

impl fmt::Display for TokenizerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenizerError::UnknownSymbol(s) => write!(f, "unknown symbol {s:?}"),
            TokenizerError::InvalidId(id) => write!(f, "invalid id {id}"),
        }
    }
}

impl std::error::Error for TokenizerError {}
