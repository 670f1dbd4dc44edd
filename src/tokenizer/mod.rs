//! Tokenization: encode text to token ids and decode back.
//!
//! This module defines the **trait** ([`Tokenizer`]) and **error**
//! ([`TokenizerError`]). Implementations live in the `impls` submodule
//! ([`CharTokenizer`] for character-level). Vocabulary is an implementation
//! detail of [`CharTokenizer`] (private `vocab` module).

mod error;
mod impls;
mod vocab;

pub use error::TokenizerError;
pub use impls::CharTokenizer;
pub use vocab::Vocab;

/// Trait for tokenizers: encode text to ids and decode ids to text.
pub trait Tokenizer {
    /// Encodes a string into a sequence of token ids.
    ///
    /// # Errors
    ///
    /// Returns [`TokenizerError::UnknownSymbol`] if a symbol (e.g. character)
    /// is not in the vocabulary.
    fn encode(&self, s: &str) -> Result<Vec<usize>, TokenizerError>;

    /// Decodes a sequence of token ids into a string.
    ///
    /// # Errors
    ///
    /// Returns [`TokenizerError::InvalidId`] if an id is out of range.
    fn decode(&self, ids: &[usize]) -> Result<String, TokenizerError>;

    /// Vocabulary size (number of distinct tokens).
    fn vocab_size(&self) -> usize;

    /// Token id used for beginning/end-of-sequence.
    fn bos_id(&self) -> usize;
}
