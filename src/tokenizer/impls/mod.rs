//! Tokenizer implementations.

mod char_impl;

pub use char_impl::CharTokenizer;
