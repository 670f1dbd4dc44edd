//! Crate-level error: wraps the module errors for unified handling at the
//! pipeline entry points ([`crate::run`] and the binary).

use std::fmt;

use crate::config::ConfigError;
use crate::data::DataError;
use crate::tokenizer::TokenizerError;

/// Errors surfaced by the pipeline.
///
/// Each variant wraps one module's error type. All of them are fatal: the run
/// either completes fully or aborts with one of these.
#[derive(Debug)]
pub enum Error {
    /// Configuration could not be built or failed validation.
    Config(ConfigError),

    /// Corpus could not be fetched or loaded.
    Data(DataError),

    /// Encoding or decoding failed (e.g. an id out of vocabulary range).
    Tokenizer(TokenizerError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "config: {e}"),
            Error::Data(e) => write!(f, "data: {e}"),
            Error::Tokenizer(e) => write!(f, "tokenizer: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Config(e) => Some(e),
            Error::Data(e) => Some(e),
            Error::Tokenizer(e) => Some(e),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<DataError> for Error {
    fn from(e: DataError) -> Self {
        Error::Data(e)
    }
}

impl From<TokenizerError> for Error {
    fn from(e: TokenizerError) -> Self {
        Error::Tokenizer(e)
    }
}
