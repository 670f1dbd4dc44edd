//! Errors produced when fetching, loading, or validating input data.

use std::fmt;

/// Errors produced by the data loading module.
///
/// - **Io**: the file could not be read (missing, unreadable, invalid UTF-8)
///   or the fetched corpus could not be written.
/// - **Fetch**: the one-time network fetch failed (connection error or
///   non-success status). Fatal: the run aborts.
/// - **EmptyFile**: the corpus yields no non-blank lines.
/// - **EmptyDataItem**: a [`DataItem`](super::DataItem) was constructed from a
///   blank string (loaders skip blank lines, so this indicates a caller bug).
#[derive(Debug)]
pub enum DataError {
    /// I/O error while reading or persisting the corpus.
    Io(std::io::Error),

    /// Network fetch failed (connection error or non-success status).
    Fetch(reqwest::Error),

    /// The corpus is empty or yields no non-blank lines.
    EmptyFile,

    /// A data item was constructed from a blank line.
    EmptyDataItem,
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataError::Io(e) => write!(f, "io: {e}"),
            DataError::Fetch(e) => write!(f, "fetch: {e}"),
            DataError::EmptyFile => write!(f, "input corpus is empty"),
            DataError::EmptyDataItem => write!(f, "blank line used as data item"),
        }
    }
}

impl std::error::Error for DataError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DataError::Io(e) => Some(e),
            DataError::Fetch(e) => Some(e),
            DataError::EmptyFile | DataError::EmptyDataItem => None,
        }
    }
}

impl From<std::io::Error> for DataError {
    fn from(e: std::io::Error) -> Self {
        DataError::Io(e)
    }
}

impl From<reqwest::Error> for DataError {
    fn from(e: reqwest::Error) -> Self {
        DataError::Fetch(e)
    }
}
