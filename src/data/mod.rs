//! Corpus loading: one training document per line.
//!
//! This module defines the **trait** ([`DataLoader`]), **models**
//! ([`DataItem`], [`Data`]), and **error** ([`DataError`]). Implementations
//! live in the `impls` submodule: [`PathLoader`] reads a local file,
//! [`FetchLoader`] downloads the corpus once if the file is missing and then
//! reads it locally.

mod error;
mod impls;
mod types;

pub use error::DataError;
pub use impls::{load_from_path, FetchLoader, PathLoader};
pub use types::{Data, DataItem};

/// Trait for loading input data.
pub trait DataLoader {
    /// Loads data. Returns [`Data`] or a [`DataError`].
    fn load(&self) -> Result<Data, DataError>;
}
