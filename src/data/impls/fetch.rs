//! Fetch-if-missing loader: downloads the corpus once, persists it, then
//! reads it like any local file.

use std::fs;
use std::path::{Path, PathBuf};

use super::super::{Data, DataError, DataLoader};
use super::path::PathLoader;

/// Loads the corpus from `path`, fetching it from `url` first when the file
/// does not exist. The fetched body is persisted so subsequent runs read
/// locally. A failed fetch (network error or non-success status) is fatal.
#[derive(Clone, Debug)]
pub struct FetchLoader {
    path: PathBuf,
    url: String,
}

impl FetchLoader {
    /// Creates a loader for the given path and source URL.
    #[must_use]
    pub fn new(path: impl AsRef<Path>, url: impl Into<String>) -> Self {
        FetchLoader {
            path: path.as_ref().to_path_buf(),
            url: url.into(),
        }
    }
}

impl DataLoader for FetchLoader {
    fn load(&self) -> Result<Data, DataError> {
        if !self.path.exists() {
            tracing::info!("corpus missing at {}, fetching {}", self.path.display(), self.url);
            let body = reqwest::blocking::get(&self.url)
                .and_then(reqwest::blocking::Response::error_for_status)
                .and_then(|r| r.text())?;
            if let Some(parent) = self.path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)?;
                }
            }
            fs::write(&self.path, body)?;
        }
        PathLoader::new(&self.path).load()
    }
}
