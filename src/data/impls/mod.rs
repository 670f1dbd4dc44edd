//! Data loader implementations.

mod fetch;
mod path;

pub use fetch::FetchLoader;
pub use path::{load_from_path, PathLoader};
