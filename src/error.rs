//! self defined error type

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[allow(missing_docs)]
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Key {key} not found in database.")]
    KeyNotFound { key: String },
    #[error("Failed to persist database to {path:?}")]
    Persistence { path: PathBuf, source: io::Error },
}
