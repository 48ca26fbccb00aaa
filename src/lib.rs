#![warn(missing_docs)]
//! a simple key/value store persisted as a single JSON document
pub use store::KvStore;

pub mod error;
pub mod store;

/// simply type
pub type Result<T> = std::result::Result<T, anyhow::Error>;
