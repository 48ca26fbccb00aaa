//! json file backed store

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::error::StoreError;
use crate::Result;

/// store keys and values
///
/// A store either owns a backing file (`open`) which it rewrites in full
/// after every mutation, or keeps everything in memory (`in_memory`).
/// A backing file belongs to exactly one store instance for its lifetime;
/// concurrent instances over the same file are unsupported.
pub struct KvStore {
    data: HashMap<String, String>,
    path: Option<PathBuf>,
}

impl KvStore {
    /// Open the KvStore backed by the given file path. Return the KvStore.
    ///
    /// Prior contents that are missing, unreadable or not a flat JSON object
    /// of strings are discarded and the store starts empty. Nothing is
    /// written here; the file is created by the first persisting mutation.
    pub fn open(path: impl Into<PathBuf>) -> KvStore {
        let path = path.into();
        let data = KvStore::load(&path);
        KvStore { data, path: Some(path) }
    }

    /// Create a KvStore without a backing file.
    pub fn in_memory() -> KvStore {
        KvStore { data: HashMap::new(), path: None }
    }

    /// storing a key with associated value
    ///
    /// Overwrites the existing value if the key already exists. The
    /// in-memory update always happens; if persisting it afterwards fails,
    /// memory and disk diverge until the next successful persist.
    pub fn set(&mut self, key: String, value: String) -> Result<()> {
        self.data.insert(key.clone(), value);
        self.persist()
            .with_context(|| format!("Failed to persist database, key={}", key))
    }

    /// get a value from key
    ///
    /// Returns a `KeyNotFound` error if the key is absent.
    pub fn get(&self, key: String) -> Result<String> {
        self.data
            .get(&key)
            .cloned()
            .ok_or_else(|| StoreError::KeyNotFound { key }.into())
    }

    /// remove a key and associated value
    ///
    /// No op if the key does not exist.
    pub fn erase(&mut self, key: String) -> Result<()> {
        if self.data.remove(&key).is_none() {
            return Ok(());
        }
        self.persist()
    }

    /// remove every key and value, leaving the database empty
    pub fn clear(&mut self) -> Result<()> {
        self.data = HashMap::new();
        self.persist()
    }

    /// all the keys in the database, in no particular order
    pub fn keys(&self) -> Vec<String> {
        self.data.keys().cloned().collect()
    }

    /// write the whole mapping to the backing file
    fn persist(&self) -> Result<()> {
        let path = match &self.path {
            Some(path) => path,
            None => return Ok(()),
        };
        let json = serde_json::to_string(&self.data)?;
        KvStore::write_durably(path, json.as_bytes()).map_err(|source| {
            StoreError::Persistence { path: path.clone(), source }.into()
        })
    }

    fn write_durably(path: &Path, bytes: &[u8]) -> io::Result<()> {
        let mut file = File::create(path)?;
        file.write_all(bytes)?;
        file.sync_all()
    }

    fn load(path: &Path) -> HashMap<String, String> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(_) => return HashMap::new(),
        };
        match serde_json::from_str(&text) {
            Ok(data) => data,
            Err(e) => {
                log::warn!("[KvStore] discarding unusable data in {:?}, {}", path, e);
                HashMap::new()
            }
        }
    }
}

impl Default for KvStore {
    fn default() -> Self {
        Self::in_memory()
    }
}
