#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Durable storage adapter for Nameko Log progression records.
//!
//! The game core never talks to storage directly; drivers call [`save`]
//! after meaningful transitions (harvests, volume changes) and feed the
//! result of [`load`] back into the world as a restore command at boot.
//! Storage failures are reported through `anyhow` for drivers to log, but
//! the in-memory world always remains authoritative: a malformed or missing
//! payload simply loads as "no record".

use std::{
    cell::RefCell,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use nameko_log_core::SaveRecord;

/// File name used by default for the persisted record.
pub const DEFAULT_SAVE_FILE: &str = "nameko-log-save.json";

/// Durable key-value slot holding at most one serialized record.
pub trait Store {
    /// Reads the stored payload, when one exists.
    fn read(&self) -> Result<Option<String>>;

    /// Writes the payload, overwriting any prior value.
    fn write(&self, payload: &str) -> Result<()>;

    /// Removes the stored payload entirely.
    fn erase(&self) -> Result<()>;
}

/// Serializes the record and overwrites the store's previous payload.
pub fn save<S: Store>(store: &S, record: &SaveRecord) -> Result<()> {
    let payload = serde_json::to_string(record).context("serialize save record")?;
    store.write(&payload)
}

/// Loads and deserializes the stored record, when a usable one exists.
///
/// A payload that fails to parse is treated as absent rather than as an
/// error; corrupt storage must never prevent the game from starting fresh.
pub fn load<S: Store>(store: &S) -> Result<Option<SaveRecord>> {
    let Some(payload) = store.read()? else {
        return Ok(None);
    };
    Ok(serde_json::from_str(&payload).ok())
}

/// Store backed by a single JSON file on disk.
#[derive(Clone, Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Creates a store persisting to the provided path.
    #[must_use]
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Store for FileStore {
    fn read(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(payload) => Ok(Some(payload)),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error)
                .with_context(|| format!("read save file {}", self.path.display())),
        }
    }

    fn write(&self, payload: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("create save directory {}", parent.display()))?;
            }
        }
        fs::write(&self.path, payload)
            .with_context(|| format!("write save file {}", self.path.display()))
    }

    fn erase(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(error)
                .with_context(|| format!("erase save file {}", self.path.display())),
        }
    }
}

/// In-memory store used by tests and headless tooling.
#[derive(Debug, Default)]
pub struct MemoryStore {
    payload: RefCell<Option<String>>,
}

impl MemoryStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store preloaded with the provided payload.
    #[must_use]
    pub fn with_payload<P: Into<String>>(payload: P) -> Self {
        Self {
            payload: RefCell::new(Some(payload.into())),
        }
    }
}

impl Store for MemoryStore {
    fn read(&self) -> Result<Option<String>> {
        Ok(self.payload.borrow().clone())
    }

    fn write(&self, payload: &str) -> Result<()> {
        *self.payload.borrow_mut() = Some(payload.to_owned());
        Ok(())
    }

    fn erase(&self) -> Result<()> {
        *self.payload.borrow_mut() = None;
        Ok(())
    }
}
