//! Save slots.
//!
//! A `SaveStore` holds at most one serialized `SavedGame`. Sessions write
//! it after every move and clear it when the game ends.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::error::PersistError;
use super::saved::SavedGame;

/// A single save slot.
pub trait SaveStore {
    /// Raw payload, `None` when the slot is empty.
    fn load_raw(&self) -> Result<Option<String>, PersistError>;

    /// Overwrite the slot.
    fn store_raw(&mut self, payload: &str) -> Result<(), PersistError>;

    /// Empty the slot.
    fn clear(&mut self) -> Result<(), PersistError>;

    // === Convenience Methods ===

    /// Parse the slot. An empty slot, or one marked as holding no game,
    /// reads as `None`.
    fn load(&self) -> Result<Option<SavedGame>, PersistError> {
        let Some(payload) = self.load_raw()? else {
            return Ok(None);
        };
        let saved = SavedGame::from_json(&payload)?;
        Ok(saved.has_saved_game.then_some(saved))
    }

    fn store(&mut self, saved: &SavedGame) -> Result<(), PersistError> {
        self.store_raw(&saved.to_json()?)
    }
}

/// In-process slot.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    payload: Option<String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot pre-filled with an arbitrary payload.
    #[must_use]
    pub fn with_payload(payload: impl Into<String>) -> Self {
        Self {
            payload: Some(payload.into()),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.payload.is_none()
    }
}

impl SaveStore for MemoryStore {
    fn load_raw(&self) -> Result<Option<String>, PersistError> {
        Ok(self.payload.clone())
    }

    fn store_raw(&mut self, payload: &str) -> Result<(), PersistError> {
        self.payload = Some(payload.to_owned());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), PersistError> {
        self.payload = None;
        Ok(())
    }
}

/// Slot backed by one JSON file.
#[derive(Clone, Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Full file name plus `.tmp`, never equal to the save path.
    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

impl SaveStore for FileStore {
    fn load_raw(&self) -> Result<Option<String>, PersistError> {
        match fs::read_to_string(&self.path) {
            Ok(payload) => Ok(Some(payload)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn store_raw(&mut self, payload: &str) -> Result<(), PersistError> {
        // Atomic replace through a sibling temp file
        let tmp = self.temp_path();
        fs::write(&tmp, payload)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), PersistError> {
        match fs::remove_file(&self.path) {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}
