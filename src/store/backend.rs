use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use super::{StoreError, User};

/// Name of the JSON file inside a data directory.
pub const STORE_FILE_NAME: &str = "store.json";

/// Everything a backend persists.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreState {
    #[serde(default)]
    pub users: Vec<User>,
    /// Id of the signed-in user.
    #[serde(default)]
    pub current_user: Option<String>,
}

/// Where a [`Session`](super::Session) keeps its state.
pub trait StorageBackend {
    fn load(&self) -> Result<StoreState, StoreError>;

    /// Replaces the stored state with `state`.
    fn save(&mut self, state: &StoreState) -> Result<(), StoreError>;
}

/// Keeps state in memory. Used by tests and throwaway sessions.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    state: StoreState,
    writes: usize,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful saves so far.
    pub fn writes(&self) -> usize {
        self.writes
    }

    pub fn state(&self) -> &StoreState {
        &self.state
    }
}

impl StorageBackend for MemoryStorage {
    fn load(&self) -> Result<StoreState, StoreError> {
        Ok(self.state.clone())
    }

    fn save(&mut self, state: &StoreState) -> Result<(), StoreError> {
        self.state = state.clone();
        self.writes += 1;
        Ok(())
    }
}

/// Persists state as pretty-printed JSON in a single file.
///
/// Saves go to a sibling temporary file that is then renamed over the original, so a crash
/// mid-write leaves the previous contents intact.
#[derive(Clone, Debug)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Storage at [`STORE_FILE_NAME`] inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(STORE_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl StorageBackend for JsonFileStorage {
    fn load(&self) -> Result<StoreState, StoreError> {
        if !self.path.exists() {
            debug!("No store at {}; starting empty.", self.path.display());
            return Ok(StoreState::default());
        }

        let content = fs::read_to_string(&self.path).map_err(|err| self.io_error(err))?;
        serde_json::from_str(&content).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    fn save(&mut self, state: &StoreState) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|err| self.io_error(err))?;
        }

        let content = serde_json::to_string_pretty(state)?;
        let staging = self.path.with_extension("json.tmp");
        fs::write(&staging, content).map_err(|err| self.io_error(err))?;
        fs::rename(&staging, &self.path).map_err(|err| self.io_error(err))?;
        debug!("Saved store to {}.", self.path.display());
        Ok(())
    }
}
