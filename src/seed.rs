use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::modules::auth::store::MemoryTokenStore;
use crate::modules::auth::types::Identity;
use crate::modules::notes::store::MemoryNotesStore;
use crate::modules::notes::types::Note;
use crate::types::AppState;

/// Contents for the in-memory stores, read from a JSON file of the form
/// `{ "tokens": { "<token>": "<email>" }, "notes": [ ... ] }`.
#[derive(Debug, Default, Deserialize)]
pub struct MemorySeed {
    #[serde(default)]
    pub tokens: HashMap<String, Identity>,
    #[serde(default)]
    pub notes: Vec<Note>,
}

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("failed to read seed file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse seed file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl MemorySeed {
    pub fn load(path: &Path) -> Result<Self, SeedError> {
        let raw = fs::read_to_string(path).map_err(|source| SeedError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&raw).map_err(|source| SeedError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn into_state(self) -> AppState {
        AppState::in_memory(
            MemoryTokenStore::new(self.tokens),
            MemoryNotesStore::new(self.notes),
        )
    }
}
