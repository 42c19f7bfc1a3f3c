//! Storage of the best network between generations.
//!
//! The population saves its fittest network when a generation ends and loads
//! it back to seed the next one. Stores hold a single network slot.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use super::brain::Brain;
use super::error::Result;

/// A single-slot store for the best network.
pub trait BrainStore {
    /// Replaces the stored network.
    fn save(&mut self, brain: &Brain) -> Result<()>;

    /// Returns the stored network, or `None` when the slot is empty.
    fn load(&self) -> Result<Option<Brain>>;

    /// Empties the slot.
    fn discard(&mut self) -> Result<()>;
}

/// On-disk record of a saved network.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredBrain {
    saved_at: String,
    brain: Brain,
}

fn to_json(brain: &Brain) -> Result<String> {
    let record = StoredBrain {
        saved_at: chrono::Utc::now().to_rfc3339(),
        brain: brain.clone(),
    };
    Ok(serde_json::to_string_pretty(&record)?)
}

fn from_json(json: &str) -> Result<Brain> {
    let record: StoredBrain = serde_json::from_str(json)?;
    record.brain.validate()?;
    Ok(record.brain)
}

/// Stores the network as a JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a store backed by `path`. The file need not exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BrainStore for JsonFileStore {
    fn save(&mut self, brain: &Brain) -> Result<()> {
        std::fs::write(&self.path, to_json(brain)?)?;
        info!(path = %self.path.display(), "saved best brain");
        Ok(())
    }

    fn load(&self) -> Result<Option<Brain>> {
        match std::fs::read_to_string(&self.path) {
            Ok(json) => from_json(&json).map(Some),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn discard(&mut self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                info!(path = %self.path.display(), "discarded best brain");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Keeps the serialized network in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slot: Option<String>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// The serialized network, if any.
    pub fn raw(&self) -> Option<&str> {
        self.slot.as_deref()
    }

    /// Replaces the serialized content directly.
    pub fn set_raw(&mut self, json: impl Into<String>) {
        self.slot = Some(json.into());
    }
}

impl BrainStore for MemoryStore {
    fn save(&mut self, brain: &Brain) -> Result<()> {
        self.slot = Some(to_json(brain)?);
        Ok(())
    }

    fn load(&self) -> Result<Option<Brain>> {
        self.slot.as_deref().map(from_json).transpose()
    }

    fn discard(&mut self) -> Result<()> {
        self.slot = None;
        Ok(())
    }
}
