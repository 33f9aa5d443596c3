//! Persistent store backends for setting values
//!
//! The manager only needs raw string read/write keyed by setting name;
//! anything that can hold a string map can back it. Two backends ship
//! here: an in-memory map for tests and embedding, and a single-file YAML
//! mapping for hosts without a database.

use edda_core::Result;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use tracing::debug;

/// Raw string persistence for setting values
pub trait SettingStore: Send + Sync {
    /// Read the stored value for a setting, `None` when never written
    fn read(&self, name: &str) -> Result<Option<String>>;

    /// Persist the value for a setting, replacing any previous one
    fn write(&self, name: &str, raw: &str) -> Result<()>;
}

/// In-memory store
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingStore for MemoryStore {
    fn read(&self, name: &str) -> Result<Option<String>> {
        Ok(self.entries.read().unwrap().get(name).cloned())
    }

    fn write(&self, name: &str, raw: &str) -> Result<()> {
        self.entries
            .write()
            .unwrap()
            .insert(name.to_string(), raw.to_string());
        Ok(())
    }
}

/// Store backed by one YAML mapping file
///
/// Every write is a read-modify-write of the whole file. The file and its
/// parent directory are created on first write; a missing file reads as an
/// empty store.
pub struct YamlFileStore {
    path: PathBuf,
}

impl YamlFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let content = std::fs::read_to_string(&self.path)?;
        let entries: BTreeMap<String, String> = serde_yaml_ng::from_str(&content)?;
        Ok(entries)
    }

    fn save(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_yaml_ng::to_string(entries)?;
        std::fs::write(&self.path, content)?;
        debug!(
            "Saved {} setting value(s) to {:?}",
            entries.len(),
            self.path
        );
        Ok(())
    }
}

impl SettingStore for YamlFileStore {
    fn read(&self, name: &str) -> Result<Option<String>> {
        Ok(self.load()?.get(name).cloned())
    }

    fn write(&self, name: &str, raw: &str) -> Result<()> {
        let mut entries = self.load()?;
        entries.insert(name.to_string(), raw.to_string());
        self.save(&entries)
    }
}
