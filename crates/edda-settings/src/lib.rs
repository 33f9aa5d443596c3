//! # edda-settings
//!
//! Settings management for the Edda CMS engine:
//! - Setting and settings-group registration
//! - Cache-backed value resolution over a pluggable persistent store
//! - Versioned, backward-tolerant value encoding
//! - In-memory and YAML-file store backends

pub mod codec;
pub mod manager;
pub mod store;
pub mod types;

pub use manager::{SettingRef, SettingsManager};
pub use store::{MemoryStore, SettingStore, YamlFileStore};
pub use types::{Setting, SettingKind, SettingValues, SettingsGroup};
