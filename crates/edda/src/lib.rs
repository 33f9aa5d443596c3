//! # edda
//!
//! The Edda CMS application core. This crate wires the subsystem crates
//! into one [`Edda`] value a host embeds:
//!
//! - `packages`, `themes`: validated registries
//! - `plugins`: registry plus invocation by name
//! - `settings`: cache-backed configuration over a pluggable store
//! - `events`: sequential dispatch (pipeline semantics)
//! - `hooks`: concurrent dispatch (isolated, joined)
//! - `assets`: script/stylesheet collections
//!
//! Collaborators (persistent store, sanitizer, translator) are injected
//! through [`Edda::builder`]; the defaults are enough for tests and for
//! embedding without a database or i18n layer.

use anyhow::{Context, Result};
use edda_core::{NullTranslator, Registry, Sanitizer, TagSanitizer, Translator};
use edda_dispatch::Dispatcher;
use edda_packages::{AssetCollection, Package, PermissionSet, PluginSet, Theme, compose_menu};
use edda_settings::{MemoryStore, SettingStore, SettingsManager};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// The assembled CMS core
pub struct Edda {
    packages: Registry<Package>,
    plugins: PluginSet,
    themes: Registry<Theme>,
    settings: SettingsManager,
    events: Dispatcher,
    hooks: Dispatcher,
    assets: AssetCollection,
    translator: Arc<dyn Translator>,
}

impl Edda {
    /// Core with default collaborators (in-memory store, tag sanitizer,
    /// key-fallback translator)
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Builder for injecting collaborators
    pub fn builder() -> EddaBuilder {
        EddaBuilder::default()
    }

    /// Package registry
    pub fn packages(&self) -> &Registry<Package> {
        &self.packages
    }

    /// Plugin registration and invocation
    pub fn plugins(&self) -> &PluginSet {
        &self.plugins
    }

    /// Theme registry
    pub fn themes(&self) -> &Registry<Theme> {
        &self.themes
    }

    /// Settings registration and values
    pub fn settings(&self) -> &SettingsManager {
        &self.settings
    }

    /// Sequential event dispatcher
    pub fn events(&self) -> &Dispatcher {
        &self.events
    }

    /// Concurrent hook dispatcher
    pub fn hooks(&self) -> &Dispatcher {
        &self.hooks
    }

    /// Asset collections
    pub fn assets(&self) -> &AssetCollection {
        &self.assets
    }

    /// The injected translator
    pub fn translator(&self) -> &dyn Translator {
        self.translator.as_ref()
    }

    /// Composed admin navigation for a caller's permission set
    pub fn admin_menu(&self, permissions: &PermissionSet) -> String {
        compose_menu(&self.packages, permissions, self.translator.as_ref())
    }

    /// Register every theme found under a directory
    ///
    /// Scans the immediate subdirectories of `themes_dir` for `theme.yaml`
    /// manifests and registers each one. Returns how many themes were
    /// registered. Subdirectories without a manifest are skipped; a
    /// manifest that fails validation aborts the scan.
    pub fn load_themes_from(&self, themes_dir: &Path) -> Result<usize> {
        info!("Loading themes from {:?}", themes_dir);
        let mut registered = 0;

        let entries = std::fs::read_dir(themes_dir)
            .with_context(|| format!("Failed to read themes directory {themes_dir:?}"))?;

        for entry in entries {
            let path = entry?.path();
            if !path.is_dir() || !path.join("theme.yaml").exists() {
                debug!("Skipping {:?}: no theme manifest", path);
                continue;
            }

            let draft = Theme::from_manifest(&path)
                .with_context(|| format!("Failed to load theme manifest in {path:?}"))?;
            let name = draft.name.clone();
            self.themes
                .register(|theme| *theme = draft)
                .with_context(|| format!("Failed to register theme '{name}'"))?;
            registered += 1;
        }

        info!("Registered {} theme(s)", registered);
        Ok(registered)
    }
}

impl Default for Edda {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for [`Edda`] with injectable collaborators
#[derive(Default)]
pub struct EddaBuilder {
    store: Option<Arc<dyn SettingStore>>,
    sanitizer: Option<Arc<dyn Sanitizer>>,
    translator: Option<Arc<dyn Translator>>,
}

impl EddaBuilder {
    /// Use a custom persistent store for setting values
    pub fn with_store(mut self, store: Arc<dyn SettingStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Use a custom sanitizer for values before persistence
    pub fn with_sanitizer(mut self, sanitizer: Arc<dyn Sanitizer>) -> Self {
        self.sanitizer = Some(sanitizer);
        self
    }

    /// Use a custom translator for titles and descriptions
    pub fn with_translator(mut self, translator: Arc<dyn Translator>) -> Self {
        self.translator = Some(translator);
        self
    }

    /// Assemble the core
    pub fn build(self) -> Edda {
        let store = self
            .store
            .unwrap_or_else(|| Arc::new(MemoryStore::new()));
        let sanitizer = self
            .sanitizer
            .unwrap_or_else(|| Arc::new(TagSanitizer::new()));
        let translator = self.translator.unwrap_or_else(|| Arc::new(NullTranslator));

        Edda {
            packages: Registry::new(),
            plugins: PluginSet::new(),
            themes: Registry::new(),
            settings: SettingsManager::new(store, sanitizer),
            events: Dispatcher::sequential(),
            hooks: Dispatcher::concurrent(),
            assets: AssetCollection::new(),
            translator,
        }
    }
}

/// Initialize tracing with appropriate verbosity
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_tracing(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("info"),
            1 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .try_init();
}
