//! Generic validated registry
//!
//! Every named entity kind in Edda (packages, plugins, themes, settings,
//! setting groups) is stored in a [`Registry`]: a keyed map that validates
//! drafts before insertion and rejects duplicate names. Entities are
//! immutable once registered; mutable state (such as a setting's cached
//! value) lives outside the registry entry.
//!
//! Registries are constructed per application instance and passed by
//! reference; there is no module-level global state.

use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};
use tracing::debug;

/// An entity that can live in a [`Registry`]
///
/// `Default` supplies the blank draft handed to registration closures;
/// `validate` is the entity's own required-field checking, run before the
/// draft is inserted.
pub trait Registrable: Default + Send + Sync + 'static {
    /// Human-readable entity kind used in error messages ("package", "theme", ...)
    const KIND: &'static str;

    /// Unique key within this entity's registry
    fn name(&self) -> &str;

    /// Validate required fields; called once, before insertion
    fn validate(&self) -> Result<()>;
}

/// Keyed store of validated, immutable-after-insert entities
///
/// Name order is the iteration order (`BTreeMap`-backed), which keeps
/// consumers such as menu composition deterministic regardless of
/// registration order.
pub struct Registry<T: Registrable> {
    entries: RwLock<BTreeMap<String, Arc<T>>>,
}

impl<T: Registrable> Registry<T> {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(BTreeMap::new()),
        }
    }

    /// Register a new entity
    ///
    /// Constructs a blank draft, hands it to `configure`, validates the
    /// result, and inserts it under its name. Registration is
    /// all-or-nothing: a validation failure (including a duplicate name)
    /// leaves the registry unchanged. The duplicate check and the insert
    /// happen under one write lock.
    pub fn register<F>(&self, configure: F) -> Result<Arc<T>>
    where
        F: FnOnce(&mut T),
    {
        self.register_guarded(configure, |_| Ok(()))
    }

    /// Register a new entity with an additional registration-time invariant
    ///
    /// Like [`register`](Self::register), but runs `guard` against the
    /// validated draft before insertion. Cross-registry invariants (a
    /// setting naming its group, for instance) live in the guard; a guard
    /// failure aborts the registration like any other validation error.
    pub fn register_guarded<F, G>(&self, configure: F, guard: G) -> Result<Arc<T>>
    where
        F: FnOnce(&mut T),
        G: FnOnce(&T) -> Result<()>,
    {
        let mut draft = T::default();
        configure(&mut draft);
        draft.validate()?;
        guard(&draft)?;

        let name = draft.name().to_string();
        let mut entries = self.entries.write().unwrap();

        if entries.contains_key(&name) {
            return Err(Error::duplicate_name(T::KIND, name));
        }

        debug!("Registered {} '{}'", T::KIND, name);
        let entry = Arc::new(draft);
        entries.insert(name, Arc::clone(&entry));
        Ok(entry)
    }

    /// Look up an entity by name
    ///
    /// Distinguishes a registry that has never had anything registered
    /// ([`Error::RegistryEmpty`]) from a merely absent key
    /// ([`Error::NotFound`]); both satisfy [`Error::is_not_found`].
    pub fn lookup(&self, name: &str) -> Result<Arc<T>> {
        let entries = self.entries.read().unwrap();

        if entries.is_empty() {
            return Err(Error::registry_empty(T::KIND));
        }

        entries
            .get(name)
            .cloned()
            .ok_or_else(|| Error::not_found(T::KIND, name))
    }

    /// Check whether a name is registered
    pub fn contains(&self, name: &str) -> bool {
        self.entries.read().unwrap().contains_key(name)
    }

    /// All registered entities in ascending name order
    pub fn all(&self) -> Vec<Arc<T>> {
        self.entries.read().unwrap().values().cloned().collect()
    }

    /// All registered names in ascending order
    pub fn names(&self) -> Vec<String> {
        self.entries.read().unwrap().keys().cloned().collect()
    }

    /// Number of registered entities
    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    /// Whether the registry has never had anything registered
    pub fn is_empty(&self) -> bool {
        self.entries.read().unwrap().is_empty()
    }
}

impl<T: Registrable> Default for Registry<T> {
    fn default() -> Self {
        Self::new()
    }
}
