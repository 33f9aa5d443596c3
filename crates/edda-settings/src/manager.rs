//! Cache-backed settings management
//!
//! Reads resolve cache → persistent store → registered default, each miss
//! populating the cache. Writes sanitize, encode, persist, then update the
//! cache in the same call, so a read issued after a write always sees the
//! written value.
//!
//! The cache has no TTL and no read-modify-write atomicity: two threads
//! first-reading the same setting may both miss and both populate, which
//! is benign (they write the same resolved value, last write wins).

use crate::codec;
use crate::store::SettingStore;
use crate::types::{Setting, SettingsGroup};
use edda_core::{Error, Registry, Result, Sanitizer};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::debug;

/// Registries, cache, and collaborators for the settings subsystem
pub struct SettingsManager {
    groups: Registry<SettingsGroup>,
    settings: Registry<Setting>,
    store: Arc<dyn SettingStore>,
    sanitizer: Arc<dyn Sanitizer>,
    cache: RwLock<HashMap<String, Value>>,
}

impl SettingsManager {
    /// Create a manager over the given store and sanitizer
    pub fn new(store: Arc<dyn SettingStore>, sanitizer: Arc<dyn Sanitizer>) -> Self {
        Self {
            groups: Registry::new(),
            settings: Registry::new(),
            store,
            sanitizer,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Register a settings group
    pub fn add_group<F>(&self, configure: F) -> Result<Arc<SettingsGroup>>
    where
        F: FnOnce(&mut SettingsGroup),
    {
        self.groups.register(configure)
    }

    /// Register a setting
    ///
    /// The setting's `group` must name an already-registered group;
    /// registration fails (with nothing inserted) otherwise.
    pub fn add<F>(&self, configure: F) -> Result<Arc<Setting>>
    where
        F: FnOnce(&mut Setting),
    {
        self.settings.register_guarded(configure, |draft| {
            if self.groups.contains(&draft.group) {
                Ok(())
            } else {
                Err(Error::unknown_group(&draft.name, &draft.group))
            }
        })
    }

    /// Access a registered setting's value
    ///
    /// Fails with a not-found error when `name` was never registered via
    /// [`add`](Self::add).
    pub fn get(&self, name: &str) -> Result<SettingRef<'_>> {
        let setting = self.settings.lookup(name)?;
        Ok(SettingRef {
            manager: self,
            setting,
        })
    }

    /// The group registry (listing, lookups)
    pub fn groups(&self) -> &Registry<SettingsGroup> {
        &self.groups
    }

    /// The setting registry (listing, lookups)
    pub fn settings(&self) -> &Registry<Setting> {
        &self.settings
    }

    /// Drop one setting's cached value
    ///
    /// The next read resolves from the store again. Used by hosts that
    /// mutate the store out-of-band.
    pub fn evict(&self, name: &str) {
        if self.cache.write().unwrap().remove(name).is_some() {
            debug!("Evicted cached value for setting '{}'", name);
        }
    }

    /// Drop every cached value
    pub fn clear_cache(&self) {
        self.cache.write().unwrap().clear();
    }

    /// Number of cached values
    pub fn cache_size(&self) -> usize {
        self.cache.read().unwrap().len()
    }
}

/// Handle to one registered setting's definition and value
pub struct SettingRef<'a> {
    manager: &'a SettingsManager,
    setting: Arc<Setting>,
}

impl std::fmt::Debug for SettingRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingRef")
            .field("setting", &self.setting)
            .finish()
    }
}

impl SettingRef<'_> {
    /// The immutable setting definition
    pub fn setting(&self) -> &Setting {
        &self.setting
    }

    /// Current value: cache, then store, then the registered default
    pub fn value(&self) -> Result<Value> {
        let name = self.setting.name.as_str();

        {
            let cache = self.manager.cache.read().unwrap();
            if let Some(cached) = cache.get(name) {
                return Ok(cached.clone());
            }
        }

        let resolved = match self.manager.store.read(name)? {
            Some(raw) => codec::decode(&raw),
            None => {
                debug!("Setting '{}' not in store, using default", name);
                self.setting.default.clone()
            }
        };

        self.manager
            .cache
            .write()
            .unwrap()
            .insert(name.to_string(), resolved.clone());
        Ok(resolved)
    }

    /// Sanitize, persist, and cache a new value
    pub fn set_value(&self, value: Value) -> Result<()> {
        let name = self.setting.name.as_str();
        let sanitized = sanitize_value(self.manager.sanitizer.as_ref(), value);

        let raw = codec::encode(&sanitized);
        self.manager.store.write(name, &raw)?;

        self.manager
            .cache
            .write()
            .unwrap()
            .insert(name.to_string(), sanitized);
        debug!("Persisted new value for setting '{}'", name);
        Ok(())
    }

    /// The setting's possible choices, computing lazy lists on each call
    pub fn possible_values(&self) -> Option<Vec<String>> {
        self.setting.values.resolve()
    }
}

/// Run every string scalar in a value through the sanitizer
///
/// Arrays and objects are walked recursively; object keys are left alone.
fn sanitize_value(sanitizer: &dyn Sanitizer, value: Value) -> Value {
    match value {
        Value::String(s) => Value::String(sanitizer.sanitize(&s)),
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| sanitize_value(sanitizer, item))
                .collect(),
        ),
        Value::Object(entries) => Value::Object(
            entries
                .into_iter()
                .map(|(key, item)| (key, sanitize_value(sanitizer, item)))
                .collect(),
        ),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::types::SettingValues;
    use edda_core::TagSanitizer;
    use serde_json::json;

    fn manager() -> SettingsManager {
        let manager = SettingsManager::new(
            Arc::new(MemoryStore::new()),
            Arc::new(TagSanitizer::new()),
        );
        manager
            .add_group(|g| {
                g.name = "general".to_string();
                g.title = "settings.general".to_string();
            })
            .unwrap();
        manager
    }

    #[test]
    fn test_add_rejects_unknown_group() {
        let manager = manager();

        let err = manager
            .add(|s| {
                s.name = "website_name".to_string();
                s.title = "settings.website_name".to_string();
                s.group = "no_such_group".to_string();
            })
            .unwrap_err();

        assert!(matches!(err, Error::UnknownGroup { .. }));
        assert!(manager.get("website_name").unwrap_err().is_not_found());
    }

    #[test]
    fn test_get_unregistered_setting_fails() {
        let manager = manager();
        assert!(manager.get("missing").unwrap_err().is_not_found());
    }

    #[test]
    fn test_default_value_before_any_write() {
        let manager = manager();
        manager
            .add(|s| {
                s.name = "website_name".to_string();
                s.title = "settings.website_name".to_string();
                s.group = "general".to_string();
                s.default = json!("Edda");
            })
            .unwrap();

        assert_eq!(manager.get("website_name").unwrap().value().unwrap(), json!("Edda"));
        // Resolved default is now cached
        assert_eq!(manager.cache_size(), 1);
    }

    #[test]
    fn test_write_then_read_returns_new_value() {
        let manager = manager();
        manager
            .add(|s| {
                s.name = "website_name".to_string();
                s.title = "settings.website_name".to_string();
                s.group = "general".to_string();
                s.default = json!("Edda");
            })
            .unwrap();

        manager
            .get("website_name")
            .unwrap()
            .set_value(json!("NewVal"))
            .unwrap();

        assert_eq!(manager.get("website_name").unwrap().value().unwrap(), json!("NewVal"));
    }

    #[test]
    fn test_write_sanitizes_nested_strings() {
        let manager = manager();
        manager
            .add(|s| {
                s.name = "footer_links".to_string();
                s.title = "settings.footer_links".to_string();
                s.group = "general".to_string();
            })
            .unwrap();

        let reference = manager.get("footer_links").unwrap();
        reference
            .set_value(json!(["About #{evil}", {"label": "<?r danger ?>Home"}]))
            .unwrap();

        assert_eq!(
            reference.value().unwrap(),
            json!(["About ", {"label": "Home"}])
        );
    }

    #[test]
    fn test_evict_forces_store_reread() {
        let store = Arc::new(MemoryStore::new());
        let manager = SettingsManager::new(Arc::clone(&store) as Arc<dyn SettingStore>, Arc::new(TagSanitizer::new()));
        manager
            .add_group(|g| {
                g.name = "general".to_string();
                g.title = "settings.general".to_string();
            })
            .unwrap();
        manager
            .add(|s| {
                s.name = "theme".to_string();
                s.title = "settings.theme".to_string();
                s.group = "general".to_string();
                s.default = json!("light");
            })
            .unwrap();

        assert_eq!(manager.get("theme").unwrap().value().unwrap(), json!("light"));

        // Out-of-band store mutation is invisible until eviction
        store.write("theme", &codec::encode(&json!("dark"))).unwrap();
        assert_eq!(manager.get("theme").unwrap().value().unwrap(), json!("light"));

        manager.evict("theme");
        assert_eq!(manager.get("theme").unwrap().value().unwrap(), json!("dark"));
    }

    #[test]
    fn test_possible_values_resolves_computed_list() {
        let manager = manager();
        manager
            .add(|s| {
                s.name = "default_theme".to_string();
                s.title = "settings.default_theme".to_string();
                s.group = "general".to_string();
                s.values = SettingValues::Computed(Arc::new(|| vec!["dusk".to_string()]));
            })
            .unwrap();

        assert_eq!(
            manager.get("default_theme").unwrap().possible_values(),
            Some(vec!["dusk".to_string()])
        );
    }
}
