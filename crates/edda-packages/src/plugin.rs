//! Plugin registration and invocation
//!
//! A plugin is a named callable: controllers invoke it by name with JSON
//! arguments and get a computed value back (a markup converter, a feed
//! builder). Plugins carry the same authorship metadata as packages but no
//! menu or filesystem root.

use edda_core::{Error, Registrable, Registry, Result, checks};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Callable body of a plugin
pub type PluginAction = Arc<dyn Fn(Value) -> Result<Value> + Send + Sync>;

/// A named, registered callable unit
#[derive(Default)]
pub struct Plugin {
    /// Unique plugin key
    pub name: String,

    /// Display title (translation key)
    pub title: String,

    /// Author name
    pub author: String,

    /// Short description (translation key)
    pub about: String,

    /// Homepage URL
    pub url: Option<String>,

    /// The callable invoked by [`PluginSet::invoke`]
    pub action: Option<PluginAction>,
}

impl fmt::Debug for Plugin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Plugin")
            .field("name", &self.name)
            .field("title", &self.title)
            .field("author", &self.author)
            .field("action", &self.action.as_ref().map(|_| ".."))
            .finish()
    }
}

impl Registrable for Plugin {
    const KIND: &'static str = "plugin";

    fn name(&self) -> &str {
        &self.name
    }

    fn validate(&self) -> Result<()> {
        checks::presence(Self::KIND, "name", Some(&self.name))?;
        checks::presence(Self::KIND, "title", Some(&self.title))?;
        checks::presence(Self::KIND, "author", Some(&self.author))?;

        if self.action.is_none() {
            return Err(Error::missing_field(Self::KIND, "action"));
        }

        Ok(())
    }
}

/// Invocation front over a plugin registry
pub struct PluginSet {
    registry: Registry<Plugin>,
}

impl PluginSet {
    pub fn new() -> Self {
        Self {
            registry: Registry::new(),
        }
    }

    /// The underlying registry (registration, listing)
    pub fn registry(&self) -> &Registry<Plugin> {
        &self.registry
    }

    /// Register a plugin
    pub fn register<F>(&self, configure: F) -> Result<Arc<Plugin>>
    where
        F: FnOnce(&mut Plugin),
    {
        self.registry.register(configure)
    }

    /// Invoke a plugin by name
    ///
    /// Fails with a not-found error for unregistered names; the plugin's
    /// own errors pass through unchanged.
    pub fn invoke(&self, name: &str, args: Value) -> Result<Value> {
        let plugin = self.registry.lookup(name)?;
        debug!("Invoking plugin '{}'", name);

        // validate() guarantees the action is present once registered
        match &plugin.action {
            Some(action) => action(args),
            None => Err(Error::missing_field(Plugin::KIND, "action")),
        }
    }
}

impl Default for PluginSet {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn markup_plugin(plugins: &PluginSet) {
        plugins
            .register(|p| {
                p.name = "markup".to_string();
                p.title = "plugins.markup.title".to_string();
                p.author = "Edda Team".to_string();
                p.about = "plugins.markup.about".to_string();
                p.action = Some(Arc::new(|args| {
                    let text = args
                        .get("text")
                        .and_then(Value::as_str)
                        .unwrap_or_default();
                    Ok(json!(format!("<p>{text}</p>")))
                }));
            })
            .unwrap();
    }

    #[test]
    fn test_invoke_returns_computed_value() {
        let plugins = PluginSet::new();
        markup_plugin(&plugins);

        let result = plugins.invoke("markup", json!({"text": "hello"})).unwrap();
        assert_eq!(result, json!("<p>hello</p>"));
    }

    #[test]
    fn test_invoke_unknown_plugin_fails() {
        let plugins = PluginSet::new();
        markup_plugin(&plugins);

        assert!(plugins.invoke("missing", json!({})).unwrap_err().is_not_found());
    }

    #[test]
    fn test_register_requires_action() {
        let plugins = PluginSet::new();

        let err = plugins
            .register(|p| {
                p.name = "broken".to_string();
                p.title = "plugins.broken.title".to_string();
                p.author = "Edda Team".to_string();
            })
            .unwrap_err();

        assert!(err.to_string().contains("action"));
    }

    #[test]
    fn test_plugin_error_passes_through() {
        let plugins = PluginSet::new();
        plugins
            .register(|p| {
                p.name = "failing".to_string();
                p.title = "plugins.failing.title".to_string();
                p.author = "Edda Team".to_string();
                p.action = Some(Arc::new(|_| {
                    Err(Error::missing_field("markup input", "text"))
                }));
            })
            .unwrap();

        let err = plugins.invoke("failing", json!({})).unwrap_err();
        assert!(err.to_string().contains("markup input"));
    }
}
