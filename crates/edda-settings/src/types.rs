//! Setting and settings-group definitions

use edda_core::{Registrable, Result, checks};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Presentation group for settings
///
/// Groups only exist for UI organization; every setting must name one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingsGroup {
    /// Unique group key
    pub name: String,

    /// Display title (translation key)
    pub title: String,
}

impl Registrable for SettingsGroup {
    const KIND: &'static str = "settings group";

    fn name(&self) -> &str {
        &self.name
    }

    fn validate(&self) -> Result<()> {
        checks::presence(Self::KIND, "name", Some(&self.name))?;
        checks::presence(Self::KIND, "title", Some(&self.title))?;
        Ok(())
    }
}

/// Form widget used to edit a setting
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SettingKind {
    #[default]
    Textbox,
    Textarea,
    Radio,
    Checkbox,
    Date,
    Select,
    SelectMultiple,
}

impl fmt::Display for SettingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingKind::Textbox => write!(f, "textbox"),
            SettingKind::Textarea => write!(f, "textarea"),
            SettingKind::Radio => write!(f, "radio"),
            SettingKind::Checkbox => write!(f, "checkbox"),
            SettingKind::Date => write!(f, "date"),
            SettingKind::Select => write!(f, "select"),
            SettingKind::SelectMultiple => write!(f, "select-multiple"),
        }
    }
}

/// Possible choices offered by a setting's widget
///
/// `Computed` holds a closure invoked on every read, so choice lists can
/// track runtime state (the list of installed themes, for instance).
#[derive(Clone, Default)]
pub enum SettingValues {
    /// The widget offers no predefined choices
    #[default]
    None,

    /// Fixed choice list
    Static(Vec<String>),

    /// Choice list computed lazily at read time
    Computed(Arc<dyn Fn() -> Vec<String> + Send + Sync>),
}

impl SettingValues {
    /// Resolve the choice list, invoking a computed list lazily
    pub fn resolve(&self) -> Option<Vec<String>> {
        match self {
            SettingValues::None => None,
            SettingValues::Static(choices) => Some(choices.clone()),
            SettingValues::Computed(compute) => Some(compute()),
        }
    }
}

impl fmt::Debug for SettingValues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValues::None => write!(f, "None"),
            SettingValues::Static(choices) => f.debug_tuple("Static").field(choices).finish(),
            SettingValues::Computed(_) => write!(f, "Computed(..)"),
        }
    }
}

/// A named configuration value definition
///
/// The definition is immutable once registered; the current value lives in
/// the settings manager's cache and persistent store, not here.
#[derive(Debug, Default)]
pub struct Setting {
    /// Unique setting key
    pub name: String,

    /// Display title (translation key)
    pub title: String,

    /// Longer description shown next to the widget (translation key)
    pub description: String,

    /// Name of the settings group this setting belongs to
    pub group: String,

    /// Widget used to edit the value
    pub kind: SettingKind,

    /// Possible choices for choice-based widgets
    pub values: SettingValues,

    /// Value returned before anything has been persisted
    pub default: Value,
}

impl Registrable for Setting {
    const KIND: &'static str = "setting";

    fn name(&self) -> &str {
        &self.name
    }

    fn validate(&self) -> Result<()> {
        checks::presence(Self::KIND, "name", Some(&self.name))?;
        checks::presence(Self::KIND, "title", Some(&self.title))?;
        checks::presence(Self::KIND, "group", Some(&self.group))?;
        Ok(())
    }
}
