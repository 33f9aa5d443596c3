//! Package registration
//!
//! A package is a named bundle of admin functionality: a root directory on
//! disk, a menu subtree, and the capability tokens its controllers check.
//! The (excluded) web layer mounts controllers under a package; this core
//! only owns the package's identity, menu, and permission list.

use crate::menu::{MenuNode, PermissionSet};
use edda_core::{Registrable, Registry, Result, Translator, checks, translate_or_key};
use regex::Regex;
use std::path::PathBuf;
use std::sync::LazyLock;

static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9_]+$").expect("package name regex is valid"));

/// A named bundle of admin functionality
#[derive(Debug, Default)]
pub struct Package {
    /// Unique package key (lowercase, digits, underscores)
    pub name: String,

    /// Display title (translation key)
    pub title: String,

    /// Author name
    pub author: String,

    /// Short description (translation key)
    pub about: String,

    /// Homepage URL
    pub url: Option<String>,

    /// Root directory of the package on disk
    pub root: PathBuf,

    /// Menu subtree contributed to the admin navigation
    pub menu: Option<MenuNode>,

    /// Capability tokens this package's controllers check
    pub permissions: Vec<String>,
}

impl Package {
    /// Resolved display title, falling back to the raw key
    pub fn title_in(&self, translator: &dyn Translator) -> String {
        translate_or_key(translator, &self.title)
    }

    /// Resolved description, falling back to the raw key
    pub fn about_in(&self, translator: &dyn Translator) -> String {
        translate_or_key(translator, &self.about)
    }
}

impl Registrable for Package {
    const KIND: &'static str = "package";

    fn name(&self) -> &str {
        &self.name
    }

    fn validate(&self) -> Result<()> {
        checks::presence(Self::KIND, "name", Some(&self.name))?;
        checks::length(Self::KIND, "name", &self.name, Some(1), Some(255))?;
        checks::format(Self::KIND, "name", &self.name, &NAME_PATTERN)?;
        checks::presence(Self::KIND, "title", Some(&self.title))?;
        checks::presence(Self::KIND, "author", Some(&self.author))?;
        checks::presence(Self::KIND, "about", Some(&self.about))?;
        checks::filepath(Self::KIND, "root", &self.root)?;
        Ok(())
    }
}

/// Render every package's menu into one nested list
///
/// Packages contribute in registry (alphabetical) order, so the composed
/// menu is deterministic regardless of registration order. Package menu
/// titles run through the translator with key fallback; nodes are
/// filtered against `permissions` as usual.
pub fn compose_menu(
    packages: &Registry<Package>,
    permissions: &PermissionSet,
    translator: &dyn Translator,
) -> String {
    let mut html = String::from("<ul class=\"menu\">");

    for package in packages.all() {
        if let Some(menu) = &package.menu {
            if let Some(rendered) = menu.translated(translator).render(permissions) {
                html.push_str(&rendered);
            }
        }
    }

    html.push_str("</ul>");
    html
}
