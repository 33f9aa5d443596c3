//! Theme registration
//!
//! A theme is a named bundle of template and asset directories. Themes can
//! be configured in code or loaded from a `theme.yaml` manifest at the top
//! of a theme directory, which is how deployed instances pick up themes
//! dropped on disk.

use edda_core::{Error, Registrable, Result, checks};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A named bundle of template and asset directories
#[derive(Debug, Default)]
pub struct Theme {
    /// Unique theme key
    pub name: String,

    /// Author name
    pub author: String,

    /// Short description (translation key)
    pub about: String,

    /// Homepage URL
    pub url: Option<String>,

    /// Directory holding the theme's page templates
    pub template_dir: PathBuf,

    /// Directory holding reusable template partials
    pub partial_dir: Option<PathBuf>,

    /// Directory holding the theme's static assets
    pub asset_dir: Option<PathBuf>,
}

impl Registrable for Theme {
    const KIND: &'static str = "theme";

    fn name(&self) -> &str {
        &self.name
    }

    fn validate(&self) -> Result<()> {
        checks::presence(Self::KIND, "name", Some(&self.name))?;
        checks::presence(Self::KIND, "author", Some(&self.author))?;
        checks::filepath(Self::KIND, "template_dir", &self.template_dir)?;

        if let Some(partial_dir) = &self.partial_dir {
            checks::filepath(Self::KIND, "partial_dir", partial_dir)?;
        }
        if let Some(asset_dir) = &self.asset_dir {
            checks::filepath(Self::KIND, "asset_dir", asset_dir)?;
        }

        Ok(())
    }
}

/// On-disk manifest at the top of a theme directory
#[derive(Debug, Deserialize)]
struct ThemeManifest {
    name: String,
    author: String,
    #[serde(default)]
    about: Option<String>,
    #[serde(default)]
    url: Option<String>,
    /// Relative to the theme directory; defaults to `templates`
    #[serde(default)]
    template_dir: Option<String>,
    #[serde(default)]
    partial_dir: Option<String>,
    #[serde(default)]
    asset_dir: Option<String>,
}

impl Theme {
    /// Build a theme draft from a directory containing `theme.yaml`
    ///
    /// Directory paths in the manifest are resolved relative to
    /// `theme_dir`. The draft still goes through normal registration, so
    /// a manifest naming missing directories fails validation there.
    pub fn from_manifest(theme_dir: &Path) -> Result<Theme> {
        let manifest_path = theme_dir.join("theme.yaml");
        debug!("Loading theme manifest from {:?}", manifest_path);

        if !manifest_path.exists() {
            return Err(Error::path_not_found(
                Self::KIND,
                "manifest",
                manifest_path.display().to_string(),
            ));
        }

        let content = std::fs::read_to_string(&manifest_path)?;
        let manifest: ThemeManifest = serde_yaml_ng::from_str(&content)?;

        let template_dir = manifest.template_dir.as_deref().unwrap_or("templates");

        Ok(Theme {
            name: manifest.name,
            author: manifest.author,
            about: manifest.about.unwrap_or_default(),
            url: manifest.url,
            template_dir: theme_dir.join(template_dir),
            partial_dir: manifest.partial_dir.map(|dir| theme_dir.join(dir)),
            asset_dir: manifest.asset_dir.map(|dir| theme_dir.join(dir)),
        })
    }
}
