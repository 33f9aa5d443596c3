//! Asset file collections
//!
//! Controllers and packages declare the script and stylesheet files their
//! pages need, either globally (every page) or for one controller. The
//! (excluded) view layer asks for the merged list per request. Lists keep
//! first-insertion order and drop duplicate declarations, so a file shared
//! by several packages loads once.

use std::collections::HashMap;
use std::fmt;
use std::sync::RwLock;
use tracing::debug;

/// Kind of asset file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Javascript,
    Stylesheet,
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetKind::Javascript => write!(f, "javascript"),
            AssetKind::Stylesheet => write!(f, "stylesheet"),
        }
    }
}

/// Where a declared file applies
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetScope {
    /// Loaded on every page
    Global,
    /// Loaded only for the named controller
    Controller(String),
}

#[derive(Default)]
struct KindLists {
    global: Vec<String>,
    controllers: HashMap<String, Vec<String>>,
}

impl KindLists {
    fn push_unique(list: &mut Vec<String>, file: String) {
        if !list.contains(&file) {
            list.push(file);
        }
    }

    fn add(&mut self, scope: &AssetScope, files: Vec<String>) {
        let list = match scope {
            AssetScope::Global => &mut self.global,
            AssetScope::Controller(name) => self.controllers.entry(name.clone()).or_default(),
        };
        for file in files {
            Self::push_unique(list, file);
        }
    }

    fn build(&self, controller: &str) -> Vec<String> {
        let mut merged = self.global.clone();
        if let Some(files) = self.controllers.get(controller) {
            for file in files {
                Self::push_unique(&mut merged, file.clone());
            }
        }
        merged
    }
}

/// Global and per-controller asset lists for both asset kinds
#[derive(Default)]
pub struct AssetCollection {
    javascripts: RwLock<KindLists>,
    stylesheets: RwLock<KindLists>,
}

impl AssetCollection {
    pub fn new() -> Self {
        Self::default()
    }

    fn lists(&self, kind: AssetKind) -> &RwLock<KindLists> {
        match kind {
            AssetKind::Javascript => &self.javascripts,
            AssetKind::Stylesheet => &self.stylesheets,
        }
    }

    /// Declare asset files for a scope
    ///
    /// Duplicate declarations (same kind, same target list) are dropped;
    /// first insertion wins the position.
    pub fn add<I, S>(&self, kind: AssetKind, scope: AssetScope, files: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let files: Vec<String> = files.into_iter().map(Into::into).collect();
        debug!("Adding {} {} file(s) to {:?}", files.len(), kind, scope);
        self.lists(kind).write().unwrap().add(&scope, files);
    }

    /// Merged file list for one controller: globals first, then the
    /// controller's own files, deduplicated across the two
    pub fn build(&self, kind: AssetKind, controller: &str) -> Vec<String> {
        self.lists(kind).read().unwrap().build(controller)
    }

    /// The global file list alone
    pub fn globals(&self, kind: AssetKind) -> Vec<String> {
        self.lists(kind).read().unwrap().global.clone()
    }
}
