//! Navigation menu tree
//!
//! Each package owns at most one menu tree, built at registration time.
//! Rendering filters nodes against the caller's permission set and emits a
//! nested list; composition across packages follows registry name order so
//! the final menu is deterministic no matter when packages registered.

use edda_core::{Translator, translate_or_key};
use std::collections::HashSet;

/// Set of capability tokens held by the caller
///
/// The core only does membership checks; how the set was computed
/// (session, ACL) is the host's business.
#[derive(Debug, Clone, Default)]
pub struct PermissionSet {
    tokens: HashSet<String>,
}

impl PermissionSet {
    /// Empty set: only permission-free nodes render
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from capability tokens
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }

    /// Add one token
    pub fn grant(&mut self, token: impl Into<String>) {
        self.tokens.insert(token.into());
    }

    /// Whether the set holds a token
    pub fn grants(&self, token: &str) -> bool {
        self.tokens.contains(token)
    }
}

/// One entry in a navigation menu
///
/// Child order is insertion order; a node belongs to exactly one parent.
#[derive(Debug, Clone, Default)]
pub struct MenuNode {
    /// Display label (translation key)
    pub title: String,

    /// Link target
    pub url: String,

    /// Capability token required to see this node, if any
    pub permission: Option<String>,

    /// Ordered child entries
    pub children: Vec<MenuNode>,
}

impl MenuNode {
    /// Create a leaf node
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            permission: None,
            children: Vec::new(),
        }
    }

    /// Gate this node behind a capability token
    pub fn with_permission(mut self, permission: impl Into<String>) -> Self {
        self.permission = Some(permission.into());
        self
    }

    /// Append children through a builder closure
    ///
    /// The closure receives a builder whose `item` calls append to this
    /// node in call order; nest `with_children` on the items themselves
    /// for deeper trees.
    pub fn with_children<F>(mut self, build: F) -> Self
    where
        F: FnOnce(&mut MenuBuilder),
    {
        let mut builder = MenuBuilder { items: Vec::new() };
        build(&mut builder);
        self.children.extend(builder.items);
        self
    }

    /// Copy of this tree with every title run through the translator
    ///
    /// Failed lookups fall back to the literal key, per the translation
    /// contract.
    pub fn translated(&self, translator: &dyn Translator) -> MenuNode {
        MenuNode {
            title: translate_or_key(translator, &self.title),
            url: self.url.clone(),
            permission: self.permission.clone(),
            children: self
                .children
                .iter()
                .map(|child| child.translated(translator))
                .collect(),
        }
    }

    /// Whether the given permission set may see this node
    pub fn visible_to(&self, permissions: &PermissionSet) -> bool {
        match &self.permission {
            Some(required) => permissions.grants(required),
            None => true,
        }
    }

    /// Render this node and its visible descendants as a nested list
    ///
    /// Returns `None` when the node itself is not visible. Children are
    /// filtered independently: a permitted parent renders even when every
    /// child is filtered out.
    pub fn render(&self, permissions: &PermissionSet) -> Option<String> {
        if !self.visible_to(permissions) {
            return None;
        }

        let mut html = format!(
            "<li><a href=\"{}\">{}</a>",
            escape(&self.url),
            escape(&self.title)
        );

        let rendered_children: Vec<String> = self
            .children
            .iter()
            .filter_map(|child| child.render(permissions))
            .collect();

        if !rendered_children.is_empty() {
            html.push_str("<ul>");
            for child in &rendered_children {
                html.push_str(child);
            }
            html.push_str("</ul>");
        }

        html.push_str("</li>");
        Some(html)
    }
}

/// Builder handed to [`MenuNode::with_children`] closures
pub struct MenuBuilder {
    items: Vec<MenuNode>,
}

impl MenuBuilder {
    /// Append a child node
    pub fn item(&mut self, node: MenuNode) -> &mut Self {
        self.items.push(node);
        self
    }
}

/// Minimal HTML attribute/text escaping for menu output
fn escape(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
