//! Collaborator traits
//!
//! Boundaries to subsystems this core does not own: string sanitization
//! (security layer) and translation lookup (i18n layer). Hosts inject
//! their own implementations; the defaults here are enough for tests and
//! for embedding without either subsystem.

use crate::error::{Error, Result};
use regex::Regex;
use std::collections::HashMap;
use tracing::warn;

/// Strips dangerous sequences from user-supplied strings before they are
/// persisted
pub trait Sanitizer: Send + Sync {
    fn sanitize(&self, raw: &str) -> String;
}

/// Sanitizer that removes template-tag sequences
///
/// Removes `<?r ... ?>` processing tags and `#{...}` interpolations, the
/// two sequences the template engine would evaluate if a stored value were
/// ever rendered verbatim.
pub struct TagSanitizer {
    processing_tag: Regex,
    interpolation: Regex,
}

impl TagSanitizer {
    pub fn new() -> Self {
        Self {
            processing_tag: Regex::new(r"(?s)<\?r.*?\?>").expect("processing tag regex is valid"),
            interpolation: Regex::new(r"#\{.*?\}").expect("interpolation regex is valid"),
        }
    }
}

impl Default for TagSanitizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Sanitizer for TagSanitizer {
    fn sanitize(&self, raw: &str) -> String {
        let stripped = self.processing_tag.replace_all(raw, "");
        self.interpolation.replace_all(&stripped, "").into_owned()
    }
}

/// Sanitizer that passes values through untouched
pub struct PassthroughSanitizer;

impl Sanitizer for PassthroughSanitizer {
    fn sanitize(&self, raw: &str) -> String {
        raw.to_string()
    }
}

/// Translation lookup for titles and descriptions
///
/// Entity titles are lookup keys, not display strings; the host's i18n
/// layer resolves them. Use [`translate_or_key`] at render time so a
/// failed lookup degrades to the literal key instead of an error.
pub trait Translator: Send + Sync {
    fn translate(&self, key: &str) -> Result<String>;
}

/// Translator with no translations; every lookup fails
///
/// Paired with [`translate_or_key`] this makes every title render as its
/// raw key, which is the right behavior for hosts without an i18n layer.
pub struct NullTranslator;

impl Translator for NullTranslator {
    fn translate(&self, key: &str) -> Result<String> {
        Err(Error::translation_missing(key))
    }
}

/// In-memory translator backed by a key/value map
pub struct MapTranslator {
    entries: HashMap<String, String>,
}

impl MapTranslator {
    pub fn new(entries: HashMap<String, String>) -> Self {
        Self { entries }
    }
}

impl Translator for MapTranslator {
    fn translate(&self, key: &str) -> Result<String> {
        self.entries
            .get(key)
            .cloned()
            .ok_or_else(|| Error::translation_missing(key))
    }
}

/// Translate a key, falling back to the literal key on any failure
///
/// Lookup failures are expected during partial translation coverage and
/// must never surface to the caller.
pub fn translate_or_key(translator: &dyn Translator, key: &str) -> String {
    match translator.translate(key) {
        Ok(translated) => translated,
        Err(_) => {
            warn!("No translation for '{}', using key as-is", key);
            key.to_string()
        }
    }
}
