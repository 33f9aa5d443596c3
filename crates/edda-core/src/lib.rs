//! # edda-core
//!
//! Core library for the Edda CMS engine providing:
//! - Error taxonomy shared by all subsystems
//! - Declarative validation checks (presence, length, format, filepath)
//! - The generic validated [`registry::Registry`]
//! - Collaborator traits for sanitization and translation

pub mod checks;
pub mod error;
pub mod registry;
pub mod traits;

pub use error::{Error, Result};
pub use registry::{Registrable, Registry};
pub use traits::{
    MapTranslator, NullTranslator, PassthroughSanitizer, Sanitizer, TagSanitizer, Translator,
    translate_or_key,
};
