//! Error types for edda-core

use thiserror::Error;

/// Result type alias using edda-core's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for Edda
#[derive(Error, Debug)]
pub enum Error {
    /// Missing or blank required field
    #[error("{kind} is missing required field: {field}")]
    MissingField { kind: String, field: String },

    /// Field length outside the allowed range
    #[error("{kind} field '{field}' has length {len}, expected {expected}")]
    LengthOutOfRange {
        kind: String,
        field: String,
        len: usize,
        expected: String,
    },

    /// Field value does not match the required pattern
    #[error("{kind} field '{field}' does not match pattern {pattern}: {value}")]
    FormatMismatch {
        kind: String,
        field: String,
        value: String,
        pattern: String,
    },

    /// Field refers to a filesystem path that does not exist
    #[error("{kind} field '{field}' refers to a missing path: {path}")]
    PathNotFound {
        kind: String,
        field: String,
        path: String,
    },

    /// An entity with the same name is already registered
    #[error("{kind} '{name}' is already registered")]
    DuplicateName { kind: String, name: String },

    /// Lookup against a registry that has never had anything registered
    #[error("no {kind} has been registered")]
    RegistryEmpty { kind: String },

    /// Lookup for a name absent from its registry
    #[error("unknown {kind}: {name}")]
    NotFound { kind: String, name: String },

    /// Setting references a group that is not registered
    #[error("setting '{setting}' references unknown group: {group}")]
    UnknownGroup { setting: String, group: String },

    /// Translation lookup failed for a key
    #[error("no translation for key: {key}")]
    TranslationMissing { key: String },

    /// A dispatched handler returned an error
    #[error("handler on channel '{channel}' failed: {message}")]
    HandlerFailed { channel: String, message: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a missing field error
    pub fn missing_field(kind: impl Into<String>, field: impl Into<String>) -> Self {
        Self::MissingField {
            kind: kind.into(),
            field: field.into(),
        }
    }

    /// Create a length out of range error
    pub fn length_out_of_range(
        kind: impl Into<String>,
        field: impl Into<String>,
        len: usize,
        min: Option<usize>,
        max: Option<usize>,
    ) -> Self {
        let expected = match (min, max) {
            (Some(min), Some(max)) => format!("{min}..={max}"),
            (Some(min), None) => format!("at least {min}"),
            (None, Some(max)) => format!("at most {max}"),
            (None, None) => "any length".to_string(),
        };
        Self::LengthOutOfRange {
            kind: kind.into(),
            field: field.into(),
            len,
            expected,
        }
    }

    /// Create a format mismatch error
    pub fn format_mismatch(
        kind: impl Into<String>,
        field: impl Into<String>,
        value: impl Into<String>,
        pattern: impl Into<String>,
    ) -> Self {
        Self::FormatMismatch {
            kind: kind.into(),
            field: field.into(),
            value: value.into(),
            pattern: pattern.into(),
        }
    }

    /// Create a path not found error
    pub fn path_not_found(
        kind: impl Into<String>,
        field: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self::PathNotFound {
            kind: kind.into(),
            field: field.into(),
            path: path.into(),
        }
    }

    /// Create a duplicate name error
    pub fn duplicate_name(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self::DuplicateName {
            kind: kind.into(),
            name: name.into(),
        }
    }

    /// Create a registry empty error
    pub fn registry_empty(kind: impl Into<String>) -> Self {
        Self::RegistryEmpty { kind: kind.into() }
    }

    /// Create a not found error
    pub fn not_found(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self::NotFound {
            kind: kind.into(),
            name: name.into(),
        }
    }

    /// Create an unknown group error
    pub fn unknown_group(setting: impl Into<String>, group: impl Into<String>) -> Self {
        Self::UnknownGroup {
            setting: setting.into(),
            group: group.into(),
        }
    }

    /// Create a translation missing error
    pub fn translation_missing(key: impl Into<String>) -> Self {
        Self::TranslationMissing { key: key.into() }
    }

    /// Create a handler failed error
    pub fn handler_failed(channel: impl Into<String>, message: impl Into<String>) -> Self {
        Self::HandlerFailed {
            channel: channel.into(),
            message: message.into(),
        }
    }

    /// Whether this error means "the requested entity does not exist"
    ///
    /// Covers both the empty-registry and absent-key lookup failures,
    /// which callers usually treat the same way.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::RegistryEmpty { .. } | Self::NotFound { .. }
        )
    }

    /// Whether this error was raised by a registration-time validation check
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::MissingField { .. }
                | Self::LengthOutOfRange { .. }
                | Self::FormatMismatch { .. }
                | Self::PathNotFound { .. }
                | Self::DuplicateName { .. }
                | Self::UnknownGroup { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_predicate() {
        assert!(Error::registry_empty("package").is_not_found());
        assert!(Error::not_found("package", "blog").is_not_found());
        assert!(!Error::missing_field("package", "title").is_not_found());
    }

    #[test]
    fn test_validation_predicate() {
        assert!(Error::missing_field("setting", "group").is_validation());
        assert!(Error::duplicate_name("theme", "dark").is_validation());
        assert!(!Error::not_found("theme", "dark").is_validation());
    }

    #[test]
    fn test_length_message_bounds() {
        let err = Error::length_out_of_range("package", "name", 300, Some(1), Some(255));
        assert!(err.to_string().contains("1..=255"));

        let err = Error::length_out_of_range("package", "name", 0, Some(1), None);
        assert!(err.to_string().contains("at least 1"));
    }
}
