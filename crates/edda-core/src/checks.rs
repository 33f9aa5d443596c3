//! Declarative validation checks
//!
//! Small, composable checks applied by entities inside their `validate`
//! implementations:
//! - `presence`: field must be set and non-blank
//! - `length`: character count within optional bounds
//! - `format` / `formats`: value must match a pattern
//! - `filepath`: value must refer to an existing path
//!
//! Checks are fail-fast: the first failing check returns its error and no
//! further checks run. Callers that need aggregate error reporting must
//! catch per check.

use crate::error::{Error, Result};
use regex::Regex;
use std::path::Path;

/// Check that a field is present and not blank
///
/// `None`, empty, and whitespace-only values all fail.
pub fn presence(kind: &str, field: &str, value: Option<&str>) -> Result<()> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(()),
        _ => Err(Error::missing_field(kind, field)),
    }
}

/// Check that a field's character count is within `[min, max]`
///
/// Either bound may be omitted.
pub fn length(
    kind: &str,
    field: &str,
    value: &str,
    min: Option<usize>,
    max: Option<usize>,
) -> Result<()> {
    let len = value.chars().count();

    let below = min.is_some_and(|min| len < min);
    let above = max.is_some_and(|max| len > max);

    if below || above {
        return Err(Error::length_out_of_range(kind, field, len, min, max));
    }

    Ok(())
}

/// Check that a field's value matches a pattern
pub fn format(kind: &str, field: &str, value: &str, pattern: &Regex) -> Result<()> {
    if pattern.is_match(value) {
        Ok(())
    } else {
        Err(Error::format_mismatch(kind, field, value, pattern.as_str()))
    }
}

/// Check several field/pattern pairs in one call
///
/// Pairs are checked in iteration order; the first mismatch wins.
pub fn formats<'a, I>(kind: &str, pairs: I) -> Result<()>
where
    I: IntoIterator<Item = (&'a str, &'a str, &'a Regex)>,
{
    for (field, value, pattern) in pairs {
        format(kind, field, value, pattern)?;
    }
    Ok(())
}

/// Check that a field refers to an existing filesystem path
pub fn filepath(kind: &str, field: &str, path: &Path) -> Result<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(Error::path_not_found(
            kind,
            field,
            path.display().to_string(),
        ))
    }
}
