//! Type tags and the validator registry.
//!
//! A type tag is the word inside the angle brackets of a pattern
//! (`<INT>`, `<PATH>`). All-uppercase tags name registered validators;
//! tags containing lowercase letters (`<filename>`) are free-text
//! placeholders that accept anything and convert as [`ArgValue::Str`].
//!
//! Custom tags can be registered with a plain function:
//!
//! ```
//! use usage_pattern_core::{ArgValue, TypeRegistry};
//!
//! fn check_port(raw: &str) -> Option<ArgValue> {
//!     raw.parse::<u16>().ok().map(|port| ArgValue::Int(i64::from(port)))
//! }
//!
//! let mut registry = TypeRegistry::new();
//! registry.register("PORT", check_port);
//! assert_eq!(registry.validate("PORT", "8080"), Ok(ArgValue::Int(8080)));
//! assert!(registry.validate("PORT", "70000").is_err());
//! ```

use std::collections::HashMap;
use std::path::PathBuf;

use thiserror::Error;

use crate::value::ArgValue;

/// Validator for a registered type tag: returns the converted value, or
/// `None` when the raw text does not fit the type.
pub type TypeChecker = fn(&str) -> Option<ArgValue>;

/// A raw value failed conversion against its declared type tag.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("value {raw:?} is not a valid {expected}")]
pub struct TypeError {
    /// The declared type tag.
    pub expected: String,
    /// The rejected raw token.
    pub raw: String,
}

/// Maps type tags to validator/converter functions.
///
/// [`TypeRegistry::new`] ships the built-in tags `INT`, `FLOAT`, `PATH`,
/// `STR`, `HEX`, `OCT` and `BIN`.
///
/// # Examples
///
/// ```
/// use usage_pattern_core::{ArgValue, TypeRegistry};
///
/// let registry = TypeRegistry::new();
/// assert_eq!(registry.validate("INT", "42"), Ok(ArgValue::Int(42)));
/// assert_eq!(registry.validate("HEX", "ff"), Ok(ArgValue::Int(255)));
/// assert!(registry.validate("INT", "notanumber").is_err());
///
/// // Placeholders accept anything.
/// assert_eq!(
///     registry.validate("filename", "report.txt"),
///     Ok(ArgValue::Str("report.txt".into()))
/// );
/// ```
#[derive(Debug, Clone)]
pub struct TypeRegistry {
    checkers: HashMap<String, TypeChecker>,
}

impl TypeRegistry {
    /// Creates a registry with the built-in tags.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register("INT", check_int);
        registry.register("FLOAT", check_float);
        registry.register("PATH", check_path);
        registry.register("STR", check_str);
        registry.register("HEX", check_hex);
        registry.register("OCT", check_oct);
        registry.register("BIN", check_bin);
        registry
    }

    /// Creates a registry with no tags at all.
    pub fn empty() -> Self {
        Self {
            checkers: HashMap::new(),
        }
    }

    /// Registers (or replaces) a validator for a tag.
    pub fn register(&mut self, tag: impl Into<String>, checker: TypeChecker) {
        self.checkers.insert(tag.into(), checker);
    }

    /// Whether a tag can be used in a pattern: registered, or a
    /// placeholder.
    pub fn knows(&self, tag: &str) -> bool {
        is_placeholder(tag) || self.checkers.contains_key(tag)
    }

    /// Converts a raw token through the named tag.
    pub fn validate(&self, tag: &str, raw: &str) -> Result<ArgValue, TypeError> {
        let converted = match self.checkers.get(tag) {
            Some(checker) => checker(raw),
            None if is_placeholder(tag) => check_str(raw),
            None => None,
        };
        converted.ok_or_else(|| TypeError {
            expected: tag.to_string(),
            raw: raw.to_string(),
        })
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// A placeholder tag contains at least one lowercase letter and names free
/// text rather than a registered type.
pub fn is_placeholder(tag: &str) -> bool {
    tag.chars().any(|c| c.is_ascii_lowercase())
}

fn check_int(raw: &str) -> Option<ArgValue> {
    if raw.is_empty() || !raw.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok().map(ArgValue::Int)
}

// Strong check: an integer without a decimal point is not a FLOAT.
fn check_float(raw: &str) -> Option<ArgValue> {
    if !raw.contains('.') || !raw.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return None;
    }
    raw.parse().ok().map(ArgValue::Float)
}

fn check_hex(raw: &str) -> Option<ArgValue> {
    if raw.is_empty() || !raw.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    i64::from_str_radix(raw, 16).ok().map(ArgValue::Int)
}

fn check_oct(raw: &str) -> Option<ArgValue> {
    if raw.is_empty() || !raw.chars().all(|c| ('0'..='7').contains(&c)) {
        return None;
    }
    i64::from_str_radix(raw, 8).ok().map(ArgValue::Int)
}

fn check_bin(raw: &str) -> Option<ArgValue> {
    if raw.is_empty() || !raw.chars().all(|c| c == '0' || c == '1') {
        return None;
    }
    i64::from_str_radix(raw, 2).ok().map(ArgValue::Int)
}

fn check_path(raw: &str) -> Option<ArgValue> {
    if raw.is_empty() {
        return None;
    }
    Some(ArgValue::Path(PathBuf::from(raw)))
}

fn check_str(raw: &str) -> Option<ArgValue> {
    Some(ArgValue::Str(raw.to_string()))
}
