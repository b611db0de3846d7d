//! Typed argument values and match results.
//!
//! A successful match produces a [`Bindings`] value: every flag that took
//! part in the match appears under its name (without the leading dash),
//! either as a bare presence marker or as the typed [`ArgValue`] its
//! declared type produced. The single unlabeled positional, when consumed,
//! lives in its own slot rather than under an in-band key; serialized
//! output writes it under [`POSITIONAL_KEY`].

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Key under which the positional value appears in serialized [`Bindings`].
pub const POSITIONAL_KEY: &str = "<positional>";

/// A typed argument value produced by the
/// [`TypeRegistry`](crate::TypeRegistry).
///
/// # Examples
///
/// ```
/// use usage_pattern_core::ArgValue;
///
/// let v = ArgValue::Int(42);
/// assert_eq!(v.to_string(), "42");
/// assert_eq!(v.as_int(), Some(42));
/// assert_eq!(v.as_str(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ArgValue {
    /// Integer value (`INT`, `HEX`, `OCT`, `BIN`).
    Int(i64),
    /// Floating-point value (`FLOAT`).
    Float(f64),
    /// Filesystem path (`PATH`).
    Path(PathBuf),
    /// Free text (`STR` and placeholder tags).
    Str(String),
}

impl ArgValue {
    /// Returns the integer value, if this is an [`ArgValue::Int`].
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the float value, if this is an [`ArgValue::Float`].
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(x) => Some(*x),
            _ => None,
        }
    }

    /// Returns the path, if this is an [`ArgValue::Path`].
    pub fn as_path(&self) -> Option<&std::path::Path> {
        match self {
            Self::Path(p) => Some(p.as_path()),
            _ => None,
        }
    }

    /// Returns the text, if this is an [`ArgValue::Str`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Path(p) => write!(f, "{}", p.display()),
            Self::Str(s) => f.write_str(s),
        }
    }
}

/// What a matched flag bound to: bare presence or a typed value.
#[derive(Debug, Clone, PartialEq)]
pub enum Binding {
    /// The flag was present and declares no value type.
    Present,
    /// The flag was present with a validated value.
    Value(ArgValue),
}

impl Binding {
    /// Returns the typed value, if any.
    pub fn value(&self) -> Option<&ArgValue> {
        match self {
            Self::Present => None,
            Self::Value(v) => Some(v),
        }
    }
}

impl Serialize for Binding {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Present => serializer.serialize_bool(true),
            Self::Value(v) => v.serialize(serializer),
        }
    }
}

/// Result of a successful match: flag name → [`Binding`], plus the
/// positional slot.
///
/// Built fresh per match attempt and owned by the caller; a failed match
/// produces no bindings at all.
///
/// # Examples
///
/// ```
/// use usage_pattern_core::{ArgValue, Bindings};
///
/// let mut bindings = Bindings::new();
/// bindings.insert_present("v");
/// bindings.insert_value("n", ArgValue::Int(5));
/// bindings.set_positional(ArgValue::Str("report.txt".into()));
///
/// assert!(bindings.is_present("v"));
/// assert_eq!(bindings.value_of("n"), Some(&ArgValue::Int(5)));
/// assert_eq!(bindings.positional().and_then(|v| v.as_str()), Some("report.txt"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bindings {
    flags: BTreeMap<String, Binding>,
    positional: Option<ArgValue>,
}

impl Bindings {
    /// Creates an empty binding set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a flag as present with no value.
    pub fn insert_present(&mut self, name: impl Into<String>) {
        self.flags.insert(name.into(), Binding::Present);
    }

    /// Records a flag with its validated value.
    pub fn insert_value(&mut self, name: impl Into<String>, value: ArgValue) {
        self.flags.insert(name.into(), Binding::Value(value));
    }

    /// Fills the positional slot.
    pub fn set_positional(&mut self, value: ArgValue) {
        self.positional = Some(value);
    }

    /// Looks up a flag binding by name.
    pub fn get(&self, name: &str) -> Option<&Binding> {
        self.flags.get(name)
    }

    /// Returns the typed value bound to a flag, if any.
    pub fn value_of(&self, name: &str) -> Option<&ArgValue> {
        self.flags.get(name).and_then(Binding::value)
    }

    /// Whether the named flag took part in the match.
    pub fn is_present(&self, name: &str) -> bool {
        self.flags.contains_key(name)
    }

    /// The positional value, if one was consumed.
    pub fn positional(&self) -> Option<&ArgValue> {
        self.positional.as_ref()
    }

    /// Moves a binding from one key to another.
    ///
    /// Used by the interface layer to publish flags under their configured
    /// long names. A no-op when `from` is absent.
    pub fn rename(&mut self, from: &str, to: impl Into<String>) {
        if let Some(binding) = self.flags.remove(from) {
            self.flags.insert(to.into(), binding);
        }
    }

    /// Iterates over flag bindings in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Binding)> {
        self.flags.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of bound flags (the positional not included).
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    /// Whether nothing at all was bound.
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty() && self.positional.is_none()
    }
}

impl Serialize for Bindings {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let extra = usize::from(self.positional.is_some());
        let mut map = serializer.serialize_map(Some(self.flags.len() + extra))?;
        for (name, binding) in &self.flags {
            map.serialize_entry(name, binding)?;
        }
        if let Some(positional) = &self.positional {
            map.serialize_entry(POSITIONAL_KEY, positional)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_accessors() {
        assert_eq!(ArgValue::Int(7).as_int(), Some(7));
        assert_eq!(ArgValue::Float(1.5).as_float(), Some(1.5));
        assert_eq!(ArgValue::Str("x".into()).as_str(), Some("x"));
        assert_eq!(ArgValue::Str("x".into()).as_int(), None);
        assert_eq!(
            ArgValue::Path("/tmp/a".into()).as_path(),
            Some(std::path::Path::new("/tmp/a"))
        );
    }

    #[test]
    fn test_bindings_insert_and_lookup() {
        let mut bindings = Bindings::new();
        bindings.insert_present("a");
        bindings.insert_value("b", ArgValue::Int(3));

        assert!(bindings.is_present("a"));
        assert_eq!(bindings.value_of("a"), None);
        assert_eq!(bindings.value_of("b"), Some(&ArgValue::Int(3)));
        assert!(!bindings.is_present("c"));
        assert_eq!(bindings.len(), 2);
    }

    #[test]
    fn test_bindings_rename_moves_entry() {
        let mut bindings = Bindings::new();
        bindings.insert_value("o", ArgValue::Str("out".into()));
        bindings.rename("o", "output");

        assert!(!bindings.is_present("o"));
        assert_eq!(
            bindings.value_of("output"),
            Some(&ArgValue::Str("out".into()))
        );

        // Renaming an absent key changes nothing.
        bindings.rename("missing", "other");
        assert!(!bindings.is_present("other"));
    }

    #[test]
    fn test_bindings_serialize_flat_object() {
        let mut bindings = Bindings::new();
        bindings.insert_present("v");
        bindings.insert_value("n", ArgValue::Int(5));
        bindings.set_positional(ArgValue::Str("report.txt".into()));

        let json = serde_json::to_value(&bindings).expect("bindings serialize");
        assert_eq!(
            json,
            serde_json::json!({
                "n": 5,
                "v": true,
                "<positional>": "report.txt",
            })
        );
    }
}
