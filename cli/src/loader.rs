//! Interface definition loading.
//!
//! Definitions are plain JSON or YAML documents; the file extension picks
//! the format. The command tree reads naturally in either: a string is a
//! leaf pattern, a map is a branch.
//!
//! ```yaml
//! name: copytool
//! short_description: copies things
//! commands:
//!   push: "[-v|-q] <source>"
//!   status: "[-s|-l]"
//! parameters:
//!   - flag: v
//!     long_name: verbose
//! ```

use std::fs;
use std::path::Path;

use crate::error::{CliError, Result};
use crate::interface::InterfaceSpec;

impl InterfaceSpec {
    /// Parses a JSON interface definition.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Parses a YAML interface definition.
    pub fn from_yaml(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Loads a definition file, picking the format by extension
    /// (`.json`, `.yaml`, `.yml`).
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();
        let text = fs::read_to_string(path)?;
        match extension {
            "json" => Self::from_json(&text),
            "yaml" | "yml" => Self::from_yaml(&text),
            other => Err(CliError::UnsupportedFormat(other.to_string())),
        }
    }
}
