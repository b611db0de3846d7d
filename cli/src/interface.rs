//! The interface: an engine plus the presentation surface around it.
//!
//! An [`InterfaceSpec`] is the author-facing configuration: script name,
//! descriptions, the command tree, and a table of [`Parameter`] metadata.
//! Building an [`Interface`] from it compiles every pattern and resolves
//! every parameter default, so the whole configuration is either usable or
//! rejected before the first invocation is parsed.

use serde::Deserialize;

use usage_pattern_core::{ArgValue, Bindings, CommandTree, TypeRegistry};
use usage_pattern_engine::{Engine, UsageError};

use crate::error::{CliError, Result};

/// Help and translation metadata for one flag.
///
/// A parameter with a `long_name` is published under that name in the
/// final bindings; a parameter with a `default` contributes that value
/// (converted through its `value_type`, free text when none is declared)
/// whenever the flag is absent from the input.
#[derive(Debug, Clone, Deserialize)]
pub struct Parameter {
    /// Flag name without the leading dash.
    pub flag: String,
    /// Name the binding is published under, when given.
    #[serde(default)]
    pub long_name: Option<String>,
    /// Help-text description.
    #[serde(default)]
    pub description: Option<String>,
    /// Raw default value, converted at interface construction.
    #[serde(default)]
    pub default: Option<String>,
    /// Type tag the default is converted through.
    #[serde(default)]
    pub value_type: Option<String>,
}

impl Parameter {
    /// Creates a parameter for a flag, with no metadata.
    pub fn new(flag: impl Into<String>) -> Self {
        Self {
            flag: flag.into(),
            long_name: None,
            description: None,
            default: None,
            value_type: None,
        }
    }

    /// Sets the long name the binding is published under.
    pub fn with_long_name(mut self, long_name: impl Into<String>) -> Self {
        self.long_name = Some(long_name.into());
        self
    }

    /// Sets the help-text description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets a default value and the tag it converts through.
    pub fn with_default(mut self, default: impl Into<String>, value_type: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self.value_type = Some(value_type.into());
        self
    }

    /// The name this parameter's binding is published under.
    pub fn published_name(&self) -> &str {
        self.long_name.as_deref().unwrap_or(&self.flag)
    }
}

/// The author-facing configuration of a complete interface.
#[derive(Debug, Clone, Deserialize)]
pub struct InterfaceSpec {
    /// Script name, shown in usage lines.
    pub name: String,
    /// One-line description shown at the top of the help message.
    #[serde(default)]
    pub short_description: String,
    /// Longer description shown at the bottom of the help message.
    #[serde(default)]
    pub long_description: String,
    /// The sub-command routing tree.
    pub commands: CommandTree,
    /// Flag metadata for help rendering, translation, and defaults.
    #[serde(default)]
    pub parameters: Vec<Parameter>,
}

/// A fully compiled interface, ready to parse invocations.
///
/// # Examples
///
/// ```
/// use usage_pattern_cli::{Interface, InterfaceSpec, Parameter};
/// use usage_pattern_core::{CommandTree, TypeRegistry};
///
/// let spec = InterfaceSpec {
///     name: "copytool".to_string(),
///     short_description: "copies things".to_string(),
///     long_description: String::new(),
///     commands: CommandTree::leaf("[-v|-q] <source>"),
///     parameters: vec![
///         Parameter::new("v").with_long_name("verbose"),
///         Parameter::new("q").with_long_name("quiet"),
///     ],
/// };
/// let interface = Interface::new(spec, TypeRegistry::new()).unwrap();
///
/// let tokens: Vec<String> = ["copytool", "-v", "a.txt"]
///     .into_iter()
///     .map(String::from)
///     .collect();
/// let bindings = interface.parse(&tokens).unwrap();
/// assert!(bindings.is_present("verbose"));
/// assert!(!bindings.is_present("v"));
/// ```
#[derive(Debug)]
pub struct Interface {
    name: String,
    short_description: String,
    long_description: String,
    parameters: Vec<Parameter>,
    defaults: Vec<(String, ArgValue)>,
    engine: Engine,
}

impl Interface {
    /// Compiles a spec into a ready interface.
    ///
    /// Fails with a configuration error when any pattern is malformed,
    /// the command tree is invalid, or a parameter default does not fit
    /// its declared type.
    pub fn new(spec: InterfaceSpec, registry: TypeRegistry) -> Result<Self> {
        let mut defaults = Vec::new();
        for parameter in &spec.parameters {
            if let Some(raw) = &parameter.default {
                let tag = parameter.value_type.as_deref().unwrap_or("STR");
                let value =
                    registry
                        .validate(tag, raw)
                        .map_err(|source| CliError::InvalidDefault {
                            flag: parameter.flag.clone(),
                            source,
                        })?;
                defaults.push((parameter.flag.clone(), value));
            }
        }

        let engine = Engine::new(spec.commands, registry)?;
        Ok(Self {
            name: spec.name,
            short_description: spec.short_description,
            long_description: spec.long_description,
            parameters: spec.parameters,
            defaults,
            engine,
        })
    }

    /// Parses one invocation: routes, matches, injects defaults, and
    /// publishes flags under their configured long names.
    ///
    /// `tokens` is the full invocation, script name first.
    pub fn parse(&self, tokens: &[String]) -> std::result::Result<Bindings, UsageError> {
        let mut bindings = self.engine.parse(tokens)?;

        for (flag, value) in &self.defaults {
            if bindings.get(flag).is_none() {
                bindings.insert_value(flag.clone(), value.clone());
            }
        }
        for parameter in &self.parameters {
            if let Some(long_name) = &parameter.long_name {
                bindings.rename(&parameter.flag, long_name.clone());
            }
        }
        Ok(bindings)
    }

    /// The script name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The one-line description.
    pub fn short_description(&self) -> &str {
        &self.short_description
    }

    /// The long description.
    pub fn long_description(&self) -> &str {
        &self.long_description
    }

    /// The configured parameter table.
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// The underlying engine.
    pub fn engine(&self) -> &Engine {
        &self.engine
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    fn sample_spec() -> InterfaceSpec {
        InterfaceSpec {
            name: "copytool".to_string(),
            short_description: "copies things".to_string(),
            long_description: "Copies things, carefully.".to_string(),
            commands: CommandTree::leaf("[-v|-q] [-n <INT>|-f] <source>"),
            parameters: vec![
                Parameter::new("v").with_long_name("verbose"),
                Parameter::new("q").with_long_name("quiet"),
                Parameter::new("n")
                    .with_long_name("count")
                    .with_default("1", "INT"),
            ],
        }
    }

    #[test]
    fn test_long_name_translation() {
        let interface = Interface::new(sample_spec(), TypeRegistry::new()).unwrap();
        let bindings = interface.parse(&tokens(&["copytool", "-v", "a.txt"])).unwrap();
        assert!(bindings.is_present("verbose"));
        assert!(!bindings.is_present("v"));
    }

    #[test]
    fn test_default_injected_when_flag_absent() {
        let interface = Interface::new(sample_spec(), TypeRegistry::new()).unwrap();

        let bindings = interface.parse(&tokens(&["copytool", "a.txt"])).unwrap();
        assert_eq!(bindings.value_of("count"), Some(&ArgValue::Int(1)));

        // A given value wins over the default.
        let bindings = interface
            .parse(&tokens(&["copytool", "-n", "5", "a.txt"]))
            .unwrap();
        assert_eq!(bindings.value_of("count"), Some(&ArgValue::Int(5)));
    }

    #[test]
    fn test_invalid_default_rejected_at_construction() {
        let mut spec = sample_spec();
        spec.parameters
            .push(Parameter::new("x").with_default("notanumber", "INT"));
        let err = Interface::new(spec, TypeRegistry::new()).unwrap_err();
        assert!(matches!(err, CliError::InvalidDefault { flag, .. } if flag == "x"));
    }

    #[test]
    fn test_bad_pattern_rejected_at_construction() {
        let mut spec = sample_spec();
        spec.commands = CommandTree::leaf("{-a|-b|-c}");
        assert!(matches!(
            Interface::new(spec, TypeRegistry::new()),
            Err(CliError::Grammar(_))
        ));
    }

    #[test]
    fn test_usage_errors_pass_through() {
        let interface = Interface::new(sample_spec(), TypeRegistry::new()).unwrap();
        let err = interface
            .parse(&tokens(&["copytool", "-v", "-q", "a.txt"]))
            .unwrap_err();
        assert!(matches!(err, UsageError::PatternMismatch { .. }));
    }
}
