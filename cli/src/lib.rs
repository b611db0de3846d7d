//! Interface layer for usage patterns.
//!
//! Everything around the engine that a finished command-line program
//! needs:
//!
//! - [`InterfaceSpec`] / [`Parameter`] — the author-facing configuration,
//!   loadable from JSON or YAML.
//! - [`Interface`] — the compiled surface: routes and matches invocations,
//!   injects parameter defaults, publishes flags under long names, and
//!   renders help and error text.
//! - [`open_file`] — checked file opening with readable failures.
//! - the `usage-check` binary — validates a command line against an
//!   interface definition file.
//!
//! # Example
//!
//! ```
//! use usage_pattern_cli::{Interface, InterfaceSpec};
//! use usage_pattern_core::TypeRegistry;
//!
//! let spec = InterfaceSpec::from_yaml(
//!     "name: copytool\ncommands:\n  push: \"[-v|-q] <source>\"\n",
//! )?;
//! let interface = Interface::new(spec, TypeRegistry::new())?;
//!
//! let tokens: Vec<String> = ["copytool", "push", "-v", "a.txt"]
//!     .into_iter()
//!     .map(String::from)
//!     .collect();
//! let bindings = interface.parse(&tokens)?;
//! assert!(bindings.is_present("v"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;
mod files;
mod help;
mod interface;
mod loader;

pub use error::{CliError, Result};
pub use files::{FileMode, open_file};
pub use interface::{Interface, InterfaceSpec, Parameter};
