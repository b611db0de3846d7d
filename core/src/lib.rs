//! Core types for command-line usage validation.
//!
//! This crate defines the data model shared by the pattern engine and the
//! interface layer:
//!
//! - [`CommandTree`] — the branch/leaf structure routing sub-commands to
//!   pattern strings.
//! - [`Constraint`] — the compiled boolean-presence AST of one pattern
//!   (flags, the positional, and the AND/OR/XOR/NAND combinators).
//! - [`ArgValue`] and [`Bindings`] — typed values and the result mapping
//!   produced by a successful match.
//! - [`TypeRegistry`] — type tags (`<INT>`, `<PATH>`, …) mapped to
//!   validator/converter functions, extensible by the caller.
//!
//! Validation ([`validate_tree`]) catches structural command-tree mistakes
//! (empty branches, malformed command words) at configuration load.
//!
//! # Example
//!
//! ```
//! use usage_pattern_core::{CommandTree, TypeRegistry, validate_tree};
//!
//! let tree = CommandTree::branch([
//!     ("push", CommandTree::leaf("{-u|-d} <remote>")),
//!     ("status", CommandTree::leaf("[-s -v]")),
//! ]);
//! assert!(validate_tree(&tree).is_empty());
//!
//! let registry = TypeRegistry::new();
//! assert!(registry.knows("INT"));
//! assert!(registry.knows("remote")); // placeholder: free text
//! assert!(!registry.knows("BOGUS"));
//! ```

mod constraint;
mod registry;
mod tree;
mod validate;
mod value;

pub use constraint::Constraint;
pub use registry::{TypeChecker, TypeError, TypeRegistry, is_placeholder};
pub use tree::CommandTree;
pub use validate::{TreeError, validate_tree};
pub use value::{ArgValue, Binding, Bindings, POSITIONAL_KEY};
