//! Pattern grammar compiler and matcher for command-line usage validation.
//!
//! This crate turns usage pattern strings into constraint trees and
//! evaluates raw argument tokens against them:
//!
//! - [`compile`] — pattern string → [`Constraint`] tree, rejecting
//!   malformed patterns with a [`GrammarError`].
//! - [`navigate`] — walk a [`CommandTree`] with the leading tokens to
//!   select the pattern that applies.
//! - [`match_tokens`] — evaluate the remaining tokens against a compiled
//!   tree, producing typed [`Bindings`] or a [`UsageError`].
//! - [`Engine`] — the three composed, with every leaf pattern compiled
//!   once at construction.
//!
//! # Example
//!
//! ```
//! use usage_pattern_core::{CommandTree, TypeRegistry};
//! use usage_pattern_engine::Engine;
//!
//! let tree = CommandTree::branch([
//!     ("push", CommandTree::leaf("{-u|-d} [-v -q] <path>")),
//!     ("status", CommandTree::leaf("[-s|-l]")),
//! ]);
//! let engine = Engine::new(tree, TypeRegistry::new())?;
//!
//! let tokens: Vec<String> = ["tool", "push", "-u", "-v", "out.txt"]
//!     .into_iter()
//!     .map(String::from)
//!     .collect();
//! let bindings = engine.parse(&tokens)?;
//! assert!(bindings.is_present("u"));
//! assert_eq!(bindings.positional().and_then(|v| v.as_str()), Some("out.txt"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! [`Constraint`]: usage_pattern_core::Constraint
//! [`CommandTree`]: usage_pattern_core::CommandTree
//! [`Bindings`]: usage_pattern_core::Bindings

mod compiler;
mod error;
mod matcher;
mod navigator;

use std::collections::HashMap;

use tracing::debug;

use usage_pattern_core::{Bindings, CommandTree, Constraint, TypeRegistry, validate_tree};

pub use compiler::compile;
pub use error::{GrammarError, Mismatch, UsageError};
pub use matcher::match_tokens;
pub use navigator::navigate;

/// The composed pipeline: command tree, type registry, and a write-once
/// cache of compiled leaf patterns.
///
/// Construction validates the tree and compiles every pattern eagerly, so
/// grammar defects abort startup and [`Engine::parse`] can only fail with
/// a per-invocation [`UsageError`].
#[derive(Debug)]
pub struct Engine {
    tree: CommandTree,
    registry: TypeRegistry,
    compiled: HashMap<String, Constraint>,
}

impl Engine {
    /// Builds an engine, validating the command tree and compiling every
    /// leaf pattern.
    pub fn new(tree: CommandTree, registry: TypeRegistry) -> Result<Self, GrammarError> {
        if let Some(error) = validate_tree(&tree).into_iter().next() {
            return Err(error.into());
        }

        let mut compiled = HashMap::new();
        for (path, pattern) in tree.leaves() {
            if compiled.contains_key(pattern) {
                continue;
            }
            let constraint =
                compile(pattern, &registry).map_err(|reason| GrammarError::InvalidPattern {
                    path: if path.is_empty() {
                        "<root>".to_string()
                    } else {
                        path.clone()
                    },
                    pattern: pattern.to_string(),
                    reason: Box::new(reason),
                })?;
            compiled.insert(pattern.to_string(), constraint);
        }
        debug!(patterns = compiled.len(), "engine ready");

        Ok(Self {
            tree,
            registry,
            compiled,
        })
    }

    /// Builds an engine for a single pattern with no sub-commands.
    pub fn single(pattern: impl Into<String>, registry: TypeRegistry) -> Result<Self, GrammarError> {
        Self::new(CommandTree::leaf(pattern), registry)
    }

    /// Navigates and matches one invocation.
    ///
    /// `tokens` is the full invocation: the script name first, then
    /// sub-command words, then the arguments to validate. Nothing is read
    /// from ambient process state.
    pub fn parse(&self, tokens: &[String]) -> Result<Bindings, UsageError> {
        let (pattern, consumed) = navigate(&self.tree, tokens)?;
        let constraint = self
            .compiled
            .get(pattern)
            .expect("every leaf pattern is compiled at construction");
        match_tokens(constraint, &tokens[consumed..], &self.registry)
    }

    /// The command tree this engine routes with.
    pub fn tree(&self) -> &CommandTree {
        &self.tree
    }

    /// The type registry this engine validates with.
    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }
}
