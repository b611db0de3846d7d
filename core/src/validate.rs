//! Command tree validation.
//!
//! Structural invariants are checked once, when the configuration is
//! loaded: a branch with no children can never route anything, and a
//! command word that is empty, contains whitespace, or starts with a dash
//! could never be matched against an argument token. All of these are
//! author mistakes, reported before any user interaction.
//!
//! # Examples
//!
//! ```
//! use usage_pattern_core::{CommandTree, validate_tree};
//!
//! let tree = CommandTree::branch([("push", CommandTree::leaf("-f"))]);
//! assert!(validate_tree(&tree).is_empty());
//!
//! let empty: CommandTree = CommandTree::branch(Vec::<(String, CommandTree)>::new());
//! assert!(!validate_tree(&empty).is_empty());
//! ```

use thiserror::Error;

use crate::tree::CommandTree;

/// Structural problems in a command tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// A branch has zero children and can route nothing.
    #[error("branch at '{0}' has no sub-commands")]
    EmptyBranch(String),
    /// A command word is empty.
    #[error("empty command word under '{0}'")]
    EmptyWord(String),
    /// A command word could never match an argument token.
    #[error("command word {word:?} under '{path}' contains whitespace or starts with '-'")]
    MalformedWord { path: String, word: String },
}

/// Validates a command tree, stopping at the first failing path.
pub fn validate_tree(tree: &CommandTree) -> Vec<TreeError> {
    let mut errors = Vec::new();
    let mut path = Vec::new();
    walk(tree, &mut path, &mut errors);
    errors
}

fn walk(node: &CommandTree, path: &mut Vec<String>, errors: &mut Vec<TreeError>) {
    let CommandTree::Branch(children) = node else {
        return;
    };

    let here = if path.is_empty() {
        "<root>".to_string()
    } else {
        path.join(" ")
    };

    if children.is_empty() {
        errors.push(TreeError::EmptyBranch(here));
        return;
    }

    for (word, child) in children {
        if word.is_empty() {
            errors.push(TreeError::EmptyWord(here));
            return;
        }
        if word.starts_with('-') || word.chars().any(char::is_whitespace) {
            errors.push(TreeError::MalformedWord {
                path: here,
                word: word.clone(),
            });
            return;
        }

        path.push(word.clone());
        walk(child, path, errors);
        path.pop();
        if !errors.is_empty() {
            return;
        }
    }
}
