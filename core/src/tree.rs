//! The sub-command routing tree.
//!
//! A [`CommandTree`] is either a `Branch` mapping literal command words to
//! subtrees, or a `Leaf` holding one pattern string. Whether a node is a
//! branch or a leaf is decided once, at construction or deserialization
//! time; nothing downstream inspects shapes at run time.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A node of the sub-command tree.
///
/// Deserializes from JSON or YAML where a plain string is a leaf pattern
/// and a map is a branch:
///
/// ```
/// use usage_pattern_core::CommandTree;
///
/// let tree: CommandTree = serde_json::from_str(
///     r#"{"push": "{-f|-n} <remote>", "pull": "[-q -v]"}"#,
/// ).unwrap();
/// assert!(tree.is_branch());
/// assert_eq!(
///     tree.get("push").and_then(CommandTree::pattern),
///     Some("{-f|-n} <remote>")
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CommandTree {
    /// A terminal command holding one pattern string.
    Leaf(String),
    /// Sub-command word → subtree. Insertion order is irrelevant; lookup
    /// is by exact literal match.
    Branch(BTreeMap<String, CommandTree>),
}

impl CommandTree {
    /// Creates a leaf from a pattern string.
    pub fn leaf(pattern: impl Into<String>) -> Self {
        Self::Leaf(pattern.into())
    }

    /// Creates a branch from `(word, subtree)` pairs.
    ///
    /// # Examples
    ///
    /// ```
    /// use usage_pattern_core::CommandTree;
    ///
    /// let tree = CommandTree::branch([
    ///     ("push", CommandTree::leaf("-f")),
    ///     ("pull", CommandTree::leaf("-q")),
    /// ]);
    /// assert!(tree.get("push").is_some());
    /// assert!(tree.get("clone").is_none());
    /// ```
    pub fn branch<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, CommandTree)>,
    {
        Self::Branch(
            entries
                .into_iter()
                .map(|(word, child)| (word.into(), child))
                .collect(),
        )
    }

    /// Whether this node is a leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf(_))
    }

    /// Whether this node is a branch.
    pub fn is_branch(&self) -> bool {
        matches!(self, Self::Branch(_))
    }

    /// The pattern string, when this node is a leaf.
    pub fn pattern(&self) -> Option<&str> {
        match self {
            Self::Leaf(pattern) => Some(pattern),
            Self::Branch(_) => None,
        }
    }

    /// Looks up a sub-command by exact word.
    pub fn get(&self, word: &str) -> Option<&CommandTree> {
        match self {
            Self::Leaf(_) => None,
            Self::Branch(children) => children.get(word),
        }
    }

    /// Collects every leaf as `(command path, pattern)`, where the path is
    /// the space-joined sub-command words leading to the leaf (empty for a
    /// root leaf).
    pub fn leaves(&self) -> Vec<(String, &str)> {
        let mut out = Vec::new();
        self.collect_leaves(String::new(), &mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, path: String, out: &mut Vec<(String, &'a str)>) {
        match self {
            Self::Leaf(pattern) => out.push((path, pattern)),
            Self::Branch(children) => {
                for (word, child) in children {
                    let child_path = if path.is_empty() {
                        word.clone()
                    } else {
                        format!("{path} {word}")
                    };
                    child.collect_leaves(child_path, out);
                }
            }
        }
    }
}
