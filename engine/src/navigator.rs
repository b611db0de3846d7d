//! Command tree navigator.
//!
//! Walks the branch/leaf tree using the leading tokens to select which
//! pattern applies. Lookup is by exact literal match only: no prefix
//! matching, no case folding. The first token is the script invocation
//! name; it selects the root and is never matched against anything.

use tracing::debug;

use usage_pattern_core::CommandTree;

use crate::error::UsageError;

/// Selects the pattern for a token list, returning the pattern string and
/// the number of tokens consumed (invocation name included).
///
/// # Examples
///
/// ```
/// use usage_pattern_core::CommandTree;
/// use usage_pattern_engine::navigate;
///
/// let tree = CommandTree::branch([
///     ("push", CommandTree::leaf("-f <remote>")),
///     ("pull", CommandTree::leaf("[-q -v]")),
/// ]);
///
/// let tokens: Vec<String> = ["git", "push", "-f", "origin"]
///     .into_iter()
///     .map(String::from)
///     .collect();
/// let (pattern, consumed) = navigate(&tree, &tokens).unwrap();
/// assert_eq!(pattern, "-f <remote>");
/// assert_eq!(consumed, 2);
/// ```
pub fn navigate<'t>(
    tree: &'t CommandTree,
    tokens: &[String],
) -> Result<(&'t str, usize), UsageError> {
    let mut node = tree;
    // The invocation name, when present, is consumed without inspection.
    let mut consumed = usize::from(!tokens.is_empty());

    loop {
        match node {
            CommandTree::Leaf(pattern) => return Ok((pattern.as_str(), consumed)),
            CommandTree::Branch(children) => {
                let path = tokens[..consumed].join(" ");
                let Some(word) = tokens.get(consumed) else {
                    return Err(UsageError::MissingCommand { path });
                };
                match children.get(word.as_str()) {
                    Some(child) => {
                        debug!(word, "descending into sub-command");
                        node = child;
                        consumed += 1;
                    }
                    None => {
                        return Err(UsageError::UnknownCommand {
                            path,
                            word: word.clone(),
                        });
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    fn sample_tree() -> CommandTree {
        CommandTree::branch([
            ("push", CommandTree::leaf("pattern0")),
            ("pull", CommandTree::leaf("pattern1")),
            (
                "remote",
                CommandTree::branch([("add", CommandTree::leaf("pattern2"))]),
            ),
        ])
    }

    #[test]
    fn test_selects_leaf_by_word() {
        let tree = sample_tree();
        let (pattern, consumed) = navigate(&tree, &tokens(&["script", "push", "-a"])).unwrap();
        assert_eq!(pattern, "pattern0");
        assert_eq!(consumed, 2);
    }

    #[test]
    fn test_descends_nested_branches() {
        let tree = sample_tree();
        let (pattern, consumed) =
            navigate(&tree, &tokens(&["script", "remote", "add", "origin"])).unwrap();
        assert_eq!(pattern, "pattern2");
        assert_eq!(consumed, 3);
    }

    #[test]
    fn test_unknown_word_fails() {
        let tree = sample_tree();
        let err = navigate(&tree, &tokens(&["script", "unknown"])).unwrap_err();
        assert_eq!(
            err,
            UsageError::UnknownCommand {
                path: "script".to_string(),
                word: "unknown".to_string(),
            }
        );
    }

    #[test]
    fn test_lookup_is_exact() {
        let tree = sample_tree();
        assert!(navigate(&tree, &tokens(&["script", "pus"])).is_err());
        assert!(navigate(&tree, &tokens(&["script", "PUSH"])).is_err());
    }

    #[test]
    fn test_missing_subcommand_fails() {
        let tree = sample_tree();
        let err = navigate(&tree, &tokens(&["script"])).unwrap_err();
        assert_eq!(
            err,
            UsageError::MissingCommand {
                path: "script".to_string(),
            }
        );
    }

    #[test]
    fn test_root_leaf_consumes_only_script_name() {
        let tree = CommandTree::leaf("-a");
        let (pattern, consumed) = navigate(&tree, &tokens(&["script", "-a"])).unwrap();
        assert_eq!(pattern, "-a");
        assert_eq!(consumed, 1);
    }

    #[test]
    fn test_empty_token_list_on_root_leaf() {
        let tree = CommandTree::leaf("[-a|-b]");
        let (pattern, consumed) = navigate(&tree, &[]).unwrap();
        assert_eq!(pattern, "[-a|-b]");
        assert_eq!(consumed, 0);
    }
}
