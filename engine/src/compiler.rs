//! Pattern compiler: pattern string → constraint tree.
//!
//! The pattern language combines flag terms (`-a`, `-n <INT>`), one
//! trailing positional (`<FILE>`, `<filename>`), and nested groups:
//!
//! - `{-a -b}` — all of
//! - `[-a -b]` — at least one of
//! - `{-a|-b}` — exactly one of (strictly two sides)
//! - `[-a|-b]` — at most one of (strictly two sides)
//!
//! Within one group `|` binds loosest: `[-a {-b -c}|-d]` is the at-most-one
//! pair of `-a {-b -c}` (itself an at-least-one list, from the bracket
//! kind) against `-d`. The outer pattern string is an implicit all-of list
//! of its top-level terms; a `|` at top level has no bracket kind and is
//! rejected.
//!
//! Compilation is a single left-to-right pass; every structural mistake is
//! a [`GrammarError`], reported at configuration load rather than at match
//! time.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use usage_pattern_core::{Constraint, TypeRegistry};

use crate::error::GrammarError;

/// Token shapes. Single-character flag words and word-shaped type tags.
static FLAG_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-[A-Za-z0-9]$").expect("static regex must compile"));
static TAG_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_]*$").expect("static regex must compile"));

/// Compiles a pattern string against a type registry.
///
/// # Examples
///
/// ```
/// use usage_pattern_core::{Constraint, TypeRegistry};
/// use usage_pattern_engine::compile;
///
/// let registry = TypeRegistry::new();
/// let tree = compile("{-a|-b} <path>", &registry).unwrap();
/// assert_eq!(
///     tree,
///     Constraint::all(vec![
///         Constraint::exactly_one(Constraint::flag("a"), Constraint::flag("b")),
///         Constraint::positional("path"),
///     ])
/// );
///
/// // Compilation is idempotent.
/// assert_eq!(compile("{-a|-b} <path>", &registry).unwrap(), tree);
/// ```
pub fn compile(pattern: &str, registry: &TypeRegistry) -> Result<Constraint, GrammarError> {
    if pattern.trim().is_empty() {
        return Err(GrammarError::EmptyPattern);
    }

    let mut parser = Parser {
        chars: pattern.chars().collect(),
        pos: 0,
        registry,
        flags_seen: HashSet::new(),
        positional_seen: None,
    };
    let root = parser.parse_expr(Scope::Top)?;
    debug!(pattern, compiled = %root, "compiled usage pattern");
    Ok(root)
}

/// Where an expression lives: the bracket kind decides which combinators
/// its separators denote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    Top,
    Brace,
    Bracket,
}

impl Scope {
    fn closer(self) -> Option<char> {
        match self {
            Self::Top => None,
            Self::Brace => Some('}'),
            Self::Bracket => Some(']'),
        }
    }

    fn opener(self) -> char {
        match self {
            Self::Top | Self::Brace => '{',
            Self::Bracket => '[',
        }
    }
}

struct Parser<'r> {
    chars: Vec<char>,
    pos: usize,
    registry: &'r TypeRegistry,
    flags_seen: HashSet<String>,
    /// Tag of the positional once seen; any term after it is an error.
    positional_seen: Option<String>,
}

impl Parser<'_> {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    fn skip_spaces(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    /// Parses one expression until the scope's closing bracket (or end of
    /// input at top level) and assembles it into a single constraint.
    fn parse_expr(&mut self, scope: Scope) -> Result<Constraint, GrammarError> {
        // Sides of the (at most binary) alternation; terms accumulate in
        // the last side.
        let mut sides: Vec<Vec<Constraint>> = vec![Vec::new()];

        loop {
            self.skip_spaces();
            let Some(c) = self.peek() else {
                if scope != Scope::Top {
                    return Err(GrammarError::UnclosedGroup(scope.opener()));
                }
                break;
            };
            match c {
                '}' | ']' => {
                    let Some(expected) = scope.closer() else {
                        return Err(GrammarError::UnexpectedCharacter(c));
                    };
                    if c != expected {
                        return Err(GrammarError::MismatchedGroup { expected, found: c });
                    }
                    self.advance();
                    break;
                }
                '|' => {
                    self.advance();
                    if sides.last().is_none_or(Vec::is_empty) {
                        return Err(GrammarError::EmptyAlternation);
                    }
                    sides.push(Vec::new());
                }
                '{' => {
                    self.advance();
                    let group = self.parse_expr(Scope::Brace)?;
                    self.push_term(&mut sides, group)?;
                }
                '[' => {
                    self.advance();
                    let group = self.parse_expr(Scope::Bracket)?;
                    self.push_term(&mut sides, group)?;
                }
                '-' => {
                    let flag = self.parse_flag()?;
                    self.push_term(&mut sides, flag)?;
                }
                '<' => {
                    let tag = self.parse_tag()?;
                    self.place_tag(&mut sides, tag)?;
                }
                other => return Err(GrammarError::UnexpectedCharacter(other)),
            }
        }

        assemble(scope, sides)
    }

    /// Appends a term to the current alternation side, enforcing that
    /// nothing follows the positional.
    fn push_term(
        &mut self,
        sides: &mut [Vec<Constraint>],
        term: Constraint,
    ) -> Result<(), GrammarError> {
        if let Some(tag) = &self.positional_seen {
            return Err(GrammarError::PositionalNotLast(tag.clone()));
        }
        if let Some(side) = sides.last_mut() {
            side.push(term);
        }
        Ok(())
    }

    /// A tag directly after an untyped flag term types that flag; any
    /// other tag is the positional.
    fn place_tag(&mut self, sides: &mut [Vec<Constraint>], tag: String) -> Result<(), GrammarError> {
        if let Some(Constraint::Flag {
            value: value @ None,
            ..
        }) = sides.last_mut().and_then(|side| side.last_mut())
        {
            *value = Some(tag);
            return Ok(());
        }

        if self.positional_seen.is_some() {
            return Err(GrammarError::SecondPositional);
        }
        let term = Constraint::positional(tag.clone());
        self.push_term(sides, term)?;
        self.positional_seen = Some(tag);
        Ok(())
    }

    fn parse_flag(&mut self) -> Result<Constraint, GrammarError> {
        let start = self.pos;
        self.advance(); // '-'
        while self
            .peek()
            .is_some_and(|c| !c.is_whitespace() && !"|{}[]<>".contains(c))
        {
            self.advance();
        }
        let token: String = self.chars[start..self.pos].iter().collect();
        if !FLAG_TOKEN.is_match(&token) {
            return Err(GrammarError::MalformedFlag(token));
        }

        let name = token[1..].to_string();
        if !self.flags_seen.insert(name.clone()) {
            return Err(GrammarError::DuplicateFlag(name));
        }
        Ok(Constraint::flag(name))
    }

    fn parse_tag(&mut self) -> Result<String, GrammarError> {
        self.advance(); // '<'
        let start = self.pos;
        while self.peek().is_some_and(|c| c != '>') {
            self.advance();
        }
        if self.peek().is_none() {
            return Err(GrammarError::UnclosedTag);
        }
        let tag: String = self.chars[start..self.pos].iter().collect();
        self.advance(); // '>'

        if !TAG_TOKEN.is_match(&tag) {
            return Err(GrammarError::MalformedTag(tag));
        }
        if !self.registry.knows(&tag) {
            return Err(GrammarError::UnknownTag(tag));
        }
        Ok(tag)
    }
}

/// Combines the collected alternation sides into one constraint, applying
/// the scope's bracket kind.
fn assemble(scope: Scope, mut sides: Vec<Vec<Constraint>>) -> Result<Constraint, GrammarError> {
    let piped = sides.len() > 1;
    if sides.last().is_none_or(Vec::is_empty) {
        return Err(match (piped, scope) {
            (true, _) => GrammarError::EmptyAlternation,
            (false, Scope::Top) => GrammarError::EmptyPattern,
            (false, _) => GrammarError::EmptyGroup,
        });
    }

    match sides.len() {
        1 => {
            let side = sides.remove(0);
            build_side(scope, side, true)
        }
        2 => {
            if scope == Scope::Top {
                return Err(GrammarError::UnscopedAlternation);
            }
            let right_terms = sides.pop().unwrap_or_default();
            let left_terms = sides.pop().unwrap_or_default();
            let left = build_side(scope, left_terms, false)?;
            let right = build_side(scope, right_terms, false)?;
            Ok(match scope {
                Scope::Bracket => Constraint::at_most_one(left, right),
                _ => Constraint::exactly_one(left, right),
            })
        }
        n => Err(GrammarError::AlternationArity(n)),
    }
}

/// Builds one alternation side (or a whole unpiped expression when
/// `whole` is set) from its term list.
fn build_side(
    scope: Scope,
    mut terms: Vec<Constraint>,
    whole: bool,
) -> Result<Constraint, GrammarError> {
    match terms.len() {
        0 => Err(GrammarError::EmptyAlternation),
        1 => {
            // A bracketed group around a single bare term combines
            // nothing and is rejected; a single term is fine as a whole
            // top-level pattern or as one alternation side.
            if whole && scope != Scope::Top {
                return Err(GrammarError::LoneTerm);
            }
            terms.pop().ok_or(GrammarError::EmptyAlternation)
        }
        _ => Ok(match scope {
            Scope::Top | Scope::Brace => Constraint::all(terms),
            Scope::Bracket => Constraint::any(terms),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use usage_pattern_core::Constraint as C;

    fn compile_ok(pattern: &str) -> Constraint {
        compile(pattern, &TypeRegistry::new()).expect("pattern should compile")
    }

    fn compile_err(pattern: &str) -> GrammarError {
        compile(pattern, &TypeRegistry::new()).expect_err("pattern should be rejected")
    }

    #[test]
    fn test_single_flag() {
        assert_eq!(compile_ok("-a"), C::flag("a"));
    }

    #[test]
    fn test_top_level_terms_combine_as_all() {
        assert_eq!(
            compile_ok("-a -b"),
            C::all(vec![C::flag("a"), C::flag("b")])
        );
    }

    #[test]
    fn test_group_combinators() {
        assert_eq!(
            compile_ok("{-a -b}"),
            C::all(vec![C::flag("a"), C::flag("b")])
        );
        assert_eq!(
            compile_ok("[-a -b]"),
            C::any(vec![C::flag("a"), C::flag("b")])
        );
        assert_eq!(
            compile_ok("{-a|-b}"),
            C::exactly_one(C::flag("a"), C::flag("b"))
        );
        assert_eq!(
            compile_ok("[-a|-b]"),
            C::at_most_one(C::flag("a"), C::flag("b"))
        );
    }

    #[test]
    fn test_flag_value_binding() {
        assert_eq!(
            compile_ok("-n <INT>"),
            C::flag_with_value("n", "INT")
        );
        // A tag after a typed flag is the positional, not a second value.
        assert_eq!(
            compile_ok("-a <INT> <filename>"),
            C::all(vec![
                C::flag_with_value("a", "INT"),
                C::positional("filename"),
            ])
        );
    }

    #[test]
    fn test_alternation_binds_loosest() {
        assert_eq!(
            compile_ok("[-a {-b -c}|-d]"),
            C::at_most_one(
                C::any(vec![
                    C::flag("a"),
                    C::all(vec![C::flag("b"), C::flag("c")]),
                ]),
                C::flag("d"),
            )
        );
        assert_eq!(
            compile_ok("{-a -b|-c}"),
            C::exactly_one(
                C::all(vec![C::flag("a"), C::flag("b")]),
                C::flag("c"),
            )
        );
    }

    #[test]
    fn test_deep_nesting() {
        assert_eq!(
            compile_ok("{[-a -b]|-c} <PATH>"),
            C::all(vec![
                C::exactly_one(C::any(vec![C::flag("a"), C::flag("b")]), C::flag("c")),
                C::positional("PATH"),
            ])
        );
    }

    #[test]
    fn test_idempotent_compilation() {
        let registry = TypeRegistry::new();
        let first = compile("[-a {-b -c}|-d] <file>", &registry).unwrap();
        let second = compile("[-a {-b -c}|-d] <file>", &registry).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_rejects_empty_pattern() {
        assert_eq!(compile_err(""), GrammarError::EmptyPattern);
        assert_eq!(compile_err("   "), GrammarError::EmptyPattern);
    }

    #[test]
    fn test_rejects_unbalanced_groups() {
        assert_eq!(compile_err("{-a -b"), GrammarError::UnclosedGroup('{'));
        assert_eq!(
            compile_err("{-a -b]"),
            GrammarError::MismatchedGroup {
                expected: '}',
                found: ']',
            }
        );
        assert_eq!(compile_err("-a }"), GrammarError::UnexpectedCharacter('}'));
    }

    #[test]
    fn test_rejects_empty_and_lone_groups() {
        assert_eq!(compile_err("{}"), GrammarError::EmptyGroup);
        assert_eq!(compile_err("{-a}"), GrammarError::LoneTerm);
        assert_eq!(compile_err("[-a]"), GrammarError::LoneTerm);
    }

    #[test]
    fn test_rejects_wide_alternation() {
        assert_eq!(compile_err("{-a|-b|-c}"), GrammarError::AlternationArity(3));
    }

    #[test]
    fn test_rejects_unscoped_alternation() {
        assert_eq!(compile_err("-a|-b"), GrammarError::UnscopedAlternation);
    }

    #[test]
    fn test_rejects_empty_alternation_sides() {
        assert_eq!(compile_err("{-a|}"), GrammarError::EmptyAlternation);
        assert_eq!(compile_err("{|-a}"), GrammarError::EmptyAlternation);
    }

    #[test]
    fn test_rejects_malformed_flags() {
        assert_eq!(
            compile_err("-ab"),
            GrammarError::MalformedFlag("-ab".to_string())
        );
        assert_eq!(compile_err("-"), GrammarError::MalformedFlag("-".to_string()));
        assert_eq!(
            compile_err("--a"),
            GrammarError::MalformedFlag("--a".to_string())
        );
    }

    #[test]
    fn test_rejects_duplicate_flag() {
        assert_eq!(
            compile_err("-a -a"),
            GrammarError::DuplicateFlag("a".to_string())
        );
        assert_eq!(
            compile_err("{-a|-a}"),
            GrammarError::DuplicateFlag("a".to_string())
        );
    }

    #[test]
    fn test_rejects_bad_tags() {
        assert_eq!(
            compile_err("-a <BOGUS>"),
            GrammarError::UnknownTag("BOGUS".to_string())
        );
        assert_eq!(compile_err("-a <INT"), GrammarError::UnclosedTag);
        assert_eq!(
            compile_err("-a <>"),
            GrammarError::MalformedTag(String::new())
        );
    }

    #[test]
    fn test_placeholder_tags_compile() {
        assert_eq!(
            compile_ok("<filename>"),
            C::positional("filename")
        );
    }

    #[test]
    fn test_rejects_misplaced_positionals() {
        assert_eq!(compile_err("<a> <b>"), GrammarError::SecondPositional);
        assert_eq!(
            compile_err("<file> -a"),
            GrammarError::PositionalNotLast("file".to_string())
        );
        assert_eq!(
            compile_err("{<file>|-a}"),
            GrammarError::PositionalNotLast("file".to_string())
        );
    }

    #[test]
    fn test_rejects_stray_characters() {
        assert_eq!(compile_err("-a foo"), GrammarError::UnexpectedCharacter('f'));
        assert_eq!(compile_err("-a >"), GrammarError::UnexpectedCharacter('>'));
    }
}
