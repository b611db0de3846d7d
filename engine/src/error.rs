//! Error types for pattern compilation and matching.
//!
//! Two failure classes, kept strictly apart: [`GrammarError`] means the
//! *author's* configuration is broken and startup must abort;
//! [`UsageError`] means the *user's* invocation did not fit and is
//! reported once per run, first problem only.

use thiserror::Error;

use usage_pattern_core::TreeError;

/// A pattern string or command tree is structurally invalid.
///
/// Always a configuration-time defect: detected once when the engine is
/// built, never recoverable at run time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    /// The pattern string is empty or whitespace-only.
    #[error("pattern is empty")]
    EmptyPattern,
    /// A group was opened but never closed.
    #[error("unclosed group opened with {0:?}")]
    UnclosedGroup(char),
    /// A group was closed with the wrong bracket kind.
    #[error("mismatched group: expected {expected:?}, found {found:?}")]
    MismatchedGroup { expected: char, found: char },
    /// A closing bracket or other stray character appeared outside any
    /// group.
    #[error("unexpected {0:?} in pattern")]
    UnexpectedCharacter(char),
    /// A group contains nothing.
    #[error("empty group")]
    EmptyGroup,
    /// A group contains a single term; groups combine two or more.
    #[error("group must contain at least two terms or an alternation")]
    LoneTerm,
    /// One side of a `|` is empty.
    #[error("empty alternation branch")]
    EmptyAlternation,
    /// Alternation is strictly pairwise.
    #[error("alternation must have exactly two branches, found {0}")]
    AlternationArity(usize),
    /// A `|` outside any group has no bracket kind to select its flavor.
    #[error("alternation outside a group has no bracket kind")]
    UnscopedAlternation,
    /// A token starting with `-` is not a valid flag.
    #[error("malformed flag token {0:?}")]
    MalformedFlag(String),
    /// A `<` was never closed with `>`.
    #[error("unclosed type tag")]
    UnclosedTag,
    /// A type tag is empty or not a word.
    #[error("malformed type tag {0:?}")]
    MalformedTag(String),
    /// An all-uppercase tag is not registered.
    #[error("unknown type tag <{0}>")]
    UnknownTag(String),
    /// The same flag appears twice in one pattern.
    #[error("flag -{0} appears more than once in the pattern")]
    DuplicateFlag(String),
    /// Only one positional value is allowed per pattern.
    #[error("only one positional value is allowed per pattern")]
    SecondPositional,
    /// The positional must be the last term of the pattern.
    #[error("positional <{0}> must be the last term in the pattern")]
    PositionalNotLast(String),
    /// The command tree itself is structurally invalid.
    #[error("invalid command tree: {0}")]
    InvalidTree(#[from] TreeError),
    /// A leaf pattern failed to compile; carries the command path for
    /// context.
    #[error("invalid pattern {pattern:?} for command '{path}': {reason}")]
    InvalidPattern {
        path: String,
        pattern: String,
        reason: Box<GrammarError>,
    },
}

/// Why a token list failed the pattern.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Mismatch {
    /// The quoted constraint did not hold.
    #[error("unsatisfied constraint {0}")]
    Unsatisfied(String),
    /// Both sides of the quoted alternation were given.
    #[error("forbidden combination {0}")]
    ForbiddenCombination(String),
    /// A token looks like a flag but matches nothing in the pattern.
    #[error("unknown flag {0:?}")]
    UnknownFlag(String),
    /// The same flag was given twice.
    #[error("duplicate flag -{0}")]
    DuplicateFlag(String),
    /// A flag that declares a value was given as the last token.
    #[error("flag -{0} expects a value")]
    MissingArgument(String),
    /// More bare values than the pattern can consume.
    #[error("too many positional arguments ({0:?})")]
    UnexpectedPositional(String),
    /// The flag was given but no satisfied part of the pattern can use
    /// it.
    #[error("flag -{0} is not valid in this combination")]
    UnclaimedFlag(String),
}

/// A single invocation failed; surfaced to the end user.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UsageError {
    /// A leading token matched no branch of the command tree.
    #[error("unknown command {word:?} after '{path}'")]
    UnknownCommand { path: String, word: String },
    /// The command tree expected a further sub-command.
    #[error("expected a sub-command after '{path}'")]
    MissingCommand { path: String },
    /// The remaining tokens did not satisfy the selected pattern.
    #[error("{reason}; received: {}", .received.join(" "))]
    PatternMismatch {
        reason: Mismatch,
        received: Vec<String>,
    },
    /// A present value failed conversion against its declared type.
    #[error("invalid value {raw:?} for {name}: expected {expected}")]
    TypeValidation {
        name: String,
        raw: String,
        expected: String,
    },
}

impl UsageError {
    pub(crate) fn mismatch(reason: Mismatch, received: &[String]) -> Self {
        Self::PatternMismatch {
            reason,
            received: received.to_vec(),
        }
    }
}
