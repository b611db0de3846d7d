//! The compiled constraint tree.
//!
//! A pattern string compiles into one [`Constraint`]: flag and positional
//! leaves combined by the four presence combinators. The variant names keep
//! the two alternation flavors apart: [`Constraint::ExactlyOne`] excludes
//! "neither", [`Constraint::AtMostOne`] permits it.
//!
//! `Display` renders a node back into pattern syntax, which is how failed
//! constraints are quoted in usage errors.

use std::fmt;

/// One node of a compiled usage pattern.
///
/// # Examples
///
/// ```
/// use usage_pattern_core::Constraint;
///
/// let tree = Constraint::exactly_one(
///     Constraint::flag("a"),
///     Constraint::flag_with_value("b", "INT"),
/// );
/// assert_eq!(tree.to_string(), "{-a|-b <INT>}");
/// assert_eq!(tree.flag_terms(), vec![("a", None), ("b", Some("INT"))]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    /// Flag `name` is present, optionally followed by one value of the
    /// named type tag.
    Flag {
        name: String,
        value: Option<String>,
    },
    /// The single unlabeled trailing value.
    Positional { value: String },
    /// All children must hold (two or more).
    All(Vec<Constraint>),
    /// At least one child must hold (two or more, inclusive).
    Any(Vec<Constraint>),
    /// Exactly one side holds; both or neither is a failure.
    ExactlyOne(Box<Constraint>, Box<Constraint>),
    /// At most one side holds; both is a failure, neither is fine.
    AtMostOne(Box<Constraint>, Box<Constraint>),
}

impl Constraint {
    /// A flag term with no value.
    pub fn flag(name: impl Into<String>) -> Self {
        Self::Flag {
            name: name.into(),
            value: None,
        }
    }

    /// A flag term carrying a typed value.
    pub fn flag_with_value(name: impl Into<String>, tag: impl Into<String>) -> Self {
        Self::Flag {
            name: name.into(),
            value: Some(tag.into()),
        }
    }

    /// The positional term.
    pub fn positional(tag: impl Into<String>) -> Self {
        Self::Positional { value: tag.into() }
    }

    /// An AND group.
    pub fn all(children: Vec<Constraint>) -> Self {
        Self::All(children)
    }

    /// An inclusive-OR group.
    pub fn any(children: Vec<Constraint>) -> Self {
        Self::Any(children)
    }

    /// An exclusive pair.
    pub fn exactly_one(left: Constraint, right: Constraint) -> Self {
        Self::ExactlyOne(Box::new(left), Box::new(right))
    }

    /// An incompatible pair.
    pub fn at_most_one(left: Constraint, right: Constraint) -> Self {
        Self::AtMostOne(Box::new(left), Box::new(right))
    }

    /// Collects every flag term as `(name, value tag)`, in syntactic
    /// order.
    pub fn flag_terms(&self) -> Vec<(&str, Option<&str>)> {
        let mut terms = Vec::new();
        self.collect_flags(&mut terms);
        terms
    }

    fn collect_flags<'a>(&'a self, terms: &mut Vec<(&'a str, Option<&'a str>)>) {
        match self {
            Self::Flag { name, value } => terms.push((name, value.as_deref())),
            Self::Positional { .. } => {}
            Self::All(children) | Self::Any(children) => {
                for child in children {
                    child.collect_flags(terms);
                }
            }
            Self::ExactlyOne(left, right) | Self::AtMostOne(left, right) => {
                left.collect_flags(terms);
                right.collect_flags(terms);
            }
        }
    }

    /// The positional term's type tag, if the tree has one.
    pub fn positional_tag(&self) -> Option<&str> {
        match self {
            Self::Flag { .. } => None,
            Self::Positional { value } => Some(value),
            Self::All(children) | Self::Any(children) => {
                children.iter().find_map(Self::positional_tag)
            }
            Self::ExactlyOne(left, right) | Self::AtMostOne(left, right) => {
                left.positional_tag().or_else(|| right.positional_tag())
            }
        }
    }
}

#[derive(Clone, Copy)]
enum GroupKind {
    Brace,
    Bracket,
}

/// Renders an alternation side without re-wrapping a count group that the
/// enclosing bracket pair already expresses.
fn alternation_side(side: &Constraint, kind: GroupKind) -> String {
    let unwrapped = match (kind, side) {
        (GroupKind::Brace, Constraint::All(children))
        | (GroupKind::Bracket, Constraint::Any(children)) => Some(children),
        _ => None,
    };
    match unwrapped {
        Some(children) => children
            .iter()
            .map(Constraint::to_string)
            .collect::<Vec<_>>()
            .join(" "),
        None => side.to_string(),
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag { name, value: None } => write!(f, "-{name}"),
            Self::Flag {
                name,
                value: Some(tag),
            } => write!(f, "-{name} <{tag}>"),
            Self::Positional { value } => write!(f, "<{value}>"),
            Self::All(children) => {
                write!(f, "{{")?;
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{child}")?;
                }
                write!(f, "}}")
            }
            Self::Any(children) => {
                write!(f, "[")?;
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{child}")?;
                }
                write!(f, "]")
            }
            Self::ExactlyOne(left, right) => write!(
                f,
                "{{{}|{}}}",
                alternation_side(left, GroupKind::Brace),
                alternation_side(right, GroupKind::Brace)
            ),
            Self::AtMostOne(left, right) => write!(
                f,
                "[{}|{}]",
                alternation_side(left, GroupKind::Bracket),
                alternation_side(right, GroupKind::Bracket)
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_leaves() {
        assert_eq!(Constraint::flag("a").to_string(), "-a");
        assert_eq!(
            Constraint::flag_with_value("n", "INT").to_string(),
            "-n <INT>"
        );
        assert_eq!(Constraint::positional("filename").to_string(), "<filename>");
    }

    #[test]
    fn test_display_groups() {
        let and = Constraint::all(vec![Constraint::flag("a"), Constraint::flag("b")]);
        assert_eq!(and.to_string(), "{-a -b}");

        let or = Constraint::any(vec![Constraint::flag("a"), Constraint::flag("b")]);
        assert_eq!(or.to_string(), "[-a -b]");

        let xor = Constraint::exactly_one(Constraint::flag("a"), Constraint::flag("b"));
        assert_eq!(xor.to_string(), "{-a|-b}");

        let nand = Constraint::at_most_one(Constraint::flag("a"), Constraint::flag("b"));
        assert_eq!(nand.to_string(), "[-a|-b]");
    }

    #[test]
    fn test_display_unwraps_alternation_sides() {
        // [-a {-b -c}|-d] renders exactly as written: the Any side of the
        // bracket alternation is not re-wrapped in a second bracket pair.
        let tree = Constraint::at_most_one(
            Constraint::any(vec![
                Constraint::flag("a"),
                Constraint::all(vec![Constraint::flag("b"), Constraint::flag("c")]),
            ]),
            Constraint::flag("d"),
        );
        assert_eq!(tree.to_string(), "[-a {-b -c}|-d]");
    }

    #[test]
    fn test_flag_terms_in_syntactic_order() {
        let tree = Constraint::all(vec![
            Constraint::exactly_one(Constraint::flag("u"), Constraint::flag("d")),
            Constraint::flag_with_value("n", "INT"),
            Constraint::positional("file"),
        ]);
        assert_eq!(
            tree.flag_terms(),
            vec![("u", None), ("d", None), ("n", Some("INT"))]
        );
        assert_eq!(tree.positional_tag(), Some("file"));
    }
}
