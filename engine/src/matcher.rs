//! Pattern matcher: token list × constraint tree → bindings.
//!
//! Matching runs in two phases. The presence scan classifies every token
//! as a known flag (consuming the next token when the flag declares a
//! value) or as the single positional candidate, converting raw values
//! through the type registry as it goes. Constraint evaluation then walks
//! the tree, deciding for each node whether it holds and which of the
//! present tokens it *claims*. A match succeeds only when the root holds
//! and every present token is claimed by a satisfied branch: `-b` alone
//! does not satisfy `[-a {-b -c}|-d]` even though the at-most-one pair is
//! formally content with both sides absent, because nothing in the
//! pattern can use a lone `-b`.
//!
//! Flag recognition is order-independent; evaluation is left-to-right and
//! the first unsatisfied constraint is the one reported.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use usage_pattern_core::{ArgValue, Bindings, Constraint, TypeRegistry};

use crate::error::{Mismatch, UsageError};

/// Matches a token list against a compiled constraint tree.
///
/// # Examples
///
/// ```
/// use usage_pattern_core::TypeRegistry;
/// use usage_pattern_engine::{compile, match_tokens};
///
/// let registry = TypeRegistry::new();
/// let tree = compile("-a <INT> <filename>", &registry).unwrap();
///
/// let tokens: Vec<String> = ["-a", "5", "report.txt"]
///     .into_iter()
///     .map(String::from)
///     .collect();
/// let bindings = match_tokens(&tree, &tokens, &registry).unwrap();
/// assert_eq!(bindings.value_of("a").and_then(|v| v.as_int()), Some(5));
/// assert_eq!(
///     bindings.positional().and_then(|v| v.as_str()),
///     Some("report.txt")
/// );
/// ```
pub fn match_tokens(
    constraint: &Constraint,
    tokens: &[String],
    registry: &TypeRegistry,
) -> Result<Bindings, UsageError> {
    let scan = scan_presence(constraint, tokens)?;
    debug!(flags = ?scan.flags, positional = ?scan.positional, "presence scan complete");

    let (values, positional_value) = convert_values(constraint, &scan, registry)?;

    let (holds, claims) = evaluate(constraint, &scan);
    if !holds {
        return Err(UsageError::mismatch(failure_reason(constraint, &scan), tokens));
    }

    for (name, _) in &scan.flags {
        if !claims.flags.contains(name) {
            return Err(UsageError::mismatch(
                Mismatch::UnclaimedFlag(name.clone()),
                tokens,
            ));
        }
    }
    if let Some(raw) = &scan.positional {
        if !claims.positional {
            return Err(UsageError::mismatch(
                Mismatch::UnexpectedPositional(raw.clone()),
                tokens,
            ));
        }
    }

    let mut bindings = Bindings::new();
    for (name, _) in &scan.flags {
        match values.get(name) {
            Some(value) => bindings.insert_value(name.clone(), value.clone()),
            None => bindings.insert_present(name.clone()),
        }
    }
    if let Some(value) = positional_value {
        bindings.set_positional(value);
    }
    Ok(bindings)
}

/// What the presence scan saw: flags with their raw values, in scan
/// order, plus the single positional candidate.
struct PresenceScan {
    flags: Vec<(String, Option<String>)>,
    names: HashSet<String>,
    positional: Option<String>,
}

impl PresenceScan {
    fn has(&self, name: &str) -> bool {
        self.names.contains(name)
    }
}

fn scan_presence(constraint: &Constraint, tokens: &[String]) -> Result<PresenceScan, UsageError> {
    let table: HashMap<&str, Option<&str>> = constraint.flag_terms().into_iter().collect();
    let positional_tag = constraint.positional_tag();

    let mut scan = PresenceScan {
        flags: Vec::new(),
        names: HashSet::new(),
        positional: None,
    };

    let mut cursor = 0;
    while cursor < tokens.len() {
        let token = &tokens[cursor];
        if let Some(name) = token.strip_prefix('-') {
            let Some(declared) = table.get(name) else {
                return Err(UsageError::mismatch(
                    Mismatch::UnknownFlag(token.clone()),
                    tokens,
                ));
            };
            if !scan.names.insert(name.to_string()) {
                return Err(UsageError::mismatch(
                    Mismatch::DuplicateFlag(name.to_string()),
                    tokens,
                ));
            }
            let raw = if declared.is_some() {
                cursor += 1;
                match tokens.get(cursor) {
                    Some(value) => Some(value.clone()),
                    None => {
                        return Err(UsageError::mismatch(
                            Mismatch::MissingArgument(name.to_string()),
                            tokens,
                        ));
                    }
                }
            } else {
                None
            };
            scan.flags.push((name.to_string(), raw));
        } else {
            if positional_tag.is_none() || scan.positional.is_some() {
                return Err(UsageError::mismatch(
                    Mismatch::UnexpectedPositional(token.clone()),
                    tokens,
                ));
            }
            scan.positional = Some(token.clone());
        }
        cursor += 1;
    }

    Ok(scan)
}

/// Converts every raw value through the registry, in scan order, so the
/// first offending occurrence is the one reported.
fn convert_values(
    constraint: &Constraint,
    scan: &PresenceScan,
    registry: &TypeRegistry,
) -> Result<(HashMap<String, ArgValue>, Option<ArgValue>), UsageError> {
    let table: HashMap<&str, Option<&str>> = constraint.flag_terms().into_iter().collect();

    let mut values = HashMap::new();
    for (name, raw) in &scan.flags {
        let (Some(raw), Some(Some(tag))) = (raw, table.get(name.as_str())) else {
            continue;
        };
        let value = registry
            .validate(tag, raw)
            .map_err(|err| UsageError::TypeValidation {
                name: name.clone(),
                raw: err.raw,
                expected: err.expected,
            })?;
        values.insert(name.clone(), value);
    }

    let positional_value = match (&scan.positional, constraint.positional_tag()) {
        (Some(raw), Some(tag)) => Some(registry.validate(tag, raw).map_err(|err| {
            UsageError::TypeValidation {
                name: format!("<{tag}>"),
                raw: err.raw,
                expected: err.expected,
            }
        })?),
        _ => None,
    };

    Ok((values, positional_value))
}

/// Tokens accounted for by a satisfied subtree.
#[derive(Debug, Default)]
struct Claims {
    flags: HashSet<String>,
    positional: bool,
}

impl Claims {
    fn absorb(&mut self, other: Claims) {
        self.flags.extend(other.flags);
        self.positional |= other.positional;
    }
}

/// Evaluates a node against the presence set, yielding whether it holds
/// and which present tokens it claims. A node that does not hold claims
/// nothing.
fn evaluate(node: &Constraint, scan: &PresenceScan) -> (bool, Claims) {
    match node {
        Constraint::Flag { name, .. } => {
            let held = scan.has(name);
            let mut claims = Claims::default();
            if held {
                claims.flags.insert(name.clone());
            }
            (held, claims)
        }
        Constraint::Positional { .. } => {
            let held = scan.positional.is_some();
            (
                held,
                Claims {
                    positional: held,
                    ..Claims::default()
                },
            )
        }
        Constraint::All(children) => {
            let mut claims = Claims::default();
            let mut holds = true;
            for child in children {
                let (child_holds, child_claims) = evaluate(child, scan);
                holds &= child_holds;
                claims.absorb(child_claims);
            }
            if holds { (true, claims) } else { (false, Claims::default()) }
        }
        Constraint::Any(children) => {
            let mut claims = Claims::default();
            let mut holds = false;
            for child in children {
                let (child_holds, child_claims) = evaluate(child, scan);
                if child_holds {
                    holds = true;
                    claims.absorb(child_claims);
                }
            }
            (holds, claims)
        }
        Constraint::ExactlyOne(left, right) => {
            let (left_holds, left_claims) = evaluate(left, scan);
            let (right_holds, right_claims) = evaluate(right, scan);
            match (left_holds, right_holds) {
                (true, false) => (true, left_claims),
                (false, true) => (true, right_claims),
                _ => (false, Claims::default()),
            }
        }
        Constraint::AtMostOne(left, right) => {
            let (left_holds, left_claims) = evaluate(left, scan);
            let (right_holds, right_claims) = evaluate(right, scan);
            match (left_holds, right_holds) {
                (true, true) => (false, Claims::default()),
                (true, false) => (true, left_claims),
                (false, true) => (true, right_claims),
                (false, false) => (true, Claims::default()),
            }
        }
    }
}

/// Names the first unsatisfied constraint, left to right. Precondition:
/// `node` does not hold.
fn failure_reason(node: &Constraint, scan: &PresenceScan) -> Mismatch {
    match node {
        Constraint::Flag { .. } | Constraint::Positional { .. } | Constraint::Any(_) => {
            Mismatch::Unsatisfied(node.to_string())
        }
        Constraint::All(children) => children
            .iter()
            .find(|child| !evaluate(child, scan).0)
            .map(|child| failure_reason(child, scan))
            .unwrap_or_else(|| Mismatch::Unsatisfied(node.to_string())),
        Constraint::ExactlyOne(left, right) => {
            if evaluate(left, scan).0 && evaluate(right, scan).0 {
                Mismatch::ForbiddenCombination(node.to_string())
            } else {
                Mismatch::Unsatisfied(node.to_string())
            }
        }
        Constraint::AtMostOne(..) => Mismatch::ForbiddenCombination(node.to_string()),
    }
}
