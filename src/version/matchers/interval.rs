//! Interval notation shared by Maven and NuGet
//!
//! - `[1.0]` - exactly 1.0
//! - `[1.0,2.0)` - 1.0 <= v < 2.0
//! - `(,1.0]` - v <= 1.0
//! - `[1.2,)` - v >= 1.2
//! - `(,1.0],[1.2,)` - several intervals, any of which may match
//!
//! A version outside brackets means an exact match for Maven and a minimum
//! version for NuGet.

use crate::version::range::{Comparator, Constraint, RangeSpec};
use crate::version::types::VersionKey;

/// How a version written without brackets is read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BareVersion {
    Exact,
    AtLeast,
}

pub fn parse_intervals<F>(expression: &str, bare: BareVersion, parse_key: F) -> Option<RangeSpec>
where
    F: Fn(&str) -> Option<VersionKey>,
{
    let expression = expression.trim();
    if expression.is_empty() {
        return None;
    }

    if !expression.starts_with(['[', '(']) {
        let comparator = match bare {
            BareVersion::Exact => Comparator::Eq,
            BareVersion::AtLeast => Comparator::Ge,
        };
        let key = parse_key(expression)?;
        return Some(RangeSpec::all_of(vec![Constraint::new(comparator, key)]));
    }

    let mut alternatives = Vec::new();
    let mut rest = expression;
    while !rest.is_empty() {
        let open = rest.chars().next()?;
        let close_at = rest.find([']', ')'])?;
        let close = rest[close_at..].chars().next()?;
        alternatives.push(parse_interval(open, &rest[1..close_at], close, &parse_key)?);

        rest = rest[close_at + 1..].trim_start();
        if let Some(next) = rest.strip_prefix(',') {
            rest = next.trim_start();
            if rest.is_empty() {
                return None;
            }
        }
        if !rest.is_empty() && !rest.starts_with(['[', '(']) {
            return None;
        }
    }
    Some(RangeSpec::AnyOf(alternatives))
}

fn parse_interval<F>(open: char, body: &str, close: char, parse_key: &F) -> Option<Vec<Constraint>>
where
    F: Fn(&str) -> Option<VersionKey>,
{
    let inclusive_lower = match open {
        '[' => true,
        '(' => false,
        _ => return None,
    };
    let inclusive_upper = close == ']';

    let Some((lower, upper)) = body.split_once(',') else {
        // `[1.0]` pins a single version
        if !(inclusive_lower && inclusive_upper) {
            return None;
        }
        return Some(vec![Constraint::new(
            Comparator::Eq,
            parse_key(body.trim())?,
        )]);
    };
    let (lower, upper) = (lower.trim(), upper.trim());

    let mut constraints = Vec::new();
    if !lower.is_empty() {
        let comparator = if inclusive_lower {
            Comparator::Ge
        } else {
            Comparator::Gt
        };
        constraints.push(Constraint::new(comparator, parse_key(lower)?));
    }
    if !upper.is_empty() {
        let comparator = if inclusive_upper {
            Comparator::Le
        } else {
            Comparator::Lt
        };
        constraints.push(Constraint::new(comparator, parse_key(upper)?));
    }
    Some(constraints)
}
