//! `vers:` version range specifiers
//!
//! `vers:<scheme>/<constraint>|<constraint>|...` where each constraint is an
//! optional comparator followed by a version, or `*` for every version.
//! Containment follows the vers algorithm: equality pins and exclusions are
//! checked first, the remaining bounds are sorted and read as consecutive
//! intervals. The RPM and generic schemes use the constraint list (without
//! the `vers:` prefix) as their native grammar.

use crate::version::error::VersionError;
use crate::version::range::{Comparator, Constraint, RangeSpec, VersionRange};
use crate::version::scheme::Scheme;
use crate::version::types::VersionKey;

/// Parse a full `vers:` URI
pub fn parse_vers(vers: &str) -> Result<VersionRange, VersionError> {
    let invalid = || VersionError::InvalidRange {
        scheme: Scheme::Generic,
        input: vers.to_string(),
    };

    let vers = vers.trim();
    let rest = vers.strip_prefix("vers:").ok_or_else(invalid)?;
    let (scheme, constraints) = rest.split_once('/').ok_or_else(invalid)?;
    let scheme: Scheme = scheme.trim().parse()?;
    let constraints = constraints.trim();

    let spec = parse_constraints(constraints, |v| scheme.matcher().parse_key(v)).ok_or_else(|| {
        VersionError::InvalidRange {
            scheme,
            input: vers.to_string(),
        }
    })?;

    Ok(VersionRange::new(scheme, vers, spec))
}

/// Parse a `|`-separated constraint list into the canonical range form
pub fn parse_constraints<F>(constraints: &str, parse_key: F) -> Option<RangeSpec>
where
    F: Fn(&str) -> Option<VersionKey>,
{
    let constraints = constraints.trim();
    if constraints.is_empty() {
        return None;
    }
    if constraints == "*" {
        return Some(RangeSpec::any());
    }

    let parsed: Option<Vec<Constraint>> = constraints
        .split('|')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(|c| {
            let (comparator, version) = Comparator::split_prefix(c);
            parse_key(version).map(|key| Constraint::new(comparator, key))
        })
        .collect();

    let parsed = parsed?;
    if parsed.is_empty() {
        return None;
    }
    Some(to_alternatives(parsed))
}

/// Convert a vers constraint list into alternatives of ANDed constraints
fn to_alternatives(constraints: Vec<Constraint>) -> RangeSpec {
    let (pins, rest): (Vec<Constraint>, Vec<Constraint>) = constraints
        .into_iter()
        .partition(|c| c.comparator == Comparator::Eq);
    let (exclusions, mut bounds): (Vec<Constraint>, Vec<Constraint>) = rest
        .into_iter()
        .partition(|c| c.comparator == Comparator::Ne);
    bounds.sort_by(|a, b| a.version.cmp(&b.version));

    let mut alternatives: Vec<Vec<Constraint>> = pins.into_iter().map(|pin| vec![pin]).collect();

    let mut intervals: Vec<Vec<Constraint>> = Vec::new();
    match bounds.as_slice() {
        [] => {
            // Only exclusions: everything except the excluded versions
            if !exclusions.is_empty() {
                intervals.push(Vec::new());
            }
        }
        [single] => intervals.push(vec![single.clone()]),
        _ => {
            let last = bounds.len() - 2;
            for (i, pair) in bounds.windows(2).enumerate() {
                let (current, next) = (&pair[0], &pair[1]);
                if i == 0 && current.comparator.is_upper_bound() {
                    intervals.push(vec![current.clone()]);
                }
                if i == last && next.comparator.is_lower_bound() {
                    intervals.push(vec![next.clone()]);
                }
                if current.comparator.is_lower_bound() && next.comparator.is_upper_bound() {
                    intervals.push(vec![current.clone(), next.clone()]);
                }
            }
        }
    }

    for mut interval in intervals {
        interval.extend(exclusions.iter().cloned());
        alternatives.push(interval);
    }

    RangeSpec::AnyOf(alternatives)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::types::Version;
    use rstest::rstest;

    fn contains(range: &VersionRange, v: &str) -> bool {
        range.contains(&Version::parse(range.scheme(), v).unwrap())
    }

    #[rstest]
    #[case("vers:npm/>=1.0.0|<2.0.0", "1.5.0", true)]
    #[case("vers:npm/>=1.0.0|<2.0.0", "2.0.0", false)]
    #[case("vers:npm/>=1.0.0|<2.0.0", "0.9.0", false)]
    // Disjoint intervals
    #[case("vers:npm/<1.0.0|>=2.0.0|<2.5.0|>=3.0.0", "0.5.0", true)]
    #[case("vers:npm/<1.0.0|>=2.0.0|<2.5.0|>=3.0.0", "1.5.0", false)]
    #[case("vers:npm/<1.0.0|>=2.0.0|<2.5.0|>=3.0.0", "2.1.0", true)]
    #[case("vers:npm/<1.0.0|>=2.0.0|<2.5.0|>=3.0.0", "2.7.0", false)]
    #[case("vers:npm/<1.0.0|>=2.0.0|<2.5.0|>=3.0.0", "4.0.0", true)]
    // Order of constraints does not matter
    #[case("vers:npm/<2.0.0|>=1.0.0", "1.5.0", true)]
    // Pins and exclusions
    #[case("vers:pypi/1.0|1.2", "1.2", true)]
    #[case("vers:pypi/1.0|1.2", "1.1", false)]
    #[case("vers:pypi/>=1.0|<2.0|!=1.5", "1.5", false)]
    #[case("vers:pypi/>=1.0|<2.0|!=1.5", "1.6", true)]
    #[case("vers:gem/!=1.0", "1.0", false)]
    #[case("vers:gem/!=1.0", "2.0", true)]
    #[case("vers:generic/*", "whatever1", true)]
    #[case("vers:maven/>=9.0.0.M1|<9.0.0.M3", "9.0.0.M2", true)]
    fn parse_vers_contains_expected(#[case] vers: &str, #[case] v: &str, #[case] expected: bool) {
        let range = parse_vers(vers).unwrap();
        assert_eq!(contains(&range, v), expected);
    }

    #[test]
    fn parse_vers_keeps_uri_as_expression() {
        let range = parse_vers(" vers:golang/>=v1.0.0|<v1.3.0 ").unwrap();
        assert_eq!(range.scheme(), Scheme::Golang);
        assert_eq!(range.expression(), "vers:golang/>=v1.0.0|<v1.3.0");
        assert_eq!(range.to_string(), "vers:golang/>=v1.0.0|<v1.3.0");
    }

    #[rstest]
    #[case("npm/>=1.0.0")]
    #[case("vers:npm")]
    #[case("vers:npm/")]
    #[case("vers:npm/>=banana")]
    fn parse_vers_rejects_malformed_input(#[case] vers: &str) {
        assert!(matches!(
            parse_vers(vers),
            Err(VersionError::InvalidRange { .. })
        ));
    }

    #[test]
    fn parse_vers_rejects_unknown_scheme() {
        assert_eq!(
            parse_vers("vers:hackage/>=1.0"),
            Err(VersionError::UnsupportedScheme("hackage".to_string()))
        );
    }
}
