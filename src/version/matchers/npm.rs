//! npm version matcher
//!
//! Supports npm semver range specifications:
//! - `1.2.3`, `=1.2.3` - exact match
//! - `^1.2.3` - compatible with version (>=1.2.3 <2.0.0)
//! - `~1.2.3` - approximately equivalent (>=1.2.3 <1.3.0)
//! - `>=1.2.3`, `>1.2.3`, `<=1.2.3`, `<1.2.3` - comparison operators
//! - `1.2.x`, `1.x`, `*` - wildcards
//! - `1.0.0 - 2.0.0` - hyphen ranges
//! - `>=1.0.0 <2.0.0` - space-separated AND, `^1.0.0 || ^2.0.0` - OR
//!
//! Missing parts are wildcards: `1.2` is `1.2.x` and `<=1.2` is `<1.3.0-0`.

use std::sync::LazyLock;

use regex::Regex;

use crate::version::matcher::VersionMatcher;
use crate::version::range::{Comparator, Constraint, RangeSpec};
use crate::version::scheme::Scheme;
use crate::version::semver::{Partial, parse_lenient, parse_wildcard};
use crate::version::types::VersionKey;

pub struct NpmVersionMatcher;

/// `>= 1.2.3` is written `>=1.2.3` before splitting on spaces
static OPERATOR_SPACING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(>=|<=|>|<|=|\^|~)\s+").expect("valid operator pattern"));

pub(crate) fn collapse_operator_spacing(spec: &str) -> String {
    OPERATOR_SPACING.replace_all(spec, "$1").into_owned()
}

/// Parse one `||` alternative: a hyphen range or space-separated comparators
fn parse_alternative(spec: &str) -> Option<Vec<Constraint>> {
    let spec = spec.trim();
    if spec.is_empty() {
        return None;
    }
    if spec == "*" || spec.eq_ignore_ascii_case("x") {
        return Some(Vec::new());
    }

    if let Some(range) = parse_hyphen(spec) {
        return Some(range);
    }

    let mut constraints = Vec::new();
    for part in spec.split_whitespace() {
        constraints.extend(parse_comparator(part)?);
    }
    Some(constraints)
}

/// Parse hyphen range like "1.0.0 - 2.0.0"; a partial upper end covers its whole line
fn parse_hyphen(spec: &str) -> Option<Vec<Constraint>> {
    let (from, to) = spec.split_once(" - ")?;
    let mut constraints = Partial::parse_lenient(from)?.compare(Comparator::Ge)?;
    constraints.extend(Partial::parse_lenient(to)?.compare(Comparator::Le)?);
    Some(constraints)
}

/// Parse a single comparator (no spaces)
fn parse_comparator(spec: &str) -> Option<Vec<Constraint>> {
    if spec == "*" {
        return Some(Vec::new());
    }
    if let Some(rest) = spec.strip_prefix('^') {
        return Partial::parse_lenient(rest)?.caret();
    }
    if let Some(rest) = spec.strip_prefix('~') {
        return Partial::parse_lenient(rest)?.tilde();
    }
    if let Some(range) = parse_wildcard(spec) {
        return Some(range);
    }

    let (comparator, version) = Comparator::split_prefix(spec);
    if comparator == Comparator::Ne {
        return None;
    }
    Partial::parse_lenient(version)?.compare(comparator)
}

impl VersionMatcher for NpmVersionMatcher {
    fn scheme(&self) -> Scheme {
        Scheme::Npm
    }

    fn parse_key(&self, version: &str) -> Option<VersionKey> {
        parse_lenient(version).map(VersionKey::Semver)
    }

    fn parse_native_range(&self, expression: &str) -> Option<RangeSpec> {
        let expression = collapse_operator_spacing(expression.trim());
        if expression.is_empty() {
            return None;
        }
        let alternatives: Option<Vec<Vec<Constraint>>> =
            expression.split("||").map(parse_alternative).collect();
        alternatives.map(RangeSpec::AnyOf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::range::VersionRange;
    use crate::version::semver::half_open;
    use crate::version::types::Version;
    use rstest::rstest;

    fn between(lower: &str, upper: &str) -> Vec<Constraint> {
        half_open(
            semver::Version::parse(lower).unwrap(),
            semver::Version::parse(upper).unwrap(),
        )
    }

    fn satisfies(spec: &str, version: &str) -> bool {
        let range = VersionRange::parse(Scheme::Npm, spec).unwrap();
        range.contains(&Version::parse(Scheme::Npm, version).unwrap())
    }

    #[rstest]
    // Exact
    #[case("1.2.3", "1.2.3", true)]
    #[case("=1.2.3", "1.2.4", false)]
    // Caret
    #[case("^1.2.3", "1.9.0", true)]
    #[case("^1.2.3", "2.0.0", false)]
    #[case("^1.2.3", "2.0.0-beta.1", false)]
    #[case("^0.2.3", "0.2.9", true)]
    #[case("^0.2.3", "0.3.0", false)]
    #[case("^0.0.3", "0.0.4", false)]
    // Tilde
    #[case("~1.2.3", "1.2.9", true)]
    #[case("~1.2.3", "1.3.0", false)]
    // Comparators
    #[case(">=1.0.0", "1.0.0", true)]
    #[case(">1.0.0", "1.0.0", false)]
    #[case("<=1.0.0", "1.0.0", true)]
    #[case("<1.0.2", "1.0.1", true)]
    #[case("< 1.0.2", "1.0.2", false)]
    // Wildcards
    #[case("*", "99.0.0", true)]
    #[case("1.x", "1.5.0", true)]
    #[case("1.x", "2.0.0", false)]
    #[case("1.2.x", "1.2.7", true)]
    #[case("1.2.x", "1.3.0", false)]
    // Hyphen
    #[case("1.0.0 - 2.0.0", "2.0.0", true)]
    #[case("1.0.0 - 2.0.0", "2.0.1", false)]
    // AND
    #[case(">=1.0.0 <2.0.0", "1.5.0", true)]
    #[case(">= 1.0.0 < 2.0.0", "2.0.0", false)]
    // OR
    #[case("<1.0.0 || >=2.0.0 <2.1.3", "2.1.0", true)]
    #[case("<1.0.0 || >=2.0.0 <2.1.3", "1.5.0", false)]
    #[case("^1.0.0 || ^2.0.0", "2.5.0", true)]
    // Partial versions cover their whole line
    #[case("<=1.2", "1.2.5", true)]
    #[case("<=1.2", "1.3.0", false)]
    #[case("<1.2", "1.2.0-beta", false)]
    #[case("<1.2", "1.1.9", true)]
    #[case(">1.2", "1.2.1", false)]
    #[case(">1.2", "1.3.0", true)]
    #[case(">=1.2", "1.2.0", true)]
    #[case("1.2", "1.2.3", true)]
    #[case("1.2", "1.3.0", false)]
    #[case("=1", "1.9.9", true)]
    #[case("~1", "1.5.0", true)]
    #[case("~1", "2.0.0", false)]
    #[case("^0", "0.9.0", true)]
    #[case("^0.0", "0.0.9", true)]
    #[case("^0.0", "0.1.0", false)]
    #[case("1.0 - 2.3", "2.3.9", true)]
    #[case("1.0 - 2.3", "2.4.0", false)]
    fn npm_range_contains_expected(
        #[case] spec: &str,
        #[case] version: &str,
        #[case] expected: bool,
    ) {
        assert_eq!(satisfies(spec, version), expected);
    }

    #[rstest]
    #[case("")]
    #[case(">=abc")]
    #[case("^")]
    #[case("1.0.0 ||")]
    #[case("^18446744073709551615.0.0")]
    #[case("<=18446744073709551615")]
    fn npm_rejects_invalid_range(#[case] spec: &str) {
        assert!(NpmVersionMatcher.parse_native_range(spec).is_none());
    }

    #[test]
    fn npm_caret_translates_to_half_open_interval() {
        let RangeSpec::AnyOf(alternatives) =
            NpmVersionMatcher.parse_native_range("^1.2.3").unwrap()
        else {
            panic!("expected comparator alternatives");
        };
        assert_eq!(alternatives, vec![between("1.2.3", "2.0.0-0")]);
    }

    #[test]
    fn collapse_operator_spacing_joins_operator_and_version() {
        assert_eq!(
            collapse_operator_spacing(">= 1.0.0 <  2.0.0 || ^ 3.0"),
            ">=1.0.0 <2.0.0 || ^3.0"
        );
    }
}
