//! Crates.io version matcher
//!
//! Supports Cargo version requirement specifications:
//! - `1.2.3` - default (caret-like): >=1.2.3 <2.0.0 (or special cases for 0.x)
//! - `^1.2.3` - explicit caret (same as default)
//! - `~1.2.3` - tilde: >=1.2.3 <1.3.0
//! - `>=1.2.3`, `>1.2.3`, `<=1.2.3`, `<1.2.3`, `=1.2.3` - comparison operators
//! - `1.2.*`, `1.*`, `*` - wildcards
//! - `>=1.0.0, <2.0.0` - comma-separated requirements, all must hold
//!
//! Partial versions cover their whole line: `=1.2` is `>=1.2.0, <1.3.0`.

use crate::version::matcher::VersionMatcher;
use crate::version::range::{Comparator, Constraint, RangeSpec};
use crate::version::scheme::Scheme;
use crate::version::semver::{Partial, parse_wildcard};
use crate::version::types::VersionKey;

pub struct CratesVersionMatcher;

/// Parse a single version requirement (not comma-separated)
fn parse_requirement(spec: &str) -> Option<Vec<Constraint>> {
    let spec = spec.trim();

    if spec == "*" {
        return Some(Vec::new());
    }
    if let Some(rest) = spec.strip_prefix('^') {
        return Partial::parse(rest.trim())?.caret();
    }
    if let Some(rest) = spec.strip_prefix('~') {
        return Partial::parse(rest.trim())?.tilde();
    }
    if let Some(range) = parse_wildcard(spec) {
        return Some(range);
    }
    if spec.starts_with(['<', '>', '=']) {
        let (comparator, version) = Comparator::split_prefix(spec);
        return Partial::parse(version)?.compare(comparator);
    }

    // Default (no prefix) behaves like caret in Cargo
    Partial::parse(spec)?.caret()
}

impl VersionMatcher for CratesVersionMatcher {
    fn scheme(&self) -> Scheme {
        Scheme::Cargo
    }

    fn parse_key(&self, version: &str) -> Option<VersionKey> {
        semver::Version::parse(version.trim())
            .ok()
            .map(VersionKey::Semver)
    }

    fn parse_native_range(&self, expression: &str) -> Option<RangeSpec> {
        let expression = expression.trim();
        if expression.is_empty() {
            return None;
        }

        let mut constraints = Vec::new();
        for part in expression.split(',') {
            constraints.extend(parse_requirement(part)?);
        }
        Some(RangeSpec::all_of(constraints))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::range::VersionRange;
    use crate::version::types::Version;
    use rstest::rstest;

    fn satisfies(spec: &str, version: &str) -> bool {
        let range = VersionRange::parse(Scheme::Cargo, spec).unwrap();
        range.contains(&Version::parse(Scheme::Cargo, version).unwrap())
    }

    // Default (caret-like) requirements
    #[rstest]
    // 1.2.3 means >=1.2.3, <2.0.0
    #[case("1.2.3", "1.3.0", true)]
    #[case("1.2.3", "1.2.2", false)]
    #[case("1.2.3", "2.0.0", false)]
    // 0.2.3 means >=0.2.3, <0.3.0 (minor is breaking for 0.x)
    #[case("0.2.3", "0.2.9", true)]
    #[case("0.2.3", "0.3.0", false)]
    // 0.0.3 means >=0.0.3, <0.0.4 (patch is breaking for 0.0.x)
    #[case("0.0.3", "0.0.3", true)]
    #[case("0.0.3", "0.0.4", false)]
    fn default_requirement(#[case] spec: &str, #[case] version: &str, #[case] expected: bool) {
        assert_eq!(satisfies(spec, version), expected);
    }

    #[rstest]
    #[case("^1.2.3", "1.9.9", true)]
    #[case("^1.2.3", "2.0.0", false)]
    #[case("~1.2.3", "1.2.9", true)]
    #[case("~1.2.3", "1.3.0", false)]
    #[case(">=1.0.0", "0.9.9", false)]
    #[case(">1.0.0", "1.0.1", true)]
    #[case("<=1.0.0", "1.0.1", false)]
    #[case("<1.0.0", "0.9.9", true)]
    #[case("=1.0.0", "1.0.0", true)]
    #[case("=1.0.0", "1.0.1", false)]
    fn operator_requirement(#[case] spec: &str, #[case] version: &str, #[case] expected: bool) {
        assert_eq!(satisfies(spec, version), expected);
    }

    #[rstest]
    #[case("*", "1.0.0", true)]
    #[case("1.*", "1.5.0", true)]
    #[case("1.*", "2.0.0", false)]
    #[case("1.2.*", "1.2.5", true)]
    #[case("1.2.*", "1.3.0", false)]
    fn wildcard_requirement(#[case] spec: &str, #[case] version: &str, #[case] expected: bool) {
        assert_eq!(satisfies(spec, version), expected);
    }

    // >=1.0, <2.0 means both conditions must be satisfied
    #[rstest]
    #[case(">=1.0.0, <2.0.0", "1.5.0", true)]
    #[case(">=1.0.0, <2.0.0", "2.0.0", false)]
    #[case(">=1.0.0, <2.0.0", "0.9.0", false)]
    // Partial versions cover their whole line
    #[case("0.14", "0.14.5", true)]
    #[case("0.14", "0.15.0", false)]
    #[case(">=1.2", "1.1.9", false)]
    #[case("<=1.2", "1.2.5", true)]
    #[case("<=1.2", "1.3.0", false)]
    #[case(">1.2", "1.2.1", false)]
    #[case(">1.2", "1.3.0", true)]
    #[case("=1.2", "1.2.3", true)]
    #[case("=1.2", "1.3.0", false)]
    #[case("~1", "1.5.0", true)]
    #[case("~1", "2.0.0", false)]
    #[case("^0", "0.9.9", true)]
    #[case("^0", "1.0.0", false)]
    #[case("0", "0.5.0", true)]
    #[case("^0.0", "0.0.7", true)]
    #[case("^0.0", "0.1.0", false)]
    fn multiple_and_partial_requirements(
        #[case] spec: &str,
        #[case] version: &str,
        #[case] expected: bool,
    ) {
        assert_eq!(satisfies(spec, version), expected);
    }

    #[rstest]
    #[case("")]
    #[case(">=1.0.0,")]
    #[case("^abc")]
    #[case("^18446744073709551615.0.0")]
    #[case("~0.18446744073709551615")]
    fn rejects_invalid_requirement(#[case] spec: &str) {
        assert!(CratesVersionMatcher.parse_native_range(spec).is_none());
    }

    #[test]
    fn parse_key_requires_full_semver() {
        assert!(CratesVersionMatcher.parse_key("1.2.3").is_some());
        assert!(CratesVersionMatcher.parse_key("v1.2.3").is_none());
    }
}
