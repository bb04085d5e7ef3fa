//! Generic version matcher
//!
//! Fallback for ecosystems without a dedicated ordering (OpenSSL's
//! `1.1.1g`, vendor product versions). Versions compare segment by segment
//! like RPM versions; ranges are `|`-separated comparator lists.

use crate::version::matcher::VersionMatcher;
use crate::version::range::RangeSpec;
use crate::version::scheme::Scheme;
use crate::version::types::VersionKey;
use crate::version::vers::parse_constraints;

use super::rpm::SegmentedVersion;

pub struct GenericVersionMatcher;

impl VersionMatcher for GenericVersionMatcher {
    fn scheme(&self) -> Scheme {
        Scheme::Generic
    }

    fn parse_key(&self, version: &str) -> Option<VersionKey> {
        SegmentedVersion::parse(version).map(VersionKey::Generic)
    }

    fn parse_native_range(&self, expression: &str) -> Option<RangeSpec> {
        parse_constraints(expression, |v| self.parse_key(v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::range::VersionRange;
    use crate::version::types::Version;
    use rstest::rstest;

    #[rstest]
    #[case("<1.1.1g", "1.1.1f", true)]
    #[case("<1.1.1g", "1.1.1g", false)]
    #[case(">=1.1.1d|<=1.1.1f", "1.1.1e", true)]
    #[case("1.1.1d|1.1.1e", "1.1.1f", false)]
    #[case("*", "2.4.0-beta", true)]
    fn generic_range_contains_expected(
        #[case] spec: &str,
        #[case] version: &str,
        #[case] expected: bool,
    ) {
        let range = VersionRange::parse(Scheme::Generic, spec).unwrap();
        assert_eq!(
            range.contains(&Version::parse(Scheme::Generic, version).unwrap()),
            expected
        );
    }

    #[test]
    fn generic_rejects_empty_range() {
        assert!(GenericVersionMatcher.parse_native_range("  ").is_none());
    }
}
