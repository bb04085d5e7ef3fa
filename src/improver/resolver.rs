//! Range resolution against a version universe

use std::collections::BTreeSet;

use tracing::warn;

use crate::version::range::VersionRange;
use crate::version::types::Version;

/// A universe split by one range
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Versions the range contains
    pub affected: BTreeSet<Version>,
    /// Every other version of the universe
    pub unaffected: BTreeSet<Version>,
}

impl Resolution {
    pub fn is_empty(&self) -> bool {
        self.affected.is_empty() && self.unaffected.is_empty()
    }
}

/// Partition `universe` into versions inside and outside `range`
///
/// An empty universe resolves to two empty sets. Versions of another scheme
/// than the range's cannot be compared and are left out of both sets.
pub fn resolve(range: &VersionRange, universe: &[Version]) -> Resolution {
    let mut resolution = Resolution::default();
    for version in universe {
        if version.scheme() != range.scheme() {
            warn!(
                "Skipping {} version '{}' while resolving {}",
                version.scheme(),
                version,
                range
            );
            continue;
        }
        if range.contains(version) {
            resolution.affected.insert(version.clone());
        } else {
            resolution.unaffected.insert(version.clone());
        }
    }
    resolution
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::scheme::Scheme;
    use rstest::rstest;

    fn versions(scheme: Scheme, versions: &[&str]) -> Vec<Version> {
        versions
            .iter()
            .map(|v| Version::parse(scheme, v).unwrap())
            .collect()
    }

    fn strings(versions: &BTreeSet<Version>) -> Vec<&str> {
        versions.iter().map(Version::as_str).collect()
    }

    #[rstest]
    #[case(Scheme::Npm, "<1.0.2", &["1.0.0", "1.0.1", "1.0.2"], &["1.0.0", "1.0.1"], &["1.0.2"])]
    #[case(Scheme::Pypi, ">=2,<2.0.5 || ==3.0", &["1.9", "2.0", "2.0.5", "3.0"], &["2.0", "3.0"], &["1.9", "2.0.5"])]
    #[case(Scheme::Maven, "[9.0.0.M1,9.0.0.M3)", &["9.0.0.M1", "9.0.0.M2", "9.0.0.M3"], &["9.0.0.M1", "9.0.0.M2"], &["9.0.0.M3"])]
    #[case(Scheme::Generic, "vers:generic/>=1.1.1|<1.1.1g", &["1.1.0l", "1.1.1d", "1.1.1g"], &["1.1.1d"], &["1.1.0l", "1.1.1g"])]
    fn resolve_partitions_universe(
        #[case] scheme: Scheme,
        #[case] expression: &str,
        #[case] universe: &[&str],
        #[case] affected: &[&str],
        #[case] unaffected: &[&str],
    ) {
        let range = VersionRange::parse(scheme, expression).unwrap();
        let universe = versions(scheme, universe);

        let resolution = resolve(&range, &universe);

        assert_eq!(strings(&resolution.affected), affected);
        assert_eq!(strings(&resolution.unaffected), unaffected);
        assert_eq!(
            resolution.affected.len() + resolution.unaffected.len(),
            universe.len()
        );
        assert!(resolution.affected.is_disjoint(&resolution.unaffected));
    }

    #[test]
    fn resolve_of_empty_universe_is_empty() {
        let range = VersionRange::parse(Scheme::Npm, "<1.0.0").unwrap();
        assert!(resolve(&range, &[]).is_empty());
    }

    #[test]
    fn resolve_skips_versions_of_other_scheme() {
        let range = VersionRange::parse(Scheme::Npm, "*").unwrap();
        let universe = versions(Scheme::Cargo, &["1.0.0"]);

        assert!(resolve(&range, &universe).is_empty());
    }
}
