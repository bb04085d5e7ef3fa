//! Version schemes and the scheme → matcher table

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::version::error::VersionError;
use crate::version::matcher::VersionMatcher;
use crate::version::matchers::{
    ComposerVersionMatcher, CratesVersionMatcher, GemVersionMatcher, GenericVersionMatcher,
    GoVersionMatcher, MavenVersionMatcher, NpmVersionMatcher, NugetVersionMatcher,
    PypiVersionMatcher, RpmVersionMatcher,
};

/// Versioning and range-syntax convention of a package ecosystem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    /// npm registry (node-semver ranges)
    Npm,
    /// crates.io (Cargo requirements)
    Cargo,
    /// Go modules (v-prefixed semver)
    Golang,
    /// Packagist (Composer constraints)
    Composer,
    /// PyPI (PEP 440)
    Pypi,
    /// RubyGems
    Gem,
    /// Maven (ComparableVersion ordering, interval ranges)
    Maven,
    /// NuGet (four-part versions, interval ranges)
    Nuget,
    /// RPM (epoch:version-release)
    Rpm,
    /// Anything else: segment ordering as used for OpenSSL, PostgreSQL, etc.
    Generic,
}

impl Scheme {
    pub const ALL: [Scheme; 10] = [
        Scheme::Npm,
        Scheme::Cargo,
        Scheme::Golang,
        Scheme::Composer,
        Scheme::Pypi,
        Scheme::Gem,
        Scheme::Maven,
        Scheme::Nuget,
        Scheme::Rpm,
        Scheme::Generic,
    ];

    /// Returns the string representation of the scheme
    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::Npm => "npm",
            Scheme::Cargo => "cargo",
            Scheme::Golang => "golang",
            Scheme::Composer => "composer",
            Scheme::Pypi => "pypi",
            Scheme::Gem => "gem",
            Scheme::Maven => "maven",
            Scheme::Nuget => "nuget",
            Scheme::Rpm => "rpm",
            Scheme::Generic => "generic",
        }
    }

    /// Select the scheme for a package URL type (e.g. `pkg:golang/...` → Golang)
    pub fn for_package_type(package_type: &str) -> Option<Scheme> {
        match package_type.to_ascii_lowercase().as_str() {
            "npm" => Some(Scheme::Npm),
            "cargo" => Some(Scheme::Cargo),
            "golang" | "go" => Some(Scheme::Golang),
            "composer" => Some(Scheme::Composer),
            "pypi" => Some(Scheme::Pypi),
            "gem" => Some(Scheme::Gem),
            "maven" => Some(Scheme::Maven),
            "nuget" => Some(Scheme::Nuget),
            "rpm" => Some(Scheme::Rpm),
            "generic" => Some(Scheme::Generic),
            _ => None,
        }
    }

    /// The version parser and native range parser for this scheme
    pub fn matcher(&self) -> &'static dyn VersionMatcher {
        match self {
            Scheme::Npm => &NpmVersionMatcher,
            Scheme::Cargo => &CratesVersionMatcher,
            Scheme::Golang => &GoVersionMatcher,
            Scheme::Composer => &ComposerVersionMatcher,
            Scheme::Pypi => &PypiVersionMatcher,
            Scheme::Gem => &GemVersionMatcher,
            Scheme::Maven => &MavenVersionMatcher,
            Scheme::Nuget => &NugetVersionMatcher,
            Scheme::Rpm => &RpmVersionMatcher,
            Scheme::Generic => &GenericVersionMatcher,
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scheme {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Scheme::for_package_type(s).ok_or_else(|| VersionError::UnsupportedScheme(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("npm", Some(Scheme::Npm))]
    #[case("golang", Some(Scheme::Golang))]
    #[case("go", Some(Scheme::Golang))]
    #[case("Maven", Some(Scheme::Maven))]
    #[case("composer", Some(Scheme::Composer))]
    #[case("generic", Some(Scheme::Generic))]
    #[case("deb", None)]
    fn for_package_type_returns_expected(
        #[case] package_type: &str,
        #[case] expected: Option<Scheme>,
    ) {
        assert_eq!(Scheme::for_package_type(package_type), expected);
    }

    #[test]
    fn matcher_table_covers_every_scheme() {
        for scheme in Scheme::ALL {
            assert_eq!(scheme.matcher().scheme(), scheme);
        }
    }

    #[test]
    fn as_str_round_trips_through_from_str() {
        for scheme in Scheme::ALL {
            assert_eq!(scheme.as_str().parse::<Scheme>(), Ok(scheme));
        }
    }

    #[test]
    fn from_str_rejects_unknown_scheme() {
        assert_eq!(
            "hackage".parse::<Scheme>(),
            Err(VersionError::UnsupportedScheme("hackage".to_string()))
        );
    }
}
