//! NuGet version matcher
//!
//! NuGet versions are SemVer 2.0 with an optional fourth numeric part
//! (`4.0.0.1`) and case-insensitive prerelease labels. Build metadata after
//! `+` is ignored. Ranges use interval notation; a bare version is a minimum
//! (`1.0` means `>= 1.0`).

use semver::Prerelease;

use crate::version::matcher::VersionMatcher;
use crate::version::range::RangeSpec;
use crate::version::scheme::Scheme;
use crate::version::types::VersionKey;

use super::interval::{BareVersion, parse_intervals};

pub struct NugetVersionMatcher;

/// A parsed NuGet version; `1.0` and `1.0.0.0` are equal
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NugetVersion {
    parts: [u64; 4],
    pre: Prerelease,
}

impl NugetVersion {
    pub fn parse(version: &str) -> Option<Self> {
        let version = version.trim();
        let version = version.split_once('+').map_or(version, |(v, _)| v);
        let (core, pre) = match version.split_once('-') {
            Some((core, pre)) => (core, Prerelease::new(&pre.to_ascii_lowercase()).ok()?),
            None => (version, Prerelease::EMPTY),
        };

        let numbers: Option<Vec<u64>> = core.split('.').map(|p| p.parse().ok()).collect();
        let numbers = numbers?;
        if numbers.is_empty() || numbers.len() > 4 {
            return None;
        }

        let mut parts = [0; 4];
        parts[..numbers.len()].copy_from_slice(&numbers);
        Some(Self { parts, pre })
    }
}

impl VersionMatcher for NugetVersionMatcher {
    fn scheme(&self) -> Scheme {
        Scheme::Nuget
    }

    fn parse_key(&self, version: &str) -> Option<VersionKey> {
        NugetVersion::parse(version).map(VersionKey::Nuget)
    }

    fn parse_native_range(&self, expression: &str) -> Option<RangeSpec> {
        parse_intervals(expression, BareVersion::AtLeast, |v| self.parse_key(v))
    }
}
