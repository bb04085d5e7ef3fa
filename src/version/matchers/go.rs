//! Go module version matcher
//!
//! Go modules use semver with optional suffixes:
//! - Standard semver: v1.2.3
//! - +incompatible suffix: v2.0.0+incompatible (pre-go.mod v2+ modules)
//! - Pseudo-versions: v0.0.0-20210101000000-abcdef123456
//!
//! Ranges are comparator lists, space-separated for AND and `||` for OR:
//! `>=v1.0.0 <v1.3.0 || >=v2.0.0 <v2.1.5`.

use semver::Version;

use crate::version::matcher::VersionMatcher;
use crate::version::range::{Comparator, Constraint, RangeSpec};
use crate::version::scheme::Scheme;
use crate::version::semver::constraint;
use crate::version::types::VersionKey;

pub struct GoVersionMatcher;

/// Normalize a Go module version for comparison.
///
/// Handles:
/// - v prefix: v1.2.3 -> 1.2.3
/// - +incompatible suffix: v2.0.0+incompatible -> 2.0.0
fn normalize_go_version(version: &str) -> &str {
    let version = version.trim();
    let version = version.strip_prefix('v').unwrap_or(version);
    version.strip_suffix("+incompatible").unwrap_or(version)
}

/// Parse a Go version into semver::Version
///
/// Pseudo-versions keep their timestamp in the prerelease, so they sort by
/// commit time below the release they precede.
fn parse_go_version(version: &str) -> Option<Version> {
    Version::parse(normalize_go_version(version)).ok()
}

fn parse_alternative(spec: &str) -> Option<Vec<Constraint>> {
    let spec = spec.trim();
    if spec.is_empty() {
        return None;
    }
    if spec == "*" {
        return Some(Vec::new());
    }

    spec.split_whitespace()
        .map(|part| {
            let (comparator, version) = Comparator::split_prefix(part);
            parse_go_version(version).map(|v| constraint(comparator, v))
        })
        .collect()
}

impl VersionMatcher for GoVersionMatcher {
    fn scheme(&self) -> Scheme {
        Scheme::Golang
    }

    fn parse_key(&self, version: &str) -> Option<VersionKey> {
        parse_go_version(version).map(VersionKey::Semver)
    }

    fn parse_native_range(&self, expression: &str) -> Option<RangeSpec> {
        let expression = super::npm::collapse_operator_spacing(expression.trim());
        if expression.is_empty() {
            return None;
        }
        let alternatives: Option<Vec<Vec<Constraint>>> =
            expression.split("||").map(parse_alternative).collect();
        alternatives.map(RangeSpec::AnyOf)
    }
}
