//! Version matching abstraction for different ecosystems

use crate::version::range::RangeSpec;
use crate::version::scheme::Scheme;
use crate::version::types::VersionKey;

/// Trait for ecosystem-specific version ordering and range grammar
///
/// Each ecosystem has its own rules:
/// - npm: `^1.0.0`, `~1.2.3`, `1.x`, `1.0.0 - 2.0.0`, `||` alternatives
/// - PyPI: PEP 440 specifiers (`>=1.0,<2.0`, `~=1.4`)
/// - Maven/NuGet: interval notation (`[1.0,2.0)`)
/// - RPM/generic: `|`-separated comparator lists
pub trait VersionMatcher: Send + Sync {
    /// Returns the scheme this matcher handles
    fn scheme(&self) -> Scheme;

    /// Parse a concrete version into its comparable form
    ///
    /// Returns None when the string is not a valid version of this scheme.
    fn parse_key(&self, version: &str) -> Option<VersionKey>;

    /// Parse a range expression written in the ecosystem's own grammar
    fn parse_native_range(&self, expression: &str) -> Option<RangeSpec>;
}
