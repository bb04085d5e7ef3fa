//! PyPI version matcher using PEP 440 version specifiers
//!
//! A range is one specifier set (`>=1.0,<2.0`, `~=1.4`) or several joined
//! with `||`, any of which may match.

use std::str::FromStr;

use pep508_rs::pep440_rs::{Version, VersionSpecifiers};
use tracing::warn;

use crate::version::matcher::VersionMatcher;
use crate::version::range::RangeSpec;
use crate::version::scheme::Scheme;
use crate::version::types::VersionKey;

/// Version matcher for PyPI packages using PEP 440 specifiers
pub struct PypiVersionMatcher;

impl VersionMatcher for PypiVersionMatcher {
    fn scheme(&self) -> Scheme {
        Scheme::Pypi
    }

    fn parse_key(&self, version: &str) -> Option<VersionKey> {
        Version::from_str(version.trim())
            .ok()
            .map(VersionKey::Pep440)
    }

    fn parse_native_range(&self, expression: &str) -> Option<RangeSpec> {
        let expression = expression.trim();
        if expression.is_empty() {
            return None;
        }

        let sets: Option<Vec<VersionSpecifiers>> = expression
            .split("||")
            .map(|set| {
                let set = set.trim();
                if set.is_empty() {
                    return None;
                }
                VersionSpecifiers::from_str(set)
                    .inspect_err(|e| {
                        warn!("Failed to parse version specifiers '{}': {}", set, e);
                    })
                    .ok()
            })
            .collect();
        sets.map(RangeSpec::Pep440)
    }
}
