//! Normalized advisory records and the affected-package merger

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::purl::PackageIdentity;
use crate::version::range::VersionRange;
use crate::version::types::Version;

/// Affected packages of one advisory name more than one package
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Cannot merge affected packages of different identities: {}", join(.identities))]
pub struct UnmergeablePackageError {
    pub identities: Vec<PackageIdentity>,
}

fn join(identities: &[PackageIdentity]) -> String {
    identities
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Reference {
    pub reference_id: Option<String>,
    pub url: String,
}

impl Reference {
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            reference_id: None,
            url: url.into(),
        }
    }
}

/// One package named by an advisory, with the versions it affects
///
/// Sources publish either a range of affected versions, a fixed version,
/// or both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AffectedPackage {
    pub package: PackageIdentity,
    pub affected_version_range: Option<VersionRange>,
    pub fixed_version: Option<Version>,
}

impl AffectedPackage {
    pub fn new(
        package: PackageIdentity,
        affected_version_range: Option<VersionRange>,
        fixed_version: Option<Version>,
    ) -> Self {
        Self {
            package,
            affected_version_range,
            fixed_version,
        }
    }

    pub fn with_range(package: PackageIdentity, range: VersionRange) -> Self {
        Self::new(package, Some(range), None)
    }

    pub fn with_fixed_version(package: PackageIdentity, fixed_version: Version) -> Self {
        Self::new(package, None, Some(fixed_version))
    }

    /// The affected range, or every version below the fixed version when
    /// only a fix is known
    pub fn normalized_range(&self) -> Option<VersionRange> {
        self.affected_version_range
            .clone()
            .or_else(|| self.fixed_version.as_ref().map(VersionRange::below))
    }

    /// Collapse entries of one package into its identity, ranges and fixes
    pub fn merge(
        affected_packages: &[AffectedPackage],
    ) -> Result<Option<MergedPackage>, UnmergeablePackageError> {
        merge(affected_packages)
    }
}

/// Affected packages of one identity collapsed together
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedPackage {
    /// Package identity without a version
    pub identity: PackageIdentity,
    /// Distinct ranges in order of appearance
    pub ranges: Vec<VersionRange>,
    /// Distinct explicit fixed versions in order of appearance
    pub fixed_versions: Vec<Version>,
}

/// Merge affected packages that must all name the same package
///
/// Returns `Ok(None)` for an empty list. Packages are the same when type,
/// namespace and name match; the identity keeps the first entry's qualifiers
/// and subpath.
pub fn merge(
    affected_packages: &[AffectedPackage],
) -> Result<Option<MergedPackage>, UnmergeablePackageError> {
    let Some(first) = affected_packages.first() else {
        return Ok(None);
    };
    let identity = first.package.identity();

    let mut identities: IndexSet<PackageIdentity> = IndexSet::new();
    for affected in affected_packages {
        if !identities.iter().any(|i| i.same_package(&affected.package)) {
            identities.insert(affected.package.identity());
        }
    }
    if identities.len() > 1 {
        return Err(UnmergeablePackageError {
            identities: identities.into_iter().collect(),
        });
    }

    let ranges: IndexSet<VersionRange> = affected_packages
        .iter()
        .filter_map(AffectedPackage::normalized_range)
        .collect();
    let fixed_versions: IndexSet<Version> = affected_packages
        .iter()
        .filter_map(|affected| affected.fixed_version.clone())
        .collect();

    Ok(Some(MergedPackage {
        identity,
        ranges: ranges.into_iter().collect(),
        fixed_versions: fixed_versions.into_iter().collect(),
    }))
}

/// An advisory as produced by an importer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdvisoryData {
    pub aliases: BTreeSet<String>,
    pub summary: String,
    pub references: Vec<Reference>,
    pub date_published: Option<DateTime<Utc>>,
    pub affected_packages: Vec<AffectedPackage>,
}
