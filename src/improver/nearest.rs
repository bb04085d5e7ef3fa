//! Nearest-patched matching
//!
//! Pairs every vulnerable package version with the smallest resolved version
//! strictly above it.

use indexmap::IndexMap;
use tracing::warn;

use crate::purl::PackageIdentity;
use crate::version::scheme::Scheme;
use crate::version::types::Version;

/// A vulnerable package and the closest later package that is not affected
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchedMatch {
    pub vulnerable_package: PackageIdentity,
    /// None when no resolved version is newer than the vulnerable one
    pub patched_package: Option<PackageIdentity>,
}

struct Versioned<'a> {
    version: Version,
    package: &'a PackageIdentity,
}

/// Parse the version of each package with the scheme of its type, then sort
/// and drop duplicate versions
fn versioned(packages: &[PackageIdentity]) -> Vec<Versioned<'_>> {
    let mut parsed: Vec<Versioned<'_>> = packages
        .iter()
        .filter_map(|package| {
            let Some(scheme) = Scheme::for_package_type(package.package_type()) else {
                warn!("No version scheme for {}", package);
                return None;
            };
            let Some(raw) = package.version() else {
                warn!("Package {} has no version", package);
                return None;
            };
            Version::parse(scheme, raw)
                .inspect_err(|e| warn!("Skipping {}: {}", package, e))
                .ok()
                .map(|version| Versioned { version, package })
        })
        .collect();
    parsed.sort_by(|a, b| a.version.cmp(&b.version));
    parsed.dedup_by(|later, earlier| later.version == earlier.version);
    parsed
}

/// Match each vulnerable package to its nearest patched package
///
/// Output follows ascending vulnerable version. Packages whose version
/// cannot be parsed are logged and left out.
pub fn nearest_patched_package(
    vulnerable: &[PackageIdentity],
    resolved: &[PackageIdentity],
) -> Vec<PatchedMatch> {
    let resolved = versioned(resolved);

    versioned(vulnerable)
        .into_iter()
        .map(|vulnerable| {
            let index = resolved.partition_point(|r| r.version <= vulnerable.version);
            // Versions sort by scheme first, so the next entry may belong to another scheme
            let patched_package = resolved
                .get(index)
                .filter(|r| r.version.scheme() == vulnerable.version.scheme())
                .map(|r| r.package.clone());
            PatchedMatch {
                vulnerable_package: vulnerable.package.clone(),
                patched_package,
            }
        })
        .collect()
}

/// Group vulnerable packages by the package that patches them
///
/// Groups appear in order of first occurrence; `None` collects the packages
/// without a known fix.
pub fn group_by_patched(
    matches: Vec<PatchedMatch>,
) -> IndexMap<Option<PackageIdentity>, Vec<PackageIdentity>> {
    let mut groups: IndexMap<Option<PackageIdentity>, Vec<PackageIdentity>> = IndexMap::new();
    for PatchedMatch {
        vulnerable_package,
        patched_package,
    } in matches
    {
        groups
            .entry(patched_package)
            .or_default()
            .push(vulnerable_package);
    }
    groups
}
