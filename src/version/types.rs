use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::{DateTime, Utc};
use pep508_rs::pep440_rs;

use crate::version::error::VersionError;
use crate::version::matchers::gem::GemVersion;
use crate::version::matchers::maven::MavenVersion;
use crate::version::matchers::nuget::NugetVersion;
use crate::version::matchers::rpm::{RpmVersion, SegmentedVersion};
use crate::version::scheme::Scheme;

/// Comparable form of a version, one variant per ordering algorithm
///
/// Keys are canonical: two keys are equal exactly when their scheme's
/// ordering considers them equal (`1.0` and `1.0.0` in Maven, for example).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum VersionKey {
    Semver(semver::Version),
    Pep440(pep440_rs::Version),
    Gem(GemVersion),
    Maven(MavenVersion),
    Nuget(NugetVersion),
    Rpm(RpmVersion),
    Generic(SegmentedVersion),
}

/// A concrete version of one ecosystem scheme
///
/// Keeps the string it was parsed from for display; equality, hashing and
/// ordering use the parsed key. Versions of different schemes never compare
/// equal and `compare` refuses to order them.
#[derive(Debug, Clone)]
pub struct Version {
    scheme: Scheme,
    raw: String,
    key: VersionKey,
}

impl Version {
    /// Parse `version` according to `scheme`
    pub fn parse(scheme: Scheme, version: &str) -> Result<Self, VersionError> {
        let trimmed = version.trim();
        scheme
            .matcher()
            .parse_key(trimmed)
            .map(|key| Self {
                scheme,
                raw: trimmed.to_string(),
                key,
            })
            .ok_or_else(|| VersionError::InvalidVersion {
                scheme,
                input: version.to_string(),
            })
    }

    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    /// The version string as it was published
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn key(&self) -> &VersionKey {
        &self.key
    }

    /// Order two versions of the same scheme
    pub fn compare(&self, other: &Version) -> Result<Ordering, VersionError> {
        if self.scheme != other.scheme {
            return Err(VersionError::SchemeMismatch {
                left: self.scheme,
                right: other.scheme,
            });
        }
        Ok(self.key.cmp(&other.key))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.scheme == other.scheme && self.key == other.key
    }
}

impl Eq for Version {}

impl Hash for Version {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.scheme.hash(state);
        self.key.hash(state);
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Total order for collections: by scheme first, then by the scheme's own ordering
impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.scheme
            .cmp(&other.scheme)
            .then_with(|| self.key.cmp(&other.key))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// A version as listed by a registry, with its publication date when known
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedVersion {
    pub value: String,
    pub release_date: Option<DateTime<Utc>>,
}

impl PublishedVersion {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            release_date: None,
        }
    }

    pub fn released_at(value: impl Into<String>, release_date: DateTime<Utc>) -> Self {
        Self {
            value: value.into(),
            release_date: Some(release_date),
        }
    }
}

/// All versions a registry knows for one package
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageVersions {
    pub versions: Vec<PublishedVersion>,
}

impl PackageVersions {
    pub fn new(versions: Vec<PublishedVersion>) -> Self {
        Self { versions }
    }
}
