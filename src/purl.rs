//! Package identity as a package URL
//!
//! `pkg:type/namespace/name@version?qualifiers#subpath`. Rendering and
//! parsing go through the `packageurl` crate so percent-encoding follows the
//! purl rules.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use packageurl::PackageUrl;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PurlError {
    #[error("Invalid package URL {input:?}: {reason}")]
    Invalid { input: String, reason: String },
}

/// Identity of a package, optionally pinned to a version
///
/// Identities without a version name the package itself; with a version
/// they name one release of it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PackageIdentity {
    package_type: String,
    namespace: Option<String>,
    name: String,
    version: Option<String>,
    qualifiers: BTreeMap<String, String>,
    subpath: Option<String>,
}

impl PackageIdentity {
    pub fn new(package_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            package_type: package_type.into().to_ascii_lowercase(),
            namespace: None,
            name: name.into(),
            version: None,
            qualifiers: BTreeMap::new(),
            subpath: None,
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        let namespace = namespace.into();
        self.namespace = (!namespace.is_empty()).then_some(namespace);
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_qualifier(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.qualifiers.insert(key.into(), value.into());
        self
    }

    pub fn with_subpath(mut self, subpath: impl Into<String>) -> Self {
        self.subpath = Some(subpath.into());
        self
    }

    pub fn package_type(&self) -> &str {
        &self.package_type
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn qualifiers(&self) -> &BTreeMap<String, String> {
        &self.qualifiers
    }

    pub fn subpath(&self) -> Option<&str> {
        self.subpath.as_deref()
    }

    /// The same package without a version
    pub fn identity(&self) -> Self {
        Self {
            version: None,
            ..self.clone()
        }
    }

    /// Whether both name the same package: same type, namespace and name
    pub fn same_package(&self, other: &Self) -> bool {
        self.package_type == other.package_type
            && self.namespace == other.namespace
            && self.name == other.name
    }

    fn to_package_url(&self) -> Result<PackageUrl<'_>, packageurl::Error> {
        let mut purl = PackageUrl::new(self.package_type.as_str(), self.name.as_str())?;
        if let Some(namespace) = &self.namespace {
            purl.with_namespace(namespace.as_str());
        }
        if let Some(version) = &self.version {
            purl.with_version(version.as_str());
        }
        for (key, value) in &self.qualifiers {
            purl.add_qualifier(key.as_str(), value.as_str())?;
        }
        if let Some(subpath) = &self.subpath {
            purl.with_subpath(subpath.as_str())?;
        }
        Ok(purl)
    }
}

impl fmt::Display for PackageIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let purl = self.to_package_url().map_err(|_| fmt::Error)?;
        write!(f, "{}", purl)
    }
}

impl FromStr for PackageIdentity {
    type Err = PurlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let purl = PackageUrl::from_str(s.trim()).map_err(|e| PurlError::Invalid {
            input: s.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            package_type: purl.ty().to_ascii_lowercase(),
            namespace: purl.namespace().map(str::to_string),
            name: purl.name().to_string(),
            version: purl.version().map(str::to_string),
            qualifiers: purl
                .qualifiers()
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            subpath: purl.subpath().map(str::to_string),
        })
    }
}

impl TryFrom<String> for PackageIdentity {
    type Error = PurlError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PackageIdentity> for String {
    fn from(identity: PackageIdentity) -> Self {
        identity.to_string()
    }
}
