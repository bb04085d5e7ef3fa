//! In-memory registry
//!
//! Serves version lists registered up front. Useful for embedding callers
//! that already hold version data and for tests.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::purl::PackageIdentity;
use crate::version::error::RegistryError;
use crate::version::registry::Registry;
use crate::version::types::{PackageVersions, PublishedVersion};

#[derive(Debug, Default, Clone)]
pub struct InMemoryRegistry {
    packages: HashMap<PackageIdentity, PackageVersions>,
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register undated versions for `package`, replacing earlier ones
    pub fn with_versions<I, S>(mut self, package: &PackageIdentity, versions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let versions = versions.into_iter().map(PublishedVersion::new).collect();
        self.insert(package, PackageVersions::new(versions));
        self
    }

    /// Register versions with their release dates for `package`
    pub fn with_dated_versions<I, S>(mut self, package: &PackageIdentity, versions: I) -> Self
    where
        I: IntoIterator<Item = (S, DateTime<Utc>)>,
        S: Into<String>,
    {
        let versions = versions
            .into_iter()
            .map(|(value, date)| PublishedVersion::released_at(value, date))
            .collect();
        self.insert(package, PackageVersions::new(versions));
        self
    }

    pub fn insert(&mut self, package: &PackageIdentity, versions: PackageVersions) {
        self.packages.insert(package.identity(), versions);
    }
}

#[async_trait::async_trait]
impl Registry for InMemoryRegistry {
    async fn fetch_all_versions(
        &self,
        package: &PackageIdentity,
    ) -> Result<PackageVersions, RegistryError> {
        self.packages
            .get(&package.identity())
            .cloned()
            .ok_or_else(|| RegistryError::NotFound(package.to_string()))
    }
}
