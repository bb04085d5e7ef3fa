//! Registry trait for fetching the published versions of a package

#[cfg(test)]
use mockall::automock;

use crate::purl::PackageIdentity;
use crate::version::error::RegistryError;
use crate::version::types::PackageVersions;

/// Trait for fetching package versions from a registry
///
/// Implementations return every published release of the package, dated when
/// the registry knows the publication date. Order does not matter; the
/// universe cache parses and sorts them.
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait Registry: Send + Sync {
    /// Fetches all versions for a package from the registry
    ///
    /// # Arguments
    /// * `package` - Package identity without a version (e.g. `pkg:npm/lodash`)
    ///
    /// # Returns
    /// * `Ok(PackageVersions)` - Every known release
    /// * `Err(RegistryError)` - If the fetch fails
    async fn fetch_all_versions(
        &self,
        package: &PackageIdentity,
    ) -> Result<PackageVersions, RegistryError>;
}
