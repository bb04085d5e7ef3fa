//! Per-pass cache of version universes
//!
//! One fetch per package identity: concurrent lookups of the same identity
//! wait on a single in-flight fetch. Failures are cached too, so a package
//! whose registry is unreachable is not retried within the pass. The full
//! release list is cached; the `until` bound is applied on every lookup.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tokio::sync::OnceCell;
use tracing::{debug, warn};

use crate::config::ImproverConfig;
use crate::purl::PackageIdentity;
use crate::version::registry::Registry;
use crate::version::scheme::Scheme;
use crate::version::types::{PackageVersions, Version};

/// A parsed release with its publication date when known
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release {
    pub version: Version,
    pub release_date: Option<DateTime<Utc>>,
}

impl Release {
    fn published_by(&self, until: Option<DateTime<Utc>>) -> bool {
        match (until, self.release_date) {
            (Some(until), Some(released)) => released <= until,
            _ => true,
        }
    }
}

type Universe = Arc<Vec<Release>>;
type Slot = Arc<OnceCell<Option<Universe>>>;

pub struct UniverseCache {
    registry: Arc<dyn Registry>,
    fetch_timeout: Duration,
    ignorable: HashSet<String>,
    entries: DashMap<PackageIdentity, Slot>,
}

impl UniverseCache {
    pub fn new(registry: Arc<dyn Registry>, fetch_timeout: Duration) -> Self {
        Self {
            registry,
            fetch_timeout,
            ignorable: HashSet::new(),
            entries: DashMap::new(),
        }
    }

    pub fn from_config(registry: Arc<dyn Registry>, config: &ImproverConfig) -> Self {
        Self::new(registry, Duration::from_millis(config.fetch_timeout_ms))
            .with_ignorable_versions(config.ignorable_versions.iter().cloned())
    }

    /// Version strings to drop from every universe
    pub fn with_ignorable_versions(mut self, versions: impl IntoIterator<Item = String>) -> Self {
        self.ignorable.extend(versions);
        self
    }

    /// Returns the sorted universe of `package`, limited to releases
    /// published at or before `until`
    ///
    /// Returns None when the universe is unavailable: unknown scheme,
    /// registry failure or timeout.
    pub async fn get_versions(
        &self,
        package: &PackageIdentity,
        until: Option<DateTime<Utc>>,
    ) -> Option<Vec<Version>> {
        let identity = package.identity();
        let Some(scheme) = Scheme::for_package_type(identity.package_type()) else {
            warn!(
                "No version scheme for package type '{}': {}",
                identity.package_type(),
                identity
            );
            return None;
        };

        // Clone the cell out so no map shard lock is held across the await
        let slot: Slot = Arc::clone(self.entries.entry(identity.clone()).or_default().value());
        let universe = slot
            .get_or_init(|| self.fetch(&identity, scheme))
            .await
            .as_ref()?;

        Some(
            universe
                .iter()
                .filter(|release| release.published_by(until))
                .map(|release| release.version.clone())
                .collect(),
        )
    }

    /// Number of identities looked up so far, including failed ones
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    async fn fetch(&self, identity: &PackageIdentity, scheme: Scheme) -> Option<Universe> {
        debug!("Fetching versions of {}", identity);
        let fetched =
            tokio::time::timeout(self.fetch_timeout, self.registry.fetch_all_versions(identity))
                .await;

        match fetched {
            Ok(Ok(versions)) => {
                let universe = normalize_universe(scheme, versions, &self.ignorable);
                debug!("Cached {} versions of {}", universe.len(), identity);
                Some(Arc::new(universe))
            }
            Ok(Err(e)) => {
                warn!("Failed to fetch versions of {}: {}", identity, e);
                None
            }
            Err(_) => {
                warn!(
                    "Timed out after {} ms fetching versions of {}",
                    self.fetch_timeout.as_millis(),
                    identity
                );
                None
            }
        }
    }
}

/// Parse, de-duplicate and sort a registry's release list
///
/// Strings are trimmed and a leading `v` is dropped when the rest parses
/// (Go keeps it, it is part of the module version). Ignorable and
/// unparsable strings are skipped.
pub fn normalize_universe(
    scheme: Scheme,
    versions: PackageVersions,
    ignorable: &HashSet<String>,
) -> Vec<Release> {
    let mut releases: Vec<Release> = versions
        .versions
        .into_iter()
        .filter_map(|published| {
            let raw = published.value.trim();
            if raw.is_empty() || ignorable.contains(raw) {
                return None;
            }
            let version = parse_release(scheme, raw)
                .inspect_err(|e| warn!("Skipping unparsable version: {}", e))
                .ok()?;
            Some(Release {
                version,
                release_date: published.release_date,
            })
        })
        .collect();

    releases.sort_by(|a, b| a.version.cmp(&b.version));
    releases.dedup_by(|later, earlier| later.version == earlier.version);
    releases
}

fn parse_release(scheme: Scheme, raw: &str) -> Result<Version, crate::version::error::VersionError> {
    if scheme != Scheme::Golang
        && let Some(bare) = raw.strip_prefix(['v', 'V'])
        && let Ok(version) = Version::parse(scheme, bare)
    {
        return Ok(version);
    }
    Version::parse(scheme, raw)
}
