//! Inference emission
//!
//! For each advisory:
//! - Merge its affected packages into one identity (conflicts are errors)
//! - Fetch the version universe, bounded by the publication date
//! - Resolve every range and match vulnerable versions to their nearest fix
//! - Emit one inference per distinct fix
//!
//! Unparsable data and unavailable universes yield no inference; they never
//! turn into "all versions affected" or "all versions fixed".

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use tracing::{debug, error, info, warn};

use crate::advisory::{AdvisoryData, UnmergeablePackageError, merge};
use crate::config::{DEFAULT_CONCURRENCY, FixedVersionPolicy, ImproverConfig};
use crate::improver::nearest::{group_by_patched, nearest_patched_package};
use crate::improver::resolver::resolve;
use crate::inference::{Inference, MAX_CONFIDENCE};
use crate::purl::PackageIdentity;
use crate::version::cache::UniverseCache;
use crate::version::registry::Registry;
use crate::version::scheme::Scheme;
use crate::version::types::Version;

pub type InferenceOutcome = Result<Vec<Inference>, UnmergeablePackageError>;

pub struct InferenceEmitter {
    cache: Arc<UniverseCache>,
    bound_by_publication_date: bool,
    fixed_version_policy: FixedVersionPolicy,
    concurrency: usize,
}

impl InferenceEmitter {
    pub fn new(cache: Arc<UniverseCache>) -> Self {
        Self {
            cache,
            bound_by_publication_date: true,
            fixed_version_policy: FixedVersionPolicy::default(),
            concurrency: DEFAULT_CONCURRENCY,
        }
    }

    /// Emitter with a fresh universe cache over `registry`
    pub fn from_config(registry: Arc<dyn Registry>, config: &ImproverConfig) -> Self {
        Self::new(Arc::new(UniverseCache::from_config(registry, config)))
            .with_publication_date_bound(config.bound_by_publication_date)
            .with_fixed_version_policy(config.fixed_version_policy)
            .with_concurrency(config.concurrency)
    }

    pub fn with_publication_date_bound(mut self, enabled: bool) -> Self {
        self.bound_by_publication_date = enabled;
        self
    }

    pub fn with_fixed_version_policy(mut self, policy: FixedVersionPolicy) -> Self {
        self.fixed_version_policy = policy;
        self
    }

    /// Zero is treated as one
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn cache(&self) -> &UniverseCache {
        &self.cache
    }

    /// Inferences for one advisory
    ///
    /// Fails only when the advisory's affected packages name more than one
    /// package. Identical inferences from several ranges are emitted once.
    pub async fn infer(&self, advisory: &AdvisoryData) -> InferenceOutcome {
        let Some(merged) = merge(&advisory.affected_packages)? else {
            debug!("Advisory {:?} has no affected packages", advisory.aliases);
            return Ok(Vec::new());
        };
        let identity = merged.identity;

        let until = advisory
            .date_published
            .filter(|_| self.bound_by_publication_date);
        let Some(universe) = self.cache.get_versions(&identity, until).await else {
            warn!("No version universe for {}, emitting no inferences", identity);
            return Ok(Vec::new());
        };
        let scheme = Scheme::for_package_type(identity.package_type());

        let mut inferences: Vec<Inference> = Vec::new();
        for range in &merged.ranges {
            if Some(range.scheme()) != scheme {
                warn!("Skipping range {} of {}: scheme mismatch", range, identity);
                continue;
            }

            let resolution = resolve(range, &universe);
            debug!(
                "Range {} of {}: {} affected, {} unaffected",
                range,
                identity,
                resolution.affected.len(),
                resolution.unaffected.len()
            );

            let vulnerable = with_versions(&identity, resolution.affected.iter());
            let resolved = match self.fixed_version_policy {
                FixedVersionPolicy::PreferExplicitFixed if !merged.fixed_versions.is_empty() => {
                    with_versions(&identity, merged.fixed_versions.iter())
                }
                _ => with_versions(&identity, resolution.unaffected.iter()),
            };

            let matches = nearest_patched_package(&vulnerable, &resolved);
            for (fixed_purl, affected_purls) in group_by_patched(matches) {
                match Inference::from_advisory_data(
                    advisory,
                    MAX_CONFIDENCE,
                    affected_purls,
                    fixed_purl,
                ) {
                    Ok(inference) if !inferences.contains(&inference) => inferences.push(inference),
                    Ok(_) => {}
                    Err(e) => warn!("Dropping inference for {}: {}", identity, e),
                }
            }
        }

        info!(
            "Emitted {} inferences for {} ({:?})",
            inferences.len(),
            identity,
            advisory.aliases
        );
        Ok(inferences)
    }

    /// Like [`infer`](Self::infer), but logs an identity conflict and
    /// returns no inferences for it
    pub async fn get_inferences(&self, advisory: &AdvisoryData) -> Vec<Inference> {
        self.infer(advisory)
            .await
            .inspect_err(|e| error!("Skipping advisory {:?}: {}", advisory.aliases, e))
            .unwrap_or_default()
    }

    /// Process advisories concurrently, one outcome per advisory in input order
    pub async fn emit_batch(&self, advisories: &[AdvisoryData]) -> Vec<InferenceOutcome> {
        let outcomes: Vec<InferenceOutcome> = stream::iter(advisories)
            .map(|advisory| self.infer(advisory))
            .buffered(self.concurrency)
            .collect()
            .await;

        let failed = outcomes.iter().filter(|outcome| outcome.is_err()).count();
        if failed > 0 {
            error!(
                "{} of {} advisories have conflicting package identities",
                failed,
                outcomes.len()
            );
        }
        info!(
            "Processed {} advisories, {} package universes fetched",
            outcomes.len(),
            self.cache.len()
        );
        outcomes
    }
}

fn with_versions<'a>(
    identity: &PackageIdentity,
    versions: impl Iterator<Item = &'a Version>,
) -> Vec<PackageIdentity> {
    versions
        .map(|version| identity.clone().with_version(version.as_str()))
        .collect()
}
