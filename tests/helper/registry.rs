//! Registry test utilities

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use advisory_improver::InferenceEmitter;
use advisory_improver::PackageIdentity;
use advisory_improver::config::ImproverConfig;
use advisory_improver::version::error::RegistryError;
use advisory_improver::version::registries::InMemoryRegistry;
use advisory_improver::version::registry::Registry;
use advisory_improver::version::types::PackageVersions;

/// In-memory registry that counts fetches and can answer slowly
pub struct CountingRegistry {
    inner: InMemoryRegistry,
    delay: Duration,
    calls: AtomicUsize,
}

impl CountingRegistry {
    pub fn new(inner: InMemoryRegistry) -> Self {
        Self {
            inner,
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Registry for CountingRegistry {
    async fn fetch_all_versions(
        &self,
        package: &PackageIdentity,
    ) -> Result<PackageVersions, RegistryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.inner.fetch_all_versions(package).await
    }
}

/// In-memory registry serving `versions` for each listed package
pub fn create_in_memory_registry(packages: &[(PackageIdentity, Vec<&str>)]) -> InMemoryRegistry {
    packages
        .iter()
        .fold(InMemoryRegistry::new(), |registry, (package, versions)| {
            registry.with_versions(package, versions.iter().copied())
        })
}

pub fn create_test_registry(packages: &[(PackageIdentity, Vec<&str>)]) -> Arc<CountingRegistry> {
    Arc::new(CountingRegistry::new(create_in_memory_registry(packages)))
}

/// Emitter with default settings over `registry`
pub fn create_test_emitter(registry: Arc<CountingRegistry>) -> InferenceEmitter {
    InferenceEmitter::from_config(registry, &ImproverConfig::default())
}
