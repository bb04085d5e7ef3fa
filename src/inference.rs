use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::advisory::{AdvisoryData, Reference};
use crate::purl::PackageIdentity;

/// Confidence of an inference resolved against a complete version universe
pub const MAX_CONFIDENCE: u8 = 100;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InferenceError {
    #[error("Confidence must be between 0 and {MAX_CONFIDENCE}, got {0}")]
    InvalidConfidence(u8),

    #[error("Inference has neither affected packages nor a fixed package")]
    Empty,
}

/// Vulnerable package versions that share one fix, or share having none
///
/// `fixed_purl` is `None` (`null` when serialized) when no released version
/// fixes the affected ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inference {
    pub advisory_aliases: BTreeSet<String>,
    pub summary: String,
    pub confidence: u8,
    pub affected_purls: Vec<PackageIdentity>,
    pub fixed_purl: Option<PackageIdentity>,
    pub references: Vec<Reference>,
}

impl Inference {
    /// Repeated affected purls are dropped, keeping the first occurrence
    pub fn new(
        advisory_aliases: BTreeSet<String>,
        summary: impl Into<String>,
        confidence: u8,
        affected_purls: Vec<PackageIdentity>,
        fixed_purl: Option<PackageIdentity>,
        references: Vec<Reference>,
    ) -> Result<Self, InferenceError> {
        if confidence > MAX_CONFIDENCE {
            return Err(InferenceError::InvalidConfidence(confidence));
        }
        if affected_purls.is_empty() && fixed_purl.is_none() {
            return Err(InferenceError::Empty);
        }

        let mut seen = BTreeSet::new();
        let affected_purls = affected_purls
            .into_iter()
            .filter(|purl| seen.insert(purl.clone()))
            .collect();

        Ok(Self {
            advisory_aliases,
            summary: summary.into(),
            confidence,
            affected_purls,
            fixed_purl,
            references,
        })
    }

    /// Inference carrying the aliases, summary and references of `advisory`
    pub fn from_advisory_data(
        advisory: &AdvisoryData,
        confidence: u8,
        affected_purls: Vec<PackageIdentity>,
        fixed_purl: Option<PackageIdentity>,
    ) -> Result<Self, InferenceError> {
        Self::new(
            advisory.aliases.clone(),
            advisory.summary.clone(),
            confidence,
            affected_purls,
            fixed_purl,
            advisory.references.clone(),
        )
    }
}
