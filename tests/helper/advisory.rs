//! Advisory and inference test utilities

use std::collections::BTreeSet;

use advisory_improver::{AdvisoryData, AffectedPackage, Inference, Reference};

pub fn create_advisory(alias: &str, affected_packages: Vec<AffectedPackage>) -> AdvisoryData {
    AdvisoryData {
        aliases: BTreeSet::from([alias.to_string()]),
        summary: format!("Summary of {alias}"),
        references: vec![Reference::from_url(format!(
            "https://example.org/advisories/{alias}"
        ))],
        date_published: None,
        affected_packages,
    }
}

/// `(affected versions, fixed version)` of each inference
pub fn versions_of(inferences: &[Inference]) -> Vec<(Vec<String>, Option<String>)> {
    inferences
        .iter()
        .map(|inference| {
            (
                inference
                    .affected_purls
                    .iter()
                    .filter_map(|purl| purl.version().map(str::to_string))
                    .collect(),
                inference
                    .fixed_purl
                    .as_ref()
                    .and_then(|purl| purl.version().map(str::to_string)),
            )
        })
        .collect()
}

/// Expected entry of [`versions_of`]
pub fn group(affected: &[&str], fixed: Option<&str>) -> (Vec<String>, Option<String>) {
    (
        affected.iter().map(|v| v.to_string()).collect(),
        fixed.map(str::to_string),
    )
}
