//! Version layer: ecosystem version orderings, range grammars and the
//! version universe
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Registry  │────▶│    Cache    │────▶│  Universe   │
//! │  (fetch)    │     │(single-flt) │     │ (Vec<Ver>)  │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                                                │
//! ┌─────────────┐     ┌─────────────┐            ▼
//! │   Scheme    │────▶│   Matcher   │────▶ VersionRange::contains
//! │ (purl type) │     │(parse, cmp) │
//! └─────────────┘     └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`scheme`]: Ecosystem schemes and the scheme → matcher table
//! - [`matcher`]: Version matching trait
//! - [`matchers`]: Scheme-specific orderings and native range grammars
//! - [`types`]: `Version`, comparable keys and registry release lists
//! - [`range`]: `VersionRange` and its canonical form
//! - [`vers`]: `vers:` URIs
//! - [`gitlab`]: GitLab's `affected_range` dialect
//! - [`registry`]: Registry trait for fetching versions
//! - [`registries`]: Concrete registry implementations
//! - [`cache`]: Per-pass universe cache
//! - [`error`]: Error types for parsing and registry operations
//! - [`semver`]: Shared semver utilities

pub mod cache;
pub mod error;
pub mod gitlab;
pub mod matcher;
pub mod matchers;
pub mod range;
pub mod registries;
pub mod registry;
pub mod scheme;
pub mod semver;
pub mod types;
pub mod vers;
