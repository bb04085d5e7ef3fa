//! Advisory improver
//!
//! Reduces heterogeneous security advisories to one normalized model: for a
//! package identity, which published versions are vulnerable and which
//! version fixes each of them.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌──────────────────┐
//! │  Advisory   │────▶│   Merger    │────▶│ InferenceEmitter │───▶ Inference
//! │ (importer)  │     │ (advisory)  │     │    (improver)    │
//! └─────────────┘     └─────────────┘     └──────────────────┘
//!                                            │     │      │
//!                                            ▼     ▼      ▼
//!                                 ┌──────────┐ ┌────────┐ ┌─────────┐
//!                                 │ Universe │ │ Range  │ │ Nearest │
//!                                 │  Cache   │ │Resolver│ │ Patched │
//!                                 └──────────┘ └────────┘ └─────────┘
//!                                      │
//!                                      ▼
//!                                 ┌──────────┐
//!                                 │ Registry │
//!                                 └──────────┘
//! ```
//!
//! # Modules
//!
//! - [`purl`]: Package identity (package URL)
//! - [`advisory`]: Normalized advisory records and the affected-package merger
//! - [`inference`]: Confidence-scored inference output
//! - [`version`]: Per-ecosystem version ordering, range parsing and the
//!   version-universe cache
//! - [`improver`]: Range resolver, nearest-patched matcher and inference emitter
//! - [`config`]: Improver configuration
//! - [`logging`]: Tracing subscriber setup

pub mod advisory;
pub mod config;
pub mod improver;
pub mod inference;
pub mod logging;
pub mod purl;
pub mod version;

pub use advisory::{AdvisoryData, AffectedPackage, Reference, UnmergeablePackageError};
pub use improver::emitter::InferenceEmitter;
pub use inference::Inference;
pub use purl::PackageIdentity;
pub use version::range::VersionRange;
pub use version::scheme::Scheme;
pub use version::types::Version;
