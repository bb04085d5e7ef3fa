use thiserror::Error;

use crate::version::scheme::Scheme;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VersionError {
    #[error("Invalid {scheme} version: {input:?}")]
    InvalidVersion { scheme: Scheme, input: String },

    #[error("Invalid {scheme} range: {input:?}")]
    InvalidRange { scheme: Scheme, input: String },

    #[error("Unsupported version scheme: {0}")]
    UnsupportedScheme(String),

    #[error("Cannot compare {left} version with {right} version")]
    SchemeMismatch { left: Scheme, right: Scheme },
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Package not found: {0}")]
    NotFound(String),

    #[error("Timed out after {timeout_ms} ms fetching versions of {package}")]
    Timeout { package: String, timeout_ms: u64 },

    #[error("Registry unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}
