//! Scheme-specific version matchers

pub mod composer;
pub mod crates;
pub mod gem;
pub mod generic;
pub mod go;
pub mod interval;
pub mod maven;
pub mod npm;
pub mod nuget;
pub mod pypi;
pub mod rpm;

pub use composer::ComposerVersionMatcher;
pub use crates::CratesVersionMatcher;
pub use gem::GemVersionMatcher;
pub use generic::GenericVersionMatcher;
pub use go::GoVersionMatcher;
pub use maven::MavenVersionMatcher;
pub use npm::NpmVersionMatcher;
pub use nuget::NugetVersionMatcher;
pub use pypi::PypiVersionMatcher;
pub use rpm::RpmVersionMatcher;
