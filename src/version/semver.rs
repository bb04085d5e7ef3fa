//! Shared semver utilities for the npm, Cargo, Go and Composer schemes

use semver::{Prerelease, Version};

use crate::version::range::{Comparator, Constraint};
use crate::version::types::VersionKey;

/// Parse a version string into a semver::Version, normalizing partial versions.
///
/// Handles partial versions like "1" or "1.2" by padding with zeros.
/// Does NOT strip 'v' prefix (use `parse_lenient` for that).
///
/// Examples:
/// - "1" -> Version(1, 0, 0)
/// - "1.2" -> Version(1, 2, 0)
/// - "1.2.3" -> Version(1, 2, 3)
/// - "1.2-beta" -> Version(1, 2, 0, pre: beta)
pub fn parse_version(version: &str) -> Option<Version> {
    let (core, suffix) = match version.find(['-', '+']) {
        Some(index) => version.split_at(index),
        None => (version, ""),
    };
    let parts: Vec<&str> = core.split('.').collect();
    let normalized = match parts.len() {
        1 => format!("{}.0.0{}", parts[0], suffix),
        2 => format!("{}.{}.0{}", parts[0], parts[1], suffix),
        _ => version.to_string(),
    };
    Version::parse(&normalized).ok()
}

/// Like `parse_version`, also accepting a leading `v`/`V` (`v1.2.3`)
pub fn parse_lenient(version: &str) -> Option<Version> {
    parse_version(strip_v(version.trim()))
}

fn strip_v(version: &str) -> &str {
    version
        .strip_prefix('v')
        .or_else(|| version.strip_prefix('V'))
        .unwrap_or(version)
}

/// The lowest version of a release line, below all of its prereleases
///
/// `<2.0.0-0` excludes `2.0.0-beta.1` while `<2.0.0` would not.
pub fn floor(major: u64, minor: u64, patch: u64) -> Option<Version> {
    let mut version = Version::new(major, minor, patch);
    version.pre = Prerelease::new("0").ok()?;
    Some(version)
}

/// `>= lower` and `< upper` as a constraint pair
pub fn half_open(lower: Version, upper: Version) -> Vec<Constraint> {
    vec![
        Constraint::new(Comparator::Ge, VersionKey::Semver(lower)),
        Constraint::new(Comparator::Lt, VersionKey::Semver(upper)),
    ]
}

/// Caret semantics shared by npm, Cargo and Composer
///
/// ^1.2.3 -> >=1.2.3 <2.0.0, ^0.2.3 -> >=0.2.3 <0.3.0, ^0.0.3 -> >=0.0.3 <0.0.4
pub fn caret(v: &Version) -> Option<Vec<Constraint>> {
    let upper = if v.major > 0 {
        floor(v.major.checked_add(1)?, 0, 0)?
    } else if v.minor > 0 {
        floor(0, v.minor.checked_add(1)?, 0)?
    } else {
        floor(0, 0, v.patch.checked_add(1)?)?
    };
    Some(half_open(v.clone(), upper))
}

/// Tilde semantics: ~1.2.3 -> >=1.2.3 <1.3.0
pub fn tilde(v: &Version) -> Option<Vec<Constraint>> {
    Some(half_open(v.clone(), floor(v.major, v.minor.checked_add(1)?, 0)?))
}

/// Wildcard `1.x` / `1.*`: every version of the major line
pub fn wildcard_major(major: u64) -> Option<Vec<Constraint>> {
    Some(half_open(floor(major, 0, 0)?, floor(major.checked_add(1)?, 0, 0)?))
}

/// Wildcard `1.2.x` / `1.2.*`: every version of the minor line
pub fn wildcard_minor(major: u64, minor: u64) -> Option<Vec<Constraint>> {
    Some(half_open(
        floor(major, minor, 0)?,
        floor(major, minor.checked_add(1)?, 0)?,
    ))
}

/// A version as written in a range, remembering how many core parts were given
///
/// npm and Cargo read a missing part as "any": `1.2` covers the whole
/// `1.2.x` line, so `<=1.2` is `<1.3.0-0` rather than `<=1.2.0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partial {
    pub version: Version,
    pub parts: usize,
}

impl Partial {
    pub fn parse(version: &str) -> Option<Self> {
        let parts = match version.find(['-', '+']) {
            Some(_) => 3,
            None => version.split('.').count(),
        };
        Some(Self {
            version: parse_version(version)?,
            parts,
        })
    }

    /// Like `parse`, also accepting a leading `v`/`V`
    pub fn parse_lenient(version: &str) -> Option<Self> {
        Self::parse(strip_v(version.trim()))
    }

    fn is_complete(&self) -> bool {
        self.parts >= 3
    }

    /// Major and minor of the next line: `1` -> `2.0`, `1.2` -> `1.3`
    fn next_line(&self) -> Option<(u64, u64)> {
        match self.parts {
            1 => Some((self.version.major.checked_add(1)?, 0)),
            _ => Some((self.version.major, self.version.minor.checked_add(1)?)),
        }
    }

    /// `^1` -> `<2.0.0-0`, `^0` -> `<1.0.0-0`, `^0.0` -> `<0.1.0-0`
    pub fn caret(&self) -> Option<Vec<Constraint>> {
        if self.is_complete() || (self.parts == 2 && self.version.major > 0) {
            return caret(&self.version);
        }
        let (major, minor) = self.next_line()?;
        Some(half_open(self.version.clone(), floor(major, minor, 0)?))
    }

    /// `~1` -> `<2.0.0-0`, `~1.2` -> `<1.3.0-0`
    pub fn tilde(&self) -> Option<Vec<Constraint>> {
        if self.is_complete() {
            return tilde(&self.version);
        }
        let (major, minor) = self.next_line()?;
        Some(half_open(self.version.clone(), floor(major, minor, 0)?))
    }

    /// Apply a comparator, widening a partial version to its whole line
    ///
    /// `1.2` -> `>=1.2.0 <1.3.0-0`, `<1.2` -> `<1.2.0-0`, `<=1.2` -> `<1.3.0-0`,
    /// `>1.2` -> `>=1.3.0`, `>=1.2` -> `>=1.2.0`
    pub fn compare(&self, comparator: Comparator) -> Option<Vec<Constraint>> {
        if self.is_complete() {
            return Some(vec![constraint(comparator, self.version.clone())]);
        }
        let (major, minor) = self.next_line()?;
        let constraints = match comparator {
            Comparator::Eq => half_open(self.version.clone(), floor(major, minor, 0)?),
            Comparator::Lt => {
                let v = &self.version;
                vec![constraint(Comparator::Lt, floor(v.major, v.minor, v.patch)?)]
            }
            Comparator::Le => vec![constraint(Comparator::Lt, floor(major, minor, 0)?)],
            Comparator::Gt => vec![constraint(Comparator::Ge, Version::new(major, minor, 0))],
            Comparator::Ge | Comparator::Ne => {
                vec![constraint(comparator, self.version.clone())]
            }
        };
        Some(constraints)
    }
}

/// Parse a wildcard pattern like "1.x" or "1.2.*" into constraints
pub fn parse_wildcard(spec: &str) -> Option<Vec<Constraint>> {
    let parts: Vec<&str> = spec.split('.').collect();
    let is_wildcard = |s: &str| s.eq_ignore_ascii_case("x") || s == "*";

    match parts.as_slice() {
        [major, x] if is_wildcard(x) => wildcard_major(major.parse().ok()?),
        [major, minor, x] if is_wildcard(x) => {
            wildcard_minor(major.parse().ok()?, minor.parse().ok()?)
        }
        _ => None,
    }
}

/// A single comparator constraint on a semver version
pub fn constraint(comparator: Comparator, version: Version) -> Constraint {
    Constraint::new(comparator, VersionKey::Semver(version))
}
