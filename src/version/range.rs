//! Version ranges
//!
//! Every range grammar (ecosystem-native, `vers:` URIs, GitLab's advisory
//! dialect) is translated into one canonical form: a list of alternatives,
//! each alternative a list of comparator constraints that must all hold.
//! PEP 440 specifier sets are kept as parsed by `pep508_rs`.

use std::fmt;
use std::hash::{Hash, Hasher};

use pep508_rs::pep440_rs::VersionSpecifiers;
use tracing::warn;

use crate::version::error::VersionError;
use crate::version::scheme::Scheme;
use crate::version::types::{Version, VersionKey};
use crate::version::vers;

/// Comparison operator of a single constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparator {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl Comparator {
    /// Operators ordered so that longer prefixes are tried first
    const PREFIXES: [(&'static str, Comparator); 7] = [
        (">=", Comparator::Ge),
        ("<=", Comparator::Le),
        ("!=", Comparator::Ne),
        ("==", Comparator::Eq),
        (">", Comparator::Gt),
        ("<", Comparator::Lt),
        ("=", Comparator::Eq),
    ];

    /// Split a leading operator off `token`; a bare version means equality
    pub fn split_prefix(token: &str) -> (Comparator, &str) {
        let token = token.trim();
        for (prefix, comparator) in Self::PREFIXES {
            if let Some(rest) = token.strip_prefix(prefix) {
                return (comparator, rest.trim());
            }
        }
        (Comparator::Eq, token)
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Comparator::Eq => "=",
            Comparator::Ne => "!=",
            Comparator::Lt => "<",
            Comparator::Le => "<=",
            Comparator::Gt => ">",
            Comparator::Ge => ">=",
        }
    }

    pub fn is_lower_bound(&self) -> bool {
        matches!(self, Comparator::Gt | Comparator::Ge)
    }

    pub fn is_upper_bound(&self) -> bool {
        matches!(self, Comparator::Lt | Comparator::Le)
    }
}

/// `comparator version`, e.g. `< 1.0.2`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Constraint {
    pub comparator: Comparator,
    pub version: VersionKey,
}

impl Constraint {
    pub fn new(comparator: Comparator, version: VersionKey) -> Self {
        Self {
            comparator,
            version,
        }
    }

    pub fn satisfied_by(&self, version: &VersionKey) -> bool {
        match self.comparator {
            Comparator::Eq => version == &self.version,
            Comparator::Ne => version != &self.version,
            Comparator::Lt => version < &self.version,
            Comparator::Le => version <= &self.version,
            Comparator::Gt => version > &self.version,
            Comparator::Ge => version >= &self.version,
        }
    }
}

/// Parsed form of a range
#[derive(Debug, Clone)]
pub enum RangeSpec {
    /// Satisfied when every constraint of at least one alternative holds.
    /// An empty alternative matches everything; no alternatives match nothing.
    AnyOf(Vec<Vec<Constraint>>),
    /// PEP 440 specifier sets, any of which may match
    Pep440(Vec<VersionSpecifiers>),
}

impl RangeSpec {
    /// A range matching every version
    pub fn any() -> Self {
        RangeSpec::AnyOf(vec![Vec::new()])
    }

    /// A range with a single alternative
    pub fn all_of(constraints: Vec<Constraint>) -> Self {
        RangeSpec::AnyOf(vec![constraints])
    }

    fn contains(&self, key: &VersionKey) -> bool {
        match self {
            RangeSpec::AnyOf(alternatives) => alternatives
                .iter()
                .any(|all| all.iter().all(|c| c.satisfied_by(key))),
            RangeSpec::Pep440(sets) => match key {
                VersionKey::Pep440(version) => sets.iter().any(|set| set.contains(version)),
                _ => false,
            },
        }
    }
}

/// A range of versions of one scheme, with the expression it was parsed from
///
/// Two ranges are equal when they share scheme and expression; ranges are
/// never merged arithmetically.
#[derive(Debug, Clone)]
pub struct VersionRange {
    scheme: Scheme,
    expression: String,
    spec: RangeSpec,
}

impl VersionRange {
    pub fn new(scheme: Scheme, expression: impl Into<String>, spec: RangeSpec) -> Self {
        Self {
            scheme,
            expression: expression.into(),
            spec,
        }
    }

    /// Parse a range written in the scheme's native grammar
    ///
    /// `vers:` URIs are accepted as well, provided they name the same scheme.
    pub fn parse(scheme: Scheme, expression: &str) -> Result<Self, VersionError> {
        let expression = expression.trim();
        if expression.starts_with("vers:") {
            let range = vers::parse_vers(expression)?;
            if range.scheme != scheme {
                return Err(VersionError::SchemeMismatch {
                    left: scheme,
                    right: range.scheme,
                });
            }
            return Ok(range);
        }

        scheme
            .matcher()
            .parse_native_range(expression)
            .map(|spec| Self::new(scheme, expression, spec))
            .ok_or_else(|| {
                warn!("Failed to parse {} range '{}'", scheme, expression);
                VersionError::InvalidRange {
                    scheme,
                    input: expression.to_string(),
                }
            })
    }

    /// A range matching exactly the listed versions
    ///
    /// Used for sources that enumerate affected versions instead of
    /// publishing a range.
    pub fn from_versions(scheme: Scheme, versions: &[Version]) -> Self {
        let pinned: Vec<&Version> = versions.iter().filter(|v| v.scheme() == scheme).collect();
        let expression = pinned
            .iter()
            .map(|v| v.as_str())
            .collect::<Vec<_>>()
            .join("|");
        let alternatives = pinned
            .iter()
            .map(|v| vec![Constraint::new(Comparator::Eq, v.key().clone())])
            .collect();
        Self::new(scheme, expression, RangeSpec::AnyOf(alternatives))
    }

    /// Every version strictly below `fixed`
    pub fn below(fixed: &Version) -> Self {
        Self::new(
            fixed.scheme(),
            format!("<{}", fixed.as_str()),
            RangeSpec::all_of(vec![Constraint::new(
                Comparator::Lt,
                fixed.key().clone(),
            )]),
        )
    }

    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn spec(&self) -> &RangeSpec {
        &self.spec
    }

    /// Whether `version` satisfies this range
    ///
    /// Versions of another scheme are never contained.
    pub fn contains(&self, version: &Version) -> bool {
        version.scheme() == self.scheme && self.spec.contains(version.key())
    }
}

impl PartialEq for VersionRange {
    fn eq(&self, other: &Self) -> bool {
        self.scheme == other.scheme && self.expression == other.expression
    }
}

impl Eq for VersionRange {}

impl Hash for VersionRange {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.scheme.hash(state);
        self.expression.hash(state);
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.expression.starts_with("vers:") {
            return f.write_str(&self.expression);
        }
        write!(f, "{}:{}", self.scheme, self.expression)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn version(scheme: Scheme, v: &str) -> Version {
        Version::parse(scheme, v).unwrap()
    }

    #[rstest]
    #[case(">=1.0.0", Comparator::Ge, "1.0.0")]
    #[case("<= 2.0", Comparator::Le, "2.0")]
    #[case("!=1.5", Comparator::Ne, "1.5")]
    #[case("==3.0", Comparator::Eq, "3.0")]
    #[case(">1", Comparator::Gt, "1")]
    #[case("<1", Comparator::Lt, "1")]
    #[case("=1.2.3", Comparator::Eq, "1.2.3")]
    #[case("1.2.3", Comparator::Eq, "1.2.3")]
    fn split_prefix_returns_operator_and_version(
        #[case] token: &str,
        #[case] comparator: Comparator,
        #[case] rest: &str,
    ) {
        assert_eq!(Comparator::split_prefix(token), (comparator, rest));
    }

    #[rstest]
    #[case("1.0.0", true)]
    #[case("1.0.1", true)]
    #[case("1.0.2", false)]
    #[case("2.0.0", false)]
    fn parse_native_range_contains_expected(#[case] v: &str, #[case] expected: bool) {
        let range = VersionRange::parse(Scheme::Npm, "<1.0.2").unwrap();
        assert_eq!(range.contains(&version(Scheme::Npm, v)), expected);
    }

    #[test]
    fn parse_accepts_vers_of_same_scheme() {
        let range = VersionRange::parse(Scheme::Npm, "vers:npm/>=1.0.0|<2.0.0").unwrap();
        assert!(range.contains(&version(Scheme::Npm, "1.5.0")));
        assert!(!range.contains(&version(Scheme::Npm, "2.0.0")));
    }

    #[rstest]
    #[case(Scheme::Npm, "vers:npm/<1.0.0", "<1.0.0")]
    #[case(Scheme::Generic, "vers:generic/<1.1.1g", "<1.1.1g")]
    fn vers_range_differs_from_native_range(
        #[case] scheme: Scheme,
        #[case] vers: &str,
        #[case] native: &str,
    ) {
        let vers = VersionRange::parse(scheme, vers).unwrap();
        let native = VersionRange::parse(scheme, native).unwrap();
        assert_ne!(vers, native);
        assert_eq!(vers, VersionRange::parse(scheme, vers.expression()).unwrap());
    }

    #[test]
    fn parse_rejects_vers_of_other_scheme() {
        assert_eq!(
            VersionRange::parse(Scheme::Npm, "vers:pypi/>=1.0"),
            Err(VersionError::SchemeMismatch {
                left: Scheme::Npm,
                right: Scheme::Pypi,
            })
        );
    }

    #[test]
    fn parse_reports_invalid_range() {
        assert_eq!(
            VersionRange::parse(Scheme::Npm, ">=banana"),
            Err(VersionError::InvalidRange {
                scheme: Scheme::Npm,
                input: ">=banana".to_string(),
            })
        );
    }

    #[test]
    fn from_versions_matches_only_listed_versions() {
        let listed = vec![
            version(Scheme::Generic, "1.1.1d"),
            version(Scheme::Generic, "1.1.1e"),
        ];
        let range = VersionRange::from_versions(Scheme::Generic, &listed);

        assert_eq!(range.expression(), "1.1.1d|1.1.1e");
        assert!(range.contains(&version(Scheme::Generic, "1.1.1e")));
        assert!(!range.contains(&version(Scheme::Generic, "1.1.1f")));
    }

    #[test]
    fn from_versions_with_no_versions_matches_nothing() {
        let range = VersionRange::from_versions(Scheme::Npm, &[]);
        assert!(!range.contains(&version(Scheme::Npm, "1.0.0")));
    }

    #[test]
    fn below_excludes_the_fixed_version() {
        let range = VersionRange::below(&version(Scheme::Pypi, "1.1"));

        assert_eq!(range.expression(), "<1.1");
        assert!(range.contains(&version(Scheme::Pypi, "1.0")));
        assert!(!range.contains(&version(Scheme::Pypi, "1.1")));
    }

    #[test]
    fn contains_is_false_for_other_scheme() {
        let range = VersionRange::parse(Scheme::Npm, "*").unwrap();
        assert!(!range.contains(&version(Scheme::Cargo, "1.0.0")));
    }

    #[test]
    fn equality_uses_scheme_and_expression() {
        let a = VersionRange::parse(Scheme::Npm, "<1.0.2").unwrap();
        let b = VersionRange::parse(Scheme::Npm, " <1.0.2 ").unwrap();
        let c = VersionRange::parse(Scheme::Cargo, "<1.0.2").unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.to_string(), "npm:<1.0.2");
    }
}
