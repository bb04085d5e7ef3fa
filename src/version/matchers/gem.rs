//! RubyGems version matcher
//!
//! Gem versions are dot-separated segments, numeric or alphabetic
//! (`4.2.0.beta3` is `4 . 2 . 0 . beta . 3`). A version containing a letter
//! is a prerelease and sorts before the release it precedes.
//!
//! Requirements:
//! - `= 1.0`, `!= 1.0`, `> 1.0`, `< 1.0`, `>= 1.0`, `<= 1.0`
//! - `~> 2.2` - pessimistic: >= 2.2, < 3.0
//! - `>= 1.0, < 2.0` - comma-separated, all must hold; `||` for alternatives

use std::cmp::Ordering;

use crate::version::matcher::VersionMatcher;
use crate::version::range::{Comparator, Constraint, RangeSpec};
use crate::version::scheme::Scheme;
use crate::version::types::VersionKey;

pub struct GemVersionMatcher;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Segment {
    Num(u64),
    Str(String),
}

/// A parsed gem version, canonical so that `1.0` and `1.0.0` are equal
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GemVersion {
    segments: Vec<Segment>,
}

impl GemVersion {
    pub fn parse(version: &str) -> Option<Self> {
        let version = version.trim();
        if version.is_empty()
            || !version
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
            || !version.starts_with(|c: char| c.is_ascii_digit())
        {
            return None;
        }

        let normalized = version.replace('-', ".pre.");
        let mut segments = Vec::new();
        for part in normalized.split('.') {
            if part.is_empty() {
                return None;
            }
            segments.extend(split_segment(part)?);
        }

        // Trailing zeros of the release part carry no ordering information
        while matches!(segments.last(), Some(Segment::Num(0))) && segments.len() > 1 {
            segments.pop();
        }
        Some(Self { segments })
    }

    pub fn is_prerelease(&self) -> bool {
        self.segments.iter().any(|s| matches!(s, Segment::Str(_)))
    }
}

/// Upper bound of `~> version`: drop the last release segment and bump the new last
///
/// `~> 2.2` -> `3`, `~> 2.2.0` -> `2.3`, `~> 2` -> `3`. Works on the text
/// because the parsed form drops trailing zeros.
fn pessimistic_upper(version: &str) -> Option<GemVersion> {
    let mut release: Vec<u64> = version
        .trim()
        .split('.')
        .map_while(|part| part.parse().ok())
        .collect();
    if release.len() > 1 {
        release.pop();
    }
    let last = release.last_mut()?;
    *last = last.checked_add(1)?;

    let mut segments: Vec<Segment> = release.into_iter().map(Segment::Num).collect();
    // `.a` sorts below every prerelease of the bumped version
    segments.push(Segment::Str("a".to_string()));
    Some(GemVersion { segments })
}

/// `beta3` -> `beta`, `3`
fn split_segment(part: &str) -> Option<Vec<Segment>> {
    let mut segments = Vec::new();
    let mut rest = part;
    while !rest.is_empty() {
        let numeric = rest.starts_with(|c: char| c.is_ascii_digit());
        let end = rest
            .find(|c: char| c.is_ascii_digit() != numeric)
            .unwrap_or(rest.len());
        let (token, tail) = rest.split_at(end);
        segments.push(if numeric {
            Segment::Num(token.parse().ok()?)
        } else {
            Segment::Str(token.to_string())
        });
        rest = tail;
    }
    Some(segments)
}

impl Ord for GemVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.segments.len().max(other.segments.len());
        let zero = Segment::Num(0);
        for i in 0..len {
            let left = self.segments.get(i).unwrap_or(&zero);
            let right = other.segments.get(i).unwrap_or(&zero);
            let ordering = match (left, right) {
                (Segment::Num(a), Segment::Num(b)) => a.cmp(b),
                (Segment::Str(a), Segment::Str(b)) => a.cmp(b),
                (Segment::Num(_), Segment::Str(_)) => Ordering::Greater,
                (Segment::Str(_), Segment::Num(_)) => Ordering::Less,
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for GemVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn parse_requirement(spec: &str) -> Option<Vec<Constraint>> {
    let spec = spec.trim();
    if let Some(rest) = spec.strip_prefix("~>") {
        let lower = GemVersion::parse(rest)?;
        let upper = pessimistic_upper(rest)?;
        return Some(vec![
            Constraint::new(Comparator::Ge, VersionKey::Gem(lower)),
            Constraint::new(Comparator::Lt, VersionKey::Gem(upper)),
        ]);
    }
    let (comparator, version) = Comparator::split_prefix(spec);
    Some(vec![Constraint::new(
        comparator,
        VersionKey::Gem(GemVersion::parse(version)?),
    )])
}

fn parse_alternative(spec: &str) -> Option<Vec<Constraint>> {
    let spec = spec.trim();
    if spec.is_empty() {
        return None;
    }
    let mut constraints = Vec::new();
    for part in spec.split(',') {
        constraints.extend(parse_requirement(part)?);
    }
    Some(constraints)
}

impl VersionMatcher for GemVersionMatcher {
    fn scheme(&self) -> Scheme {
        Scheme::Gem
    }

    fn parse_key(&self, version: &str) -> Option<VersionKey> {
        GemVersion::parse(version).map(VersionKey::Gem)
    }

    fn parse_native_range(&self, expression: &str) -> Option<RangeSpec> {
        let expression = expression.trim();
        if expression.is_empty() {
            return None;
        }
        if expression == "*" {
            return Some(RangeSpec::any());
        }
        let alternatives: Option<Vec<Vec<Constraint>>> =
            expression.split("||").map(parse_alternative).collect();
        alternatives.map(RangeSpec::AnyOf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::range::VersionRange;
    use crate::version::types::Version;
    use rstest::rstest;

    fn gem(v: &str) -> GemVersion {
        GemVersion::parse(v).unwrap()
    }

    #[rstest]
    #[case("1.0", "1.0.0", Ordering::Equal)]
    #[case("1.0.1", "1.0", Ordering::Greater)]
    #[case("4.2.0.beta3", "4.2.0", Ordering::Less)]
    #[case("4.2.0.beta3", "4.2.0.beta10", Ordering::Less)]
    #[case("4.2.0.beta3", "4.2.0.rc1", Ordering::Less)]
    #[case("1.0.0-rc1", "1.0.0.pre.rc1", Ordering::Equal)]
    #[case("1.10", "1.9", Ordering::Greater)]
    fn gem_versions_order_as_expected(
        #[case] left: &str,
        #[case] right: &str,
        #[case] expected: Ordering,
    ) {
        assert_eq!(gem(left).cmp(&gem(right)), expected);
    }

    #[rstest]
    #[case("")]
    #[case("beta")]
    #[case("1..0")]
    #[case("1.0 2.0")]
    fn gem_rejects_invalid_versions(#[case] version: &str) {
        assert!(GemVersion::parse(version).is_none());
    }

    #[test]
    fn prerelease_detection() {
        assert!(gem("5.0.0.rc1").is_prerelease());
        assert!(!gem("5.0.0").is_prerelease());
    }

    #[rstest]
    #[case("~> 2.2", "2.9", true)]
    #[case("~> 2.2", "3.0", false)]
    #[case("~> 2.2", "3.0.0.beta1", false)]
    #[case("~> 2.2.0", "2.2.9", true)]
    #[case("~> 2.2.0", "2.3.0", false)]
    #[case(">= 4.2.0, < 4.2.5.1", "4.2.5", true)]
    #[case(">= 4.2.0, < 4.2.5.1", "4.2.5.1", false)]
    #[case("< 4.1.14.1 || >= 4.2.0, < 4.2.5.1", "4.1.0", true)]
    #[case("< 4.1.14.1 || >= 4.2.0, < 4.2.5.1", "4.1.15", false)]
    #[case("!= 1.0", "1.0.0", false)]
    #[case("= 1.0", "1.0.0", true)]
    fn gem_requirement_contains_expected(
        #[case] spec: &str,
        #[case] version: &str,
        #[case] expected: bool,
    ) {
        let range = VersionRange::parse(Scheme::Gem, spec).unwrap();
        assert_eq!(
            range.contains(&Version::parse(Scheme::Gem, version).unwrap()),
            expected
        );
    }

    #[rstest]
    #[case("~> 18446744073709551615")]
    #[case("~> 1.18446744073709551615.0")]
    #[case(">= 1.0,")]
    fn gem_rejects_unbounded_requirement(#[case] spec: &str) {
        assert!(VersionRange::parse(Scheme::Gem, spec).is_err());
    }
}
