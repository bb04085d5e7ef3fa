//! Maven version matcher
//!
//! Versions follow Maven's ComparableVersion rules: items are split on `.`,
//! `-` and at digit/letter transitions, known qualifiers are ranked
//! (`alpha < beta < milestone < rc < snapshot < release < sp`) and unknown
//! qualifiers sort after them. `9.0.0.M1 < 9.0.0.RC1 < 9.0.0 < 9.0.0.sp1`.
//!
//! Ranges use interval notation, see [`super::interval`]. A bare version is
//! an exact match.

use std::cmp::Ordering;

use crate::version::matcher::VersionMatcher;
use crate::version::range::RangeSpec;
use crate::version::scheme::Scheme;
use crate::version::types::VersionKey;

use super::interval::{BareVersion, parse_intervals};

pub struct MavenVersionMatcher;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Item {
    Num(u64),
    Qualifier(String),
}

const RELEASE_RANK: usize = 5;

/// Rank of a known qualifier, None for unknown ones
fn qualifier_rank(qualifier: &str) -> Option<usize> {
    match qualifier {
        "alpha" => Some(0),
        "beta" => Some(1),
        "milestone" => Some(2),
        "rc" => Some(3),
        "snapshot" => Some(4),
        "" => Some(RELEASE_RANK),
        "sp" => Some(6),
        _ => None,
    }
}

fn canonical_qualifier(token: &str, followed_by_digit: bool) -> String {
    let token = token.to_ascii_lowercase();
    match token.as_str() {
        "a" if followed_by_digit => "alpha".to_string(),
        "b" if followed_by_digit => "beta".to_string(),
        "m" if followed_by_digit => "milestone".to_string(),
        "cr" => "rc".to_string(),
        "ga" | "final" | "release" => String::new(),
        _ => token,
    }
}

fn compare_qualifiers(a: &str, b: &str) -> Ordering {
    match (qualifier_rank(a), qualifier_rank(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

/// A parsed Maven version, canonical so that `1.0` and `1.0.0.GA` are equal
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MavenVersion {
    items: Vec<Item>,
}

impl MavenVersion {
    pub fn parse(version: &str) -> Option<Self> {
        let version = version.trim();
        if version.is_empty()
            || !version
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_' | '+'))
        {
            return None;
        }

        let mut tokens: Vec<&str> = Vec::new();
        for part in version.split(['.', '-', '_', '+']) {
            let mut rest = part;
            while !rest.is_empty() {
                let numeric = rest.starts_with(|c: char| c.is_ascii_digit());
                let end = rest
                    .find(|c: char| c.is_ascii_digit() != numeric)
                    .unwrap_or(rest.len());
                let (token, tail) = rest.split_at(end);
                tokens.push(token);
                rest = tail;
            }
        }
        if tokens.is_empty() {
            return None;
        }

        let mut items = Vec::with_capacity(tokens.len());
        for (i, token) in tokens.iter().enumerate() {
            if token.starts_with(|c: char| c.is_ascii_digit()) {
                items.push(Item::Num(token.parse().ok()?));
            } else {
                // `1.0.0-M1` is `1-M1`: zeros before a qualifier do not count
                while items.len() > 1 && items.last() == Some(&Item::Num(0)) {
                    items.pop();
                }
                let followed_by_digit = tokens
                    .get(i + 1)
                    .is_some_and(|next| next.starts_with(|c: char| c.is_ascii_digit()));
                items.push(Item::Qualifier(canonical_qualifier(token, followed_by_digit)));
            }
        }

        // Trailing zeros and release qualifiers do not change the ordering
        while items.len() > 1 {
            let droppable = match items.last() {
                Some(Item::Num(n)) => *n == 0,
                Some(Item::Qualifier(q)) => q.is_empty(),
                None => false,
            };
            if !droppable {
                break;
            }
            items.pop();
        }
        Some(Self { items })
    }

    fn item_cmp(left: Option<&Item>, right: Option<&Item>) -> Ordering {
        match (left, right) {
            (Some(Item::Num(a)), Some(Item::Num(b))) => a.cmp(b),
            (Some(Item::Qualifier(a)), Some(Item::Qualifier(b))) => compare_qualifiers(a, b),
            (Some(Item::Num(_)), Some(Item::Qualifier(_))) => Ordering::Greater,
            (Some(Item::Qualifier(_)), Some(Item::Num(_))) => Ordering::Less,
            // A missing item is 0 next to a number and a release next to a qualifier
            (Some(Item::Num(a)), None) => a.cmp(&0),
            (None, Some(Item::Num(b))) => 0.cmp(b),
            (Some(Item::Qualifier(a)), None) => compare_qualifiers(a, ""),
            (None, Some(Item::Qualifier(b))) => compare_qualifiers("", b),
            (None, None) => Ordering::Equal,
        }
    }
}

impl Ord for MavenVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.items.len().max(other.items.len());
        (0..len)
            .map(|i| Self::item_cmp(self.items.get(i), other.items.get(i)))
            .find(|ordering| *ordering != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for MavenVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl VersionMatcher for MavenVersionMatcher {
    fn scheme(&self) -> Scheme {
        Scheme::Maven
    }

    fn parse_key(&self, version: &str) -> Option<VersionKey> {
        MavenVersion::parse(version).map(VersionKey::Maven)
    }

    fn parse_native_range(&self, expression: &str) -> Option<RangeSpec> {
        parse_intervals(expression, BareVersion::Exact, |v| self.parse_key(v))
    }
}
