//! RPM version matcher
//!
//! Versions are `[epoch:]version[-release]`. Version and release compare
//! with rpmvercmp: alphanumeric segments are compared left to right,
//! numeric segments numerically and alphabetic ones lexically, a numeric
//! segment is newer than an alphabetic one, `~` sorts before anything
//! (`1.0~rc1 < 1.0`) and `^` sorts after the base but before any further
//! segment (`1.0 < 1.0^git1 < 1.0.1`).
//!
//! Ranges use the `|`-separated comparator list of `vers:` URIs.

use std::cmp::Ordering;

use crate::version::matcher::VersionMatcher;
use crate::version::range::RangeSpec;
use crate::version::scheme::Scheme;
use crate::version::types::VersionKey;
use crate::version::vers::parse_constraints;

pub struct RpmVersionMatcher;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Token {
    Tilde,
    Caret,
    /// Digits with leading zeros stripped
    Num(String),
    Alpha(String),
}

/// Characters that belong to range syntax and never to a version
const RESERVED: &[char] = &['<', '>', '=', '!', '*', '|', ','];

/// A version compared segment by segment with rpmvercmp rules
///
/// Also the ordering of the generic scheme.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SegmentedVersion {
    tokens: Vec<Token>,
}

impl SegmentedVersion {
    pub fn parse(version: &str) -> Option<Self> {
        let version = version.trim();
        if version.is_empty()
            || version
                .chars()
                .any(|c| c.is_whitespace() || RESERVED.contains(&c))
        {
            return None;
        }

        let mut tokens = Vec::new();
        let mut chars = version.char_indices().peekable();
        while let Some((start, c)) = chars.next() {
            match c {
                '~' => tokens.push(Token::Tilde),
                '^' => tokens.push(Token::Caret),
                c if c.is_ascii_alphanumeric() => {
                    let numeric = c.is_ascii_digit();
                    let mut end = start + c.len_utf8();
                    while let Some(&(i, next)) = chars.peek() {
                        let same_kind = if numeric {
                            next.is_ascii_digit()
                        } else {
                            next.is_ascii_alphabetic()
                        };
                        if !same_kind {
                            break;
                        }
                        end = i + next.len_utf8();
                        chars.next();
                    }
                    let segment = &version[start..end];
                    tokens.push(if numeric {
                        Token::Num(segment.trim_start_matches('0').to_string())
                    } else {
                        Token::Alpha(segment.to_string())
                    });
                }
                // Any other character separates segments
                _ => {}
            }
        }

        if tokens.is_empty() {
            return None;
        }
        Some(Self { tokens })
    }
}

impl Ord for SegmentedVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let mut left = self.tokens.iter();
        let mut right = other.tokens.iter();
        loop {
            let ordering = match (left.next(), right.next()) {
                (None, None) => return Ordering::Equal,
                (Some(Token::Tilde), Some(Token::Tilde)) => continue,
                (Some(Token::Tilde), _) => return Ordering::Less,
                (_, Some(Token::Tilde)) => return Ordering::Greater,
                (Some(Token::Caret), Some(Token::Caret)) => continue,
                (None, Some(Token::Caret)) => return Ordering::Less,
                (Some(Token::Caret), None) => return Ordering::Greater,
                (Some(Token::Caret), Some(_)) => return Ordering::Less,
                (Some(_), Some(Token::Caret)) => return Ordering::Greater,
                (None, Some(_)) => return Ordering::Less,
                (Some(_), None) => return Ordering::Greater,
                (Some(Token::Num(a)), Some(Token::Num(b))) => {
                    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
                }
                (Some(Token::Alpha(a)), Some(Token::Alpha(b))) => a.cmp(b),
                (Some(Token::Num(_)), Some(Token::Alpha(_))) => Ordering::Greater,
                (Some(Token::Alpha(_)), Some(Token::Num(_))) => Ordering::Less,
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
    }
}

impl PartialOrd for SegmentedVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// `[epoch:]version[-release]`; a missing epoch is 0 and a missing release
/// sorts before any release
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RpmVersion {
    epoch: u64,
    version: SegmentedVersion,
    release: Option<SegmentedVersion>,
}

impl RpmVersion {
    pub fn parse(evr: &str) -> Option<Self> {
        let evr = evr.trim();
        let (epoch, rest) = match evr.split_once(':') {
            Some((epoch, rest)) => (epoch.parse().ok()?, rest),
            None => (0, evr),
        };
        let (version, release) = match rest.rsplit_once('-') {
            Some((version, release)) => (version, Some(SegmentedVersion::parse(release)?)),
            None => (rest, None),
        };
        Some(Self {
            epoch,
            version: SegmentedVersion::parse(version)?,
            release,
        })
    }
}

impl VersionMatcher for RpmVersionMatcher {
    fn scheme(&self) -> Scheme {
        Scheme::Rpm
    }

    fn parse_key(&self, version: &str) -> Option<VersionKey> {
        RpmVersion::parse(version).map(VersionKey::Rpm)
    }

    fn parse_native_range(&self, expression: &str) -> Option<RangeSpec> {
        parse_constraints(expression, |v| self.parse_key(v))
    }
}
