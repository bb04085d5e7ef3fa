//! Composer (Packagist) version matcher
//!
//! Supports Composer version constraints:
//! - `1.2.3`, `=1.2.3`, `v1.2.3` - exact match
//! - `^1.2.3` - next significant release (same as npm caret)
//! - `~1.2` - >=1.2.0 <2.0.0, `~1.2.3` - >=1.2.3 <1.3.0
//! - `1.2.*` - wildcard
//! - `>=1.0 <2.0`, `>=1.0,<2.0` - AND, `<1.0 || >=2.0` or `|` - OR
//! - `1.0 - 2.0` - hyphen range

use crate::version::matcher::VersionMatcher;
use crate::version::range::{Comparator, Constraint, RangeSpec};
use crate::version::scheme::Scheme;
use crate::version::semver::{
    caret, constraint, floor, half_open, parse_lenient, parse_wildcard, tilde,
};
use crate::version::types::VersionKey;

pub struct ComposerVersionMatcher;

/// Composer's tilde only bumps the last given segment's parent
fn composer_tilde(spec: &str) -> Option<Vec<Constraint>> {
    let version = parse_lenient(spec)?;
    let segments = spec
        .split(['-', '+'])
        .next()
        .map(|core| core.split('.').count())
        .unwrap_or(0);
    if segments >= 3 {
        return tilde(&version);
    }
    let upper = floor(version.major.checked_add(1)?, 0, 0)?;
    Some(half_open(version, upper))
}

fn parse_constraint(spec: &str) -> Option<Vec<Constraint>> {
    if spec == "*" {
        return Some(Vec::new());
    }
    if let Some(rest) = spec.strip_prefix('^') {
        return caret(&parse_lenient(rest)?);
    }
    if let Some(rest) = spec.strip_prefix('~') {
        return composer_tilde(rest.trim_start_matches(['v', 'V']));
    }
    if let Some(range) = parse_wildcard(spec.trim_start_matches(['v', 'V'])) {
        return Some(range);
    }

    let (comparator, version) = Comparator::split_prefix(spec);
    Some(vec![constraint(comparator, parse_lenient(version)?)])
}

fn parse_alternative(spec: &str) -> Option<Vec<Constraint>> {
    let spec = spec.trim();
    if spec.is_empty() {
        return None;
    }

    if let Some((from, to)) = spec.split_once(" - ") {
        return Some(vec![
            constraint(Comparator::Ge, parse_lenient(from)?),
            constraint(Comparator::Le, parse_lenient(to)?),
        ]);
    }

    let mut constraints = Vec::new();
    for part in spec.split([' ', ',']).filter(|p| !p.is_empty()) {
        constraints.extend(parse_constraint(part)?);
    }
    Some(constraints)
}

impl VersionMatcher for ComposerVersionMatcher {
    fn scheme(&self) -> Scheme {
        Scheme::Composer
    }

    fn parse_key(&self, version: &str) -> Option<VersionKey> {
        parse_lenient(version).map(VersionKey::Semver)
    }

    fn parse_native_range(&self, expression: &str) -> Option<RangeSpec> {
        let expression = super::npm::collapse_operator_spacing(expression.trim())
            .replace("||", "|");
        if expression.is_empty() {
            return None;
        }
        let alternatives: Option<Vec<Vec<Constraint>>> =
            expression.split('|').map(parse_alternative).collect();
        alternatives.map(RangeSpec::AnyOf)
    }
}
