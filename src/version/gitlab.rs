//! GitLab advisory `affected_range` dialect
//!
//! GitLab writes ranges for `gem`, `go`, `npm`, `pypi` and `packagist` with
//! one comparator grammar: `||` separates alternatives, spaces or commas
//! separate the comparators of one alternative (`>=1.0 <1.2 || >=2.0,<2.1`).
//! `maven` and `nuget` ranges use interval notation. Ranges are rewritten
//! into each ecosystem's own grammar before parsing.

use tracing::warn;

use crate::version::error::VersionError;
use crate::version::matchers::npm::collapse_operator_spacing;
use crate::version::range::{Comparator, VersionRange};
use crate::version::scheme::Scheme;

/// GitLab scheme name → purl type
const PURL_TYPE_BY_GITLAB_SCHEME: [(&str, &str); 7] = [
    ("gem", "gem"),
    ("go", "golang"),
    ("maven", "maven"),
    ("npm", "npm"),
    ("nuget", "nuget"),
    ("pypi", "pypi"),
    ("packagist", "composer"),
];

/// Schemes whose ranges use GitLab's comparator grammar
const COMPARATOR_DIALECT: [&str; 5] = ["gem", "go", "npm", "pypi", "packagist"];

pub fn purl_type_for_gitlab_scheme(gitlab_scheme: &str) -> Option<&'static str> {
    PURL_TYPE_BY_GITLAB_SCHEME
        .iter()
        .find(|(scheme, _)| *scheme == gitlab_scheme)
        .map(|(_, purl_type)| *purl_type)
}

pub fn gitlab_scheme_for_purl_type(purl_type: &str) -> Option<&'static str> {
    PURL_TYPE_BY_GITLAB_SCHEME
        .iter()
        .find(|(_, t)| *t == purl_type)
        .map(|(scheme, _)| *scheme)
}

/// Parse a GitLab `affected_range` for a package of `gitlab_scheme`
pub fn parse_affected_range(
    gitlab_scheme: &str,
    affected_range: &str,
) -> Result<VersionRange, VersionError> {
    let scheme = purl_type_for_gitlab_scheme(gitlab_scheme)
        .and_then(Scheme::for_package_type)
        .ok_or_else(|| VersionError::UnsupportedScheme(gitlab_scheme.to_string()))?;

    if !COMPARATOR_DIALECT.contains(&gitlab_scheme) {
        // Interval notation is already native; GitLab sometimes joins intervals with `||`
        let native = affected_range.replace("||", ",");
        return VersionRange::parse(scheme, &native);
    }

    let native = to_native(scheme, affected_range).ok_or_else(|| {
        warn!(
            "Failed to translate GitLab {} range '{}'",
            gitlab_scheme, affected_range
        );
        VersionError::InvalidRange {
            scheme,
            input: affected_range.to_string(),
        }
    })?;
    VersionRange::parse(scheme, &native)
}

/// Rewrite comparator-dialect alternatives with the scheme's own separators
fn to_native(scheme: Scheme, affected_range: &str) -> Option<String> {
    let and_separator = match scheme {
        Scheme::Pypi => ",",
        Scheme::Gem => ", ",
        _ => " ",
    };

    let collapsed = collapse_operator_spacing(affected_range.trim());
    let alternatives: Option<Vec<String>> = collapsed
        .split("||")
        .map(|alternative| {
            let tokens: Vec<String> = alternative
                .split([',', ' ', '\t'])
                .filter(|token| !token.is_empty())
                .map(|token| render_token(scheme, token))
                .collect();
            (!tokens.is_empty()).then(|| tokens.join(and_separator))
        })
        .collect();
    Some(alternatives?.join(" || "))
}

fn render_token(scheme: Scheme, token: &str) -> String {
    // `~>`, `~=`, `^` and `~` are passed through to the native grammar
    if token.starts_with(['~', '^']) {
        return token.to_string();
    }
    let (comparator, version) = Comparator::split_prefix(token);
    let symbol = match (scheme, comparator) {
        (Scheme::Pypi, Comparator::Eq) => "==",
        (_, comparator) => comparator.symbol(),
    };
    format!("{symbol}{version}")
}
