//! Turn the raw requirement string a consumer declares for a dependency into
//! something that can be matched against local package versions.
//!
//! Accepted forms:
//! - `1.2.3` - exact version
//! - `^1.2.0`, `>=1 <3`, `1.x || 2.x`, ... - npm ranges
//! - `git+https://host/repo.git#v1.2.3` - exact version taken from the fragment
//! - `git+ssh://host/repo.git#semver:^1.2` - range taken from the fragment
//! - anything else (`file:`, `github:user/repo`, `latest`, fragments that are
//!   not versions) - wildcard

use semver::Version;

use crate::comparators::cmp_precedence;
use crate::range_parser::{RangeSet, parse_npm_semver_ranges};
use crate::version_utils::parse_version;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionRequirement {
    Exact(Version),
    Range(RangeSet),
    /// Fallback for requirements that are not versions at all; any local
    /// version satisfies it, prereleases included.
    Wildcard,
}

impl VersionRequirement {
    #[must_use]
    pub fn satisfied_by(&self, version: &Version) -> bool {
        match self {
            Self::Exact(exact) => cmp_precedence(version, exact).is_eq(),
            Self::Range(ranges) => ranges.matches(version),
            Self::Wildcard => true,
        }
    }
}

const SEMVER_FRAGMENT_PREFIX: &str = "semver:";

/// Resolve a declared requirement. `None` means there is no requirement and
/// the dependency should be skipped.
#[must_use]
pub fn resolve_requirement(input: Option<&str>) -> Option<VersionRequirement> {
    let input = input?.trim();
    if input.is_empty() {
        return None;
    }

    if let Some(version) = parse_version(input) {
        return Some(VersionRequirement::Exact(version));
    }

    if let Ok(ranges) = parse_npm_semver_ranges(input) {
        return Some(VersionRequirement::Range(ranges));
    }

    Some(requirement_from_url(input))
}

fn requirement_from_url(input: &str) -> VersionRequirement {
    let Some((_, fragment)) = input.split_once('#') else {
        return VersionRequirement::Wildcard;
    };

    if let Some(range) = fragment.strip_prefix(SEMVER_FRAGMENT_PREFIX) {
        return parse_npm_semver_ranges(range)
            .map_or(VersionRequirement::Wildcard, VersionRequirement::Range);
    }

    parse_version(fragment).map_or(VersionRequirement::Wildcard, VersionRequirement::Exact)
}
