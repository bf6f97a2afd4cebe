use semver::Version;
use std::cmp::Ordering;

/// Order by semver precedence, ignoring build metadata.
#[must_use]
pub fn cmp_precedence(a: &Version, b: &Version) -> Ordering {
    (a.major, a.minor, a.patch, &a.pre).cmp(&(b.major, b.minor, b.patch, &b.pre))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Comparator {
    Exact(Version),
    GreaterThan(Version),
    GreaterThanOrEqual(Version),
    LessThan(Version),
    LessThanOrEqual(Version),
    Wildcard, // *
}

impl Comparator {
    /// A comparator no version satisfies, e.g. what `<0` or `>*` reduce to.
    #[must_use]
    pub const fn nothing() -> Self {
        Self::LessThan(Version::new(0, 0, 0))
    }

    #[must_use]
    pub fn matches(&self, version: &Version) -> bool {
        match self {
            Self::Exact(v) => cmp_precedence(version, v).is_eq(),
            Self::GreaterThan(v) => cmp_precedence(version, v).is_gt(),
            Self::GreaterThanOrEqual(v) => cmp_precedence(version, v).is_ge(),
            Self::LessThan(v) => cmp_precedence(version, v).is_lt(),
            Self::LessThanOrEqual(v) => cmp_precedence(version, v).is_le(),
            Self::Wildcard => true,
        }
    }

    #[must_use]
    pub const fn version(&self) -> Option<&Version> {
        match self {
            Self::Exact(v)
            | Self::GreaterThan(v)
            | Self::GreaterThanOrEqual(v)
            | Self::LessThan(v)
            | Self::LessThanOrEqual(v) => Some(v),
            Self::Wildcard => None,
        }
    }
}

/// A set of comparators that must all match (an intersection).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Range {
    pub comparators: Vec<Comparator>,
}

impl Range {
    #[must_use]
    pub const fn new(comparators: Vec<Comparator>) -> Self {
        Self { comparators }
    }

    #[must_use]
    pub fn any() -> Self {
        Self::new(vec![Comparator::Wildcard])
    }

    /// Prereleases only match when one of the comparators names a prerelease
    /// of the same `major.minor.patch`, so `^1.2.3-beta.1` admits
    /// `1.2.3-beta.2` but never `1.3.0-alpha`.
    #[must_use]
    pub fn matches(&self, version: &Version) -> bool {
        if !self.comparators.iter().all(|comp| comp.matches(version)) {
            return false;
        }
        if version.pre.is_empty() {
            return true;
        }
        self.comparators
            .iter()
            .filter_map(Comparator::version)
            .any(|allowed| {
                !allowed.pre.is_empty()
                    && allowed.major == version.major
                    && allowed.minor == version.minor
                    && allowed.patch == version.patch
            })
    }
}
