use semver::{Prerelease, Version};

/// A version that may be missing trailing components, as written in ranges
/// like `1`, `1.2`, `1.x` or `*`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartialVersion {
    pub major: Option<u64>,
    pub minor: Option<u64>,
    pub patch: Option<u64>,
    pub pre: Prerelease,
}

impl PartialVersion {
    #[must_use]
    pub const fn is_any(&self) -> bool {
        self.major.is_none()
    }

    /// Missing components filled with zero.
    #[must_use]
    pub fn floor(&self) -> Version {
        Version {
            major: self.major.unwrap_or(0),
            minor: self.minor.unwrap_or(0),
            patch: self.patch.unwrap_or(0),
            pre: self.pre.clone(),
            build: semver::BuildMetadata::EMPTY,
        }
    }

    /// The complete version, if every component was given.
    #[must_use]
    pub fn complete(&self) -> Option<Version> {
        self.patch.map(|_| self.floor())
    }

    /// First version above everything this partial version covers, e.g.
    /// `2.0.0` for `1` and `1.3.0` for `1.2`. `None` for `*` or complete
    /// versions.
    pub fn next_bump(&self) -> Result<Option<Version>, String> {
        Ok(match (self.major, self.minor, self.patch) {
            (Some(major), None, _) => Some(Version::new(increment(major)?, 0, 0)),
            (Some(major), Some(minor), None) => {
                Some(Version::new(major, increment(minor)?, 0))
            }
            _ => None,
        })
    }
}

/// `component + 1`, or an error when that no longer fits in a `u64`.
pub(crate) fn increment(component: u64) -> Result<u64, String> {
    component
        .checked_add(1)
        .ok_or_else(|| format!("Version component {component} is too large"))
}

fn strip_loose_prefix(input: &str) -> &str {
    let trimmed = input.trim();
    let trimmed = trimmed.strip_prefix('=').unwrap_or(trimmed).trim_start();
    trimmed.strip_prefix('v').unwrap_or(trimmed)
}

/// Parse a full version, tolerating surrounding whitespace and a leading
/// `v` or `=`.
#[must_use]
pub fn parse_version(input: &str) -> Option<Version> {
    Version::parse(strip_loose_prefix(input)).ok()
}

fn is_wildcard(part: &str) -> bool {
    matches!(part, "x" | "X" | "*")
}

/// Parse a single version string into a `PartialVersion`, handling partial
/// versions and `x`/`*` placeholders.
pub fn parse_partial_version(version_str: &str) -> Result<PartialVersion, String> {
    let cleaned = strip_loose_prefix(version_str);

    if cleaned.is_empty() || is_wildcard(cleaned) {
        return Ok(PartialVersion {
            major: None,
            minor: None,
            patch: None,
            pre: Prerelease::EMPTY,
        });
    }

    let without_build = cleaned.split_once('+').map_or(cleaned, |(core, _)| core);
    let (core, pre) = match without_build.split_once('-') {
        Some((core, pre)) => {
            let pre = Prerelease::new(pre)
                .map_err(|e| format!("Invalid prerelease in '{cleaned}': {e}"))?;
            (core, pre)
        }
        None => (without_build, Prerelease::EMPTY),
    };

    let parts: Vec<&str> = core.split('.').collect();
    if parts.len() > 3 {
        return Err(format!("Invalid version: {cleaned}"));
    }

    let mut numbers = [None; 3];
    for (slot, part) in numbers.iter_mut().zip(&parts) {
        if is_wildcard(part) {
            break;
        }
        let number = part
            .parse::<u64>()
            .map_err(|_| format!("Invalid version component '{part}' in '{cleaned}'"))?;
        *slot = Some(number);
    }
    let [major, minor, patch] = numbers;

    // `1.x.3` keeps only what precedes the first placeholder.
    let (minor, patch) = match (major, minor) {
        (None, _) => (None, None),
        (Some(_), None) => (None, None),
        _ => (minor, patch),
    };

    if !pre.is_empty() && patch.is_none() {
        return Err(format!("Prerelease requires a complete version: {cleaned}"));
    }

    Ok(PartialVersion {
        major,
        minor,
        patch,
        pre,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1.2.3", Some(1), Some(2), Some(3))]
    #[case("v1.2.3", Some(1), Some(2), Some(3))]
    #[case("=1.2", Some(1), Some(2), None)]
    #[case("1", Some(1), None, None)]
    #[case("1.x", Some(1), None, None)]
    #[case("1.2.*", Some(1), Some(2), None)]
    #[case("1.x.3", Some(1), None, None)]
    #[case("*", None, None, None)]
    #[case("", None, None, None)]
    fn test_parse_partial(
        #[case] input: &str,
        #[case] major: Option<u64>,
        #[case] minor: Option<u64>,
        #[case] patch: Option<u64>,
    ) {
        let parsed = parse_partial_version(input).unwrap();
        assert_eq!((parsed.major, parsed.minor, parsed.patch), (major, minor, patch));
    }

    #[rstest]
    #[case("1.2.3.4")]
    #[case("a.b.c")]
    #[case("1.2-beta")]
    fn test_parse_partial_rejects(#[case] input: &str) {
        assert!(parse_partial_version(input).is_err());
    }

    #[test]
    fn test_bounds() {
        let partial = parse_partial_version("1.2").unwrap();
        assert_eq!(partial.floor(), Version::new(1, 2, 0));
        assert_eq!(partial.next_bump(), Ok(Some(Version::new(1, 3, 0))));
        assert_eq!(partial.complete(), None);

        let major_only = parse_partial_version("3").unwrap();
        assert_eq!(major_only.next_bump(), Ok(Some(Version::new(4, 0, 0))));

        let complete = parse_partial_version("1.2.3").unwrap();
        assert_eq!(complete.next_bump(), Ok(None));
    }

    #[rstest]
    #[case("18446744073709551615")]
    #[case("1.18446744073709551615")]
    fn test_next_bump_overflow_is_error(#[case] input: &str) {
        let partial = parse_partial_version(input).unwrap();
        assert!(partial.next_bump().is_err());
    }

    #[test]
    fn test_parse_version_is_loose_about_prefix() {
        assert_eq!(parse_version(" v2.0.0 "), Some(Version::new(2, 0, 0)));
        assert_eq!(parse_version("=1.0.0"), Some(Version::new(1, 0, 0)));
        assert_eq!(parse_version("^1.0.0"), None);
        assert_eq!(parse_version("1.0"), None);
    }
}
