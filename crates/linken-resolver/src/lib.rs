pub mod comparators;
pub mod range_parser;
pub mod requirement;
pub mod version_utils;

pub use comparators::{Comparator, Range, cmp_precedence};
pub use range_parser::{RangeSet, parse_npm_semver_ranges};
pub use requirement::{VersionRequirement, resolve_requirement};
pub use version_utils::{PartialVersion, parse_partial_version, parse_version};

pub use semver::Version;
