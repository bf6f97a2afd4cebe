use semver::Version;

use crate::comparators::{Comparator, Range};
use crate::version_utils::{PartialVersion, increment, parse_partial_version};

/// A union of [`Range`]s, i.e. a parsed npm range such as
/// `^1.2.0 || >=3.0.0 <3.4.0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeSet {
    pub ranges: Vec<Range>,
}

impl RangeSet {
    #[must_use]
    pub fn matches(&self, version: &Version) -> bool {
        self.ranges.iter().any(|range| range.matches(version))
    }
}

pub fn parse_npm_semver_ranges(range_str: &str) -> Result<RangeSet, String> {
    let range_str = range_str.trim();

    if range_str.is_empty() || range_str == "*" {
        return Ok(RangeSet {
            ranges: vec![Range::any()],
        });
    }

    let mut ranges = Vec::new();
    for clause in range_str.split("||") {
        let clause = clause.trim();
        // `1.x || ` is treated like `1.x || *`, as npm does.
        if clause.is_empty() {
            ranges.push(Range::any());
            continue;
        }
        ranges.push(parse_range_clause(clause)?);
    }

    Ok(RangeSet { ranges })
}

fn parse_range_clause(clause: &str) -> Result<Range, String> {
    if let Some((low, high)) = clause.split_once(" - ") {
        return parse_hyphen_range(low, high);
    }

    let mut comparators = Vec::new();
    let mut remaining = clause;

    while !remaining.is_empty() {
        remaining = remaining.trim();
        if remaining.is_empty() {
            break;
        }

        let (op, rest) = split_operator(remaining);
        let (version_str, next) = extract_version_and_remaining(rest)?;
        let partial = parse_partial_version(&version_str)?;
        desugar(op, &partial, &mut comparators)?;
        remaining = next;
    }

    if comparators.is_empty() {
        return Ok(Range::any());
    }

    Ok(Range::new(comparators))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operator {
    Eq,
    Gt,
    Gte,
    Lt,
    Lte,
    Caret,
    Tilde,
}

fn split_operator(input: &str) -> (Operator, &str) {
    const OPERATORS: [(&str, Operator); 8] = [
        (">=", Operator::Gte),
        ("<=", Operator::Lte),
        ("~>", Operator::Tilde),
        (">", Operator::Gt),
        ("<", Operator::Lt),
        ("^", Operator::Caret),
        ("~", Operator::Tilde),
        ("=", Operator::Eq),
    ];

    OPERATORS
        .iter()
        .find_map(|(prefix, op)| input.strip_prefix(prefix).map(|rest| (*op, rest)))
        .unwrap_or((Operator::Eq, input))
}

fn extract_version_and_remaining(input: &str) -> Result<(String, &str), String> {
    let input = input.trim_start();

    if input.is_empty() {
        return Err("Expected version string but found end of input".to_string());
    }

    let end_pos = input
        .char_indices()
        .find(|&(i, c)| c.is_whitespace() || (i > 0 && ['>', '<', '^', '~'].contains(&c)))
        .map_or(input.len(), |(i, _)| i);

    let (version_str, remaining) = input.split_at(end_pos);
    let version_str = version_str.trim();

    if version_str.is_empty() {
        return Err("Empty version string found".to_string());
    }

    Ok((version_str.to_string(), remaining))
}

fn desugar(
    op: Operator,
    partial: &PartialVersion,
    out: &mut Vec<Comparator>,
) -> Result<(), String> {
    let floor = partial.floor();

    match op {
        Operator::Eq => match (partial.complete(), partial.next_bump()?) {
            (Some(exact), _) => out.push(Comparator::Exact(exact)),
            (None, Some(bump)) => {
                out.push(Comparator::GreaterThanOrEqual(floor));
                out.push(Comparator::LessThan(bump));
            }
            (None, None) => out.push(Comparator::Wildcard),
        },
        Operator::Gt => {
            if partial.is_any() {
                out.push(Comparator::nothing());
            } else if let Some(bump) = partial.next_bump()? {
                out.push(Comparator::GreaterThanOrEqual(bump));
            } else {
                out.push(Comparator::GreaterThan(floor));
            }
        }
        Operator::Gte => {
            if partial.is_any() {
                out.push(Comparator::Wildcard);
            } else {
                out.push(Comparator::GreaterThanOrEqual(floor));
            }
        }
        Operator::Lt => {
            if partial.is_any() {
                out.push(Comparator::nothing());
            } else {
                out.push(Comparator::LessThan(floor));
            }
        }
        Operator::Lte => {
            if partial.is_any() {
                out.push(Comparator::Wildcard);
            } else if let Some(bump) = partial.next_bump()? {
                out.push(Comparator::LessThan(bump));
            } else {
                out.push(Comparator::LessThanOrEqual(floor));
            }
        }
        Operator::Tilde => {
            // ~1.2.3 := >=1.2.3 <1.3.0, ~1.2 := >=1.2.0 <1.3.0, ~1 := >=1.0.0 <2.0.0
            let Some(major) = partial.major else {
                out.push(Comparator::Wildcard);
                return Ok(());
            };
            let upper = match partial.minor {
                Some(minor) => Version::new(major, increment(minor)?, 0),
                None => Version::new(increment(major)?, 0, 0),
            };
            out.push(Comparator::GreaterThanOrEqual(floor));
            out.push(Comparator::LessThan(upper));
        }
        Operator::Caret => {
            // ^1.2.3 := >=1.2.3 <2.0.0
            // ^0.2.3 := >=0.2.3 <0.3.0
            // ^0.0.3 := >=0.0.3 <0.0.4
            let Some(major) = partial.major else {
                out.push(Comparator::Wildcard);
                return Ok(());
            };
            let upper = match (major, partial.minor, partial.patch) {
                (0, Some(0), Some(patch)) => Version::new(0, 0, increment(patch)?),
                (0, Some(minor), _) => Version::new(0, increment(minor)?, 0),
                _ => Version::new(increment(major)?, 0, 0),
            };
            out.push(Comparator::GreaterThanOrEqual(floor));
            out.push(Comparator::LessThan(upper));
        }
    }

    Ok(())
}

fn parse_hyphen_range(low: &str, high: &str) -> Result<Range, String> {
    let low = parse_partial_version(low)?;
    let high = parse_partial_version(high)?;
    let mut comparators = Vec::new();

    if !low.is_any() {
        comparators.push(Comparator::GreaterThanOrEqual(low.floor()));
    }

    if let Some(exact) = high.complete() {
        comparators.push(Comparator::LessThanOrEqual(exact));
    } else if let Some(bump) = high.next_bump()? {
        comparators.push(Comparator::LessThan(bump));
    }

    if comparators.is_empty() {
        return Ok(Range::any());
    }

    Ok(Range::new(comparators))
}
