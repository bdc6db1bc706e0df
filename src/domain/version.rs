//! Structured version values with registry-tolerant parsing and ordering
//!
//! Registries publish a wider variety of version strings than strict semver
//! allows: `v` prefixes, two-segment versions (`1.2`), four-segment versions
//! (`1.2.3.0`), PEP 440 style pre-releases (`1.2.3rc1`). This type accepts
//! all of them and orders them under one rule:
//! - numeric segments compared left to right, missing segments count as zero
//! - a version carrying a pre-release tag sorts strictly before the same
//!   numeric core without one
//! - PEP 440 post-release tags (`post1`, `rev2`) sort strictly after the
//!   same numeric core without one
//! - build metadata (`+...`) and a leading `v` are ignored

use regex::Regex;
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

// Numeric core, then an optional pre-release tag that may be attached
// directly (`1.2.3rc1`) or separated by `-` or `.` (`1.2.3-beta.1`).
static VERSION_RE: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(r"^(\d+(?:\.\d+)*)(?:[-.]?([A-Za-z][0-9A-Za-z.-]*))?$").unwrap()
});

/// A parsed version: dotted numeric segments plus an optional pre-release tag
#[derive(Debug, Clone)]
pub struct Version {
    segments: Vec<u64>,
    pre: Option<String>,
    raw: String,
}

impl Version {
    /// Parse a version string leniently; returns None for unrecognizable input
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        let without_v = trimmed
            .strip_prefix('v')
            .or_else(|| trimmed.strip_prefix('V'))
            .unwrap_or(trimmed);
        // split always yields at least one element
        let body = without_v.split('+').next().unwrap_or(without_v);

        let caps = VERSION_RE.captures(body)?;
        let segments: Vec<u64> = caps
            .get(1)?
            .as_str()
            .split('.')
            .map(|part| part.parse().ok())
            .collect::<Option<Vec<_>>>()?;
        let pre = caps.get(2).map(|m| m.as_str().to_string());
        // `1.x` / `1.2.x` style wildcards are ranges, not concrete versions
        if matches!(pre.as_deref(), Some("x") | Some("X")) {
            return None;
        }

        Some(Self {
            segments,
            pre,
            raw: body.to_string(),
        })
    }

    /// The numeric segments (major, minor, patch, ...)
    pub fn segments(&self) -> &[u64] {
        &self.segments
    }

    /// The pre-release tag, if any
    pub fn pre(&self) -> Option<&str> {
        self.pre.as_deref()
    }

    /// Returns true if this version carries a pre-release tag
    pub fn is_prerelease(&self) -> bool {
        self.pre.is_some()
    }
}

/// PEP 440 post-releases (`1.0.0.post1`, `1.0.0.rev1`) are published
/// after the release they amend, so their tag must sort after the bare
/// numeric core rather than before it like a pre-release tag.
fn is_post_release(tag: &str) -> bool {
    let rest = tag
        .strip_prefix("post")
        .or_else(|| tag.strip_prefix("rev"));
    match rest {
        Some(rest) => rest.is_empty() || rest.starts_with(|c: char| c.is_ascii_digit() || c == '.'),
        None => false,
    }
}

/// Compare two pre-release tags identifier by identifier.
///
/// Numeric identifiers compare numerically and sort before alphanumeric
/// ones; a shorter tag that is a prefix of a longer one sorts first.
fn cmp_pre_tags(a: &str, b: &str) -> Ordering {
    let mut left = a.split('.');
    let mut right = b.split('.');
    loop {
        match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(la), Some(rb)) => {
                let ord = match (la.parse::<u64>(), rb.parse::<u64>()) {
                    (Ok(na), Ok(nb)) => na.cmp(&nb),
                    (Ok(_), Err(_)) => Ordering::Less,
                    (Err(_), Ok(_)) => Ordering::Greater,
                    (Err(_), Err(_)) => la.cmp(rb),
                };
                if ord != Ordering::Equal {
                    return ord;
                }
            }
        }
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.segments.len().max(other.segments.len());
        for i in 0..len {
            let a = self.segments.get(i).copied().unwrap_or(0);
            let b = other.segments.get(i).copied().unwrap_or(0);
            match a.cmp(&b) {
                Ordering::Equal => continue,
                ord => return ord,
            }
        }

        match (&self.pre, &other.pre) {
            (None, None) => Ordering::Equal,
            (Some(a), None) => {
                if is_post_release(a) {
                    Ordering::Greater
                } else {
                    Ordering::Less
                }
            }
            (None, Some(b)) => {
                if is_post_release(b) {
                    Ordering::Less
                } else {
                    Ordering::Greater
                }
            }
            (Some(a), Some(b)) => match (is_post_release(a), is_post_release(b)) {
                (true, false) => Ordering::Greater,
                (false, true) => Ordering::Less,
                _ => cmp_pre_tags(a, b),
            },
        }
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// Equality follows the ordering, not the raw text, so `1.2.3` == `1.2.3.0`.
impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

impl FromStr for Version {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Version::parse(s).ok_or_else(|| format!("unrecognizable version: {}", s))
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    #[test]
    fn test_parse_three_segments() {
        let version = v("1.2.3");
        assert_eq!(version.segments(), &[1, 2, 3]);
        assert!(version.pre().is_none());
    }

    #[test]
    fn test_parse_partial_and_long() {
        assert_eq!(v("1.2").segments(), &[1, 2]);
        assert_eq!(v("1.2.3.4").segments(), &[1, 2, 3, 4]);
        assert_eq!(v("7").segments(), &[7]);
    }

    #[test]
    fn test_parse_v_prefix() {
        assert_eq!(v("v1.9.0"), v("1.9.0"));
    }

    #[test]
    fn test_parse_prerelease_forms() {
        assert_eq!(v("1.0.0-beta").pre(), Some("beta"));
        assert_eq!(v("1.0.0-beta.1").pre(), Some("beta.1"));
        // PEP 440 style with no separator
        assert_eq!(v("2.0.0rc1").pre(), Some("rc1"));
        assert_eq!(v("1.2.3.dev0").pre(), Some("dev0"));
    }

    #[test]
    fn test_parse_build_metadata_ignored() {
        assert_eq!(v("1.2.3+build.5"), v("1.2.3"));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Version::parse("").is_none());
        assert!(Version::parse("latest").is_none());
        assert!(Version::parse("not-a-version").is_none());
        assert!(Version::parse("1.2.x").is_none());
        assert!(Version::parse("^1.2.3").is_none());
    }

    #[test]
    fn test_ordering_numeric() {
        assert!(v("1.9.0") < v("1.10.0"));
        assert!(v("10.0.0") > v("9.9.9"));
        assert!(v("2.0.0") == v("2.0.0"));
    }

    #[test]
    fn test_ordering_implicit_zero_padding() {
        assert!(v("1.2.3") == v("1.2.3.0"));
        assert!(v("1.2") == v("1.2.0"));
        assert!(v("1.2") < v("1.2.1"));
    }

    #[test]
    fn test_ordering_prerelease_before_release() {
        assert!(v("1.0.0-beta") < v("1.0.0"));
        assert!(v("2.0.0rc1") < v("2.0.0"));
        assert!(v("1.0.0-alpha") < v("1.0.0-beta"));
        assert!(v("1.0.0-beta.2") < v("1.0.0-beta.11"));
        assert!(v("1.0.0") < v("1.0.1-alpha"));
    }

    #[test]
    fn test_ordering_post_release_after_release() {
        assert!(v("2.0.0.post1") > v("2.0.0"));
        assert!(v("2.0.0.post1") < v("2.0.1"));
        assert!(v("2.0.0rc1") < v("2.0.0.post1"));
        assert!(v("1.0.0.rev1") > v("1.0.0"));
        // "posted" is an ordinary alphanumeric tag, not a post-release
        assert!(v("1.0.0-posted") < v("1.0.0"));
    }

    #[test]
    fn test_post_release_latest_wins() {
        let versions: Vec<Version> = ["2.0.0", "2.0.0.post1", "2.0.0rc1"]
            .iter()
            .map(|s| v(s))
            .collect();
        assert_eq!(versions.iter().max().unwrap().to_string(), "2.0.0.post1");
    }

    #[test]
    fn test_ordering_mixed_prefix_equality() {
        assert_eq!(v("v1.2.3").cmp(&v("1.2.3")), Ordering::Equal);
    }

    #[test]
    fn test_max_of_set() {
        let versions: Vec<Version> = ["17.0.2", "18.2.0", "18.0.0-rc.1", "16.14.0"]
            .iter()
            .map(|s| v(s))
            .collect();
        assert_eq!(versions.iter().max().unwrap().to_string(), "18.2.0");
    }

    #[test]
    fn test_display_keeps_input_form() {
        assert_eq!(v("1.2.3-beta.1").to_string(), "1.2.3-beta.1");
        // leading v is normalized away
        assert_eq!(v("v1.2.3").to_string(), "1.2.3");
    }

    #[test]
    fn test_serde_roundtrip() {
        let json = serde_json::to_string(&v("1.2.3-rc.1")).unwrap();
        assert_eq!(json, "\"1.2.3-rc.1\"");
        let parsed: Version = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, v("1.2.3-rc.1"));
    }

    #[test]
    fn test_sorting() {
        let mut versions = vec![v("2.0.0"), v("1.0.0"), v("2.0.0-alpha"), v("1.5.0")];
        versions.sort();
        let rendered: Vec<String> = versions.iter().map(|x| x.to_string()).collect();
        assert_eq!(rendered, ["1.0.0", "1.5.0", "2.0.0-alpha", "2.0.0"]);
    }
}
