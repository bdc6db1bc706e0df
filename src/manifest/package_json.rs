//! package.json parser for npm projects
//!
//! Handles:
//! - dependencies
//! - devDependencies
//!
//! The dependency set is the union of both maps. A name appearing in both
//! keeps its first position but takes the last-seen constraint, matching
//! what npm itself effectively installs.

use crate::domain::{DeclaredDependency, Ecosystem};
use crate::error::ManifestError;
use crate::manifest::ManifestParser;
use serde_json::Value;
use std::collections::HashMap;

/// Parser for package.json files
pub struct PackageJsonParser;

const DEPENDENCY_KEYS: [&str; 2] = ["dependencies", "devDependencies"];

impl ManifestParser for PackageJsonParser {
    fn parse(&self, content: &str) -> Result<Vec<DeclaredDependency>, ManifestError> {
        let json: Value = serde_json::from_str(content)
            .map_err(|e| ManifestError::malformed("package.json", e.to_string()))?;

        if !json.is_object() {
            return Err(ManifestError::malformed(
                "package.json",
                "expected a JSON object at the top level",
            ));
        }

        let mut dependencies: Vec<DeclaredDependency> = Vec::new();
        let mut index_by_name: HashMap<String, usize> = HashMap::new();

        for key in DEPENDENCY_KEYS {
            let Some(map) = json.get(key).and_then(|v| v.as_object()) else {
                continue;
            };
            for (name, value) in map {
                // non-string values (workspace objects etc.) are skipped
                let Some(range) = value.as_str() else {
                    continue;
                };
                let dep = parse_entry(name, range);
                match index_by_name.get(name) {
                    Some(&idx) => dependencies[idx] = dep,
                    None => {
                        index_by_name.insert(name.clone(), dependencies.len());
                        dependencies.push(dep);
                    }
                }
            }
        }

        Ok(dependencies)
    }

    fn ecosystem(&self) -> Ecosystem {
        Ecosystem::Npm
    }
}

/// Build a declared dependency from one `"name": "range"` entry
fn parse_entry(name: &str, range: &str) -> DeclaredDependency {
    match strip_range_prefix(range) {
        Some(anchor) => DeclaredDependency::new(name, Ecosystem::Npm, range, Some(&anchor)),
        None => DeclaredDependency::unbounded(name, Ecosystem::Npm, range),
    }
}

/// Strip leading range operators (`^`, `~`, `>=`, `<=`, `>`, `<`, `=`)
/// and a `v` prefix to obtain the comparable version anchor.
///
/// Returns None when nothing version-like remains (`*`, `latest`,
/// `workspace:*`, git URLs and the like).
fn strip_range_prefix(range: &str) -> Option<String> {
    let stripped = range
        .trim()
        .trim_start_matches(['^', '~', '>', '<', '=', ' '])
        .trim();
    let stripped = stripped.strip_prefix('v').unwrap_or(stripped);

    if stripped.starts_with(|c: char| c.is_ascii_digit()) {
        Some(stripped.to_string())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Version;

    fn parse(content: &str) -> Result<Vec<DeclaredDependency>, ManifestError> {
        PackageJsonParser.parse(content)
    }

    #[test]
    fn test_parse_simple_dependencies() {
        let content = r#"{
            "dependencies": {
                "lodash": "^4.17.21",
                "express": "~4.18.2"
            }
        }"#;

        let deps = parse(content).unwrap();
        assert_eq!(deps.len(), 2);
        assert_eq!(deps[0].name, "lodash");
        assert_eq!(deps[0].constraint, "^4.17.21");
        assert_eq!(deps[0].anchor, Version::parse("4.17.21"));
        assert_eq!(deps[1].name, "express");
        assert_eq!(deps[1].anchor, Version::parse("4.18.2"));
    }

    #[test]
    fn test_parse_union_of_dependencies_and_dev_dependencies() {
        let content = r#"{
            "dependencies": { "react": "^17.0.2" },
            "devDependencies": { "typescript": ">=5.0.0" }
        }"#;

        let deps = parse(content).unwrap();
        let names: Vec<&str> = deps.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["react", "typescript"]);
    }

    #[test]
    fn test_parse_duplicate_name_last_seen_wins() {
        let content = r#"{
            "dependencies": { "react": "^17.0.2", "lodash": "^4.17.21" },
            "devDependencies": { "react": "^18.2.0" }
        }"#;

        let deps = parse(content).unwrap();
        assert_eq!(deps.len(), 2);
        // first position kept, devDependencies value wins
        assert_eq!(deps[0].name, "react");
        assert_eq!(deps[0].constraint, "^18.2.0");
        assert_eq!(deps[1].name, "lodash");
    }

    #[test]
    fn test_parse_preserves_declaration_order() {
        let content = r#"{
            "dependencies": {
                "zzz": "1.0.0",
                "aaa": "2.0.0",
                "mmm": "3.0.0"
            }
        }"#;

        let deps = parse(content).unwrap();
        let names: Vec<&str> = deps.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["zzz", "aaa", "mmm"]);
    }

    #[test]
    fn test_parse_comparison_prefixes() {
        let content = r#"{
            "dependencies": {
                "a": ">=1.2.3",
                "b": "<=2.0.0",
                "c": ">3.0.0",
                "d": "=4.0.0",
                "e": "v5.0.0"
            }
        }"#;

        let deps = parse(content).unwrap();
        let anchors: Vec<String> = deps.iter().map(|d| d.declared_display()).collect();
        assert_eq!(anchors, ["1.2.3", "2.0.0", "3.0.0", "4.0.0", "5.0.0"]);
    }

    #[test]
    fn test_parse_non_version_ranges_are_unbounded() {
        let content = r#"{
            "dependencies": {
                "anything": "*",
                "local": "file:../local",
                "tagged": "latest",
                "ws": "workspace:*"
            }
        }"#;

        let deps = parse(content).unwrap();
        assert_eq!(deps.len(), 4);
        for dep in &deps {
            assert!(dep.anchor.is_none(), "{} should have no anchor", dep.name);
            assert_eq!(dep.declared_display(), "Not specified");
        }
    }

    #[test]
    fn test_parse_non_string_entries_skipped() {
        let content = r#"{
            "dependencies": {
                "good": "1.0.0",
                "weird": { "version": "2.0.0" }
            }
        }"#;

        let deps = parse(content).unwrap();
        assert_eq!(deps.len(), 1);
        assert_eq!(deps[0].name, "good");
    }

    #[test]
    fn test_parse_no_dependency_sections() {
        let deps = parse(r#"{ "name": "my-app", "version": "0.1.0" }"#).unwrap();
        assert!(deps.is_empty());
    }

    #[test]
    fn test_parse_invalid_json_is_hard_failure() {
        let err = parse("{ not json").unwrap_err();
        assert!(matches!(err, ManifestError::Malformed { .. }));
    }

    #[test]
    fn test_parse_non_object_root_is_hard_failure() {
        let err = parse(r#"["not", "an", "object"]"#).unwrap_err();
        assert!(matches!(err, ManifestError::Malformed { .. }));
    }

    #[test]
    fn test_strip_range_prefix() {
        assert_eq!(strip_range_prefix("^1.2.3").as_deref(), Some("1.2.3"));
        assert_eq!(strip_range_prefix("~1.2.3").as_deref(), Some("1.2.3"));
        assert_eq!(strip_range_prefix(">= 1.2.3").as_deref(), Some("1.2.3"));
        assert_eq!(strip_range_prefix("1.2.3").as_deref(), Some("1.2.3"));
        assert_eq!(strip_range_prefix("v1.2.3").as_deref(), Some("1.2.3"));
        assert!(strip_range_prefix("*").is_none());
        assert!(strip_range_prefix("latest").is_none());
        assert!(strip_range_prefix("").is_none());
    }
}
