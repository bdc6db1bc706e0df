//! requirements.txt parser for pip projects
//!
//! Handles one requirement per line:
//! - `requests==2.32.3`
//! - `flask>=2.0,<3.0` (first bound becomes the anchor)
//! - `uvicorn[standard]~=0.30.0` (extras are tolerated and dropped)
//! - bare names with no version bound
//!
//! Blank lines and `#` comments (full-line or inline) are ignored. Lines
//! that do not look like a requirement at all are skipped, never fatal.

use crate::domain::{DeclaredDependency, Ecosystem};
use crate::error::ManifestError;
use crate::manifest::ManifestParser;
use regex::Regex;
use std::sync::LazyLock;

/// Parser for requirements.txt files
pub struct RequirementsTxtParser;

// name, optional extras, then optionally the first comparator + version
static REQUIREMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^([A-Za-z0-9][A-Za-z0-9._-]*)(?:\[[^\]]*\])?\s*(?:(==|>=|<=|~=|!=|<|>)\s*([0-9][0-9A-Za-z.+!*-]*))?",
    )
    .unwrap()
});

impl ManifestParser for RequirementsTxtParser {
    fn parse(&self, content: &str) -> Result<Vec<DeclaredDependency>, ManifestError> {
        let mut dependencies = Vec::new();

        for line in content.lines() {
            let line = strip_comment(line).trim();
            if line.is_empty() {
                continue;
            }
            // pip options (-r, --index-url, ...) are not requirements
            if line.starts_with('-') {
                continue;
            }
            if let Some(dep) = parse_line(line) {
                dependencies.push(dep);
            }
        }

        Ok(dependencies)
    }

    fn ecosystem(&self) -> Ecosystem {
        Ecosystem::Pip
    }
}

/// Drop an inline `#` comment
fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(idx) => &line[..idx],
        None => line,
    }
}

/// Parse one requirement line; returns None for unrecognizable lines
fn parse_line(line: &str) -> Option<DeclaredDependency> {
    // environment markers are not part of the version expression
    let line = line.split(';').next().unwrap_or(line).trim();
    let caps = REQUIREMENT_RE.captures(line)?;

    let name = caps.get(1)?.as_str();
    match (caps.get(2), caps.get(3)) {
        (Some(op), Some(version)) => {
            let constraint = line[op.start()..].trim().to_string();
            Some(DeclaredDependency::new(
                name,
                Ecosystem::Pip,
                constraint,
                Some(version.as_str()),
            ))
        }
        _ => Some(DeclaredDependency::unbounded(name, Ecosystem::Pip, "")),
    }
}
