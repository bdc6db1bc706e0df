//! Comparison results and the final report structure

use super::{Ecosystem, Version};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Three-way verdict for a single dependency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Latest published version is not greater than the declared anchor
    UpToDate,
    /// A strictly greater version is published
    Outdated,
    /// Registry lookup failed or no baseline version could be determined
    Unresolved,
}

// Human-readable labels for summary lines; the serde form stays snake_case.
impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Status::UpToDate => "up to date",
            Status::Outdated => "outdated",
            Status::Unresolved => "unresolved",
        };
        write!(f, "{}", label)
    }
}

/// Verdict for one declared dependency
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonResult {
    /// Package name
    pub name: String,
    /// The ecosystem the dependency belongs to
    pub ecosystem: Ecosystem,
    /// Declared version as shown in the report ("Not specified" when absent)
    pub declared: String,
    /// Latest published version, absent when unresolved
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest: Option<Version>,
    /// The verdict
    pub status: Status,
}

impl ComparisonResult {
    /// Creates an unresolved result carrying only the declared constraint
    pub fn unresolved(name: impl Into<String>, ecosystem: Ecosystem, declared: String) -> Self {
        Self {
            name: name.into(),
            ecosystem,
            declared,
            latest: None,
            status: Status::Unresolved,
        }
    }
}

/// One report section: all results for a single ecosystem, in the order
/// the dependencies were declared in the manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EcosystemReport {
    /// The ecosystem this section covers
    pub ecosystem: Ecosystem,
    /// Results in manifest declaration order
    pub results: Vec<ComparisonResult>,
}

impl EcosystemReport {
    /// Creates an empty section for an ecosystem
    pub fn new(ecosystem: Ecosystem) -> Self {
        Self {
            ecosystem,
            results: Vec::new(),
        }
    }

    /// Adds a result to this section
    pub fn push(&mut self, result: ComparisonResult) {
        self.results.push(result);
    }
}

/// The final report: ordered ecosystem sections
///
/// Only ecosystems whose manifest was present appear as sections. Built
/// once per run and then treated as immutable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// Per-ecosystem sections in fixed ecosystem order
    pub sections: Vec<EcosystemReport>,
}

impl Report {
    /// Creates an empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an ecosystem section
    pub fn add_section(&mut self, section: EcosystemReport) {
        self.sections.push(section);
    }

    /// Returns true if no section contains any dependency row
    pub fn is_empty(&self) -> bool {
        self.sections.iter().all(|s| s.results.is_empty())
    }

    /// Iterates all rows across sections
    pub fn rows(&self) -> impl Iterator<Item = &ComparisonResult> {
        self.sections.iter().flat_map(|s| s.results.iter())
    }

    /// Number of rows with the given status
    pub fn count(&self, status: Status) -> usize {
        self.rows().filter(|r| r.status == status).count()
    }

    /// Total number of dependency rows
    pub fn total(&self) -> usize {
        self.rows().count()
    }
}
