//! Declared dependency structures

use super::{Ecosystem, Version};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A dependency as declared in a manifest file
///
/// `constraint` is the version expression exactly as written (possibly
/// empty when no bound was given); `anchor` is the comparable version
/// extracted from it at parse time, when one could be extracted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclaredDependency {
    /// Package name
    pub name: String,
    /// The ecosystem this dependency belongs to
    pub ecosystem: Ecosystem,
    /// Raw version expression from the manifest
    pub constraint: String,
    /// Comparable version anchor extracted from the constraint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor: Option<Version>,
}

impl DeclaredDependency {
    /// Creates a new declared dependency, extracting the anchor from the
    /// given comparable version text
    pub fn new(
        name: impl Into<String>,
        ecosystem: Ecosystem,
        constraint: impl Into<String>,
        anchor_text: Option<&str>,
    ) -> Self {
        Self {
            name: name.into(),
            ecosystem,
            constraint: constraint.into(),
            anchor: anchor_text.and_then(Version::parse),
        }
    }

    /// Creates a dependency with no usable version bound
    pub fn unbounded(
        name: impl Into<String>,
        ecosystem: Ecosystem,
        constraint: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            ecosystem,
            constraint: constraint.into(),
            anchor: None,
        }
    }

    /// The declared version as shown in the report
    pub fn declared_display(&self) -> String {
        match &self.anchor {
            Some(anchor) => anchor.to_string(),
            None => "Not specified".to_string(),
        }
    }
}

impl fmt::Display for DeclaredDependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.constraint.is_empty() {
            write!(f, "{} [{}]", self.name, self.ecosystem)
        } else {
            write!(f, "{}@{} [{}]", self.name, self.constraint, self.ecosystem)
        }
    }
}
