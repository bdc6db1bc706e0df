//! Manifest parsers for the supported ecosystems
//!
//! A parser turns raw manifest text into the declared dependency list.
//! Whole-file malformation is an error; individual entries that cannot be
//! parsed are skipped so one bad line never aborts the manifest.

mod package_json;
mod requirements_txt;

pub use package_json::PackageJsonParser;
pub use requirements_txt::RequirementsTxtParser;

use crate::domain::{DeclaredDependency, Ecosystem};
use crate::error::ManifestError;
use std::path::Path;

/// Trait for manifest parsers
pub trait ManifestParser {
    /// Parse manifest content into declared dependencies, in declaration order
    fn parse(&self, content: &str) -> Result<Vec<DeclaredDependency>, ManifestError>;

    /// Returns the ecosystem this parser handles
    fn ecosystem(&self) -> Ecosystem;
}

/// Get a manifest parser for the specified ecosystem
pub fn parser_for(ecosystem: Ecosystem) -> Box<dyn ManifestParser> {
    match ecosystem {
        Ecosystem::Npm => Box::new(PackageJsonParser),
        Ecosystem::Pip => Box::new(RequirementsTxtParser),
    }
}

/// The manifest contents handed to the pipeline
///
/// `None` means the manifest file was absent, which is not an error: the
/// ecosystem is simply skipped and gets no report section.
#[derive(Debug, Clone, Default)]
pub struct ManifestSet {
    /// Raw package.json content, if the file was present
    pub package_json: Option<String>,
    /// Raw requirements.txt content, if the file was present
    pub requirements_txt: Option<String>,
}

impl ManifestSet {
    /// Load the requested ecosystems' manifests from a project directory
    ///
    /// Missing files are recorded as absent; unreadable files are errors.
    pub fn from_dir(dir: &Path, ecosystems: &[Ecosystem]) -> Result<Self, ManifestError> {
        let mut set = Self::default();
        for ecosystem in ecosystems {
            let path = dir.join(ecosystem.manifest_filename());
            if !path.is_file() {
                continue;
            }
            let content = std::fs::read_to_string(&path)
                .map_err(|e| ManifestError::read_error(&path, e))?;
            match ecosystem {
                Ecosystem::Npm => set.package_json = Some(content),
                Ecosystem::Pip => set.requirements_txt = Some(content),
            }
        }
        Ok(set)
    }

    /// The raw manifest content for an ecosystem, if present
    pub fn content_for(&self, ecosystem: Ecosystem) -> Option<&str> {
        match ecosystem {
            Ecosystem::Npm => self.package_json.as_deref(),
            Ecosystem::Pip => self.requirements_txt.as_deref(),
        }
    }

    /// Returns true if no manifest was found at all
    pub fn is_empty(&self) -> bool {
        self.package_json.is_none() && self.requirements_txt.is_none()
    }
}
