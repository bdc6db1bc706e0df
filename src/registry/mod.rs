//! Registry adapters for fetching published package versions
//!
//! This module provides:
//! - HTTP client shared foundation
//! - the abstract `Registry` collaborator interface (one per ecosystem)
//! - npm Registry adapter
//! - PyPI JSON API adapter
//! - `resolve`, which turns a registry answer into structured versions

mod client;
mod npm;
mod pypi;

pub use client::HttpClient;
pub use npm::NpmRegistry;
pub use pypi::PyPiRegistry;

use crate::domain::{Ecosystem, Version};
use crate::error::RegistryError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Abstract registry collaborator: given a package name, return every
/// version identifier the registry currently publishes for it
#[async_trait]
pub trait Registry: Send + Sync {
    /// The ecosystem this registry serves
    fn ecosystem(&self) -> Ecosystem;

    /// The registry name used in error messages
    fn registry_name(&self) -> &'static str;

    /// List all published version strings for a package
    async fn list_versions(&self, package: &str) -> Result<Vec<String>, RegistryError>;
}

/// Create the default registry for an ecosystem
pub fn default_registry(ecosystem: Ecosystem, client: HttpClient) -> Box<dyn Registry> {
    match ecosystem {
        Ecosystem::Npm => Box::new(NpmRegistry::new(client)),
        Ecosystem::Pip => Box::new(PyPiRegistry::new(client)),
    }
}

/// The published versions resolved for one declared dependency
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedVersions {
    /// Package name
    pub name: String,
    /// The ecosystem the package belongs to
    pub ecosystem: Ecosystem,
    /// Parseable published versions, sorted ascending
    pub available: Vec<Version>,
}

impl ResolvedVersions {
    /// The maximum published version
    pub fn latest(&self) -> Option<&Version> {
        self.available.last()
    }
}

/// Resolve the published version set for one package.
///
/// Version identifiers that do not parse are discarded; an answer with no
/// parseable version at all is a failure, never a silent empty set.
pub async fn resolve(
    registry: &dyn Registry,
    package: &str,
) -> Result<ResolvedVersions, RegistryError> {
    let raw = registry.list_versions(package).await?;

    let mut available: Vec<Version> = raw.iter().filter_map(|s| Version::parse(s)).collect();
    if available.is_empty() {
        return Err(RegistryError::no_versions(
            package,
            registry.registry_name(),
        ));
    }
    available.sort();

    Ok(ResolvedVersions {
        name: package.to_string(),
        ecosystem: registry.ecosystem(),
        available,
    })
}
