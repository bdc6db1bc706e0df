//! Report pipeline: parse manifests, resolve registries, compare, assemble
//!
//! This module coordinates the whole run:
//! - one registry per ecosystem behind the abstract `Registry` interface
//! - concurrent per-dependency resolution behind a shared semaphore
//! - a per-call deadline so one unreachable package never stalls the run
//! - results joined back by declaration index, never by completion order
//! - whole-manifest failures reported next to the report, never instead
//!   of it

use crate::check::compare;
use crate::domain::{Ecosystem, EcosystemReport, Report};
use crate::error::{ManifestError, RegistryError};
use crate::manifest::{parser_for, ManifestSet};
use crate::registry::{default_registry, resolve, HttpClient, Registry, ResolvedVersions};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Default number of concurrent registry requests
const DEFAULT_CONCURRENCY: usize = 8;

/// Default per-request deadline
const DEFAULT_DEADLINE: Duration = Duration::from_secs(30);

/// Default retry attempts for transient registry failures
const DEFAULT_RETRIES: u32 = 2;

/// Pipeline configuration
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Maximum concurrent registry requests
    pub concurrency: usize,
    /// Deadline applied to each registry resolution
    pub deadline: Duration,
    /// Retry attempts for transient registry failures
    pub retries: u32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            deadline: DEFAULT_DEADLINE,
            retries: DEFAULT_RETRIES,
        }
    }
}

/// A whole-manifest failure for one ecosystem
#[derive(Debug)]
pub struct EcosystemFailure {
    /// The ecosystem whose manifest failed
    pub ecosystem: Ecosystem,
    /// The underlying manifest error
    pub error: ManifestError,
}

impl std::fmt::Display for EcosystemFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.ecosystem, self.error)
    }
}

/// Result of a pipeline run: the report is always produced; hard
/// per-ecosystem failures ride alongside it
#[derive(Debug)]
pub struct PipelineResult {
    /// The assembled report
    pub report: Report,
    /// Whole-manifest failures encountered during the run
    pub errors: Vec<EcosystemFailure>,
}

/// The report pipeline
pub struct Pipeline {
    registries: HashMap<Ecosystem, Arc<dyn Registry>>,
    semaphore: Arc<Semaphore>,
    deadline: Duration,
}

impl Pipeline {
    /// Create a pipeline backed by the real npm and PyPI registries
    pub fn new(config: PipelineConfig) -> Result<Self, RegistryError> {
        let client = HttpClient::new()?.with_max_retries(config.retries);
        let registries = Ecosystem::all()
            .iter()
            .map(|&eco| (eco, Arc::from(default_registry(eco, client.clone()))))
            .collect();
        Ok(Self::from_parts(registries, config))
    }

    /// Create a pipeline with caller-supplied registries (used in tests to
    /// inject mocks)
    pub fn with_registries(registries: Vec<Arc<dyn Registry>>, config: PipelineConfig) -> Self {
        let registries = registries
            .into_iter()
            .map(|r| (r.ecosystem(), r))
            .collect();
        Self::from_parts(registries, config)
    }

    fn from_parts(
        registries: HashMap<Ecosystem, Arc<dyn Registry>>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            registries,
            semaphore: Arc::new(Semaphore::new(config.concurrency.max(1))),
            deadline: config.deadline,
        }
    }

    /// Run the pipeline over the given manifest contents
    pub async fn run(&self, manifests: &ManifestSet) -> PipelineResult {
        let mut report = Report::new();
        let mut errors = Vec::new();

        for &ecosystem in Ecosystem::all() {
            let Some(content) = manifests.content_for(ecosystem) else {
                continue;
            };

            let parser = parser_for(ecosystem);
            let dependencies = match parser.parse(content) {
                Ok(deps) => deps,
                Err(error) => {
                    errors.push(EcosystemFailure { ecosystem, error });
                    continue;
                }
            };

            let mut resolutions = self.resolve_all(ecosystem, &dependencies).await;

            let mut section = EcosystemReport::new(ecosystem);
            for (dep, resolution) in dependencies.iter().zip(resolutions.drain(..)) {
                section.push(compare(dep, resolution));
            }
            report.add_section(section);
        }

        PipelineResult { report, errors }
    }

    /// Resolve every dependency of one ecosystem concurrently.
    ///
    /// Returns one resolution per dependency, in declaration order.
    async fn resolve_all(
        &self,
        ecosystem: Ecosystem,
        dependencies: &[crate::domain::DeclaredDependency],
    ) -> Vec<Result<ResolvedVersions, RegistryError>> {
        let registry = match self.registries.get(&ecosystem) {
            Some(registry) => Arc::clone(registry),
            None => {
                return dependencies
                    .iter()
                    .map(|dep| {
                        Err(RegistryError::network_error(
                            &dep.name,
                            ecosystem.registry_name(),
                            "no registry configured",
                        ))
                    })
                    .collect();
            }
        };

        let mut tasks = JoinSet::new();
        for (index, dep) in dependencies.iter().enumerate() {
            let registry = Arc::clone(&registry);
            let semaphore = Arc::clone(&self.semaphore);
            let name = dep.name.clone();
            let deadline = self.deadline;

            tasks.spawn(async move {
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .expect("semaphore never closed");
                let outcome = match tokio::time::timeout(deadline, resolve(registry.as_ref(), &name))
                    .await
                {
                    Ok(result) => result,
                    Err(_) => Err(RegistryError::timeout(&name, registry.registry_name())),
                };
                (index, outcome)
            });
        }

        let mut resolutions: Vec<Option<Result<ResolvedVersions, RegistryError>>> =
            (0..dependencies.len()).map(|_| None).collect();
        while let Some(joined) = tasks.join_next().await {
            let (index, outcome) = joined.expect("resolver task never panics");
            resolutions[index] = Some(outcome);
        }

        resolutions
            .into_iter()
            .zip(dependencies)
            .map(|(slot, dep)| {
                slot.unwrap_or_else(|| {
                    Err(RegistryError::network_error(
                        &dep.name,
                        ecosystem.registry_name(),
                        "resolution task vanished",
                    ))
                })
            })
            .collect()
    }
}
