//! PyPI JSON API adapter
//!
//! Lists published versions from PyPI.
//! API endpoint: https://pypi.org/pypi/{package}/json

use crate::domain::Ecosystem;
use crate::error::RegistryError;
use crate::registry::{HttpClient, Registry};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value};

/// PyPI API base URL
const PYPI_API_URL: &str = "https://pypi.org/pypi";

/// PyPI adapter
pub struct PyPiRegistry {
    client: HttpClient,
}

/// PyPI package metadata response, reduced to the release map
#[derive(Debug, Deserialize)]
struct PyPiResponse {
    releases: Map<String, Value>,
}

impl PyPiRegistry {
    /// Create a new PyPI registry adapter
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    /// Build the URL for a package
    fn build_url(&self, package: &str) -> String {
        format!("{}/{}/json", PYPI_API_URL, package)
    }
}

#[async_trait]
impl Registry for PyPiRegistry {
    fn ecosystem(&self) -> Ecosystem {
        Ecosystem::Pip
    }

    fn registry_name(&self) -> &'static str {
        "PyPI"
    }

    async fn list_versions(&self, package: &str) -> Result<Vec<String>, RegistryError> {
        let url = self.build_url(package);
        let response: PyPiResponse = self
            .client
            .get_json(&url, package, self.registry_name())
            .await?;

        Ok(response.releases.keys().cloned().collect())
    }
}
