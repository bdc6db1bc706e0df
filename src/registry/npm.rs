//! npm Registry adapter
//!
//! Lists published versions from the npm registry.
//! API endpoint: https://registry.npmjs.org/{package}

use crate::domain::Ecosystem;
use crate::error::RegistryError;
use crate::registry::{HttpClient, Registry};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value};

/// npm registry base URL
const NPM_REGISTRY_URL: &str = "https://registry.npmjs.org";

/// npm Registry adapter
pub struct NpmRegistry {
    client: HttpClient,
}

/// npm package metadata response, reduced to the version map
#[derive(Debug, Deserialize)]
struct NpmPackageResponse {
    versions: Map<String, Value>,
}

impl NpmRegistry {
    /// Create a new npm registry adapter
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    /// Build the URL for a package
    fn build_url(&self, package: &str) -> String {
        format!("{}/{}", NPM_REGISTRY_URL, package)
    }
}

#[async_trait]
impl Registry for NpmRegistry {
    fn ecosystem(&self) -> Ecosystem {
        Ecosystem::Npm
    }

    fn registry_name(&self) -> &'static str {
        "npm"
    }

    async fn list_versions(&self, package: &str) -> Result<Vec<String>, RegistryError> {
        let url = self.build_url(package);
        let response: NpmPackageResponse = self
            .client
            .get_json(&url, package, self.registry_name())
            .await?;

        Ok(response.versions.keys().cloned().collect())
    }
}
