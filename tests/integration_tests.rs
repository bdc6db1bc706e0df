//! Integration tests for the report pipeline
//!
//! These tests drive the whole pipeline through the abstract registry
//! interface with an in-memory registry, so no test touches the network.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

use depreport::domain::{Ecosystem, Status};
use depreport::error::RegistryError;
use depreport::manifest::ManifestSet;
use depreport::output::{create_formatter, OutputFormat};
use depreport::pipeline::{Pipeline, PipelineConfig, PipelineResult};
use depreport::registry::Registry;

/// In-memory registry: package name to published version strings
struct MockRegistry {
    ecosystem: Ecosystem,
    versions: HashMap<String, Vec<String>>,
    unreachable: Vec<String>,
}

impl MockRegistry {
    fn new(ecosystem: Ecosystem) -> Self {
        Self {
            ecosystem,
            versions: HashMap::new(),
            unreachable: Vec::new(),
        }
    }

    fn with_versions(mut self, package: &str, versions: &[&str]) -> Self {
        self.versions.insert(
            package.to_string(),
            versions.iter().map(|s| s.to_string()).collect(),
        );
        self
    }

    fn with_unreachable(mut self, package: &str) -> Self {
        self.unreachable.push(package.to_string());
        self
    }
}

#[async_trait]
impl Registry for MockRegistry {
    fn ecosystem(&self) -> Ecosystem {
        self.ecosystem
    }

    fn registry_name(&self) -> &'static str {
        "mock"
    }

    async fn list_versions(&self, package: &str) -> Result<Vec<String>, RegistryError> {
        if self.unreachable.iter().any(|p| p == package) {
            return Err(RegistryError::network_error(
                package,
                "mock",
                "connection reset",
            ));
        }
        match self.versions.get(package) {
            Some(versions) => Ok(versions.clone()),
            None => Err(RegistryError::package_not_found(package, "mock")),
        }
    }
}

fn pipeline(registries: Vec<Arc<dyn Registry>>) -> Pipeline {
    Pipeline::with_registries(registries, PipelineConfig::default())
}

fn render_markdown(result: &PipelineResult) -> String {
    let mut buf = Vec::new();
    create_formatter(OutputFormat::Markdown)
        .format(result, &mut buf)
        .unwrap();
    String::from_utf8(buf).unwrap()
}

#[tokio::test]
async fn scenario_outdated_npm_dependency() {
    let npm = MockRegistry::new(Ecosystem::Npm).with_versions("react", &["17.0.2", "18.2.0"]);
    let manifests = ManifestSet {
        package_json: Some(r#"{"dependencies": {"react": "^17.0.2"}}"#.to_string()),
        requirements_txt: None,
    };

    let result = pipeline(vec![Arc::new(npm)]).run(&manifests).await;
    let text = render_markdown(&result);

    assert!(text.contains("| react | 17.0.2 | 18.2.0 | ⚠️ Outdated |"));
}

#[tokio::test]
async fn scenario_up_to_date_pip_dependency() {
    let pip =
        MockRegistry::new(Ecosystem::Pip).with_versions("requests", &["2.31.0", "2.32.3"]);
    let manifests = ManifestSet {
        package_json: None,
        requirements_txt: Some("requests==2.32.3\n".to_string()),
    };

    let result = pipeline(vec![Arc::new(pip)]).run(&manifests).await;
    let text = render_markdown(&result);

    assert!(text.contains("| requests | 2.32.3 | 2.32.3 | ✅ Up to date |"));
}

#[tokio::test]
async fn scenario_no_manifests_yields_sentinel() {
    let result = pipeline(vec![]).run(&ManifestSet::default()).await;
    let text = render_markdown(&result);

    assert!(text.contains("No recognized dependency files were found"));
    assert!(!text.contains("| Package |"));
}

#[tokio::test]
async fn partial_failure_keeps_all_rows() {
    let npm = MockRegistry::new(Ecosystem::Npm)
        .with_versions("first", &["1.0.0", "1.1.0"])
        .with_unreachable("second")
        .with_versions("third", &["3.0.0"]);
    let manifests = ManifestSet {
        package_json: Some(
            r#"{"dependencies": {"first": "1.0.0", "second": "2.0.0", "third": "3.0.0"}}"#
                .to_string(),
        ),
        requirements_txt: None,
    };

    let result = pipeline(vec![Arc::new(npm)]).run(&manifests).await;
    let rows = &result.report.sections[0].results;

    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].status, Status::Outdated);
    assert_eq!(rows[1].status, Status::Unresolved);
    assert_eq!(rows[2].status, Status::UpToDate);

    let text = render_markdown(&result);
    assert!(text.contains("| second | 2.0.0 | N/A | ❔ Unresolved |"));
}

#[tokio::test]
async fn unbounded_declarations_stay_unresolved() {
    let pip = MockRegistry::new(Ecosystem::Pip).with_versions("requests", &["2.32.3"]);
    let manifests = ManifestSet {
        package_json: None,
        requirements_txt: Some("requests\n".to_string()),
    };

    let result = pipeline(vec![Arc::new(pip)]).run(&manifests).await;
    let rows = &result.report.sections[0].results;

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].status, Status::Unresolved);
    assert_eq!(rows[0].declared, "Not specified");
}

#[tokio::test]
async fn both_ecosystems_render_in_fixed_order() {
    let npm = MockRegistry::new(Ecosystem::Npm).with_versions("react", &["17.0.2", "18.2.0"]);
    let pip = MockRegistry::new(Ecosystem::Pip).with_versions("requests", &["2.32.3"]);
    let manifests = ManifestSet {
        package_json: Some(r#"{"dependencies": {"react": "^17.0.2"}}"#.to_string()),
        requirements_txt: Some("requests==2.32.3\n".to_string()),
    };

    let result = pipeline(vec![Arc::new(pip), Arc::new(npm)]).run(&manifests).await;
    let text = render_markdown(&result);

    let npm_pos = text.find("## npm").unwrap();
    let pip_pos = text.find("## pip").unwrap();
    assert!(npm_pos < pip_pos);
}

#[tokio::test]
async fn rendering_same_result_twice_is_byte_identical() {
    let npm = MockRegistry::new(Ecosystem::Npm)
        .with_versions("react", &["17.0.2", "18.2.0"])
        .with_unreachable("lodash");
    let manifests = ManifestSet {
        package_json: Some(
            r#"{"dependencies": {"react": "^17.0.2", "lodash": "^4.17.21"}}"#.to_string(),
        ),
        requirements_txt: None,
    };

    let result = pipeline(vec![Arc::new(npm)]).run(&manifests).await;
    assert_eq!(render_markdown(&result), render_markdown(&result));
}

#[tokio::test]
async fn json_rendering_matches_report_structure() {
    let npm = MockRegistry::new(Ecosystem::Npm).with_versions("react", &["17.0.2", "18.2.0"]);
    let manifests = ManifestSet {
        package_json: Some(r#"{"dependencies": {"react": "^17.0.2"}}"#.to_string()),
        requirements_txt: None,
    };

    let result = pipeline(vec![Arc::new(npm)]).run(&manifests).await;

    let mut buf = Vec::new();
    create_formatter(OutputFormat::Json)
        .format(&result, &mut buf)
        .unwrap();
    let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();

    assert_eq!(value["sections"][0]["ecosystem"], "npm");
    assert_eq!(value["sections"][0]["results"][0]["name"], "react");
    assert_eq!(value["sections"][0]["results"][0]["status"], "outdated");
}

#[tokio::test]
async fn registry_garbage_versions_fold_into_unresolved() {
    let npm = MockRegistry::new(Ecosystem::Npm)
        .with_versions("broken", &["latest", "not-a-version"]);
    let manifests = ManifestSet {
        package_json: Some(r#"{"dependencies": {"broken": "1.0.0"}}"#.to_string()),
        requirements_txt: None,
    };

    let result = pipeline(vec![Arc::new(npm)]).run(&manifests).await;
    let rows = &result.report.sections[0].results;
    assert_eq!(rows[0].status, Status::Unresolved);
    assert!(rows[0].latest.is_none());
}

#[tokio::test]
async fn many_dependencies_keep_manifest_order_under_concurrency() {
    let mut npm = MockRegistry::new(Ecosystem::Npm);
    let mut entries = Vec::new();
    for i in 0..40 {
        let name = format!("pkg{:02}", i);
        npm = npm.with_versions(&name, &["1.0.0", "2.0.0"]);
        entries.push(format!("\"{}\": \"1.0.0\"", name));
    }
    let manifests = ManifestSet {
        package_json: Some(format!(r#"{{"dependencies": {{{}}}}}"#, entries.join(", "))),
        requirements_txt: None,
    };

    let config = PipelineConfig {
        concurrency: 3,
        ..PipelineConfig::default()
    };
    let result = Pipeline::with_registries(vec![Arc::new(npm)], config)
        .run(&manifests)
        .await;

    let names: Vec<&str> = result.report.sections[0]
        .results
        .iter()
        .map(|r| r.name.as_str())
        .collect();
    let expected: Vec<String> = (0..40).map(|i| format!("pkg{:02}", i)).collect();
    assert_eq!(names, expected);
    assert_eq!(result.report.count(Status::Outdated), 40);
}
