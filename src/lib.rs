//! depreport - Dependency freshness report library
//!
//! This library inspects a project's declared third-party dependencies,
//! resolves the latest published version of each from its registry, and
//! renders a structured report of what is outdated:
//! - npm (package.json, npm registry)
//! - pip (requirements.txt, PyPI)

pub mod check;
pub mod cli;
pub mod domain;
pub mod error;
pub mod manifest;
pub mod output;
pub mod pipeline;
pub mod registry;
