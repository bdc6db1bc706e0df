//! Core domain models for depreport
//!
//! This module contains the fundamental types used throughout the application:
//! - Ecosystem types for the supported package registries
//! - Structured version values with registry-tolerant ordering
//! - Declared dependency structures produced by the manifest parsers
//! - Comparison results and the final report structure

mod dependency;
mod ecosystem;
mod report;
mod version;

pub use dependency::DeclaredDependency;
pub use ecosystem::Ecosystem;
pub use report::{ComparisonResult, EcosystemReport, Report, Status};
pub use version::Version;
