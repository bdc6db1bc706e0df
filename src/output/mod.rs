//! Output formatting for the dependency report
//!
//! This module provides:
//! - Markdown output, the payload handed to the review-comment collaborator
//! - JSON output, a faithful serialization of the report structure

mod json;
mod markdown;

pub use json::JsonFormatter;
pub use markdown::MarkdownFormatter;

use crate::pipeline::PipelineResult;
use std::io::Write;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Markdown tables for humans and review comments
    #[default]
    Markdown,
    /// JSON for machine processing
    Json,
}

/// Trait for report formatters
///
/// Rendering is a pure function of the report value: formatting the same
/// result twice produces byte-identical output.
pub trait ReportFormatter {
    /// Format and write the pipeline result
    fn format(&self, result: &PipelineResult, writer: &mut dyn Write) -> std::io::Result<()>;
}

/// Create a formatter for the requested format
pub fn create_formatter(format: OutputFormat) -> Box<dyn ReportFormatter> {
    match format {
        OutputFormat::Markdown => Box::new(MarkdownFormatter),
        OutputFormat::Json => Box::new(JsonFormatter),
    }
}
