//! Markdown report formatter
//!
//! Produces the textual payload posted by the external reporting
//! collaborator: a heading, one subsection per ecosystem with a manifest,
//! and a table with Package | Current Version | Latest Version | Status.
//! Rows keep manifest declaration order. Output is deterministic.

use crate::domain::{ComparisonResult, EcosystemReport, Status};
use crate::output::ReportFormatter;
use crate::pipeline::PipelineResult;
use std::io::Write;

/// Report heading
const HEADING: &str = "# Dependency Status Report";

/// Sentinel paragraph used when no manifest was found at all
const NO_MANIFESTS: &str = "No recognized dependency files were found in this project.";

/// Markdown formatter
pub struct MarkdownFormatter;

impl MarkdownFormatter {
    /// Label for a status cell; the three statuses stay visually distinct
    fn status_label(status: Status) -> &'static str {
        match status {
            Status::Outdated => "⚠️ Outdated",
            Status::UpToDate => "✅ Up to date",
            Status::Unresolved => "❔ Unresolved",
        }
    }

    fn write_row(row: &ComparisonResult, writer: &mut dyn Write) -> std::io::Result<()> {
        let latest = row
            .latest
            .as_ref()
            .map(|v| v.to_string())
            .unwrap_or_else(|| "N/A".to_string());
        writeln!(
            writer,
            "| {} | {} | {} | {} |",
            row.name,
            row.declared,
            latest,
            Self::status_label(row.status)
        )
    }

    fn write_section(section: &EcosystemReport, writer: &mut dyn Write) -> std::io::Result<()> {
        writeln!(
            writer,
            "## {} ({})",
            section.ecosystem.display_name(),
            section.ecosystem.manifest_filename()
        )?;
        writeln!(writer)?;
        writeln!(writer, "| Package | Current Version | Latest Version | Status |")?;
        writeln!(writer, "| --- | --- | --- | --- |")?;
        for row in &section.results {
            Self::write_row(row, writer)?;
        }
        writeln!(writer)
    }
}

impl ReportFormatter for MarkdownFormatter {
    fn format(&self, result: &PipelineResult, writer: &mut dyn Write) -> std::io::Result<()> {
        writeln!(writer, "{}", HEADING)?;
        writeln!(writer)?;

        if result.report.is_empty() {
            writeln!(writer, "{}", NO_MANIFESTS)?;
            return Ok(());
        }

        for section in &result.report.sections {
            // a present manifest with zero dependencies renders no section
            if section.results.is_empty() {
                continue;
            }
            Self::write_section(section, writer)?;
        }

        Ok(())
    }
}
