//! JSON report formatter
//!
//! Serializes the report structure itself, so persisted output can be
//! deserialized and re-rendered without loss.

use crate::output::ReportFormatter;
use crate::pipeline::PipelineResult;
use serde::Serialize;
use std::io::Write;

/// JSON formatter
pub struct JsonFormatter;

/// Serialized shape: the report plus the rendered per-ecosystem failures
#[derive(Serialize)]
struct JsonPayload<'a> {
    #[serde(flatten)]
    report: &'a crate::domain::Report,
    errors: Vec<String>,
}

impl ReportFormatter for JsonFormatter {
    fn format(&self, result: &PipelineResult, writer: &mut dyn Write) -> std::io::Result<()> {
        let payload = JsonPayload {
            report: &result.report,
            errors: result.errors.iter().map(|e| e.to_string()).collect(),
        };
        serde_json::to_writer_pretty(&mut *writer, &payload)?;
        writeln!(writer)
    }
}
