//! CLI argument parsing module for depreport

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use crate::domain::Ecosystem;
use crate::output::OutputFormat;
use crate::pipeline::PipelineConfig;

/// Dependency freshness report generator
#[derive(Parser, Debug, Clone)]
#[command(
    name = "depreport",
    version,
    about = "Reports outdated npm and pip dependencies"
)]
pub struct CliArgs {
    /// Project directory to scan (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    // Ecosystem filters
    /// Check only npm (package.json) dependencies
    #[arg(long)]
    pub npm: bool,

    /// Check only pip (requirements.txt) dependencies
    #[arg(long)]
    pub pip: bool,

    // Output options
    /// Output the report as JSON instead of Markdown
    #[arg(long)]
    pub json: bool,

    /// Write the report to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Suppress the stderr summary line
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    // Resolution options
    /// Per-package registry timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,

    /// Maximum concurrent registry requests
    #[arg(long, default_value_t = 8)]
    pub concurrency: usize,

    /// Retry attempts for transient registry failures
    #[arg(long, default_value_t = 2)]
    pub retries: u32,
}

impl CliArgs {
    /// The ecosystems to scan, honoring the filter flags
    pub fn ecosystems(&self) -> Vec<Ecosystem> {
        if !self.npm && !self.pip {
            return Ecosystem::all().to_vec();
        }
        let mut ecosystems = Vec::new();
        if self.npm {
            ecosystems.push(Ecosystem::Npm);
        }
        if self.pip {
            ecosystems.push(Ecosystem::Pip);
        }
        ecosystems
    }

    /// The selected output format
    pub fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Markdown
        }
    }

    /// Pipeline configuration derived from the flags
    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            concurrency: self.concurrency,
            deadline: Duration::from_secs(self.timeout),
            retries: self.retries,
        }
    }
}
