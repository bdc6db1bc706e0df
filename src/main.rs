//! depreport - Dependency freshness report CLI
//!
//! Scans a project for package.json and requirements.txt, resolves the
//! latest published version of every declared dependency, and prints a
//! Markdown (or JSON) report of what is outdated.

use clap::Parser;
use colored::Colorize;
use depreport::cli::CliArgs;
use depreport::domain::Status;
use depreport::manifest::ManifestSet;
use depreport::output::create_formatter;
use depreport::pipeline::{Pipeline, PipelineResult};
use std::io::{self, Write};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();

    match run(args).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Main application logic
async fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    if args.verbose {
        eprintln!("depreport v{}", env!("CARGO_PKG_VERSION"));
        eprintln!("Target: {}", args.path.display());
    }

    if !args.path.is_dir() {
        anyhow::bail!("not a directory: {}", args.path.display());
    }

    let manifests = ManifestSet::from_dir(&args.path, &args.ecosystems())?;
    let pipeline = Pipeline::new(args.pipeline_config())?;
    let result = pipeline.run(&manifests).await;

    let formatter = create_formatter(args.output_format());
    match &args.output {
        Some(path) => {
            let mut file = std::fs::File::create(path)?;
            formatter.format(&result, &mut file)?;
            file.flush()?;
        }
        None => {
            let mut stdout = io::stdout().lock();
            formatter.format(&result, &mut stdout)?;
            stdout.flush()?;
        }
    }

    for error in &result.errors {
        eprintln!("Error: {}", error);
    }

    if !args.quiet {
        print_summary(&result);
    }

    if result.errors.is_empty() {
        Ok(ExitCode::SUCCESS)
    } else {
        // report was produced, but at least one manifest hard-failed
        Ok(ExitCode::from(2))
    }
}

/// One-line colored summary on stderr
fn print_summary(result: &PipelineResult) {
    let report = &result.report;
    if report.is_empty() {
        eprintln!("{}", "No dependencies checked.".dimmed());
        return;
    }

    let outdated = report.count(Status::Outdated);
    let up_to_date = report.count(Status::UpToDate);
    let unresolved = report.count(Status::Unresolved);

    let outdated_display = if outdated > 0 {
        format!("{} {}", outdated, Status::Outdated)
            .red()
            .bold()
            .to_string()
    } else {
        format!("{} {}", outdated, Status::Outdated).green().to_string()
    };

    eprintln!(
        "Checked {} dependencies: {}, {}, {}",
        report.total(),
        outdated_display,
        format!("{} {}", up_to_date, Status::UpToDate).green(),
        format!("{} {}", unresolved, Status::Unresolved).yellow()
    );
}
