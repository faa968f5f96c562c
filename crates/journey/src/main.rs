use std::{path::PathBuf, process::ExitCode};

use anyhow::{Context, Result};
use clap::Parser;
use journey::{
    files::{discover_test_files, transform_files},
    CompatibilityTables,
};
use log::{info, warn};

/// Converts Playwright test files into Elastic Synthetics journeys
#[derive(Parser)]
#[command(name = "playwright-journey", version, about, long_about = None)]
struct Cli {
    /// Test file or directory to convert
    path: PathBuf,

    /// Case-insensitive regex selecting the test files of a directory
    #[arg(short, long, value_name = "REGEX")]
    pattern: Option<String>,

    /// Do not print the converted code
    #[arg(short, long)]
    quiet: bool,

    /// Number of files converted in parallel
    #[arg(short, long, value_name = "N")]
    jobs: Option<usize>,
}

fn main() -> Result<ExitCode> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    if let Some(jobs) = cli.jobs {
        rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build_global()
            .context("Failed to set up the worker pool")?;
    }

    let inputs = discover_test_files(&cli.path, cli.pattern.as_deref())
        .with_context(|| format!("Failed to collect test files in {}", cli.path.display()))?;
    if inputs.is_empty() {
        warn!("No test files found in {}", cli.path.display());
        return Ok(ExitCode::SUCCESS);
    }

    let tables = CompatibilityTables::default();
    let results = transform_files(&inputs, &tables);

    let mut failed = 0;
    for result in results {
        let Ok(report) = result else {
            failed += 1;
            continue;
        };

        for diagnostic in report.diagnostics.iter() {
            warn!("{diagnostic}");
        }

        if !cli.quiet {
            println!("{}\n{}", report.input.display(), report.code);
        }
    }

    info!(
        "Converted {} of {} files",
        inputs.len() - failed,
        inputs.len()
    );

    if failed > 0 {
        return Ok(ExitCode::FAILURE);
    }

    Ok(ExitCode::SUCCESS)
}
