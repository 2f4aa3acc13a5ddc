// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! # rto-check
//!
//! Validates work-from-office exception requests against the RTO roster.
//!
//! Reads the automation export (one free-text request per row) and the
//! roster export (one row per employee per period, one column per day),
//! then writes a report with one verdict per request.
//!
//! Verbosity is controlled with `-v`/`-q`. `RUST_LOG` overrides both.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use color_eyre::{Result, eyre::Context};
use rto_check_api::{ReportFormat, ValidationConfig, ValidationReport, run_validation, write_report};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::level_filters::LevelFilter;
use tracing::{error, info, warn};
use tracing_log::AsTrace;
use tracing_subscriber::EnvFilter;

/// Base name of the report when `--output` is not given.
const DEFAULT_OUTPUT_STEM: &str = "RTO_Validation_Output";

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    let filter: EnvFilter = EnvFilter::builder()
        .with_default_directive(args.log_level().into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    match args.run() {
        Ok(()) => (),
        Err(err) => {
            error!("{err:#}");
            std::process::exit(1);
        }
    }
    Ok(())
}

/// Report encodings selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
enum OutputFormat {
    /// Comma-separated values
    #[default]
    Csv,
    /// JSON object with summary and rows
    Json,
}

impl From<OutputFormat> for ReportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Csv => Self::Csv,
            OutputFormat::Json => Self::Json,
        }
    }
}

/// Validate RTO work-from-office exception requests against the roster
#[derive(Debug, Parser)]
#[command(name = "rto-check", author, version, about, long_about = None)]
struct Args {
    /// CSV export of exception requests (needs an `Input` column)
    #[arg(short, long, value_name = "CSV")]
    requests: PathBuf,

    /// CSV export of the RTO roster
    #[arg(short = 'R', long, value_name = "CSV")]
    roster: PathBuf,

    /// TOML file with column names and the HR allow-list
    #[arg(short, long, value_name = "TOML")]
    config: Option<PathBuf>,

    /// Where to write the report [default: RTO_Validation_Output.<format>]
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Report format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Csv)]
    format: OutputFormat,

    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,
}

impl Args {
    fn log_level(&self) -> LevelFilter {
        self.verbosity.log_level_filter().as_trace()
    }

    fn output_path(&self) -> PathBuf {
        self.output.clone().unwrap_or_else(|| {
            let format: ReportFormat = self.format.into();
            PathBuf::from(format!("{DEFAULT_OUTPUT_STEM}.{}", format.extension()))
        })
    }

    fn load_config(&self) -> Result<ValidationConfig> {
        match &self.config {
            Some(path) => {
                info!(path = %path.display(), "Loading configuration");
                ValidationConfig::load(path)
                    .wrap_err_with(|| format!("loading configuration from {}", path.display()))
            }
            None => {
                warn!("No configuration given; using default columns and an empty HR allow-list");
                Ok(ValidationConfig::default())
            }
        }
    }

    fn run(self) -> Result<()> {
        let config: ValidationConfig = self.load_config()?;
        let requests: BufReader<File> = open_input(&self.requests)?;
        let roster: BufReader<File> = open_input(&self.roster)?;

        let report: ValidationReport = run_validation(requests, roster, &config)
            .wrap_err("validating exception requests")?;

        let output: PathBuf = self.output_path();
        let file: File = File::create(&output)
            .wrap_err_with(|| format!("creating report {}", output.display()))?;
        let mut writer: BufWriter<File> = BufWriter::new(file);
        write_report(&mut writer, &report, self.format.into())
            .wrap_err_with(|| format!("writing report {}", output.display()))?;
        writer
            .flush()
            .wrap_err_with(|| format!("writing report {}", output.display()))?;

        info!(
            path = %output.display(),
            rows = report.summary.total_rows,
            unparsed = report.summary.unparsed,
            "Report saved"
        );
        Ok(())
    }
}

fn open_input(path: &Path) -> Result<BufReader<File>> {
    let file: File =
        File::open(path).wrap_err_with(|| format!("opening input {}", path.display()))?;
    Ok(BufReader::new(file))
}
