// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Table ingestion, run orchestration, and report export.
//!
//! This crate is the I/O shell around `rto-check-domain`. It reads the
//! automation and roster tables, drives the validation pipeline, and writes
//! the resulting report. Row-level problems never surface as errors here;
//! only structural failures do.

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

mod config;
mod error;
mod ingest;
mod pipeline;
mod report;

#[cfg(test)]
mod tests;

pub use config::{AutomationLayout, HrApprovalEntry, ValidationConfig};
pub use error::ApiError;
pub use ingest::{
    AUTOMATION_TABLE, ROSTER_TABLE, RosterTable, SkippedRosterRow, read_request_table,
    read_roster_table,
};
pub use pipeline::{ValidationReport, ValidationSummary, run_validation, validate_batch};
pub use report::{
    REPORT_HEADERS, ReportFormat, ReportRow, report_rows, write_csv_report, write_json_report,
    write_report,
};
