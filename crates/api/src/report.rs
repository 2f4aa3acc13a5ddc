// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Report export.
//!
//! One row per input line, in input order. Null values become empty CSV
//! cells or JSON `null`.

use crate::error::ApiError;
use crate::pipeline::{ValidationReport, ValidationSummary};
use rto_check_domain::{EnrichedRecord, ExceptionRequest};
use serde::Serialize;
use std::io::Write;
use time::Date;
use tracing::info;

/// Report column headers, in output order.
pub const REPORT_HEADERS: [&str; 14] = [
    "Input",
    "Employee Name",
    "Employee ID",
    "Category",
    "From",
    "To",
    "On",
    "#of working days exception raised for",
    "#Number of request raised",
    "Base Branch",
    "#of days exception given as per RTO roaster",
    "Exception approved by HR",
    "RTO validation remarks",
    "Validation notes",
];

/// Separator used when a record carries more than one note.
const NOTE_SEPARATOR: &str = "; ";

/// Supported report encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    /// Comma-separated values with a header row.
    #[default]
    Csv,
    /// A JSON object holding the summary and the rows.
    Json,
}

impl ReportFormat {
    /// File extension conventionally used for this format.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

/// One output row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    #[serde(rename = "Input")]
    pub input: String,
    #[serde(rename = "Employee Name")]
    pub employee_name: Option<String>,
    #[serde(rename = "Employee ID")]
    pub employee_id: Option<u64>,
    #[serde(rename = "Category")]
    pub category: Option<String>,
    #[serde(rename = "From")]
    pub from: Option<String>,
    #[serde(rename = "To")]
    pub to: Option<String>,
    #[serde(rename = "On")]
    pub on: Option<String>,
    #[serde(rename = "#of working days exception raised for")]
    pub raised_days: Option<u32>,
    #[serde(rename = "#Number of request raised")]
    pub request_count: Option<usize>,
    #[serde(rename = "Base Branch")]
    pub home_branch: Option<String>,
    #[serde(rename = "#of days exception given as per RTO roaster")]
    pub granted_days: Option<u32>,
    #[serde(rename = "Exception approved by HR")]
    pub hr_approval_note: String,
    #[serde(rename = "RTO validation remarks")]
    pub remark: String,
    #[serde(rename = "Validation notes")]
    pub notes: String,
}

fn iso(date: Option<Date>) -> Option<String> {
    date.map(|d| d.to_string())
}

impl ReportRow {
    /// Builds a row from the raw text and its validated record.
    #[must_use]
    pub fn new(input: &str, record: &EnrichedRecord) -> Self {
        let request: Option<&ExceptionRequest> = record.request.request();

        Self {
            input: input.to_string(),
            employee_name: request.map(|r| r.employee_name.clone()),
            employee_id: request.map(|r| r.employee_id.value()),
            category: request.map(|r| r.category.clone()),
            from: iso(request.and_then(|r| r.from_date)),
            to: iso(request.and_then(|r| r.to_date)),
            on: iso(request.and_then(|r| r.on_date)),
            raised_days: record.raised_days,
            request_count: record.request_count,
            home_branch: record.home_branch.clone(),
            granted_days: record.granted_days,
            hr_approval_note: record.hr_approval_note.clone(),
            remark: record.remark.to_string(),
            notes: record.notes.join(NOTE_SEPARATOR),
        }
    }
}

/// Builds the output rows of a report.
#[must_use]
pub fn report_rows(report: &ValidationReport) -> Vec<ReportRow> {
    report
        .inputs
        .iter()
        .zip(&report.records)
        .map(|(input, record)| ReportRow::new(input, record))
        .collect()
}

#[derive(Serialize)]
struct JsonReport<'a> {
    summary: &'a ValidationSummary,
    rows: &'a [ReportRow],
}

/// Writes the report as CSV. The header row is written even when there are
/// no records.
///
/// # Errors
///
/// Returns `ApiError::Report` if writing fails.
pub fn write_csv_report<W: Write>(writer: W, report: &ValidationReport) -> Result<(), ApiError> {
    let mut writer: csv::Writer<W> = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    writer.write_record(REPORT_HEADERS).map_err(ApiError::Report)?;
    for row in report_rows(report) {
        writer.serialize(&row).map_err(ApiError::Report)?;
    }
    writer
        .flush()
        .map_err(|e| ApiError::Report(csv::Error::from(e)))?;

    Ok(())
}

/// Writes the report as a pretty-printed JSON object with `summary` and
/// `rows` keys.
///
/// # Errors
///
/// Returns `ApiError::Json` if serialisation or writing fails.
pub fn write_json_report<W: Write>(writer: W, report: &ValidationReport) -> Result<(), ApiError> {
    let rows: Vec<ReportRow> = report_rows(report);
    serde_json::to_writer_pretty(
        writer,
        &JsonReport {
            summary: &report.summary,
            rows: &rows,
        },
    )?;
    Ok(())
}

/// Writes the report in the requested format.
///
/// # Errors
///
/// Propagates errors from the format-specific writer.
pub fn write_report<W: Write>(
    writer: W,
    report: &ValidationReport,
    format: ReportFormat,
) -> Result<(), ApiError> {
    match format {
        ReportFormat::Csv => write_csv_report(writer, report)?,
        ReportFormat::Json => write_json_report(writer, report)?,
    }
    info!(
        rows = report.records.len(),
        format = format.extension(),
        "Wrote report"
    );
    Ok(())
}
