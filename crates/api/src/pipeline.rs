// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Batch orchestration: parse, aggregate, enrich, validate.

use crate::config::ValidationConfig;
use crate::error::ApiError;
use crate::ingest::{RosterTable, read_request_table, read_roster_table};
use rto_check_domain::{
    EnrichedRecord, HrApprovals, ParsedRequest, Remark, RequestParser, RosterAggregate,
    aggregate_roster, enrich_requests,
};
use serde::Serialize;
use std::io::Read;
use tracing::{debug, info, warn};

/// Counts describing one validation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ValidationSummary {
    /// Input rows (always equal to output rows).
    pub total_rows: usize,
    /// Rows whose text was extracted.
    pub parsed: usize,
    /// Rows whose text could not be extracted.
    pub unparsed: usize,
    /// Rows remarked "Good to approve".
    pub good_to_approve: usize,
    /// Rows with more days raised than granted.
    pub additional_exception_raised: usize,
    /// Rows with fewer days raised than granted.
    pub less_than_roster: usize,
    /// Rows that could not be validated.
    pub data_incomplete: usize,
    /// Rows carrying an HR approval note.
    pub hr_approved: usize,
    /// Roster rows excluded for a bad employee ID.
    pub skipped_roster_rows: usize,
}

impl ValidationSummary {
    fn from_records(records: &[EnrichedRecord], skipped_roster_rows: usize) -> Self {
        let mut summary: Self = Self {
            total_rows: records.len(),
            skipped_roster_rows,
            ..Self::default()
        };

        for record in records {
            if record.request.is_parsed() {
                summary.parsed += 1;
            } else {
                summary.unparsed += 1;
            }
            if !record.hr_approval_note.is_empty() {
                summary.hr_approved += 1;
            }
            match record.remark {
                Remark::GoodToApprove => summary.good_to_approve += 1,
                Remark::AdditionalExceptionRaised(_) => summary.additional_exception_raised += 1,
                Remark::LessThanRoster(_) => summary.less_than_roster += 1,
                Remark::DataIncomplete => summary.data_incomplete += 1,
            }
        }

        summary
    }
}

/// Output of a validation run: the original text alongside each record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Raw request text, one per input row.
    pub inputs: Vec<String>,
    /// Enriched, validated records, aligned with `inputs`.
    pub records: Vec<EnrichedRecord>,
    /// Run totals.
    pub summary: ValidationSummary,
}

/// Validates already-loaded inputs.
///
/// # Errors
///
/// Returns an error only if the request grammar fails to compile.
pub fn validate_batch(
    inputs: Vec<String>,
    roster: &RosterTable,
    config: &ValidationConfig,
) -> Result<ValidationReport, ApiError> {
    let parser: RequestParser = RequestParser::standard()?;

    let parsed: Vec<ParsedRequest> = inputs
        .iter()
        .enumerate()
        .map(|(idx, line)| {
            let result: ParsedRequest = parser.parse(line);
            if let ParsedRequest::Unparsed(failure) = &result {
                warn!(row = idx + 1, %failure, "Request line could not be parsed");
            }
            result
        })
        .collect();

    let aggregate: RosterAggregate = aggregate_roster(&roster.entries);
    let approvals: HrApprovals = config.approvals();
    debug!(
        employees = aggregate.employee_count(),
        approvals = approvals.len(),
        "Aggregated roster"
    );

    let records: Vec<EnrichedRecord> = enrich_requests(&parsed, &aggregate, &approvals);
    for (idx, record) in records.iter().enumerate() {
        if record.request.is_parsed() {
            for note in &record.notes {
                warn!(row = idx + 1, note = note.as_str(), "Request has a data-quality issue");
            }
        }
        debug!(row = idx + 1, remark = %record.remark, "Validated request");
    }

    let summary: ValidationSummary =
        ValidationSummary::from_records(&records, roster.skipped_rows.len());
    info!(
        rows = summary.total_rows,
        parsed = summary.parsed,
        unparsed = summary.unparsed,
        good_to_approve = summary.good_to_approve,
        additional = summary.additional_exception_raised,
        less_than_roster = summary.less_than_roster,
        incomplete = summary.data_incomplete,
        "Validation complete"
    );

    Ok(ValidationReport {
        inputs,
        records,
        summary,
    })
}

/// Reads both tables and validates every request.
///
/// # Errors
///
/// Returns an error if either table is unreadable or lacks a required column.
pub fn run_validation<A: Read, B: Read>(
    requests: A,
    roster: B,
    config: &ValidationConfig,
) -> Result<ValidationReport, ApiError> {
    let inputs: Vec<String> = read_request_table(requests, &config.automation)?;
    let roster: RosterTable = read_roster_table(roster, &config.roster)?;
    validate_batch(inputs, &roster, config)
}
