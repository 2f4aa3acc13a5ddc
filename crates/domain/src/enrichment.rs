// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Joining parsed requests with roster totals and HR approvals.
//!
//! All cross-record reductions (request counts per employee, roster totals)
//! are computed once before the per-record pass, so each record can be built
//! independently and output order always equals input order.

use crate::roster::RosterAggregate;
use crate::types::{EmployeeId, ParsedRequest};
use crate::validation::{Remark, validate_record};
use crate::working_days::{WorkingDays, working_days};
use std::collections::HashMap;

/// Note attached to records whose date range runs backwards.
pub const INVERTED_RANGE_NOTE: &str = "from date is after to date";

/// HR allow-list: employees whose exceptions were approved administratively,
/// with the reason for each.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HrApprovals {
    reasons: HashMap<EmployeeId, String>,
}

impl HrApprovals {
    /// Creates an empty allow-list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces an approval.
    pub fn insert(&mut self, employee_id: EmployeeId, reason: impl Into<String>) {
        self.reasons.insert(employee_id, reason.into());
    }

    /// The approval reason for an employee, if approved.
    #[must_use]
    pub fn reason(&self, employee_id: EmployeeId) -> Option<&str> {
        self.reasons.get(&employee_id).map(String::as_str)
    }

    /// The note shown on the report; empty if the employee is not approved.
    #[must_use]
    pub fn note(&self, employee_id: EmployeeId) -> String {
        self.reason(employee_id)
            .map(|reason| format!("Exception approved by HR due to {reason}"))
            .unwrap_or_default()
    }

    /// Number of approved employees.
    #[must_use]
    pub fn len(&self) -> usize {
        self.reasons.len()
    }

    /// Returns `true` if nobody is approved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reasons.is_empty()
    }
}

impl FromIterator<(EmployeeId, String)> for HrApprovals {
    fn from_iter<T: IntoIterator<Item = (EmployeeId, String)>>(iter: T) -> Self {
        Self {
            reasons: iter.into_iter().collect(),
        }
    }
}

/// A request joined with everything needed to judge it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichedRecord {
    /// The parse outcome this record was built from.
    pub request: ParsedRequest,
    /// Outcome of the working-day count.
    pub working_days: WorkingDays,
    /// Working days the request spans, if countable.
    pub raised_days: Option<u32>,
    /// Requests raised by this employee across the batch.
    pub request_count: Option<usize>,
    /// Exception days granted by the roster.
    pub granted_days: Option<u32>,
    /// Home branch from the roster.
    pub home_branch: Option<String>,
    /// HR override note, empty unless the employee is on the allow-list.
    pub hr_approval_note: String,
    /// The verdict.
    pub remark: Remark,
    /// Data-quality notes (parse failures, bad dates, inverted ranges).
    pub notes: Vec<String>,
}

/// Counts parsed requests per employee. Unparsed lines are not counted.
#[must_use]
pub fn count_requests(requests: &[ParsedRequest]) -> HashMap<EmployeeId, usize> {
    let mut counts: HashMap<EmployeeId, usize> = HashMap::new();
    for employee_id in requests.iter().filter_map(ParsedRequest::employee_id) {
        *counts.entry(employee_id).or_insert(0) += 1;
    }
    counts
}

/// Enriches every request, one record per input, in input order.
#[must_use]
pub fn enrich_requests(
    requests: &[ParsedRequest],
    aggregate: &RosterAggregate,
    approvals: &HrApprovals,
) -> Vec<EnrichedRecord> {
    let counts: HashMap<EmployeeId, usize> = count_requests(requests);

    requests
        .iter()
        .map(|request| enrich_one(request, &counts, aggregate, approvals))
        .collect()
}

fn enrich_one(
    parsed: &ParsedRequest,
    counts: &HashMap<EmployeeId, usize>,
    aggregate: &RosterAggregate,
    approvals: &HrApprovals,
) -> EnrichedRecord {
    let request = match parsed {
        ParsedRequest::Parsed(request) => request,
        ParsedRequest::Unparsed(failure) => {
            return EnrichedRecord {
                request: parsed.clone(),
                working_days: WorkingDays::MissingDate,
                raised_days: None,
                request_count: None,
                granted_days: None,
                home_branch: None,
                hr_approval_note: String::new(),
                remark: Remark::DataIncomplete,
                notes: vec![failure.to_string()],
            };
        }
    };

    let employee_id: EmployeeId = request.employee_id;
    let span: WorkingDays = working_days(request.from_date, request.to_date);

    let mut notes: Vec<String> = request.date_issues.clone();
    if span == WorkingDays::InvertedRange {
        notes.push(String::from(INVERTED_RANGE_NOTE));
    }

    let mut record: EnrichedRecord = EnrichedRecord {
        request: parsed.clone(),
        working_days: span,
        raised_days: span.count(),
        request_count: counts.get(&employee_id).copied(),
        granted_days: Some(aggregate.granted_days(employee_id)),
        home_branch: aggregate.home_branch(employee_id).map(str::to_string),
        hr_approval_note: approvals.note(employee_id),
        remark: Remark::DataIncomplete,
        notes,
    };
    record.remark = validate_record(&record);
    record
}
