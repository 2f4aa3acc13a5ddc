// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

mod enrichment;
mod error;
mod request_parser;
mod roster;
mod types;
mod validation;
mod working_days;

#[cfg(test)]
mod tests;

pub use enrichment::{
    EnrichedRecord, HrApprovals, INVERTED_RANGE_NOTE, count_requests, enrich_requests,
};
pub use error::DomainError;
pub use request_parser::{
    FieldRule, GROUP_CATEGORY, GROUP_FROM, GROUP_ID, GROUP_NAME, GROUP_ON, GROUP_TO,
    RequestGrammar, RequestParser, normalize_request_text,
};
pub use roster::{
    DayColumnMode, DayStatus, RosterAggregate, RosterEntry, RosterLayout, RosterRowIssue,
    RosterSchema, aggregate_roster, find_column, normalize_header, parse_employee_id_cell,
    require_column,
};
pub use types::{EmployeeId, ExceptionRequest, ExtractionFailure, ParsedRequest, RequestField};
pub use validation::{Remark, validate_counts, validate_record};
pub use working_days::{WorkingDays, count_working_days, working_days};
