// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{create_test_entry, create_test_request};
use crate::{
    EnrichedRecord, ExtractionFailure, HrApprovals, ParsedRequest, Remark, RosterAggregate,
    aggregate_roster, enrich_requests, validate_counts, validate_record,
};
use time::macros::date;

#[test]
fn test_equal_counts_are_good_to_approve() {
    let remark: Remark = validate_counts(Some(3), Some(3));
    assert_eq!(remark, Remark::GoodToApprove);
    assert_eq!(remark.to_string(), "Good to approve");
}

#[test]
fn test_more_raised_than_granted() {
    let remark: Remark = validate_counts(Some(5), Some(2));
    assert_eq!(remark, Remark::AdditionalExceptionRaised(3));
    assert_eq!(remark.to_string(), "3 day(s) additional exception raised");
}

#[test]
fn test_fewer_raised_than_granted() {
    let remark: Remark = validate_counts(Some(1), Some(4));
    assert_eq!(remark, Remark::LessThanRoster(3));
    assert_eq!(remark.to_string(), "3 day(s) less than roaster");
}

#[test]
fn test_missing_raised_days_is_incomplete() {
    let remark: Remark = validate_counts(None, Some(4));
    assert_eq!(remark, Remark::DataIncomplete);
    assert_eq!(remark.to_string(), "Data incomplete for validation");
}

#[test]
fn test_missing_granted_days_is_incomplete() {
    assert_eq!(validate_counts(Some(2), None), Remark::DataIncomplete);
    assert_eq!(validate_counts(None, None), Remark::DataIncomplete);
}

#[test]
fn test_zero_against_zero_is_good_to_approve() {
    assert_eq!(validate_counts(Some(0), Some(0)), Remark::GoodToApprove);
}

#[test]
fn test_validate_record_ignores_hr_note() {
    let mut approvals: HrApprovals = HrApprovals::new();
    approvals.insert(crate::EmployeeId::new(7), "medical issues");

    let records: Vec<EnrichedRecord> = enrich_requests(
        &[create_test_request(7, date!(2024 - 01 - 01), date!(2024 - 01 - 03))],
        &RosterAggregate::default(),
        &approvals,
    );

    assert!(!records[0].hr_approval_note.is_empty());
    assert_eq!(
        validate_record(&records[0]),
        Remark::AdditionalExceptionRaised(3)
    );
    assert_eq!(validate_record(&records[0]), records[0].remark);
}

#[test]
fn test_enriched_remarks_come_from_record_validation() {
    let aggregate: RosterAggregate = aggregate_roster(&[
        create_test_entry(1, Some("Pune"), 3, 2),
        create_test_entry(2, Some("Delhi"), 5, 0),
    ]);
    let requests: Vec<ParsedRequest> = vec![
        create_test_request(1, date!(2024 - 01 - 01), date!(2024 - 01 - 05)),
        create_test_request(2, date!(2024 - 01 - 01), date!(2024 - 01 - 05)),
        create_test_request(2, date!(2024 - 01 - 01), date!(2024 - 01 - 02)),
        create_test_request(1, date!(2024 - 01 - 05), date!(2024 - 01 - 01)),
        ParsedRequest::Unparsed(ExtractionFailure::EmptyLine),
    ];

    let records: Vec<EnrichedRecord> =
        enrich_requests(&requests, &aggregate, &HrApprovals::new());
    let remarks: Vec<Remark> = records.iter().map(validate_record).collect();

    assert_eq!(
        remarks,
        vec![
            Remark::AdditionalExceptionRaised(2),
            Remark::GoodToApprove,
            Remark::LessThanRoster(3),
            Remark::DataIncomplete,
            Remark::DataIncomplete,
        ]
    );
    assert!(records.iter().zip(&remarks).all(|(r, remark)| r.remark == *remark));
}
