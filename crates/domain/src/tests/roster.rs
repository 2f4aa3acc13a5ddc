// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{create_test_entry, headers};
use crate::{
    DayColumnMode, DayStatus, DomainError, EmployeeId, RosterAggregate, RosterEntry,
    RosterLayout, RosterRowIssue, RosterSchema, aggregate_roster, parse_employee_id_cell,
};

const STANDARD_HEADERS: &[&str] = &[
    "Employee ID",
    "Employee Name",
    "Depute Branch",
    "01-Jan",
    "02-Jan",
    "03-Jan",
    "Total",
];

#[test]
fn test_named_mode_selects_day_columns() {
    let schema: RosterSchema =
        RosterSchema::resolve(&headers(STANDARD_HEADERS), &RosterLayout::default()).unwrap();

    assert_eq!(schema.day_indices(), &[3, 4, 5]);
    assert!(schema.positional_fallbacks().is_empty());
}

#[test]
fn test_positional_mode_matches_legacy_slice() {
    let layout: RosterLayout = RosterLayout {
        day_columns: DayColumnMode::Positional,
        ..RosterLayout::default()
    };
    let schema: RosterSchema = RosterSchema::resolve(&headers(STANDARD_HEADERS), &layout).unwrap();

    assert_eq!(schema.day_indices(), &[3, 4, 5]);
}

#[test]
fn test_named_mode_skips_non_day_names_inside_block() {
    let layout: RosterLayout = RosterLayout {
        leading_columns: 2,
        ..RosterLayout::default()
    };
    let schema: RosterSchema = RosterSchema::resolve(
        &headers(&["Employee ID", "Depute Branch", "Employee Name", "01-Jan", "02-Jan", "Total"]),
        &layout,
    )
    .unwrap();

    assert_eq!(schema.day_indices(), &[3, 4]);
}

#[test]
fn test_named_column_after_trailing_block_is_not_counted() {
    let schema: RosterSchema = RosterSchema::resolve(
        &headers(&[
            "Employee ID",
            "Employee Name",
            "Depute Branch",
            "01-Jan",
            "02-Jan",
            "Total",
            "Remarks",
        ]),
        &RosterLayout::default(),
    )
    .unwrap();

    assert_eq!(schema.day_indices(), &[3, 4]);
    assert_eq!(schema.out_of_block_columns(), &[6]);

    let entry: RosterEntry = schema
        .entry_from_cells(&["7", "Asha", "Pune", "WFH", "", "1", "WFH"])
        .unwrap();
    assert_eq!(entry.home_duty_days(), 1);
}

#[test]
fn test_unknown_name_in_leading_block_is_reported() {
    let schema: RosterSchema = RosterSchema::resolve(
        &headers(&["Employee ID", "Designation", "Depute Branch", "01-Jan", "Total"]),
        &RosterLayout::default(),
    )
    .unwrap();

    assert_eq!(schema.day_indices(), &[3]);
    assert_eq!(schema.out_of_block_columns(), &[1]);
}

#[test]
fn test_configured_non_day_columns_are_excluded() {
    let layout: RosterLayout = RosterLayout {
        non_day_columns: vec![String::from("Designation"), String::from("Total")],
        leading_columns: 0,
        trailing_columns: 0,
        ..RosterLayout::default()
    };
    let schema: RosterSchema = RosterSchema::resolve(
        &headers(&["Employee ID", "Depute Branch", "Designation", "01-Jan", "Total"]),
        &layout,
    )
    .unwrap();

    // Employee ID and Depute Branch are excluded even when not listed.
    assert_eq!(schema.day_indices(), &[3]);
    assert!(schema.out_of_block_columns().is_empty());
}

#[test]
fn test_unnamed_columns_fall_back_to_position() {
    let schema: RosterSchema = RosterSchema::resolve(
        &headers(&["Employee ID", "", "Depute Branch", "01-Jan", " ", "03-Jan", ""]),
        &RosterLayout::default(),
    )
    .unwrap();

    // Index 1 sits in the leading block and index 6 in the trailing block.
    assert_eq!(schema.day_indices(), &[3, 4, 5]);
    assert_eq!(schema.positional_fallbacks(), &[4]);
}

#[test]
fn test_headers_match_case_and_whitespace_insensitively() {
    let schema: Result<RosterSchema, DomainError> = RosterSchema::resolve(
        &headers(&[" employee  id ", "Employee Name", "DEPUTE BRANCH", "01-Jan", "Total"]),
        &RosterLayout::default(),
    );

    assert_eq!(schema.unwrap().day_indices(), &[3]);
}

#[test]
fn test_missing_employee_id_column_is_fatal() {
    let result: Result<RosterSchema, DomainError> = RosterSchema::resolve(
        &headers(&["Emp", "Employee Name", "Depute Branch", "01-Jan", "Total"]),
        &RosterLayout::default(),
    );

    match result {
        Err(DomainError::MissingRequiredColumn { column, available }) => {
            assert_eq!(column, "Employee ID");
            assert_eq!(available.len(), 5);
        }
        other => panic!("expected MissingRequiredColumn, got {other:?}"),
    }
}

#[test]
fn test_missing_branch_column_is_fatal() {
    let result: Result<RosterSchema, DomainError> = RosterSchema::resolve(
        &headers(&["Employee ID", "Employee Name", "Branch", "01-Jan", "Total"]),
        &RosterLayout::default(),
    );

    assert!(matches!(
        result,
        Err(DomainError::MissingRequiredColumn { column, .. }) if column == "Depute Branch"
    ));
}

#[test]
fn test_blank_marker_is_rejected() {
    let layout: RosterLayout = RosterLayout {
        home_duty_marker: String::from("  "),
        ..RosterLayout::default()
    };

    assert!(matches!(
        RosterSchema::resolve(&headers(STANDARD_HEADERS), &layout),
        Err(DomainError::InvalidRosterLayout { .. })
    ));
}

#[test]
fn test_entry_from_cells_classifies_days() {
    let schema: RosterSchema =
        RosterSchema::resolve(&headers(STANDARD_HEADERS), &RosterLayout::default()).unwrap();

    let entry: RosterEntry = schema
        .entry_from_cells(&["2550156", "Asha Rao", " Pune ", "wfh", "", "Leave", "1"])
        .unwrap();

    assert_eq!(entry.employee_id, EmployeeId::new(2_550_156));
    assert_eq!(entry.home_branch.as_deref(), Some("Pune"));
    assert_eq!(
        entry.day_statuses,
        vec![
            DayStatus::HomeDuty,
            DayStatus::Blank,
            DayStatus::Other(String::from("Leave")),
        ]
    );
    assert_eq!(entry.home_duty_days(), 1);
}

#[test]
fn test_entry_from_short_row_reads_blanks() {
    let schema: RosterSchema =
        RosterSchema::resolve(&headers(STANDARD_HEADERS), &RosterLayout::default()).unwrap();

    let entry: RosterEntry = schema.entry_from_cells(&["12", "", ""]).unwrap();

    assert_eq!(entry.home_branch, None);
    assert_eq!(entry.day_statuses, vec![DayStatus::Blank; 3]);
}

#[test]
fn test_entry_with_non_numeric_id_is_rejected() {
    let schema: RosterSchema =
        RosterSchema::resolve(&headers(STANDARD_HEADERS), &RosterLayout::default()).unwrap();

    assert_eq!(
        schema.entry_from_cells(&["N/A", "x", "Pune", "WFH", "WFH", "WFH", "3"]),
        Err(RosterRowIssue::NonNumericEmployeeId(String::from("N/A")))
    );
}

#[test]
fn test_parse_employee_id_cell_coercion() {
    assert_eq!(parse_employee_id_cell(" 2550156 "), Ok(EmployeeId::new(2_550_156)));
    assert_eq!(parse_employee_id_cell("2550156.0"), Ok(EmployeeId::new(2_550_156)));
    assert_eq!(parse_employee_id_cell(""), Err(RosterRowIssue::MissingEmployeeId));
    assert!(parse_employee_id_cell("12.5").is_err());
    assert!(parse_employee_id_cell("-4").is_err());
    assert!(parse_employee_id_cell("abc").is_err());
}

#[test]
fn test_duplicate_rows_sum_days_but_keep_first_branch() {
    let entries: Vec<RosterEntry> = vec![
        create_test_entry(100, Some("Pune"), 2, 3),
        create_test_entry(200, Some("Delhi"), 4, 1),
        create_test_entry(100, Some("Mumbai"), 1, 4),
    ];

    let aggregate: RosterAggregate = aggregate_roster(&entries);

    assert_eq!(aggregate.granted_days(EmployeeId::new(100)), 3);
    assert_eq!(aggregate.home_branch(EmployeeId::new(100)), Some("Pune"));
    assert_eq!(aggregate.granted_days(EmployeeId::new(200)), 4);
    assert_eq!(aggregate.employee_count(), 2);
}

#[test]
fn test_first_blank_branch_wins_over_later_value() {
    let entries: Vec<RosterEntry> = vec![
        create_test_entry(100, None, 1, 0),
        create_test_entry(100, Some("Mumbai"), 1, 0),
    ];

    let aggregate: RosterAggregate = aggregate_roster(&entries);

    assert_eq!(aggregate.home_branch(EmployeeId::new(100)), None);
    assert_eq!(aggregate.granted_days(EmployeeId::new(100)), 2);
}

#[test]
fn test_absent_employee_defaults() {
    let aggregate: RosterAggregate = aggregate_roster(&[create_test_entry(1, Some("Pune"), 0, 5)]);

    assert!(aggregate.contains(EmployeeId::new(1)));
    assert_eq!(aggregate.granted_days(EmployeeId::new(1)), 0);
    assert!(!aggregate.contains(EmployeeId::new(2)));
    assert_eq!(aggregate.granted_days(EmployeeId::new(2)), 0);
    assert_eq!(aggregate.home_branch(EmployeeId::new(2)), None);
}
