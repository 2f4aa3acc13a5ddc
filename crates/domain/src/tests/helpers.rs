// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    DayStatus, EmployeeId, ExceptionRequest, ParsedRequest, RequestParser, RosterEntry,
};
use time::Date;

pub fn create_test_parser() -> RequestParser {
    RequestParser::standard().expect("standard grammar compiles")
}

pub fn create_test_request(employee_id: u64, from: Date, to: Date) -> ParsedRequest {
    ParsedRequest::Parsed(ExceptionRequest {
        employee_name: String::from("Test Employee"),
        employee_id: EmployeeId::new(employee_id),
        category: String::from("Medical"),
        from_date: Some(from),
        to_date: Some(to),
        on_date: Some(from),
        date_issues: Vec::new(),
    })
}

/// Builds a roster entry with `home_duty` marker days followed by `other` non-marker days.
pub fn create_test_entry(
    employee_id: u64,
    branch: Option<&str>,
    home_duty: usize,
    other: usize,
) -> RosterEntry {
    let mut day_statuses: Vec<DayStatus> = vec![DayStatus::HomeDuty; home_duty];
    day_statuses.extend(std::iter::repeat_n(DayStatus::Other(String::from("WFO")), other));
    RosterEntry {
        employee_id: EmployeeId::new(employee_id),
        home_branch: branch.map(String::from),
        day_statuses,
    }
}

pub fn headers(names: &[&str]) -> Vec<String> {
    names.iter().map(|h| (*h).to_string()).collect()
}
