// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Roster schema resolution and aggregation.
//!
//! A roster is a matrix with one row per employee (or per employee and period
//! segment) and one column per day. Each day cell holds a status token; only
//! the home-duty marker counts as a granted exception day.
//!
//! ## Invariants
//!
//! - The employee ID and home-branch columns must be present, or the run stops
//! - Rows for the same employee sum their marker counts
//! - The first row seen for an employee decides its home branch
//! - Day columns always lie between the leading identity block and the
//!   trailing summary block, in both column modes
//! - Any token other than the marker (blank, leave, holiday, free text) counts
//!   as zero

use crate::error::DomainError;
use crate::types::EmployeeId;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// How day-status columns are picked out of the roster header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DayColumnMode {
    /// Columns inside the day block whose header is not a non-day name.
    /// Unnamed columns are taken by position alone.
    #[default]
    Named,
    /// Columns strictly between the leading and trailing blocks.
    Positional,
}

/// Roster column configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterLayout {
    /// Header of the employee ID column.
    pub employee_id_column: String,
    /// Header of the home (depute) branch column.
    pub branch_column: String,
    /// Status token that marks an approved exception day.
    pub home_duty_marker: String,
    /// Day column selection policy.
    pub day_columns: DayColumnMode,
    /// Headers that never hold day statuses.
    pub non_day_columns: Vec<String>,
    /// Identity/metadata columns before the day block.
    pub leading_columns: usize,
    /// Summary columns after the day block.
    pub trailing_columns: usize,
}

impl Default for RosterLayout {
    fn default() -> Self {
        Self {
            employee_id_column: String::from("Employee ID"),
            branch_column: String::from("Depute Branch"),
            home_duty_marker: String::from("WFH"),
            day_columns: DayColumnMode::Named,
            non_day_columns: vec![
                String::from("Employee ID"),
                String::from("Employee Name"),
                String::from("Depute Branch"),
                String::from("Total"),
            ],
            leading_columns: 3,
            trailing_columns: 1,
        }
    }
}

/// Normalises a header for case-insensitive, whitespace-tolerant matching.
#[must_use]
pub fn normalize_header(header: &str) -> String {
    header
        .split_whitespace()
        .collect::<Vec<&str>>()
        .join(" ")
        .to_lowercase()
}

/// Finds the index of the column named `name`.
#[must_use]
pub fn find_column(headers: &[String], name: &str) -> Option<usize> {
    let wanted: String = normalize_header(name);
    headers.iter().position(|h| normalize_header(h) == wanted)
}

/// Finds a required column or reports it as missing.
///
/// # Errors
///
/// Returns `DomainError::MissingRequiredColumn` if no header matches `name`.
pub fn require_column(headers: &[String], name: &str) -> Result<usize, DomainError> {
    find_column(headers, name).ok_or_else(|| DomainError::MissingRequiredColumn {
        column: name.to_string(),
        available: headers.iter().map(|h| h.trim().to_string()).collect(),
    })
}

/// Classification of a single roster day cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DayStatus {
    /// The home-duty marker: an approved exception day.
    HomeDuty,
    /// Empty cell.
    Blank,
    /// Any other token, kept verbatim (trimmed).
    Other(String),
}

impl DayStatus {
    /// Classifies a raw cell against the configured marker.
    #[must_use]
    pub fn classify(cell: &str, marker: &str) -> Self {
        let trimmed: &str = cell.trim();
        if trimmed.is_empty() {
            Self::Blank
        } else if trimmed.to_uppercase() == marker.trim().to_uppercase() {
            Self::HomeDuty
        } else {
            Self::Other(trimmed.to_string())
        }
    }
}

/// Why a roster row was excluded from aggregation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterRowIssue {
    /// The employee ID cell is empty.
    MissingEmployeeId,
    /// The employee ID cell is not a whole number.
    NonNumericEmployeeId(String),
}

impl std::fmt::Display for RosterRowIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingEmployeeId => write!(f, "employee ID is empty"),
            Self::NonNumericEmployeeId(raw) => {
                write!(f, "employee ID '{raw}' is not a whole number")
            }
        }
    }
}

/// Coerces a roster employee ID cell.
///
/// Spreadsheet exports often write integers as `2550156.0`; a fractional part
/// made only of zeros is accepted.
///
/// # Errors
///
/// Returns a `RosterRowIssue` if the cell is empty or not a whole number.
pub fn parse_employee_id_cell(raw: &str) -> Result<EmployeeId, RosterRowIssue> {
    let trimmed: &str = raw.trim();
    if trimmed.is_empty() {
        return Err(RosterRowIssue::MissingEmployeeId);
    }

    let whole: &str = match trimmed.split_once('.') {
        Some((whole, fraction)) if fraction.chars().all(|c| c == '0') => whole,
        Some(_) => return Err(RosterRowIssue::NonNumericEmployeeId(trimmed.to_string())),
        None => trimmed,
    };

    whole
        .parse::<u64>()
        .map(EmployeeId::new)
        .map_err(|_| RosterRowIssue::NonNumericEmployeeId(trimmed.to_string()))
}

/// One usable roster row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
    /// The employee this row belongs to.
    pub employee_id: EmployeeId,
    /// Home branch label, `None` if the cell is blank.
    pub home_branch: Option<String>,
    /// Day statuses in column order.
    pub day_statuses: Vec<DayStatus>,
}

impl RosterEntry {
    /// Number of home-duty days on this row.
    #[must_use]
    pub fn home_duty_days(&self) -> u32 {
        let count: usize = self
            .day_statuses
            .iter()
            .filter(|s| **s == DayStatus::HomeDuty)
            .count();
        u32::try_from(count).unwrap_or(u32::MAX)
    }
}

/// Resolved column positions for a roster header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterSchema {
    employee_id_index: usize,
    branch_index: usize,
    day_indices: Vec<usize>,
    positional_fallbacks: Vec<usize>,
    out_of_block: Vec<usize>,
    marker: String,
}

impl RosterSchema {
    /// Validates the header row and selects the day columns.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MissingRequiredColumn` if the employee ID or branch
    /// column is absent, or `DomainError::InvalidRosterLayout` if the marker is
    /// blank.
    pub fn resolve(headers: &[String], layout: &RosterLayout) -> Result<Self, DomainError> {
        let employee_id_index: usize = require_column(headers, &layout.employee_id_column)?;
        let branch_index: usize = require_column(headers, &layout.branch_column)?;

        if layout.home_duty_marker.trim().is_empty() {
            return Err(DomainError::InvalidRosterLayout {
                reason: String::from("home-duty marker must not be blank"),
            });
        }

        let positional_end: usize = headers.len().saturating_sub(layout.trailing_columns);
        let in_positional_block = |idx: usize| idx >= layout.leading_columns && idx < positional_end;

        let mut day_indices: Vec<usize> = Vec::new();
        let mut positional_fallbacks: Vec<usize> = Vec::new();
        let mut out_of_block: Vec<usize> = Vec::new();

        match layout.day_columns {
            DayColumnMode::Positional => {
                day_indices.extend((0..headers.len()).filter(|idx| in_positional_block(*idx)));
            }
            DayColumnMode::Named => {
                let mut non_day: HashSet<String> = layout
                    .non_day_columns
                    .iter()
                    .map(|h| normalize_header(h))
                    .collect();
                non_day.insert(normalize_header(&layout.employee_id_column));
                non_day.insert(normalize_header(&layout.branch_column));

                for (idx, header) in headers.iter().enumerate() {
                    let normalized: String = normalize_header(header);
                    if non_day.contains(&normalized) {
                        continue;
                    }
                    if in_positional_block(idx) {
                        // Name absent: only the column's position can tell.
                        if normalized.is_empty() {
                            positional_fallbacks.push(idx);
                        }
                        day_indices.push(idx);
                    } else if !normalized.is_empty() {
                        out_of_block.push(idx);
                    }
                }
            }
        }

        // The identity columns never count, whatever the layout says.
        day_indices.retain(|idx| *idx != employee_id_index && *idx != branch_index);

        Ok(Self {
            employee_id_index,
            branch_index,
            day_indices,
            positional_fallbacks,
            out_of_block,
            marker: layout.home_duty_marker.clone(),
        })
    }

    /// Indices of the selected day columns.
    #[must_use]
    pub fn day_indices(&self) -> &[usize] {
        &self.day_indices
    }

    /// Unnamed columns that were selected by position.
    #[must_use]
    pub fn positional_fallbacks(&self) -> &[usize] {
        &self.positional_fallbacks
    }

    /// Named columns outside the day block that were left uncounted.
    #[must_use]
    pub fn out_of_block_columns(&self) -> &[usize] {
        &self.out_of_block
    }

    /// Builds a roster entry from one row of cells.
    ///
    /// Missing trailing cells read as blank.
    ///
    /// # Errors
    ///
    /// Returns a `RosterRowIssue` if the employee ID cell cannot be coerced.
    pub fn entry_from_cells(&self, cells: &[&str]) -> Result<RosterEntry, RosterRowIssue> {
        let cell = |idx: usize| cells.get(idx).copied().unwrap_or("");

        let employee_id: EmployeeId = parse_employee_id_cell(cell(self.employee_id_index))?;

        let branch: &str = cell(self.branch_index).trim();
        let home_branch: Option<String> = if branch.is_empty() {
            None
        } else {
            Some(branch.to_string())
        };

        let day_statuses: Vec<DayStatus> = self
            .day_indices
            .iter()
            .map(|idx| DayStatus::classify(cell(*idx), &self.marker))
            .collect();

        Ok(RosterEntry {
            employee_id,
            home_branch,
            day_statuses,
        })
    }
}

/// Per-employee totals derived from the roster.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RosterAggregate {
    granted_days: HashMap<EmployeeId, u32>,
    home_branch: HashMap<EmployeeId, Option<String>>,
}

impl RosterAggregate {
    /// Granted exception days for an employee, `0` if not on the roster.
    #[must_use]
    pub fn granted_days(&self, employee_id: EmployeeId) -> u32 {
        self.granted_days.get(&employee_id).copied().unwrap_or(0)
    }

    /// Home branch for an employee, `None` if not on the roster or blank.
    #[must_use]
    pub fn home_branch(&self, employee_id: EmployeeId) -> Option<&str> {
        self.home_branch
            .get(&employee_id)
            .and_then(|branch| branch.as_deref())
    }

    /// Returns `true` if the employee has at least one roster row.
    #[must_use]
    pub fn contains(&self, employee_id: EmployeeId) -> bool {
        self.granted_days.contains_key(&employee_id)
    }

    /// Number of distinct employees on the roster.
    #[must_use]
    pub fn employee_count(&self) -> usize {
        self.granted_days.len()
    }
}

/// Sums marker days per employee and records each employee's first branch.
pub fn aggregate_roster<'a, I>(entries: I) -> RosterAggregate
where
    I: IntoIterator<Item = &'a RosterEntry>,
{
    let mut aggregate: RosterAggregate = RosterAggregate::default();

    for entry in entries {
        let total: &mut u32 = aggregate.granted_days.entry(entry.employee_id).or_insert(0);
        *total = total.saturating_add(entry.home_duty_days());

        aggregate
            .home_branch
            .entry(entry.employee_id)
            .or_insert_with(|| entry.home_branch.clone());
    }

    aggregate
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header("  Employee   ID "), "employee id");
        assert_eq!(normalize_header("DEPUTE BRANCH"), "depute branch");
        assert_eq!(normalize_header("   "), "");
    }

    #[test]
    fn test_classify_day_status() {
        assert_eq!(DayStatus::classify(" wfh ", "WFH"), DayStatus::HomeDuty);
        assert_eq!(DayStatus::classify("", "WFH"), DayStatus::Blank);
        assert_eq!(
            DayStatus::classify(" Leave ", "WFH"),
            DayStatus::Other(String::from("Leave"))
        );
        assert_eq!(
            DayStatus::classify("WFH-half", "WFH"),
            DayStatus::Other(String::from("WFH-half"))
        );
    }
}
