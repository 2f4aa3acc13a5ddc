// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Working-day arithmetic.
//!
//! A working day is Monday through Friday. No holiday calendar is applied.
//! Both endpoints of a range are included.

use time::Date;

/// Days in a full week that are working days.
const WORKING_DAYS_PER_WEEK: i64 = 5;

/// Result of counting the working days of a requested range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkingDays {
    /// The range is valid and spans this many working days.
    Counted(u32),
    /// At least one endpoint is missing.
    MissingDate,
    /// The start of the range is after its end.
    InvertedRange,
}

impl WorkingDays {
    /// Returns the count, or `None` when the range could not be counted.
    #[must_use]
    pub const fn count(&self) -> Option<u32> {
        match self {
            Self::Counted(days) => Some(*days),
            Self::MissingDate | Self::InvertedRange => None,
        }
    }
}

/// Counts working days in `[from, to]` when both dates are known.
#[must_use]
pub fn working_days(from: Option<Date>, to: Option<Date>) -> WorkingDays {
    let (Some(from), Some(to)) = (from, to) else {
        return WorkingDays::MissingDate;
    };

    count_working_days(from, to).map_or(WorkingDays::InvertedRange, WorkingDays::Counted)
}

/// Counts Monday-Friday days in the inclusive range `[from, to]`.
///
/// Returns `None` if `from` is after `to`.
#[must_use]
pub fn count_working_days(from: Date, to: Date) -> Option<u32> {
    if from > to {
        return None;
    }

    let span: i64 = i64::from(to.to_julian_day()) - i64::from(from.to_julian_day()) + 1;
    let full_weeks: i64 = span / 7;
    let remainder: i64 = span % 7;
    let first_weekday: i64 = i64::from(from.weekday().number_days_from_monday());

    // Saturday and Sunday are 5 and 6 days from Monday.
    let partial: i64 = (0..remainder)
        .filter(|offset| (first_weekday + offset) % 7 < WORKING_DAYS_PER_WEEK)
        .count()
        .try_into()
        .unwrap_or(0);

    u32::try_from(full_weeks * WORKING_DAYS_PER_WEEK + partial).ok()
}
