// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::enrichment::EnrichedRecord;

/// Verdict for one request, comparing raised days with roster-granted days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Remark {
    /// Either count is unknown.
    DataIncomplete,
    /// More days raised than granted, by this many.
    AdditionalExceptionRaised(u32),
    /// Raised and granted agree.
    GoodToApprove,
    /// Fewer days raised than granted, by this many.
    LessThanRoster(u32),
}

impl std::fmt::Display for Remark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DataIncomplete => write!(f, "Data incomplete for validation"),
            Self::AdditionalExceptionRaised(days) => {
                write!(f, "{days} day(s) additional exception raised")
            }
            Self::GoodToApprove => write!(f, "Good to approve"),
            Self::LessThanRoster(days) => write!(f, "{days} day(s) less than roaster"),
        }
    }
}

/// Decides the remark for a pair of counts.
///
/// Null checks come first, then the three-way comparison.
#[must_use]
pub const fn validate_counts(raised_days: Option<u32>, granted_days: Option<u32>) -> Remark {
    let (Some(raised), Some(granted)) = (raised_days, granted_days) else {
        return Remark::DataIncomplete;
    };

    if raised > granted {
        Remark::AdditionalExceptionRaised(raised - granted)
    } else if raised == granted {
        Remark::GoodToApprove
    } else {
        Remark::LessThanRoster(granted - raised)
    }
}

/// Decides the remark for an enriched record.
///
/// The HR approval note plays no part in the verdict.
#[must_use]
pub const fn validate_record(record: &EnrichedRecord) -> Remark {
    validate_counts(record.raised_days, record.granted_days)
}
