// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};
use time::Date;

/// Numeric employee identifier shared by request lines and roster rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(u64);

impl EmployeeId {
    /// Creates a new `EmployeeId`.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The fields a request line is expected to carry, in reading order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestField {
    /// Requester name followed by a parenthesised numeric ID.
    Identity,
    /// Reason label introduced by "for".
    Category,
    /// Range start introduced by "from".
    FromDate,
    /// Range end introduced by "to".
    ToDate,
    /// Submission date introduced by "on".
    OnDate,
}

impl RequestField {
    /// Returns a short human-readable label for this field.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Identity => "employee name and ID",
            Self::Category => "category",
            Self::FromDate => "from date",
            Self::ToDate => "to date",
            Self::OnDate => "on date",
        }
    }
}

impl std::fmt::Display for RequestField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Why a request line could not be turned into an `ExceptionRequest`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionFailure {
    /// The line is empty after normalisation.
    EmptyLine,
    /// The grammar stopped matching at this field.
    MissingField(RequestField),
    /// The parenthesised ID does not fit an employee identifier.
    InvalidEmployeeId(String),
}

impl std::fmt::Display for ExtractionFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyLine => write!(f, "request text is empty"),
            Self::MissingField(field) => write!(f, "could not extract {field}"),
            Self::InvalidEmployeeId(raw) => write!(f, "employee ID '{raw}' is out of range"),
        }
    }
}

/// A successfully extracted exception request.
///
/// The grammar guarantees every textual field was present. Date fields are
/// `None` only when the token had the `DD-Mon-YYYY` shape but did not name a
/// real calendar date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExceptionRequest {
    /// Requester name, trimmed.
    pub employee_name: String,
    /// Requester ID.
    pub employee_id: EmployeeId,
    /// Reason label, trimmed.
    pub category: String,
    /// First day of the requested range.
    pub from_date: Option<Date>,
    /// Last day of the requested range (inclusive).
    pub to_date: Option<Date>,
    /// Date the request was raised.
    pub on_date: Option<Date>,
    /// Date tokens that matched the grammar but could not be read as dates.
    pub date_issues: Vec<String>,
}

/// Outcome of parsing one raw request line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedRequest {
    /// All fields were extracted.
    Parsed(ExceptionRequest),
    /// Nothing usable was extracted.
    Unparsed(ExtractionFailure),
}

impl ParsedRequest {
    /// Returns the extracted request, if any.
    #[must_use]
    pub const fn request(&self) -> Option<&ExceptionRequest> {
        match self {
            Self::Parsed(request) => Some(request),
            Self::Unparsed(_) => None,
        }
    }

    /// Returns the requester ID, if the line was parsed.
    #[must_use]
    pub fn employee_id(&self) -> Option<EmployeeId> {
        self.request().map(|r| r.employee_id)
    }

    /// Returns `true` if the line was parsed.
    #[must_use]
    pub const fn is_parsed(&self) -> bool {
        matches!(self, Self::Parsed(_))
    }
}
