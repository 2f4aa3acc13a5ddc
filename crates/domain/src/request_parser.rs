// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Extraction of structured exception requests from free text.
//!
//! A request line looks like:
//!
//! ```text
//! Asha Rao (2550156) has raised an exception for Medical from 01-Jan-2024 to 05-Jan-2024 on 28-Dec-2023
//! ```
//!
//! ## Invariants
//!
//! - Text is normalised (HTML entities decoded, whitespace collapsed, trimmed)
//!   before any matching happens
//! - Matching is anchored at the start of the line; trailing text is ignored
//! - Matching is all-or-nothing: either every field is extracted or the line
//!   is `Unparsed`
//! - A failed line never produces an error for the batch

use crate::error::DomainError;
use crate::types::{EmployeeId, ExceptionRequest, ExtractionFailure, ParsedRequest, RequestField};
use regex::{Captures, Regex};
use time::Date;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

/// Shape of every date token: `DD-Mon-YYYY`.
const DATE_TOKEN: &str = r"[0-9]{2}-[A-Za-z]{3}-[0-9]{4}";

/// Strict calendar format applied to date tokens once the shape matched.
const REQUEST_DATE_FORMAT: &[BorrowedFormatItem<'_>] =
    format_description!("[day]-[month repr:short case_sensitive:false]-[year]");

/// Capture group holding the requester name.
pub const GROUP_NAME: &str = "name";
/// Capture group holding the numeric employee ID.
pub const GROUP_ID: &str = "id";
/// Capture group holding the category phrase.
pub const GROUP_CATEGORY: &str = "category";
/// Capture group holding the range start date.
pub const GROUP_FROM: &str = "from";
/// Capture group holding the range end date.
pub const GROUP_TO: &str = "to";
/// Capture group holding the submission date.
pub const GROUP_ON: &str = "on";

/// Decodes HTML entities, collapses whitespace runs to one space and trims.
#[must_use]
pub fn normalize_request_text(raw: &str) -> String {
    let decoded = html_escape::decode_html_entities(raw);
    decoded.split_whitespace().collect::<Vec<&str>>().join(" ")
}

/// One step of the request grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRule {
    /// The field this fragment extracts.
    pub field: RequestField,
    /// Regex fragment, continuing where the previous rule stopped.
    pub fragment: String,
}

impl FieldRule {
    /// Creates a new `FieldRule`.
    #[must_use]
    pub fn new(field: RequestField, fragment: impl Into<String>) -> Self {
        Self {
            field,
            fragment: fragment.into(),
        }
    }
}

/// Ordered field rules compiled into one anchored, case-insensitive pattern.
///
/// Each rule is also compiled as a cumulative prefix so a failed match can
/// report the first field that stopped matching.
#[derive(Debug, Clone)]
pub struct RequestGrammar {
    prefixes: Vec<(RequestField, Regex)>,
}

impl RequestGrammar {
    /// Compiles a grammar from ordered rules.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPattern` if a fragment does not compile, or
    /// if `rules` is empty.
    pub fn new(rules: &[FieldRule]) -> Result<Self, DomainError> {
        if rules.is_empty() {
            return Err(DomainError::InvalidPattern {
                field: String::from("grammar"),
                reason: String::from("at least one field rule is required"),
            });
        }

        let mut pattern: String = String::from("(?i)^");
        let mut prefixes: Vec<(RequestField, Regex)> = Vec::with_capacity(rules.len());

        for rule in rules {
            pattern.push_str(&rule.fragment);
            let compiled: Regex = Regex::new(&pattern).map_err(|e| DomainError::InvalidPattern {
                field: rule.field.to_string(),
                reason: e.to_string(),
            })?;
            prefixes.push((rule.field, compiled));
        }

        Ok(Self { prefixes })
    }

    /// The grammar for `Name (ID) ... for Category from D to D on D` lines.
    ///
    /// # Errors
    ///
    /// Returns an error only if the built-in fragments fail to compile.
    pub fn standard() -> Result<Self, DomainError> {
        Self::new(&[
            FieldRule::new(
                RequestField::Identity,
                format!(r"(?P<{GROUP_NAME}>.*?)\((?P<{GROUP_ID}>[0-9]+?)\)"),
            ),
            FieldRule::new(
                RequestField::Category,
                format!(r".*?for\s+(?P<{GROUP_CATEGORY}>.*?)"),
            ),
            FieldRule::new(
                RequestField::FromDate,
                format!(r"\s+from\s+(?P<{GROUP_FROM}>{DATE_TOKEN})"),
            ),
            FieldRule::new(
                RequestField::ToDate,
                format!(r"\s+to\s+(?P<{GROUP_TO}>{DATE_TOKEN})"),
            ),
            FieldRule::new(
                RequestField::OnDate,
                format!(r"\s+on\s+(?P<{GROUP_ON}>{DATE_TOKEN})"),
            ),
        ])
    }

    /// Matches the full grammar against normalised text.
    ///
    /// # Errors
    ///
    /// Returns `ExtractionFailure::MissingField` naming the first rule whose
    /// cumulative prefix no longer matches.
    pub fn captures<'t>(&self, text: &'t str) -> Result<Captures<'t>, ExtractionFailure> {
        // `new` rejects empty rule lists
        let Some((last_field, full)) = self.prefixes.last() else {
            return Err(ExtractionFailure::EmptyLine);
        };

        if let Some(caps) = full.captures(text) {
            return Ok(caps);
        }

        let failed: RequestField = self
            .prefixes
            .iter()
            .find(|(_, prefix)| !prefix.is_match(text))
            .map_or(*last_field, |(field, _)| *field);
        Err(ExtractionFailure::MissingField(failed))
    }
}

/// Turns raw request lines into `ParsedRequest` values.
#[derive(Debug, Clone)]
pub struct RequestParser {
    grammar: RequestGrammar,
}

impl RequestParser {
    /// Creates a parser over the given grammar.
    ///
    /// The grammar must define the `name`, `id`, `category`, `from`, `to` and
    /// `on` capture groups.
    #[must_use]
    pub const fn new(grammar: RequestGrammar) -> Self {
        Self { grammar }
    }

    /// Creates a parser over `RequestGrammar::standard`.
    ///
    /// # Errors
    ///
    /// Returns an error only if the built-in grammar fails to compile.
    pub fn standard() -> Result<Self, DomainError> {
        Ok(Self::new(RequestGrammar::standard()?))
    }

    /// Parses one raw line. Never fails the batch.
    #[must_use]
    pub fn parse(&self, raw: &str) -> ParsedRequest {
        let text: String = normalize_request_text(raw);
        if text.is_empty() {
            return ParsedRequest::Unparsed(ExtractionFailure::EmptyLine);
        }

        match self.extract(&text) {
            Ok(request) => ParsedRequest::Parsed(request),
            Err(failure) => ParsedRequest::Unparsed(failure),
        }
    }

    fn extract(&self, text: &str) -> Result<ExceptionRequest, ExtractionFailure> {
        let caps: Captures<'_> = self.grammar.captures(text)?;

        let employee_name: String = group(&caps, GROUP_NAME, RequestField::Identity)?
            .trim()
            .to_string();
        let id_token: &str = group(&caps, GROUP_ID, RequestField::Identity)?;
        let employee_id: EmployeeId = id_token
            .parse::<u64>()
            .map(EmployeeId::new)
            .map_err(|_| ExtractionFailure::InvalidEmployeeId(id_token.to_string()))?;
        let category: String = group(&caps, GROUP_CATEGORY, RequestField::Category)?
            .trim()
            .to_string();

        let from_token: &str = group(&caps, GROUP_FROM, RequestField::FromDate)?;
        let to_token: &str = group(&caps, GROUP_TO, RequestField::ToDate)?;
        let on_token: &str = group(&caps, GROUP_ON, RequestField::OnDate)?;

        let mut date_issues: Vec<String> = Vec::new();
        let from_date: Option<Date> =
            parse_request_date(from_token, RequestField::FromDate, &mut date_issues);
        let to_date: Option<Date> =
            parse_request_date(to_token, RequestField::ToDate, &mut date_issues);
        let on_date: Option<Date> =
            parse_request_date(on_token, RequestField::OnDate, &mut date_issues);

        Ok(ExceptionRequest {
            employee_name,
            employee_id,
            category,
            from_date,
            to_date,
            on_date,
            date_issues,
        })
    }
}

/// Reads a named capture group, treating an absent group as a missing field.
fn group<'t>(
    caps: &Captures<'t>,
    name: &str,
    field: RequestField,
) -> Result<&'t str, ExtractionFailure> {
    caps.name(name)
        .map(|m| m.as_str())
        .ok_or(ExtractionFailure::MissingField(field))
}

/// Parses a `DD-Mon-YYYY` token, recording a note instead of failing.
fn parse_request_date(token: &str, field: RequestField, issues: &mut Vec<String>) -> Option<Date> {
    match Date::parse(token, REQUEST_DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(_) => {
            issues.push(format!("{field} '{token}' is not a valid calendar date"));
            None
        }
    }
}
