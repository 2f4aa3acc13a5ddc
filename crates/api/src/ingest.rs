// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! CSV ingestion for the automation and roster tables.
//!
//! Cells are decoded lossily so that a stray non-UTF-8 byte degrades one
//! cell instead of failing the run. Only missing required columns and
//! unreadable input are fatal.

use crate::config::AutomationLayout;
use crate::error::ApiError;
use csv::{ByteRecord, Reader};
use rto_check_domain::{RosterEntry, RosterLayout, RosterRowIssue, RosterSchema, require_column};
use std::io::Read;
use tracing::{debug, info, warn};

/// Table label used in errors and logs for the request table.
pub const AUTOMATION_TABLE: &str = "automation";
/// Table label used in errors and logs for the roster table.
pub const ROSTER_TABLE: &str = "roster";

/// A roster row that was excluded from aggregation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRosterRow {
    /// The row number (1-based, excluding header).
    pub row_number: usize,
    /// Why it was skipped.
    pub issue: RosterRowIssue,
}

/// Result of reading the roster table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterTable {
    /// Rows with a usable employee ID, in file order.
    pub entries: Vec<RosterEntry>,
    /// Rows excluded because their employee ID could not be coerced.
    pub skipped_rows: Vec<SkippedRosterRow>,
    /// Number of day-status columns selected.
    pub day_column_count: usize,
}

fn csv_reader<R: Read>(reader: R) -> Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader)
}

fn decode_cell(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Reads the header row, dropping a leading byte-order mark.
fn read_headers<R: Read>(reader: &mut Reader<R>, table: &'static str) -> Result<Vec<String>, ApiError> {
    let headers: &ByteRecord = reader
        .byte_headers()
        .map_err(|source| ApiError::Csv { table, source })?;

    Ok(headers
        .iter()
        .enumerate()
        .map(|(idx, h)| {
            let header: String = decode_cell(h);
            if idx == 0 {
                header.trim_start_matches('\u{feff}').to_string()
            } else {
                header
            }
        })
        .collect())
}

/// Counts the blank lines at the end of `span`, which runs from the start of
/// one record to the start of the next (or to the end of input).
///
/// The reader skips empty lines, so a one-column row with an empty cell
/// never comes back as a record. Every line terminator after the record's
/// own is such a row.
fn trailing_blank_lines(span: &[u8]) -> usize {
    let mut rest: &[u8] = span;
    let mut terminators: usize = 0;

    loop {
        rest = if let Some(head) = rest.strip_suffix(b"\r\n") {
            head
        } else if let Some(head) = rest.strip_suffix(b"\n") {
            head
        } else if let Some(head) = rest.strip_suffix(b"\r") {
            head
        } else {
            break;
        };
        terminators += 1;
    }

    terminators.saturating_sub(1)
}

fn record_start(record: &ByteRecord, fallback: usize) -> usize {
    record
        .position()
        .and_then(|p| usize::try_from(p.byte()).ok())
        .unwrap_or(fallback)
}

/// Reads the raw request text column, one entry per data row.
///
/// A row too short to reach the input column yields an empty string, and so
/// does a blank line, so that row counts are preserved.
///
/// # Errors
///
/// Returns `ApiError::MissingRequiredColumn` if the input column is absent, or
/// `ApiError::Csv` if the data cannot be read.
pub fn read_request_table<R: Read>(
    mut input: R,
    layout: &AutomationLayout,
) -> Result<Vec<String>, ApiError> {
    let mut bytes: Vec<u8> = Vec::new();
    input
        .read_to_end(&mut bytes)
        .map_err(|e| ApiError::Csv {
            table: AUTOMATION_TABLE,
            source: csv::Error::from(e),
        })?;

    let mut reader: Reader<&[u8]> = csv_reader(bytes.as_slice());
    let headers: Vec<String> = read_headers(&mut reader, AUTOMATION_TABLE)?;
    let input_index: usize = require_column(&headers, &layout.input_column)
        .map_err(|e| ApiError::from_domain(AUTOMATION_TABLE, e))?;

    let mut inputs: Vec<String> = Vec::new();
    let mut blank_rows: usize = 0;
    let mut previous_start: usize = 0;

    for result in reader.byte_records() {
        let record: ByteRecord = result.map_err(|source| ApiError::Csv {
            table: AUTOMATION_TABLE,
            source,
        })?;
        let start: usize = record_start(&record, previous_start);

        let skipped: usize =
            trailing_blank_lines(bytes.get(previous_start..start).unwrap_or_default());
        inputs.extend(std::iter::repeat_n(String::new(), skipped));
        blank_rows += skipped;

        inputs.push(record.get(input_index).map(decode_cell).unwrap_or_default());
        previous_start = start;
    }

    let skipped: usize = trailing_blank_lines(bytes.get(previous_start..).unwrap_or_default());
    inputs.extend(std::iter::repeat_n(String::new(), skipped));
    blank_rows += skipped;

    if blank_rows > 0 {
        debug!(blank_rows, "Kept blank automation rows as empty requests");
    }
    info!(rows = inputs.len(), "Read automation table");
    Ok(inputs)
}

/// Reads and validates the roster table.
///
/// # Errors
///
/// Returns `ApiError::MissingRequiredColumn` if the employee ID or branch column
/// is absent, `ApiError::Domain` if the layout is unusable, or `ApiError::Csv`
/// if the data cannot be read.
pub fn read_roster_table<R: Read>(
    reader: R,
    layout: &RosterLayout,
) -> Result<RosterTable, ApiError> {
    let mut reader: Reader<R> = csv_reader(reader);
    let headers: Vec<String> = read_headers(&mut reader, ROSTER_TABLE)?;
    let schema: RosterSchema =
        RosterSchema::resolve(&headers, layout).map_err(|e| ApiError::from_domain(ROSTER_TABLE, e))?;

    for idx in schema.positional_fallbacks() {
        warn!(
            column = idx,
            "Roster column has no header; treating it as a day column by position"
        );
    }
    for idx in schema.out_of_block_columns() {
        warn!(
            column = idx,
            header = headers.get(*idx).map_or("", String::as_str),
            "Roster column lies outside the day block; its cells are not counted"
        );
    }
    if schema.day_indices().is_empty() {
        warn!("Roster has no day-status columns; every employee will have 0 granted days");
    }
    debug!(day_columns = ?schema.day_indices(), "Resolved roster schema");

    let mut entries: Vec<RosterEntry> = Vec::new();
    let mut skipped_rows: Vec<SkippedRosterRow> = Vec::new();

    for (idx, result) in reader.byte_records().enumerate() {
        let row_number: usize = idx + 1;
        let record: ByteRecord = result.map_err(|source| ApiError::Csv {
            table: ROSTER_TABLE,
            source,
        })?;

        let cells: Vec<String> = record.iter().map(decode_cell).collect();
        let cell_refs: Vec<&str> = cells.iter().map(String::as_str).collect();

        match schema.entry_from_cells(&cell_refs) {
            Ok(entry) => entries.push(entry),
            Err(issue) => {
                warn!(row = row_number, %issue, "Skipping roster row");
                skipped_rows.push(SkippedRosterRow { row_number, issue });
            }
        }
    }

    info!(
        rows = entries.len(),
        skipped = skipped_rows.len(),
        day_columns = schema.day_indices().len(),
        "Read roster table"
    );

    Ok(RosterTable {
        entries,
        skipped_rows,
        day_column_count: schema.day_indices().len(),
    })
}
