// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the ingestion and export layer.

use rto_check_domain::DomainError;
use thiserror::Error;

/// Errors that stop a validation run.
///
/// Every variant is structural: a bad row never surfaces here.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A required column is absent from an input table.
    #[error("Column '{column}' not found in {table} table (available columns: {})", .available.join(", "))]
    MissingRequiredColumn {
        /// Which input table was being read.
        table: &'static str,
        /// The configured column name.
        column: String,
        /// The headers that were present.
        available: Vec<String>,
    },

    /// An input table could not be read as CSV.
    #[error("Failed to read {table} table: {source}")]
    Csv {
        /// Which input table was being read.
        table: &'static str,
        /// The underlying CSV error.
        #[source]
        source: csv::Error,
    },

    /// The report could not be written.
    #[error("Failed to write report: {0}")]
    Report(#[source] csv::Error),

    /// The JSON report could not be serialised.
    #[error("Failed to write JSON report: {0}")]
    Json(#[from] serde_json::Error),

    /// A file could not be opened or read.
    #[error("Failed to access '{path}': {source}")]
    Io {
        /// The path involved.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML or has the wrong shape.
    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// A domain-level structural error.
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl ApiError {
    /// Attaches the table name to a domain error raised while reading it.
    #[must_use]
    pub fn from_domain(table: &'static str, error: DomainError) -> Self {
        match error {
            DomainError::MissingRequiredColumn { column, available } => {
                Self::MissingRequiredColumn {
                    table,
                    column,
                    available,
                }
            }
            other => Self::Domain(other),
        }
    }
}
