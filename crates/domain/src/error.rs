// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that stop a validation run.
///
/// Row-level problems (an unparseable request line, a non-numeric roster ID)
/// are never reported through this type; they degrade to null values on the
/// affected record instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A column the roster or automation table must carry is absent.
    MissingRequiredColumn {
        /// The configured column name that was expected.
        column: String,
        /// The headers that were actually present.
        available: Vec<String>,
    },
    /// A request grammar fragment failed to compile.
    InvalidPattern {
        /// The field rule whose pattern was rejected.
        field: String,
        /// The regex compiler's message.
        reason: String,
    },
    /// The roster layout cannot be applied to the given header row.
    InvalidRosterLayout {
        /// Description of the mismatch.
        reason: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingRequiredColumn { column, available } => {
                write!(
                    f,
                    "Column '{column}' not found (available columns: {})",
                    available.join(", ")
                )
            }
            Self::InvalidPattern { field, reason } => {
                write!(f, "Invalid pattern for field '{field}': {reason}")
            }
            Self::InvalidRosterLayout { reason } => {
                write!(f, "Invalid roster layout: {reason}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
