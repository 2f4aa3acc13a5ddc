// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Run configuration.
//!
//! Loaded from an optional TOML file. Every field has a default, so an empty
//! file (or no file) gives the standard table layout and an empty HR
//! allow-list.
//!
//! ```toml
//! [automation]
//! input_column = "Input"
//!
//! [roster]
//! employee_id_column = "Employee ID"
//! branch_column = "Depute Branch"
//! home_duty_marker = "WFH"
//! day_columns = "named"
//!
//! [[hr_approvals]]
//! employee_id = 2550156
//! reason = "medical issues"
//! ```

use crate::error::ApiError;
use rto_check_domain::{EmployeeId, HrApprovals, RosterLayout};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Layout of the automation (request) table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutomationLayout {
    /// Header of the column holding raw request text.
    pub input_column: String,
}

impl Default for AutomationLayout {
    fn default() -> Self {
        Self {
            input_column: String::from("Input"),
        }
    }
}

/// One HR allow-list entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HrApprovalEntry {
    /// The approved employee.
    pub employee_id: u64,
    /// Why the exception was approved.
    pub reason: String,
}

/// Complete configuration for a validation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct ValidationConfig {
    /// Request table layout.
    pub automation: AutomationLayout,
    /// Roster table layout.
    pub roster: RosterLayout,
    /// Administrative approvals layered over the roster check.
    pub hr_approvals: Vec<HrApprovalEntry>,
}

impl ValidationConfig {
    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Config` if the text is not valid TOML or contains
    /// unknown top-level keys or mistyped values.
    pub fn from_toml_str(text: &str) -> Result<Self, ApiError> {
        Ok(toml::from_str(text)?)
    }

    /// Reads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Io` if the file cannot be read, or `ApiError::Config`
    /// if it cannot be parsed.
    pub fn load(path: &Path) -> Result<Self, ApiError> {
        let text: String = std::fs::read_to_string(path).map_err(|source| ApiError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Builds the HR allow-list. Later entries for the same employee win.
    #[must_use]
    pub fn approvals(&self) -> HrApprovals {
        self.hr_approvals
            .iter()
            .map(|entry| (EmployeeId::new(entry.employee_id), entry.reason.clone()))
            .collect()
    }
}
