// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use crate::{ValidationConfig, ValidationReport, run_validation};

pub const ROSTER_CSV: &str = "\
Employee ID,Employee Name,Depute Branch,01-Jan,02-Jan,03-Jan,04-Jan,05-Jan,08-Jan,09-Jan,Total
2550156,Asha Rao,Pune,WFH,WFH,WFH,WFH,WFH,WFO,WFO,5
2549827,Ravi Kumar,Mumbai,WFH,WFH,WFH,,,,,3
2549950.0,Meera Shah,Chennai,WFH,WFH,WFH,WFH,WFH,WFH,,6
2549950,Meera Shah,Delhi, wfh ,Leave,,,,,,1
";

/// Builds an automation table with one `Input` row per line.
pub fn requests_csv(lines: &[&str]) -> String {
    let mut writer: csv::Writer<Vec<u8>> = csv::Writer::from_writer(Vec::new());
    writer.write_record(["Sl No", "Input"]).unwrap();
    for (idx, line) in lines.iter().enumerate() {
        writer
            .write_record([(idx + 1).to_string().as_str(), line])
            .unwrap();
    }
    String::from_utf8(writer.into_inner().unwrap()).unwrap()
}

/// A standard request line for `employee_id` covering 01-Jan-2024 (Monday)
/// to `to`.
pub fn request_line(name: &str, employee_id: u64, to: &str) -> String {
    format!(
        "{name} ({employee_id}) has raised an exception for Medical from 01-Jan-2024 to {to} on 28-Dec-2023"
    )
}

pub fn create_test_config() -> ValidationConfig {
    ValidationConfig::from_toml_str(
        r#"
[[hr_approvals]]
employee_id = 2549827
reason = "medical issues"
"#,
    )
    .unwrap()
}

pub fn run(lines: &[&str]) -> ValidationReport {
    let requests: String = requests_csv(lines);
    run_validation(
        requests.as_bytes(),
        ROSTER_CSV.as_bytes(),
        &create_test_config(),
    )
    .unwrap()
}
