//! Generated test cases held by the controller

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use serde_json::{Map, Value};

/// A row of the parsed test case table, keyed by column header
pub type TestCaseRow = Map<String, Value>;

/// Column order used by the generator's markdown table
pub const TABLE_COLUMNS: &[&str] = &[
    "Test Case ID",
    "Area/Feature",
    "Description",
    "Steps",
    "Expected Result",
    "Risk Level",
    "Priority",
];

/// Result of a successful generation
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationResult {
    pub story_id: String,
    pub story_title: String,
    /// Raw generator output (usually a markdown table)
    pub test_cases: String,
    /// ISO-8601 timestamp as sent by the backend
    pub timestamp: String,
    /// Table rows the backend managed to parse out of `test_cases`
    pub parsed_cases: Vec<TestCaseRow>,
    pub note: Option<String>,
}

impl GenerationResult {
    /// "{story_id}: {story_title}"
    pub fn story_label(&self) -> String {
        format!("{}: {}", self.story_id, self.story_title)
    }

    /// Human-readable generation time
    pub fn generated_at_label(&self) -> String {
        match parse_timestamp(&self.timestamp) {
            Some(at) => format!(
                "Generated on {} at {}",
                at.format("%Y-%m-%d"),
                at.format("%H:%M:%S")
            ),
            None => format!("Generated on {}", self.timestamp),
        }
    }

    /// Columns to show in table view: known columns first, then anything else
    pub fn table_columns(&self) -> Vec<String> {
        let mut columns: Vec<String> = TABLE_COLUMNS
            .iter()
            .filter(|c| self.parsed_cases.iter().any(|row| row.contains_key(**c)))
            .map(|c| c.to_string())
            .collect();

        for row in &self.parsed_cases {
            for key in row.keys() {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.clone());
                }
            }
        }

        columns
    }
}

/// Parse a backend timestamp into local time.
/// Timestamps without an offset are taken as local time.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Local>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Local));
    }
    let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").ok()?;
    Local.from_local_datetime(&naive).earliest()
}

/// Render a table cell value as plain text
pub fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// File name for an exported spreadsheet: `test_cases_{id}_{YYYY-MM-DDTHH-MM-SS}.xlsx`
pub fn export_filename(story_id: &str, now: DateTime<Utc>) -> String {
    let safe_id: String = story_id
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let stamp = now.format("%Y-%m-%dT%H:%M:%S").to_string().replace(':', "-");
    format!("test_cases_{safe_id}_{stamp}.xlsx")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn sample_result() -> GenerationResult {
        GenerationResult {
            story_id: "US001".to_string(),
            story_title: "Password Reset".to_string(),
            test_cases: "| Test Case ID | Description |".to_string(),
            timestamp: "2024-05-01T12:34:56.789012".to_string(),
            parsed_cases: Vec::new(),
            note: None,
        }
    }

    fn row(value: Value) -> TestCaseRow {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_story_label() {
        assert_eq!(sample_result().story_label(), "US001: Password Reset");
    }

    #[test]
    fn test_generated_at_label_from_naive_timestamp() {
        assert_eq!(
            sample_result().generated_at_label(),
            "Generated on 2024-05-01 at 12:34:56"
        );
    }

    #[test]
    fn test_generated_at_label_falls_back_to_raw() {
        let result = GenerationResult {
            timestamp: "yesterday-ish".to_string(),
            ..sample_result()
        };
        assert_eq!(result.generated_at_label(), "Generated on yesterday-ish");
    }

    #[test]
    fn test_parse_timestamp_with_offset() {
        let parsed = parse_timestamp("2024-05-01T12:00:00Z").unwrap();
        let expected = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        assert_eq!(parsed.with_timezone(&Utc), expected);
    }

    #[test]
    fn test_export_filename_has_no_colons() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 9, 8, 7).unwrap();
        let name = export_filename("ABC-1", now);
        assert_eq!(name, "test_cases_ABC-1_2024-05-01T09-08-07.xlsx");
        assert!(!name.contains(':'));
    }

    #[test]
    fn test_export_filename_sanitizes_path_separators() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 9, 8, 7).unwrap();
        let name = export_filename("team/ABC 1", now);
        assert_eq!(name, "test_cases_team_ABC_1_2024-05-01T09-08-07.xlsx");
    }

    #[test]
    fn test_table_columns_known_order_then_extras() {
        let result = GenerationResult {
            parsed_cases: vec![
                row(json!({"Priority": 1, "Test Case ID": "US001001", "Owner": "qa"})),
                row(json!({"Description": "Login works"})),
            ],
            ..sample_result()
        };
        assert_eq!(
            result.table_columns(),
            vec!["Test Case ID", "Description", "Priority", "Owner"]
        );
    }

    #[test]
    fn test_cell_text() {
        assert_eq!(cell_text(None), "");
        assert_eq!(cell_text(Some(&Value::Null)), "");
        assert_eq!(cell_text(Some(&json!("High"))), "High");
        assert_eq!(cell_text(Some(&json!(2))), "2");
    }
}
