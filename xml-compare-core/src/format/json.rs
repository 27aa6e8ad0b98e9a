use crate::diff::DiffReport;

/// Format a diff report as JSON.
pub fn format_json(report: &DiffReport) -> String {
    serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string())
}
