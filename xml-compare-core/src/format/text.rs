use crate::diff::{ComparisonResult, DiffReport};

/// Format a diff report as plain text, one line per difference.
///
/// Breaking differences are marked `!`, accepted (similar) ones `~`.
pub fn format_text(report: &DiffReport) -> String {
    let mut lines = Vec::with_capacity(report.differences.len() + 1);
    for difference in &report.differences {
        let marker = match difference.result {
            ComparisonResult::Different => '!',
            ComparisonResult::Similar => '~',
            ComparisonResult::Equal => '=',
        };
        lines.push(format!("{marker} {}", difference.comparison));
    }
    lines.join("\n")
}

/// Format the verdicts and difference counts on one line.
pub fn format_summary(report: &DiffReport) -> String {
    let breaking = report
        .differences
        .iter()
        .filter(|d| d.result == ComparisonResult::Different)
        .count();
    let accepted = report.differences.len() - breaking;
    format!(
        "identical={} similar={} different={breaking} similar_only={accepted}",
        report.identical, report.similar
    )
}
