//! Boolean projections over the diff facade for use in test code.
//!
//! These carry no logic of their own; they pick a stop policy and delegate.

use crate::diff::{compare_with_options, DiffOptions, StopPolicy};
use crate::format::format_text;
use crate::tree::Document;

/// Whether the two documents show no divergence at all.
pub fn is_identical(control: &Document, test: &Document) -> bool {
    compare_with_options(control, test, &DiffOptions::default()).identical
}

/// Whether the two documents are equivalent under the default policy.
pub fn is_similar(control: &Document, test: &Document) -> bool {
    compare_with_options(control, test, &DiffOptions::default()).similar
}

/// A full, human-readable difference listing for failure messages.
pub fn describe_differences(control: &Document, test: &Document) -> String {
    let options = DiffOptions {
        stop_policy: StopPolicy::FullEnumeration,
        ..DiffOptions::default()
    };
    let report = compare_with_options(control, test, &options);
    if report.differences.is_empty() {
        "documents are identical".to_string()
    } else {
        format_text(&report)
    }
}
