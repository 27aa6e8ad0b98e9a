use std::sync::Arc;

use serde::Serialize;

use super::comparison::{Comparison, ComparisonKind};

/// Outcome of one evaluated comparison.
///
/// `Similar` records a divergence the active policy accepts; `Different`
/// breaks similarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonResult {
    Equal,
    Similar,
    Different,
}

/// A policy step in the evaluator chain: a pure function from a comparison
/// and the outcome computed so far to a possibly revised outcome. Steps run
/// in installation order; the last one's output is final.
pub type DifferenceEvaluator =
    Arc<dyn Fn(&Comparison, ComparisonResult) -> ComparisonResult + Send + Sync>;

/// The base policy applied before any installed evaluator runs.
///
/// Value-equal facets are `Equal`. Unequal facets are `Different` unless the
/// kind is cosmetic ([`ComparisonKind::is_recoverable`]), with one special
/// case: a node-type mismatch between a text node and a CDATA section is
/// `Similar`, since both carry character data.
pub fn base_result(comparison: &Comparison) -> ComparisonResult {
    if comparison.values_equal() {
        ComparisonResult::Equal
    } else if is_text_cdata_mismatch(comparison) || comparison.kind.is_recoverable() {
        ComparisonResult::Similar
    } else {
        ComparisonResult::Different
    }
}

fn is_text_cdata_mismatch(comparison: &Comparison) -> bool {
    if comparison.kind != ComparisonKind::NodeType {
        return false;
    }
    matches!(
        (
            comparison.control.value.as_deref(),
            comparison.test.value.as_deref(),
        ),
        (Some("text"), Some("cdata")) | (Some("cdata"), Some("text"))
    )
}

/// An evaluator that treats a text node and a CDATA section as fully
/// interchangeable: the node-type mismatch between them becomes `Equal`,
/// so documents differing only in CDATA usage compare as identical.
pub fn cdata_as_text() -> DifferenceEvaluator {
    Arc::new(|comparison, outcome| {
        if outcome != ComparisonResult::Equal && is_text_cdata_mismatch(comparison) {
            ComparisonResult::Equal
        } else {
            outcome
        }
    })
}

/// An evaluator that downgrades reordered (but fully matched) children from
/// `Different` to `Similar`, for callers that consider sibling order
/// cosmetic.
pub fn reordered_children_as_similar() -> DifferenceEvaluator {
    Arc::new(|comparison, outcome| {
        if comparison.kind == ComparisonKind::ChildNodelistSequence
            && outcome == ComparisonResult::Different
        {
            ComparisonResult::Similar
        } else {
            outcome
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::comparison::Detail;

    fn comparison(kind: ComparisonKind, control: &str, test: &str) -> Comparison {
        Comparison::new(
            kind,
            Detail {
                path: None,
                value: Some(control.to_string()),
            },
            Detail {
                path: None,
                value: Some(test.to_string()),
            },
        )
    }

    #[test]
    fn base_policy_classifies_by_kind() {
        let equal = comparison(ComparisonKind::TextValue, "a", "a");
        assert_eq!(base_result(&equal), ComparisonResult::Equal);

        let critical = comparison(ComparisonKind::TextValue, "a", "b");
        assert_eq!(base_result(&critical), ComparisonResult::Different);

        let cosmetic = comparison(ComparisonKind::NamespacePrefix, "a", "b");
        assert_eq!(base_result(&cosmetic), ComparisonResult::Similar);
    }

    #[test]
    fn text_versus_cdata_node_type_is_similar_by_default() {
        let mixed = comparison(ComparisonKind::NodeType, "text", "cdata");
        assert_eq!(base_result(&mixed), ComparisonResult::Similar);

        let hard = comparison(ComparisonKind::NodeType, "element", "comment");
        assert_eq!(base_result(&hard), ComparisonResult::Different);
    }

    #[test]
    fn cdata_as_text_upgrades_to_equal() {
        let mixed = comparison(ComparisonKind::NodeType, "cdata", "text");
        let evaluator = cdata_as_text();
        assert_eq!(
            evaluator(&mixed, base_result(&mixed)),
            ComparisonResult::Equal
        );

        let unrelated = comparison(ComparisonKind::TextValue, "a", "b");
        assert_eq!(
            evaluator(&unrelated, ComparisonResult::Different),
            ComparisonResult::Different
        );
    }
}
