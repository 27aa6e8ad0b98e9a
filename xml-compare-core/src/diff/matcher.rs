use crate::nodes::merged_text;
use crate::tree::{Document, NodeId, NodeKind, XmlAttribute};

/// Decides whether two elements may be paired for comparison.
#[derive(Debug, Clone, Default)]
pub enum ElementSelector {
    /// Pair elements by qualified name alone.
    #[default]
    ByName,
    /// Pair elements by qualified name and merged text content. Useful when
    /// repeated siblings are distinguished by their value.
    ByNameAndText,
    /// Pair elements by qualified name and the values of the named key
    /// attributes (matched by local name). Attributes absent on both sides
    /// count as matching.
    ByNameAndAttributes(Vec<String>),
}

impl ElementSelector {
    fn can_be_compared(
        &self,
        control_doc: &Document,
        control: NodeId,
        test_doc: &Document,
        test: NodeId,
    ) -> bool {
        let (Some(control_el), Some(test_el)) =
            (control_doc.element(control), test_doc.element(test))
        else {
            return false;
        };
        if control_el.name != test_el.name {
            return false;
        }
        match self {
            ElementSelector::ByName => true,
            ElementSelector::ByNameAndText => {
                merged_text(control_doc, control) == merged_text(test_doc, test)
            }
            ElementSelector::ByNameAndAttributes(keys) => keys.iter().all(|key| {
                attribute_value(control_el.attributes.as_slice(), key)
                    == attribute_value(test_el.attributes.as_slice(), key)
            }),
        }
    }
}

fn attribute_value<'a>(attributes: &'a [XmlAttribute], local_name: &str) -> Option<&'a str> {
    attributes
        .iter()
        .find(|attr| attr.name.local_name == local_name)
        .map(|attr| attr.value.as_str())
}

/// Pairs control children with test children ahead of comparison.
///
/// The element policy is the carried [`ElementSelector`]; non-element nodes
/// pair by node kind, with text and CDATA treated as interchangeable.
#[derive(Debug, Clone, Default)]
pub struct NodeMatcher {
    pub selector: ElementSelector,
}

impl NodeMatcher {
    pub fn new(selector: ElementSelector) -> Self {
        Self { selector }
    }

    /// Match two child lists, returning index pairs into the input slices.
    ///
    /// Control children are walked in order; each takes the first not yet
    /// matched test child it can be compared with. Unmatched control
    /// children yield `(Some, None)` in place; unmatched test children
    /// trail in document order as `(None, Some)`.
    pub fn match_children(
        &self,
        control_doc: &Document,
        control: &[NodeId],
        test_doc: &Document,
        test: &[NodeId],
    ) -> Vec<(Option<usize>, Option<usize>)> {
        let mut used = vec![false; test.len()];
        let mut pairs = Vec::with_capacity(control.len().max(test.len()));

        for (control_idx, &control_id) in control.iter().enumerate() {
            let found = (0..test.len()).find(|&test_idx| {
                !used[test_idx]
                    && self.nodes_match(control_doc, control_id, test_doc, test[test_idx])
            });
            match found {
                Some(test_idx) => {
                    used[test_idx] = true;
                    pairs.push((Some(control_idx), Some(test_idx)));
                }
                None => pairs.push((Some(control_idx), None)),
            }
        }
        for (test_idx, seen) in used.into_iter().enumerate() {
            if !seen {
                pairs.push((None, Some(test_idx)));
            }
        }
        pairs
    }

    /// Match two attribute lists by qualified name, order-insensitively.
    pub fn match_attributes(
        &self,
        control: &[&XmlAttribute],
        test: &[&XmlAttribute],
    ) -> Vec<(Option<usize>, Option<usize>)> {
        let mut used = vec![false; test.len()];
        let mut pairs = Vec::with_capacity(control.len().max(test.len()));

        for (control_idx, control_attr) in control.iter().enumerate() {
            let found = (0..test.len())
                .find(|&test_idx| !used[test_idx] && test[test_idx].name == control_attr.name);
            match found {
                Some(test_idx) => {
                    used[test_idx] = true;
                    pairs.push((Some(control_idx), Some(test_idx)));
                }
                None => pairs.push((Some(control_idx), None)),
            }
        }
        for (test_idx, seen) in used.into_iter().enumerate() {
            if !seen {
                pairs.push((None, Some(test_idx)));
            }
        }
        pairs
    }

    fn nodes_match(
        &self,
        control_doc: &Document,
        control: NodeId,
        test_doc: &Document,
        test: NodeId,
    ) -> bool {
        match (control_doc.kind(control), test_doc.kind(test)) {
            (NodeKind::Element(_), NodeKind::Element(_)) => {
                self.selector
                    .can_be_compared(control_doc, control, test_doc, test)
            }
            (NodeKind::Text(_) | NodeKind::Cdata(_), NodeKind::Text(_) | NodeKind::Cdata(_)) => {
                true
            }
            (NodeKind::Comment(_), NodeKind::Comment(_)) => true,
            (
                NodeKind::ProcessingInstruction { .. },
                NodeKind::ProcessingInstruction { .. },
            ) => true,
            _ => false,
        }
    }
}
