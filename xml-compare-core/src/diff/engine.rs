use std::collections::HashMap;
use std::fmt;
use std::ops::ControlFlow;

use serde::Serialize;

use crate::nodes::AttributeSet;
use crate::tree::{Document, ElementData, NodeId, NodeKind, XmlAttribute};

use super::comparison::{Comparison, ComparisonKind, Detail, PathSegment, XmlPath};
use super::evaluate::{base_result, ComparisonResult, DifferenceEvaluator};
use super::matcher::NodeMatcher;

/// Whether a comparison run stops as soon as similarity is settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StopPolicy {
    /// Unwind at the first `Different` outcome; no further comparisons are
    /// performed. The verdicts are still exact. Right for boolean callers.
    #[default]
    FailFast,
    /// Visit every comparison and collect the complete difference list.
    FullEnumeration,
}

/// Configures a comparison run.
#[derive(Clone, Default)]
pub struct DiffOptions {
    /// Pairs control children/attributes with test counterparts.
    pub matcher: NodeMatcher,
    /// Policy chain applied, in order, after the base classification.
    pub evaluators: Vec<DifferenceEvaluator>,
    pub stop_policy: StopPolicy,
    /// Skip the attribute-sequence check entirely instead of reporting
    /// reordered attributes as similar.
    pub ignore_attribute_order: bool,
}

impl fmt::Debug for DiffOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiffOptions")
            .field("matcher", &self.matcher)
            .field("evaluators", &self.evaluators.len())
            .field("stop_policy", &self.stop_policy)
            .field("ignore_attribute_order", &self.ignore_attribute_order)
            .finish()
    }
}

/// One recorded divergence: the comparison and its evaluated outcome.
/// Only non-equal comparisons are recorded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Difference {
    pub comparison: Comparison,
    pub result: ComparisonResult,
}

impl fmt::Display for Difference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{:?}]", self.comparison, self.result)
    }
}

/// Outcome of a whole comparison run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiffReport {
    /// No divergence at all, cosmetic or otherwise.
    pub identical: bool,
    /// No divergence the active policy considers breaking.
    pub similar: bool,
    /// Every non-equal comparison, in the order it was performed.
    pub differences: Vec<Difference>,
}

/// Compare two documents with default options.
pub fn compare(control: &Document, test: &Document) -> DiffReport {
    compare_with_options(control, test, &DiffOptions::default())
}

/// Compare two documents under the given options.
///
/// Neither input is mutated; independent runs may execute concurrently.
pub fn compare_with_options(
    control: &Document,
    test: &Document,
    options: &DiffOptions,
) -> DiffReport {
    let mut engine = Engine {
        control,
        test,
        options,
        control_path: XmlPath::root(),
        test_path: XmlPath::root(),
        identical: true,
        similar: true,
        differences: Vec::new(),
    };
    let _ = engine.compare_documents();
    DiffReport {
        identical: engine.identical,
        similar: engine.similar,
        differences: engine.differences,
    }
}

struct Engine<'a> {
    control: &'a Document,
    test: &'a Document,
    options: &'a DiffOptions,
    control_path: XmlPath,
    test_path: XmlPath,
    identical: bool,
    similar: bool,
    differences: Vec<Difference>,
}

impl<'a> Engine<'a> {
    /// Evaluate one comparison through the base policy and the installed
    /// chain, fold it into the verdicts, and signal unwinding under
    /// fail-fast once similarity is lost.
    fn perform(&mut self, comparison: Comparison) -> ControlFlow<()> {
        let mut outcome = base_result(&comparison);
        for evaluator in &self.options.evaluators {
            outcome = evaluator(&comparison, outcome);
        }

        match outcome {
            ComparisonResult::Equal => {}
            ComparisonResult::Similar => {
                self.identical = false;
                self.differences.push(Difference {
                    comparison,
                    result: outcome,
                });
            }
            ComparisonResult::Different => {
                self.identical = false;
                self.similar = false;
                self.differences.push(Difference {
                    comparison,
                    result: outcome,
                });
                if self.options.stop_policy == StopPolicy::FailFast {
                    return ControlFlow::Break(());
                }
            }
        }
        ControlFlow::Continue(())
    }

    fn compare_values(
        &mut self,
        kind: ComparisonKind,
        control_value: Option<String>,
        test_value: Option<String>,
    ) -> ControlFlow<()> {
        let comparison = Comparison::new(
            kind,
            Detail::new(self.control_path.clone(), control_value),
            Detail::new(self.test_path.clone(), test_value),
        );
        self.perform(comparison)
    }

    fn compare_documents(&mut self) -> ControlFlow<()> {
        let control = self.control;
        let test = self.test;

        self.compare_values(
            ComparisonKind::NodeType,
            Some(control.kind(control.root()).type_name().to_string()),
            Some(test.kind(test.root()).type_name().to_string()),
        )?;

        let control_decl = &control.decl;
        let test_decl = &test.decl;
        self.compare_values(
            ComparisonKind::XmlVersion,
            control_decl.as_ref().map(|d| d.version.clone()),
            test_decl.as_ref().map(|d| d.version.clone()),
        )?;
        self.compare_values(
            ComparisonKind::XmlStandalone,
            control_decl.as_ref().and_then(|d| d.standalone.clone()),
            test_decl.as_ref().and_then(|d| d.standalone.clone()),
        )?;
        self.compare_values(
            ComparisonKind::XmlEncoding,
            control_decl.as_ref().and_then(|d| d.encoding.clone()),
            test_decl.as_ref().and_then(|d| d.encoding.clone()),
        )?;

        self.compare_values(
            ComparisonKind::HasDoctypeDeclaration,
            Some(control.doctype.is_some().to_string()),
            Some(test.doctype.is_some().to_string()),
        )?;
        if let (Some(control_dt), Some(test_dt)) = (&control.doctype, &test.doctype) {
            self.compare_values(
                ComparisonKind::DoctypeName,
                Some(control_dt.name.clone()),
                Some(test_dt.name.clone()),
            )?;
            self.compare_values(
                ComparisonKind::DoctypePublicId,
                control_dt.public_id.clone(),
                test_dt.public_id.clone(),
            )?;
            self.compare_values(
                ComparisonKind::DoctypeSystemId,
                control_dt.system_id.clone(),
                test_dt.system_id.clone(),
            )?;
        }

        self.compare_child_counts(control.root(), test.root())?;
        self.compare_children(control.root(), test.root())
    }

    /// Comparisons for one matched node pair, in fixed order: node type,
    /// then name and namespace, then kind-specific facets, then children.
    fn compare_nodes(&mut self, control_id: NodeId, test_id: NodeId) -> ControlFlow<()> {
        let control_kind = self.control.kind(control_id);
        let test_kind = self.test.kind(test_id);

        self.compare_values(
            ComparisonKind::NodeType,
            Some(control_kind.type_name().to_string()),
            Some(test_kind.type_name().to_string()),
        )?;

        match (control_kind, test_kind) {
            (NodeKind::Element(control_el), NodeKind::Element(test_el)) => {
                self.compare_values(
                    ComparisonKind::ElementTagName,
                    Some(control_el.name.local_name.clone()),
                    Some(test_el.name.local_name.clone()),
                )?;
                self.compare_values(
                    ComparisonKind::NamespaceUri,
                    control_el.name.namespace_uri.clone(),
                    test_el.name.namespace_uri.clone(),
                )?;
                self.compare_values(
                    ComparisonKind::NamespacePrefix,
                    control_el.name.prefix.clone(),
                    test_el.name.prefix.clone(),
                )?;
                self.compare_attributes(control_el, test_el)?;
                self.compare_child_counts(control_id, test_id)?;
                self.compare_children(control_id, test_id)?;
            }
            (
                NodeKind::Text(control_text) | NodeKind::Cdata(control_text),
                NodeKind::Text(test_text) | NodeKind::Cdata(test_text),
            ) => {
                let kind = if matches!(
                    (control_kind, test_kind),
                    (NodeKind::Cdata(_), NodeKind::Cdata(_))
                ) {
                    ComparisonKind::CdataValue
                } else {
                    ComparisonKind::TextValue
                };
                self.compare_values(
                    kind,
                    Some(control_text.clone()),
                    Some(test_text.clone()),
                )?;
            }
            (NodeKind::Comment(control_text), NodeKind::Comment(test_text)) => {
                self.compare_values(
                    ComparisonKind::CommentValue,
                    Some(control_text.clone()),
                    Some(test_text.clone()),
                )?;
            }
            (
                NodeKind::ProcessingInstruction {
                    target: control_target,
                    data: control_data,
                },
                NodeKind::ProcessingInstruction {
                    target: test_target,
                    data: test_data,
                },
            ) => {
                self.compare_values(
                    ComparisonKind::ProcessingInstructionTarget,
                    Some(control_target.clone()),
                    Some(test_target.clone()),
                )?;
                self.compare_values(
                    ComparisonKind::ProcessingInstructionData,
                    Some(control_data.clone()),
                    Some(test_data.clone()),
                )?;
            }
            // The matcher never pairs other kind combinations; the node-type
            // comparison above already covers them.
            _ => {}
        }
        ControlFlow::Continue(())
    }

    fn compare_attributes(
        &mut self,
        control_el: &ElementData,
        test_el: &ElementData,
    ) -> ControlFlow<()> {
        let control_set = AttributeSet::from_attributes(&control_el.attributes);
        let test_set = AttributeSet::from_attributes(&test_el.attributes);

        self.compare_values(
            ComparisonKind::ElementNumAttributes,
            Some(control_set.regular.len().to_string()),
            Some(test_set.regular.len().to_string()),
        )?;

        let pairs = self
            .options
            .matcher
            .match_attributes(&control_set.regular, &test_set.regular);
        for (control_idx, test_idx) in pairs {
            match (control_idx, test_idx) {
                (Some(control_idx), Some(test_idx)) => {
                    let control_attr = control_set.regular[control_idx];
                    let test_attr = test_set.regular[test_idx];

                    self.control_path.push(PathSegment::Attribute {
                        name: control_attr.name.to_string(),
                    });
                    self.test_path.push(PathSegment::Attribute {
                        name: test_attr.name.to_string(),
                    });

                    let flow = self.compare_matched_attribute(
                        control_attr,
                        test_attr,
                        control_idx,
                        test_idx,
                    );
                    self.control_path.pop();
                    self.test_path.pop();
                    flow?;
                }
                (Some(control_idx), None) => {
                    let control_attr = control_set.regular[control_idx];
                    let mut control_path = self.control_path.clone();
                    control_path.push(PathSegment::Attribute {
                        name: control_attr.name.to_string(),
                    });
                    self.perform(Comparison::new(
                        ComparisonKind::AttrNameLookup,
                        Detail::new(control_path, Some(control_attr.name.to_string())),
                        Detail::new(self.test_path.clone(), None),
                    ))?;
                }
                (None, Some(test_idx)) => {
                    let test_attr = test_set.regular[test_idx];
                    let mut test_path = self.test_path.clone();
                    test_path.push(PathSegment::Attribute {
                        name: test_attr.name.to_string(),
                    });
                    self.perform(Comparison::new(
                        ComparisonKind::AttrNameLookup,
                        Detail::new(self.control_path.clone(), None),
                        Detail::new(test_path, Some(test_attr.name.to_string())),
                    ))?;
                }
                (None, None) => {}
            }
        }

        if control_set.schema_location.is_some() || test_set.schema_location.is_some() {
            self.compare_values(
                ComparisonKind::SchemaLocation,
                control_set.schema_location.map(|a| a.value.clone()),
                test_set.schema_location.map(|a| a.value.clone()),
            )?;
        }
        if control_set.no_namespace_schema_location.is_some()
            || test_set.no_namespace_schema_location.is_some()
        {
            self.compare_values(
                ComparisonKind::NoNamespaceSchemaLocation,
                control_set
                    .no_namespace_schema_location
                    .map(|a| a.value.clone()),
                test_set
                    .no_namespace_schema_location
                    .map(|a| a.value.clone()),
            )?;
        }
        ControlFlow::Continue(())
    }

    fn compare_matched_attribute(
        &mut self,
        control_attr: &XmlAttribute,
        test_attr: &XmlAttribute,
        control_idx: usize,
        test_idx: usize,
    ) -> ControlFlow<()> {
        if !self.options.ignore_attribute_order && control_idx != test_idx {
            self.compare_values(
                ComparisonKind::AttrSequence,
                Some(control_idx.to_string()),
                Some(test_idx.to_string()),
            )?;
        }
        self.compare_values(
            ComparisonKind::AttrValue,
            Some(control_attr.value.clone()),
            Some(test_attr.value.clone()),
        )?;
        self.compare_values(
            ComparisonKind::AttrValueExplicitlySpecified,
            Some(control_attr.specified.to_string()),
            Some(test_attr.specified.to_string()),
        )
    }

    fn compare_child_counts(&mut self, control_id: NodeId, test_id: NodeId) -> ControlFlow<()> {
        let control_count = self.control.children(control_id).len();
        let test_count = self.test.children(test_id).len();
        if control_count > 0 && test_count > 0 {
            self.compare_values(
                ComparisonKind::ChildNodelistLength,
                Some(control_count.to_string()),
                Some(test_count.to_string()),
            )
        } else {
            self.compare_values(
                ComparisonKind::HasChildNodes,
                Some((control_count > 0).to_string()),
                Some((test_count > 0).to_string()),
            )
        }
    }

    /// Match the two child lists and walk the pairs in order: matched pairs
    /// recurse (with a sequence check when their positions diverge), while
    /// unmatched children on either side become lookup failures.
    fn compare_children(&mut self, control_id: NodeId, test_id: NodeId) -> ControlFlow<()> {
        let control_children = self.control.children(control_id).to_vec();
        let test_children = self.test.children(test_id).to_vec();

        let control_segments = path_segments(self.control, &control_children);
        let test_segments = path_segments(self.test, &test_children);

        let pairs = self.options.matcher.match_children(
            self.control,
            &control_children,
            self.test,
            &test_children,
        );

        for (control_idx, test_idx) in pairs {
            match (control_idx, test_idx) {
                (Some(control_idx), Some(test_idx)) => {
                    self.control_path.push(control_segments[control_idx].clone());
                    self.test_path.push(test_segments[test_idx].clone());

                    let flow = self.compare_matched_child(
                        control_children[control_idx],
                        test_children[test_idx],
                        control_idx,
                        test_idx,
                    );
                    self.control_path.pop();
                    self.test_path.pop();
                    flow?;
                }
                (Some(control_idx), None) => {
                    let mut control_path = self.control_path.clone();
                    control_path.push(control_segments[control_idx].clone());
                    self.perform(Comparison::new(
                        ComparisonKind::ChildLookup,
                        Detail::new(
                            control_path,
                            Some(lookup_name(self.control, control_children[control_idx])),
                        ),
                        Detail::new(self.test_path.clone(), None),
                    ))?;
                }
                (None, Some(test_idx)) => {
                    let mut test_path = self.test_path.clone();
                    test_path.push(test_segments[test_idx].clone());
                    self.perform(Comparison::new(
                        ComparisonKind::ChildLookup,
                        Detail::new(self.control_path.clone(), None),
                        Detail::new(
                            test_path,
                            Some(lookup_name(self.test, test_children[test_idx])),
                        ),
                    ))?;
                }
                (None, None) => {}
            }
        }
        ControlFlow::Continue(())
    }

    fn compare_matched_child(
        &mut self,
        control_id: NodeId,
        test_id: NodeId,
        control_idx: usize,
        test_idx: usize,
    ) -> ControlFlow<()> {
        if control_idx != test_idx {
            self.compare_values(
                ComparisonKind::ChildNodelistSequence,
                Some(control_idx.to_string()),
                Some(test_idx.to_string()),
            )?;
        }
        self.compare_nodes(control_id, test_id)
    }
}

/// Path segment for every child, with 1-based positions counted per
/// segment kind (and per qualified name for elements, XPath style).
fn path_segments(doc: &Document, children: &[NodeId]) -> Vec<PathSegment> {
    let mut element_counts: HashMap<(String, Option<String>), usize> = HashMap::new();
    let mut text_count = 0;
    let mut comment_count = 0;
    let mut pi_count = 0;

    children
        .iter()
        .map(|&child| match doc.kind(child) {
            NodeKind::Element(element) => {
                let key = (
                    element.name.local_name.clone(),
                    element.name.namespace_uri.clone(),
                );
                let position = element_counts.entry(key).or_insert(0);
                *position += 1;
                PathSegment::Element {
                    name: element.name.to_string(),
                    position: *position,
                }
            }
            NodeKind::Text(_) | NodeKind::Cdata(_) => {
                text_count += 1;
                PathSegment::Text {
                    position: text_count,
                }
            }
            NodeKind::Comment(_) => {
                comment_count += 1;
                PathSegment::Comment {
                    position: comment_count,
                }
            }
            NodeKind::ProcessingInstruction { .. } => {
                pi_count += 1;
                PathSegment::ProcessingInstruction { position: pi_count }
            }
            NodeKind::Document { .. } => PathSegment::Element {
                name: String::new(),
                position: 1,
            },
        })
        .collect()
}

fn lookup_name(doc: &Document, id: NodeId) -> String {
    match doc.kind(id) {
        NodeKind::Element(element) => element.name.to_string(),
        NodeKind::Text(_) => "#text".to_string(),
        NodeKind::Cdata(_) => "#cdata-section".to_string(),
        NodeKind::Comment(_) => "#comment".to_string(),
        NodeKind::ProcessingInstruction { target, .. } => target.clone(),
        NodeKind::Document { .. } => "#document".to_string(),
    }
}
