//! XML document comparison primitives.
//!
//! Parse a control and a test document, walk both trees in lockstep, and
//! fold every compared facet into two verdicts: `identical` (no divergence
//! at all) and `similar` (no divergence the active policy rejects), plus an
//! ordered difference list for diagnostics.

pub mod assertions;
pub mod diff;
pub mod format;
pub mod nodes;
pub mod normalize;
pub mod parser;
pub mod tree;
pub mod writer;

pub use assertions::{describe_differences, is_identical, is_similar};
pub use diff::{
    cdata_as_text, compare, compare_with_options, reordered_children_as_similar, Comparison,
    ComparisonKind, ComparisonResult, DiffOptions, DiffReport, Difference, DifferenceEvaluator,
    ElementSelector, NodeMatcher, StopPolicy, XmlPath,
};
pub use format::{format_json, format_summary, format_text};
pub use nodes::{merged_text, AttributeSet};
pub use normalize::{strip_comments, trim_text};
pub use parser::{parse, parse_file, ParseError};
pub use tree::{
    Doctype, Document, ElementData, NamespaceDecl, NodeId, NodeKind, QName, XmlAttribute, XmlDecl,
};
pub use writer::{write, write_file, WriteError};
