//! Core XML tree comparison.

pub mod comparison;
pub mod engine;
pub mod evaluate;
pub mod matcher;

pub use comparison::{Comparison, ComparisonKind, Detail, PathSegment, XmlPath};
pub use engine::{
    compare, compare_with_options, DiffOptions, DiffReport, Difference, StopPolicy,
};
pub use evaluate::{
    cdata_as_text, reordered_children_as_similar, ComparisonResult, DifferenceEvaluator,
};
pub use matcher::{ElementSelector, NodeMatcher};
