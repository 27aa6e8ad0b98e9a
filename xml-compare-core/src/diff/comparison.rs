use std::fmt::{self, Display, Formatter};

use serde::{Serialize, Serializer};

/// The kinds of checks the engine performs, one per compared facet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonKind {
    XmlVersion,
    XmlStandalone,
    XmlEncoding,
    HasDoctypeDeclaration,
    DoctypeName,
    DoctypePublicId,
    DoctypeSystemId,
    SchemaLocation,
    NoNamespaceSchemaLocation,
    NodeType,
    NamespacePrefix,
    NamespaceUri,
    TextValue,
    CdataValue,
    CommentValue,
    ProcessingInstructionTarget,
    ProcessingInstructionData,
    ElementTagName,
    ElementNumAttributes,
    AttrNameLookup,
    AttrValue,
    AttrValueExplicitlySpecified,
    AttrSequence,
    HasChildNodes,
    ChildNodelistLength,
    ChildNodelistSequence,
    ChildLookup,
}

impl ComparisonKind {
    /// Whether a divergence on this facet is cosmetic under the default
    /// policy: the base evaluation downgrades it to `Similar` instead of
    /// `Different`.
    pub fn is_recoverable(self) -> bool {
        matches!(
            self,
            ComparisonKind::XmlVersion
                | ComparisonKind::XmlStandalone
                | ComparisonKind::XmlEncoding
                | ComparisonKind::HasDoctypeDeclaration
                | ComparisonKind::SchemaLocation
                | ComparisonKind::NoNamespaceSchemaLocation
                | ComparisonKind::NamespacePrefix
                | ComparisonKind::CommentValue
                | ComparisonKind::AttrValueExplicitlySpecified
                | ComparisonKind::AttrSequence
        )
    }

    /// Human-readable description used in difference messages.
    pub fn description(self) -> &'static str {
        match self {
            ComparisonKind::XmlVersion => "xml declaration version",
            ComparisonKind::XmlStandalone => "xml declaration standalone",
            ComparisonKind::XmlEncoding => "xml declaration encoding",
            ComparisonKind::HasDoctypeDeclaration => "presence of doctype declaration",
            ComparisonKind::DoctypeName => "doctype name",
            ComparisonKind::DoctypePublicId => "doctype public identifier",
            ComparisonKind::DoctypeSystemId => "doctype system identifier",
            ComparisonKind::SchemaLocation => "xsi:schemaLocation attribute",
            ComparisonKind::NoNamespaceSchemaLocation => "xsi:noNamespaceSchemaLocation attribute",
            ComparisonKind::NodeType => "node type",
            ComparisonKind::NamespacePrefix => "namespace prefix",
            ComparisonKind::NamespaceUri => "namespace URI",
            ComparisonKind::TextValue => "text value",
            ComparisonKind::CdataValue => "CDATA section value",
            ComparisonKind::CommentValue => "comment value",
            ComparisonKind::ProcessingInstructionTarget => "processing instruction target",
            ComparisonKind::ProcessingInstructionData => "processing instruction data",
            ComparisonKind::ElementTagName => "element tag name",
            ComparisonKind::ElementNumAttributes => "number of element attributes",
            ComparisonKind::AttrNameLookup => "attribute name",
            ComparisonKind::AttrValue => "attribute value",
            ComparisonKind::AttrValueExplicitlySpecified => {
                "attribute value explicitly specified"
            }
            ComparisonKind::AttrSequence => "sequence of attributes",
            ComparisonKind::HasChildNodes => "presence of child nodes",
            ComparisonKind::ChildNodelistLength => "number of child nodes",
            ComparisonKind::ChildNodelistSequence => "sequence of child nodes",
            ComparisonKind::ChildLookup => "presence of child node",
        }
    }
}

/// One step of a structural node path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// An element child, positioned among same-named siblings (1-based).
    Element { name: String, position: usize },
    /// A text or CDATA child, positioned among text children (1-based).
    Text { position: usize },
    Comment { position: usize },
    ProcessingInstruction { position: usize },
    /// An attribute of the element the path leads to.
    Attribute { name: String },
}

impl Display for PathSegment {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Element { name, position } => write!(f, "/{name}[{position}]"),
            PathSegment::Text { position } => write!(f, "/text()[{position}]"),
            PathSegment::Comment { position } => write!(f, "/comment()[{position}]"),
            PathSegment::ProcessingInstruction { position } => {
                write!(f, "/processing-instruction()[{position}]")
            }
            PathSegment::Attribute { name } => write!(f, "/@{name}"),
        }
    }
}

/// Structural location of a node, recorded as the segment sequence from the
/// document root. Paths are plain data: they can outlive the traversal that
/// produced them and re-locate the node in the source tree on demand.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct XmlPath {
    segments: Vec<PathSegment>,
}

impl XmlPath {
    /// The path of the document node itself.
    pub fn root() -> Self {
        Self::default()
    }

    pub fn push(&mut self, segment: PathSegment) {
        self.segments.push(segment);
    }

    pub fn pop(&mut self) {
        self.segments.pop();
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }
}

impl Display for XmlPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return write!(f, "/");
        }
        for segment in &self.segments {
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

impl Serialize for XmlPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One side of a comparison: where the engine looked and what it saw.
/// `value` is `None` when the facet is absent on that side (for example a
/// missing attribute or a document without a doctype).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Detail {
    pub path: Option<XmlPath>,
    pub value: Option<String>,
}

impl Detail {
    pub fn new(path: XmlPath, value: Option<String>) -> Self {
        Self {
            path: Some(path),
            value,
        }
    }
}

/// A single comparison the engine has performed: the checked facet and the
/// observed value on each side.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub kind: ComparisonKind,
    pub control: Detail,
    pub test: Detail,
}

impl Comparison {
    pub fn new(kind: ComparisonKind, control: Detail, test: Detail) -> Self {
        Self {
            kind,
            control,
            test,
        }
    }

    /// Byte-exact equality of the two observed values; absence on both
    /// sides counts as equal.
    pub fn values_equal(&self) -> bool {
        self.control.value == self.test.value
    }
}

impl Display for Comparison {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "expected {} {} but was {} - comparing {} to {}",
            self.kind.description(),
            show(&self.control.value),
            show(&self.test.value),
            show_path(&self.control.path),
            show_path(&self.test.path),
        )
    }
}

fn show(value: &Option<String>) -> String {
    match value {
        Some(value) => format!("'{value}'"),
        None => "(absent)".to_string(),
    }
}

fn show_path(path: &Option<XmlPath>) -> String {
    match path {
        Some(path) => path.to_string(),
        None => "(none)".to_string(),
    }
}
