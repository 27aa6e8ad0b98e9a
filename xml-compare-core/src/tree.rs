use std::fmt::{self, Display, Formatter};
use std::hash::{Hash, Hasher};

/// Namespace URI of the XML Schema instance attributes (`xsi:*`).
pub const XSI_NAMESPACE_URI: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// Index of a node inside its owning [`Document`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// A namespace-qualified name.
///
/// Equality and hashing ignore the prefix: two names denote the same thing
/// when local name and namespace URI agree. The prefix is kept only for
/// display and for the dedicated prefix comparison.
#[derive(Debug, Clone, Eq)]
pub struct QName {
    pub local_name: String,
    pub namespace_uri: Option<String>,
    pub prefix: Option<String>,
}

impl QName {
    /// A name with no namespace.
    pub fn new(local_name: impl Into<String>) -> Self {
        Self {
            local_name: local_name.into(),
            namespace_uri: None,
            prefix: None,
        }
    }

    /// A namespace-qualified name with an optional prefix.
    pub fn namespaced(
        local_name: impl Into<String>,
        namespace_uri: impl Into<String>,
        prefix: Option<String>,
    ) -> Self {
        Self {
            local_name: local_name.into(),
            namespace_uri: Some(namespace_uri.into()),
            prefix,
        }
    }
}

impl PartialEq for QName {
    fn eq(&self, other: &Self) -> bool {
        self.local_name == other.local_name && self.namespace_uri == other.namespace_uri
    }
}

impl Hash for QName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.local_name.hash(state);
        self.namespace_uri.hash(state);
    }
}

impl Display for QName {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.prefix {
            Some(prefix) => write!(f, "{}:{}", prefix, self.local_name),
            None => write!(f, "{}", self.local_name),
        }
    }
}

/// A single attribute owned by exactly one element.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlAttribute {
    pub name: QName,
    pub value: String,
    /// Whether the attribute was written out in the source document rather
    /// than supplied by DTD defaulting. The parser always sets this;
    /// programmatically built trees may clear it.
    pub specified: bool,
}

impl XmlAttribute {
    pub fn new(name: QName, value: impl Into<String>) -> Self {
        Self {
            name,
            value: value.into(),
            specified: true,
        }
    }
}

/// A namespace declaration (`xmlns="uri"` or `xmlns:p="uri"`) carried by an
/// element. Kept apart from the attribute list: declarations shape name
/// resolution and serialization but never take part in attribute comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct NamespaceDecl {
    pub prefix: Option<String>,
    pub uri: String,
}

/// The `<?xml ...?>` declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlDecl {
    pub version: String,
    pub encoding: Option<String>,
    pub standalone: Option<String>,
}

/// A `<!DOCTYPE ...>` declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct Doctype {
    pub name: String,
    pub public_id: Option<String>,
    pub system_id: Option<String>,
}

/// Payload of an element node.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementData {
    pub name: QName,
    pub attributes: Vec<XmlAttribute>,
    pub namespace_decls: Vec<NamespaceDecl>,
    pub children: Vec<NodeId>,
}

impl ElementData {
    pub fn new(name: QName) -> Self {
        Self {
            name,
            attributes: Vec::new(),
            namespace_decls: Vec::new(),
            children: Vec::new(),
        }
    }
}

/// The closed set of node kinds the engine understands.
///
/// Attributes and the document-type declaration are not node kinds here:
/// attributes live inside [`ElementData`] and the doctype on [`Document`],
/// so "an attribute belongs to exactly one element" and "a doctype belongs
/// to the document" hold by construction.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Document { children: Vec<NodeId> },
    Element(ElementData),
    Text(String),
    Cdata(String),
    Comment(String),
    ProcessingInstruction { target: String, data: String },
}

impl NodeKind {
    /// Stable label used in node-type comparisons and diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            NodeKind::Document { .. } => "document",
            NodeKind::Element(_) => "element",
            NodeKind::Text(_) => "text",
            NodeKind::Cdata(_) => "cdata",
            NodeKind::Comment(_) => "comment",
            NodeKind::ProcessingInstruction { .. } => "processing-instruction",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct NodeData {
    kind: NodeKind,
    parent: Option<NodeId>,
}

/// An XML document held as a flat arena of nodes.
///
/// Parent and child links are indices into the arena, so the tree is plain
/// owned data with O(1) child and parent lookups and no reference cycles.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub decl: Option<XmlDecl>,
    pub doctype: Option<Doctype>,
    nodes: Vec<NodeData>,
    root: NodeId,
}

impl Document {
    /// An empty document containing only the document node.
    pub fn new() -> Self {
        Self {
            decl: None,
            doctype: None,
            nodes: vec![NodeData {
                kind: NodeKind::Document {
                    children: Vec::new(),
                },
                parent: None,
            }],
            root: NodeId(0),
        }
    }

    /// The document node itself.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The first element child of the document node, if the document has one.
    pub fn root_element(&self) -> Option<NodeId> {
        self.children(self.root)
            .iter()
            .copied()
            .find(|&id| matches!(self.kind(id), NodeKind::Element(_)))
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.0].kind
    }

    pub(crate) fn kind_mut(&mut self, id: NodeId) -> &mut NodeKind {
        &mut self.nodes[id.0].kind
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// Child list of a node; empty for leaf kinds.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        match self.kind(id) {
            NodeKind::Document { children } => children,
            NodeKind::Element(element) => &element.children,
            _ => &[],
        }
    }

    /// The element payload of a node, if it is an element.
    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        match self.kind(id) {
            NodeKind::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Append a new node under `parent` and return its id.
    ///
    /// Panics if `parent` is a leaf kind; only documents and elements own
    /// children.
    pub fn append_child(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            kind,
            parent: Some(parent),
        });
        match &mut self.nodes[parent.0].kind {
            NodeKind::Document { children } => children.push(id),
            NodeKind::Element(element) => element.children.push(id),
            other => panic!("cannot append a child to a {} node", other.type_name()),
        }
        id
    }

    /// The first element child of `id` with the given local name.
    pub fn find_child(&self, id: NodeId, local_name: &str) -> Option<NodeId> {
        self.children(id).iter().copied().find(|&child| {
            self.element(child)
                .is_some_and(|element| element.name.local_name == local_name)
        })
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
