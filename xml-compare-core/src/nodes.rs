//! Canonical views over document nodes used by the comparison engine.

use crate::tree::{Document, NodeId, NodeKind, QName, XmlAttribute, XSI_NAMESPACE_URI};

/// Concatenates the character data of every direct text and CDATA child of
/// `id`, in document order. Non-text children are skipped. Returns an empty
/// string when there are none, which lets run-length-split text and
/// CDATA-vs-text variants read as one logical value.
pub fn merged_text(doc: &Document, id: NodeId) -> String {
    let mut merged = String::new();
    for &child in doc.children(id) {
        match doc.kind(child) {
            NodeKind::Text(text) | NodeKind::Cdata(text) => merged.push_str(text),
            _ => {}
        }
    }
    merged
}

/// An element's attributes split into the ordinary list and the two
/// distinguished schema-location slots.
///
/// `xsi:schemaLocation` and `xsi:noNamespaceSchemaLocation` are picked out
/// by their fixed namespace and local name and never appear in `regular`.
/// Other schema-instance attributes are dropped from comparison entirely,
/// matching how the surrounding tooling treats them.
#[derive(Debug)]
pub struct AttributeSet<'a> {
    pub regular: Vec<&'a XmlAttribute>,
    pub schema_location: Option<&'a XmlAttribute>,
    pub no_namespace_schema_location: Option<&'a XmlAttribute>,
}

impl<'a> AttributeSet<'a> {
    pub fn from_attributes(attributes: &'a [XmlAttribute]) -> Self {
        let mut regular = Vec::new();
        let mut schema_location = None;
        let mut no_namespace_schema_location = None;

        for attr in attributes {
            if attr.name.namespace_uri.as_deref() == Some(XSI_NAMESPACE_URI) {
                match attr.name.local_name.as_str() {
                    "schemaLocation" => schema_location = Some(attr),
                    "noNamespaceSchemaLocation" => no_namespace_schema_location = Some(attr),
                    _ => {}
                }
                continue;
            }
            regular.push(attr);
        }

        Self {
            regular,
            schema_location,
            no_namespace_schema_location,
        }
    }

    /// The regular attribute with the same qualified name, if any.
    pub fn find_matching(&self, wanted: &QName) -> Option<&'a XmlAttribute> {
        self.regular
            .iter()
            .copied()
            .find(|attr| attr.name == *wanted)
    }
}
