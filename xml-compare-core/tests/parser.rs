use std::path::PathBuf;

use pretty_assertions::assert_eq;
use xml_compare_core::{merged_text, parse, parse_file, AttributeSet, NodeKind, ParseError};

fn fixture(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join(path)
}

#[test]
fn resolves_namespaces_and_extracts_declarations() {
    let doc = parse(br#"<root xmlns="urn:d" xmlns:p="urn:p"><p:child a="1" p:b="2"/></root>"#)
        .expect("parse should succeed");

    let root = doc.root_element().expect("root element");
    let root_el = doc.element(root).expect("root payload");
    assert_eq!(root_el.name.namespace_uri.as_deref(), Some("urn:d"));
    assert_eq!(root_el.name.prefix, None);
    assert_eq!(root_el.namespace_decls.len(), 2);
    assert!(root_el.attributes.is_empty());

    let child = doc.find_child(root, "child").expect("child element");
    let child_el = doc.element(child).expect("child payload");
    assert_eq!(child_el.name.namespace_uri.as_deref(), Some("urn:p"));
    assert_eq!(child_el.name.prefix.as_deref(), Some("p"));

    assert_eq!(child_el.attributes[0].name.local_name, "a");
    assert_eq!(child_el.attributes[0].name.namespace_uri, None);
    assert_eq!(child_el.attributes[1].name.local_name, "b");
    assert_eq!(
        child_el.attributes[1].name.namespace_uri.as_deref(),
        Some("urn:p")
    );
}

#[test]
fn merges_adjacent_text_and_keeps_cdata_distinct() {
    let doc = parse(b"<m>Hello <![CDATA[World]]>!</m>").expect("parse should succeed");
    let m = doc.root_element().expect("root element");

    let children = doc.children(m).to_vec();
    assert_eq!(children.len(), 3);
    assert!(matches!(doc.kind(children[0]), NodeKind::Text(t) if t.as_str() == "Hello "));
    assert!(matches!(doc.kind(children[1]), NodeKind::Cdata(t) if t.as_str() == "World"));
    assert!(matches!(doc.kind(children[2]), NodeKind::Text(t) if t.as_str() == "!"));
    assert_eq!(merged_text(&doc, m), "Hello World!");
}

#[test]
fn captures_declaration_doctype_and_processing_instruction() {
    let doc = parse_file(&fixture("fixtures/note-doctype.xml")).expect("parse should succeed");

    let decl = doc.decl.as_ref().expect("xml declaration");
    assert_eq!(decl.version, "1.0");
    assert_eq!(decl.encoding, None);

    let doctype = doc.doctype.as_ref().expect("doctype");
    assert_eq!(doctype.name, "note");
    assert_eq!(doctype.public_id, None);
    assert_eq!(doctype.system_id.as_deref(), Some("note.dtd"));

    let top = doc.children(doc.root()).to_vec();
    assert!(matches!(
        doc.kind(top[0]),
        NodeKind::ProcessingInstruction { target, .. } if target.as_str() == "xml-stylesheet"
    ));

    let note = doc.root_element().expect("root element");
    assert!(doc
        .children(note)
        .iter()
        .any(|&id| matches!(doc.kind(id), NodeKind::Comment(_))));

    let body = doc.find_child(note, "body").expect("body element");
    assert_eq!(merged_text(&doc, body), "Don't forget me & the meeting!");
}

#[test]
fn splits_schema_location_attributes() {
    let doc = parse(
        br#"<r xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" a="1" b="2" xsi:schemaLocation="urn:x x.xsd"/>"#,
    )
    .expect("parse should succeed");

    let root_el = doc
        .element(doc.root_element().expect("root element"))
        .expect("root payload");
    let set = AttributeSet::from_attributes(&root_el.attributes);
    assert_eq!(set.regular.len(), 2);
    assert_eq!(
        set.schema_location.map(|a| a.value.as_str()),
        Some("urn:x x.xsd")
    );
    assert!(set.no_namespace_schema_location.is_none());
}

#[test]
fn rejects_malformed_documents() {
    assert!(matches!(parse(b"<a/><b/>"), Err(ParseError::Malformed(_))));
    assert!(parse(b"<a><b></a>").is_err());
    assert!(matches!(parse(b"<a>"), Err(ParseError::Malformed(_))));
    assert!(matches!(parse(b""), Err(ParseError::Malformed(_))));
}
