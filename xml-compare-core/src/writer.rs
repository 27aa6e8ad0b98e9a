use std::fs;
use std::path::Path;

use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesPI, BytesStart, BytesText, Event};
use quick_xml::Writer;
use thiserror::Error;

use crate::tree::{Doctype, Document, NodeId, NodeKind};

/// Errors that can occur while writing XML from a [`Document`].
#[derive(Debug, Error)]
pub enum WriteError {
    /// Failed to serialize XML bytes.
    #[error("failed to write XML: {0}")]
    Xml(#[from] quick_xml::Error),
    /// Failed to write output file.
    #[error("failed to write XML file: {0}")]
    Io(#[from] std::io::Error),
}

/// Serialize a [`Document`] into XML bytes.
///
/// Output is exact, not pretty-printed: text nodes round-trip unchanged.
pub fn write(doc: &Document) -> Result<Vec<u8>, WriteError> {
    let mut writer = Writer::new(Vec::new());

    if let Some(decl) = &doc.decl {
        writer.write_event(Event::Decl(BytesDecl::new(
            &decl.version,
            decl.encoding.as_deref(),
            decl.standalone.as_deref(),
        )))?;
    }
    if let Some(doctype) = &doc.doctype {
        writer.write_event(Event::DocType(BytesText::from_escaped(render_doctype(
            doctype,
        ))))?;
    }
    for &child in doc.children(doc.root()) {
        write_node(&mut writer, doc, child)?;
    }

    Ok(writer.into_inner())
}

/// Serialize a [`Document`] and write it to `path`.
pub fn write_file(doc: &Document, path: &Path) -> Result<(), WriteError> {
    let bytes = write(doc)?;
    fs::write(path, bytes)?;
    Ok(())
}

fn write_node(
    writer: &mut Writer<Vec<u8>>,
    doc: &Document,
    id: NodeId,
) -> Result<(), quick_xml::Error> {
    match doc.kind(id) {
        NodeKind::Element(element) => {
            let tag = element.name.to_string();
            let mut start = BytesStart::new(tag.as_str());

            for decl in &element.namespace_decls {
                match &decl.prefix {
                    Some(prefix) => {
                        let key = format!("xmlns:{prefix}");
                        start.push_attribute((key.as_str(), decl.uri.as_str()));
                    }
                    None => start.push_attribute(("xmlns", decl.uri.as_str())),
                }
            }
            for attr in &element.attributes {
                let key = attr.name.to_string();
                start.push_attribute((key.as_str(), attr.value.as_str()));
            }

            if element.children.is_empty() {
                writer.write_event(Event::Empty(start))?;
                return Ok(());
            }

            writer.write_event(Event::Start(start))?;
            for &child in &element.children {
                write_node(writer, doc, child)?;
            }
            writer.write_event(Event::End(BytesEnd::new(tag.as_str())))?;
        }
        NodeKind::Text(text) => {
            writer.write_event(Event::Text(BytesText::new(text)))?;
        }
        NodeKind::Cdata(text) => {
            writer.write_event(Event::CData(BytesCData::new(text.as_str())))?;
        }
        NodeKind::Comment(text) => {
            writer.write_event(Event::Comment(BytesText::from_escaped(text.as_str())))?;
        }
        NodeKind::ProcessingInstruction { target, data } => {
            let content = if data.is_empty() {
                target.clone()
            } else {
                format!("{target} {data}")
            };
            writer.write_event(Event::PI(BytesPI::new(content.as_str())))?;
        }
        NodeKind::Document { .. } => {}
    }
    Ok(())
}

fn render_doctype(doctype: &Doctype) -> String {
    match (&doctype.public_id, &doctype.system_id) {
        (Some(public_id), Some(system_id)) => {
            format!("{} PUBLIC \"{public_id}\" \"{system_id}\"", doctype.name)
        }
        (None, Some(system_id)) => format!("{} SYSTEM \"{system_id}\"", doctype.name),
        _ => doctype.name.clone(),
    }
}
