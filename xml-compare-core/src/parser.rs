use std::fs;
use std::path::Path;

use quick_xml::events::{BytesDecl, BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::NsReader;
use thiserror::Error;

use crate::tree::{
    Doctype, Document, ElementData, NamespaceDecl, NodeId, NodeKind, QName, XmlAttribute, XmlDecl,
};

/// Errors that can occur while parsing XML into a [`Document`].
#[derive(Debug, Error)]
pub enum ParseError {
    /// Input XML could not be decoded or tokenized.
    #[error("failed to parse XML: {0}")]
    Xml(#[from] quick_xml::Error),
    /// Input bytes were not valid UTF-8 for tag/attribute/text extraction.
    #[error("invalid UTF-8 while parsing XML: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    /// Failed to decode text entity or bytes.
    #[error("failed to decode XML text: {0}")]
    Escape(#[from] quick_xml::escape::EscapeError),
    /// Failed to read input file.
    #[error("failed to read XML file: {0}")]
    Io(#[from] std::io::Error),
    /// Structural issue in XML document.
    #[error("malformed XML: {0}")]
    Malformed(String),
}

/// Parse XML bytes into a [`Document`].
///
/// Namespace prefixes are resolved to URIs as the tree is built; `xmlns`
/// declarations are recorded on their element but kept out of the attribute
/// list. Adjacent text runs are merged into one text node; CDATA sections
/// stay distinct nodes.
pub fn parse(xml: &[u8]) -> Result<Document, ParseError> {
    let mut reader = NsReader::from_reader(xml);
    reader.config_mut().trim_text(false);

    let mut doc = Document::new();
    let mut buf = Vec::new();
    let mut stack: Vec<NodeId> = Vec::new();
    let mut has_root = false;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Decl(e) => {
                doc.decl = Some(read_decl(&e)?);
            }
            Event::DocType(e) => {
                let raw = std::str::from_utf8(e.as_ref())?;
                doc.doctype = Some(parse_doctype(raw)?);
            }
            Event::Start(e) => {
                let parent = open_parent(&doc, &stack, &mut has_root)?;
                let element = build_element(&e, &reader)?;
                let id = doc.append_child(parent, NodeKind::Element(element));
                stack.push(id);
            }
            Event::Empty(e) => {
                let parent = open_parent(&doc, &stack, &mut has_root)?;
                let element = build_element(&e, &reader)?;
                doc.append_child(parent, NodeKind::Element(element));
            }
            Event::End(_) => {
                stack.pop().ok_or_else(|| {
                    ParseError::Malformed("encountered closing tag without open tag".to_string())
                })?;
            }
            Event::Text(e) => {
                let text = e.unescape()?.into_owned();
                match stack.last() {
                    Some(&current) => append_text(&mut doc, current, text),
                    // Only whitespace may appear between top-level constructs.
                    None if text.trim().is_empty() => {}
                    None => {
                        return Err(ParseError::Malformed(
                            "text content outside of the root element".to_string(),
                        ));
                    }
                }
            }
            Event::CData(e) => {
                let text = std::str::from_utf8(e.as_ref())?.to_string();
                let current = stack.last().copied().ok_or_else(|| {
                    ParseError::Malformed("CDATA section outside of the root element".to_string())
                })?;
                doc.append_child(current, NodeKind::Cdata(text));
            }
            Event::Comment(e) => {
                let text = std::str::from_utf8(e.as_ref())?.to_string();
                let parent = stack.last().copied().unwrap_or(doc.root());
                doc.append_child(parent, NodeKind::Comment(text));
            }
            Event::PI(e) => {
                let target = std::str::from_utf8(e.target())?.to_string();
                let data = std::str::from_utf8(e.content())?.trim_start().to_string();
                let parent = stack.last().copied().unwrap_or(doc.root());
                doc.append_child(parent, NodeKind::ProcessingInstruction { target, data });
            }
            Event::Eof => break,
        }
        buf.clear();
    }

    if !stack.is_empty() {
        return Err(ParseError::Malformed(
            "unclosed element(s) at end of document".to_string(),
        ));
    }
    if !has_root {
        return Err(ParseError::Malformed("no root element found".to_string()));
    }

    Ok(doc)
}

/// Parse an XML file into a [`Document`].
pub fn parse_file(path: &Path) -> Result<Document, ParseError> {
    let bytes = fs::read(path)?;
    parse(&bytes)
}

fn open_parent(
    doc: &Document,
    stack: &[NodeId],
    has_root: &mut bool,
) -> Result<NodeId, ParseError> {
    match stack.last() {
        Some(&parent) => Ok(parent),
        None if *has_root => Err(ParseError::Malformed(
            "multiple top-level elements found".to_string(),
        )),
        None => {
            *has_root = true;
            Ok(doc.root())
        }
    }
}

fn append_text(doc: &mut Document, parent: NodeId, text: String) {
    // Entity expansion can split one logical text run into several events;
    // the tree keeps a single node per run.
    if let Some(&last) = doc.children(parent).last() {
        if let NodeKind::Text(existing) = doc.kind_mut(last) {
            existing.push_str(&text);
            return;
        }
    }
    doc.append_child(parent, NodeKind::Text(text));
}

fn build_element(e: &BytesStart<'_>, reader: &NsReader<&[u8]>) -> Result<ElementData, ParseError> {
    let (element_ns, _) = reader.resolve_element(e.name());
    let local_name = std::str::from_utf8(e.local_name().into_inner())?.to_string();
    let prefix = match e.name().prefix() {
        Some(p) => Some(std::str::from_utf8(p.into_inner())?.to_string()),
        None => None,
    };
    let mut element = ElementData::new(QName {
        local_name,
        namespace_uri: resolve_namespace(element_ns)?,
        prefix,
    });

    for attr in e.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        let key = attr.key;
        let value = attr
            .decode_and_unescape_value(reader.decoder())?
            .into_owned();

        if key.as_ref() == b"xmlns" {
            element.namespace_decls.push(NamespaceDecl {
                prefix: None,
                uri: value,
            });
            continue;
        }
        if let Some(rest) = key.as_ref().strip_prefix(b"xmlns:") {
            element.namespace_decls.push(NamespaceDecl {
                prefix: Some(std::str::from_utf8(rest)?.to_string()),
                uri: value,
            });
            continue;
        }

        let (attr_ns, attr_local) = reader.resolve_attribute(key);
        let prefix = match key.prefix() {
            Some(p) => Some(std::str::from_utf8(p.into_inner())?.to_string()),
            None => None,
        };
        element.attributes.push(XmlAttribute::new(
            QName {
                local_name: std::str::from_utf8(attr_local.into_inner())?.to_string(),
                namespace_uri: resolve_namespace(attr_ns)?,
                prefix,
            },
            value,
        ));
    }

    Ok(element)
}

fn resolve_namespace(ns: ResolveResult<'_>) -> Result<Option<String>, ParseError> {
    match ns {
        ResolveResult::Unbound => Ok(None),
        ResolveResult::Bound(Namespace(uri)) => Ok(Some(std::str::from_utf8(uri)?.to_string())),
        ResolveResult::Unknown(prefix) => Err(ParseError::Malformed(format!(
            "unbound namespace prefix '{}'",
            String::from_utf8_lossy(&prefix)
        ))),
    }
}

fn read_decl(decl: &BytesDecl<'_>) -> Result<XmlDecl, ParseError> {
    let version = std::str::from_utf8(decl.version()?.as_ref())?.to_string();
    let encoding = match decl.encoding() {
        Some(value) => Some(std::str::from_utf8(value?.as_ref())?.to_string()),
        None => None,
    };
    let standalone = match decl.standalone() {
        Some(value) => Some(std::str::from_utf8(value?.as_ref())?.to_string()),
        None => None,
    };
    Ok(XmlDecl {
        version,
        encoding,
        standalone,
    })
}

/// Parse the body of a `<!DOCTYPE ...>` declaration: the document element
/// name followed by an optional PUBLIC/SYSTEM external identifier. An
/// internal subset, if present, is ignored.
fn parse_doctype(raw: &str) -> Result<Doctype, ParseError> {
    let raw = raw.trim();
    let body = match raw.find('[') {
        Some(idx) => raw[..idx].trim(),
        None => raw,
    };
    let mut tokens = body.splitn(2, char::is_whitespace);
    let name = tokens
        .next()
        .filter(|name| !name.is_empty())
        .ok_or_else(|| ParseError::Malformed("empty DOCTYPE declaration".to_string()))?
        .to_string();

    let rest = tokens.next().map(str::trim).unwrap_or("");
    if rest.is_empty() {
        return Ok(Doctype {
            name,
            public_id: None,
            system_id: None,
        });
    }

    if let Some(rest) = rest.strip_prefix("PUBLIC") {
        let (public_id, rest) = take_quoted(rest)?;
        let (system_id, _) = take_quoted(rest)?;
        Ok(Doctype {
            name,
            public_id: Some(public_id),
            system_id: Some(system_id),
        })
    } else if let Some(rest) = rest.strip_prefix("SYSTEM") {
        let (system_id, _) = take_quoted(rest)?;
        Ok(Doctype {
            name,
            public_id: None,
            system_id: Some(system_id),
        })
    } else {
        Err(ParseError::Malformed(format!(
            "unsupported DOCTYPE external identifier: '{rest}'"
        )))
    }
}

fn take_quoted(input: &str) -> Result<(String, &str), ParseError> {
    let input = input.trim_start();
    let quote = input
        .chars()
        .next()
        .filter(|&c| c == '"' || c == '\'')
        .ok_or_else(|| {
            ParseError::Malformed("expected quoted identifier in DOCTYPE".to_string())
        })?;
    let rest = &input[1..];
    let end = rest.find(quote).ok_or_else(|| {
        ParseError::Malformed("unterminated quoted identifier in DOCTYPE".to_string())
    })?;
    Ok((rest[..end].to_string(), &rest[end + 1..]))
}

#[cfg(test)]
mod tests {
    use super::parse_doctype;

    #[test]
    fn doctype_variants() {
        let plain = parse_doctype("note").expect("plain doctype");
        assert_eq!(plain.name, "note");
        assert_eq!(plain.public_id, None);
        assert_eq!(plain.system_id, None);

        let system = parse_doctype("note SYSTEM \"note.dtd\"").expect("system doctype");
        assert_eq!(system.system_id.as_deref(), Some("note.dtd"));

        let public =
            parse_doctype("html PUBLIC '-//W3C//DTD XHTML 1.0//EN' 'xhtml1.dtd'").expect("public");
        assert_eq!(public.public_id.as_deref(), Some("-//W3C//DTD XHTML 1.0//EN"));
        assert_eq!(public.system_id.as_deref(), Some("xhtml1.dtd"));

        let subset = parse_doctype("note [ <!ELEMENT note (#PCDATA)> ]").expect("subset");
        assert_eq!(subset.name, "note");
    }
}
