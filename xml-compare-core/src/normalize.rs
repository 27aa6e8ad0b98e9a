//! Pre-filters applied to a document before it is handed to the engine.
//!
//! The engine compares exactly what it is given; whitespace and comment
//! handling belong to the caller. These filters build a new tree and leave
//! the input untouched.

use crate::tree::{Document, ElementData, NodeId, NodeKind};

/// A copy of `doc` without any comment nodes.
pub fn strip_comments(doc: &Document) -> Document {
    rebuild(doc, &Filter {
        keep_comments: false,
        trim_text: false,
    })
}

/// A copy of `doc` with text nodes trimmed of surrounding whitespace and
/// whitespace-only text nodes dropped. CDATA sections are left as written.
pub fn trim_text(doc: &Document) -> Document {
    rebuild(doc, &Filter {
        keep_comments: true,
        trim_text: true,
    })
}

struct Filter {
    keep_comments: bool,
    trim_text: bool,
}

fn rebuild(src: &Document, filter: &Filter) -> Document {
    let mut out = Document::new();
    out.decl = src.decl.clone();
    out.doctype = src.doctype.clone();
    let out_root = out.root();
    copy_children(src, src.root(), &mut out, out_root, filter);
    out
}

fn copy_children(src: &Document, from: NodeId, out: &mut Document, to: NodeId, filter: &Filter) {
    for &child in src.children(from) {
        match src.kind(child) {
            NodeKind::Element(element) => {
                let copied = ElementData {
                    name: element.name.clone(),
                    attributes: element.attributes.clone(),
                    namespace_decls: element.namespace_decls.clone(),
                    children: Vec::new(),
                };
                let id = out.append_child(to, NodeKind::Element(copied));
                copy_children(src, child, out, id, filter);
            }
            NodeKind::Text(text) => {
                if filter.trim_text {
                    let trimmed = text.trim();
                    if !trimmed.is_empty() {
                        out.append_child(to, NodeKind::Text(trimmed.to_string()));
                    }
                } else {
                    out.append_child(to, NodeKind::Text(text.clone()));
                }
            }
            NodeKind::Comment(text) => {
                if filter.keep_comments {
                    out.append_child(to, NodeKind::Comment(text.clone()));
                }
            }
            NodeKind::Cdata(text) => {
                out.append_child(to, NodeKind::Cdata(text.clone()));
            }
            NodeKind::ProcessingInstruction { target, data } => {
                out.append_child(
                    to,
                    NodeKind::ProcessingInstruction {
                        target: target.clone(),
                        data: data.clone(),
                    },
                );
            }
            // A document node is never a child of another node.
            NodeKind::Document { .. } => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    #[test]
    fn strip_comments_removes_all_comment_nodes() {
        let doc = parse(b"<r><!-- a --><x><!-- b -->1</x></r>").expect("parse");
        let stripped = strip_comments(&doc);

        let root = stripped.root_element().expect("root");
        assert_eq!(stripped.children(root).len(), 1);
        let x = stripped.find_child(root, "x").expect("x");
        assert_eq!(stripped.children(x).len(), 1);
    }

    #[test]
    fn trim_text_drops_whitespace_only_nodes() {
        let doc = parse(b"<r>\n  <x> padded </x>\n</r>").expect("parse");
        let trimmed = trim_text(&doc);

        let root = trimmed.root_element().expect("root");
        assert_eq!(trimmed.children(root).len(), 1);
        let x = trimmed.find_child(root, "x").expect("x");
        assert_eq!(
            crate::nodes::merged_text(&trimmed, x),
            "padded".to_string()
        );
    }
}
