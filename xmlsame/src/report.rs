use colored::Colorize;
use xml_compare_core::{format_summary, format_text, DiffReport, Document, NodeId, NodeKind};

/// Render the difference list for terminal output.
pub fn render_text(report: &DiffReport) -> String {
    let raw = format_text(report);
    let mut out = Vec::new();

    for line in raw.lines() {
        let colored = if line.starts_with('!') {
            line.red().to_string()
        } else if line.starts_with('~') {
            line.yellow().to_string()
        } else {
            line.to_string()
        };
        out.push(colored);
    }

    out.join("\n")
}

/// Render the verdict and counts for terminal output.
pub fn render_summary(report: &DiffReport) -> String {
    let summary = format_summary(report);
    if report.identical {
        summary.green().to_string()
    } else if report.similar {
        summary.yellow().to_string()
    } else {
        summary.red().to_string()
    }
}

/// Render a parsed document as an indented tree, `depth` levels deep.
pub fn render_tree(doc: &Document, depth: usize) -> String {
    let mut out = Vec::new();
    if let Some(decl) = &doc.decl {
        out.push(format!("xml version={}", decl.version).dimmed().to_string());
    }
    if let Some(doctype) = &doc.doctype {
        out.push(format!("doctype {}", doctype.name).dimmed().to_string());
    }
    for &child in doc.children(doc.root()) {
        render_node(doc, child, 0, depth, &mut out);
    }
    out.join("\n")
}

fn render_node(doc: &Document, id: NodeId, level: usize, depth: usize, out: &mut Vec<String>) {
    if level >= depth {
        return;
    }
    let indent = "  ".repeat(level);
    match doc.kind(id) {
        NodeKind::Element(element) => {
            let mut line = format!("{indent}{}", element.name.to_string().cyan());
            for attr in &element.attributes {
                line.push_str(&format!(" {}={:?}", attr.name, attr.value).dimmed().to_string());
            }
            out.push(line);
            for &child in doc.children(id) {
                render_node(doc, child, level + 1, depth, out);
            }
        }
        NodeKind::Text(text) => {
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                out.push(format!("{indent}{:?}", trimmed));
            }
        }
        NodeKind::Cdata(text) => {
            out.push(format!("{indent}<![CDATA[{text}]]>"));
        }
        NodeKind::Comment(text) => {
            out.push(format!("{indent}<!--{text}-->").dimmed().to_string());
        }
        NodeKind::ProcessingInstruction { target, .. } => {
            out.push(format!("{indent}<?{target}?>").dimmed().to_string());
        }
        NodeKind::Document { .. } => {}
    }
}
