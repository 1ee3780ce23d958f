//! HTML serialization.
//!
//! [§ 13.3 Serializing HTML fragments](https://html.spec.whatwg.org/multipage/parsing.html#serialising-html-fragments)

use std::fmt::Write;

use crate::{HtmlTree, NodeId, NodeType};

/// [§ 13.1.2 Elements](https://html.spec.whatwg.org/multipage/syntax.html#void-elements)
///
/// "Void elements only have a start tag; end tags must not be specified for void elements."
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// [§ 13.3 Escaping a string](https://html.spec.whatwg.org/multipage/parsing.html#escapingString)
///
/// Escape text content: `&`, `<`, `>` and U+00A0.
#[must_use]
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\u{00A0}' => out.push_str("&nbsp;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Escape an attribute value for use inside double quotes: `&`, `"`, `<`, `>` and U+00A0.
#[must_use]
pub fn escape_attribute(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\u{00A0}' => out.push_str("&nbsp;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Serialize a node and its subtree to HTML.
///
/// The fragment root has no markup of its own, so serializing it is the same
/// as [`serialize_children`].
#[must_use]
pub fn serialize_node(tree: &HtmlTree, id: NodeId) -> String {
    let mut out = String::new();
    write_node(tree, id, &mut out);
    out
}

/// Serialize only the children of a node, in order.
#[must_use]
pub fn serialize_children(tree: &HtmlTree, id: NodeId) -> String {
    let mut out = String::new();
    for &child in tree.children(id) {
        write_node(tree, child, &mut out);
    }
    out
}

fn write_node(tree: &HtmlTree, id: NodeId, out: &mut String) {
    let Some(node) = tree.get(id) else {
        return;
    };
    match &node.node_type {
        NodeType::Fragment => {
            for &child in &node.children {
                write_node(tree, child, out);
            }
        }
        NodeType::Text(text) => out.push_str(&escape_text(text)),
        NodeType::Element(data) => {
            out.push('<');
            out.push_str(&data.tag_name);
            for (name, value) in data.attrs.iter() {
                // Writing into a String cannot fail.
                let _ = write!(out, " {name}=\"{}\"", escape_attribute(value));
            }
            out.push('>');

            if VOID_ELEMENTS.contains(&data.tag_name.as_str()) {
                return;
            }
            for &child in &node.children {
                write_node(tree, child, out);
            }
            let _ = write!(out, "</{}>", data.tag_name);
        }
    }
}

/// Print an indented debug view of a subtree to stdout.
pub fn print_tree(tree: &HtmlTree, id: NodeId, indent: usize) {
    let prefix = "  ".repeat(indent);
    if let Some(node) = tree.get(id) {
        match &node.node_type {
            NodeType::Fragment => {
                println!("{prefix}#fragment");
            }
            NodeType::Element(data) => {
                if data.attrs.is_empty() {
                    println!("{prefix}<{}> ({})", data.tag_name, data.role());
                } else {
                    let attrs: Vec<String> = data
                        .attrs
                        .iter()
                        .map(|(k, v)| {
                            if v.is_empty() {
                                k.to_string()
                            } else if v.len() > 48 {
                                format!("{k}=\"{}…\"", v.chars().take(48).collect::<String>())
                            } else {
                                format!("{k}=\"{v}\"")
                            }
                        })
                        .collect();
                    println!(
                        "{prefix}<{} {}> ({})",
                        data.tag_name,
                        attrs.join(" "),
                        data.role()
                    );
                }
            }
            NodeType::Text(data) => {
                let display = data.replace('\n', "\\n").replace(' ', "\u{00B7}");
                println!("{prefix}\"{display}\"");
            }
        }
        for &child_id in &node.children {
            print_tree(tree, child_id, indent + 1);
        }
    }
}
