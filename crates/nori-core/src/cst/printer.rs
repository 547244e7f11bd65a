//! Byte-exact rendering of the concrete syntax tree
//!
//! [`stringify`] is the left inverse of [`parse`](super::parse): for any
//! document the parser accepts, `stringify(parse(d)) == d`. The renderer
//! walks the tree, emitting each node's leading trivia, its own text, its
//! separator comma when it is not the last child of its container, and its
//! trailing trivia.
//!
//! The structural checks here are deliberate: the node types do not forbid,
//! say, a boolean sitting directly inside an object, and a hand-built
//! synthetic tree that gets this wrong should fail loudly instead of
//! printing text that can never re-parse.

use super::node::{Node, NodeKind, Trivia};
use crate::error::NoriError;
use crate::result::Result;

/// Render a node (and everything below it) to text.
pub fn stringify(node: &Node) -> Result<String> {
    let mut out = String::new();
    write_node(node, true, &mut out)?;
    Ok(out)
}

/// Render an ordered sequence of nodes to text.
///
/// Each node renders as if it were the last child of its container, so no
/// separator commas are added between them.
pub fn stringify_nodes(nodes: &[Node]) -> Result<String> {
    let mut out = String::new();
    for node in nodes {
        write_node(node, true, &mut out)?;
    }
    Ok(out)
}

/// Concatenated raw text of a trivia run.
pub fn render_trivia(trivia: &[Trivia]) -> String {
    let mut out = String::new();
    for piece in trivia {
        out.push_str(piece.raw_text());
    }
    out
}

fn write_trivia(trivia: &[Trivia], out: &mut String) {
    for piece in trivia {
        out.push_str(piece.raw_text());
    }
}

fn write_node(node: &Node, is_last: bool, out: &mut String) -> Result<()> {
    write_trivia(&node.leading, out);
    match &node.kind {
        NodeKind::Object { properties } => {
            out.push('{');
            let last = properties.len().saturating_sub(1);
            for (i, property) in properties.iter().enumerate() {
                if !matches!(property.kind, NodeKind::Property { .. }) {
                    return Err(NoriError::malformed_node(format!(
                        "object child must be a property, found {}",
                        property.kind_name()
                    )));
                }
                write_node(property, i == last, out)?;
            }
            out.push('}');
        }
        NodeKind::Array { elements } => {
            out.push('[');
            let last = elements.len().saturating_sub(1);
            for (i, element) in elements.iter().enumerate() {
                if !matches!(element.kind, NodeKind::Element { .. }) {
                    return Err(NoriError::malformed_node(format!(
                        "array child must be an element, found {}",
                        element.kind_name()
                    )));
                }
                write_node(element, i == last, out)?;
            }
            out.push(']');
        }
        NodeKind::Property { key, value } => {
            if !matches!(key.kind, NodeKind::String { .. }) {
                return Err(NoriError::malformed_node(format!(
                    "property key must be a string, found {}",
                    key.kind_name()
                )));
            }
            write_value_node(key, out)?;
            out.push(':');
            write_value_node(value, out)?;
            if !is_last {
                out.push(',');
            }
        }
        NodeKind::Element { value } => {
            write_value_node(value, out)?;
            if !is_last {
                out.push(',');
            }
        }
        NodeKind::String { value } => {
            out.push('"');
            out.push_str(value);
            out.push('"');
        }
        NodeKind::Number { raw, .. } => {
            out.push_str(raw);
        }
        NodeKind::Bool { value } => {
            out.push_str(if *value { "true" } else { "false" });
        }
        NodeKind::Null => {
            out.push_str("null");
        }
    }
    write_trivia(&node.trailing, out);
    Ok(())
}

/// Render a node sitting in value position, where structural nodes are
/// malformed.
fn write_value_node(node: &Node, out: &mut String) -> Result<()> {
    if matches!(
        node.kind,
        NodeKind::Property { .. } | NodeKind::Element { .. }
    ) {
        return Err(NoriError::malformed_node(format!(
            "{} node cannot appear in value position",
            node.kind_name()
        )));
    }
    write_node(node, true, out)
}

/// Render a subtree as strict JSON with no trivia at all.
///
/// Used for plain-value snapshots: comments and formatting disappear, and a
/// leading `+` (which the grammar tolerates but strict JSON does not) is
/// stripped from numeric literals.
pub(crate) fn render_plain(node: &Node) -> Result<String> {
    let mut out = String::new();
    write_plain(node, true, &mut out)?;
    Ok(out)
}

fn write_plain(node: &Node, is_last: bool, out: &mut String) -> Result<()> {
    match &node.kind {
        NodeKind::Object { properties } => {
            out.push('{');
            let last = properties.len().saturating_sub(1);
            for (i, property) in properties.iter().enumerate() {
                write_plain(property, i == last, out)?;
            }
            out.push('}');
        }
        NodeKind::Array { elements } => {
            out.push('[');
            let last = elements.len().saturating_sub(1);
            for (i, element) in elements.iter().enumerate() {
                write_plain(element, i == last, out)?;
            }
            out.push(']');
        }
        NodeKind::Property { key, value } => {
            if !matches!(key.kind, NodeKind::String { .. }) {
                return Err(NoriError::malformed_node(format!(
                    "property key must be a string, found {}",
                    key.kind_name()
                )));
            }
            write_plain(key, true, out)?;
            out.push(':');
            write_plain(value, true, out)?;
            if !is_last {
                out.push(',');
            }
        }
        NodeKind::Element { value } => {
            write_plain(value, true, out)?;
            if !is_last {
                out.push(',');
            }
        }
        NodeKind::String { value } => {
            out.push('"');
            out.push_str(value);
            out.push('"');
        }
        NodeKind::Number { raw, .. } => {
            out.push_str(raw.strip_prefix('+').unwrap_or(raw));
        }
        NodeKind::Bool { value } => {
            out.push_str(if *value { "true" } else { "false" });
        }
        NodeKind::Null => {
            out.push_str("null");
        }
    }
    Ok(())
}
