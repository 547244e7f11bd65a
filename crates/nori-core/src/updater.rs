//! Diff-merge engine over the concrete syntax tree
//!
//! The [`Updater`] owns a parsed document and applies semantic patches to it
//! in place. Values that already match are left byte-for-byte alone; scalars
//! of the same kind mutate without touching their trivia; grown regions are
//! synthesized with the formatting style inferred when the document was
//! parsed. The tree is exclusively owned and every operation is synchronous,
//! so one updater must not be shared across threads without external
//! serialization.

use tracing::debug;

use crate::cst::{Node, NodeKind, Trivia, parse, render_plain, render_trivia, stringify};
use crate::error::NoriError;
use crate::patch::{Patch, PatchValue};
use crate::result::Result;
use crate::style::Style;

/// Patch-applying editor over one JSONC document.
#[derive(Debug)]
pub struct Updater {
    root: Node,
    style: Style,
}

impl Updater {
    /// Parse a document and infer its formatting style.
    pub fn new(text: &str) -> Result<Self> {
        let root = parse(text)?;
        let style = Style::infer(&root);
        debug!(?style, "parsed document");
        Ok(Self { root, style })
    }

    /// The style inferred at construction time.
    pub fn style(&self) -> Style {
        self.style.clone()
    }

    /// The underlying syntax tree.
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Render the current document text. Re-entrant: can be called again
    /// after further edits.
    pub fn to_text(&self) -> Result<String> {
        stringify(&self.root)
    }

    /// Plain-value snapshot of the current document: the tree is re-rendered
    /// as strict JSON (no comments, no formatting) and re-parsed, so escape
    /// sequences decode and numeric literals normalize.
    pub fn data(&self) -> Result<serde_json::Value> {
        let plain = render_plain(&self.root)?;
        Ok(serde_json::from_str(&plain)?)
    }

    /// Apply a patch against the document root.
    ///
    /// Per key: a matching value is a no-op, a [`PatchValue::Delete`] removes
    /// the property (an error if it does not exist), maps recurse into object
    /// values, arrays merge, same-kind scalars mutate in place, and anything
    /// else replaces the value with a freshly synthesized subtree.
    pub fn update(&mut self, patch: &Patch) -> Result<()> {
        debug!(keys = patch.len(), "applying update");
        update_object(&mut self.root, patch, 1, &self.style)
    }

    /// Apply a patch in append mode: every array anywhere in the patch is
    /// prefixed with [`PatchValue::Add`], so array fields extend instead of
    /// merging by position.
    pub fn add(&mut self, patch: &Patch) -> Result<()> {
        let mut marked = patch.clone();
        for value in marked.values_mut() {
            mark_arrays_for_append(value);
        }
        self.update(&marked)
    }

    /// Delete the given top-level properties. Fails with a logic error if
    /// any of them does not exist.
    pub fn remove<I, S>(&mut self, keys: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let patch: Patch = keys
            .into_iter()
            .map(|key| (key.into(), PatchValue::Delete))
            .collect();
        self.update(&patch)
    }
}

fn update_object(object: &mut Node, patch: &Patch, depth: usize, style: &Style) -> Result<()> {
    let properties = object
        .object_properties_mut()
        .ok_or_else(|| NoriError::malformed_node("update target must be an object node"))?;
    for (key, value) in patch {
        let index = properties
            .iter()
            .position(|p| p.property_key_text() == Some(key.as_str()));
        let deleting = matches!(value, PatchValue::Delete);
        match index {
            None if deleting => return Err(NoriError::missing_property(key.as_str())),
            None => {
                let synthesized = node_for(value, style)?;
                // The previous last property donates the run it carried up to
                // the closing brace, so the brace stays where it was
                let mut donated = String::new();
                if let Some(last_value) = properties
                    .last_mut()
                    .and_then(|property| property.property_value_mut())
                {
                    donated = render_trivia(&last_value.trailing);
                    last_value.trailing.clear();
                }
                let leading = format!("{}{}", style.newline, style.indent.repeat(depth));
                properties.push(make_property(key, synthesized, &leading, &donated));
            }
            Some(index) if deleting => {
                properties.remove(index);
            }
            Some(index) => {
                let Some(current) = properties[index].property_value_mut() else {
                    continue;
                };
                if matches_node(value, current) {
                    continue;
                }
                merge_value(current, value, depth, style)?;
            }
        }
    }
    Ok(())
}

/// Merge one patch value into an existing, non-matching value node.
fn merge_value(current: &mut Node, value: &PatchValue, depth: usize, style: &Style) -> Result<()> {
    match value {
        PatchValue::Array(items) if matches!(current.kind, NodeKind::Array { .. }) => {
            let Some(elements) = current.array_elements_mut() else {
                return Ok(());
            };
            merge_array(elements, items, style)
        }
        PatchValue::Object(child) if matches!(current.kind, NodeKind::Object { .. }) => {
            update_object(current, child, depth + 1, style)
        }
        PatchValue::Bool(new) if matches!(current.kind, NodeKind::Bool { .. }) => {
            if let NodeKind::Bool { value } = &mut current.kind {
                *value = *new;
            }
            Ok(())
        }
        PatchValue::String(new) if matches!(current.kind, NodeKind::String { .. }) => {
            if let NodeKind::String { value } = &mut current.kind {
                *value = new.clone();
            }
            Ok(())
        }
        PatchValue::Number(new) if matches!(current.kind, NodeKind::Number { .. }) => {
            if let NodeKind::Number { value, raw } = &mut current.kind {
                // Keep the literal text coherent with the new value; the
                // original formatting of an untouched number survives via
                // the no-op check upstream
                *value = *new;
                *raw = number_literal(*new);
            }
            Ok(())
        }
        _ => {
            *current = node_for(value, style)?;
            Ok(())
        }
    }
}

fn merge_array(elements: &mut Vec<Node>, items: &[PatchValue], style: &Style) -> Result<()> {
    match items.first() {
        Some(PatchValue::Add) => {
            for item in &items[1..] {
                elements.push(make_element(node_for(item, style)?));
            }
        }
        Some(PatchValue::Delete) => {
            for item in &items[1..] {
                let found = elements.iter().position(|element| {
                    element
                        .element_value()
                        .is_some_and(|value| matches_node(item, value))
                });
                // A miss is skipped silently, unlike a top-level delete
                if let Some(index) = found {
                    elements.remove(index);
                }
            }
        }
        _ => {
            for (i, item) in items.iter().enumerate() {
                if let Some(existing) = elements.get(i).and_then(Node::element_value) {
                    if matches_node(item, existing) {
                        continue;
                    }
                }
                let element = make_element(node_for(item, style)?);
                if i < elements.len() {
                    elements[i] = element;
                } else {
                    elements.push(element);
                }
            }
        }
    }
    Ok(())
}

/// Structural equality between a patch value and a value node, used to
/// decide no-ops.
///
/// Numbers compare by parsed value, so textual variants of one magnitude are
/// equal. Objects require two-way key-set membership (a superset or subset
/// never counts), with keys resolving to the first matching property in
/// document order. Markers equal nothing.
fn matches_node(value: &PatchValue, node: &Node) -> bool {
    match (value, &node.kind) {
        (PatchValue::Null, NodeKind::Null) => true,
        (PatchValue::Bool(v), NodeKind::Bool { value }) => v == value,
        (PatchValue::Number(v), NodeKind::Number { value, .. }) => v == value,
        (PatchValue::String(v), NodeKind::String { value }) => v == value,
        (PatchValue::Array(items), NodeKind::Array { elements }) => {
            items.len() == elements.len()
                && items.iter().zip(elements).all(|(item, element)| {
                    element
                        .element_value()
                        .is_some_and(|value| matches_node(item, value))
                })
        }
        (PatchValue::Object(patch), NodeKind::Object { properties }) => {
            patch.iter().all(|(key, item)| {
                properties
                    .iter()
                    .find(|p| p.property_key_text() == Some(key.as_str()))
                    .and_then(Node::property_value)
                    .is_some_and(|value| matches_node(item, value))
            }) && properties
                .iter()
                .all(|p| p.property_key_text().is_some_and(|k| patch.contains_key(k)))
        }
        _ => false,
    }
}

/// Synthesize a fresh subtree for a patch value. Scalars get the inferred
/// colon spacing as leading trivia; containers get none.
fn node_for(value: &PatchValue, style: &Style) -> Result<Node> {
    match value {
        PatchValue::Null => Ok(scalar(NodeKind::Null, style)),
        PatchValue::Bool(b) => Ok(scalar(NodeKind::Bool { value: *b }, style)),
        PatchValue::Number(n) => Ok(scalar(
            NodeKind::Number {
                value: *n,
                raw: number_literal(*n),
            },
            style,
        )),
        PatchValue::String(s) => Ok(scalar(NodeKind::String { value: s.clone() }, style)),
        PatchValue::Array(items) => {
            let mut elements = Vec::with_capacity(items.len());
            for item in items {
                elements.push(make_element(node_for(item, style)?));
            }
            Ok(Node::new(NodeKind::Array { elements }))
        }
        PatchValue::Object(patch) => {
            let mut properties = Vec::with_capacity(patch.len());
            for (key, item) in patch {
                properties.push(make_property(key, node_for(item, style)?, "", ""));
            }
            Ok(Node::new(NodeKind::Object { properties }))
        }
        PatchValue::Add | PatchValue::Delete => {
            Err(NoriError::unsupported_patch_value(value.kind_name()))
        }
    }
}

fn scalar(kind: NodeKind, style: &Style) -> Node {
    let mut node = Node::new(kind);
    if !style.colon.is_empty() {
        node.leading.push(Trivia::Whitespace(style.colon.clone()));
    }
    node
}

fn make_property(key: &str, value: Node, leading: &str, trailing: &str) -> Node {
    let mut property = Node::new(NodeKind::Property {
        key: Box::new(Node::new(NodeKind::String {
            value: key.to_string(),
        })),
        value: Box::new(value),
    });
    if !leading.is_empty() {
        property.leading.push(Trivia::Whitespace(leading.to_string()));
    }
    if !trailing.is_empty() {
        property
            .trailing
            .push(Trivia::Whitespace(trailing.to_string()));
    }
    property
}

fn make_element(value: Node) -> Node {
    Node::new(NodeKind::Element {
        value: Box::new(value),
    })
}

/// Shortest text that round-trips the value through `f64`
fn number_literal(value: f64) -> String {
    format!("{value}")
}

fn mark_arrays_for_append(value: &mut PatchValue) {
    match value {
        PatchValue::Array(items) => {
            items.insert(0, PatchValue::Add);
            for item in items.iter_mut() {
                mark_arrays_for_append(item);
            }
        }
        PatchValue::Object(patch) => {
            for item in patch.values_mut() {
                mark_arrays_for_append(item);
            }
        }
        _ => {}
    }
}
