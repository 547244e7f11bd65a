//! Formatting style inferred from a parsed document
//!
//! When the updater grows a document it has to invent formatting for the new
//! nodes. Rather than imposing one, it reuses whatever the document's author
//! already did: the indent unit, the newline string and the spacing after a
//! property colon, read once from the first top-level property that shows
//! them.

use serde::{Deserialize, Serialize};

use crate::cst::{Node, Trivia, render_trivia};

/// Inferred formatting, applied when synthesizing new nodes.
///
/// All three fields default to the empty string, which makes insertions into
/// a single-line document come out on the same line with no extra spacing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Style {
    /// One level of indentation, e.g. `"    "` or `"\t"`
    pub indent: String,
    /// The newline string, e.g. `"\n"` or `"\r\n"`
    pub newline: String,
    /// Spacing between a property colon and its value, e.g. `" "`
    pub colon: String,
}

impl Style {
    /// Inspect the top-level properties of a parsed document and derive its
    /// style. Runs once at construction time; the result is cached and never
    /// recomputed after a mutation.
    pub fn infer(root: &Node) -> Self {
        root.object_properties()
            .into_iter()
            .flatten()
            .find_map(style_from_property)
            .unwrap_or_default()
    }
}

/// Derive a style from one property, or `None` if its leading trivia does
/// not separate into a newline part and an indent part.
fn style_from_property(property: &Node) -> Option<Style> {
    let run = render_trivia(after_first_comment(&property.leading));
    if run.is_empty() {
        return None;
    }
    // The newline part is the run with indentation characters removed; the
    // indent part is what removing the newline part leaves behind
    let newline: String = run.chars().filter(|c| !matches!(c, ' ' | '\t')).collect();
    if newline.is_empty() {
        return None;
    }
    let indent = run.replacen(&newline, "", 1);
    if indent.is_empty() {
        return None;
    }
    let colon = property
        .property_value()
        .map(|value| render_trivia(after_first_comment(&value.leading)))
        .unwrap_or_default();
    Some(Style {
        indent,
        newline,
        colon,
    })
}

fn after_first_comment(trivia: &[Trivia]) -> &[Trivia] {
    match trivia.iter().position(Trivia::is_comment) {
        Some(i) => &trivia[i + 1..],
        None => trivia,
    }
}
