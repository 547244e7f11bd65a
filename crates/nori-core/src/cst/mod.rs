//! Concrete Syntax Tree (CST) for JSON-with-comments documents
//!
//! This module implements a lossless syntax tree over an owned node model.
//! Every node records the whitespace and comments around it, enabling:
//! - Byte-exact reconstruction of unmodified documents
//! - Surgical edits that leave untouched regions untouched
//! - Style inference from the formatting the author actually used
//!
//! ## Trivia handling
//!
//! Trivia is attached to nodes, not kept in a side table:
//! - **Leading trivia**: the pending whitespace/comment run when the node
//!   begins
//! - **Trailing trivia**: the run between the node (and its separator
//!   comma) and the next structural token
//!
//! This enables the lossless property: `stringify(parse(d)) == d`.
//!
//! ## Example
//!
//! ```
//! use nori_core::cst::{parse, stringify, walk};
//!
//! let source = "{\n  \"port\": 8080 // dev default\n}";
//! let tree = parse(source).unwrap();
//! assert_eq!(stringify(&tree).unwrap(), source);
//!
//! let mut nodes = 0;
//! walk(&tree, &mut |_, _, _| nodes += 1);
//! assert_eq!(nodes, 4); // object, property, key, value
//! ```

mod node;
mod parser;
mod printer;

pub use node::{Comment, CommentKind, Node, NodeKind, Trivia, walk};
pub use parser::{ParseError, parse};
pub use printer::{render_trivia, stringify, stringify_nodes};

pub(crate) use printer::render_plain;

#[cfg(test)]
mod round_trip;
