//! NORI Core
//!
//! Core engine for parsing JSON-with-comments documents into a lossless
//! concrete syntax tree and patching them without disturbing hand-written
//! formatting. Whitespace, indentation, comments and the exact spelling of
//! numeric literals all survive a parse/stringify cycle byte-for-byte, and
//! the patch engine only rewrites the regions an edit actually touches.
//!
//! # Example
//!
//! ```
//! use nori_core::{PatchValue, Updater};
//! use serde_json::json;
//!
//! let mut updater = Updater::new("{\n  \"port\": 8080 // dev\n}").unwrap();
//! let patch = PatchValue::from(json!({"port": 9090}))
//!     .into_object()
//!     .unwrap();
//! updater.update(&patch).unwrap();
//! assert_eq!(updater.to_text().unwrap(), "{\n  \"port\": 9090 // dev\n}");
//! ```

pub mod cst;
pub mod error;
pub mod file;
pub mod patch;
pub mod result;
pub mod style;
pub mod updater;

// Re-export commonly used types
pub use cst::{
    Comment, CommentKind, Node, NodeKind, ParseError, Trivia, parse, render_trivia, stringify,
    stringify_nodes, walk,
};
pub use error::{ErrorKind, NoriError};
pub use file::FileUpdater;
pub use patch::{Patch, PatchValue};
pub use result::Result;
pub use style::Style;
pub use updater::Updater;
