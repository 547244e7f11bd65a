//! Error types and handling for JSONC editing operations

use thiserror::Error;

use crate::cst::ParseError;

/// Main error type for JSONC editing operations
#[derive(Debug, Error)]
pub enum NoriError {
    /// Syntax errors raised while building the tree
    #[error("{0}")]
    Parse(#[from] ParseError),

    /// The stringifier met a node that cannot occur in a well-formed tree
    #[error("malformed node: {message}")]
    MalformedNode { message: String },

    /// Node synthesis met a patch value with no JSON representation
    #[error("cannot convert {kind} to JSON")]
    UnsupportedPatchValue { kind: String },

    /// Delete was requested for a property that does not exist
    #[error("cannot delete missing property `{key}`")]
    MissingProperty { key: String },

    /// Plain-value snapshot failed to re-parse as strict JSON
    #[error("snapshot error: {source}")]
    Json {
        #[source]
        source: serde_json::Error,
    },

    /// File system I/O errors from the load/save collaborator
    #[error("IO error: {source}")]
    Io {
        #[source]
        source: std::io::Error,
    },
}

/// Error kind enumeration for categorizing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Parse,
    Type,
    Logic,
    Io,
}

impl NoriError {
    /// Get the error kind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            NoriError::Parse(_) => ErrorKind::Parse,
            NoriError::MalformedNode { .. } => ErrorKind::Type,
            NoriError::UnsupportedPatchValue { .. } => ErrorKind::Type,
            NoriError::MissingProperty { .. } => ErrorKind::Logic,
            NoriError::Json { .. } => ErrorKind::Parse,
            NoriError::Io { .. } => ErrorKind::Io,
        }
    }

    /// Create a malformed-node error
    pub fn malformed_node(message: impl Into<String>) -> Self {
        Self::MalformedNode {
            message: message.into(),
        }
    }

    /// Create an unsupported-patch-value error
    pub fn unsupported_patch_value(kind: impl Into<String>) -> Self {
        Self::UnsupportedPatchValue { kind: kind.into() }
    }

    /// Create a missing-property error
    pub fn missing_property(key: impl Into<String>) -> Self {
        Self::MissingProperty { key: key.into() }
    }
}

impl From<serde_json::Error> for NoriError {
    fn from(source: serde_json::Error) -> Self {
        Self::Json { source }
    }
}

impl From<std::io::Error> for NoriError {
    fn from(source: std::io::Error) -> Self {
        Self::Io { source }
    }
}
