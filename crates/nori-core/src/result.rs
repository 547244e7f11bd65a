//! Result type alias for JSONC editing operations

use crate::error::NoriError;

/// Standard Result type for JSONC editing operations
pub type Result<T> = std::result::Result<T, NoriError>;
