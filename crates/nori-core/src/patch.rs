//! Patch vocabulary for the diff-merge engine
//!
//! A patch is an insertion-ordered map from property key to desired value.
//! Besides plain JSON-like values, two marker variants steer the merge:
//! [`PatchValue::Delete`] removes a property (or, leading an array, switches
//! the array merge to delete-by-match) and [`PatchValue::Add`] leading an
//! array switches it to append. Because the markers are enum variants they
//! can never collide with a legitimate value.

use indexmap::IndexMap;

/// An ordered mapping of property keys to patch values.
pub type Patch = IndexMap<String, PatchValue>;

/// One value inside a patch: a JSON-like value or a merge marker.
#[derive(Debug, Clone, PartialEq)]
pub enum PatchValue {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<PatchValue>),
    Object(Patch),
    /// Marker: append the following array values instead of merging by
    /// position
    Add,
    /// Marker: delete the addressed property, or the following array values
    /// by match
    Delete,
}

impl PatchValue {
    /// Check if this is one of the two merge markers
    pub fn is_marker(&self) -> bool {
        matches!(self, PatchValue::Add | PatchValue::Delete)
    }

    /// Lower-case name of this value's kind, for error messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            PatchValue::Null => "null",
            PatchValue::Bool(_) => "boolean",
            PatchValue::Number(_) => "number",
            PatchValue::String(_) => "string",
            PatchValue::Array(_) => "array",
            PatchValue::Object(_) => "object",
            PatchValue::Add => "add marker",
            PatchValue::Delete => "delete marker",
        }
    }

    /// The contained patch map, if this is an object value
    pub fn into_object(self) -> Option<Patch> {
        match self {
            PatchValue::Object(patch) => Some(patch),
            _ => None,
        }
    }
}

impl From<bool> for PatchValue {
    fn from(value: bool) -> Self {
        PatchValue::Bool(value)
    }
}

impl From<f64> for PatchValue {
    fn from(value: f64) -> Self {
        PatchValue::Number(value)
    }
}

impl From<i32> for PatchValue {
    fn from(value: i32) -> Self {
        PatchValue::Number(value.into())
    }
}

impl From<i64> for PatchValue {
    fn from(value: i64) -> Self {
        PatchValue::Number(value as f64)
    }
}

impl From<u32> for PatchValue {
    fn from(value: u32) -> Self {
        PatchValue::Number(value.into())
    }
}

impl From<&str> for PatchValue {
    fn from(value: &str) -> Self {
        PatchValue::String(value.to_string())
    }
}

impl From<String> for PatchValue {
    fn from(value: String) -> Self {
        PatchValue::String(value)
    }
}

impl<T: Into<PatchValue>> From<Vec<T>> for PatchValue {
    fn from(values: Vec<T>) -> Self {
        PatchValue::Array(values.into_iter().map(Into::into).collect())
    }
}

impl From<serde_json::Value> for PatchValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => PatchValue::Null,
            serde_json::Value::Bool(b) => PatchValue::Bool(b),
            // JSON numbers always widen to f64; 64-bit integers may lose
            // precision in the process
            serde_json::Value::Number(n) => PatchValue::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => PatchValue::String(s),
            serde_json::Value::Array(values) => {
                PatchValue::Array(values.into_iter().map(Into::into).collect())
            }
            serde_json::Value::Object(map) => PatchValue::Object(
                map.into_iter().map(|(k, v)| (k, PatchValue::from(v))).collect(),
            ),
        }
    }
}
