//! Core type definitions for the catalog.

use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Scalar data types a column or field can be declared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalarType {
    /// Boolean value.
    Bool,
    /// 32-bit signed integer.
    Int32,
    /// 64-bit signed integer.
    Int64,
    /// 64-bit floating point.
    Float64,
    /// UTF-8 string.
    String,
    /// Binary data.
    Bytes,
    /// Timestamp (microseconds since Unix epoch).
    Timestamp,
}

impl ScalarType {
    /// Check whether a value is already in the canonical representation
    /// for this type. `Null` is canonical for every type.
    pub fn is_canonical(&self, value: &Value) -> bool {
        matches!(
            (self, value),
            (_, Value::Null)
                | (ScalarType::Bool, Value::Bool(_))
                | (ScalarType::Int32, Value::Int32(_))
                | (ScalarType::Int64, Value::Int64(_))
                | (ScalarType::Float64, Value::Float64(_))
                | (ScalarType::String, Value::String(_))
                | (ScalarType::Bytes, Value::Bytes(_))
                | (ScalarType::Timestamp, Value::Timestamp(_))
        )
    }

    /// Check whether data stored under `from` can be rewritten into this
    /// type by the row transformers.
    ///
    /// Strings are the legacy catch-all and convert to anything; integers
    /// widen into larger numeric types, booleans and timestamps.
    pub fn converts_from(&self, from: ScalarType) -> bool {
        if *self == from {
            return true;
        }
        match from {
            ScalarType::String => true,
            ScalarType::Int32 => matches!(
                self,
                ScalarType::Int64 | ScalarType::Float64 | ScalarType::Bool | ScalarType::Timestamp
            ),
            ScalarType::Int64 => matches!(
                self,
                ScalarType::Int32 | ScalarType::Float64 | ScalarType::Bool | ScalarType::Timestamp
            ),
            _ => false,
        }
    }

    /// Lowercase name of the type.
    pub fn name(&self) -> &'static str {
        match self {
            ScalarType::Bool => "bool",
            ScalarType::Int32 => "int32",
            ScalarType::Int64 => "int64",
            ScalarType::Float64 => "float64",
            ScalarType::String => "string",
            ScalarType::Bytes => "bytes",
            ScalarType::Timestamp => "timestamp",
        }
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
