//! Raw row records as stored in a table tree.

use crate::error::Error;
use crate::value::Value;
use rkyv::{Archive, Deserialize, Serialize};
use std::collections::BTreeMap;

/// One physical row: column name to raw value.
#[derive(Debug, Clone, Default, PartialEq, Archive, Serialize, Deserialize)]
pub struct RowRecord {
    /// Column values keyed by column name.
    pub values: BTreeMap<String, Value>,
}

impl RowRecord {
    /// Create an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a column value (builder form).
    pub fn with(mut self, column: impl Into<String>, value: Value) -> Self {
        self.values.insert(column.into(), value);
        self
    }

    /// Get a column value.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.values.get(column)
    }

    /// Set a column value.
    pub fn set(&mut self, column: impl Into<String>, value: Value) {
        self.values.insert(column.into(), value);
    }

    /// Read the primary id stored under `identity_field`.
    ///
    /// Ids are non-negative integers; a numeric string is accepted for rows
    /// staged from loosely-typed sources.
    pub fn id(&self, identity_field: &str) -> Result<u64, Error> {
        let value = self.get(identity_field).ok_or_else(|| {
            Error::InvalidData(format!("row has no identity column '{}'", identity_field))
        })?;

        let id = match value {
            Value::Int32(i) => u64::try_from(*i).ok(),
            Value::Int64(i) => u64::try_from(*i).ok(),
            Value::String(s) => s.trim().parse::<u64>().ok(),
            _ => None,
        };

        id.ok_or_else(|| {
            Error::InvalidData(format!(
                "identity column '{}' holds {} which is not a valid id",
                identity_field, value
            ))
        })
    }

    /// Build a row from a JSON object.
    pub fn from_json(json: &serde_json::Value) -> Result<Self, Error> {
        let object = json
            .as_object()
            .ok_or_else(|| Error::InvalidData("row must be a JSON object".to_string()))?;

        Ok(Self {
            values: object
                .iter()
                .map(|(k, v)| (k.clone(), Value::from_json(v)))
                .collect(),
        })
    }

    /// Serialize the row to bytes using rkyv.
    pub fn to_bytes(&self) -> Result<Vec<u8>, Error> {
        rkyv::to_bytes::<rkyv::rancor::Error>(self)
            .map(|v| v.to_vec())
            .map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Deserialize a row from bytes using rkyv.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        rkyv::from_bytes::<Self, rkyv::rancor::Error>(bytes)
            .map_err(|e| Error::Deserialization(e.to_string()))
    }
}
