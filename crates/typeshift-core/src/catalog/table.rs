//! Physical table definitions as installed in the store.

use super::field::FieldDef;
use super::types::ScalarType;
use crate::value::Value;
use serde::{Deserialize, Serialize};

/// One installed column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDef {
    /// Column name.
    pub name: String,
    /// Physical storage type.
    #[serde(rename = "type")]
    pub column_type: ScalarType,
    /// Whether the column accepts NULL.
    #[serde(default)]
    pub nullable: bool,
    /// Column default.
    #[serde(default)]
    pub default: Option<Value>,
}

impl ColumnDef {
    /// Create a non-nullable column without a default.
    pub fn new(name: impl Into<String>, column_type: ScalarType) -> Self {
        Self {
            name: name.into(),
            column_type,
            nullable: false,
            default: None,
        }
    }

    /// Mark the column as nullable.
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Set the column default.
    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    /// The column a declared field expects.
    pub fn from_field(field: &FieldDef) -> Self {
        Self {
            name: field.name.clone(),
            column_type: field.field_type,
            nullable: field.is_nullable(),
            default: field.default.clone(),
        }
    }
}

/// An installed table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableDef {
    /// Table name.
    pub name: String,
    /// Columns in declaration order.
    pub columns: Vec<ColumnDef>,
}

impl TableDef {
    /// Create a table with no columns.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
        }
    }

    /// Add a column.
    pub fn with_column(mut self, column: ColumnDef) -> Self {
        self.columns.push(column);
        self
    }

    /// Add multiple columns.
    pub fn with_columns(mut self, columns: impl IntoIterator<Item = ColumnDef>) -> Self {
        self.columns.extend(columns);
        self
    }

    /// Get a column by name.
    pub fn get_column(&self, name: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Insert or replace a column, keeping its position when it exists.
    pub fn upsert_column(&mut self, column: ColumnDef) {
        match self.columns.iter_mut().find(|c| c.name == column.name) {
            Some(existing) => *existing = column,
            None => self.columns.push(column),
        }
    }

    /// Serialize the table definition.
    pub fn to_bytes(&self) -> Result<Vec<u8>, crate::error::Error> {
        serde_json::to_vec(self).map_err(|e| crate::error::Error::Serialization(e.to_string()))
    }

    /// Deserialize a table definition.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, crate::error::Error> {
        serde_json::from_slice(bytes)
            .map_err(|e| crate::error::Error::Deserialization(e.to_string()))
    }
}
