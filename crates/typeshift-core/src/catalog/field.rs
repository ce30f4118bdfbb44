//! Field definitions for entities.

use super::types::ScalarType;
use crate::value::Value;
use serde::{Deserialize, Serialize};

fn default_required() -> bool {
    true
}

/// A field definition within an entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDef {
    /// Field name, which is also the column name.
    pub name: String,
    /// Declared data type.
    #[serde(rename = "type")]
    pub field_type: ScalarType,
    /// Whether the field is required (non-nullable).
    #[serde(default = "default_required")]
    pub required: bool,
    /// Default value if not provided.
    #[serde(default)]
    pub default: Option<Value>,
}

impl FieldDef {
    /// Create a new required field.
    pub fn new(name: impl Into<String>, field_type: ScalarType) -> Self {
        Self {
            name: name.into(),
            field_type,
            required: true,
            default: None,
        }
    }

    /// Create an optional field (required = false).
    pub fn optional(name: impl Into<String>, field_type: ScalarType) -> Self {
        Self {
            name: name.into(),
            field_type,
            required: false,
            default: None,
        }
    }

    /// Set the default value.
    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    /// Check if this field accepts NULL.
    pub fn is_nullable(&self) -> bool {
        !self.required
    }
}
