//! Entity definitions.

use super::field::FieldDef;
use super::table::{ColumnDef, TableDef};
use serde::{Deserialize, Serialize};

fn default_identity() -> String {
    "id".to_string()
}

/// An entity definition: the declared shape of one mapped table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityDef {
    /// Entity (class) name, unique within the schema.
    pub name: String,
    /// Physical table the entity is stored in.
    pub table: String,
    /// Name of the primary identity field.
    #[serde(default = "default_identity")]
    pub identity_field: String,
    /// Field definitions, in declaration order.
    #[serde(default)]
    pub fields: Vec<FieldDef>,
}

impl EntityDef {
    /// Create a new entity definition identified by `id`.
    pub fn new(name: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            table: table.into(),
            identity_field: default_identity(),
            fields: Vec::new(),
        }
    }

    /// Set the identity field.
    pub fn with_identity(mut self, identity_field: impl Into<String>) -> Self {
        self.identity_field = identity_field.into();
        self
    }

    /// Add a field to the entity.
    pub fn with_field(mut self, field: FieldDef) -> Self {
        self.fields.push(field);
        self
    }

    /// Get a field by name.
    pub fn get_field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// The physical table this entity expects to be installed.
    pub fn to_table_def(&self) -> TableDef {
        TableDef::new(&self.table).with_columns(self.fields.iter().map(ColumnDef::from_field))
    }
}
