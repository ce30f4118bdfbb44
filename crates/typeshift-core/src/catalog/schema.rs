//! Schema bundle - versioned snapshot of the declared schema.

use super::{EntityDef, TableDef};
use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A versioned snapshot of the declared entity metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaBundle {
    /// Schema version (monotonically increasing).
    #[serde(default)]
    pub version: u64,
    /// Creation timestamp (microseconds since Unix epoch).
    #[serde(default)]
    pub created_at: u64,
    /// Entity definitions keyed by entity name.
    pub entities: BTreeMap<String, EntityDef>,
}

impl SchemaBundle {
    /// Create an empty schema bundle.
    pub fn new(version: u64) -> Self {
        Self {
            version,
            created_at: crate::storage::key::current_timestamp(),
            entities: BTreeMap::new(),
        }
    }

    /// Add an entity to the schema.
    pub fn with_entity(mut self, entity: EntityDef) -> Self {
        self.entities.insert(entity.name.clone(), entity);
        self
    }

    /// Get an entity by name.
    pub fn get_entity(&self, name: &str) -> Option<&EntityDef> {
        self.entities.get(name)
    }

    /// Get the entity mapped onto a physical table.
    pub fn entity_for_table(&self, table: &str) -> Option<&EntityDef> {
        self.entities.values().find(|e| e.table == table)
    }

    /// The tables this schema expects, sorted by table name.
    pub fn expected_tables(&self) -> Vec<TableDef> {
        let mut tables: Vec<TableDef> =
            self.entities.values().map(EntityDef::to_table_def).collect();
        tables.sort_by(|a, b| a.name.cmp(&b.name));
        tables
    }

    /// Parse a schema bundle from its JSON document form.
    ///
    /// The document may omit `version` and `created_at`; both are assigned
    /// when the bundle is applied to a catalog.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        serde_json::from_str(json).map_err(|e| Error::Deserialization(e.to_string()))
    }

    /// Serialize the schema bundle to bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>, Error> {
        serde_json::to_vec(self).map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Deserialize a schema bundle from bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        serde_json::from_slice(bytes).map_err(|e| Error::Deserialization(e.to_string()))
    }
}

impl Default for SchemaBundle {
    fn default() -> Self {
        Self::new(0)
    }
}
