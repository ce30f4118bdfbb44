//! Entity layer: logical rows addressed by primary id.
//!
//! The migration engine only talks to the store through [`EntityStore`] and
//! [`Repository`]; [`EntityManager`] is the sled-backed implementation.

mod manager;
mod repository;

pub use manager::EntityManager;
pub use repository::TableRepository;

use crate::catalog::Mapper;
use crate::error::Error;
use crate::storage::RowRecord;
use crate::value::Value;
use std::collections::BTreeMap;

/// A logical row of a mapped table.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    table: String,
    id: u64,
    values: BTreeMap<String, Value>,
}

impl Entity {
    /// Build an entity from its stored row.
    pub fn from_row(table: impl Into<String>, id: u64, row: RowRecord) -> Self {
        Self {
            table: table.into(),
            id,
            values: row.values,
        }
    }

    /// Table the entity belongs to.
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Primary id.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Get a field value.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.values.get(field)
    }

    /// Set a field value by name.
    pub fn set(&mut self, field: impl Into<String>, value: Value) {
        self.values.insert(field.into(), value);
    }

    /// The row to persist for this entity.
    pub fn to_row(&self) -> RowRecord {
        RowRecord {
            values: self.values.clone(),
        }
    }
}

/// Persistence for the entities of one mapped table.
pub trait Repository {
    /// Number of stored rows.
    fn count(&self) -> Result<u64, Error>;

    /// Load the entity with the given primary id.
    ///
    /// A missing row is an [`Error::EntityNotFound`].
    fn find(&self, id: u64) -> Result<Entity, Error>;

    /// Persist an entity, flushing to disk when `flush` is set.
    fn save(&self, entity: &Entity, flush: bool) -> Result<(), Error>;
}

/// The object store the migration engine reads and writes through.
pub trait EntityStore {
    /// Resolve the repository for a physical table.
    ///
    /// Returns `None` for tables outside the managed schema.
    fn repository(&self, table: &str) -> Option<Box<dyn Repository + '_>>;

    /// Declared metadata source.
    fn mapper(&self) -> &dyn Mapper;

    /// Fetch raw rows of a table by offset and limit, in natural order.
    fn fetch_page(&self, table: &str, offset: u64, limit: usize) -> Result<Vec<RowRecord>, Error>;
}
