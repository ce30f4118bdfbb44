//! Entity manager over the sled store and the catalog.

use super::{EntityStore, Repository, TableRepository};
use crate::catalog::{Catalog, Mapper, MetadataLookup};
use crate::error::Error;
use crate::storage::{RowRecord, StorageEngine};

/// Resolves repositories for mapped tables and reads raw pages.
pub struct EntityManager<'a> {
    engine: &'a StorageEngine,
    catalog: &'a Catalog,
}

impl<'a> EntityManager<'a> {
    /// Create an entity manager.
    pub fn new(engine: &'a StorageEngine, catalog: &'a Catalog) -> Self {
        Self { engine, catalog }
    }

    /// Insert a raw row into an installed table.
    ///
    /// The primary id is read from the identity field of the entity mapped
    /// onto the table, or from `id` for unmapped tables.
    pub fn insert_row(&self, table: &str, row: &RowRecord) -> Result<u64, Error> {
        let identity = MetadataLookup::resolve(self.catalog, table)
            .found()
            .map(|entity| entity.identity_field)
            .unwrap_or_else(|| "id".to_string());

        let id = row.id(&identity)?;
        self.engine.put_row(table, id, row)?;
        Ok(id)
    }
}

impl EntityStore for EntityManager<'_> {
    fn repository(&self, table: &str) -> Option<Box<dyn Repository + '_>> {
        let entity = MetadataLookup::resolve(self.catalog, table).found()?;
        Some(Box::new(TableRepository::new(self.engine, entity)))
    }

    fn mapper(&self) -> &dyn Mapper {
        self.catalog
    }

    fn fetch_page(&self, table: &str, offset: u64, limit: usize) -> Result<Vec<RowRecord>, Error> {
        self.engine.fetch_page(table, offset, limit)
    }
}
