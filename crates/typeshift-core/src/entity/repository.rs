//! Sled-backed repository for one mapped table.

use super::{Entity, Repository};
use crate::catalog::EntityDef;
use crate::error::Error;
use crate::storage::StorageEngine;

/// Repository over the rows of one installed, mapped table.
pub struct TableRepository<'a> {
    engine: &'a StorageEngine,
    entity: EntityDef,
}

impl<'a> TableRepository<'a> {
    /// Create a repository for the table of `entity`.
    pub fn new(engine: &'a StorageEngine, entity: EntityDef) -> Self {
        Self { engine, entity }
    }
}

impl Repository for TableRepository<'_> {
    fn count(&self) -> Result<u64, Error> {
        self.engine.count_rows(&self.entity.table)
    }

    fn find(&self, id: u64) -> Result<Entity, Error> {
        let row = self
            .engine
            .get_row(&self.entity.table, id)?
            .ok_or_else(|| Error::EntityNotFound {
                table: self.entity.table.clone(),
                id,
            })?;

        Ok(Entity::from_row(&self.entity.table, id, row))
    }

    fn save(&self, entity: &Entity, flush: bool) -> Result<(), Error> {
        self.engine
            .put_row(&self.entity.table, entity.id(), &entity.to_row())?;
        if flush {
            self.engine.flush()?;
        }
        Ok(())
    }
}
