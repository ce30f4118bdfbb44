//! Storage engine implementation.

use super::key::{decode_row_key, encode_row_key, rows_tree_name};
use super::{RowRecord, StorageConfig};
use crate::catalog::TableDef;
use crate::error::Error;
use sled::{Db, Tree};

/// Tree name for installed table definitions.
const TABLES_TREE: &str = "schema:tables";

/// The physical store wrapping sled.
///
/// Each installed table has its definition in the `schema:tables` tree and
/// its rows in a dedicated `rows:<table>` tree keyed by primary id.
pub struct StorageEngine {
    /// The underlying sled database.
    db: Db,

    /// Tree for installed table definitions (name -> TableDef).
    tables_tree: Tree,
}

impl StorageEngine {
    /// Open or create a storage engine with the given configuration.
    pub fn open(config: StorageConfig) -> Result<Self, Error> {
        let db = config.to_sled_config().open()?;
        let tables_tree = db.open_tree(TABLES_TREE)?;

        Ok(Self { db, tables_tree })
    }

    /// Check if the database was recovered from a previous crash.
    pub fn was_recovered(&self) -> bool {
        self.db.was_recovered()
    }

    /// List installed tables, ordered by name.
    pub fn installed_tables(&self) -> Result<Vec<TableDef>, Error> {
        self.tables_tree
            .iter()
            .values()
            .map(|bytes| TableDef::from_bytes(&bytes?))
            .collect()
    }

    /// Get an installed table definition.
    pub fn table(&self, name: &str) -> Result<Option<TableDef>, Error> {
        match self.tables_tree.get(name.as_bytes())? {
            Some(bytes) => Ok(Some(TableDef::from_bytes(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Install a new table.
    pub fn create_table(&self, table: &TableDef) -> Result<(), Error> {
        if self.tables_tree.contains_key(table.name.as_bytes())? {
            return Err(Error::TableExists(table.name.clone()));
        }

        self.tables_tree
            .insert(table.name.as_bytes(), table.to_bytes()?)?;
        self.db.open_tree(rows_tree_name(&table.name))?;

        tracing::debug!(table = %table.name, columns = table.columns.len(), "table created");
        Ok(())
    }

    /// Replace the definition of an installed table.
    ///
    /// Rows are left untouched: columns added here read as absent until a
    /// row is rewritten.
    pub fn replace_table(&self, table: &TableDef) -> Result<(), Error> {
        if !self.tables_tree.contains_key(table.name.as_bytes())? {
            return Err(Error::TableNotFound(table.name.clone()));
        }

        self.tables_tree
            .insert(table.name.as_bytes(), table.to_bytes()?)?;

        tracing::debug!(table = %table.name, columns = table.columns.len(), "table altered");
        Ok(())
    }

    /// Open the row tree of an installed table.
    fn rows(&self, table: &str) -> Result<Tree, Error> {
        if !self.tables_tree.contains_key(table.as_bytes())? {
            return Err(Error::TableNotFound(table.to_string()));
        }
        Ok(self.db.open_tree(rows_tree_name(table))?)
    }

    /// Insert or overwrite the row stored under `id`.
    pub fn put_row(&self, table: &str, id: u64, row: &RowRecord) -> Result<(), Error> {
        self.rows(table)?.insert(encode_row_key(id), row.to_bytes()?)?;
        Ok(())
    }

    /// Get the row stored under `id`.
    pub fn get_row(&self, table: &str, id: u64) -> Result<Option<RowRecord>, Error> {
        match self.rows(table)?.get(encode_row_key(id))? {
            Some(bytes) => Ok(Some(RowRecord::from_bytes(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Fetch up to `limit` rows starting at `offset`, in ascending id order.
    ///
    /// Offsets are positional: a concurrent insert or delete between two
    /// calls shifts the window.
    pub fn fetch_page(
        &self,
        table: &str,
        offset: u64,
        limit: usize,
    ) -> Result<Vec<RowRecord>, Error> {
        let offset = usize::try_from(offset).map_err(|_| {
            Error::InvalidData(format!("offset {} exceeds the addressable range", offset))
        })?;

        self.rows(table)?
            .iter()
            .skip(offset)
            .take(limit)
            .map(|entry| {
                let (key, value) = entry?;
                decode_row_key(&key).ok_or(Error::InvalidKey)?;
                RowRecord::from_bytes(&value)
            })
            .collect()
    }

    /// Count the rows of a table.
    pub fn count_rows(&self, table: &str) -> Result<u64, Error> {
        Ok(self.rows(table)?.len() as u64)
    }

    /// Flush all pending writes to disk.
    pub fn flush(&self) -> Result<(), Error> {
        self.db.flush()?;
        Ok(())
    }
}
