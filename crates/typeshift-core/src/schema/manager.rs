//! Sled-backed schema manager.

use super::{SchemaAuthority, SchemaCheck, SchemaComparator, SchemaComparison};
use crate::catalog::{Catalog, ColumnDef, TableDef};
use crate::error::Error;
use crate::storage::StorageEngine;

/// Reconciles the installed tables with the catalog's current schema.
pub struct SchemaManager<'a> {
    engine: &'a StorageEngine,
    catalog: &'a Catalog,
}

impl<'a> SchemaManager<'a> {
    /// Create a schema manager.
    pub fn new(engine: &'a StorageEngine, catalog: &'a Catalog) -> Self {
        Self { engine, catalog }
    }

    /// Tables the declared schema expects. Empty when no schema is loaded.
    pub fn expected_tables(&self) -> Vec<TableDef> {
        self.catalog
            .current_schema()
            .map(|schema| schema.expected_tables())
            .unwrap_or_default()
    }

    /// Describe pending changes without applying them.
    pub fn check(&self) -> Result<SchemaCheck, Error> {
        Ok(SchemaCheck::pending(&self.compare()?))
    }

    fn installed(&self, table: &str) -> Result<TableDef, Error> {
        self.engine
            .table(table)?
            .ok_or_else(|| Error::TableNotFound(table.to_string()))
    }
}

impl SchemaAuthority for SchemaManager<'_> {
    fn installed_tables(&self) -> Result<Vec<TableDef>, Error> {
        self.engine.installed_tables()
    }

    fn compare(&self) -> Result<SchemaComparison, Error> {
        let installed = self.engine.installed_tables()?;
        Ok(SchemaComparator::compare(&installed, &self.expected_tables()))
    }

    fn update(&self) -> Result<SchemaCheck, Error> {
        let comparison = self.compare()?;
        let mut responses = Vec::with_capacity(comparison.change_count());

        for table in &comparison.creates {
            self.engine.create_table(table)?;
            responses.push(format!("Created table `{}`.", table.name));
        }

        for alter in &comparison.alters {
            let mut table = self.installed(&alter.table)?;
            for column in alter.added_columns.iter().chain(&alter.changed_columns) {
                table.upsert_column(column.clone());
            }
            self.engine.replace_table(&table)?;
            responses.push(format!(
                "Updated `{}` table to match current schema.",
                alter.table
            ));
        }

        if !comparison.is_empty() {
            self.engine.flush()?;
            tracing::info!(
                creates = comparison.creates.len(),
                alters = comparison.alters.len(),
                "schema updated"
            );
        }

        Ok(SchemaCheck::applied(responses))
    }

    fn apply_column(&self, table: &str, column: ColumnDef) -> Result<(), Error> {
        let mut def = self.installed(table)?;
        tracing::debug!(table, column = %column.name, column_type = %column.column_type, "column replaced");
        def.upsert_column(column);
        self.engine.replace_table(&def)
    }
}
