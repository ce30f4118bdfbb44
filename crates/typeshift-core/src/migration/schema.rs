//! Column-level data-type migration.
//!
//! Retypes installed columns whose physical type is a legacy representation
//! of their declared type, ahead of the row-level migration.

use super::error::MigrationError;
use super::logger::{MigrationLogger, NullLogger};
use crate::catalog::{ColumnDef, FieldDef, MetadataLookup, ScalarType};
use crate::entity::EntityStore;
use crate::schema::SchemaAuthority;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

/// An installed column paired with its declared field, if any.
#[derive(Debug, Clone)]
pub struct Column<'a> {
    table: &'a str,
    installed: &'a ColumnDef,
    declared: Option<&'a FieldDef>,
    definition: ColumnDef,
}

impl<'a> Column<'a> {
    /// Create a view over an installed column.
    pub fn new(table: &'a str, installed: &'a ColumnDef, declared: Option<&'a FieldDef>) -> Self {
        Self {
            table,
            installed,
            declared,
            definition: installed.clone(),
        }
    }

    /// Table the column belongs to.
    pub fn table(&self) -> &'a str {
        self.table
    }

    /// Column name.
    pub fn name(&self) -> &'a str {
        &self.installed.name
    }

    /// The definition as installed.
    pub fn installed(&self) -> &'a ColumnDef {
        self.installed
    }

    /// The declared field, `None` when the column is no longer declared.
    pub fn declared(&self) -> Option<&'a FieldDef> {
        self.declared
    }

    /// The latest definition.
    pub fn definition(&self) -> &ColumnDef {
        &self.definition
    }

    /// Change the column type.
    pub fn set_type(&mut self, column_type: ScalarType) {
        self.definition.column_type = column_type;
    }

    /// Whether the latest definition differs from the installed one.
    pub fn has_changed(&self) -> bool {
        self.definition != *self.installed
    }

    /// Consume the view, yielding the latest definition.
    pub fn into_definition(self) -> ColumnDef {
        self.definition
    }
}

/// One normalization unit for installed columns.
pub trait SchemaTransformer: Send + Sync {
    /// Rewrite the column definition if needed.
    fn transform(&self, column: &mut Column<'_>) -> Result<(), MigrationError>;
}

/// Retypes a column to its declared type when the row transformers can
/// convert the stored data.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColumnTypeTransformer;

impl SchemaTransformer for ColumnTypeTransformer {
    fn transform(&self, column: &mut Column<'_>) -> Result<(), MigrationError> {
        let Some(declared) = column.declared() else {
            return Ok(());
        };

        let from = column.definition().column_type;
        let to = declared.field_type;
        if from == to {
            return Ok(());
        }

        if !to.converts_from(from) {
            return Err(MigrationError::IncompatibleTypeChange {
                table: column.table().to_string(),
                column: column.name().to_string(),
                from,
                to,
            });
        }

        column.set_type(to);
        Ok(())
    }
}

/// A column retyped by the schema processor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnChange {
    /// Column name.
    pub column: String,
    /// Previous type.
    pub from: ScalarType,
    /// New type.
    pub to: ScalarType,
}

/// Applies schema transformers to the columns of every managed table.
pub struct SchemaProcessor<'a> {
    store: &'a dyn EntityStore,
    authority: &'a dyn SchemaAuthority,
    transformers: Vec<Box<dyn SchemaTransformer>>,
    logger: Arc<dyn MigrationLogger>,
}

impl<'a> SchemaProcessor<'a> {
    /// Create a processor with the column type transformer.
    pub fn new(store: &'a dyn EntityStore, authority: &'a dyn SchemaAuthority) -> Self {
        Self {
            store,
            authority,
            transformers: vec![Box::new(ColumnTypeTransformer)],
            logger: Arc::new(NullLogger),
        }
    }

    /// Replace the transformer chain.
    pub fn with_transformers(mut self, transformers: Vec<Box<dyn SchemaTransformer>>) -> Self {
        self.transformers = transformers;
        self
    }

    /// Set the logger.
    pub fn with_logger(mut self, logger: Arc<dyn MigrationLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Replace the logger.
    pub fn set_logger(&mut self, logger: Arc<dyn MigrationLogger>) {
        self.logger = logger;
    }

    /// Process the columns of every managed table.
    ///
    /// Returns the applied changes keyed by table; managed tables without
    /// changes map to an empty list.
    pub fn transform(&self) -> Result<BTreeMap<String, Vec<ColumnChange>>, MigrationError> {
        let mut results = BTreeMap::new();

        for table in self.authority.installed_tables()? {
            if self.store.repository(&table.name).is_none() {
                continue;
            }

            let entity = match MetadataLookup::resolve(self.store.mapper(), &table.name) {
                MetadataLookup::Found(entity) => entity,
                MetadataLookup::NotFound => {
                    return Err(MigrationError::MetadataNotFound { table: table.name })
                }
            };

            self.logger
                .info(&format!("Processing table: {}", table.name));

            let mut changes = Vec::new();
            for installed in &table.columns {
                let mut column = Column::new(&table.name, installed, entity.get_field(&installed.name));
                for transformer in &self.transformers {
                    transformer.transform(&mut column)?;
                }

                if column.has_changed() {
                    let definition = column.into_definition();
                    self.logger
                        .debug(&format!("- Updated column: {}", definition.name));
                    changes.push(ColumnChange {
                        column: definition.name.clone(),
                        from: installed.column_type,
                        to: definition.column_type,
                    });
                    self.authority.apply_column(&table.name, definition)?;
                }
            }

            results.insert(table.name.clone(), changes);
        }

        Ok(results)
    }
}
