//! Row-level data-type migration.
//!
//! Scans every managed table page by page, runs the transformer chain over
//! each declared field of each row and saves the rows that changed.

use super::cursor::PageCursor;
use super::error::MigrationError;
use super::field::Field;
use super::logger::{MigrationLogger, NullLogger};
use super::result::TableResult;
use super::transformer::TypeTransformer;
use crate::catalog::MetadataLookup;
use crate::entity::{EntityStore, Repository};
use crate::schema::SchemaAuthority;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Default number of rows fetched per page.
pub const DEFAULT_MAX_RESULTS: usize = 1000;

/// Configuration for the records processor.
#[derive(Debug, Clone)]
pub struct ProcessorConfig {
    /// Rows fetched per page.
    pub max_results: usize,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_MAX_RESULTS,
        }
    }
}

impl ProcessorConfig {
    /// Set the page size.
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }
}

/// Normalizes the stored values of every managed table.
pub struct TableRecordsProcessor<'a> {
    store: &'a dyn EntityStore,
    authority: &'a dyn SchemaAuthority,
    transformers: Vec<Box<dyn TypeTransformer>>,
    logger: Arc<dyn MigrationLogger>,
    config: ProcessorConfig,
}

impl<'a> TableRecordsProcessor<'a> {
    /// Create a processor running `transformers` in order.
    pub fn new(
        store: &'a dyn EntityStore,
        authority: &'a dyn SchemaAuthority,
        transformers: Vec<Box<dyn TypeTransformer>>,
    ) -> Self {
        Self {
            store,
            authority,
            transformers,
            logger: Arc::new(NullLogger),
            config: ProcessorConfig::default(),
        }
    }

    /// Set the configuration.
    pub fn with_config(mut self, config: ProcessorConfig) -> Self {
        self.config = config;
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

    /// Process every installed table.
    ///
    /// Tables without a repository are foreign and get no result. Managed
    /// tables are always present, empty ones at zero.
    pub fn transform(&self) -> Result<BTreeMap<String, TableResult>, MigrationError> {
        let mut results = BTreeMap::new();

        for table in self.authority.installed_tables()? {
            let Some(repository) = self.store.repository(&table.name) else {
                tracing::trace!(table = %table.name, "skipping unmapped table");
                continue;
            };

            let mut result = TableResult::new(&table.name, true);
            self.update_table(repository.as_ref(), &mut result)?;

            tracing::debug!(
                table = %table.name,
                records = result.record_count(),
                fields = result.field_count(),
                "table processed"
            );
            results.insert(table.name, result);
        }

        Ok(results)
    }

    fn update_table(
        &self,
        repository: &dyn Repository,
        result: &mut TableResult,
    ) -> Result<(), MigrationError> {
        let table = result.table_name().to_string();
        self.logger.info(&format!("Processing table: {}", table));

        if repository.count()? == 0 {
            return Ok(());
        }

        let entity = match MetadataLookup::resolve(self.store.mapper(), &table) {
            MetadataLookup::Found(entity) => entity,
            MetadataLookup::NotFound => return Err(MigrationError::MetadataNotFound { table }),
        };

        let mut cursor = PageCursor::new(self.store, &table, self.config.max_results);
        while let Some(rows) = cursor.next_page()? {
            for row in rows {
                result.add_record();

                let id = row.id(&entity.identity_field)?;
                let mut record = repository.find(id)?;
                let mut changed = false;

                for metadata in &entity.fields {
                    let mut field = Field::new(&row, metadata);
                    for transformer in &self.transformers {
                        transformer.transform(&mut field)?;
                    }

                    if field.has_changed() {
                        self.logger
                            .debug(&format!("- Updated field: {}", field.name()));
                        record.set(metadata.name.clone(), field.into_value());
                        result.add_field();
                        changed = true;
                    }
                }

                if changed {
                    repository.save(&record, true)?;
                }
            }
        }

        Ok(())
    }
}
