//! typeshift core - schema reconciliation and data-type migration.
//!
//! This crate provides the embedded store, the declarative catalog, the
//! schema comparator and the row-level type migration engine.

#[cfg(feature = "mimalloc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

pub mod catalog;
pub mod database;
pub mod entity;
pub mod error;
pub mod migration;
pub mod schema;
pub mod storage;
pub mod value;

pub use catalog::{
    Catalog, ColumnDef, EntityDef, FieldDef, Mapper, MetadataLookup, ScalarType, SchemaBundle,
    TableDef,
};
pub use database::Database;
pub use entity::{Entity, EntityManager, EntityStore, Repository, TableRepository};
pub use error::Error;
pub use migration::{
    default_transformers, BufferingLogger, MigrationError, MigrationLogger, NullLogger,
    ProcessorConfig, SchemaProcessor, TableRecordsProcessor, TableResult, TracingLogger,
    TypeTransformer,
};
pub use schema::{SchemaAuthority, SchemaCheck, SchemaComparator, SchemaComparison, SchemaManager};
pub use storage::{RowRecord, StorageConfig, StorageEngine};
pub use value::Value;
