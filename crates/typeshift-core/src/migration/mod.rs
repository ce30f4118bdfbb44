//! Data-type migration engine.
//!
//! Two processors run in sequence after the structural schema update:
//!
//! - [`SchemaProcessor`] retypes installed columns to their declared types.
//! - [`TableRecordsProcessor`] rewrites the stored values of every managed
//!   table through the [`TypeTransformer`] chain and reports per-table
//!   [`TableResult`]s.
//!
//! Both are synchronous and strictly sequential. A failure aborts the run;
//! tables already processed keep their changes and a re-run is safe.

mod cursor;
mod error;
mod field;
mod logger;
mod records;
mod result;
mod schema;

pub mod transformer;

pub use cursor::PageCursor;
pub use error::MigrationError;
pub use field::Field;
pub use logger::{BufferingLogger, LogEntry, MigrationLogger, NullLogger, TracingLogger};
pub use records::{ProcessorConfig, TableRecordsProcessor, DEFAULT_MAX_RESULTS};
pub use result::TableResult;
pub use schema::{Column, ColumnChange, ColumnTypeTransformer, SchemaProcessor, SchemaTransformer};
pub use transformer::{default_transformers, TypeTransformer};
