//! Schema reconciliation.
//!
//! Compares the installed tables against the declared entity metadata and
//! applies the structural changes (creates and alters) needed to match it.
//! Column type changes are left to the migration engine.

mod check;
mod comparator;
mod manager;

pub use check::SchemaCheck;
pub use comparator::{ColumnDiff, SchemaComparator, SchemaComparison, TableAlter};
pub use manager::SchemaManager;

use crate::catalog::{ColumnDef, TableDef};
use crate::error::Error;

/// Installed-table introspection plus diff and apply of structural changes.
pub trait SchemaAuthority {
    /// List installed tables.
    fn installed_tables(&self) -> Result<Vec<TableDef>, Error>;

    /// Compare installed tables with the declared schema.
    fn compare(&self) -> Result<SchemaComparison, Error>;

    /// Apply pending creates and alters.
    fn update(&self) -> Result<SchemaCheck, Error>;

    /// Replace one column definition of an installed table.
    fn apply_column(&self, table: &str, column: ColumnDef) -> Result<(), Error>;
}
