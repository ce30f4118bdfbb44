//! Per-table scan statistics.

use serde::Serialize;

/// Statistics for one scanned table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableResult {
    table_name: String,
    is_managed: bool,
    record_count: u64,
    field_count: u64,
}

impl TableResult {
    /// Create a result with zeroed counters.
    pub fn new(table_name: impl Into<String>, is_managed: bool) -> Self {
        Self {
            table_name: table_name.into(),
            is_managed,
            record_count: 0,
            field_count: 0,
        }
    }

    /// Count one scanned row, changed or not.
    pub fn add_record(&mut self) {
        self.record_count += 1;
    }

    /// Count one changed field.
    pub fn add_field(&mut self) {
        self.field_count += 1;
    }

    /// Table name.
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Rows scanned.
    pub fn record_count(&self) -> u64 {
        self.record_count
    }

    /// Fields changed, across all rows.
    pub fn field_count(&self) -> u64 {
        self.field_count
    }

    /// Whether the table is mapped by the declared schema.
    pub fn is_managed(&self) -> bool {
        self.is_managed
    }

    /// Whether any row was scanned.
    pub fn is_updated(&self) -> bool {
        self.record_count > 0
    }
}
