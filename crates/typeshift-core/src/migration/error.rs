//! Migration-specific error types.

use crate::catalog::ScalarType;
use thiserror::Error;

/// Migration-specific errors.
///
/// Every variant aborts the running migration. Tables processed before the
/// failure keep their changes.
#[derive(Debug, Error)]
pub enum MigrationError {
    /// A managed table has no declared metadata under its class name or its
    /// raw table name.
    #[error("no entity metadata found for table `{table}`")]
    MetadataNotFound {
        /// The physical table.
        table: String,
    },

    /// A stored value cannot be converted to its declared type.
    #[error("malformed value for field `{field}`: {value} ({reason})")]
    MalformedValue {
        /// The field being transformed.
        field: String,
        /// The offending value, rendered for display.
        value: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// A column cannot be retyped to its declared type.
    #[error("incompatible type change for `{table}`.`{column}`: cannot convert {from} to {to}")]
    IncompatibleTypeChange {
        /// The physical table.
        table: String,
        /// The column.
        column: String,
        /// The installed type.
        from: ScalarType,
        /// The declared type.
        to: ScalarType,
    },

    /// Storage error.
    #[error("storage error: {0}")]
    Storage(#[from] crate::error::Error),
}

impl MigrationError {
    /// Build a [`MigrationError::MalformedValue`].
    pub fn malformed(
        field: impl Into<String>,
        value: &crate::value::Value,
        reason: impl Into<String>,
    ) -> Self {
        MigrationError::MalformedValue {
            field: field.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}
