//! Core error types.

use thiserror::Error;

/// Core store errors.
#[derive(Debug, Error)]
pub enum Error {
    /// Storage layer error.
    #[error("storage error: {0}")]
    Storage(#[from] sled::Error),

    /// Filesystem error while preparing the data directory.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Deserialization error.
    #[error("deserialization error: {0}")]
    Deserialization(String),

    /// Row key decoding error.
    #[error("invalid key format")]
    InvalidKey,

    /// The table is not installed.
    #[error("table not found: {0}")]
    TableNotFound(String),

    /// The table is already installed.
    #[error("table already exists: {0}")]
    TableExists(String),

    /// No row exists for the given primary id.
    #[error("entity {id} not found in table {table}")]
    EntityNotFound {
        /// Table that was searched.
        table: String,
        /// Primary id that could not be resolved.
        id: u64,
    },

    /// Invalid data format.
    #[error("invalid data: {0}")]
    InvalidData(String),
}
