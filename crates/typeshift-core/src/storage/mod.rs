//! Storage layer for typeshift.
//!
//! A sled-based physical store holding installed table definitions and
//! their rows.

mod config;
mod engine;
mod row;

pub mod key;

pub use config::StorageConfig;
pub use engine::StorageEngine;
pub use row::RowRecord;
