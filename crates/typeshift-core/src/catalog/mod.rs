//! Declarative catalog for typeshift.
//!
//! The catalog stores the declared entity metadata (the expected schema) and
//! the physical table definitions it maps onto.

mod catalog;
mod entity;
mod field;
mod mapper;
mod schema;
mod table;
mod types;

pub use catalog::Catalog;
pub use entity::EntityDef;
pub use field::FieldDef;
pub use mapper::{Mapper, MetadataLookup};
pub use schema::SchemaBundle;
pub use table::{ColumnDef, TableDef};
pub use types::ScalarType;
