//! Catalog manager for storing and retrieving declared entity metadata.

use super::mapper::Mapper;
use super::{EntityDef, SchemaBundle};
use crate::error::Error;
use parking_lot::RwLock;
use sled::{Db, Tree};
use std::sync::atomic::{AtomicU64, Ordering};

/// Tree name for schema bundles.
const SCHEMA_TREE: &str = "catalog:schemas";

/// Tree name for catalog metadata.
const META_TREE: &str = "catalog:meta";

/// Key for current schema version in meta tree.
const CURRENT_VERSION_KEY: &[u8] = b"current_version";

/// The catalog of declared entity metadata.
pub struct Catalog {
    /// Schema bundles tree.
    schema_tree: Tree,
    /// Metadata tree.
    meta_tree: Tree,
    /// Current schema version (cached).
    current_version: AtomicU64,
    /// Current schema (cached).
    current_schema: RwLock<Option<SchemaBundle>>,
}

impl Catalog {
    /// Open or create a catalog using the given sled database.
    pub fn open(db: &Db) -> Result<Self, Error> {
        let schema_tree = db.open_tree(SCHEMA_TREE)?;
        let meta_tree = db.open_tree(META_TREE)?;

        let current_version = match meta_tree.get(CURRENT_VERSION_KEY)? {
            Some(bytes) => {
                let buf: [u8; 8] = bytes.as_ref().try_into().map_err(|_| Error::InvalidKey)?;
                u64::from_be_bytes(buf)
            }
            None => 0,
        };

        let catalog = Self {
            schema_tree,
            meta_tree,
            current_version: AtomicU64::new(current_version),
            current_schema: RwLock::new(None),
        };

        if current_version > 0 {
            if let Some(schema) = catalog.schema_at_version(current_version)? {
                *catalog.current_schema.write() = Some(schema);
            }
        }

        Ok(catalog)
    }

    /// Get the current schema version.
    pub fn current_version(&self) -> u64 {
        self.current_version.load(Ordering::SeqCst)
    }

    /// Get the current schema bundle.
    pub fn current_schema(&self) -> Option<SchemaBundle> {
        self.current_schema.read().clone()
    }

    /// Get a schema bundle at a specific version.
    pub fn schema_at_version(&self, version: u64) -> Result<Option<SchemaBundle>, Error> {
        match self.schema_tree.get(version.to_be_bytes())? {
            Some(bytes) => Ok(Some(SchemaBundle::from_bytes(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Apply a new schema bundle.
    ///
    /// The bundle is stored as the next version regardless of the version it
    /// carries. Returns the new version number.
    pub fn apply_schema(&self, mut bundle: SchemaBundle) -> Result<u64, Error> {
        let new_version = self.current_version() + 1;
        bundle.version = new_version;
        if bundle.created_at == 0 {
            bundle.created_at = crate::storage::key::current_timestamp();
        }

        self.schema_tree
            .insert(new_version.to_be_bytes(), bundle.to_bytes()?)?;
        self.meta_tree
            .insert(CURRENT_VERSION_KEY, &new_version.to_be_bytes())?;

        self.current_version.store(new_version, Ordering::SeqCst);
        *self.current_schema.write() = Some(bundle);

        tracing::info!(version = new_version, "declared schema applied");
        Ok(new_version)
    }

    /// Get an entity definition by name from the current schema.
    pub fn get_entity(&self, name: &str) -> Option<EntityDef> {
        self.current_schema
            .read()
            .as_ref()
            .and_then(|s| s.get_entity(name).cloned())
    }

    /// Flush pending writes to disk.
    pub fn flush(&self) -> Result<(), Error> {
        self.schema_tree.flush()?;
        self.meta_tree.flush()?;
        Ok(())
    }
}

impl Mapper for Catalog {
    fn resolve_class_name(&self, table: &str) -> Option<String> {
        self.current_schema
            .read()
            .as_ref()
            .and_then(|s| s.entity_for_table(table).map(|e| e.name.clone()))
    }

    fn class_metadata(&self, name: &str) -> Option<EntityDef> {
        self.get_entity(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{FieldDef, ScalarType};

    fn sample_schema() -> SchemaBundle {
        let user = EntityDef::new("User", "users")
            .with_field(FieldDef::new("id", ScalarType::Int64))
            .with_field(FieldDef::new("name", ScalarType::String))
            .with_field(FieldDef::new("active", ScalarType::Bool));

        let page = EntityDef::new("Page", "pages")
            .with_field(FieldDef::new("id", ScalarType::Int64))
            .with_field(FieldDef::new("title", ScalarType::String));

        SchemaBundle::new(0).with_entity(user).with_entity(page)
    }

    fn test_db() -> sled::Db {
        sled::Config::new().temporary(true).open().unwrap()
    }

    #[test]
    fn test_catalog_open_empty() {
        let db = test_db();
        let catalog = Catalog::open(&db).unwrap();

        assert_eq!(catalog.current_version(), 0);
        assert!(catalog.current_schema().is_none());
        assert!(catalog.resolve_class_name("users").is_none());
    }

    #[test]
    fn test_apply_schema() {
        let db = test_db();
        let catalog = Catalog::open(&db).unwrap();

        let version = catalog.apply_schema(sample_schema()).unwrap();

        assert_eq!(version, 1);
        assert_eq!(catalog.current_version(), 1);
        assert!(catalog.current_schema().is_some());
        assert!(catalog.get_entity("Page").is_some());
        assert!(catalog.get_entity("User").is_some());
    }

    #[test]
    fn test_mapper_lookups() {
        let db = test_db();
        let catalog = Catalog::open(&db).unwrap();
        catalog.apply_schema(sample_schema()).unwrap();

        assert_eq!(catalog.resolve_class_name("users").as_deref(), Some("User"));
        assert!(catalog.resolve_class_name("orphan_cache").is_none());
        assert_eq!(catalog.class_metadata("User").unwrap().table, "users");
        assert!(catalog.class_metadata("users").is_none());
    }

    #[test]
    fn test_schema_versioning() {
        let db = test_db();
        let catalog = Catalog::open(&db).unwrap();

        assert_eq!(catalog.apply_schema(sample_schema()).unwrap(), 1);

        let schema2 = sample_schema().with_entity(
            EntityDef::new("Comment", "comments")
                .with_field(FieldDef::new("id", ScalarType::Int64)),
        );
        assert_eq!(catalog.apply_schema(schema2).unwrap(), 2);

        let retrieved_v1 = catalog.schema_at_version(1).unwrap().unwrap();
        assert_eq!(retrieved_v1.entities.len(), 2);

        let retrieved_v2 = catalog.schema_at_version(2).unwrap().unwrap();
        assert_eq!(retrieved_v2.entities.len(), 3);
        assert!(catalog.schema_at_version(3).unwrap().is_none());
    }

    #[test]
    fn test_persistence() {
        let dir = tempfile::tempdir().unwrap();
        let config = sled::Config::new().path(dir.path());

        {
            let db = config.clone().open().unwrap();
            let catalog = Catalog::open(&db).unwrap();
            catalog.apply_schema(sample_schema()).unwrap();
            catalog.flush().unwrap();
        }

        {
            let db = config.open().unwrap();
            let catalog = Catalog::open(&db).unwrap();

            assert_eq!(catalog.current_version(), 1);
            assert_eq!(catalog.current_schema().unwrap().entities.len(), 2);
        }
    }
}
