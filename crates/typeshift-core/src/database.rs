//! Database wrapper combining the storage engine and the catalog.

use crate::catalog::{Catalog, SchemaBundle};
use crate::entity::EntityManager;
use crate::error::Error;
use crate::schema::SchemaManager;
use crate::storage::{StorageConfig, StorageEngine};
use std::path::Path;

/// An opened typeshift data directory.
///
/// Rows and installed tables live in `<data>/storage`, the declared schema
/// in a separate sled instance at `<data>/catalog`.
pub struct Database {
    storage: StorageEngine,
    catalog: Catalog,
    /// Keep the sled::Db handle alive for the catalog.
    _catalog_db: sled::Db,
}

impl Database {
    /// Open or create a database under `data_path`.
    pub fn open(data_path: &Path) -> Result<Self, Error> {
        std::fs::create_dir_all(data_path)?;

        let storage = StorageEngine::open(StorageConfig::new(data_path.join("storage")))?;
        let catalog_db = sled::open(data_path.join("catalog"))?;
        let catalog = Catalog::open(&catalog_db)?;

        tracing::info!(
            path = %data_path.display(),
            schema_version = catalog.current_version(),
            recovered = storage.was_recovered(),
            "database opened"
        );

        Ok(Self {
            storage,
            catalog,
            _catalog_db: catalog_db,
        })
    }

    /// Open a throwaway in-memory database.
    pub fn open_temporary() -> Result<Self, Error> {
        let storage = StorageEngine::open(StorageConfig::temporary())?;
        let catalog_db = sled::Config::new().temporary(true).open()?;
        let catalog = Catalog::open(&catalog_db)?;

        Ok(Self {
            storage,
            catalog,
            _catalog_db: catalog_db,
        })
    }

    /// Get a reference to the storage engine.
    pub fn storage(&self) -> &StorageEngine {
        &self.storage
    }

    /// Get a reference to the catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Entity store over this database.
    pub fn entities(&self) -> EntityManager<'_> {
        EntityManager::new(&self.storage, &self.catalog)
    }

    /// Schema manager over this database.
    pub fn schema(&self) -> SchemaManager<'_> {
        SchemaManager::new(&self.storage, &self.catalog)
    }

    /// Apply a declared schema bundle. Returns the new version.
    pub fn load_schema(&self, bundle: SchemaBundle) -> Result<u64, Error> {
        let version = self.catalog.apply_schema(bundle)?;
        self.catalog.flush()?;
        Ok(version)
    }

    /// Get the current schema version.
    pub fn schema_version(&self) -> u64 {
        self.catalog.current_version()
    }

    /// Flush all pending writes to disk.
    pub fn flush(&self) -> Result<(), Error> {
        self.storage.flush()?;
        self.catalog.flush()
    }
}
