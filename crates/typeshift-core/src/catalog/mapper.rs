//! Table to entity metadata resolution.

use super::EntityDef;

/// Source of declared entity metadata, keyed by class (entity) name.
pub trait Mapper {
    /// Resolve the entity name mapped onto a physical table.
    fn resolve_class_name(&self, table: &str) -> Option<String>;

    /// Get the metadata of an entity by name.
    fn class_metadata(&self, name: &str) -> Option<EntityDef>;
}

/// Outcome of resolving the metadata for a physical table.
#[derive(Debug, Clone, PartialEq)]
pub enum MetadataLookup {
    /// Metadata was found.
    Found(EntityDef),
    /// Neither the resolved class name nor the raw table name had metadata.
    NotFound,
}

impl MetadataLookup {
    /// Resolve metadata for `table`.
    ///
    /// The class name resolved for the table is tried first, then the raw
    /// table name as a class name. Metadata is only accepted when it maps
    /// onto `table` itself.
    pub fn resolve(mapper: &dyn Mapper, table: &str) -> Self {
        let by_class = mapper
            .resolve_class_name(table)
            .and_then(|class| mapper.class_metadata(&class));

        let entity = by_class
            .or_else(|| mapper.class_metadata(table))
            .filter(|entity| entity.table == table);

        match entity {
            Some(entity) => MetadataLookup::Found(entity),
            None => MetadataLookup::NotFound,
        }
    }

    /// Convert into an option.
    pub fn found(self) -> Option<EntityDef> {
        match self {
            MetadataLookup::Found(entity) => Some(entity),
            MetadataLookup::NotFound => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct StaticMapper {
        classes: HashMap<String, String>,
        metadata: HashMap<String, EntityDef>,
    }

    impl Mapper for StaticMapper {
        fn resolve_class_name(&self, table: &str) -> Option<String> {
            self.classes.get(table).cloned()
        }

        fn class_metadata(&self, name: &str) -> Option<EntityDef> {
            self.metadata.get(name).cloned()
        }
    }

    fn mapper() -> StaticMapper {
        let mut classes = HashMap::new();
        classes.insert("users".to_string(), "User".to_string());
        classes.insert("ghosts".to_string(), "Ghost".to_string());

        let mut metadata = HashMap::new();
        metadata.insert("User".to_string(), EntityDef::new("User", "users"));
        metadata.insert("pages".to_string(), EntityDef::new("pages", "pages"));
        metadata.insert("users_archive".to_string(), EntityDef::new("users_archive", "members"));

        StaticMapper { classes, metadata }
    }

    #[test]
    fn test_resolve_by_class_name() {
        let found = MetadataLookup::resolve(&mapper(), "users").found().unwrap();
        assert_eq!(found.name, "User");
    }

    #[test]
    fn test_fallback_to_table_name() {
        let found = MetadataLookup::resolve(&mapper(), "pages").found().unwrap();
        assert_eq!(found.name, "pages");
    }

    #[test]
    fn test_fallback_rejects_entity_on_other_table() {
        assert_eq!(
            MetadataLookup::resolve(&mapper(), "users_archive"),
            MetadataLookup::NotFound
        );
    }

    #[test]
    fn test_not_found() {
        assert_eq!(
            MetadataLookup::resolve(&mapper(), "ghosts"),
            MetadataLookup::NotFound
        );
        assert_eq!(
            MetadataLookup::resolve(&mapper(), "orphan_cache"),
            MetadataLookup::NotFound
        );
    }
}
