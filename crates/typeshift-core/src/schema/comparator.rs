//! Schema comparison algorithm.
//!
//! Compares the installed tables against the tables the declared schema
//! expects and produces creates, alters and the low-level column diffs that
//! underlie them.

use crate::catalog::{ColumnDef, ScalarType, TableDef};
use crate::value::Value;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Result of comparing installed and expected schemas.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaComparison {
    /// Tables that must be created.
    pub creates: Vec<TableDef>,
    /// Column-level changes to existing tables, one entry per table.
    pub alters: Vec<TableAlter>,
    /// Every column difference found on existing tables.
    pub diffs: Vec<ColumnDiff>,
}

impl SchemaComparison {
    /// Check if structural DDL is required.
    pub fn is_empty(&self) -> bool {
        self.creates.is_empty() && self.alters.is_empty()
    }

    /// Total number of structural changes.
    pub fn change_count(&self) -> usize {
        self.creates.len() + self.alters.len()
    }

    /// Column type differences, which the schema processor resolves rather
    /// than the DDL update.
    pub fn type_changes(&self) -> impl Iterator<Item = &ColumnDiff> {
        self.diffs
            .iter()
            .filter(|d| matches!(d, ColumnDiff::TypeChanged { .. }))
    }
}

/// Column changes for one existing table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableAlter {
    /// Table name.
    pub table: String,
    /// Columns to add.
    pub added_columns: Vec<ColumnDef>,
    /// Existing columns whose nullability or default changes. The installed
    /// column type is kept.
    pub changed_columns: Vec<ColumnDef>,
}

impl fmt::Display for TableAlter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        for column in &self.added_columns {
            parts.push(format!("missing column `{}`", column.name));
        }
        for column in &self.changed_columns {
            parts.push(format!("column `{}` has changed", column.name));
        }
        write!(f, "{}", parts.join(", "))
    }
}

/// A single column difference between installed and expected tables.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnDiff {
    /// Column expected but not installed.
    Added {
        /// Table name.
        table: String,
        /// Column name.
        column: String,
    },
    /// Column installed but no longer declared. Never dropped.
    Removed {
        /// Table name.
        table: String,
        /// Column name.
        column: String,
    },
    /// Installed storage type differs from the declared type.
    TypeChanged {
        /// Table name.
        table: String,
        /// Column name.
        column: String,
        /// Installed type.
        from: ScalarType,
        /// Declared type.
        to: ScalarType,
    },
    /// Nullability differs.
    NullabilityChanged {
        /// Table name.
        table: String,
        /// Column name.
        column: String,
        /// Installed nullability.
        from: bool,
        /// Declared nullability.
        to: bool,
    },
    /// Default value differs.
    DefaultChanged {
        /// Table name.
        table: String,
        /// Column name.
        column: String,
        /// Installed default.
        from: Option<Value>,
        /// Declared default.
        to: Option<Value>,
    },
}

fn describe_default(value: &Option<Value>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "none".to_string(),
    }
}

impl fmt::Display for ColumnDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnDiff::Added { table, column } => {
                write!(f, "`{}`.`{}` is missing", table, column)
            }
            ColumnDiff::Removed { table, column } => {
                write!(f, "`{}`.`{}` is no longer declared", table, column)
            }
            ColumnDiff::TypeChanged {
                table,
                column,
                from,
                to,
            } => write!(
                f,
                "`{}`.`{}` is stored as {} but declared as {}",
                table, column, from, to
            ),
            ColumnDiff::NullabilityChanged {
                table,
                column,
                to,
                ..
            } => write!(
                f,
                "`{}`.`{}` should be {}",
                table,
                column,
                if *to { "nullable" } else { "not null" }
            ),
            ColumnDiff::DefaultChanged {
                table,
                column,
                from,
                to,
            } => write!(
                f,
                "`{}`.`{}` default changes from {} to {}",
                table,
                column,
                describe_default(from),
                describe_default(to)
            ),
        }
    }
}

/// Computes [`SchemaComparison`]s.
pub struct SchemaComparator;

impl SchemaComparator {
    /// Compare the installed tables against the expected tables.
    ///
    /// Installed tables that are not expected are ignored: they are foreign
    /// to the managed schema.
    pub fn compare(installed: &[TableDef], expected: &[TableDef]) -> SchemaComparison {
        let installed_map: HashMap<_, _> = installed.iter().map(|t| (t.name.as_str(), t)).collect();
        let mut comparison = SchemaComparison::default();

        for table in expected {
            match installed_map.get(table.name.as_str()) {
                None => comparison.creates.push(table.clone()),
                Some(current) => {
                    let (alter, diffs) = Self::diff_columns(current, table);
                    comparison.diffs.extend(diffs);
                    if let Some(alter) = alter {
                        comparison.alters.push(alter);
                    }
                }
            }
        }

        comparison
    }

    fn diff_columns(installed: &TableDef, expected: &TableDef) -> (Option<TableAlter>, Vec<ColumnDiff>) {
        let table = expected.name.clone();
        let mut diffs = Vec::new();
        let mut added_columns = Vec::new();
        let mut changed_columns = Vec::new();

        for column in &expected.columns {
            let Some(current) = installed.get_column(&column.name) else {
                diffs.push(ColumnDiff::Added {
                    table: table.clone(),
                    column: column.name.clone(),
                });
                added_columns.push(column.clone());
                continue;
            };

            if current.column_type != column.column_type {
                diffs.push(ColumnDiff::TypeChanged {
                    table: table.clone(),
                    column: column.name.clone(),
                    from: current.column_type,
                    to: column.column_type,
                });
            }

            let mut changed = false;
            if current.nullable != column.nullable {
                diffs.push(ColumnDiff::NullabilityChanged {
                    table: table.clone(),
                    column: column.name.clone(),
                    from: current.nullable,
                    to: column.nullable,
                });
                changed = true;
            }

            if current.default != column.default {
                diffs.push(ColumnDiff::DefaultChanged {
                    table: table.clone(),
                    column: column.name.clone(),
                    from: current.default.clone(),
                    to: column.default.clone(),
                });
                changed = true;
            }

            if changed {
                changed_columns.push(ColumnDef {
                    column_type: current.column_type,
                    ..column.clone()
                });
            }
        }

        let expected_names: HashSet<_> = expected.columns.iter().map(|c| c.name.as_str()).collect();
        for column in &installed.columns {
            if !expected_names.contains(column.name.as_str()) {
                diffs.push(ColumnDiff::Removed {
                    table: table.clone(),
                    column: column.name.clone(),
                });
            }
        }

        let alter = if added_columns.is_empty() && changed_columns.is_empty() {
            None
        } else {
            Some(TableAlter {
                table,
                added_columns,
                changed_columns,
            })
        };

        (alter, diffs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn users_installed() -> TableDef {
        TableDef::new("users")
            .with_column(ColumnDef::new("id", ScalarType::Int64))
            .with_column(ColumnDef::new("active", ScalarType::String))
            .with_column(ColumnDef::new("legacy_flag", ScalarType::String))
    }

    fn users_expected() -> TableDef {
        TableDef::new("users")
            .with_column(ColumnDef::new("id", ScalarType::Int64))
            .with_column(ColumnDef::new("active", ScalarType::Bool))
            .with_column(ColumnDef::new("email", ScalarType::String).nullable())
    }

    #[test]
    fn test_identical_schemas() {
        let tables = vec![users_expected()];
        let comparison = SchemaComparator::compare(&tables, &tables);
        assert!(comparison.is_empty());
        assert!(comparison.diffs.is_empty());
    }

    #[test]
    fn test_missing_table_is_create() {
        let comparison = SchemaComparator::compare(&[], &[users_expected()]);
        assert_eq!(comparison.creates.len(), 1);
        assert!(comparison.alters.is_empty());
        assert!(comparison.diffs.is_empty());
    }

    #[test]
    fn test_foreign_tables_ignored() {
        let installed = vec![users_expected(), TableDef::new("orphan_cache")];
        let comparison = SchemaComparator::compare(&installed, &[users_expected()]);
        assert!(comparison.is_empty());
    }

    #[test]
    fn test_column_diffs() {
        let comparison = SchemaComparator::compare(&[users_installed()], &[users_expected()]);

        assert!(comparison.creates.is_empty());
        assert_eq!(comparison.alters.len(), 1);

        let alter = &comparison.alters[0];
        assert_eq!(alter.table, "users");
        assert_eq!(alter.added_columns.len(), 1);
        assert_eq!(alter.added_columns[0].name, "email");
        assert!(alter.changed_columns.is_empty());

        assert_eq!(comparison.diffs.len(), 3);
        assert_eq!(comparison.type_changes().count(), 1);
        assert!(comparison
            .diffs
            .iter()
            .any(|d| matches!(d, ColumnDiff::Removed { column, .. } if column == "legacy_flag")));
    }

    #[test]
    fn test_type_change_alone_is_not_an_alter() {
        let installed = TableDef::new("users")
            .with_column(ColumnDef::new("active", ScalarType::String));
        let expected = TableDef::new("users")
            .with_column(ColumnDef::new("active", ScalarType::Bool));

        let comparison = SchemaComparator::compare(&[installed], &[expected]);
        assert!(comparison.is_empty());
        assert_eq!(comparison.diffs.len(), 1);
        assert_eq!(
            comparison.diffs[0].to_string(),
            "`users`.`active` is stored as string but declared as bool"
        );
    }

    #[test]
    fn test_nullability_and_default_keep_installed_type() {
        let installed = TableDef::new("users")
            .with_column(ColumnDef::new("active", ScalarType::String));
        let expected = TableDef::new("users").with_column(
            ColumnDef::new("active", ScalarType::Bool)
                .nullable()
                .with_default(Value::Bool(false)),
        );

        let comparison = SchemaComparator::compare(&[installed], &[expected]);
        let changed = &comparison.alters[0].changed_columns[0];
        assert_eq!(changed.column_type, ScalarType::String);
        assert!(changed.nullable);
        assert_eq!(changed.default, Some(Value::Bool(false)));
        assert_eq!(comparison.diffs.len(), 3);
    }
}
