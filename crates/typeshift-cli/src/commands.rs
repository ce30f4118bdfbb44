//! Command handlers.
//!
//! Each handler writes operator-facing output to `out` and asks questions
//! through a [`Prompt`], so the flows run the same on a terminal and in
//! tests.

use crate::error::CliError;
use crate::formatter::{self, OutputFormat};
use crate::prompt::Prompt;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use typeshift_core::migration::{
    default_transformers, MigrationLogger, ProcessorConfig, SchemaProcessor,
    TableRecordsProcessor, TracingLogger,
};
use typeshift_core::schema::SchemaAuthority;
use typeshift_core::{Database, RowRecord, SchemaBundle};

/// Options of the `type-migrate` command.
#[derive(Debug, Clone)]
pub struct MigrateOptions {
    /// Rows fetched per page.
    pub page_size: usize,
    /// Output format for the results.
    pub format: OutputFormat,
}

/// Apply a declared schema bundle read from `file`.
pub fn schema_load(db: &Database, file: &Path, out: &mut dyn Write) -> Result<(), CliError> {
    let json = std::fs::read_to_string(file)?;
    let bundle = SchemaBundle::from_json(&json)?;
    let entities = bundle.entities.len();
    let version = db.load_schema(bundle)?;

    writeln!(
        out,
        "Loaded schema version {} with {} entities.",
        version, entities
    )?;
    Ok(())
}

/// Insert raw rows read from `file` into `table`.
pub fn import(db: &Database, table: &str, file: &Path, out: &mut dyn Write) -> Result<(), CliError> {
    let json: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(file)?)?;
    let rows = json
        .as_array()
        .ok_or_else(|| CliError::InvalidInput("expected a JSON array of row objects".into()))?;

    let entities = db.entities();
    for row in rows {
        entities.insert_row(table, &RowRecord::from_json(row)?)?;
    }
    db.flush()?;

    tracing::info!(table, rows = rows.len(), "rows imported");
    writeln!(out, "Imported {} rows into `{}`.", rows.len(), table)?;
    Ok(())
}

/// Show pending schema changes.
pub fn check(db: &Database, out: &mut dyn Write) -> Result<(), CliError> {
    let check = db.schema().check()?;

    if !check.has_changes() {
        formatter::success(out, "Your database is already up to date.")?;
        return Ok(());
    }

    formatter::note(out, "Modifications needed")?;
    formatter::listing(out, check.response_strings())?;
    Ok(())
}

/// Apply pending schema changes after confirmation.
///
/// Returns `false` when the operator declined.
pub fn update(db: &Database, prompt: &dyn Prompt, out: &mut dyn Write) -> Result<bool, CliError> {
    formatter::title(out, "Database Schema Update")?;

    let schema = db.schema();
    if schema.compare()?.is_empty() {
        formatter::success(out, "Your database is already up to date.")?;
        return Ok(true);
    }

    if !prompt.confirm("Would you like to continue with the update")? {
        return Ok(false);
    }

    let response = schema.update()?;
    formatter::note(out, "Modifications made to the database")?;
    formatter::listing(out, response.response_strings())?;
    formatter::success(out, "Your database is now up to date.")?;
    Ok(true)
}

/// Update the schema, then migrate stored values to their declared types.
///
/// Returns `false` when the schema update was declined. Declining the data
/// migration itself aborts it without failing.
pub fn type_migrate(
    db: &Database,
    prompt: &dyn Prompt,
    options: &MigrateOptions,
    out: &mut dyn Write,
) -> Result<bool, CliError> {
    if !update(db, prompt, out)? {
        return Ok(false);
    }

    formatter::title(out, "Performing database data type migration")?;
    if !prompt.confirm("Would you like to continue with the migration")? {
        formatter::note(out, "Aborting migration")?;
        return Ok(true);
    }

    let logger: Arc<dyn MigrationLogger> = Arc::new(TracingLogger);
    let entities = db.entities();
    let schema = db.schema();

    let changes = SchemaProcessor::new(&entities, &schema)
        .with_logger(logger.clone())
        .transform()?;
    let retyped: usize = changes.values().map(Vec::len).sum();
    tracing::debug!(columns = retyped, "columns retyped");

    let results = TableRecordsProcessor::new(&entities, &schema, default_transformers())
        .with_config(ProcessorConfig::default().with_max_results(options.page_size))
        .with_logger(logger)
        .transform()?;
    db.flush()?;

    formatter::success(out, "Data processing complete")?;
    writeln!(out, "{}", formatter::format_results(&results, options.format)?)?;

    let pending = schema.compare()?;
    if pending.type_changes().next().is_some() {
        tracing::warn!("column types still differ from the declared schema");
    }

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::FixedAnswer;
    use std::cell::RefCell;
    use typeshift_core::{ScalarType, Value};

    /// Records the questions asked and answers them from a script.
    struct ScriptedPrompt {
        answers: RefCell<Vec<bool>>,
        asked: RefCell<Vec<String>>,
    }

    impl ScriptedPrompt {
        fn new(answers: &[bool]) -> Self {
            Self {
                answers: RefCell::new(answers.iter().rev().copied().collect()),
                asked: RefCell::new(Vec::new()),
            }
        }
    }

    impl Prompt for ScriptedPrompt {
        fn confirm(&self, question: &str) -> Result<bool, CliError> {
            self.asked.borrow_mut().push(question.to_string());
            Ok(self.answers.borrow_mut().pop().unwrap_or(false))
        }
    }

    const SCHEMA: &str = r#"{
        "entities": {
            "User": {
                "name": "User",
                "table": "users",
                "fields": [
                    {"name": "id", "type": "int64"},
                    {"name": "active", "type": "bool"}
                ]
            }
        }
    }"#;

    fn write_file(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    /// A database with `users.active` stored as strings.
    fn legacy_db(dir: &tempfile::TempDir) -> Database {
        let db = Database::open(&dir.path().join("data")).unwrap();
        let mut out = Vec::new();

        schema_load(&db, &write_file(dir, "schema.json", SCHEMA), &mut out).unwrap();
        update(&db, &FixedAnswer(true), &mut out).unwrap();
        db.schema()
            .apply_column(
                "users",
                typeshift_core::ColumnDef::new("active", ScalarType::String),
            )
            .unwrap();

        let rows = r#"[{"id": 1, "active": "1"}, {"id": 2, "active": "0"}, {"id": 3, "active": "yes"}]"#;
        import(&db, "users", &write_file(dir, "users.json", rows), &mut out).unwrap();
        db
    }

    #[test]
    fn test_schema_load_and_check() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open(&dir.path().join("data")).unwrap();
        let mut out = Vec::new();

        schema_load(&db, &write_file(&dir, "schema.json", SCHEMA), &mut out).unwrap();
        check(&db, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Loaded schema version 1 with 1 entities."));
        assert!(text.contains(" * Table `users` is not present."));
    }

    #[test]
    fn test_update_declined() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open(&dir.path().join("data")).unwrap();
        let mut out = Vec::new();
        schema_load(&db, &write_file(&dir, "schema.json", SCHEMA), &mut out).unwrap();

        let prompt = ScriptedPrompt::new(&[false]);
        assert!(!update(&db, &prompt, &mut out).unwrap());
        assert!(db.storage().table("users").unwrap().is_none());
        assert_eq!(
            *prompt.asked.borrow(),
            vec!["Would you like to continue with the update".to_string()]
        );
    }

    #[test]
    fn test_update_lists_changes() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open(&dir.path().join("data")).unwrap();
        let mut out = Vec::new();
        schema_load(&db, &write_file(&dir, "schema.json", SCHEMA), &mut out).unwrap();

        assert!(update(&db, &FixedAnswer(true), &mut out).unwrap());
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains(" * Created table `users`."));
        assert!(text.contains("Your database is now up to date."));
    }

    #[test]
    fn test_type_migrate() {
        let dir = tempfile::tempdir().unwrap();
        let db = legacy_db(&dir);
        let mut out = Vec::new();
        let options = MigrateOptions {
            page_size: 2,
            format: OutputFormat::Json,
        };

        assert!(type_migrate(&db, &FixedAnswer(true), &options, &mut out).unwrap());

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Data processing complete"));
        assert!(text.contains("\"record_count\": 3"));
        assert!(text.contains("\"field_count\": 3"));

        let row = db.storage().get_row("users", 3).unwrap().unwrap();
        assert_eq!(row.get("active"), Some(&Value::Bool(true)));
        assert_eq!(
            db.storage().table("users").unwrap().unwrap().get_column("active").unwrap().column_type,
            ScalarType::Bool
        );
    }

    #[test]
    fn test_type_migrate_aborted() {
        let dir = tempfile::tempdir().unwrap();
        let db = legacy_db(&dir);
        let mut out = Vec::new();
        let options = MigrateOptions {
            page_size: 10,
            format: OutputFormat::Table,
        };

        let prompt = ScriptedPrompt::new(&[false]);
        assert!(type_migrate(&db, &prompt, &options, &mut out).unwrap());

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Aborting migration"));
        let row = db.storage().get_row("users", 1).unwrap().unwrap();
        assert_eq!(row.get("active"), Some(&Value::String("1".into())));
    }

    #[test]
    fn test_import_rejects_non_array() {
        let dir = tempfile::tempdir().unwrap();
        let db = legacy_db(&dir);
        let mut out = Vec::new();

        let err = import(&db, "users", &write_file(&dir, "bad.json", "{}"), &mut out).unwrap_err();
        assert!(matches!(err, CliError::InvalidInput(_)));
    }
}
