//! Console output helpers and result formatters.

use clap::ValueEnum;
use comfy_table::{CellAlignment, Table};
use std::collections::BTreeMap;
use std::io::{self, Write};
use typeshift_core::migration::TableResult;

/// Output format for migration results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// ASCII table format
    Table,
    /// JSON format
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Format per-table migration results.
pub fn format_results(
    results: &BTreeMap<String, TableResult>,
    format: OutputFormat,
) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Table => Ok(results_table(results)),
        OutputFormat::Json => {
            let rows: Vec<&TableResult> = results.values().collect();
            serde_json::to_string_pretty(&rows)
        }
    }
}

fn results_table(results: &BTreeMap<String, TableResult>) -> String {
    let mut table = Table::new();
    table.set_header(vec!["Table", "Records Processed", "Fields Updated"]);

    for result in results.values() {
        table.add_row(vec![
            result.table_name().to_string(),
            result.record_count().to_string(),
            result.field_count().to_string(),
        ]);
    }

    for index in [1, 2] {
        if let Some(column) = table.column_mut(index) {
            column.set_cell_alignment(CellAlignment::Right);
        }
    }

    table.to_string()
}

/// Section title, underlined.
pub fn title(out: &mut dyn Write, text: &str) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", text)?;
    writeln!(out, "{}", "=".repeat(text.chars().count()))?;
    writeln!(out)
}

/// Bulleted list.
pub fn listing(out: &mut dyn Write, items: &[String]) -> io::Result<()> {
    for item in items {
        writeln!(out, " * {}", item)?;
    }
    writeln!(out)
}

/// Highlighted note.
pub fn note(out: &mut dyn Write, text: &str) -> io::Result<()> {
    writeln!(out, " ! [NOTE] {}", text)?;
    writeln!(out)
}

/// Success message.
pub fn success(out: &mut dyn Write, text: &str) -> io::Result<()> {
    writeln!(out, " [OK] {}", text)?;
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn results() -> BTreeMap<String, TableResult> {
        let mut users = TableResult::new("users", true);
        for _ in 0..3 {
            users.add_record();
            users.add_field();
        }
        let pages = TableResult::new("pages", true);

        let mut map = BTreeMap::new();
        map.insert("users".to_string(), users);
        map.insert("pages".to_string(), pages);
        map
    }

    #[test]
    fn test_table_format() {
        let output = format_results(&results(), OutputFormat::Table).unwrap();
        assert!(output.contains("Records Processed"));
        assert!(output.contains("Fields Updated"));
        assert!(output.contains("users"));

        let pages_line = output.lines().find(|l| l.contains("pages")).unwrap();
        assert!(pages_line.contains(" 0 "));
    }

    #[test]
    fn test_json_format() {
        let output = format_results(&results(), OutputFormat::Json).unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(json[0]["table_name"], "pages");
        assert_eq!(json[1]["record_count"], 3);
        assert_eq!(json[1]["field_count"], 3);
    }

    #[test]
    fn test_title_underline() {
        let mut out = Vec::new();
        title(&mut out, "Database Schema Update").unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Database Schema Update\n======================\n"));
    }
}
