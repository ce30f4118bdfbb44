//! Operator-facing result of a schema check or update.

use super::comparator::SchemaComparison;

/// Result of checking or updating the installed schema.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaCheck {
    applied: bool,
    responses: Vec<String>,
}

impl SchemaCheck {
    /// Describe pending changes without applying them.
    pub fn pending(comparison: &SchemaComparison) -> Self {
        let mut responses = Vec::new();
        for table in &comparison.creates {
            responses.push(format!("Table `{}` is not present.", table.name));
        }
        for alter in &comparison.alters {
            responses.push(format!(
                "Table `{}` is not the correct schema: {}.",
                alter.table, alter
            ));
        }
        for diff in comparison.type_changes() {
            responses.push(format!("Column {}, run the type migration.", diff));
        }

        Self {
            applied: false,
            responses,
        }
    }

    /// Record changes that were applied.
    pub fn applied(responses: Vec<String>) -> Self {
        Self {
            applied: true,
            responses,
        }
    }

    /// Human-readable descriptions of the pending or applied changes.
    pub fn response_strings(&self) -> &[String] {
        &self.responses
    }

    /// Whether the changes were applied.
    pub fn is_applied(&self) -> bool {
        self.applied
    }

    /// Whether anything is (or was) out of date.
    pub fn has_changes(&self) -> bool {
        !self.responses.is_empty()
    }
}
