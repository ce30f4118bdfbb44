//! Mutable per-column view used by the transformer chain.

use crate::catalog::FieldDef;
use crate::storage::RowRecord;
use crate::value::Value;

/// One row's value for one declared field.
///
/// A column absent from the row reads as [`Value::Null`]. Transformers call
/// [`Field::set_value`]; the field is changed once its latest value differs
/// from the raw one.
#[derive(Debug, Clone)]
pub struct Field<'a> {
    metadata: &'a FieldDef,
    raw: Value,
    value: Option<Value>,
}

impl<'a> Field<'a> {
    /// Bind the raw value of `metadata`'s column in `row`.
    pub fn new(row: &RowRecord, metadata: &'a FieldDef) -> Self {
        Self {
            metadata,
            raw: row.get(&metadata.name).cloned().unwrap_or(Value::Null),
            value: None,
        }
    }

    /// Field name.
    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    /// Latest value: the new value if one was set, otherwise the raw value.
    pub fn value(&self) -> &Value {
        self.value.as_ref().unwrap_or(&self.raw)
    }

    /// The value as read from the row.
    pub fn raw_value(&self) -> &Value {
        &self.raw
    }

    /// Declared metadata.
    pub fn metadata(&self) -> &'a FieldDef {
        self.metadata
    }

    /// Whether the latest value differs from the raw value.
    pub fn has_changed(&self) -> bool {
        self.value.as_ref().is_some_and(|v| *v != self.raw)
    }

    /// Replace the latest value.
    pub fn set_value(&mut self, value: Value) {
        self.value = Some(value);
    }

    /// Consume the field, yielding its latest value.
    pub fn into_value(self) -> Value {
        self.value.unwrap_or(self.raw)
    }
}
