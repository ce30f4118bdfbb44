use super::TypeTransformer;
use crate::catalog::ScalarType;
use crate::migration::error::MigrationError;
use crate::migration::field::Field;
use crate::value::Value;

/// Normalizes missing values.
///
/// An empty string in a nullable non-string field becomes NULL. A NULL in a
/// required field that declares a default becomes that default.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullValueTransformer;

impl TypeTransformer for NullValueTransformer {
    fn name(&self) -> &str {
        "null"
    }

    fn transform(&self, field: &mut Field<'_>) -> Result<(), MigrationError> {
        let meta = field.metadata();

        let replacement = match field.value() {
            Value::String(s)
                if s.trim().is_empty()
                    && meta.is_nullable()
                    && !matches!(meta.field_type, ScalarType::String | ScalarType::Bytes) =>
            {
                Some(Value::Null)
            }
            Value::Null if !meta.is_nullable() => meta.default.clone(),
            _ => None,
        };

        if let Some(value) = replacement {
            field.set_value(value);
        }

        Ok(())
    }
}
