use super::TypeTransformer;
use crate::catalog::ScalarType;
use crate::migration::error::MigrationError;
use crate::migration::field::Field;
use crate::value::Value;

/// Converts legacy integer and string flags into booleans.
#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanTransformer;

fn parse_token(token: &str) -> Option<bool> {
    match token.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" | "y" => Some(true),
        "0" | "false" | "no" | "off" | "n" => Some(false),
        _ => None,
    }
}

impl TypeTransformer for BooleanTransformer {
    fn name(&self) -> &str {
        "boolean"
    }

    fn transform(&self, field: &mut Field<'_>) -> Result<(), MigrationError> {
        let meta = field.metadata();
        if meta.field_type != ScalarType::Bool {
            return Ok(());
        }

        let converted = match field.value() {
            Value::Null | Value::Bool(_) => return Ok(()),
            Value::String(s) if s.trim().is_empty() => {
                if meta.is_nullable() {
                    Value::Null
                } else {
                    Value::Bool(false)
                }
            }
            Value::String(s) => match parse_token(s) {
                Some(b) => Value::Bool(b),
                None => {
                    return Err(MigrationError::malformed(
                        field.name(),
                        field.value(),
                        "not a boolean token",
                    ))
                }
            },
            value => match value.as_i64() {
                Some(0) => Value::Bool(false),
                Some(1) => Value::Bool(true),
                _ => {
                    return Err(MigrationError::malformed(
                        field.name(),
                        value,
                        "expected 0 or 1",
                    ))
                }
            },
        };

        field.set_value(converted);
        Ok(())
    }
}
