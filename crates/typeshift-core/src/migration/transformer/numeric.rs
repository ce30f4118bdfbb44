use super::TypeTransformer;
use crate::catalog::ScalarType;
use crate::migration::error::MigrationError;
use crate::migration::field::Field;
use crate::value::Value;

/// Converts legacy strings, floats and other integer widths into the
/// declared integer width.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntegerTransformer;

/// Converts legacy strings and integers into floats.
#[derive(Debug, Clone, Copy, Default)]
pub struct FloatTransformer;

fn integer_of(field: &Field<'_>) -> Result<i64, MigrationError> {
    let value = field.value();
    let malformed = |reason: &str| MigrationError::malformed(field.name(), value, reason);

    match value {
        Value::Int32(i) => Ok(i64::from(*i)),
        Value::Int64(i) => Ok(*i),
        Value::Bool(b) => Ok(i64::from(*b)),
        // i64::MAX rounds up to 2^63 as f64, so the upper bound is exclusive.
        Value::Float64(f) if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64 => {
            Ok(*f as i64)
        }
        Value::Float64(f) if f.fract() == 0.0 => Err(malformed("out of range for int64")),
        Value::Float64(_) => Err(malformed("not an integral number")),
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| malformed("not an integer")),
        _ => Err(malformed("not convertible to an integer")),
    }
}

impl TypeTransformer for IntegerTransformer {
    fn name(&self) -> &str {
        "integer"
    }

    fn transform(&self, field: &mut Field<'_>) -> Result<(), MigrationError> {
        let target = field.metadata().field_type;
        if !matches!(target, ScalarType::Int32 | ScalarType::Int64) || target.is_canonical(field.value()) {
            return Ok(());
        }

        let n = integer_of(field)?;
        let converted = match target {
            ScalarType::Int32 => match i32::try_from(n) {
                Ok(n) => Value::Int32(n),
                Err(_) => {
                    return Err(MigrationError::malformed(
                        field.name(),
                        field.value(),
                        "out of range for int32",
                    ))
                }
            },
            _ => Value::Int64(n),
        };

        field.set_value(converted);
        Ok(())
    }
}

impl TypeTransformer for FloatTransformer {
    fn name(&self) -> &str {
        "float"
    }

    fn transform(&self, field: &mut Field<'_>) -> Result<(), MigrationError> {
        let meta = field.metadata();
        if meta.field_type != ScalarType::Float64 || meta.field_type.is_canonical(field.value()) {
            return Ok(());
        }

        let converted = match field.value() {
            Value::Int32(i) => f64::from(*i),
            Value::Int64(i) => *i as f64,
            Value::String(s) => match s.trim().parse::<f64>() {
                Ok(f) if f.is_finite() => f,
                _ => {
                    return Err(MigrationError::malformed(
                        field.name(),
                        field.value(),
                        "not a finite number",
                    ))
                }
            },
            other => {
                return Err(MigrationError::malformed(
                    field.name(),
                    other,
                    "not convertible to a float",
                ))
            }
        };

        field.set_value(Value::Float64(converted));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::FieldDef;
    use crate::storage::RowRecord;

    fn run(transformer: &dyn TypeTransformer, meta: &FieldDef, raw: Value) -> Result<Value, MigrationError> {
        let row = RowRecord::new().with(meta.name.clone(), raw);
        let mut field = Field::new(&row, meta);
        transformer.transform(&mut field)?;
        Ok(field.into_value())
    }

    #[test]
    fn test_integer_from_string() {
        let meta = FieldDef::new("age", ScalarType::Int64);
        assert_eq!(run(&IntegerTransformer, &meta, Value::String(" 42".into())).unwrap(), Value::Int64(42));
        assert_eq!(run(&IntegerTransformer, &meta, Value::Int32(-3)).unwrap(), Value::Int64(-3));
        assert_eq!(run(&IntegerTransformer, &meta, Value::Float64(8.0)).unwrap(), Value::Int64(8));
    }

    #[test]
    fn test_integer_narrowing() {
        let meta = FieldDef::new("age", ScalarType::Int32);
        assert_eq!(run(&IntegerTransformer, &meta, Value::Int64(7)).unwrap(), Value::Int32(7));
        assert!(matches!(
            run(&IntegerTransformer, &meta, Value::Int64(i64::MAX)),
            Err(MigrationError::MalformedValue { .. })
        ));
    }

    #[test]
    fn test_integer_malformed() {
        let meta = FieldDef::new("age", ScalarType::Int64);
        assert!(run(&IntegerTransformer, &meta, Value::String("forty".into())).is_err());
        assert!(run(&IntegerTransformer, &meta, Value::Float64(1.5)).is_err());
        assert!(run(&IntegerTransformer, &meta, Value::Bytes(vec![1])).is_err());
    }

    #[test]
    fn test_integer_from_float_out_of_range() {
        let meta = FieldDef::new("age", ScalarType::Int64);
        assert!(matches!(
            run(&IntegerTransformer, &meta, Value::Float64(9_223_372_036_854_775_808.0)),
            Err(MigrationError::MalformedValue { .. })
        ));
        assert!(run(&IntegerTransformer, &meta, Value::Float64(f64::INFINITY)).is_err());
        assert_eq!(
            run(&IntegerTransformer, &meta, Value::Float64(-9_223_372_036_854_775_808.0)).unwrap(),
            Value::Int64(i64::MIN)
        );
    }

    #[test]
    fn test_integer_null_untouched() {
        let meta = FieldDef::optional("age", ScalarType::Int64);
        assert_eq!(run(&IntegerTransformer, &meta, Value::Null).unwrap(), Value::Null);
    }

    #[test]
    fn test_float() {
        let meta = FieldDef::new("score", ScalarType::Float64);
        assert_eq!(run(&FloatTransformer, &meta, Value::String("2.5".into())).unwrap(), Value::Float64(2.5));
        assert_eq!(run(&FloatTransformer, &meta, Value::Int32(3)).unwrap(), Value::Float64(3.0));
        assert!(run(&FloatTransformer, &meta, Value::String("NaN".into())).is_err());
        assert!(run(&FloatTransformer, &meta, Value::Bool(true)).is_err());
    }
}
