//! Field-level type transformers.
//!
//! A transformer inspects one [`Field`] against its declared metadata and
//! rewrites legacy representations into the canonical [`Value`] variant.
//! Transformers run in caller-supplied order on the same field and must be
//! idempotent: a canonical value is never rewritten.
//!
//! [`Value`]: crate::value::Value

mod boolean;
mod null;
mod numeric;
mod timestamp;

pub use boolean::BooleanTransformer;
pub use null::NullValueTransformer;
pub use numeric::{FloatTransformer, IntegerTransformer};
pub use timestamp::TimestampTransformer;

use super::error::MigrationError;
use super::field::Field;

/// One normalization unit of the transformer chain.
pub trait TypeTransformer: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Rewrite the field's value if it is not canonical.
    ///
    /// Returns [`MigrationError::MalformedValue`] for data that cannot be
    /// converted.
    fn transform(&self, field: &mut Field<'_>) -> Result<(), MigrationError>;
}

/// The standard chain: nulls first, then one transformer per target type.
pub fn default_transformers() -> Vec<Box<dyn TypeTransformer>> {
    vec![
        Box::new(NullValueTransformer),
        Box::new(BooleanTransformer),
        Box::new(IntegerTransformer),
        Box::new(FloatTransformer),
        Box::new(TimestampTransformer),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{FieldDef, ScalarType};
    use crate::storage::RowRecord;
    use crate::value::Value;

    fn run_chain(field: &mut Field<'_>) {
        for transformer in default_transformers() {
            transformer.transform(field).unwrap();
        }
    }

    #[test]
    fn test_chain_order() {
        let names: Vec<_> = default_transformers()
            .iter()
            .map(|t| t.name().to_string())
            .collect();
        assert_eq!(names, vec!["null", "boolean", "integer", "float", "timestamp"]);
    }

    #[test]
    fn test_chain_is_idempotent() {
        let cases = vec![
            (FieldDef::new("active", ScalarType::Bool), Value::String("yes".into())),
            (FieldDef::new("age", ScalarType::Int32), Value::String(" 42 ".into())),
            (FieldDef::new("score", ScalarType::Float64), Value::Int64(7)),
            (FieldDef::new("seen", ScalarType::Timestamp), Value::String("2020-01-02 03:04:05".into())),
            (FieldDef::optional("age", ScalarType::Int64), Value::String("".into())),
        ];

        for (meta, raw) in cases {
            let row = RowRecord::new().with(meta.name.clone(), raw);
            let mut first = Field::new(&row, &meta);
            run_chain(&mut first);
            assert!(first.has_changed(), "{} should change", meta.name);
            assert!(meta.field_type.is_canonical(first.value()));

            let normalized = RowRecord::new().with(meta.name.clone(), first.into_value());
            let mut second = Field::new(&normalized, &meta);
            run_chain(&mut second);
            assert!(!second.has_changed(), "{} changed twice", meta.name);
        }
    }

    #[test]
    fn test_chain_leaves_strings_alone() {
        let meta = FieldDef::new("name", ScalarType::String);
        let row = RowRecord::new().with("name", Value::String("".into()));
        let mut field = Field::new(&row, &meta);
        run_chain(&mut field);
        assert!(!field.has_changed());
    }
}
