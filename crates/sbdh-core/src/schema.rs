//! Arrow schema definitions for the tables an annotation run writes.

use arrow::datatypes::{DataType, Field, Schema};

use crate::fields::SbdhField;

/// Identifier column shared by the annotation, usage, and ground-truth tables.
pub const ROW_ID: &str = "row_id";

pub const PROMPT_TOKENS: &str = "prompt_tokens";
pub const COMPLETION_TOKENS: &str = "completion_tokens";
pub const TOTAL_TOKENS: &str = "total_tokens";

/// `row_id` followed by the eight field columns, all Utf8.
///
/// Values are kept as the raw tokens returned by the model.
pub fn annotation_schema() -> Schema {
    let mut fields = Vec::with_capacity(SbdhField::ALL.len() + 1);
    fields.push(Field::new(ROW_ID, DataType::Utf8, false));
    for field in SbdhField::ALL {
        fields.push(Field::new(field.name(), DataType::Utf8, false));
    }
    Schema::new(fields)
}

/// Token usage columns, optionally keyed by `row_id`.
pub fn usage_schema(with_row_id: bool) -> Schema {
    let mut fields = Vec::with_capacity(4);
    if with_row_id {
        fields.push(Field::new(ROW_ID, DataType::Utf8, false));
    }
    fields.push(Field::new(PROMPT_TOKENS, DataType::UInt64, false));
    fields.push(Field::new(COMPLETION_TOKENS, DataType::UInt64, false));
    fields.push(Field::new(TOTAL_TOKENS, DataType::UInt64, false));
    Schema::new(fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn annotation_schema_has_expected_fields() {
        let schema = annotation_schema();
        assert_eq!(schema.fields().len(), 9);
        assert_eq!(schema.field(0).name(), ROW_ID);
        assert_eq!(schema.field(8).name(), "behavior_drug");
        assert!(schema.field_with_name("sdoh_economics").is_ok());
    }

    #[test]
    fn usage_schema_optional_key() {
        assert_eq!(usage_schema(false).fields().len(), 3);
        let keyed = usage_schema(true);
        assert_eq!(keyed.fields().len(), 4);
        assert_eq!(keyed.field(0).name(), ROW_ID);
        assert_eq!(keyed.field(3).name(), TOTAL_TOKENS);
    }
}
