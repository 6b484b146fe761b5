pub mod fields;
pub mod normalize;
pub mod record;
pub mod schema;

pub use fields::{FIELD_COUNT, FieldValues, SbdhField, UnknownField, fallback_values};
pub use normalize::normalize_code;
pub use record::{AnnotationRecord, ClinicalNote, UsageRecord};
