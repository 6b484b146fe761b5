//! Records flowing through an annotation run.

use std::iter::Sum;
use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

use crate::fields::{FieldValues, SbdhField};

/// A clinical note read from the input table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClinicalNote {
    /// Row identifier, rendered as text whatever the source column type.
    pub row_id: String,
    pub text: String,
}

/// The eight field values produced for one note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationRecord {
    pub row_id: String,
    pub values: FieldValues,
}

impl AnnotationRecord {
    pub fn new(row_id: impl Into<String>, values: FieldValues) -> Self {
        Self {
            row_id: row_id.into(),
            values,
        }
    }

    pub fn value(&self, field: SbdhField) -> &str {
        &self.values[field.index()]
    }
}

/// Token accounting for one provider call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageRecord {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub total_tokens: u64,
}

impl UsageRecord {
    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}

impl Add for UsageRecord {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            prompt_tokens: self.prompt_tokens.saturating_add(rhs.prompt_tokens),
            completion_tokens: self.completion_tokens.saturating_add(rhs.completion_tokens),
            total_tokens: self.total_tokens.saturating_add(rhs.total_tokens),
        }
    }
}

impl AddAssign for UsageRecord {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<'a> Sum<&'a UsageRecord> for UsageRecord {
    fn sum<I: Iterator<Item = &'a UsageRecord>>(iter: I) -> Self {
        iter.fold(Self::default(), |acc, u| acc + *u)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::fallback_values;

    #[test]
    fn value_by_field() {
        let values = ["0", "1", "1", "2", "0", "3", "1", "4"].map(String::from);
        let record = AnnotationRecord::new("42", values);
        assert_eq!(record.value(SbdhField::SdohEducation), "1");
        assert_eq!(record.value(SbdhField::SdohEconomics), "2");
        assert_eq!(record.value(SbdhField::BehaviorDrug), "4");
    }

    #[test]
    fn usage_totals() {
        let usage = [
            UsageRecord {
                prompt_tokens: 500,
                completion_tokens: 15,
                total_tokens: 515,
            },
            UsageRecord::default(),
            UsageRecord {
                prompt_tokens: 420,
                completion_tokens: 15,
                total_tokens: 435,
            },
        ];
        let total: UsageRecord = usage.iter().sum();
        assert_eq!(total.prompt_tokens, 920);
        assert_eq!(total.completion_tokens, 30);
        assert_eq!(total.total_tokens, 950);
        assert!(usage[1].is_zero());
        assert!(!total.is_zero());
    }

    #[test]
    fn annotation_record_json_shape() {
        let record = AnnotationRecord::new("7", fallback_values());
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["row_id"], "7");
        assert_eq!(json["values"].as_array().unwrap().len(), 8);
    }
}
