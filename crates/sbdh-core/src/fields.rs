//! The eight SBDH annotation fields and their categorical codes.
//!
//! Field order is fixed: it is the column order of the annotation table and
//! the token order the model is instructed to emit.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of annotation fields per note.
pub const FIELD_COUNT: usize = 8;

/// One raw token per field, in [`SbdhField::ALL`] order.
pub type FieldValues = [String; FIELD_COUNT];

const FALSE_TRUE: &[(&str, &str)] = &[("0", "False"), ("1", "True")];
const NONE_TRUE_FALSE: &[(&str, &str)] = &[("0", "None"), ("1", "True"), ("2", "False")];
const BEHAVIOR: &[(&str, &str)] = &[
    ("0", "None"),
    ("1", "Present"),
    ("2", "Past"),
    ("3", "Never"),
    ("4", "Unsure"),
];

/// A social/behavioral determinant of health annotated per note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SbdhField {
    SdohCommunityPresent,
    SdohCommunityAbsent,
    SdohEducation,
    SdohEconomics,
    SdohEnvironment,
    BehaviorAlcohol,
    BehaviorTobacco,
    BehaviorDrug,
}

#[derive(Debug, Error)]
#[error("unknown SBDH field: {0}")]
pub struct UnknownField(pub String);

impl SbdhField {
    /// All fields in annotation order.
    pub const ALL: [SbdhField; FIELD_COUNT] = [
        Self::SdohCommunityPresent,
        Self::SdohCommunityAbsent,
        Self::SdohEducation,
        Self::SdohEconomics,
        Self::SdohEnvironment,
        Self::BehaviorAlcohol,
        Self::BehaviorTobacco,
        Self::BehaviorDrug,
    ];

    /// Column name used in every table.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SdohCommunityPresent => "sdoh_community_present",
            Self::SdohCommunityAbsent => "sdoh_community_absent",
            Self::SdohEducation => "sdoh_education",
            Self::SdohEconomics => "sdoh_economics",
            Self::SdohEnvironment => "sdoh_environment",
            Self::BehaviorAlcohol => "behavior_alcohol",
            Self::BehaviorTobacco => "behavior_tobacco",
            Self::BehaviorDrug => "behavior_drug",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }

    /// Valid `(code, label)` pairs for this field.
    pub fn codes(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::SdohCommunityPresent | Self::SdohCommunityAbsent | Self::SdohEducation => {
                FALSE_TRUE
            }
            Self::SdohEconomics | Self::SdohEnvironment => NONE_TRUE_FALSE,
            Self::BehaviorAlcohol | Self::BehaviorTobacco | Self::BehaviorDrug => BEHAVIOR,
        }
    }

    /// Whether `token` (ignoring surrounding whitespace) is one of this field's codes.
    pub fn accepts(&self, token: &str) -> bool {
        let token = token.trim();
        self.codes().iter().any(|(code, _)| *code == token)
    }

    /// Label for a code, e.g. `"2"` → `"Past"` for the behavior fields.
    pub fn label(&self, code: &str) -> Option<&'static str> {
        let code = code.trim();
        self.codes()
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, label)| *label)
    }

    /// Position of this field in [`Self::ALL`].
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for SbdhField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SbdhField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// The all-zero row substituted when a note cannot be annotated.
pub fn fallback_values() -> FieldValues {
    std::array::from_fn(|_| "0".to_string())
}
