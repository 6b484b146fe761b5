//! Annotation instruction sent as the system message.

/// Field schema and coding guidelines. The note text goes in the user message.
pub const SYSTEM_PROMPT: &str = "\
Annotate the following clinical note based on provided guidelines:

The notes should be annotated for the patient's status of the following Social and Behavioral Determinants of Health (SBDHs):

1) Community Present (sdoh_community_present) (0: False, 1: True)
2) Community Absent (sdoh_community_absent) (0: False, 1: True)
3) Education (sdoh_education) (0: False, 1: True)
4) Economics (sdoh_economics) (0: None, 1: True, 2: False)
5) Environment (sdoh_environment) (0: None, 1: True, 2: False)
6) Alcohol Use (behavior_alcohol) (0: None, 1: Present, 2: Past, 3: Never, 4: Unsure)
7) Tobacco Use (behavior_tobacco) (0: None, 1: Present, 2: Past, 3: Never, 4: Unsure)
8) Drug Use (behavior_drug) (0: None, 1: Present, 2: Past, 3: Never, 4: Unsure)

For each of the above category, associating tags are given and a value is expected to be provided for each tag, with each value corresponding to a status.
For each tag, the following areas should be considered before assigning a numerical value:

1) sdoh_community_present / sdoh_community_absent : social integration, support systems, community engagement, discrimination, stress
2) sdoh_education : literacy, language, early childhood education, vocational training, higher education
3) sdoh_economics : employment, income, expenses, debt, medical bills, support
4) sdoh_environment : housing, transportation, safety, parks, playgrounds, walkability, zip code/geography
5) behavior_alcohol : consumes alcohol
6) behavior_tobacco : uses tobacco
7) behavior_drug : uses a controlled substance, including marijuana, for which the patient does not have a prescription

Provide EXACTLY and ONLY 8 CSV values in this order WITHOUT ANY EXPLANATION OR JUSTIFICATION:
sdoh_community_present,sdoh_community_absent,sdoh_education,sdoh_economics,sdoh_environment,behavior_alcohol,behavior_tobacco,behavior_drug";

#[cfg(test)]
mod tests {
    use super::*;
    use sbdh_core::SbdhField;

    #[test]
    fn prompt_names_every_field_with_codes() {
        for field in SbdhField::ALL {
            assert!(SYSTEM_PROMPT.contains(field.name()), "missing {field}");
            for (code, label) in field.codes() {
                assert!(SYSTEM_PROMPT.contains(&format!("{code}: {label}")));
            }
        }
    }

    #[test]
    fn prompt_ends_with_column_order() {
        let order: Vec<_> = SbdhField::ALL.iter().map(|f| f.name()).collect();
        assert!(SYSTEM_PROMPT.ends_with(&order.join(",")));
    }
}
