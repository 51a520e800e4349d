//! The eligible-couple case record

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use core_kernel::{AnmId, CaseId, Location};

/// Placeholder EC number for couples registered out of area; they have no
/// locally issued number.
pub const OUT_OF_AREA_EC_NUMBER: &str = "0";

/// The persistent case record of a tracked couple.
///
/// The case identifier is immutable once created. The details blob, ANM
/// assignment and location are mutable; the out-of-area flag is fixed at
/// creation. Cases are never deleted, only marked closed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibleCouple {
    pub case_id: CaseId,
    pub ec_number: String,
    pub wife_name: String,
    pub husband_name: String,
    pub anm_id: Option<AnmId>,
    pub location: Location,
    #[serde(default)]
    pub details: HashMap<String, String>,
    pub is_out_of_area: bool,
    pub is_closed: bool,
}

impl EligibleCouple {
    pub fn new(case_id: impl Into<CaseId>, ec_number: impl Into<String>) -> Self {
        Self {
            case_id: case_id.into(),
            ec_number: ec_number.into(),
            wife_name: String::new(),
            husband_name: String::new(),
            anm_id: None,
            location: Location::default(),
            details: HashMap::new(),
            is_out_of_area: false,
            is_closed: false,
        }
    }

    pub fn with_couple(mut self, wife_name: impl Into<String>, husband_name: impl Into<String>) -> Self {
        self.wife_name = wife_name.into();
        self.husband_name = husband_name.into();
        self
    }

    pub fn with_anm_identifier(mut self, anm_id: impl Into<AnmId>) -> Self {
        self.anm_id = Some(anm_id.into());
        self
    }

    pub fn with_location(mut self, location: Location) -> Self {
        self.location = location;
        self
    }

    pub fn with_details(mut self, details: HashMap<String, String>) -> Self {
        self.details = details;
        self
    }

    pub fn as_out_of_area(mut self) -> Self {
        self.is_out_of_area = true;
        self
    }

    /// Unions new details into the blob; new keys override existing ones
    /// sharing a name.
    pub fn with_merged_details(mut self, details: &HashMap<String, String>) -> Self {
        self.details
            .extend(details.iter().map(|(k, v)| (k.clone(), v.clone())));
        self
    }

    pub fn close(&mut self) {
        self.is_closed = true;
    }

    pub fn is_active(&self) -> bool {
        !self.is_closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_shape() {
        let couple = EligibleCouple::new("CASE X", "EC Number 1")
            .with_couple("Wife 1", "Husband 1")
            .with_anm_identifier("ANM X")
            .with_location(Location::new("Village X", "SubCenter X", "PHC X"));

        assert_eq!(couple.case_id, CaseId::new("CASE X"));
        assert_eq!(couple.wife_name, "Wife 1");
        assert_eq!(couple.anm_id, Some(AnmId::new("ANM X")));
        assert!(!couple.is_out_of_area);
        assert!(couple.is_active());
    }

    #[test]
    fn test_merge_new_keys_override_old() {
        let mut existing = HashMap::new();
        existing.insert("existingThing".to_string(), "existingValue".to_string());
        existing.insert("currentMethod".to_string(), "ocp".to_string());

        let mut update = HashMap::new();
        update.insert("currentMethod".to_string(), "condom".to_string());

        let couple = EligibleCouple::new("CASE X", "1")
            .with_details(existing)
            .with_merged_details(&update);

        assert_eq!(couple.details.get("currentMethod").unwrap(), "condom");
        assert_eq!(couple.details.get("existingThing").unwrap(), "existingValue");
    }

    #[test]
    fn test_close_marks_inactive() {
        let mut couple = EligibleCouple::new("CASE X", "1");
        couple.close();
        assert!(!couple.is_active());
    }

    mod merge_properties {
        use super::*;
        use proptest::prelude::*;
        use test_utils::generators::details_map;

        proptest! {
            // The merged blob is the union of both maps, with the update
            // winning on shared keys.
            #[test]
            fn test_merge_is_union_with_update_precedence(
                existing in details_map(8),
                update in details_map(8),
            ) {
                let couple = EligibleCouple::new("CASE X", "1")
                    .with_details(existing.clone())
                    .with_merged_details(&update);

                for (key, value) in &update {
                    prop_assert_eq!(couple.details.get(key), Some(value));
                }
                for (key, value) in &existing {
                    if !update.contains_key(key) {
                        prop_assert_eq!(couple.details.get(key), Some(value));
                    }
                }
                prop_assert!(couple
                    .details
                    .keys()
                    .all(|key| existing.contains_key(key) || update.contains_key(key)));
            }
        }
    }
}
