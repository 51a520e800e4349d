//! Stable protocol tags
//!
//! Field names are the effective wire contract between the form layer and
//! the business services. They must not drift: external form systems submit
//! exactly these keys.

/// Form-name tags, one per handled form type.
pub mod forms {
    pub const EC_REGISTRATION: &str = "ec_registration";
    pub const OUT_OF_AREA_ANC_REGISTRATION: &str = "anc_registration_oa";
    pub const FP_UPDATE: &str = "fp_update";
    pub const FP_CHANGE: &str = "fp_change";
    pub const RENEW_FP_PRODUCT: &str = "renew_fp_product";
    pub const EC_CLOSE: &str = "ec_close";

    pub const ANC_REGISTRATION: &str = "anc_registration";
    pub const ANC_VISIT: &str = "anc_visit";
    pub const ANC_OUTCOME: &str = "anc_outcome";
    pub const ANC_CLOSE: &str = "anc_close";

    pub const CHILD_REGISTRATION: &str = "child_registration";
    pub const CHILD_IMMUNIZATION: &str = "child_immunization";
    pub const CHILD_CLOSE: &str = "child_close";
}

/// Field names shared across eligible-couple forms.
pub const CURRENT_METHOD: &str = "currentMethod";
pub const NEW_METHOD: &str = "newMethod";
pub const IS_HIGH_PRIORITY: &str = "isHighPriority";
pub const SUBMISSION_DATE: &str = "submissionDate";
pub const FP_START_DATE: &str = "fpStartDate";
pub const FAMILY_PLANNING_METHOD_CHANGE_DATE: &str = "familyPlanningMethodChangeDate";

/// Product delivery fields.
pub const DMPA_INJECTION_DATE: &str = "dmpaInjectionDate";
pub const NUMBER_OF_OCP_DELIVERED: &str = "numberOfOCPDelivered";
pub const OCP_REFILL_DATE: &str = "ocpRefillDate";
pub const NUMBER_OF_CONDOMS_SUPPLIED: &str = "numberOfCondomsSupplied";

/// Out-of-area registration fields.
pub const WIFE_NAME: &str = "wifeName";
pub const HUSBAND_NAME: &str = "husbandName";
pub const VILLAGE: &str = "village";
pub const SUB_CENTER: &str = "subCenter";
pub const PHC: &str = "phc";
pub const THAYI_CARD_NUMBER: &str = "thayiCardNumber";
pub const REGISTRATION_DATE: &str = "registrationDate";
pub const PHONE_NUMBER: &str = "phoneNumber";

/// Mother (ANC) fields.
pub const LMP_DATE: &str = "lmpDate";
pub const VISIT_NUMBER: &str = "visitNumber";
pub const VISIT_DATE: &str = "visitDate";
pub const PREGNANCY_OUTCOME: &str = "pregnancyOutcome";
pub const DATE_OF_DELIVERY: &str = "dateOfDelivery";

/// Child (PNC) fields.
pub const DATE_OF_BIRTH: &str = "dateOfBirth";
pub const IMMUNIZATIONS_GIVEN: &str = "immunizationsGiven";
pub const IMMUNIZATION_DATE: &str = "immunizationDate";
