//! Test Fixtures
//!
//! Pre-built test data for the entities and values the submission
//! pipeline deals in. Fixtures keep tests terse and consistent: the same
//! case, ANM and village names show up across the whole suite.

use chrono::NaiveDate;
use uuid::Uuid;

use core_kernel::{AnmId, CaseId, Location};

/// Identifier fixtures
pub struct IdFixtures;

impl IdFixtures {
    /// The case identifier used by most single-case tests
    pub fn case_id() -> CaseId {
        CaseId::new("CASE X")
    }

    /// A second case identifier for multi-case tests
    pub fn other_case_id() -> CaseId {
        CaseId::new("CASE Y")
    }

    /// The ANM identifier used by most tests
    pub fn anm_id() -> AnmId {
        AnmId::new("ANM X")
    }

    /// A fresh random UUID, for seeding deterministic generators
    pub fn fresh_uuid() -> Uuid {
        Uuid::new_v4()
    }
}

/// Temporal fixtures
pub struct DateFixtures;

impl DateFixtures {
    pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap_or_else(|| panic!("invalid fixture date {year}-{month}-{day}"))
    }

    /// A typical submission date
    pub fn submission_date() -> NaiveDate {
        Self::date(2012, 1, 1)
    }

    /// A typical registration date, before the submission date
    pub fn registration_date() -> NaiveDate {
        Self::date(2011, 12, 15)
    }

    /// A typical last-menstrual-period date for ANC tests
    pub fn lmp_date() -> NaiveDate {
        Self::date(2011, 10, 1)
    }

    /// A typical date of birth for child tests
    pub fn date_of_birth() -> NaiveDate {
        Self::date(2011, 11, 20)
    }
}

/// Location fixtures
pub struct LocationFixtures;

impl LocationFixtures {
    pub fn village_x() -> Location {
        Location::new("Village X", "SubCenter X", "PHC X")
    }
}
