//! Property-Based Test Data Generators
//!
//! Proptest strategies for the loosely-typed values flowing through the
//! pipeline: form field names, detail maps and calendar dates.

use std::collections::HashMap;

use chrono::NaiveDate;
use proptest::prelude::*;

/// A camelCase-ish field name as submitted by external form systems
pub fn field_name() -> impl Strategy<Value = String> {
    "[a-z][a-zA-Z0-9]{0,20}"
}

/// A non-empty field value without surrounding whitespace
pub fn field_value() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{1,30}"
}

/// A details map of up to `max_len` entries
pub fn details_map(max_len: usize) -> impl Strategy<Value = HashMap<String, String>> {
    prop::collection::hash_map(field_name(), field_value(), 0..=max_len)
}

/// A valid calendar date within the range the system plausibly sees
pub fn naive_date() -> impl Strategy<Value = NaiveDate> {
    (2000i32..2030, 1u32..=12, 1u32..=28).prop_map(|(y, m, d)| {
        NaiveDate::from_ymd_opt(y, m, d).unwrap_or_else(|| unreachable!())
    })
}
