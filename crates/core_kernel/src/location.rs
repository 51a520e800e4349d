//! Case location attributes
//!
//! Every tracked case carries the administrative location it was registered
//! under: village, sub-center and primary health centre. Set once at
//! registration, mutable only when the subject moves.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub village: String,
    pub sub_center: String,
    pub phc: String,
}

impl Location {
    pub fn new(
        village: impl Into<String>,
        sub_center: impl Into<String>,
        phc: impl Into<String>,
    ) -> Self {
        Self {
            village: village.into(),
            sub_center: sub_center.into(),
            phc: phc.into(),
        }
    }
}
