//! Sport - Per-sport medal rows (`/api/sport_medals`)

use serde::{Deserialize, Serialize};

use crate::domain::medal::Tally;
use crate::helpers::{de_opt_count, de_year};

/// Medals one country won in one sport at one Games. `country` is a
/// display name, not a NOC code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SportMedalRow {
    pub country: String,
    #[serde(deserialize_with = "de_year")]
    pub year: i32,
    #[serde(default, deserialize_with = "de_opt_count")]
    pub gold: Option<u32>,
    #[serde(default, deserialize_with = "de_opt_count")]
    pub silver: Option<u32>,
    #[serde(default, deserialize_with = "de_opt_count")]
    pub bronze: Option<u32>,
}

impl SportMedalRow {
    pub fn tally(&self) -> Tally {
        Tally::from_optional(self.gold, self.silver, self.bronze)
    }
}
