//! Medal - Medal records, reference data and tallies

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::helpers::{de_opt_count, de_year};

/// Medal type selector used by single-choice controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MedalType {
    Gold,
    Silver,
    Bronze,
    #[default]
    Total,
}

impl MedalType {
    pub const ALL: [MedalType; 4] = [
        MedalType::Gold,
        MedalType::Silver,
        MedalType::Bronze,
        MedalType::Total,
    ];

    /// Query parameter value
    pub fn as_param(&self) -> &'static str {
        match self {
            MedalType::Gold => "gold",
            MedalType::Silver => "silver",
            MedalType::Bronze => "bronze",
            MedalType::Total => "total",
        }
    }

    /// Capitalized label for titles and tooltips
    pub fn label(&self) -> &'static str {
        match self {
            MedalType::Gold => "Gold",
            MedalType::Silver => "Silver",
            MedalType::Bronze => "Bronze",
            MedalType::Total => "Total",
        }
    }

    /// Pick this medal type's count out of a set of counts
    pub fn pick(&self, counts: &MedalCounts) -> u32 {
        match self {
            MedalType::Gold => counts.gold,
            MedalType::Silver => counts.silver,
            MedalType::Bronze => counts.bronze,
            MedalType::Total => counts.total(),
        }
    }
}

impl fmt::Display for MedalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_param())
    }
}

impl FromStr for MedalType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "gold" => Ok(MedalType::Gold),
            "silver" => Ok(MedalType::Silver),
            "bronze" => Ok(MedalType::Bronze),
            "total" => Ok(MedalType::Total),
            other => Err(Error::Invalid {
                message: format!("Unknown medal type: {other}"),
            }),
        }
    }
}

/// Independent gold/silver/bronze toggles (checkbox group)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedalSelection {
    pub gold: bool,
    pub silver: bool,
    pub bronze: bool,
}

impl Default for MedalSelection {
    fn default() -> Self {
        Self {
            gold: true,
            silver: true,
            bronze: true,
        }
    }
}

impl MedalSelection {
    /// At least one medal type is enabled
    pub fn any(&self) -> bool {
        self.gold || self.silver || self.bronze
    }

    /// Zero out the counts of disabled medal types
    pub fn apply(&self, counts: MedalCounts) -> MedalCounts {
        MedalCounts {
            gold: if self.gold { counts.gold } else { 0 },
            silver: if self.silver { counts.silver } else { 0 },
            bronze: if self.bronze { counts.bronze } else { 0 },
        }
    }

    /// Enabled medal types in stacking order (gold at the bottom)
    pub fn enabled(&self) -> Vec<MedalType> {
        let mut types = Vec::with_capacity(3);
        if self.gold {
            types.push(MedalType::Gold);
        }
        if self.silver {
            types.push(MedalType::Silver);
        }
        if self.bronze {
            types.push(MedalType::Bronze);
        }
        types
    }
}

/// Gold/silver/bronze counts; the total is always derived
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MedalCounts {
    pub gold: u32,
    pub silver: u32,
    pub bronze: u32,
}

impl MedalCounts {
    pub fn new(gold: u32, silver: u32, bronze: u32) -> Self {
        Self {
            gold,
            silver,
            bronze,
        }
    }

    pub fn total(&self) -> u32 {
        self.gold + self.silver + self.bronze
    }

    pub fn add(&mut self, other: MedalCounts) {
        self.gold += other.gold;
        self.silver += other.silver;
        self.bronze += other.bronze;
    }
}

/// Counts that may be missing for a year
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tally {
    Counts(MedalCounts),
    /// At least one of gold/silver/bronze was null
    NoData,
}

impl Tally {
    /// Derive a tally from nullable counts. The total is only derived when all
    /// three counts are present; otherwise the entry is flagged as no-data.
    pub fn from_optional(gold: Option<u32>, silver: Option<u32>, bronze: Option<u32>) -> Self {
        match (gold, silver, bronze) {
            (Some(gold), Some(silver), Some(bronze)) => {
                Tally::Counts(MedalCounts::new(gold, silver, bronze))
            }
            _ => Tally::NoData,
        }
    }

    pub fn counts(&self) -> Option<&MedalCounts> {
        match self {
            Tally::Counts(counts) => Some(counts),
            Tally::NoData => None,
        }
    }

    pub fn total(&self) -> Option<u32> {
        self.counts().map(MedalCounts::total)
    }

    pub fn value(&self, medal_type: MedalType) -> Option<u32> {
        self.counts().map(|c| medal_type.pick(c))
    }

    pub fn is_no_data(&self) -> bool {
        matches!(self, Tally::NoData)
    }
}

/// One country's medals at one Games (`/api/medal-tally`). A null count
/// marks the row as having no data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedalRecord {
    pub noc: String,
    #[serde(deserialize_with = "de_year")]
    pub year: i32,
    #[serde(default, deserialize_with = "de_opt_count")]
    pub gold: Option<u32>,
    #[serde(default, deserialize_with = "de_opt_count")]
    pub silver: Option<u32>,
    #[serde(default, deserialize_with = "de_opt_count")]
    pub bronze: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub games_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_country: Option<String>,
}

impl MedalRecord {
    pub fn tally(&self) -> Tally {
        Tally::from_optional(self.gold, self.silver, self.bronze)
    }
}

/// Country code to display name (`/api/countries`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryRef {
    pub country_noc: String,
    pub country: String,
}

/// One Olympic edition (`/api/games`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRef {
    #[serde(deserialize_with = "de_year")]
    pub year: i32,
    pub host_country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub season: Option<String>,
}

/// Host city entry (`/api/host_cities`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostCity {
    #[serde(deserialize_with = "de_year")]
    pub year: i32,
    pub city: String,
    pub country: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tally_total_matches_sum() {
        let tally = Tally::from_optional(Some(3), Some(4), Some(5));
        assert_eq!(tally.total(), Some(12));
        let counts = tally.counts().expect("counts present");
        assert_eq!(counts.gold + counts.silver + counts.bronze, counts.total());
    }

    #[test]
    fn test_tally_null_count_is_no_data() {
        assert!(Tally::from_optional(Some(3), None, Some(5)).is_no_data());
        assert!(Tally::from_optional(None, None, None).is_no_data());
        assert_eq!(Tally::from_optional(Some(1), Some(1), None).total(), None);
    }

    #[test]
    fn test_medal_selection_apply() {
        let selection = MedalSelection {
            gold: true,
            silver: false,
            bronze: true,
        };
        let counts = selection.apply(MedalCounts::new(2, 3, 4));
        assert_eq!(counts, MedalCounts::new(2, 0, 4));
        assert_eq!(selection.enabled(), vec![MedalType::Gold, MedalType::Bronze]);
    }

    #[test]
    fn test_medal_type_parse() {
        assert_eq!("GOLD".parse::<MedalType>().expect("parse"), MedalType::Gold);
        assert!("platinum".parse::<MedalType>().is_err());
    }

    #[test]
    fn test_medal_record_accepts_string_year() {
        let record: MedalRecord = serde_json::from_str(
            r#"{"noc":"USA","year":"2004","gold":36,"silver":39,"bronze":26,"total":101}"#,
        )
        .expect("valid record");
        assert_eq!(record.year, 2004);
        assert_eq!(record.tally().total(), Some(101));
    }

    #[test]
    fn test_medal_record_null_count_is_no_data() {
        let records: Vec<MedalRecord> = serde_json::from_str(
            r#"[{"noc":"USA","year":2000,"gold":37,"silver":24,"bronze":32},
                {"noc":"IOA","year":2000,"gold":null,"silver":0,"bronze":2}]"#,
        )
        .expect("null counts decode");
        assert_eq!(records[0].tally().total(), Some(93));
        assert!(records[1].tally().is_no_data());
        assert_eq!(records[1].tally().total(), None);
    }
}
