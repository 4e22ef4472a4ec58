//! Host - Host-country performance (`/api/host-performance`)

use serde::{Deserialize, Serialize};

use crate::domain::medal::Tally;
use crate::helpers::{de_opt_count, de_year};

/// One Games of the host country's history; counts are null when the
/// country has no tally for that year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformancePoint {
    #[serde(deserialize_with = "de_year")]
    pub year: i32,
    #[serde(default, deserialize_with = "de_opt_count")]
    pub gold: Option<u32>,
    #[serde(default, deserialize_with = "de_opt_count")]
    pub silver: Option<u32>,
    #[serde(default, deserialize_with = "de_opt_count")]
    pub bronze: Option<u32>,
    #[serde(default, deserialize_with = "de_opt_count")]
    pub total: Option<u32>,
}

impl PerformancePoint {
    pub fn tally(&self) -> Tally {
        Tally::from_optional(self.gold, self.silver, self.bronze)
    }
}

/// Host country with its medal history across all Games
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostPerformance {
    #[serde(deserialize_with = "de_year")]
    pub host_year: i32,
    pub host_country: String,
    #[serde(default)]
    pub host_noc: Option<String>,
    #[serde(default)]
    pub performance: Vec<PerformancePoint>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_performance_parses_backend_shape() {
        let json = r#"[{
            "host_country": "Greece", "host_noc": "GRE", "host_year": "2004",
            "performance": [
                {"year": 2000, "gold": 4, "silver": 6, "bronze": 3, "total": 13},
                {"year": "1900", "gold": null, "silver": null, "bronze": null, "total": null}
            ]
        }]"#;
        let hosts: Vec<HostPerformance> = serde_json::from_str(json).expect("valid hosts");
        assert_eq!(hosts[0].host_year, 2004);
        assert_eq!(hosts[0].performance[0].tally().total(), Some(13));
        assert!(hosts[0].performance[1].tally().is_no_data());
    }
}
