//! HeatmapFilter - Controls of the sport × country heatmap

use crate::domain::config::HeatmapDefaults;
use crate::domain::matrix::YearRange;
use crate::domain::medal::MedalType;
use crate::error::{Error, Result};
use crate::services::MatrixParams;
use crate::state::impact::{Impact, assign};

/// Heatmap controls. Medal type, year range and country count change the
/// server-side matrix; the clustering toggle only changes presentation.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapFilter {
    medal_type: MedalType,
    year_range: YearRange,
    country_count: u32,
    cluster: bool,
}

impl HeatmapFilter {
    pub fn new(defaults: &HeatmapDefaults) -> Self {
        Self {
            medal_type: defaults.medal_type,
            year_range: defaults.year_range,
            country_count: defaults.country_count.max(1),
            cluster: defaults.cluster,
        }
    }

    pub fn medal_type(&self) -> MedalType {
        self.medal_type
    }

    pub fn year_range(&self) -> YearRange {
        self.year_range
    }

    pub fn country_count(&self) -> u32 {
        self.country_count
    }

    pub fn cluster(&self) -> bool {
        self.cluster
    }

    pub fn set_medal_type(&mut self, medal_type: MedalType) -> Impact {
        assign(&mut self.medal_type, medal_type, Impact::Refetch)
    }

    pub fn set_year_range(&mut self, year_range: YearRange) -> Impact {
        assign(&mut self.year_range, year_range, Impact::Refetch)
    }

    pub fn set_country_count(&mut self, count: u32) -> Result<Impact> {
        if count == 0 {
            return Err(Error::Invalid {
                message: "Country count must be at least 1".into(),
            });
        }
        Ok(assign(&mut self.country_count, count, Impact::Refetch))
    }

    pub fn set_cluster(&mut self, cluster: bool) -> Impact {
        assign(&mut self.cluster, cluster, Impact::Rerender)
    }

    /// Request parameters for the current controls
    pub fn params(&self) -> MatrixParams {
        MatrixParams {
            medal_type: self.medal_type,
            year_range: self.year_range,
            country_count: self.country_count,
        }
    }

    pub fn reset(&mut self, defaults: &HeatmapDefaults) {
        *self = Self::new(defaults);
    }
}
