//! DominanceFilter - Controls of the sport dominance chart

use crate::domain::config::DominanceDefaults;
use crate::domain::medal::MedalType;
use crate::error::{Error, Result};
use crate::state::impact::{Impact, assign};

/// Sport dominance controls. Only the sport changes the served rows; the
/// current year lives in the chart's playback controller.
#[derive(Debug, Clone, PartialEq)]
pub struct DominanceFilter {
    sport: Option<String>,
    medal_type: MedalType,
    country_limit: usize,
    cumulative: bool,
}

impl DominanceFilter {
    pub fn new(defaults: &DominanceDefaults) -> Self {
        Self {
            sport: defaults.sport.clone(),
            medal_type: MedalType::Total,
            country_limit: defaults.country_limit.max(1),
            cumulative: defaults.cumulative,
        }
    }

    pub fn sport(&self) -> Option<&str> {
        self.sport.as_deref()
    }

    pub fn medal_type(&self) -> MedalType {
        self.medal_type
    }

    pub fn country_limit(&self) -> usize {
        self.country_limit
    }

    pub fn cumulative(&self) -> bool {
        self.cumulative
    }

    pub fn set_sport(&mut self, sport: impl Into<String>) -> Impact {
        assign(&mut self.sport, Some(sport.into()), Impact::Refetch)
    }

    pub fn set_medal_type(&mut self, medal_type: MedalType) -> Impact {
        assign(&mut self.medal_type, medal_type, Impact::Rerender)
    }

    pub fn set_country_limit(&mut self, limit: usize) -> Result<Impact> {
        if limit == 0 {
            return Err(Error::Invalid {
                message: "Country limit must be at least 1".into(),
            });
        }
        Ok(assign(&mut self.country_limit, limit, Impact::Rerender))
    }

    pub fn set_cumulative(&mut self, cumulative: bool) -> Impact {
        assign(&mut self.cumulative, cumulative, Impact::Rerender)
    }

    /// Reset button: medal type back to total and cumulative mode on. The
    /// sport and country limit stay as chosen.
    pub fn reset_view(&mut self) -> Impact {
        self.set_medal_type(MedalType::Total)
            .and(self.set_cumulative(true))
    }

    pub fn reset(&mut self, defaults: &DominanceDefaults) {
        *self = Self::new(defaults);
    }
}
