//! HostFilter - Controls of the host-country charts

use crate::domain::medal::MedalType;
use crate::state::impact::{Impact, assign};

/// Medal type shown by the host performance chart. The selected host year
/// lives in the chart's playback controller, which snaps it to host years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HostFilter {
    medal_type: MedalType,
}

impl HostFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn medal_type(&self) -> MedalType {
        self.medal_type
    }

    pub fn set_medal_type(&mut self, medal_type: MedalType) -> Impact {
        assign(&mut self.medal_type, medal_type, Impact::Rerender)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
