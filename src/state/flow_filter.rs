//! FlowFilter - Controls of the medal flow diagram

use crate::domain::config::FlowDefaults;
use crate::domain::flow::FlowType;
use crate::domain::medal::MedalType;
use crate::error::{Error, Result};
use crate::services::FlowParams;
use crate::state::impact::{Impact, assign};

/// Flow diagram controls; every one of them changes the served graph
#[derive(Debug, Clone, PartialEq)]
pub struct FlowFilter {
    medal_type: MedalType,
    flow_type: FlowType,
    node_limit: u32,
}

impl FlowFilter {
    pub fn new(defaults: &FlowDefaults) -> Self {
        Self {
            medal_type: defaults.medal_type,
            flow_type: defaults.flow_type,
            node_limit: defaults.node_limit.max(1),
        }
    }

    pub fn medal_type(&self) -> MedalType {
        self.medal_type
    }

    pub fn flow_type(&self) -> FlowType {
        self.flow_type
    }

    pub fn node_limit(&self) -> u32 {
        self.node_limit
    }

    pub fn set_medal_type(&mut self, medal_type: MedalType) -> Impact {
        assign(&mut self.medal_type, medal_type, Impact::Refetch)
    }

    pub fn set_flow_type(&mut self, flow_type: FlowType) -> Impact {
        assign(&mut self.flow_type, flow_type, Impact::Refetch)
    }

    pub fn set_node_limit(&mut self, limit: u32) -> Result<Impact> {
        if limit == 0 {
            return Err(Error::Invalid {
                message: "Node limit must be at least 1".into(),
            });
        }
        Ok(assign(&mut self.node_limit, limit, Impact::Refetch))
    }

    pub fn params(&self) -> FlowParams {
        FlowParams {
            medal_type: self.medal_type,
            flow_type: self.flow_type,
            node_limit: self.node_limit,
        }
    }

    pub fn reset(&mut self, defaults: &FlowDefaults) {
        *self = Self::new(defaults);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_control_refetches() {
        let mut filter = FlowFilter::new(&FlowDefaults::default());
        assert_eq!(filter.set_medal_type(MedalType::Bronze), Impact::Refetch);
        assert_eq!(filter.set_flow_type(FlowType::YearCountrySport), Impact::Refetch);
        assert_eq!(filter.set_node_limit(20).expect("valid"), Impact::Refetch);
        assert_eq!(filter.set_node_limit(20).expect("valid"), Impact::Unchanged);
    }
}
