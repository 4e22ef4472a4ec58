//! EvolutionFilter - Country selection and medal toggles

use crate::domain::config::EvolutionDefaults;
use crate::domain::medal::{MedalSelection, MedalType};
use crate::state::impact::{Impact, assign};
use crate::state::selection::SelectionSet;

/// Controls shared by the evolution and ranking charts. All data is loaded
/// once, so every change here is render-only.
#[derive(Debug, Clone)]
pub struct EvolutionFilter {
    selection: SelectionSet,
    medals: MedalSelection,
}

impl EvolutionFilter {
    pub fn new(defaults: &EvolutionDefaults) -> Self {
        Self {
            selection: defaults.countries.iter().cloned().collect(),
            medals: MedalSelection::default(),
        }
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn medals(&self) -> MedalSelection {
        self.medals
    }

    pub fn add_country(&mut self, code: &str) -> Impact {
        if self.selection.insert(code) {
            Impact::Rerender
        } else {
            Impact::Unchanged
        }
    }

    pub fn remove_country(&mut self, code: &str) -> Impact {
        if self.selection.remove(code) {
            Impact::Rerender
        } else {
            Impact::Unchanged
        }
    }

    /// Toggle one medal checkbox; `Total` is not a checkbox
    pub fn set_medal(&mut self, medal: MedalType, enabled: bool) -> Impact {
        let field = match medal {
            MedalType::Gold => &mut self.medals.gold,
            MedalType::Silver => &mut self.medals.silver,
            MedalType::Bronze => &mut self.medals.bronze,
            MedalType::Total => return Impact::Unchanged,
        };
        assign(field, enabled, Impact::Rerender)
    }

    pub fn reset(&mut self, defaults: &EvolutionDefaults) {
        *self = Self::new(defaults);
    }
}
