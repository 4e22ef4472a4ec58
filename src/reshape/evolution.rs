//! Evolution - Per-country medal series over every Games

use ahash::AHashMap;

use crate::domain::directory::{CountryDirectory, game_years};
use crate::domain::medal::{GameRef, MedalCounts, MedalRecord, MedalSelection};
use crate::state::SelectionSet;

/// Counts of one country at one Games, restricted to enabled medal types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesPoint {
    pub year: i32,
    pub counts: MedalCounts,
}

impl SeriesPoint {
    pub fn total(&self) -> u32 {
        self.counts.total()
    }
}

/// One line of the evolution chart
#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionSeries {
    pub code: String,
    pub label: String,
    /// Position in the selection; picks the palette color
    pub slot: usize,
    pub points: Vec<SeriesPoint>,
}

impl EvolutionSeries {
    /// Points with at least one medal (these get markers)
    pub fn medal_points(&self) -> impl Iterator<Item = &SeriesPoint> {
        self.points.iter().filter(|p| p.total() > 0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionView {
    pub years: Vec<i32>,
    pub series: Vec<EvolutionSeries>,
    pub medals: MedalSelection,
    pub y_max: u32,
}

impl EvolutionView {
    /// Nothing to draw: no country selected or every medal type disabled
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

pub fn build_evolution(
    tally: &[MedalRecord],
    directory: &CountryDirectory,
    games: &[GameRef],
    selection: &SelectionSet,
    medals: MedalSelection,
) -> EvolutionView {
    let years = game_years(games);
    if selection.is_empty() || !medals.any() {
        return EvolutionView {
            years,
            series: Vec::new(),
            medals,
            y_max: 0,
        };
    }

    let mut by_key: AHashMap<(&str, i32), MedalCounts> = AHashMap::new();
    // No-data rows contribute nothing; the year reads as zero
    for record in tally.iter().filter(|r| selection.contains(&r.noc)) {
        if let Some(counts) = record.tally().counts() {
            by_key
                .entry((record.noc.as_str(), record.year))
                .or_default()
                .add(*counts);
        }
    }

    let series: Vec<EvolutionSeries> = selection
        .iter()
        .enumerate()
        .map(|(slot, code)| EvolutionSeries {
            code: code.to_string(),
            label: directory.name_of(code).to_string(),
            slot,
            points: years
                .iter()
                .map(|&year| SeriesPoint {
                    year,
                    counts: medals.apply(by_key.get(&(code, year)).copied().unwrap_or_default()),
                })
                .collect(),
        })
        .collect();

    let y_max = series
        .iter()
        .flat_map(|s| s.points.iter().map(SeriesPoint::total))
        .max()
        .unwrap_or(0);

    EvolutionView {
        years,
        series,
        medals,
        y_max,
    }
}
