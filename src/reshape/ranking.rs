//! Ranking - Group, sum, sort, truncate
//!
//! Groups keep the order in which their key was first seen, and sorting is
//! stable, so equal totals stay in source order.

use ahash::AHashMap;

use crate::constants::EVOLUTION_RANKING_LIMIT;
use crate::domain::directory::{CountryDirectory, host_noc_for_year};
use crate::domain::medal::{GameRef, MedalCounts, MedalRecord, MedalSelection, MedalType};

/// Summed counts for one key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub key: String,
    pub counts: MedalCounts,
}

/// One bar of a ranking chart
#[derive(Debug, Clone, PartialEq)]
pub struct RankingEntry {
    /// Grouping key (NOC code or country name)
    pub key: String,
    /// Display label
    pub label: String,
    pub counts: MedalCounts,
    /// Value the ranking is sorted by
    pub value: u32,
    pub is_host: bool,
}

/// Ranked bars ready for rendering
#[derive(Debug, Clone, PartialEq)]
pub struct RankingView {
    pub title: String,
    pub subtitle: String,
    pub year: i32,
    /// Medal segments drawn per bar, bottom first; `[Total]` draws one bar
    pub stacks: Vec<MedalType>,
    pub entries: Vec<RankingEntry>,
    /// Short list shown next to the chart
    pub legend: Vec<String>,
    /// Shown instead of bars when `entries` is empty
    pub empty_text: String,
}

impl RankingView {
    pub fn max_value(&self) -> u32 {
        self.entries.iter().map(|e| e.value).max().unwrap_or(0)
    }
}

/// Sum counts per key, keeping first-encounter order
pub fn group_counts<'a, I>(rows: I) -> Vec<Group>
where
    I: IntoIterator<Item = (&'a str, MedalCounts)>,
{
    let mut index: AHashMap<&'a str, usize> = AHashMap::new();
    let mut groups: Vec<Group> = Vec::new();
    for (key, counts) in rows {
        match index.get(key) {
            Some(&i) => groups[i].counts.add(counts),
            None => {
                index.insert(key, groups.len());
                groups.push(Group {
                    key: key.to_string(),
                    counts,
                });
            }
        }
    }
    groups
}

/// Score, sort descending (stable) and keep the first `limit`
pub fn rank<F>(groups: Vec<Group>, score: F, limit: usize) -> Vec<(Group, u32)>
where
    F: Fn(&MedalCounts) -> u32,
{
    let mut scored: Vec<(Group, u32)> = groups
        .into_iter()
        .map(|g| {
            let value = score(&g.counts);
            (g, value)
        })
        .collect();
    scored.sort_by(|a, b| b.1.cmp(&a.1));
    scored.truncate(limit);
    scored
}

/// Per-year ranking of the evolution page: enabled medal types are summed
/// per NOC, the top fifteen are kept and the host nation is marked. Rows
/// flagged no-data are left out.
pub fn year_ranking(
    tally: &[MedalRecord],
    directory: &CountryDirectory,
    games: &[GameRef],
    year: i32,
    medals: MedalSelection,
) -> RankingView {
    let rows = tally
        .iter()
        .filter(|r| r.year == year)
        .filter_map(|r| Some((r.noc.as_str(), medals.apply(*r.tally().counts()?))));
    let ranked = rank(group_counts(rows), MedalCounts::total, EVOLUTION_RANKING_LIMIT);
    let host = host_noc_for_year(games, directory, year);

    let entries = ranked
        .into_iter()
        .map(|(group, value)| RankingEntry {
            label: directory.name_of(&group.key).to_string(),
            is_host: host == Some(group.key.as_str()),
            key: group.key,
            counts: group.counts,
            value,
        })
        .collect();

    RankingView {
        title: format!("Medal Count Ranking for {year} Olympics"),
        subtitle: String::new(),
        year,
        stacks: medals.enabled(),
        entries,
        legend: medals
            .enabled()
            .iter()
            .map(|m| m.label().to_string())
            .collect(),
        empty_text: format!("No medal data for {year}"),
    }
}
