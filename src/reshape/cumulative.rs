//! Cumulative - Sport dominance rollups
//!
//! Rebuilt from the full row set on every tick. Rows are filtered to the
//! current year (or every year up to it), summed per country name and ranked.
//! Rows flagged no-data are skipped.

use crate::constants::DOMINANCE_LEGEND_SIZE;
use crate::domain::medal::MedalType;
use crate::domain::sport::SportMedalRow;
use crate::reshape::ranking::{RankingEntry, RankingView, group_counts, rank};

/// Inputs of one dominance frame
#[derive(Debug, Clone, Copy)]
pub struct DominanceQuery<'a> {
    pub sport: &'a str,
    pub year: i32,
    pub cumulative: bool,
    pub medal_type: MedalType,
    pub limit: usize,
}

pub fn dominance_view(rows: &[SportMedalRow], query: DominanceQuery<'_>) -> RankingView {
    let DominanceQuery {
        sport,
        year,
        cumulative,
        medal_type,
        limit,
    } = query;

    let selected = rows
        .iter()
        .filter(|r| if cumulative { r.year <= year } else { r.year == year })
        .filter_map(|r| Some((r.country.as_str(), *r.tally().counts()?)));
    let groups = group_counts(selected)
        .into_iter()
        .filter(|g| medal_type.pick(&g.counts) > 0)
        .collect();
    let ranked = rank(groups, |c| medal_type.pick(c), limit);

    let entries: Vec<RankingEntry> = ranked
        .into_iter()
        .map(|(group, value)| RankingEntry {
            label: group.key.clone(),
            key: group.key,
            counts: group.counts,
            value,
            is_host: false,
        })
        .collect();

    let legend = entries
        .iter()
        .take(DOMINANCE_LEGEND_SIZE)
        .map(|e| format!("{}: {}", e.label, e.value))
        .collect();

    let mode = if cumulative { "Cumulative" } else { "Year" };
    let subtitle = if cumulative {
        format!("Up to {year}")
    } else {
        format!("Year {year}")
    };

    RankingView {
        title: format!("{} Medals in {sport} ({mode})", medal_type.label()),
        subtitle,
        year,
        stacks: vec![medal_type],
        entries,
        legend,
        empty_text: format!("No medal data available for {sport} in {year}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(country: &str, year: i32, gold: u32, silver: u32, bronze: u32) -> SportMedalRow {
        SportMedalRow {
            country: country.into(),
            year,
            gold: Some(gold),
            silver: Some(silver),
            bronze: Some(bronze),
        }
    }

    fn rows() -> Vec<SportMedalRow> {
        vec![
            row("Hungary", 1896, 2, 1, 0),
            row("United States", 1896, 1, 0, 0),
            row("United States", 1900, 3, 1, 1),
            row("Hungary", 1904, 0, 0, 1),
            row("Germany", 1904, 0, 2, 0),
        ]
    }

    fn query(year: i32, cumulative: bool, medal_type: MedalType) -> DominanceQuery<'static> {
        DominanceQuery {
            sport: "Swimming",
            year,
            cumulative,
            medal_type,
            limit: 10,
        }
    }

    #[test]
    fn test_cumulative_sums_up_to_year() {
        let view = dominance_view(&rows(), query(1900, true, MedalType::Total));
        let values: Vec<(&str, u32)> = view
            .entries
            .iter()
            .map(|e| (e.label.as_str(), e.value))
            .collect();
        assert_eq!(values, vec![("United States", 6), ("Hungary", 3)]);
        assert_eq!(view.subtitle, "Up to 1900");
        assert_eq!(view.title, "Total Medals in Swimming (Cumulative)");
    }

    #[test]
    fn test_single_year_drops_zero_entries() {
        let view = dominance_view(&rows(), query(1904, false, MedalType::Gold));
        assert!(view.entries.is_empty());
        assert_eq!(view.empty_text, "No medal data available for Swimming in 1904");

        let silver = dominance_view(&rows(), query(1904, false, MedalType::Silver));
        assert_eq!(silver.entries.len(), 1);
        assert_eq!(silver.entries[0].label, "Germany");
    }

    #[test]
    fn test_no_data_rows_are_skipped() {
        let mut rows = rows();
        rows[0].silver = None;
        let view = dominance_view(&rows, query(1896, false, MedalType::Gold));
        let labels: Vec<&str> = view.entries.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["United States"]);
    }

    #[test]
    fn test_legend_lists_top_five() {
        let many: Vec<SportMedalRow> = (0..8)
            .map(|i| row(&format!("Country {i}"), 2000, 8 - i, 0, 0))
            .collect();
        let view = dominance_view(&many, query(2000, false, MedalType::Gold));
        assert_eq!(view.legend.len(), 5);
        assert_eq!(view.legend[0], "Country 0: 8");
    }
}
