//! Heatmap - Sport × country grid

use ahash::AHashMap;

use crate::domain::matrix::MatrixResponse;
use crate::error::{Error, Result};
use crate::state::HeatmapFilter;

/// One grid cell. Zero cells and cells missing from the response render
/// differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Absent,
    Zero,
    Count(u32),
}

impl Cell {
    pub fn value(&self) -> Option<u32> {
        match self {
            Cell::Absent => None,
            Cell::Zero => Some(0),
            Cell::Count(n) => Some(*n),
        }
    }
}

/// Heatmap ready for rendering; rows follow `countries`, columns `sports`
#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapView {
    pub title: String,
    pub subtitle: String,
    pub countries: Vec<String>,
    pub country_labels: Vec<String>,
    pub sports: Vec<String>,
    pub cells: Vec<Vec<Cell>>,
    pub max_value: f64,
    /// Row indices where a new country cluster starts
    pub country_breaks: Vec<usize>,
    /// Column indices where a new sport cluster starts
    pub sport_breaks: Vec<usize>,
}

impl HeatmapView {
    pub fn cell(&self, country: &str, sport: &str) -> Option<Cell> {
        let row = self.countries.iter().position(|c| c == country)?;
        let col = self.sports.iter().position(|s| s == sport)?;
        Some(self.cells[row][col])
    }
}

/// Indices `i > 0` where `keys[i]` maps to a different cluster than `keys[i - 1]`
fn cluster_breaks(keys: &[String], clusters: &AHashMap<&str, Option<u32>>) -> Vec<usize> {
    let cluster_of = |key: &String| clusters.get(key.as_str()).copied().flatten();
    (1..keys.len())
        .filter(|&i| cluster_of(&keys[i]) != cluster_of(&keys[i - 1]))
        .collect()
}

pub fn build_heatmap(response: &MatrixResponse, filter: &HeatmapFilter) -> Result<HeatmapView> {
    if response.countries.is_empty() || response.sports.is_empty() {
        return Err(Error::data_shape("matrix has no countries or sports"));
    }

    let rows: AHashMap<&str, usize> = response
        .countries
        .iter()
        .enumerate()
        .map(|(i, c)| (c.as_str(), i))
        .collect();
    let cols: AHashMap<&str, usize> = response
        .sports
        .iter()
        .enumerate()
        .map(|(i, s)| (s.as_str(), i))
        .collect();

    let mut cells = vec![vec![Cell::Absent; response.sports.len()]; response.countries.len()];
    let mut labels: Vec<Option<&str>> = vec![None; response.countries.len()];
    let mut country_clusters: AHashMap<&str, Option<u32>> = AHashMap::new();
    let mut sport_clusters: AHashMap<&str, Option<u32>> = AHashMap::new();
    let mut observed_max = 0u32;

    for entry in &response.data {
        let row = *rows.get(entry.country.as_str()).ok_or_else(|| {
            Error::data_shape(format!("cell for unknown country {}", entry.country))
        })?;
        let col = *cols
            .get(entry.sport.as_str())
            .ok_or_else(|| Error::data_shape(format!("cell for unknown sport {}", entry.sport)))?;

        cells[row][col] = if entry.value == 0 {
            Cell::Zero
        } else {
            Cell::Count(entry.value)
        };
        observed_max = observed_max.max(entry.value);

        if labels[row].is_none() {
            labels[row] = entry.country_name.as_deref();
        }
        country_clusters.insert(entry.country.as_str(), entry.country_cluster);
        sport_clusters.insert(entry.sport.as_str(), entry.sport_cluster);
    }

    let (country_breaks, sport_breaks) = if filter.cluster() {
        (
            cluster_breaks(&response.countries, &country_clusters),
            cluster_breaks(&response.sports, &sport_clusters),
        )
    } else {
        (Vec::new(), Vec::new())
    };

    let max_value = if response.max_value > 0.0 {
        response.max_value
    } else {
        f64::from(observed_max)
    };

    let span = match (response.year_min, response.year_max) {
        (Some(min), Some(max)) => format!(" ({min}-{max})"),
        _ => String::new(),
    };

    Ok(HeatmapView {
        title: "Olympic Medal Distribution by Country and Sport".into(),
        subtitle: format!(
            "{} - {}{}",
            filter.medal_type().label(),
            filter.year_range().label(),
            span
        ),
        country_labels: response
            .countries
            .iter()
            .zip(&labels)
            .map(|(code, label)| label.unwrap_or(code.as_str()).to_string())
            .collect(),
        countries: response.countries.clone(),
        sports: response.sports.clone(),
        cells,
        max_value,
        country_breaks,
        sport_breaks,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::HeatmapDefaults;
    use crate::domain::matrix::{MatrixEntry, YearRange};
    use crate::domain::medal::MedalType;

    fn entry(country: &str, sport: &str, value: u32, clusters: (u32, u32)) -> MatrixEntry {
        MatrixEntry {
            country: country.into(),
            country_name: Some(format!("{country} name")),
            sport: sport.into(),
            value,
            country_cluster: Some(clusters.0),
            sport_cluster: Some(clusters.1),
        }
    }

    /// Ten countries, three sports, gold medals 1996-2020
    fn matrix() -> MatrixResponse {
        let countries: Vec<String> = (0..10).map(|i| format!("C{i}")).collect();
        let sports = vec!["Athletics".to_string(), "Rowing".into(), "Swimming".into()];
        let mut data = Vec::new();
        for (i, c) in countries.iter().enumerate() {
            let cluster = if i < 4 { 0 } else { 1 };
            data.push(entry(c, "Athletics", (i as u32) * 2, (cluster, 0)));
            if i % 2 == 0 {
                data.push(entry(c, "Swimming", 0, (cluster, 1)));
            }
        }
        MatrixResponse {
            countries,
            sports,
            max_value: 18.0,
            year_min: Some(1996),
            year_max: Some(2020),
            data,
        }
    }

    fn gold_filter(cluster: bool) -> HeatmapFilter {
        let mut filter = HeatmapFilter::new(&HeatmapDefaults::default());
        filter.set_medal_type(MedalType::Gold);
        filter.set_year_range(YearRange::Span {
            start: 1996,
            end: 2020,
        });
        filter.set_country_count(10).expect("valid count");
        filter.set_cluster(cluster);
        filter
    }

    #[test]
    fn test_zero_cells_differ_from_absent_cells() {
        let view = build_heatmap(&matrix(), &gold_filter(true)).expect("valid matrix");
        assert_eq!(view.countries.len(), 10);
        assert_eq!(view.sports.len(), 3);

        assert_eq!(view.cell("C0", "Swimming"), Some(Cell::Zero));
        assert_eq!(view.cell("C1", "Swimming"), Some(Cell::Absent));
        assert_eq!(view.cell("C0", "Athletics"), Some(Cell::Zero));
        assert_eq!(view.cell("C3", "Athletics"), Some(Cell::Count(6)));
        assert_eq!(view.cell("C3", "Rowing"), Some(Cell::Absent));
        assert_eq!(view.subtitle, "Gold - 1996-2020 (1996-2020)");
        assert_eq!(view.country_labels[2], "C2 name");
    }

    #[test]
    fn test_cluster_breaks_follow_toggle() {
        let view = build_heatmap(&matrix(), &gold_filter(true)).expect("valid matrix");
        assert_eq!(view.country_breaks, vec![4]);
        // Rowing has no entries, so its cluster is unknown on both sides
        assert_eq!(view.sport_breaks, vec![1, 2]);

        let flat = build_heatmap(&matrix(), &gold_filter(false)).expect("valid matrix");
        assert!(flat.country_breaks.is_empty() && flat.sport_breaks.is_empty());
        assert_eq!(flat.cells, view.cells);
    }

    #[test]
    fn test_unknown_country_is_data_shape() {
        let mut response = matrix();
        response.data.push(entry("ZZZ", "Rowing", 1, (0, 0)));
        let err = build_heatmap(&response, &gold_filter(true)).expect_err("unknown country");
        assert!(err.is_no_data());
    }
}
