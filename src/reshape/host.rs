//! Host - Host-country performance and medal history
//!
//! The requested year is resolved to the nearest host year exactly once;
//! both charts are then built for that host.

use crate::domain::directory::nearest_year;
use crate::domain::host::HostPerformance;
use crate::domain::medal::{HostCity, MedalType, Tally};
use crate::error::{Error, Result};

/// One Games on the performance chart
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HostBar {
    pub year: i32,
    pub tally: Tally,
    /// Value of the selected medal type; `None` draws a placeholder
    pub value: Option<u32>,
    pub is_host_year: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HostView {
    pub host_country: String,
    pub host_year: i32,
    pub title: String,
    pub subtitle: String,
    pub medal_type: MedalType,
    pub bars: Vec<HostBar>,
    pub pre_host_avg: Option<f64>,
    pub post_host_avg: Option<f64>,
    pub y_max: u32,
}

/// Stacked medal history of the host country
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryView {
    pub host_country: String,
    pub host_year: i32,
    pub bars: Vec<HostBar>,
    pub y_max: u32,
}

/// Host years in ascending order
pub fn host_years(hosts: &[HostPerformance]) -> Vec<i32> {
    let mut years: Vec<i32> = hosts.iter().map(|h| h.host_year).collect();
    years.sort_unstable();
    years.dedup();
    years
}

/// The host whose year is closest to `requested`
pub fn resolve_host(hosts: &[HostPerformance], requested: i32) -> Result<&HostPerformance> {
    let year = nearest_year(&host_years(hosts), requested)
        .ok_or_else(|| Error::data_shape("no host performance data available"))?;
    hosts
        .iter()
        .find(|h| h.host_year == year)
        .ok_or_else(|| Error::data_shape(format!("no host for {year}")))
}

fn bars(host: &HostPerformance, medal_type: MedalType) -> Result<Vec<HostBar>> {
    if host.performance.is_empty() {
        return Err(Error::data_shape(format!(
            "no performance data available for {}",
            host.host_country
        )));
    }
    let mut bars: Vec<HostBar> = host
        .performance
        .iter()
        .map(|p| {
            let tally = p.tally();
            let value = match medal_type {
                MedalType::Gold => p.gold,
                MedalType::Silver => p.silver,
                MedalType::Bronze => p.bronze,
                MedalType::Total => tally.total(),
            };
            HostBar {
                year: p.year,
                tally,
                value,
                is_host_year: p.year == host.host_year,
            }
        })
        .collect();
    bars.sort_by_key(|b| b.year);
    Ok(bars)
}

fn mean(values: impl Iterator<Item = u32>) -> Option<f64> {
    let (sum, count) = values.fold((0u64, 0u32), |(s, c), v| (s + u64::from(v), c + 1));
    (count > 0).then(|| sum as f64 / f64::from(count))
}

pub fn build_host_view(
    host: &HostPerformance,
    medal_type: MedalType,
    cities: &[HostCity],
) -> Result<HostView> {
    let bars = bars(host, medal_type)?;
    let hy = host.host_year;

    let pre_host_avg = mean(bars.iter().filter(|b| b.year < hy).filter_map(|b| b.value));
    let post_host_avg = mean(bars.iter().filter(|b| b.year > hy).filter_map(|b| b.value));
    let y_max = bars.iter().filter_map(|b| b.value).max().unwrap_or(0);

    let subtitle = match cities.iter().find(|c| c.year == hy) {
        Some(city) => format!("Host Year: {hy} ({})", city.city),
        None => format!("Host Year: {hy}"),
    };

    Ok(HostView {
        host_country: host.host_country.clone(),
        host_year: hy,
        title: format!("{} Olympic Performance", host.host_country),
        subtitle,
        medal_type,
        bars,
        pre_host_avg,
        post_host_avg,
        y_max,
    })
}

pub fn build_history_view(host: &HostPerformance) -> Result<HistoryView> {
    let bars = bars(host, MedalType::Total)?;
    let y_max = bars.iter().filter_map(|b| b.tally.total()).max().unwrap_or(0);
    Ok(HistoryView {
        host_country: host.host_country.clone(),
        host_year: host.host_year,
        bars,
        y_max,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::host::PerformancePoint;

    fn point(year: i32, counts: Option<(u32, u32, u32)>) -> PerformancePoint {
        match counts {
            Some((g, s, b)) => PerformancePoint {
                year,
                gold: Some(g),
                silver: Some(s),
                bronze: Some(b),
                total: Some(g + s + b),
            },
            None => PerformancePoint {
                year,
                gold: None,
                silver: None,
                bronze: None,
                total: None,
            },
        }
    }

    fn greece() -> HostPerformance {
        HostPerformance {
            host_year: 2004,
            host_country: "Greece".into(),
            host_noc: Some("GRE".into()),
            performance: vec![
                point(1996, Some((4, 4, 0))),
                point(2000, Some((4, 6, 3))),
                point(1992, None),
                point(2004, Some((6, 6, 4))),
                point(2008, Some((0, 2, 2))),
            ],
        }
    }

    fn hosts() -> Vec<HostPerformance> {
        let mut australia = greece();
        australia.host_year = 2000;
        australia.host_country = "Australia".into();
        vec![greece(), australia]
    }

    #[test]
    fn test_resolve_snaps_to_nearest_host() {
        let hosts = hosts();
        assert_eq!(resolve_host(&hosts, 2003).expect("host").host_year, 2004);
        assert_eq!(resolve_host(&hosts, 1900).expect("host").host_year, 2000);
        assert!(resolve_host(&[], 2000).expect_err("empty").is_no_data());
    }

    #[test]
    fn test_host_view_averages_skip_missing_years() {
        let view = build_host_view(&greece(), MedalType::Total, &[]).expect("view");
        let years: Vec<i32> = view.bars.iter().map(|b| b.year).collect();
        assert_eq!(years, vec![1992, 1996, 2000, 2004, 2008]);
        assert_eq!(view.bars[0].value, None);
        assert!(view.bars[0].tally.is_no_data());
        assert!(view.bars[3].is_host_year);
        assert_eq!(view.pre_host_avg, Some(10.5));
        assert_eq!(view.post_host_avg, Some(4.0));
        assert_eq!(view.y_max, 16);
        assert_eq!(view.title, "Greece Olympic Performance");
        assert_eq!(view.subtitle, "Host Year: 2004");
    }

    #[test]
    fn test_subtitle_names_city() {
        let cities = vec![HostCity {
            year: 2004,
            city: "Athens".into(),
            country: "Greece".into(),
        }];
        let view = build_host_view(&greece(), MedalType::Gold, &cities).expect("view");
        assert_eq!(view.subtitle, "Host Year: 2004 (Athens)");
        assert_eq!(view.y_max, 6);
    }

    #[test]
    fn test_history_totals_match_counts() {
        let view = build_history_view(&greece()).expect("history");
        for bar in &view.bars {
            if let Some(counts) = bar.tally.counts() {
                assert_eq!(counts.gold + counts.silver + counts.bronze, counts.total());
            }
        }
        assert_eq!(view.y_max, 16);
    }

    #[test]
    fn test_empty_performance_is_data_shape() {
        let mut host = greece();
        host.performance.clear();
        assert!(build_history_view(&host).expect_err("empty").is_no_data());
    }
}
