//! Config - Application Configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::constants::{
    DEFAULT_BASE_URL, DEFAULT_COUNTRY_COUNT, DEFAULT_NODE_LIMIT, DEFAULT_SELECTED_COUNTRIES,
    DOMINANCE_COUNTRY_LIMIT, HOST_PLAYBACK_INTERVAL_MS, OLYMPIAD_STEP, PLAYBACK_INTERVAL_MS,
    REQUEST_TIMEOUT_SECS,
};
use crate::domain::flow::FlowType;
use crate::domain::matrix::YearRange;
use crate::domain::medal::MedalType;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Backend connection
    pub server: ServerConfig,
    /// Playback timing
    pub playback: PlaybackConfig,
    /// Export destination
    pub export: ExportConfig,
    /// Initial heatmap controls
    pub heatmap: HeatmapDefaults,
    /// Initial flow diagram controls
    pub flow: FlowDefaults,
    /// Initial evolution chart controls
    pub evolution: EvolutionDefaults,
    /// Initial sport dominance controls
    pub dominance: DominanceDefaults,
}

/// Backend connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Base URL, e.g. "http://127.0.0.1:5000"
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: REQUEST_TIMEOUT_SECS,
        }
    }
}

/// Playback timing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Tick interval for year-stepping charts
    pub interval_ms: u64,
    /// Tick interval for the host-country chart
    pub host_interval_ms: u64,
    /// Years advanced per tick
    pub step: i32,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            interval_ms: PLAYBACK_INTERVAL_MS,
            host_interval_ms: HOST_PLAYBACK_INTERVAL_MS,
            step: OLYMPIAD_STEP,
        }
    }
}

/// Where rendered charts are written
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Output directory for SVG files
    pub dir: PathBuf,
    /// Also export one frame per sport-dominance playback tick
    pub frames: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("charts"),
            frames: false,
        }
    }
}

/// Heatmap control defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HeatmapDefaults {
    pub medal_type: MedalType,
    pub year_range: YearRange,
    pub country_count: u32,
    pub cluster: bool,
}

impl Default for HeatmapDefaults {
    fn default() -> Self {
        Self {
            medal_type: MedalType::Total,
            year_range: YearRange::Recent,
            country_count: DEFAULT_COUNTRY_COUNT,
            cluster: true,
        }
    }
}

/// Flow diagram control defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowDefaults {
    pub medal_type: MedalType,
    pub flow_type: FlowType,
    pub node_limit: u32,
}

impl Default for FlowDefaults {
    fn default() -> Self {
        Self {
            medal_type: MedalType::Total,
            flow_type: FlowType::YearSportCountry,
            node_limit: DEFAULT_NODE_LIMIT,
        }
    }
}

/// Evolution chart control defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionDefaults {
    /// Initially selected NOC codes
    pub countries: Vec<String>,
}

impl Default for EvolutionDefaults {
    fn default() -> Self {
        Self {
            countries: DEFAULT_SELECTED_COUNTRIES
                .iter()
                .map(|c| c.to_string())
                .collect(),
        }
    }
}

/// Sport dominance control defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DominanceDefaults {
    /// Sport to load first; the first listed sport when unset
    pub sport: Option<String>,
    pub country_limit: usize,
    pub cumulative: bool,
}

impl Default for DominanceDefaults {
    fn default() -> Self {
        Self {
            sport: None,
            country_limit: DOMINANCE_COUNTRY_LIMIT,
            cumulative: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [server]
            base_url = "http://olympics.local:8080"

            [heatmap]
            medal_type = "gold"
            year_range = "1996-2020"
            country_count = 10
            "#,
        )
        .expect("valid toml");
        assert_eq!(config.server.base_url, "http://olympics.local:8080");
        assert_eq!(config.server.timeout_secs, REQUEST_TIMEOUT_SECS);
        assert_eq!(config.heatmap.medal_type, MedalType::Gold);
        assert_eq!(
            config.heatmap.year_range,
            YearRange::Span {
                start: 1996,
                end: 2020
            }
        );
        assert_eq!(config.evolution.countries, vec!["USA", "CHN", "GBR"]);
    }

    #[test]
    fn test_roundtrip_through_toml() {
        let text = toml::to_string_pretty(&AppConfig::default()).expect("serialize");
        let back: AppConfig = toml::from_str(&text).expect("parse");
        assert_eq!(back.flow.flow_type, FlowType::YearSportCountry);
        assert_eq!(back.playback.step, OLYMPIAD_STEP);
    }
}
