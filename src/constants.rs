//! Constants
//!
//! Centralized defaults shared by controllers, reshapers and the renderer.

/// Default backend address
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

/// HTTP request timeout
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// First and last Summer Games covered by the dataset
pub const FIRST_OLYMPIC_YEAR: i32 = 1896;
pub const LAST_OLYMPIC_YEAR: i32 = 2020;

/// Years between consecutive Games
pub const OLYMPIAD_STEP: i32 = 4;

/// Playback tick intervals
pub const PLAYBACK_INTERVAL_MS: u64 = 1000;
pub const HOST_PLAYBACK_INTERVAL_MS: u64 = 2000;

/// Heatmap defaults
pub const DEFAULT_COUNTRY_COUNT: u32 = 25;

/// Flow diagram defaults
pub const DEFAULT_NODE_LIMIT: u32 = 15;

/// Ranking defaults
pub const EVOLUTION_RANKING_LIMIT: usize = 15;
pub const DOMINANCE_COUNTRY_LIMIT: usize = 10;
pub const DOMINANCE_LEGEND_SIZE: usize = 5;

/// Countries selected when the evolution chart first loads
pub const DEFAULT_SELECTED_COUNTRIES: [&str; 3] = ["USA", "CHN", "GBR"];

/// Chart canvas sizes (width, height) in pixels
pub const HEATMAP_SIZE: (f64, f64) = (1000.0, 600.0);
pub const FLOW_SIZE: (f64, f64) = (1000.0, 700.0);
pub const EVOLUTION_SIZE: (f64, f64) = (900.0, 450.0);
pub const RANKING_SIZE: (f64, f64) = (900.0, 400.0);
pub const DOMINANCE_SIZE: (f64, f64) = (800.0, 500.0);
pub const HOST_SIZE: (f64, f64) = (900.0, 450.0);
pub const HISTORY_SIZE: (f64, f64) = (900.0, 300.0);

/// Flow layout geometry
pub const FLOW_NODE_WIDTH: f64 = 15.0;
pub const FLOW_NODE_PADDING: f64 = 10.0;
