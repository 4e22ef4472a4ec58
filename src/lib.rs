//! Medal Viz Library
//!
//! Chart client for an Olympic medal dataset: fetches aggregates from the
//! medal backend, reshapes them into chart views and renders heatmap, flow,
//! evolution, ranking, dominance and host-performance charts with timer
//! driven year playback.

pub mod app;
pub mod constants;
pub mod domain;
pub mod error;
pub mod eventing;
pub mod features;
pub mod helpers;
pub mod playback;
pub mod render;
pub mod reshape;
pub mod services;
pub mod state;
pub mod theme;
pub mod utils;
