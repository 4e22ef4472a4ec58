//! Features - One controller per chart page
//!
//! Each feature owns its filter, fetch slot and container(s), and reacts to
//! the [`AppEvent`](crate::eventing::AppEvent)s addressed to its charts.

pub mod chart_host;
pub mod dominance;
pub mod evolution;
pub mod flow;
pub mod heatmap;
pub mod host_performance;

pub use chart_host::ChartHost;
pub use dominance::DominanceController;
pub use evolution::EvolutionController;
pub use flow::FlowController;
pub use heatmap::HeatmapController;
pub use host_performance::HostPerformanceController;
