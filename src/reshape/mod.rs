//! Reshape - Pure transformations from fetched records to chart views
//!
//! Every view is rebuilt from scratch on each state change; nothing here
//! keeps state between calls.

pub mod cumulative;
pub mod evolution;
pub mod flow;
pub mod heatmap;
pub mod host;
pub mod ranking;

pub use cumulative::{DominanceQuery, dominance_view};
pub use evolution::{EvolutionSeries, EvolutionView, SeriesPoint, build_evolution};
pub use flow::{FlowGeometry, FlowLinkView, FlowNodeView, FlowView, layout_flow, resolve_links};
pub use heatmap::{Cell, HeatmapView, build_heatmap};
pub use host::{
    HistoryView, HostBar, HostView, build_history_view, build_host_view, host_years, resolve_host,
};
pub use ranking::{RankingEntry, RankingView, group_counts, rank, year_ranking};
