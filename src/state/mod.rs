//! State - Per-chart view state
//!
//! Each chart owns one filter. Setters report an [`Impact`] so the owning
//! controller knows whether to refetch or only re-render.

pub mod dominance_filter;
pub mod evolution_filter;
pub mod fetch_slot;
pub mod flow_filter;
pub mod heatmap_filter;
pub mod host_filter;
pub mod impact;
pub mod selection;

pub use dominance_filter::DominanceFilter;
pub use evolution_filter::EvolutionFilter;
pub use fetch_slot::{FetchSlot, LoadStatus, Settled};
pub use flow_filter::FlowFilter;
pub use heatmap_filter::HeatmapFilter;
pub use host_filter::HostFilter;
pub use impact::Impact;
pub use selection::SelectionSet;
