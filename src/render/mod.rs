//! Render - Chart renderer contract and the scene implementation
//!
//! ```text
//! AggregateView ──► ChartRenderer::render_*(container, view)
//!                        │ check container + capability
//!                        │ clear
//!                        ▼
//!                   Container (marks) ──► svg::to_svg
//! ```

pub mod scale;
pub mod scene;
pub mod scene_renderer;
pub mod svg;

use crate::error::Result;
use crate::reshape::{EvolutionView, FlowView, HeatmapView, HistoryView, HostView, RankingView};

pub use scene::{Anchor, Container, MESSAGE_CLASS, Mark, Shape, Style};
pub use scene_renderer::SceneRenderer;
pub use svg::to_svg;

/// Optional drawing features a renderer may lack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Year → sport → country flow diagrams
    FlowLayout,
}

impl Capability {
    pub fn label(&self) -> &'static str {
        match self {
            Capability::FlowLayout => "flow layout",
        }
    }
}

/// Draws aggregate views into containers.
///
/// Every method checks its preconditions first and fails with
/// `Error::RenderPrecondition` without touching the container; otherwise it
/// clears the container and draws from scratch, so equal inputs always give
/// equal content.
pub trait ChartRenderer {
    fn supports(&self, capability: Capability) -> bool;

    fn render_heatmap(&self, container: &mut Container, view: &HeatmapView) -> Result<()>;

    fn render_flow(&self, container: &mut Container, view: &FlowView) -> Result<()>;

    fn render_evolution(&self, container: &mut Container, view: &EvolutionView) -> Result<()>;

    /// Per-year medal ranking of the evolution page
    fn render_ranking(&self, container: &mut Container, view: &RankingView) -> Result<()>;

    /// Sport dominance horizontal bars
    fn render_dominance(&self, container: &mut Container, view: &RankingView) -> Result<()>;

    fn render_host(&self, container: &mut Container, view: &HostView) -> Result<()>;

    fn render_history(&self, container: &mut Container, view: &HistoryView) -> Result<()>;

    /// Replace the chart with an inline message panel
    fn render_message(&self, container: &mut Container, message: &str) -> Result<()>;
}
