//! Flow Controller
//!
//! Every control is fetch-invalidating. Node drags only move marks inside the
//! container and are forgotten on the next render.

use crate::constants::{FLOW_NODE_PADDING, FLOW_NODE_WIDTH};
use crate::domain::config::FlowDefaults;
use crate::domain::flow::{FlowGraph, FlowType};
use crate::domain::medal::MedalType;
use crate::error::Result;
use crate::eventing::{AppEvent, ChartId};
use crate::features::chart_host::{ChartHost, LOADING_TEXT};
use crate::render::Container;
use crate::render::scene_renderer::FLOW_MARGIN;
use crate::reshape::{FlowGeometry, layout_flow};
use crate::services::{FlowParams, Payload, Query, RequestId};
use crate::state::{FetchSlot, FlowFilter, Impact, LoadStatus, Settled};

const CHART: ChartId = ChartId::Flow;

pub struct FlowController {
    host: ChartHost,
    defaults: FlowDefaults,
    filter: FlowFilter,
    slot: FetchSlot<FlowParams, FlowGraph>,
}

impl FlowController {
    pub fn new(host: ChartHost, defaults: FlowDefaults) -> Self {
        let filter = FlowFilter::new(&defaults);
        Self {
            host,
            defaults,
            filter,
            slot: FetchSlot::new(),
        }
    }

    pub fn filter(&self) -> &FlowFilter {
        &self.filter
    }

    pub fn status(&self) -> &LoadStatus {
        self.slot.status()
    }

    pub fn container(&self) -> &Container {
        &self.host.container
    }

    pub fn load(&mut self) {
        let params = self.filter.params();
        if self.slot.get_for(&params).is_some() {
            self.render();
            return;
        }
        let request = self.slot.begin(params.clone());
        self.host.show_message(CHART, LOADING_TEXT);
        self.host.fetch(CHART, request, Query::Flow(params));
    }

    pub fn set_medal_type(&mut self, medal_type: MedalType) -> Impact {
        let impact = self.filter.set_medal_type(medal_type);
        self.apply(impact)
    }

    pub fn set_flow_type(&mut self, flow_type: FlowType) -> Impact {
        let impact = self.filter.set_flow_type(flow_type);
        self.apply(impact)
    }

    pub fn set_node_limit(&mut self, limit: u32) -> Result<Impact> {
        let impact = self.filter.set_node_limit(limit)?;
        Ok(self.apply(impact))
    }

    fn apply(&mut self, impact: Impact) -> Impact {
        if impact.needs_fetch() {
            self.load();
        } else if impact.needs_render() {
            self.render();
        }
        impact
    }

    /// Drag node `index` vertically; returns the offset actually applied
    pub fn drag_node(&mut self, index: usize, dy: f64) -> Option<f64> {
        self.host.container.drag(index, dy)
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Fetched { ticket, result } => {
                self.on_fetched(ticket.request, result.and_then(Payload::into_flow))
            }
            AppEvent::PlaybackTick { timer, .. } => {
                tracing::debug!("{}: no playback, ignoring tick from {}", CHART, timer)
            }
        }
    }

    fn on_fetched(&mut self, request: RequestId, result: Result<FlowGraph>) {
        match self.slot.settle(request, result) {
            Settled::Ready => self.render(),
            Settled::Failed(err) => self.host.show_error(CHART, &err),
            Settled::Stale => tracing::warn!("{}: discarding stale response {}", CHART, request),
        }
    }

    fn geometry(&self) -> FlowGeometry {
        FlowGeometry {
            width: (self.host.container.width() - 2.0 * FLOW_MARGIN).max(0.0),
            height: (self.host.container.height() - 2.0 * FLOW_MARGIN).max(0.0),
            node_width: FLOW_NODE_WIDTH,
            node_padding: FLOW_NODE_PADDING,
        }
    }

    fn render(&mut self) {
        let geometry = self.geometry();
        let Some(graph) = self.slot.data() else {
            return;
        };
        match layout_flow(graph, self.filter.medal_type(), geometry) {
            Ok(view) => self
                .host
                .draw(CHART, |renderer, container| renderer.render_flow(container, &view)),
            Err(err) => self.host.show_error(CHART, &err),
        }
    }

    pub fn teardown(&mut self) {
        self.slot.clear();
        self.filter.reset(&self.defaults);
        self.host.container.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    use crate::domain::flow::{FlowLink, FlowNode, NodeKind, NodeRef};
    use crate::features::chart_host::test_host;
    use crate::render::{Capability, SceneRenderer};
    use crate::services::RecordingDispatcher;

    fn controller() -> (FlowController, RecordingDispatcher) {
        let (host, recorder) = test_host("medal-flow", (1000.0, 700.0));
        (FlowController::new(host, FlowDefaults::default()), recorder)
    }

    fn graph() -> FlowGraph {
        let node = |name: &str, kind| FlowNode {
            id: None,
            name: name.into(),
            kind,
            color: None,
        };
        FlowGraph {
            nodes: vec![
                node("2008", NodeKind::Year),
                node("Athletics", NodeKind::Sport),
                node("Jamaica", NodeKind::Country),
            ],
            links: vec![
                FlowLink {
                    source: NodeRef::Index(0),
                    target: NodeRef::Index(1),
                    value: 11.0,
                },
                FlowLink {
                    source: NodeRef::Index(1),
                    target: NodeRef::Index(2),
                    value: 11.0,
                },
            ],
            years: vec![2008],
        }
    }

    fn deliver(flow: &mut FlowController, recorder: &RecordingDispatcher, graph: FlowGraph) {
        let (ticket, _) = recorder.last().expect("request");
        flow.handle_event(AppEvent::Fetched {
            ticket,
            result: Ok(Payload::Flow(graph)),
        });
    }

    #[test]
    fn test_empty_nodes_show_no_data_panel() {
        let (mut flow, recorder) = controller();
        flow.load();
        let mut empty = graph();
        empty.nodes.clear();
        deliver(&mut flow, &recorder, empty);

        let message = flow.container().message().expect("panel");
        assert!(message.starts_with("No data available"));
        assert_eq!(flow.container().marks_of("node").count(), 0);
        assert_eq!(flow.container().marks_of("link").count(), 0);
    }

    #[test]
    fn test_node_tooltip_and_drag() {
        let (mut flow, recorder) = controller();
        flow.load();
        deliver(&mut flow, &recorder, graph());

        let tooltips: Vec<&str> = flow
            .container()
            .marks_of("node")
            .filter_map(|m| m.tooltip.as_deref())
            .collect();
        assert_eq!(tooltips[1], "Athletics\nTotal: 11\nIncoming: 11\nOutgoing: 11");

        let moved = flow.drag_node(1, -10_000.0).expect("node exists");
        assert!(moved <= 0.0);
        assert_eq!(flow.drag_node(42, 5.0), None);

        // Re-rendering the cached graph discards the drag
        assert_eq!(flow.set_node_limit(20).expect("valid limit"), Impact::Refetch);
        deliver(&mut flow, &recorder, graph());
        assert_eq!(flow.container().offset_of(1), 0.0);
    }

    #[test]
    fn test_missing_layout_capability_shows_panel() {
        let recorder = RecordingDispatcher::new();
        let host = ChartHost::new(
            Container::new("medal-flow", 1000.0, 700.0),
            Rc::new(SceneRenderer::new().without(Capability::FlowLayout)),
            Rc::new(recorder.clone()),
        );
        let mut flow = FlowController::new(host, FlowDefaults::default());
        flow.load();
        deliver(&mut flow, &recorder, graph());

        let message = flow.container().message().expect("panel");
        assert!(message.contains("flow layout"));
    }
}
