//! Workspace - Every chart page plus the event pump routing
//!
//! The workspace owns one controller per page and routes each [`AppEvent`]
//! to the controller that owns the addressed chart.

use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::constants::{
    DOMINANCE_SIZE, EVOLUTION_SIZE, FLOW_SIZE, HEATMAP_SIZE, HISTORY_SIZE, HOST_SIZE, RANKING_SIZE,
};
use crate::domain::config::AppConfig;
use crate::error::Result;
use crate::eventing::{AppEvent, ChartId};
use crate::features::{
    ChartHost, DominanceController, EvolutionController, FlowController, HeatmapController,
    HostPerformanceController,
};
use crate::helpers::{ensure_dir, file_stem};
use crate::playback::Timer;
use crate::render::{ChartRenderer, Container, to_svg};
use crate::services::Dispatcher;
use crate::state::LoadStatus;

fn container(chart: ChartId, size: (f64, f64)) -> Container {
    Container::new(chart.label(), size.0, size.1)
}

/// All chart pages of the application
pub struct Workspace {
    pub heatmap: HeatmapController,
    pub flow: FlowController,
    pub evolution: EvolutionController,
    pub dominance: DominanceController,
    pub host: HostPerformanceController,
}

impl Workspace {
    /// Build every page. `timer` is called once per playback chart.
    pub fn new<F>(
        config: &AppConfig,
        renderer: Rc<dyn ChartRenderer>,
        dispatcher: Rc<dyn Dispatcher>,
        mut timer: F,
    ) -> Result<Self>
    where
        F: FnMut() -> Box<dyn Timer>,
    {
        let host = |chart: ChartId, size| {
            ChartHost::new(container(chart, size), renderer.clone(), dispatcher.clone())
        };

        Ok(Self {
            heatmap: HeatmapController::new(
                host(ChartId::Heatmap, HEATMAP_SIZE),
                config.heatmap.clone(),
            ),
            flow: FlowController::new(host(ChartId::Flow, FLOW_SIZE), config.flow.clone()),
            evolution: EvolutionController::new(
                host(ChartId::Evolution, EVOLUTION_SIZE),
                container(ChartId::Ranking, RANKING_SIZE),
                config.evolution.clone(),
                &config.playback,
                timer(),
            )?,
            dominance: DominanceController::new(
                host(ChartId::Dominance, DOMINANCE_SIZE),
                config.dominance.clone(),
                &config.playback,
                timer(),
            )?,
            host: HostPerformanceController::new(
                host(ChartId::HostPerformance, HOST_SIZE),
                container(ChartId::MedalHistory, HISTORY_SIZE),
                &config.playback,
                timer(),
            ),
        })
    }

    /// Start the initial fetch of every page
    pub fn load_all(&mut self) {
        self.heatmap.load();
        self.flow.load();
        self.evolution.load();
        self.dominance.load();
        self.host.load();
    }

    /// Route an event to the page owning its chart
    pub fn dispatch_event(&mut self, event: AppEvent) {
        match event.chart() {
            ChartId::Heatmap => self.heatmap.handle_event(event),
            ChartId::Flow => self.flow.handle_event(event),
            ChartId::Evolution | ChartId::Ranking => self.evolution.handle_event(event),
            ChartId::Dominance => self.dominance.handle_event(event),
            ChartId::HostPerformance | ChartId::MedalHistory => self.host.handle_event(event),
        }
    }

    /// Whether any page is still waiting on the backend
    pub fn is_loading(&self) -> bool {
        [
            self.heatmap.status(),
            self.flow.status(),
            self.evolution.status(),
            self.dominance.status(),
            self.host.status(),
        ]
        .into_iter()
        .any(|status| *status == LoadStatus::Loading)
    }

    /// Whether any playback timer is running
    pub fn is_playing(&self) -> bool {
        self.evolution.is_playing() || self.dominance.is_playing() || self.host.is_playing()
    }

    /// Every chart container, in page order
    pub fn containers(&self) -> [&Container; 7] {
        [
            self.heatmap.container(),
            self.flow.container(),
            self.evolution.container(),
            self.evolution.ranking_container(),
            self.dominance.container(),
            self.host.container(),
            self.host.history_container(),
        ]
    }

    /// Write every chart, plus any recorded dominance frames, as SVG files
    /// under `dir`. Returns the written paths.
    pub fn export(&mut self, dir: &Path) -> Result<Vec<PathBuf>> {
        ensure_dir(dir)?;
        let mut written = Vec::new();
        for container in self.containers() {
            let path = dir.join(format!("{}.svg", file_stem(container.id())));
            std::fs::write(&path, to_svg(container))?;
            written.push(path);
        }

        let frames = self.dominance.take_frames();
        if !frames.is_empty() {
            let sport = self.dominance.filter().sport().unwrap_or("sport");
            let frame_dir = dir.join("frames");
            ensure_dir(&frame_dir)?;
            for (year, svg) in frames {
                let path = frame_dir.join(format!("{}-{year}.svg", file_stem(sport)));
                std::fs::write(&path, svg)?;
                written.push(path);
            }
        }
        tracing::info!("Exported {} chart files to {}", written.len(), dir.display());
        Ok(written)
    }

    pub fn teardown(&mut self) {
        self.heatmap.teardown();
        self.flow.teardown();
        self.evolution.teardown();
        self.dominance.teardown();
        self.host.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eventing::Ticket;
    use crate::playback::ManualTimer;
    use crate::render::SceneRenderer;
    use crate::services::{Payload, Query, RecordingDispatcher};

    fn workspace() -> (Workspace, RecordingDispatcher, ManualTimer) {
        let recorder = RecordingDispatcher::new();
        let timer = ManualTimer::new();
        let timers = timer.clone();
        let workspace = Workspace::new(
            &AppConfig::default(),
            Rc::new(SceneRenderer::new()),
            Rc::new(recorder.clone()),
            move || -> Box<dyn Timer> { Box::new(timers.clone()) },
        )
        .expect("default config is valid");
        (workspace, recorder, timer)
    }

    fn ticket_for(recorder: &RecordingDispatcher, chart: ChartId) -> Ticket {
        recorder
            .sent()
            .into_iter()
            .rev()
            .map(|(ticket, _)| ticket)
            .find(|ticket| ticket.chart == chart)
            .expect("request for chart")
    }

    #[test]
    fn test_load_all_requests_every_page() {
        let (mut workspace, recorder, _) = workspace();
        workspace.load_all();

        let sent = recorder.sent();
        let queries: Vec<&str> = sent.iter().map(|(_, q)| q.name()).collect();
        assert_eq!(
            queries,
            vec!["sport-country-matrix", "medal-flow", "evolution-bundle", "sports", "host-bundle"]
        );
        assert!(workspace.is_loading());
        assert!(!workspace.is_playing());
        for container in workspace.containers() {
            assert!(container.message().is_some() || container.is_empty());
        }
    }

    #[test]
    fn test_events_reach_the_owning_page() {
        let (mut workspace, recorder, _) = workspace();
        workspace.load_all();

        let ticket = ticket_for(&recorder, ChartId::Dominance);
        workspace.dispatch_event(AppEvent::Fetched {
            ticket,
            result: Ok(Payload::Sports(vec!["Fencing".into()])),
        });
        let (ticket, query) = recorder.last().expect("sport medals request");
        assert_eq!(ticket.chart, ChartId::Dominance);
        assert_eq!(
            query,
            Query::SportMedals {
                sport: "Fencing".into()
            }
        );

        let ticket = ticket_for(&recorder, ChartId::HostPerformance);
        workspace.dispatch_event(AppEvent::Fetched {
            ticket,
            result: Err(crate::error::Error::Http { status: 502 }),
        });
        assert!(matches!(workspace.host.status(), LoadStatus::Failed(_)));
        assert!(workspace.heatmap.status() == &LoadStatus::Loading);
    }

    #[test]
    fn test_export_writes_one_file_per_chart() {
        let (mut workspace, _, _) = workspace();
        workspace.load_all();
        let dir = std::env::temp_dir().join(format!("medal-viz-export-{}", std::process::id()));

        let written = workspace.export(&dir).expect("export succeeds");
        assert_eq!(written.len(), 7);
        assert!(written[0].ends_with("heatmap.svg"));
        let svg = std::fs::read_to_string(&written[0]).expect("readable export");
        assert!(svg.contains("Loading..."));

        std::fs::remove_dir_all(&dir).expect("cleanup");
    }
}
