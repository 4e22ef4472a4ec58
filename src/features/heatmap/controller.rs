//! Heatmap Controller
//!
//! Fetch-invalidating controls (medal type, year range, country count) start a
//! new request; the clustering toggle only redraws the cached matrix.

use crate::domain::config::HeatmapDefaults;
use crate::domain::matrix::{MatrixResponse, YearRange};
use crate::domain::medal::MedalType;
use crate::error::Result;
use crate::eventing::{AppEvent, ChartId};
use crate::features::chart_host::{ChartHost, LOADING_TEXT};
use crate::render::Container;
use crate::reshape::build_heatmap;
use crate::services::{MatrixParams, Payload, Query, RequestId};
use crate::state::{FetchSlot, HeatmapFilter, Impact, LoadStatus, Settled};

const CHART: ChartId = ChartId::Heatmap;

pub struct HeatmapController {
    host: ChartHost,
    defaults: HeatmapDefaults,
    filter: HeatmapFilter,
    slot: FetchSlot<MatrixParams, MatrixResponse>,
}

impl HeatmapController {
    pub fn new(host: ChartHost, defaults: HeatmapDefaults) -> Self {
        let filter = HeatmapFilter::new(&defaults);
        Self {
            host,
            defaults,
            filter,
            slot: FetchSlot::new(),
        }
    }

    pub fn filter(&self) -> &HeatmapFilter {
        &self.filter
    }

    pub fn status(&self) -> &LoadStatus {
        self.slot.status()
    }

    pub fn container(&self) -> &Container {
        &self.host.container
    }

    /// Request the matrix for the current controls
    pub fn load(&mut self) {
        let params = self.filter.params();
        if self.slot.get_for(&params).is_some() {
            self.render();
            return;
        }
        let request = self.slot.begin(params.clone());
        self.host.show_message(CHART, LOADING_TEXT);
        self.host.fetch(CHART, request, Query::Matrix(params));
    }

    pub fn set_medal_type(&mut self, medal_type: MedalType) -> Impact {
        let impact = self.filter.set_medal_type(medal_type);
        self.apply(impact)
    }

    pub fn set_year_range(&mut self, year_range: YearRange) -> Impact {
        let impact = self.filter.set_year_range(year_range);
        self.apply(impact)
    }

    pub fn set_country_count(&mut self, count: u32) -> Result<Impact> {
        let impact = self.filter.set_country_count(count)?;
        Ok(self.apply(impact))
    }

    pub fn set_cluster(&mut self, cluster: bool) -> Impact {
        let impact = self.filter.set_cluster(cluster);
        self.apply(impact)
    }

    fn apply(&mut self, impact: Impact) -> Impact {
        if impact.needs_fetch() {
            self.load();
        } else if impact.needs_render() {
            self.render();
        }
        impact
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Fetched { ticket, result } => {
                self.on_fetched(ticket.request, result.and_then(Payload::into_matrix))
            }
            AppEvent::PlaybackTick { timer, .. } => {
                tracing::debug!("{}: no playback, ignoring tick from {}", CHART, timer)
            }
        }
    }

    fn on_fetched(&mut self, request: RequestId, result: Result<MatrixResponse>) {
        match self.slot.settle(request, result) {
            Settled::Ready => self.render(),
            Settled::Failed(err) => self.host.show_error(CHART, &err),
            Settled::Stale => tracing::warn!("{}: discarding stale response {}", CHART, request),
        }
    }

    fn render(&mut self) {
        let Some(matrix) = self.slot.data() else {
            return;
        };
        match build_heatmap(matrix, &self.filter) {
            Ok(view) => self
                .host
                .draw(CHART, |renderer, container| renderer.render_heatmap(container, &view)),
            Err(err) => self.host.show_error(CHART, &err),
        }
    }

    /// Drop cached data and restore the initial controls
    pub fn teardown(&mut self) {
        self.slot.clear();
        self.filter.reset(&self.defaults);
        self.host.container.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::matrix::MatrixEntry;
    use crate::error::Error;
    use crate::eventing::Ticket;
    use crate::features::chart_host::test_host;
    use crate::services::RecordingDispatcher;

    fn controller() -> (HeatmapController, RecordingDispatcher) {
        let (host, recorder) = test_host("heatmap", (1000.0, 600.0));
        (HeatmapController::new(host, HeatmapDefaults::default()), recorder)
    }

    fn matrix(value: u32) -> MatrixResponse {
        MatrixResponse {
            countries: vec!["USA".into(), "CHN".into()],
            sports: vec!["Swimming".into()],
            max_value: f64::from(value),
            year_min: Some(2000),
            year_max: Some(2020),
            data: vec![MatrixEntry {
                country: "USA".into(),
                country_name: Some("United States".into()),
                sport: "Swimming".into(),
                value,
                country_cluster: Some(0),
                sport_cluster: Some(0),
            }],
        }
    }

    fn answer(controller: &mut HeatmapController, ticket: Ticket, result: Result<Payload>) {
        controller.handle_event(AppEvent::Fetched { ticket, result });
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let (mut heatmap, recorder) = controller();
        heatmap.load();
        let (old, _) = recorder.last().expect("first request");
        assert_eq!(heatmap.set_medal_type(MedalType::Gold), Impact::Refetch);
        let (new, query) = recorder.last().expect("second request");
        assert!(matches!(query, Query::Matrix(p) if p.medal_type == MedalType::Gold));

        answer(&mut heatmap, new, Ok(Payload::Matrix(matrix(7))));
        answer(&mut heatmap, old, Ok(Payload::Matrix(matrix(99))));

        let cell = heatmap
            .container()
            .marks_of("cell")
            .next()
            .expect("cell drawn");
        assert_eq!(cell.tooltip.as_deref(), Some("United States\nSwimming\nMedals: 7"));
    }

    #[test]
    fn test_cluster_toggle_does_not_refetch() {
        let (mut heatmap, recorder) = controller();
        heatmap.load();
        let (ticket, _) = recorder.last().expect("request");
        answer(&mut heatmap, ticket, Ok(Payload::Matrix(matrix(3))));

        assert_eq!(heatmap.set_cluster(false), Impact::Rerender);
        assert_eq!(heatmap.set_cluster(false), Impact::Unchanged);
        assert_eq!(recorder.count(), 1);
        assert_eq!(heatmap.status(), &LoadStatus::Ready);
    }

    #[test]
    fn test_http_error_shows_panel() {
        let (mut heatmap, recorder) = controller();
        heatmap.load();
        let (ticket, _) = recorder.last().expect("request");
        answer(&mut heatmap, ticket, Err(Error::Http { status: 500 }));

        let message = heatmap.container().message().expect("panel");
        assert!(message.contains("500"));
        assert!(matches!(heatmap.status(), LoadStatus::Failed(_)));
    }

    #[test]
    fn test_invalid_country_count_keeps_state() {
        let (mut heatmap, recorder) = controller();
        assert!(heatmap.set_country_count(0).is_err());
        assert_eq!(recorder.count(), 0);
        assert_eq!(
            heatmap.filter().country_count(),
            HeatmapDefaults::default().country_count
        );
    }
}
