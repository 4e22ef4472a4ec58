//! Host Performance Controller
//!
//! Two charts over one bundle: the host country's medals per Games with
//! pre/post-host averages, and its stacked medal history. The selected year
//! only ever takes host years; playback cycles through them.

use std::time::Duration;

use crate::domain::config::PlaybackConfig;
use crate::domain::medal::MedalType;
use crate::error::Result;
use crate::eventing::{AppEvent, ChartId};
use crate::features::chart_host::{ChartHost, LOADING_TEXT};
use crate::playback::{EndPolicy, PlaybackController, TickOutcome, Timer, YearTrack};
use crate::render::Container;
use crate::reshape::{build_history_view, build_host_view, host_years, resolve_host};
use crate::services::{HostBundle, Payload, Query, RequestId};
use crate::state::{FetchSlot, HostFilter, Impact, LoadStatus, Settled};

const CHART: ChartId = ChartId::HostPerformance;
const HISTORY: ChartId = ChartId::MedalHistory;

pub struct HostPerformanceController {
    host: ChartHost,
    history: Container,
    filter: HostFilter,
    slot: FetchSlot<(), HostBundle>,
    playback: PlaybackController,
}

impl HostPerformanceController {
    pub fn new(
        host: ChartHost,
        history: Container,
        playback: &PlaybackConfig,
        timer: Box<dyn Timer>,
    ) -> Self {
        // Host years are unknown until the bundle arrives
        let player = PlaybackController::new(
            CHART,
            YearTrack::steps(Vec::new()),
            EndPolicy::Wrap,
            Duration::from_millis(playback.host_interval_ms),
            timer,
        );
        Self {
            host,
            history,
            filter: HostFilter::new(),
            slot: FetchSlot::new(),
            playback: player,
        }
    }

    pub fn filter(&self) -> &HostFilter {
        &self.filter
    }

    pub fn status(&self) -> &LoadStatus {
        self.slot.status()
    }

    pub fn container(&self) -> &Container {
        &self.host.container
    }

    pub fn history_container(&self) -> &Container {
        &self.history
    }

    pub fn year(&self) -> i32 {
        self.playback.current_year()
    }

    /// Host years in ascending order
    pub fn years(&self) -> Vec<i32> {
        self.slot
            .data()
            .map(|bundle| host_years(&bundle.hosts))
            .unwrap_or_default()
    }

    pub fn is_playing(&self) -> bool {
        self.playback.is_playing()
    }

    pub fn load(&mut self) {
        if self.slot.data().is_some() {
            self.render();
            return;
        }
        let request = self.slot.begin(());
        self.host.show_message(CHART, LOADING_TEXT);
        self.history.clear();
        self.host.fetch(CHART, request, Query::Host);
    }

    /// Select a host year; other years snap to the nearest host year
    pub fn set_year(&mut self, year: i32) -> Impact {
        let impact = self.playback.seek(year);
        self.apply(impact)
    }

    pub fn set_medal_type(&mut self, medal_type: MedalType) -> Impact {
        let impact = self.filter.set_medal_type(medal_type);
        self.apply(impact)
    }

    pub fn play(&mut self) -> bool {
        self.playback.play()
    }

    pub fn pause(&mut self) -> bool {
        self.playback.pause()
    }

    pub fn toggle_playback(&mut self) -> bool {
        self.playback.toggle()
    }

    fn apply(&mut self, impact: Impact) -> Impact {
        if impact.needs_render() {
            self.render();
        }
        impact
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Fetched { ticket, result } => {
                self.on_fetched(ticket.request, result.and_then(Payload::into_host))
            }
            AppEvent::PlaybackTick { timer, .. } => match self.playback.on_tick(timer) {
                TickOutcome::Advanced(_) | TickOutcome::Finished(_) => self.render(),
                TickOutcome::Ignored => {}
            },
        }
    }

    fn on_fetched(&mut self, request: RequestId, result: Result<HostBundle>) {
        match self.slot.settle(request, result) {
            Settled::Ready => {
                let years = self.years();
                let latest = years.last().copied();
                self.playback.set_track(YearTrack::steps(years));
                if let Some(year) = latest {
                    self.playback.seek(year);
                }
                self.render();
            }
            Settled::Failed(err) => {
                self.host.show_error(CHART, &err);
                self.host.show_error_in(HISTORY, &mut self.history, &err);
            }
            Settled::Stale => tracing::warn!("{}: discarding stale response {}", CHART, request),
        }
    }

    fn render(&mut self) {
        let Some(bundle) = self.slot.data() else {
            return;
        };
        let medal_type = self.filter.medal_type();
        let views = resolve_host(&bundle.hosts, self.playback.current_year()).and_then(|host| {
            Ok((
                build_host_view(host, medal_type, &bundle.cities)?,
                build_history_view(host)?,
            ))
        });

        match views {
            Ok((view, history)) => {
                self.host
                    .draw(CHART, |renderer, container| renderer.render_host(container, &view));
                self.host.draw_into(HISTORY, &mut self.history, |renderer, container| {
                    renderer.render_history(container, &history)
                });
            }
            Err(err) => {
                self.host.show_error(CHART, &err);
                self.host.show_error_in(HISTORY, &mut self.history, &err);
            }
        }
    }

    pub fn teardown(&mut self) {
        self.playback.set_track(YearTrack::steps(Vec::new()));
        self.slot.clear();
        self.filter.reset();
        self.host.container.clear();
        self.history.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::host::{HostPerformance, PerformancePoint};
    use crate::domain::medal::HostCity;
    use crate::error::Error;
    use crate::eventing::Ticket;
    use crate::features::chart_host::test_host;
    use crate::playback::ManualTimer;
    use crate::services::RecordingDispatcher;

    fn controller() -> (HostPerformanceController, RecordingDispatcher, ManualTimer) {
        let (host, recorder) = test_host("host-performance", (800.0, 400.0));
        let timer = ManualTimer::new();
        let performance = HostPerformanceController::new(
            host,
            Container::new("medal-history", 800.0, 400.0),
            &PlaybackConfig::default(),
            Box::new(timer.clone()),
        );
        (performance, recorder, timer)
    }

    fn point(year: i32, medals: Option<(u32, u32, u32)>) -> PerformancePoint {
        let (gold, silver, bronze) = match medals {
            Some((g, s, b)) => (Some(g), Some(s), Some(b)),
            None => (None, None, None),
        };
        PerformancePoint {
            year,
            gold,
            silver,
            bronze,
            total: medals.map(|(g, s, b)| g + s + b),
        }
    }

    fn bundle() -> HostBundle {
        HostBundle {
            hosts: vec![
                HostPerformance {
                    host_year: 2008,
                    host_country: "China".into(),
                    host_noc: Some("CHN".into()),
                    performance: vec![
                        point(2004, Some((32, 17, 14))),
                        point(2008, Some((48, 22, 30))),
                        point(2012, Some((39, 31, 22))),
                    ],
                },
                HostPerformance {
                    host_year: 2004,
                    host_country: "Greece".into(),
                    host_noc: Some("GRE".into()),
                    performance: vec![
                        point(1900, None),
                        point(2000, Some((4, 6, 3))),
                        point(2004, Some((6, 6, 4))),
                    ],
                },
            ],
            cities: vec![HostCity {
                year: 2008,
                city: "Beijing".into(),
                country: "China".into(),
            }],
            ..HostBundle::default()
        }
    }

    fn answer(
        performance: &mut HostPerformanceController,
        ticket: Ticket,
        result: Result<Payload>,
    ) {
        performance.handle_event(AppEvent::Fetched { ticket, result });
    }

    fn loaded() -> (HostPerformanceController, RecordingDispatcher, ManualTimer) {
        let (mut performance, recorder, timer) = controller();
        performance.load();
        let (ticket, query) = recorder.last().expect("host request");
        assert_eq!(query, Query::Host);
        answer(&mut performance, ticket, Ok(Payload::Host(bundle())));
        (performance, recorder, timer)
    }

    fn label<'a>(container: &'a Container, class: &'a str) -> Option<&'a str> {
        container.marks_of(class).next().and_then(|m| m.label())
    }

    #[test]
    fn test_starts_at_latest_host_year() {
        let (performance, _, _) = loaded();
        assert_eq!(performance.years(), vec![2004, 2008]);
        assert_eq!(performance.year(), 2008);
        assert_eq!(
            label(performance.container(), "title"),
            Some("China Olympic Performance")
        );
        assert_eq!(
            label(performance.container(), "subtitle"),
            Some("Host Year: 2008 (Beijing)")
        );
        assert_eq!(
            label(performance.history_container(), "title"),
            Some("China Medal History")
        );
    }

    #[test]
    fn test_year_snaps_to_host_years() {
        let (mut performance, recorder, _) = loaded();
        assert_eq!(performance.set_year(2003), Impact::Rerender);
        assert_eq!(performance.year(), 2004);
        assert_eq!(
            label(performance.container(), "title"),
            Some("Greece Olympic Performance")
        );
        // 1900 has no tally: a placeholder instead of a bar
        assert_eq!(performance.container().marks_of("bar").count(), 2);
        assert_eq!(performance.container().marks_of("placeholder").count(), 1);
        assert_eq!(performance.history_container().marks_of("no-data").count(), 2);

        assert_eq!(performance.set_medal_type(MedalType::Gold), Impact::Rerender);
        assert_eq!(performance.set_medal_type(MedalType::Gold), Impact::Unchanged);
        assert_eq!(recorder.count(), 1);
    }

    #[test]
    fn test_playback_cycles_host_years() {
        let (mut performance, _, timer) = loaded();
        assert!(performance.play());
        assert_eq!(timer.last_interval(), Some(Duration::from_millis(2000)));

        let handle = timer.active()[0];
        performance.handle_event(AppEvent::PlaybackTick {
            chart: CHART,
            timer: handle,
        });
        assert_eq!(performance.year(), 2004);
        performance.handle_event(AppEvent::PlaybackTick {
            chart: CHART,
            timer: handle,
        });
        assert_eq!(performance.year(), 2008);
        assert!(performance.is_playing());

        assert!(performance.pause());
        assert!(timer.active().is_empty());
    }

    #[test]
    fn test_failure_fills_both_panels() {
        let (mut performance, recorder, _) = controller();
        performance.load();
        let (ticket, _) = recorder.last().expect("host request");
        answer(&mut performance, ticket, Err(Error::Http { status: 503 }));

        assert!(matches!(performance.status(), LoadStatus::Failed(_)));
        for container in [performance.container(), performance.history_container()] {
            let message = container.message().expect("error panel");
            assert!(message.contains("503"));
        }
        assert!(!performance.play());
    }

    #[test]
    fn test_empty_host_list_is_no_data() {
        let (mut performance, recorder, _) = controller();
        performance.load();
        let (ticket, _) = recorder.last().expect("host request");
        answer(&mut performance, ticket, Ok(Payload::Host(HostBundle::default())));

        let message = performance.container().message().expect("no-data panel");
        assert!(message.starts_with("No data available"));
        assert!(performance.history_container().message().is_some());
    }
}
