//! Sport Dominance Controller
//!
//! Loads the sport list, then the medal rows of the selected sport. The year
//! is driven by a clamping playback that stops at the last Games; every other
//! control re-renders from the cached rows.

use std::time::Duration;

use crate::constants::{FIRST_OLYMPIC_YEAR, LAST_OLYMPIC_YEAR};
use crate::domain::config::{DominanceDefaults, PlaybackConfig};
use crate::domain::medal::MedalType;
use crate::domain::sport::SportMedalRow;
use crate::error::{Error, Result};
use crate::eventing::{AppEvent, ChartId};
use crate::features::chart_host::{ChartHost, LOADING_TEXT};
use crate::playback::{EndPolicy, PlaybackController, TickOutcome, Timer, YearTrack};
use crate::render::{Container, to_svg};
use crate::reshape::{DominanceQuery, dominance_view};
use crate::services::{Payload, Query, RequestId};
use crate::state::{DominanceFilter, FetchSlot, Impact, LoadStatus, Settled};

const CHART: ChartId = ChartId::Dominance;

pub struct DominanceController {
    host: ChartHost,
    defaults: DominanceDefaults,
    filter: DominanceFilter,
    sports: FetchSlot<(), Vec<String>>,
    rows: FetchSlot<String, Vec<SportMedalRow>>,
    playback: PlaybackController,
    /// SVG snapshots taken on every playback tick, when enabled
    frames: Option<Vec<(i32, String)>>,
}

impl DominanceController {
    pub fn new(
        host: ChartHost,
        defaults: DominanceDefaults,
        playback: &PlaybackConfig,
        timer: Box<dyn Timer>,
    ) -> Result<Self> {
        let track = YearTrack::stride(FIRST_OLYMPIC_YEAR, LAST_OLYMPIC_YEAR, playback.step)?;
        let player = PlaybackController::new(
            CHART,
            track,
            EndPolicy::Clamp,
            Duration::from_millis(playback.interval_ms),
            timer,
        );
        let filter = DominanceFilter::new(&defaults);
        Ok(Self {
            host,
            defaults,
            filter,
            sports: FetchSlot::new(),
            rows: FetchSlot::new(),
            playback: player,
            frames: None,
        })
    }

    pub fn filter(&self) -> &DominanceFilter {
        &self.filter
    }

    pub fn sports(&self) -> &[String] {
        self.sports.data().map(Vec::as_slice).unwrap_or_default()
    }

    pub fn status(&self) -> &LoadStatus {
        if self.sports.data().is_none() {
            self.sports.status()
        } else {
            self.rows.status()
        }
    }

    pub fn container(&self) -> &Container {
        &self.host.container
    }

    pub fn year(&self) -> i32 {
        self.playback.current_year()
    }

    pub fn is_playing(&self) -> bool {
        self.playback.is_playing()
    }

    /// Keep an SVG frame of every playback step
    pub fn record_frames(&mut self, enabled: bool) {
        self.frames = enabled.then(Vec::new);
    }

    pub fn take_frames(&mut self) -> Vec<(i32, String)> {
        self.frames.as_mut().map(std::mem::take).unwrap_or_default()
    }

    /// Fetch the sport list; the first sport loads once it arrives
    pub fn load(&mut self) {
        if self.sports.data().is_some() {
            self.render();
            return;
        }
        let request = self.sports.begin(());
        self.host.show_message(CHART, LOADING_TEXT);
        self.host.fetch(CHART, request, Query::Sports);
    }

    /// Switch sport. Playback stops first since the rows are refetched.
    pub fn select_sport(&mut self, sport: &str) -> Impact {
        let impact = self.filter.set_sport(sport);
        if impact.needs_fetch() {
            self.playback.pause();
            self.fetch_rows(sport.to_string());
        }
        impact
    }

    fn fetch_rows(&mut self, sport: String) {
        if self.rows.is_pending_for(&sport) {
            return;
        }
        if self.rows.get_for(&sport).is_some() {
            self.render();
            return;
        }
        let request = self.rows.begin(sport.clone());
        self.host.show_message(CHART, LOADING_TEXT);
        self.host.fetch(CHART, request, Query::SportMedals { sport });
    }

    pub fn set_medal_type(&mut self, medal_type: MedalType) -> Impact {
        let impact = self.filter.set_medal_type(medal_type);
        self.apply(impact)
    }

    pub fn set_cumulative(&mut self, cumulative: bool) -> Impact {
        let impact = self.filter.set_cumulative(cumulative);
        self.apply(impact)
    }

    pub fn set_country_limit(&mut self, limit: usize) -> Result<Impact> {
        let impact = self.filter.set_country_limit(limit)?;
        Ok(self.apply(impact))
    }

    pub fn set_year(&mut self, year: i32) -> Impact {
        let impact = self.playback.seek(year);
        self.apply(impact)
    }

    pub fn play(&mut self) -> bool {
        let started = self.playback.play();
        if started {
            // Playing from the last Games restarts at the first
            self.render();
        }
        started
    }

    pub fn pause(&mut self) -> bool {
        self.playback.pause()
    }

    pub fn toggle_playback(&mut self) -> bool {
        if self.playback.is_playing() {
            self.pause();
            false
        } else {
            self.play()
        }
    }

    /// Back to the first Games with total medals, cumulative; keeps the sport
    /// and the country limit
    pub fn reset(&mut self) {
        self.playback.reset(FIRST_OLYMPIC_YEAR);
        self.filter.reset_view();
        self.render();
    }

    fn apply(&mut self, impact: Impact) -> Impact {
        if impact.needs_render() {
            self.render();
        }
        impact
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Fetched { ticket, result } => self.on_fetched(ticket.request, result),
            AppEvent::PlaybackTick { timer, .. } => match self.playback.on_tick(timer) {
                TickOutcome::Advanced(_) | TickOutcome::Finished(_) => {
                    self.render();
                    self.snapshot();
                }
                TickOutcome::Ignored => {}
            },
        }
    }

    fn on_fetched(&mut self, request: RequestId, result: Result<Payload>) {
        // Both slots share the chart's ticket space; route by payload, and
        // failures by which slot is waiting
        let for_sports = match &result {
            Ok(payload) => matches!(payload, Payload::Sports(_)),
            Err(_) => self.sports.is_loading(),
        };
        if for_sports {
            self.on_sports(request, result.and_then(Payload::into_sports));
        } else {
            self.on_rows(request, result.and_then(Payload::into_sport_medals));
        }
    }

    fn on_sports(&mut self, request: RequestId, result: Result<Vec<String>>) {
        match self.sports.settle(request, result) {
            Settled::Ready => {
                // A sport picked while the list was loading wins over the default
                let wanted = self
                    .filter
                    .sport()
                    .map(str::to_string)
                    .into_iter()
                    .chain(self.defaults.sport.clone())
                    .find(|s| self.sports().contains(s))
                    .or_else(|| self.sports().first().cloned());
                match wanted {
                    Some(sport) => {
                        tracing::info!("{}: starting with {}", CHART, sport);
                        self.filter.set_sport(sport.as_str());
                        self.fetch_rows(sport);
                    }
                    None => self
                        .host
                        .show_error(CHART, &Error::data_shape("no sports available")),
                }
            }
            Settled::Failed(err) => self.host.show_error(CHART, &err),
            Settled::Stale => tracing::warn!("{}: discarding stale response {}", CHART, request),
        }
    }

    fn on_rows(&mut self, request: RequestId, result: Result<Vec<SportMedalRow>>) {
        match self.rows.settle(request, result) {
            Settled::Ready => self.render(),
            Settled::Failed(err) => self.host.show_error(CHART, &err),
            Settled::Stale => tracing::warn!("{}: discarding stale response {}", CHART, request),
        }
    }

    fn render(&mut self) {
        let (Some(sport), Some(rows)) = (self.filter.sport(), self.rows.data()) else {
            return;
        };
        if self.rows.key().map(String::as_str) != Some(sport) {
            return;
        }
        let view = dominance_view(
            rows,
            DominanceQuery {
                sport,
                year: self.playback.current_year(),
                cumulative: self.filter.cumulative(),
                medal_type: self.filter.medal_type(),
                limit: self.filter.country_limit(),
            },
        );
        self.host
            .draw(CHART, |renderer, container| renderer.render_dominance(container, &view));
    }

    fn snapshot(&mut self) {
        if let Some(frames) = self.frames.as_mut() {
            frames.push((self.playback.current_year(), to_svg(&self.host.container)));
        }
    }

    pub fn teardown(&mut self) {
        self.playback.reset(FIRST_OLYMPIC_YEAR);
        self.sports.clear();
        self.rows.clear();
        self.filter.reset(&self.defaults);
        self.host.container.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eventing::Ticket;
    use crate::features::chart_host::test_host;
    use crate::playback::ManualTimer;
    use crate::services::RecordingDispatcher;

    fn controller() -> (DominanceController, RecordingDispatcher, ManualTimer) {
        let (host, recorder) = test_host("sport-dominance", (800.0, 500.0));
        let timer = ManualTimer::new();
        let dominance = DominanceController::new(
            host,
            DominanceDefaults::default(),
            &PlaybackConfig::default(),
            Box::new(timer.clone()),
        )
        .expect("valid playback config");
        (dominance, recorder, timer)
    }

    fn row(country: &str, year: i32, gold: u32) -> SportMedalRow {
        SportMedalRow {
            country: country.into(),
            year,
            gold: Some(gold),
            silver: Some(0),
            bronze: Some(0),
        }
    }

    fn answer(dominance: &mut DominanceController, ticket: Ticket, payload: Payload) {
        dominance.handle_event(AppEvent::Fetched {
            ticket,
            result: Ok(payload),
        });
    }

    fn loaded() -> (DominanceController, RecordingDispatcher, ManualTimer) {
        let (mut dominance, recorder, timer) = controller();
        dominance.load();
        let (ticket, query) = recorder.last().expect("sports request");
        assert_eq!(query, Query::Sports);
        answer(
            &mut dominance,
            ticket,
            Payload::Sports(vec!["Rowing".into(), "Swimming".into()]),
        );

        let (ticket, query) = recorder.last().expect("rows request");
        assert_eq!(
            query,
            Query::SportMedals {
                sport: "Rowing".into()
            }
        );
        answer(
            &mut dominance,
            ticket,
            Payload::SportMedals(vec![
                row("Great Britain", 1908, 4),
                row("United States", 1904, 5),
                row("Germany", 1936, 5),
            ]),
        );
        (dominance, recorder, timer)
    }

    fn tick(dominance: &mut DominanceController, timer: &ManualTimer) {
        let handle = timer.active()[0];
        dominance.handle_event(AppEvent::PlaybackTick {
            chart: CHART,
            timer: handle,
        });
    }

    #[test]
    fn test_first_sport_loads_after_list() {
        let (dominance, recorder, _) = loaded();
        assert_eq!(recorder.count(), 2);
        assert_eq!(dominance.filter().sport(), Some("Rowing"));
        // 1896 has no Rowing medals yet
        assert_eq!(
            dominance.container().marks_of("empty").next().and_then(|m| m.label()),
            Some("No medal data available for Rowing in 1896")
        );
    }

    #[test]
    fn test_clamped_playback_visits_every_games() {
        let (mut dominance, _, timer) = loaded();
        dominance.record_frames(true);
        assert!(dominance.play());
        let mut years = Vec::new();
        while dominance.is_playing() {
            tick(&mut dominance, &timer);
            years.push(dominance.year());
        }
        assert_eq!(years.len(), 31);
        assert_eq!(years.first(), Some(&1900));
        assert_eq!(years.last(), Some(&2020));
        assert!(timer.active().is_empty());
        assert_eq!(dominance.take_frames().len(), 31);

        let title = dominance
            .container()
            .marks_of("title")
            .next()
            .and_then(|m| m.label());
        assert_eq!(title, Some("Total Medals in Rowing (Cumulative)"));
        assert_eq!(dominance.container().marks_of("bar").count(), 3);

        // Play from the end restarts at the first Games
        assert!(dominance.play());
        assert_eq!(dominance.year(), 1896);
    }

    #[test]
    fn test_sport_change_stops_playback_and_refetches() {
        let (mut dominance, recorder, timer) = loaded();
        dominance.play();
        assert_eq!(dominance.select_sport("Swimming"), Impact::Refetch);
        assert!(!dominance.is_playing());
        assert!(timer.active().is_empty());
        assert_eq!(recorder.count(), 3);
        assert_eq!(dominance.select_sport("Swimming"), Impact::Unchanged);
        assert_eq!(recorder.count(), 3);
    }

    #[test]
    fn test_sport_picked_before_list_is_kept() {
        let (mut dominance, recorder, _) = controller();
        dominance.load();
        let (sports_ticket, _) = recorder.last().expect("sports request");
        assert_eq!(dominance.select_sport("Swimming"), Impact::Refetch);
        let (rows_ticket, query) = recorder.last().expect("rows request");
        assert_eq!(
            query,
            Query::SportMedals {
                sport: "Swimming".into()
            }
        );

        answer(
            &mut dominance,
            sports_ticket,
            Payload::Sports(vec!["Rowing".into(), "Swimming".into()]),
        );
        assert_eq!(dominance.filter().sport(), Some("Swimming"));
        assert_eq!(recorder.count(), 2);

        answer(
            &mut dominance,
            rows_ticket,
            Payload::SportMedals(vec![row("Australia", 1896, 2)]),
        );
        assert_eq!(dominance.status(), &LoadStatus::Ready);
        let title = dominance
            .container()
            .marks_of("title")
            .next()
            .and_then(|m| m.label());
        assert_eq!(title, Some("Total Medals in Swimming (Cumulative)"));
    }

    #[test]
    fn test_reset_keeps_sport_and_limit() {
        let (mut dominance, _, _) = loaded();
        dominance.set_country_limit(5).expect("valid limit");
        dominance.set_medal_type(MedalType::Gold);
        dominance.set_cumulative(false);
        dominance.set_year(1908);
        let legend: Vec<&str> = dominance
            .container()
            .marks_of("legend")
            .filter_map(|m| m.label())
            .collect();
        assert_eq!(legend, vec!["Great Britain: 4"]);

        dominance.reset();
        assert_eq!(dominance.year(), 1896);
        assert_eq!(dominance.filter().medal_type(), MedalType::Total);
        assert!(dominance.filter().cumulative());
        assert_eq!(dominance.filter().sport(), Some("Rowing"));
        assert_eq!(dominance.filter().country_limit(), 5);
    }
}
