//! Evolution Controller
//!
//! Owns two charts over one data bundle: the per-country evolution series and
//! the per-year medal ranking. Every control here only re-renders; the bundle
//! is fetched once.

use std::time::Duration;

use crate::constants::{FIRST_OLYMPIC_YEAR, LAST_OLYMPIC_YEAR};
use crate::domain::config::{EvolutionDefaults, PlaybackConfig};
use crate::domain::directory::{CountryDirectory, game_years};
use crate::domain::medal::MedalType;
use crate::error::{Error, Result};
use crate::eventing::{AppEvent, ChartId};
use crate::features::chart_host::{ChartHost, LOADING_TEXT};
use crate::playback::{EndPolicy, PlaybackController, TickOutcome, Timer, YearTrack};
use crate::render::Container;
use crate::reshape::{build_evolution, year_ranking};
use crate::services::{EvolutionBundle, Payload, Query, RequestId};
use crate::state::{EvolutionFilter, FetchSlot, Impact, LoadStatus, Settled};

const CHART: ChartId = ChartId::Evolution;
const RANKING: ChartId = ChartId::Ranking;

/// Fetched bundle with its country lookup
#[derive(Debug)]
struct EvolutionData {
    bundle: EvolutionBundle,
    directory: CountryDirectory,
}

pub struct EvolutionController {
    host: ChartHost,
    ranking: Container,
    defaults: EvolutionDefaults,
    filter: EvolutionFilter,
    slot: FetchSlot<(), EvolutionData>,
    playback: PlaybackController,
    step: i32,
}

impl EvolutionController {
    pub fn new(
        host: ChartHost,
        ranking: Container,
        defaults: EvolutionDefaults,
        playback: &PlaybackConfig,
        timer: Box<dyn Timer>,
    ) -> Result<Self> {
        let track = YearTrack::stride(FIRST_OLYMPIC_YEAR, LAST_OLYMPIC_YEAR, playback.step)?;
        let mut player = PlaybackController::new(
            RANKING,
            track,
            EndPolicy::Wrap,
            Duration::from_millis(playback.interval_ms),
            timer,
        );
        player.seek(LAST_OLYMPIC_YEAR);
        let filter = EvolutionFilter::new(&defaults);
        Ok(Self {
            host,
            ranking,
            defaults,
            filter,
            slot: FetchSlot::new(),
            playback: player,
            step: playback.step,
        })
    }

    pub fn filter(&self) -> &EvolutionFilter {
        &self.filter
    }

    pub fn status(&self) -> &LoadStatus {
        self.slot.status()
    }

    pub fn container(&self) -> &Container {
        &self.host.container
    }

    pub fn ranking_container(&self) -> &Container {
        &self.ranking
    }

    pub fn ranking_year(&self) -> i32 {
        self.playback.current_year()
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
        self.host.fetch(CHART, request, Query::Evolution);
    }

    pub fn add_country(&mut self, code: &str) -> Impact {
        let impact = self.filter.add_country(code);
        self.apply(impact)
    }

    /// Add a country picked by its display name
    pub fn add_country_by_name(&mut self, name: &str) -> Result<Impact> {
        let code = self
            .slot
            .data()
            .and_then(|data| data.directory.code_of(name))
            .map(str::to_string)
            .ok_or_else(|| Error::Invalid {
                message: format!("Unknown country: {name}"),
            })?;
        Ok(self.add_country(&code))
    }

    pub fn remove_country(&mut self, code: &str) -> Impact {
        let impact = self.filter.remove_country(code);
        self.apply(impact)
    }

    pub fn set_medal(&mut self, medal: MedalType, enabled: bool) -> Impact {
        let impact = self.filter.set_medal(medal, enabled);
        self.apply(impact)
    }

    /// Move the ranking to `year` (snapped onto the playback track)
    pub fn set_ranking_year(&mut self, year: i32) -> Impact {
        let impact = self.playback.seek(year);
        if impact.needs_render() {
            self.render_ranking();
        }
        impact
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
                self.on_fetched(ticket.request, result.and_then(Payload::into_evolution))
            }
            AppEvent::PlaybackTick { timer, .. } => match self.playback.on_tick(timer) {
                TickOutcome::Advanced(_) | TickOutcome::Finished(_) => self.render_ranking(),
                TickOutcome::Ignored => {}
            },
        }
    }

    fn on_fetched(&mut self, request: RequestId, result: Result<EvolutionBundle>) {
        let result = result.map(|bundle| EvolutionData {
            directory: CountryDirectory::new(bundle.countries.clone()),
            bundle,
        });
        match self.slot.settle(request, result) {
            Settled::Ready => {
                self.fit_track();
                self.render();
            }
            Settled::Failed(err) => {
                self.host.show_error(CHART, &err);
                self.host.show_error_in(RANKING, &mut self.ranking, &err);
            }
            Settled::Stale => tracing::warn!("{}: discarding stale response {}", CHART, request),
        }
    }

    /// Fit the ranking track to the years that actually have Games
    fn fit_track(&mut self) {
        let Some(data) = self.slot.data() else {
            return;
        };
        let years = game_years(&data.bundle.games);
        let (Some(&min), Some(&max)) = (years.first(), years.last()) else {
            return;
        };
        match YearTrack::stride(min, max, self.step) {
            Ok(track) => {
                self.playback.set_track(track);
                self.playback.seek(max);
            }
            Err(e) => tracing::warn!("{}: keeping default year track: {}", RANKING, e),
        }
    }

    fn render(&mut self) {
        self.render_evolution();
        self.render_ranking();
    }

    fn render_evolution(&mut self) {
        let Some(data) = self.slot.data() else {
            return;
        };
        let view = build_evolution(
            &data.bundle.tally,
            &data.directory,
            &data.bundle.games,
            self.filter.selection(),
            self.filter.medals(),
        );
        self.host
            .draw(CHART, |renderer, container| renderer.render_evolution(container, &view));
    }

    fn render_ranking(&mut self) {
        let Some(data) = self.slot.data() else {
            return;
        };
        let view = year_ranking(
            &data.bundle.tally,
            &data.directory,
            &data.bundle.games,
            self.playback.current_year(),
            self.filter.medals(),
        );
        self.host.draw_into(RANKING, &mut self.ranking, |renderer, container| {
            renderer.render_ranking(container, &view)
        });
    }

    pub fn teardown(&mut self) {
        self.playback.pause();
        self.slot.clear();
        self.filter.reset(&self.defaults);
        self.host.container.clear();
        self.ranking.clear();
    }
}
