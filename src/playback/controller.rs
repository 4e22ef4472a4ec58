//! Playback Controller
//!
//! `Stopped` / `Playing` state machine that walks a year along a [`YearTrack`].
//! While playing it owns exactly one timer handle; every exit from `Playing`
//! cancels it.

use std::time::Duration;

use crate::domain::directory::nearest_year;
use crate::error::{Error, Result};
use crate::eventing::ChartId;
use crate::playback::timer::{Timer, TimerHandle};
use crate::state::Impact;

/// What happens when a tick would move past the last year
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndPolicy {
    /// Jump back to the first year and keep playing
    Wrap,
    /// Stop on the last year
    Clamp,
}

/// The years playback can visit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum YearTrack {
    /// Every `step` years from `min` to `max`
    Stride { min: i32, max: i32, step: i32 },
    /// An explicit ascending list of years
    Steps(Vec<i32>),
}

impl YearTrack {
    pub fn stride(min: i32, max: i32, step: i32) -> Result<Self> {
        if step <= 0 || min > max {
            return Err(Error::Invalid {
                message: format!("Invalid year track {min}..={max} step {step}"),
            });
        }
        Ok(YearTrack::Stride { min, max, step })
    }

    /// Track over the given years, sorted and deduplicated
    pub fn steps(mut years: Vec<i32>) -> Self {
        years.sort_unstable();
        years.dedup();
        YearTrack::Steps(years)
    }

    pub fn first(&self) -> Option<i32> {
        match self {
            YearTrack::Stride { min, .. } => Some(*min),
            YearTrack::Steps(years) => years.first().copied(),
        }
    }

    pub fn last(&self) -> Option<i32> {
        match self {
            YearTrack::Stride { max, .. } => Some(*max),
            YearTrack::Steps(years) => years.last().copied(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, YearTrack::Steps(years) if years.is_empty())
    }

    /// Bring an arbitrary year onto the track
    pub fn snap(&self, year: i32) -> Option<i32> {
        match self {
            YearTrack::Stride { min, max, .. } => Some(year.clamp(*min, *max)),
            YearTrack::Steps(years) => nearest_year(years, year),
        }
    }

    /// Next year after `current`, and whether the end of the track was reached
    fn advance(&self, current: i32, policy: EndPolicy) -> Option<(i32, bool)> {
        match self {
            YearTrack::Stride { min, max, step } => {
                let next = current + step;
                match policy {
                    EndPolicy::Wrap if next > *max => Some((*min, false)),
                    EndPolicy::Wrap => Some((next, false)),
                    EndPolicy::Clamp => {
                        let next = next.min(*max);
                        Some((next, next >= *max))
                    }
                }
            }
            YearTrack::Steps(years) => {
                if years.is_empty() {
                    return None;
                }
                let index = years.iter().position(|y| *y == current).unwrap_or(0);
                let last = years.len() - 1;
                match policy {
                    EndPolicy::Wrap => Some((years[(index + 1) % years.len()], false)),
                    EndPolicy::Clamp => {
                        let next = (index + 1).min(last);
                        Some((years[next], next == last))
                    }
                }
            }
        }
    }
}

/// Playback state: at most one live timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Stopped,
    Playing(TimerHandle),
}

/// Result of delivering a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Tick from a cancelled or foreign timer
    Ignored,
    /// Year moved; re-render
    Advanced(i32),
    /// Year moved onto the last year and playback stopped
    Finished(i32),
}

impl TickOutcome {
    pub fn year(&self) -> Option<i32> {
        match self {
            TickOutcome::Ignored => None,
            TickOutcome::Advanced(year) | TickOutcome::Finished(year) => Some(*year),
        }
    }
}

/// Drives the current year of one chart
pub struct PlaybackController {
    chart: ChartId,
    track: YearTrack,
    policy: EndPolicy,
    interval: Duration,
    current_year: i32,
    state: PlaybackState,
    timer: Box<dyn Timer>,
}

impl PlaybackController {
    pub fn new(
        chart: ChartId,
        track: YearTrack,
        policy: EndPolicy,
        interval: Duration,
        timer: Box<dyn Timer>,
    ) -> Self {
        let current_year = track.first().unwrap_or_default();
        Self {
            chart,
            track,
            policy,
            interval,
            current_year,
            state: PlaybackState::Stopped,
            timer,
        }
    }

    pub fn current_year(&self) -> i32 {
        self.current_year
    }

    pub fn is_playing(&self) -> bool {
        matches!(self.state, PlaybackState::Playing(_))
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn track(&self) -> &YearTrack {
        &self.track
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Start playing. Returns false when already playing or the track is empty.
    pub fn play(&mut self) -> bool {
        if self.is_playing() {
            return false;
        }
        if self.track.is_empty() {
            tracing::warn!("{}: nothing to play, year track is empty", self.chart);
            return false;
        }
        if self.policy == EndPolicy::Clamp
            && self.track.last().is_some_and(|last| self.current_year >= last)
        {
            self.current_year = self.track.first().unwrap_or(self.current_year);
        }

        let handle = self.timer.start(self.chart, self.interval);
        self.state = PlaybackState::Playing(handle);
        tracing::debug!("{}: playing from {}", self.chart, self.current_year);
        true
    }

    /// Stop playing. Returns false when already stopped.
    pub fn pause(&mut self) -> bool {
        match self.state {
            PlaybackState::Playing(handle) => {
                self.timer.cancel(handle);
                self.state = PlaybackState::Stopped;
                tracing::debug!("{}: stopped at {}", self.chart, self.current_year);
                true
            }
            PlaybackState::Stopped => false,
        }
    }

    /// Play/pause button; returns whether playback is now running
    pub fn toggle(&mut self) -> bool {
        if self.is_playing() {
            self.pause();
        } else {
            self.play();
        }
        self.is_playing()
    }

    /// Move to a year chosen by the user, snapped onto the track
    pub fn seek(&mut self, year: i32) -> Impact {
        let year = self.track.snap(year).unwrap_or(year);
        if year == self.current_year {
            return Impact::Unchanged;
        }
        self.current_year = year;
        Impact::Rerender
    }

    /// Replace the track (e.g. once host years are known) and re-snap the year
    pub fn set_track(&mut self, track: YearTrack) {
        self.pause();
        self.track = track;
        if let Some(year) = self.track.snap(self.current_year) {
            self.current_year = year;
        }
    }

    /// Stop and jump to `year` without snapping
    pub fn reset(&mut self, year: i32) {
        self.pause();
        self.current_year = year;
    }

    /// Deliver a tick from `handle`
    pub fn on_tick(&mut self, handle: TimerHandle) -> TickOutcome {
        if self.state != PlaybackState::Playing(handle) {
            tracing::debug!("{}: ignoring stale tick from {}", self.chart, handle);
            return TickOutcome::Ignored;
        }
        let Some((year, at_end)) = self.track.advance(self.current_year, self.policy) else {
            self.pause();
            return TickOutcome::Ignored;
        };
        self.current_year = year;
        if at_end {
            self.pause();
            TickOutcome::Finished(year)
        } else {
            TickOutcome::Advanced(year)
        }
    }
}

impl Drop for PlaybackController {
    fn drop(&mut self) {
        self.pause();
    }
}
