//! Timer - Repeating tick sources for playback
//!
//! [`TokioTimer`] posts [`AppEvent::PlaybackTick`] from a tokio interval task.
//! [`ManualTimer`] records start/cancel calls and lets tests fire ticks.

use ahash::AHashMap;
use crossbeam_channel::Sender;
use std::fmt;
use std::time::Duration;
use tokio::task::JoinHandle;

use crate::eventing::{AppEvent, ChartId};
use crate::services::runtime::spawn_abortable;

/// Identifies one started timer; ticks carry it so stale ticks can be ignored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

impl TimerHandle {
    pub fn new(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for TimerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer-{}", self.0)
    }
}

/// Injectable repeating timer
pub trait Timer {
    /// Start a repeating timer for `chart`; ticks arrive every `interval`
    fn start(&mut self, chart: ChartId, interval: Duration) -> TimerHandle;

    /// Stop a timer; cancelling an unknown handle does nothing
    fn cancel(&mut self, handle: TimerHandle);
}

/// Timer backed by tokio interval tasks on the shared runtime
pub struct TokioTimer {
    events: Sender<AppEvent>,
    next_id: u64,
    tasks: AHashMap<TimerHandle, JoinHandle<()>>,
}

impl TokioTimer {
    pub fn new(events: Sender<AppEvent>) -> Self {
        Self {
            events,
            next_id: 1,
            tasks: AHashMap::new(),
        }
    }
}

impl Timer for TokioTimer {
    fn start(&mut self, chart: ChartId, interval: Duration) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;

        let events = self.events.clone();
        let task = spawn_abortable(async move {
            let mut ticker = tokio::time::interval(interval);
            // The first tick completes immediately
            ticker.tick().await;
            loop {
                ticker.tick().await;
                if events
                    .send(AppEvent::PlaybackTick {
                        chart,
                        timer: handle,
                    })
                    .is_err()
                {
                    break;
                }
            }
        });
        tracing::debug!("Started {} for {} every {:?}", handle, chart, interval);
        self.tasks.insert(handle, task);
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        if let Some(task) = self.tasks.remove(&handle) {
            task.abort();
            tracing::debug!("Cancelled {}", handle);
        }
    }
}

impl Drop for TokioTimer {
    fn drop(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.abort();
        }
    }
}

#[cfg(test)]
pub use manual::ManualTimer;


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokio_timer_ticks_and_cancels() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let mut timer = TokioTimer::new(tx);
        let handle = timer.start(ChartId::Ranking, Duration::from_millis(10));

        let event = rx
            .recv_timeout(Duration::from_secs(2))
            .expect("tick delivered");
        assert!(matches!(
            event,
            AppEvent::PlaybackTick { chart: ChartId::Ranking, timer } if timer == handle
        ));

        timer.cancel(handle);
        assert!(timer.tasks.is_empty());
    }

    #[test]
    fn test_manual_timer_tracks_active_handles() {
        let mut timer = ManualTimer::new();
        let shared = timer.clone();
        let a = timer.start(ChartId::Dominance, Duration::from_millis(1000));
        let b = timer.start(ChartId::Dominance, Duration::from_millis(1000));
        timer.cancel(a);
        assert_eq!(shared.active(), vec![b]);
        assert_eq!(shared.started(), 2);
    }
}
