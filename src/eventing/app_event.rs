//! AppEvent - Application Event Enum
//!
//! Everything that wakes the event loop: fetch completions and playback ticks.

use std::fmt;

use crate::error::Result;
use crate::playback::TimerHandle;
use crate::services::{Payload, RequestId};

/// Identifies one chart instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChartId {
    Heatmap,
    Flow,
    Evolution,
    Ranking,
    Dominance,
    HostPerformance,
    MedalHistory,
}

impl ChartId {
    pub fn label(&self) -> &'static str {
        match self {
            ChartId::Heatmap => "heatmap",
            ChartId::Flow => "medal-flow",
            ChartId::Evolution => "medal-evolution",
            ChartId::Ranking => "medal-ranking",
            ChartId::Dominance => "sport-dominance",
            ChartId::HostPerformance => "host-performance",
            ChartId::MedalHistory => "medal-history",
        }
    }
}

impl fmt::Display for ChartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Routing tag attached to every dispatched request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket {
    pub chart: ChartId,
    pub request: RequestId,
}

/// Application events for background -> event loop communication
#[derive(Debug)]
pub enum AppEvent {
    /// A dispatched query finished (successfully or not)
    Fetched {
        ticket: Ticket,
        result: Result<Payload>,
    },

    /// A playback timer fired
    PlaybackTick { chart: ChartId, timer: TimerHandle },
}

impl AppEvent {
    /// Chart this event is addressed to
    pub fn chart(&self) -> ChartId {
        match self {
            AppEvent::Fetched { ticket, .. } => ticket.chart,
            AppEvent::PlaybackTick { chart, .. } => *chart,
        }
    }
}
