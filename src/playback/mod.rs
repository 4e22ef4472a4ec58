//! Playback - Timer-driven year animation

pub mod controller;
pub mod timer;

pub use controller::{EndPolicy, PlaybackController, PlaybackState, TickOutcome, YearTrack};
#[cfg(test)]
pub use timer::ManualTimer;
pub use timer::{Timer, TimerHandle, TokioTimer};
