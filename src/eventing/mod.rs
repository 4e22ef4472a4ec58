//! Eventing - Messages delivered to the event loop

pub mod app_event;

pub use app_event::{AppEvent, ChartId, Ticket};
