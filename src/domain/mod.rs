//! Domain - Pure Data Structures and Wire Types
//!
//! These types mirror the backend's JSON payloads and carry no UI state.

pub mod config;
pub mod directory;
pub mod flow;
pub mod host;
pub mod matrix;
pub mod medal;
pub mod sport;
