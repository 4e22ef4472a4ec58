//! Service Layer
//!
//! Everything that talks to the medal backend or runs off the event loop.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                    Chart controller                       │
//! │   RequestSequencer ──► Ticket ──► Dispatcher::dispatch    │
//! └──────────────────────────────────────────────────────────┘
//!                            │ Query
//!                            ▼
//! ┌──────────────────────────────────────────────────────────┐
//! │  HttpDispatcher ── tokio runtime ── ApiClient (reqwest)   │
//! └──────────────────────────────────────────────────────────┘
//!                            │ AppEvent::Fetched
//!                            ▼
//!                    crossbeam channel ──► event loop
//! ```

pub mod client;
pub mod dispatch;
pub mod query;
pub mod runtime;
pub mod sequencer;

pub use client::{ApiClient, Validate, decode_body};
#[cfg(test)]
pub use dispatch::RecordingDispatcher;
pub use dispatch::{Dispatcher, HttpDispatcher, execute};
pub use query::{
    Endpoint, EvolutionBundle, FlowParams, HostBundle, MatrixParams, Payload, Query, QueryParams,
};
pub use runtime::*;
pub use sequencer::{RequestId, RequestSequencer};
