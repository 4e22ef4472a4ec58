//! Evolution - Medal time series plus the per-year ranking

mod controller;

pub use controller::EvolutionController;
