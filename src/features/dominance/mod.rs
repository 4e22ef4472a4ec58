//! Dominance - Animated per-sport country ranking

mod controller;

pub use controller::DominanceController;
