//! Heatmap - Sport × country medal grid

mod controller;

pub use controller::HeatmapController;
