//! Theme - Chart colors

pub mod colors;

pub use colors::*;
