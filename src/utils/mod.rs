//! Utilities

pub mod config_store;
pub mod format;

pub use config_store::load_config;
pub use format::{format_export_stamp, format_local_datetime};
