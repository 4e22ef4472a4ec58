//! Helper Utilities
//!
//! Common utilities used across the application.

mod fs;
mod serde_ext;

pub use fs::*;
pub use serde_ext::*;
