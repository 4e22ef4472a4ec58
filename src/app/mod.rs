//! Application Layer
//!
//! Startup, the event loop and the workspace holding every chart page.

pub mod application;
pub mod workspace;

pub use application::run_app;
pub use workspace::Workspace;
