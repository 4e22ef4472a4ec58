//! Flow - Year → sport → country medal flow diagram

mod controller;

pub use controller::FlowController;
