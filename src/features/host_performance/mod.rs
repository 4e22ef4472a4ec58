//! Host Performance - Host-country medals around their home Games

mod controller;

pub use controller::HostPerformanceController;
