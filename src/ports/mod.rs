//! Port traits. API boundaries for the hexagon.
//!
//! - Services: per-domain contracts the aggregator (and any client) calls
//! - Outbound: called by use cases into infrastructure

pub mod outbound;
pub mod services;

pub use outbound::{CalendarApiPort, TaskStorePort, WeatherApiPort};
pub use services::{CalendarServicePort, TodoServicePort, WeatherServicePort};
