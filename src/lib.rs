//! agenda-hub: unified daily agenda over weather, todo, and calendar services
//! with per-domain live/fallback resolution. Hexagonal Architecture.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod shared;
pub mod usecases;
