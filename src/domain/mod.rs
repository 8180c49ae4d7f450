//! Core domain layer. No external I/O dependencies.
//!
//! Entities and business rules live here. Dependencies flow inward.

pub mod entities;
pub mod errors;

pub use entities::{
    Agenda, AgendaDomain, DailyForecast, Event, EventDraft, EventPatch, FallbackReason, Forecast,
    Priority, Provenance, Sourced, Task, TaskDraft, TaskFilter, TaskPatch, WeatherReading,
};
pub use errors::DomainError;
