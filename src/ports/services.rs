//! Per-domain service contracts. The transport-agnostic RPC surface: the
//! aggregator and any direct client call these, never the adapters.

use crate::domain::{
    DomainError, Event, EventDraft, EventPatch, Forecast, Sourced, Task, TaskDraft, TaskFilter,
    TaskPatch, WeatherReading,
};
use chrono::NaiveDateTime;

/// Weather domain. Both operations resolve live-vs-fallback internally and
/// only ever fail with `InvalidRequest`.
#[async_trait::async_trait]
pub trait WeatherServicePort: Send + Sync {
    async fn current(&self, location: &str) -> Result<Sourced<WeatherReading>, DomainError>;

    async fn forecast(&self, location: &str, days: u8) -> Result<Sourced<Forecast>, DomainError>;
}

/// Todo domain. Plain CRUD, no fallback tier — store errors surface.
#[async_trait::async_trait]
pub trait TodoServicePort: Send + Sync {
    async fn add(&self, draft: TaskDraft) -> Result<Task, DomainError>;

    async fn get(&self, id: &str) -> Result<Task, DomainError>;

    async fn update(&self, id: &str, patch: TaskPatch) -> Result<Task, DomainError>;

    async fn delete(&self, id: &str) -> Result<(), DomainError>;

    async fn list(&self, filter: &TaskFilter) -> Result<Vec<Task>, DomainError>;
}

/// Calendar domain. The query path resolves live-vs-fallback; mutations go to
/// the tier selected at call time and surface their errors.
#[async_trait::async_trait]
pub trait CalendarServicePort: Send + Sync {
    async fn add_event(&self, draft: EventDraft) -> Result<Event, DomainError>;

    async fn get_event(&self, id: &str) -> Result<Event, DomainError>;

    async fn update_event(&self, id: &str, patch: EventPatch) -> Result<Event, DomainError>;

    async fn delete_event(&self, id: &str) -> Result<(), DomainError>;

    async fn events_between(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Sourced<Vec<Event>>, DomainError>;
}
