//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{
    DomainError, Event, EventDraft, EventPatch, Forecast, Task, TaskDraft, TaskFilter, TaskPatch,
    WeatherReading,
};
use chrono::NaiveDateTime;

/// Live weather API gateway. Implementations return readings tagged
/// `Provenance::Live`; any failure is a plain error — the owning service
/// decides whether to substitute fallback data.
#[async_trait::async_trait]
pub trait WeatherApiPort: Send + Sync {
    /// Current conditions for a free-form location query.
    async fn current(&self, location: &str) -> Result<WeatherReading, DomainError>;

    /// Daily forecast, `days` entries starting today. Callers clamp `days`
    /// before reaching the adapter.
    async fn forecast(&self, location: &str, days: u8) -> Result<Forecast, DomainError>;
}

/// Calendar backing store. Implemented both by the live HTTP adapter and the
/// in-memory fallback store, so the service can swap tiers per request.
#[async_trait::async_trait]
pub trait CalendarApiPort: Send + Sync {
    async fn add_event(&self, draft: EventDraft) -> Result<Event, DomainError>;

    async fn get_event(&self, id: &str) -> Result<Event, DomainError>;

    /// Partial update; `None` fields keep their current value.
    async fn update_event(&self, id: &str, patch: EventPatch) -> Result<Event, DomainError>;

    async fn delete_event(&self, id: &str) -> Result<(), DomainError>;

    /// All events overlapping [start, end), sorted by start time.
    async fn events_between(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<Event>, DomainError>;
}

/// Durable task store. Every mutation commits before returning; a reopened
/// store sees all previously committed tasks under the same ids.
#[async_trait::async_trait]
pub trait TaskStorePort: Send + Sync {
    /// Persist a new task. The store assigns the id.
    async fn add(&self, draft: TaskDraft) -> Result<Task, DomainError>;

    async fn get(&self, id: &str) -> Result<Task, DomainError>;

    /// Partial update; `None` fields keep their current value.
    async fn update(&self, id: &str, patch: TaskPatch) -> Result<Task, DomainError>;

    /// Deleting an absent id fails with NotFound, including the second of
    /// two consecutive deletes.
    async fn delete(&self, id: &str) -> Result<(), DomainError>;

    /// Tasks matching every supplied filter field (AND semantics).
    async fn list(&self, filter: &TaskFilter) -> Result<Vec<Task>, DomainError>;
}
