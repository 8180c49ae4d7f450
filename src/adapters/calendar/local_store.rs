//! In-memory calendar store. The fallback tier: it never fails except for
//! NotFound on absent ids, so a fallback read can always be served.

use crate::domain::{DomainError, Event, EventDraft, EventPatch};
use crate::ports::CalendarApiPort;
use chrono::{Duration, NaiveDateTime};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Default)]
pub struct LocalCalendarStore {
    events: RwLock<HashMap<String, Event>>,
}

impl LocalCalendarStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl CalendarApiPort for LocalCalendarStore {
    async fn add_event(&self, draft: EventDraft) -> Result<Event, DomainError> {
        let id = uuid::Uuid::new_v4().to_string();
        let end = draft.end.unwrap_or(draft.start + Duration::hours(1));
        let event = Event {
            id: id.clone(),
            title: draft.title,
            description: draft.description,
            start: draft.start,
            end,
            location: draft.location,
        };
        self.events.write().await.insert(id.clone(), event.clone());
        debug!(event_id = %id, "event stored locally");
        Ok(event)
    }

    async fn get_event(&self, id: &str) -> Result<Event, DomainError> {
        self.events
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| DomainError::NotFound(format!("event '{}'", id)))
    }

    async fn update_event(&self, id: &str, patch: EventPatch) -> Result<Event, DomainError> {
        let mut events = self.events.write().await;
        let event = events
            .get_mut(id)
            .ok_or_else(|| DomainError::NotFound(format!("event '{}'", id)))?;

        if let Some(title) = patch.title {
            event.title = title;
        }
        if let Some(description) = patch.description {
            event.description = description;
        }
        if let Some(start) = patch.start {
            event.start = start;
        }
        if let Some(end) = patch.end {
            event.end = end;
        }
        if let Some(location) = patch.location {
            event.location = Some(location);
        }

        Ok(event.clone())
    }

    async fn delete_event(&self, id: &str) -> Result<(), DomainError> {
        self.events
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| DomainError::NotFound(format!("event '{}'", id)))
    }

    async fn events_between(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<Event>, DomainError> {
        let mut matching: Vec<Event> = self
            .events
            .read()
            .await
            .values()
            .filter(|e| e.overlaps(start, end))
            .cloned()
            .collect();
        matching.sort_by_key(|e| e.start);
        Ok(matching)
    }
}
