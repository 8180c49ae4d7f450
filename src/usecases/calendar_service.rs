//! Calendar domain service. Live-vs-fallback on the query path; mutations go
//! to the tier selected at call time.
//!
//! A failed live query falls back to the local store, which cannot fail. A
//! failed live mutation surfaces as an Integration error instead — silently
//! writing to the local store would fake durability the live calendar never
//! saw.

use crate::adapters::calendar::LocalCalendarStore;
use crate::domain::{
    DomainError, Event, EventDraft, EventPatch, FallbackReason, Sourced,
};
use crate::ports::{CalendarApiPort, CalendarServicePort};
use chrono::NaiveDateTime;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

pub struct CalendarService {
    live: Option<Arc<dyn CalendarApiPort>>,
    local: Arc<LocalCalendarStore>,
    timeout: Duration,
}

impl CalendarService {
    pub fn new(
        live: Option<Arc<dyn CalendarApiPort>>,
        local: Arc<LocalCalendarStore>,
        timeout: Duration,
    ) -> Self {
        Self {
            live,
            local,
            timeout,
        }
    }

    /// The backing tier for mutations: live when configured, local otherwise.
    fn backing(&self) -> &dyn CalendarApiPort {
        match &self.live {
            Some(live) => live.as_ref(),
            None => self.local.as_ref(),
        }
    }

    async fn bounded<T>(
        &self,
        fut: impl std::future::Future<Output = Result<T, DomainError>> + Send,
    ) -> Result<T, DomainError> {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(res) => res,
            Err(_) => Err(DomainError::Integration(format!(
                "calendar api timed out after {} ms",
                self.timeout.as_millis()
            ))),
        }
    }

    fn validate_draft(draft: &EventDraft) -> Result<(), DomainError> {
        if draft.title.trim().is_empty() {
            return Err(DomainError::InvalidRequest(
                "event title must not be empty".to_string(),
            ));
        }
        if let Some(end) = draft.end {
            if end < draft.start {
                return Err(DomainError::InvalidRequest(
                    "event end must not precede start".to_string(),
                ));
            }
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl CalendarServicePort for CalendarService {
    async fn add_event(&self, draft: EventDraft) -> Result<Event, DomainError> {
        Self::validate_draft(&draft)?;
        self.bounded(self.backing().add_event(draft)).await
    }

    async fn get_event(&self, id: &str) -> Result<Event, DomainError> {
        self.bounded(self.backing().get_event(id)).await
    }

    async fn update_event(&self, id: &str, patch: EventPatch) -> Result<Event, DomainError> {
        if patch.is_empty() {
            return Err(DomainError::InvalidRequest(
                "no fields to update provided".to_string(),
            ));
        }
        self.bounded(self.backing().update_event(id, patch)).await
    }

    async fn delete_event(&self, id: &str) -> Result<(), DomainError> {
        self.bounded(self.backing().delete_event(id)).await
    }

    async fn events_between(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Sourced<Vec<Event>>, DomainError> {
        if start > end {
            return Err(DomainError::InvalidRequest(
                "range start must not exceed end".to_string(),
            ));
        }

        let Some(live) = &self.live else {
            let events = self.local.events_between(start, end).await?;
            return Ok(Sourced::fallback(events, FallbackReason::Unconfigured));
        };

        match tokio::time::timeout(self.timeout, live.events_between(start, end)).await {
            Ok(Ok(events)) => Ok(Sourced::live(events)),
            Ok(Err(e)) => {
                warn!(error = %e, "live calendar query failed, serving local events");
                let events = self.local.events_between(start, end).await?;
                Ok(Sourced::fallback(events, FallbackReason::LiveCallFailed))
            }
            Err(_) => {
                warn!(
                    timeout_ms = self.timeout.as_millis() as u64,
                    "live calendar query timed out, serving local events"
                );
                let events = self.local.events_between(start, end).await?;
                Ok(Sourced::fallback(events, FallbackReason::LiveCallFailed))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Provenance;
    use chrono::NaiveDate;

    fn at(d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 5, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn draft(title: &str, start: NaiveDateTime) -> EventDraft {
        EventDraft {
            title: title.to_string(),
            description: String::new(),
            start,
            end: None,
            location: None,
        }
    }

    struct FailingCalendarApi;

    #[async_trait::async_trait]
    impl CalendarApiPort for FailingCalendarApi {
        async fn add_event(&self, _draft: EventDraft) -> Result<Event, DomainError> {
            Err(DomainError::Integration("down".to_string()))
        }

        async fn get_event(&self, _id: &str) -> Result<Event, DomainError> {
            Err(DomainError::Integration("down".to_string()))
        }

        async fn update_event(&self, _id: &str, _patch: EventPatch) -> Result<Event, DomainError> {
            Err(DomainError::Integration("down".to_string()))
        }

        async fn delete_event(&self, _id: &str) -> Result<(), DomainError> {
            Err(DomainError::Integration("down".to_string()))
        }

        async fn events_between(
            &self,
            _start: NaiveDateTime,
            _end: NaiveDateTime,
        ) -> Result<Vec<Event>, DomainError> {
            Err(DomainError::Integration("down".to_string()))
        }
    }

    fn unconfigured() -> (CalendarService, Arc<LocalCalendarStore>) {
        let local = Arc::new(LocalCalendarStore::new());
        (
            CalendarService::new(None, Arc::clone(&local), Duration::from_millis(100)),
            local,
        )
    }

    #[tokio::test]
    async fn unconfigured_query_serves_local_events_as_fallback() {
        let (svc, _) = unconfigured();
        svc.add_event(draft("standup", at(1, 9))).await.unwrap();

        let got = svc.events_between(at(1, 0), at(2, 0)).await.unwrap();
        assert_eq!(got.value.len(), 1);
        assert_eq!(
            got.source,
            Provenance::Fallback(FallbackReason::Unconfigured)
        );
    }

    #[tokio::test]
    async fn failing_live_query_falls_back_to_local() {
        let local = Arc::new(LocalCalendarStore::new());
        // Seed the fallback tier directly; the live tier is down.
        local.add_event(draft("cached", at(1, 9))).await.unwrap();
        let svc = CalendarService::new(
            Some(Arc::new(FailingCalendarApi)),
            local,
            Duration::from_millis(100),
        );

        let got = svc.events_between(at(1, 0), at(2, 0)).await.unwrap();
        assert_eq!(got.value.len(), 1);
        assert_eq!(
            got.source,
            Provenance::Fallback(FallbackReason::LiveCallFailed)
        );
    }

    #[tokio::test]
    async fn failing_live_mutation_surfaces_instead_of_faking_durability() {
        let svc = CalendarService::new(
            Some(Arc::new(FailingCalendarApi)),
            Arc::new(LocalCalendarStore::new()),
            Duration::from_millis(100),
        );

        let err = svc.add_event(draft("meeting", at(1, 10))).await.unwrap_err();
        assert!(matches!(err, DomainError::Integration(_)));
    }

    #[tokio::test]
    async fn inverted_range_is_invalid_request() {
        let (svc, _) = unconfigured();
        let err = svc.events_between(at(2, 0), at(1, 0)).await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn not_found_propagates_from_the_local_tier() {
        let (svc, _) = unconfigured();
        let err = svc.delete_event("missing").await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }
}
