//! Live calendar adapter. Narrow REST client over a bearer key; only the
//! success/failure contract matters to the core.
//!
//! Endpoints: POST /events, GET /events/{id}, PATCH /events/{id},
//! DELETE /events/{id}, GET /events?start=..&end=..

use crate::domain::{DomainError, Event, EventDraft, EventPatch};
use crate::ports::CalendarApiPort;
use chrono::NaiveDateTime;
use reqwest::{Method, StatusCode};

const TIME_FMT: &str = "%Y-%m-%dT%H:%M:%S";

pub struct HttpCalendarAdapter {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpCalendarAdapter {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            api_key,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn send(&self, req: reqwest::RequestBuilder) -> Result<reqwest::Response, DomainError> {
        let response = req
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send()
            .await
            .map_err(|e| DomainError::Integration(format!("calendar request failed: {}", e)))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            let body = response.text().await.unwrap_or_default();
            return Err(DomainError::NotFound(format!("calendar event: {}", body)));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DomainError::Integration(format!(
                "calendar api error {}: {}",
                status,
                body.chars().take(200).collect::<String>()
            )));
        }
        Ok(response)
    }

    async fn decode_event(&self, response: reqwest::Response) -> Result<Event, DomainError> {
        response
            .json::<Event>()
            .await
            .map_err(|e| DomainError::Integration(format!("calendar decode failed: {}", e)))
    }
}

#[async_trait::async_trait]
impl CalendarApiPort for HttpCalendarAdapter {
    async fn add_event(&self, draft: EventDraft) -> Result<Event, DomainError> {
        let req = self.client.post(self.url("events")).json(&draft);
        let response = self.send(req).await?;
        self.decode_event(response).await
    }

    async fn get_event(&self, id: &str) -> Result<Event, DomainError> {
        let req = self.client.get(self.url(&format!("events/{}", id)));
        let response = self.send(req).await?;
        self.decode_event(response).await
    }

    async fn update_event(&self, id: &str, patch: EventPatch) -> Result<Event, DomainError> {
        let req = self
            .client
            .request(Method::PATCH, self.url(&format!("events/{}", id)))
            .json(&patch);
        let response = self.send(req).await?;
        self.decode_event(response).await
    }

    async fn delete_event(&self, id: &str) -> Result<(), DomainError> {
        let req = self.client.delete(self.url(&format!("events/{}", id)));
        self.send(req).await?;
        Ok(())
    }

    async fn events_between(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<Event>, DomainError> {
        let req = self.client.get(self.url("events")).query(&[
            ("start", start.format(TIME_FMT).to_string()),
            ("end", end.format(TIME_FMT).to_string()),
        ]);
        let response = self.send(req).await?;
        let mut events: Vec<Event> = response
            .json()
            .await
            .map_err(|e| DomainError::Integration(format!("calendar decode failed: {}", e)))?;
        events.sort_by_key(|e| e.start);
        Ok(events)
    }
}
