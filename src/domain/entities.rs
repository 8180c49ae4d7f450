//! Domain entities. Pure data structures for the core business.
//!
//! No HTTP/SQL types here — these are mapped from adapters.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Task priority. Ordering is Low < Medium < High so agenda sorting can
/// use `cmp` directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    /// Parse the stored text form. Returns `None` for unknown values.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "low" => Some(Priority::Low),
            "medium" => Some(Priority::Medium),
            "high" => Some(Priority::High),
            _ => None,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A todo task. Owned exclusively by the task store; `id` is assigned by the
/// store and immutable once issued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: String,
    pub due_date: NaiveDate,
    pub priority: Priority,
    pub completed: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Fields for creating a task. The store assigns id and timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskDraft {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub due_date: NaiveDate,
    #[serde(default = "default_priority")]
    pub priority: Priority,
}

fn default_priority() -> Priority {
    Priority::Medium
}

/// Partial update. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub priority: Option<Priority>,
    pub completed: Option<bool>,
}

impl TaskPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.due_date.is_none()
            && self.priority.is_none()
            && self.completed.is_none()
    }
}

/// Task list filter. All supplied fields must match (AND semantics).
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    pub completed: Option<bool>,
    /// Matches tasks strictly before this date.
    pub due_before: Option<NaiveDate>,
    pub priority: Option<Priority>,
}

/// A calendar event. Owned by whichever backing store the calendar service
/// currently selects; ids are not stable across a fallback/live switch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub location: Option<String>,
}

impl Event {
    /// Range-overlap check used both by stores and the agenda merge.
    pub fn overlaps(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        self.start < end && self.end >= start
    }
}

/// Fields for creating an event. A missing `end` defaults to one hour after
/// `start`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventDraft {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub start: NaiveDateTime,
    pub end: Option<NaiveDateTime>,
    pub location: Option<String>,
}

/// Partial event update. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
    pub location: Option<String>,
}

impl EventPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.start.is_none()
            && self.end.is_none()
            && self.location.is_none()
    }
}

/// Why a response was served from the local substitute instead of the live
/// integration. Kept distinguishable even though both paths produce the same
/// data shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackReason {
    /// No credential configured; the live integration was never attempted.
    Unconfigured,
    /// The live call was attempted and failed (timeout, transport, bad body).
    LiveCallFailed,
}

/// Where a response came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    Live,
    Fallback(FallbackReason),
}

impl Provenance {
    pub fn is_fallback(&self) -> bool {
        matches!(self, Provenance::Fallback(_))
    }
}

/// A value paired with its provenance. Domain services return this so the
/// aggregator can mark degraded domains without inspecting the payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sourced<T> {
    pub value: T,
    pub source: Provenance,
}

impl<T> Sourced<T> {
    pub fn live(value: T) -> Self {
        Self {
            value,
            source: Provenance::Live,
        }
    }

    pub fn fallback(value: T, reason: FallbackReason) -> Self {
        Self {
            value,
            source: Provenance::Fallback(reason),
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.source.is_fallback()
    }
}

/// A point-in-time weather observation. Ephemeral — recomputed per request,
/// never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReading {
    pub location: String,
    pub temperature: f64,
    pub condition: String,
    pub humidity: u8,
    pub wind_speed: f64,
    pub as_of: NaiveDateTime,
    pub source: Provenance,
}

/// One forecast day. Provenance lives on the enclosing [`Forecast`], uniform
/// for the whole sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    pub date: NaiveDate,
    pub temperature: f64,
    pub condition: String,
    pub humidity: u8,
    pub wind_speed: f64,
}

/// Ordered multi-day forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub location: String,
    pub days: Vec<DailyForecast>,
    pub source: Provenance,
}

/// The three agenda domains. Ordering gives `degraded` a stable rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgendaDomain {
    Weather,
    Todo,
    Calendar,
}

impl fmt::Display for AgendaDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgendaDomain::Weather => f.write_str("weather"),
            AgendaDomain::Todo => f.write_str("todo"),
            AgendaDomain::Calendar => f.write_str("calendar"),
        }
    }
}

/// A merged daily agenda. `degraded` names every domain that either fell back
/// to its local substitute or failed entirely — it is the only way a caller
/// can tell "service down" apart from "service returned nothing".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agenda {
    pub date: NaiveDate,
    pub weather: Option<WeatherReading>,
    pub tasks: Vec<Task>,
    pub events: Vec<Event>,
    pub degraded: BTreeSet<AgendaDomain>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_orders_low_to_high() {
        assert!(Priority::Low < Priority::Medium);
        assert!(Priority::Medium < Priority::High);
        assert_eq!(Priority::parse("high"), Some(Priority::High));
        assert_eq!(Priority::parse("urgent"), None);
    }

    #[test]
    fn event_overlap_is_inclusive_of_running_events() {
        let day = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
        let start = day.and_hms_opt(0, 0, 0).unwrap();
        let end = day.succ_opt().unwrap().and_hms_opt(0, 0, 0).unwrap();

        let ev = |s: (u32, u32), e: (u32, u32)| Event {
            id: "e".into(),
            title: "t".into(),
            description: String::new(),
            start: day.and_hms_opt(s.0, s.1, 0).unwrap(),
            end: day.and_hms_opt(e.0, e.1, 0).unwrap(),
            location: None,
        };

        assert!(ev((10, 0), (11, 0)).overlaps(start, end));
        // Started yesterday, still running today.
        let mut spanning = ev((1, 0), (2, 0));
        spanning.start = day.pred_opt().unwrap().and_hms_opt(23, 0, 0).unwrap();
        assert!(spanning.overlaps(start, end));
        // Entirely tomorrow.
        let mut later = ev((1, 0), (2, 0));
        later.start = end + chrono::Duration::hours(1);
        later.end = end + chrono::Duration::hours(2);
        assert!(!later.overlaps(start, end));
    }

    #[test]
    fn provenance_serializes_with_reason() {
        let p = Provenance::Fallback(FallbackReason::Unconfigured);
        let json = serde_json::to_string(&p).unwrap();
        assert!(json.contains("unconfigured"));
        let back: Provenance = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
        assert!(back.is_fallback());
    }
}
