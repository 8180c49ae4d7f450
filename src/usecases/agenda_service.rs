//! Agenda aggregation. Fans out to the three domain services concurrently,
//! bounds each call by its own budget, and merges the outcomes into one
//! always-producible agenda.
//!
//! - A fallback-provenance answer still carries data but marks the domain
//!   degraded
//! - A timeout or service error yields a neutral value (absent weather,
//!   empty lists) and marks the domain degraded
//! - Wall clock is bounded by the max of the three budgets, never their sum

use crate::domain::{
    Agenda, AgendaDomain, DomainError, Event, Task, TaskFilter,
};
use crate::ports::{CalendarServicePort, TodoServicePort, WeatherServicePort};
use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Per-domain deadlines. Independent, not shared: a slow weather call cannot
/// eat into the todo or calendar budget.
#[derive(Debug, Clone, Copy)]
pub struct DomainBudgets {
    pub weather: Duration,
    pub todo: Duration,
    pub calendar: Duration,
}

impl Default for DomainBudgets {
    fn default() -> Self {
        Self {
            weather: Duration::from_millis(3000),
            todo: Duration::from_millis(2000),
            calendar: Duration::from_millis(3000),
        }
    }
}

pub struct AgendaService {
    weather: Arc<dyn WeatherServicePort>,
    todo: Arc<dyn TodoServicePort>,
    calendar: Arc<dyn CalendarServicePort>,
    budgets: DomainBudgets,
}

impl AgendaService {
    pub fn new(
        weather: Arc<dyn WeatherServicePort>,
        todo: Arc<dyn TodoServicePort>,
        calendar: Arc<dyn CalendarServicePort>,
        budgets: DomainBudgets,
    ) -> Self {
        Self {
            weather,
            todo,
            calendar,
            budgets,
        }
    }

    /// Build the agenda for one day. Never fails: every domain outcome is
    /// folded into either data or a `degraded` marker. A result arriving
    /// after its budget is dropped with the timed-out future and cannot be
    /// spliced into the returned agenda.
    pub async fn generate_daily_agenda(&self, for_date: NaiveDate, location: &str) -> Agenda {
        let day_start = for_date.and_time(NaiveTime::MIN);
        let day_end = next_day(for_date).and_time(NaiveTime::MIN);
        let task_filter = TaskFilter {
            completed: Some(false),
            due_before: Some(next_day(for_date)),
            priority: None,
        };

        let (weather_out, todo_out, calendar_out) = tokio::join!(
            tokio::time::timeout(self.budgets.weather, self.weather.current(location)),
            tokio::time::timeout(self.budgets.todo, self.todo.list(&task_filter)),
            tokio::time::timeout(
                self.budgets.calendar,
                self.calendar.events_between(day_start, day_end)
            ),
        );

        let mut degraded = BTreeSet::new();

        let weather = match flatten(weather_out, AgendaDomain::Weather, self.budgets.weather) {
            Ok(sourced) => {
                if sourced.is_fallback() {
                    degraded.insert(AgendaDomain::Weather);
                }
                Some(sourced.value)
            }
            Err(e) => {
                warn!(error = %e, "weather missing from agenda");
                degraded.insert(AgendaDomain::Weather);
                None
            }
        };

        let tasks = match flatten(todo_out, AgendaDomain::Todo, self.budgets.todo) {
            Ok(tasks) => tasks_due_on(tasks, for_date),
            Err(e) => {
                warn!(error = %e, "tasks missing from agenda");
                degraded.insert(AgendaDomain::Todo);
                Vec::new()
            }
        };

        let events = match flatten(calendar_out, AgendaDomain::Calendar, self.budgets.calendar) {
            Ok(sourced) => {
                if sourced.is_fallback() {
                    degraded.insert(AgendaDomain::Calendar);
                }
                events_overlapping(sourced.value, day_start, day_end)
            }
            Err(e) => {
                warn!(error = %e, "events missing from agenda");
                degraded.insert(AgendaDomain::Calendar);
                Vec::new()
            }
        };

        info!(
            date = %for_date,
            tasks = tasks.len(),
            events = events.len(),
            degraded = degraded.len(),
            "agenda assembled"
        );

        Agenda {
            date: for_date,
            weather,
            tasks,
            events,
            degraded,
        }
    }
}

fn next_day(date: NaiveDate) -> NaiveDate {
    date.checked_add_days(Days::new(1)).unwrap_or(date)
}

/// Collapse the two failure layers (deadline, service error) into one.
fn flatten<T>(
    outcome: Result<Result<T, DomainError>, tokio::time::error::Elapsed>,
    domain: AgendaDomain,
    budget: Duration,
) -> Result<T, DomainError> {
    match outcome {
        Ok(res) => res,
        Err(_) => Err(DomainError::Unavailable(format!(
            "{} did not respond within {} ms",
            domain,
            budget.as_millis()
        ))),
    }
}

/// Tasks due exactly on the agenda day, highest priority first, then due date.
fn tasks_due_on(mut tasks: Vec<Task>, for_date: NaiveDate) -> Vec<Task> {
    tasks.retain(|t| t.due_date == for_date);
    tasks.sort_by(|a, b| {
        b.priority
            .cmp(&a.priority)
            .then_with(|| a.due_date.cmp(&b.due_date))
    });
    tasks
}

/// Events overlapping the agenda day, ordered by start time.
fn events_overlapping(
    mut events: Vec<Event>,
    day_start: NaiveDateTime,
    day_end: NaiveDateTime,
) -> Vec<Event> {
    events.retain(|e| e.overlaps(day_start, day_end));
    events.sort_by_key(|e| e.start);
    events
}
