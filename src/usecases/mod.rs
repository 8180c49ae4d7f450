//! Application use cases. Orchestrate domain logic via ports.

pub mod agenda_service;
pub mod calendar_service;
pub mod todo_service;
pub mod weather_service;

pub use agenda_service::{AgendaService, DomainBudgets};
pub use calendar_service::CalendarService;
pub use todo_service::TodoService;
pub use weather_service::WeatherService;
