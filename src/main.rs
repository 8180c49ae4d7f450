//! Wiring & DI. Entry point: bootstrap adapters, inject into services, render
//! today's agenda. No business logic here.

use agenda_hub::adapters::calendar::{HttpCalendarAdapter, LocalCalendarStore};
use agenda_hub::adapters::persistence::SqliteTaskStore;
use agenda_hub::adapters::ui::render_agenda;
use agenda_hub::adapters::weather::WeatherApiAdapter;
use agenda_hub::ports::{
    CalendarApiPort, CalendarServicePort, TodoServicePort, WeatherApiPort, WeatherServicePort,
};
use agenda_hub::shared::config::AppConfig;
use agenda_hub::usecases::{
    AgendaService, CalendarService, DomainBudgets, TodoService, WeatherService,
};
use chrono::Local;
use dotenv::dotenv;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = AppConfig::load().unwrap_or_default();

    let data_path = PathBuf::from(cfg.data_dir_or_default());
    let store = Arc::new(
        SqliteTaskStore::connect(&data_path)
            .await
            .map_err(|e| anyhow::anyhow!("task store connect failed: {}", e))?,
    );

    let weather_timeout = Duration::from_millis(cfg.weather_timeout_ms_or_default());
    let todo_timeout = Duration::from_millis(cfg.todo_timeout_ms_or_default());
    let calendar_timeout = Duration::from_millis(cfg.calendar_timeout_ms_or_default());

    // --- Weather: live adapter when a key is present, synthetic otherwise ---
    let weather_live: Option<Arc<dyn WeatherApiPort>> = if cfg.is_weather_configured() {
        info!(url = %cfg.weather_api_url_or_default(), "live weather enabled");
        Some(Arc::new(WeatherApiAdapter::new(
            cfg.weather_api_url_or_default(),
            cfg.weather_api_key.clone().unwrap_or_default(),
        )))
    } else {
        warn!("AGENDA_WEATHER_API_KEY not set, weather will use synthetic fallback");
        None
    };

    // --- Calendar: live adapter when key+url are present, local otherwise ---
    let calendar_live: Option<Arc<dyn CalendarApiPort>> = if cfg.is_calendar_configured() {
        info!("live calendar enabled (AGENDA_CALENDAR_API_KEY, AGENDA_CALENDAR_API_URL)");
        Some(Arc::new(HttpCalendarAdapter::new(
            cfg.calendar_api_url.clone().unwrap_or_default(),
            cfg.calendar_api_key.clone().unwrap_or_default(),
        )))
    } else {
        warn!("calendar credentials not set, events will use the local store");
        None
    };
    let calendar_local = Arc::new(LocalCalendarStore::new());

    // --- Services ---
    let weather: Arc<dyn WeatherServicePort> =
        Arc::new(WeatherService::new(weather_live, weather_timeout));
    let todo: Arc<dyn TodoServicePort> = Arc::new(TodoService::new(store));
    let calendar: Arc<dyn CalendarServicePort> = Arc::new(CalendarService::new(
        calendar_live,
        calendar_local,
        calendar_timeout,
    ));

    let agenda_service = AgendaService::new(
        weather,
        todo,
        calendar,
        DomainBudgets {
            weather: weather_timeout,
            todo: todo_timeout,
            calendar: calendar_timeout,
        },
    );

    let location = std::env::args()
        .nth(1)
        .unwrap_or_else(|| cfg.location_or_default());
    let today = Local::now().date_naive();

    let agenda = agenda_service.generate_daily_agenda(today, &location).await;
    println!("{}", render_agenda(&agenda));

    Ok(())
}
