//! Application configuration. API credentials, paths, per-domain timeouts.
//!
//! Credential presence is captured here once and injected into services at
//! construction — live-vs-fallback decisions are testable without touching
//! the environment.

use serde::Deserialize;

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// weatherapi.com key. Absent = weather serves synthetic fallback only.
    /// Read from AGENDA_WEATHER_API_KEY.
    #[serde(default)]
    pub weather_api_key: Option<String>,

    /// Weather API base URL. Defaults to weatherapi.com. Read from AGENDA_WEATHER_API_URL.
    #[serde(default)]
    pub weather_api_url: Option<String>,

    /// Calendar API bearer key. Read from AGENDA_CALENDAR_API_KEY.
    #[serde(default)]
    pub calendar_api_key: Option<String>,

    /// Calendar API base URL. Read from AGENDA_CALENDAR_API_URL.
    #[serde(default)]
    pub calendar_api_url: Option<String>,

    /// Directory for the task database. Read from AGENDA_DATA_DIR.
    #[serde(default)]
    pub data_dir: Option<String>,

    /// Default agenda location. Read from AGENDA_LOCATION.
    #[serde(default)]
    pub location: Option<String>,

    /// Per-domain deadlines in ms. Read from AGENDA_WEATHER_TIMEOUT_MS /
    /// AGENDA_TODO_TIMEOUT_MS / AGENDA_CALENDAR_TIMEOUT_MS.
    #[serde(default)]
    pub weather_timeout_ms: Option<u64>,
    #[serde(default)]
    pub todo_timeout_ms: Option<u64>,
    #[serde(default)]
    pub calendar_timeout_ms: Option<u64>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        c = c.add_source(config::Environment::with_prefix("AGENDA"));
        if let Ok(path) = std::env::var("AGENDA_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        c.build()?.try_deserialize()
    }

    /// Returns true if the live weather integration can be used.
    pub fn is_weather_configured(&self) -> bool {
        self.weather_api_key.is_some()
    }

    /// Returns true if the live calendar integration can be used (needs both
    /// a key and a base URL — there is no sensible default endpoint).
    pub fn is_calendar_configured(&self) -> bool {
        self.calendar_api_key.is_some() && self.calendar_api_url.is_some()
    }

    pub fn weather_api_url_or_default(&self) -> String {
        self.weather_api_url
            .clone()
            .unwrap_or_else(|| "http://api.weatherapi.com/v1".to_string())
    }

    pub fn data_dir_or_default(&self) -> String {
        self.data_dir.clone().unwrap_or_else(|| "./data".to_string())
    }

    pub fn location_or_default(&self) -> String {
        self.location.clone().unwrap_or_else(|| "Boston".to_string())
    }

    /// Weather deadline in ms. Defaults to 3000.
    pub fn weather_timeout_ms_or_default(&self) -> u64 {
        self.weather_timeout_ms.unwrap_or(3000)
    }

    /// Todo deadline in ms. Defaults to 2000.
    pub fn todo_timeout_ms_or_default(&self) -> u64 {
        self.todo_timeout_ms.unwrap_or(2000)
    }

    /// Calendar deadline in ms. Defaults to 3000.
    pub fn calendar_timeout_ms_or_default(&self) -> u64 {
        self.calendar_timeout_ms.unwrap_or(3000)
    }
}
