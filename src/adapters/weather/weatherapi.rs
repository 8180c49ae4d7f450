//! Live weather adapter against weatherapi.com. Implements WeatherApiPort.
//!
//! Only the success/failure contract matters to the core: every transport,
//! status, or decode problem maps to `DomainError::Integration` and the
//! owning service decides what to do with it.

use crate::domain::{DailyForecast, DomainError, Forecast, Provenance, WeatherReading};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use tracing::debug;

/// weatherapi.com gateway. `base_url` is injectable for tests.
pub struct WeatherApiAdapter {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl WeatherApiAdapter {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            api_key,
        }
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, DomainError> {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), path);
        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| DomainError::Integration(format!("weather request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DomainError::Integration(format!(
                "weather api error {}: {}",
                status,
                body.chars().take(200).collect::<String>()
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| DomainError::Integration(format!("weather response decode failed: {}", e)))
    }
}

#[derive(Deserialize)]
struct CurrentResponse {
    location: ApiLocation,
    current: ApiCurrent,
}

#[derive(Deserialize)]
struct ApiLocation {
    name: String,
}

#[derive(Deserialize)]
struct ApiCurrent {
    temp_c: f64,
    humidity: u8,
    wind_kph: f64,
    condition: ApiCondition,
}

#[derive(Deserialize)]
struct ApiCondition {
    text: String,
}

#[derive(Deserialize)]
struct ForecastResponse {
    location: ApiLocation,
    forecast: ApiForecast,
}

#[derive(Deserialize)]
struct ApiForecast {
    forecastday: Vec<ApiForecastDay>,
}

#[derive(Deserialize)]
struct ApiForecastDay {
    date: String,
    day: ApiDay,
}

#[derive(Deserialize)]
struct ApiDay {
    avgtemp_c: f64,
    avghumidity: f64,
    maxwind_kph: f64,
    condition: ApiCondition,
}

#[async_trait::async_trait]
impl crate::ports::WeatherApiPort for WeatherApiAdapter {
    async fn current(&self, location: &str) -> Result<WeatherReading, DomainError> {
        let data: CurrentResponse = self
            .get_json(
                "current.json",
                &[
                    ("key", self.api_key.clone()),
                    ("q", location.to_string()),
                    ("aqi", "no".to_string()),
                ],
            )
            .await?;

        debug!(location = %data.location.name, "live weather fetched");

        Ok(WeatherReading {
            location: data.location.name,
            temperature: data.current.temp_c,
            condition: data.current.condition.text,
            humidity: data.current.humidity,
            wind_speed: data.current.wind_kph,
            as_of: Utc::now().naive_utc(),
            source: Provenance::Live,
        })
    }

    async fn forecast(&self, location: &str, days: u8) -> Result<Forecast, DomainError> {
        let data: ForecastResponse = self
            .get_json(
                "forecast.json",
                &[
                    ("key", self.api_key.clone()),
                    ("q", location.to_string()),
                    ("days", days.to_string()),
                    ("aqi", "no".to_string()),
                ],
            )
            .await?;

        let entries = data
            .forecast
            .forecastday
            .into_iter()
            .map(|day| {
                let date = NaiveDate::parse_from_str(&day.date, "%Y-%m-%d").map_err(|e| {
                    DomainError::Integration(format!("bad forecast date '{}': {}", day.date, e))
                })?;
                Ok(DailyForecast {
                    date,
                    temperature: day.day.avgtemp_c,
                    condition: day.day.condition.text,
                    humidity: day.day.avghumidity.round() as u8,
                    wind_speed: day.day.maxwind_kph,
                })
            })
            .collect::<Result<Vec<_>, DomainError>>()?;

        Ok(Forecast {
            location: data.location.name,
            days: entries,
            source: Provenance::Live,
        })
    }
}
