//! Weather domain service. Decides live-vs-fallback per request.
//!
//! - No configured live adapter: synthetic data, provenance `Unconfigured`
//! - Live call fails or times out: synthetic data, provenance `LiveCallFailed`
//! - The decision is made fresh on every request; there is no degraded latch

use crate::adapters::weather::synthetic;
use crate::domain::{
    DomainError, FallbackReason, Forecast, Provenance, Sourced, WeatherReading,
};
use crate::ports::{WeatherApiPort, WeatherServicePort};
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Forecast length cap, matching the upstream API limit.
const MAX_FORECAST_DAYS: u8 = 10;

pub struct WeatherService {
    live: Option<Arc<dyn WeatherApiPort>>,
    timeout: Duration,
}

impl WeatherService {
    /// `live` is `None` when no API key is configured; the service then
    /// serves synthetic data without ever attempting a network call.
    pub fn new(live: Option<Arc<dyn WeatherApiPort>>, timeout: Duration) -> Self {
        Self { live, timeout }
    }

    fn validate_location(location: &str) -> Result<(), DomainError> {
        if location.trim().is_empty() {
            return Err(DomainError::InvalidRequest(
                "location must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl WeatherServicePort for WeatherService {
    async fn current(&self, location: &str) -> Result<Sourced<WeatherReading>, DomainError> {
        Self::validate_location(location)?;
        let today = Utc::now().date_naive();

        let Some(api) = &self.live else {
            debug!(location, "weather unconfigured, serving synthetic");
            let reason = FallbackReason::Unconfigured;
            let reading = synthetic::reading(location, today, Provenance::Fallback(reason));
            return Ok(Sourced::fallback(reading, reason));
        };

        match tokio::time::timeout(self.timeout, api.current(location)).await {
            Ok(Ok(reading)) => Ok(Sourced::live(reading)),
            Ok(Err(e)) => {
                warn!(location, error = %e, "live weather call failed, serving synthetic");
                let reason = FallbackReason::LiveCallFailed;
                let reading = synthetic::reading(location, today, Provenance::Fallback(reason));
                Ok(Sourced::fallback(reading, reason))
            }
            Err(_) => {
                warn!(
                    location,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "live weather call timed out, serving synthetic"
                );
                let reason = FallbackReason::LiveCallFailed;
                let reading = synthetic::reading(location, today, Provenance::Fallback(reason));
                Ok(Sourced::fallback(reading, reason))
            }
        }
    }

    async fn forecast(&self, location: &str, days: u8) -> Result<Sourced<Forecast>, DomainError> {
        Self::validate_location(location)?;
        let days = days.clamp(1, MAX_FORECAST_DAYS);
        let today = Utc::now().date_naive();

        let Some(api) = &self.live else {
            debug!(location, days, "weather unconfigured, serving synthetic forecast");
            let reason = FallbackReason::Unconfigured;
            let fc = synthetic::forecast(location, today, days, Provenance::Fallback(reason));
            return Ok(Sourced::fallback(fc, reason));
        };

        match tokio::time::timeout(self.timeout, api.forecast(location, days)).await {
            Ok(Ok(fc)) => Ok(Sourced::live(fc)),
            Ok(Err(e)) => {
                warn!(location, error = %e, "live forecast failed, serving synthetic");
                let reason = FallbackReason::LiveCallFailed;
                let fc = synthetic::forecast(location, today, days, Provenance::Fallback(reason));
                Ok(Sourced::fallback(fc, reason))
            }
            Err(_) => {
                warn!(
                    location,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "live forecast timed out, serving synthetic"
                );
                let reason = FallbackReason::LiveCallFailed;
                let fc = synthetic::forecast(location, today, days, Provenance::Fallback(reason));
                Ok(Sourced::fallback(fc, reason))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DailyForecast, Provenance};

    struct FailingApi;

    #[async_trait::async_trait]
    impl WeatherApiPort for FailingApi {
        async fn current(&self, _location: &str) -> Result<WeatherReading, DomainError> {
            Err(DomainError::Integration("boom".to_string()))
        }

        async fn forecast(&self, _location: &str, _days: u8) -> Result<Forecast, DomainError> {
            Err(DomainError::Integration("boom".to_string()))
        }
    }

    struct HangingApi;

    #[async_trait::async_trait]
    impl WeatherApiPort for HangingApi {
        async fn current(&self, location: &str) -> Result<WeatherReading, DomainError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(synthetic::reading(
                location,
                Utc::now().date_naive(),
                Provenance::Live,
            ))
        }

        async fn forecast(&self, location: &str, _days: u8) -> Result<Forecast, DomainError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(Forecast {
                location: location.to_string(),
                days: Vec::<DailyForecast>::new(),
                source: Provenance::Live,
            })
        }
    }

    #[tokio::test]
    async fn unconfigured_service_is_deterministic_fallback() {
        let service = WeatherService::new(None, Duration::from_millis(100));

        let a = service.current("London").await.unwrap();
        let b = service.current("London").await.unwrap();

        assert_eq!(
            a.source,
            Provenance::Fallback(FallbackReason::Unconfigured)
        );
        assert_eq!(a.value, b.value);
        assert!(!a.value.condition.is_empty());
    }

    #[tokio::test]
    async fn failing_live_call_falls_back_with_reason() {
        let service = WeatherService::new(
            Some(Arc::new(FailingApi)),
            Duration::from_millis(100),
        );

        let got = service.current("London").await.unwrap();
        assert_eq!(
            got.source,
            Provenance::Fallback(FallbackReason::LiveCallFailed)
        );
        assert_eq!(got.value.source, got.source);
    }

    #[tokio::test(start_paused = true)]
    async fn hung_live_call_times_out_into_fallback() {
        let service = WeatherService::new(
            Some(Arc::new(HangingApi)),
            Duration::from_millis(50),
        );

        let got = service.current("Paris").await.unwrap();
        assert!(got.is_fallback());
    }

    #[tokio::test]
    async fn empty_location_is_invalid_request_before_any_fallback() {
        let service = WeatherService::new(None, Duration::from_millis(100));
        let err = service.current("   ").await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn forecast_clamps_days() {
        let service = WeatherService::new(None, Duration::from_millis(100));
        let fc = service.forecast("London", 50).await.unwrap();
        assert_eq!(fc.value.days.len(), usize::from(MAX_FORECAST_DAYS));
        let fc = service.forecast("London", 0).await.unwrap();
        assert_eq!(fc.value.days.len(), 1);
    }
}
