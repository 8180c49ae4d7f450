//! Deterministic synthetic weather. Pure computation, keyed by (location, date).
//!
//! Used whenever the live integration is unconfigured or fails. Must never
//! fail itself, so everything here is infallible: a seeded RNG over a stable
//! hash of the request, plus coarse per-city and seasonal temperature offsets.

use crate::domain::{DailyForecast, Forecast, Provenance, WeatherReading};
use chrono::{Datelike, NaiveDate, NaiveTime};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const CONDITIONS: [&str; 9] = [
    "Sunny",
    "Partly Cloudy",
    "Cloudy",
    "Rainy",
    "Thunderstorms",
    "Snowy",
    "Foggy",
    "Clear",
    "Windy",
];

/// FNV-1a over the request key. Stable across runs, unlike `DefaultHasher`.
fn seed_for(location: &str, date: NaiveDate) -> u64 {
    let key = format!("{}:{}", location.to_lowercase(), date.format("%Y-%m-%d"));
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for b in key.as_bytes() {
        hash ^= u64::from(*b);
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    hash
}

fn base_temp(location: &str, date: NaiveDate) -> f64 {
    let loc = location.to_lowercase();
    let mut base = 20.0;

    if loc.contains("london") || loc.contains("paris") {
        base -= 5.0;
    } else if loc.contains("tokyo") {
        base += 3.0;
    } else if loc.contains("sydney") {
        base += 5.0;
    } else if loc.contains("boston") {
        base += 10.0;
    } else if loc.contains("chicago") || loc.contains("new york") {
        base -= 3.0;
    }

    // Northern-hemisphere seasonal swing.
    match date.month() {
        12 | 1 | 2 => base - 15.0,
        3..=5 => base - 5.0,
        6..=8 => base + 10.0,
        _ => base,
    }
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

/// One synthetic reading for a (location, date) pair. Deterministic: calling
/// twice with the same inputs yields an identical reading.
pub fn reading(location: &str, date: NaiveDate, source: Provenance) -> WeatherReading {
    let mut rng = StdRng::seed_from_u64(seed_for(location, date));

    let temperature = round1(base_temp(location, date) + rng.gen_range(-5.0..5.0));
    let condition = CONDITIONS[rng.gen_range(0..CONDITIONS.len())].to_string();
    let humidity: u8 = rng.gen_range(30..=90);
    let wind_speed = round1(rng.gen_range(0.0..30.0));

    WeatherReading {
        location: location.to_string(),
        temperature,
        condition,
        humidity,
        wind_speed,
        as_of: date.and_time(NaiveTime::MIN),
        source,
    }
}

/// Synthetic daily forecast starting at `from`, one entry per day.
pub fn forecast(location: &str, from: NaiveDate, days: u8, source: Provenance) -> Forecast {
    let entries = (0..days)
        .filter_map(|offset| from.checked_add_days(chrono::Days::new(u64::from(offset))))
        .map(|date| {
            let r = reading(location, date, source);
            DailyForecast {
                date,
                temperature: r.temperature,
                condition: r.condition,
                humidity: r.humidity,
                wind_speed: r.wind_speed,
            }
        })
        .collect();

    Forecast {
        location: location.to_string(),
        days: entries,
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FallbackReason;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn reading_is_deterministic_per_location_and_date() {
        let src = Provenance::Fallback(FallbackReason::Unconfigured);
        let a = reading("London", date(2025, 5, 1), src);
        let b = reading("London", date(2025, 5, 1), src);
        assert_eq!(a, b);

        let other_day = reading("London", date(2025, 5, 2), src);
        let other_city = reading("Tokyo", date(2025, 5, 1), src);
        assert!(a != other_day || a != other_city);
    }

    #[test]
    fn reading_stays_in_sane_ranges() {
        let src = Provenance::Fallback(FallbackReason::Unconfigured);
        for city in ["London", "Sydney", "Boston", "Nowhere Springs"] {
            let r = reading(city, date(2025, 7, 15), src);
            assert!((30..=90).contains(&r.humidity));
            assert!((0.0..=30.0).contains(&r.wind_speed));
            assert!(CONDITIONS.contains(&r.condition.as_str()));
        }
    }

    #[test]
    fn winter_is_colder_than_summer_for_same_city() {
        let src = Provenance::Fallback(FallbackReason::Unconfigured);
        let winter = reading("London", date(2025, 1, 10), src);
        let summer = reading("London", date(2025, 7, 10), src);
        // 25 degrees of seasonal swing dominates the ±5 jitter.
        assert!(winter.temperature < summer.temperature);
    }

    #[test]
    fn forecast_has_one_entry_per_day_with_uniform_source() {
        let src = Provenance::Fallback(FallbackReason::LiveCallFailed);
        let fc = forecast("Paris", date(2025, 5, 1), 5, src);
        assert_eq!(fc.days.len(), 5);
        assert_eq!(fc.source, src);
        assert_eq!(fc.days[0].date, date(2025, 5, 1));
        assert_eq!(fc.days[4].date, date(2025, 5, 5));
    }
}
