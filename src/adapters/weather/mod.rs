//! Weather adapters: live weatherapi.com gateway and the deterministic
//! synthetic fallback.

pub mod synthetic;
pub mod weatherapi;

pub use weatherapi::WeatherApiAdapter;
