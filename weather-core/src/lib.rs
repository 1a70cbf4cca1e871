//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - Input validation: coordinate parsing and city/coordinates mode selection
//! - Configuration & credentials handling
//! - The weather provider abstraction and its OpenWeatherMap client
//! - Plain-text report rendering
//!
//! It is used by `weather-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod coords;
pub mod dispatch;
pub mod error;
pub mod mode;
pub mod model;
pub mod provider;
pub mod render;

pub use config::Config;
pub use coords::{Coordinates, parse_coordinates};
pub use dispatch::Dispatcher;
pub use error::{ConfigError, ParseError, WeatherError};
pub use mode::{Location, QueryMode, resolve_mode};
pub use model::{CurrentWeather, Forecast, ForecastSlot, Report, Units};
pub use provider::{MAX_FORECAST_SLOTS, WeatherProvider, provider_from_config};
pub use render::Renderer;

pub mod constants {
    use std::time::Duration;

    /// Environment variable holding the OpenWeatherMap API key.
    pub const API_KEY_ENV: &str = "OWM_API_KEY";
    pub(crate) const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
}
