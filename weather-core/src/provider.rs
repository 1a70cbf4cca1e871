use crate::{
    Config, WeatherError,
    model::{CurrentWeather, Forecast},
    mode::Location,
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// 5 days at 3-hour resolution.
pub const MAX_FORECAST_SLOTS: usize = 40;

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Check the credential before spending a request on it.
    async fn validate_api_key(&self) -> Result<(), WeatherError>;

    async fn current(&self, location: &Location) -> Result<CurrentWeather, WeatherError>;

    /// Up to `slots` forecast steps, chronological.
    async fn forecast(&self, location: &Location, slots: usize) -> Result<Forecast, WeatherError>;
}

/// Construct the provider from resolved configuration.
pub fn provider_from_config(config: &Config) -> Result<Box<dyn WeatherProvider>, WeatherError> {
    let api_key = config.api_key().ok_or_else(|| {
        WeatherError::Credential(
            "no API key found.\n\
             Hint: set the OWM_API_KEY environment variable or run `weather configure`."
                .to_string(),
        )
    })?;

    let provider = OpenWeatherProvider::new(api_key.to_owned())
        .with_units(config.units)
        .with_lang(config.lang.clone());

    Ok(Box::new(provider))
}
