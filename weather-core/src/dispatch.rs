//! Per-command orchestration: validate key, resolve mode, fetch, render.

use log::{debug, info};

use crate::{
    WeatherError,
    coords::parse_coordinates,
    mode::{Location, QueryMode, resolve_mode},
    model::Report,
    provider::{MAX_FORECAST_SLOTS, WeatherProvider},
    render::Renderer,
};

pub struct Dispatcher<'a> {
    provider: &'a dyn WeatherProvider,
    renderer: Renderer,
}

impl<'a> Dispatcher<'a> {
    pub fn new(provider: &'a dyn WeatherProvider, renderer: Renderer) -> Self {
        Self { provider, renderer }
    }

    /// Current conditions for exactly one of `coords` / `city`.
    pub async fn current(&self, coords: &str, city: &str) -> Result<String, WeatherError> {
        let location = self.prepare(coords, city).await?;

        info!("Fetching current weather for {location}");
        let weather = self.provider.current(&location).await?;

        self.renderer.render(&Report::Current(weather))
    }

    /// Forecast of up to `slots` 3-hour steps, capped at [`MAX_FORECAST_SLOTS`].
    pub async fn forecast(&self, coords: &str, city: &str, slots: usize) -> Result<String, WeatherError> {
        let location = self.prepare(coords, city).await?;
        let slots = slots.clamp(1, MAX_FORECAST_SLOTS);

        info!("Fetching {slots}-slot forecast for {location}");
        let forecast = self.provider.forecast(&location, slots).await?;
        debug!("Provider returned {} slot(s)", forecast.slots.len());

        self.renderer.render(&Report::Forecast(forecast))
    }

    async fn prepare(&self, coords: &str, city: &str) -> Result<Location, WeatherError> {
        self.provider.validate_api_key().await?;

        let mode = resolve_mode(coords, city)?;
        debug!("Resolved query mode: {mode:?}");

        let location = match mode {
            QueryMode::ByCity => Location::City(city.to_string()),
            QueryMode::ByCoordinates => Location::Coordinates(parse_coordinates(coords)?),
        };

        Ok(location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::{ConfigError, ParseError},
        model::{City, Condition, CurrentWeather, Forecast, ForecastSlot, Temperature, Wind},
    };
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Debug, Default)]
    struct MockProvider {
        reject_key: bool,
        not_found: bool,
        calls: Mutex<Vec<String>>,
    }

    impl MockProvider {
        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: String) {
            self.calls.lock().unwrap().push(call);
        }
    }

    fn sample_current(name: &str) -> CurrentWeather {
        CurrentWeather {
            location_name: name.to_string(),
            conditions: vec![Condition { main: "Clear".into(), description: "clear sky".into() }],
            temperature: Temperature { temp: 15.0, temp_min: 12.0, temp_max: 18.0 },
            wind: Wind { speed: 3.2, deg: 180.0 },
            ..Default::default()
        }
    }

    #[async_trait]
    impl WeatherProvider for MockProvider {
        async fn validate_api_key(&self) -> Result<(), WeatherError> {
            self.record("validate".into());
            if self.reject_key {
                return Err(WeatherError::Credential("rejected".into()));
            }
            Ok(())
        }

        async fn current(&self, location: &Location) -> Result<CurrentWeather, WeatherError> {
            self.record(format!("current {location:?}"));
            if self.not_found {
                return Err(WeatherError::NotFound("city not found".into()));
            }
            Ok(sample_current(&location.to_string()))
        }

        async fn forecast(&self, location: &Location, slots: usize) -> Result<Forecast, WeatherError> {
            self.record(format!("forecast {location:?} {slots}"));
            let slot = ForecastSlot { wind: Wind { speed: 1.0, deg: 90.0 }, ..Default::default() };
            Ok(Forecast {
                city: City { name: location.to_string(), country: "GB".into() },
                slots: vec![slot; slots.min(3)],
            })
        }
    }

    #[tokio::test]
    async fn current_by_city() {
        let provider = MockProvider::default();
        let out = Dispatcher::new(&provider, Renderer::default()).current("", "London").await.unwrap();

        assert!(out.starts_with("Current weather for London:\n"));
        assert_eq!(provider.calls(), vec!["validate".to_string(), "current City(\"London\")".to_string()]);
    }

    #[tokio::test]
    async fn current_by_coordinates_keeps_order() {
        let provider = MockProvider::default();
        Dispatcher::new(&provider, Renderer::default()).current("51.5,-0.12", "").await.unwrap();

        let calls = provider.calls();
        assert_eq!(calls[1], "current Coordinates(Coordinates { lat: 51.5, lon: -0.12 })");
    }

    #[tokio::test]
    async fn no_flags_fails_before_fetching() {
        let provider = MockProvider::default();
        let err = Dispatcher::new(&provider, Renderer::default()).current("", "").await.unwrap_err();

        assert!(matches!(err, WeatherError::Mode(ConfigError::NoneSelected)));
        assert_eq!(provider.calls(), vec!["validate".to_string()]);
    }

    #[tokio::test]
    async fn both_flags_fail() {
        let provider = MockProvider::default();
        let err = Dispatcher::new(&provider, Renderer::default()).forecast("1,2", "London", 40).await.unwrap_err();

        assert!(matches!(err, WeatherError::Mode(ConfigError::BothSelected)));
    }

    #[tokio::test]
    async fn bad_coordinates_fail() {
        let provider = MockProvider::default();
        let err = Dispatcher::new(&provider, Renderer::default()).current("abc,1.0", "").await.unwrap_err();

        assert!(matches!(err, WeatherError::Coordinates(ParseError::InvalidNumber { .. })));
        assert_eq!(provider.calls().len(), 1);
    }

    #[tokio::test]
    async fn rejected_key_stops_everything() {
        let provider = MockProvider { reject_key: true, ..Default::default() };
        let err = Dispatcher::new(&provider, Renderer::default()).current("", "London").await.unwrap_err();

        assert!(matches!(err, WeatherError::Credential(_)));
        assert_eq!(provider.calls(), vec!["validate".to_string()]);
    }

    #[tokio::test]
    async fn provider_not_found_is_surfaced() {
        let provider = MockProvider { not_found: true, ..Default::default() };
        let err = Dispatcher::new(&provider, Renderer::default()).current("", "Lndon").await.unwrap_err();

        assert!(matches!(err, WeatherError::NotFound(_)));
    }

    #[tokio::test]
    async fn forecast_slots_are_capped() {
        let provider = MockProvider::default();
        let out = Dispatcher::new(&provider, Renderer::default()).forecast("", "London", 100).await.unwrap();

        assert!(out.starts_with("Weather Forecast for London:\n"));
        assert_eq!(out.matches("Date & Time:").count(), 3);
        assert_eq!(provider.calls()[1], "forecast City(\"London\") 40");
    }

    #[tokio::test]
    async fn forecast_slots_floor_at_one() {
        let provider = MockProvider::default();
        Dispatcher::new(&provider, Renderer::default()).forecast("", "London", 0).await.unwrap();

        assert_eq!(provider.calls()[1], "forecast City(\"London\") 1");
    }
}
