use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::{debug, warn};
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::{
    WeatherError,
    constants::REQUEST_TIMEOUT,
    mode::Location,
    model::{City, Condition, CurrentWeather, Forecast, ForecastSlot, Temperature, Units, Wind},
};

use super::{MAX_FORECAST_SLOTS, WeatherProvider};

const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
const API_KEY_LEN: usize = 32;

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    units: Units,
    lang: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|e| {
                warn!("Falling back to default HTTP client: {e}");
                Client::new()
            });

        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            units: Units::default(),
            lang: "en".to_string(),
            http,
        }
    }

    pub fn with_units(mut self, units: Units) -> Self {
        self.units = units;
        self
    }

    pub fn with_lang(mut self, lang: String) -> Self {
        self.lang = lang;
        self
    }

    /// Point at a different host, e.g. a local proxy.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn query(&self, location: &Location) -> Vec<(&'static str, String)> {
        let mut q = match location {
            Location::City(name) => vec![("q", name.clone())],
            Location::Coordinates(c) => vec![("lat", c.lat.to_string()), ("lon", c.lon.to_string())],
        };
        q.push(("appid", self.api_key.clone()));
        q.push(("units", self.units.as_str().to_string()));
        q.push(("lang", self.lang.clone()));
        q
    }

    async fn get(&self, endpoint: &str, query: &[(&'static str, String)]) -> Result<String, WeatherError> {
        let url = format!("{}/{endpoint}", self.base_url);
        debug!("GET {url}");

        let res = self.http.get(&url).query(query).send().await?;

        let status = res.status();
        let body = res.text().await?;
        debug!("{endpoint} responded with {status} ({} bytes)", body.len());

        check_status(status, &body)?;
        Ok(body)
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn validate_api_key(&self) -> Result<(), WeatherError> {
        validate_key_format(&self.api_key)
    }

    async fn current(&self, location: &Location) -> Result<CurrentWeather, WeatherError> {
        let body = self.get("weather", &self.query(location)).await?;
        parse_current(&body)
    }

    async fn forecast(&self, location: &Location, slots: usize) -> Result<Forecast, WeatherError> {
        let slots = slots.clamp(1, MAX_FORECAST_SLOTS);

        let mut query = self.query(location);
        query.push(("cnt", slots.to_string()));

        let body = self.get("forecast", &query).await?;
        parse_forecast(&body)
    }
}

fn validate_key_format(key: &str) -> Result<(), WeatherError> {
    if key.is_empty() {
        return Err(WeatherError::Credential("API key is empty".to_string()));
    }
    if key.len() != API_KEY_LEN || !key.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(WeatherError::Credential(format!(
            "expected {API_KEY_LEN} alphanumeric characters, check the OWM_API_KEY env variable is correctly set"
        )));
    }
    Ok(())
}

fn check_status(status: StatusCode, body: &str) -> Result<(), WeatherError> {
    if status.is_success() {
        return Ok(());
    }

    let message = serde_json::from_str::<OwErrorBody>(body)
        .ok()
        .and_then(|e| e.message)
        .unwrap_or_else(|| truncate_body(body));

    Err(match status {
        StatusCode::UNAUTHORIZED => WeatherError::Credential(message),
        StatusCode::NOT_FOUND => WeatherError::NotFound(message),
        _ => WeatherError::Provider { status: status.as_u16(), message },
    })
}

fn parse_current(body: &str) -> Result<CurrentWeather, WeatherError> {
    let parsed: OwCurrentResponse = serde_json::from_str(body)?;

    Ok(CurrentWeather {
        location_name: parsed.name,
        conditions: parsed.weather.into_iter().map(Into::into).collect(),
        temperature: parsed.main.into(),
        wind: parsed.wind.into(),
        observation_time: unix_to_utc(parsed.dt),
    })
}

fn parse_forecast(body: &str) -> Result<Forecast, WeatherError> {
    let parsed: OwForecastResponse = serde_json::from_str(body)?;

    let slots = parsed
        .list
        .into_iter()
        .map(|e| ForecastSlot {
            time: unix_to_utc(e.dt),
            conditions: e.weather.into_iter().map(Into::into).collect(),
            temperature: e.main.into(),
            wind: e.wind.into(),
        })
        .collect();

    Ok(Forecast { city: City { name: parsed.city.name, country: parsed.city.country }, slots })
}

#[derive(Debug, Deserialize)]
struct OwErrorBody {
    message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OwMain {
    temp: f64,
    temp_min: f64,
    temp_max: f64,
}

impl From<OwMain> for Temperature {
    fn from(m: OwMain) -> Self {
        Temperature { temp: m.temp, temp_min: m.temp_min, temp_max: m.temp_max }
    }
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    #[serde(default)]
    main: String,
    description: String,
}

impl From<OwWeather> for Condition {
    fn from(w: OwWeather) -> Self {
        Condition { main: w.main, description: w.description }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OwWind {
    speed: f64,
    deg: f64,
}

impl From<OwWind> for Wind {
    fn from(w: OwWind) -> Self {
        Wind { speed: w.speed, deg: w.deg }
    }
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    #[serde(default)]
    name: String,
    #[serde(default)]
    dt: i64,
    #[serde(default)]
    main: OwMain,
    #[serde(default)]
    weather: Vec<OwWeather>,
    #[serde(default)]
    wind: OwWind,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OwCity {
    name: String,
    country: String,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    #[serde(default)]
    main: OwMain,
    #[serde(default)]
    weather: Vec<OwWeather>,
    #[serde(default)]
    wind: OwWind,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    #[serde(default)]
    city: OwCity,
    #[serde(default)]
    list: Vec<OwForecastEntry>,
}

fn unix_to_utc(ts: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(ts, 0).unwrap_or_default()
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
