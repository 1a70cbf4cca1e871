use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Measurement system requested from the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
    Standard,
}

impl Units {
    /// Value of the provider's `units` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
            Units::Standard => "standard",
        }
    }

    pub fn temperature_label(&self) -> &'static str {
        match self {
            Units::Metric => "C",
            Units::Imperial => "F",
            Units::Standard => "K",
        }
    }

    pub fn speed_label(&self) -> &'static str {
        match self {
            Units::Imperial => "mph",
            Units::Metric | Units::Standard => "m/s",
        }
    }
}

impl std::fmt::Display for Units {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub main: String,
    pub description: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Temperature {
    pub temp: f64,
    pub temp_min: f64,
    pub temp_max: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    pub speed: f64,
    /// Direction in degrees.
    pub deg: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub location_name: String,
    pub conditions: Vec<Condition>,
    pub temperature: Temperature,
    pub wind: Wind,
    pub observation_time: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub name: String,
    pub country: String,
}

/// One 3-hour forecast step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastSlot {
    pub time: DateTime<Utc>,
    pub conditions: Vec<Condition>,
    pub temperature: Temperature,
    pub wind: Wind,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub city: City,
    /// Chronological, as returned by the provider.
    pub slots: Vec<ForecastSlot>,
}

/// Input to the renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum Report {
    Current(CurrentWeather),
    Forecast(Forecast),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn units_labels() {
        assert_eq!(Units::Metric.temperature_label(), "C");
        assert_eq!(Units::Imperial.temperature_label(), "F");
        assert_eq!(Units::Standard.temperature_label(), "K");
        assert_eq!(Units::Imperial.speed_label(), "mph");
        assert_eq!(Units::Standard.speed_label(), "m/s");
    }

    #[test]
    fn units_serialize_lowercase() {
        let json = serde_json::to_string(&Units::Imperial).unwrap();
        assert_eq!(json, "\"imperial\"");
        assert_eq!(Units::default(), Units::Metric);
    }
}
