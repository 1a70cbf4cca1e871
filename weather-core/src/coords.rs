//! Latitude/longitude input parsing.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// A latitude/longitude pair. Values are not range checked.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl From<(f64, f64)> for Coordinates {
    fn from(pair: (f64, f64)) -> Self {
        Self { lat: pair.0, lon: pair.1 }
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.lat, self.lon)
    }
}

impl FromStr for Coordinates {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_coordinates(s)
    }
}

/// Parse a `lat,long` string, e.g. `"51.5,-0.12"`.
pub fn parse_coordinates(input: &str) -> Result<Coordinates, ParseError> {
    let fields: Vec<&str> = input.split(',').map(str::trim).collect();

    let [lat, lon] = fields.as_slice() else {
        return Err(ParseError::FieldCount { input: input.to_string(), found: fields.len() });
    };

    Ok(Coordinates { lat: parse_field(lat)?, lon: parse_field(lon)? })
}

fn parse_field(field: &str) -> Result<f64, ParseError> {
    field.parse::<f64>().map_err(|_| ParseError::InvalidNumber { field: field.to_string() })
}
