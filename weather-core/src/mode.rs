use crate::{coords::Coordinates, error::ConfigError};

/// Which of the two mutually exclusive input styles a request uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryMode {
    ByCity,
    ByCoordinates,
}

/// What the provider is asked about.
#[derive(Debug, Clone, PartialEq)]
pub enum Location {
    City(String),
    Coordinates(Coordinates),
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Location::City(name) => f.write_str(name),
            Location::Coordinates(c) => write!(f, "({c})"),
        }
    }
}

/// Pick the active mode. A flag counts as set when it is non-empty.
pub fn resolve_mode(coords: &str, city: &str) -> Result<QueryMode, ConfigError> {
    match (!coords.is_empty(), !city.is_empty()) {
        (true, false) => Ok(QueryMode::ByCoordinates),
        (false, true) => Ok(QueryMode::ByCity),
        (false, false) => Err(ConfigError::NoneSelected),
        (true, true) => Err(ConfigError::BothSelected),
    }
}
