//! Error taxonomy for the weather core.
//!
//! Input problems (`ConfigError`, `ParseError`) are kept separate from
//! provider problems so the CLI can tell a usage mistake from a failed request.

use thiserror::Error;

/// Mode selection failures: the user must pick exactly one of city / coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("must set either the --city or --coords flag")]
    NoneSelected,

    #[error("use only one flag from --city and --coords")]
    BothSelected,
}

/// Coordinate string failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("expected coordinates as `lat,long`, got {found} field(s) in '{input}'")]
    FieldCount { input: String, found: usize },

    #[error("cannot parse '{field}' as a number, are the coordinates entered as `lat,long`?")]
    InvalidNumber { field: String },
}

/// Top-level error for a single weather lookup.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error(transparent)]
    Mode(#[from] ConfigError),

    #[error(transparent)]
    Coordinates(#[from] ParseError),

    /// Missing, malformed or rejected API key.
    #[error("invalid API key: {0}")]
    Credential(String),

    #[error("request to weather provider failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("weather provider returned status {status}: {message}")]
    Provider { status: u16, message: String },

    /// The provider explicitly reported that the location does not exist.
    #[error("location not found: {0}")]
    NotFound(String),

    #[error("malformed response from weather provider: {0}")]
    Decode(#[from] serde_json::Error),

    /// The response came back empty; most likely a typo in the city name.
    #[error("no weather data returned, check the city name or coordinates for typos")]
    NoMatch,

    #[error("failed to format weather report")]
    Render(#[from] std::fmt::Error),
}
