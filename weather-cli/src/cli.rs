use std::io::Write;

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::debug;
use weather_core::{
    Config, Dispatcher, MAX_FORECAST_SLOTS, Renderer, Units, WeatherProvider, constants::API_KEY_ENV,
    provider_from_config,
};

use crate::configure;

/// Top-level CLI struct.
///
/// Examples:
///   weather current --city London
///   weather current --coords 51.5,-0.12
///   weather forecast --city "New York" --slots 8
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "A cmd line weather app")]
pub struct Cli {
    /// Enable debug logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Override the configured measurement units.
    #[arg(long, value_enum, global = true)]
    pub units: Option<UnitsArg>,

    /// OpenWeatherMap API key.
    #[arg(long, env = API_KEY_ENV, hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Get the current weather for a city or location.
    Current(LocationArgs),

    /// Get a weather forecast for a city or location.
    Forecast {
        #[command(flatten)]
        location: LocationArgs,

        /// Number of 3-hour forecast steps, at most 40 (5 days).
        #[arg(long, default_value_t = MAX_FORECAST_SLOTS)]
        slots: usize,
    },

    /// Store API key, units and language in the config file.
    Configure,
}

/// Exactly one of these must be given; checked when the command runs.
#[derive(Debug, Clone, Default, Args)]
pub struct LocationArgs {
    /// The city to get the weather for.
    #[arg(short = 'c', long)]
    pub city: Option<String>,

    /// The coordinates in lat,long format to get the weather for.
    #[arg(short = 'l', long, allow_hyphen_values = true)]
    pub coords: Option<String>,
}

impl LocationArgs {
    fn coords(&self) -> &str {
        self.coords.as_deref().unwrap_or_default()
    }

    fn city(&self) -> &str {
        self.city.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
pub enum UnitsArg {
    /// Celsius, m/s
    Metric,
    /// Fahrenheit, mph
    Imperial,
    /// Kelvin, m/s
    Standard,
}

impl From<UnitsArg> for Units {
    fn from(units: UnitsArg) -> Self {
        match units {
            UnitsArg::Metric => Self::Metric,
            UnitsArg::Imperial => Self::Imperial,
            UnitsArg::Standard => Self::Standard,
        }
    }
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        if let Command::Configure = self.command {
            return configure::run();
        }

        let config = self.resolve_config(Config::load()?);
        debug!("Using units={} lang={}", config.units, config.lang);

        let provider = provider_from_config(&config)?;
        let renderer = Renderer::new(config.units);

        let stdout = std::io::stdout();
        self.execute(provider.as_ref(), renderer, &mut stdout.lock()).await
    }

    /// Apply environment/flag overrides on top of the stored config.
    fn resolve_config(&self, stored: Config) -> Config {
        let mut config = stored.with_env_api_key(self.api_key.clone());
        if let Some(units) = self.units {
            config.units = units.into();
        }
        config
    }

    /// Run a lookup command and write the report. Nothing is written on failure.
    pub async fn execute<W: Write>(
        &self,
        provider: &dyn WeatherProvider,
        renderer: Renderer,
        out: &mut W,
    ) -> anyhow::Result<()> {
        let dispatcher = Dispatcher::new(provider, renderer);

        let report = match &self.command {
            Command::Current(loc) => dispatcher.current(loc.coords(), loc.city()).await?,
            Command::Forecast { location, slots } => {
                dispatcher.forecast(location.coords(), location.city(), *slots).await?
            }
            Command::Configure => return Ok(()),
        };

        out.write_all(report.as_bytes()).context("Failed to write weather report")?;
        out.flush().context("Failed to write weather report")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use weather_core::{
        CurrentWeather, Forecast, Location, WeatherError,
        model::{City, Condition, ForecastSlot, Temperature, Wind},
    };

    #[derive(Debug)]
    struct MockProvider;

    #[async_trait]
    impl WeatherProvider for MockProvider {
        async fn validate_api_key(&self) -> Result<(), WeatherError> {
            Ok(())
        }

        async fn current(&self, location: &Location) -> Result<CurrentWeather, WeatherError> {
            Ok(CurrentWeather {
                location_name: location.to_string(),
                conditions: vec![Condition { main: "Clear".into(), description: "clear sky".into() }],
                temperature: Temperature { temp: 15.0, temp_min: 12.0, temp_max: 18.0 },
                wind: Wind { speed: 3.2, deg: 180.0 },
                ..Default::default()
            })
        }

        async fn forecast(&self, location: &Location, slots: usize) -> Result<Forecast, WeatherError> {
            let slot = ForecastSlot { wind: Wind { speed: 2.0, deg: 45.0 }, ..Default::default() };
            Ok(Forecast {
                city: City { name: location.to_string(), country: String::new() },
                slots: vec![slot; slots],
            })
        }
    }

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args.iter().copied()).expect("arguments should parse")
    }

    async fn execute(cli: &Cli) -> (anyhow::Result<()>, String) {
        let mut out = Vec::new();
        let result = cli.execute(&MockProvider, Renderer::default(), &mut out).await;
        (result, String::from_utf8(out).unwrap())
    }

    #[tokio::test]
    async fn current_by_city_prints_report() {
        let (result, out) = execute(&parse(&["weather", "current", "--city", "London"])).await;

        assert!(result.is_ok());
        assert!(out.starts_with("Current weather for London:\n"));
        assert!(out.contains("Now:         15 C\n"));
    }

    #[tokio::test]
    async fn current_without_flags_fails_silently_on_stdout() {
        let (result, out) = execute(&parse(&["weather", "current"])).await;

        let err = result.unwrap_err();
        assert!(err.to_string().contains("must set either"));
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn both_flags_fail() {
        let (result, out) = execute(&parse(&["weather", "current", "-c", "London", "-l", "1,2"])).await;

        assert!(result.is_err());
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn negative_coordinates_are_accepted() {
        let (result, out) = execute(&parse(&["weather", "current", "--coords", "-33.87,151.21"])).await;

        assert!(result.is_ok());
        assert!(out.starts_with("Current weather for (-33.87,151.21):\n"));
    }

    #[tokio::test]
    async fn forecast_defaults_to_forty_slots() {
        let (result, out) = execute(&parse(&["weather", "forecast", "--city", "Paris"])).await;

        assert!(result.is_ok());
        assert_eq!(out.matches("Date & Time:").count(), MAX_FORECAST_SLOTS);
    }

    #[tokio::test]
    async fn forecast_honours_slots_flag() {
        let (result, out) = execute(&parse(&["weather", "forecast", "-c", "Paris", "--slots", "8"])).await;

        assert!(result.is_ok());
        assert_eq!(out.matches("Date & Time:").count(), 8);
    }

    #[test]
    fn units_flag_overrides_config() {
        let cli = parse(&["weather", "--units", "imperial", "current", "-c", "Oslo"]);
        let config = cli.resolve_config(Config::default());
        assert_eq!(config.units, Units::Imperial);
    }

    #[test]
    fn api_key_flag_overrides_stored_key() {
        let cli = parse(&["weather", "current", "-c", "Oslo", "--api-key", "FLAG_KEY"]);
        let stored = Config { api_key: Some("FILE_KEY".into()), ..Config::default() };

        assert_eq!(cli.resolve_config(stored).api_key(), Some("FLAG_KEY"));
    }
}
