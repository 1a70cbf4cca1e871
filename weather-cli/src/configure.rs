//! Interactive `weather configure`.

use inquire::{Password, PasswordDisplayMode, Select, Text};
use log::info;
use weather_core::{Config, Units};

const UNIT_CHOICES: [Units; 3] = [Units::Metric, Units::Imperial, Units::Standard];

pub fn run() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeatherMap API key (leave empty to keep current):")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()?;
    if !api_key.trim().is_empty() {
        config.api_key = Some(api_key.trim().to_string());
    }

    let cursor = UNIT_CHOICES.iter().position(|u| *u == config.units).unwrap_or_default();
    config.units = Select::new("Units:", UNIT_CHOICES.to_vec()).with_starting_cursor(cursor).prompt()?;

    config.lang = Text::new("Language code:").with_default(&config.lang).prompt()?;

    let path = config.save()?;
    info!("Wrote {}", path.display());
    println!("Configuration saved to {}", path.display());

    Ok(())
}
