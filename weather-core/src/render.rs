//! Plain-text rendering of weather reports.
//!
//! Layouts are fixed: one labelled field per line, in the same order every time,
//! so the output can be diffed or grepped.

use std::fmt::Write;

use crate::{
    error::WeatherError,
    model::{Condition, CurrentWeather, Forecast, Report, Units},
};

const SLOT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, Default)]
pub struct Renderer {
    units: Units,
}

impl Renderer {
    pub fn new(units: Units) -> Self {
        Self { units }
    }

    pub fn render(&self, report: &Report) -> Result<String, WeatherError> {
        match report {
            Report::Current(current) => self.render_current(current),
            Report::Forecast(forecast) => self.render_forecast(forecast),
        }
    }

    pub fn render_current(&self, w: &CurrentWeather) -> Result<String, WeatherError> {
        if looks_empty(w) {
            return Err(WeatherError::NoMatch);
        }

        let t = self.units.temperature_label();
        let mut out = String::new();

        writeln!(out, "Current weather for {}:", w.location_name)?;
        writeln!(out, "    Conditions:  {}", join_descriptions(&w.conditions))?;
        writeln!(out, "    Now:         {} {t}", w.temperature.temp)?;
        writeln!(out, "    High:        {} {t}", w.temperature.temp_max)?;
        writeln!(out, "    Low:         {} {t}", w.temperature.temp_min)?;
        writeln!(out, "    Wind speed:  {}{}", w.wind.speed, self.units.speed_label())?;
        writeln!(out, "    Wind Dir:    {}°", w.wind.deg)?;

        Ok(out)
    }

    pub fn render_forecast(&self, f: &Forecast) -> Result<String, WeatherError> {
        if f.city.name.is_empty() && f.slots.is_empty() {
            return Err(WeatherError::NoMatch);
        }

        let t = self.units.temperature_label();
        let mut out = String::new();

        writeln!(out, "Weather Forecast for {}:", f.city.name)?;
        for slot in &f.slots {
            writeln!(out, "Date & Time: {}", slot.time.format(SLOT_TIME_FORMAT))?;
            writeln!(out, "Conditions:  {}", join_descriptions(&slot.conditions))?;
            writeln!(out, "Temp:        {} {t}", slot.temperature.temp)?;
            writeln!(out, "High:        {} {t}", slot.temperature.temp_max)?;
            writeln!(out, "Low:         {} {t}", slot.temperature.temp_min)?;
            writeln!(out, "Wind speed:  {}{}", slot.wind.speed, self.units.speed_label())?;
            writeln!(out, "Wind Dir:    {}°", slot.wind.deg)?;
            writeln!(out)?;
        }

        Ok(out)
    }
}

/// Fallback for providers that answer a bad lookup with an all-default body
/// instead of a not-found status. A real reading of exactly 0° with a
/// northerly wind and no name would be misclassified.
pub fn looks_empty(w: &CurrentWeather) -> bool {
    w.location_name.is_empty()
        && w.temperature.temp == 0.0
        && w.temperature.temp_min == 0.0
        && w.wind.deg == 0.0
}

fn join_descriptions(conditions: &[Condition]) -> String {
    conditions.iter().map(|c| c.description.as_str()).collect::<Vec<_>>().join(" ")
}
