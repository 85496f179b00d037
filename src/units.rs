//! Temperature unit preference and display conversions
//!
//! The provider is always queried in metric; conversion to Fahrenheit/mph
//! happens at display time. The chosen unit is the only piece of state that
//! survives restarts: one value in a file under the user config dir, read
//! once at startup and written on every toggle.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Temperature unit preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UnitPreference {
    #[default]
    Metric,
    Imperial,
}

impl UnitPreference {
    /// The other unit
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            UnitPreference::Metric => UnitPreference::Imperial,
            UnitPreference::Imperial => UnitPreference::Metric,
        }
    }

    /// Stable string form used for persistence
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            UnitPreference::Metric => "metric",
            UnitPreference::Imperial => "imperial",
        }
    }

    /// Parse the persisted string form; anything unrecognized is metric
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "imperial" => UnitPreference::Imperial,
            _ => UnitPreference::Metric,
        }
    }

    /// Temperature symbol for display ("°C" or "°F")
    #[must_use]
    pub fn temp_symbol(self) -> &'static str {
        match self {
            UnitPreference::Metric => "°C",
            UnitPreference::Imperial => "°F",
        }
    }

    /// Convert a Celsius reading to a rounded display temperature
    #[must_use]
    pub fn convert_temp(self, celsius: f32) -> i32 {
        match self {
            UnitPreference::Metric => celsius.round() as i32,
            UnitPreference::Imperial => (celsius * 9.0 / 5.0 + 32.0).round() as i32,
        }
    }

    /// Format a wind speed given in m/s
    #[must_use]
    pub fn format_wind(self, speed_ms: f32) -> String {
        match self {
            UnitPreference::Metric => format!("{speed_ms:.1} m/s"),
            UnitPreference::Imperial => format!("{:.1} mph", speed_ms * 2.237),
        }
    }
}

/// File-backed store for the unit preference
pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    /// Store under the default location (`<config dir>/weatherpro/unit_preference`)
    #[must_use]
    pub fn new() -> Self {
        let path = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("weatherpro")
            .join("unit_preference");
        Self { path }
    }

    /// Store under an explicit path (used by tests)
    #[must_use]
    pub fn at_path(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Read the saved preference; missing or unreadable state is metric
    #[must_use]
    pub fn load(&self) -> UnitPreference {
        match fs::read_to_string(&self.path) {
            Ok(contents) => UnitPreference::parse(&contents),
            Err(_) => UnitPreference::Metric,
        }
    }

    /// Persist the preference. Failures are logged, not surfaced: losing the
    /// preference across restarts is not worth an error banner.
    pub fn save(&self, unit: UnitPreference) {
        if let Some(parent) = self.path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                warn!("Failed to create preference directory: {}", e);
                return;
            }
        }
        if let Err(e) = fs::write(&self.path, unit.as_str()) {
            warn!("Failed to save unit preference: {}", e);
        }
    }
}

impl Default for PreferenceStore {
    fn default() -> Self {
        Self::new()
    }
}
