//! Dashboard orchestration: ties the fetch layer to the state container
//!
//! One search fans out to three provider calls: current conditions first
//! (it supplies the coordinates), then forecast and AQI concurrently.
//! Forecast normalization runs only after both the primary and forecast
//! calls succeed; AQI is best-effort and never disturbs the primary flow.

use tracing::{info, instrument, warn};

use crate::api::WeatherApiClient;
use crate::state::DashboardState;
use crate::units::{PreferenceStore, UnitPreference};

/// User-facing banner for a forecast failure after a successful primary fetch
const FORECAST_FAILED: &str = "Failed to fetch forecast data. Please try again.";
/// User-facing banner for a failed comparison fetch
const COMPARE_FAILED: &str = "Failed to fetch city weather. Please try again.";

/// The dashboard: API client, state store and unit preference
pub struct Dashboard {
    client: WeatherApiClient,
    state: DashboardState,
    preferences: PreferenceStore,
}

impl Dashboard {
    #[must_use]
    pub fn new(client: WeatherApiClient, preferences: PreferenceStore) -> Self {
        let unit = preferences.load();
        Self {
            client,
            state: DashboardState::new(unit),
            preferences,
        }
    }

    /// Read access for the render layer
    #[must_use]
    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    /// Search for a city: fetch current conditions, then forecast and AQI.
    ///
    /// On any failure the banner is set and previously displayed data stays
    /// untouched. A search that has been superseded by a newer one commits
    /// nothing (last request wins).
    #[instrument(skip(self))]
    pub async fn search(&mut self, city: &str) {
        if city.trim().is_empty() {
            return;
        }
        self.state.clear_error();
        let generation = self.state.begin_search();

        let current = match self.client.current_weather(city.trim()).await {
            Ok(current) => current,
            Err(e) => {
                warn!("Primary weather fetch failed: {}", e);
                self.state.set_error(e.user_message());
                return;
            }
        };

        let (lat, lon) = (current.latitude, current.longitude);
        let utc_offset = current.utc_offset();
        if !self.state.set_current(generation, current) {
            return;
        }

        // No ordering dependency between these two
        let (forecast, aqi) = tokio::join!(
            self.client.forecast(lat, lon),
            self.client.air_quality(lat, lon)
        );

        match forecast {
            Ok(entries) => {
                self.state.set_forecast(generation, &entries, utc_offset);
            }
            Err(e) => {
                warn!("Forecast fetch failed: {}", e);
                self.state.set_error(FORECAST_FAILED);
            }
        }

        match aqi {
            Ok(reading) => {
                self.state.set_aqi(generation, reading);
            }
            Err(e) => {
                // Supplementary data: log and move on, never show the user
                warn!("Failed to fetch AQI data: {}", e);
            }
        }
    }

    /// Add a city to the comparison view
    #[instrument(skip(self))]
    pub async fn compare(&mut self, city: &str) {
        if let Some(rejection) = self.state.compare_guard(city) {
            self.state.set_error(rejection);
            return;
        }
        self.state.clear_error();

        match self.client.current_weather(city.trim()).await {
            Ok(current) => {
                let id = self.state.add_compare_city(&current);
                info!("Added {} (id {}) to comparison", current.city, id);
            }
            Err(e) => {
                warn!("Compare fetch failed: {}", e);
                // Provider-reported statuses keep their specific message;
                // transport failures get the compare-specific one
                let message = match &e {
                    crate::WeatherProError::Network { .. }
                    | crate::WeatherProError::MalformedResponse { .. } => {
                        COMPARE_FAILED.to_string()
                    }
                    _ => e.user_message(),
                };
                self.state.set_error(message);
            }
        }
    }

    /// Select an hour slot for the trip planner
    pub fn select_hour(&mut self, index: usize) {
        self.state.select_slot(index);
    }

    /// Remove a comparison city by id
    pub fn remove_city(&mut self, id: u64) {
        self.state.remove_city(id);
    }

    /// Toggle °C/°F and persist the choice
    pub fn toggle_unit(&mut self) -> UnitPreference {
        self.state.unit = self.state.unit.toggled();
        self.preferences.save(self.state.unit);
        self.state.unit
    }

    /// Dismiss the error banner
    pub fn dismiss_error(&mut self) {
        self.state.clear_error();
    }
}
