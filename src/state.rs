//! Dashboard state container
//!
//! One explicit store owned by the top-level caller; no ambient singletons.
//! All mutation goes through the methods below, which encode the dashboard's
//! rules: a failed fetch never clobbers previously displayed data, hour
//! selection resets when the hourly dataset changes, and a search generation
//! counter makes superseded in-flight searches lose to the newest one.

use chrono::FixedOffset;
use tracing::debug;

use crate::hourly::{HourSlot, today_slots};
use crate::models::{AirQuality, CurrentConditions, DailySummary, ForecastEntry, daily_summaries};
use crate::units::UnitPreference;

/// Upper bound on the comparison list
pub const MAX_COMPARE_CITIES: usize = 5;

/// One city in the comparison view
#[derive(Debug, Clone, PartialEq)]
pub struct CompareCity {
    /// Stable id for removal, unique within this store
    pub id: u64,
    /// City name as resolved by the provider
    pub name: String,
    /// Country code
    pub country: Option<String>,
    /// Temperature in Celsius
    pub temperature: f32,
    /// Condition description
    pub description: String,
    /// Relative humidity percentage
    pub humidity: u8,
    /// Wind speed in m/s
    pub wind_speed: f32,
    /// Condition icon ID
    pub icon: Option<String>,
}

/// Monotonically increasing token identifying the newest search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchGeneration(u64);

/// The dashboard's entire UI-facing state
#[derive(Debug, Default)]
pub struct DashboardState {
    /// Current conditions for the searched city
    pub current: Option<CurrentConditions>,
    /// 5-day forecast strip
    pub daily: Vec<DailySummary>,
    /// 24 hour slots for today, empty until a forecast arrives
    pub slots: Vec<HourSlot>,
    /// Index of the active hour slot, if any
    pub selected_slot: Option<usize>,
    /// Air quality reading, best-effort
    pub aqi: Option<AirQuality>,
    /// Cities in the comparison view
    pub compare_cities: Vec<CompareCity>,
    /// Current unit preference
    pub unit: UnitPreference,
    /// Dismissible error banner text
    pub error: Option<String>,
    generation: u64,
    next_city_id: u64,
}

impl DashboardState {
    #[must_use]
    pub fn new(unit: UnitPreference) -> Self {
        Self {
            unit,
            ..Self::default()
        }
    }

    /// Mark the start of a new search and return its token. Results from
    /// older searches are discarded at commit time (last request wins).
    pub fn begin_search(&mut self) -> SearchGeneration {
        self.generation += 1;
        SearchGeneration(self.generation)
    }

    /// Whether this token still identifies the newest search
    #[must_use]
    pub fn is_current(&self, generation: SearchGeneration) -> bool {
        generation.0 == self.generation
    }

    /// Commit current conditions from a successful primary fetch. Prior
    /// weather is replaced only here, never speculatively. Returns false if
    /// the result came from a superseded search.
    pub fn set_current(
        &mut self,
        generation: SearchGeneration,
        current: CurrentConditions,
    ) -> bool {
        if !self.is_current(generation) {
            debug!("Discarding stale current-weather result for {}", current.city);
            return false;
        }
        self.current = Some(current);
        // New city: the old forecast, hourly view and AQI no longer apply
        self.daily.clear();
        self.slots.clear();
        self.selected_slot = None;
        self.aqi = None;
        true
    }

    /// Commit forecast entries: rebuilds the 5-day strip and today's 24
    /// hour slots, and resets the hour selection.
    pub fn set_forecast(
        &mut self,
        generation: SearchGeneration,
        entries: &[ForecastEntry],
        utc_offset: FixedOffset,
    ) -> bool {
        if !self.is_current(generation) {
            debug!("Discarding stale forecast result");
            return false;
        }
        self.daily = daily_summaries(entries, utc_offset);
        self.slots = today_slots(entries, utc_offset);
        self.selected_slot = None;
        true
    }

    /// Commit an AQI reading
    pub fn set_aqi(&mut self, generation: SearchGeneration, aqi: AirQuality) -> bool {
        if !self.is_current(generation) {
            debug!("Discarding stale AQI result");
            return false;
        }
        self.aqi = Some(aqi);
        true
    }

    /// Select an hour slot by index. Selecting a placeholder slot (or an
    /// out-of-range index) is a silent no-op; re-selecting the active slot
    /// is idempotent.
    pub fn select_slot(&mut self, index: usize) {
        match self.slots.get(index) {
            Some(slot) if slot.has_data() => self.selected_slot = Some(index),
            _ => {}
        }
    }

    /// The currently selected hour slot, if any
    #[must_use]
    pub fn selected(&self) -> Option<&HourSlot> {
        self.selected_slot.and_then(|i| self.slots.get(i))
    }

    /// Check the guards for adding `name` to the comparison view. Returns
    /// the user-facing rejection message if one applies.
    #[must_use]
    pub fn compare_guard(&self, name: &str) -> Option<&'static str> {
        if name.trim().is_empty() {
            return Some("Please enter a city name to compare");
        }
        if self
            .compare_cities
            .iter()
            .any(|c| c.name.eq_ignore_ascii_case(name.trim()))
        {
            return Some("City already added!");
        }
        if self.compare_cities.len() >= MAX_COMPARE_CITIES {
            return Some("Maximum of 5 cities can be compared!");
        }
        None
    }

    /// Append a fetched city to the comparison view, assigning it an id
    pub fn add_compare_city(&mut self, current: &CurrentConditions) -> u64 {
        self.next_city_id += 1;
        let id = self.next_city_id;
        self.compare_cities.push(CompareCity {
            id,
            name: current.city.clone(),
            country: current.country.clone(),
            temperature: current.temperature,
            description: current.description.clone(),
            humidity: current.humidity,
            wind_speed: current.wind_speed,
            icon: current.icon.clone(),
        });
        id
    }

    /// Remove a comparison city by id. Unknown ids are ignored. How the
    /// removal is animated is the view's business.
    pub fn remove_city(&mut self, id: u64) {
        self.compare_cities.retain(|c| c.id != id);
    }

    /// Set the error banner
    pub fn set_error<S: Into<String>>(&mut self, message: S) {
        self.error = Some(message.into());
    }

    /// Dismiss the error banner
    pub fn clear_error(&mut self) {
        self.error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn current(city: &str, temp: f32) -> CurrentConditions {
        CurrentConditions {
            city: city.to_string(),
            country: Some("GB".to_string()),
            latitude: 51.5,
            longitude: -0.12,
            utc_offset_seconds: 0,
            timestamp: Utc::now(),
            temperature: temp,
            feels_like: temp,
            temp_min: temp - 2.0,
            temp_max: temp + 2.0,
            humidity: 70,
            pressure: 1012.0,
            wind_speed: 4.0,
            wind_direction: Some(240),
            description: "light rain".to_string(),
            icon: Some("10d".to_string()),
            sunrise: None,
            sunset: None,
        }
    }

    fn entry_now(temp: f32) -> ForecastEntry {
        ForecastEntry {
            timestamp: Utc::now(),
            temperature: temp,
            feels_like: temp,
            humidity: 60,
            wind_speed: 3.0,
            pressure: 1013.0,
            condition_id: 800,
            description: "clear sky".to_string(),
            icon: Some("01d".to_string()),
        }
    }

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    #[test]
    fn test_selecting_placeholder_is_noop() {
        let mut state = DashboardState::default();
        let generation = state.begin_search();
        state.set_current(generation, current("London", 18.0));
        // One real entry at the current hour; the rest are placeholders
        state.set_forecast(generation, &[entry_now(18.0)], utc());

        let with_data = state.slots.iter().position(|s| s.has_data()).unwrap();
        let placeholder = state.slots.iter().position(|s| !s.has_data()).unwrap();

        state.select_slot(with_data);
        assert_eq!(state.selected_slot, Some(with_data));

        state.select_slot(placeholder);
        assert_eq!(state.selected_slot, Some(with_data));

        // Re-selecting the active slot is idempotent
        state.select_slot(with_data);
        assert_eq!(state.selected_slot, Some(with_data));

        // Out-of-range index is also a no-op
        state.select_slot(99);
        assert_eq!(state.selected_slot, Some(with_data));
    }

    #[test]
    fn test_selection_resets_when_forecast_changes() {
        let mut state = DashboardState::default();
        let generation = state.begin_search();
        state.set_current(generation, current("London", 18.0));
        state.set_forecast(generation, &[entry_now(18.0)], utc());

        let with_data = state.slots.iter().position(|s| s.has_data()).unwrap();
        state.select_slot(with_data);
        assert!(state.selected_slot.is_some());

        let generation = state.begin_search();
        state.set_current(generation, current("Paris", 22.0));
        assert!(state.selected_slot.is_none());

        state.set_forecast(generation, &[entry_now(22.0)], utc());
        assert!(state.selected_slot.is_none());
    }

    #[test]
    fn test_stale_search_results_discarded() {
        let mut state = DashboardState::default();
        let old = state.begin_search();
        let new = state.begin_search();

        // The older search resolves after the newer one started
        assert!(!state.set_current(old, current("London", 18.0)));
        assert!(state.current.is_none());

        assert!(state.set_current(new, current("Paris", 22.0)));
        assert_eq!(state.current.as_ref().unwrap().city, "Paris");

        assert!(!state.set_forecast(old, &[entry_now(18.0)], utc()));
        assert!(state.slots.is_empty());
        assert!(!state.set_aqi(old, AirQuality { index: 2 }));
        assert!(state.aqi.is_none());
    }

    #[test]
    fn test_compare_guards() {
        let mut state = DashboardState::default();
        assert_eq!(
            state.compare_guard(""),
            Some("Please enter a city name to compare")
        );
        assert_eq!(
            state.compare_guard("   "),
            Some("Please enter a city name to compare")
        );

        state.add_compare_city(&current("London", 18.0));
        assert_eq!(state.compare_guard("london"), Some("City already added!"));
        assert_eq!(state.compare_guard("LONDON"), Some("City already added!"));
        assert!(state.compare_guard("Paris").is_none());

        for name in ["Paris", "Berlin", "Madrid", "Rome"] {
            state.add_compare_city(&current(name, 20.0));
        }
        assert_eq!(state.compare_cities.len(), 5);
        assert_eq!(
            state.compare_guard("Oslo"),
            Some("Maximum of 5 cities can be compared!")
        );
    }

    #[test]
    fn test_remove_city_by_id() {
        let mut state = DashboardState::default();
        let london = state.add_compare_city(&current("London", 18.0));
        let paris = state.add_compare_city(&current("Paris", 22.0));
        assert_ne!(london, paris);

        state.remove_city(london);
        assert_eq!(state.compare_cities.len(), 1);
        assert_eq!(state.compare_cities[0].name, "Paris");

        // Unknown id is ignored
        state.remove_city(999);
        assert_eq!(state.compare_cities.len(), 1);
    }

    #[test]
    fn test_error_banner() {
        let mut state = DashboardState::default();
        state.set_error("City not found. Please check the spelling and try again.");
        assert!(state.error.is_some());
        state.clear_error();
        assert!(state.error.is_none());
    }

    #[test]
    fn test_new_search_replaces_city_data_only_on_success() {
        let mut state = DashboardState::default();
        let generation = state.begin_search();
        state.set_current(generation, current("London", 18.0));
        state.set_forecast(generation, &[entry_now(18.0)], utc());
        state.set_aqi(generation, AirQuality { index: 2 });

        // A failed follow-up search sets only the banner; data stays
        let _failed = state.begin_search();
        state.set_error("City not found. Please check the spelling and try again.");
        assert_eq!(state.current.as_ref().unwrap().city, "London");
        assert!(!state.slots.is_empty());
        assert!(state.aqi.is_some());
    }
}
