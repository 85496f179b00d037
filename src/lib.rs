//! `WeatherPro` - city weather dashboard core
//!
//! This library provides the data pipeline behind the dashboard: fetching
//! current conditions, 5-day forecast and air quality from OpenWeatherMap,
//! normalizing the sparse 3-hour forecast into a 24-slot hourly view,
//! and generating activity, clothing and gear recommendations for a
//! selected hour.

pub mod api;
pub mod config;
pub mod dashboard;
pub mod debounce;
pub mod error;
pub mod hourly;
pub mod models;
pub mod recommend;
pub mod state;
pub mod units;

// Re-export core types for public API
pub use api::WeatherApiClient;
pub use config::WeatherProConfig;
pub use dashboard::Dashboard;
pub use debounce::Debouncer;
pub use error::WeatherProError;
pub use hourly::{HourSlot, build_day_slots, today_slots};
pub use models::{AirQuality, CurrentConditions, DailySummary, ForecastEntry};
pub use recommend::{Activity, ClothingItem, GearItem, Rating};
pub use state::{CompareCity, DashboardState};
pub use units::{PreferenceStore, UnitPreference};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, WeatherProError>;
