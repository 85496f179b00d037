//! Data models for weather information and API responses
//!
//! This module contains all the data structures used for representing weather
//! data, including both the internal models and the external OpenWeatherMap
//! response types.

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One raw 3-hour forecast record from the provider
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ForecastEntry {
    /// Timestamp for this forecast point
    pub timestamp: DateTime<Utc>,
    /// Temperature in Celsius
    pub temperature: f32,
    /// "Feels like" temperature in Celsius
    pub feels_like: f32,
    /// Relative humidity percentage (0-100)
    pub humidity: u8,
    /// Wind speed in m/s
    pub wind_speed: f32,
    /// Atmospheric pressure in hPa
    pub pressure: f32,
    /// Provider condition code (e.g. 500 for light rain)
    pub condition_id: u16,
    /// Human-readable description of weather conditions
    pub description: String,
    /// Weather condition icon ID from the provider
    pub icon: Option<String>,
}

/// Current conditions for the searched city
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CurrentConditions {
    /// City name as resolved by the provider
    pub city: String,
    /// Country code (ISO 3166-1 alpha-2)
    pub country: Option<String>,
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Shift from UTC of the city, in seconds
    pub utc_offset_seconds: i32,
    /// Observation timestamp
    pub timestamp: DateTime<Utc>,
    /// Temperature in Celsius
    pub temperature: f32,
    /// "Feels like" temperature in Celsius
    pub feels_like: f32,
    /// Daily minimum temperature in Celsius
    pub temp_min: f32,
    /// Daily maximum temperature in Celsius
    pub temp_max: f32,
    /// Relative humidity percentage (0-100)
    pub humidity: u8,
    /// Atmospheric pressure in hPa
    pub pressure: f32,
    /// Wind speed in m/s
    pub wind_speed: f32,
    /// Wind direction in degrees (0-360, where 0/360 is North)
    pub wind_direction: Option<u16>,
    /// Human-readable description of weather conditions
    pub description: String,
    /// Weather condition icon ID from the provider
    pub icon: Option<String>,
    /// Sunrise time
    pub sunrise: Option<DateTime<Utc>>,
    /// Sunset time
    pub sunset: Option<DateTime<Utc>>,
}

impl CurrentConditions {
    /// UTC offset of the city as a chrono `FixedOffset`
    ///
    /// Falls back to UTC if the provider reports an out-of-range shift.
    #[must_use]
    pub fn utc_offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_seconds)
            .unwrap_or_else(|| FixedOffset::east_opt(0).expect("zero offset is valid"))
    }
}

/// One row of the 5-day forecast strip: the first forecast entry per
/// calendar date
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DailySummary {
    /// City-local calendar date
    pub date: NaiveDate,
    /// Display label, e.g. "Sat, Aug 29, 2026"
    pub label: String,
    /// Representative entry for the day
    pub entry: ForecastEntry,
}

/// Build up to five daily summaries from the raw 3-hour forecast list,
/// keeping the first entry seen for each city-local calendar date.
#[must_use]
pub fn daily_summaries(entries: &[ForecastEntry], utc_offset: FixedOffset) -> Vec<DailySummary> {
    let mut summaries: Vec<DailySummary> = Vec::new();

    for entry in entries {
        let date = entry.timestamp.with_timezone(&utc_offset).date_naive();
        if summaries.iter().any(|s| s.date == date) {
            continue;
        }
        if summaries.len() >= 5 {
            break;
        }
        summaries.push(DailySummary {
            date,
            label: date.format("%a, %b %-d, %Y").to_string(),
            entry: entry.clone(),
        });
    }

    summaries
}

/// Air quality index reading, 1 (good) to 5 (very poor)
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct AirQuality {
    /// AQI severity on the provider's 1-5 scale
    pub index: u8,
}

impl AirQuality {
    /// Human-readable severity label
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self.index {
            1 => "Good",
            2 => "Fair",
            3 => "Moderate",
            4 => "Poor",
            5 => "Very Poor",
            _ => "Unknown",
        }
    }

    /// Display color for the severity badge
    #[must_use]
    pub fn color(&self) -> &'static str {
        match self.index {
            1 => "#4CAF50",
            2 => "#8BC34A",
            3 => "#FFC107",
            4 => "#FF9800",
            5 => "#F44336",
            _ => "#9E9E9E",
        }
    }
}

/// OpenWeatherMap API response structures
pub mod openweather {
    use super::*;

    /// Current weather response from the `/weather` endpoint
    #[derive(Debug, Deserialize)]
    pub struct CurrentWeatherResponse {
        pub coord: Coord,
        pub weather: Vec<Condition>,
        pub main: MainReadings,
        pub wind: Option<Wind>,
        pub dt: i64,
        pub sys: Option<SysInfo>,
        /// Shift from UTC in seconds
        pub timezone: Option<i32>,
        pub name: String,
    }

    /// 5-day/3-hour forecast response from the `/forecast` endpoint
    #[derive(Debug, Deserialize)]
    pub struct ForecastResponse {
        pub list: Vec<ForecastItem>,
        pub city: Option<CityInfo>,
    }

    /// One 3-hour forecast item
    #[derive(Debug, Deserialize)]
    pub struct ForecastItem {
        pub dt: i64,
        pub main: MainReadings,
        pub weather: Vec<Condition>,
        pub wind: Option<Wind>,
    }

    /// Air pollution response from the `/air_pollution` endpoint
    #[derive(Debug, Deserialize)]
    pub struct AirPollutionResponse {
        pub list: Vec<AirPollutionItem>,
    }

    #[derive(Debug, Deserialize)]
    pub struct AirPollutionItem {
        pub main: AqiReading,
    }

    #[derive(Debug, Deserialize)]
    pub struct AqiReading {
        pub aqi: u8,
    }

    #[derive(Debug, Deserialize)]
    pub struct Coord {
        pub lat: f64,
        pub lon: f64,
    }

    /// Weather condition block shared by all endpoints
    #[derive(Debug, Deserialize)]
    pub struct Condition {
        pub id: u16,
        pub description: String,
        pub icon: Option<String>,
    }

    /// Temperature/pressure/humidity block shared by all endpoints
    #[derive(Debug, Deserialize)]
    pub struct MainReadings {
        pub temp: f32,
        pub feels_like: f32,
        #[serde(default)]
        pub temp_min: f32,
        #[serde(default)]
        pub temp_max: f32,
        pub pressure: f32,
        pub humidity: u8,
    }

    #[derive(Debug, Deserialize)]
    pub struct Wind {
        pub speed: f32,
        pub deg: Option<u16>,
    }

    #[derive(Debug, Deserialize)]
    pub struct SysInfo {
        pub country: Option<String>,
        pub sunrise: Option<i64>,
        pub sunset: Option<i64>,
    }

    #[derive(Debug, Deserialize)]
    pub struct CityInfo {
        pub name: String,
        pub country: Option<String>,
        /// Shift from UTC in seconds
        pub timezone: Option<i32>,
    }
}

// Convert OpenWeatherMap API responses to internal models
impl From<&openweather::CurrentWeatherResponse> for CurrentConditions {
    fn from(response: &openweather::CurrentWeatherResponse) -> Self {
        let condition = response.weather.first();

        Self {
            city: response.name.clone(),
            country: response.sys.as_ref().and_then(|s| s.country.clone()),
            latitude: response.coord.lat,
            longitude: response.coord.lon,
            utc_offset_seconds: response.timezone.unwrap_or(0),
            timestamp: DateTime::from_timestamp(response.dt, 0).unwrap_or_else(Utc::now),
            temperature: response.main.temp,
            feels_like: response.main.feels_like,
            temp_min: response.main.temp_min,
            temp_max: response.main.temp_max,
            humidity: response.main.humidity,
            pressure: response.main.pressure,
            wind_speed: response.wind.as_ref().map(|w| w.speed).unwrap_or(0.0),
            wind_direction: response.wind.as_ref().and_then(|w| w.deg),
            description: condition
                .map(|c| c.description.clone())
                .unwrap_or_else(|| "Unknown".to_string()),
            icon: condition.and_then(|c| c.icon.clone()),
            sunrise: response
                .sys
                .as_ref()
                .and_then(|s| s.sunrise)
                .and_then(|t| DateTime::from_timestamp(t, 0)),
            sunset: response
                .sys
                .as_ref()
                .and_then(|s| s.sunset)
                .and_then(|t| DateTime::from_timestamp(t, 0)),
        }
    }
}

impl From<&openweather::ForecastItem> for ForecastEntry {
    fn from(item: &openweather::ForecastItem) -> Self {
        let condition = item.weather.first();

        Self {
            timestamp: DateTime::from_timestamp(item.dt, 0).unwrap_or_else(Utc::now),
            temperature: item.main.temp,
            feels_like: item.main.feels_like,
            humidity: item.main.humidity,
            wind_speed: item.wind.as_ref().map(|w| w.speed).unwrap_or(0.0),
            pressure: item.main.pressure,
            condition_id: condition.map(|c| c.id).unwrap_or(0),
            description: condition
                .map(|c| c.description.clone())
                .unwrap_or_else(|| "Unknown".to_string()),
            icon: condition.and_then(|c| c.icon.clone()),
        }
    }
}
