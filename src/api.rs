//! Weather API client for OpenWeatherMap integration
//!
//! This module provides HTTP client functionality for the three provider
//! endpoints the dashboard consumes: current conditions by city name,
//! 5-day/3-hour forecast by coordinates, and air quality by coordinates.
//! Transport failures and non-2xx statuses are mapped into the
//! [`WeatherProError`] taxonomy; callers surface `user_message()` in the
//! error banner.

use std::time::{Duration, Instant};

use reqwest::{Client, Response};
use tracing::{debug, error, info, instrument, warn};

use crate::Result;
use crate::config::WeatherProConfig;
use crate::error::WeatherProError;
use crate::models::{AirQuality, CurrentConditions, ForecastEntry, openweather};

/// HTTP client for the OpenWeatherMap endpoints
pub struct WeatherApiClient {
    /// HTTP client
    client: Client,
    /// Base URL, e.g. "https://api.openweathermap.org/data/2.5"
    base_url: String,
    /// Provider API key
    api_key: String,
}

impl WeatherApiClient {
    /// Create a new weather API client from configuration
    pub fn new(config: &WeatherProConfig) -> Result<Self> {
        let timeout = Duration::from_secs(config.weather.timeout_seconds.into());

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("WeatherPro/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| WeatherProError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.weather.base_url.trim_end_matches('/').to_string(),
            api_key: config.weather.api_key.clone(),
        })
    }

    /// Get current conditions for a city by name
    #[instrument(skip(self))]
    pub async fn current_weather(&self, city: &str) -> Result<CurrentConditions> {
        info!("Getting current weather for city: '{}'", city);
        let start_time = Instant::now();

        let url = format!(
            "{}/weather?q={}&appid={}&units=metric",
            self.base_url,
            urlencoding::encode(city),
            self.api_key
        );

        let response = self.make_request(&url).await?;
        let payload: openweather::CurrentWeatherResponse = decode(response).await?;
        let current = CurrentConditions::from(&payload);

        info!(
            "Retrieved current weather for {} in {:.3}s",
            current.city,
            start_time.elapsed().as_secs_f64()
        );

        Ok(current)
    }

    /// Get the 5-day/3-hour forecast for coordinates
    #[instrument(skip(self))]
    pub async fn forecast(&self, lat: f64, lon: f64) -> Result<Vec<ForecastEntry>> {
        info!("Getting 5-day forecast for coordinates: {:.4}, {:.4}", lat, lon);
        let start_time = Instant::now();

        let url = format!(
            "{}/forecast?lat={}&lon={}&appid={}&units=metric",
            self.base_url, lat, lon, self.api_key
        );

        let response = self.make_request(&url).await?;
        let payload: openweather::ForecastResponse = decode(response).await?;

        let entries: Vec<ForecastEntry> =
            payload.list.iter().map(ForecastEntry::from).collect();

        info!(
            "Retrieved forecast with {} data points in {:.3}s",
            entries.len(),
            start_time.elapsed().as_secs_f64()
        );

        Ok(entries)
    }

    /// Get the air quality index for coordinates.
    ///
    /// AQI is supplementary; callers must not let a failure here disturb the
    /// primary weather flow.
    #[instrument(skip(self))]
    pub async fn air_quality(&self, lat: f64, lon: f64) -> Result<AirQuality> {
        debug!("Getting air quality for coordinates: {:.4}, {:.4}", lat, lon);

        let url = format!(
            "{}/air_pollution?lat={}&lon={}&appid={}",
            self.base_url, lat, lon, self.api_key
        );

        let response = self.make_request(&url).await?;
        let payload: openweather::AirPollutionResponse = decode(response).await?;

        let index = payload
            .list
            .first()
            .map(|item| item.main.aqi)
            .ok_or_else(|| WeatherProError::malformed("air pollution response has no readings"))?;

        Ok(AirQuality { index })
    }

    /// Issue a GET and map non-success statuses into the error taxonomy
    async fn make_request(&self, url: &str) -> Result<Response> {
        let attempt_start = Instant::now();

        let response = self.client.get(url).send().await.map_err(|e| {
            warn!(
                "Network error after {:.3}s: {}",
                attempt_start.elapsed().as_secs_f64(),
                e
            );
            WeatherProError::network(e.to_string())
        })?;

        let status = response.status();
        debug!(
            "HTTP response received: {} in {:.3}s",
            status,
            attempt_start.elapsed().as_secs_f64()
        );

        if status.is_success() {
            Ok(response)
        } else {
            let mapped = WeatherProError::from_status(status.as_u16());
            match &mapped {
                WeatherProError::InvalidCredential => {
                    error!("API authentication failed (HTTP 401)")
                }
                WeatherProError::CityNotFound => warn!("City not found (HTTP 404)"),
                WeatherProError::RateLimited => warn!("Rate limited by provider (HTTP 429)"),
                _ => warn!("API request failed with status: {}", status),
            }
            Err(mapped)
        }
    }
}

/// Decode a JSON body, mapping decode failures to malformed-response
async fn decode<T: serde::de::DeserializeOwned>(response: Response) -> Result<T> {
    response.json::<T>().await.map_err(|e| {
        error!("Failed to parse provider response: {}", e);
        WeatherProError::malformed(e.to_string())
    })
}
