//! OpenWeatherMap forecast client
//!
//! Fetches the 5 day / 3 hour forecast and converts it into a [`ForecastSeries`].
//! Transient failures are retried with exponential backoff by the HTTP middleware.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::DateTime;
use reqwest::StatusCode;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use tracing::{debug, error, info, instrument, warn};

use super::ForecastProvider;
use crate::config::WeatherConfig;
use crate::models::{ForecastPoint, ForecastSeries, Location};
use crate::{PlannerError, Result};

/// The forecast endpoint returns one sample every 3 hours
const SAMPLES_PER_DAY: u32 = 8;

/// Forecast client for the OpenWeatherMap API
pub struct OpenWeatherClient {
    client: ClientWithMiddleware,
    base_url: String,
    api_key: String,
    forecast_days: u32,
}

impl OpenWeatherClient {
    /// Create a client; fails with a configuration error when no API key is set
    pub fn new(config: &WeatherConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| PlannerError::config("OpenWeather API key not configured"))?
            .to_string();

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(concat!("SacredPath/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| PlannerError::config(format!("Failed to create HTTP client: {e}")))?;

        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(config.max_retries);
        let client = ClientBuilder::new(http)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
            forecast_days: config.forecast_days,
        })
    }

    fn forecast_url(&self, location: &Location) -> String {
        format!(
            "{}/forecast?lat={}&lon={}&appid={}&units=metric&cnt={}",
            self.base_url,
            location.latitude,
            location.longitude,
            self.api_key,
            self.forecast_days * SAMPLES_PER_DAY
        )
    }

    /// Mask the API key in errors that may quote the request URL
    fn redact(&self, err: PlannerError) -> PlannerError {
        match err {
            PlannerError::Retrieval { message } => PlannerError::Retrieval {
                message: message.replace(&self.api_key, "<redacted>"),
            },
            other => other,
        }
    }
}

#[async_trait]
impl ForecastProvider for OpenWeatherClient {
    #[instrument(skip(self), fields(location = %location.name))]
    async fn fetch_series(&self, location: &Location) -> Result<ForecastSeries> {
        info!(
            "Getting forecast for {} ({})",
            location.name,
            location.format_coordinates()
        );
        let start_time = Instant::now();

        let response = self
            .client
            .get(self.forecast_url(location))
            .send()
            .await
            .map_err(|e| {
                let err = self.redact(PlannerError::from(e));
                warn!("Forecast request failed: {}", err);
                err
            })?;

        let status = response.status();
        debug!("HTTP response received: {}", status);

        if status == StatusCode::UNAUTHORIZED {
            error!("OpenWeather authentication failed (HTTP 401)");
            return Err(PlannerError::config(
                "Invalid OpenWeather API key. Please check your configuration.",
            ));
        }

        if !status.is_success() {
            return Err(PlannerError::retrieval(format!(
                "Forecast request for {} failed with status: {} - {}",
                location.name,
                status,
                status.canonical_reason().unwrap_or("Unknown error")
            )));
        }

        let body: api::ForecastResponse = response.json().await.map_err(|e| {
            let e = e.without_url();
            error!("Failed to parse forecast response: {}", e);
            PlannerError::retrieval(format!(
                "Invalid forecast data received for {}: {e}",
                location.name
            ))
        })?;

        let series = body.into_series(location.clone());

        let total_duration = start_time.elapsed();
        info!(
            "Retrieved forecast with {} data points in {:.3}s",
            series.points.len(),
            total_duration.as_secs_f64()
        );
        if let Some((first, last)) = series.coverage() {
            debug!("Forecast covers {} to {}", first, last);
        }
        if total_duration.as_secs() > 5 {
            warn!(
                "Slow forecast API response: {:.3}s",
                total_duration.as_secs_f64()
            );
        }

        Ok(series)
    }
}

/// OpenWeatherMap response structures and conversion utilities
mod api {
    use super::{DateTime, ForecastPoint, ForecastSeries, Location};
    use serde::Deserialize;

    /// `/forecast` response
    #[derive(Debug, Deserialize)]
    pub struct ForecastResponse {
        #[serde(default)]
        pub list: Vec<ForecastItem>,
        pub city: Option<City>,
    }

    #[derive(Debug, Deserialize)]
    pub struct ForecastItem {
        /// Unix timestamp in seconds
        pub dt: i64,
        pub main: MainReadings,
        /// Condition groups, most significant first
        #[serde(default)]
        pub weather: Vec<Condition>,
        pub wind: Option<Wind>,
        pub rain: Option<Precipitation>,
        pub dt_txt: Option<String>,
    }

    #[derive(Debug, Deserialize)]
    pub struct MainReadings {
        pub temp: f64,
        pub humidity: f64,
    }

    #[derive(Debug, Deserialize)]
    pub struct Condition {
        #[serde(default)]
        pub main: String,
    }

    #[derive(Debug, Deserialize)]
    pub struct Wind {
        pub speed: f64,
    }

    #[derive(Debug, Deserialize)]
    pub struct Precipitation {
        #[serde(rename = "1h")]
        pub one_hour: Option<f64>,
    }

    #[derive(Debug, Deserialize)]
    pub struct City {
        pub name: String,
        pub country: Option<String>,
    }

    impl ForecastItem {
        fn into_point(self) -> Option<ForecastPoint> {
            let Some(timestamp) = DateTime::from_timestamp(self.dt, 0) else {
                tracing::warn!(
                    "Skipping forecast item with invalid timestamp {} ({:?})",
                    self.dt, self.dt_txt
                );
                return None;
            };

            Some(ForecastPoint {
                timestamp,
                temperature: self.main.temp,
                humidity: self.main.humidity,
                wind_speed: self.wind.map_or(0.0, |w| w.speed),
                condition: self
                    .weather
                    .into_iter()
                    .next()
                    .map(|c| c.main)
                    .unwrap_or_default(),
                rain_last_hour_mm: self.rain.and_then(|r| r.one_hour),
            })
        }
    }

    impl ForecastResponse {
        pub fn into_series(self, location: Location) -> ForecastSeries {
            if let Some(city) = &self.city {
                tracing::debug!(
                    "Forecast resolved to {} ({})",
                    city.name,
                    city.country.as_deref().unwrap_or("??")
                );
            }

            let points = self
                .list
                .into_iter()
                .filter_map(ForecastItem::into_point)
                .collect();
            ForecastSeries::new(location, points)
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    fn weather_config(api_key: Option<&str>) -> WeatherConfig {
        WeatherConfig {
            api_key: api_key.map(str::to_string),
            base_url: "https://api.openweathermap.org/data/2.5/".to_string(),
            ..WeatherConfig::default()
        }
    }

    #[test]
    fn test_missing_api_key_is_configuration_error() {
        let err = OpenWeatherClient::new(&weather_config(None)).err().unwrap();
        assert!(matches!(err, PlannerError::Config { .. }));

        let err = OpenWeatherClient::new(&weather_config(Some("   "))).err().unwrap();
        assert!(matches!(err, PlannerError::Config { .. }));
    }

    #[test]
    fn test_forecast_url() {
        let client = OpenWeatherClient::new(&weather_config(Some("abc123def456"))).unwrap();
        let url = client.forecast_url(&Location::new("Bodh Gaya", 24.69, 84.99));

        assert_eq!(
            url,
            "https://api.openweathermap.org/data/2.5/forecast?lat=24.69&lon=84.99&appid=abc123def456&units=metric&cnt=40"
        );
    }
}
