//! Open-Meteo client
//!
//! The high resolution profile hits `/forecast` for two days and adds the
//! instability variables, the low resolution profile hits `/ecmwf` for the
//! whole week with surface variables only. Both request Fahrenheit, mph and
//! local wall-clock timestamps.

use super::WeatherProvider;
use crate::config::WeatherConfig;
use crate::models::{ForecastModel, HourlySeries, LaunchSite, RawHourlySample};
use crate::{ForecastError, Result};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use serde::Deserialize;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument};

const BASE_VARIABLES: &[&str] = &[
    "temperature_2m",
    "dew_point_2m",
    "relative_humidity_2m",
    "cloud_cover",
    "wind_speed_10m",
    "wind_direction_10m",
    "wind_gusts_10m",
    "precipitation",
    "precipitation_probability",
];

const INSTABILITY_VARIABLES: &[&str] = &["cape", "lifted_index", "boundary_layer_height"];

/// Hourly forecast response, only the parts we read
#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    pub hourly: Option<HourlyData>,
}

/// Parallel hourly arrays, indexed by `time`
#[derive(Debug, Deserialize)]
pub struct HourlyData {
    pub time: Vec<String>,
    #[serde(rename = "temperature_2m", default)]
    pub temperature: Vec<Option<f64>>,
    #[serde(rename = "dew_point_2m", default)]
    pub dew_point: Vec<Option<f64>>,
    #[serde(rename = "relative_humidity_2m", default)]
    pub relative_humidity: Vec<Option<f64>>,
    #[serde(default)]
    pub cloud_cover: Vec<Option<f64>>,
    #[serde(rename = "wind_speed_10m", default)]
    pub wind_speed: Vec<Option<f64>>,
    #[serde(rename = "wind_direction_10m", default)]
    pub wind_direction: Vec<Option<f64>>,
    #[serde(rename = "wind_gusts_10m", default)]
    pub wind_gusts: Vec<Option<f64>>,
    #[serde(default)]
    pub precipitation: Vec<Option<f64>>,
    #[serde(default)]
    pub precipitation_probability: Vec<Option<f64>>,
    pub cape: Option<Vec<Option<f64>>>,
    pub lifted_index: Option<Vec<Option<f64>>>,
    pub boundary_layer_height: Option<Vec<Option<f64>>>,
}

fn value_at(values: &[Option<f64>], index: usize) -> Option<f64> {
    values.get(index).copied().flatten()
}

fn optional_at(values: Option<&Vec<Option<f64>>>, index: usize) -> Option<f64> {
    values.and_then(|v| value_at(v, index))
}

impl HourlyData {
    /// Convert the parallel arrays into samples.
    ///
    /// Timesteps without temperature, dew point or wind are dropped; other
    /// missing surface values read as 0.
    pub fn into_series(self, model: ForecastModel) -> Result<HourlySeries> {
        let mut samples = Vec::with_capacity(self.time.len());

        for (i, time) in self.time.iter().enumerate() {
            let time = NaiveDateTime::parse_from_str(time, "%Y-%m-%dT%H:%M").map_err(|e| {
                ForecastError::parse(format!("Invalid timestamp '{time}': {e}"))
            })?;

            let (Some(temperature), Some(dew_point), Some(wind_speed), Some(wind_direction)) = (
                value_at(&self.temperature, i),
                value_at(&self.dew_point, i),
                value_at(&self.wind_speed, i),
                value_at(&self.wind_direction, i),
            ) else {
                debug!(%time, "skipping incomplete timestep");
                continue;
            };

            samples.push(RawHourlySample {
                time,
                temperature,
                dew_point,
                relative_humidity: value_at(&self.relative_humidity, i).unwrap_or(0.0),
                cloud_cover: value_at(&self.cloud_cover, i).unwrap_or(0.0),
                wind_speed,
                wind_direction,
                wind_gust: value_at(&self.wind_gusts, i).unwrap_or(wind_speed),
                precipitation: value_at(&self.precipitation, i).unwrap_or(0.0),
                precipitation_probability: value_at(&self.precipitation_probability, i)
                    .unwrap_or(0.0),
                cape: optional_at(self.cape.as_ref(), i),
                lifted_index: optional_at(self.lifted_index.as_ref(), i),
                boundary_layer_height: optional_at(self.boundary_layer_height.as_ref(), i),
            });
        }

        Ok(HourlySeries::new(model, samples))
    }
}

/// Parse a raw response body
pub fn parse_response(model: ForecastModel, body: &str) -> Result<HourlySeries> {
    let response: ForecastResponse = serde_json::from_str(body)?;
    response
        .hourly
        .ok_or_else(|| ForecastError::parse("Response has no hourly block"))?
        .into_series(model)
}

/// Open-Meteo HTTP client with transient-error retries
pub struct OpenMeteoClient {
    http: ClientWithMiddleware,
    base_url: String,
    timezone: String,
    high_res_days: u32,
    low_res_days: u32,
}

impl OpenMeteoClient {
    pub fn new(config: &WeatherConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(concat!("launchcast/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ForecastError::config(format!("Failed to create HTTP client: {e}")))?;

        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(config.max_retries);
        let http = ClientBuilder::new(client)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timezone: config.timezone.clone(),
            high_res_days: config.high_res_days,
            low_res_days: config.low_res_days,
        })
    }

    /// Request URL for a site and model
    #[must_use]
    pub fn forecast_url(&self, site: &LaunchSite, model: ForecastModel) -> String {
        let (endpoint, days, variables) = match model {
            ForecastModel::HighRes => (
                "forecast",
                self.high_res_days,
                [BASE_VARIABLES, INSTABILITY_VARIABLES].concat(),
            ),
            ForecastModel::LowRes => ("ecmwf", self.low_res_days, BASE_VARIABLES.to_vec()),
        };

        format!(
            "{}/{endpoint}?latitude={:.4}&longitude={:.4}&hourly={}&temperature_unit=fahrenheit&wind_speed_unit=mph&timezone={}&forecast_days={days}",
            self.base_url,
            site.latitude,
            site.longitude,
            variables.join(","),
            urlencoding::encode(&self.timezone),
        )
    }
}

#[async_trait]
impl WeatherProvider for OpenMeteoClient {
    #[instrument(skip_all, fields(site = %site.id, model = %model))]
    async fn fetch(&self, site: &LaunchSite, model: ForecastModel) -> Result<HourlySeries> {
        let url = self.forecast_url(site, model);
        debug!("OpenMeteo API request URL: {}", url);
        let start_time = Instant::now();

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| ForecastError::api(model.tag(), format!("Request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ForecastError::api(model.tag(), format!("HTTP {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ForecastError::api(model.tag(), format!("Failed to read body: {e}")))?;

        let series = parse_response(model, &body)?;
        info!(
            samples = series.samples.len(),
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "Fetched hourly forecast"
        );
        Ok(series)
    }
}
