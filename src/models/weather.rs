//! Upstream hourly weather samples

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Numerical model an hourly series came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ForecastModel {
    /// Short-range high resolution run carrying CAPE, lifted index and boundary layer height
    HighRes,
    /// Seven-day global run with surface variables only
    LowRes,
}

impl ForecastModel {
    /// Short tag used in cache keys and logs
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            ForecastModel::HighRes => "hrrr",
            ForecastModel::LowRes => "ecmwf",
        }
    }
}

impl fmt::Display for ForecastModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// One upstream timestep, local wall-clock time of the site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawHourlySample {
    pub time: NaiveDateTime,
    /// Temperature in Fahrenheit
    pub temperature: f64,
    /// Dew point in Fahrenheit
    pub dew_point: f64,
    /// Relative humidity (0-100)
    pub relative_humidity: f64,
    /// Cloud cover percentage (0-100)
    pub cloud_cover: f64,
    /// Wind speed in mph
    pub wind_speed: f64,
    /// Wind direction in degrees, direction the wind blows from
    pub wind_direction: f64,
    /// Wind gust speed in mph
    pub wind_gust: f64,
    /// Precipitation in mm
    pub precipitation: f64,
    /// Precipitation probability (0-100)
    pub precipitation_probability: f64,
    pub cape: Option<f64>,
    pub lifted_index: Option<f64>,
    /// Boundary layer height in meters
    pub boundary_layer_height: Option<f64>,
}

impl RawHourlySample {
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.time.date()
    }

    #[must_use]
    pub fn hour(&self) -> u32 {
        self.time.hour()
    }
}

/// Hourly samples for one site from one model, sorted by time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlySeries {
    pub model: ForecastModel,
    pub samples: Vec<RawHourlySample>,
}

impl HourlySeries {
    #[must_use]
    pub fn new(model: ForecastModel, samples: Vec<RawHourlySample>) -> Self {
        Self { model, samples }
    }

    /// Samples on a local date whose hour lies in `hours`
    pub fn samples_on<'a>(
        &'a self,
        date: NaiveDate,
        hours: std::ops::RangeInclusive<u32>,
    ) -> impl Iterator<Item = &'a RawHourlySample> + 'a {
        self.samples
            .iter()
            .filter(move |s| s.date() == date && hours.contains(&s.hour()))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Per-hour subset used for best-hour search and charting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlyDataPoint {
    /// Local hour of day (0-23)
    pub hour: u32,
    pub temperature: f64,
    /// Trigger temperature for this hour
    pub tcon: f64,
    pub wind_speed: f64,
    pub wind_direction: f64,
    pub wind_gust: f64,
    pub cloud_cover: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_at(time: &str) -> RawHourlySample {
        RawHourlySample {
            time: NaiveDateTime::parse_from_str(time, "%Y-%m-%dT%H:%M").unwrap(),
            temperature: 70.0,
            dew_point: 45.0,
            relative_humidity: 40.0,
            cloud_cover: 10.0,
            wind_speed: 8.0,
            wind_direction: 250.0,
            wind_gust: 12.0,
            precipitation: 0.0,
            precipitation_probability: 0.0,
            cape: None,
            lifted_index: None,
            boundary_layer_height: None,
        }
    }

    #[test]
    fn test_samples_on_filters_date_and_hours() {
        let series = HourlySeries::new(
            ForecastModel::LowRes,
            vec![
                sample_at("2026-10-19T09:00"),
                sample_at("2026-10-19T10:00"),
                sample_at("2026-10-19T14:00"),
                sample_at("2026-10-19T15:00"),
                sample_at("2026-10-20T12:00"),
            ],
        );
        let date = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let hours: Vec<u32> = series.samples_on(date, 10..=14).map(RawHourlySample::hour).collect();
        assert_eq!(hours, vec![10, 14]);
    }

    #[test]
    fn test_model_tags() {
        assert_eq!(ForecastModel::HighRes.tag(), "hrrr");
        assert_eq!(ForecastModel::LowRes.to_string(), "ecmwf");
    }
}
