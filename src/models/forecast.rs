//! Per-day forecast records and per-site aggregates

use super::{ForecastModel, HourlyDataPoint, LaunchSite};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Launch time shown when no better hour is known
pub const DEFAULT_LAUNCH_TIME: &str = "12:00 PM";

/// Conditions text of a day without upstream data
pub const NO_DATA_CONDITIONS: &str = "Forecast not available";

/// Three-state verdict shared by every classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Flyability {
    Good,
    Marginal,
    Poor,
}

/// Cross-country potential class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum XcPotential {
    High,
    Moderate,
    Low,
}

/// Derived metrics for one site on one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayForecast {
    pub date: NaiveDate,
    /// Model the record was computed from, `None` for the no-data record
    pub source: Option<ForecastModel>,
    pub wind_speed: f64,
    pub wind_direction: f64,
    pub wind_gust: f64,
    pub temperature: f64,
    pub dew_point: f64,
    /// Thermal trigger temperature in Fahrenheit
    pub tcon: f64,
    /// Cloud base in feet MSL
    pub cloud_base: f64,
    /// 0-10, one decimal
    pub thermal_strength: f64,
    /// Top of usable lift in feet MSL
    pub top_of_lift: f64,
    pub flyability: Flyability,
    pub conditions: String,
    pub soaring_flyability: Flyability,
    pub thermal_flyability: Flyability,
    pub launch_time: String,
    pub xc_potential: XcPotential,
    pub xc_reason: String,
    pub hourly_data: Vec<HourlyDataPoint>,
    /// Boundary layer height in meters when the model provides it
    pub bl_depth: Option<f64>,
    pub cape: f64,
    pub lifted_index: f64,
    pub relative_humidity: f64,
    pub cloud_cover: f64,
    pub wind_direction_match: bool,
    pub rain_info: Option<String>,
}

impl DayForecast {
    /// Placeholder for a day no source has data for.
    ///
    /// Same shape as a computed record: zeroed numbers, `poor` everywhere and
    /// a top of lift at launch elevation.
    #[must_use]
    pub fn unavailable(site: &LaunchSite, date: NaiveDate) -> Self {
        Self {
            date,
            source: None,
            wind_speed: 0.0,
            wind_direction: 0.0,
            wind_gust: 0.0,
            temperature: 0.0,
            dew_point: 0.0,
            tcon: 0.0,
            cloud_base: 0.0,
            thermal_strength: 0.0,
            top_of_lift: site.elevation,
            flyability: Flyability::Poor,
            conditions: NO_DATA_CONDITIONS.to_string(),
            soaring_flyability: Flyability::Poor,
            thermal_flyability: Flyability::Poor,
            launch_time: DEFAULT_LAUNCH_TIME.to_string(),
            xc_potential: XcPotential::Low,
            xc_reason: "No data".to_string(),
            hourly_data: Vec::new(),
            bl_depth: None,
            cape: 0.0,
            lifted_index: 0.0,
            relative_humidity: 0.0,
            cloud_cover: 0.0,
            wind_direction_match: false,
            rain_info: None,
        }
    }

    #[must_use]
    pub fn is_available(&self) -> bool {
        self.source.is_some()
    }

    /// Trigger temperature minus forecast temperature, positive when too cool
    #[must_use]
    pub fn temp_deficit(&self) -> f64 {
        self.tcon - self.temperature
    }
}

/// A launch site with its seven daily records, index 0 is today
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteForecast {
    pub site: LaunchSite,
    pub forecast: Vec<DayForecast>,
}

impl SiteForecast {
    #[must_use]
    pub fn today(&self) -> Option<&DayForecast> {
        self.forecast.first()
    }

    #[must_use]
    pub fn tomorrow(&self) -> Option<&DayForecast> {
        self.forecast.get(1)
    }
}

impl fmt::Display for Flyability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Flyability::Good => write!(f, "good"),
            Flyability::Marginal => write!(f, "marginal"),
            Flyability::Poor => write!(f, "poor"),
        }
    }
}

impl fmt::Display for XcPotential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            XcPotential::High => write!(f, "high"),
            XcPotential::Moderate => write!(f, "moderate"),
            XcPotential::Low => write!(f, "low"),
        }
    }
}
