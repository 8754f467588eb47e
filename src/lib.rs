//! `launchcast` - Paragliding and hang-gliding flyability forecasts
//!
//! This library turns hourly weather model output into a seven-day
//! flyability forecast for a fixed catalog of launch sites: trigger
//! temperature, thermal strength, usable ceiling, soaring and thermal
//! verdicts, best launch hour and cross-country potential.

pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod paragliding;
pub mod units;
pub mod weather;

// Re-export core types for public API
pub use cache::{CacheKey, Clock, ResponseCache, SystemClock};
pub use config::ForecastConfig;
pub use error::ForecastError;
pub use models::{
    DayForecast, Flyability, ForecastModel, HourlyDataPoint, HourlySeries, LaunchSite,
    RawHourlySample, SiteForecast, SiteType, XcPotential,
};
pub use paragliding::{ForecastHorizon, build_site_forecast, find_site, launch_sites};
pub use weather::{ForecastFetcher, OpenMeteoClient, RequestSpacer, WeatherProvider};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, ForecastError>;
