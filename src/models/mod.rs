//! Data models for the forecaster
//!
//! This module contains the core domain models organized by concern:
//! - Site: static launch site descriptors
//! - Weather: raw hourly samples from the upstream models
//! - Forecast: derived per-day records and per-site aggregates

pub mod forecast;
pub mod site;
pub mod weather;

// Re-export all public types for convenient access
pub use forecast::{DayForecast, Flyability, SiteForecast, XcPotential};
pub use site::{LaunchSite, SiteType};
pub use weather::{ForecastModel, HourlyDataPoint, HourlySeries, RawHourlySample};
