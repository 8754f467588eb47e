//! Launch site descriptor

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which scoring heuristic dominates for a launch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SiteType {
    /// Inland launch flown on thermals
    Thermal,
    /// Ridge or coastal launch flown on dynamic lift
    Soaring,
    /// Works both ways, best of either score counts
    Mixed,
}

/// Static launch site reference data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchSite {
    pub id: String,
    pub name: String,
    /// Launch elevation in feet MSL
    pub elevation: f64,
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Facing sector name, e.g. "SW-W"
    pub orientation: String,
    /// Maximum safe wind speed in mph
    pub max_wind: f64,
    pub site_type: SiteType,
}

impl LaunchSite {
    #[must_use]
    pub fn new(
        id: &str,
        name: &str,
        elevation: f64,
        (latitude, longitude): (f64, f64),
        orientation: &str,
        max_wind: f64,
        site_type: SiteType,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            elevation,
            latitude,
            longitude,
            orientation: orientation.to_string(),
            max_wind,
            site_type,
        }
    }

    /// Round coordinates for cache key generation
    #[must_use]
    pub fn rounded_coordinates(&self, precision: u32) -> (f64, f64) {
        let multiplier = 10_f64.powi(i32::try_from(precision).unwrap_or(4));
        let lat = (self.latitude * multiplier).round() / multiplier;
        let lon = (self.longitude * multiplier).round() / multiplier;
        (lat, lon)
    }

    /// Format location as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

impl fmt::Display for SiteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteType::Thermal => write!(f, "thermal"),
            SiteType::Soaring => write!(f, "soaring"),
            SiteType::Mixed => write!(f, "mixed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounded_coordinates() {
        let site = LaunchSite::new(
            "test",
            "Test",
            1000.0,
            (37.033_149, -119.337_251),
            "SW-W",
            18.0,
            SiteType::Thermal,
        );
        let (lat, lon) = site.rounded_coordinates(2);
        assert_eq!(lat, 37.03);
        assert_eq!(lon, -119.34);
        assert_eq!(site.format_coordinates(), "37.0331, -119.3373");
    }

    #[test]
    fn test_site_type_serializes_lowercase() {
        let json = serde_json::to_string(&SiteType::Mixed).unwrap();
        assert_eq!(json, "\"mixed\"");
        assert_eq!(SiteType::Soaring.to_string(), "soaring");
    }
}
