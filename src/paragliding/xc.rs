//! Cross-country potential

use crate::models::{LaunchSite, SiteType, XcPotential};

/// XC class with a short reason for display
#[derive(Debug, Clone, PartialEq)]
pub struct XcAssessment {
    pub potential: XcPotential,
    pub reason: String,
}

impl XcAssessment {
    fn new(potential: XcPotential, reason: impl Into<String>) -> Self {
        Self {
            potential,
            reason: reason.into(),
        }
    }
}

/// How far a pilot could go from this launch today.
///
/// Ridge sites are always local flying.
#[must_use]
pub fn calculate_xc_potential(
    top_of_lift: f64,
    thermal_strength: f64,
    wind_speed: f64,
    site: &LaunchSite,
) -> XcAssessment {
    if site.site_type == SiteType::Soaring {
        return XcAssessment::new(XcPotential::Low, "Ridge site - local soaring");
    }

    let ceiling_agl = top_of_lift - site.elevation;

    if thermal_strength >= 7.0 && ceiling_agl >= 4000.0 && wind_speed <= 15.0 {
        return XcAssessment::new(
            XcPotential::High,
            format!("{}k+ AGL, {thermal_strength}/10", (ceiling_agl / 1000.0).round()),
        );
    }

    if (thermal_strength >= 5.0 && ceiling_agl >= 3000.0)
        || (thermal_strength >= 6.0 && wind_speed <= 12.0)
    {
        return XcAssessment::new(XcPotential::Moderate, "Good for local XC");
    }

    let reason = if ceiling_agl < 2000.0 {
        "Low ceiling"
    } else {
        "Weak thermals"
    };
    XcAssessment::new(XcPotential::Low, reason)
}
