//! Parcel-theory estimators: cloud base, trigger temperature and usable ceiling
//!
//! All altitudes are feet, temperatures Fahrenheit. These are rules of thumb
//! tuned for launch forecasting, not an atmospheric model.

use crate::units::{fahrenheit_to_celsius, meters_to_feet};

/// Dry adiabatic lapse rate, °F per 1000 ft
pub const DRY_ADIABATIC_LAPSE_RATE: f64 = 5.4;

/// Altitude a glider loses to its own sink below the thermal top
const GLIDER_SINK_MARGIN_FT: f64 = 500.0;

/// Thermals are assumed to reach at least this far above launch
const MIN_CEILING_AGL_FT: f64 = 500.0;

/// Cloud base from the surface spread
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CondensationLevel {
    /// Lifting condensation level, feet MSL
    pub lcl_msl: f64,
    /// Trigger temperature, rounded to whole degrees
    pub tcon: f64,
}

/// Lifting condensation level and trigger temperature.
///
/// Uses the 125 m per °C spread approximation; the MSL value is floored at
/// 500 ft above launch.
#[must_use]
pub fn calculate_lcl(temp_f: f64, dew_point_f: f64, elevation_ft: f64) -> CondensationLevel {
    let spread_c = fahrenheit_to_celsius(temp_f) - fahrenheit_to_celsius(dew_point_f);
    let lcl_agl_ft = meters_to_feet(125.0 * spread_c);
    let lcl_msl = (elevation_ft + lcl_agl_ft).max(elevation_ft + MIN_CEILING_AGL_FT);
    let tcon = dew_point_f + (lcl_agl_ft / 1000.0) * DRY_ADIABATIC_LAPSE_RATE;

    CondensationLevel {
        lcl_msl,
        tcon: tcon.round(),
    }
}

/// Assumed environmental lapse rate (°F/1000 ft) from instability proxies
#[must_use]
pub fn estimate_env_lapse_rate(cape: f64, lifted_index: f64) -> f64 {
    if lifted_index < -4.0 && cape > 1000.0 {
        5.0
    } else if lifted_index < -2.0 && cape > 500.0 {
        4.5
    } else if lifted_index < 0.0 && cape > 200.0 {
        4.0
    } else if lifted_index < 2.0 {
        3.5
    } else if lifted_index < 4.0 {
        3.0
    } else {
        2.5
    }
}

/// Inputs for the usable-lift ceiling
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LiftInputs {
    /// Cloud base, feet MSL
    pub lcl_msl: f64,
    pub thermal_strength: f64,
    /// mph
    pub wind_speed: f64,
    pub elevation: f64,
    pub cape: f64,
    pub lifted_index: f64,
    /// Boundary layer height in meters
    pub boundary_layer_height: Option<f64>,
    pub temperature: f64,
    pub dew_point: f64,
}

/// Highest altitude (feet MSL) a pilot can expect to climb to.
///
/// Prefers the model boundary layer when it is deeper than 100 m, otherwise
/// estimates thermal depth from the lapse-rate difference. Never below
/// launch + 500 ft.
#[must_use]
pub fn calculate_top_of_usable_lift(inputs: &LiftInputs) -> f64 {
    let elevation = inputs.elevation;

    if let Some(bl_height_m) = inputs.boundary_layer_height.filter(|h| *h > 100.0) {
        let top = (elevation + meters_to_feet(bl_height_m) * 0.85).min(inputs.lcl_msl)
            - GLIDER_SINK_MARGIN_FT;
        return apply_wind_reduction(top, inputs.wind_speed, elevation);
    }

    let lapse_rate_diff =
        DRY_ADIABATIC_LAPSE_RATE - estimate_env_lapse_rate(inputs.cape, inputs.lifted_index);

    let thermal_agl = if lapse_rate_diff <= 0.3 {
        // Near adiabatic: the surface spread is the best height proxy
        let spread = inputs.temperature - inputs.dew_point;
        (spread * 180.0).min(6000.0)
    } else {
        let inversion_strength = (inputs.lifted_index * 2.5 + 10.0).max(5.0);
        (inversion_strength / lapse_rate_diff * 1000.0).min(7000.0)
    };

    let mut top = (elevation + thermal_agl).min(inputs.lcl_msl) - GLIDER_SINK_MARGIN_FT;

    if inputs.thermal_strength < 5.0 {
        // Weak thermals top out below the theoretical ceiling
        let factor = 0.6 + inputs.thermal_strength / 12.5;
        top = elevation + (top - elevation) * factor;
    }

    apply_wind_reduction(top, inputs.wind_speed, elevation)
}

/// Wind shear shortens climbs; floors the result at launch + 500 ft
#[must_use]
pub fn apply_wind_reduction(top_of_lift: f64, wind_speed: f64, elevation: f64) -> f64 {
    let reduction = if wind_speed > 20.0 {
        1000.0
    } else if wind_speed > 15.0 {
        600.0
    } else if wind_speed > 10.0 {
        300.0
    } else {
        0.0
    };

    (top_of_lift - reduction)
        .round()
        .max(elevation + MIN_CEILING_AGL_FT)
}
