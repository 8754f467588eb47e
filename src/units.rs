//! Unit conversions and compass geometry
//!
//! Upstream data arrives in Fahrenheit and mph with meteorological "from"
//! wind directions. Altitudes are carried in feet.

pub const FEET_PER_METER: f64 = 3.28084;

/// Compass points in clockwise order, 22.5° apart
const COMPASS_POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// Flyable wind sectors per launch orientation, inclusive degree bounds
const ORIENTATION_SECTORS: &[(&str, &[(f64, f64)])] = &[
    ("N", &[(345.0, 360.0), (0.0, 15.0)]),
    ("NE", &[(15.0, 75.0)]),
    ("E", &[(75.0, 105.0)]),
    ("SE", &[(105.0, 165.0)]),
    ("S", &[(165.0, 195.0)]),
    ("SSW", &[(180.0, 225.0)]),
    ("SW", &[(195.0, 255.0)]),
    ("W", &[(255.0, 285.0)]),
    ("NW", &[(285.0, 345.0)]),
    ("SW-W", &[(195.0, 285.0)]),
    ("W-NW", &[(245.0, 345.0)]),
    ("SW-NW", &[(195.0, 345.0)]),
    ("S-NW", &[(165.0, 345.0)]),
    ("SSE-WNW", &[(150.0, 300.0)]),
    ("W-SW", &[(225.0, 285.0)]),
    ("E-SE", &[(75.0, 165.0)]),
    ("NE-SE", &[(30.0, 165.0)]),
    ("NW-N", &[(315.0, 360.0), (0.0, 15.0)]),
];

#[must_use]
pub fn fahrenheit_to_celsius(fahrenheit: f64) -> f64 {
    (fahrenheit - 32.0) * 5.0 / 9.0
}

#[must_use]
pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

#[must_use]
pub fn meters_to_feet(meters: f64) -> f64 {
    meters * FEET_PER_METER
}

/// Bucket a wind direction into one of 16 compass points
#[must_use]
pub fn wind_direction_to_cardinal(degrees: f64) -> &'static str {
    let index = (degrees.rem_euclid(360.0) / 22.5).round() as usize % COMPASS_POINTS.len();
    COMPASS_POINTS[index]
}

/// Degree ranges for a named orientation, `None` when the name is not in the table
#[must_use]
pub fn orientation_sectors(orientation: &str) -> Option<&'static [(f64, f64)]> {
    ORIENTATION_SECTORS
        .iter()
        .find(|(name, _)| *name == orientation)
        .map(|(_, sectors)| *sectors)
}

/// Whether a wind direction falls inside the flyable sector of an orientation.
///
/// Unknown orientations never match, which drives every classifier toward `poor`.
#[must_use]
pub fn wind_direction_matches(wind_direction: f64, orientation: &str) -> bool {
    orientation_sectors(orientation).is_some_and(|sectors| {
        sectors
            .iter()
            .any(|&(start, stop)| is_angle_in_range(wind_direction, start, stop))
    })
}

/// Inclusive range test; bounds are taken as given, so 360 stays 360
fn is_angle_in_range(angle: f64, start: f64, stop: f64) -> bool {
    if start <= stop {
        angle >= start && angle <= stop
    } else {
        // Range wraps around 360/0 degrees
        angle >= start || angle <= stop
    }
}
