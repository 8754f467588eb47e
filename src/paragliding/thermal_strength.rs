//! Additive 0-10 thermal strength heuristic
//!
//! Each factor contributes from its own tier table. Tiers within a factor
//! overlap, so the first matching tier wins and the order below matters.

/// Inputs for [`calculate_thermal_strength`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrengthInputs {
    pub temperature: f64,
    pub dew_point: f64,
    pub wind_speed: f64,
    pub elevation: f64,
    pub cape: f64,
    pub lifted_index: f64,
    /// Boundary layer depth in meters, when the model provides it
    pub bl_depth: Option<f64>,
}

/// Thermal strength on a 0-10 scale, rounded to one decimal
#[must_use]
pub fn calculate_thermal_strength(inputs: &StrengthInputs) -> f64 {
    let strength = spread_points(inputs.temperature - inputs.dew_point)
        + temperature_points(inputs.temperature)
        + cape_points(inputs.cape)
        + lifted_index_points(inputs.lifted_index)
        + bl_depth_points(inputs.bl_depth)
        + elevation_points(inputs.elevation)
        + wind_points(inputs.wind_speed);

    ((strength * 10.0).round() / 10.0).clamp(0.0, 10.0)
}

fn spread_points(spread: f64) -> f64 {
    match spread {
        s if s > 45.0 => 5.0,
        s if s > 35.0 => 4.5,
        s if s > 25.0 => 4.0,
        s if s > 18.0 => 3.0,
        s if s > 15.0 => 2.5,
        s if s > 12.0 => 2.0,
        s if s > 8.0 => 1.5,
        s if s > 6.0 => 1.0,
        _ => 0.0,
    }
}

fn temperature_points(temp_f: f64) -> f64 {
    match temp_f {
        t if t > 90.0 => 2.0,
        t if t > 80.0 => 1.5,
        t if t > 70.0 => 1.0,
        t if t > 65.0 => 0.5,
        t if t > 60.0 => 0.3,
        t if t < 60.0 => -1.0,
        _ => 0.0,
    }
}

fn cape_points(cape: f64) -> f64 {
    match cape {
        c if c > 1500.0 => 1.5,
        c if c > 800.0 => 1.0,
        c if c > 400.0 => 0.5,
        c if c < 50.0 => -0.5,
        _ => 0.0,
    }
}

fn lifted_index_points(lifted_index: f64) -> f64 {
    match lifted_index {
        li if li < -4.0 => 1.0,
        li if li < -2.0 => 0.5,
        li if li > 4.0 => -1.5,
        li if li > 2.0 => -1.0,
        _ => 0.0,
    }
}

fn bl_depth_points(bl_depth: Option<f64>) -> f64 {
    match bl_depth.filter(|d| *d > 0.0) {
        Some(d) if d > 8000.0 => 0.5,
        Some(d) if d < 3000.0 => -0.5,
        _ => 0.0,
    }
}

fn elevation_points(elevation_ft: f64) -> f64 {
    match elevation_ft {
        e if e > 5000.0 => 1.0,
        e if e > 3000.0 => 0.5,
        e if e < 2000.0 => 0.3,
        _ => 0.0,
    }
}

fn wind_points(wind_speed: f64) -> f64 {
    match wind_speed {
        w if w > 25.0 => -2.0,
        w if w > 18.0 => -1.0,
        w if (8.0..=15.0).contains(&w) => 0.5,
        w if (5.0..=10.0).contains(&w) => 0.3,
        w if w < 3.0 => -0.5,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn inputs() -> StrengthInputs {
        StrengthInputs {
            temperature: 75.0,
            dew_point: 45.0,
            wind_speed: 10.0,
            elevation: 4200.0,
            cape: 900.0,
            lifted_index: -3.0,
            bl_depth: None,
        }
    }

    #[test]
    fn test_strong_afternoon() {
        // spread 30 (+4), temp 75 (+1), cape (+1), li (+0.5), elevation (+0.5), wind (+0.5)
        assert_eq!(calculate_thermal_strength(&inputs()), 7.5);
    }

    #[test]
    fn test_cold_stable_day_floors_at_zero() {
        let cold = StrengthInputs {
            temperature: 40.0,
            dew_point: 38.0,
            wind_speed: 30.0,
            elevation: 2500.0,
            cape: 0.0,
            lifted_index: 6.0,
            bl_depth: Some(500.0),
        };
        assert_eq!(calculate_thermal_strength(&cold), 0.0);
    }

    #[test]
    fn test_caps_at_ten() {
        let hot = StrengthInputs {
            temperature: 100.0,
            dew_point: 30.0,
            wind_speed: 12.0,
            elevation: 9000.0,
            cape: 2000.0,
            lifted_index: -6.0,
            bl_depth: Some(9000.0),
        };
        assert_eq!(calculate_thermal_strength(&hot), 10.0);
    }

    #[rstest]
    #[case(46.0, 5.0)]
    #[case(45.0, 4.5)]
    #[case(30.0, 4.0)]
    #[case(20.0, 3.0)]
    #[case(16.0, 2.5)]
    #[case(13.0, 2.0)]
    #[case(9.0, 1.5)]
    #[case(7.0, 1.0)]
    #[case(6.0, 0.0)]
    fn test_spread_tiers(#[case] spread: f64, #[case] expected: f64) {
        assert_eq!(spread_points(spread), expected);
    }

    #[test]
    fn test_exactly_sixty_degrees_scores_nothing() {
        assert_eq!(temperature_points(60.0), 0.0);
        assert_eq!(temperature_points(59.9), -1.0);
    }

    #[rstest]
    #[case(8.0, 0.5)]
    #[case(15.0, 0.5)]
    #[case(6.0, 0.3)]
    #[case(16.0, 0.0)]
    #[case(4.0, 0.0)]
    #[case(2.0, -0.5)]
    #[case(20.0, -1.0)]
    #[case(26.0, -2.0)]
    fn test_wind_tiers_first_match_wins(#[case] wind: f64, #[case] expected: f64) {
        assert_eq!(wind_points(wind), expected);
    }

    #[test]
    fn test_lifted_index_strongly_stable() {
        assert_eq!(lifted_index_points(5.0), -1.5);
        assert_eq!(lifted_index_points(3.0), -1.0);
    }

    #[test]
    fn test_missing_boundary_layer_is_neutral() {
        assert_eq!(bl_depth_points(None), 0.0);
        assert_eq!(bl_depth_points(Some(0.0)), 0.0);
        assert_eq!(bl_depth_points(Some(1000.0)), -0.5);
    }

    #[test]
    fn test_deterministic() {
        let first = calculate_thermal_strength(&inputs());
        for _ in 0..10 {
            assert_eq!(calculate_thermal_strength(&inputs()), first);
        }
    }
}
