//! Soaring, thermal and overall flyability classifiers
//!
//! The three verdicts are computed independently from the same day inputs.
//! The overall verdict is driven by an ordered rule list where the first
//! matching rule decides both the class and the narrative.

use crate::models::{Flyability, LaunchSite};

/// Everything the classifiers look at for one day
#[derive(Debug, Clone, Copy)]
pub struct DayConditions<'a> {
    pub site: &'a LaunchSite,
    pub temperature: f64,
    pub tcon: f64,
    pub wind_speed: f64,
    pub wind_gust: f64,
    pub thermal_strength: f64,
    pub top_of_lift: f64,
    pub wind_direction_match: bool,
    pub cloud_cover: f64,
    pub cape: f64,
    pub lifted_index: f64,
}

impl DayConditions<'_> {
    /// Degrees the air still has to warm before thermals trigger
    #[must_use]
    pub fn temp_deficit(&self) -> f64 {
        self.tcon - self.temperature
    }

    fn max_wind(&self) -> f64 {
        self.site.max_wind
    }
}

/// Ridge soaring verdict. Only ever `good` or `poor`.
#[must_use]
pub fn soaring_flyability(
    site: &LaunchSite,
    wind_speed: f64,
    wind_gust: f64,
    wind_direction_match: bool,
) -> Flyability {
    let max_wind = site.max_wind;

    if !wind_direction_match
        || wind_speed < 8.0
        || wind_speed > max_wind
        || wind_gust > max_wind * 1.25
    {
        return Flyability::Poor;
    }

    let sweet_spot = (10.0..=16.0).contains(&wind_speed) && wind_gust <= max_wind;
    let workable = wind_speed >= 8.0 && wind_speed <= max_wind && wind_gust <= max_wind;

    if sweet_spot || workable {
        Flyability::Good
    } else {
        Flyability::Poor
    }
}

/// Thermal flying verdict
#[must_use]
pub fn thermal_flyability(conditions: &DayConditions<'_>) -> Flyability {
    let deficit = conditions.temp_deficit();
    let strength = conditions.thermal_strength;
    let wind = conditions.wind_speed;

    if !conditions.wind_direction_match || deficit > 15.0 || wind > conditions.max_wind() {
        return Flyability::Poor;
    }

    if wind < 3.0 {
        return if strength > 6.0 {
            Flyability::Marginal
        } else {
            Flyability::Poor
        };
    }

    if conditions.cloud_cover > 75.0 && strength < 5.0 {
        return Flyability::Poor;
    }

    if (strength >= 7.0 && deficit <= 3.0 && wind <= conditions.max_wind() * 0.7)
        || (strength >= 5.0 && deficit <= 5.0)
    {
        Flyability::Good
    } else if strength >= 3.0 && deficit <= 8.0 {
        Flyability::Marginal
    } else {
        Flyability::Poor
    }
}

/// One row of the overall verdict table
pub struct FlyabilityRule {
    pub name: &'static str,
    pub applies: fn(&DayConditions<'_>) -> bool,
    pub verdict: fn(&DayConditions<'_>) -> Flyability,
    pub describe: fn(&DayConditions<'_>) -> String,
}

/// Overall verdict rules, highest precedence first.
///
/// Later rules are broader than earlier ones and are only reached because the
/// narrower cases above them have already been ruled out.
pub const OVERALL_RULES: &[FlyabilityRule] = &[
    FlyabilityRule {
        name: "direction-mismatch",
        applies: |c| !c.wind_direction_match,
        verdict: |_| Flyability::Poor,
        describe: |c| format!("Wind direction unfavorable for {} site", c.site.orientation),
    },
    FlyabilityRule {
        name: "too-cool",
        applies: |c| c.temp_deficit() > 15.0,
        verdict: |_| Flyability::Poor,
        describe: |c| {
            format!(
                "Too cool: needs {}°F for thermals, only {}°F forecast",
                c.tcon,
                c.temperature.round()
            )
        },
    },
    FlyabilityRule {
        name: "cool",
        applies: |c| c.temp_deficit() > 8.0,
        verdict: |c| {
            if c.temp_deficit() > 12.0 {
                Flyability::Poor
            } else {
                Flyability::Marginal
            }
        },
        describe: |c| {
            format!(
                "Cool: needs {}°F for good thermals, {}°F forecast",
                c.tcon,
                c.temperature.round()
            )
        },
    },
    FlyabilityRule {
        name: "over-wind-limit",
        applies: |c| c.wind_speed > c.max_wind(),
        verdict: |_| Flyability::Poor,
        describe: |c| {
            format!(
                "Too strong: {}mph exceeds {}mph limit",
                c.wind_speed,
                c.max_wind()
            )
        },
    },
    FlyabilityRule {
        name: "strong-gusts",
        applies: |c| c.wind_gust > c.max_wind() * 1.5,
        verdict: |_| Flyability::Marginal,
        describe: |c| format!("Strong gusts: G{}mph, be cautious", c.wind_gust),
    },
    FlyabilityRule {
        name: "too-light",
        applies: |c| c.wind_speed < 2.0,
        verdict: |c| {
            if c.thermal_strength > 6.0 {
                Flyability::Marginal
            } else {
                Flyability::Poor
            }
        },
        describe: |c| {
            if c.thermal_strength > 6.0 {
                "Light winds, strong thermals".to_string()
            } else {
                "Too light, weak thermals".to_string()
            }
        },
    },
    FlyabilityRule {
        name: "overcast",
        applies: |c| c.cloud_cover > 75.0 && c.lifted_index > 2.0,
        verdict: |_| Flyability::Marginal,
        describe: |c| {
            format!(
                "Overcast may limit thermals: {}% cloud cover",
                c.cloud_cover.round()
            )
        },
    },
    FlyabilityRule {
        name: "excellent-post-frontal",
        applies: |c| {
            c.thermal_strength >= 8.0
                && c.wind_speed <= c.max_wind() * 0.6
                && c.temp_deficit() <= 2.0
                && c.cape > 400.0
        },
        verdict: |_| Flyability::Good,
        describe: |c| {
            format!(
                "Excellent post-frontal: {}/10 thermals, CAPE {}",
                c.thermal_strength,
                c.cape.round()
            )
        },
    },
    FlyabilityRule {
        name: "excellent",
        applies: |c| {
            c.thermal_strength >= 7.0
                && c.wind_speed <= c.max_wind() * 0.7
                && c.temp_deficit() <= 3.0
        },
        verdict: |_| Flyability::Good,
        describe: |c| {
            format!(
                "Excellent: {}/10 thermals, top {}k",
                c.thermal_strength,
                thousands(c.top_of_lift)
            )
        },
    },
    FlyabilityRule {
        name: "good",
        applies: |c| {
            c.thermal_strength >= 5.0
                && c.wind_speed <= c.max_wind() * 0.8
                && c.temp_deficit() <= 5.0
        },
        verdict: |_| Flyability::Good,
        describe: |c| {
            format!(
                "Good: {}/10 thermals, top {}k",
                c.thermal_strength,
                thousands(c.top_of_lift)
            )
        },
    },
    FlyabilityRule {
        name: "moderate",
        applies: |c| {
            c.thermal_strength >= 3.0
                && c.wind_speed <= c.max_wind() * 0.9
                && c.temp_deficit() <= 8.0
        },
        verdict: |_| Flyability::Marginal,
        describe: |c| {
            format!(
                "Moderate: {}/10 thermals, top {}k",
                c.thermal_strength,
                thousands(c.top_of_lift)
            )
        },
    },
    STABLE_RULE,
];

/// Catch-all closing [`OVERALL_RULES`]
const STABLE_RULE: FlyabilityRule = FlyabilityRule {
    name: "stable",
    applies: |_| true,
    verdict: |_| Flyability::Poor,
    describe: |c| format!("Stable conditions: {}/10 thermals", c.thermal_strength),
};

/// Overall verdict plus the narrative explaining it
#[derive(Debug, Clone, PartialEq)]
pub struct OverallAssessment {
    pub flyability: Flyability,
    pub conditions: String,
    /// Name of the rule that decided
    pub rule: &'static str,
}

#[must_use]
pub fn overall_flyability(conditions: &DayConditions<'_>) -> OverallAssessment {
    let rule = OVERALL_RULES
        .iter()
        .find(|rule| (rule.applies)(conditions))
        .unwrap_or(&STABLE_RULE);

    OverallAssessment {
        flyability: (rule.verdict)(conditions),
        conditions: (rule.describe)(conditions),
        rule: rule.name,
    }
}

/// Feet to thousands with one decimal, e.g. 7240 -> 7.2
fn thousands(feet: f64) -> f64 {
    (feet / 100.0).round() / 10.0
}
