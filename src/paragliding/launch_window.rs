//! Best launch hour search
//!
//! Every hour between 10:00 and 18:00 gets a score from the thermal and/or
//! soaring tables depending on the site type; the earliest hour with the
//! highest positive score wins.

use crate::models::forecast::DEFAULT_LAUNCH_TIME;
use crate::models::{Flyability, HourlyDataPoint, LaunchSite, SiteType};
use crate::units::wind_direction_matches;

/// Local hours considered for launching
pub const LAUNCH_HOURS: std::ops::RangeInclusive<u32> = 10..=18;

/// Score of a thermal launch at this hour
#[must_use]
pub fn thermal_hour_score(site: &LaunchSite, hour: &HourlyDataPoint) -> i32 {
    let max_wind = site.max_wind;
    let deficit = hour.tcon - hour.temperature;
    let wind = hour.wind_speed;
    let mut score = 0;

    score += match deficit {
        d if d <= 0.0 => 40,
        d if d <= 3.0 => 30,
        d if d <= 5.0 => 20,
        d if d <= 8.0 => 10,
        _ => 0,
    };

    score += match wind {
        w if (5.0..=12.0).contains(&w) => 25,
        w if (3.0..=15.0).contains(&w) => 15,
        w if w > max_wind => -20,
        _ => 0,
    };

    if hour.wind_gust > max_wind {
        score -= 15;
    } else if hour.wind_gust > wind * 1.5 {
        score -= 10;
    }

    score += match hour.cloud_cover {
        c if (20.0..=50.0).contains(&c) => 15,
        c if c < 20.0 => 10,
        c if c > 70.0 => -10,
        _ => 0,
    };

    score
}

/// Score of a ridge soaring launch at this hour
#[must_use]
pub fn soaring_hour_score(site: &LaunchSite, hour: &HourlyDataPoint) -> i32 {
    if !wind_direction_matches(hour.wind_direction, &site.orientation) {
        return -50;
    }

    let max_wind = site.max_wind;
    let mut score = match hour.wind_speed {
        w if (10.0..=16.0).contains(&w) => 40,
        w if (8.0..=20.0).contains(&w) => 25,
        w if (6.0..=22.0).contains(&w) => 10,
        w if w < 6.0 => -10,
        w if w > max_wind => -30,
        _ => 0,
    };

    if hour.wind_gust > max_wind {
        score -= 20;
    } else if hour.wind_gust > 25.0 {
        score -= 10;
    }

    score
}

/// Score dispatched on the site's flying style
#[must_use]
pub fn score_hour(site: &LaunchSite, hour: &HourlyDataPoint) -> i32 {
    match site.site_type {
        SiteType::Thermal => thermal_hour_score(site, hour),
        SiteType::Soaring => soaring_hour_score(site, hour),
        SiteType::Mixed => thermal_hour_score(site, hour).max(soaring_hour_score(site, hour)),
    }
}

/// Winning hour of a day
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredHour<'a> {
    pub point: &'a HourlyDataPoint,
    pub score: i32,
}

/// Highest scoring hour inside [`LAUNCH_HOURS`] with a positive score.
///
/// Ties go to the earliest hour.
#[must_use]
pub fn select_best_launch_hour<'a>(
    site: &LaunchSite,
    hours: &'a [HourlyDataPoint],
) -> Option<ScoredHour<'a>> {
    hours
        .iter()
        .filter(|point| LAUNCH_HOURS.contains(&point.hour))
        .map(|point| ScoredHour {
            point,
            score: score_hour(site, point),
        })
        .fold(None, |best: Option<ScoredHour<'a>>, candidate| match best {
            Some(current) if current.score >= candidate.score => Some(current),
            _ => Some(candidate),
        })
        .filter(|best| best.score > 0)
}

/// Launch time text for a day's hours, `12:00 PM` when nothing scores
#[must_use]
pub fn best_launch_time(site: &LaunchSite, hours: &[HourlyDataPoint]) -> String {
    select_best_launch_hour(site, hours)
        .map_or_else(|| DEFAULT_LAUNCH_TIME.to_string(), |best| format_launch_hour(best.point.hour))
}

/// 24h hour to "1:00 PM" style
#[must_use]
pub fn format_launch_hour(hour: u32) -> String {
    let suffix = if hour >= 12 { "PM" } else { "AM" };
    let display = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{display}:00 {suffix}")
}

/// Rule table for callers that only have the day's verdicts.
#[must_use]
pub fn legacy_launch_time(
    thermal: Flyability,
    soaring: Flyability,
    thermal_strength: f64,
    wind_speed: f64,
    temp_deficit: f64,
) -> &'static str {
    use Flyability::{Good, Marginal, Poor};

    match (thermal, soaring) {
        (Good, Poor) if thermal_strength >= 7.0 => "11:00 AM",
        (Good, Poor) if thermal_strength >= 5.0 => "11:30 AM",
        (Good, Poor) => "12:00 PM",
        (Poor, Good) if wind_speed >= 15.0 => "9:00 AM",
        (Poor, Good) if wind_speed >= 12.0 => "10:00 AM",
        (Poor, Good) => "10:30 AM",
        (Good, Good) if thermal_strength >= 6.0 && temp_deficit <= 3.0 => "11:00 AM",
        (Good, Good) => "10:30 AM",
        (Good, Marginal) if thermal_strength >= 7.0 => "11:30 AM",
        (Good, Marginal) => "12:00 PM",
        (Marginal, Good) => "10:00 AM",
        (Marginal, _) if temp_deficit <= 5.0 => "12:00 PM",
        (Marginal, _) => "1:00 PM",
        (_, Marginal) => "11:00 AM",
        _ => DEFAULT_LAUNCH_TIME,
    }
}
