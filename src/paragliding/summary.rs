//! Display helpers over finished forecasts
//!
//! These never fail on the "no data" record, which renders as a red day with
//! a cross-wind label and the launch elevation as ceiling.

use crate::models::{DayForecast, Flyability, LaunchSite, SiteForecast};
use crate::units::wind_direction_to_cardinal;
use chrono::NaiveDate;
use std::fmt;

/// Short soaring verdict shown in the weekly grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoaringLabel {
    Cross,
    Strong,
    Good,
    WindOk,
    Light,
}

impl SoaringLabel {
    /// Labels that still mean the ridge can be flown
    #[must_use]
    pub fn is_flyable(self) -> bool {
        matches!(self, SoaringLabel::Good | SoaringLabel::WindOk | SoaringLabel::Strong)
    }
}

impl fmt::Display for SoaringLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SoaringLabel::Cross => "Cross",
            SoaringLabel::Strong => "Strong",
            SoaringLabel::Good => "Good",
            SoaringLabel::WindOk => "Wind OK",
            SoaringLabel::Light => "Light",
        };
        f.write_str(label)
    }
}

/// Colour of a site/day cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayColour {
    Green,
    Yellow,
    Red,
}

impl DayColour {
    /// Points towards the weekly site score
    #[must_use]
    pub fn points(self) -> u32 {
        match self {
            DayColour::Green => 2,
            DayColour::Yellow => 1,
            DayColour::Red => 0,
        }
    }
}

#[must_use]
pub fn soaring_label(site: &LaunchSite, day: &DayForecast) -> SoaringLabel {
    if !day.wind_direction_match {
        SoaringLabel::Cross
    } else if day.wind_speed > site.max_wind || day.wind_gust > site.max_wind * 1.25 {
        SoaringLabel::Strong
    } else if day.soaring_flyability == Flyability::Good {
        SoaringLabel::Good
    } else if day.soaring_flyability == Flyability::Marginal || day.wind_speed >= 8.0 {
        SoaringLabel::WindOk
    } else {
        SoaringLabel::Light
    }
}

#[must_use]
pub fn thermal_label(thermal: Flyability) -> &'static str {
    match thermal {
        Flyability::Good => "Good",
        Flyability::Marginal => "Moderate",
        Flyability::Poor => "Stable",
    }
}

#[must_use]
pub fn day_colour(site: &LaunchSite, day: &DayForecast) -> DayColour {
    let soaring = soaring_label(site, day);
    let thermal_flyable = matches!(
        day.thermal_flyability,
        Flyability::Good | Flyability::Marginal
    );

    if soaring.is_flyable()
        && (soaring == SoaringLabel::Good || day.thermal_flyability == Flyability::Good)
    {
        DayColour::Green
    } else if soaring.is_flyable() || thermal_flyable {
        DayColour::Yellow
    } else {
        DayColour::Red
    }
}

/// Colour for a day offset, red when the record is missing
#[must_use]
pub fn day_colour_at(forecast: &SiteForecast, day_index: usize) -> DayColour {
    forecast
        .forecast
        .get(day_index)
        .map_or(DayColour::Red, |day| day_colour(&forecast.site, day))
}

/// Sum of colour points over the first seven days
#[must_use]
pub fn weekly_score(forecast: &SiteForecast) -> u32 {
    (0..7).map(|i| day_colour_at(forecast, i).points()).sum()
}

/// Best week first; equal scores keep catalog order
pub fn rank_sites(forecasts: &mut [SiteForecast]) {
    forecasts.sort_by_key(|forecast| std::cmp::Reverse(weekly_score(forecast)));
}

/// "Today", "Tomorrow" or the weekday name
#[must_use]
pub fn day_label(day_index: usize, date: NaiveDate) -> String {
    match day_index {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        _ => date.format("%A").to_string(),
    }
}

/// Ceiling in thousands of feet, e.g. "9.3k"
#[must_use]
pub fn ceiling_text(top_of_lift: f64) -> String {
    format!("{:.1}k", top_of_lift / 1000.0)
}

/// Ceiling above launch, e.g. "+5.1k AGL"
#[must_use]
pub fn ceiling_agl_text(site: &LaunchSite, day: &DayForecast) -> String {
    format!("+{:.1}k AGL", (day.top_of_lift - site.elevation) / 1000.0)
}

/// e.g. "10-14 mph WSW (260°)"
#[must_use]
pub fn wind_text(day: &DayForecast) -> String {
    format!(
        "{}-{} mph {} ({}°)",
        day.wind_speed,
        day.wind_gust,
        wind_direction_to_cardinal(day.wind_direction),
        day.wind_direction.round()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ForecastModel, SiteType};
    use rstest::rstest;

    fn site() -> LaunchSite {
        LaunchSite::new(
            "ed-levin",
            "Ed Levin",
            1800.0,
            (37.4656, -121.8531),
            "S-NW",
            20.0,
            SiteType::Mixed,
        )
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn flyable_day(soaring: Flyability, thermal: Flyability, wind: f64) -> DayForecast {
        let mut day = DayForecast::unavailable(&site(), date());
        day.source = Some(ForecastModel::LowRes);
        day.wind_direction_match = true;
        day.wind_speed = wind;
        day.wind_gust = wind + 4.0;
        day.wind_direction = 260.0;
        day.top_of_lift = 7130.0;
        day.soaring_flyability = soaring;
        day.thermal_flyability = thermal;
        day
    }

    #[rstest]
    #[case(Flyability::Good, 12.0, SoaringLabel::Good)]
    #[case(Flyability::Poor, 25.0, SoaringLabel::Strong)]
    #[case(Flyability::Poor, 5.0, SoaringLabel::Light)]
    #[case(Flyability::Poor, 9.0, SoaringLabel::WindOk)]
    #[case(Flyability::Marginal, 5.0, SoaringLabel::WindOk)]
    fn test_soaring_label(
        #[case] soaring: Flyability,
        #[case] wind: f64,
        #[case] expected: SoaringLabel,
    ) {
        let day = flyable_day(soaring, Flyability::Poor, wind);
        assert_eq!(soaring_label(&site(), &day), expected);
    }

    #[rstest]
    #[case(Flyability::Good, Flyability::Poor, 12.0, DayColour::Green)]
    #[case(Flyability::Poor, Flyability::Good, 9.0, DayColour::Green)]
    #[case(Flyability::Poor, Flyability::Marginal, 5.0, DayColour::Yellow)]
    #[case(Flyability::Poor, Flyability::Poor, 25.0, DayColour::Yellow)]
    #[case(Flyability::Poor, Flyability::Poor, 5.0, DayColour::Red)]
    fn test_day_colour(
        #[case] soaring: Flyability,
        #[case] thermal: Flyability,
        #[case] wind: f64,
        #[case] expected: DayColour,
    ) {
        let day = flyable_day(soaring, thermal, wind);
        assert_eq!(day_colour(&site(), &day), expected);
    }

    #[test]
    fn test_unavailable_day_renders_defaults() {
        let day = DayForecast::unavailable(&site(), date());
        assert_eq!(soaring_label(&site(), &day), SoaringLabel::Cross);
        assert_eq!(day_colour(&site(), &day), DayColour::Red);
        assert_eq!(thermal_label(day.thermal_flyability), "Stable");
        assert_eq!(ceiling_text(day.top_of_lift), "1.8k");
        assert_eq!(ceiling_agl_text(&site(), &day), "+0.0k AGL");
        assert_eq!(wind_text(&day), "0-0 mph N (0°)");
        assert_eq!(day.launch_time, "12:00 PM");
    }

    #[test]
    fn test_text_helpers() {
        let day = flyable_day(Flyability::Good, Flyability::Good, 10.0);
        assert_eq!(wind_text(&day), "10-14 mph W (260°)");
        assert_eq!(ceiling_text(day.top_of_lift), "7.1k");
        assert_eq!(ceiling_agl_text(&site(), &day), "+5.3k AGL");
    }

    #[test]
    fn test_day_labels() {
        assert_eq!(day_label(0, date()), "Today");
        assert_eq!(day_label(1, date()), "Tomorrow");
        // 2026-10-21 is a Wednesday
        let later = NaiveDate::from_ymd_opt(2026, 10, 21).unwrap();
        assert_eq!(day_label(2, later), "Wednesday");
    }

    #[test]
    fn test_rank_sites_by_weekly_score() {
        let quiet = SiteForecast {
            site: site(),
            forecast: (0..7)
                .map(|_| DayForecast::unavailable(&site(), date()))
                .collect(),
        };
        let mut busy_site = site();
        busy_site.id = "busy".to_string();
        let busy = SiteForecast {
            site: busy_site,
            forecast: (0..7)
                .map(|_| flyable_day(Flyability::Good, Flyability::Good, 12.0))
                .collect(),
        };
        let short = SiteForecast {
            site: site(),
            forecast: Vec::new(),
        };

        assert_eq!(weekly_score(&busy), 14);
        assert_eq!(weekly_score(&quiet), 0);
        assert_eq!(weekly_score(&short), 0);

        let mut ranked = vec![quiet, busy];
        rank_sites(&mut ranked);
        assert_eq!(ranked[0].site.id, "busy");
    }
}
