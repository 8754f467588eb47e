//! Rain annotation for a forecast day

use crate::models::HourlySeries;
use chrono::NaiveDate;

/// Flagged hours at which the whole day counts as wet
const ALL_DAY_HOURS: usize = 10;

/// Whether an hour counts as wet
fn is_rain_hour(precipitation: f64, probability: f64) -> bool {
    precipitation > 0.01 || probability > 40.0
}

/// Short rain summary for one local date, `None` when the day stays dry
#[must_use]
pub fn analyze_rain(series: &HourlySeries, date: NaiveDate) -> Option<String> {
    let rain_hours: Vec<u32> = series
        .samples_on(date, 0..=23)
        .filter(|s| is_rain_hour(s.precipitation, s.precipitation_probability))
        .map(|s| s.hour())
        .collect();

    if rain_hours.is_empty() {
        return None;
    }

    if rain_hours.len() >= ALL_DAY_HOURS {
        return Some("Rain expected all day".to_string());
    }

    let count = |range: std::ops::Range<u32>| rain_hours.iter().filter(|h| range.contains(h)).count();

    let mut periods = Vec::new();
    if count(6..12) >= 3 {
        periods.push("morning");
    }
    if count(12..18) >= 3 {
        periods.push("afternoon");
    }
    if count(18..24) >= 2 {
        periods.push("evening");
    }

    if !periods.is_empty() {
        return Some(format!("Rain expected in {}", periods.join(" and ")));
    }

    let first = rain_hours.iter().min().copied().unwrap_or_default();
    let last = rain_hours.iter().max().copied().unwrap_or_default();

    if first == last {
        Some(format!("Rain expected around {}", format_hour(first)))
    } else {
        Some(format!(
            "Rain expected {}-{}",
            format_hour(first),
            format_hour(last)
        ))
    }
}

/// 24h hour to "3pm" style
fn format_hour(hour: u32) -> String {
    match hour {
        0 => "12am".to_string(),
        12 => "12pm".to_string(),
        h if h > 12 => format!("{}pm", h - 12),
        h => format!("{h}am"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ForecastModel, RawHourlySample};
    use chrono::NaiveDateTime;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn series(wet_hours: &[u32]) -> HourlySeries {
        let samples = (0..24)
            .map(|hour| {
                let wet = wet_hours.contains(&hour);
                RawHourlySample {
                    time: NaiveDateTime::new(day(), chrono::NaiveTime::from_hms_opt(hour, 0, 0).unwrap()),
                    temperature: 60.0,
                    dew_point: 50.0,
                    relative_humidity: 70.0,
                    cloud_cover: 80.0,
                    wind_speed: 5.0,
                    wind_direction: 200.0,
                    wind_gust: 8.0,
                    precipitation: if wet { 0.05 } else { 0.0 },
                    precipitation_probability: if wet { 30.0 } else { 10.0 },
                    cape: None,
                    lifted_index: None,
                    boundary_layer_height: None,
                }
            })
            .collect();
        HourlySeries::new(ForecastModel::LowRes, samples)
    }

    #[test]
    fn test_dry_day() {
        assert_eq!(analyze_rain(&series(&[]), day()), None);
    }

    #[test]
    fn test_other_dates_ignored() {
        let tomorrow = day().succ_opt().unwrap();
        assert_eq!(analyze_rain(&series(&[13, 14]), tomorrow), None);
    }

    #[test]
    fn test_all_day() {
        let wet: Vec<u32> = (6..16).collect();
        assert_eq!(
            analyze_rain(&series(&wet), day()).as_deref(),
            Some("Rain expected all day")
        );
    }

    #[test]
    fn test_periods() {
        assert_eq!(
            analyze_rain(&series(&[7, 8, 9, 13, 14, 15]), day()).as_deref(),
            Some("Rain expected in morning and afternoon")
        );
        assert_eq!(
            analyze_rain(&series(&[19, 20]), day()).as_deref(),
            Some("Rain expected in evening")
        );
    }

    #[test]
    fn test_single_hour_and_range() {
        assert_eq!(
            analyze_rain(&series(&[15]), day()).as_deref(),
            Some("Rain expected around 3pm")
        );
        assert_eq!(
            analyze_rain(&series(&[11, 13]), day()).as_deref(),
            Some("Rain expected 11am-1pm")
        );
    }

    #[test]
    fn test_probability_alone_flags_hour() {
        let mut wet = series(&[]);
        wet.samples[12].precipitation_probability = 60.0;
        assert_eq!(
            analyze_rain(&wet, day()).as_deref(),
            Some("Rain expected around 12pm")
        );
    }

    #[test]
    fn test_format_hour() {
        assert_eq!(format_hour(0), "12am");
        assert_eq!(format_hour(9), "9am");
        assert_eq!(format_hour(12), "12pm");
        assert_eq!(format_hour(18), "6pm");
    }
}
