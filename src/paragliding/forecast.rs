//! Day aggregation and source selection
//!
//! Turns raw hourly series into seven `DayForecast` records per site. The
//! first days come from the high resolution model when it covers them, the
//! rest from the low resolution model, and days neither covers become the
//! "no data" record.

use crate::models::forecast::DEFAULT_LAUNCH_TIME;
use crate::models::{
    DayForecast, ForecastModel, HourlyDataPoint, HourlySeries, LaunchSite, RawHourlySample,
    SiteForecast,
};
use crate::paragliding::flyability::{
    overall_flyability, soaring_flyability, thermal_flyability, DayConditions,
};
use crate::paragliding::launch_window::{format_launch_hour, select_best_launch_hour};
use crate::paragliding::rain::analyze_rain;
use crate::paragliding::thermal_strength::{calculate_thermal_strength, StrengthInputs};
use crate::paragliding::thermodynamics::{
    calculate_lcl, calculate_top_of_usable_lift, LiftInputs,
};
use crate::paragliding::xc::calculate_xc_potential;
use crate::units::wind_direction_matches;
use chrono::{Days, NaiveDate};
use std::ops::RangeInclusive;
use tracing::{debug, instrument, warn};

/// Hours searched for the representative midday sample
pub const NOON_HOURS: RangeInclusive<u32> = 10..=14;

/// Hours included in the per-day hourly breakdown
pub const HOURLY_HOURS: RangeInclusive<u32> = 6..=18;

/// Instability fields available for a day, depending on the model
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Instability {
    HighRes {
        cape: f64,
        lifted_index: f64,
        bl_depth: Option<f64>,
    },
    LowRes,
}

impl Instability {
    /// Read the instability fields of a sample. Missing values count as 0,
    /// a zero boundary layer counts as absent.
    #[must_use]
    pub fn from_sample(model: ForecastModel, sample: &RawHourlySample) -> Self {
        match model {
            ForecastModel::HighRes => Instability::HighRes {
                cape: sample.cape.unwrap_or(0.0),
                lifted_index: sample.lifted_index.unwrap_or(0.0),
                bl_depth: sample.boundary_layer_height.filter(|h| *h > 0.0),
            },
            ForecastModel::LowRes => Instability::LowRes,
        }
    }

    #[must_use]
    pub fn cape(&self) -> f64 {
        match self {
            Instability::HighRes { cape, .. } => *cape,
            Instability::LowRes => 0.0,
        }
    }

    #[must_use]
    pub fn lifted_index(&self) -> f64 {
        match self {
            Instability::HighRes { lifted_index, .. } => *lifted_index,
            Instability::LowRes => 0.0,
        }
    }

    #[must_use]
    pub fn bl_depth(&self) -> Option<f64> {
        match self {
            Instability::HighRes { bl_depth, .. } => *bl_depth,
            Instability::LowRes => None,
        }
    }
}

/// How many days to build and how many of them prefer the high resolution model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForecastHorizon {
    pub days: usize,
    pub high_res_days: usize,
}

impl Default for ForecastHorizon {
    fn default() -> Self {
        Self {
            days: 7,
            high_res_days: 2,
        }
    }
}

/// Hourly breakdown for one local date with per-hour trigger temperature
#[must_use]
pub fn extract_hourly_data(
    site: &LaunchSite,
    series: &HourlySeries,
    date: NaiveDate,
) -> Vec<HourlyDataPoint> {
    series
        .samples_on(date, HOURLY_HOURS)
        .map(|sample| HourlyDataPoint {
            hour: sample.hour(),
            temperature: sample.temperature.round(),
            tcon: calculate_lcl(sample.temperature, sample.dew_point, site.elevation).tcon,
            wind_speed: sample.wind_speed.round(),
            wind_direction: sample.wind_direction,
            wind_gust: sample.wind_gust.round(),
            cloud_cover: sample.cloud_cover.round(),
        })
        .collect()
}

/// Sample closest to noon between 10:00 and 14:00, first one on ties
fn noon_sample(series: &HourlySeries, date: NaiveDate) -> Option<&RawHourlySample> {
    series
        .samples_on(date, NOON_HOURS)
        .fold(None, |closest: Option<&RawHourlySample>, sample| match closest {
            Some(current) if current.hour().abs_diff(12) <= sample.hour().abs_diff(12) => {
                Some(current)
            }
            _ => Some(sample),
        })
}

/// Derived metrics for one site and date from one series.
///
/// Returns `None` when the series has no midday sample for the date.
#[must_use]
pub fn process_day(
    site: &LaunchSite,
    series: &HourlySeries,
    date: NaiveDate,
) -> Option<DayForecast> {
    let noon = noon_sample(series, date)?;
    let instability = Instability::from_sample(series.model, noon);
    let hourly_data = extract_hourly_data(site, series, date);

    let dew_point = noon.dew_point;
    let mut temperature = noon.temperature;
    let mut wind_speed = noon.wind_speed.round();
    let mut wind_gust = noon.wind_gust.round();
    let mut wind_direction = noon.wind_direction;
    let mut cloud_cover = noon.cloud_cover;

    let best_hour = select_best_launch_hour(site, &hourly_data).map(|best| best.point.hour);
    let best_sample =
        best_hour.and_then(|hour| series.samples_on(date, hour..=hour).next());

    if let Some(best) = best_sample {
        debug!(site = %site.id, %date, hour = best.hour(), "using best launch hour values");
        temperature = best.temperature;
        wind_speed = best.wind_speed.round();
        wind_gust = best.wind_gust.round();
        wind_direction = best.wind_direction;
        cloud_cover = best.cloud_cover;
    }

    let level = calculate_lcl(temperature, dew_point, site.elevation);
    let thermal_strength = calculate_thermal_strength(&StrengthInputs {
        temperature,
        dew_point,
        wind_speed,
        elevation: site.elevation,
        cape: instability.cape(),
        lifted_index: instability.lifted_index(),
        bl_depth: instability.bl_depth(),
    });
    let top_of_lift = calculate_top_of_usable_lift(&LiftInputs {
        lcl_msl: level.lcl_msl,
        thermal_strength,
        wind_speed,
        elevation: site.elevation,
        cape: instability.cape(),
        lifted_index: instability.lifted_index(),
        boundary_layer_height: instability.bl_depth(),
        temperature,
        dew_point,
    });

    let wind_direction_match = wind_direction_matches(wind_direction, &site.orientation);
    let conditions = DayConditions {
        site,
        temperature,
        tcon: level.tcon,
        wind_speed,
        wind_gust,
        thermal_strength,
        top_of_lift,
        wind_direction_match,
        cloud_cover,
        cape: instability.cape(),
        lifted_index: instability.lifted_index(),
    };

    let soaring = soaring_flyability(site, wind_speed, wind_gust, wind_direction_match);
    let thermal = thermal_flyability(&conditions);
    let overall = overall_flyability(&conditions);
    let xc = calculate_xc_potential(top_of_lift, thermal_strength, wind_speed, site);

    let launch_time =
        best_hour.map_or_else(|| DEFAULT_LAUNCH_TIME.to_string(), format_launch_hour);

    Some(DayForecast {
        date,
        source: Some(series.model),
        wind_speed,
        wind_direction,
        wind_gust,
        temperature: temperature.round(),
        dew_point: dew_point.round(),
        tcon: level.tcon,
        cloud_base: level.lcl_msl.round(),
        thermal_strength,
        top_of_lift: top_of_lift.round(),
        flyability: overall.flyability,
        conditions: overall.conditions,
        soaring_flyability: soaring,
        thermal_flyability: thermal,
        launch_time,
        xc_potential: xc.potential,
        xc_reason: xc.reason,
        hourly_data,
        bl_depth: instability.bl_depth(),
        cape: instability.cape().round(),
        lifted_index: (instability.lifted_index() * 10.0).round() / 10.0,
        relative_humidity: noon.relative_humidity.round(),
        cloud_cover: cloud_cover.round(),
        wind_direction_match,
        rain_info: analyze_rain(series, date),
    })
}

/// Full forecast for a site starting at `start`.
///
/// Always returns `horizon.days` records in date order; days no series covers
/// are filled with [`DayForecast::unavailable`].
#[instrument(skip_all, fields(site = %site.id, %start))]
pub fn build_site_forecast(
    site: &LaunchSite,
    high_res: Option<&HourlySeries>,
    low_res: Option<&HourlySeries>,
    start: NaiveDate,
    horizon: ForecastHorizon,
) -> SiteForecast {
    let forecast = (0..horizon.days)
        .map(|offset| {
            let date = start
                .checked_add_days(Days::new(offset as u64))
                .unwrap_or(start);

            let primary = high_res
                .filter(|_| offset < horizon.high_res_days)
                .and_then(|series| process_day(site, series, date));

            primary
                .or_else(|| low_res.and_then(|series| process_day(site, series, date)))
                .unwrap_or_else(|| {
                    warn!(%date, "no forecast data for day");
                    DayForecast::unavailable(site, date)
                })
        })
        .collect();

    SiteForecast {
        site: site.clone(),
        forecast,
    }
}
