//! Paragliding module
//!
//! This module provides the flyability scoring core:
//! - Thermodynamic estimators (cloud base, trigger temperature, usable ceiling)
//! - Thermal strength, flyability and XC classifiers
//! - Best launch hour search and rain annotation
//! - Day aggregation with model fallback
//! - The built-in launch site catalog and display helpers

pub mod flyability;
pub mod forecast;
pub mod launch_window;
pub mod rain;
pub mod sites;
pub mod summary;
pub mod thermal_strength;
pub mod thermodynamics;
pub mod xc;

// Re-export commonly used types from submodules
pub use flyability::{
    overall_flyability, soaring_flyability, thermal_flyability, DayConditions,
    OverallAssessment,
};
pub use forecast::{build_site_forecast, process_day, ForecastHorizon, Instability};
pub use launch_window::{best_launch_time, legacy_launch_time, select_best_launch_hour};
pub use rain::analyze_rain;
pub use sites::{find_site, launch_sites};
pub use summary::{rank_sites, weekly_score, DayColour, SoaringLabel};
pub use thermal_strength::{calculate_thermal_strength, StrengthInputs};
pub use thermodynamics::{calculate_lcl, calculate_top_of_usable_lift, LiftInputs};
pub use xc::{calculate_xc_potential, XcAssessment};
