//! Built-in launch site catalog

use crate::models::{LaunchSite, SiteType};

type SiteRow = (
    &'static str,
    &'static str,
    f64,
    (f64, f64),
    &'static str,
    f64,
    SiteType,
);

const CATALOG: &[SiteRow] = &[
    ("tollhouse", "Tollhouse", 4200.0, (37.0331, -119.3372), "SSE-WNW", 17.0, SiteType::Thermal),
    ("ed-levin", "Ed Levin", 1750.0, (37.4656, -121.8531), "S-NW", 20.0, SiteType::Mixed),
    ("mt-vaca", "Mt Vaca", 2800.0, (38.37, -122.02), "SW-W", 22.0, SiteType::Mixed),
    ("slide", "Slide Mountain", 9600.0, (39.29, -119.94), "W-NW", 25.0, SiteType::Thermal),
    ("whaleback", "Whaleback", 2400.0, (36.75, -121.8), "W-NW", 20.0, SiteType::Mixed),
    ("blue-rock", "Blue Rock", 3200.0, (37.25, -122.18), "W-NW", 18.0, SiteType::Mixed),
    ("mt-diablo", "Mt Diablo", 3849.0, (37.8814, -121.9142), "W-SW", 20.0, SiteType::Thermal),
    ("mission-peak", "Mission Peak", 2517.0, (37.5133, -121.8808), "W-NW", 22.0, SiteType::Mixed),
    ("potato-hill", "Potato Hill", 2200.0, (37.35, -121.75), "W-NW", 18.0, SiteType::Mixed),
    ("mt-tamalpais", "Mt Tamalpais", 2574.0, (37.9236, -122.5969), "W-SW", 25.0, SiteType::Soaring),
    ("dunlap", "Dunlap", 3200.0, (36.74, -119.1), "SW-W", 20.0, SiteType::Thermal),
    ("mcgee", "McGee", 8500.0, (37.58, -118.83), "E-SE", 22.0, SiteType::Thermal),
    ("mussel-rock", "Mussel Rock", 160.0, (37.66, -122.49), "W-NW", 25.0, SiteType::Soaring),
    ("ej-bowl", "EJ Bowl", 250.0, (34.4042, -119.7465), "W-NW", 22.0, SiteType::Soaring),
    ("big-sur", "Big Sur", 3240.0, (35.9703, -121.4511), "W-NW", 15.0, SiteType::Soaring),
    ("sand-city", "Sand City", 50.0, (36.6252, -121.8439), "W-NW", 18.0, SiteType::Soaring),
    ("goat-rock", "Goat Rock", 160.0, (38.4467, -123.1264), "W-NW", 18.0, SiteType::Soaring),
    ("channing-east", "Channing East", 200.0, (38.0686, -122.1472), "NE-SE", 12.0, SiteType::Mixed),
    ("paiute", "Paiute", 8000.0, (37.41, -118.27), "SW-NW", 15.0, SiteType::Thermal),
    ("flynns", "Flynns", 5600.0, (37.3884, -118.295), "W-NW", 15.0, SiteType::Thermal),
    ("vollmer-peak", "Vollmer Peak", 1905.0, (37.8838, -122.2204), "NE-SE", 18.0, SiteType::Mixed),
];

/// All catalog sites in display order
#[must_use]
pub fn launch_sites() -> Vec<LaunchSite> {
    CATALOG
        .iter()
        .map(|&(id, name, elevation, coordinates, orientation, max_wind, site_type)| {
            LaunchSite::new(id, name, elevation, coordinates, orientation, max_wind, site_type)
        })
        .collect()
}

/// Look a site up by its id
#[must_use]
pub fn find_site(id: &str) -> Option<LaunchSite> {
    launch_sites().into_iter().find(|site| site.id == id)
}
