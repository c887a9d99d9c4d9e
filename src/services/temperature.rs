//! Ambient temperature heuristic.
//!
//! Stand-in for a real weather feed: the values come from a small table of
//! climate constants for the Indian subcontinent, nudged by the current
//! irradiance. They are plausible, not measured.

use crate::models::location::{TemperatureBand, TemperatureEstimate};

/// Used when a record carries no latitude.
pub const DEFAULT_LATITUDE: f64 = 20.0;

/// Irradiance treated as full sun (W/m²).
const FULL_SUN_W_M2: f64 = 1000.0;
const MAX_RADIATION_ADJUSTMENT: f64 = 8.0;
const NIGHT_ADJUSTMENT: f64 = -2.0;
/// Daytime irradiance below this reads as cloud cover.
const CLOUDY_BELOW_W_M2: f64 = 400.0;
const CLOUD_ADJUSTMENT: f64 = -3.0;
/// Southern / coastal humidity proxy.
const HUMID_BELOW_LATITUDE: f64 = 23.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ClimateZone {
    North,
    Central,
    South,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Season {
    /// Nov–Feb
    Winter,
    /// Apr–Jul
    Summer,
    Shoulder,
}

impl ClimateZone {
    fn from_latitude(latitude: f64) -> Self {
        if latitude > 28.0 {
            ClimateZone::North
        } else if latitude > 20.0 {
            ClimateZone::Central
        } else {
            ClimateZone::South
        }
    }
}

impl Season {
    /// `month_index` is 0-based (0 = January).
    fn from_month(month_index: u32) -> Self {
        match month_index % 12 {
            10 | 11 | 0 | 1 => Season::Winter,
            3..=6 => Season::Summer,
            _ => Season::Shoulder,
        }
    }
}

/// Base (day, night) temperatures in °C.
fn base_temperature(zone: ClimateZone, season: Season) -> (f64, f64) {
    match (zone, season) {
        (ClimateZone::North, Season::Winter) => (18.0, 12.0),
        (ClimateZone::North, Season::Summer) => (36.0, 28.0),
        (ClimateZone::North, Season::Shoulder) => (28.0, 22.0),
        (ClimateZone::Central, Season::Winter) => (24.0, 18.0),
        (ClimateZone::Central, Season::Summer) => (38.0, 30.0),
        (ClimateZone::Central, Season::Shoulder) => (32.0, 26.0),
        (ClimateZone::South, Season::Winter) => (28.0, 22.0),
        (ClimateZone::South, Season::Summer) => (34.0, 28.0),
        (ClimateZone::South, Season::Shoulder) => (30.0, 25.0),
    }
}

pub fn is_daytime(hour: u32) -> bool {
    (6..=18).contains(&(hour % 24))
}

/// Lower bounds are inclusive.
pub fn temperature_band(temperature: i32) -> TemperatureBand {
    match temperature {
        38..=i32::MAX => TemperatureBand::ExtremelyHot,
        35..=37 => TemperatureBand::VeryHot,
        30..=34 => TemperatureBand::Hot,
        25..=29 => TemperatureBand::Warm,
        20..=24 => TemperatureBand::Moderate,
        15..=19 => TemperatureBand::Cool,
        10..=14 => TemperatureBand::Cold,
        _ => TemperatureBand::VeryCold,
    }
}

/// Estimates air temperature for a site.
///
/// * `latitude`       – decimal degrees north
/// * `radiation_w_m2` – current GHI
/// * `month_index`    – 0 = January
/// * `hour`           – local hour of day, decides day vs. night constants
pub fn estimate_temperature(
    latitude: f64,
    radiation_w_m2: f64,
    month_index: u32,
    hour: u32,
) -> TemperatureEstimate {
    let latitude = if latitude.is_finite() { latitude } else { DEFAULT_LATITUDE };
    let radiation = if radiation_w_m2.is_finite() { radiation_w_m2.max(0.0) } else { 0.0 };
    let daytime = is_daytime(hour);

    let (day, night) = base_temperature(
        ClimateZone::from_latitude(latitude),
        Season::from_month(month_index),
    );

    let adjustment = if daytime {
        let sun = (radiation / FULL_SUN_W_M2).min(1.0) * MAX_RADIATION_ADJUSTMENT;
        let cloud = if radiation < CLOUDY_BELOW_W_M2 { CLOUD_ADJUSTMENT } else { 0.0 };
        day + sun + cloud
    } else {
        night + NIGHT_ADJUSTMENT
    };
    let temperature = adjustment.round() as i32;

    let humid = latitude < HUMID_BELOW_LATITUDE;
    let humidity = match temperature {
        t if t > 30 && humid => 3,
        t if t > 25 && humid => 2,
        t if t < 15 && !humid => -1,
        _ => 0,
    };

    TemperatureEstimate {
        temperature,
        feels_like: temperature + humidity,
        description: temperature_band(temperature),
    }
}
