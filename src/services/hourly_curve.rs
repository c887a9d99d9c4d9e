/// ============================================================
///  Synthetic hourly irradiance curve
///
///  Turns daily GHI/DNI totals into a trailing 12-hour window of
///  instantaneous W/m² values:
///   1. Peak estimate  – daily total scaled by the peak-hour share
///   2. Diurnal shape  – cos² bell centred on solar noon, zero
///                       outside 06:00–18:00
///   3. Cloud noise    – multiplicative per-hour factor drawn from
///                       an injected `NoiseSource`
/// ============================================================

use std::f64::consts::PI;

use rand::Rng;

use crate::models::location::HourlyEntry;

/// Fallbacks when a record carries no usable irradiance (kWh/m²/day).
pub const DEFAULT_GHI: f64 = 5.5;
pub const DEFAULT_DNI: f64 = 6.0;

/// Fraction of daily insolation concentrated in the peak hour; the
/// daily total is divided by it to reach the instantaneous peak.
pub const PEAK_HOUR_FRACTION: f64 = 0.15;
/// Half-width of the daylight window around noon (hours).
const DAYLIGHT_HALF_WIDTH: f64 = 6.0;
const DNI_HOURLY_RATIO: f64 = 0.95;
pub const DEFAULT_NOISE_AMPLITUDE: f64 = 0.15;
const WINDOW_HOURS: i32 = 12;

// ─── Noise sources ───────────────────────────────────────────

/// Supplies the per-hour cloud variability factor.
pub trait NoiseSource {
    fn next_factor(&mut self) -> f64;
}

/// Constant factor, `FixedNoise(1.0)` disables noise entirely.
#[derive(Debug, Clone, Copy)]
pub struct FixedNoise(pub f64);

impl NoiseSource for FixedNoise {
    fn next_factor(&mut self) -> f64 {
        self.0
    }
}

/// Uniform factor in `[1 - amplitude, 1 + amplitude]`.
#[derive(Debug)]
pub struct UniformNoise<R> {
    rng: R,
    amplitude: f64,
}

impl<R: Rng> UniformNoise<R> {
    pub fn new(rng: R, amplitude: f64) -> Self {
        Self { rng, amplitude: amplitude.clamp(0.0, 1.0) }
    }
}

impl<R: Rng> NoiseSource for UniformNoise<R> {
    fn next_factor(&mut self) -> f64 {
        if self.amplitude == 0.0 {
            return 1.0;
        }
        self.rng.gen_range(1.0 - self.amplitude..=1.0 + self.amplitude)
    }
}

// ─── Curve ───────────────────────────────────────────────────

/// Instantaneous peak for a daily total (kWh/m²/day).
pub fn peak_irradiance(daily_kwh_m2: f64) -> f64 {
    ((daily_kwh_m2.max(0.0) / PEAK_HOUR_FRACTION) * 1000.0).round()
}

/// Bell-shaped share of the peak reaching the ground at `hour`.
pub fn radiation_factor(hour: u32) -> f64 {
    let distance_from_noon = (f64::from(hour) - 12.0).abs();
    if distance_from_noon <= DAYLIGHT_HALF_WIDTH {
        (distance_from_noon * PI / 12.0).cos().powi(2)
    } else {
        0.0
    }
}

fn usable(value: Option<f64>, fallback: f64) -> f64 {
    value
        .filter(|v| v.is_finite() && *v >= 0.0)
        .unwrap_or(fallback)
}

/// 12 hourly entries ending at `reference_hour` (0..=23), oldest first.
pub fn synthesize_hourly_curve(
    ghi: Option<f64>,
    dni: Option<f64>,
    reference_hour: u32,
    noise: &mut impl NoiseSource,
) -> Vec<HourlyEntry> {
    let peak_ghi = peak_irradiance(usable(ghi, DEFAULT_GHI));
    let peak_dni = peak_irradiance(usable(dni, DEFAULT_DNI));
    let reference_hour = (reference_hour % 24) as i32;

    (0..WINDOW_HOURS)
        .map(|i| {
            let hour = (reference_hour - (WINDOW_HOURS - 1) + i).rem_euclid(24) as u32;
            let shape = radiation_factor(hour);
            let cloud = noise.next_factor().max(0.0);

            HourlyEntry {
                time: format!("{:02}:00", hour),
                ghi: (peak_ghi * shape * cloud).round() as u32,
                dni: (peak_dni * shape * cloud * DNI_HOURLY_RATIO).round() as u32,
            }
        })
        .collect()
}
