/// ============================================================
///  Solar suitability metrics
///
///   1. Score normalisation  – GHI/DNI → 0..100 composite score
///   2. Seasonal projection  – annual means → 12 monthly values
///   3. Potential estimate   – score + GHI → capacity (MW) and
///                             annual generation (MWh)
///   4. Qualitative labels   – score label, radiation category,
///                             weather wording
///   5. Recommendation       – potential tier and suitable
///                             installation types per score
///
///  All functions are pure and deterministic.
/// ============================================================

use crate::error::DeriveError;
use crate::models::location::{
    InstallationType, MonthlyEntry, PotentialEstimate, PotentialTier, RadiationCategory,
    Recommendation, ScoreLabel,
};

// ─── Operating ranges (kWh/m²/day) ───────────────────────────
const GHI_RANGE: (f64, f64) = (4.0, 6.5);
const DNI_RANGE: (f64, f64) = (4.5, 7.0);
const GHI_WEIGHT: f64 = 0.6;
const DNI_WEIGHT: f64 = 0.4;

// ─── Potential model ─────────────────────────────────────────
const HOURS_PER_YEAR: f64 = 8760.0;
/// MW of installable capacity at a perfect score
const REFERENCE_CAPACITY_MW: f64 = 1000.0;
const CAPACITY_SCALE: f64 = 1.2;
const CAPACITY_FACTOR_BAND: (f64, f64) = (0.05, 0.35);

pub const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Northern-hemisphere curve with monsoon damping, Jan-indexed.
pub const SEASONAL_FACTORS: [f64; 12] = [0.7, 0.8, 0.9, 1.1, 1.2, 1.1, 0.9, 0.8, 0.9, 0.8, 0.7, 0.6];

/// Rejects NaN, infinities and negatives.
pub fn validate_irradiance(field: &'static str, value: f64) -> Result<f64, DeriveError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(DeriveError::InvalidInput { field, value })
    }
}

#[inline]
fn normalize(value: f64, (low, high): (f64, f64)) -> f64 {
    ((value - low) / (high - low)).clamp(0.0, 1.0)
}

#[inline]
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Composite suitability score in 0..=100.
pub fn compute_solar_score(ghi: f64, dni: f64) -> Result<u8, DeriveError> {
    let ghi = validate_irradiance("ghi", ghi)?;
    let dni = validate_irradiance("dni", dni)?;

    let combined = GHI_WEIGHT * normalize(ghi, GHI_RANGE) + DNI_WEIGHT * normalize(dni, DNI_RANGE);
    // combined ∈ [0, 1] so the cast cannot truncate
    Ok((combined * 100.0).round() as u8)
}

/// Applies the seasonal factor table to both irradiance components.
pub fn compute_monthly_data(ghi: f64, dni: f64) -> Vec<MonthlyEntry> {
    MONTHS
        .iter()
        .zip(SEASONAL_FACTORS.iter())
        .map(|(month, factor)| MonthlyEntry {
            month: (*month).to_string(),
            ghi: round2(ghi * factor),
            dni: round2(dni * factor),
        })
        .collect()
}

/// Annual capacity factor for a site, clamped to a plausible band.
pub fn capacity_factor(ghi: f64) -> f64 {
    (0.16 + (ghi - 4.0) * 0.03).clamp(CAPACITY_FACTOR_BAND.0, CAPACITY_FACTOR_BAND.1)
}

pub fn estimate_potential(ghi: f64, solar_score: u8) -> Result<PotentialEstimate, DeriveError> {
    let ghi = validate_irradiance("ghi", ghi)?;
    if solar_score > 100 {
        return Err(DeriveError::InvalidInput {
            field: "solarScore",
            value: f64::from(solar_score),
        });
    }

    let capacity_mw =
        (REFERENCE_CAPACITY_MW * (f64::from(solar_score) / 100.0) * CAPACITY_SCALE).round() as u32;
    let generation_mwh =
        (f64::from(capacity_mw) * HOURS_PER_YEAR * capacity_factor(ghi)).round() as u64;

    Ok(PotentialEstimate { capacity_mw, generation_mwh })
}

// ─── Qualitative labels ──────────────────────────────────────

pub fn score_label(score: u8) -> ScoreLabel {
    match score {
        81..=u8::MAX => ScoreLabel::Excellent,
        71..=80 => ScoreLabel::VeryGood,
        61..=70 => ScoreLabel::Good,
        51..=60 => ScoreLabel::Moderate,
        41..=50 => ScoreLabel::Fair,
        _ => ScoreLabel::Poor,
    }
}

/// Category of an instantaneous irradiance reading (W/m²).
pub fn radiation_category(radiation_w_m2: f64) -> RadiationCategory {
    if radiation_w_m2 > 800.0 {
        RadiationCategory::Excellent
    } else if radiation_w_m2 > 600.0 {
        RadiationCategory::Good
    } else if radiation_w_m2 > 400.0 {
        RadiationCategory::Moderate
    } else if radiation_w_m2 > 200.0 {
        RadiationCategory::Poor
    } else {
        RadiationCategory::VeryPoor
    }
}

pub fn weather_description(radiation_w_m2: f64) -> &'static str {
    if radiation_w_m2 > 700.0 {
        "Sunny, clear skies"
    } else if radiation_w_m2 > 500.0 {
        "Partly cloudy"
    } else if radiation_w_m2 > 300.0 {
        "Mostly cloudy"
    } else {
        "Overcast conditions"
    }
}

// ─── Installation recommendation ─────────────────────────────

pub fn potential_tier(score: u8) -> PotentialTier {
    match score {
        81..=u8::MAX => PotentialTier::Excellent,
        71..=80 => PotentialTier::VeryGood,
        61..=70 => PotentialTier::Good,
        51..=60 => PotentialTier::Moderate,
        _ => PotentialTier::Limited,
    }
}

/// Installation types in order of suitability.
pub fn installation_types(score: u8) -> Vec<InstallationType> {
    use InstallationType::*;
    match score {
        71..=u8::MAX => vec![Utility, Commercial, Residential],
        61..=70 => vec![Commercial, Residential, Utility],
        _ => vec![Residential, SmallCommercial],
    }
}

fn assessment(name: &str, tier: PotentialTier) -> String {
    let text = match tier {
        PotentialTier::Excellent => {
            "has excellent solar potential and ranks among the best sites in India; solar projects are highly recommended"
        }
        PotentialTier::VeryGood => {
            "has very good solar potential and suits both utility-scale and rooftop installations"
        }
        PotentialTier::Good => {
            "has good solar potential and suits most applications with proper planning"
        }
        PotentialTier::Moderate => {
            "has moderate solar potential; installations are viable with careful planning and higher-efficiency panels"
        }
        PotentialTier::Limited => {
            "has limited solar potential; a detailed feasibility study is needed and payback periods will be longer"
        }
    };
    format!("{} {}.", name, text)
}

fn system_advice(score: u8) -> &'static str {
    match score {
        71..=u8::MAX => "Utility-scale, commercial and residential installations are all highly viable.",
        61..=70 => "Commercial and residential installations recommended; utility-scale only in select areas.",
        _ => "Mainly residential and small commercial installations, with careful site selection.",
    }
}

pub fn installation_recommendation(location_id: &str, name: &str, score: u8) -> Recommendation {
    let potential = potential_tier(score);
    Recommendation {
        location_id: location_id.to_string(),
        solar_score: score,
        potential,
        assessment: assessment(name, potential),
        installation_types: installation_types(score),
        system_advice: system_advice(score).to_string(),
    }
}
