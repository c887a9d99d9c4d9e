use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ─── Location record ─────────────────────────────────────────────────────────

/// A location with its raw irradiance inputs and the metrics derived from them.
///
/// Derived fields are optional: `None` means "not derived yet", so a
/// precomputed value (including a legitimate zero score) is never mistaken
/// for an absent one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LocationRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub state: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,

    // ── Position (decimal degrees) ──────────────────────────────────────────
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,

    // ── Raw irradiance (kWh/m²/day) ─────────────────────────────────────────
    /// Global Horizontal Irradiance
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ghi: Option<f64>,
    /// Direct Normal Irradiance
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dni: Option<f64>,

    // ── Derived ─────────────────────────────────────────────────────────────
    /// Suitability score 0..=100
    #[serde(rename = "solarScore", default, skip_serializing_if = "Option::is_none")]
    pub solar_score: Option<u8>,
    #[serde(rename = "capacityMW", default, skip_serializing_if = "Option::is_none")]
    pub capacity_mw: Option<u32>,
    #[serde(rename = "generationMWh", default, skip_serializing_if = "Option::is_none")]
    pub generation_mwh: Option<u64>,
    #[serde(rename = "monthlyData", default, skip_serializing_if = "Option::is_none")]
    pub monthly_data: Option<Vec<MonthlyEntry>>,

    /// Trailing 12-hour synthetic window. Transient, never persisted.
    #[serde(rename = "hourlyData", default, skip_serializing_if = "Option::is_none")]
    pub hourly_data: Option<Vec<HourlyEntry>>,
}

impl LocationRecord {
    /// Copy of the record without transient fields, suitable for storage.
    pub fn persistable(&self) -> Self {
        Self {
            hourly_data: None,
            ..self.clone()
        }
    }
}

/// One calendar month of the seasonal projection (kWh/m²/day).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MonthlyEntry {
    pub month: String,
    pub ghi: f64,
    pub dni: f64,
}

/// One hour of the synthetic irradiance curve (W/m²).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HourlyEntry {
    /// "HH:00"
    pub time: String,
    pub ghi: u32,
    pub dni: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PotentialEstimate {
    #[serde(rename = "capacityMW")]
    pub capacity_mw: u32,
    #[serde(rename = "generationMWh")]
    pub generation_mwh: u64,
}

// ─── Temperature ─────────────────────────────────────────────────────────────

/// Qualitative temperature bands, coldest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
pub enum TemperatureBand {
    #[serde(rename = "Very Cold")]
    VeryCold,
    Cold,
    Cool,
    Moderate,
    Warm,
    Hot,
    #[serde(rename = "Very Hot")]
    VeryHot,
    #[serde(rename = "Extremely Hot")]
    ExtremelyHot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TemperatureEstimate {
    /// °C
    pub temperature: i32,
    /// °C, humidity-adjusted
    pub feels_like: i32,
    pub description: TemperatureBand,
}

// ─── Qualitative labels ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum ScoreLabel {
    Excellent,
    #[serde(rename = "Very Good")]
    VeryGood,
    Good,
    Moderate,
    Fair,
    Poor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum RadiationCategory {
    Excellent,
    Good,
    Moderate,
    Poor,
    #[serde(rename = "Very Poor")]
    VeryPoor,
}

// ─── Installation recommendation ─────────────────────────────────────────────

/// How strongly a site suits solar development.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum PotentialTier {
    Excellent,
    #[serde(rename = "Very Good")]
    VeryGood,
    Good,
    Moderate,
    Limited,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum InstallationType {
    Utility,
    Commercial,
    Residential,
    SmallCommercial,
}

/// Score-driven advice for one location.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub location_id: String,
    pub solar_score: u8,
    pub potential: PotentialTier,
    pub assessment: String,
    /// Most suitable first
    pub installation_types: Vec<InstallationType>,
    pub system_advice: String,
}

// ─── Form entry ──────────────────────────────────────────────────────────────

/// A user-entered location, before validation and derivation.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewLocation {
    pub name: String,
    pub state: String,
    #[serde(default)]
    pub district: Option<String>,
    pub ghi: f64,
    pub dni: f64,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names_match_dashboard_format() {
        let record = LocationRecord {
            id: "x".into(),
            ghi: Some(5.0),
            solar_score: Some(0),
            capacity_mw: Some(12),
            generation_mwh: Some(34),
            ..Default::default()
        };
        let v = serde_json::to_value(&record).unwrap();
        assert_eq!(v["solarScore"], 0);
        assert_eq!(v["capacityMW"], 12);
        assert_eq!(v["generationMWh"], 34);
        assert!(v.get("monthlyData").is_none());
        assert!(v.get("dni").is_none());
    }

    #[test]
    fn test_persistable_drops_hourly_window() {
        let record = LocationRecord {
            id: "x".into(),
            hourly_data: Some(vec![HourlyEntry { time: "12:00".into(), ghi: 1, dni: 1 }]),
            ..Default::default()
        };
        assert!(record.persistable().hourly_data.is_none());
    }

    #[test]
    fn test_band_labels() {
        assert_eq!(serde_json::to_value(TemperatureBand::VeryCold).unwrap(), "Very Cold");
        assert_eq!(serde_json::to_value(TemperatureBand::ExtremelyHot).unwrap(), "Extremely Hot");
        assert!(TemperatureBand::Cold < TemperatureBand::Hot);
    }
}
