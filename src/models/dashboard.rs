use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::location::{
    HourlyEntry, LocationRecord, RadiationCategory, ScoreLabel, TemperatureEstimate,
};

// ─── Live view ───────────────────────────────────────────────────────────────

/// Simulated "live" conditions for one location.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LiveSnapshot {
    pub timestamp: DateTime<Utc>,
    pub location_id: String,
    /// GHI of the most recent hour (W/m²)
    pub current_radiation: u32,
    pub radiation_category: RadiationCategory,
    pub weather: String,
    pub temperature: TemperatureEstimate,
    pub hourly_data: Vec<HourlyEntry>,
    /// Suggested polling interval for clients (seconds)
    pub refresh_interval_s: u64,
}

// ─── Aggregates ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct StateCapacity {
    pub name: String,
    /// Summed capacity (MW)
    pub value: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct StateCount {
    pub name: String,
    pub value: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Averages {
    pub avg_ghi: f64,
    pub avg_dni: f64,
    pub avg_score: u8,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct IrradianceComparison {
    pub name: String,
    pub ghi: f64,
    pub dni: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct OverallScore {
    pub score: u8,
    pub label: ScoreLabel,
}

/// Summary of an imported or posted dataset.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DatasetAnalysis {
    pub data_points: usize,
    pub averages: Averages,
    pub solar_score: OverallScore,
    pub state_distribution: Vec<StateCount>,
    pub comparison: Vec<IrradianceComparison>,
}

// ─── Request / response envelopes ────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DataFormat {
    #[default]
    Json,
    Csv,
}

#[derive(Debug, Deserialize)]
pub struct FormatQuery {
    #[serde(default)]
    pub format: DataFormat,
}

#[derive(Debug, Default, Deserialize)]
pub struct LocationQuery {
    pub q: Option<String>,
    pub state: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ImportResponse {
    pub imported: usize,
    pub records: Vec<LocationRecord>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}
