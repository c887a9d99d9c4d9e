//! Dataset-level aggregates for the dashboard charts and analysis panel.

use std::collections::HashMap;

use crate::models::dashboard::{
    Averages, DatasetAnalysis, IrradianceComparison, OverallScore, StateCapacity, StateCount,
};
use crate::models::location::{LocationRecord, ScoreLabel};
use crate::services::solar_metrics::score_label;

const TOP_STATES: usize = 10;
const COMPARISON_SIZE: usize = 8;

/// States ranked by summed capacity, top ten.
pub fn state_capacity_distribution(records: &[LocationRecord]) -> Vec<StateCapacity> {
    let mut totals: HashMap<&str, u64> = HashMap::new();
    for r in records {
        *totals.entry(r.state.as_str()).or_default() += u64::from(r.capacity_mw.unwrap_or(0));
    }

    let mut distribution: Vec<StateCapacity> = totals
        .into_iter()
        .map(|(name, value)| StateCapacity { name: name.to_string(), value })
        .collect();
    // name as tie-break keeps the output stable across HashMap orderings
    distribution.sort_by(|a, b| b.value.cmp(&a.value).then_with(|| a.name.cmp(&b.name)));
    distribution.truncate(TOP_STATES);
    distribution
}

pub fn state_counts(records: &[LocationRecord]) -> Vec<StateCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for r in records.iter().filter(|r| !r.state.is_empty()) {
        *counts.entry(r.state.as_str()).or_default() += 1;
    }

    let mut out: Vec<StateCount> = counts
        .into_iter()
        .map(|(name, value)| StateCount { name: name.to_string(), value })
        .collect();
    out.sort_by(|a, b| b.value.cmp(&a.value).then_with(|| a.name.cmp(&b.name)));
    out
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Averages over records that carry both GHI and DNI.
pub fn averages(records: &[LocationRecord]) -> Averages {
    let (mut ghi_sum, mut dni_sum, mut score_sum, mut count) = (0.0, 0.0, 0.0, 0usize);
    for r in records {
        if let (Some(ghi), Some(dni)) = (r.ghi, r.dni) {
            ghi_sum += ghi;
            dni_sum += dni;
            score_sum += r.solar_score.map(f64::from).unwrap_or(0.0);
            count += 1;
        }
    }

    if count == 0 {
        return Averages { avg_ghi: 0.0, avg_dni: 0.0, avg_score: 0, count: 0 };
    }
    let n = count as f64;
    Averages {
        avg_ghi: round2(ghi_sum / n),
        avg_dni: round2(dni_sum / n),
        avg_score: (score_sum / n).round().clamp(0.0, 100.0) as u8,
        count,
    }
}

/// Coarse score from average irradiance, used when no record has a score.
fn fallback_score(avg_ghi: f64, avg_dni: f64) -> OverallScore {
    const TIERS: [(f64, f64, u8, ScoreLabel); 5] = [
        (5.5, 6.0, 85, ScoreLabel::Excellent),
        (5.0, 5.5, 75, ScoreLabel::VeryGood),
        (4.5, 5.0, 65, ScoreLabel::Good),
        (4.0, 4.5, 55, ScoreLabel::Moderate),
        (3.5, 4.0, 45, ScoreLabel::Fair),
    ];
    TIERS
        .iter()
        .find(|(ghi, dni, _, _)| avg_ghi > *ghi && avg_dni > *dni)
        .map(|&(_, _, score, label)| OverallScore { score, label })
        .unwrap_or(OverallScore { score: 35, label: ScoreLabel::Poor })
}

pub fn analyze(records: &[LocationRecord]) -> DatasetAnalysis {
    let averages = averages(records);
    let solar_score = if averages.avg_score > 0 {
        OverallScore { score: averages.avg_score, label: score_label(averages.avg_score) }
    } else {
        fallback_score(averages.avg_ghi, averages.avg_dni)
    };

    let comparison = records
        .iter()
        .take(COMPARISON_SIZE)
        .map(|r| IrradianceComparison {
            name: if r.name.is_empty() { "Unknown".to_string() } else { r.name.clone() },
            ghi: r.ghi.unwrap_or(0.0),
            dni: r.dni.unwrap_or(0.0),
        })
        .collect();

    DatasetAnalysis {
        data_points: records.len(),
        averages,
        solar_score,
        state_distribution: state_counts(records),
        comparison,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(state: &str, ghi: f64, dni: f64, score: Option<u8>, capacity: Option<u32>) -> LocationRecord {
        LocationRecord {
            name: format!("{}-{}", state, ghi),
            state: state.into(),
            ghi: Some(ghi),
            dni: Some(dni),
            solar_score: score,
            capacity_mw: capacity,
            ..Default::default()
        }
    }

    #[test]
    fn test_capacity_distribution_top_ten() {
        let mut records: Vec<LocationRecord> = (0..12)
            .map(|i| loc(&format!("S{:02}", i), 5.0, 5.0, None, Some(100 * (i + 1))))
            .collect();
        records.push(loc("S00", 5.0, 5.0, None, Some(5000)));
        records.push(loc("S01", 5.0, 5.0, None, None));

        let d = state_capacity_distribution(&records);
        assert_eq!(d.len(), 10);
        assert_eq!(d[0], StateCapacity { name: "S00".into(), value: 5100 });
        assert_eq!(d[1].name, "S11");
        assert!(d.windows(2).all(|w| w[0].value >= w[1].value));
        assert!(!d.iter().any(|s| s.name == "S01"));
    }

    #[test]
    fn test_averages_skip_incomplete() {
        let mut partial = loc("X", 9.0, 9.0, Some(100), None);
        partial.dni = None;
        let records = vec![
            loc("A", 5.0, 6.0, Some(70), None),
            loc("A", 6.0, 7.0, Some(91), None),
            partial,
        ];
        let a = averages(&records);
        assert_eq!(a.count, 2);
        assert_eq!(a.avg_ghi, 5.5);
        assert_eq!(a.avg_dni, 6.5);
        assert_eq!(a.avg_score, 81);
    }

    #[test]
    fn test_analysis_uses_average_score() {
        let records = vec![loc("A", 5.0, 6.0, Some(70), None), loc("B", 6.0, 7.0, Some(91), None)];
        let analysis = analyze(&records);
        assert_eq!(analysis.data_points, 2);
        assert_eq!(analysis.solar_score, OverallScore { score: 81, label: ScoreLabel::Excellent });
        assert_eq!(analysis.state_distribution.len(), 2);
        assert_eq!(analysis.comparison.len(), 2);
    }

    #[test]
    fn test_analysis_fallback_without_scores() {
        let records = vec![loc("A", 5.2, 5.8, None, None)];
        assert_eq!(
            analyze(&records).solar_score,
            OverallScore { score: 75, label: ScoreLabel::VeryGood }
        );
        assert_eq!(analyze(&[]).solar_score.label, ScoreLabel::Poor);
    }

    #[test]
    fn test_state_counts_sorted() {
        let records = vec![
            loc("Gujarat", 5.0, 5.0, None, None),
            loc("Rajasthan", 5.0, 5.0, None, None),
            loc("Rajasthan", 5.0, 5.0, None, None),
            loc("", 5.0, 5.0, None, None),
        ];
        let counts = state_counts(&records);
        assert_eq!(counts[0], StateCount { name: "Rajasthan".into(), value: 2 });
        assert_eq!(counts.len(), 2);
    }

    #[test]
    fn test_comparison_limited_to_eight() {
        let records: Vec<LocationRecord> = (0..12).map(|i| loc("A", 5.0 + f64::from(i) / 10.0, 5.0, None, None)).collect();
        assert_eq!(analyze(&records).comparison.len(), 8);
    }
}
