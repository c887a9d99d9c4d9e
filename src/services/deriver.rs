//! Metric deriver: the single entry point that turns a raw location record
//! into a dashboard-ready one.
//!
//! Every derived field is filled only when absent. Presence is the cache
//! marker, so deriving an already-derived record is a no-op.

use uuid::Uuid;

use crate::error::DeriveError;
use crate::models::location::{LocationRecord, NewLocation};
use crate::services::hourly_curve::{NoiseSource, synthesize_hourly_curve};
use crate::services::solar_metrics::{
    compute_monthly_data, compute_solar_score, estimate_potential, validate_irradiance,
};

/// Runs `derive` and stores its value only if `slot` is empty.
pub fn derive_if_absent<T>(
    slot: &mut Option<T>,
    derive: impl FnOnce() -> Result<T, DeriveError>,
) -> Result<(), DeriveError> {
    if slot.is_none() {
        *slot = Some(derive()?);
    }
    Ok(())
}

fn require(value: Option<f64>, field: &'static str) -> Result<f64, DeriveError> {
    let value = value.ok_or(DeriveError::MissingField(field))?;
    validate_irradiance(field, value)
}

/// Fills `solarScore`, `monthlyData`, `capacityMW` and `generationMWh`
/// where they are missing. Raw inputs are only required for the fields
/// that actually need deriving.
pub fn derive_record(mut record: LocationRecord) -> Result<LocationRecord, DeriveError> {
    let (ghi, dni) = (record.ghi, record.dni);
    check_supplied_score(&record)?;

    derive_if_absent(&mut record.solar_score, || {
        compute_solar_score(require(ghi, "ghi")?, require(dni, "dni")?)
    })?;

    derive_if_absent(&mut record.monthly_data, || {
        Ok(compute_monthly_data(require(ghi, "ghi")?, require(dni, "dni")?))
    })?;

    if record.capacity_mw.is_none() || record.generation_mwh.is_none() {
        // score was filled above
        let score = record.solar_score.ok_or(DeriveError::MissingField("solarScore"))?;
        let potential = estimate_potential(require(ghi, "ghi")?, score)?;
        derive_if_absent(&mut record.capacity_mw, || Ok(potential.capacity_mw))?;
        derive_if_absent(&mut record.generation_mwh, || Ok(potential.generation_mwh))?;
    }

    Ok(record)
}

/// Derives only when both GHI and DNI are present. A record lacking either
/// is kept as supplied, after checking the values it does carry.
pub fn derive_when_complete(record: LocationRecord) -> Result<LocationRecord, DeriveError> {
    match (record.ghi, record.dni) {
        (Some(_), Some(_)) => derive_record(record),
        (ghi, dni) => {
            if let Some(value) = ghi {
                validate_irradiance("ghi", value)?;
            }
            if let Some(value) = dni {
                validate_irradiance("dni", value)?;
            }
            check_supplied_score(&record)?;
            Ok(record)
        }
    }
}

fn check_supplied_score(record: &LocationRecord) -> Result<(), DeriveError> {
    match record.solar_score {
        Some(score) if score > 100 => Err(DeriveError::InvalidInput {
            field: "solarScore",
            value: f64::from(score),
        }),
        _ => Ok(()),
    }
}

/// Attaches a fresh hourly window. Unlike the cached fields this is always
/// recomputed, since it tracks the clock.
pub fn with_hourly_curve(
    mut record: LocationRecord,
    reference_hour: u32,
    noise: &mut impl NoiseSource,
) -> LocationRecord {
    record.hourly_data = Some(synthesize_hourly_curve(
        record.ghi,
        record.dni,
        reference_hour,
        noise,
    ));
    record
}

/// Validates a form-entered location and derives all of its metrics.
pub fn create_location(input: NewLocation) -> Result<LocationRecord, DeriveError> {
    if input.name.trim().is_empty() {
        return Err(DeriveError::MissingField("name"));
    }
    if input.state.trim().is_empty() {
        return Err(DeriveError::MissingField("state"));
    }
    for (field, value) in [("ghi", input.ghi), ("dni", input.dni)] {
        if !(value.is_finite() && value > 0.0) {
            return Err(DeriveError::InvalidInput { field, value });
        }
    }

    let record = LocationRecord {
        id: format!("custom-{}", Uuid::new_v4()),
        name: input.name.trim().to_string(),
        state: input.state.trim().to_string(),
        district: input.district.filter(|d| !d.trim().is_empty()),
        latitude: input.latitude,
        longitude: input.longitude,
        ghi: Some(input.ghi),
        dni: Some(input.dni),
        ..Default::default()
    };
    derive_record(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::location::MonthlyEntry;
    use crate::services::hourly_curve::FixedNoise;

    fn raw(ghi: f64, dni: f64) -> LocationRecord {
        LocationRecord {
            id: "t-1".into(),
            name: "Test".into(),
            state: "Rajasthan".into(),
            ghi: Some(ghi),
            dni: Some(dni),
            ..Default::default()
        }
    }

    #[test]
    fn test_derives_all_fields() {
        let r = derive_record(raw(6.1, 6.8)).unwrap();
        assert_eq!(r.solar_score, Some(87));
        assert_eq!(r.capacity_mw, Some(1044));
        assert_eq!(r.monthly_data.as_ref().map(Vec::len), Some(12));
        assert!(r.generation_mwh.unwrap() > 0);
        assert!(r.hourly_data.is_none());
    }

    #[test]
    fn test_idempotent() {
        let once = derive_record(raw(5.3, 5.9)).unwrap();
        let twice = derive_record(once.clone()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_precomputed_fields_are_kept() {
        let mut r = raw(6.1, 6.8);
        r.solar_score = Some(88);
        r.capacity_mw = Some(5000);
        r.generation_mwh = Some(8_500_000);
        let monthly = vec![MonthlyEntry { month: "Jan".into(), ghi: 1.0, dni: 1.0 }];
        r.monthly_data = Some(monthly.clone());

        let d = derive_record(r).unwrap();
        assert_eq!(d.solar_score, Some(88));
        assert_eq!(d.capacity_mw, Some(5000));
        assert_eq!(d.generation_mwh, Some(8_500_000));
        assert_eq!(d.monthly_data, Some(monthly));
    }

    #[test]
    fn test_zero_score_is_not_absent() {
        let mut r = raw(6.5, 7.0);
        r.solar_score = Some(0);
        let d = derive_record(r).unwrap();
        assert_eq!(d.solar_score, Some(0));
        assert_eq!(d.capacity_mw, Some(0));
        assert_eq!(d.generation_mwh, Some(0));
    }

    #[test]
    fn test_partial_potential_fills_only_missing() {
        let mut r = raw(6.1, 6.8);
        r.solar_score = Some(88);
        r.capacity_mw = Some(42);
        let d = derive_record(r).unwrap();
        assert_eq!(d.capacity_mw, Some(42));
        // generation from the score-based estimate, not from the kept capacity
        assert_eq!(d.generation_mwh, Some(2_062_875));
    }

    #[test]
    fn test_missing_and_invalid_inputs() {
        let mut r = raw(5.0, 5.0);
        r.ghi = None;
        assert_eq!(derive_record(r), Err(DeriveError::MissingField("ghi")));

        assert!(matches!(
            derive_record(raw(-5.0, 6.0)),
            Err(DeriveError::InvalidInput { field: "ghi", .. })
        ));

        let mut over = raw(5.0, 5.0);
        over.solar_score = Some(150);
        assert!(derive_record(over).is_err());
    }

    #[test]
    fn test_fully_derived_record_needs_no_inputs() {
        let mut d = derive_record(raw(5.0, 5.5)).unwrap();
        d.ghi = None;
        d.dni = None;
        assert_eq!(derive_record(d.clone()), Ok(d));
    }

    #[test]
    fn test_incomplete_record_kept_underived() {
        let mut r = raw(5.0, 5.0);
        r.dni = None;
        let kept = derive_when_complete(r.clone()).unwrap();
        assert_eq!(kept, r);
        assert!(kept.solar_score.is_none());

        let mut bad = raw(-1.0, 5.0);
        bad.dni = None;
        assert!(matches!(
            derive_when_complete(bad),
            Err(DeriveError::InvalidInput { field: "ghi", .. })
        ));

        let complete = derive_when_complete(raw(6.1, 6.8)).unwrap();
        assert_eq!(complete.solar_score, Some(87));
    }

    #[test]
    fn test_hourly_curve_attached() {
        let r = with_hourly_curve(raw(6.0, 6.8), 12, &mut FixedNoise(1.0));
        let hourly = r.hourly_data.unwrap();
        assert_eq!(hourly.len(), 12);
        assert_eq!(hourly[11].ghi, 40_000);
    }

    #[test]
    fn test_derive_if_absent_skips_closure() {
        let mut slot = Some(1);
        derive_if_absent(&mut slot, || panic!("must not run")).unwrap();
        assert_eq!(slot, Some(1));

        let mut empty: Option<u8> = None;
        derive_if_absent(&mut empty, || Ok(7)).unwrap();
        assert_eq!(empty, Some(7));
    }

    #[test]
    fn test_create_location() {
        let r = create_location(NewLocation {
            name: " Jaipur ".into(),
            state: "Rajasthan".into(),
            district: Some("".into()),
            ghi: 6.2,
            dni: 6.5,
            latitude: Some(26.91),
            longitude: Some(75.78),
        })
        .unwrap();
        assert!(r.id.starts_with("custom-"));
        assert_eq!(r.name, "Jaipur");
        assert!(r.district.is_none());
        assert_eq!(r.solar_score, Some(85));
        assert!(r.monthly_data.is_some());
    }

    #[test]
    fn test_create_location_validation() {
        let base = NewLocation {
            name: "X".into(),
            state: "Y".into(),
            district: None,
            ghi: 5.0,
            dni: 5.0,
            latitude: None,
            longitude: None,
        };
        let mut no_state = base.clone();
        no_state.state = "  ".into();
        assert_eq!(create_location(no_state), Err(DeriveError::MissingField("state")));

        let mut zero = base;
        zero.dni = 0.0;
        assert!(matches!(
            create_location(zero),
            Err(DeriveError::InvalidInput { field: "dni", .. })
        ));
    }
}
