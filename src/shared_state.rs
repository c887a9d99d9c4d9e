use std::sync::{Arc, Mutex};

use axum::extract::FromRef;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::Config;
use crate::models::location::LocationRecord;
use crate::repository::LocationRepository;
use crate::services::deriver::{derive_record, with_hourly_curve};
use crate::services::hourly_curve::{FixedNoise, UniformNoise};

#[derive(Clone)]
pub struct AppState {
    /// Derived reference catalog, read-only after startup
    pub catalog: Arc<Vec<LocationRecord>>,
    /// User-saved locations
    pub saved: Arc<dyn LocationRepository>,
    /// Cloud-noise generator shared by all live requests
    rng: Arc<Mutex<StdRng>>,
    noise_amplitude: f64,
}

impl AppState {
    /// Derives every catalog record once; records that fail are logged and dropped.
    pub fn new(
        raw_catalog: Vec<LocationRecord>,
        saved: Arc<dyn LocationRepository>,
        seed: Option<u64>,
        noise_amplitude: f64,
    ) -> Self {
        let catalog: Vec<LocationRecord> = raw_catalog
            .into_iter()
            .filter_map(|record| {
                let id = record.id.clone();
                match derive_record(record) {
                    Ok(derived) => Some(derived),
                    Err(e) => {
                        tracing::warn!(%id, error = %e, "skipping catalog entry");
                        None
                    }
                }
            })
            .collect();

        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            catalog: Arc::new(catalog),
            saved,
            rng: Arc::new(Mutex::new(rng)),
            noise_amplitude,
        }
    }

    /// Catalog first, then saved locations.
    pub fn find_location(&self, id: &str) -> Option<LocationRecord> {
        if let Some(r) = self.catalog.iter().find(|r| r.id == id) {
            return Some(r.clone());
        }
        match self.saved.get(id) {
            Ok(found) => found,
            Err(e) => {
                tracing::error!(%id, error = %e, "saved-location lookup failed");
                None
            }
        }
    }

    /// Attaches a fresh noisy hourly window ending at `reference_hour`.
    pub fn with_live_curve(&self, record: LocationRecord, reference_hour: u32) -> LocationRecord {
        if self.noise_amplitude <= 0.0 {
            return with_hourly_curve(record, reference_hour, &mut FixedNoise(1.0));
        }
        // a poisoned lock only means another request panicked mid-draw
        let mut guard = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut noise = UniformNoise::new(&mut *guard, self.noise_amplitude);
        with_hourly_curve(record, reference_hour, &mut noise)
    }
}

/// Router state; handlers pick the piece they need via `FromRef`.
#[derive(Clone)]
pub struct SharedState {
    pub app: AppState,
    pub config: Config,
}

impl FromRef<SharedState> for AppState {
    fn from_ref(shared: &SharedState) -> Self {
        shared.app.clone()
    }
}

impl FromRef<SharedState> for Config {
    fn from_ref(shared: &SharedState) -> Self {
        shared.config.clone()
    }
}
