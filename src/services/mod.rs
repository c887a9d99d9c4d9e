pub mod analysis;
pub mod deriver;
pub mod hourly_curve;
pub mod import_export;
pub mod solar_metrics;
pub mod temperature;
