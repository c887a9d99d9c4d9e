use utoipa::OpenApi;
use crate::controllers::{dataset_controller, location_controller};
use crate::models::{dashboard, location};

#[derive(OpenApi)]
#[openapi(
    paths(
        location_controller::list_locations,
        location_controller::get_location,
        location_controller::get_monthly,
        location_controller::get_recommendation,
        location_controller::get_live,
        location_controller::get_state_distribution,
        location_controller::list_saved,
        location_controller::save_location,
        location_controller::delete_saved,
        dataset_controller::import_data,
        dataset_controller::export_data,
        dataset_controller::get_sample_csv,
        dataset_controller::analyze_data
    ),
    components(
        schemas(
            location::LocationRecord,
            location::MonthlyEntry,
            location::HourlyEntry,
            location::PotentialEstimate,
            location::TemperatureEstimate,
            location::TemperatureBand,
            location::ScoreLabel,
            location::RadiationCategory,
            location::NewLocation,
            location::PotentialTier,
            location::InstallationType,
            location::Recommendation,
            dashboard::LiveSnapshot,
            dashboard::StateCapacity,
            dashboard::StateCount,
            dashboard::Averages,
            dashboard::IrradianceComparison,
            dashboard::OverallScore,
            dashboard::DatasetAnalysis,
            dashboard::DataFormat,
            dashboard::ImportResponse,
            dashboard::ErrorBody
        )
    ),
    tags(
        (name = "solar-potential-api", description = "Solar potential metrics for Indian locations")
    )
)]
pub struct ApiDoc;
