use axum::{
    Json,
    extract::Query,
    http::header,
    response::IntoResponse,
};

use crate::data::india_locations::SAMPLE_IMPORT_CSV;
use crate::error::ApiError;
use crate::models::dashboard::{DataFormat, DatasetAnalysis, FormatQuery, ImportResponse};
use crate::models::location::LocationRecord;
use crate::services::analysis::analyze;
use crate::services::import_export::{export_records, import_records};

/// POST /api/import?format=csv|json
/// Import a dataset
///
/// The body is the raw file content. Records without an `id` get
/// `imported-<index>`; missing metrics are derived, present ones are kept.
#[utoipa::path(
    post,
    path = "/api/import",
    params(("format" = Option<String>, Query, description = "csv or json (default json)")),
    request_body(content = String, description = "CSV or JSON file content", content_type = "text/plain"),
    responses(
        (status = 200, description = "Derived records", body = ImportResponse),
        (status = 400, description = "Unparseable file or invalid record")
    )
)]
pub async fn import_data(
    Query(query): Query<FormatQuery>,
    body: String,
) -> Result<Json<ImportResponse>, ApiError> {
    let records = import_records(&body, query.format)?;
    Ok(Json(ImportResponse { imported: records.len(), records }))
}

/// POST /api/export?format=csv|json
/// Export records as a downloadable file
#[utoipa::path(
    post,
    path = "/api/export",
    params(("format" = Option<String>, Query, description = "csv or json (default json)")),
    request_body = Vec<LocationRecord>,
    responses(
        (status = 200, description = "File content"),
        (status = 400, description = "No records to export")
    )
)]
pub async fn export_data(
    Query(query): Query<FormatQuery>,
    Json(records): Json<Vec<LocationRecord>>,
) -> Result<impl IntoResponse, ApiError> {
    if records.is_empty() {
        return Err(ApiError::Validation("no data to export".to_string()));
    }
    let body = export_records(&records, query.format)?;
    let (content_type, filename) = match query.format {
        DataFormat::Csv => ("text/csv; charset=utf-8", "solar_data.csv"),
        DataFormat::Json => ("application/json", "solar_data.json"),
    };
    tracing::info!(count = records.len(), format = ?query.format, "exported records");

    Ok((
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (header::CONTENT_DISPOSITION, format!("attachment; filename=\"{}\"", filename)),
        ],
        body,
    ))
}

/// GET /api/import/sample
/// Example CSV accepted by the import endpoint
#[utoipa::path(
    get,
    path = "/api/import/sample",
    responses((status = 200, description = "Sample CSV", body = String, content_type = "text/csv"))
)]
pub async fn get_sample_csv() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/csv; charset=utf-8")], SAMPLE_IMPORT_CSV)
}

/// POST /api/analysis
/// Summarise a dataset
///
/// Averages, overall score, per-state counts and a GHI/DNI comparison of the
/// first eight records.
#[utoipa::path(
    post,
    path = "/api/analysis",
    request_body = Vec<LocationRecord>,
    responses(
        (status = 200, description = "Dataset analysis", body = DatasetAnalysis),
        (status = 400, description = "Empty dataset")
    )
)]
pub async fn analyze_data(
    Json(records): Json<Vec<LocationRecord>>,
) -> Result<Json<DatasetAnalysis>, ApiError> {
    if records.is_empty() {
        return Err(ApiError::Validation("no data available for analysis".to_string()));
    }
    Ok(Json(analyze(&records)))
}
