use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::{DateTime, Datelike, FixedOffset, Offset, Timelike, Utc};

use crate::config::Config;
use crate::error::{ApiError, DeriveError};
use crate::models::dashboard::{LiveSnapshot, LocationQuery, StateCapacity};
use crate::models::location::{LocationRecord, MonthlyEntry, NewLocation, Recommendation};
use crate::services::analysis::state_capacity_distribution;
use crate::services::deriver::{create_location, derive_record};
use crate::services::solar_metrics::{
    installation_recommendation, radiation_category, weather_description,
};
use crate::services::temperature::{DEFAULT_LATITUDE, estimate_temperature};
use crate::shared_state::AppState;

fn matches_query(record: &LocationRecord, query: &LocationQuery) -> bool {
    let text_ok = match query.q.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
        Some(q) => {
            let q = q.to_lowercase();
            record.name.to_lowercase().contains(&q)
                || record.state.to_lowercase().contains(&q)
                || record
                    .district
                    .as_deref()
                    .is_some_and(|d| d.to_lowercase().contains(&q))
        }
        None => true,
    };
    let state_ok = query
        .state
        .as_deref()
        .is_none_or(|s| record.state.eq_ignore_ascii_case(s.trim()));
    text_ok && state_ok
}

/// `now` on the sites' wall clock. Out-of-range offsets fall back to UTC.
fn site_time(now: DateTime<Utc>, utc_offset_minutes: i32) -> DateTime<FixedOffset> {
    let offset = utc_offset_minutes
        .checked_mul(60)
        .and_then(FixedOffset::east_opt)
        .unwrap_or_else(|| Utc.fix());
    now.with_timezone(&offset)
}

fn lookup(state: &AppState, id: &str) -> Result<LocationRecord, ApiError> {
    let record = state
        .find_location(id)
        .ok_or_else(|| ApiError::NotFound(id.to_string()))?;
    Ok(derive_record(record)?)
}

/// GET /api/locations
/// Search the reference catalog
///
/// Case-insensitive match of `q` against name, state and district, optionally
/// restricted to one `state`.
#[utoipa::path(
    get,
    path = "/api/locations",
    params(
        ("q" = Option<String>, Query, description = "Free-text search"),
        ("state" = Option<String>, Query, description = "Exact state name")
    ),
    responses(
        (status = 200, description = "Matching locations", body = Vec<LocationRecord>)
    )
)]
pub async fn list_locations(
    State(state): State<AppState>,
    Query(query): Query<LocationQuery>,
) -> Json<Vec<LocationRecord>> {
    let found: Vec<LocationRecord> = state
        .catalog
        .iter()
        .filter(|r| matches_query(r, &query))
        .cloned()
        .collect();
    tracing::debug!(q = ?query.q, state = ?query.state, count = found.len(), "location search");
    Json(found)
}

/// GET /api/locations/{id}
/// Get one location with all derived metrics
#[utoipa::path(
    get,
    path = "/api/locations/{id}",
    params(("id" = String, Path, description = "Location ID")),
    responses(
        (status = 200, description = "Derived location", body = LocationRecord),
        (status = 404, description = "Location not found")
    )
)]
pub async fn get_location(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<LocationRecord>, ApiError> {
    Ok(Json(lookup(&state, &id)?))
}

/// GET /api/locations/{id}/monthly
/// Monthly GHI/DNI projection, January first
#[utoipa::path(
    get,
    path = "/api/locations/{id}/monthly",
    params(("id" = String, Path, description = "Location ID")),
    responses(
        (status = 200, description = "12 monthly entries", body = Vec<MonthlyEntry>),
        (status = 404, description = "Location not found")
    )
)]
pub async fn get_monthly(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Vec<MonthlyEntry>>, ApiError> {
    let record = lookup(&state, &id)?;
    Ok(Json(record.monthly_data.unwrap_or_default()))
}

/// GET /api/locations/{id}/recommendation
/// Installation advice for a location, tiered by solar score
#[utoipa::path(
    get,
    path = "/api/locations/{id}/recommendation",
    params(("id" = String, Path, description = "Location ID")),
    responses(
        (status = 200, description = "Recommendation", body = Recommendation),
        (status = 404, description = "Location not found")
    )
)]
pub async fn get_recommendation(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Recommendation>, ApiError> {
    let record = lookup(&state, &id)?;
    let score = record
        .solar_score
        .ok_or(DeriveError::MissingField("solarScore"))?;
    Ok(Json(installation_recommendation(&record.id, &record.name, score)))
}

/// GET /api/locations/{id}/live
/// Simulated live conditions
///
/// Synthesises the trailing 12-hour irradiance window ending at the current
/// hour on the sites' clock (`live.utc_offset_minutes`, IST by default) and
/// estimates the temperature from the latest hour. Values are
/// randomised on every call; they are not measurements.
#[utoipa::path(
    get,
    path = "/api/locations/{id}/live",
    params(("id" = String, Path, description = "Location ID")),
    responses(
        (status = 200, description = "Live snapshot", body = LiveSnapshot),
        (status = 404, description = "Location not found")
    )
)]
pub async fn get_live(
    Path(id): Path<String>,
    State(state): State<AppState>,
    State(config): State<Config>,
) -> Result<Json<LiveSnapshot>, ApiError> {
    let record = state
        .find_location(&id)
        .ok_or_else(|| ApiError::NotFound(id.clone()))?;

    let now = site_time(Utc::now(), config.live.utc_offset_minutes);
    let record = state.with_live_curve(record, now.hour());
    let hourly = record.hourly_data.unwrap_or_default();
    let current = hourly.last().map(|h| h.ghi).unwrap_or(0);
    let radiation = f64::from(current);
    let temperature = estimate_temperature(
        record.latitude.unwrap_or(DEFAULT_LATITUDE),
        radiation,
        now.month0(),
        now.hour(),
    );

    Ok(Json(LiveSnapshot {
        timestamp: now.with_timezone(&Utc),
        location_id: record.id,
        current_radiation: current,
        radiation_category: radiation_category(radiation),
        weather: weather_description(radiation).to_string(),
        temperature,
        hourly_data: hourly,
        refresh_interval_s: config.live.refresh_interval_s,
    }))
}

/// GET /api/states/distribution
/// Top ten states by summed catalog capacity
#[utoipa::path(
    get,
    path = "/api/states/distribution",
    responses(
        (status = 200, description = "State capacity totals (MW)", body = Vec<StateCapacity>)
    )
)]
pub async fn get_state_distribution(State(state): State<AppState>) -> Json<Vec<StateCapacity>> {
    Json(state_capacity_distribution(&state.catalog))
}

// ─── Saved locations ─────────────────────────────────────────────────────────

/// GET /api/saved
/// List saved locations
#[utoipa::path(
    get,
    path = "/api/saved",
    responses(
        (status = 200, description = "Saved locations", body = Vec<LocationRecord>),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn list_saved(State(state): State<AppState>) -> Result<Json<Vec<LocationRecord>>, ApiError> {
    Ok(Json(state.saved.list()?))
}

/// POST /api/saved
/// Add a location from the entry form
///
/// Requires a name and state and strictly positive GHI/DNI. All metrics are
/// derived before the record is stored.
#[utoipa::path(
    post,
    path = "/api/saved",
    request_body = NewLocation,
    responses(
        (status = 201, description = "Created location", body = LocationRecord),
        (status = 400, description = "Validation failed"),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn save_location(
    State(state): State<AppState>,
    Json(input): Json<NewLocation>,
) -> Result<(StatusCode, Json<LocationRecord>), ApiError> {
    let record = create_location(input)?;
    state.saved.save(record.clone())?;
    tracing::info!(id = %record.id, name = %record.name, "location saved");
    Ok((StatusCode::CREATED, Json(record)))
}

/// DELETE /api/saved/{id}
/// Remove a saved location
#[utoipa::path(
    delete,
    path = "/api/saved/{id}",
    params(("id" = String, Path, description = "Saved location ID")),
    responses(
        (status = 204, description = "Removed"),
        (status = 404, description = "Location not found")
    )
)]
pub async fn delete_saved(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    if state.saved.remove(&id)? {
        tracing::info!(%id, "saved location removed");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(id))
    }
}
