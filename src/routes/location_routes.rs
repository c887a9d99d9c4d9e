use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::controllers::dataset_controller::{
    analyze_data, export_data, get_sample_csv, import_data,
};
use crate::controllers::location_controller::{
    // Catalog
    get_live, get_location, get_monthly, get_recommendation, get_state_distribution,
    list_locations,
    // Saved locations
    delete_saved, list_saved, save_location,
};
use crate::shared_state::SharedState;

/// Build the `/api/*` sub-router.
/// Handlers extract `State<AppState>` and/or `State<Config>` via
/// `FromRef<SharedState>`, so a single `.with_state(shared)` covers both.
pub fn api_routes(shared: SharedState) -> Router {
    Router::new()
        .route("/locations",                       get(list_locations))
        .route("/locations/{id}",                  get(get_location))
        .route("/locations/{id}/monthly",          get(get_monthly))
        .route("/locations/{id}/live",             get(get_live))
        .route("/locations/{id}/recommendation",   get(get_recommendation))
        .route("/states/distribution",             get(get_state_distribution))
        .route("/saved",                           get(list_saved).post(save_location))
        .route("/saved/{id}",                      delete(delete_saved))
        .route("/import",                          post(import_data))
        .route("/import/sample",                   get(get_sample_csv))
        .route("/export",                          post(export_data))
        .route("/analysis",                        post(analyze_data))
        .with_state(shared)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
    };
    use serde_json::{Value, json};
    use tower::ServiceExt; // for oneshot

    use crate::config::Config;
    use crate::data::india_locations::catalog;
    use crate::repository::InMemoryRepository;
    use crate::shared_state::AppState;

    fn app() -> Router {
        let state = AppState::new(catalog(), Arc::new(InMemoryRepository::new()), Some(11), 0.15);
        api_routes(SharedState { app: state, config: Config::default() })
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, body.to_vec())
    }

    async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
        let (status, body) = send(app, Request::get(uri).body(Body::empty()).unwrap()).await;
        (status, serde_json::from_slice(&body).unwrap())
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_search_catalog() {
        let app = app();
        let (status, body) = get_json(&app, "/locations?q=jodh").await;
        assert_eq!(status, StatusCode::OK);
        let items = body.as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["id"], "jodhpur-1");
        assert_eq!(items[0]["solarScore"], 88);
        assert_eq!(items[0]["monthlyData"].as_array().unwrap().len(), 12);

        let (_, rajasthan) = get_json(&app, "/locations?state=rajasthan").await;
        assert!(rajasthan.as_array().unwrap().len() >= 5);
    }

    #[tokio::test]
    async fn test_get_location_and_monthly() {
        let app = app();
        let (status, body) = get_json(&app, "/locations/delhi-1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["capacityMW"], 2000);

        let (status, monthly) = get_json(&app, "/locations/delhi-1/monthly").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(monthly[0]["month"], "Jan");
        assert_eq!(monthly[11]["month"], "Dec");

        let (status, err) = get_json(&app, "/locations/atlantis").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(err["error"].as_str().unwrap().contains("atlantis"));
    }

    #[tokio::test]
    async fn test_live_snapshot_shape() {
        let app = app();
        let (status, body) = get_json(&app, "/locations/chennai-1/live").await;
        assert_eq!(status, StatusCode::OK);
        let hourly = body["hourlyData"].as_array().unwrap();
        assert_eq!(hourly.len(), 12);
        assert_eq!(body["currentRadiation"], hourly[11]["ghi"]);
        assert!(body["temperature"]["description"].is_string());
        assert_eq!(body["refreshIntervalS"], 20);
    }

    #[tokio::test]
    async fn test_recommendation() {
        let app = app();
        let (status, body) = get_json(&app, "/locations/jodhpur-1/recommendation").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["solarScore"], 88);
        assert_eq!(body["potential"], "Excellent");
        assert_eq!(body["installationTypes"], json!(["utility", "commercial", "residential"]));

        // Darjeeling, published score 64
        let (_, body) = get_json(&app, "/locations/darjeeling-1/recommendation").await;
        assert_eq!(body["potential"], "Good");
        assert_eq!(body["installationTypes"][0], "commercial");

        let (status, _) = get_json(&app, "/locations/atlantis/recommendation").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_state_distribution() {
        let (status, body) = get_json(&app(), "/states/distribution").await;
        assert_eq!(status, StatusCode::OK);
        let states = body.as_array().unwrap();
        assert!(states.len() <= 10);
        assert_eq!(states[0]["name"], "Tamil Nadu");
        assert_eq!(states[0]["value"], 26600);
        assert_eq!(states[1]["name"], "Rajasthan");
    }

    #[tokio::test]
    async fn test_saved_location_lifecycle() {
        let app = app();
        let form = json!({"name": "Leh Plateau", "state": "Ladakh", "ghi": 5.9, "dni": 6.5, "latitude": 34.15});
        let (status, body) = send(&app, post_json("/saved", form)).await;
        assert_eq!(status, StatusCode::CREATED);
        let created: Value = serde_json::from_slice(&body).unwrap();
        let id = created["id"].as_str().unwrap().to_string();
        assert!(id.starts_with("custom-"));
        assert_eq!(created["solarScore"], 78);

        let (_, saved) = get_json(&app, "/saved").await;
        assert_eq!(saved.as_array().unwrap().len(), 1);

        // saved locations resolve through the location endpoints too
        let (status, _) = get_json(&app, &format!("/locations/{}/live", id)).await;
        assert_eq!(status, StatusCode::OK);

        let delete = Request::delete(format!("/saved/{}", id)).body(Body::empty()).unwrap();
        assert_eq!(send(&app, delete).await.0, StatusCode::NO_CONTENT);
        let again = Request::delete(format!("/saved/{}", id)).body(Body::empty()).unwrap();
        assert_eq!(send(&app, again).await.0, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_saved_location_validation() {
        let form = json!({"name": "X", "state": "Y", "ghi": 0.0, "dni": 6.0});
        let (status, _) = send(&app(), post_json("/saved", form)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_import_export_analysis() {
        let app = app();
        let csv = "name,state,ghi,dni\nKutch,Gujarat,6.0,6.6\nPune,Maharashtra,5.6,6.0\n";
        let request = Request::post("/import?format=csv").body(Body::from(csv)).unwrap();
        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::OK);
        let imported: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(imported["imported"], 2);
        let records = imported["records"].clone();
        assert_eq!(records[0]["id"], "imported-0");

        let (status, body) = send(&app, post_json("/export?format=csv", records.clone())).await;
        assert_eq!(status, StatusCode::OK);
        let text = String::from_utf8(body).unwrap();
        assert!(text.starts_with("id,name,state"));
        assert_eq!(text.lines().count(), 3);

        let (status, body) = send(&app, post_json("/analysis", records)).await;
        assert_eq!(status, StatusCode::OK);
        let analysis: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(analysis["dataPoints"], 2);
        assert_eq!(analysis["averages"]["count"], 2);
    }

    #[tokio::test]
    async fn test_import_rejects_bad_input() {
        let request = Request::post("/import?format=json")
            .body(Body::from(r#"[{"ghi": -2, "dni": 5}]"#))
            .unwrap();
        let (status, body) = send(&app(), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let err: Value = serde_json::from_slice(&body).unwrap();
        assert!(err["error"].as_str().unwrap().contains("record 0"));

        let (status, _) = send(&app(), post_json("/export", json!([]))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_sample_csv_is_importable() {
        let app = app();
        let (status, sample) = send(&app, Request::get("/import/sample").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        let request = Request::post("/import?format=csv").body(Body::from(sample)).unwrap();
        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::OK);
        let imported: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(imported["imported"], 5);
    }
}
