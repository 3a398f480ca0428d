//! HTTP route handlers.

use std::path::Path as FsPath;

use askama::Template;
use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{delete, get, post, put},
};
use tokio::time::Instant;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::domain::{Category, Coordinate, Slot};
use crate::map::MapScene;
use crate::orchestrator::{Outcome, SearchError};
use crate::session::{SessionHandle, SessionId, SortKey};

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: impl AsRef<FsPath>) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/api/sessions", post(create_session))
        .route("/api/sessions/:id", get(get_session))
        .route("/api/sessions/:id/slots/:slot", delete(clear_slot))
        .route("/api/sessions/:id/slots/:slot/address", post(resolve_address))
        .route("/api/sessions/:id/slots/:slot/coordinate", post(place_coordinate))
        .route("/api/sessions/:id/slots/:slot/device", post(device_location))
        .route("/api/sessions/:id/slots/:slot/text", post(text_changed))
        .route("/api/sessions/:id/map-click", post(map_click))
        .route("/api/sessions/:id/search", post(search_midpoint))
        .route("/api/sessions/:id/stations", get(list_stations))
        .route("/api/sessions/:id/stations/:index/select", post(select_station))
        .route("/api/sessions/:id/anchor/midpoint", post(select_midpoint))
        .route("/api/sessions/:id/category", put(set_category))
        .route("/api/sessions/:id/places", get(list_places))
        .route("/api/sessions/:id/places/:index/focus", post(focus_place))
        .route("/api/sessions/:id/sort", put(set_sort))
        .route("/api/sessions/:id/advisory", get(poll_advisory))
        .route("/api/sessions/:id/advisory/dismiss", post(dismiss_advisory))
        .route("/api/sessions/:id/map", get(map_scene))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Index page.
async fn index_page() -> impl IntoResponse {
    Html(
        IndexTemplate::new()
            .render()
            .unwrap_or_else(|e| format!("Template error: {}", e)),
    )
}

/// Check if request accepts HTML.
fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

async fn session(state: &AppState, id: SessionId) -> Result<SessionHandle, AppError> {
    state
        .sessions
        .get(&id)
        .await
        .ok_or_else(|| AppError::NotFound {
            message: format!("Session {id} not found or expired"),
        })
}

fn parse_slot(slot: &str) -> Result<Slot, AppError> {
    slot.parse().map_err(|e: crate::domain::InvalidSlot| AppError::BadRequest {
        message: e.to_string(),
    })
}

fn parse_coordinate(req: CoordinateRequest) -> Result<Coordinate, AppError> {
    Coordinate::new(req.latitude, req.longitude).map_err(|e| AppError::BadRequest {
        message: e.to_string(),
    })
}

/// Snapshot the session after an operation.
async fn respond(id: SessionId, handle: &SessionHandle, outcome: Outcome) -> Json<OperationResponse> {
    let session = handle.lock().await;
    Json(OperationResponse {
        outcome,
        session: SessionSnapshot::from_session(id, &session),
    })
}

async fn create_session(State(state): State<AppState>) -> impl IntoResponse {
    let (id, _) = state.sessions.create().await;
    (StatusCode::CREATED, Json(CreateSessionResponse { id }))
}

async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<SessionId>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let handle = session(&state, id).await?;
    let session = handle.lock().await;
    Ok(Json(SessionSnapshot::from_session(id, &session)))
}

async fn resolve_address(
    State(state): State<AppState>,
    Path((id, slot)): Path<(SessionId, String)>,
    Json(req): Json<AddressRequest>,
) -> Result<Json<OperationResponse>, AppError> {
    let slot = parse_slot(&slot)?;
    let handle = session(&state, id).await?;
    let outcome = state
        .orchestrator
        .resolve_address(&handle, slot, &req.text)
        .await?;
    Ok(respond(id, &handle, outcome).await)
}

async fn place_coordinate(
    State(state): State<AppState>,
    Path((id, slot)): Path<(SessionId, String)>,
    Json(req): Json<CoordinateRequest>,
) -> Result<Json<OperationResponse>, AppError> {
    let slot = parse_slot(&slot)?;
    let coordinate = parse_coordinate(req)?;
    let handle = session(&state, id).await?;
    let outcome = state
        .orchestrator
        .place_coordinate(&handle, slot, coordinate)
        .await;
    Ok(respond(id, &handle, outcome).await)
}

async fn device_location(
    State(state): State<AppState>,
    Path((id, slot)): Path<(SessionId, String)>,
    Json(req): Json<DeviceLocationRequest>,
) -> Result<Json<OperationResponse>, AppError> {
    let slot = parse_slot(&slot)?;
    let result = match req.coordinate {
        Some(c) => Ok(parse_coordinate(c)?),
        None => Err(req
            .error
            .unwrap_or_else(|| "no position reported".to_string())),
    };
    let handle = session(&state, id).await?;
    let outcome = state
        .orchestrator
        .use_device_location(&handle, slot, result)
        .await?;
    Ok(respond(id, &handle, outcome).await)
}

async fn text_changed(
    State(state): State<AppState>,
    Path((id, slot)): Path<(SessionId, String)>,
    Json(req): Json<TextChangeRequest>,
) -> Result<StatusCode, AppError> {
    let slot = parse_slot(&slot)?;
    let handle = session(&state, id).await?;
    handle
        .lock()
        .await
        .advisory
        .on_text_change(slot, &req.text, Instant::now());
    Ok(StatusCode::NO_CONTENT)
}

async fn clear_slot(
    State(state): State<AppState>,
    Path((id, slot)): Path<(SessionId, String)>,
) -> Result<Json<OperationResponse>, AppError> {
    let slot = parse_slot(&slot)?;
    let handle = session(&state, id).await?;
    let outcome = state.orchestrator.clear(&handle, slot).await;
    Ok(respond(id, &handle, outcome).await)
}

async fn map_click(
    State(state): State<AppState>,
    Path(id): Path<SessionId>,
    Json(req): Json<CoordinateRequest>,
) -> Result<Json<OperationResponse>, AppError> {
    let coordinate = parse_coordinate(req)?;
    let handle = session(&state, id).await?;
    let outcome = state.orchestrator.map_click(&handle, coordinate).await;
    Ok(respond(id, &handle, outcome).await)
}

async fn search_midpoint(
    State(state): State<AppState>,
    Path(id): Path<SessionId>,
) -> Result<Json<OperationResponse>, AppError> {
    let handle = session(&state, id).await?;
    let outcome = state.orchestrator.search_midpoint(&handle).await?;
    Ok(respond(id, &handle, outcome).await)
}

/// Station list, as HTML fragment or JSON.
async fn list_stations(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<SessionId>,
) -> Result<Response, AppError> {
    let handle = session(&state, id).await?;
    let session = handle.lock().await;

    if accepts_html(&headers) {
        let html = StationListTemplate::from_session(&session)
            .render()
            .map_err(|e| AppError::Internal {
                message: format!("Template error: {}", e),
            })?;
        Ok(Html(html).into_response())
    } else {
        Ok(Json(StationsResponse::from_session(&session)).into_response())
    }
}

async fn select_station(
    State(state): State<AppState>,
    Path((id, index)): Path<(SessionId, usize)>,
) -> Result<Json<OperationResponse>, AppError> {
    let handle = session(&state, id).await?;
    let outcome = state.orchestrator.select_station(&handle, index).await?;
    Ok(respond(id, &handle, outcome).await)
}

async fn select_midpoint(
    State(state): State<AppState>,
    Path(id): Path<SessionId>,
) -> Result<Json<OperationResponse>, AppError> {
    let handle = session(&state, id).await?;
    let outcome = state.orchestrator.select_midpoint(&handle).await?;
    Ok(respond(id, &handle, outcome).await)
}

async fn set_category(
    State(state): State<AppState>,
    Path(id): Path<SessionId>,
    Json(req): Json<CategoryRequest>,
) -> Result<Json<OperationResponse>, AppError> {
    let category = req
        .category
        .filter(|c| !c.is_empty())
        .map(|c| c.parse::<Category>())
        .transpose()
        .map_err(|e| AppError::BadRequest {
            message: e.to_string(),
        })?;
    let handle = session(&state, id).await?;
    let outcome = state.orchestrator.set_category(&handle, category).await?;
    Ok(respond(id, &handle, outcome).await)
}

/// Sorted place view, as HTML fragment or JSON.
async fn list_places(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<SessionId>,
) -> Result<Response, AppError> {
    let handle = session(&state, id).await?;
    let session = handle.lock().await;

    if accepts_html(&headers) {
        let html = PlaceListTemplate::from_session(&session)
            .render()
            .map_err(|e| AppError::Internal {
                message: format!("Template error: {}", e),
            })?;
        Ok(Html(html).into_response())
    } else {
        Ok(Json(PlacesResponse::from_session(&session)).into_response())
    }
}

async fn set_sort(
    State(state): State<AppState>,
    Path(id): Path<SessionId>,
    Json(req): Json<SortRequest>,
) -> Result<Json<PlacesResponse>, AppError> {
    let key: SortKey = req.sort.parse().map_err(|e: crate::session::InvalidSortKey| {
        AppError::BadRequest {
            message: e.to_string(),
        }
    })?;
    let handle = session(&state, id).await?;
    let mut session = handle.lock().await;
    session.places.results.set_sort_key(key);
    Ok(Json(PlacesResponse::from_session(&session)))
}

/// Focus a place from the current view for the map popup.
async fn focus_place(
    State(state): State<AppState>,
    Path((id, index)): Path<(SessionId, usize)>,
) -> Result<Json<MapScene>, AppError> {
    let handle = session(&state, id).await?;
    let mut session = handle.lock().await;
    if session.places.results.focus(index).is_none() {
        return Err(AppError::BadRequest {
            message: format!("no place at index {index}"),
        });
    }
    Ok(Json(MapScene::from_session(&session, state.map_padding)))
}

async fn poll_advisory(
    State(state): State<AppState>,
    Path(id): Path<SessionId>,
) -> Result<Json<AdvisoryResponse>, AppError> {
    let handle = session(&state, id).await?;
    let mut session = handle.lock().await;
    let events = session.advisory.poll(Instant::now());
    Ok(Json(AdvisoryResponse {
        events,
        visible: session.advisory.visible(),
    }))
}

async fn dismiss_advisory(
    State(state): State<AppState>,
    Path(id): Path<SessionId>,
) -> Result<StatusCode, AppError> {
    let handle = session(&state, id).await?;
    handle.lock().await.advisory.on_dismiss();
    Ok(StatusCode::NO_CONTENT)
}

async fn map_scene(
    State(state): State<AppState>,
    Path(id): Path<SessionId>,
) -> Result<Json<MapScene>, AppError> {
    let handle = session(&state, id).await?;
    let session = handle.lock().await;
    Ok(Json(MapScene::from_session(&session, state.map_padding)))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Conflict { message: String },
    Unprocessable { message: String },
    BadGateway { message: String },
    Internal { message: String },
}

impl From<SearchError> for AppError {
    fn from(e: SearchError) -> Self {
        let message = e.to_string();
        match e {
            SearchError::NotFound { .. } => AppError::NotFound { message },
            SearchError::SearchUnavailable { .. } => AppError::BadGateway { message },
            SearchError::InvalidInput(_) => AppError::BadRequest { message },
            SearchError::LocationUnavailable(_) => AppError::Unprocessable { message },
            SearchError::IncompleteLocations => AppError::Conflict { message },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Conflict { message } => (StatusCode::CONFLICT, message),
            AppError::Unprocessable { message } => (StatusCode::UNPROCESSABLE_ENTITY, message),
            AppError::BadGateway { message } => (StatusCode::BAD_GATEWAY, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            warn!(%status, %message, "request failed");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::domain::Feature;
    use crate::nominatim::{GeocodeError, GeocodeMatch, Geocoder};
    use crate::orchestrator::SearchConfig;
    use crate::overpass::{FeatureSource, OverpassError};
    use crate::query::QuerySpec;

    struct StaticGeocoder;

    #[async_trait]
    impl Geocoder for StaticGeocoder {
        async fn geocode(&self, address: &str) -> Result<Option<GeocodeMatch>, GeocodeError> {
            let coordinate = match address {
                "Tokyo Station" => Coordinate::new(35.681, 139.767).unwrap(),
                "Shibuya" => Coordinate::new(35.658, 139.701).unwrap(),
                "offline" => return Err(GeocodeError::RateLimited),
                _ => return Ok(None),
            };
            Ok(Some(GeocodeMatch {
                coordinate,
                display_name: None,
            }))
        }

        async fn reverse_geocode(
            &self,
            _coordinate: Coordinate,
        ) -> Result<Option<String>, GeocodeError> {
            Ok(Some("Somewhere".to_string()))
        }
    }

    struct StaticFeatures;

    #[async_trait]
    impl FeatureSource for StaticFeatures {
        async fn fetch_features(&self, query: &QuerySpec) -> Result<Vec<Feature>, OverpassError> {
            let coordinate = Coordinate::new(35.6628, 139.7314).ok();
            if query.as_str().contains("\"railway\"") {
                Ok(vec![Feature::new(coordinate).with_tag("name", "Roppongi")])
            } else {
                Ok(vec![
                    Feature::new(coordinate)
                        .with_tag("name", "Zebra Bar")
                        .with_tag("amenity", "bar"),
                    Feature::new(Coordinate::new(35.67, 139.734).ok())
                        .with_tag("name", "Alpha Cafe")
                        .with_tag("amenity", "cafe"),
                ])
            }
        }
    }

    fn app_with_static(dir: &FsPath) -> Router {
        let state = AppState::new(
            Arc::new(StaticGeocoder),
            Arc::new(StaticFeatures),
            SearchConfig::default(),
        );
        create_router(state, dir)
    }

    fn app() -> Router {
        app_with_static(FsPath::new("static"))
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(v) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(v.to_string())
            }
            None => Body::empty(),
        };
        let response = app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    async fn new_session(app: &Router) -> String {
        let (status, body) = send(app, "POST", "/api/sessions", None).await;
        assert_eq!(status, StatusCode::CREATED);
        body["id"].as_str().unwrap().to_string()
    }

    async fn populated(app: &Router) -> String {
        let id = new_session(app).await;
        for (slot, text) in [("primary", "Tokyo Station"), ("secondary", "Shibuya")] {
            let (status, _) = send(
                app,
                "POST",
                &format!("/api/sessions/{id}/slots/{slot}/address"),
                Some(json!({ "text": text })),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
        }
        id
    }

    #[tokio::test]
    async fn health_ok() {
        let response = app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"ok");
    }

    #[tokio::test]
    async fn index_renders() {
        let response = app()
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains("Midpoint Finder"));
    }

    #[tokio::test]
    async fn full_flow() {
        let app = app();
        let id = populated(&app).await;

        let (status, snapshot) = send(&app, "GET", &format!("/api/sessions/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(snapshot["slots"][0]["label"], "Tokyo Station");
        assert_eq!(snapshot["slots"][1]["status"]["state"], "resolved");
        assert!((snapshot["midpoint"]["latitude"].as_f64().unwrap() - 35.6695).abs() < 1e-9);
        assert_eq!(snapshot["anchor"]["kind"], "midpoint");
        assert_eq!(snapshot["stations"]["status"]["state"], "ready");
        assert_eq!(snapshot["stations"]["stations"][0]["name"], "Roppongi");

        let (_, places) = send(&app, "GET", &format!("/api/sessions/{id}/places"), None).await;
        assert_eq!(places["places"].as_array().unwrap().len(), 2);

        let (status, places) = send(
            &app,
            "PUT",
            &format!("/api/sessions/{id}/sort"),
            Some(json!({ "sort": "name" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(places["sort"], "name");
        assert_eq!(places["places"][0]["name"], "Alpha Cafe");
        assert_eq!(places["places"][0]["category_label"], "Café");

        let (status, body) = send(
            &app,
            "POST",
            &format!("/api/sessions/{id}/stations/0/select"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["outcome"], "applied");
        assert_eq!(body["session"]["anchor"]["kind"], "station");
        assert_eq!(body["session"]["anchor"]["name"], "Roppongi");

        let (_, scene) = send(&app, "GET", &format!("/api/sessions/{id}/map"), None).await;
        // Two inputs, midpoint, one station and two places.
        assert_eq!(scene["markers"].as_array().unwrap().len(), 6);
        assert!(scene["popup"].is_null());
        assert!(scene["fit_bounds"]["north"].as_f64().unwrap() > 35.681);

        let (status, body) = send(
            &app,
            "DELETE",
            &format!("/api/sessions/{id}/slots/primary"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["session"]["midpoint"].is_null());
        assert_eq!(body["session"]["stations"]["status"]["state"], "idle");
    }

    #[tokio::test]
    async fn focused_place_shows_in_map_popup() {
        let app = app();
        let id = populated(&app).await;
        send(
            &app,
            "PUT",
            &format!("/api/sessions/{id}/sort"),
            Some(json!({ "sort": "name" })),
        )
        .await;

        let (status, scene) = send(
            &app,
            "POST",
            &format!("/api/sessions/{id}/places/0/focus"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(scene["popup"]["name"], "Alpha Cafe");
        let focused: Vec<_> = scene["markers"]
            .as_array()
            .unwrap()
            .iter()
            .filter(|m| m["selected"] == true && m["kind"] == "place")
            .collect();
        assert_eq!(focused.len(), 1);
        assert_eq!(focused[0]["label"], "Alpha Cafe");

        let (status, _) = send(
            &app,
            "POST",
            &format!("/api/sessions/{id}/places/5/focus"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn stations_as_html_fragment() {
        let app = app();
        let id = populated(&app).await;

        let response = app
            .oneshot(
                Request::get(format!("/api/sessions/{id}/stations"))
                    .header(header::ACCEPT, "text/html")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains("Roppongi"));
        assert!(!html.contains("<html"));
    }

    #[tokio::test]
    async fn unknown_session_is_404() {
        let (status, body) = send(
            &app(),
            "GET",
            &format!("/api/sessions/{}", uuid::Uuid::new_v4()),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].as_str().unwrap().contains("not found"));
    }

    #[tokio::test]
    async fn error_statuses() {
        let app = app();
        let id = new_session(&app).await;

        let cases = [
            ("POST", "slots/third/address", Some(json!({ "text": "x" })), StatusCode::BAD_REQUEST),
            (
                "POST",
                "slots/primary/coordinate",
                Some(json!({ "latitude": 91.0, "longitude": 0.0 })),
                StatusCode::BAD_REQUEST,
            ),
            ("POST", "slots/primary/address", Some(json!({ "text": "Atlantis" })), StatusCode::NOT_FOUND),
            ("POST", "slots/primary/address", Some(json!({ "text": "offline" })), StatusCode::BAD_GATEWAY),
            (
                "POST",
                "slots/primary/device",
                Some(json!({ "error": "permission denied" })),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            ("POST", "search", None, StatusCode::CONFLICT),
            ("PUT", "category", Some(json!({ "category": "nightclub" })), StatusCode::BAD_REQUEST),
            ("PUT", "sort", Some(json!({ "sort": "rating" })), StatusCode::BAD_REQUEST),
            ("POST", "stations/3/select", None, StatusCode::BAD_REQUEST),
        ];

        for (method, path, body, expected) in cases {
            let (status, response) =
                send(&app, method, &format!("/api/sessions/{id}/{path}"), body).await;
            assert_eq!(status, expected, "{method} {path}");
            assert!(response["error"].is_string(), "{method} {path}");
        }
    }

    #[tokio::test]
    async fn blank_address_is_skipped() {
        let app = app();
        let id = new_session(&app).await;
        let (status, body) = send(
            &app,
            "POST",
            &format!("/api/sessions/{id}/slots/primary/address"),
            Some(json!({ "text": "   " })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["outcome"], "skipped");
    }

    #[tokio::test]
    async fn map_clicks_fill_slots() {
        let app = app();
        let id = new_session(&app).await;
        let uri = format!("/api/sessions/{id}/map-click");

        for expected in ["applied", "applied", "skipped"] {
            let (status, body) = send(
                &app,
                "POST",
                &uri,
                Some(json!({ "latitude": 35.66, "longitude": 139.70 })),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["outcome"], expected);
        }
    }

    #[tokio::test]
    async fn category_null_resets_filter() {
        let app = app();
        let id = populated(&app).await;
        let uri = format!("/api/sessions/{id}/category");

        let (_, body) = send(&app, "PUT", &uri, Some(json!({ "category": "bar" }))).await;
        assert_eq!(body["session"]["category"], "bar");

        let (_, body) = send(&app, "PUT", &uri, Some(json!({ "category": null }))).await;
        assert!(body["session"]["category"].is_null());
    }

    #[tokio::test]
    async fn advisory_endpoints() {
        let app = app();
        let id = new_session(&app).await;

        let (status, _) = send(
            &app,
            "POST",
            &format!("/api/sessions/{id}/slots/primary/text"),
            Some(json!({ "text": "Tokyo" })),
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, body) = send(&app, "GET", &format!("/api/sessions/{id}/advisory"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["events"].as_array().unwrap().is_empty());
        assert!(body["visible"].is_null());

        let (status, _) = send(
            &app,
            "POST",
            &format!("/api/sessions/{id}/advisory/dismiss"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn serves_static_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("style.css"), "body { margin: 0; }").unwrap();

        let response = app_with_static(dir.path())
            .oneshot(Request::get("/static/style.css").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"body { margin: 0; }");
    }
}
