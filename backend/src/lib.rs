pub mod data;
pub mod error;
pub mod models;
pub mod photos;

use std::{path::PathBuf, sync::Arc};

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::Html,
    routing::get,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::models::{DaysResponse, Location, PhotoQuery, Route, TravelData};
use crate::photos::render_photo_detail;

#[derive(Clone)]
pub struct AppState {
    pub data: Arc<TravelData>,
    pub document_root: PathBuf,
}

impl AppState {
    pub fn new(data: TravelData, document_root: impl Into<PathBuf>) -> Self {
        Self {
            data: Arc::new(data),
            document_root: document_root.into(),
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);
    let static_files = ServeDir::new(&state.document_root);

    Router::new()
        .route("/api/days", get(days_handler))
        .route("/api/routes", get(routes_handler))
        .route("/api/locations", get(locations_handler))
        .route("/api/location-photos", get(location_photos_handler))
        .fallback_service(static_files)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn days_handler(State(state): State<AppState>) -> Json<DaysResponse> {
    Json(DaysResponse {
        total_days: state.data.total_days,
    })
}

async fn routes_handler(State(state): State<AppState>) -> Json<Vec<Route>> {
    Json(state.data.routes.clone())
}

async fn locations_handler(State(state): State<AppState>) -> Json<Vec<Location>> {
    Json(state.data.locations.clone())
}

async fn location_photos_handler(
    State(state): State<AppState>,
    Query(query): Query<PhotoQuery>,
) -> Result<Html<String>, (StatusCode, &'static str)> {
    let location = query
        .location_id()
        .and_then(|id| state.data.location(id))
        .ok_or_else(|| {
            tracing::debug!("photo detail requested for unknown location {:?}", query.id);
            (StatusCode::NOT_FOUND, "Location not found")
        })?;

    Ok(Html(render_photo_detail(location)))
}
