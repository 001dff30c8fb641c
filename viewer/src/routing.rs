use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use shared::Coordinate;
use thiserror::Error;

use crate::config::ViewerConfig;

#[derive(Debug, Error)]
pub enum RoutingError {
    #[error("routing unavailable for {coordinates}: {reason}")]
    Unavailable {
        coordinates: String,
        #[source]
        reason: UnavailableReason,
    },
}

#[derive(Debug, Error)]
pub enum UnavailableReason {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("undecodable response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("service answered with code {0:?}")]
    Status(String),
    #[error("no route returned")]
    NoRoute,
    #[error("route has an empty geometry")]
    EmptyGeometry,
}

impl RoutingError {
    pub fn unavailable(coordinates: impl Into<String>, reason: impl Into<UnavailableReason>) -> Self {
        Self::Unavailable {
            coordinates: coordinates.into(),
            reason: reason.into(),
        }
    }

    pub fn coordinates(&self) -> &str {
        match self {
            Self::Unavailable { coordinates, .. } => coordinates,
        }
    }
}

/// A service that turns waypoints into a road-following path.
///
/// Implementations return the path in `(lat, lng)` order and must report any
/// failure, including "no route", as [`RoutingError::Unavailable`] rather than
/// an empty path.
#[async_trait]
pub trait RoutingService: Send + Sync {
    async fn route(&self, points: &[Coordinate]) -> Result<Vec<Coordinate>, RoutingError>;
}

/// Resolves the drawable path through `points`.
///
/// Fewer than two points cannot be routed and are returned as they are.
pub async fn resolve_path<R>(service: &R, points: &[Coordinate]) -> Result<Vec<Coordinate>, RoutingError>
where
    R: RoutingService + ?Sized,
{
    if points.len() < 2 {
        return Ok(points.to_vec());
    }
    service.route(points).await
}

pub fn direct_path(start: Coordinate, end: Coordinate) -> Vec<Coordinate> {
    vec![start, end]
}

/// `lng,lat;lng,lat;...`
pub fn coordinate_string(points: &[Coordinate]) -> String {
    points
        .iter()
        .map(|point| point.to_lng_lat())
        .collect::<Vec<_>>()
        .join(";")
}

/// Draws every hop as a straight line; used when no routing service is wanted.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectRouter;

#[async_trait]
impl RoutingService for DirectRouter {
    async fn route(&self, points: &[Coordinate]) -> Result<Vec<Coordinate>, RoutingError> {
        Ok(points.to_vec())
    }
}

/// Client for the OSRM `route/v1` HTTP API.
#[derive(Debug, Clone)]
pub struct OsrmClient {
    client: reqwest::Client,
    base_url: String,
    profile: String,
}

impl OsrmClient {
    pub fn new(base_url: impl Into<String>, profile: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            profile: profile.into(),
        })
    }

    pub fn from_config(config: &ViewerConfig) -> Result<Self, reqwest::Error> {
        Self::new(&config.osrm_url, &config.osrm_profile, config.request_timeout)
    }

    pub fn route_url(&self, coordinates: &str) -> String {
        format!("{}/route/v1/{}/{}", self.base_url, self.profile, coordinates)
    }
}

#[async_trait]
impl RoutingService for OsrmClient {
    async fn route(&self, points: &[Coordinate]) -> Result<Vec<Coordinate>, RoutingError> {
        let coordinates = coordinate_string(points);
        tracing::debug!("requesting road path for {coordinates}");

        let response = self
            .client
            .get(self.route_url(&coordinates))
            .query(&[("overview", "full"), ("geometries", "geojson")])
            .send()
            .await
            .map_err(|err| RoutingError::unavailable(coordinates.as_str(), err))?;
        // OSRM reports failures such as `NoRoute` in a JSON body with a 4xx
        // status, so the body is decoded whatever the status.
        let body = response
            .bytes()
            .await
            .map_err(|err| RoutingError::unavailable(coordinates.as_str(), err))?;

        parse_route_response(&coordinates, &body)
    }
}

#[derive(Debug, Deserialize)]
struct OsrmResponse {
    code: String,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    geometry: OsrmGeometry,
}

#[derive(Debug, Deserialize)]
struct OsrmGeometry {
    coordinates: Vec<[f64; 2]>,
}

/// Decodes an OSRM route response into a `(lat, lng)` path.
pub fn parse_route_response(coordinates: &str, body: &[u8]) -> Result<Vec<Coordinate>, RoutingError> {
    let unavailable = |reason: UnavailableReason| RoutingError::unavailable(coordinates, reason);

    let response: OsrmResponse = serde_json::from_slice(body).map_err(|err| unavailable(err.into()))?;
    if response.code != "Ok" {
        return Err(unavailable(UnavailableReason::Status(response.code)));
    }
    let route = response
        .routes
        .into_iter()
        .next()
        .ok_or_else(|| unavailable(UnavailableReason::NoRoute))?;
    if route.geometry.coordinates.is_empty() {
        return Err(unavailable(UnavailableReason::EmptyGeometry));
    }

    Ok(route
        .geometry
        .coordinates
        .into_iter()
        .map(|[lng, lat]| Coordinate::new(lat, lng))
        .collect())
}
