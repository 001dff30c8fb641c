use serde::Deserialize;

pub use shared::{Coordinate, DaysResponse, Location, Photo, Route, RoutePoint, TravelData};

/// Query string of `GET /api/location-photos`.
///
/// The id is kept as text so an unparsable value is answered like an unknown
/// location instead of a query rejection.
#[derive(Debug, Deserialize)]
pub struct PhotoQuery {
    pub id: Option<String>,
}

impl PhotoQuery {
    pub fn location_id(&self) -> Option<i64> {
        self.id.as_deref()?.trim().parse().ok()
    }
}
