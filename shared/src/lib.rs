use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// `lng,lat` as routing services expect it.
    pub fn to_lng_lat(self) -> String {
        format!("{},{}", self.lng, self.lat)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Photo {
    pub thumbnail: String,
    #[serde(default)]
    pub full: String,
    #[serde(default)]
    pub caption: String,
}

impl Photo {
    /// Full-size URL, or the thumbnail when no full-size image was recorded.
    pub fn full_or_thumbnail(&self) -> &str {
        if self.full.is_empty() {
            &self.thumbnail
        } else {
            &self.full
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: i64,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub photos: Vec<Photo>,
    pub day: u32,
}

impl Location {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lng)
    }

    pub fn first_photo(&self) -> Option<&Photo> {
        self.photos.first()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoutePoint {
    pub lat: f64,
    pub lng: f64,
    /// Non-zero when the segment arriving at this point follows real roads.
    #[serde(default)]
    pub routez: i32,
}

impl RoutePoint {
    pub fn new(lat: f64, lng: f64, routez: i32) -> Self {
        Self { lat, lng, routez }
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lng)
    }

    pub fn is_live_routed(&self) -> bool {
        self.routez != 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub points: Vec<RoutePoint>,
    pub color: String,
    pub name: String,
    pub day: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaysResponse {
    #[serde(rename = "totalDays")]
    pub total_days: u32,
}

/// The document the data server is backed by.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TravelData {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub locations: Vec<Location>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub routes: Vec<Route>,
    #[serde(rename = "totalDays", default)]
    pub total_days: u32,
}

impl TravelData {
    pub fn location(&self, id: i64) -> Option<&Location> {
        self.locations.iter().find(|location| location.id == id)
    }
}

/// Reads `null` as an empty list; Go encodes a nil slice that way.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Escapes text for use inside HTML element content or quoted attributes.
pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
