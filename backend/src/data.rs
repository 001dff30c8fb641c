use std::{
    fs,
    io::{self, Read},
    path::Path,
};

use crate::error::DataError;
use crate::models::{Location, Photo, Route, RoutePoint, TravelData};

pub fn from_reader(reader: impl Read) -> Result<TravelData, DataError> {
    Ok(serde_json::from_reader(reader)?)
}

pub fn from_file(path: impl AsRef<Path>) -> Result<TravelData, DataError> {
    let file = fs::File::open(path)?;
    from_reader(io::BufReader::new(file))
}

pub fn write_to_path(data: &TravelData, path: impl AsRef<Path>) -> Result<(), DataError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_vec_pretty(data)?;
    fs::write(path, json)?;
    Ok(())
}

/// Loads the itinerary, falling back to the built-in sample trip.
///
/// A missing file is seeded with the sample so it can be edited; an existing
/// but unreadable file is left untouched.
pub fn load_or_default(path: impl AsRef<Path>) -> TravelData {
    let path = path.as_ref();
    match from_file(path) {
        Ok(data) => {
            tracing::info!(
                "loaded travel data from {}: {} locations, {} routes, {} days",
                path.display(),
                data.locations.len(),
                data.routes.len(),
                data.total_days
            );
            data
        }
        Err(DataError::Io(err)) if err.kind() == io::ErrorKind::NotFound => {
            tracing::warn!("{} not found, using the sample itinerary", path.display());
            let data = default_itinerary();
            match write_to_path(&data, path) {
                Ok(()) => tracing::info!("wrote sample itinerary to {}", path.display()),
                Err(err) => tracing::error!("failed to write {}: {}", path.display(), err),
            }
            data
        }
        Err(err) => {
            tracing::warn!(
                "could not load {} ({}), using the sample itinerary",
                path.display(),
                err
            );
            default_itinerary()
        }
    }
}

fn photo(id: &str, caption: &str) -> Photo {
    Photo {
        thumbnail: format!("https://images.unsplash.com/photo-{id}?w=150&h=150&fit=crop"),
        full: format!("https://images.unsplash.com/photo-{id}?w=800&h=600&fit=crop"),
        caption: caption.into(),
    }
}

fn location(id: i64, name: &str, lat: f64, lng: f64, description: &str, day: u32, photos: Vec<Photo>) -> Location {
    Location {
        id,
        name: name.into(),
        lat,
        lng,
        description: description.into(),
        photos,
        day,
    }
}

fn route(name: &str, color: &str, day: u32, points: Vec<RoutePoint>) -> Route {
    Route {
        points,
        color: color.into(),
        name: name.into(),
        day,
    }
}

/// Three days around Taipei.
pub fn default_itinerary() -> TravelData {
    TravelData {
        total_days: 3,
        locations: vec![
            location(
                1,
                "Taipei 101",
                25.0340,
                121.5645,
                "The city's best known landmark tower",
                1,
                vec![
                    photo("1566022671514-a2e75cec97eb", "Taipei 101 from the street"),
                    photo("1570994728901-3ad0cf27bafb", "Taipei 101 at night"),
                ],
            ),
            location(
                2,
                "Chiang Kai-shek Memorial Hall",
                25.0408,
                121.5188,
                "A major historical and cultural landmark",
                1,
                vec![photo("1587139223577-f48c6cd8b6c4", "Main hall")],
            ),
            location(
                3,
                "Ximending",
                25.0421,
                121.5069,
                "Busy shopping district",
                2,
                vec![photo("1536098561742-ca998e48cbcc", "Ximending street scene")],
            ),
            location(
                4,
                "Shilin Night Market",
                25.0878,
                121.5241,
                "One of the largest night markets in Taipei",
                2,
                vec![photo("1555939594-58d7cb561ad1", "Night market food")],
            ),
            location(
                5,
                "Tamsui Old Street",
                25.1677,
                121.4425,
                "Sunset over the Tamsui river",
                3,
                vec![photo("1590736969955-71cc94901144", "Tamsui sunset")],
            ),
        ],
        routes: vec![
            route(
                "Day 1 - City sights",
                "#3388ff",
                1,
                vec![
                    RoutePoint::new(25.0340, 121.5645, 0),
                    RoutePoint::new(25.0408, 121.5188, 0),
                ],
            ),
            route(
                "Day 2 - Shopping and food",
                "#ff6b6b",
                2,
                vec![
                    RoutePoint::new(25.0421, 121.5069, 0),
                    RoutePoint::new(25.0878, 121.5241, 0),
                ],
            ),
            route(
                "Day 3 - Tamsui",
                "#4ecdc4",
                3,
                vec![
                    RoutePoint::new(25.0878, 121.5241, 0),
                    RoutePoint::new(25.1677, 121.4425, 0),
                ],
            ),
        ],
    }
}
