use crate::surface::MarkerIcon;

const MIN_SIZE: f64 = 20.0;
const MAX_SIZE: f64 = 50.0;
const MIN_ZOOM: f64 = 10.0;
const MAX_ZOOM: f64 = 19.0;

/// Marker diameter in pixels for a map zoom level.
pub fn marker_size(zoom: f64) -> u32 {
    if zoom <= MIN_ZOOM {
        return MIN_SIZE as u32;
    }
    if zoom >= MAX_ZOOM {
        return MAX_SIZE as u32;
    }
    let t = (zoom - MIN_ZOOM) / (MAX_ZOOM - MIN_ZOOM);
    (MIN_SIZE + t * (MAX_SIZE - MIN_SIZE)).round() as u32
}

pub fn marker_icon(zoom: f64) -> MarkerIcon {
    let size = marker_size(zoom);
    let half = f64::from(size) / 2.0;
    MarkerIcon {
        size,
        border_width: (f64::from(size) / 10.0).max(2.0),
        anchor: [half, half],
    }
}
