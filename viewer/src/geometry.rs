use serde::Serialize;
use shared::{Coordinate, Route, RoutePoint};

/// Returns the coordinate segment `index` of a route starts from.
///
/// A straight (non live-routed) point always links to its immediate
/// predecessor. A live-routed point links back to the nearest earlier
/// live-routed point, bridging any run of straight detours, and falls back to
/// the immediate predecessor when there is none.
///
/// `None` when `index` does not name a segment (`0` or past the end).
pub fn resolve_segment_start(points: &[RoutePoint], index: usize) -> Option<Coordinate> {
    if index == 0 || index >= points.len() {
        return None;
    }

    let previous = points[index - 1].coordinate();
    if !points[index].is_live_routed() {
        return Some(previous);
    }

    let anchor = points[..index]
        .iter()
        .rev()
        .find(|point| point.is_live_routed())
        .map(RoutePoint::coordinate);
    Some(anchor.unwrap_or(previous))
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentPlan {
    pub index: usize,
    pub start: Coordinate,
    pub end: Coordinate,
    pub live: bool,
}

/// One plan per drawable segment, in point order.
pub fn plan_segments(route: &Route) -> Vec<SegmentPlan> {
    (1..route.points.len())
        .filter_map(|index| {
            let start = resolve_segment_start(&route.points, index)?;
            let end = &route.points[index];
            Some(SegmentPlan {
                index,
                start,
                end: end.coordinate(),
                live: end.is_live_routed(),
            })
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl Bounds {
    pub fn from_point(point: Coordinate) -> Self {
        Self {
            south: point.lat,
            west: point.lng,
            north: point.lat,
            east: point.lng,
        }
    }

    pub fn from_coordinates(points: impl IntoIterator<Item = Coordinate>) -> Option<Self> {
        let mut points = points.into_iter();
        let mut bounds = Self::from_point(points.next()?);
        for point in points {
            bounds.extend(point);
        }
        Some(bounds)
    }

    pub fn extend(&mut self, point: Coordinate) {
        self.south = self.south.min(point.lat);
        self.west = self.west.min(point.lng);
        self.north = self.north.max(point.lat);
        self.east = self.east.max(point.lng);
    }

    pub fn union(self, other: Self) -> Self {
        Self {
            south: self.south.min(other.south),
            west: self.west.min(other.west),
            north: self.north.max(other.north),
            east: self.east.max(other.east),
        }
    }

    /// Grows every side by `ratio` of the box's span on that axis.
    pub fn pad(self, ratio: f64) -> Self {
        let lat_margin = (self.north - self.south).abs() * ratio;
        let lng_margin = (self.east - self.west).abs() * ratio;
        Self {
            south: self.south - lat_margin,
            west: self.west - lng_margin,
            north: self.north + lat_margin,
            east: self.east + lng_margin,
        }
    }

    pub fn contains(&self, point: Coordinate) -> bool {
        (self.south..=self.north).contains(&point.lat) && (self.west..=self.east).contains(&point.lng)
    }
}
