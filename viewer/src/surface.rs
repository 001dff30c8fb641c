//! The map display the viewer draws on.
//!
//! Tile rendering, panning and gestures belong to the map implementation; the
//! viewer only adds and removes overlays, moves the viewport and switches the
//! base layer through [`MapSurface`].

use clap::ValueEnum;
use serde::Serialize;
use shared::Coordinate;

use crate::geometry::Bounds;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct OverlayId(pub u64);

/// How a drawn segment came to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    /// Road geometry from the routing service.
    Routed,
    /// Straight link requested by the itinerary.
    Direct,
    /// Straight link drawn because the routing service failed.
    Degraded,
}

impl SegmentKind {
    pub fn is_dashed(self) -> bool {
        !matches!(self, Self::Routed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Routed => "routed",
            Self::Direct => "direct",
            Self::Degraded => "degraded",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PolylineSpec {
    pub path: Vec<Coordinate>,
    pub color: String,
    pub weight: f64,
    pub opacity: f64,
    pub dash_array: Option<String>,
    pub popup_html: String,
    pub kind: SegmentKind,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerIcon {
    pub size: u32,
    pub border_width: f64,
    /// Pixel offset of the coordinate inside the icon, `[x, y]`.
    pub anchor: [f64; 2],
}

/// Action a marker performs when the pointer enters its popup thumbnail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverAction {
    LoadLocationPhotos(i64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarkerSpec {
    pub position: Coordinate,
    pub icon: MarkerIcon,
    pub popup_html: String,
    pub on_thumbnail_hover: Option<HoverAction>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileLayer {
    pub url: &'static str,
    pub attribution: &'static str,
    pub max_zoom: u8,
}

const STREET_TILES: TileLayer = TileLayer {
    url: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png",
    attribution: "© OpenStreetMap contributors",
    max_zoom: 19,
};

const SATELLITE_TILES: TileLayer = TileLayer {
    url: "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{z}/{y}/{x}",
    attribution: "© Esri",
    max_zoom: 19,
};

const SATELLITE_LABELS: TileLayer = TileLayer {
    url: "https://server.arcgisonline.com/ArcGIS/rest/services/Reference/World_Boundaries_and_Places/MapServer/tile/{z}/{y}/{x}",
    attribution: "© Esri",
    max_zoom: 19,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BaseLayer {
    Street,
    #[default]
    Satellite,
}

impl BaseLayer {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Street => "street",
            Self::Satellite => "satellite",
        }
    }

    /// Tile layers stacked bottom to top.
    pub fn tile_layers(self) -> &'static [TileLayer] {
        match self {
            Self::Street => &[STREET_TILES],
            Self::Satellite => &[SATELLITE_TILES, SATELLITE_LABELS],
        }
    }
}

pub trait MapSurface {
    fn zoom(&self) -> f64;

    fn add_polyline(&mut self, polyline: PolylineSpec) -> OverlayId;

    fn add_marker(&mut self, marker: MarkerSpec) -> OverlayId;

    /// Removing an unknown id is a no-op.
    fn remove_overlay(&mut self, id: OverlayId);

    /// Updates a marker's icon in place.
    fn resize_marker(&mut self, id: OverlayId, icon: MarkerIcon);

    fn fit_bounds(&mut self, bounds: Bounds);

    fn set_base_layer(&mut self, layer: BaseLayer);

    /// The "planning routes" notice shown while a route pass runs.
    fn set_routing_indicator(&mut self, visible: bool);

    fn show_photo_detail(&mut self, html: &str);

    fn hide_photo_detail(&mut self);
}
