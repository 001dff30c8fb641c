//! In-memory [`MapSurface`] that records what was drawn and exports it as
//! GeoJSON.

use std::collections::BTreeMap;

use geojson::{Feature, FeatureCollection, Geometry, JsonObject, JsonValue, Value};

use crate::geometry::Bounds;
use crate::surface::{BaseLayer, MapSurface, MarkerIcon, MarkerSpec, OverlayId, PolylineSpec};

#[derive(Debug, Clone, PartialEq)]
pub enum Overlay {
    Polyline(PolylineSpec),
    Marker(MarkerSpec),
}

#[derive(Debug, Clone)]
pub struct Scene {
    overlays: BTreeMap<OverlayId, Overlay>,
    next_id: u64,
    zoom: f64,
    viewport: Option<Bounds>,
    base_layer: BaseLayer,
    routing_indicator: bool,
    photo_detail: Option<String>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(4.0)
    }
}

impl Scene {
    pub fn new(zoom: f64) -> Self {
        Self {
            overlays: BTreeMap::new(),
            next_id: 0,
            zoom,
            viewport: None,
            base_layer: BaseLayer::default(),
            routing_indicator: false,
            photo_detail: None,
        }
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom;
    }

    pub fn overlay(&self, id: OverlayId) -> Option<&Overlay> {
        self.overlays.get(&id)
    }

    pub fn len(&self) -> usize {
        self.overlays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overlays.is_empty()
    }

    /// Polylines in drawing order.
    pub fn polylines(&self) -> impl Iterator<Item = &PolylineSpec> {
        self.overlays.values().filter_map(|overlay| match overlay {
            Overlay::Polyline(polyline) => Some(polyline),
            Overlay::Marker(_) => None,
        })
    }

    /// Markers in drawing order, with their ids.
    pub fn markers(&self) -> impl Iterator<Item = (OverlayId, &MarkerSpec)> {
        self.overlays.iter().filter_map(|(id, overlay)| match overlay {
            Overlay::Marker(marker) => Some((*id, marker)),
            Overlay::Polyline(_) => None,
        })
    }

    pub fn viewport(&self) -> Option<Bounds> {
        self.viewport
    }

    pub fn base_layer(&self) -> BaseLayer {
        self.base_layer
    }

    pub fn routing_indicator(&self) -> bool {
        self.routing_indicator
    }

    pub fn photo_detail(&self) -> Option<&str> {
        self.photo_detail.as_deref()
    }

    fn insert(&mut self, overlay: Overlay) -> OverlayId {
        let id = OverlayId(self.next_id);
        self.next_id += 1;
        self.overlays.insert(id, overlay);
        id
    }

    /// The drawn overlays as a GeoJSON `FeatureCollection`. Positions are
    /// written `[lng, lat]`; the viewport, if fitted, becomes the `bbox`.
    pub fn to_geojson(&self) -> FeatureCollection {
        let features = self
            .overlays
            .values()
            .map(|overlay| match overlay {
                Overlay::Marker(marker) => marker_feature(marker),
                Overlay::Polyline(polyline) => polyline_feature(polyline),
            })
            .collect();

        let mut foreign_members = JsonObject::new();
        foreign_members.insert("baseLayer".to_string(), JsonValue::from(self.base_layer.as_str()));

        FeatureCollection {
            bbox: self
                .viewport
                .map(|bounds| vec![bounds.west, bounds.south, bounds.east, bounds.north]),
            features,
            foreign_members: Some(foreign_members),
        }
    }
}

fn marker_feature(marker: &MarkerSpec) -> Feature {
    let mut feature = Feature::from(Geometry::new(Value::Point(vec![
        marker.position.lng,
        marker.position.lat,
    ])));
    feature.set_property("popup", marker.popup_html.clone());
    feature.set_property("iconSize", marker.icon.size);
    feature.set_property("borderWidth", marker.icon.border_width);
    feature
}

fn polyline_feature(polyline: &PolylineSpec) -> Feature {
    let line = polyline.path.iter().map(|point| vec![point.lng, point.lat]).collect();
    let mut feature = Feature::from(Geometry::new(Value::LineString(line)));
    feature.set_property("stroke", polyline.color.clone());
    feature.set_property("stroke-width", polyline.weight);
    feature.set_property("stroke-opacity", polyline.opacity);
    feature.set_property("dashArray", polyline.dash_array.clone());
    feature.set_property("kind", polyline.kind.as_str());
    feature.set_property("popup", polyline.popup_html.clone());
    feature
}

impl MapSurface for Scene {
    fn zoom(&self) -> f64 {
        self.zoom
    }

    fn add_polyline(&mut self, polyline: PolylineSpec) -> OverlayId {
        self.insert(Overlay::Polyline(polyline))
    }

    fn add_marker(&mut self, marker: MarkerSpec) -> OverlayId {
        self.insert(Overlay::Marker(marker))
    }

    fn remove_overlay(&mut self, id: OverlayId) {
        self.overlays.remove(&id);
    }

    fn resize_marker(&mut self, id: OverlayId, icon: MarkerIcon) {
        if let Some(Overlay::Marker(marker)) = self.overlays.get_mut(&id) {
            marker.icon = icon;
        }
    }

    fn fit_bounds(&mut self, bounds: Bounds) {
        self.viewport = Some(bounds);
    }

    fn set_base_layer(&mut self, layer: BaseLayer) {
        self.base_layer = layer;
    }

    fn set_routing_indicator(&mut self, visible: bool) {
        self.routing_indicator = visible;
    }

    fn show_photo_detail(&mut self, html: &str) {
        self.photo_detail = Some(html.to_string());
    }

    fn hide_photo_detail(&mut self) {
        self.photo_detail = None;
    }
}
