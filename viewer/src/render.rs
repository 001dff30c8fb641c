//! Turns the itinerary into map overlays for the current day filter.
//!
//! Both renderers own the overlays they drew and tear all of them down at the
//! start of every pass; nothing is diffed.

use futures::future::join_all;
use shared::{Coordinate, Location, Route};

use crate::config::{FetchMode, ViewerConfig};
use crate::geometry::{Bounds, SegmentPlan, plan_segments};
use crate::popup::{location_popup, route_popup};
use crate::routing::{RoutingService, direct_path, resolve_path};
use crate::sizing::marker_icon;
use crate::state::{DayFilter, FilterState};
use crate::surface::{HoverAction, MapSurface, MarkerSpec, OverlayId, PolylineSpec, SegmentKind};

#[derive(Debug, Clone, PartialEq)]
pub struct RouteStyle {
    pub weight: f64,
    pub opacity: f64,
    pub dash_array: String,
    pub fit_padding: f64,
}

impl Default for RouteStyle {
    fn default() -> Self {
        Self::from(&ViewerConfig::default())
    }
}

impl From<&ViewerConfig> for RouteStyle {
    fn from(config: &ViewerConfig) -> Self {
        Self {
            weight: config.line_weight,
            opacity: config.line_opacity,
            dash_array: config.dash_array.clone(),
            fit_padding: config.fit_padding,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSegment {
    pub index: usize,
    pub path: Vec<Coordinate>,
    pub kind: SegmentKind,
}

/// Resolves one planned segment. Never fails: a routing failure degrades to
/// the straight line between the endpoints.
pub async fn resolve_segment<R>(router: &R, plan: &SegmentPlan) -> ResolvedSegment
where
    R: RoutingService + ?Sized,
{
    let direct = direct_path(plan.start, plan.end);
    if !plan.live {
        return ResolvedSegment {
            index: plan.index,
            path: direct,
            kind: SegmentKind::Direct,
        };
    }

    match resolve_path(router, &direct).await {
        Ok(path) => ResolvedSegment {
            index: plan.index,
            path,
            kind: SegmentKind::Routed,
        },
        Err(err) => {
            tracing::warn!("{err}; drawing a straight line instead");
            ResolvedSegment {
                index: plan.index,
                path: direct,
                kind: SegmentKind::Degraded,
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RouteRenderReport {
    pub drawn: usize,
    pub routed: usize,
    pub direct: usize,
    pub degraded: usize,
    /// The day filter changed before the pass finished; its remaining
    /// segments and the viewport fit were dropped.
    pub superseded: bool,
}

impl RouteRenderReport {
    fn record(&mut self, kind: SegmentKind) {
        self.drawn += 1;
        match kind {
            SegmentKind::Routed => self.routed += 1,
            SegmentKind::Direct => self.direct += 1,
            SegmentKind::Degraded => self.degraded += 1,
        }
    }
}

#[derive(Debug, Default)]
pub struct RouteRenderer {
    polylines: Vec<OverlayId>,
    style: RouteStyle,
    fetch_mode: FetchMode,
}

impl RouteRenderer {
    pub fn new(style: RouteStyle, fetch_mode: FetchMode) -> Self {
        Self {
            polylines: Vec::new(),
            style,
            fetch_mode,
        }
    }

    pub fn polylines(&self) -> &[OverlayId] {
        &self.polylines
    }

    pub fn clear<S: MapSurface>(&mut self, surface: &mut S) {
        for id in self.polylines.drain(..) {
            surface.remove_overlay(id);
        }
    }

    /// Redraws every route the filter selects.
    pub async fn render<S, R>(
        &mut self,
        surface: &mut S,
        router: &R,
        routes: &[Route],
        filter: &FilterState,
    ) -> RouteRenderReport
    where
        S: MapSurface,
        R: RoutingService + ?Sized,
    {
        self.clear(surface);

        let pass = filter.begin_pass();
        let in_scope: Vec<&Route> = routes.iter().filter(|route| pass.filter().includes(route.day)).collect();
        let mut report = RouteRenderReport::default();
        let mut extent: Option<Bounds> = None;

        if !in_scope.is_empty() {
            surface.set_routing_indicator(true);
        }

        let fetch_mode = self.fetch_mode;
        'routes: for route in in_scope {
            let plans = plan_segments(route);
            match fetch_mode {
                FetchMode::Sequential => {
                    for plan in &plans {
                        let segment = resolve_segment(router, plan).await;
                        if !filter.is_current(pass) {
                            report.superseded = true;
                            break 'routes;
                        }
                        self.draw(surface, route, &segment, &mut extent, &mut report);
                    }
                }
                FetchMode::PerRoute => {
                    // join_all keeps input order, so segments still draw in point order.
                    let segments = join_all(plans.iter().map(|plan| resolve_segment(router, plan))).await;
                    if !filter.is_current(pass) {
                        report.superseded = true;
                        break 'routes;
                    }
                    for segment in &segments {
                        self.draw(surface, route, segment, &mut extent, &mut report);
                    }
                }
            }
        }

        surface.set_routing_indicator(false);

        if report.superseded {
            tracing::info!(
                "route pass for {:?} superseded after {} segments",
                pass.filter(),
                report.drawn
            );
            return report;
        }

        if let Some(extent) = extent {
            surface.fit_bounds(extent.pad(self.style.fit_padding));
        }
        tracing::info!(
            "drew {} route segments for {:?} ({} routed, {} direct, {} degraded)",
            report.drawn,
            pass.filter(),
            report.routed,
            report.direct,
            report.degraded
        );
        report
    }

    fn draw<S: MapSurface>(
        &mut self,
        surface: &mut S,
        route: &Route,
        segment: &ResolvedSegment,
        extent: &mut Option<Bounds>,
        report: &mut RouteRenderReport,
    ) {
        if let Some(bounds) = Bounds::from_coordinates(segment.path.iter().copied()) {
            *extent = Some(match *extent {
                Some(current) => current.union(bounds),
                None => bounds,
            });
        }

        tracing::debug!(
            "route {:?} segment {}: {} points ({})",
            route.name,
            segment.index,
            segment.path.len(),
            segment.kind.as_str()
        );
        let id = surface.add_polyline(PolylineSpec {
            path: segment.path.clone(),
            color: route.color.clone(),
            weight: self.style.weight,
            opacity: self.style.opacity,
            dash_array: segment.kind.is_dashed().then(|| self.style.dash_array.clone()),
            popup_html: route_popup(&route.name),
            kind: segment.kind,
        });
        self.polylines.push(id);
        report.record(segment.kind);
    }
}

#[derive(Debug, Default)]
pub struct LocationRenderer {
    markers: Vec<OverlayId>,
}

impl LocationRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn markers(&self) -> &[OverlayId] {
        &self.markers
    }

    /// Redraws one marker per location the filter selects and returns how
    /// many were drawn.
    pub fn render<S: MapSurface>(&mut self, surface: &mut S, locations: &[Location], filter: DayFilter) -> usize {
        for id in self.markers.drain(..) {
            surface.remove_overlay(id);
        }

        let icon = marker_icon(surface.zoom());
        for location in locations.iter().filter(|location| filter.includes(location.day)) {
            let id = surface.add_marker(MarkerSpec {
                position: location.coordinate(),
                icon,
                popup_html: location_popup(location),
                on_thumbnail_hover: location
                    .first_photo()
                    .map(|_| HoverAction::LoadLocationPhotos(location.id)),
            });
            self.markers.push(id);
        }

        tracing::debug!("drew {} location markers for {:?}", self.markers.len(), filter);
        self.markers.len()
    }

    /// Resizes the existing markers for a new zoom level.
    pub fn refresh_sizes<S: MapSurface>(&self, surface: &mut S, zoom: f64) {
        let icon = marker_icon(zoom);
        for id in &self.markers {
            surface.resize_marker(*id, icon);
        }
    }
}
