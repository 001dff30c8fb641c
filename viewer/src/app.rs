use std::sync::Arc;

use shared::{Location, Route};

use crate::api::TravelApi;
use crate::config::ViewerConfig;
use crate::controls::{DayButton, LegendEntry, day_buttons, legend};
use crate::render::{LocationRenderer, RouteRenderReport, RouteRenderer, RouteStyle};
use crate::routing::RoutingService;
use crate::state::{DayFilter, FilterState};
use crate::surface::{BaseLayer, HoverAction, MapSurface};

/// Something the user did, with the element it happened on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UiEvent {
    /// A day button; `0` is "All".
    DaySelected(u32),
    MapStyleSelected(BaseLayer),
    ZoomChanged(f64),
    /// A marker's registered thumbnail-hover action fired.
    Hover(HoverAction),
    MapClicked,
}

#[derive(Debug, Default)]
struct PhotoPanel {
    location: Option<i64>,
    visible: bool,
}

impl PhotoPanel {
    fn is_showing(&self, id: i64) -> bool {
        self.visible && self.location == Some(id)
    }
}

/// The travel map: fetched itinerary, renderers and UI state in one place.
pub struct Viewer<S, R, A> {
    surface: S,
    router: R,
    api: A,
    filter: Arc<FilterState>,
    base_layer: BaseLayer,
    total_days: u32,
    routes: Vec<Route>,
    locations: Vec<Location>,
    route_renderer: RouteRenderer,
    location_renderer: LocationRenderer,
    photo_panel: PhotoPanel,
}

impl<S, R, A> Viewer<S, R, A>
where
    S: MapSurface,
    R: RoutingService,
    A: TravelApi,
{
    pub fn new(mut surface: S, router: R, api: A, config: &ViewerConfig) -> Self {
        surface.set_base_layer(config.base_layer);
        Self {
            surface,
            router,
            api,
            filter: Arc::new(FilterState::default()),
            base_layer: config.base_layer,
            total_days: 0,
            routes: Vec::new(),
            locations: Vec::new(),
            route_renderer: RouteRenderer::new(RouteStyle::from(config), config.fetch_mode),
            location_renderer: LocationRenderer::new(),
            photo_panel: PhotoPanel::default(),
        }
    }

    /// Replaces the filter state, so a handle created before the viewer can
    /// drive it.
    pub fn with_filter(mut self, filter: Arc<FilterState>) -> Self {
        self.filter = filter;
        self
    }

    /// Shared handle for changing the day filter while a route pass is
    /// awaiting the routing service. The running pass stops and
    /// [`Viewer::render_routes`] redraws for the new filter.
    pub fn filter_handle(&self) -> Arc<FilterState> {
        Arc::clone(&self.filter)
    }

    pub fn current_filter(&self) -> DayFilter {
        self.filter.current()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    pub fn base_layer(&self) -> BaseLayer {
        self.base_layer
    }

    pub fn total_days(&self) -> u32 {
        self.total_days
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn day_buttons(&self) -> Vec<DayButton> {
        day_buttons(self.total_days, self.current_filter())
    }

    pub fn legend(&self) -> Vec<LegendEntry> {
        legend(&self.routes)
    }

    /// Fetches the day count, routes and locations, then draws what the
    /// current filter selects. A failed fetch leaves only its own part empty.
    pub async fn load(&mut self) {
        let (days, routes, locations) =
            futures::join!(self.api.total_days(), self.api.routes(), self.api.locations());

        match days {
            Ok(total_days) => self.total_days = total_days,
            Err(err) => tracing::error!("failed to load day count: {err}"),
        }
        match locations {
            Ok(locations) => {
                self.locations = locations;
                self.render_locations();
            }
            Err(err) => tracing::error!("failed to load locations: {err}"),
        }
        match routes {
            Ok(routes) => {
                self.routes = routes;
                self.render_routes().await;
            }
            Err(err) => tracing::error!("failed to load routes: {err}"),
        }
    }

    pub async fn handle(&mut self, event: UiEvent) {
        match event {
            UiEvent::DaySelected(day) => {
                self.select_day(day).await;
            }
            UiEvent::MapStyleSelected(layer) => self.switch_base_layer(layer),
            UiEvent::ZoomChanged(zoom) => self.location_renderer.refresh_sizes(&mut self.surface, zoom),
            UiEvent::Hover(HoverAction::LoadLocationPhotos(id)) => {
                self.show_location_photos(id).await;
            }
            UiEvent::MapClicked => self.close_photo_detail(),
        }
    }

    /// Switches the day filter and redraws markers and routes.
    pub async fn select_day(&mut self, day: u32) -> RouteRenderReport {
        let filter = DayFilter::from_index(day);
        self.filter.select(filter);
        tracing::info!("day filter set to {filter:?}");
        self.render_locations();
        self.render_routes().await
    }

    pub fn render_locations(&mut self) -> usize {
        let filter = self.filter.current();
        self.location_renderer
            .render(&mut self.surface, &self.locations, filter)
    }

    /// Draws the routes for the current filter. A pass overtaken by a filter
    /// change through [`Viewer::filter_handle`] is redrawn, markers included,
    /// for the filter that replaced it.
    pub async fn render_routes(&mut self) -> RouteRenderReport {
        loop {
            let report = self
                .route_renderer
                .render(&mut self.surface, &self.router, &self.routes, &self.filter)
                .await;
            if !report.superseded {
                return report;
            }
            tracing::info!("day filter changed to {:?} mid-pass; redrawing", self.filter.current());
            self.render_locations();
        }
    }

    pub fn switch_base_layer(&mut self, layer: BaseLayer) {
        if layer == self.base_layer {
            return;
        }
        self.surface.set_base_layer(layer);
        self.base_layer = layer;
    }

    /// Shows the photo detail of a location. Returns whether the panel was
    /// (re)filled; hovering the location already on display does nothing.
    pub async fn show_location_photos(&mut self, id: i64) -> bool {
        if self.photo_panel.is_showing(id) {
            return false;
        }

        match self.api.location_photos(id).await {
            Ok(html) => {
                self.surface.show_photo_detail(&html);
                self.photo_panel = PhotoPanel {
                    location: Some(id),
                    visible: true,
                };
                true
            }
            Err(err) => {
                tracing::error!("failed to load photos of location {id}: {err}");
                false
            }
        }
    }

    pub fn close_photo_detail(&mut self) {
        self.surface.hide_photo_detail();
        self.photo_panel = PhotoPanel::default();
    }
}
