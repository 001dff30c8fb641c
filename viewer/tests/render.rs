use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use shared::{Coordinate, Location, Photo, Route, RoutePoint};
use viewer::{
    DayFilter, FetchMode, FilterState, LocationRenderer, MapSurface, RouteRenderer, RoutingError, RoutingService,
    Scene,
    render::RouteStyle,
    routing::{UnavailableReason, coordinate_string},
    surface::{HoverAction, SegmentKind},
};

/// Succeeds with a three-point path through the midpoint, except for the
/// destinations listed in `fail_to`.
#[derive(Default)]
struct ScriptedRouter {
    fail_to: Vec<Coordinate>,
    calls: Mutex<Vec<Vec<Coordinate>>>,
}

impl ScriptedRouter {
    fn failing_to(fail_to: Vec<Coordinate>) -> Self {
        Self {
            fail_to,
            ..Self::default()
        }
    }

    fn calls(&self) -> Vec<Vec<Coordinate>> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl RoutingService for ScriptedRouter {
    async fn route(&self, points: &[Coordinate]) -> Result<Vec<Coordinate>, RoutingError> {
        self.calls.lock().unwrap().push(points.to_vec());
        let (start, end) = (points[0], points[points.len() - 1]);
        if self.fail_to.contains(&end) {
            return Err(RoutingError::unavailable(
                coordinate_string(points),
                UnavailableReason::Status("Error".into()),
            ));
        }
        let middle = Coordinate::new((start.lat + end.lat) / 2.0, (start.lng + end.lng) / 2.0 + 0.01);
        Ok(vec![start, middle, end])
    }
}

/// Switches the day filter the first time it is asked for a route.
struct SupersedingRouter {
    filter: Arc<FilterState>,
    next: DayFilter,
}

#[async_trait]
impl RoutingService for SupersedingRouter {
    async fn route(&self, points: &[Coordinate]) -> Result<Vec<Coordinate>, RoutingError> {
        if self.filter.current() != self.next {
            self.filter.select(self.next);
        }
        Ok(points.to_vec())
    }
}

fn point(lat: f64, lng: f64, routez: i32) -> RoutePoint {
    RoutePoint { lat, lng, routez }
}

fn route(name: &str, day: u32, points: Vec<RoutePoint>) -> Route {
    Route {
        points,
        color: format!("#{name}"),
        name: name.to_string(),
        day,
    }
}

fn location(id: i64, day: u32, photos: usize) -> Location {
    Location {
        id,
        name: format!("stop {id}"),
        lat: 25.0 + id as f64 / 100.0,
        lng: 121.5,
        description: String::new(),
        photos: (0..photos)
            .map(|n| Photo {
                thumbnail: format!("thumb-{id}-{n}.jpg"),
                full: String::new(),
                caption: String::new(),
            })
            .collect(),
        day,
    }
}

fn sequential() -> RouteRenderer {
    RouteRenderer::new(RouteStyle::default(), FetchMode::Sequential)
}

#[tokio::test]
async fn skip_run_segments_both_start_at_first_point() {
    let routes = vec![route(
        "a",
        1,
        vec![point(0.0, 0.0, 1), point(1.0, 1.0, 0), point(2.0, 2.0, 1)],
    )];
    let router = ScriptedRouter::default();
    let mut scene = Scene::default();

    let report = sequential()
        .render(&mut scene, &router, &routes, &FilterState::new(DayFilter::All))
        .await;

    assert_eq!(report.drawn, 2);
    assert_eq!((report.routed, report.direct, report.degraded), (1, 1, 0));

    let lines: Vec<_> = scene.polylines().collect();
    assert_eq!(lines[0].kind, SegmentKind::Direct);
    assert_eq!(lines[0].path, vec![Coordinate::new(0.0, 0.0), Coordinate::new(1.0, 1.0)]);
    assert_eq!(lines[1].kind, SegmentKind::Routed);
    assert_eq!(lines[1].path[0], Coordinate::new(0.0, 0.0));
    assert_eq!(lines[1].path[2], Coordinate::new(2.0, 2.0));

    // The straight hop never reaches the routing service.
    assert_eq!(router.calls(), vec![vec![Coordinate::new(0.0, 0.0), Coordinate::new(2.0, 2.0)]]);
}

#[tokio::test]
async fn failed_segment_degrades_to_dashed_direct_line() {
    let end = Coordinate::new(1.0, 1.0);
    let routes = vec![route(
        "a",
        1,
        vec![point(0.0, 0.0, 1), point(1.0, 1.0, 1), point(2.0, 2.0, 1)],
    )];
    let router = ScriptedRouter::failing_to(vec![end]);
    let mut scene = Scene::default();

    let report = sequential()
        .render(&mut scene, &router, &routes, &FilterState::new(DayFilter::All))
        .await;

    assert_eq!(report.drawn, 2);
    assert_eq!(report.degraded, 1);
    assert_eq!(report.routed, 1);

    let lines: Vec<_> = scene.polylines().collect();
    assert_eq!(lines[0].kind, SegmentKind::Degraded);
    assert_eq!(lines[0].path, vec![Coordinate::new(0.0, 0.0), end]);
    assert_eq!(lines[0].dash_array.as_deref(), Some("10, 10"));
    assert_eq!(lines[1].kind, SegmentKind::Routed);
    assert_eq!(lines[1].dash_array, None);
    assert_eq!(lines[1].popup_html, "<b>a</b>");
}

#[tokio::test]
async fn day_filter_selects_exact_routes_and_locations() {
    let routes = vec![
        route("one", 1, vec![point(0.0, 0.0, 0), point(1.0, 1.0, 1)]),
        route("two", 2, vec![point(2.0, 2.0, 0), point(3.0, 3.0, 1)]),
        route("three", 2, vec![point(4.0, 4.0, 0), point(5.0, 5.0, 0)]),
    ];
    let locations = vec![location(1, 1, 1), location(2, 2, 0), location(3, 2, 2)];
    let filter = FilterState::new(DayFilter::All);
    let mut scene = Scene::new(12.0);
    let mut markers = LocationRenderer::new();
    let mut lines = sequential();

    assert_eq!(markers.render(&mut scene, &locations, filter.current()), 3);
    lines.render(&mut scene, &ScriptedRouter::default(), &routes, &filter).await;
    assert_eq!(scene.polylines().count(), 3);

    filter.select(DayFilter::Day(2));
    assert_eq!(markers.render(&mut scene, &locations, filter.current()), 2);
    lines.render(&mut scene, &ScriptedRouter::default(), &routes, &filter).await;

    let colors: Vec<_> = scene.polylines().map(|line| line.color.as_str()).collect();
    assert_eq!(colors, ["#two", "#three"]);
    let positions: Vec<_> = scene.markers().map(|(_, marker)| marker.position).collect();
    assert_eq!(positions, vec![locations[1].coordinate(), locations[2].coordinate()]);
    assert_eq!(scene.len(), 4);
}

#[tokio::test]
async fn markers_register_hover_only_with_photos() {
    let locations = vec![location(1, 1, 0), location(2, 1, 3)];
    let mut scene = Scene::new(14.0);
    let mut markers = LocationRenderer::new();
    markers.render(&mut scene, &locations, DayFilter::All);

    let hovers: Vec<_> = scene.markers().map(|(_, marker)| marker.on_thumbnail_hover).collect();
    assert_eq!(hovers, vec![None, Some(HoverAction::LoadLocationPhotos(2))]);
    let (_, first) = scene.markers().next().unwrap();
    assert_eq!(first.icon.size, viewer::sizing::marker_size(14.0));

    markers.refresh_sizes(&mut scene, 19.0);
    assert!(scene.markers().all(|(_, marker)| marker.icon.size == 50));
}

#[tokio::test]
async fn viewport_covers_every_drawn_segment() {
    let routes = vec![
        route("a", 1, vec![point(10.0, 20.0, 0), point(11.0, 21.0, 1)]),
        route("b", 1, vec![point(-5.0, 30.0, 0), point(-4.0, 31.0, 0)]),
    ];
    let mut scene = Scene::default();

    sequential()
        .render(&mut scene, &ScriptedRouter::default(), &routes, &FilterState::new(DayFilter::All))
        .await;

    let viewport = scene.viewport().expect("viewport fitted");
    for line in scene.polylines() {
        assert!(line.path.iter().all(|point| viewport.contains(*point)));
    }
    assert!(viewport.south < -5.0 && viewport.north > 11.0);
    assert!(!scene.routing_indicator());
}

#[tokio::test]
async fn empty_day_leaves_viewport_alone() {
    let routes = vec![route("a", 1, vec![point(0.0, 0.0, 0), point(1.0, 1.0, 0)])];
    let mut scene = Scene::default();
    let mut lines = sequential();

    let report = lines
        .render(&mut scene, &ScriptedRouter::default(), &routes, &FilterState::new(DayFilter::Day(4)))
        .await;

    assert_eq!(report.drawn, 0);
    assert!(scene.viewport().is_none());
    assert!(scene.is_empty());
}

#[tokio::test]
async fn single_point_route_draws_nothing() {
    let routes = vec![route("solo", 1, vec![point(0.0, 0.0, 1)])];
    let router = ScriptedRouter::default();
    let mut scene = Scene::default();

    let report = sequential()
        .render(&mut scene, &router, &routes, &FilterState::default())
        .await;

    assert_eq!(report.drawn, 0);
    assert!(router.calls().is_empty());
    assert!(scene.viewport().is_none());
}

#[tokio::test]
async fn rerender_replaces_previous_overlays() {
    let routes = vec![route("a", 1, vec![point(0.0, 0.0, 0), point(1.0, 1.0, 1), point(2.0, 2.0, 0)])];
    let filter = FilterState::default();
    let mut scene = Scene::default();
    let mut lines = sequential();

    lines.render(&mut scene, &ScriptedRouter::default(), &routes, &filter).await;
    let first: Vec<_> = lines.polylines().to_vec();
    lines.render(&mut scene, &ScriptedRouter::default(), &routes, &filter).await;

    assert_eq!(scene.polylines().count(), 2);
    assert_eq!(lines.polylines().len(), 2);
    assert!(first.iter().all(|id| scene.overlay(*id).is_none()));
}

#[tokio::test]
async fn superseded_pass_drops_its_results() {
    let routes = vec![
        route("a", 1, vec![point(0.0, 0.0, 0), point(1.0, 1.0, 1)]),
        route("b", 1, vec![point(2.0, 2.0, 0), point(3.0, 3.0, 1)]),
    ];
    let filter = Arc::new(FilterState::new(DayFilter::All));
    let router = SupersedingRouter {
        filter: Arc::clone(&filter),
        next: DayFilter::Day(2),
    };
    let mut scene = Scene::default();

    let report = sequential().render(&mut scene, &router, &routes, &filter).await;

    assert!(report.superseded);
    assert_eq!(report.drawn, 0);
    assert!(scene.is_empty());
    assert!(scene.viewport().is_none());
    assert!(!scene.routing_indicator());
    assert_eq!(filter.current(), DayFilter::Day(2));
}

#[tokio::test]
async fn per_route_fetching_keeps_drawing_order() {
    let routes = vec![
        route(
            "a",
            1,
            vec![point(0.0, 0.0, 1), point(1.0, 1.0, 1), point(1.5, 1.5, 0), point(2.0, 2.0, 1)],
        ),
        route("b", 2, vec![point(5.0, 5.0, 0), point(6.0, 6.0, 1), point(7.0, 7.0, 1)]),
    ];
    let failing = vec![Coordinate::new(6.0, 6.0)];
    let filter = FilterState::default();

    let mut sequential_scene = Scene::default();
    sequential()
        .render(&mut sequential_scene, &ScriptedRouter::failing_to(failing.clone()), &routes, &filter)
        .await;

    let mut parallel_scene = Scene::default();
    let report = RouteRenderer::new(RouteStyle::default(), FetchMode::PerRoute)
        .render(&mut parallel_scene, &ScriptedRouter::failing_to(failing), &routes, &filter)
        .await;

    assert_eq!(report.drawn, 5);
    assert_eq!(report.degraded, 1);
    let expected: Vec<_> = sequential_scene.polylines().cloned().collect();
    let actual: Vec<_> = parallel_scene.polylines().cloned().collect();
    assert_eq!(actual, expected);
    assert_eq!(parallel_scene.viewport(), sequential_scene.viewport());
}

#[tokio::test]
async fn scene_zoom_sizes_new_markers() {
    let mut scene = Scene::new(3.0);
    scene.set_zoom(19.0);
    let mut markers = LocationRenderer::new();
    markers.render(&mut scene, &[location(1, 1, 1)], DayFilter::All);
    assert_eq!(scene.zoom(), 19.0);
    assert_eq!(scene.markers().next().unwrap().1.icon.size, 50);
}

#[tokio::test]
async fn superseded_per_route_batch_is_not_drawn() {
    let routes = vec![
        route(
            "a",
            1,
            vec![point(0.0, 0.0, 1), point(1.0, 1.0, 1), point(2.0, 2.0, 1)],
        ),
        route("b", 1, vec![point(3.0, 3.0, 0), point(4.0, 4.0, 1)]),
    ];
    let filter = Arc::new(FilterState::new(DayFilter::All));
    let router = SupersedingRouter {
        filter: Arc::clone(&filter),
        next: DayFilter::Day(3),
    };
    let mut scene = Scene::default();
    let mut lines = RouteRenderer::new(RouteStyle::default(), FetchMode::PerRoute);

    let report = lines.render(&mut scene, &router, &routes, &filter).await;

    assert!(report.superseded);
    assert_eq!(report.drawn, 0);
    assert!(lines.polylines().is_empty());
    assert!(scene.is_empty());
    assert!(scene.viewport().is_none());
    assert!(!scene.routing_indicator());
}
