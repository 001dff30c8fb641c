pub mod api;
pub mod app;
pub mod config;
pub mod controls;
pub mod geometry;
pub mod popup;
pub mod render;
pub mod routing;
pub mod scene;
pub mod sizing;
pub mod state;
pub mod surface;

pub use api::{ApiError, BackendClient, TravelApi};
pub use app::{UiEvent, Viewer};
pub use config::{FetchMode, ViewerConfig};
pub use render::{LocationRenderer, RouteRenderReport, RouteRenderer};
pub use routing::{DirectRouter, OsrmClient, RoutingError, RoutingService};
pub use scene::Scene;
pub use state::{DayFilter, FilterState};
pub use surface::{BaseLayer, MapSurface};
