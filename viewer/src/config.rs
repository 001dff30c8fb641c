use std::time::Duration;

use clap::ValueEnum;

use crate::surface::BaseLayer;

pub const DEFAULT_API_BASE: &str = "http://localhost:8080";
pub const DEFAULT_OSRM_URL: &str = "https://router.project-osrm.org";

/// How the segments of a route are fetched from the routing service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum FetchMode {
    /// One request at a time, in route then point order.
    #[default]
    Sequential,
    /// All segments of one route at once; routes still one after another.
    PerRoute,
}

#[derive(Debug, Clone)]
pub struct ViewerConfig {
    pub api_base: String,
    pub osrm_url: String,
    pub osrm_profile: String,
    pub request_timeout: Duration,
    /// Fraction of the drawn extent added around it when fitting the viewport.
    pub fit_padding: f64,
    pub line_weight: f64,
    pub line_opacity: f64,
    pub dash_array: String,
    pub fetch_mode: FetchMode,
    pub base_layer: BaseLayer,
    pub initial_zoom: f64,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            osrm_url: DEFAULT_OSRM_URL.to_string(),
            osrm_profile: "driving".to_string(),
            request_timeout: Duration::from_secs(10),
            fit_padding: 0.1,
            line_weight: 4.0,
            line_opacity: 0.7,
            dash_array: "10, 10".to_string(),
            fetch_mode: FetchMode::Sequential,
            base_layer: BaseLayer::Satellite,
            initial_zoom: 4.0,
        }
    }
}
