//! Application configuration. Catalog URL, data paths, sampler tuning.

use serde::Deserialize;

/// Default capacity for the sample channel. Bounded channel provides
/// backpressure: when full, the producer blocks on send().await until
/// the tracking loop consumes.
pub const DEFAULT_SAMPLE_QUEUE_SIZE: usize = 64;

/// Static catalog file the map locations ship at.
const DEFAULT_CATALOG_URL: &str =
    "https://raw.githubusercontent.com/Aqib114/locations/refs/heads/main/locations.json";

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// URL of the static location catalog JSON. Read from GEOWATCH_CATALOG_URL.
    #[serde(default)]
    pub catalog_url: Option<String>,

    /// Base directory for the reminder database and exports. Read from GEOWATCH_DATA_DIR.
    #[serde(default)]
    pub data_dir: Option<String>,

    /// Optional webhook endpoint for alerts. Read from GEOWATCH_WEBHOOK_URL.
    #[serde(default)]
    pub webhook_url: Option<String>,

    /// Path to the JSON route file replayed as the position stream. Read from GEOWATCH_ROUTE_PATH.
    #[serde(default)]
    pub route_path: Option<String>,

    /// Milliseconds between replayed samples (default 2000). Read from GEOWATCH_SAMPLE_INTERVAL_MS.
    #[serde(default)]
    pub sample_interval_ms: Option<u64>,

    /// Max samples buffered between sampler and tracking loop (backpressure). Read from GEOWATCH_SAMPLE_QUEUE_SIZE.
    #[serde(default)]
    pub sample_queue_size: Option<usize>,

    /// Restart the route from the beginning when it runs out (default true). Read from GEOWATCH_REPEAT_ROUTE.
    #[serde(default)]
    pub repeat_route: Option<bool>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        c = c.add_source(config::Environment::with_prefix("GEOWATCH"));
        if let Ok(path) = std::env::var("GEOWATCH_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        c.build()?.try_deserialize()
    }

    /// Returns the catalog URL. Defaults to the bundled static file.
    pub fn catalog_url_or_default(&self) -> String {
        self.catalog_url
            .clone()
            .unwrap_or_else(|| DEFAULT_CATALOG_URL.to_string())
    }

    /// Returns the sample interval in milliseconds. Defaults to 2000 if unset.
    pub fn sample_interval_ms_or_default(&self) -> u64 {
        self.sample_interval_ms.unwrap_or(2000)
    }

    /// Returns the sample queue buffer size. Defaults to DEFAULT_SAMPLE_QUEUE_SIZE if unset.
    pub fn sample_queue_size_or_default(&self) -> usize {
        self.sample_queue_size.unwrap_or(DEFAULT_SAMPLE_QUEUE_SIZE)
    }

    /// Returns whether the route restarts when exhausted. Defaults to true.
    pub fn repeat_route_or_default(&self) -> bool {
        self.repeat_route.unwrap_or(true)
    }

    /// Returns true if webhook alerting is configured.
    pub fn is_webhook_configured(&self) -> bool {
        self.webhook_url.as_deref().is_some_and(|u| !u.is_empty())
    }
}
