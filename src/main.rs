//! Wiring & DI. Entry point: bootstrap adapters, inject into services, run UI.
//! No business logic here.

use dotenv::dotenv;
use geowatch::adapters::catalog::HttpCatalog;
use geowatch::adapters::location::RouteReplaySampler;
use geowatch::adapters::notify::{ConsoleNotifier, WebhookNotifier};
use geowatch::adapters::persistence::SqliteReminderStore;
use geowatch::adapters::ui::tui::TuiInputPort;
use geowatch::domain::Coordinate;
use geowatch::ports::{CatalogPort, InputPort, LocationSampler, NotifierPort, ReminderStorePort};
use geowatch::usecases::{CatalogService, TrackingService};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Demo route around the default map center, used when no route file is
/// configured: approaches from the south, passes through, and leaves.
fn demo_route() -> Vec<Coordinate> {
    vec![
        Coordinate::new(37.3290, -122.0090),
        Coordinate::new(37.3320, -122.0090),
        Coordinate::new(37.3349, -122.0090),
        Coordinate::new(37.3380, -122.0090),
        Coordinate::new(37.3410, -122.0090),
    ]
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_loaded = dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    if let Ok(path) = &env_loaded {
        info!(path = %path.display(), "loaded .env");
    }

    geowatch::adapters::ui::init_ui();

    let cfg = geowatch::shared::config::AppConfig::load().unwrap_or_default();

    let data_dir = cfg.data_dir.as_deref().unwrap_or("./data").to_string();
    let data_path = PathBuf::from(&data_dir);
    info!(path = %data_path.display(), "data directory");

    // --- Reminder store (SQLite, WAL) ---
    let store: Arc<dyn ReminderStorePort> = Arc::new(
        SqliteReminderStore::connect(&data_path)
            .await
            .map_err(|e| anyhow::anyhow!("reminder store connect failed: {}", e))?,
    );

    // --- Location sampler: replay a route file, or the built-in demo route ---
    let interval = Duration::from_millis(cfg.sample_interval_ms_or_default());
    let queue_size = cfg.sample_queue_size_or_default();
    let repeat = cfg.repeat_route_or_default();
    let sampler: Arc<dyn LocationSampler> = match cfg.route_path.as_deref() {
        Some(path) => Arc::new(
            RouteReplaySampler::from_file(path, interval, repeat, queue_size)
                .map_err(|e| anyhow::anyhow!("route file {}: {}", path, e))?,
        ),
        None => {
            warn!("GEOWATCH_ROUTE_PATH not set, replaying built-in demo route");
            Arc::new(RouteReplaySampler::new(
                demo_route(),
                interval,
                repeat,
                queue_size,
            ))
        }
    };

    // --- Alerts: webhook when configured, terminal otherwise ---
    let notifier: Arc<dyn NotifierPort> = if cfg.is_webhook_configured() {
        let url = cfg.webhook_url.clone().unwrap_or_default();
        info!(url = %url, "webhook alerts enabled");
        Arc::new(WebhookNotifier::new(url))
    } else {
        Arc::new(ConsoleNotifier)
    };

    // --- Catalog ---
    let catalog: Arc<dyn CatalogPort> = Arc::new(HttpCatalog::new(cfg.catalog_url_or_default()));

    // --- Services ---
    let tracking = Arc::new(TrackingService::new(
        Arc::clone(&notifier),
        Arc::clone(&store),
    ));
    let catalog_service = Arc::new(CatalogService::new(catalog));

    let input_port: Arc<dyn InputPort> = Arc::new(TuiInputPort::new(
        Arc::clone(&tracking),
        Arc::clone(&catalog_service),
        Arc::clone(&sampler),
        Arc::clone(&store),
        data_path,
    ));

    input_port.run().await.map_err(|e| anyhow::anyhow!("{}", e))?;

    Ok(())
}
