//! Implements InputPort. Inquire-based interactive menu.
//!
//! Thin glue: every branch delegates to a use case and reports the
//! outcome; failures are shown and the menu continues with prior state
//! intact.

use crate::adapters::persistence::csv_export::reminders_to_csv;
use crate::domain::{Coordinate, DomainError, MonitoredRegion};
use crate::ports::{InputPort, LocationSampler, ReminderStorePort};
use crate::usecases::{CatalogService, TrackingService};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use indicatif::ProgressBar;
use inquire::{CustomType, Select, Text};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

const MENU_ADD_CATALOG: &str = "Add geofence from catalog";
const MENU_ADD_COORDS: &str = "Add geofence at coordinates";
const MENU_WATCH: &str = "Start watching";
const MENU_REMINDERS: &str = "View reminders";
const MENU_EXPORT: &str = "Export reminders to CSV";
const MENU_QUIT: &str = "Quit";

/// TUI adapter. Inquire prompts over the injected services.
pub struct TuiInputPort {
    tracking: Arc<TrackingService>,
    catalog: Arc<CatalogService>,
    sampler: Arc<dyn LocationSampler>,
    store: Arc<dyn ReminderStorePort>,
    data_dir: PathBuf,
}

impl TuiInputPort {
    pub fn new(
        tracking: Arc<TrackingService>,
        catalog: Arc<CatalogService>,
        sampler: Arc<dyn LocationSampler>,
        store: Arc<dyn ReminderStorePort>,
        data_dir: PathBuf,
    ) -> Self {
        Self {
            tracking,
            catalog,
            sampler,
            store,
            data_dir,
        }
    }

    async fn add_from_catalog(&self) -> Result<(), DomainError> {
        let spinner = ProgressBar::new_spinner();
        spinner.set_message("Fetching location catalog...");
        spinner.enable_steady_tick(Duration::from_millis(80));
        let result = self.catalog.load().await;
        spinner.finish_and_clear();

        let locations = result?;
        if locations.is_empty() {
            println!("Catalog is empty.");
            return Ok(());
        }

        let options: Vec<String> = locations
            .iter()
            .map(|l| format!("[{}] {} ({:.5}, {:.5})", l.category, l.name, l.lat, l.lon))
            .collect();
        let selected = Select::new("Select a location to fence", options.clone())
            .prompt()
            .map_err(ui_err)?;
        // Map the selected display string back to its record (match full
        // option string).
        let Some(idx) = options.iter().position(|o| *o == selected) else {
            return Ok(());
        };
        let location = &locations[idx];

        let radius = prompt_radius()?;
        self.register(
            location.id.clone(),
            location.name.clone(),
            location.coordinate(),
            radius,
        )
        .await
    }

    async fn add_at_coordinates(&self) -> Result<(), DomainError> {
        let name = Text::new("Region name:").prompt().map_err(ui_err)?;
        let lat = CustomType::<f64>::new("Latitude:").prompt().map_err(ui_err)?;
        let lon = CustomType::<f64>::new("Longitude:")
            .prompt()
            .map_err(ui_err)?;
        let radius = prompt_radius()?;
        self.register(name.clone(), name, Coordinate::new(lat, lon), radius)
            .await
    }

    async fn register(
        &self,
        identifier: String,
        name: String,
        center: Coordinate,
        radius_meters: f64,
    ) -> Result<(), DomainError> {
        let region = MonitoredRegion {
            identifier,
            display_name: name.clone(),
            center,
            radius_meters,
            is_inside: None,
        };
        match self.tracking.register_region(region).await {
            Ok(()) => {
                println!("Watching '{}' ({} m).", name, radius_meters);
                Ok(())
            }
            Err(DomainError::InvalidRegion(msg)) => {
                println!("Region rejected: {}", msg);
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    async fn watch(&self) -> Result<(), DomainError> {
        let count = self.tracking.regions().await.len();
        if count == 0 {
            println!("No geofences registered yet.");
            return Ok(());
        }

        let mut subscription = self.sampler.subscribe().await?;
        println!("Watching {} geofence(s). Press Ctrl-C to stop.", count);
        self.tracking.run_watch(&mut subscription).await;
        self.sampler.unsubscribe(subscription).await?;
        println!("Watch stopped.");
        Ok(())
    }

    async fn show_reminders(&self) -> Result<(), DomainError> {
        let reminders = self.store.list_all().await?;
        if reminders.is_empty() {
            println!("No reminders recorded yet.");
            return Ok(());
        }
        for r in &reminders {
            let when = DateTime::<Utc>::from_timestamp(r.recorded_at, 0)
                .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| r.recorded_at.to_string());
            println!(
                "{} | {} | {} | ({:.5}, {:.5}) r={}m",
                when, r.region_name, r.note, r.center.lat, r.center.lon, r.radius_meters
            );
        }
        Ok(())
    }

    async fn export_reminders(&self) -> Result<(), DomainError> {
        let reminders = self.store.list_all().await?;
        let csv = reminders_to_csv(&reminders).map_err(|e| DomainError::Store(e.to_string()))?;
        let path = self.data_dir.join("reminders.csv");
        tokio::fs::write(&path, csv)
            .await
            .map_err(|e| DomainError::Store(e.to_string()))?;
        println!(
            "Exported {} reminder(s) to {}",
            reminders.len(),
            path.display()
        );
        Ok(())
    }
}

#[async_trait]
impl InputPort for TuiInputPort {
    async fn run(&self) -> Result<(), DomainError> {
        loop {
            let choice = Select::new(
                "What next?",
                vec![
                    MENU_ADD_CATALOG.to_string(),
                    MENU_ADD_COORDS.to_string(),
                    MENU_WATCH.to_string(),
                    MENU_REMINDERS.to_string(),
                    MENU_EXPORT.to_string(),
                    MENU_QUIT.to_string(),
                ],
            )
            .prompt()
            .map_err(ui_err)?;

            let result = match choice.as_str() {
                MENU_ADD_CATALOG => self.add_from_catalog().await,
                MENU_ADD_COORDS => self.add_at_coordinates().await,
                MENU_WATCH => self.watch().await,
                MENU_REMINDERS => self.show_reminders().await,
                MENU_EXPORT => self.export_reminders().await,
                MENU_QUIT => return Ok(()),
                _ => Ok(()),
            };
            if let Err(e) = result {
                warn!(error = %e, "menu action failed");
                println!("Error: {}", e);
            }
        }
    }
}

fn prompt_radius() -> Result<f64, DomainError> {
    CustomType::<f64>::new("Radius in meters:")
        .with_default(200.0)
        .with_help_message("e.g. 100 - 1000")
        .prompt()
        .map_err(ui_err)
}

fn ui_err(e: inquire::InquireError) -> DomainError {
    DomainError::Ui(e.to_string())
}
