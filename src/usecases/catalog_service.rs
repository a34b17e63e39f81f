//! Catalog use case: load candidate locations for the selection flow.

use crate::domain::{CatalogLocation, DomainError};
use crate::ports::CatalogPort;
use std::sync::Arc;
use tracing::{info, warn};

/// Thin orchestration over the catalog port. Fetch and decode failures
/// pass through so the caller can surface them; regions that are already
/// registered are never affected by a failed load.
pub struct CatalogService {
    catalog: Arc<dyn CatalogPort>,
}

impl CatalogService {
    pub fn new(catalog: Arc<dyn CatalogPort>) -> Self {
        Self { catalog }
    }

    /// Fetch the catalog, dropping records whose coordinates are not
    /// representable positions.
    pub async fn load(&self) -> Result<Vec<CatalogLocation>, DomainError> {
        let mut locations = self.catalog.fetch_locations().await?;
        let fetched = locations.len();
        locations.retain(|l| l.coordinate().is_valid());
        if locations.len() < fetched {
            warn!(
                dropped = fetched - locations.len(),
                "catalog records with out-of-range coordinates skipped"
            );
        }
        info!(count = locations.len(), "catalog loaded");
        Ok(locations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedCatalog {
        result: Result<Vec<CatalogLocation>, DomainError>,
    }

    #[async_trait::async_trait]
    impl CatalogPort for FixedCatalog {
        async fn fetch_locations(&self) -> Result<Vec<CatalogLocation>, DomainError> {
            match &self.result {
                Ok(v) => Ok(v.clone()),
                Err(e) => Err(DomainError::Fetch(e.to_string())),
            }
        }
    }

    fn place(id: &str, lat: f64, lon: f64) -> CatalogLocation {
        CatalogLocation {
            id: id.to_string(),
            name: id.to_string(),
            lat,
            lon,
            category: "cafe".to_string(),
        }
    }

    #[tokio::test]
    async fn out_of_range_records_are_dropped() {
        let service = CatalogService::new(Arc::new(FixedCatalog {
            result: Ok(vec![
                place("a", 37.33, -122.00),
                place("broken", 123.0, 0.0),
                place("b", 51.50, -0.12),
            ]),
        }));

        let loaded = service.load().await.unwrap();
        let ids: Vec<&str> = loaded.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, ["a", "b"]);
    }

    #[tokio::test]
    async fn fetch_errors_pass_through() {
        let service = CatalogService::new(Arc::new(FixedCatalog {
            result: Err(DomainError::Fetch("boom".into())),
        }));
        assert!(matches!(
            service.load().await.unwrap_err(),
            DomainError::Fetch(_)
        ));
    }
}
