//! HTTP catalog adapter. One unauthenticated GET of a static JSON file.

use crate::domain::{CatalogLocation, DomainError};
use crate::ports::CatalogPort;
use reqwest::Client;
use tracing::info;

/// Fetches the location catalog from a fixed URL.
pub struct HttpCatalog {
    client: Client,
    url: String,
}

impl HttpCatalog {
    pub fn new(url: String) -> Self {
        Self {
            client: Client::new(),
            url,
        }
    }
}

/// Decode the catalog body: a JSON array of location records.
fn decode_locations(bytes: &[u8]) -> Result<Vec<CatalogLocation>, DomainError> {
    serde_json::from_slice(bytes).map_err(|e| DomainError::Decode(e.to_string()))
}

#[async_trait::async_trait]
impl CatalogPort for HttpCatalog {
    async fn fetch_locations(&self) -> Result<Vec<CatalogLocation>, DomainError> {
        let res = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| DomainError::Fetch(format!("request failed: {e}")))?;

        if !res.status().is_success() {
            return Err(DomainError::Fetch(format!(
                "server returned {}",
                res.status()
            )));
        }

        let bytes = res
            .bytes()
            .await
            .map_err(|e| DomainError::Fetch(e.to_string()))?;
        if bytes.is_empty() {
            return Err(DomainError::Fetch("no data received from server".into()));
        }

        let locations = decode_locations(&bytes)?;
        info!(count = locations.len(), url = %self.url, "catalog fetched");
        Ok(locations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_a_record_array() {
        let body = br#"[
            {"id": "1", "name": "Blue Bottle", "lat": 37.776, "lon": -122.423, "category": "cafe"},
            {"id": "2", "name": "Ferry Building", "lat": 37.795, "lon": -122.393, "category": "landmark"}
        ]"#;
        let locations = decode_locations(body).unwrap();
        assert_eq!(locations.len(), 2);
        assert_eq!(locations[0].name, "Blue Bottle");
        assert_eq!(locations[1].category, "landmark");
        assert_eq!(locations[1].coordinate().lat, 37.795);
    }

    #[test]
    fn malformed_body_is_a_decode_error() {
        assert!(matches!(
            decode_locations(b"not json").unwrap_err(),
            DomainError::Decode(_)
        ));
    }

    #[test]
    fn non_array_body_is_a_decode_error() {
        assert!(matches!(
            decode_locations(br#"{"id": "1"}"#).unwrap_err(),
            DomainError::Decode(_)
        ));
    }
}
