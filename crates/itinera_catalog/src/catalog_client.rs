use tracing::debug;

use crate::{catalog::Catalog, catalog_city::CatalogCity, error::CatalogError};

pub const DEFAULT_CATALOG_URL: &str = "http://localhost:5000/cities";
pub const CATALOG_URL_ENV_VAR: &str = "ITINERA_CATALOG_URL";

/// Catalog endpoint from `ITINERA_CATALOG_URL`, falling back to the local service.
pub fn catalog_url() -> String {
    std::env::var(CATALOG_URL_ENV_VAR).unwrap_or_else(|_| DEFAULT_CATALOG_URL.to_owned())
}

pub struct CatalogClient {
    client: reqwest::Client,
}

impl Default for CatalogClient {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogClient {
    pub fn new() -> Self {
        Self::with_client(reqwest::Client::new())
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// GET a JSON array of city records.
    pub async fn fetch(&self, url: &str) -> Result<Catalog, CatalogError> {
        debug!("CatalogClient: fetching cities from {}", url);

        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(CatalogError::Api { status, message });
        }

        let body = response.text().await?;
        let cities: Vec<CatalogCity> = serde_json::from_str(&body)?;

        debug!("CatalogClient: received {} cities", cities.len());

        Ok(Catalog::new(cities))
    }
}
