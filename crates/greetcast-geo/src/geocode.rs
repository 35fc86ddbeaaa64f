//! Reverse geocoding: convert coordinates to a formatted address.
//! Uses Nominatim (OpenStreetMap) - free, no API key required.

use serde::Deserialize;
use tracing::instrument;

use crate::types::GeoError;

const USER_AGENT: &str = "greetcast/0.1 (https://github.com/greetcast/greetcast)";

#[derive(Debug, Deserialize)]
struct NominatimResponse {
    display_name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct GeocodeClient {
    client: reqwest::Client,
    base_url: String,
}

impl GeocodeClient {
    /// Nominatim requires an identifying User-Agent. No request timeout.
    pub fn new(base_url: impl Into<String>) -> Result<Self, GeoError> {
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Reverse geocode coordinates to a formatted address.
    /// Returns `None` on any failure; the caller falls back to a sentinel.
    #[instrument(skip(self), level = "info")]
    pub async fn reverse(&self, latitude: f64, longitude: f64) -> Option<String> {
        let url = format!(
            "{}/reverse?lat={}&lon={}&format=json",
            self.base_url, latitude, longitude
        );

        let response = match self.client.get(&url).send().await {
            Ok(r) => r,
            Err(e) => {
                tracing::debug!("Reverse geocode request failed: {}", e);
                return None;
            }
        };

        if !response.status().is_success() {
            tracing::debug!("Reverse geocode returned status {}", response.status());
            return None;
        }

        let body: NominatimResponse = match response.json().await {
            Ok(b) => b,
            Err(e) => {
                tracing::debug!("Reverse geocode parse error: {}", e);
                return None;
            }
        };

        let address = body.display_name.filter(|name| !name.is_empty())?;
        tracing::debug!("Reverse geocoded to: {}", address);
        Some(address)
    }
}
