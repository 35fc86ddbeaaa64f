//! IP geolocation client (ipapi.co response shape).

use serde::Deserialize;
use tracing::instrument;

use crate::types::{GeoError, GeoLocation, ResolvedLocation};

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    city: Option<String>,
    region: Option<String>,
    country_name: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
}

/// Returns true for loopback plus the `192.168.*` and `10.*` private
/// prefixes. Other private ranges (e.g. `172.16.0.0/12`) are knowingly
/// not covered; callers have always relied on this exact set.
fn is_private(ip: &str) -> bool {
    ip == "127.0.0.1" || ip == "::1" || ip.starts_with("192.168.") || ip.starts_with("10.")
}

#[derive(Debug, Clone)]
pub struct GeoClient {
    client: reqwest::Client,
    base_url: String,
}

impl GeoClient {
    /// Outbound calls carry no timeout; an unresponsive provider blocks the
    /// request until the transport gives up.
    pub fn new(base_url: impl Into<String>) -> Result<Self, GeoError> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Resolve a network address to a location, or a sentinel.
    ///
    /// Private and loopback addresses short-circuit to `Localhost` without
    /// touching the provider. Every provider failure collapses to `Unknown`;
    /// exactly one attempt is made.
    #[instrument(skip(self), level = "info")]
    pub async fn resolve(&self, ip: &str) -> ResolvedLocation {
        if is_private(ip) {
            return ResolvedLocation::Localhost;
        }

        match self.lookup(ip).await {
            Ok(location) => ResolvedLocation::Resolved(location),
            Err(e) => {
                tracing::warn!("IP geolocation failed for {}: {}", ip, e);
                ResolvedLocation::Unknown
            }
        }
    }

    async fn lookup(&self, ip: &str) -> Result<GeoLocation, GeoError> {
        let url = format!("{}/{}/json/", self.base_url, ip);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        let body = response.text().await?;
        tracing::debug!(%body, "geolocation provider response");

        if !status.is_success() {
            return Err(GeoError::Api(format!("{}: {}", status, body)));
        }

        let parsed: IpApiResponse = serde_json::from_str(&body)
            .map_err(|e| GeoError::InvalidResponse(format!("JSON parse error: {}", e)))?;

        let city = parsed
            .city
            .filter(|c| !c.is_empty())
            .ok_or_else(|| GeoError::InvalidResponse("response has no city field".to_string()))?;

        Ok(GeoLocation {
            city,
            region: parsed.region.unwrap_or_default(),
            country: parsed.country_name.unwrap_or_default(),
            latitude: parsed.latitude,
            longitude: parsed.longitude,
        })
    }
}
