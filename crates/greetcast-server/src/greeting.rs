//! Response payload composition.
//!
//! The payload shape depends on how far the pipeline got: sentinel locations
//! and missing temperatures drop the fields downstream steps would have
//! filled in, and the greeting text states what went wrong.

use greetcast_agent::ClientSignature;
use greetcast_geo::{GeoLocation, ResolvedLocation};
use serde::Serialize;

/// Sentinel carried in `precise_location` when refinement failed.
pub const UNKNOWN_PRECISE_LOCATION: &str = "Unknown precise location";

#[derive(Debug, Serialize)]
pub struct GreetingResponse {
    pub client_ip: String,
    pub location: ResolvedLocation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precise_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_details: Option<ClientSignature>,
    pub greeting: String,
}

impl GreetingResponse {
    /// Terminal payload when the address resolved to a sentinel.
    pub fn location_unavailable(
        client_ip: String,
        location: ResolvedLocation,
        visitor_name: &str,
    ) -> Self {
        Self {
            client_ip,
            location,
            precise_location: None,
            temperature: None,
            device_details: None,
            greeting: format!("Hello, {}! Unable to determine location.", visitor_name),
        }
    }

    /// Terminal payload when the temperature lookup failed; whatever precise
    /// location was gathered rides along.
    pub fn weather_unavailable(
        client_ip: String,
        location: GeoLocation,
        precise_location: Option<String>,
        visitor_name: &str,
    ) -> Self {
        let greeting = format!(
            "Hello, {}! Temperature data unavailable for {}.",
            visitor_name, location.city
        );
        Self {
            client_ip,
            location: ResolvedLocation::Resolved(location),
            precise_location: Some(
                precise_location.unwrap_or_else(|| UNKNOWN_PRECISE_LOCATION.to_string()),
            ),
            temperature: None,
            device_details: None,
            greeting,
        }
    }

    /// Full payload. The precise-location sentence is only appended when a
    /// real address is available; the sentinel still appears in the field.
    pub fn success(
        client_ip: String,
        location: GeoLocation,
        precise_location: Option<String>,
        temperature: f64,
        device_details: ClientSignature,
        visitor_name: &str,
    ) -> Self {
        let mut greeting = format!(
            "Hello, {}! The temperature is {} degrees Celsius in {}, {}, {}.",
            visitor_name, temperature, location.city, location.region, location.country
        );
        if let Some(address) = &precise_location {
            greeting.push_str(&format!(" You are currently located at {}.", address));
        }

        Self {
            client_ip,
            location: ResolvedLocation::Resolved(location),
            precise_location: Some(
                precise_location.unwrap_or_else(|| UNKNOWN_PRECISE_LOCATION.to_string()),
            ),
            temperature: Some(temperature),
            device_details: Some(device_details),
            greeting,
        }
    }
}
