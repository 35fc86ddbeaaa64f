//! IP geolocation and reverse geocoding for greetcast.
//!
//! Maps a caller's network address to an approximate location via an
//! ipapi.co-compatible provider, and coordinates to a formatted address
//! via a Nominatim-compatible provider.

pub mod client;
pub mod geocode;
pub mod types;

pub use client::GeoClient;
pub use geocode::GeocodeClient;
pub use types::{GeoError, GeoLocation, ResolvedLocation};
