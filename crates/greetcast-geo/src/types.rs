use serde::{Deserialize, Serialize, Serializer};

/// Approximate location resolved from a network address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub city: String,
    pub region: String,
    pub country: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Outcome of resolving a network address.
///
/// `Localhost` and `Unknown` serialize as the string sentinels the API has
/// always emitted; a resolved address serializes as the location object.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedLocation {
    /// Loopback or private-range address; no lookup was attempted.
    Localhost,
    /// The provider could not be reached or returned no usable city.
    Unknown,
    Resolved(GeoLocation),
}

impl ResolvedLocation {
    /// Whether the address resolved to an actual location.
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }

    /// The sentinel string for unresolved outcomes.
    pub fn sentinel(&self) -> Option<&'static str> {
        match self {
            Self::Localhost => Some("Localhost"),
            Self::Unknown => Some("Unknown location"),
            Self::Resolved(_) => None,
        }
    }
}

impl Serialize for ResolvedLocation {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Resolved(location) => location.serialize(serializer),
            other => serializer.serialize_str(other.sentinel().unwrap_or_default()),
        }
    }
}

/// Geolocation provider errors
#[derive(Debug, thiserror::Error)]
pub enum GeoError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Provider error: {0}")]
    Api(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinels_serialize_as_strings() {
        let json = serde_json::to_value(ResolvedLocation::Localhost).unwrap();
        assert_eq!(json, serde_json::json!("Localhost"));

        let json = serde_json::to_value(ResolvedLocation::Unknown).unwrap();
        assert_eq!(json, serde_json::json!("Unknown location"));
    }

    #[test]
    fn test_resolved_serializes_as_object() {
        let location = GeoLocation {
            city: "Paris".to_string(),
            region: "Île-de-France".to_string(),
            country: "France".to_string(),
            latitude: Some(48.8566),
            longitude: Some(2.3522),
        };
        let json = serde_json::to_value(ResolvedLocation::Resolved(location)).unwrap();
        assert_eq!(json["city"], "Paris");
        assert_eq!(json["country"], "France");
        assert_eq!(json["latitude"], 48.8566);
    }

    #[test]
    fn test_is_resolved() {
        assert!(!ResolvedLocation::Localhost.is_resolved());
        assert!(!ResolvedLocation::Unknown.is_resolved());
    }
}
