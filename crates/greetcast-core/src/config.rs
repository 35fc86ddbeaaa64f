use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

/// Environment variable naming the config file to load.
const CONFIG_PATH_ENV: &str = "GREETCAST_CONFIG";

/// Environment variable supplying the weather provider API key.
const WEATHER_API_KEY_ENV: &str = "GREETCAST_WEATHER_API_KEY";

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Add an error
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Add a warning
    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        if self.errors.is_empty() {
            return String::new();
        }
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Listener settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Upstream provider settings
    #[serde(default)]
    pub providers: ProviderConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind the listener to
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_bind() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    2347
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Base URL for the IP geolocation provider
    #[serde(default = "default_geoip_url")]
    pub geoip_url: String,

    /// Base URL for the reverse geocoding provider
    #[serde(default = "default_geocode_url")]
    pub geocode_url: String,

    /// Base URL for the weather provider
    #[serde(default = "default_weather_url")]
    pub weather_url: String,

    /// Weather provider API key (optional, can be set via environment)
    #[serde(default)]
    pub weather_api_key: Option<String>,
}

fn default_geoip_url() -> String {
    "https://ipapi.co".to_string()
}

fn default_geocode_url() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

fn default_weather_url() -> String {
    "http://api.openweathermap.org".to_string()
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            geoip_url: default_geoip_url(),
            geocode_url: default_geocode_url(),
            weather_url: default_weather_url(),
            weather_api_key: std::env::var(WEATHER_API_KEY_ENV).ok(), // Read from environment
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            providers: ProviderConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file, falling back to defaults if it doesn't exist
    pub fn load() -> Result<Self> {
        let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| "greetcast.toml".to_string());

        let mut config = if Path::new(&path).exists() {
            let contents =
                std::fs::read_to_string(&path).context("Failed to read config file")?;
            toml::from_str(&contents).context("Failed to parse config file")?
        } else {
            tracing::info!("No config file at {}, using defaults", path);
            Self::default()
        };

        // Environment always wins for the secret so it never has to live in the file
        if config.providers.weather_api_key.is_none() {
            config.providers.weather_api_key = std::env::var(WEATHER_API_KEY_ENV).ok();
        }

        Ok(config)
    }

    /// Load configuration and validate it
    ///
    /// Returns the config along with any validation warnings.
    /// Returns an error if validation fails with critical errors.
    pub fn load_validated() -> Result<(Self, ValidationResult)> {
        let config = Self::load()?;
        let validation = config.validate();

        if !validation.is_valid() {
            anyhow::bail!(
                "Configuration validation failed: {}",
                validation.error_summary()
            );
        }

        if !validation.warnings.is_empty() {
            for warning in &validation.warnings {
                tracing::warn!("Config warning: {}", warning);
            }
        }

        Ok((config, validation))
    }

    /// Validate the configuration
    ///
    /// Returns a ValidationResult containing any errors or warnings.
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        self.validate_url(&self.providers.geoip_url, "providers.geoip_url", &mut result);
        self.validate_url(
            &self.providers.geocode_url,
            "providers.geocode_url",
            &mut result,
        );
        self.validate_url(
            &self.providers.weather_url,
            "providers.weather_url",
            &mut result,
        );

        if self.server.port == 0 {
            result.add_error("server.port", "Port cannot be 0");
        }

        if self.server.bind.is_empty() {
            result.add_error("server.bind", "Bind address cannot be empty");
        }

        match &self.providers.weather_api_key {
            None => result.add_warning(
                "providers.weather_api_key",
                format!(
                    "No weather API key configured ({} unset) - temperature lookups will fail",
                    WEATHER_API_KEY_ENV
                ),
            ),
            Some(key) if key.is_empty() || key.starts_with("YOUR_") => result.add_error(
                "providers.weather_api_key",
                "Weather API key is a placeholder",
            ),
            Some(_) => {}
        }

        result
    }

    /// Validate a URL field
    fn validate_url(&self, url_str: &str, field_name: &str, result: &mut ValidationResult) {
        match Url::parse(url_str) {
            Ok(url) => {
                if url.scheme() != "http" && url.scheme() != "https" {
                    result.add_error(
                        field_name,
                        format!("URL must use http or https scheme, got: {}", url.scheme()),
                    );
                }

                if url.host().is_none() {
                    result.add_error(field_name, "URL must have a host");
                }

                if let Some(port) = url.port() {
                    if port == 0 {
                        result.add_error(field_name, "Port cannot be 0");
                    }
                }
            }
            Err(e) => {
                result.add_error(field_name, format!("Invalid URL: {}", e));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_default_config() {
        let config = Config::default();
        let result = config.validate();
        // Default config should be valid (only warnings, no errors)
        assert!(
            result.is_valid(),
            "Default config should be valid: {:?}",
            result.errors
        );
    }

    #[test]
    fn test_invalid_geoip_url() {
        let mut config = Config::default();
        config.providers.geoip_url = "not-a-url".to_string();
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.field == "providers.geoip_url"));
    }

    #[test]
    fn test_invalid_url_scheme() {
        let mut config = Config::default();
        config.providers.weather_url = "ftp://localhost:8080".to_string();
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result
            .errors
            .iter()
            .any(|e| e.message.contains("http or https")));
    }

    #[test]
    fn test_zero_port() {
        let mut config = Config::default();
        config.server.port = 0;
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.field == "server.port"));
    }

    #[test]
    fn test_missing_api_key_is_warning() {
        let mut config = Config::default();
        config.providers.weather_api_key = None;
        let result = config.validate();
        assert!(result.is_valid());
        assert!(result
            .warnings
            .iter()
            .any(|w| w.field == "providers.weather_api_key"));
    }

    #[test]
    fn test_placeholder_api_key_is_error() {
        let mut config = Config::default();
        config.providers.weather_api_key = Some("YOUR_OPENWEATHERMAP_API_KEY".to_string());
        let result = config.validate();
        assert!(!result.is_valid());
    }

    #[test]
    fn test_parse_partial_file() {
        let config: Config = toml::from_str(
            r#"
            [server]
            port = 9000
            "#,
        )
        .unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.bind, "0.0.0.0");
        assert_eq!(config.providers.geoip_url, "https://ipapi.co");
    }

    #[test]
    fn test_validation_result_error_summary() {
        let mut result = ValidationResult::default();
        result.add_error("field1", "error1");
        result.add_error("field2", "error2");
        let summary = result.error_summary();
        assert!(summary.contains("field1"));
        assert!(summary.contains("field2"));
    }
}
