//! Weather-specific error types.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WeatherError {
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
    fn test_error_display() {
        let err = WeatherError::Api("401: invalid key".to_string());
        assert!(err.to_string().contains("401"));

        let err = WeatherError::InvalidResponse("response has no main.temp field".to_string());
        assert!(err.to_string().contains("main.temp"));
    }
}
