//! Weather provider client (OpenWeatherMap response shape).

use serde::Deserialize;
use tracing::instrument;

use crate::error::WeatherError;

#[derive(Debug, Deserialize)]
struct WeatherResponse {
    main: Option<WeatherMain>,
}

#[derive(Debug, Deserialize)]
struct WeatherMain {
    temp: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl WeatherClient {
    /// No request timeout; an unresponsive provider blocks the request.
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
    ) -> Result<Self, WeatherError> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key,
        })
    }

    /// Fetch the current temperature for a city, in degrees Celsius.
    ///
    /// One attempt, metric units fixed. Any transport failure, non-2xx
    /// status, or response without `main.temp` is an error; the caller maps
    /// it to the temperature-unavailable path.
    #[instrument(skip(self), level = "info")]
    pub async fn current_temperature(&self, city: &str) -> Result<f64, WeatherError> {
        let mut url = format!(
            "{}/data/2.5/weather?q={}&units=metric",
            self.base_url,
            urlencoding::encode(city)
        );
        if let Some(key) = &self.api_key {
            url.push_str(&format!("&appid={}", key));
        }

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(WeatherError::Api(format!("{}: {}", status, text)));
        }

        let body: WeatherResponse = response
            .json()
            .await
            .map_err(|e| WeatherError::InvalidResponse(format!("JSON parse error: {}", e)))?;

        body.main.and_then(|main| main.temp).ok_or_else(|| {
            WeatherError::InvalidResponse("response has no main.temp field".to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_current_temperature() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .and(query_param("q", "Paris"))
            .and(query_param("units", "metric"))
            .and(query_param("appid", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "main": { "temp": 18.0, "humidity": 62 },
                "name": "Paris"
            })))
            .mount(&mock_server)
            .await;

        let client = WeatherClient::new(mock_server.uri(), Some("test-key".to_string())).unwrap();
        let temperature = client.current_temperature("Paris").await.unwrap();
        assert_eq!(temperature, 18.0);
    }

    #[tokio::test]
    async fn test_city_is_url_encoded() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .and(query_param("q", "New York"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "main": { "temp": 24.5 }
            })))
            .mount(&mock_server)
            .await;

        let client = WeatherClient::new(mock_server.uri(), None).unwrap();
        let temperature = client.current_temperature("New York").await.unwrap();
        assert_eq!(temperature, 24.5);
    }

    #[tokio::test]
    async fn test_missing_temp_field() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "name": "Paris"
            })))
            .mount(&mock_server)
            .await;

        let client = WeatherClient::new(mock_server.uri(), None).unwrap();
        let result = client.current_temperature("Paris").await;
        assert!(matches!(result, Err(WeatherError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn test_provider_rejection() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(serde_json::json!({ "message": "Invalid API key" })),
            )
            .mount(&mock_server)
            .await;

        let client = WeatherClient::new(mock_server.uri(), Some("bad-key".to_string())).unwrap();
        let result = client.current_temperature("Paris").await;
        assert!(matches!(result, Err(WeatherError::Api(_))));
    }

    #[tokio::test]
    async fn test_zero_degrees_is_a_reading() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "main": { "temp": 0.0 }
            })))
            .mount(&mock_server)
            .await;

        let client = WeatherClient::new(mock_server.uri(), None).unwrap();
        let temperature = client.current_temperature("Oslo").await.unwrap();
        assert_eq!(temperature, 0.0);
    }
}
