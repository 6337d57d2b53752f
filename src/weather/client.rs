//! Open-Meteo forecast client for the current temperature at a coordinate.

use crate::error::{Result, WeathercallError};
use tracing::debug;

/// Open-Meteo API client.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    base_url: String,
    http: reqwest::Client,
}

impl WeatherClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    /// Current temperature in celsius at the given coordinates.
    pub async fn current_temperature(&self, latitude: f64, longitude: f64) -> Result<f64> {
        debug!("Weather lookup: latitude={} longitude={}", latitude, longitude);

        let resp = self
            .http
            .get(format!("{}/v1/forecast", self.base_url))
            .query(&[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                ("current_weather", "true".to_string()),
            ])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(WeathercallError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body: serde_json::Value = serde_json::from_slice(&resp.bytes().await?)?;
        body.pointer("/current_weather/temperature")
            .and_then(serde_json::Value::as_f64)
            .ok_or(WeathercallError::MissingField("current_weather.temperature"))
    }
}

/// Stringify a temperature without rounding; integral values keep `.0`.
pub fn format_temperature(celsius: f64) -> String {
    format!("{:?}", celsius)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_format_temperature_is_exact() {
        assert_eq!(format_temperature(15.2), "15.2");
        assert_eq!(format_temperature(18.4), "18.4");
        assert_eq!(format_temperature(18.0), "18.0");
        assert_eq!(format_temperature(-3.75), "-3.75");
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = WeatherClient::new("https://api.open-meteo.com/");
        assert_eq!(client.base_url, "https://api.open-meteo.com");
    }

    #[tokio::test]
    async fn test_current_temperature_sends_coordinates() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/forecast"))
            .and(query_param("latitude", "48.85"))
            .and(query_param("longitude", "2.35"))
            .and(query_param("current_weather", "true"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "latitude": 48.86,
                "longitude": 2.34,
                "current_weather": { "temperature": 15.2, "windspeed": 7.9 }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = WeatherClient::new(&server.uri());
        let temp = client.current_temperature(48.85, 2.35).await.unwrap();
        assert_eq!(temp, 15.2);
    }

    #[tokio::test]
    async fn test_missing_temperature_field() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/forecast"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "current": { "temperature_2m": 9.1 } })),
            )
            .mount(&server)
            .await;

        let client = WeatherClient::new(&server.uri());
        let err = client.current_temperature(1.0, 2.0).await.unwrap_err();
        assert!(matches!(err, WeathercallError::MissingField("current_weather.temperature")));
    }

    #[tokio::test]
    async fn test_non_numeric_temperature_is_missing_field() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/forecast"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "current_weather": { "temperature": "warm" }
            })))
            .mount(&server)
            .await;

        let client = WeatherClient::new(&server.uri());
        let err = client.current_temperature(48.85, 2.35).await.unwrap_err();
        assert!(matches!(err, WeathercallError::MissingField("current_weather.temperature")));
    }

    #[tokio::test]
    async fn test_non_json_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("temperature: 15.2"))
            .mount(&server)
            .await;

        let client = WeatherClient::new(&server.uri());
        let err = client.current_temperature(48.85, 2.35).await.unwrap_err();
        assert!(matches!(err, WeathercallError::Decode(_)));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_http_error() {
        let client = WeatherClient::new("http://127.0.0.1:9");
        let err = client.current_temperature(48.85, 2.35).await.unwrap_err();
        assert!(matches!(err, WeathercallError::Http(_)));
    }

    #[tokio::test]
    async fn test_non_success_status_is_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(400).set_body_string("bad latitude"))
            .mount(&server)
            .await;

        let client = WeatherClient::new(&server.uri());
        let err = client.current_temperature(999.0, 2.0).await.unwrap_err();
        match err {
            WeathercallError::Api { status, body } => {
                assert_eq!(status, 400);
                assert_eq!(body, "bad latitude");
            }
            other => panic!("expected api error, got {other:?}"),
        }
    }
}
