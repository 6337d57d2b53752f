//! `get_weather`: current temperature for a coordinate pair.

use super::Tool;
use crate::error::{Result, WeathercallError};
use crate::weather::{format_temperature, WeatherClient};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

pub const GET_WEATHER: &str = "get_weather";

/// Decoded `get_weather` arguments.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct WeatherArgs {
    pub latitude: f64,
    pub longitude: f64,
}

impl WeatherArgs {
    /// Decode the model's argument text; both coordinates must be numbers.
    pub fn parse(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(|e| WeathercallError::InvalidArguments {
            tool: GET_WEATHER.to_string(),
            reason: e.to_string(),
        })
    }
}

pub struct WeatherTool {
    client: WeatherClient,
}

impl WeatherTool {
    pub fn new(client: WeatherClient) -> Self {
        Self { client }
    }

    /// Look up the temperature for already-encoded arguments.
    pub async fn lookup(&self, arguments: &str) -> Result<f64> {
        let args = WeatherArgs::parse(arguments)?;
        let temperature = self
            .client
            .current_temperature(args.latitude, args.longitude)
            .await?;
        info!(
            "get_weather({}, {}) = {}",
            args.latitude, args.longitude, temperature
        );
        Ok(temperature)
    }
}

#[async_trait]
impl Tool for WeatherTool {
    fn name(&self) -> &str {
        GET_WEATHER
    }

    fn description(&self) -> &str {
        "Get current temperature for provided coordinates in celsius."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "latitude": { "type": "number" },
                "longitude": { "type": "number" }
            },
            "required": ["latitude", "longitude"],
            "additionalProperties": false
        })
    }

    async fn execute(&self, arguments: &str) -> Result<String> {
        self.lookup(arguments).await.map(format_temperature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_numeric_coordinates() {
        let args = WeatherArgs::parse(r#"{"latitude":48.8566,"longitude":2.3522}"#).unwrap();
        assert_eq!(args.latitude, 48.8566);
        assert_eq!(args.longitude, 2.3522);
    }

    #[test]
    fn test_parse_rejects_string_coordinates() {
        let err = WeatherArgs::parse(r#"{"latitude":"48.8","longitude":2.3}"#).unwrap_err();
        assert!(matches!(err, WeathercallError::InvalidArguments { ref tool, .. } if tool == GET_WEATHER));
    }

    #[test]
    fn test_parse_rejects_missing_field_and_garbage() {
        assert!(WeatherArgs::parse(r#"{"latitude":48.8}"#).is_err());
        assert!(WeatherArgs::parse("not json").is_err());
    }

    #[test]
    fn test_definition_shape() {
        let tool = WeatherTool::new(WeatherClient::new("http://localhost"));
        let def = tool.definition();
        assert_eq!(def.name, "get_weather");
        assert!(def.strict);
        assert_eq!(def.parameters["required"], json!(["latitude", "longitude"]));
        assert_eq!(def.parameters["properties"]["latitude"]["type"], "number");
        assert_eq!(def.parameters["additionalProperties"], false);
    }
}
