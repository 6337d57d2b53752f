pub mod traits;
pub mod weather;

pub use traits::{Tool, ToolDefinition};
pub use weather::{WeatherArgs, WeatherTool, GET_WEATHER};

use crate::error::{Result, WeathercallError};
use crate::types::ToolCall;
use crate::weather::WeatherClient;
use tracing::debug;

/// The set of tools declared to the model, dispatched by name.
#[derive(Default)]
pub struct ToolRegistry {
    tools: Vec<Box<dyn Tool>>,
    definitions: Vec<ToolDefinition>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding only `get_weather` backed by the given client.
    pub fn with_weather(client: WeatherClient) -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(WeatherTool::new(client)));
        registry
    }

    /// Add a tool; its definition is captured once here.
    pub fn register(&mut self, tool: Box<dyn Tool>) {
        self.definitions.push(tool.definition());
        self.tools.push(tool);
    }

    pub fn definitions(&self) -> &[ToolDefinition] {
        &self.definitions
    }

    /// Execute a tool call by name.
    pub async fn execute(&self, call: &ToolCall) -> Result<String> {
        let tool = self
            .tools
            .iter()
            .find(|t| t.name() == call.name)
            .ok_or_else(|| WeathercallError::UnknownTool(call.name.clone()))?;

        debug!("Executing tool {}({})", call.name, call.arguments);
        tool.execute(&call.arguments).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weather_registry_declares_single_tool() {
        let registry = ToolRegistry::with_weather(WeatherClient::new("http://localhost"));
        assert_eq!(registry.definitions().len(), 1);
        assert_eq!(registry.definitions()[0].name, GET_WEATHER);
    }

    #[tokio::test]
    async fn test_unknown_tool_is_rejected() {
        let registry = ToolRegistry::with_weather(WeatherClient::new("http://localhost"));
        let call = ToolCall {
            id: "call_1".into(),
            name: "get_stock_price".into(),
            arguments: "{}".into(),
        };
        let err = registry.execute(&call).await.unwrap_err();
        assert!(matches!(err, WeathercallError::UnknownTool(ref n) if n == "get_stock_price"));
    }

    #[tokio::test]
    async fn test_bad_arguments_fail_before_network() {
        // Unroutable base URL: reaching the network would surface as Http, not InvalidArguments.
        let registry = ToolRegistry::with_weather(WeatherClient::new("http://127.0.0.1:9"));
        let call = ToolCall {
            id: String::new(),
            name: GET_WEATHER.into(),
            arguments: r#"{"latitude": "north"}"#.into(),
        };
        let err = registry.execute(&call).await.unwrap_err();
        assert!(matches!(err, WeathercallError::InvalidArguments { .. }));
    }
}
