//! Tool trait definition.

use crate::error::Result;
use async_trait::async_trait;

/// Definition of a tool exposed to the chat model.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
    /// Ask the model to follow the schema exactly (tools style only).
    pub strict: bool,
}

/// A capability the model may ask the caller to run.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Tool name (used in function calls).
    fn name(&self) -> &str;

    /// Human-readable description.
    fn description(&self) -> &str;

    /// JSON Schema for the tool's parameters.
    fn parameters_schema(&self) -> serde_json::Value;

    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name().to_string(),
            description: self.description().to_string(),
            parameters: self.parameters_schema(),
            strict: true,
        }
    }

    /// Execute the tool with the raw JSON argument text from the model.
    async fn execute(&self, arguments: &str) -> Result<String>;
}
