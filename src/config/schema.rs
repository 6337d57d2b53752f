//! Configuration schema for weathercall.toml.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Wire dialect used to declare tools and read tool calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ToolStyle {
    /// `tools` / `tool_calls` with call ids.
    Tools,
    /// Legacy `functions` / `function_call`.
    Functions,
}

impl fmt::Display for ToolStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tools => write!(f, "tools"),
            Self::Functions => write!(f, "functions"),
        }
    }
}

/// Role used for the message carrying the tool output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ResultRole {
    /// Plain user message holding the stringified result.
    User,
    /// Dedicated tool-result message (`tool`, or `function` in the legacy style).
    Tool,
}

impl fmt::Display for ResultRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Tool => write!(f, "tool"),
        }
    }
}

/// Root configuration structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeathercallConfig {
    /// Chat completion API base URL.
    pub chat_api_url: String,

    /// Chat model identifier.
    pub model: String,

    /// Open-Meteo API base URL.
    pub weather_api_url: String,

    /// The user message that opens the conversation.
    pub prompt: String,

    /// Optional system message placed before the prompt.
    pub system_prompt: String,

    /// Name of the environment variable holding the API key.
    pub api_key_env: String,

    pub tool_style: ToolStyle,

    pub result_role: ResultRole,

    /// Declare the tools again on the follow-up request.
    pub resend_tools_on_followup: bool,

    /// Log level (debug, info, warn, error).
    pub log_level: String,
}

impl Default for WeathercallConfig {
    fn default() -> Self {
        Self {
            chat_api_url: "https://api.openai.com".into(),
            model: "gpt-3.5-turbo".into(),
            weather_api_url: "https://api.open-meteo.com".into(),
            prompt: "What's the weather like in Paris today?".into(),
            system_prompt: String::new(),
            api_key_env: "OPENAI_API_KEY".into(),
            tool_style: ToolStyle::Functions,
            result_role: ResultRole::User,
            resend_tools_on_followup: false,
            log_level: "info".into(),
        }
    }
}

impl WeathercallConfig {
    /// The system prompt, if one is configured.
    pub fn system_prompt(&self) -> Option<&str> {
        let trimmed = self.system_prompt.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }
}
