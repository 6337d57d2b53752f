//! Typed failures for the weathercall chain.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WeathercallError {
    /// The credential variable is unset or blank.
    #[error("{0} is not set; refusing to contact the chat API")]
    MissingCredential(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Completion contained no choices")]
    EmptyCompletion,

    #[error("Tool calls not available in completion response")]
    NoToolCall,

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid arguments for '{tool}': {reason}")]
    InvalidArguments { tool: String, reason: String },

    #[error("Response is missing field '{0}'")]
    MissingField(&'static str),
}

pub type Result<T> = std::result::Result<T, WeathercallError>;
