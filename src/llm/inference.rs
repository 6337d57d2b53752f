//! Chat completions against an OpenAI-compatible API.
//!
//! Speaks both tool dialects: the current `tools` / `tool_calls` shape and
//! the legacy `functions` / `function_call` shape.

use crate::config::ToolStyle;
use crate::error::{Result, WeathercallError};
use crate::tools::ToolDefinition;
use crate::types::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Inference client wrapping the chat completions endpoint.
#[derive(Debug, Clone)]
pub struct InferenceClient {
    base_url: String,
    api_key: String,
    http: reqwest::Client,
}

/// One chat completion request.
#[derive(Debug, Clone, Copy)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [ChatMessage],
    /// Empty means no tool is declared.
    pub tools: &'a [ToolDefinition],
    pub style: ToolStyle,
}

// -- Wire types ---------------------------------------------------------------

#[derive(Debug, Serialize)]
struct ChatRequestBody<'a> {
    model: &'a str,
    messages: Vec<MessagePayload<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<ToolPayload<'a>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    functions: Option<Vec<FunctionPayload<'a>>>,
}

#[derive(Debug, Serialize)]
struct MessagePayload<'a> {
    role: ChatRole,
    content: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_calls: Option<Vec<ToolCallPayload>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    function_call: Option<FunctionCallPayload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_call_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct ToolPayload<'a> {
    r#type: &'a str,
    function: FunctionPayload<'a>,
}

#[derive(Debug, Serialize)]
struct FunctionPayload<'a> {
    name: &'a str,
    description: &'a str,
    parameters: &'a serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    strict: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ToolCallPayload {
    id: String,
    #[serde(default = "function_type")]
    r#type: String,
    function: FunctionCallPayload,
}

fn function_type() -> String {
    "function".into()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct FunctionCallPayload {
    name: String,
    arguments: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    usage: Option<UsagePayload>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
    tool_calls: Option<Vec<ToolCallPayload>>,
    function_call: Option<FunctionCallPayload>,
}

#[derive(Debug, Deserialize)]
struct UsagePayload {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

impl<'a> MessagePayload<'a> {
    fn from_message(m: &'a ChatMessage, style: ToolStyle) -> Self {
        let (tool_calls, function_call) = match (style, m.has_tool_calls()) {
            (_, false) => (None, None),
            (ToolStyle::Tools, true) => (
                Some(
                    m.tool_calls
                        .iter()
                        .map(|tc| ToolCallPayload {
                            id: tc.id.clone(),
                            r#type: function_type(),
                            function: FunctionCallPayload {
                                name: tc.name.clone(),
                                arguments: tc.arguments.clone(),
                            },
                        })
                        .collect(),
                ),
                None,
            ),
            // The legacy shape has room for exactly one call.
            (ToolStyle::Functions, true) => (
                None,
                m.tool_calls.first().map(|tc| FunctionCallPayload {
                    name: tc.name.clone(),
                    arguments: tc.arguments.clone(),
                }),
            ),
        };

        Self {
            role: m.role,
            content: m.content.as_deref(),
            tool_calls,
            function_call,
            tool_call_id: m.tool_call_id.as_deref(),
            name: m.name.as_deref(),
        }
    }
}

impl<'a> ChatRequestBody<'a> {
    fn build(request: &ChatRequest<'a>) -> Self {
        let functions = |strict: bool| -> Vec<FunctionPayload<'a>> {
            request
                .tools
                .iter()
                .map(|t| FunctionPayload {
                    name: &t.name,
                    description: &t.description,
                    parameters: &t.parameters,
                    strict: strict.then_some(t.strict),
                })
                .collect()
        };

        let (tools, functions) = match (request.tools.is_empty(), request.style) {
            (true, _) => (None, None),
            (false, ToolStyle::Tools) => (
                Some(
                    functions(true)
                        .into_iter()
                        .map(|function| ToolPayload {
                            r#type: "function",
                            function,
                        })
                        .collect(),
                ),
                None,
            ),
            (false, ToolStyle::Functions) => (None, Some(functions(false))),
        };

        Self {
            model: request.model,
            messages: request
                .messages
                .iter()
                .map(|m| MessagePayload::from_message(m, request.style))
                .collect(),
            tools,
            functions,
        }
    }
}

impl ResponseMessage {
    /// Normalise either tool dialect into an assistant message.
    fn into_message(self) -> ChatMessage {
        let mut tool_calls: Vec<ToolCall> = self
            .tool_calls
            .unwrap_or_default()
            .into_iter()
            .map(|tc| ToolCall {
                id: tc.id,
                name: tc.function.name,
                arguments: tc.function.arguments,
            })
            .collect();

        if tool_calls.is_empty() {
            if let Some(fc) = self.function_call {
                tool_calls.push(ToolCall {
                    id: String::new(),
                    name: fc.name,
                    arguments: fc.arguments,
                });
            }
        }

        ChatMessage::assistant(self.content, tool_calls)
    }
}

impl InferenceClient {
    /// Create a new inference client.
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            http: reqwest::Client::new(),
        }
    }

    /// Run one chat completion. Tool calls, if any, are left unparsed.
    pub async fn chat(&self, request: &ChatRequest<'_>) -> Result<Completion> {
        let url = format!("{}/v1/chat/completions", self.base_url);
        let body = ChatRequestBody::build(request);

        debug!(
            "Inference request to model {} ({} messages, {} tools, {} style)",
            request.model,
            request.messages.len(),
            request.tools.len(),
            request.style,
        );

        let resp = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
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

        let body: ChatResponse = serde_json::from_slice(&resp.bytes().await?)?;
        if body.choices.is_empty() {
            return Err(WeathercallError::EmptyCompletion);
        }

        let usage = body
            .usage
            .map(|u| TokenUsage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
                total_tokens: u.total_tokens,
            })
            .unwrap_or_default();

        debug!("Inference usage: {} total tokens", usage.total_tokens);

        Ok(Completion {
            choices: body
                .choices
                .into_iter()
                .map(|c| c.message.into_message())
                .collect(),
            usage,
        })
    }
}
