//! Shared types used across the weathercall chain.

use serde::Serialize;
use std::fmt;

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

/// Serialized lowercase on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
    Tool,
    /// Legacy function-result role.
    Function,
}

impl fmt::Display for ChatRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::System => write!(f, "system"),
            Self::User => write!(f, "user"),
            Self::Assistant => write!(f, "assistant"),
            Self::Tool => write!(f, "tool"),
            Self::Function => write!(f, "function"),
        }
    }
}

/// A chat message in the conversation.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: Option<String>,
    pub tool_calls: Vec<ToolCall>,
    pub tool_call_id: Option<String>,
    /// Function name, only set on legacy function-result messages.
    pub name: Option<String>,
}

impl ChatMessage {
    fn text(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: Some(content.into()),
            tool_calls: Vec::new(),
            tool_call_id: None,
            name: None,
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::text(ChatRole::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::text(ChatRole::User, content)
    }

    pub fn assistant(content: Option<String>, tool_calls: Vec<ToolCall>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content,
            tool_calls,
            tool_call_id: None,
            name: None,
        }
    }

    /// Result message answering the tool call with the given id.
    pub fn tool_result(tool_call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            tool_call_id: Some(tool_call_id.into()),
            ..Self::text(ChatRole::Tool, content)
        }
    }

    /// Legacy result message answering a `function_call` by name.
    pub fn function_result(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::text(ChatRole::Function, content)
        }
    }

    pub fn has_tool_calls(&self) -> bool {
        !self.tool_calls.is_empty()
    }
}

/// A tool call request from the model.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolCall {
    /// Empty for legacy `function_call` responses, which carry no id.
    pub id: String,
    pub name: String,
    /// Raw JSON argument text exactly as the model produced it.
    pub arguments: String,
}

// ---------------------------------------------------------------------------
// Completions
// ---------------------------------------------------------------------------

/// Token usage from a completion call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// A chat completion: one or more candidate assistant messages.
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub choices: Vec<ChatMessage>,
    pub usage: TokenUsage,
}

impl Completion {
    pub fn first_message(&self) -> Option<&ChatMessage> {
        self.choices.first()
    }

    /// Text of the first choice.
    pub fn content(&self) -> Option<&str> {
        self.first_message().and_then(|m| m.content.as_deref())
    }

    pub fn first_tool_call(&self) -> Option<&ToolCall> {
        self.first_message().and_then(|m| m.tool_calls.first())
    }
}

// ---------------------------------------------------------------------------
// Conversation
// ---------------------------------------------------------------------------

/// Ordered, append-only message history owned by a single run.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
}

impl Conversation {
    /// Start a conversation; it is never empty.
    pub fn new(first: ChatMessage) -> Self {
        Self {
            messages: vec![first],
        }
    }

    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }
}
