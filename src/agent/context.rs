//! Message builders for the conversation.

use crate::config::{ResultRole, ToolStyle, WeathercallConfig};
use crate::types::*;
use tracing::debug;

/// Build the opening conversation: optional system message, then the prompt.
pub fn initial_conversation(config: &WeathercallConfig) -> Conversation {
    match config.system_prompt() {
        Some(system) => {
            let mut conversation = Conversation::new(ChatMessage::system(system));
            conversation.push(ChatMessage::user(config.prompt.clone()));
            conversation
        }
        None => Conversation::new(ChatMessage::user(config.prompt.clone())),
    }
}

/// The assistant message to append, narrowed to the call that was executed.
///
/// In the tools dialect every `tool_calls` entry must be answered by a `tool`
/// message, so a user-role result gets a plain-text echo of the call instead.
pub fn assistant_echo(
    message: &ChatMessage,
    call: &ToolCall,
    role: ResultRole,
    style: ToolStyle,
) -> ChatMessage {
    match (role, style) {
        (ResultRole::User, ToolStyle::Tools) => {
            let text = message
                .content
                .clone()
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| format!("{}({})", call.name, call.arguments));
            ChatMessage::assistant(Some(text), Vec::new())
        }
        _ => ChatMessage::assistant(message.content.clone(), vec![call.clone()]),
    }
}

/// The message carrying a tool's output back to the model.
pub fn result_message(
    role: ResultRole,
    style: ToolStyle,
    call: &ToolCall,
    output: &str,
) -> ChatMessage {
    let message = match (role, style) {
        (ResultRole::User, _) => ChatMessage::user(output),
        (ResultRole::Tool, ToolStyle::Tools) if !call.id.is_empty() => {
            ChatMessage::tool_result(call.id.clone(), output)
        }
        // No call id to answer: a named function result is the only option.
        (ResultRole::Tool, _) => ChatMessage::function_result(call.name.clone(), output),
    };
    debug!("Result message role: {}", message.role);
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(id: &str) -> ToolCall {
        ToolCall {
            id: id.into(),
            name: "get_weather".into(),
            arguments: "{}".into(),
        }
    }

    #[test]
    fn test_initial_conversation_is_just_the_prompt() {
        let conv = initial_conversation(&WeathercallConfig::default());
        assert_eq!(conv.len(), 1);
        let prompt = conv.last().unwrap();
        assert_eq!(prompt.role, ChatRole::User);
        assert_eq!(
            prompt.content.as_deref(),
            Some("What's the weather like in Paris today?")
        );
    }

    #[test]
    fn test_initial_conversation_with_system_prompt() {
        let cfg = WeathercallConfig {
            system_prompt: "Answer briefly.".into(),
            ..Default::default()
        };
        let conv = initial_conversation(&cfg);
        assert_eq!(conv.len(), 2);
        assert_eq!(conv.messages()[0].role, ChatRole::System);
        assert_eq!(conv.messages()[1].role, ChatRole::User);
    }

    #[test]
    fn test_result_message_roles() {
        let user = result_message(ResultRole::User, ToolStyle::Tools, &call("call_1"), "15.2");
        assert_eq!(user.role, ChatRole::User);
        assert_eq!(user.content.as_deref(), Some("15.2"));
        assert!(user.tool_call_id.is_none());

        let tool = result_message(ResultRole::Tool, ToolStyle::Tools, &call("call_1"), "15.2");
        assert_eq!(tool.role, ChatRole::Tool);
        assert_eq!(tool.tool_call_id.as_deref(), Some("call_1"));

        let func = result_message(ResultRole::Tool, ToolStyle::Functions, &call(""), "15.2");
        assert_eq!(func.role, ChatRole::Function);
        assert_eq!(func.name.as_deref(), Some("get_weather"));

        let no_id = result_message(ResultRole::Tool, ToolStyle::Tools, &call(""), "15.2");
        assert_eq!(no_id.role, ChatRole::Function);
    }

    #[test]
    fn test_assistant_echo_keeps_only_executed_call() {
        let msg = ChatMessage::assistant(None, vec![call("a"), call("b")]);
        let echo = assistant_echo(&msg, &msg.tool_calls[0], ResultRole::Tool, ToolStyle::Tools);
        assert_eq!(echo.tool_calls, vec![call("a")]);

        let legacy = assistant_echo(
            &msg,
            &msg.tool_calls[0],
            ResultRole::User,
            ToolStyle::Functions,
        );
        assert_eq!(legacy.tool_calls, vec![call("a")]);
    }

    #[test]
    fn test_user_result_in_tools_dialect_leaves_no_unanswered_call() {
        let msg = ChatMessage::assistant(None, vec![call("call_1")]);
        let echo = assistant_echo(&msg, &msg.tool_calls[0], ResultRole::User, ToolStyle::Tools);
        assert!(!echo.has_tool_calls());
        assert_eq!(echo.role, ChatRole::Assistant);
        assert_eq!(echo.content.as_deref(), Some("get_weather({})"));

        let chatty = ChatMessage::assistant(Some("Checking.".into()), vec![call("call_1")]);
        let echo = assistant_echo(
            &chatty,
            &chatty.tool_calls[0],
            ResultRole::User,
            ToolStyle::Tools,
        );
        assert_eq!(echo.content.as_deref(), Some("Checking."));
    }
}
