//! The three-step tool-calling chain: Dispatch → Execute → Reconcile.
//!
//! 1. Send the conversation with the tool declarations
//! 2. Run the tool the model asked for
//! 3. Append the call and its result, then ask for the final answer
//!
//! Each step awaits the previous one; nothing is spawned.

use crate::agent::context;
use crate::config::{self, WeathercallConfig};
use crate::error::WeathercallError;
use crate::llm::{ChatRequest, InferenceClient};
use crate::tools::{ToolDefinition, ToolRegistry};
use crate::types::*;
use crate::weather::WeatherClient;
use anyhow::{Context, Result};
use tracing::{info, warn};

/// Progress notifications emitted while the chain runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step<'a> {
    Dispatching,
    Executing,
    ToolOutput(&'a str),
    Reconciling,
    Answer(&'a str),
}

pub trait StepObserver {
    fn on_step(&mut self, step: Step<'_>);
}

/// Observer that drops every notification.
pub struct Silent;

impl StepObserver for Silent {
    fn on_step(&mut self, _step: Step<'_>) {}
}

/// What the tool executor produced for one call.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolOutcome {
    pub call: ToolCall,
    pub output: String,
}

/// Everything a finished run leaves behind.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub conversation: Conversation,
    pub tool_output: String,
    pub final_completion: Completion,
}

impl RunReport {
    pub fn answer(&self) -> Option<&str> {
        self.final_completion.content()
    }
}

/// Send the conversation, declaring `tools`, and return the completion.
pub async fn dispatch(
    inference: &InferenceClient,
    config: &WeathercallConfig,
    conversation: &Conversation,
    tools: &[ToolDefinition],
) -> Result<Completion> {
    info!(
        "Dispatching {} message(s) to {} with {} tool(s)",
        conversation.len(),
        config.model,
        tools.len()
    );
    let completion = inference
        .chat(&ChatRequest {
            model: &config.model,
            messages: conversation.messages(),
            tools,
            style: config.tool_style,
        })
        .await
        .context("Chat completion request failed")?;
    Ok(completion)
}

/// Run the first tool call of the first choice.
pub async fn execute(completion: &Completion, registry: &ToolRegistry) -> Result<ToolOutcome> {
    let call = completion
        .first_tool_call()
        .ok_or(WeathercallError::NoToolCall)?;

    let extra = completion
        .first_message()
        .map_or(0, |m| m.tool_calls.len().saturating_sub(1));
    if extra > 0 {
        warn!("Model requested {} additional tool call(s); only the first runs", extra);
    }

    info!("Tool call: {}({})", call.name, call.arguments);
    let output = registry
        .execute(call)
        .await
        .with_context(|| format!("Tool '{}' failed", call.name))?;

    Ok(ToolOutcome {
        call: call.clone(),
        output,
    })
}

/// Append the tool call and its result, then request the final completion.
///
/// Both messages are in `conversation` before the follow-up is sent.
pub async fn reconcile(
    inference: &InferenceClient,
    config: &WeathercallConfig,
    conversation: &mut Conversation,
    completion: &Completion,
    outcome: &ToolOutcome,
    tools: &[ToolDefinition],
) -> Result<Completion> {
    let requested = completion
        .first_message()
        .ok_or(WeathercallError::EmptyCompletion)?;
    conversation.push(context::assistant_echo(
        requested,
        &outcome.call,
        config.result_role,
        config.tool_style,
    ));
    conversation.push(context::result_message(
        config.result_role,
        config.tool_style,
        &outcome.call,
        &outcome.output,
    ));

    let followup_tools: &[ToolDefinition] = if config.resend_tools_on_followup {
        tools
    } else {
        &[]
    };
    dispatch(inference, config, conversation, followup_tools).await
}

/// Run the whole chain from the configured prompt.
pub async fn run(
    inference: &InferenceClient,
    registry: &ToolRegistry,
    config: &WeathercallConfig,
    observer: &mut dyn StepObserver,
) -> Result<RunReport> {
    let mut conversation = context::initial_conversation(config);
    let tools = registry.definitions();

    observer.on_step(Step::Dispatching);
    let completion = dispatch(inference, config, &conversation, tools).await?;

    observer.on_step(Step::Executing);
    let outcome = execute(&completion, registry).await?;
    observer.on_step(Step::ToolOutput(&outcome.output));

    observer.on_step(Step::Reconciling);
    let final_completion = reconcile(
        inference,
        config,
        &mut conversation,
        &completion,
        &outcome,
        tools,
    )
    .await?;

    if let Some(answer) = final_completion.content() {
        observer.on_step(Step::Answer(answer));
    } else {
        warn!("Final completion carried no text content");
    }

    Ok(RunReport {
        conversation,
        tool_output: outcome.output,
        final_completion,
    })
}

/// Resolve the credential, build both clients and run the chain.
///
/// A missing credential fails here, before any client is built.
pub async fn run_with_env<F>(
    config: &WeathercallConfig,
    lookup: F,
    observer: &mut dyn StepObserver,
) -> Result<RunReport>
where
    F: Fn(&str) -> Option<String>,
{
    let api_key = config::resolve_api_key(config, lookup)?;

    let inference = InferenceClient::new(&config.chat_api_url, &api_key);
    let registry = ToolRegistry::with_weather(WeatherClient::new(&config.weather_api_url));

    info!(
        "Model {} ({} style, result role {})",
        config.model, config.tool_style, config.result_role
    );
    run(&inference, &registry, config, observer).await
}
