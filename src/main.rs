//! Weathercall — chat model + `get_weather` tool, end to end.
//!
//! Usage:
//!   weathercall                          Ask the configured prompt
//!   weathercall --prompt "Weather in Oslo?"
//!   weathercall --tool-style tools --result-role tool

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use tracing::info;

use weathercall::agent::{self, Step, StepObserver};
use weathercall::config::{self, ResultRole, ToolStyle, WeathercallConfig};

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(name = "weathercall")]
#[command(version = "0.1.0")]
#[command(about = "Ask a chat model about the weather through a function-calling tool")]
struct Cli {
    /// Path to the TOML config file.
    #[arg(long)]
    config: Option<String>,

    /// Chat model identifier.
    #[arg(long)]
    model: Option<String>,

    /// The user message that opens the conversation.
    #[arg(long)]
    prompt: Option<String>,

    /// Tool dialect spoken to the chat API.
    #[arg(long, value_enum)]
    tool_style: Option<ToolStyle>,

    /// Role of the message carrying the tool result.
    #[arg(long, value_enum)]
    result_role: Option<ResultRole>,

    /// Log level (debug, info, warn, error).
    #[arg(long)]
    log_level: Option<String>,
}

impl Cli {
    /// Apply command-line overrides on top of the file config.
    fn apply(self, mut cfg: WeathercallConfig) -> WeathercallConfig {
        if let Some(model) = self.model {
            cfg.model = model;
        }
        if let Some(prompt) = self.prompt {
            cfg.prompt = prompt;
        }
        if let Some(style) = self.tool_style {
            cfg.tool_style = style;
        }
        if let Some(role) = self.result_role {
            cfg.result_role = role;
        }
        if let Some(level) = self.log_level {
            cfg.log_level = level;
        }
        cfg
    }
}

/// Prints the step markers and the final answer to stdout.
struct ConsoleSteps;

impl StepObserver for ConsoleSteps {
    fn on_step(&mut self, step: Step<'_>) {
        match step {
            Step::Dispatching => {
                println!("{} Sending function to GPT...", "First step:".green().bold())
            }
            Step::Executing => println!(
                "{} Calling the model create function...",
                "Second step:".green().bold()
            ),
            Step::ToolOutput(output) => println!("Weather API Response: {}", output),
            Step::Reconciling => println!(
                "{} Supplying the model with results...",
                "Third step:".green().bold()
            ),
            Step::Answer(answer) => println!("{}", answer),
        }
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .as_deref()
        .map(config::expand_path)
        .unwrap_or_else(config::default_config_path);
    let file_config = config::load_config(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;
    let cfg = cli.apply(file_config);

    // Initialize logging
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let report =
        agent::run_with_env(&cfg, |name| std::env::var(name).ok(), &mut ConsoleSteps).await?;

    info!(
        "Done: {} messages, {} tokens in final completion",
        report.conversation.len(),
        report.final_completion.usage.total_tokens
    );
    Ok(())
}
