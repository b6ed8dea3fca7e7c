mod chat;

use application::assistant_service::AssistantService;
use application::gate::{ExecutionGate, GateDecision};
use clap::{Parser, Subcommand};
use domain::services::Confirmer;
use infrastructure::config::Config;
use infrastructure::executor::ShellExecutor;
use presentation::{banner, output, spinner};
use shared::confirmation::ask_confirmation;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tai", version, about = "AI-powered terminal assistant")]
struct Cli {
    /// What you want to do (command mode)
    query: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    /// Start a new conversation
    #[arg(short = 'n', long)]
    new_conversation: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start interactive chat mode
    Chat {
        /// Start a new conversation
        #[arg(short = 'n', long)]
        new_conversation: bool,
    },
    /// Clear conversation history
    ClearHistory,
}

/// Interactive boundary for the execution gate: shows the warning banner,
/// then blocks on a single keypress.
struct InteractiveConfirmer;

impl Confirmer for InteractiveConfirmer {
    fn confirm(&mut self, _command: &str) -> shared::Result<bool> {
        output::danger_warning();
        ask_confirmation("▶ Execute this command?", false)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    match run(cli).await {
        Ok(code) => code,
        Err(err) => {
            output::fatal_error(&err.to_string());
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(debug: bool) {
    let default_filter = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(mut cli: Cli) -> anyhow::Result<ExitCode> {
    let config = Config::load();

    match cli.command.take() {
        Some(Commands::Chat { new_conversation }) => {
            chat::run(&config, new_conversation || cli.new_conversation).await
        }
        Some(Commands::ClearHistory) => {
            let mut service = AssistantService::connect(&config)?;
            service.clear_history()?;
            output::history_cleared();
            Ok(ExitCode::SUCCESS)
        }
        None => run_query(cli, &config).await,
    }
}

async fn run_query(cli: Cli, config: &Config) -> anyhow::Result<ExitCode> {
    let query = cli.query.unwrap_or_default();
    if query.trim().is_empty() {
        banner::display();
        output::usage_hint();
        return Ok(ExitCode::SUCCESS);
    }

    let mut service = AssistantService::connect(config)?;
    if cli.new_conversation {
        service.clear_history()?;
        output::new_conversation();
    }

    let progress = spinner::start("Analyzing your request...");
    let generated = service.generate_command(&query).await;
    progress.finish_and_clear();
    let response = generated?;

    output::analysis_panel(&response.reasoning);
    output::command_panel(&response.command);

    let mut gate = ExecutionGate::new();
    if gate.resolve(&response.command, &mut InteractiveConfirmer)? == GateDecision::Cancelled {
        output::cancelled();
        return Ok(ExitCode::SUCCESS);
    }

    // Inherited stdio: the command's output streams straight to the user.
    let result = ShellExecutor.execute(&response.command).await;
    output::execution_result(&result);

    Ok(ExitCode::SUCCESS)
}
