use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;

use commands::Command;
use config::Config;
use todo_sync_core::{HttpRemote, TodoApp};

#[derive(Parser)]
#[command(name = "todo")]
#[command(version)]
#[command(about = "A todo list kept in a remote collection", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    /// Base URL of the todo collection (overrides config and TODO_API_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todo=warn,todo_sync_core=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = Config::load(cli.config, cli.base_url)?;
    tracing::debug!(
        base_url = %config.base_url.value,
        source = %config.base_url.source,
        "using todo collection"
    );

    let mut app = TodoApp::new(HttpRemote::new(&config.base_url.value));
    let mut stdout = std::io::stdout().lock();
    cli.command.run(&mut app, &config, &mut stdout)
}
