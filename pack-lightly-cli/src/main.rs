use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod commands;
mod config;

use commands::{ConfigCommand, ItemCommand, ListsCommand, ShowCommand, SyncCommand};
use config::Config;
use pack_lightly_core::{ApiClient, NoSession, StaticToken, TokenProvider};

#[derive(Parser)]
#[command(name = "pack")]
#[command(version)]
#[command(about = "Plan trips and pack light", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show your packing lists
    Lists(ListsCommand),

    /// Show the checklist for a packing list
    Show(ShowCommand),

    /// Edit checklist items
    Item(ItemCommand),

    /// Re-push categories to the server
    Sync(SyncCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pack=info,pack_lightly_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = Config::load(cli.config)?;
    let api = api_client(&config);

    match &cli.command {
        Some(Commands::Lists(cmd)) => cmd.run(&api).await,
        Some(Commands::Show(cmd)) => cmd.run(&api, &config).await,
        Some(Commands::Item(cmd)) => cmd.run(&api, &config).await,
        Some(Commands::Sync(cmd)) => cmd.run(&api, &config).await,
        Some(Commands::Config(cmd)) => cmd.run(&config),
        None => {
            println!("Use --help to see available commands");
            Ok(())
        }
    }
}

fn api_client(config: &Config) -> ApiClient {
    let tokens: Arc<dyn TokenProvider> = match &config.auth.token {
        Some(token) => Arc::new(StaticToken::new(token.clone())),
        None => Arc::new(NoSession),
    };
    ApiClient::new(config.api_url.value.clone(), tokens)
}
