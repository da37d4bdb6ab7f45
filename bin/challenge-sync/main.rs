//! challenge-sync - command line client for the challenge feed

mod commands;
mod style;

use anyhow::{Context, Result};
use challenge_sync::{ChallengeStore, ClientConfig, HttpTransport, PlayerInfo};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "challenge-sync",
    about = "Fetch, progress and claim player challenges"
)]
struct Cli {
    /// Challenge backend base URL
    #[arg(long, env = "CHALLENGES_API_URL", default_value = challenge_sync::config::DEFAULT_BASE_URL)]
    api_url: String,

    /// Bearer API key
    #[arg(long, env = "CHALLENGES_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "CHALLENGES_TIMEOUT_SECS", default_value_t = challenge_sync::config::DEFAULT_TIMEOUT_SECS)]
    timeout: u64,

    #[arg(long, env = "PLAYER_LOCATION", default_value = "Country")]
    location: String,

    #[arg(long, env = "PLAYER_AGE", default_value_t = 18)]
    age: u32,

    #[arg(long, env = "PLAYER_GAME_TYPE", default_value = "action")]
    game_type: String,

    #[arg(long, env = "PLAYER_ID", default_value = "user")]
    player_id: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List challenges available to the player
    List,
    /// Show a single challenge as JSON
    Show { id: String },
    /// Report progress (clamped to 0 - 100)
    Progress {
        id: String,
        #[arg(allow_negative_numbers = true)]
        value: i32,
    },
    /// Claim a finished challenge
    Claim { id: String },
    /// Poll the list and print timing analytics after every round
    Watch {
        /// Seconds between fetches
        #[arg(long, default_value_t = 30)]
        interval: u64,
        /// Stop after this many rounds (runs forever when omitted)
        #[arg(long)]
        rounds: Option<u32>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = ClientConfig {
        base_url: cli.api_url,
        api_key: cli.api_key.filter(|k| !k.is_empty()),
        timeout_secs: cli.timeout,
    };
    let transport = HttpTransport::new(&config).context("Failed to create HTTP client")?;
    let player = PlayerInfo::new(cli.location, cli.age, cli.game_type, cli.player_id);
    let store = ChallengeStore::new(transport, player);

    match cli.command {
        Command::List => commands::list(&store).await,
        Command::Show { id } => commands::show(&store, &id).await,
        Command::Progress { id, value } => commands::progress(&store, &id, value).await,
        Command::Claim { id } => commands::claim(&store, &id).await,
        Command::Watch { interval, rounds } => commands::watch(&store, interval, rounds).await,
    }
}
