//! tempkey-client
//!
//! Command line front end for the temporary-key game contracts.
//!
//! ```text
//!   config (TOML + env) ──▶ KeyRing (work / temp / operator keys from env)
//!                                   │
//!                                   ▼
//!   subcommand ──▶ GameClient ──▶ TxSubmitter ──▶ JSON-RPC node
//!                                   │
//!                                   ▼
//!                        tx hash / receipt / state on stdout
//! ```
//!
//! Any error ends the run with a diagnostic on stderr and exit status 1.

use std::path::PathBuf;
use std::process::ExitCode;

use alloy::primitives::{Address, Bytes, TxHash, U256};
use clap::{Args, Parser, Subcommand};

use tempkey_client::blockchain::KeyRing;
use tempkey_client::config::resolve_config;
use tempkey_client::contracts::game;
use tempkey_client::observability::init_logging;
use tempkey_client::{ClientConfig, GameClient};

#[derive(Parser)]
#[command(name = "tempkey-client")]
#[command(about = "Submit temporary-key and game transactions", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct WaitArgs {
    /// Return after broadcast instead of waiting for the receipt
    #[arg(long)]
    no_wait: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the addresses derived from the configured keys
    Addresses,
    /// Set issuer, line of credit and position, reading each back
    GameInfo,
    /// Set the game issuer (defaults to the work address)
    SetIssuer {
        issuer: Option<Address>,
        #[command(flatten)]
        wait: WaitArgs,
    },
    /// Set the game line of credit
    SetLineOfCredit {
        amount: U256,
        #[command(flatten)]
        wait: WaitArgs,
    },
    /// Move the player
    MovePlayer {
        steps: U256,
        #[command(flatten)]
        wait: WaitArgs,
    },
    /// Read issuer, line of credit and position
    Query,
    /// Bind the temporary key to the game contract
    BindTempKey {
        /// Validity period passed to the contract (defaults to demo.period)
        #[arg(long)]
        period: Option<String>,
        #[command(flatten)]
        wait: WaitArgs,
    },
    /// Invalidate the temporary key
    InvalidateTempKey {
        #[command(flatten)]
        wait: WaitArgs,
    },
    /// Move the player with the temporary key, on behalf of the work account
    BehalfMovePlayer {
        steps: U256,
        #[arg(long)]
        period: Option<String>,
        #[command(flatten)]
        wait: WaitArgs,
    },
    /// Grant the work account more line of credit (operator key)
    AddLineOfCredit {
        value: U256,
        #[command(flatten)]
        wait: WaitArgs,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match resolve_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    init_logging(&config.observability.log_level);

    match run(cli.command, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Run aborted");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Commands, config: &ClientConfig) -> Result<(), Box<dyn std::error::Error>> {
    let keys = KeyRing::from_env(&config.keys)?;
    let client = GameClient::from_config(config, keys)?;
    let default_period = config.demo.period.as_str();

    match command {
        Commands::Addresses => {
            for (role, address) in client.keys().addresses() {
                println!("{:<10} {}", role, address);
            }
            println!("{:<10} {}", "temp-key", client.contracts().temp_key);
            println!("{:<10} {}", "game", client.contracts().game);
        }
        Commands::GameInfo => {
            let report = client
                .game_info(
                    U256::from(config.demo.line_of_credit),
                    U256::from(config.demo.move_steps),
                )
                .await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::SetIssuer { issuer, wait } => {
            let issuer = issuer.unwrap_or_else(|| client.keys().work.address());
            let tx_hash = client.set_issuer(issuer).await?;
            finish(&client, tx_hash, &wait).await?;
        }
        Commands::SetLineOfCredit { amount, wait } => {
            let tx_hash = client.set_line_of_credit(amount).await?;
            finish(&client, tx_hash, &wait).await?;
        }
        Commands::MovePlayer { steps, wait } => {
            let tx_hash = client.move_player(steps).await?;
            finish(&client, tx_hash, &wait).await?;
        }
        Commands::Query => {
            let state = client.query_state().await?;
            println!("{}", serde_json::to_string_pretty(&state)?);
        }
        Commands::BindTempKey { period, wait } => {
            let period = period.as_deref().unwrap_or(default_period);
            let tx_hash = client.bind_temp_key(period.as_bytes()).await?;
            finish(&client, tx_hash, &wait).await?;
        }
        Commands::InvalidateTempKey { wait } => {
            let tx_hash = client.invalidate_temp_key().await?;
            finish(&client, tx_hash, &wait).await?;
        }
        Commands::BehalfMovePlayer { steps, period, wait } => {
            let period = period.as_deref().unwrap_or(default_period);
            let inner: Bytes = game::move_player(steps);
            let tx_hash = client.sign_on_behalf(period.as_bytes(), inner).await?;
            finish(&client, tx_hash, &wait).await?;
        }
        Commands::AddLineOfCredit { value, wait } => {
            let tx_hash = client.add_line_of_credit(value).await?;
            finish(&client, tx_hash, &wait).await?;
        }
    }

    Ok(())
}

async fn finish(
    client: &GameClient,
    tx_hash: TxHash,
    wait: &WaitArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("transaction: {}", tx_hash);
    if wait.no_wait {
        return Ok(());
    }

    let receipt = client.wait_for_receipt(tx_hash).await?;
    println!("receipt: {}", serde_json::to_string_pretty(&receipt)?);
    Ok(())
}
