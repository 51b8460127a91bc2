//! snapchat-login - drive the Snapchat OAuth2 adapter from a terminal.
//!
//! Options come from a TOML file (`--config`) or from `SNAPCHAT_*`
//! environment variables.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use snapchat_oauth::{Strategy, StrategyOptions};
use std::path::PathBuf;
use tracing::info;

mod telemetry;

/// Snapchat login helper
#[derive(Parser)]
#[command(name = "snapchat-login")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// TOML options file (defaults to SNAPCHAT_* environment variables)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the URL to send the user to for consent
    AuthorizeUrl {
        /// Opaque state echoed back on the callback
        #[arg(short, long)]
        state: Option<String>,
    },
    /// Fetch the profile for an access token
    Profile {
        /// Access token issued by Snapchat
        #[arg(short = 't', long)]
        access_token: String,
    },
    /// Exchange an authorization code and fetch the profile
    Login {
        /// Code received on the callback URL
        #[arg(long)]
        code: String,
    },
}

fn load_options(path: Option<&PathBuf>) -> Result<StrategyOptions> {
    match path {
        Some(path) => StrategyOptions::from_toml_file(path)
            .with_context(|| format!("Failed to read options from {}", path.display())),
        None => Ok(StrategyOptions::from_env()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    telemetry::init_local()
        .map_err(|e| anyhow::anyhow!("Failed to init local telemetry: {}", e))?;

    let cli = Cli::parse();
    let options = load_options(cli.config.as_ref())?;
    let strategy = Strategy::new(options).context("Invalid Snapchat strategy options")?;
    info!(config = ?strategy.config(), "Snapchat strategy ready");

    match cli.command {
        Commands::AuthorizeUrl { state } => {
            println!("{}", strategy.authorization_url(state.as_deref()));
        }
        Commands::Profile { access_token } => {
            let profile = strategy
                .user_profile(&access_token)
                .await
                .context("Failed to load Snapchat profile")?;
            println!("{}", serde_json::to_string_pretty(&profile)?);
        }
        Commands::Login { code } => {
            let profile = strategy
                .authenticate(&code, (), |verified| async move { Ok(verified.profile) })
                .await
                .context("Snapchat login failed")?;
            println!("{}", serde_json::to_string_pretty(&profile)?);
        }
    }

    Ok(())
}
