//! marketplace-client - command line access to the marketplace backend

#![allow(missing_docs)]

use clap::{Parser, Subcommand};
use marketplace_client::utils::init_logging;
use marketplace_client::config::StorageBackend;
use marketplace_client::{ApiClient, ApiRequest, ClientConfig};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::warn;

#[derive(Debug, Parser)]
#[command(name = "marketplace-client", version, about = "Marketplace backend client")]
struct Cli {
    /// YAML configuration file; environment variables are used when absent
    #[arg(short, long, env = "MARKETPLACE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Check required permissions against granted ones (exit code 1 when denied)
    Authorize {
        /// Permissions that satisfy the check; any one suffices
        #[arg(short, long, value_delimiter = ',')]
        required: Vec<String>,
        /// Permissions held
        #[arg(short, long, value_delimiter = ',')]
        granted: Vec<String>,
    },
    /// Sign in and store the issued tokens
    Login {
        #[arg(short, long)]
        username: String,
        #[arg(short, long, env = "MARKETPLACE_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long)]
        remember_me: bool,
    },
    /// Sign out and forget stored tokens
    Logout,
    /// Show the signed-in user's profile
    Whoami,
    /// GET a path and print the JSON response
    Get {
        path: String,
        /// Query parameters as key=value
        #[arg(short, long)]
        query: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = match &cli.config {
        Some(path) => ClientConfig::from_file(path).await?,
        None => ClientConfig::from_env()?,
    };
    init_logging(&config.logging)?;

    match cli.command {
        Command::Authorize { required, granted } => {
            return Ok(authorize(&config, &required, &granted));
        }
        Command::Login {
            username,
            password,
            remember_me,
        } => {
            if let Some(notice) = memory_storage_notice(&config) {
                warn!("{}", notice);
                eprintln!("warning: {}", notice);
            }
            let client = ApiClient::from_config(config)?;
            let identity = client.login(&username, &password, remember_me).await?;
            println!("signed in as {}", identity.username);
        }
        Command::Logout => {
            ApiClient::from_config(config)?.logout().await?;
            println!("signed out");
        }
        Command::Whoami => {
            let identity = ApiClient::from_config(config)?.fetch_profile().await?;
            println!("{}", serde_json::to_string_pretty(&identity)?);
        }
        Command::Get { path, query } => {
            let client = ApiClient::from_config(config)?;
            let mut request = ApiRequest::get(path);
            for pair in query {
                let (key, value) = pair
                    .split_once('=')
                    .ok_or_else(|| anyhow::anyhow!("query must be key=value, got '{}'", pair))?;
                request = request.query(key, value);
            }
            let body: serde_json::Value = client.send(request).await?;
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn authorize(config: &ClientConfig, required: &[String], granted: &[String]) -> ExitCode {
    match config.evaluator().check(required, granted).denial_reason {
        None => {
            println!("allowed");
            ExitCode::SUCCESS
        }
        Some(reason) => {
            println!("denied: {}", reason);
            ExitCode::from(1)
        }
    }
}

/// Tokens from `login` die with the process unless storage is on disk
fn memory_storage_notice(config: &ClientConfig) -> Option<&'static str> {
    (config.storage.backend == StorageBackend::Memory).then_some(
        "credentials are kept in memory only and will be lost on exit; \
         set MARKETPLACE_STORAGE_PATH or storage.path in the config file",
    )
}
