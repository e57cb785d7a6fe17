//! zk-deploy: contract deployment harness.
//!
//! ```text
//!   deploy:     env ─▶ keys ─▶ artifact ─▶ wallet ─▶ client ─▶ deployer ─▶ report
//!   check-key:  env ─▶ keys ─▶ wallet ─▶ report
//! ```
//!
//! Every fatal error propagates to `main`, which logs it with context and
//! maps it to exit code 1. Nothing below this file terminates the process.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use alloy::primitives::{hex, Bytes};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use zk_deploy::artifact::{ArtifactError, ContractArtifact};
use zk_deploy::chain::{ChainClient, ChainError, Deployer, Wallet};
use zk_deploy::config::{self, ConfigError, HarnessConfig, NetworkName};
use zk_deploy::keys::{self, KeyError};
use zk_deploy::report::Reporter;

#[derive(Parser)]
#[command(name = "zk-deploy")]
#[command(about = "Deploy a compiled contract to zkSync/EVM networks", long_about = None)]
struct Cli {
    /// Optional TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Deploy a compiled contract artifact
    Deploy {
        /// Contract name; resolves <artifacts-dir>/contracts/<name>.sol/<name>.json
        #[arg(long)]
        contract: String,

        /// Target network
        #[arg(long, value_enum)]
        network: Option<NetworkName>,

        /// RPC URL, overriding environment and network default
        #[arg(long)]
        rpc_url: Option<String>,

        /// Artifact directory, overriding the network convention
        #[arg(long)]
        artifacts_dir: Option<PathBuf>,

        /// ABI-encoded constructor arguments as hex
        #[arg(long)]
        constructor_args: Option<String>,
    },
    /// Validate the configured private key and print its address
    CheckKey,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Key(#[from] KeyError),
    #[error(transparent)]
    Artifact(#[from] ArtifactError),
    #[error(transparent)]
    Chain(#[from] ChainError),
    #[error("could not write output: {0}")]
    Io(#[from] io::Error),
    #[error("invalid constructor arguments: {0}")]
    ConstructorArgs(hex::FromHexError),
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "zk_deploy=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "Fatal");
            ExitCode::from(1)
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let mut config = config::load_or_default(cli.config.as_deref())?;

    match cli.command {
        Commands::Deploy {
            contract,
            network,
            rpc_url,
            artifacts_dir,
            constructor_args,
        } => {
            if let Some(network) = network {
                config.network = network;
            }
            if rpc_url.is_some() {
                config.rpc_url = rpc_url;
            }
            if artifacts_dir.is_some() {
                config.artifacts_dir = artifacts_dir;
            }
            let args = parse_constructor_args(constructor_args.as_deref())?;
            run_deploy(&config, &contract, args).await
        }
        Commands::CheckKey => run_check_key(),
    }
}

async fn run_deploy(
    config: &HarnessConfig,
    contract: &str,
    constructor_args: Bytes,
) -> Result<(), CliError> {
    let mut reporter = Reporter::stdout();
    let endpoint = config.endpoint()?;

    let raw_key = keys::load_from_env()?;
    let key = keys::validate(&raw_key)?;

    // Artifact problems must surface before any wallet or provider exists.
    let artifacts_dir = config.resolved_artifacts_dir();
    let (artifact, path) = ContractArtifact::load(&artifacts_dir, contract)?;
    tracing::info!(path = %path.display(), "Artifact loaded");

    let wallet = Wallet::from_private_key(key.trimmed(), endpoint.chain_id)?;
    reporter.deployer_identity(&key.masked, wallet.address())?;

    let client = ChainClient::connect(&endpoint, &wallet, config.rpc_timeout_secs);
    let deployer = Deployer::new(
        client,
        wallet,
        config.confirmation_blocks,
        config.confirmation_timeout_secs,
    );

    tracing::info!(contract, network = %config.network, "Deploying contract");
    let result = deployer.deploy(&artifact, &constructor_args).await?;
    reporter.deployed(contract, &result)?;

    Ok(())
}

fn run_check_key() -> Result<(), CliError> {
    let mut reporter = Reporter::stdout();

    let raw_key = keys::load_from_env()?;
    let key = keys::validate(&raw_key)?;
    reporter.key_summary(&key)?;

    // Chain id is irrelevant for address derivation.
    let wallet = Wallet::from_private_key(key.trimmed(), 1)?;
    reporter.derived_address(wallet.address())?;

    Ok(())
}

fn parse_constructor_args(raw: Option<&str>) -> Result<Bytes, CliError> {
    match raw {
        None => Ok(Bytes::new()),
        Some(s) => hex::decode(s.trim().trim_start_matches("0x"))
            .map(Bytes::from)
            .map_err(CliError::ConstructorArgs),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_constructor_args() {
        assert_eq!(parse_constructor_args(None).unwrap(), Bytes::new());
        assert_eq!(
            parse_constructor_args(Some("0xaabb")).unwrap().as_ref(),
            &[0xaa, 0xbb]
        );
        assert_eq!(
            parse_constructor_args(Some("aabb")).unwrap().as_ref(),
            &[0xaa, 0xbb]
        );
        assert!(parse_constructor_args(Some("0xzz")).is_err());
        assert!(parse_constructor_args(Some("0xabc")).is_err());
    }
}
