//! Configuration schema for the deployment harness.
//!
//! Every endpoint-shaped field resolves in the same priority order:
//! explicit value, then environment variable, then documented default.

use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::loader::ConfigError;

/// Named networks the harness knows how to reach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum NetworkName {
    Localhost,
    ZksyncTestnet,
    ZksyncMainnet,
    Sepolia,
}

impl NetworkName {
    /// Environment variable consulted for this network's RPC URL.
    pub fn rpc_env_var(self) -> &'static str {
        match self {
            Self::Localhost => "LOCALHOST_RPC",
            Self::ZksyncTestnet => "ZKSYNC_TESTNET_RPC",
            Self::ZksyncMainnet => "ZKSYNC_MAINNET_RPC",
            Self::Sepolia => "SEPOLIA_RPC",
        }
    }

    /// Fallback RPC URL when neither configuration nor environment supplies one.
    pub fn default_rpc_url(self) -> &'static str {
        match self {
            Self::Localhost => "http://127.0.0.1:8545",
            Self::ZksyncTestnet => "https://zksync2-testnet.zksync.dev",
            Self::ZksyncMainnet => "https://zksync2-mainnet.zksync.io",
            Self::Sepolia => "https://sepolia.rpc.thirdweb.com",
        }
    }

    /// Chain id for EIP-155 replay protection.
    pub fn chain_id(self) -> u64 {
        match self {
            Self::Localhost => 31337,
            Self::ZksyncTestnet => 280,
            Self::ZksyncMainnet => 324,
            Self::Sepolia => 11_155_111,
        }
    }

    /// zkSync networks compile with zksolc and emit artifacts separately.
    pub fn is_zksync(self) -> bool {
        matches!(self, Self::ZksyncTestnet | Self::ZksyncMainnet)
    }

    /// Conventional compiler output directory for this network.
    pub fn default_artifacts_dir(self) -> &'static str {
        if self.is_zksync() {
            "artifacts-zk"
        } else {
            "artifacts"
        }
    }
}

impl std::fmt::Display for NetworkName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Localhost => "localhost",
            Self::ZksyncTestnet => "zksync_testnet",
            Self::ZksyncMainnet => "zksync_mainnet",
            Self::Sepolia => "sepolia",
        };
        f.write_str(name)
    }
}

/// Resolved RPC endpoint: URL plus the chain id expected behind it.
#[derive(Debug, Clone)]
pub struct NetworkEndpoint {
    pub url: Url,
    pub chain_id: u64,
}

/// Harness configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// Target network.
    pub network: NetworkName,

    /// Explicit RPC URL, overriding environment and default.
    pub rpc_url: Option<String>,

    /// Explicit chain id, overriding the network's well-known value.
    pub chain_id: Option<u64>,

    /// Compiler output directory, overriding the network convention.
    pub artifacts_dir: Option<PathBuf>,

    /// Per-request RPC timeout in seconds.
    pub rpc_timeout_secs: u64,

    /// Block confirmations required before a deployment counts as final.
    pub confirmation_blocks: u32,

    /// Maximum time to wait for confirmation in seconds.
    pub confirmation_timeout_secs: u64,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            network: NetworkName::Sepolia,
            rpc_url: None,
            chain_id: None,
            artifacts_dir: None,
            rpc_timeout_secs: 30,
            confirmation_blocks: 1,
            confirmation_timeout_secs: 300,
        }
    }
}

impl HarnessConfig {
    /// Resolve the RPC endpoint for the selected network.
    pub fn endpoint(&self) -> Result<NetworkEndpoint, ConfigError> {
        let raw = match &self.rpc_url {
            Some(url) => url.clone(),
            None => std::env::var(self.network.rpc_env_var())
                .unwrap_or_else(|_| self.network.default_rpc_url().to_string()),
        };
        let url = raw.trim().parse().map_err(|source| ConfigError::InvalidRpcUrl {
            url: raw.clone(),
            source,
        })?;
        Ok(NetworkEndpoint {
            url,
            chain_id: self.chain_id.unwrap_or_else(|| self.network.chain_id()),
        })
    }

    /// Artifact directory for the selected network.
    pub fn resolved_artifacts_dir(&self) -> PathBuf {
        self.artifacts_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(self.network.default_artifacts_dir()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_url_wins_over_environment() {
        std::env::set_var("LOCALHOST_RPC", "http://10.0.0.1:8545");
        let config = HarnessConfig {
            network: NetworkName::Localhost,
            rpc_url: Some("http://192.168.1.1:8545".to_string()),
            ..Default::default()
        };
        let endpoint = config.endpoint().unwrap();
        assert_eq!(endpoint.url.as_str(), "http://192.168.1.1:8545/");
        std::env::remove_var("LOCALHOST_RPC");
    }

    #[test]
    fn test_environment_wins_over_default() {
        std::env::set_var("ZKSYNC_TESTNET_RPC", "http://127.0.0.1:3050");
        let config = HarnessConfig {
            network: NetworkName::ZksyncTestnet,
            ..Default::default()
        };
        let endpoint = config.endpoint().unwrap();
        assert_eq!(endpoint.url.as_str(), "http://127.0.0.1:3050/");
        assert_eq!(endpoint.chain_id, 280);
        std::env::remove_var("ZKSYNC_TESTNET_RPC");
    }

    #[test]
    fn test_default_url_fallback() {
        let config = HarnessConfig {
            network: NetworkName::ZksyncMainnet,
            ..Default::default()
        };
        let endpoint = config.endpoint().unwrap();
        assert_eq!(endpoint.url.as_str(), "https://zksync2-mainnet.zksync.io/");
        assert_eq!(endpoint.chain_id, 324);
    }

    #[test]
    fn test_chain_id_override() {
        let config = HarnessConfig {
            network: NetworkName::Sepolia,
            chain_id: Some(1),
            ..Default::default()
        };
        assert_eq!(config.endpoint().unwrap().chain_id, 1);
    }

    #[test]
    fn test_invalid_url_is_rejected() {
        let config = HarnessConfig {
            rpc_url: Some("not a url".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            config.endpoint(),
            Err(ConfigError::InvalidRpcUrl { .. })
        ));
    }

    #[test]
    fn test_artifacts_dir_follows_network() {
        let zk = HarnessConfig {
            network: NetworkName::ZksyncTestnet,
            ..Default::default()
        };
        assert_eq!(zk.resolved_artifacts_dir(), PathBuf::from("artifacts-zk"));

        let evm = HarnessConfig {
            network: NetworkName::Sepolia,
            ..Default::default()
        };
        assert_eq!(evm.resolved_artifacts_dir(), PathBuf::from("artifacts"));

        let overridden = HarnessConfig {
            artifacts_dir: Some(PathBuf::from("out")),
            ..Default::default()
        };
        assert_eq!(overridden.resolved_artifacts_dir(), PathBuf::from("out"));
    }
}
