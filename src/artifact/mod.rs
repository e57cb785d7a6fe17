//! Compiled contract artifact loading.
//!
//! Artifacts follow the hardhat/zksolc output layout:
//! `<artifacts-dir>/contracts/<Name>.sol/<Name>.json`, bundling the contract
//! ABI with its creation bytecode. The compiler itself is an external
//! collaborator; this module only reads its output.

use std::fs;
use std::path::{Path, PathBuf};

use alloy::json_abi::JsonAbi;
use alloy::primitives::Bytes;
use serde::Deserialize;
use thiserror::Error;

/// Errors from artifact loading. Both variants carry the attempted path.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("could not read artifact at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse artifact at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Compiled contract artifact: ABI plus creation bytecode.
#[derive(Debug, Clone, Deserialize)]
pub struct ContractArtifact {
    #[serde(rename = "contractName", default)]
    pub contract_name: Option<String>,
    pub abi: JsonAbi,
    pub bytecode: Bytes,
}

impl ContractArtifact {
    /// Conventional artifact path for a contract name.
    pub fn conventional_path(artifacts_dir: &Path, contract: &str) -> PathBuf {
        artifacts_dir
            .join("contracts")
            .join(format!("{contract}.sol"))
            .join(format!("{contract}.json"))
    }

    /// Load an artifact from the conventional path under `artifacts_dir`.
    ///
    /// Returns the parsed artifact together with the path it was read from.
    pub fn load(artifacts_dir: &Path, contract: &str) -> Result<(Self, PathBuf), ArtifactError> {
        let path = Self::conventional_path(artifacts_dir, contract);
        let contents = fs::read_to_string(&path).map_err(|source| ArtifactError::Read {
            path: path.clone(),
            source,
        })?;
        let artifact = serde_json::from_str(&contents).map_err(|source| ArtifactError::Parse {
            path: path.clone(),
            source,
        })?;
        Ok((artifact, path))
    }

    /// Number of inputs the contract constructor declares, if any.
    pub fn constructor_arity(&self) -> usize {
        self.abi
            .constructor
            .as_ref()
            .map(|c| c.inputs.len())
            .unwrap_or(0)
    }
}
