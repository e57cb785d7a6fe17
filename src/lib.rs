//! Deployment harness for zkSync/Ethereum-compatible networks.
//!
//! Loads a private key and RPC endpoint from configuration, reads a
//! precompiled contract artifact, submits a contract-creation transaction,
//! and waits for the network to confirm it. A separate diagnostic path
//! validates a key's format and derives its address without deploying.

pub mod artifact;
pub mod chain;
pub mod config;
pub mod keys;
pub mod report;

pub use artifact::ContractArtifact;
pub use chain::{ChainClient, Deployer, DeploymentResult, Wallet};
pub use config::{HarnessConfig, NetworkEndpoint, NetworkName};
pub use report::Reporter;
