//! Chain access: signing identity, RPC client, and the deployer.

pub mod client;
pub mod deployer;
pub mod types;
pub mod wallet;

pub use client::ChainClient;
pub use deployer::Deployer;
pub use types::{ChainError, ChainResult, DeploymentResult};
pub use wallet::Wallet;
