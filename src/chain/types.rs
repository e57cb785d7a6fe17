//! Chain-specific types and error definitions.

use alloy::primitives::{Address, TxHash};
use thiserror::Error;

/// Errors that can occur during chain operations.
#[derive(Debug, Error)]
pub enum ChainError {
    /// RPC connection or request failed.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// RPC request timed out.
    #[error("RPC timeout after {0} seconds")]
    Timeout(u64),

    /// Transaction was not confirmed within the configured window.
    #[error("transaction {tx_hash} not confirmed after {timeout_secs} seconds")]
    ConfirmationTimeout { tx_hash: TxHash, timeout_secs: u64 },

    /// Transaction was reverted on-chain.
    #[error("transaction reverted: {0}")]
    Reverted(TxHash),

    /// Invalid private key format or derivation error.
    #[error("wallet error: {0}")]
    Wallet(String),

    /// The contract constructor declares inputs but none were supplied.
    #[error("constructor of {contract} takes {arity} argument(s) but none were provided; pass --constructor-args")]
    MissingConstructorArgs { contract: String, arity: usize },

    /// The confirmed receipt did not report a created contract.
    #[error("receipt for {0} carries no contract address")]
    MissingContractAddress(TxHash),
}

/// Result type for chain operations.
pub type ChainResult<T> = Result<T, ChainError>;

/// Outcome of a successful deployment. Produced once, never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeploymentResult {
    /// Address the contract was created at.
    pub address: Address,
    /// Hash of the creating transaction.
    pub tx_hash: TxHash,
}
