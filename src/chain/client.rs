//! JSON-RPC client used by the deployer.
//!
//! # Responsibilities
//! - Bind a signing-capable provider to the configured endpoint
//! - Query chain state (chain id, nonce, gas price, receipts)
//! - Bound every request with a timeout
//!
//! The JSON-RPC protocol itself is delegated to alloy; this wrapper only
//! maps transport failures into the harness error type.

use std::future::IntoFuture;
use std::sync::Arc;
use std::time::Duration;

use alloy::primitives::{Address, TxHash};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::rpc::types::{TransactionReceipt, TransactionRequest};
use tokio::time::timeout;

use crate::chain::types::{ChainError, ChainResult};
use crate::chain::wallet::Wallet;
use crate::config::NetworkEndpoint;

/// Signing-capable RPC client bound to a single endpoint.
#[derive(Clone)]
pub struct ChainClient {
    provider: Arc<dyn Provider + Send + Sync>,
    timeout_duration: Duration,
}

impl ChainClient {
    /// Connect a signing provider to the endpoint.
    ///
    /// No network traffic happens here; the connection is lazy and failures
    /// surface on the first request.
    pub fn connect(endpoint: &NetworkEndpoint, wallet: &Wallet, rpc_timeout_secs: u64) -> Self {
        let provider = ProviderBuilder::new()
            .wallet(wallet.signer())
            .connect_http(endpoint.url.clone());

        tracing::info!(
            url = %endpoint.url,
            chain_id = endpoint.chain_id,
            "Chain client initialized"
        );

        Self {
            provider: Arc::new(provider),
            timeout_duration: Duration::from_secs(rpc_timeout_secs),
        }
    }

    /// Get the chain ID from the RPC.
    pub async fn get_chain_id(&self) -> ChainResult<u64> {
        self.bounded("get chain id", self.provider.get_chain_id())
            .await
    }

    /// Get the latest block number.
    pub async fn get_block_number(&self) -> ChainResult<u64> {
        self.bounded("get block number", self.provider.get_block_number())
            .await
    }

    /// Get the transaction count (nonce) for an address.
    pub async fn get_transaction_count(&self, address: Address) -> ChainResult<u64> {
        self.bounded(
            "get transaction count",
            self.provider.get_transaction_count(address),
        )
        .await
    }

    /// Get the current gas price.
    pub async fn get_gas_price(&self) -> ChainResult<u128> {
        self.bounded("get gas price", self.provider.get_gas_price())
            .await
    }

    /// Estimate gas for a transaction request.
    pub async fn estimate_gas(&self, tx: TransactionRequest) -> ChainResult<u64> {
        self.bounded("estimate gas", self.provider.estimate_gas(tx))
            .await
    }

    /// Sign and submit a transaction, returning its hash.
    pub async fn send_transaction(&self, tx: TransactionRequest) -> ChainResult<TxHash> {
        let pending = self
            .bounded("send transaction", self.provider.send_transaction(tx))
            .await?;
        Ok(*pending.tx_hash())
    }

    /// Get the receipt for a transaction, if it has been mined.
    pub async fn get_transaction_receipt(
        &self,
        tx_hash: TxHash,
    ) -> ChainResult<Option<TransactionReceipt>> {
        self.bounded(
            "get transaction receipt",
            self.provider.get_transaction_receipt(tx_hash),
        )
        .await
    }

    async fn bounded<T, E, F>(&self, what: &str, fut: F) -> ChainResult<T>
    where
        E: std::fmt::Display,
        F: IntoFuture<Output = Result<T, E>>,
    {
        match timeout(self.timeout_duration, fut).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(ChainError::Rpc(format!("{what}: {e}"))),
            Err(_) => Err(ChainError::Timeout(self.timeout_duration.as_secs())),
        }
    }
}
