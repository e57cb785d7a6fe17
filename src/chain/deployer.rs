//! Contract-creation transactions and confirmation monitoring.
//!
//! The flow is strictly linear: build the creation transaction, submit it,
//! poll for the receipt until the required confirmation depth. No retries.

use std::time::Duration;

use alloy::network::TransactionBuilder;
use alloy::primitives::{Bytes, TxHash};
use alloy::rpc::types::{TransactionReceipt, TransactionRequest};
use tokio::time::{interval, timeout};

use crate::artifact::ContractArtifact;
use crate::chain::client::ChainClient;
use crate::chain::types::{ChainError, ChainResult, DeploymentResult};
use crate::chain::wallet::Wallet;

const RECEIPT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Submits contract-creation transactions and waits for inclusion.
pub struct Deployer {
    client: ChainClient,
    wallet: Wallet,
    confirmation_blocks: u32,
    confirmation_timeout_secs: u64,
}

impl Deployer {
    /// Create a new deployer.
    pub fn new(
        client: ChainClient,
        wallet: Wallet,
        confirmation_blocks: u32,
        confirmation_timeout_secs: u64,
    ) -> Self {
        Self {
            client,
            wallet,
            confirmation_blocks,
            confirmation_timeout_secs,
        }
    }

    /// Deploy a contract from its compiled artifact.
    ///
    /// `constructor_args` are ABI-encoded bytes appended to the creation
    /// bytecode. An artifact whose constructor declares inputs refuses to
    /// deploy without them; this check runs before any network call.
    pub async fn deploy(
        &self,
        artifact: &ContractArtifact,
        constructor_args: &Bytes,
    ) -> ChainResult<DeploymentResult> {
        let code = creation_code(artifact, constructor_args)?;

        // Mismatch is a strong signal the URL points at the wrong network,
        // but unverifiable chains (some zkSync gateways) still deploy fine.
        match self.client.get_chain_id().await {
            Ok(actual) if actual != self.wallet.chain_id() => {
                tracing::warn!(
                    expected = self.wallet.chain_id(),
                    actual,
                    "Chain id reported by the node differs from configuration"
                );
            }
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(error = %e, "Could not verify chain id");
            }
        }

        let from = self.wallet.address();
        let nonce = self.client.get_transaction_count(from).await?;
        let gas_price = self.client.get_gas_price().await?;

        let tx = TransactionRequest::default()
            .with_from(from)
            .with_deploy_code(code)
            .with_nonce(nonce)
            .with_gas_price(gas_price)
            .with_chain_id(self.wallet.chain_id());

        let gas_limit = self.client.estimate_gas(tx.clone()).await?;
        let tx = tx.with_gas_limit(gas_limit);

        let tx_hash = self.client.send_transaction(tx).await?;
        tracing::info!(tx_hash = %tx_hash, "Deployment transaction submitted");

        let receipt = self.wait_for_confirmation(tx_hash).await?;
        let address = receipt
            .contract_address
            .ok_or(ChainError::MissingContractAddress(tx_hash))?;

        tracing::info!(
            address = %address,
            block = receipt.block_number,
            "Deployment confirmed"
        );

        Ok(DeploymentResult { address, tx_hash })
    }

    /// Poll for the receipt until the required confirmation depth.
    async fn wait_for_confirmation(&self, tx_hash: TxHash) -> ChainResult<TransactionReceipt> {
        let deadline = Duration::from_secs(self.confirmation_timeout_secs);

        let result = timeout(deadline, async {
            let mut ticker = interval(RECEIPT_POLL_INTERVAL);

            loop {
                ticker.tick().await;

                let receipt = match self.client.get_transaction_receipt(tx_hash).await? {
                    Some(r) => r,
                    None => {
                        tracing::debug!(tx_hash = %tx_hash, "Transaction pending");
                        continue;
                    }
                };

                if !receipt.status() {
                    return Err(ChainError::Reverted(tx_hash));
                }

                let current_block = self.client.get_block_number().await?;
                let tx_block = receipt.block_number.unwrap_or(current_block);
                let confirmations = current_block.saturating_sub(tx_block) as u32;

                if confirmations >= self.confirmation_blocks {
                    return Ok(receipt);
                }

                tracing::debug!(
                    tx_hash = %tx_hash,
                    confirmations,
                    required = self.confirmation_blocks,
                    "Waiting for confirmations"
                );
            }
        })
        .await;

        match result {
            Ok(receipt) => receipt,
            Err(_) => Err(ChainError::ConfirmationTimeout {
                tx_hash,
                timeout_secs: self.confirmation_timeout_secs,
            }),
        }
    }
}

/// Creation bytecode with constructor arguments appended.
fn creation_code(artifact: &ContractArtifact, constructor_args: &Bytes) -> ChainResult<Bytes> {
    let arity = artifact.constructor_arity();
    if arity > 0 && constructor_args.is_empty() {
        return Err(ChainError::MissingConstructorArgs {
            contract: artifact
                .contract_name
                .clone()
                .unwrap_or_else(|| "contract".to_string()),
            arity,
        });
    }

    if constructor_args.is_empty() {
        return Ok(artifact.bytecode.clone());
    }

    let mut code = artifact.bytecode.to_vec();
    code.extend_from_slice(constructor_args);
    Ok(code.into())
}
