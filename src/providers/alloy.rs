// SPDX-FileCopyrightText: 2025 RealT
//
// SPDX-License-Identifier: Apache-2.0
//! Alloy-based chain backend implementation.

use alloy_network::{Ethereum, TransactionBuilder};
use alloy_primitives::{Address, Bytes, B256, U256};
use alloy_provider::Provider;
use alloy_rpc_types::TransactionRequest;
use async_trait::async_trait;
use tracing::{debug, instrument, trace, Instrument};

use crate::error::{RegCcipError, Result};
use crate::receipt::TxOutcome;
use crate::spans;
use crate::traits::{ChainBackend, ChainProvider};

/// Production backend wrapping Alloy's [`Provider`] trait.
///
/// Transactions are filled and signed by the provider's wallet filler, so
/// the provider must be built with a wallet holding the `from` accounts, or
/// point at a node that manages them (anvil, hardhat).
///
/// # Examples
///
/// ```rust,no_run
/// use reg_ccip::providers::AlloyBackend;
/// use alloy_provider::ProviderBuilder;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let provider = ProviderBuilder::new()
///     .connect("http://localhost:8545")
///     .await?;
///
/// let backend = AlloyBackend::new(provider);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct AlloyBackend<P>
where
    P: Provider<Ethereum>,
{
    provider: P,
}

impl<P> AlloyBackend<P>
where
    P: Provider<Ethereum>,
{
    /// Creates a new [`AlloyBackend`] wrapping the given Alloy provider.
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Returns a reference to the underlying Alloy provider.
    pub fn inner(&self) -> &P {
        &self.provider
    }

    async fn submit(&self, tx: TransactionRequest) -> Result<TxOutcome> {
        let pending = self
            .provider
            .send_transaction(tx)
            .await
            .map_err(|e| RegCcipError::Provider(e.to_string()))?;
        let tx_hash = *pending.tx_hash();

        let receipt = pending
            .get_receipt()
            .instrument(spans::wait_for_receipt(tx_hash))
            .await
            .map_err(|e| RegCcipError::Provider(e.to_string()))?;

        let outcome = TxOutcome::from_receipt(&receipt);
        if !outcome.status {
            return Err(RegCcipError::TransactionFailed {
                reason: format!("transaction {tx_hash} reverted"),
            });
        }

        debug!(
            tx_hash = %tx_hash,
            block_number = ?receipt.block_number,
            gas_used = receipt.gas_used,
            event = "transaction_mined"
        );

        Ok(outcome)
    }
}

#[async_trait]
impl<P> ChainProvider for AlloyBackend<P>
where
    P: Provider<Ethereum> + Send + Sync,
{
    #[instrument(skip(self))]
    async fn chain_id(&self) -> Result<u64> {
        trace!("Fetching chain id");
        let chain_id = self
            .provider
            .get_chain_id()
            .await
            .map_err(|e| RegCcipError::Provider(e.to_string()))?;

        debug!(chain_id = chain_id, "Chain id retrieved");
        Ok(chain_id)
    }

    #[instrument(skip(self), fields(address = %address, slot = %slot))]
    async fn storage_at(&self, address: Address, slot: U256) -> Result<B256> {
        trace!("Reading storage slot");
        let value = self
            .provider
            .get_storage_at(address, slot)
            .await
            .map_err(|e| RegCcipError::Provider(e.to_string()))?;

        Ok(B256::from(value))
    }
}

#[async_trait]
impl<P> ChainBackend for AlloyBackend<P>
where
    P: Provider<Ethereum> + Send + Sync,
{
    #[instrument(skip(self, init_code), fields(from = %from, init_code_bytes = init_code.len()))]
    async fn deploy(&self, from: Address, init_code: Bytes) -> Result<TxOutcome> {
        let tx = TransactionRequest::default()
            .with_from(from)
            .with_deploy_code(init_code);

        let outcome = self.submit(tx).await?;
        if outcome.contract_address.is_none() {
            return Err(RegCcipError::TransactionFailed {
                reason: format!(
                    "deployment {} produced no contract address",
                    outcome.transaction_hash
                ),
            });
        }

        Ok(outcome)
    }

    #[instrument(skip(self, tx), fields(from = ?tx.from, to = ?tx.to))]
    async fn send(&self, tx: TransactionRequest) -> Result<TxOutcome> {
        self.submit(tx).await
    }
}
