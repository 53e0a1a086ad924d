// SPDX-FileCopyrightText: 2025 RealT
//
// SPDX-License-Identifier: Apache-2.0
//! Core trait abstractions for deployment and permit operations.
//!
//! Every interaction with the remote execution environment goes through one of
//! the traits below, so deployment runs and permit construction can be driven
//! against the fakes in [`crate::testing`] as easily as against a live node.
//!
//! # Example: Implementing a Test Fake
//!
//! ```rust,ignore
//! use reg_ccip::{ChainProvider, Result};
//!
//! struct FixedChain(u64);
//!
//! #[async_trait::async_trait]
//! impl ChainProvider for FixedChain {
//!     async fn chain_id(&self) -> Result<u64> {
//!         Ok(self.0)
//!     }
//!
//!     async fn storage_at(&self, _address: Address, _slot: U256) -> Result<B256> {
//!         Ok(B256::ZERO)
//!     }
//! }
//! ```

use alloy_primitives::{Address, Bytes, B256, U256};
use alloy_rpc_types::TransactionRequest;
use async_trait::async_trait;

use crate::deploy::DeploymentRecord;
use crate::error::Result;
use crate::receipt::TxOutcome;

/// Read access to the connected network.
///
/// The permit builder only needs the chain id from here; the deployment
/// sequencer also reads raw storage to locate proxy implementations.
#[async_trait]
pub trait ChainProvider: Send + Sync {
    /// Returns the chain id of the connected network.
    ///
    /// # Errors
    ///
    /// Returns an error if the RPC call fails.
    async fn chain_id(&self) -> Result<u64>;

    /// Reads one storage word of `address`.
    async fn storage_at(&self, address: Address, slot: U256) -> Result<B256>;
}

/// Write access to the remote execution environment.
///
/// Each call submits exactly one transaction and resolves once it has been
/// mined. A reverted transaction is an error; nothing is retried.
#[async_trait]
pub trait ChainBackend: ChainProvider {
    /// Deploys `init_code` (creation bytecode followed by encoded constructor
    /// arguments) from `from` and returns the mined outcome.
    ///
    /// # Errors
    ///
    /// Returns an error if submission fails, the deployment reverts, or the
    /// receipt carries no contract address.
    async fn deploy(&self, from: Address, init_code: Bytes) -> Result<TxOutcome>;

    /// Submits a prepared transaction and waits for its receipt.
    async fn send(&self, tx: TransactionRequest) -> Result<TxOutcome>;
}

/// Name-to-deployment key-value store shared between deployment steps.
#[async_trait]
pub trait DeploymentStore: Send + Sync {
    /// Looks up a deployment by its logical name.
    async fn get(&self, name: &str) -> Result<Option<DeploymentRecord>>;

    /// Persists a deployment under its logical name, replacing any previous record.
    async fn save(&self, name: &str, record: DeploymentRecord) -> Result<()>;

    /// Names of every recorded deployment, sorted.
    async fn names(&self) -> Result<Vec<String>>;
}

/// The slice of an ERC-2612 token the permit builder reads.
#[async_trait]
pub trait PermitToken: Send + Sync {
    /// Address of the token contract, used as the EIP-712 verifying contract.
    fn address(&self) -> Address;

    /// The token's `name()`, used as the EIP-712 domain name.
    async fn name(&self) -> Result<String>;

    /// The token's current `nonces(owner)`.
    async fn nonces(&self, owner: Address) -> Result<U256>;
}
