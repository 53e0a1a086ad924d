// SPDX-FileCopyrightText: 2025 RealT
//
// SPDX-License-Identifier: Apache-2.0
//! Assertion helpers for contract tests.
//!
//! Tests drive a [`ChainBackend`] and assert on what comes back: events
//! decoded out of a [`TxOutcome`], custom errors decoded out of revert data,
//! and the exact AccessControl revert string for a missing role.
//!
//! ```rust,no_run
//! use reg_ccip::harness::{expect_event, Fixture};
//! use reg_ccip::contracts::reg::RegToken;
//! # async fn example(fixture: Fixture, outcome: reg_ccip::TxOutcome) -> reg_ccip::Result<()> {
//! let transfer = expect_event::<RegToken::Transfer>(&outcome)?;
//! assert_eq!(transfer.to, fixture.accounts.users()[0]);
//! # Ok(())
//! # }
//! ```

use alloy_chains::NamedChain;
use alloy_sol_types::{SolEvent, SolInterface};
use std::sync::Arc;
use tracing::debug;

use crate::accounts::NamedAccounts;
use crate::config::DeployConfig;
use crate::deploy::{
    Artifacts, DeployStep, DeploymentContext, DeploymentRecord, MemoryDeploymentStore, Sequencer,
};
use crate::error::{RegCcipError, Result};
use crate::receipt::TxOutcome;
use crate::traits::ChainBackend;

pub use crate::roles::missing_role_reason;

/// Local RPC endpoint fixtures are configured with. Nothing connects to it.
pub const LOCAL_RPC_URL: &str = "http://127.0.0.1:8545";

/// Returns the first log in `outcome` that decodes as `E`.
///
/// # Errors
///
/// Returns [`RegCcipError::ContractCall`] naming the event if none decodes.
pub fn expect_event<E: SolEvent>(outcome: &TxOutcome) -> Result<E> {
    outcome
        .logs
        .iter()
        .find_map(|log| E::decode_log(log).ok().map(|decoded| decoded.data))
        .ok_or_else(|| {
            RegCcipError::ContractCall(format!(
                "expected {} in transaction {}",
                E::SIGNATURE,
                outcome.transaction_hash
            ))
        })
}

/// Every log in `outcome` that decodes as `E`, in emission order.
pub fn events<E: SolEvent>(outcome: &TxOutcome) -> Vec<E> {
    outcome
        .logs
        .iter()
        .filter_map(|log| E::decode_log(log).ok().map(|decoded| decoded.data))
        .collect()
}

/// Decodes revert data as one of a contract's custom errors.
///
/// `I` is the `…Errors` enum `sol!` generates for a contract, for example
/// `CcipSenderReceiver::CcipSenderReceiverErrors`.
pub fn decode_custom_error<I: SolInterface>(revert_data: &[u8]) -> Result<I> {
    Ok(I::abi_decode(revert_data)?)
}

/// A fresh deployment of every selected step, held in memory.
pub struct Fixture {
    pub backend: Arc<dyn ChainBackend>,
    pub store: MemoryDeploymentStore,
    pub artifacts: Artifacts,
    pub accounts: NamedAccounts,
    pub config: DeployConfig,
    pub deployed: Vec<(DeployStep, DeploymentRecord)>,
}

impl Fixture {
    /// Replays the deployment sequence for `tags` against `backend` with an
    /// empty store, the way each test file starts from a clean deployment.
    pub async fn deploy<S: AsRef<str>>(
        backend: Arc<dyn ChainBackend>,
        artifacts: Artifacts,
        accounts: NamedAccounts,
        tags: &[S],
    ) -> Result<Self> {
        let config = DeployConfig::builder()
            .rpc_url(
                LOCAL_RPC_URL
                    .parse()
                    .map_err(|e| RegCcipError::InvalidConfig(format!("{LOCAL_RPC_URL}: {e}")))?,
            )
            .chain(NamedChain::AnvilHardhat)
            .build();
        let store = MemoryDeploymentStore::new();

        let ctx = context(&*backend, &store, &artifacts, &accounts, &config);
        let deployed = Sequencer::run(&ctx, tags).await?;
        debug!(deployed = deployed.len(), event = "fixture_deployed");

        Ok(Self {
            backend,
            store,
            artifacts,
            accounts,
            config,
            deployed,
        })
    }

    /// A context over the fixture's state, for further steps, upgrades or
    /// lane configuration.
    pub fn context(&self) -> DeploymentContext<'_> {
        context(
            &*self.backend,
            &self.store,
            &self.artifacts,
            &self.accounts,
            &self.config,
        )
    }

    /// Address recorded under `name`.
    pub async fn address_of(&self, name: &str) -> Result<alloy_primitives::Address> {
        self.context().address_of(name).await
    }
}

fn context<'a>(
    backend: &'a dyn ChainBackend,
    store: &'a MemoryDeploymentStore,
    artifacts: &'a Artifacts,
    accounts: &'a NamedAccounts,
    config: &'a DeployConfig,
) -> DeploymentContext<'a> {
    DeploymentContext::builder()
        .backend(backend)
        .store(store)
        .artifacts(artifacts)
        .accounts(accounts)
        .config(config)
        .build()
}
