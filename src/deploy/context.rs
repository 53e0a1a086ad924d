// SPDX-FileCopyrightText: 2025 RealT
//
// SPDX-License-Identifier: Apache-2.0
use alloy_primitives::{Address, Bytes};
use alloy_rpc_types::TransactionRequest;
use bon::Builder;
use tracing::{info, Instrument};

use super::{Artifacts, DeploymentRecord};
use crate::accounts::NamedAccounts;
use crate::config::DeployConfig;
use crate::contracts::proxy::proxy_init_code;
use crate::error::{RegCcipError, Result};
use crate::receipt::TxOutcome;
use crate::spans;
use crate::traits::{ChainBackend, DeploymentStore};

/// Artifact name of the ERC1967 proxy used for every UUPS deployment.
pub const PROXY_ARTIFACT: &str = "ERC1967Proxy";

/// Everything a deployment step reads or writes.
///
/// Passed explicitly to each step, so a run can be pointed at any backend
/// and store.
#[derive(Builder, Clone, Copy)]
pub struct DeploymentContext<'a> {
    pub backend: &'a dyn ChainBackend,
    pub store: &'a dyn DeploymentStore,
    pub artifacts: &'a Artifacts,
    pub accounts: &'a NamedAccounts,
    pub config: &'a DeployConfig,
}

impl<'a> DeploymentContext<'a> {
    pub fn deployer(&self) -> Address {
        self.accounts.deployer()
    }

    /// The record saved under `name` by an earlier step.
    ///
    /// # Errors
    ///
    /// Returns [`RegCcipError::DeploymentNotFound`] if no step has saved it.
    pub async fn get(&self, name: &str) -> Result<DeploymentRecord> {
        self.store
            .get(name)
            .await?
            .ok_or_else(|| RegCcipError::DeploymentNotFound {
                name: name.to_string(),
            })
    }

    pub async fn address_of(&self, name: &str) -> Result<Address> {
        Ok(self.get(name).await?.address)
    }

    /// Creates `artifact` with `constructor_args` from the deployer and saves
    /// the result under `name`.
    pub async fn deploy(
        &self,
        name: &str,
        artifact: &str,
        constructor_args: &[u8],
        args: Vec<serde_json::Value>,
    ) -> Result<DeploymentRecord> {
        let artifact = self.artifacts.get(artifact)?;
        let outcome = self.create(name, artifact.init_code(constructor_args)).await?;

        let record = DeploymentRecord::builder()
            .address(created_address(name, &outcome)?)
            .abi(artifact.abi.clone())
            .transaction_hash(outcome.transaction_hash)
            .args(args)
            .build();
        self.store.save(name, record.clone()).await?;

        info!(
            name = name,
            address = %record.address,
            tx_hash = %outcome.transaction_hash,
            event = "contract_deployed"
        );

        Ok(record)
    }

    /// Deploys `artifact` as a UUPS implementation behind a fresh ERC1967
    /// proxy, running `init_data` in the proxy's constructor.
    ///
    /// Only the proxy is saved, under `name`, with the implementation's ABI.
    pub async fn deploy_proxy(
        &self,
        name: &str,
        artifact: &str,
        init_data: Bytes,
        args: Vec<serde_json::Value>,
    ) -> Result<DeploymentRecord> {
        let implementation_artifact = self.artifacts.get(artifact)?;
        let proxy_artifact = self.artifacts.get(PROXY_ARTIFACT)?;

        let implementation = self
            .create(artifact, implementation_artifact.bytecode.clone())
            .await
            .and_then(|outcome| created_address(artifact, &outcome))?;

        let outcome = self
            .create(
                PROXY_ARTIFACT,
                proxy_init_code(&proxy_artifact.bytecode, implementation, init_data),
            )
            .await?;

        let record = DeploymentRecord::builder()
            .address(created_address(name, &outcome)?)
            .implementation(implementation)
            .abi(implementation_artifact.abi.clone())
            .transaction_hash(outcome.transaction_hash)
            .args(args)
            .build();
        self.store.save(name, record.clone()).await?;

        info!(
            name = name,
            proxy = %record.address,
            implementation = %implementation,
            event = "proxy_deployed"
        );

        Ok(record)
    }

    /// Submits `tx` and waits for it to be mined.
    pub async fn send(&self, function: &str, tx: TransactionRequest) -> Result<TxOutcome> {
        let to = tx.to.and_then(|kind| kind.to().copied()).unwrap_or_default();
        let span = spans::send_transaction(function, &to);

        async move {
            let outcome = self.backend.send(tx).await?;
            tracing::Span::current().record(
                "tx_hash",
                tracing::field::display(outcome.transaction_hash),
            );
            Ok(outcome)
        }
        .instrument(span)
        .await
    }

    pub(crate) async fn create(&self, contract_name: &str, init_code: Bytes) -> Result<TxOutcome> {
        let deployer = self.deployer();
        let span = spans::deploy_contract(contract_name, &deployer, init_code.len());

        self.backend
            .deploy(deployer, init_code)
            .instrument(span)
            .await
    }
}

fn created_address(name: &str, outcome: &TxOutcome) -> Result<Address> {
    outcome
        .contract_address
        .ok_or_else(|| RegCcipError::TransactionFailed {
            reason: format!(
                "deployment of {name} in {} produced no contract address",
                outcome.transaction_hash
            ),
        })
}
