// SPDX-FileCopyrightText: 2025 RealT
//
// SPDX-License-Identifier: Apache-2.0
//! UUPS upgrades of recorded proxies.

use alloy_primitives::Address;
use tracing::{info, Instrument};

use super::{DeploymentContext, DeploymentRecord};
use crate::contracts::proxy::{implementation_address, upgrade_to_transaction};
use crate::error::{RegCcipError, Result};
use crate::spans;

/// Deploys `artifact` as the new implementation of the proxy recorded under
/// `name` and points the proxy at it.
///
/// The call is sent by the configured upgrader (the deployer when unset).
/// The record keeps its address and gains the new implementation and ABI.
///
/// # Errors
///
/// Returns [`RegCcipError::DeploymentNotFound`] if `name` was never recorded,
/// and [`RegCcipError::TransactionFailed`] if the proxy still reports its old
/// implementation after the upgrade.
pub async fn upgrade_proxy(
    ctx: &DeploymentContext<'_>,
    name: &str,
    artifact: &str,
) -> Result<DeploymentRecord> {
    let record = ctx.get(name).await?;
    let span = spans::upgrade_proxy(name, &record.address);

    async move {
        upgrade_recorded(ctx, name, record, artifact)
            .await
            .inspect_err(|e| spans::record_error(e))
    }
    .instrument(span)
    .await
}

async fn upgrade_recorded(
    ctx: &DeploymentContext<'_>,
    name: &str,
    record: DeploymentRecord,
    artifact: &str,
) -> Result<DeploymentRecord> {
    let new_artifact = ctx.artifacts.get(artifact)?;
    let outcome = ctx.create(artifact, new_artifact.bytecode.clone()).await?;
    let new_implementation =
        outcome
            .contract_address
            .ok_or_else(|| RegCcipError::TransactionFailed {
                reason: format!("deployment of {artifact} produced no contract address"),
            })?;
    tracing::Span::current().record(
        "new_implementation",
        tracing::field::display(new_implementation),
    );

    let upgrader = ctx.config.roles.upgrader_or(ctx.deployer());
    ctx.send(
        "upgradeTo",
        upgrade_to_transaction(upgrader, record.address, new_implementation),
    )
    .await?;

    let current = implementation_address(ctx.backend, record.address).await?;
    if current != new_implementation {
        return Err(RegCcipError::TransactionFailed {
            reason: format!(
                "proxy {} reports implementation {current}, expected {new_implementation}",
                record.address
            ),
        });
    }

    let upgraded = DeploymentRecord {
        implementation: Some(new_implementation),
        abi: new_artifact.abi.clone(),
        ..record
    };
    ctx.store.save(name, upgraded.clone()).await?;

    info!(
        name = name,
        proxy = %upgraded.address,
        implementation = %new_implementation,
        event = "proxy_upgraded"
    );

    Ok(upgraded)
}

/// Records an existing proxy at `proxy` under `name`, reading its current
/// implementation from the ERC1967 slot and taking the ABI from `artifact`.
///
/// Lets proxies deployed by other tooling be upgraded with
/// [`upgrade_proxy`].
pub async fn force_import(
    ctx: &DeploymentContext<'_>,
    name: &str,
    proxy: Address,
    artifact: &str,
) -> Result<DeploymentRecord> {
    let abi = ctx.artifacts.get(artifact)?.abi.clone();
    let implementation = implementation_address(ctx.backend, proxy).await?;

    let record = DeploymentRecord::builder()
        .address(proxy)
        .implementation(implementation)
        .abi(abi)
        .build();
    ctx.store.save(name, record.clone()).await?;

    info!(
        name = name,
        proxy = %proxy,
        implementation = %implementation,
        event = "proxy_imported"
    );

    Ok(record)
}
