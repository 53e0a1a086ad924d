// SPDX-FileCopyrightText: 2025 RealT
//
// SPDX-License-Identifier: Apache-2.0
//! Salted proxy deployments through a CREATE2 factory.

use alloy_primitives::{Address, Bytes, B256};
use tracing::{info, Instrument};

use super::{force_import, DeploymentContext, DeploymentRecord, PROXY_ARTIFACT};
use crate::contracts::create2::{deploy_transaction, deployed_address};
use crate::contracts::proxy::proxy_init_code;
use crate::error::Result;
use crate::spans;

/// Deploys `artifact` behind an ERC1967 proxy through the CREATE2 `factory`
/// and records the proxy under `name`.
///
/// Two factory calls are sent from the deployer, both under `salt`: the bare
/// implementation, then the proxy pointing at it with `init_data` as the
/// initializer payload. Each address is taken from the factory's `Deployed`
/// event. The proxy is then registered with [`force_import`], which reads the
/// implementation back from the ERC1967 slot.
pub async fn deploy_create2(
    ctx: &DeploymentContext<'_>,
    factory: Address,
    salt: B256,
    name: &str,
    artifact: &str,
    init_data: Bytes,
) -> Result<DeploymentRecord> {
    let span = spans::deploy_create2(name, &factory);

    async move {
        create2_proxy(ctx, factory, salt, name, artifact, init_data)
            .await
            .inspect_err(|e| spans::record_error(e))
    }
    .instrument(span)
    .await
}

async fn create2_proxy(
    ctx: &DeploymentContext<'_>,
    factory: Address,
    salt: B256,
    name: &str,
    artifact: &str,
    init_data: Bytes,
) -> Result<DeploymentRecord> {
    let deployer = ctx.deployer();
    let implementation_code = ctx.artifacts.get(artifact)?.bytecode.clone();
    let proxy_bytecode = ctx.artifacts.get(PROXY_ARTIFACT)?.bytecode.clone();

    let outcome = ctx
        .send(
            "deploy",
            deploy_transaction(deployer, factory, salt, implementation_code, Bytes::new()),
        )
        .await?;
    let implementation = deployed_address(factory, &outcome)?;
    tracing::Span::current().record("implementation", tracing::field::display(implementation));

    let outcome = ctx
        .send(
            "deploy",
            deploy_transaction(
                deployer,
                factory,
                salt,
                proxy_init_code(&proxy_bytecode, implementation, Bytes::new()),
                init_data,
            ),
        )
        .await?;
    let proxy = deployed_address(factory, &outcome)?;
    tracing::Span::current().record("proxy", tracing::field::display(proxy));

    let record = force_import(ctx, name, proxy, artifact).await?;

    info!(
        name = name,
        proxy = %proxy,
        implementation = %implementation,
        factory = %factory,
        event = "create2_proxy_deployed"
    );

    Ok(record)
}
