// SPDX-FileCopyrightText: 2025 RealT
//
// SPDX-License-Identifier: Apache-2.0
//! Upgrades a recorded proxy to a new implementation.
//!
//! Usage: `cargo run --example upgrade_proxy -- <NAME> <ARTIFACT> [PROXY_ADDRESS]`
//!
//! When `PROXY_ADDRESS` is given the proxy is imported under `NAME` first,
//! reading its current implementation from the ERC1967 slot, so proxies
//! deployed by other tooling can be upgraded too.

use alloy_provider::{Provider, ProviderBuilder};
use reg_ccip::deploy::{
    force_import, upgrade_proxy, Artifacts, DeploymentContext, JsonDeploymentStore,
};
use reg_ccip::providers::AlloyBackend;
use reg_ccip::{validate_address, DeployConfig, NamedAccounts, RegCcipError};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), RegCcipError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let mut args = std::env::args().skip(1);
    let (Some(name), Some(artifact)) = (args.next(), args.next()) else {
        return Err(RegCcipError::InvalidConfig(
            "usage: upgrade_proxy <NAME> <ARTIFACT> [PROXY_ADDRESS]".to_string(),
        ));
    };
    let import = args.next().map(|value| validate_address(&value)).transpose()?;

    let config = DeployConfig::from_env()?;
    let provider = ProviderBuilder::new().connect_http(config.rpc_url.clone());
    let accounts = NamedAccounts::from_accounts(&provider.get_accounts().await?)?;

    let artifacts = Artifacts::load_dir(&config.artifacts_dir).await?;
    let store = JsonDeploymentStore::new(config.chain_deployments_dir());
    let backend = AlloyBackend::new(provider);

    let ctx = DeploymentContext::builder()
        .backend(&backend)
        .store(&store)
        .artifacts(&artifacts)
        .accounts(&accounts)
        .config(&config)
        .build();

    if let Some(proxy) = import {
        let imported = force_import(&ctx, &name, proxy, &artifact).await?;
        println!(
            "Imported {name} at {} (implementation {:?})",
            imported.address, imported.implementation
        );
    }

    let upgraded = upgrade_proxy(&ctx, &name, &artifact).await?;
    println!(
        "Upgraded {name} at {} to implementation {:?}",
        upgraded.address, upgraded.implementation
    );

    Ok(())
}
