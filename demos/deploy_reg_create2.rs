// SPDX-FileCopyrightText: 2025 RealT
//
// SPDX-License-Identifier: Apache-2.0
//! Deploys REG behind a UUPS proxy through a CREATE2 factory, so the proxy
//! lands at the same address on every chain that shares the factory.
//!
//! Besides the variables `deploy_reg` reads, this needs `CREATE2` (the
//! factory address) and `SALT` (at most 31 bytes, default `REG`).
//!
//! Run with: `cargo run --example deploy_reg_create2`

use alloy_provider::{Provider, ProviderBuilder};
use reg_ccip::contracts::create2::salt_from_str;
use reg_ccip::contracts::reg;
use reg_ccip::deploy::{deploy_create2, Artifacts, DeploymentContext, JsonDeploymentStore};
use reg_ccip::providers::AlloyBackend;
use reg_ccip::{validate_address, DeployConfig, NamedAccounts, RegCcipError};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), RegCcipError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = DeployConfig::from_env()?;
    let factory = validate_address(
        &std::env::var("CREATE2")
            .map_err(|_| RegCcipError::InvalidConfig("CREATE2 is not set".to_string()))?,
    )?;
    let salt = salt_from_str(&std::env::var("SALT").unwrap_or_else(|_| "REG".to_string()))?;

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

    let deployer = accounts.deployer();
    let init_data = reg::initialize_calldata(
        config.roles.admin_or(deployer),
        config.roles.minter_or(deployer),
        config.roles.pauser_or(deployer),
        config.roles.upgrader_or(deployer),
    );

    println!("Deploying REG through factory {factory} on {}", config.chain);

    let record = deploy_create2(&ctx, factory, salt, "REG", "REG", init_data).await?;
    println!("  REG: proxy {}", record.address);
    if let Some(implementation) = record.implementation {
        println!("  REG: implementation {implementation}");
    }

    println!("Records written to {}", store.dir().display());
    Ok(())
}
