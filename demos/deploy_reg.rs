// SPDX-FileCopyrightText: 2025 RealT
//
// SPDX-License-Identifier: Apache-2.0
//! Deploys the REG token behind a UUPS proxy.
//!
//! Reads `RPC_URL` and `CHAIN_ID` (and optionally `ADMIN`, `MINTER`,
//! `PAUSER`, `UPGRADER`) from the environment or `.env`, uses the node's
//! unlocked accounts as named accounts, and writes the deployment record to
//! `deployments/<chain>/REG.json`.
//!
//! Run with: `cargo run --example deploy_reg`

use alloy_provider::{Provider, ProviderBuilder};
use reg_ccip::deploy::{Artifacts, DeploymentContext, JsonDeploymentStore, Sequencer};
use reg_ccip::providers::AlloyBackend;
use reg_ccip::{DeployConfig, NamedAccounts, RegCcipError};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), RegCcipError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

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

    println!("Deploying REG to {} as {}", config.chain, accounts.deployer());

    for (step, record) in Sequencer::run(&ctx, &["reg"]).await? {
        println!("  {step}: proxy {}", record.address);
        if let Some(implementation) = record.implementation {
            println!("  {step}: implementation {implementation}");
        }
    }

    println!("Records written to {}", store.dir().display());
    Ok(())
}
