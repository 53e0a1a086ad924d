// SPDX-FileCopyrightText: 2025 RealT
//
// SPDX-License-Identifier: Apache-2.0
//! Deploys a local CCIP lane and the REG sender/receiver, then wires the
//! lane together.
//!
//! Pass deployment tags as arguments to run a subset, for example
//! `cargo run --example deploy_ccip -- ccip_reg`. With no arguments every
//! step runs, REG included. Lane wiring only happens on a full run.
//!
//! Run with: `cargo run --example deploy_ccip`

use alloy_provider::{Provider, ProviderBuilder};
use reg_ccip::deploy::{
    configure_lane, Artifacts, DeploymentContext, JsonDeploymentStore, Sequencer,
};
use reg_ccip::providers::AlloyBackend;
use reg_ccip::{DeployConfig, NamedAccounts, RegCcipError};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), RegCcipError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let tags: Vec<String> = std::env::args().skip(1).collect();

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

    let deployed = Sequencer::run(&ctx, tags.as_slice()).await?;
    println!("Deployed {} contracts on {}:", deployed.len(), config.chain);
    for (step, record) in &deployed {
        println!("  {step:<20} {}", record.address);
    }

    if tags.is_empty() {
        let outcomes = configure_lane(&ctx).await?;
        println!("Lane configured in {} transactions:", outcomes.len());
        for outcome in outcomes {
            println!("  {}", outcome.transaction_hash);
        }
    }

    Ok(())
}
