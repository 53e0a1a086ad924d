// SPDX-FileCopyrightText: 2025 RealT
//
// SPDX-License-Identifier: Apache-2.0
//! Contract deployment
//!
//! Deploys REG and a local Chainlink CCIP lane in a fixed order, recording
//! every address in a [`DeploymentStore`](crate::DeploymentStore) keyed by
//! logical name.
//!
//! # Example
//!
//! ```rust,no_run
//! use reg_ccip::deploy::{
//!     configure_lane, Artifacts, DeploymentContext, JsonDeploymentStore, Sequencer,
//! };
//! use reg_ccip::providers::AlloyBackend;
//! use reg_ccip::{DeployConfig, NamedAccounts};
//! use alloy_provider::{Provider, ProviderBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = DeployConfig::from_env()?;
//! let provider = ProviderBuilder::new().connect(config.rpc_url.as_str()).await?;
//! let accounts = NamedAccounts::from_accounts(&provider.get_accounts().await?)?;
//!
//! let backend = AlloyBackend::new(provider);
//! let store = JsonDeploymentStore::new(config.chain_deployments_dir());
//! let artifacts = Artifacts::load_dir(&config.artifacts_dir).await?;
//!
//! let ctx = DeploymentContext::builder()
//!     .backend(&backend)
//!     .store(&store)
//!     .artifacts(&artifacts)
//!     .accounts(&accounts)
//!     .config(&config)
//!     .build();
//!
//! Sequencer::run(&ctx, &["reg", "ccip_chainlink"]).await?;
//! configure_lane(&ctx).await?;
//! # Ok(())
//! # }
//! ```

mod artifacts;
mod context;
mod create2;
mod lane;
mod sequence;
mod store;
mod upgrade;

pub use artifacts::{Artifact, Artifacts};
pub use context::{DeploymentContext, PROXY_ARTIFACT};
pub use create2::deploy_create2;
pub use lane::{configure_lane, DEFAULT_GAS_PRICE_USD, DEFAULT_TOKEN_PRICE_USD};
pub use sequence::{DeployStep, Sequencer};
pub use store::{DeploymentRecord, JsonDeploymentStore, MemoryDeploymentStore};
pub use upgrade::{force_import, upgrade_proxy};
