// SPDX-FileCopyrightText: 2025 RealT
//
// SPDX-License-Identifier: Apache-2.0
//! # reg-ccip
//!
//! Deployment and signing tooling for the REG governance token and its
//! Chainlink CCIP bridge contracts.
//!
//! The crate covers three jobs:
//!
//! - **Permits**: build and sign ERC-2612 permits so a token transfer can be
//!   approved and executed in one transaction, e.g. through
//!   `CCIPSenderReceiver.transferTokensWithPermit`.
//! - **Deployment**: deploy REG (behind a UUPS proxy) and a local CCIP lane in
//!   a fixed order, record every address, wire the lane together, and upgrade
//!   or import proxies afterwards.
//! - **Testing**: in-process fakes and assertion helpers for driving all of the
//!   above without a node.
//!
//! ## Quick Start: signing a permit
//!
//! ```rust,no_run
//! use reg_ccip::permit::{get_permit_signature, PermitConfig};
//! use reg_ccip::providers::AlloyBackend;
//! use reg_ccip::{RegCcipError, RegTokenContract};
//! use alloy_primitives::{address, U256};
//! use alloy_provider::ProviderBuilder;
//! use alloy_signer_local::PrivateKeySigner;
//!
//! # async fn example() -> Result<(), RegCcipError> {
//! let provider = ProviderBuilder::new().connect("http://localhost:8545").await?;
//! let reg = RegTokenContract::new(
//!     address!("0000000000000000000000000000000000000001"),
//!     provider.clone(),
//! );
//! let owner = PrivateKeySigner::random();
//!
//! let signature = get_permit_signature(
//!     &owner,
//!     address!("0000000000000000000000000000000000000002"),
//!     U256::from(1_000),
//!     U256::from(u64::MAX),
//!     &reg,
//!     &AlloyBackend::new(provider),
//!     PermitConfig::default(),
//! )
//! .await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Quick Start: deploying
//!
//! See [`deploy`] for running the deployment sequence against a live node,
//! and [`harness::Fixture`] for replaying it against [`testing`] fakes.
//!
//! ## Observability
//!
//! All operations emit `tracing` events with an `event` field naming what
//! happened. Span constructors live in [`spans`].

mod accounts;
mod chain;
mod config;
mod error;
mod receipt;
mod roles;
mod traits;

pub mod contracts;
pub mod deploy;
pub mod harness;
pub mod permit;
pub mod providers;
pub mod testing;

// Public module for advanced users who need custom instrumentation
pub mod spans;

pub use accounts::{NamedAccount, NamedAccounts};
pub use chain::{
    ccip_chain_selector_for_id, link_token_address_for_id, CcipChain, CHAIN_ID_MUMBAI,
    CHAIN_SELECTOR_ARBITRUM, CHAIN_SELECTOR_AVALANCHE, CHAIN_SELECTOR_BASE,
    CHAIN_SELECTOR_ETHEREUM, CHAIN_SELECTOR_FUJI, CHAIN_SELECTOR_GNOSIS, CHAIN_SELECTOR_MUMBAI,
    CHAIN_SELECTOR_OPTIMISM, CHAIN_SELECTOR_POLYGON, CHAIN_SELECTOR_SEPOLIA, LINKTOKEN_AVALANCHE,
    LINKTOKEN_ETHEREUM, LINKTOKEN_FUJI, LINKTOKEN_GNOSIS, LINKTOKEN_MUMBAI, LINKTOKEN_POLYGON,
    LINKTOKEN_SEPOLIA,
};
pub use config::{
    validate_address, ArmSettings, DeployConfig, RoleHolders, DEFAULT_ARTIFACTS_DIR,
    DEFAULT_DEPLOYMENTS_DIR, DEFAULT_STALENESS_THRESHOLD, ETHER_UNIT,
};
pub use contracts::{ccip::CcipSenderReceiverContract, reg::RegTokenContract};
pub use error::{RegCcipError, Result};
pub use permit::{get_permit_signature, PermitConfig, PermitRequest, PermitSignature};
pub use receipt::TxOutcome;
pub use roles::{missing_role_reason, Role};
pub use traits::{ChainBackend, ChainProvider, DeploymentStore, PermitToken};
