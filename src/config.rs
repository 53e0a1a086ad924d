// SPDX-FileCopyrightText: 2025 RealT
//
// SPDX-License-Identifier: Apache-2.0
//! Deployment configuration.
//!
//! Values come either from a [`DeployConfig::builder`] or from the process
//! environment (optionally seeded from a `.env` file) via
//! [`DeployConfig::from_env`].

use alloy_chains::NamedChain;
use alloy_primitives::Address;
use bon::Builder;
use std::path::PathBuf;
use tracing::debug;
use url::Url;

use crate::chain::{CHAIN_SELECTOR_MUMBAI, CHAIN_SELECTOR_SEPOLIA};
use crate::error::{RegCcipError, Result};

/// Default directory holding compiled contract artifacts
pub const DEFAULT_ARTIFACTS_DIR: &str = "artifacts";

/// Default directory deployment records are written to
pub const DEFAULT_DEPLOYMENTS_DIR: &str = "deployments";

/// Default price staleness threshold for the PriceRegistry, in seconds (one day)
pub const DEFAULT_STALENESS_THRESHOLD: u32 = 86_400;

/// One token (1e18 base units), the default rate limiter capacity and refill rate
pub const ETHER_UNIT: u128 = 1_000_000_000_000_000_000;

/// Parses `value` as an address.
///
/// # Errors
///
/// Returns [`RegCcipError::InvalidAddress`] if `value` is not a 20-byte hex address.
pub fn validate_address(value: &str) -> Result<Address> {
    value.trim().parse().map_err(|_| RegCcipError::InvalidAddress {
        value: value.to_string(),
    })
}

/// Holders of the REG and CCIP AccessControl roles.
///
/// Any holder left unset falls back to the deployer.
#[derive(Builder, Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleHolders {
    pub admin: Option<Address>,
    pub minter: Option<Address>,
    pub pauser: Option<Address>,
    pub upgrader: Option<Address>,
    /// CCIP router the sender/receiver is initialised with; when unset the
    /// `Router` deployment is used.
    pub router: Option<Address>,
}

impl RoleHolders {
    pub fn admin_or(&self, fallback: Address) -> Address {
        self.admin.unwrap_or(fallback)
    }

    pub fn minter_or(&self, fallback: Address) -> Address {
        self.minter.unwrap_or(fallback)
    }

    pub fn pauser_or(&self, fallback: Address) -> Address {
        self.pauser.unwrap_or(fallback)
    }

    pub fn upgrader_or(&self, fallback: Address) -> Address {
        self.upgrader.unwrap_or(fallback)
    }
}

/// ARM voting configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArmSettings {
    pub bless_vote_weight: u8,
    pub curse_vote_weight: u8,
    pub bless_weight_threshold: u16,
    pub curse_weight_threshold: u16,
}

impl Default for ArmSettings {
    fn default() -> Self {
        Self {
            bless_vote_weight: 2,
            curse_vote_weight: 2,
            bless_weight_threshold: 1,
            curse_weight_threshold: 1,
        }
    }
}

/// Configuration for a deployment run.
///
/// # Examples
///
/// ```rust
/// use reg_ccip::DeployConfig;
/// use alloy_chains::NamedChain;
///
/// let config = DeployConfig::builder()
///     .rpc_url("http://localhost:8545".parse().unwrap())
///     .chain(NamedChain::AnvilHardhat)
///     .build();
///
/// assert_eq!(config.price_staleness_threshold, 86_400);
/// assert_eq!(config.artifacts_dir.to_str(), Some("artifacts"));
/// ```
#[derive(Builder, Debug, Clone)]
pub struct DeployConfig {
    pub rpc_url: Url,
    pub chain: NamedChain,
    #[builder(into, default = PathBuf::from(DEFAULT_ARTIFACTS_DIR))]
    pub artifacts_dir: PathBuf,
    #[builder(into, default = PathBuf::from(DEFAULT_DEPLOYMENTS_DIR))]
    pub deployments_dir: PathBuf,
    #[builder(default)]
    pub roles: RoleHolders,
    #[builder(default = DEFAULT_STALENESS_THRESHOLD)]
    pub price_staleness_threshold: u32,
    #[builder(default)]
    pub arm: ArmSettings,
    /// Selector of the chain this deployment lives on.
    #[builder(default = CHAIN_SELECTOR_SEPOLIA)]
    pub source_chain_selector: u64,
    /// Selector of the chain the on-ramp sends to.
    #[builder(default = CHAIN_SELECTOR_MUMBAI)]
    pub destination_chain_selector: u64,
    #[builder(default = ETHER_UNIT)]
    pub rate_limit_capacity: u128,
    #[builder(default = ETHER_UNIT)]
    pub rate_limit_rate: u128,
}

impl DeployConfig {
    /// Reads configuration from the environment, loading `.env` first if present.
    ///
    /// Required: `RPC_URL`, `CHAIN_ID`. Optional: `ARTIFACTS_DIR`,
    /// `DEPLOYMENTS_DIR`, `ADMIN`, `MINTER`, `PAUSER`, `UPGRADER`, `ROUTER`.
    pub fn from_env() -> Result<Self> {
        if let Ok(path) = dotenvy::dotenv() {
            debug!(path = %path.display(), event = "dotenv_loaded");
        }

        let rpc_url = required_var("RPC_URL")?;
        let rpc_url = Url::parse(&rpc_url)
            .map_err(|e| RegCcipError::InvalidConfig(format!("RPC_URL {rpc_url}: {e}")))?;

        let chain_id = required_var("CHAIN_ID")?;
        let chain = chain_id
            .parse::<u64>()
            .map_err(|e| RegCcipError::InvalidConfig(format!("CHAIN_ID {chain_id}: {e}")))
            .and_then(|id| {
                NamedChain::try_from(id).map_err(|_| {
                    RegCcipError::InvalidConfig(format!("CHAIN_ID {id} is not a known chain"))
                })
            })?;

        let roles = RoleHolders {
            admin: optional_address("ADMIN")?,
            minter: optional_address("MINTER")?,
            pauser: optional_address("PAUSER")?,
            upgrader: optional_address("UPGRADER")?,
            router: optional_address("ROUTER")?,
        };

        Ok(Self::builder()
            .rpc_url(rpc_url)
            .chain(chain)
            .artifacts_dir(optional_var("ARTIFACTS_DIR").unwrap_or(DEFAULT_ARTIFACTS_DIR.into()))
            .deployments_dir(
                optional_var("DEPLOYMENTS_DIR").unwrap_or(DEFAULT_DEPLOYMENTS_DIR.into()),
            )
            .roles(roles)
            .build())
    }

    /// Directory deployment records for this chain are stored in.
    pub fn chain_deployments_dir(&self) -> PathBuf {
        self.deployments_dir.join(self.chain.as_str())
    }
}

fn optional_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}

fn required_var(name: &str) -> Result<String> {
    optional_var(name).ok_or_else(|| RegCcipError::MissingEnv {
        name: name.to_string(),
    })
}

fn optional_address(name: &str) -> Result<Option<Address>> {
    optional_var(name).map(|value| validate_address(&value)).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    #[test]
    fn test_validate_address() {
        assert_eq!(
            validate_address("0x514910771AF9Ca656af840dff83E8264EcF986CA").unwrap(),
            address!("514910771AF9Ca656af840dff83E8264EcF986CA")
        );
    }

    #[test]
    fn test_validate_address_rejects_garbage() {
        let err = validate_address("0x1234").unwrap_err();
        assert!(matches!(err, RegCcipError::InvalidAddress { .. }));
        assert!(err
            .to_string()
            .starts_with("Value provided is not a valid address"));
    }

    #[test]
    fn test_builder_defaults() {
        let config = DeployConfig::builder()
            .rpc_url("http://localhost:8545".parse().unwrap())
            .chain(NamedChain::AnvilHardhat)
            .build();

        assert_eq!(config.artifacts_dir, PathBuf::from("artifacts"));
        assert_eq!(config.deployments_dir, PathBuf::from("deployments"));
        assert_eq!(config.price_staleness_threshold, 86_400);
        assert_eq!(config.arm, ArmSettings::default());
        assert_eq!(config.source_chain_selector, CHAIN_SELECTOR_SEPOLIA);
        assert_eq!(config.destination_chain_selector, CHAIN_SELECTOR_MUMBAI);
        assert_eq!(config.rate_limit_capacity, ETHER_UNIT);
        assert_eq!(config.roles, RoleHolders::default());
    }

    #[test]
    fn test_role_holders_fall_back_to_deployer() {
        let deployer = Address::with_last_byte(1);
        let pauser = Address::with_last_byte(2);
        let roles = RoleHolders::builder().pauser(pauser).build();

        assert_eq!(roles.admin_or(deployer), deployer);
        assert_eq!(roles.pauser_or(deployer), pauser);
        assert_eq!(roles.upgrader_or(deployer), deployer);
    }

    #[test]
    fn test_chain_deployments_dir() {
        let config = DeployConfig::builder()
            .rpc_url("http://localhost:8545".parse().unwrap())
            .chain(NamedChain::Sepolia)
            .deployments_dir("out")
            .build();
        assert_eq!(config.chain_deployments_dir(), PathBuf::from("out/sepolia"));
    }
}
