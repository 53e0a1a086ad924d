// SPDX-FileCopyrightText: 2025 RealT
//
// SPDX-License-Identifier: Apache-2.0
use alloy_primitives::U256;
use bon::Builder;

/// EIP-712 domain version used when none is supplied.
pub const DEFAULT_PERMIT_VERSION: &str = "1";

/// Optional overrides for the permit fields normally read from chain.
///
/// Every field left unset is resolved at signing time: `nonce` from
/// `token.nonces(owner)`, `name` from `token.name()`, `chain_id` from the
/// connected network and `version` falls back to [`DEFAULT_PERMIT_VERSION`].
///
/// # Examples
///
/// ```rust
/// use reg_ccip::permit::PermitConfig;
/// use alloy_primitives::U256;
///
/// // Resolve everything from the token and network
/// let config = PermitConfig::default();
/// assert!(config.nonce.is_none());
///
/// // Sign against mocked state
/// let config = PermitConfig::builder()
///     .nonce(U256::from(3))
///     .name("RealToken Ecosystem Governance")
///     .chain_id(31337)
///     .build();
/// assert_eq!(config.version(), "1");
/// ```
#[derive(Builder, Debug, Clone, Default, PartialEq, Eq)]
pub struct PermitConfig {
    pub nonce: Option<U256>,
    #[builder(into)]
    pub name: Option<String>,
    #[builder(into)]
    pub version: Option<String>,
    pub chain_id: Option<u64>,
}

impl PermitConfig {
    /// The domain version to sign with.
    pub fn version(&self) -> &str {
        self.version.as_deref().unwrap_or(DEFAULT_PERMIT_VERSION)
    }

    /// Returns `true` when no field needs a remote lookup.
    pub fn is_fully_specified(&self) -> bool {
        self.nonce.is_some() && self.name.is_some() && self.chain_id.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_resolves_everything() {
        let config = PermitConfig::default();
        assert!(config.nonce.is_none());
        assert!(config.name.is_none());
        assert!(config.chain_id.is_none());
        assert_eq!(config.version(), DEFAULT_PERMIT_VERSION);
        assert!(!config.is_fully_specified());
    }

    #[test]
    fn test_builder_overrides() {
        let config = PermitConfig::builder()
            .nonce(U256::from(7))
            .name("REG")
            .version("2")
            .chain_id(137)
            .build();

        assert_eq!(config.nonce, Some(U256::from(7)));
        assert_eq!(config.name.as_deref(), Some("REG"));
        assert_eq!(config.version(), "2");
        assert_eq!(config.chain_id, Some(137));
        assert!(config.is_fully_specified());
    }
}
