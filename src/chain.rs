// SPDX-FileCopyrightText: 2025 RealT
//
// SPDX-License-Identifier: Apache-2.0
//! CCIP chain selectors and fee-token addresses
//!
//! CCIP identifies chains by a 64-bit selector rather than the EVM chain id.
//! Reference: <https://docs.chain.link/ccip/supported-networks>

use alloy_chains::NamedChain;
use alloy_primitives::{address, Address};

use crate::error::{RegCcipError, Result};

// Chain selectors

pub const CHAIN_SELECTOR_ETHEREUM: u64 = 5009297550715157269;
pub const CHAIN_SELECTOR_SEPOLIA: u64 = 16015286601757825753;
pub const CHAIN_SELECTOR_POLYGON: u64 = 4051577828743386545;
pub const CHAIN_SELECTOR_MUMBAI: u64 = 12532609583862916517;
pub const CHAIN_SELECTOR_ARBITRUM: u64 = 4949039107694359620;
pub const CHAIN_SELECTOR_AVALANCHE: u64 = 6433500567565415381;
pub const CHAIN_SELECTOR_FUJI: u64 = 14767482510784806043;
pub const CHAIN_SELECTOR_GNOSIS: u64 = 465200170687744372;
pub const CHAIN_SELECTOR_BASE: u64 = 15971525489660198786;
pub const CHAIN_SELECTOR_OPTIMISM: u64 = 3734403246176062136;

// LINK token addresses

/// <https://etherscan.io/token/0x514910771AF9Ca656af840dff83E8264EcF986CA>
pub const LINKTOKEN_ETHEREUM: Address = address!("514910771AF9Ca656af840dff83E8264EcF986CA");

/// <https://sepolia.etherscan.io/token/0x779877A7B0D9E8603169DdbD7836e478b4624789>
pub const LINKTOKEN_SEPOLIA: Address = address!("779877A7B0D9E8603169DdbD7836e478b4624789");

/// <https://polygonscan.com/token/0xb0897686c545045aFc77CF20eC7A532E3120E0F1>
pub const LINKTOKEN_POLYGON: Address = address!("b0897686c545045aFc77CF20eC7A532E3120E0F1");

/// <https://mumbai.polygonscan.com/token/0x326C977E6efc84E512bB9C30f76E30c160eD06FB>
pub const LINKTOKEN_MUMBAI: Address = address!("326C977E6efc84E512bB9C30f76E30c160eD06FB");

/// <https://snowtrace.io/token/0x5947BB275c521040051D82396192181b413227A3>
pub const LINKTOKEN_AVALANCHE: Address = address!("5947BB275c521040051D82396192181b413227A3");

/// <https://testnet.snowtrace.io/token/0x0b9d5D9136855f6FEc3c0993feE6E9CE8a297846>
pub const LINKTOKEN_FUJI: Address = address!("0b9d5D9136855f6FEc3c0993feE6E9CE8a297846");

/// <https://gnosisscan.io/token/0xE2e73A1c69ecF83F464EFCE6A5be353a37cA09b2>
pub const LINKTOKEN_GNOSIS: Address = address!("E2e73A1c69ecF83F464EFCE6A5be353a37cA09b2");

/// EVM chain id of Polygon Mumbai, which `NamedChain` no longer lists.
pub const CHAIN_ID_MUMBAI: u64 = 80001;

/// `(chain id, CCIP selector, LINK token)` for every supported chain.
const CCIP_CHAINS: [(u64, u64, Option<Address>); 10] = [
    (NamedChain::Mainnet as u64, CHAIN_SELECTOR_ETHEREUM, Some(LINKTOKEN_ETHEREUM)),
    (NamedChain::Sepolia as u64, CHAIN_SELECTOR_SEPOLIA, Some(LINKTOKEN_SEPOLIA)),
    (NamedChain::Polygon as u64, CHAIN_SELECTOR_POLYGON, Some(LINKTOKEN_POLYGON)),
    (CHAIN_ID_MUMBAI, CHAIN_SELECTOR_MUMBAI, Some(LINKTOKEN_MUMBAI)),
    (NamedChain::Arbitrum as u64, CHAIN_SELECTOR_ARBITRUM, None),
    (NamedChain::Avalanche as u64, CHAIN_SELECTOR_AVALANCHE, Some(LINKTOKEN_AVALANCHE)),
    (NamedChain::AvalancheFuji as u64, CHAIN_SELECTOR_FUJI, Some(LINKTOKEN_FUJI)),
    (NamedChain::Gnosis as u64, CHAIN_SELECTOR_GNOSIS, Some(LINKTOKEN_GNOSIS)),
    (NamedChain::Base as u64, CHAIN_SELECTOR_BASE, None),
    (NamedChain::Optimism as u64, CHAIN_SELECTOR_OPTIMISM, None),
];

fn lookup(chain_id: u64) -> Option<&'static (u64, u64, Option<Address>)> {
    CCIP_CHAINS.iter().find(|(id, _, _)| *id == chain_id)
}

/// CCIP selector of the chain with EVM id `chain_id`.
///
/// # Errors
///
/// Returns [`RegCcipError::InvalidConfig`] for chains CCIP does not serve,
/// local development chains included.
pub fn ccip_chain_selector_for_id(chain_id: u64) -> Result<u64> {
    lookup(chain_id)
        .map(|(_, selector, _)| *selector)
        .ok_or_else(|| unsupported(chain_id))
}

/// LINK token on the chain with EVM id `chain_id`.
pub fn link_token_address_for_id(chain_id: u64) -> Result<Address> {
    lookup(chain_id)
        .and_then(|(_, _, link)| *link)
        .ok_or_else(|| unsupported(chain_id))
}

/// Trait for chains REG can be bridged between over CCIP
pub trait CcipChain {
    /// The CCIP chain selector, used as the destination argument of a transfer.
    fn ccip_chain_selector(&self) -> Result<u64>;
    /// The canonical LINK token, accepted as a CCIP fee token.
    fn link_token_address(&self) -> Result<Address>;
}

impl CcipChain for NamedChain {
    fn ccip_chain_selector(&self) -> Result<u64> {
        ccip_chain_selector_for_id(*self as u64)
    }

    fn link_token_address(&self) -> Result<Address> {
        link_token_address_for_id(*self as u64)
    }
}

fn unsupported(chain_id: u64) -> RegCcipError {
    let name = NamedChain::try_from(chain_id)
        .map(|chain| chain.to_string())
        .unwrap_or_else(|_| chain_id.to_string());
    RegCcipError::InvalidConfig(format!("Unsupported chain for CCIP: {name}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(NamedChain::Mainnet, CHAIN_SELECTOR_ETHEREUM)]
    #[case(NamedChain::Sepolia, CHAIN_SELECTOR_SEPOLIA)]
    #[case(NamedChain::Polygon, CHAIN_SELECTOR_POLYGON)]
    #[case(NamedChain::Arbitrum, CHAIN_SELECTOR_ARBITRUM)]
    #[case(NamedChain::Avalanche, CHAIN_SELECTOR_AVALANCHE)]
    #[case(NamedChain::AvalancheFuji, CHAIN_SELECTOR_FUJI)]
    #[case(NamedChain::Gnosis, CHAIN_SELECTOR_GNOSIS)]
    #[case(NamedChain::Base, CHAIN_SELECTOR_BASE)]
    #[case(NamedChain::Optimism, CHAIN_SELECTOR_OPTIMISM)]
    fn test_selector_per_chain(#[case] chain: NamedChain, #[case] expected: u64) {
        assert_eq!(chain.ccip_chain_selector().unwrap(), expected);
    }

    #[test]
    fn test_mumbai_resolves_by_chain_id() {
        assert_eq!(
            ccip_chain_selector_for_id(CHAIN_ID_MUMBAI).unwrap(),
            CHAIN_SELECTOR_MUMBAI
        );
        assert_eq!(
            link_token_address_for_id(CHAIN_ID_MUMBAI).unwrap(),
            LINKTOKEN_MUMBAI
        );
    }

    #[test]
    fn test_selectors_are_distinct() {
        for (i, (_, a, _)) in CCIP_CHAINS.iter().enumerate() {
            for (_, b, _) in &CCIP_CHAINS[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_local_chain_is_unsupported() {
        let err = NamedChain::AnvilHardhat.ccip_chain_selector().unwrap_err();
        assert!(matches!(err, RegCcipError::InvalidConfig(_)));
        assert!(NamedChain::AnvilHardhat.link_token_address().is_err());
    }

    #[test]
    fn test_link_addresses() {
        assert_eq!(
            NamedChain::Mainnet.link_token_address().unwrap(),
            LINKTOKEN_ETHEREUM
        );
        assert_eq!(
            NamedChain::Gnosis.link_token_address().unwrap(),
            LINKTOKEN_GNOSIS
        );
        assert!(NamedChain::Arbitrum.link_token_address().is_err());
    }
}
