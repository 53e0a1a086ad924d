// SPDX-FileCopyrightText: 2025 RealT
//
// SPDX-License-Identifier: Apache-2.0
//! ERC-2612 permit signatures
//!
//! A permit is an EIP-712 typed-data signature that lets a spender obtain an
//! allowance and spend it in the same transaction. The signed payload is
//!
//! ```text
//! keccak256(0x19 0x01 ‖ domainSeparator ‖ hashStruct(Permit))
//!
//! Permit(address owner,address spender,uint256 value,uint256 nonce,uint256 deadline)
//! EIP712Domain(string name,string version,uint256 chainId,address verifyingContract)
//! ```
//!
//! so a signature is bound to exactly one owner/spender/value/nonce/deadline
//! tuple, one token contract and one chain.
//!
//! # Example
//!
//! ```rust,no_run
//! use reg_ccip::permit::{get_permit_signature, PermitConfig};
//! use reg_ccip::providers::AlloyBackend;
//! use reg_ccip::RegTokenContract;
//! use alloy_primitives::{address, U256};
//! use alloy_provider::ProviderBuilder;
//! use alloy_signer_local::PrivateKeySigner;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = ProviderBuilder::new().connect("http://localhost:8545").await?;
//! let token = RegTokenContract::new(address!("0000000000000000000000000000000000000001"), provider.clone());
//! let network = AlloyBackend::new(provider);
//! let owner = PrivateKeySigner::random();
//!
//! let signature = get_permit_signature(
//!     &owner,
//!     address!("0000000000000000000000000000000000000002"),
//!     U256::from(1000),
//!     U256::from(u64::MAX),
//!     &token,
//!     &network,
//!     PermitConfig::default(),
//! )
//! .await?;
//! println!("v={} r={} s={}", signature.v(), signature.r(), signature.s());
//! # Ok(())
//! # }
//! ```

mod config;
mod request;
mod signature;

use alloy_sol_types::sol;
use serde::{Deserialize, Serialize};
use std::fmt;

pub use config::{PermitConfig, DEFAULT_PERMIT_VERSION};
pub use request::{get_permit_signature, PermitDomain, PermitRequest};
pub use signature::PermitSignature;

sol! {
    /// The ERC-2612 `Permit` struct, in the exact field order the token hashes.
    #[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
    struct Permit {
        address owner;
        address spender;
        uint256 value;
        uint256 nonce;
        uint256 deadline;
    }
}

/// A permit field that may have to be read from the token or the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PermitField {
    Name,
    Nonce,
    ChainId,
}

impl fmt::Display for PermitField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PermitField::Name => "name",
            PermitField::Nonce => "nonce",
            PermitField::ChainId => "chainId",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::keccak256;
    use alloy_sol_types::SolStruct;

    #[test]
    fn test_permit_type_hash_matches_erc2612() {
        let expected = keccak256(
            "Permit(address owner,address spender,uint256 value,uint256 nonce,uint256 deadline)",
        );
        assert_eq!(
            Permit::eip712_encode_type(),
            "Permit(address owner,address spender,uint256 value,uint256 nonce,uint256 deadline)"
        );
        assert_eq!(
            keccak256(Permit::eip712_encode_type().as_bytes()),
            expected
        );
    }

    #[test]
    fn test_permit_field_display() {
        assert_eq!(PermitField::Name.to_string(), "name");
        assert_eq!(PermitField::Nonce.to_string(), "nonce");
        assert_eq!(PermitField::ChainId.to_string(), "chainId");
    }
}
