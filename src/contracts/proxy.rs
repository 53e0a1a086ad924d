// SPDX-FileCopyrightText: 2025 RealT
//
// SPDX-License-Identifier: Apache-2.0
//! ERC1967 proxy and UUPS upgrade bindings

use alloy_network::TransactionBuilder;
use alloy_primitives::{b256, Address, Bytes, B256, U256};
use alloy_rpc_types::TransactionRequest;
use alloy_sol_types::{sol, SolCall, SolConstructor};
use tracing::debug;

use crate::error::{RegCcipError, Result};
use crate::traits::ChainProvider;

/// `bytes32(uint256(keccak256("eip1967.proxy.implementation")) - 1)`
pub const IMPLEMENTATION_SLOT: B256 =
    b256!("360894a13ba1a3210667c828492db98dca3e2076cc3735a920a3ca505d382bbc");

sol! {
    #[allow(missing_docs)]
    contract ERC1967Proxy {
        constructor(address logic, bytes data);
    }

    #[allow(missing_docs)]
    #[derive(Debug)]
    interface IUUPSUpgradeable {
        event Upgraded(address indexed implementation);

        function upgradeTo(address newImplementation) external;
        function upgradeToAndCall(address newImplementation, bytes data) external payable;
    }
}

/// Creation code for an ERC1967 proxy pointing at `implementation`, running
/// `init_data` against it in the proxy's context.
pub fn proxy_init_code(proxy_bytecode: &[u8], implementation: Address, init_data: Bytes) -> Bytes {
    let args = ERC1967Proxy::constructorCall {
        logic: implementation,
        data: init_data,
    }
    .abi_encode();

    [proxy_bytecode, args.as_slice()].concat().into()
}

/// Transaction switching `proxy` over to `new_implementation`.
pub fn upgrade_to_transaction(
    from: Address,
    proxy: Address,
    new_implementation: Address,
) -> TransactionRequest {
    let input = IUUPSUpgradeable::upgradeToCall {
        newImplementation: new_implementation,
    }
    .abi_encode();

    TransactionRequest::default()
        .with_from(from)
        .with_to(proxy)
        .with_input(input)
}

/// Reads the implementation address a proxy currently delegates to.
///
/// # Errors
///
/// Returns [`RegCcipError::InvalidConfig`] if the slot is empty, which means
/// `proxy` is not an ERC1967 proxy.
pub async fn implementation_address<N>(network: &N, proxy: Address) -> Result<Address>
where
    N: ChainProvider + ?Sized,
{
    let word = network
        .storage_at(proxy, U256::from_be_bytes(IMPLEMENTATION_SLOT.0))
        .await?;
    let implementation = Address::from_word(word);

    if implementation.is_zero() {
        return Err(RegCcipError::InvalidConfig(format!(
            "{proxy} has no ERC1967 implementation"
        )));
    }

    debug!(
        proxy = %proxy,
        implementation = %implementation,
        event = "implementation_slot_read"
    );

    Ok(implementation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::keccak256;

    #[test]
    fn test_implementation_slot_derivation() {
        let hash = U256::from_be_bytes(keccak256("eip1967.proxy.implementation").0);
        assert_eq!(
            B256::from(hash - U256::from(1)),
            IMPLEMENTATION_SLOT
        );
    }

    #[test]
    fn test_proxy_init_code_appends_constructor_args() {
        let bytecode = [0x60, 0x80, 0x60, 0x40];
        let implementation = Address::with_last_byte(7);
        let init = proxy_init_code(&bytecode, implementation, Bytes::from_static(&[1, 2, 3]));

        assert_eq!(&init[..4], &bytecode);
        // logic word, data offset, data length, one padded data word
        assert_eq!(init.len(), 4 + 4 * 32);
        assert_eq!(Address::from_slice(&init[4 + 12..4 + 32]), implementation);
    }

    #[test]
    fn test_upgrade_transaction_targets_proxy() {
        let tx = upgrade_to_transaction(
            Address::with_last_byte(1),
            Address::with_last_byte(2),
            Address::with_last_byte(3),
        );
        assert_eq!(tx.from, Some(Address::with_last_byte(1)));
        assert_eq!(tx.to, Some(Address::with_last_byte(2).into()));

        let input = tx.input.input().unwrap();
        let call = IUUPSUpgradeable::upgradeToCall::abi_decode(input).unwrap();
        assert_eq!(call.newImplementation, Address::with_last_byte(3));
    }
}
