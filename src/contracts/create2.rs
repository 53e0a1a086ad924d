// SPDX-FileCopyrightText: 2025 RealT
//
// SPDX-License-Identifier: Apache-2.0
//! CREATE2 factory bindings
//!
//! The factory deploys `code` at an address derived from its own address,
//! the salt and the code hash, then calls the new contract with
//! `initPayload` when it is non-empty. Every creation emits `Deployed`.

use alloy_network::TransactionBuilder;
use alloy_primitives::{Address, Bytes, B256, U256};
use alloy_rpc_types::TransactionRequest;
use alloy_sol_types::{sol, SolCall, SolEvent};

use crate::error::{RegCcipError, Result};
use crate::receipt::TxOutcome;

sol! {
    #[allow(missing_docs)]
    #[derive(Debug)]
    interface ICreate2Deployer {
        event Deployed(address indexed newContract, bytes32 indexed salt, bytes32 indexed codeHash);

        function deploy(uint256 value, bytes32 salt, bytes code, bytes initPayload) external payable returns (address);
        function computeAddress(bytes32 salt, bytes32 codeHash) external view returns (address);
    }
}

/// Encodes a short string as a `bytes32` salt: UTF-8, right-padded with
/// zeros, at most 31 bytes so the word stays NUL-terminated.
pub fn salt_from_str(salt: &str) -> Result<B256> {
    let bytes = salt.as_bytes();
    if bytes.len() > 31 {
        return Err(RegCcipError::InvalidConfig(format!(
            "salt {salt:?} is {} bytes, at most 31 fit in bytes32",
            bytes.len()
        )));
    }

    let mut word = B256::ZERO;
    word[..bytes.len()].copy_from_slice(bytes);
    Ok(word)
}

/// Transaction asking `factory` to create `code` under `salt`, then call it
/// with `init_payload`.
pub fn deploy_transaction(
    from: Address,
    factory: Address,
    salt: B256,
    code: Bytes,
    init_payload: Bytes,
) -> TransactionRequest {
    let input = ICreate2Deployer::deployCall {
        value: U256::ZERO,
        salt,
        code,
        initPayload: init_payload,
    }
    .abi_encode();

    TransactionRequest::default()
        .with_from(from)
        .with_to(factory)
        .with_input(input)
}

/// Address of the contract `factory` created in `outcome`.
///
/// Only `Deployed` logs emitted by `factory` itself are considered, so logs
/// from the new contract's initializer are skipped.
///
/// # Errors
///
/// Returns [`RegCcipError::TransactionFailed`] if `factory` emitted no
/// `Deployed` event.
pub fn deployed_address(factory: Address, outcome: &TxOutcome) -> Result<Address> {
    outcome
        .logs
        .iter()
        .filter(|log| log.address == factory)
        .find_map(|log| {
            ICreate2Deployer::Deployed::decode_log(log)
                .ok()
                .map(|decoded| decoded.data.newContract)
        })
        .ok_or_else(|| RegCcipError::TransactionFailed {
            reason: format!(
                "factory {factory} emitted no Deployed event in {}",
                outcome.transaction_hash
            ),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{keccak256, Log, TxHash};

    #[test]
    fn test_salt_is_right_padded() {
        let salt = salt_from_str("REG").unwrap();
        assert_eq!(&salt[..3], b"REG");
        assert!(salt[3..].iter().all(|byte| *byte == 0));
    }

    #[test]
    fn test_salt_too_long() {
        let result = salt_from_str(&"x".repeat(32));
        assert!(matches!(result, Err(RegCcipError::InvalidConfig(_))));
    }

    #[test]
    fn test_deploy_transaction_layout() {
        let tx = deploy_transaction(
            Address::with_last_byte(1),
            Address::with_last_byte(2),
            B256::with_last_byte(3),
            Bytes::from_static(&[0xfe]),
            Bytes::new(),
        );
        let call = ICreate2Deployer::deployCall::abi_decode(tx.input.input().unwrap()).unwrap();

        assert_eq!(call.value, U256::ZERO);
        assert_eq!(call.salt, B256::with_last_byte(3));
        assert_eq!(call.code, Bytes::from_static(&[0xfe]));
        assert!(call.initPayload.is_empty());
    }

    #[test]
    fn test_deployed_address_ignores_other_emitters() {
        let factory = Address::with_last_byte(0xfa);
        let event = |created: Address| ICreate2Deployer::Deployed {
            newContract: created,
            salt: B256::ZERO,
            codeHash: keccak256(b""),
        };
        let outcome = TxOutcome {
            transaction_hash: TxHash::with_last_byte(1),
            contract_address: None,
            status: true,
            logs: vec![
                Log {
                    address: Address::with_last_byte(0xee),
                    data: event(Address::with_last_byte(1)).encode_log_data(),
                },
                Log {
                    address: factory,
                    data: event(Address::with_last_byte(2)).encode_log_data(),
                },
            ],
        };

        assert_eq!(
            deployed_address(factory, &outcome).unwrap(),
            Address::with_last_byte(2)
        );
        assert!(deployed_address(Address::with_last_byte(0xab), &outcome).is_err());
    }
}
