// SPDX-FileCopyrightText: 2025 RealT
//
// SPDX-License-Identifier: Apache-2.0
//! CCIP sender/receiver bindings
//!
//! The sender/receiver is an upgradeable (UUPS) contract that moves allowlisted
//! tokens to allowlisted destination chains through a CCIP router. Its
//! `transferTokensWithPermit` entry point consumes an ERC-2612 permit so the
//! approval and the transfer happen in a single transaction.

use alloy_network::Ethereum;
use alloy_primitives::{Address, Bytes, U256};
use alloy_provider::Provider;
use alloy_rpc_types::TransactionRequest;
use alloy_sol_types::{sol, SolCall};
use tracing::{debug, info};

use crate::error::Result;
use crate::permit::PermitSignature;

use CcipSenderReceiver::CcipSenderReceiverInstance;

/// CCIPSenderReceiver contract wrapper
pub struct CcipSenderReceiverContract<P: Provider<Ethereum>> {
    instance: CcipSenderReceiverInstance<P>,
}

impl<P: Provider<Ethereum>> CcipSenderReceiverContract<P> {
    pub fn new(address: Address, provider: P) -> Self {
        debug!(
            contract_address = %address,
            event = "ccip_sender_receiver_initialized"
        );
        Self {
            instance: CcipSenderReceiverInstance::new(address, provider),
        }
    }

    pub async fn router(&self) -> Result<Address> {
        Ok(self.instance.getRouter().call().await?)
    }

    pub async fn is_allowlisted_destination_chain(&self, chain_selector: u64) -> Result<bool> {
        Ok(self
            .instance
            .isAllowlistedDestinationChain(chain_selector)
            .call()
            .await?)
    }

    pub async fn is_allowlisted_token(&self, token: Address) -> Result<bool> {
        Ok(self.instance.isAllowlistedToken(token).call().await?)
    }

    /// Estimated CCIP fee for a transfer, denominated in `fee_token`.
    pub async fn ccip_fees_estimation(
        &self,
        destination_chain_selector: u64,
        receiver: Address,
        token: Address,
        amount: U256,
        fee_token: Address,
    ) -> Result<U256> {
        let fees = self
            .instance
            .getCcipFeesEstimation(destination_chain_selector, receiver, token, amount, fee_token)
            .call()
            .await?;

        debug!(
            destination_chain_selector = destination_chain_selector,
            token = %token,
            amount = %amount,
            fee_token = %fee_token,
            fees = %fees,
            event = "ccip_fees_estimated"
        );

        Ok(fees)
    }

    pub fn allowlist_destination_chain_transaction(
        &self,
        from: Address,
        chain_selector: u64,
        allowed: bool,
    ) -> TransactionRequest {
        info!(
            from = %from,
            chain_selector = chain_selector,
            allowed = allowed,
            contract_address = %self.instance.address(),
            event = "allowlist_destination_chain_transaction_created"
        );

        self.instance
            .allowlistDestinationChain(chain_selector, allowed)
            .from(from)
            .into_transaction_request()
    }

    pub fn allowlist_token_transaction(
        &self,
        from: Address,
        token: Address,
        allowed: bool,
    ) -> TransactionRequest {
        info!(
            from = %from,
            token = %token,
            allowed = allowed,
            contract_address = %self.instance.address(),
            event = "allowlist_token_transaction_created"
        );

        self.instance
            .allowlistToken(token, allowed)
            .from(from)
            .into_transaction_request()
    }

    pub fn set_router_transaction(&self, from: Address, router: Address) -> TransactionRequest {
        self.instance
            .setRouter(router)
            .from(from)
            .into_transaction_request()
    }

    /// Create a transaction request for a transfer backed by a permit signed
    /// over `amount` with `spender` set to this contract.
    ///
    /// `fee` is attached as value when `fee_token` is the zero address
    /// (native fees).
    #[allow(clippy::too_many_arguments)]
    pub fn transfer_tokens_with_permit_transaction(
        &self,
        from: Address,
        destination_chain_selector: u64,
        receiver: Address,
        token: Address,
        amount: U256,
        fee_token: Address,
        fee: U256,
        deadline: U256,
        signature: &PermitSignature,
    ) -> TransactionRequest {
        info!(
            from = %from,
            destination_chain_selector = destination_chain_selector,
            receiver = %receiver,
            token = %token,
            amount = %amount,
            fee_token = %fee_token,
            deadline = %deadline,
            contract_address = %self.instance.address(),
            event = "transfer_with_permit_transaction_created"
        );

        let call = self
            .instance
            .transferTokensWithPermit(
                destination_chain_selector,
                receiver,
                token,
                amount,
                fee_token,
                deadline,
                signature.v(),
                signature.r(),
                signature.s(),
            )
            .from(from);

        let call = if fee_token.is_zero() {
            call.value(fee)
        } else {
            call
        };

        call.into_transaction_request()
    }

    /// Returns the contract address
    pub fn address(&self) -> Address {
        *self.instance.address()
    }
}

/// Calldata for the proxy's `initialize(admin, pauser, upgrader, router)`.
pub fn initialize_calldata(
    admin: Address,
    pauser: Address,
    upgrader: Address,
    router: Address,
) -> Bytes {
    CcipSenderReceiver::initializeCall {
        defaultAdmin: admin,
        pauser,
        upgrader,
        router,
    }
    .abi_encode()
    .into()
}

sol!(
    #[allow(missing_docs)]
    #[sol(rpc)]
    #[derive(Debug)]
    contract CcipSenderReceiver {
        event AllowlistDestinationChain(uint64 indexed destinationChainSelector, bool allowed);
        event AllowlistToken(address indexed token, bool allowed);
        event SetRouter(address indexed router);
        event TokensTransferred(
            bytes32 indexed messageId,
            uint64 indexed destinationChainSelector,
            address receiver,
            address token,
            uint256 tokenAmount,
            address feeToken,
            uint256 fees
        );

        error NotEnoughBalance(uint256 currentBalance, uint256 calculatedFees);
        error NothingToWithdraw();
        error FailedToWithdrawEth(address owner, address target, uint256 value);
        error DestinationChainNotAllowlisted(uint64 destinationChainSelector);
        error TokenNotAllowlisted(address token);
        error InvalidReceiverAddress();
        error InvalidContractAddress();
        error InvalidFeeToken();
        error AllowedStateNotChange();
        error InvalidRouter(address router);
        error InvalidSender();

        function initialize(address defaultAdmin, address pauser, address upgrader, address router) external;

        function allowlistDestinationChain(uint64 destinationChainSelector, bool allowed) external;
        function allowlistToken(address token, bool allowed) external;
        function setRouter(address router) external;
        function withdraw(address beneficiary) external;
        function withdrawToken(address beneficiary, address token) external;

        function transferTokens(
            uint64 destinationChainSelector,
            address receiver,
            address token,
            uint256 amount,
            address feeToken
        ) external payable returns (bytes32 messageId);

        function transferTokensWithPermit(
            uint64 destinationChainSelector,
            address receiver,
            address token,
            uint256 amount,
            address feeToken,
            uint256 deadline,
            uint8 v,
            bytes32 r,
            bytes32 s
        ) external payable returns (bytes32 messageId);

        function getRouter() external view returns (address);
        function getLinkToken() external view returns (address);
        function getWrappedNativeToken() external view returns (address);
        function getAllowlistedDestinationChains() external view returns (uint64[] memory);
        function isAllowlistedDestinationChain(uint64 destinationChainSelector) external view returns (bool);
        function getAllowlistedTokens() external view returns (address[] memory);
        function isAllowlistedToken(address token) external view returns (bool);
        function getCcipFeesEstimation(
            uint64 destinationChainSelector,
            address receiver,
            address token,
            uint256 amount,
            address feeToken
        ) external view returns (uint256);
        function supportsInterface(bytes4 interfaceId) external view returns (bool);

        function upgradeTo(address newImplementation) external;
    }
);

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{b256, hex};
    use alloy_sol_types::SolInterface;

    #[test]
    fn test_initialize_calldata_places_router_last() {
        let router = Address::with_last_byte(9);
        let calldata = initialize_calldata(
            Address::with_last_byte(1),
            Address::with_last_byte(1),
            Address::with_last_byte(1),
            router,
        );
        let decoded = CcipSenderReceiver::initializeCall::abi_decode(&calldata).unwrap();
        assert_eq!(decoded.router, router);
    }

    #[test]
    fn test_custom_error_round_trip_through_revert_data() {
        let revert = CcipSenderReceiver::CcipSenderReceiverErrors::TokenNotAllowlisted(
            CcipSenderReceiver::TokenNotAllowlisted {
                token: Address::with_last_byte(5),
            },
        )
        .abi_encode();

        let decoded =
            CcipSenderReceiver::CcipSenderReceiverErrors::abi_decode(&revert).unwrap();
        assert!(matches!(
            decoded,
            CcipSenderReceiver::CcipSenderReceiverErrors::TokenNotAllowlisted(e)
                if e.token == Address::with_last_byte(5)
        ));
    }

    #[test]
    fn test_permit_components_land_in_calldata() {
        let signature: PermitSignature = format!(
            "0x{}{}1b",
            hex::encode(b256!(
                "1111111111111111111111111111111111111111111111111111111111111111"
            )),
            hex::encode(b256!(
                "2222222222222222222222222222222222222222222222222222222222222222"
            )),
        )
        .parse()
        .unwrap();

        let call = CcipSenderReceiver::transferTokensWithPermitCall {
            destinationChainSelector: 1,
            receiver: Address::with_last_byte(2),
            token: Address::with_last_byte(3),
            amount: U256::from(4),
            feeToken: Address::ZERO,
            deadline: U256::from(5),
            v: signature.v(),
            r: signature.r(),
            s: signature.s(),
        };
        let decoded =
            CcipSenderReceiver::transferTokensWithPermitCall::abi_decode(&call.abi_encode())
                .unwrap();
        assert_eq!(decoded.v, 27);
        assert_eq!(decoded.r, signature.r());
        assert_eq!(decoded.s, signature.s());
    }
}
