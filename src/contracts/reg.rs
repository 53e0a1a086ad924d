// SPDX-FileCopyrightText: 2025 RealT
//
// SPDX-License-Identifier: Apache-2.0
//! REG token bindings
//!
//! REG is an upgradeable (UUPS) ERC20 with ERC-2612 permits, pausing, and
//! role-gated bridge and governance minting.

use alloy_network::Ethereum;
use alloy_primitives::{Address, Bytes, B256, U256};
use alloy_provider::Provider;
use alloy_rpc_types::TransactionRequest;
use alloy_sol_types::{sol, SolCall};
use async_trait::async_trait;
use tracing::{debug, info};

use crate::error::Result;
use crate::permit::PermitSignature;
use crate::roles::Role;
use crate::traits::PermitToken;

use RegToken::RegTokenInstance;

/// REG token contract wrapper
///
/// # Example
///
/// ```rust,no_run
/// use reg_ccip::RegTokenContract;
/// use alloy_primitives::address;
/// use alloy_provider::ProviderBuilder;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let provider = ProviderBuilder::new().connect("http://localhost:8545").await?;
/// let reg = RegTokenContract::new(address!("0000000000000000000000000000000000000001"), provider);
///
/// let holder = address!("1234567890123456789012345678901234567890");
/// let balance = reg.balance_of(holder).await?;
/// # Ok(())
/// # }
/// ```
pub struct RegTokenContract<P: Provider<Ethereum>> {
    instance: RegTokenInstance<P>,
}

impl<P: Provider<Ethereum>> RegTokenContract<P> {
    pub fn new(address: Address, provider: P) -> Self {
        debug!(
            contract_address = %address,
            event = "reg_contract_initialized"
        );
        Self {
            instance: RegTokenInstance::new(address, provider),
        }
    }

    pub async fn balance_of(&self, account: Address) -> Result<U256> {
        let balance = self.instance.balanceOf(account).call().await?;

        debug!(
            account = %account,
            balance = %balance,
            contract_address = %self.instance.address(),
            event = "balance_retrieved"
        );

        Ok(balance)
    }

    pub async fn allowance(&self, owner: Address, spender: Address) -> Result<U256> {
        Ok(self.instance.allowance(owner, spender).call().await?)
    }

    pub async fn domain_separator(&self) -> Result<B256> {
        Ok(self.instance.DOMAIN_SEPARATOR().call().await?)
    }

    pub async fn has_role(&self, role: Role, account: Address) -> Result<bool> {
        Ok(self.instance.hasRole(role.id(), account).call().await?)
    }

    pub async fn paused(&self) -> Result<bool> {
        Ok(self.instance.paused().call().await?)
    }

    /// Create a transaction request consuming a signed permit.
    ///
    /// Anyone may submit it; the allowance is granted to `spender` on behalf of
    /// `owner` if the signature recovers to `owner` under the token's current
    /// nonce and `deadline` has not passed.
    pub fn permit_transaction(
        &self,
        from: Address,
        owner: Address,
        spender: Address,
        value: U256,
        deadline: U256,
        signature: &PermitSignature,
    ) -> TransactionRequest {
        info!(
            from = %from,
            owner = %owner,
            spender = %spender,
            value = %value,
            deadline = %deadline,
            contract_address = %self.instance.address(),
            event = "permit_transaction_created"
        );

        self.instance
            .permit(
                owner,
                spender,
                value,
                deadline,
                signature.v(),
                signature.r(),
                signature.s(),
            )
            .from(from)
            .into_transaction_request()
    }

    pub fn grant_role_transaction(
        &self,
        from: Address,
        role: Role,
        account: Address,
    ) -> TransactionRequest {
        info!(
            from = %from,
            role = %role,
            account = %account,
            contract_address = %self.instance.address(),
            event = "grant_role_transaction_created"
        );

        self.instance
            .grantRole(role.id(), account)
            .from(from)
            .into_transaction_request()
    }

    pub fn mint_by_governance_transaction(
        &self,
        from: Address,
        account: Address,
        amount: U256,
    ) -> TransactionRequest {
        self.instance
            .mintByGovernance(account, amount)
            .from(from)
            .into_transaction_request()
    }

    pub fn approve_transaction(
        &self,
        from: Address,
        spender: Address,
        amount: U256,
    ) -> TransactionRequest {
        self.instance
            .approve(spender, amount)
            .from(from)
            .into_transaction_request()
    }

    pub fn pause_transaction(&self, from: Address) -> TransactionRequest {
        self.instance.pause().from(from).into_transaction_request()
    }

    pub fn unpause_transaction(&self, from: Address) -> TransactionRequest {
        self.instance.unpause().from(from).into_transaction_request()
    }

    /// Returns the contract address
    pub fn address(&self) -> Address {
        *self.instance.address()
    }
}

/// Calldata for the proxy's `initialize(admin, minter, pauser, upgrader)`.
pub fn initialize_calldata(
    admin: Address,
    minter: Address,
    pauser: Address,
    upgrader: Address,
) -> Bytes {
    RegToken::initializeCall {
        defaultAdmin: admin,
        minter,
        pauser,
        upgrader,
    }
    .abi_encode()
    .into()
}

#[async_trait]
impl<P> PermitToken for RegTokenContract<P>
where
    P: Provider<Ethereum> + Send + Sync,
{
    fn address(&self) -> Address {
        *self.instance.address()
    }

    async fn name(&self) -> Result<String> {
        Ok(self.instance.name().call().await?)
    }

    async fn nonces(&self, owner: Address) -> Result<U256> {
        let nonce = self.instance.nonces(owner).call().await?;

        debug!(
            owner = %owner,
            nonce = %nonce,
            contract_address = %self.instance.address(),
            event = "nonce_retrieved"
        );

        Ok(nonce)
    }
}

sol!(
    #[allow(missing_docs)]
    #[sol(rpc)]
    #[derive(Debug)]
    contract RegToken {
        event Transfer(address indexed from, address indexed to, uint256 value);
        event Approval(address indexed owner, address indexed spender, uint256 value);
        event Paused(address account);
        event Unpaused(address account);
        event MintByBridge(address indexed to, uint256 amount);
        event BurnByBridge(address indexed from, uint256 amount);
        event MintByGovernance(address indexed to, uint256 amount);
        event BurnByGovernance(address indexed from, uint256 amount);
        event RecoverByGovernance(address indexed token, uint256 amount);
        event RoleGranted(bytes32 indexed role, address indexed account, address indexed sender);

        error InvalidAmount();
        error InvalidLength();
        error LengthNotMatch();

        function initialize(address defaultAdmin, address minter, address pauser, address upgrader) external;

        function name() external view returns (string memory);
        function symbol() external view returns (string memory);
        function decimals() external view returns (uint8);
        function totalSupply() external view returns (uint256);
        function balanceOf(address account) external view returns (uint256);
        function allowance(address owner, address spender) external view returns (uint256);
        function transfer(address to, uint256 amount) external returns (bool);
        function approve(address spender, uint256 amount) external returns (bool);
        function transferFrom(address from, address to, uint256 amount) external returns (bool);

        function nonces(address owner) external view returns (uint256);
        function DOMAIN_SEPARATOR() external view returns (bytes32);
        function permit(address owner, address spender, uint256 value, uint256 deadline, uint8 v, bytes32 r, bytes32 s) external;

        function hasRole(bytes32 role, address account) external view returns (bool);
        function grantRole(bytes32 role, address account) external;
        function revokeRole(bytes32 role, address account) external;

        function pause() external;
        function unpause() external;
        function paused() external view returns (bool);

        function mint(address account, uint256 amount) external;
        function burn(uint256 amount) external;
        function mintByGovernance(address account, uint256 amount) external;
        function mintBatchByGovernance(address[] calldata accounts, uint256[] calldata amounts) external;
        function burnByGovernance(address account, uint256 amount) external;
        function transferBatch(address[] calldata recipients, uint256[] calldata amounts) external returns (bool);
        function recoverERC20(address tokenAddress, uint256 tokenAmount) external;

        function upgradeTo(address newImplementation) external;
    }
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialize_calldata_selector() {
        let calldata = initialize_calldata(
            Address::with_last_byte(1),
            Address::with_last_byte(2),
            Address::with_last_byte(3),
            Address::with_last_byte(4),
        );
        assert_eq!(&calldata[..4], RegToken::initializeCall::SELECTOR.as_slice());
        assert_eq!(calldata.len(), 4 + 4 * 32);

        let decoded = RegToken::initializeCall::abi_decode(&calldata).unwrap();
        assert_eq!(decoded.defaultAdmin, Address::with_last_byte(1));
        assert_eq!(decoded.upgrader, Address::with_last_byte(4));
    }
}
