// SPDX-FileCopyrightText: 2025 RealT
//
// SPDX-License-Identifier: Apache-2.0
//! Test utilities and fake implementations of the chain seams
//!
//! These fakes stand in for a node and a token so deployment runs and permit
//! flows can be tested in-process, including adversarial scenarios like
//! failing lookups, reverted transactions, expired deadlines and replayed
//! signatures.

use alloy_primitives::{keccak256, Address, Bytes, Log, LogData, Signature, TxHash, B256, U256};
use alloy_rpc_types::TransactionRequest;
use alloy_signer::Signer;
use alloy_sol_types::{SolCall, SolEvent, SolValue};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::contracts::create2::ICreate2Deployer;
use crate::contracts::proxy::{IUUPSUpgradeable, IMPLEMENTATION_SLOT};
use crate::permit::{PermitDomain, PermitRequest, PermitSignature, DEFAULT_PERMIT_VERSION};
use crate::receipt::TxOutcome;
use crate::traits::{ChainBackend, ChainProvider, PermitToken};
use crate::{RegCcipError, Result};

/// Shared, ordered record of remote lookups made against the fakes.
pub type CallLog = Arc<Mutex<Vec<String>>>;

fn log_call(log: &Option<CallLog>, call: impl Into<String>) {
    if let Some(log) = log {
        log.lock().unwrap().push(call.into());
    }
}

// ============================================================================
// Fake Chain Backend
// ============================================================================

/// A transaction the fake backend accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedTx {
    Deploy { from: Address, init_code: Bytes, address: Address },
    Call { from: Option<Address>, to: Option<Address>, input: Bytes },
}

#[derive(Debug, Default)]
struct ChainState {
    nonces: HashMap<Address, u64>,
    storage: HashMap<(Address, U256), B256>,
    transactions: Vec<RecordedTx>,
    deploy_failures: Vec<usize>,
    revert_selectors: Vec<[u8; 4]>,
    deploys: usize,
}

/// A fake chain that mines every transaction instantly.
///
/// Contract addresses follow the usual `CREATE` derivation from the sender's
/// nonce, so they are deterministic across runs. If a proxy bytecode is
/// registered with [`with_proxy_bytecode`](Self::with_proxy_bytecode),
/// creations using it and later `upgradeTo` calls keep the ERC1967
/// implementation slot up to date. A CREATE2 factory registered with
/// [`with_create2_factory`](Self::with_create2_factory) answers `deploy`
/// calls with a `Deployed` log.
#[derive(Clone, Debug)]
pub struct FakeChainBackend {
    chain_id: u64,
    state: Arc<Mutex<ChainState>>,
    proxy_bytecode: Option<Bytes>,
    create2_factory: Option<Address>,
    chain_id_fails: bool,
    calls: Option<CallLog>,
}

impl FakeChainBackend {
    pub fn new(chain_id: u64) -> Self {
        Self {
            chain_id,
            state: Arc::default(),
            proxy_bytecode: None,
            create2_factory: None,
            chain_id_fails: false,
            calls: None,
        }
    }

    /// Emulate ERC1967 proxies created from `bytecode`.
    pub fn with_proxy_bytecode(mut self, bytecode: Bytes) -> Self {
        self.proxy_bytecode = Some(bytecode);
        self
    }

    /// Treat `factory` as a CREATE2 deployer.
    pub fn with_create2_factory(mut self, factory: Address) -> Self {
        self.create2_factory = Some(factory);
        self
    }

    /// Make `chain_id()` fail.
    pub fn with_failing_chain_id(mut self) -> Self {
        self.chain_id_fails = true;
        self
    }

    pub fn with_call_log(mut self, log: CallLog) -> Self {
        self.calls = Some(log);
        self
    }

    /// Make the `index`-th (zero-based) contract creation revert.
    pub fn fail_deploy(&self, index: usize) {
        self.state.lock().unwrap().deploy_failures.push(index);
    }

    /// Make every call whose input starts with `selector` revert.
    pub fn revert_calls_to(&self, selector: [u8; 4]) {
        self.state.lock().unwrap().revert_selectors.push(selector);
    }

    pub fn set_storage(&self, address: Address, slot: U256, value: B256) {
        self.state
            .lock()
            .unwrap()
            .storage
            .insert((address, slot), value);
    }

    /// Every accepted transaction, in submission order.
    pub fn transactions(&self) -> Vec<RecordedTx> {
        self.state.lock().unwrap().transactions.clone()
    }

    /// Number of contract creations attempted so far, including failed ones.
    pub fn deploy_count(&self) -> usize {
        self.state.lock().unwrap().deploys
    }

    fn tx_hash(state: &ChainState) -> TxHash {
        keccak256((state.transactions.len() as u64 + state.deploys as u64).to_be_bytes())
    }

    fn implementation_slot() -> U256 {
        U256::from_be_bytes(IMPLEMENTATION_SLOT.0)
    }

    fn track_proxy(&self, state: &mut ChainState, address: Address, init_code: &[u8]) {
        let Some(proxy) = &self.proxy_bytecode else {
            return;
        };
        if let Some(args) = init_code.strip_prefix(proxy.as_ref()) {
            if let Ok((implementation, _)) = <(Address, Bytes)>::abi_decode_params(args) {
                state.storage.insert(
                    (address, Self::implementation_slot()),
                    implementation.into_word(),
                );
            }
        }
    }

    /// Logs of a factory `deploy` call: the initializer's, if any, then
    /// `Deployed`.
    fn create2_logs(&self, state: &mut ChainState, factory: Address, input: &[u8]) -> Vec<Log> {
        let Ok(call) = ICreate2Deployer::deployCall::abi_decode(input) else {
            return Vec::new();
        };
        let code_hash = keccak256(&call.code);
        let address = factory.create2(call.salt, code_hash);
        self.track_proxy(state, address, &call.code);

        let mut logs = Vec::new();
        if !call.initPayload.is_empty() {
            logs.push(Log {
                address,
                data: LogData::new_unchecked(Vec::new(), call.initPayload.clone()),
            });
        }
        logs.push(Log {
            address: factory,
            data: ICreate2Deployer::Deployed {
                newContract: address,
                salt: call.salt,
                codeHash: code_hash,
            }
            .encode_log_data(),
        });
        logs
    }
}

#[async_trait]
impl ChainProvider for FakeChainBackend {
    async fn chain_id(&self) -> Result<u64> {
        log_call(&self.calls, "chainId");
        if self.chain_id_fails {
            return Err(RegCcipError::Provider("Simulated RPC error".to_string()));
        }
        Ok(self.chain_id)
    }

    async fn storage_at(&self, address: Address, slot: U256) -> Result<B256> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .storage
            .get(&(address, slot))
            .copied()
            .unwrap_or_default())
    }
}

#[async_trait]
impl ChainBackend for FakeChainBackend {
    async fn deploy(&self, from: Address, init_code: Bytes) -> Result<TxOutcome> {
        let mut state = self.state.lock().unwrap();
        let index = state.deploys;
        state.deploys += 1;

        if state.deploy_failures.contains(&index) {
            return Err(RegCcipError::TransactionFailed {
                reason: format!("Simulated revert of deployment #{index}"),
            });
        }

        let nonce = state.nonces.entry(from).or_default();
        let address = from.create(*nonce);
        *nonce += 1;

        self.track_proxy(&mut state, address, &init_code);

        let transaction_hash = Self::tx_hash(&state);
        state.transactions.push(RecordedTx::Deploy {
            from,
            init_code,
            address,
        });

        Ok(TxOutcome {
            transaction_hash,
            contract_address: Some(address),
            status: true,
            logs: Vec::new(),
        })
    }

    async fn send(&self, tx: TransactionRequest) -> Result<TxOutcome> {
        let mut state = self.state.lock().unwrap();
        let to = tx.to.and_then(|kind| kind.to().copied());
        let input = tx.input.input().cloned().unwrap_or_default();

        if state
            .revert_selectors
            .iter()
            .any(|selector| input.starts_with(selector))
        {
            return Err(RegCcipError::TransactionFailed {
                reason: format!("Simulated revert of call to {to:?}"),
            });
        }

        let upgrade = IUUPSUpgradeable::upgradeToCall::abi_decode(&input);
        if let (Some(proxy), Ok(call)) = (to, upgrade) {
            let slot = (proxy, Self::implementation_slot());
            if state.storage.contains_key(&slot) {
                state.storage.insert(slot, call.newImplementation.into_word());
            }
        }

        let logs = match to {
            Some(factory) if self.create2_factory == Some(factory) => {
                self.create2_logs(&mut state, factory, &input)
            }
            _ => Vec::new(),
        };

        if let Some(from) = tx.from {
            *state.nonces.entry(from).or_default() += 1;
        }

        let transaction_hash = Self::tx_hash(&state);
        state.transactions.push(RecordedTx::Call {
            from: tx.from,
            to,
            input,
        });

        Ok(TxOutcome {
            transaction_hash,
            contract_address: None,
            status: true,
            logs,
        })
    }
}

// ============================================================================
// Fake Permit Token
// ============================================================================

#[derive(Debug, Default)]
struct TokenState {
    nonces: HashMap<Address, U256>,
    allowances: HashMap<(Address, Address), U256>,
    block_timestamp: u64,
}

/// An in-memory ERC-2612 token.
///
/// Besides serving `name()` and `nonces()` to the permit builder, it
/// verifies permits the way an OpenZeppelin `ERC20Permit` does: expired
/// deadlines and signatures that do not recover to the owner under the
/// current nonce are rejected, and an accepted permit consumes the nonce.
#[derive(Clone, Debug)]
pub struct FakePermitToken {
    address: Address,
    name: String,
    chain_id: u64,
    state: Arc<Mutex<TokenState>>,
    name_fails: bool,
    nonces_fail: bool,
    calls: Option<CallLog>,
}

impl FakePermitToken {
    pub fn new(address: Address, name: impl Into<String>, chain_id: u64) -> Self {
        Self {
            address,
            name: name.into(),
            chain_id,
            state: Arc::default(),
            name_fails: false,
            nonces_fail: false,
            calls: None,
        }
    }

    /// Make `name()` fail.
    pub fn with_failing_name(mut self) -> Self {
        self.name_fails = true;
        self
    }

    /// Make `nonces()` fail.
    pub fn with_failing_nonces(mut self) -> Self {
        self.nonces_fail = true;
        self
    }

    pub fn with_call_log(mut self, log: CallLog) -> Self {
        self.calls = Some(log);
        self
    }

    pub fn set_nonce(&self, owner: Address, nonce: U256) {
        self.state.lock().unwrap().nonces.insert(owner, nonce);
    }

    /// Sets the timestamp of the block the next permit executes in.
    pub fn set_block_timestamp(&self, timestamp: u64) {
        self.state.lock().unwrap().block_timestamp = timestamp;
    }

    pub fn allowance(&self, owner: Address, spender: Address) -> U256 {
        self.state
            .lock()
            .unwrap()
            .allowances
            .get(&(owner, spender))
            .copied()
            .unwrap_or_default()
    }

    /// The token's EIP-712 domain.
    pub fn domain(&self) -> PermitDomain {
        PermitDomain {
            name: self.name.clone(),
            version: DEFAULT_PERMIT_VERSION.to_string(),
            chain_id: self.chain_id,
            verifying_contract: self.address,
        }
    }

    /// Executes `permit(owner, spender, value, deadline, v, r, s)`.
    ///
    /// # Errors
    ///
    /// Returns [`RegCcipError::ContractCall`] carrying
    /// `ERC2612ExpiredSignature` or `ERC2612InvalidSigner` on rejection.
    pub fn permit(
        &self,
        owner: Address,
        spender: Address,
        value: U256,
        deadline: U256,
        signature: &PermitSignature,
    ) -> Result<()> {
        let mut state = self.state.lock().unwrap();

        if U256::from(state.block_timestamp) > deadline {
            return Err(RegCcipError::ContractCall(format!(
                "ERC2612ExpiredSignature({deadline})"
            )));
        }

        let nonce = state.nonces.get(&owner).copied().unwrap_or_default();
        let request = PermitRequest {
            owner,
            spender,
            value,
            nonce,
            deadline,
            domain: self.domain(),
        };

        let signer = request.recover(signature).unwrap_or(Address::ZERO);
        if signer != owner {
            return Err(RegCcipError::ContractCall(format!(
                "ERC2612InvalidSigner({signer}, {owner})"
            )));
        }

        state.nonces.insert(owner, nonce + U256::from(1));
        state.allowances.insert((owner, spender), value);
        Ok(())
    }
}

#[async_trait]
impl PermitToken for FakePermitToken {
    fn address(&self) -> Address {
        self.address
    }

    async fn name(&self) -> Result<String> {
        log_call(&self.calls, "name");
        if self.name_fails {
            return Err(RegCcipError::ContractCall("Simulated name() revert".to_string()));
        }
        Ok(self.name.clone())
    }

    async fn nonces(&self, owner: Address) -> Result<U256> {
        log_call(&self.calls, "nonces");
        if self.nonces_fail {
            return Err(RegCcipError::Provider("Simulated RPC error".to_string()));
        }
        Ok(self
            .state
            .lock()
            .unwrap()
            .nonces
            .get(&owner)
            .copied()
            .unwrap_or_default())
    }
}

// ============================================================================
// Failing Signer
// ============================================================================

/// A signer that claims an address but refuses to sign anything.
#[derive(Clone, Debug)]
pub struct FailingSigner {
    address: Address,
    chain_id: Option<u64>,
}

impl FailingSigner {
    pub fn new(address: Address) -> Self {
        Self {
            address,
            chain_id: None,
        }
    }
}

#[async_trait]
impl Signer for FailingSigner {
    async fn sign_hash(&self, _hash: &B256) -> alloy_signer::Result<Signature> {
        Err(alloy_signer::Error::other("Simulated signer rejection"))
    }

    fn address(&self) -> Address {
        self.address
    }

    fn chain_id(&self) -> Option<u64> {
        self.chain_id
    }

    fn set_chain_id(&mut self, chain_id: Option<u64>) {
        self.chain_id = chain_id;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fake_backend_create_addresses_follow_nonce() {
        let backend = FakeChainBackend::new(31337);
        let deployer = Address::with_last_byte(1);

        let first = backend.deploy(deployer, Bytes::new()).await.unwrap();
        let second = backend.deploy(deployer, Bytes::new()).await.unwrap();

        assert_eq!(first.contract_address, Some(deployer.create(0)));
        assert_eq!(second.contract_address, Some(deployer.create(1)));
        assert_ne!(first.transaction_hash, second.transaction_hash);
    }

    #[tokio::test]
    async fn test_fake_backend_deploy_failure() {
        let backend = FakeChainBackend::new(31337);
        backend.fail_deploy(1);

        assert!(backend.deploy(Address::ZERO, Bytes::new()).await.is_ok());
        let err = backend.deploy(Address::ZERO, Bytes::new()).await.unwrap_err();
        assert!(matches!(err, RegCcipError::TransactionFailed { .. }));
        assert_eq!(backend.deploy_count(), 2);
    }

    #[tokio::test]
    async fn test_fake_backend_failing_chain_id() {
        let backend = FakeChainBackend::new(1).with_failing_chain_id();
        assert!(backend.chain_id().await.is_err());
    }

    #[tokio::test]
    async fn test_failing_signer_rejects() {
        let signer = FailingSigner::new(Address::with_last_byte(1));
        assert!(signer.sign_hash(&B256::ZERO).await.is_err());
    }

    #[tokio::test]
    async fn test_fake_token_call_log() {
        let log = CallLog::default();
        let token = FakePermitToken::new(Address::with_last_byte(1), "REG", 1)
            .with_call_log(log.clone());

        token.nonces(Address::ZERO).await.unwrap();
        token.name().await.unwrap();

        assert_eq!(*log.lock().unwrap(), vec!["nonces", "name"]);
    }
}
