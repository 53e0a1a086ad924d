// SPDX-FileCopyrightText: 2025 RealT
//
// SPDX-License-Identifier: Apache-2.0
//! Permit construction tests against fake token and chain state.

use alloy_primitives::{address, b256, Address, U256};
use alloy_signer_local::PrivateKeySigner;
use reg_ccip::permit::{PermitDomain, PermitField, PermitRequest};
use reg_ccip::testing::{CallLog, FailingSigner, FakeChainBackend, FakePermitToken};
use reg_ccip::{get_permit_signature, PermitConfig, PermitSignature, RegCcipError};
use rstest::rstest;

const CHAIN_ID: u64 = 31337;
const TOKEN_NAME: &str = "RealToken Ecosystem Governance";
const NOW: u64 = 1_700_000_000;

const TOKEN: Address = address!("5FbDB2315678afecb367f032d93F642f64180aa3");
const SPENDER: Address = address!("e7f1725E7734CE288F8367e1Bb143E90bb3F0512");

fn owner() -> PrivateKeySigner {
    // First anvil/hardhat development key.
    PrivateKeySigner::from_bytes(&b256!(
        "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80"
    ))
    .unwrap()
}

fn token() -> FakePermitToken {
    FakePermitToken::new(TOKEN, TOKEN_NAME, CHAIN_ID)
}

fn deadline() -> U256 {
    U256::from(NOW + 3600)
}

fn request(owner: Address) -> PermitRequest {
    PermitRequest {
        owner,
        spender: SPENDER,
        value: U256::from(1000),
        nonce: U256::ZERO,
        deadline: deadline(),
        domain: PermitDomain {
            name: TOKEN_NAME.to_string(),
            version: "1".to_string(),
            chain_id: CHAIN_ID,
            verifying_contract: TOKEN,
        },
    }
}

#[tokio::test]
async fn test_signature_is_deterministic_and_recovers_owner() {
    let signer = owner();
    let request = request(signer.address());

    let first = request.sign(&signer).await.unwrap();
    let second = request.sign(&signer).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(request.recover(&first).unwrap(), signer.address());
    assert!(request.verify(&first));
    assert!(first.v() == 27 || first.v() == 28);
}

#[rstest]
#[case::value(|r: &mut PermitRequest| r.value += U256::from(1))]
#[case::nonce(|r: &mut PermitRequest| r.nonce = U256::from(1))]
#[case::deadline(|r: &mut PermitRequest| r.deadline -= U256::from(1))]
#[case::spender(|r: &mut PermitRequest| r.spender = Address::with_last_byte(0xbb))]
#[case::owner(|r: &mut PermitRequest| r.owner = Address::with_last_byte(0xaa))]
#[case::name(|r: &mut PermitRequest| r.domain.name = "REG".to_string())]
#[case::version(|r: &mut PermitRequest| r.domain.version = "2".to_string())]
#[case::chain_id(|r: &mut PermitRequest| r.domain.chain_id = 1)]
#[case::verifying_contract(|r: &mut PermitRequest| r.domain.verifying_contract = Address::with_last_byte(0xcc))]
#[tokio::test]
async fn test_changing_any_field_breaks_recovery(#[case] mutate: fn(&mut PermitRequest)) {
    let signer = owner();
    let request = request(signer.address());
    let signature = request.sign(&signer).await.unwrap();

    let mut tampered = request.clone();
    mutate(&mut tampered);

    assert!(!tampered.verify(&signature));
}

#[tokio::test]
async fn test_resolves_nonce_name_and_chain_id_from_remote_state() {
    let signer = owner();
    let token = token();
    let network = FakeChainBackend::new(CHAIN_ID);
    token.set_nonce(signer.address(), U256::from(3));

    let request = PermitRequest::resolve(
        signer.address(),
        SPENDER,
        U256::from(1000),
        deadline(),
        &token,
        &network,
        &PermitConfig::default(),
    )
    .await
    .unwrap();

    assert_eq!(request.nonce, U256::from(3));
    assert_eq!(request.domain, token.domain());

    let signature = get_permit_signature(
        &signer,
        SPENDER,
        U256::from(1000),
        deadline(),
        &token,
        &network,
        PermitConfig::default(),
    )
    .await
    .unwrap();
    assert!(request.verify(&signature));
}

#[tokio::test]
async fn test_remote_lookups_happen_in_order() {
    let log = CallLog::default();
    let token = token().with_call_log(log.clone());
    let network = FakeChainBackend::new(CHAIN_ID).with_call_log(log.clone());

    get_permit_signature(
        &owner(),
        SPENDER,
        U256::from(1000),
        deadline(),
        &token,
        &network,
        PermitConfig::default(),
    )
    .await
    .unwrap();

    assert_eq!(*log.lock().unwrap(), vec!["nonces", "name", "chainId"]);
}

#[tokio::test]
async fn test_overrides_skip_remote_lookups() {
    let log = CallLog::default();
    let token = token()
        .with_failing_name()
        .with_failing_nonces()
        .with_call_log(log.clone());
    let network = FakeChainBackend::new(CHAIN_ID)
        .with_failing_chain_id()
        .with_call_log(log.clone());

    let config = PermitConfig::builder()
        .nonce(U256::from(9))
        .name("Overridden")
        .version("2")
        .chain_id(137)
        .build();

    let signer = owner();
    let signature = get_permit_signature(
        &signer,
        SPENDER,
        U256::from(1000),
        deadline(),
        &token,
        &network,
        config,
    )
    .await
    .unwrap();

    assert!(log.lock().unwrap().is_empty());

    let mut expected = request(signer.address());
    expected.nonce = U256::from(9);
    expected.domain.name = "Overridden".to_string();
    expected.domain.version = "2".to_string();
    expected.domain.chain_id = 137;
    assert!(expected.verify(&signature));
}

#[tokio::test]
async fn test_permit_accepted_once_then_replay_rejected() {
    let signer = owner();
    let token = token();
    let network = FakeChainBackend::new(CHAIN_ID);
    token.set_block_timestamp(NOW);

    let signature = get_permit_signature(
        &signer,
        SPENDER,
        U256::from(1000),
        deadline(),
        &token,
        &network,
        PermitConfig::default(),
    )
    .await
    .unwrap();

    token
        .permit(signer.address(), SPENDER, U256::from(1000), deadline(), &signature)
        .unwrap();
    assert_eq!(token.allowance(signer.address(), SPENDER), U256::from(1000));

    let replay = token
        .permit(signer.address(), SPENDER, U256::from(1000), deadline(), &signature)
        .unwrap_err();
    assert!(
        replay.to_string().contains("ERC2612InvalidSigner"),
        "unexpected error: {replay}"
    );
}

#[tokio::test]
async fn test_expired_deadline_is_signable_but_rejected() {
    let signer = owner();
    let token = token();
    let network = FakeChainBackend::new(CHAIN_ID);
    token.set_block_timestamp(NOW);
    let expired = U256::from(NOW - 1);

    let signature = get_permit_signature(
        &signer,
        SPENDER,
        U256::from(1000),
        expired,
        &token,
        &network,
        PermitConfig::default(),
    )
    .await
    .unwrap();

    let err = token
        .permit(signer.address(), SPENDER, U256::from(1000), expired, &signature)
        .unwrap_err();
    assert!(err.to_string().contains("ERC2612ExpiredSignature"));
    assert_eq!(token.allowance(signer.address(), SPENDER), U256::ZERO);
}

#[tokio::test]
async fn test_permit_for_different_spender_is_rejected() {
    let signer = owner();
    let token = token();
    let network = FakeChainBackend::new(CHAIN_ID);

    let signature = get_permit_signature(
        &signer,
        SPENDER,
        U256::from(1000),
        deadline(),
        &token,
        &network,
        PermitConfig::default(),
    )
    .await
    .unwrap();

    let err = token
        .permit(
            signer.address(),
            Address::with_last_byte(0xbb),
            U256::from(1000),
            deadline(),
            &signature,
        )
        .unwrap_err();
    assert!(err.to_string().contains("ERC2612InvalidSigner"));
}

#[rstest]
#[case::nonce(token().with_failing_nonces(), FakeChainBackend::new(CHAIN_ID), PermitField::Nonce)]
#[case::name(token().with_failing_name(), FakeChainBackend::new(CHAIN_ID), PermitField::Name)]
#[case::chain_id(
    token(),
    FakeChainBackend::new(CHAIN_ID).with_failing_chain_id(),
    PermitField::ChainId
)]
#[tokio::test]
async fn test_lookup_failure_names_the_field(
    #[case] token: FakePermitToken,
    #[case] network: FakeChainBackend,
    #[case] expected: PermitField,
) {
    let err = get_permit_signature(
        &owner(),
        SPENDER,
        U256::from(1000),
        deadline(),
        &token,
        &network,
        PermitConfig::default(),
    )
    .await
    .unwrap_err();

    match err {
        RegCcipError::FieldResolution { field, .. } => assert_eq!(field, expected),
        other => panic!("expected FieldResolution, got {other:?}"),
    }
}

#[tokio::test]
async fn test_signer_failure_surfaces_as_signing_error() {
    let signer = FailingSigner::new(owner().address());

    let err = get_permit_signature(
        &signer,
        SPENDER,
        U256::from(1000),
        deadline(),
        &token(),
        &FakeChainBackend::new(CHAIN_ID),
        PermitConfig::default(),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, RegCcipError::Signing(_)));
}

#[tokio::test]
async fn test_signer_must_match_owner() {
    let request = request(Address::with_last_byte(0xaa));
    let err = request.sign(&owner()).await.unwrap_err();
    assert!(matches!(err, RegCcipError::Signing(_)));
}

#[tokio::test]
async fn test_signature_survives_json_round_trip() {
    let signer = owner();
    let request = request(signer.address());
    let signature = request.sign(&signer).await.unwrap();

    let json = serde_json::to_string(&signature).unwrap();
    let parsed: PermitSignature = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed, signature);
    assert!(request.verify(&parsed));
}
