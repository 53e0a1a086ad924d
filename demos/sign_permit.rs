// SPDX-FileCopyrightText: 2025 RealT
//
// SPDX-License-Identifier: Apache-2.0
//! Signs an ERC-2612 permit for REG and prints it.
//!
//! Reads `RPC_URL`, `PRIVATE_KEY`, `TOKEN`, `SPENDER` and `VALUE` from the
//! environment or `.env`. The permit is valid for one hour.
//!
//! Run with: `cargo run --example sign_permit`

use alloy_primitives::U256;
use alloy_provider::ProviderBuilder;
use alloy_signer_local::PrivateKeySigner;
use reg_ccip::permit::PermitRequest;
use reg_ccip::providers::AlloyBackend;
use reg_ccip::{validate_address, PermitConfig, RegCcipError, RegTokenContract};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing_subscriber::EnvFilter;

fn var(name: &str) -> Result<String, RegCcipError> {
    std::env::var(name).map_err(|_| RegCcipError::MissingEnv {
        name: name.to_string(),
    })
}

#[tokio::main]
async fn main() -> Result<(), RegCcipError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();
    dotenvy::dotenv().ok();

    let rpc_url = var("RPC_URL")?
        .parse()
        .map_err(|e| RegCcipError::InvalidConfig(format!("RPC_URL: {e}")))?;
    let signer: PrivateKeySigner = var("PRIVATE_KEY")?
        .parse()
        .map_err(|e| RegCcipError::Signing(format!("PRIVATE_KEY: {e}")))?;
    let token = validate_address(&var("TOKEN")?)?;
    let spender = validate_address(&var("SPENDER")?)?;
    let value: U256 = var("VALUE")?
        .parse()
        .map_err(|e| RegCcipError::InvalidConfig(format!("VALUE: {e}")))?;

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| RegCcipError::InvalidConfig(e.to_string()))?
        .as_secs();
    let deadline = U256::from(now + 3600);

    let provider = ProviderBuilder::new().connect_http(rpc_url);
    let reg = RegTokenContract::new(token, provider.clone());
    let network = AlloyBackend::new(provider);

    let request = PermitRequest::resolve(
        signer.address(),
        spender,
        value,
        deadline,
        &reg,
        &network,
        &PermitConfig::default(),
    )
    .await?;
    let signature = request.sign(&signer).await?;

    println!("Permit for {} on chain {}", request.domain.name, request.domain.chain_id);
    println!("  owner:    {}", request.owner);
    println!("  spender:  {}", request.spender);
    println!("  value:    {}", request.value);
    println!("  nonce:    {}", request.nonce);
    println!("  deadline: {}", request.deadline);
    println!("  v: {}", signature.v());
    println!("  r: {}", signature.r());
    println!("  s: {}", signature.s());
    println!("\nTyped data:");
    println!("{}", serde_json::to_string_pretty(&request.typed_data())?);

    Ok(())
}
