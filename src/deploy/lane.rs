// SPDX-FileCopyrightText: 2025 RealT
//
// SPDX-License-Identifier: Apache-2.0
use alloy_network::TransactionBuilder;
use alloy_primitives::U256;
use alloy_rpc_types::TransactionRequest;
use alloy_sol_types::SolCall;
use tracing::info;

use super::DeploymentContext;
use crate::config::ETHER_UNIT;
use crate::contracts::lane::{self, RateLimiterConfig};
use crate::contracts::reg::RegToken;
use crate::error::Result;
use crate::receipt::TxOutcome;
use crate::roles::Role;

/// USD price (18 decimals) published for REG and for LINK.
pub const DEFAULT_TOKEN_PRICE_USD: u128 = ETHER_UNIT;

/// USD price per unit of gas published for both ends of the lane.
pub const DEFAULT_GAS_PRICE_USD: u128 = 10;

/// Wires a deployed lane together so REG can be sent through it.
///
/// Issued in order, each awaited:
///
/// 1. grant `MINTER_BRIDGE_ROLE` on REG to the token pool;
/// 2. on the router, register the on-ramp towards the destination selector
///    and add it as the off-ramp from the source selector;
/// 3. allow the on-ramp on the pool under the configured rate limiter;
/// 4. price REG and LINK at [`DEFAULT_TOKEN_PRICE_USD`] and gas on the source
///    and destination chains at [`DEFAULT_GAS_PRICE_USD`].
pub async fn configure_lane(ctx: &DeploymentContext<'_>) -> Result<Vec<TxOutcome>> {
    let admin = ctx.config.roles.admin_or(ctx.deployer());
    let deployer = ctx.deployer();

    let reg = ctx.address_of("REG").await?;
    let pool = ctx.address_of("BurnMintTokenPool").await?;
    let router = ctx.address_of("Router").await?;
    let on_ramp = ctx.address_of("EVM2EVMOnRamp").await?;
    let price_registry = ctx.address_of("PriceRegistry").await?;
    let link_token = ctx.address_of("LinkToken").await?;
    let source = ctx.config.source_chain_selector;
    let destination = ctx.config.destination_chain_selector;

    let grant_role = TransactionRequest::default()
        .with_from(admin)
        .with_to(reg)
        .with_input(
            RegToken::grantRoleCall {
                role: Role::MinterBridge.id(),
                account: pool,
            }
            .abi_encode(),
        );

    let rate_limiter = RateLimiterConfig {
        isEnabled: true,
        capacity: ctx.config.rate_limit_capacity,
        rate: ctx.config.rate_limit_rate,
    };

    let token_price = U256::from(DEFAULT_TOKEN_PRICE_USD);
    let gas_price = U256::from(DEFAULT_GAS_PRICE_USD);

    let steps = [
        ("grantRole", grant_role),
        (
            "applyRampUpdates",
            lane::router_ramp_update_transaction(
                deployer,
                router,
                &[(destination, on_ramp)],
                &[(source, on_ramp)],
            ),
        ),
        (
            "applyRampUpdates",
            lane::pool_ramp_update_transaction(deployer, pool, on_ramp, rate_limiter),
        ),
        (
            "updatePrices",
            lane::update_prices_transaction(
                deployer,
                price_registry,
                &[(reg, token_price), (link_token, token_price)],
                &[(source, gas_price), (destination, gas_price)],
            ),
        ),
    ];

    let mut outcomes = Vec::with_capacity(steps.len());
    for (function, tx) in steps {
        outcomes.push(ctx.send(function, tx).await?);
    }

    info!(
        reg = %reg,
        pool = %pool,
        on_ramp = %on_ramp,
        source_chain_selector = source,
        destination_chain_selector = destination,
        event = "lane_configured"
    );

    Ok(outcomes)
}
