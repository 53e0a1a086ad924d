// SPDX-FileCopyrightText: 2025 RealT
//
// SPDX-License-Identifier: Apache-2.0
//! Chainlink CCIP lane contracts
//!
//! Constructor encodings for the contracts that make up a local CCIP lane
//! (WETH9, LinkToken, PriceRegistry, ARM, ARMProxy, BurnMintTokenPool, Router,
//! EVM2EVMOnRamp, RouterMock) and the calls that wire them together once
//! deployed.

use alloy_network::TransactionBuilder;
use alloy_primitives::aliases::{U224, U96};
use alloy_primitives::{Address, U256};
use alloy_rpc_types::TransactionRequest;
use alloy_sol_types::{sol, SolCall, SolConstructor};
use bon::Builder;

use crate::config::ArmSettings;

sol! {
    #[allow(missing_docs)]
    #[derive(Debug, PartialEq, Eq)]
    struct Voter {
        address blessVoteAddr;
        address curseVoteAddr;
        address curseUnvoteAddr;
        uint8 blessWeight;
        uint8 curseWeight;
    }

    #[allow(missing_docs)]
    #[derive(Debug, PartialEq, Eq)]
    struct ArmConfig {
        Voter[] voters;
        uint16 blessWeightThreshold;
        uint16 curseWeightThreshold;
    }

    #[allow(missing_docs)]
    #[derive(Debug, PartialEq, Eq)]
    struct RateLimiterConfig {
        bool isEnabled;
        uint128 capacity;
        uint128 rate;
    }

    #[allow(missing_docs)]
    #[derive(Debug, PartialEq, Eq)]
    struct StaticConfig {
        address linkToken;
        uint64 chainSelector;
        uint64 destChainSelector;
        uint64 defaultTxGasLimit;
        uint96 maxNopFeesJuels;
        address prevOnRamp;
        address armProxy;
    }

    #[allow(missing_docs)]
    #[derive(Debug, PartialEq, Eq)]
    struct DynamicConfig {
        address router;
        uint16 maxNumberOfTokensPerMsg;
        uint32 destGasOverhead;
        uint16 destGasPerPayloadByte;
        uint32 destDataAvailabilityOverheadGas;
        uint16 destGasPerDataAvailabilityByte;
        uint16 destDataAvailabilityMultiplierBps;
        address priceRegistry;
        uint32 maxDataBytes;
        uint32 maxPerMsgGasLimit;
    }

    #[allow(missing_docs)]
    #[derive(Debug, PartialEq, Eq)]
    struct PoolUpdate {
        address token;
        address pool;
    }

    #[allow(missing_docs)]
    #[derive(Debug, PartialEq, Eq)]
    struct FeeTokenConfigArgs {
        address token;
        uint32 networkFeeUSDCents;
        uint64 gasMultiplierWeiPerEth;
        uint64 premiumMultiplierWeiPerEth;
        bool enabled;
    }

    #[allow(missing_docs)]
    #[derive(Debug, PartialEq, Eq)]
    struct TokenTransferFeeConfigArgs {
        address token;
        uint32 minFeeUSDCents;
        uint32 maxFeeUSDCents;
        uint16 deciBps;
        uint32 destGasOverhead;
        uint32 destBytesOverhead;
    }

    #[allow(missing_docs)]
    #[derive(Debug, PartialEq, Eq)]
    struct NopAndWeight {
        address nop;
        uint16 weight;
    }

    #[allow(missing_docs)]
    #[derive(Debug, PartialEq, Eq)]
    struct OnRamp {
        uint64 destChainSelector;
        address onRamp;
    }

    #[allow(missing_docs)]
    #[derive(Debug, PartialEq, Eq)]
    struct OffRamp {
        uint64 sourceChainSelector;
        address offRamp;
    }

    #[allow(missing_docs)]
    #[derive(Debug, PartialEq, Eq)]
    struct RampUpdate {
        address ramp;
        bool allowed;
        RateLimiterConfig rateLimiterConfig;
    }

    #[allow(missing_docs)]
    #[derive(Debug, PartialEq, Eq)]
    struct TokenPriceUpdate {
        address sourceToken;
        uint224 usdPerToken;
    }

    #[allow(missing_docs)]
    #[derive(Debug, PartialEq, Eq)]
    struct GasPriceUpdate {
        uint64 destChainSelector;
        uint224 usdPerUnitGas;
    }

    #[allow(missing_docs)]
    #[derive(Debug, PartialEq, Eq)]
    struct PriceUpdates {
        TokenPriceUpdate[] tokenPriceUpdates;
        GasPriceUpdate[] gasPriceUpdates;
    }

    #[allow(missing_docs)]
    contract ARM {
        constructor(ArmConfig config);
    }

    #[allow(missing_docs)]
    contract ARMProxy {
        constructor(address arm);
    }

    #[allow(missing_docs)]
    contract PriceRegistry {
        constructor(address[] priceUpdaters, address[] feeTokens, uint32 stalenessThreshold);

        function updatePrices(PriceUpdates priceUpdates) external;
    }

    #[allow(missing_docs)]
    contract BurnMintTokenPool {
        constructor(address token, address[] allowlist, address armProxy);

        function applyRampUpdates(RampUpdate[] onRamps, RampUpdate[] offRamps) external;
    }

    #[allow(missing_docs)]
    contract Router {
        constructor(address wrappedNative, address armProxy);

        function applyRampUpdates(OnRamp[] onRampUpdates, OffRamp[] offRampRemoves, OffRamp[] offRampAdds) external;
    }

    #[allow(missing_docs)]
    contract EVM2EVMOnRamp {
        constructor(
            StaticConfig staticConfig,
            DynamicConfig dynamicConfig,
            PoolUpdate[] tokensAndPools,
            RateLimiterConfig rateLimiterConfig,
            FeeTokenConfigArgs[] feeTokenConfigs,
            TokenTransferFeeConfigArgs[] tokenTransferFeeConfigArgs,
            NopAndWeight[] nopsAndWeights
        );
    }
}

/// Default gas limit applied to messages that set none.
pub const DEFAULT_TX_GAS_LIMIT: u64 = 200_000;

/// Upper bound of accrued node-operator fees, in juels (1e18 per LINK).
pub const MAX_NOP_FEES_JUELS: u128 = 100_000 * 1_000_000_000_000_000_000;

/// `1e18`: a 1x multiplier in the on-ramp's wei-per-eth fixed point.
const ONE_X: u64 = 1_000_000_000_000_000_000;

/// Constructor arguments for `ARM`, with `voter` as the single voter's bless,
/// curse and unvote address triple.
pub fn arm_args(voter: [Address; 3], settings: ArmSettings) -> Vec<u8> {
    ARM::constructorCall {
        config: ArmConfig {
            voters: vec![Voter {
                blessVoteAddr: voter[0],
                curseVoteAddr: voter[1],
                curseUnvoteAddr: voter[2],
                blessWeight: settings.bless_vote_weight,
                curseWeight: settings.curse_vote_weight,
            }],
            blessWeightThreshold: settings.bless_weight_threshold,
            curseWeightThreshold: settings.curse_weight_threshold,
        },
    }
    .abi_encode()
}

pub fn arm_proxy_args(arm: Address) -> Vec<u8> {
    ARMProxy::constructorCall { arm }.abi_encode()
}

pub fn price_registry_args(
    price_updaters: Vec<Address>,
    fee_tokens: Vec<Address>,
    staleness_threshold: u32,
) -> Vec<u8> {
    PriceRegistry::constructorCall {
        priceUpdaters: price_updaters,
        feeTokens: fee_tokens,
        stalenessThreshold: staleness_threshold,
    }
    .abi_encode()
}

/// Constructor arguments for `BurnMintTokenPool`. An empty allowlist leaves
/// the pool permissionless.
pub fn token_pool_args(token: Address, allowlist: Vec<Address>, arm_proxy: Address) -> Vec<u8> {
    BurnMintTokenPool::constructorCall {
        token,
        allowlist,
        armProxy: arm_proxy,
    }
    .abi_encode()
}

pub fn router_args(wrapped_native: Address, arm_proxy: Address) -> Vec<u8> {
    Router::constructorCall {
        wrappedNative: wrapped_native,
        armProxy: arm_proxy,
    }
    .abi_encode()
}

/// Everything the on-ramp constructor needs that is not a protocol constant.
#[derive(Builder, Debug, Clone)]
pub struct OnRampParams {
    pub link_token: Address,
    pub wrapped_native: Address,
    pub source_chain_selector: u64,
    pub destination_chain_selector: u64,
    pub arm_proxy: Address,
    pub router: Address,
    pub price_registry: Address,
    /// Token bridged over the lane and the pool that burns and mints it.
    pub token: Address,
    pub pool: Address,
    /// Node operator paid out of collected fees.
    pub nop: Address,
    pub rate_limit_capacity: u128,
    pub rate_limit_rate: u128,
}

impl OnRampParams {
    pub fn rate_limiter(&self) -> RateLimiterConfig {
        RateLimiterConfig {
            isEnabled: true,
            capacity: self.rate_limit_capacity,
            rate: self.rate_limit_rate,
        }
    }

    /// Constructor arguments for `EVM2EVMOnRamp`.
    ///
    /// LINK and the wrapped native token are both accepted as fee tokens.
    pub fn constructor_args(&self) -> Vec<u8> {
        let fee_token = |token| FeeTokenConfigArgs {
            token,
            networkFeeUSDCents: 100,
            gasMultiplierWeiPerEth: ONE_X,
            premiumMultiplierWeiPerEth: ONE_X / 10 * 9,
            enabled: true,
        };

        EVM2EVMOnRamp::constructorCall {
            staticConfig: StaticConfig {
                linkToken: self.link_token,
                chainSelector: self.source_chain_selector,
                destChainSelector: self.destination_chain_selector,
                defaultTxGasLimit: DEFAULT_TX_GAS_LIMIT,
                maxNopFeesJuels: U96::from(MAX_NOP_FEES_JUELS),
                prevOnRamp: Address::ZERO,
                armProxy: self.arm_proxy,
            },
            dynamicConfig: DynamicConfig {
                router: self.router,
                maxNumberOfTokensPerMsg: 5,
                destGasOverhead: 350_000,
                destGasPerPayloadByte: 16,
                destDataAvailabilityOverheadGas: 33_596,
                destGasPerDataAvailabilityByte: 16,
                destDataAvailabilityMultiplierBps: 6_840,
                priceRegistry: self.price_registry,
                maxDataBytes: 30_000,
                maxPerMsgGasLimit: 2_000_000,
            },
            tokensAndPools: vec![PoolUpdate {
                token: self.token,
                pool: self.pool,
            }],
            rateLimiterConfig: self.rate_limiter(),
            feeTokenConfigs: vec![fee_token(self.link_token), fee_token(self.wrapped_native)],
            tokenTransferFeeConfigArgs: vec![TokenTransferFeeConfigArgs {
                token: self.token,
                minFeeUSDCents: 50,
                maxFeeUSDCents: 500_000,
                deciBps: 0,
                destGasOverhead: 34_000,
                destBytesOverhead: 32,
            }],
            nopsAndWeights: vec![NopAndWeight {
                nop: self.nop,
                weight: 1,
            }],
        }
        .abi_encode()
    }
}

/// Registers on-ramps (keyed by destination selector) and off-ramps (keyed by
/// source selector) on the router. No ramps are removed.
pub fn router_ramp_update_transaction(
    from: Address,
    router: Address,
    on_ramps: &[(u64, Address)],
    off_ramps: &[(u64, Address)],
) -> TransactionRequest {
    let input = Router::applyRampUpdatesCall {
        onRampUpdates: on_ramps
            .iter()
            .map(|(selector, ramp)| OnRamp {
                destChainSelector: *selector,
                onRamp: *ramp,
            })
            .collect(),
        offRampRemoves: Vec::new(),
        offRampAdds: off_ramps
            .iter()
            .map(|(selector, ramp)| OffRamp {
                sourceChainSelector: *selector,
                offRamp: *ramp,
            })
            .collect(),
    }
    .abi_encode();

    call_transaction(from, router, input)
}

/// Allows `on_ramp` to burn through the pool under `rate_limiter`.
pub fn pool_ramp_update_transaction(
    from: Address,
    pool: Address,
    on_ramp: Address,
    rate_limiter: RateLimiterConfig,
) -> TransactionRequest {
    let input = BurnMintTokenPool::applyRampUpdatesCall {
        onRamps: vec![RampUpdate {
            ramp: on_ramp,
            allowed: true,
            rateLimiterConfig: rate_limiter,
        }],
        offRamps: Vec::new(),
    }
    .abi_encode();

    call_transaction(from, pool, input)
}

/// Publishes USD prices (18 decimals) for fee tokens and destination gas.
pub fn update_prices_transaction(
    from: Address,
    price_registry: Address,
    token_prices: &[(Address, U256)],
    gas_prices: &[(u64, U256)],
) -> TransactionRequest {
    let input = PriceRegistry::updatePricesCall {
        priceUpdates: PriceUpdates {
            tokenPriceUpdates: token_prices
                .iter()
                .map(|(token, price)| TokenPriceUpdate {
                    sourceToken: *token,
                    usdPerToken: U224::saturating_from(*price),
                })
                .collect(),
            gasPriceUpdates: gas_prices
                .iter()
                .map(|(selector, price)| GasPriceUpdate {
                    destChainSelector: *selector,
                    usdPerUnitGas: U224::saturating_from(*price),
                })
                .collect(),
        },
    }
    .abi_encode();

    call_transaction(from, price_registry, input)
}

fn call_transaction(from: Address, to: Address, input: Vec<u8>) -> TransactionRequest {
    TransactionRequest::default()
        .with_from(from)
        .with_to(to)
        .with_input(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_sol_types::SolValue;

    #[test]
    fn test_arm_args_carry_voter_weights() {
        let voter = [
            Address::with_last_byte(1),
            Address::with_last_byte(2),
            Address::with_last_byte(3),
        ];
        let encoded = arm_args(voter, ArmSettings::default());
        let (config,) = <(ArmConfig,)>::abi_decode_params(&encoded).unwrap();

        assert_eq!(config.voters.len(), 1);
        assert_eq!(config.voters[0].curseVoteAddr, Address::with_last_byte(2));
        assert_eq!(config.voters[0].blessWeight, 2);
        assert_eq!(config.blessWeightThreshold, 1);
    }

    #[test]
    fn test_price_registry_args_layout() {
        let encoded = price_registry_args(
            vec![Address::with_last_byte(1)],
            vec![Address::with_last_byte(2)],
            86_400,
        );
        let (updaters, fee_tokens, threshold) =
            <(Vec<Address>, Vec<Address>, u32)>::abi_decode_params(&encoded).unwrap();
        assert_eq!(updaters, vec![Address::with_last_byte(1)]);
        assert_eq!(fee_tokens, vec![Address::with_last_byte(2)]);
        assert_eq!(threshold, 86_400);
    }

    #[test]
    fn test_router_args_order() {
        let encoded = router_args(Address::with_last_byte(1), Address::with_last_byte(2));
        let (wrapped, arm_proxy) = <(Address, Address)>::abi_decode_params(&encoded).unwrap();
        assert_eq!(wrapped, Address::with_last_byte(1));
        assert_eq!(arm_proxy, Address::with_last_byte(2));
    }

    #[test]
    fn test_router_ramp_update_targets_router() {
        let tx = router_ramp_update_transaction(
            Address::with_last_byte(1),
            Address::with_last_byte(2),
            &[(42, Address::with_last_byte(3))],
            &[(7, Address::with_last_byte(4))],
        );
        assert_eq!(tx.to, Some(Address::with_last_byte(2).into()));

        let call = Router::applyRampUpdatesCall::abi_decode(tx.input.input().unwrap()).unwrap();
        assert_eq!(call.onRampUpdates[0].destChainSelector, 42);
        assert!(call.offRampRemoves.is_empty());
        assert_eq!(
            call.offRampAdds,
            vec![OffRamp {
                sourceChainSelector: 7,
                offRamp: Address::with_last_byte(4),
            }]
        );
    }
}
