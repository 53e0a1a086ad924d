// SPDX-FileCopyrightText: 2025 RealT
//
// SPDX-License-Identifier: Apache-2.0
//! The fixed-order deployment sequence.
//!
//! Steps run strictly one after another. Later steps read the addresses
//! earlier ones saved, so running a tag subset against a store that lacks a
//! dependency fails with [`RegCcipError::DeploymentNotFound`].

use alloy_primitives::Address;
use serde_json::json;
use std::fmt;
use tracing::{error, info, Instrument};

use super::{DeploymentContext, DeploymentRecord};
use crate::contracts::lane::{self, OnRampParams};
use crate::contracts::{ccip, reg};
use crate::error::Result;
use crate::spans;

/// One deployment step, in run order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeployStep {
    Reg,
    Weth,
    LinkToken,
    PriceRegistry,
    Arm,
    ArmProxy,
    BurnMintTokenPool,
    Router,
    OnRamp,
    CcipSenderReceiver,
    RegCcipReceiver,
    RouterMock,
}

impl DeployStep {
    /// Every step, in the order a full run executes them.
    pub const ALL: [DeployStep; 12] = [
        DeployStep::Reg,
        DeployStep::Weth,
        DeployStep::LinkToken,
        DeployStep::PriceRegistry,
        DeployStep::Arm,
        DeployStep::ArmProxy,
        DeployStep::BurnMintTokenPool,
        DeployStep::Router,
        DeployStep::OnRamp,
        DeployStep::CcipSenderReceiver,
        DeployStep::RegCcipReceiver,
        DeployStep::RouterMock,
    ];

    /// Step id, which is also the name its deployment is saved under.
    pub const fn id(self) -> &'static str {
        match self {
            DeployStep::Reg => "REG",
            DeployStep::Weth => "WETH",
            DeployStep::LinkToken => "LinkToken",
            DeployStep::PriceRegistry => "PriceRegistry",
            DeployStep::Arm => "ARM",
            DeployStep::ArmProxy => "ARMProxy",
            DeployStep::BurnMintTokenPool => "BurnMintTokenPool",
            DeployStep::Router => "Router",
            DeployStep::OnRamp => "EVM2EVMOnRamp",
            DeployStep::CcipSenderReceiver => "CCIPSenderReceiver",
            DeployStep::RegCcipReceiver => "REGCCIPReceiver",
            DeployStep::RouterMock => "RouterMock",
        }
    }

    /// Group tag shared by related steps.
    pub const fn group(self) -> &'static str {
        match self {
            DeployStep::Reg => "reg",
            DeployStep::CcipSenderReceiver | DeployStep::RegCcipReceiver | DeployStep::RouterMock => {
                "ccip_reg"
            }
            _ => "ccip_chainlink",
        }
    }

    /// Artifact the step deploys.
    pub const fn artifact(self) -> &'static str {
        match self {
            DeployStep::Weth => "WETH9",
            DeployStep::RegCcipReceiver => "CCIPSenderReceiver",
            step => step.id(),
        }
    }

    /// `true` if any of `tags` names this step or its group. An empty tag
    /// list selects every step.
    pub fn matches<S: AsRef<str>>(self, tags: &[S]) -> bool {
        tags.is_empty()
            || tags
                .iter()
                .any(|tag| tag.as_ref() == self.id() || tag.as_ref() == self.group())
    }

    /// Runs this step and returns what it saved.
    pub async fn run(self, ctx: &DeploymentContext<'_>) -> Result<DeploymentRecord> {
        let deployer = ctx.deployer();
        let roles = &ctx.config.roles;

        match self {
            DeployStep::Reg => {
                let admin = roles.admin_or(deployer);
                let minter = roles.minter_or(deployer);
                let pauser = roles.pauser_or(deployer);
                let upgrader = roles.upgrader_or(deployer);

                ctx.deploy_proxy(
                    self.id(),
                    self.artifact(),
                    reg::initialize_calldata(admin, minter, pauser, upgrader),
                    addresses_json(&[admin, minter, pauser, upgrader]),
                )
                .await
            }
            DeployStep::Weth | DeployStep::LinkToken | DeployStep::RouterMock => {
                ctx.deploy(self.id(), self.artifact(), &[], Vec::new()).await
            }
            DeployStep::PriceRegistry => {
                let link_token = ctx.address_of("LinkToken").await?;
                let threshold = ctx.config.price_staleness_threshold;

                ctx.deploy(
                    self.id(),
                    self.artifact(),
                    &lane::price_registry_args(vec![deployer], vec![link_token], threshold),
                    vec![json!([deployer]), json!([link_token]), json!(threshold)],
                )
                .await
            }
            DeployStep::Arm => {
                let voter = [deployer, ctx.accounts.admin(), ctx.accounts.moderator()];
                let settings = ctx.config.arm;

                ctx.deploy(
                    self.id(),
                    self.artifact(),
                    &lane::arm_args(voter, settings),
                    vec![json!({
                        "voters": [[
                            voter[0],
                            voter[1],
                            voter[2],
                            settings.bless_vote_weight,
                            settings.curse_vote_weight,
                        ]],
                        "blessWeightThreshold": settings.bless_weight_threshold,
                        "curseWeightThreshold": settings.curse_weight_threshold,
                    })],
                )
                .await
            }
            DeployStep::ArmProxy => {
                let arm = ctx.address_of("ARM").await?;

                ctx.deploy(
                    self.id(),
                    self.artifact(),
                    &lane::arm_proxy_args(arm),
                    addresses_json(&[arm]),
                )
                .await
            }
            DeployStep::BurnMintTokenPool => {
                let token = ctx.address_of("REG").await?;
                let arm_proxy = ctx.address_of("ARMProxy").await?;

                ctx.deploy(
                    self.id(),
                    self.artifact(),
                    &lane::token_pool_args(token, Vec::new(), arm_proxy),
                    vec![json!(token), json!([]), json!(arm_proxy)],
                )
                .await
            }
            DeployStep::Router => {
                let weth = ctx.address_of("WETH").await?;
                let arm_proxy = ctx.address_of("ARMProxy").await?;

                ctx.deploy(
                    self.id(),
                    self.artifact(),
                    &lane::router_args(weth, arm_proxy),
                    addresses_json(&[weth, arm_proxy]),
                )
                .await
            }
            DeployStep::OnRamp => {
                let params = OnRampParams::builder()
                    .link_token(ctx.address_of("LinkToken").await?)
                    .wrapped_native(ctx.address_of("WETH").await?)
                    .source_chain_selector(ctx.config.source_chain_selector)
                    .destination_chain_selector(ctx.config.destination_chain_selector)
                    .arm_proxy(ctx.address_of("ARMProxy").await?)
                    .router(ctx.address_of("Router").await?)
                    .price_registry(ctx.address_of("PriceRegistry").await?)
                    .token(ctx.address_of("REG").await?)
                    .pool(ctx.address_of("BurnMintTokenPool").await?)
                    .nop(deployer)
                    .rate_limit_capacity(ctx.config.rate_limit_capacity)
                    .rate_limit_rate(ctx.config.rate_limit_rate)
                    .build();

                ctx.deploy(
                    self.id(),
                    self.artifact(),
                    &params.constructor_args(),
                    vec![json!({
                        "linkToken": params.link_token,
                        "chainSelector": params.source_chain_selector.to_string(),
                        "destChainSelector": params.destination_chain_selector.to_string(),
                        "armProxy": params.arm_proxy,
                        "router": params.router,
                        "priceRegistry": params.price_registry,
                        "tokensAndPools": [[params.token, params.pool]],
                    })],
                )
                .await
            }
            DeployStep::CcipSenderReceiver | DeployStep::RegCcipReceiver => {
                let router = match roles.router {
                    Some(router) => router,
                    None => ctx.address_of("Router").await?,
                };
                let admin = roles.admin_or(deployer);
                let pauser = roles.pauser_or(deployer);
                let upgrader = roles.upgrader_or(deployer);

                ctx.deploy_proxy(
                    self.id(),
                    self.artifact(),
                    ccip::initialize_calldata(admin, pauser, upgrader, router),
                    addresses_json(&[admin, pauser, upgrader, router]),
                )
                .await
            }
        }
    }
}

impl fmt::Display for DeployStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

fn addresses_json(addresses: &[Address]) -> Vec<serde_json::Value> {
    addresses.iter().map(|address| json!(address)).collect()
}

/// Runs deployment steps in their fixed order.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sequencer;

impl Sequencer {
    /// The steps a run with `tags` would execute, in order.
    pub fn plan<S: AsRef<str>>(tags: &[S]) -> Vec<DeployStep> {
        DeployStep::ALL
            .into_iter()
            .filter(|step| step.matches(tags))
            .collect()
    }

    /// Runs every step selected by `tags`, awaiting each before starting the
    /// next.
    ///
    /// The first failing step aborts the run and its error is returned
    /// unchanged. Nothing is retried and steps that already completed are
    /// not rolled back.
    pub async fn run<S: AsRef<str>>(
        ctx: &DeploymentContext<'_>,
        tags: &[S],
    ) -> Result<Vec<(DeployStep, DeploymentRecord)>> {
        let plan = Self::plan(tags);
        let chain_id = ctx.backend.chain_id().await?;
        let tag_names: Vec<&str> = tags.iter().map(AsRef::as_ref).collect();
        let span = spans::run_sequence(chain_id, &tag_names);

        async move {
            info!(
                chain_id = chain_id,
                steps = plan.len(),
                deployer = %ctx.deployer(),
                event = "deployment_started"
            );

            let mut deployed = Vec::with_capacity(plan.len());
            for (position, step) in plan.into_iter().enumerate() {
                let record = async {
                    step.run(ctx).await.inspect_err(|e| {
                        spans::record_error(e);
                        error!(
                            step = %step,
                            error = %e,
                            event = "deployment_step_failed"
                        );
                    })
                }
                .instrument(spans::deploy_step(step.id(), position))
                .await
                .inspect_err(|e| spans::record_error(e))?;

                info!(
                    step = %step,
                    address = %record.address,
                    implementation = ?record.implementation,
                    event = "deployment_step_completed"
                );
                deployed.push((step, record));
            }

            info!(deployed = deployed.len(), event = "deployment_completed");
            Ok(deployed)
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_full_plan_order() {
        let ids: Vec<&str> = Sequencer::plan::<&str>(&[])
            .into_iter()
            .map(DeployStep::id)
            .collect();
        insta::assert_debug_snapshot!(ids, @r###"
        [
            "REG",
            "WETH",
            "LinkToken",
            "PriceRegistry",
            "ARM",
            "ARMProxy",
            "BurnMintTokenPool",
            "Router",
            "EVM2EVMOnRamp",
            "CCIPSenderReceiver",
            "REGCCIPReceiver",
            "RouterMock",
        ]
        "###);
    }

    #[rstest]
    #[case(&["ARM"], &[DeployStep::Arm])]
    #[case(&["Router", "REG"], &[DeployStep::Reg, DeployStep::Router])]
    #[case(&["ccip_reg"], &[DeployStep::CcipSenderReceiver, DeployStep::RegCcipReceiver, DeployStep::RouterMock])]
    #[case(&["unknown"], &[])]
    fn test_plan_filters_by_tag(#[case] tags: &[&str], #[case] expected: &[DeployStep]) {
        assert_eq!(Sequencer::plan(tags), expected);
    }

    #[test]
    fn test_receiver_reuses_sender_artifact() {
        assert_eq!(DeployStep::RegCcipReceiver.artifact(), "CCIPSenderReceiver");
        assert_eq!(DeployStep::Weth.artifact(), "WETH9");
        assert_eq!(DeployStep::Router.artifact(), "Router");
    }
}
