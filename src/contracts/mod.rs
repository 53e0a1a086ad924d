// SPDX-FileCopyrightText: 2025 RealT
//
// SPDX-License-Identifier: Apache-2.0
//! Contract bindings
//!
//! Alloy-generated bindings for the contracts the deployment sequencer creates
//! and the permit flow talks to.
//!
//! ## Public API
//!
//! - [`RegTokenContract`](reg::RegTokenContract): the REG token, also the
//!   [`PermitToken`](crate::PermitToken) the permit builder reads from
//! - [`CcipSenderReceiverContract`](ccip::CcipSenderReceiverContract): CCIP
//!   transfers, including transfers backed by a permit
//! - [`create2`]: salted deployments through a CREATE2 factory
//! - [`proxy`]: ERC1967 proxy creation code, UUPS upgrades, implementation slot reads
//! - [`lane`]: constructor encodings and wiring calls for a Chainlink CCIP lane

pub mod ccip;
pub mod create2;
pub mod lane;
pub mod proxy;
pub mod reg;
