// SPDX-FileCopyrightText: 2025 RealT
//
// SPDX-License-Identifier: Apache-2.0
//! Production implementations of the [`crate::traits`] seams.
//!
//! Deployment scripts and permit signing against a live node use these;
//! tests use the fakes in [`crate::testing`].

mod alloy;

pub use self::alloy::AlloyBackend;
