// SPDX-FileCopyrightText: 2025 RealT
//
// SPDX-License-Identifier: Apache-2.0
//! OpenTelemetry span helpers for deployment and permit operations
//!
//! Span names are static and every field is structured, so a deployment run
//! renders as one `reg_ccip.deploy_step` span per step with the contract
//! creations and transactions it issued nested underneath.
//!
//! # Example
//!
//! ```rust,no_run
//! use reg_ccip::spans;
//!
//! let span = spans::deploy_step("REG", 1);
//! let _guard = span.enter();
//! // Your custom deployment logic here
//! ```

use alloy_primitives::{Address, TxHash};
use tracing::Span;

/// Create span for a single deployment step.
///
/// Parent: Top-level sequencer run
/// Children: reg_ccip.deploy_contract, reg_ccip.send_transaction
#[inline]
pub fn deploy_step(step_id: &str, position: usize) -> Span {
    tracing::info_span!(
        "reg_ccip.deploy_step",
        step_id = step_id,
        position = position,
        error.type = tracing::field::Empty,
        error.message = tracing::field::Empty,
        error.source = tracing::field::Empty,
        otel.status_code = "OK",
    )
}

/// Create span for a full sequencer run.
#[inline]
pub fn run_sequence(chain_id: u64, tags: &[&str]) -> Span {
    tracing::info_span!(
        "reg_ccip.run_sequence",
        chain_id = chain_id,
        tags = ?tags,
        error.type = tracing::field::Empty,
        error.message = tracing::field::Empty,
        error.source = tracing::field::Empty,
        otel.status_code = "OK",
    )
}

/// Create span for a contract-creation transaction.
///
/// Parent: reg_ccip.deploy_step
/// Children: Provider RPC calls
#[inline]
pub fn deploy_contract(contract_name: &str, from: &Address, init_code_len: usize) -> Span {
    tracing::debug_span!(
        "reg_ccip.deploy_contract",
        contract_name = contract_name,
        from = %from,
        init_code_bytes = init_code_len,
    )
}

/// Create span for a state-changing call against a deployed contract.
#[inline]
pub fn send_transaction(function: &str, to: &Address) -> Span {
    tracing::debug_span!(
        "reg_ccip.send_transaction",
        function = function,
        to = %to,
        tx_hash = tracing::field::Empty,
    )
}

/// Create span for waiting on a submitted transaction's receipt.
#[inline]
pub fn wait_for_receipt(tx_hash: TxHash) -> Span {
    tracing::trace_span!("reg_ccip.wait_for_receipt", tx_hash = %tx_hash)
}

/// Create span for resolving the open fields of a permit.
///
/// Parent: Caller's operation span
/// Children: Token `nonces`/`name` calls, chain id lookup
#[inline]
pub fn resolve_permit(owner: &Address, spender: &Address, token: &Address) -> Span {
    tracing::info_span!(
        "reg_ccip.resolve_permit",
        owner = %owner,
        spender = %spender,
        token = %token,
        error.type = tracing::field::Empty,
        error.message = tracing::field::Empty,
        otel.status_code = "OK",
    )
}

/// Create span for upgrading a UUPS proxy to a new implementation.
#[inline]
pub fn upgrade_proxy(name: &str, proxy: &Address) -> Span {
    tracing::info_span!(
        "reg_ccip.upgrade_proxy",
        name = name,
        proxy = %proxy,
        new_implementation = tracing::field::Empty,
        error.type = tracing::field::Empty,
        error.message = tracing::field::Empty,
        otel.status_code = "OK",
    )
}

/// Create span for a salted deployment through a CREATE2 factory.
///
/// Children: reg_ccip.send_transaction (implementation, then proxy)
#[inline]
pub fn deploy_create2(name: &str, factory: &Address) -> Span {
    tracing::info_span!(
        "reg_ccip.deploy_create2",
        name = name,
        factory = %factory,
        implementation = tracing::field::Empty,
        proxy = tracing::field::Empty,
        error.type = tracing::field::Empty,
        error.message = tracing::field::Empty,
        otel.status_code = "OK",
    )
}

/// Record error attributes on the current span.
///
/// Follows OpenTelemetry semantic conventions for error tracking:
/// - error.type: The error type/variant
/// - error.message: Human-readable error message
/// - error.source: The underlying cause, when there is one
pub fn record_error<E: std::error::Error>(error: &E) {
    let current_span = tracing::Span::current();
    current_span.record(
        "error.type",
        error.to_string().split(':').next().unwrap_or("Unknown"),
    );
    current_span.record("error.message", error.to_string());
    current_span.record("otel.status_code", "ERROR");

    if let Some(source) = error.source() {
        current_span.record("error.source", source.to_string());
    }
}
