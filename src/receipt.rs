// SPDX-FileCopyrightText: 2025 RealT
//
// SPDX-License-Identifier: Apache-2.0
//! Network-agnostic view of a mined transaction.
//!
//! Backends reduce whatever receipt type their transport returns to a
//! [`TxOutcome`], which is all the deployment sequencer and the assertion
//! harness ever look at.

use alloy_primitives::{Address, Log, TxHash};
use alloy_rpc_types::{ReceiptEnvelope, TransactionReceipt};

/// The parts of a transaction receipt this crate consumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxOutcome {
    pub transaction_hash: TxHash,
    /// Set for contract-creation transactions.
    pub contract_address: Option<Address>,
    /// `true` when the transaction executed without reverting.
    pub status: bool,
    pub logs: Vec<Log>,
}

impl TxOutcome {
    /// Builds an outcome from an Ethereum JSON-RPC receipt.
    pub fn from_receipt(receipt: &TransactionReceipt) -> Self {
        Self {
            transaction_hash: receipt.transaction_hash,
            contract_address: receipt.contract_address,
            status: receipt.status(),
            logs: receipt_logs(receipt)
                .iter()
                .map(|log| log.inner.clone())
                .collect(),
        }
    }
}

fn receipt_logs(receipt: &TransactionReceipt) -> &[alloy_rpc_types::Log] {
    match &receipt.inner {
        ReceiptEnvelope::Eip1559(r) => &r.receipt.logs,
        ReceiptEnvelope::Eip2930(r) => &r.receipt.logs,
        ReceiptEnvelope::Legacy(r) => &r.receipt.logs,
        ReceiptEnvelope::Eip4844(r) => &r.receipt.logs,
        ReceiptEnvelope::Eip7702(r) => &r.receipt.logs,
    }
}
