// SPDX-FileCopyrightText: 2025 RealT
//
// SPDX-License-Identifier: Apache-2.0
//! AccessControl roles held on the REG token and the CCIP sender/receiver.

use alloy_primitives::{hex, keccak256, Address, B256};
use std::fmt;

/// A role identifier as OpenZeppelin AccessControl stores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// `0x00…00`; administers every other role.
    DefaultAdmin,
    Upgrader,
    Pauser,
    MinterGovernance,
    MinterBridge,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::DefaultAdmin,
        Role::Upgrader,
        Role::Pauser,
        Role::MinterGovernance,
        Role::MinterBridge,
    ];

    /// The Solidity constant name, e.g. `PAUSER_ROLE`.
    pub const fn name(self) -> &'static str {
        match self {
            Role::DefaultAdmin => "DEFAULT_ADMIN_ROLE",
            Role::Upgrader => "UPGRADER_ROLE",
            Role::Pauser => "PAUSER_ROLE",
            Role::MinterGovernance => "MINTER_GOVERNANCE_ROLE",
            Role::MinterBridge => "MINTER_BRIDGE_ROLE",
        }
    }

    /// The `bytes32` id: zero for the admin role, `keccak256(name)` otherwise.
    pub fn id(self) -> B256 {
        match self {
            Role::DefaultAdmin => B256::ZERO,
            role => keccak256(role.name()),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The revert string OpenZeppelin AccessControl (v4) produces when `account`
/// lacks `role`.
pub fn missing_role_reason(account: Address, role: Role) -> String {
    format!(
        "AccessControl: account {} is missing role {}",
        hex::encode_prefixed(account),
        hex::encode_prefixed(role.id())
    )
}
