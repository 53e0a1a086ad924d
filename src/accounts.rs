// SPDX-FileCopyrightText: 2025 RealT
//
// SPDX-License-Identifier: Apache-2.0
//! Logical account roles and their resolution to concrete addresses.
//!
//! Local and test environments hand out an ordered list of funded accounts;
//! the first four are given fixed roles and the rest are plain users.

use alloy_primitives::Address;
use std::fmt;

use crate::error::{RegCcipError, Result};

/// Logical account role used by deployment steps and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedAccount {
    Deployer,
    Admin,
    Moderator,
    Bridge,
}

impl NamedAccount {
    pub const ALL: [NamedAccount; 4] = [
        NamedAccount::Deployer,
        NamedAccount::Admin,
        NamedAccount::Moderator,
        NamedAccount::Bridge,
    ];

    /// Position of this role in the environment's account list.
    pub const fn index(self) -> usize {
        match self {
            NamedAccount::Deployer => 0,
            NamedAccount::Admin => 1,
            NamedAccount::Moderator => 2,
            NamedAccount::Bridge => 3,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            NamedAccount::Deployer => "deployer",
            NamedAccount::Admin => "admin",
            NamedAccount::Moderator => "moderator",
            NamedAccount::Bridge => "bridge",
        }
    }
}

impl fmt::Display for NamedAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named accounts for the current environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedAccounts {
    named: [Address; 4],
    users: Vec<Address>,
}

impl NamedAccounts {
    /// Assigns roles by position; accounts past the fourth become users.
    ///
    /// # Errors
    ///
    /// Returns [`RegCcipError::InvalidConfig`] if fewer than four accounts are
    /// available.
    pub fn from_accounts(accounts: &[Address]) -> Result<Self> {
        if accounts.len() < NamedAccount::ALL.len() {
            return Err(RegCcipError::InvalidConfig(format!(
                "need at least {} accounts for named roles, got {}",
                NamedAccount::ALL.len(),
                accounts.len()
            )));
        }

        let mut named = [Address::ZERO; 4];
        for role in NamedAccount::ALL {
            named[role.index()] = accounts[role.index()];
        }

        Ok(Self {
            named,
            users: accounts[NamedAccount::ALL.len()..].to_vec(),
        })
    }

    /// Uses one address for every role, as single-key production deploys do.
    pub fn single(account: Address) -> Self {
        Self {
            named: [account; 4],
            users: Vec::new(),
        }
    }

    pub fn get(&self, role: NamedAccount) -> Address {
        self.named[role.index()]
    }

    pub fn deployer(&self) -> Address {
        self.get(NamedAccount::Deployer)
    }

    pub fn admin(&self) -> Address {
        self.get(NamedAccount::Admin)
    }

    pub fn moderator(&self) -> Address {
        self.get(NamedAccount::Moderator)
    }

    pub fn bridge(&self) -> Address {
        self.get(NamedAccount::Bridge)
    }

    /// Accounts with no named role.
    pub fn users(&self) -> &[Address] {
        &self.users
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accounts(n: u8) -> Vec<Address> {
        (1..=n).map(Address::with_last_byte).collect()
    }

    #[test]
    fn test_roles_resolve_by_index() {
        let named = NamedAccounts::from_accounts(&accounts(6)).unwrap();
        assert_eq!(named.deployer(), Address::with_last_byte(1));
        assert_eq!(named.admin(), Address::with_last_byte(2));
        assert_eq!(named.moderator(), Address::with_last_byte(3));
        assert_eq!(named.bridge(), Address::with_last_byte(4));
        assert_eq!(
            named.users(),
            &[Address::with_last_byte(5), Address::with_last_byte(6)]
        );
    }

    #[test]
    fn test_too_few_accounts() {
        let result = NamedAccounts::from_accounts(&accounts(3));
        assert!(matches!(result, Err(RegCcipError::InvalidConfig(_))));
    }

    #[test]
    fn test_single_account_holds_every_role() {
        let account = Address::with_last_byte(9);
        let named = NamedAccounts::single(account);
        for role in NamedAccount::ALL {
            assert_eq!(named.get(role), account);
        }
        assert!(named.users().is_empty());
    }
}
