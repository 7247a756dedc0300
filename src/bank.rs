//! The account store.
//!
//! A bank owns the full set of accounts for the session: populated once at
//! startup, searched and mutated in place while the session runs, then
//! serialized back out, sorted, at shutdown.

pub mod account;

use account::Account;

use std::fmt;
use thiserror::Error;

/// Identifiers are the store's lookup key, so two accounts can never share
/// one. Load fails fast on this instead of letting one account shadow the
/// other.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("duplicate account identifier: {0}")]
pub struct DuplicateAccountId(pub String);

/// An ordered collection of accounts, keyed by identifier.
///
/// A plain `Vec` rather than a map: the store has to expose a sorted order
/// for deterministic serialization, and at this scale a linear search is
/// all the lookup the session needs.
#[derive(Debug, Default)]
pub struct Bank {
    accounts: Vec<Account>,
}

impl Bank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an account, rejecting a duplicate identifier.
    pub fn add_account(&mut self, account: Account) -> Result<(), DuplicateAccountId> {
        if self.search(account.id()).is_some() {
            return Err(DuplicateAccountId(account.id().to_string()));
        }

        self.accounts.push(account);
        Ok(())
    }

    /// Linear scan, case-sensitive exact match. Identifiers are unique, so
    /// the first match is the only one.
    pub fn search(&self, id: &str) -> Option<&Account> {
        self.accounts.iter().find(|account| account.id() == id)
    }

    pub fn search_mut(&mut self, id: &str) -> Option<&mut Account> {
        self.accounts.iter_mut().find(|account| account.id() == id)
    }

    /// Sort ascending by identifier. Keys are unique, so an unstable sort
    /// is already deterministic, and sorting twice changes nothing.
    pub fn sort_accounts(&mut self) {
        self.accounts.sort_unstable_by(|a, b| a.id().cmp(b.id()));
    }

    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.iter()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

impl fmt::Display for Bank {
    /// One canonical account line per account, in the current internal
    /// order. Callers sort first.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for account in &self.accounts {
            writeln!(f, "{account}")?;
        }
        Ok(())
    }
}
