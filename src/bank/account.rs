use crate::money::Money;

use std::fmt;
use thiserror::Error;

/// Note: I chose to keep errors simple here.
/// The identifier is carried so failure reports can cite the account the
/// way the tellers' messages do.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransactionError {
    /// Funds (plus any overdraft allowance) do not cover the withdrawal.
    #[error("Insufficient funds in account ({0}).")]
    InsufficientFunds(String),
}

/// Withdrawal policy attached to each account. A tagged variant instead of
/// an inheritance hierarchy: one `withdraw` entry point dispatches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountKind {
    /// Withdrawals must be covered by the balance alone.
    Plain,

    /// Withdrawals may push the balance negative, down to `-maximum`.
    Overdraft { maximum: Money },
}

/// A single bank account: identifier (the store's unique key), owner name,
/// balance, and its withdrawal policy.
///
/// Accounts are created once at load, mutated in place by the session, and
/// serialized at shutdown through [`Display`](fmt::Display), which renders
/// the canonical persistence line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    id: String,
    owner: String,
    balance: Money,
    kind: AccountKind,
}

impl Account {
    pub fn new(
        id: impl Into<String>,
        owner: impl Into<String>,
        balance: Money,
        kind: AccountKind,
    ) -> Self {
        Self {
            id: id.into(),
            owner: owner.into(),
            balance,
            kind,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn balance(&self) -> Money {
        self.balance
    }

    pub fn kind(&self) -> AccountKind {
        self.kind
    }

    /// Deposits always succeed and return the new balance. Whether negative
    /// amounts are acceptable is the caller's policy decision, not the
    /// account's.
    pub fn deposit(&mut self, amount: Money) -> Money {
        self.balance = self.balance + amount;
        self.balance
    }

    /// Withdraw `amount`, dispatching on the account's policy. On success
    /// the new balance is returned; on failure the balance is untouched.
    pub fn withdraw(&mut self, amount: Money) -> Result<Money, TransactionError> {
        if !self.covers(amount) {
            return Err(TransactionError::InsufficientFunds(self.id.clone()));
        }

        self.balance = self.balance - amount;
        Ok(self.balance)
    }

    // An overdraft account bottoms out at -maximum, a plain one at zero.
    fn covers(&self, amount: Money) -> bool {
        match self.kind {
            AccountKind::Plain => self.balance >= amount,
            AccountKind::Overdraft { maximum } => self.balance + maximum >= amount,
        }
    }
}

impl fmt::Display for Account {
    /// The canonical persistence line: `ID OWNER BALANCE` for a plain
    /// account, with the overdraft maximum appended for an overdraft one.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.id, self.owner, self.balance)?;
        if let AccountKind::Overdraft { maximum } = self.kind {
            write!(f, " {maximum}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod withdrawal_tests {
    use super::{Account, AccountKind, TransactionError};
    use crate::money::Money;

    fn plain(balance: i64) -> Account {
        Account::new(
            "A1",
            "Alice",
            Money::from_hundredths(balance),
            AccountKind::Plain,
        )
    }

    fn overdraft(balance: i64, maximum: i64) -> Account {
        Account::new(
            "A2",
            "Amir",
            Money::from_hundredths(balance),
            AccountKind::Overdraft {
                maximum: Money::from_hundredths(maximum),
            },
        )
    }

    #[test]
    fn test_plain_withdrawal_ok() {
        let mut acc = plain(10000);

        let got = acc.withdraw(Money::from_hundredths(2500));
        assert_eq!(Ok(Money::from_hundredths(7500)), got);
        assert_eq!(Money::from_hundredths(7500), acc.balance());
    }

    #[test]
    fn test_plain_withdrawal_down_to_zero() {
        let mut acc = plain(10000);

        let got = acc.withdraw(Money::from_hundredths(10000));
        assert_eq!(Ok(Money::ZERO), got);
    }

    #[test]
    fn test_plain_withdrawal_not_enough_funds() {
        // Balance 100.00, withdraw 150.00: refused, balance untouched, and
        // the error cites the account.
        let mut acc = plain(10000);

        let got = acc.withdraw(Money::from_hundredths(15000));
        assert_eq!(
            Err(TransactionError::InsufficientFunds("A1".to_string())),
            got
        );
        assert_eq!(Money::from_hundredths(10000), acc.balance());
    }

    #[test]
    fn test_insufficient_funds_message_cites_account() {
        let err = TransactionError::InsufficientFunds("A1".to_string());
        assert_eq!("Insufficient funds in account (A1).", err.to_string());
    }

    #[test]
    fn test_overdraft_withdrawal_into_negative() {
        // Balance 50.00, overdraft maximum 20.00, withdraw 60.00: the
        // balance goes to -10.00.
        let mut acc = overdraft(5000, 2000);

        let got = acc.withdraw(Money::from_hundredths(6000));
        assert_eq!(Ok(Money::from_hundredths(-1000)), got);
        assert_eq!(Money::from_hundredths(-1000), acc.balance());
    }

    #[test]
    fn test_overdraft_withdrawal_boundary() {
        // Exactly balance + maximum succeeds and lands on -maximum...
        let mut acc = overdraft(5000, 2000);
        assert_eq!(
            Ok(Money::from_hundredths(-2000)),
            acc.withdraw(Money::from_hundredths(7000))
        );

        // ...one cent more is refused.
        let mut acc = overdraft(5000, 2000);
        assert_eq!(
            Err(TransactionError::InsufficientFunds("A2".to_string())),
            acc.withdraw(Money::from_hundredths(7001))
        );
        assert_eq!(Money::from_hundredths(5000), acc.balance());
    }
}
