//! Reads the flat-text account file.
//!
//! One account per line, space-separated, no header:
//!
//! ```text
//! ID OWNER BALANCE                 plain account
//! ID OWNER BALANCE OVERDRAFT_MAX   overdraft account
//! ```
//!
//! Amounts are in the canonical `x.xx` form. Repeated spaces between fields
//! are tolerated on read; the writer always emits single spaces.

use crate::bank::account::{Account, AccountKind};
use crate::bank::{Bank, DuplicateAccountId};
use crate::money::Money;

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    /// A record is malformed: bad csv framing or an amount that doesn't
    /// parse.
    #[error("malformed account file: {0}")]
    Csv(#[from] csv::Error),

    /// A line with the wrong number of fields.
    #[error("line {line}: expected 3 or 4 fields, found {found}")]
    FieldCount { line: u64, found: usize },

    #[error(transparent)]
    Duplicate(#[from] DuplicateAccountId),
}

// I have an AccountRecord type because I can't directly deserialise into my
// "domain" type, i.e. Account: the on-disk shape (fourth field present or
// not) is a file-format concern, not something the rest of the code should
// reason about.
#[derive(Debug, Deserialize)]
struct AccountRecord {
    id: String,
    owner: String,
    balance: Money,
    overdraft_maximum: Option<Money>,
}

impl From<AccountRecord> for Account {
    fn from(record: AccountRecord) -> Self {
        let kind = match record.overdraft_maximum {
            Some(maximum) => AccountKind::Overdraft { maximum },
            None => AccountKind::Plain,
        };
        Account::new(record.id, record.owner, record.balance, kind)
    }
}

/// Load a bank from an account file.
///
/// The whole load fails on the first malformed record or duplicate
/// identifier. The file is the session's single source of truth, so a
/// partially loaded bank is worse than a startup error.
pub fn load(input: impl std::io::Read) -> Result<Bank, LoadError> {
    let buffered = std::io::BufReader::new(input);
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b' ')
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(buffered);

    let mut bank = Bank::new();
    for result in reader.records() {
        let record = result?;
        let line = record.position().map_or(0, |position| position.line());

        // Repeated spaces between fields show up as empty fields; drop them.
        let mut fields: csv::StringRecord =
            record.iter().filter(|field| !field.is_empty()).collect();
        if !(3..=4).contains(&fields.len()) {
            return Err(LoadError::FieldCount {
                line,
                found: fields.len(),
            });
        }

        // Pad plain-account lines to the full record shape; an empty
        // trailing field deserializes as None.
        if fields.len() == 3 {
            fields.push_field("");
        }

        let parsed: AccountRecord = fields.deserialize(None)?;
        bank.add_account(parsed.into())?;
    }

    Ok(bank)
}
