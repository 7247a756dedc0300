//! The interactive teller session.
//!
//! A small state machine over a pair of console streams: the identifier
//! stage loops until the user quits or names an account, then the
//! transaction stage loops over numbered transactions until the user quits.
//! Exactly one account is served per session.
//!
//! The session is generic over [`BufRead`]/[`Write`] so tests can drive it
//! with in-memory buffers instead of a terminal.

use crate::bank::Bank;
use crate::money::Money;

use std::io::{BufRead, Write};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("console i/o failed: {0}")]
    Io(#[from] std::io::Error),

    /// The console stream ended while a prompt was still waiting for input.
    #[error("unexpected end of input")]
    UnexpectedEof,
}

/// How the session ended. Persistence only happens after a completed
/// transaction stage; quitting at the identifier prompt skips it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    QuitAtSelection,
    Completed,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SessionOptions {
    /// Let a negative deposit through (an implicit withdrawal with no funds
    /// check) instead of rejecting it.
    pub allow_negative_deposit: bool,
}

pub struct Session<R, W> {
    input: R,
    output: W,
    options: SessionOptions,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, output: W, options: SessionOptions) -> Self {
        Self {
            input,
            output,
            options,
        }
    }

    /// Run the whole session against the given bank.
    pub fn run(&mut self, bank: &mut Bank) -> Result<Outcome, SessionError> {
        let id = match self.select_account(bank)? {
            Some(id) => id,
            None => return Ok(Outcome::QuitAtSelection),
        };

        self.transaction_loop(bank, &id)?;
        Ok(Outcome::Completed)
    }

    // Identifier stage. Unknown identifiers re-prompt; "quit" leaves the
    // session without selecting anything.
    fn select_account(&mut self, bank: &Bank) -> Result<Option<String>, SessionError> {
        loop {
            let id = self.prompt("Please enter your ID or 'quit': ")?;
            if id.eq_ignore_ascii_case("quit") {
                writeln!(self.output, "Thank you for using our ATM. Goodbye!")?;
                return Ok(None);
            }

            match bank.search(&id) {
                Some(account) => {
                    writeln!(self.output, "Account FOUND for ID: {id}")?;
                    writeln!(self.output, "{account}")?;
                    return Ok(Some(id));
                }
                None => writeln!(self.output, "Account NOT FOUND for ID: {id}")?,
            }
        }
    }

    // Transaction stage: one numbered transaction per iteration, until "4".
    fn transaction_loop(&mut self, bank: &mut Bank, id: &str) -> Result<(), SessionError> {
        loop {
            let choice = self
                .prompt(
                    "Please enter a transaction type \
                     (check balance (1) / deposit (2) / withdraw (3) / quit (4)): ",
                )?
                .to_lowercase();

            match choice.as_str() {
                "1" => self.check_balance(bank, id)?,
                "2" => self.deposit(bank, id)?,
                "3" => self.withdraw(bank, id)?,
                "4" => {
                    writeln!(self.output, "Thank you for using our ATM. Goodbye!")?;
                    return Ok(());
                }
                _ => writeln!(self.output, "Invalid transaction type: {choice}")?,
            }
        }
    }

    fn check_balance(&mut self, bank: &Bank, id: &str) -> Result<(), SessionError> {
        // The identifier was validated during selection.
        if let Some(account) = bank.search(id) {
            writeln!(self.output, "{account}")?;
        }
        Ok(())
    }

    fn deposit(&mut self, bank: &mut Bank, id: &str) -> Result<(), SessionError> {
        let amount = self.read_amount()?;
        if amount < Money::ZERO && !self.options.allow_negative_deposit {
            writeln!(self.output, "Deposit failed. Negative amounts are not allowed.")?;
            return Ok(());
        }

        if let Some(account) = bank.search_mut(id) {
            let balance = account.deposit(amount);
            writeln!(
                self.output,
                "Deposit successful. New balance for account ({id}): {balance}"
            )?;
        }
        Ok(())
    }

    fn withdraw(&mut self, bank: &mut Bank, id: &str) -> Result<(), SessionError> {
        let amount = self.read_amount()?;
        if let Some(account) = bank.search_mut(id) {
            match account.withdraw(amount) {
                Ok(balance) => writeln!(
                    self.output,
                    "Withdrawal successful. New balance for account ({id}): {balance}"
                )?,
                Err(err) => writeln!(self.output, "Withdrawal failed. {err}")?,
            }
        }
        Ok(())
    }

    // Unbounded retry as an explicit loop: bad input re-prompts forever, it
    // never aborts the session.
    fn read_amount(&mut self) -> Result<Money, SessionError> {
        loop {
            let line = self.prompt("Please enter the amount (in the format x.xx): ")?;
            match line.parse::<Money>() {
                Ok(amount) => return Ok(amount),
                Err(_) => writeln!(self.output, "Invalid input. Please try again.")?,
            }
        }
    }

    fn prompt(&mut self, text: &str) -> Result<String, SessionError> {
        write!(self.output, "{text}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(SessionError::UnexpectedEof);
        }
        Ok(line.trim().to_string())
    }
}
