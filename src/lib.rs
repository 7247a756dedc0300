//! Single-user, file-backed ATM.
//!
//! The crate loads a flat-text list of accounts into a [`bank::Bank`], runs
//! one interactive teller [`session::Session`] against it, and writes the
//! sorted account list back out through [`output`]. Amounts never touch
//! floating point: see [`money::Money`].

pub mod bank;
pub mod input;
pub mod money;
pub mod output;
pub mod session;
