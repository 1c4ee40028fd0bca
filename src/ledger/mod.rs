//! Player ledger - the single mutation point for chips, experience, and
//! win/loss counters.
//!
//! All five game engines settle through one [`Ledger`] instance. Stakes are
//! charged with [`Ledger::debit`], which validates and deducts inside a
//! single critical section, and settlements are folded in with
//! [`Ledger::apply`].

pub mod manager;
pub mod models;

pub use manager::Ledger;
pub use models::{
    AccountSnapshot, Chips, GameResult, LedgerDelta, Outcome, WagerAccount,
    DEFAULT_STARTING_BALANCE, DEFAULT_XP_PER_LEVEL,
};
