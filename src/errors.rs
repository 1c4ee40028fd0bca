//! Engine error types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ledger::Chips;

/// Errors that can occur during wager operations.
///
/// Every variant is recoverable and leaves engine and ledger state
/// unchanged: no partial charge, no partial reveal.
#[derive(Clone, Debug, Deserialize, Error, PartialEq, Serialize)]
pub enum GameError {
    #[error("need {required} chips but only {available} available")]
    InsufficientFunds { available: Chips, required: Chips },
    #[error("invalid action for the current round state")]
    InvalidAction,
    #[error("stake must be between {min} and {max} chips")]
    InvalidStake { min: Chips, max: Chips },
    #[error("cell ({row}, {col}) is out of range or already revealed")]
    InvalidCell { row: usize, col: usize },
    #[error("no stakes placed")]
    NoStakesPlaced,
    #[error("nothing to cash out")]
    NothingToCashOut,
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, GameError>;
