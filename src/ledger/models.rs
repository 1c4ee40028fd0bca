//! Ledger data models.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Type alias for whole chips. All stakes, payouts, and balances are
/// represented as whole chips; there are no fractional chips anywhere in
/// the engine.
pub type Chips = u64;

/// Default chip balance for a fresh account.
pub const DEFAULT_STARTING_BALANCE: Chips = 1_000;

/// Default experience required per level.
pub const DEFAULT_XP_PER_LEVEL: u64 = 100;

/// A player account.
///
/// The balance can never go negative: stakes are validated against it
/// before being charged, and settlement deltas only ever credit.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct WagerAccount {
    pub balance: Chips,
    pub level: u32,
    pub experience: u64,
    pub games_played: u64,
    pub games_won: u64,
}

impl WagerAccount {
    #[must_use]
    pub const fn new(balance: Chips) -> Self {
        Self {
            balance,
            level: 1,
            experience: 0,
            games_played: 0,
            games_won: 0,
        }
    }

    /// Fraction of played games won, in [0, 1].
    #[must_use]
    pub fn win_rate(&self) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        self.games_won as f64 / self.games_played as f64
    }
}

impl Default for WagerAccount {
    fn default() -> Self {
        Self::new(DEFAULT_STARTING_BALANCE)
    }
}

/// Point-in-time copy of the account returned by every ledger operation.
pub type AccountSnapshot = WagerAccount;

/// One settlement's worth of account mutation.
///
/// `balance_change` carries the payout (or a refund); the stake itself is
/// deducted separately at charge time, before any outcome is known.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct LedgerDelta {
    pub balance_change: i64,
    pub played_increment: bool,
    pub won_increment: bool,
    pub experience_change: u64,
}

impl LedgerDelta {
    /// Delta for a settled round: credit the payout, bump the played
    /// counter, and count the win if there is one.
    #[must_use]
    pub fn settlement(outcome: Outcome, payout: Chips, experience: u64) -> Self {
        Self {
            balance_change: payout as i64,
            played_increment: true,
            won_increment: outcome == Outcome::Win,
            experience_change: experience,
        }
    }
}

/// Win/loss classification of a settled round.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Outcome {
    Win,
    Loss,
    /// A tie; the stake is returned without gain or loss.
    Push,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Win => "win",
            Self::Loss => "loss",
            Self::Push => "push",
        };
        write!(f, "{repr}")
    }
}

/// The canonical output of every engine's resolution step.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct GameResult {
    pub outcome: Outcome,
    /// Chips returned to the player. Zero on a loss; the stake itself on
    /// a push.
    pub payout: Chips,
    /// The delta that was applied to the ledger for this settlement.
    pub delta: LedgerDelta,
    /// Account state after the delta was applied.
    pub account: AccountSnapshot,
}
