//! Engine configuration models.
//!
//! Everything tunable lives here and is consumed at engine construction;
//! resolution logic never reads hard-coded table values.

use serde::{Deserialize, Serialize};

use crate::errors::{EngineResult, GameError};
use crate::ledger::{Chips, DEFAULT_STARTING_BALANCE, DEFAULT_XP_PER_LEVEL};
use crate::roulette::WheelLayout;

/// Inclusive stake bounds for one game.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct StakeBounds {
    pub min: Chips,
    pub max: Chips,
}

impl StakeBounds {
    #[must_use]
    pub const fn new(min: Chips, max: Chips) -> Self {
        Self { min, max }
    }

    /// Validate a stake against the bounds.
    ///
    /// # Errors
    ///
    /// `GameError::InvalidStake` when the stake falls outside the range.
    pub fn validate(&self, stake: Chips) -> EngineResult<()> {
        if stake < self.min || stake > self.max {
            return Err(GameError::InvalidStake {
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

/// Whether the shoe persists for a whole round or is rebuilt per draw.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShufflePolicy {
    /// One freshly shuffled shoe per round; no duplicate cards within a
    /// round.
    #[default]
    PerRound,
    /// A fresh shuffled deck before every single draw. Duplicates across
    /// a round are possible.
    PerDraw,
}

/// Payout ratio for a natural (two-card 21), expressed as a fraction of
/// the stake paid on top of its return. The default 3:2 turns a 100-chip
/// stake into a 250-chip payout.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct NaturalPayout {
    pub numerator: u64,
    pub denominator: u64,
}

impl Default for NaturalPayout {
    fn default() -> Self {
        Self {
            numerator: 3,
            denominator: 2,
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct BlackjackConfig {
    pub stakes: StakeBounds,
    pub natural_payout: NaturalPayout,
    pub shuffle: ShufflePolicy,
    /// Dealer draws strictly below this score and stands at or above it.
    pub dealer_stand_score: u32,
}

impl Default for BlackjackConfig {
    fn default() -> Self {
        Self {
            stakes: StakeBounds::new(25, 5_000),
            natural_payout: NaturalPayout::default(),
            shuffle: ShufflePolicy::default(),
            dealer_stand_score: 17,
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct RouletteConfig {
    pub stakes: StakeBounds,
    pub layout: WheelLayout,
}

impl Default for RouletteConfig {
    fn default() -> Self {
        Self {
            stakes: StakeBounds::new(10, 5_000),
            layout: WheelLayout::European,
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct MinesConfig {
    pub stakes: StakeBounds,
    pub rows: usize,
    pub cols: usize,
    pub min_hazards: usize,
    pub max_hazards: usize,
    /// House take applied once to the fair-odds multiplier, in [0, 1).
    pub house_edge: f64,
}

impl MinesConfig {
    /// Total cell count of the board.
    #[must_use]
    pub const fn cells(&self) -> usize {
        self.rows * self.cols
    }
}

impl Default for MinesConfig {
    fn default() -> Self {
        Self {
            stakes: StakeBounds::new(1, 5_000),
            rows: 5,
            cols: 5,
            min_hazards: 1,
            max_hazards: 24,
            house_edge: 0.01,
        }
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct SlotsConfig {
    pub stakes: StakeBounds,
    /// Draw weight per symbol, in paytable order (cheapest first).
    pub symbol_weights: [u32; 8],
    pub jackpot_base: Chips,
    /// Percentage of every stake fed into the jackpot pool.
    pub jackpot_contribution_pct: u32,
}

impl Default for SlotsConfig {
    fn default() -> Self {
        Self {
            stakes: StakeBounds::new(5, 100),
            symbol_weights: [24, 20, 16, 13, 10, 4, 2, 1],
            jackpot_base: 50_000,
            jackpot_contribution_pct: 10,
        }
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct PlinkoConfig {
    pub stakes: StakeBounds,
    /// Bucket multipliers in percent, left to right.
    pub bucket_multipliers_pct: Vec<u32>,
    /// Relative landing weight per bucket.
    pub bucket_weights: Vec<u64>,
}

impl Default for PlinkoConfig {
    fn default() -> Self {
        Self {
            stakes: StakeBounds::new(1, 5_000),
            bucket_multipliers_pct: vec![
                500, 300, 200, 150, 100, 50, 20, 50, 100, 150, 200, 300, 500,
            ],
            // Binomial(12) row: the ball takes 12 left/right bounces.
            bucket_weights: vec![
                1, 12, 66, 220, 495, 792, 924, 792, 495, 220, 66, 12, 1,
            ],
        }
    }
}

/// Top-level settings consumed by [`crate::casino::Casino`].
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct CasinoSettings {
    pub starting_balance: Chips,
    pub xp_per_level: u64,
    pub blackjack: BlackjackConfig,
    pub roulette: RouletteConfig,
    pub mines: MinesConfig,
    pub slots: SlotsConfig,
    pub plinko: PlinkoConfig,
}

impl Default for CasinoSettings {
    fn default() -> Self {
        Self {
            starting_balance: DEFAULT_STARTING_BALANCE,
            xp_per_level: DEFAULT_XP_PER_LEVEL,
            blackjack: BlackjackConfig::default(),
            roulette: RouletteConfig::default(),
            mines: MinesConfig::default(),
            slots: SlotsConfig::default(),
            plinko: PlinkoConfig::default(),
        }
    }
}
