//! Slot machine engine.
//!
//! Three reels draw independently from one weighted symbol set. Matches
//! pay in tiers, and a progressive jackpot pool grows with every spin
//! until three crowns claim it. The pool is the one piece of cross-round
//! mutable state any engine carries beyond the ledger.

use log::{debug, info};
use rand::distr::weighted::WeightedIndex;
use rand::distr::Distribution;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::config::SlotsConfig;
use crate::errors::{EngineResult, GameError};
use crate::ledger::{Chips, GameResult, Ledger, LedgerDelta, Outcome};

const XP_WIN: u64 = 20;
const XP_LOSS: u64 = 5;

/// Reel count of the machine.
pub const REELS: usize = 3;

/// Paytable symbols, cheapest first. Crown is the jackpot symbol.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Symbol {
    Apple,
    Banana,
    Grape,
    Orange,
    Cherry,
    Star,
    Diamond,
    Crown,
}

impl Symbol {
    pub const ALL: [Self; 8] = [
        Self::Apple,
        Self::Banana,
        Self::Grape,
        Self::Orange,
        Self::Cherry,
        Self::Star,
        Self::Diamond,
        Self::Crown,
    ];

    /// Three-of-a-kind stake multiplier.
    #[must_use]
    pub const fn multiplier(self) -> Chips {
        match self {
            Self::Apple => 2,
            Self::Banana => 3,
            Self::Grape => 4,
            Self::Orange => 5,
            Self::Cherry => 8,
            Self::Star => 15,
            Self::Diamond => 25,
            Self::Crown => 50,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Apple => "🍎",
            Self::Banana => "🍌",
            Self::Grape => "🍇",
            Self::Orange => "🍊",
            Self::Cherry => "🍒",
            Self::Star => "⭐",
            Self::Diamond => "💎",
            Self::Crown => "👑",
        };
        write!(f, "{repr}")
    }
}

/// One symbol per reel.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ReelResult(pub [Symbol; REELS]);

/// Which payout tier a draw landed in, evaluated in priority order.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum SpinTier {
    Jackpot,
    ThreeOfAKind(Symbol),
    TwoOfAKind(Symbol),
    Miss,
}

/// Result of one spin.
#[derive(Clone, Debug, PartialEq)]
pub struct SpinResult {
    pub reels: ReelResult,
    pub tier: SpinTier,
    /// Pool size after this spin's contribution.
    pub jackpot_pool: Chips,
    pub result: GameResult,
}

/// One slot machine for a single player.
#[derive(Debug)]
pub struct SlotMachine<R: Rng = StdRng> {
    config: SlotsConfig,
    ledger: Arc<Ledger>,
    rng: R,
    weights: WeightedIndex<u32>,
    jackpot_pool: Chips,
}

impl SlotMachine<StdRng> {
    pub fn new(config: SlotsConfig, ledger: Arc<Ledger>) -> EngineResult<Self> {
        Self::with_rng(config, ledger, StdRng::from_os_rng())
    }
}

impl<R: Rng> SlotMachine<R> {
    pub fn with_rng(config: SlotsConfig, ledger: Arc<Ledger>, rng: R) -> EngineResult<Self> {
        let weights = WeightedIndex::new(config.symbol_weights)
            .map_err(|e| GameError::InvalidConfiguration(e.to_string()))?;
        let jackpot_pool = config.jackpot_base;
        Ok(Self {
            config,
            ledger,
            rng,
            weights,
            jackpot_pool,
        })
    }

    /// Current progressive jackpot pool.
    #[must_use]
    pub const fn jackpot_pool(&self) -> Chips {
        self.jackpot_pool
    }

    /// Charge the stake, draw the reels, and settle.
    ///
    /// # Errors
    ///
    /// `InvalidStake` / `InsufficientFunds` before anything is drawn.
    pub fn spin(&mut self, stake: Chips) -> EngineResult<SpinResult> {
        self.config.stakes.validate(stake)?;
        self.ledger.debit(stake)?;

        let reels = ReelResult([self.draw(), self.draw(), self.draw()]);
        let tier = evaluate(&reels);
        let payout = match tier {
            SpinTier::Jackpot => {
                let pool = self.jackpot_pool;
                self.jackpot_pool = self.config.jackpot_base;
                info!("jackpot claimed: {pool} chips, pool reset");
                pool
            }
            SpinTier::ThreeOfAKind(symbol) => stake * symbol.multiplier(),
            SpinTier::TwoOfAKind(symbol) => stake * symbol.multiplier() / 2,
            SpinTier::Miss => 0,
        };
        // Every spin feeds the pool, the jackpot spin included; rounded
        // up so even the minimum stake contributes.
        let contribution =
            (stake * self.config.jackpot_contribution_pct as Chips).div_ceil(100);
        self.jackpot_pool += contribution;
        debug!("reels {reels:?} -> {tier:?}, pool now {}", self.jackpot_pool);

        let outcome = if payout > 0 { Outcome::Win } else { Outcome::Loss };
        let experience = if payout > 0 { XP_WIN } else { XP_LOSS };
        let delta = LedgerDelta::settlement(outcome, payout, experience);
        let account = self.ledger.apply(delta)?;
        Ok(SpinResult {
            reels,
            tier,
            jackpot_pool: self.jackpot_pool,
            result: GameResult {
                outcome,
                payout,
                delta,
                account,
            },
        })
    }

    fn draw(&mut self) -> Symbol {
        Symbol::ALL[self.weights.sample(&mut self.rng)]
    }
}

/// Classify a draw, highest tier first.
#[must_use]
pub fn evaluate(reels: &ReelResult) -> SpinTier {
    let [a, b, c] = reels.0;
    if a == b && b == c {
        if a == Symbol::Crown {
            return SpinTier::Jackpot;
        }
        return SpinTier::ThreeOfAKind(a);
    }
    if a == b || a == c {
        return SpinTier::TwoOfAKind(a);
    }
    if b == c {
        return SpinTier::TwoOfAKind(b);
    }
    SpinTier::Miss
}
