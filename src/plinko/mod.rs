//! Plinko engine.
//!
//! No physics: a drop is one draw from a fixed discrete distribution
//! over the landing buckets. Weights follow the binomial row the peg
//! rows would produce, so the cheap center buckets are common and the
//! rich edge buckets rare.

use log::{debug, info};
use rand::distr::weighted::WeightedIndex;
use rand::distr::Distribution;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::sync::Arc;

use crate::config::PlinkoConfig;
use crate::errors::{EngineResult, GameError};
use crate::ledger::{Chips, GameResult, Ledger, LedgerDelta, Outcome};

const XP_WIN: u64 = 10;
const XP_LOSS: u64 = 5;

/// Result of one drop.
#[derive(Clone, Debug, PartialEq)]
pub struct DropResult {
    /// Landing bucket, left to right.
    pub bucket: usize,
    /// That bucket's multiplier in percent.
    pub multiplier_pct: u32,
    pub result: GameResult,
}

/// One plinko board for a single player.
#[derive(Debug)]
pub struct PlinkoBoard<R: Rng = StdRng> {
    config: PlinkoConfig,
    ledger: Arc<Ledger>,
    rng: R,
    buckets: WeightedIndex<u64>,
}

impl PlinkoBoard<StdRng> {
    pub fn new(config: PlinkoConfig, ledger: Arc<Ledger>) -> EngineResult<Self> {
        Self::with_rng(config, ledger, StdRng::from_os_rng())
    }
}

impl<R: Rng> PlinkoBoard<R> {
    pub fn with_rng(config: PlinkoConfig, ledger: Arc<Ledger>, rng: R) -> EngineResult<Self> {
        if config.bucket_multipliers_pct.len() != config.bucket_weights.len()
            || config.bucket_multipliers_pct.is_empty()
        {
            return Err(GameError::InvalidConfiguration(
                "bucket multipliers and weights must be non-empty and equal length"
                    .to_string(),
            ));
        }
        let buckets = WeightedIndex::new(config.bucket_weights.iter().copied())
            .map_err(|e| GameError::InvalidConfiguration(e.to_string()))?;
        Ok(Self {
            config,
            ledger,
            rng,
            buckets,
        })
    }

    /// Charge the stake, draw a bucket, and settle in one atomic action.
    ///
    /// # Errors
    ///
    /// `InvalidStake` / `InsufficientFunds` before anything is drawn.
    pub fn drop(&mut self, stake: Chips) -> EngineResult<DropResult> {
        self.config.stakes.validate(stake)?;
        self.ledger.debit(stake)?;

        let bucket = self.buckets.sample(&mut self.rng);
        let multiplier_pct = self.config.bucket_multipliers_pct[bucket];
        let payout = stake * multiplier_pct as Chips / 100;
        debug!("ball landed in bucket {bucket} ({multiplier_pct}%)");

        let outcome = match payout.cmp(&stake) {
            std::cmp::Ordering::Greater => Outcome::Win,
            std::cmp::Ordering::Equal => Outcome::Push,
            std::cmp::Ordering::Less => Outcome::Loss,
        };
        let experience = if outcome == Outcome::Win { XP_WIN } else { XP_LOSS };
        let delta = LedgerDelta::settlement(outcome, payout, experience);
        let account = self.ledger.apply(delta)?;
        info!("drop settled as {outcome}: staked {stake}, paid {payout}");
        Ok(DropResult {
            bucket,
            multiplier_pct,
            result: GameResult {
                outcome,
                payout,
                delta,
                account,
            },
        })
    }
}
