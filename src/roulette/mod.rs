//! Roulette engine.
//!
//! Stakes accumulate per selector until a spin resolves all of them
//! against a single drawn pocket. Selectors are not mutually exclusive:
//! one spin can pay a straight bet and a color bet at once.

use log::{debug, info, warn};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::config::RouletteConfig;
use crate::errors::{EngineResult, GameError};
use crate::ledger::{AccountSnapshot, Chips, GameResult, Ledger, LedgerDelta, Outcome};

const XP_WIN: u64 = 30;
const XP_LOSS: u64 = 10;

/// Total return on a straight hit: 35:1 winnings plus the stake back.
const STRAIGHT_RETURN: Chips = 36;

const RED_NUMBERS: [u8; 18] = [
    1, 3, 5, 7, 9, 12, 14, 16, 18, 19, 21, 23, 25, 27, 30, 32, 34, 36,
];

/// European wheels carry a single zero; American wheels add a double
/// zero pocket.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WheelLayout {
    #[default]
    European,
    American,
}

impl WheelLayout {
    #[must_use]
    pub const fn pockets(self) -> u32 {
        match self {
            Self::European => 37,
            Self::American => 38,
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum PocketColor {
    Red,
    Black,
    Green,
}

/// One labeled wheel position.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Pocket {
    Number(u8),
    DoubleZero,
}

impl Pocket {
    #[must_use]
    pub fn color(self) -> PocketColor {
        match self {
            Self::DoubleZero | Self::Number(0) => PocketColor::Green,
            Self::Number(n) if RED_NUMBERS.contains(&n) => PocketColor::Red,
            Self::Number(_) => PocketColor::Black,
        }
    }
}

impl fmt::Display for Pocket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::DoubleZero => write!(f, "00"),
        }
    }
}

/// The drawn position with its color attribute.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct WheelOutcome {
    pub pocket: Pocket,
    pub color: PocketColor,
}

/// Identifies which sub-bet a stake applies to.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum BetSelector {
    /// A single number, 0 through 36.
    Straight(u8),
    /// The American double zero as a straight bet.
    StraightDoubleZero,
    Red,
    Black,
    Even,
    Odd,
    /// 1-18.
    Low,
    /// 19-36.
    High,
}

impl BetSelector {
    /// Total return per staked chip when the selector matches.
    #[must_use]
    const fn return_ratio(self) -> Chips {
        match self {
            Self::Straight(_) | Self::StraightDoubleZero => STRAIGHT_RETURN,
            _ => 2,
        }
    }

    fn matches(self, outcome: &WheelOutcome) -> bool {
        match (self, outcome.pocket) {
            (Self::Straight(n), Pocket::Number(hit)) => n == hit,
            (Self::StraightDoubleZero, Pocket::DoubleZero) => true,
            (Self::Red, _) => outcome.color == PocketColor::Red,
            (Self::Black, _) => outcome.color == PocketColor::Black,
            (Self::Even, Pocket::Number(n)) => n != 0 && n % 2 == 0,
            (Self::Odd, Pocket::Number(n)) => n % 2 == 1,
            (Self::Low, Pocket::Number(n)) => (1..=18).contains(&n),
            (Self::High, Pocket::Number(n)) => (19..=36).contains(&n),
            _ => false,
        }
    }
}

/// Result of one spin: the drawn outcome plus the aggregated settlement.
#[derive(Clone, Debug, PartialEq)]
pub struct SpinResult {
    pub outcome: WheelOutcome,
    pub total_staked: Chips,
    pub result: GameResult,
}

/// One roulette table for a single player.
#[derive(Debug)]
pub struct RouletteWheel<R: Rng = StdRng> {
    config: RouletteConfig,
    ledger: Arc<Ledger>,
    rng: R,
    stakes: HashMap<BetSelector, Chips>,
}

impl RouletteWheel<StdRng> {
    #[must_use]
    pub fn new(config: RouletteConfig, ledger: Arc<Ledger>) -> Self {
        Self::with_rng(config, ledger, StdRng::from_os_rng())
    }
}

impl<R: Rng> RouletteWheel<R> {
    pub fn with_rng(config: RouletteConfig, ledger: Arc<Ledger>, rng: R) -> Self {
        Self {
            config,
            ledger,
            rng,
            stakes: HashMap::new(),
        }
    }

    /// Stakes currently riding on the next spin.
    #[must_use]
    pub fn placed_stakes(&self) -> &HashMap<BetSelector, Chips> {
        &self.stakes
    }

    /// Charge and place one stake. Repeated placements on the same
    /// selector accumulate.
    ///
    /// # Errors
    ///
    /// `InvalidAction` for a selector the wheel layout cannot hit,
    /// `InvalidStake` for out-of-bounds amounts, `InsufficientFunds`
    /// when the amount exceeds the balance. Nothing is charged on error.
    pub fn place_stake(
        &mut self,
        selector: BetSelector,
        amount: Chips,
    ) -> EngineResult<AccountSnapshot> {
        match selector {
            BetSelector::Straight(n) if n > 36 => return Err(GameError::InvalidAction),
            BetSelector::StraightDoubleZero
                if self.config.layout == WheelLayout::European =>
            {
                return Err(GameError::InvalidAction)
            }
            _ => {}
        }
        self.config.stakes.validate(amount)?;
        let snapshot = self.ledger.debit(amount)?;
        *self.stakes.entry(selector).or_insert(0) += amount;
        debug!("placed {amount} on {selector:?}");
        Ok(snapshot)
    }

    /// Draw one pocket and resolve every placed stake against it.
    ///
    /// # Errors
    ///
    /// `NoStakesPlaced` if nothing is riding; no side effect.
    pub fn spin(&mut self) -> EngineResult<SpinResult> {
        if self.stakes.is_empty() {
            return Err(GameError::NoStakesPlaced);
        }
        let outcome = self.draw();
        let total_staked: Chips = self.stakes.values().sum();
        let payout: Chips = self
            .stakes
            .iter()
            .filter(|(selector, _)| selector.matches(&outcome))
            .map(|(selector, stake)| stake * selector.return_ratio())
            .sum();
        self.stakes.clear();

        let outcome_kind = if payout > 0 { Outcome::Win } else { Outcome::Loss };
        let experience = if payout > 0 { XP_WIN } else { XP_LOSS };
        let delta = LedgerDelta::settlement(outcome_kind, payout, experience);
        let account = self.ledger.apply(delta)?;
        info!(
            "wheel landed on {} ({:?}): staked {total_staked}, paid {payout}",
            outcome.pocket, outcome.color
        );
        Ok(SpinResult {
            outcome,
            total_staked,
            result: GameResult {
                outcome: outcome_kind,
                payout,
                delta,
                account,
            },
        })
    }

    /// Refund all placed-but-unresolved stakes. Idempotent: with no
    /// stakes riding this is a no-op.
    pub fn clear_stakes(&mut self) -> AccountSnapshot {
        let total: Chips = self.stakes.values().sum();
        if total == 0 {
            return self.ledger.snapshot();
        }
        self.stakes.clear();
        warn!("refunding {total} chips of unresolved stakes");
        self.ledger.credit(total)
    }

    fn draw(&mut self) -> WheelOutcome {
        let index = self.rng.random_range(0..self.config.layout.pockets());
        let pocket = if index == 37 {
            Pocket::DoubleZero
        } else {
            Pocket::Number(index as u8)
        };
        WheelOutcome {
            pocket,
            color: pocket.color(),
        }
    }
}
