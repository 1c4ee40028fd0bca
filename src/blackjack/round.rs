//! Blackjack round state machine.

use log::{debug, info};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::dealer::{DealerPolicy, DealerState};
use super::entities::{Card, Deck, Hand};
use crate::config::{BlackjackConfig, ShufflePolicy};
use crate::errors::{EngineResult, GameError};
use crate::ledger::{Chips, GameResult, Ledger, LedgerDelta, Outcome};

const XP_WIN: u64 = 25;
const XP_OTHER: u64 = 10;

/// Round lifecycle. Dealing is transient inside `start`, so it never
/// shows up as an observable phase.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum RoundPhase {
    #[default]
    Betting,
    PlayerTurn,
    DealerTurn,
    Settled,
}

/// What the caller is allowed to see mid-round: the dealer's hole card
/// stays hidden until the dealer turn has run.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct RoundView {
    pub phase: RoundPhase,
    pub stake: Chips,
    pub player_cards: Vec<Card>,
    pub player_score: u32,
    pub dealer_upcard: Option<Card>,
    /// Full dealer hand; populated only once the round is settled.
    pub dealer_cards: Option<Vec<Card>>,
    pub dealer_score: Option<u32>,
}

/// Outcome of a transition that may or may not settle the round.
#[derive(Clone, Debug, PartialEq)]
pub enum RoundProgress {
    InPlay(RoundView),
    Settled(GameResult),
}

/// One blackjack table seat for a single player.
#[derive(Debug)]
pub struct BlackjackRound<R: Rng = StdRng> {
    config: BlackjackConfig,
    ledger: Arc<Ledger>,
    rng: R,
    deck: Deck,
    phase: RoundPhase,
    player: Hand,
    dealer: Hand,
    stake: Chips,
}

impl BlackjackRound<StdRng> {
    #[must_use]
    pub fn new(config: BlackjackConfig, ledger: Arc<Ledger>) -> Self {
        Self::with_rng(config, ledger, StdRng::from_os_rng())
    }
}

impl<R: Rng> BlackjackRound<R> {
    pub fn with_rng(config: BlackjackConfig, ledger: Arc<Ledger>, rng: R) -> Self {
        Self {
            config,
            ledger,
            rng,
            deck: Deck::default(),
            phase: RoundPhase::Betting,
            player: Hand::new(),
            dealer: Hand::new(),
            stake: 0,
        }
    }

    #[must_use]
    pub const fn phase(&self) -> RoundPhase {
        self.phase
    }

    /// Charge the stake and deal the opening hands.
    ///
    /// A player natural settles immediately: push against a dealer
    /// natural, otherwise paid at the configured ratio.
    ///
    /// # Errors
    ///
    /// `InvalidAction` if a round is already in play, `InvalidStake` for
    /// out-of-bounds stakes, `InsufficientFunds` if the stake exceeds the
    /// balance. Nothing is charged on any error.
    pub fn start(&mut self, stake: Chips) -> EngineResult<RoundProgress> {
        if matches!(self.phase, RoundPhase::PlayerTurn | RoundPhase::DealerTurn) {
            return Err(GameError::InvalidAction);
        }
        self.config.stakes.validate(stake)?;
        self.ledger.debit(stake)?;
        self.stake = stake;
        self.player.clear();
        self.dealer.clear();
        self.deck.shuffle(&mut self.rng);

        for _ in 0..2 {
            let player_card = self.draw();
            self.player.push(player_card);
            let dealer_card = self.draw();
            self.dealer.push(dealer_card);
        }
        debug!(
            "dealt player [{}] against dealer upcard {}",
            self.player,
            self.dealer.cards()[0]
        );

        if self.player.is_natural() {
            let result = if self.dealer.is_natural() {
                self.settle(Outcome::Push, self.stake)
            } else {
                let bonus =
                    self.stake * self.config.natural_payout.numerator
                        / self.config.natural_payout.denominator;
                self.settle(Outcome::Win, self.stake + bonus)
            }?;
            return Ok(RoundProgress::Settled(result));
        }

        self.phase = RoundPhase::PlayerTurn;
        Ok(RoundProgress::InPlay(self.view()))
    }

    /// Draw one card for the player. Busting settles the round as an
    /// immediate loss.
    ///
    /// # Errors
    ///
    /// `InvalidAction` outside the player turn; state and balance are
    /// untouched.
    pub fn hit(&mut self) -> EngineResult<RoundProgress> {
        if self.phase != RoundPhase::PlayerTurn {
            return Err(GameError::InvalidAction);
        }
        let card = self.draw();
        self.player.push(card);
        debug!("player drew {card}, score {}", self.player.score());
        if self.player.is_bust() {
            let result = self.settle(Outcome::Loss, 0)?;
            return Ok(RoundProgress::Settled(result));
        }
        Ok(RoundProgress::InPlay(self.view()))
    }

    /// End the player turn, run the dealer policy to a terminal state,
    /// and settle.
    ///
    /// # Errors
    ///
    /// `InvalidAction` outside the player turn.
    pub fn stand(&mut self) -> EngineResult<GameResult> {
        if self.phase != RoundPhase::PlayerTurn {
            return Err(GameError::InvalidAction);
        }
        self.phase = RoundPhase::DealerTurn;
        let mut policy = DealerPolicy::new(self.config.dealer_stand_score);
        policy.reveal_hole(&self.dealer);
        while policy.state() == DealerState::Drawing {
            let card = self.draw();
            self.dealer.push(card);
            policy.reveal_hole(&self.dealer);
            debug!("dealer drew {card}, score {}", self.dealer.score());
        }

        let player_score = self.player.score();
        let dealer_score = self.dealer.score();
        let (outcome, payout) = if policy.state() == DealerState::Busted
            || player_score > dealer_score
        {
            (Outcome::Win, self.stake * 2)
        } else if player_score < dealer_score {
            (Outcome::Loss, 0)
        } else {
            (Outcome::Push, self.stake)
        };
        self.settle(outcome, payout)
    }

    /// Caller-facing snapshot of the round.
    #[must_use]
    pub fn view(&self) -> RoundView {
        let settled = self.phase == RoundPhase::Settled;
        RoundView {
            phase: self.phase,
            stake: self.stake,
            player_cards: self.player.cards().to_vec(),
            player_score: self.player.score(),
            dealer_upcard: self.dealer.cards().first().copied(),
            dealer_cards: settled.then(|| self.dealer.cards().to_vec()),
            dealer_score: settled.then(|| self.dealer.score()),
        }
    }

    fn draw(&mut self) -> Card {
        if self.config.shuffle == ShufflePolicy::PerDraw {
            self.deck = Deck::default();
            self.deck.shuffle(&mut self.rng);
        }
        self.deck.deal()
    }

    fn settle(&mut self, outcome: Outcome, payout: Chips) -> EngineResult<GameResult> {
        self.phase = RoundPhase::Settled;
        let experience = if outcome == Outcome::Win { XP_WIN } else { XP_OTHER };
        let delta = LedgerDelta::settlement(outcome, payout, experience);
        let account = self.ledger.apply(delta)?;
        info!(
            "blackjack settled as {outcome}: player {} vs dealer {}, payout {payout}",
            self.player.score(),
            self.dealer.score()
        );
        Ok(GameResult {
            outcome,
            payout,
            delta,
            account,
        })
    }
}
