//! Dealer policy state machine.
//!
//! The automated opponent is fully deterministic given the shoe order:
//! reveal the hole card, then draw while below the stand score and stop
//! at or above it. No player input affects it.

use serde::{Deserialize, Serialize};

use super::entities::{Deck, Hand, BLACKJACK_SCORE};

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum DealerState {
    /// Hole card still face down; the player is acting.
    AwaitingHoleCard,
    Drawing,
    Standing,
    Busted,
}

impl DealerState {
    /// Terminal states end the dealer turn.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Standing | Self::Busted)
    }
}

/// Drives a dealer hand to a terminal state.
#[derive(Clone, Copy, Debug)]
pub struct DealerPolicy {
    stand_score: u32,
    state: DealerState,
}

impl DealerPolicy {
    #[must_use]
    pub const fn new(stand_score: u32) -> Self {
        Self {
            stand_score,
            state: DealerState::AwaitingHoleCard,
        }
    }

    #[must_use]
    pub const fn state(&self) -> DealerState {
        self.state
    }

    /// Reveal the hole card and classify the starting hand.
    pub fn reveal_hole(&mut self, hand: &Hand) -> DealerState {
        self.state = self.classify(hand);
        self.state
    }

    /// Advance by one transition: draw a single card if still drawing.
    ///
    /// The score is non-decreasing with every draw and the shoe is
    /// finite, so repeated stepping always halts.
    pub fn step(&mut self, hand: &mut Hand, deck: &mut Deck) -> DealerState {
        if self.state == DealerState::Drawing {
            hand.push(deck.deal());
            self.state = self.classify(hand);
        }
        self.state
    }

    /// Run to a terminal state.
    pub fn run(&mut self, hand: &mut Hand, deck: &mut Deck) -> DealerState {
        if self.state == DealerState::AwaitingHoleCard {
            self.reveal_hole(hand);
        }
        while !self.state.is_terminal() {
            self.step(hand, deck);
        }
        self.state
    }

    fn classify(&self, hand: &Hand) -> DealerState {
        let score = hand.score();
        if score > BLACKJACK_SCORE {
            DealerState::Busted
        } else if score >= self.stand_score {
            DealerState::Standing
        } else {
            DealerState::Drawing
        }
    }
}
