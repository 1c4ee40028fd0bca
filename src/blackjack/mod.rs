//! Blackjack engine.
//!
//! Split the way the card game splits naturally: value types and the shoe
//! in [`entities`], the automated opponent in [`dealer`], and the
//! betting/player-turn/dealer-turn/settled state machine in [`round`].

pub mod dealer;
pub mod entities;
pub mod round;

pub use dealer::{DealerPolicy, DealerState};
pub use entities::{Card, Deck, Hand, Rank, Suit, BLACKJACK_SCORE};
pub use round::{BlackjackRound, RoundPhase, RoundProgress, RoundView};
