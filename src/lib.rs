//! # Casino Engine
//!
//! A wager-resolution engine for a suite of casino-style games sharing
//! one player economy: a chip balance, experience, and win/loss record.
//!
//! The crate contains no presentation code. Each game is an explicit
//! state machine exposing pure transition functions; a caller (UI, bot,
//! test harness) drives the transitions and renders the returned state.
//! Every settlement flows through one [`ledger::Ledger`], which applies
//! deltas atomically and keeps the balance non-negative by construction.
//!
//! ## Games
//!
//! - [`blackjack`]: soft-ace hand scoring, a deterministic dealer
//!   policy, and a betting/player-turn/dealer-turn/settled round FSM
//! - [`roulette`]: concurrent per-selector stakes resolved against a
//!   single drawn pocket
//! - [`mines`]: hidden hazards on a grid with a progressive fair-odds
//!   cash-out multiplier
//! - [`slots`]: weighted three-reel draws with a progressive jackpot
//!   pool
//! - [`plinko`]: one-shot weighted bucket multiplier
//!
//! Randomness is injected: every engine is generic over [`rand::Rng`]
//! with an OS-seeded default, so tests drive rounds with seeded RNGs.
//!
//! ## Example
//!
//! ```
//! use casino_engine::{Casino, CasinoSettings};
//!
//! let mut casino = Casino::new(CasinoSettings::default()).unwrap();
//! let drop = casino.plinko.drop(100).unwrap();
//! assert_eq!(
//!     casino.account().balance,
//!     1_000 - 100 + drop.result.payout,
//! );
//! ```

pub mod blackjack;
pub mod casino;
pub mod config;
pub mod errors;
pub mod ledger;
pub mod mines;
pub mod plinko;
pub mod roulette;
pub mod slots;

pub use casino::{AnyGame, Casino, GameKind, TableGame};
pub use config::{CasinoSettings, ShufflePolicy, StakeBounds};
pub use errors::{EngineResult, GameError};
pub use ledger::{
    AccountSnapshot, Chips, GameResult, Ledger, LedgerDelta, Outcome, WagerAccount,
};
