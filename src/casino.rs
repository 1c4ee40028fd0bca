//! Casino facade: one ledger, five tables.

use enum_dispatch::enum_dispatch;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::blackjack::{BlackjackRound, RoundPhase};
use crate::config::CasinoSettings;
use crate::errors::EngineResult;
use crate::ledger::{AccountSnapshot, Ledger};
use crate::mines::MinesRound;
use crate::plinko::PlinkoBoard;
use crate::roulette::RouletteWheel;
use crate::slots::SlotMachine;

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum GameKind {
    Blackjack,
    Roulette,
    Mines,
    Slots,
    Plinko,
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Blackjack => "blackjack",
            Self::Roulette => "roulette",
            Self::Mines => "mines",
            Self::Slots => "slots",
            Self::Plinko => "plinko",
        };
        write!(f, "{repr}")
    }
}

/// Lobby-level view of any table.
#[enum_dispatch]
pub trait TableGame {
    fn kind(&self) -> GameKind;
    /// Whether chips are currently committed to an unresolved round.
    fn round_active(&self) -> bool;
}

impl TableGame for BlackjackRound {
    fn kind(&self) -> GameKind {
        GameKind::Blackjack
    }

    fn round_active(&self) -> bool {
        matches!(self.phase(), RoundPhase::PlayerTurn | RoundPhase::DealerTurn)
    }
}

impl TableGame for RouletteWheel {
    fn kind(&self) -> GameKind {
        GameKind::Roulette
    }

    fn round_active(&self) -> bool {
        !self.placed_stakes().is_empty()
    }
}

impl TableGame for MinesRound {
    fn kind(&self) -> GameKind {
        GameKind::Mines
    }

    fn round_active(&self) -> bool {
        self.is_active()
    }
}

impl TableGame for SlotMachine {
    fn kind(&self) -> GameKind {
        GameKind::Slots
    }

    // A spin settles atomically.
    fn round_active(&self) -> bool {
        false
    }
}

impl TableGame for PlinkoBoard {
    fn kind(&self) -> GameKind {
        GameKind::Plinko
    }

    fn round_active(&self) -> bool {
        false
    }
}

/// Any table, for callers that iterate the lobby.
#[enum_dispatch(TableGame)]
#[derive(Debug)]
pub enum AnyGame {
    Blackjack(BlackjackRound),
    Roulette(RouletteWheel),
    Mines(MinesRound),
    Slots(SlotMachine),
    Plinko(PlinkoBoard),
}

/// The whole floor: five engines sharing one player ledger.
#[derive(Debug)]
pub struct Casino {
    ledger: Arc<Ledger>,
    pub blackjack: BlackjackRound,
    pub roulette: RouletteWheel,
    pub mines: MinesRound,
    pub slots: SlotMachine,
    pub plinko: PlinkoBoard,
}

impl Casino {
    /// Build all engines from one settings object.
    ///
    /// # Errors
    ///
    /// `GameError::InvalidConfiguration` when a weight table is
    /// malformed.
    pub fn new(settings: CasinoSettings) -> EngineResult<Self> {
        let ledger = Arc::new(Ledger::new(
            settings.starting_balance,
            settings.xp_per_level,
        ));
        Ok(Self {
            blackjack: BlackjackRound::new(settings.blackjack, Arc::clone(&ledger)),
            roulette: RouletteWheel::new(settings.roulette, Arc::clone(&ledger)),
            mines: MinesRound::new(settings.mines, Arc::clone(&ledger)),
            slots: SlotMachine::new(settings.slots, Arc::clone(&ledger))?,
            plinko: PlinkoBoard::new(settings.plinko, Arc::clone(&ledger))?,
            ledger,
        })
    }

    /// Shared player ledger.
    #[must_use]
    pub fn ledger(&self) -> &Arc<Ledger> {
        &self.ledger
    }

    /// Current account state.
    #[must_use]
    pub fn account(&self) -> AccountSnapshot {
        self.ledger.snapshot()
    }
}

impl Default for Casino {
    fn default() -> Self {
        // Default settings carry well-formed weight tables.
        match Self::new(CasinoSettings::default()) {
            Ok(casino) => casino,
            Err(_) => unreachable!("default settings are always valid"),
        }
    }
}
