//! Mines engine.
//!
//! A fixed grid hides a constant number of hazards placed by uniform
//! sampling without replacement. Every safe reveal grows a progressive
//! multiplier derived from the fair odds of surviving that reveal; the
//! player cashes out at any time or loses everything to a hazard.

use log::{debug, info};
use rand::{rngs::StdRng, seq::index, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::config::MinesConfig;
use crate::errors::{EngineResult, GameError};
use crate::ledger::{Chips, GameResult, Ledger, LedgerDelta, Outcome};

#[derive(Clone, Copy, Debug, Default)]
struct Cell {
    hazard: bool,
    revealed: bool,
}

/// What the caller may know about one cell.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum CellView {
    Hidden,
    Gem,
    /// Only ever visible once the round has been lost.
    Hazard,
}

/// Caller-facing board state.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct BoardView {
    pub rows: usize,
    pub cols: usize,
    /// Row-major cell states.
    pub cells: Vec<CellView>,
    pub revealed_gems: usize,
    pub hazard_count: usize,
    pub multiplier: f64,
    pub round_active: bool,
}

/// Outcome of a reveal.
#[derive(Clone, Debug, PartialEq)]
pub enum RevealOutcome {
    /// Safe cell; the round continues with a larger multiplier.
    Gem(BoardView),
    /// Hazard hit; the round is lost and the full field is exposed.
    Hazard(GameResult),
    /// Every safe cell is now revealed; settled automatically as a win.
    Cleared(GameResult),
    /// The round had already ended; nothing changed.
    RoundOver(BoardView),
}

/// One mines board for a single player.
#[derive(Debug)]
pub struct MinesRound<R: Rng = StdRng> {
    config: MinesConfig,
    ledger: Arc<Ledger>,
    rng: R,
    cells: Vec<Cell>,
    hazard_count: usize,
    revealed_gems: usize,
    stake: Chips,
    active: bool,
}

impl MinesRound<StdRng> {
    #[must_use]
    pub fn new(config: MinesConfig, ledger: Arc<Ledger>) -> Self {
        Self::with_rng(config, ledger, StdRng::from_os_rng())
    }
}

impl<R: Rng> MinesRound<R> {
    pub fn with_rng(config: MinesConfig, ledger: Arc<Ledger>, rng: R) -> Self {
        Self {
            config,
            ledger,
            rng,
            cells: Vec::new(),
            hazard_count: 0,
            revealed_gems: 0,
            stake: 0,
            active: false,
        }
    }

    /// Charge the stake and lay out a fresh board.
    ///
    /// # Errors
    ///
    /// `InvalidAction` if a round is active or the hazard count is
    /// outside the configured range, `InvalidStake` / `InsufficientFunds`
    /// for stake problems. Nothing is charged on error.
    pub fn start(&mut self, stake: Chips, hazard_count: usize) -> EngineResult<BoardView> {
        if self.active {
            return Err(GameError::InvalidAction);
        }
        let cells = self.config.cells();
        if hazard_count < self.config.min_hazards
            || hazard_count > self.config.max_hazards
            || hazard_count >= cells
        {
            return Err(GameError::InvalidAction);
        }
        self.config.stakes.validate(stake)?;
        self.ledger.debit(stake)?;

        self.cells = vec![Cell::default(); cells];
        for hazard_index in index::sample(&mut self.rng, cells, hazard_count) {
            self.cells[hazard_index].hazard = true;
        }
        self.hazard_count = hazard_count;
        self.revealed_gems = 0;
        self.stake = stake;
        self.active = true;
        debug!("board started: {cells} cells, {hazard_count} hazards, stake {stake}");
        Ok(self.view())
    }

    /// Reveal one cell.
    ///
    /// A finished round is a no-op that just returns the current board.
    ///
    /// # Errors
    ///
    /// `InvalidCell` if the coordinates are out of range or the cell was
    /// already revealed; state is unchanged.
    pub fn reveal(&mut self, row: usize, col: usize) -> EngineResult<RevealOutcome> {
        if !self.active {
            return Ok(RevealOutcome::RoundOver(self.view()));
        }
        if row >= self.config.rows || col >= self.config.cols {
            return Err(GameError::InvalidCell { row, col });
        }
        let idx = row * self.config.cols + col;
        if self.cells[idx].revealed {
            return Err(GameError::InvalidCell { row, col });
        }
        self.cells[idx].revealed = true;

        if self.cells[idx].hazard {
            // Expose the whole field for display.
            for cell in self.cells.iter_mut().filter(|cell| cell.hazard) {
                cell.revealed = true;
            }
            self.active = false;
            let delta = LedgerDelta::settlement(Outcome::Loss, 0, 0);
            let account = self.ledger.apply(delta)?;
            info!("hazard hit after {} gems, stake {} lost", self.revealed_gems, self.stake);
            return Ok(RevealOutcome::Hazard(GameResult {
                outcome: Outcome::Loss,
                payout: 0,
                delta,
                account,
            }));
        }

        self.revealed_gems += 1;
        debug!(
            "gem {} revealed, multiplier {:.4}",
            self.revealed_gems,
            self.multiplier()
        );
        let safe_cells = self.config.cells() - self.hazard_count;
        if self.revealed_gems == safe_cells {
            // Nothing left to risk.
            return Ok(RevealOutcome::Cleared(self.settle_win()?));
        }
        Ok(RevealOutcome::Gem(self.view()))
    }

    /// Bank the current multiplier and end the round as a win.
    ///
    /// # Errors
    ///
    /// `InvalidAction` with no round active, `NothingToCashOut` before
    /// the first gem.
    pub fn cash_out(&mut self) -> EngineResult<GameResult> {
        if !self.active {
            return Err(GameError::InvalidAction);
        }
        if self.revealed_gems == 0 {
            return Err(GameError::NothingToCashOut);
        }
        self.settle_win()
    }

    /// Whether a started round has not yet been settled.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Progressive multiplier after the gems revealed so far.
    ///
    /// Fair odds of surviving reveal `i` on a board of `n` cells with
    /// `h` hazards are `(n - h - i) / (n - i)`; the multiplier is the
    /// product of their reciprocals, scaled once by the house edge. It
    /// strictly increases with every safe reveal and grows faster for
    /// more hazards.
    #[must_use]
    pub fn multiplier(&self) -> f64 {
        multiplier(
            self.config.cells(),
            self.hazard_count,
            self.revealed_gems,
            self.config.house_edge,
        )
    }

    #[must_use]
    pub fn view(&self) -> BoardView {
        BoardView {
            rows: self.config.rows,
            cols: self.config.cols,
            cells: self
                .cells
                .iter()
                .map(|cell| match (cell.revealed, cell.hazard) {
                    (false, _) => CellView::Hidden,
                    (true, false) => CellView::Gem,
                    (true, true) => CellView::Hazard,
                })
                .collect(),
            revealed_gems: self.revealed_gems,
            hazard_count: self.hazard_count,
            multiplier: self.multiplier(),
            round_active: self.active,
        }
    }

    fn settle_win(&mut self) -> EngineResult<GameResult> {
        self.active = false;
        let payout = (self.stake as f64 * self.multiplier()).floor() as Chips;
        let profit = payout.saturating_sub(self.stake);
        let delta = LedgerDelta::settlement(Outcome::Win, payout, profit / 10);
        let account = self.ledger.apply(delta)?;
        info!(
            "cashed out {} gems at {:.4}x for {payout} chips",
            self.revealed_gems,
            self.multiplier()
        );
        Ok(GameResult {
            outcome: Outcome::Win,
            payout,
            delta,
            account,
        })
    }
}

/// Standalone multiplier curve; see [`MinesRound::multiplier`].
#[must_use]
pub fn multiplier(cells: usize, hazards: usize, revealed: usize, house_edge: f64) -> f64 {
    let mut product = 1.0;
    for i in 0..revealed {
        product *= (cells - i) as f64 / (cells - hazards - i) as f64;
    }
    if revealed == 0 {
        1.0
    } else {
        (1.0 - house_edge) * product
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_with_seed(seed: u64) -> MinesRound<StdRng> {
        let ledger = Arc::new(Ledger::new(1_000, 100));
        MinesRound::with_rng(
            MinesConfig::default(),
            ledger,
            StdRng::seed_from_u64(seed),
        )
    }

    fn find_gem(round: &MinesRound<StdRng>) -> (usize, usize) {
        for row in 0..round.config.rows {
            for col in 0..round.config.cols {
                let idx = row * round.config.cols + col;
                if !round.cells[idx].hazard && !round.cells[idx].revealed {
                    return (row, col);
                }
            }
        }
        panic!("no unrevealed gem left");
    }

    #[test]
    fn test_start_places_exact_hazard_count() {
        let mut round = round_with_seed(1);
        round.start(100, 5).unwrap();
        let hazards = round.cells.iter().filter(|cell| cell.hazard).count();
        assert_eq!(hazards, 5);
        assert_eq!(round.cells.len(), 25);
        assert_eq!(round.ledger.snapshot().balance, 900);
    }

    #[test]
    fn test_start_rejects_bad_hazard_count() {
        let mut round = round_with_seed(1);
        assert_eq!(round.start(100, 0).unwrap_err(), GameError::InvalidAction);
        assert_eq!(round.start(100, 25).unwrap_err(), GameError::InvalidAction);
        assert_eq!(round.ledger.snapshot().balance, 1_000);
    }

    #[test]
    fn test_start_twice_is_invalid() {
        let mut round = round_with_seed(1);
        round.start(100, 3).unwrap();
        assert_eq!(round.start(100, 3).unwrap_err(), GameError::InvalidAction);
    }

    #[test]
    fn test_reveal_out_of_range() {
        let mut round = round_with_seed(1);
        round.start(100, 3).unwrap();
        assert_eq!(
            round.reveal(5, 0).unwrap_err(),
            GameError::InvalidCell { row: 5, col: 0 }
        );
    }

    #[test]
    fn test_reveal_same_cell_twice() {
        let mut round = round_with_seed(1);
        round.start(100, 1).unwrap();
        let (row, col) = find_gem(&round);
        assert!(matches!(
            round.reveal(row, col).unwrap(),
            RevealOutcome::Gem(_)
        ));
        assert_eq!(
            round.reveal(row, col).unwrap_err(),
            GameError::InvalidCell { row, col }
        );
    }

    #[test]
    fn test_cash_out_before_any_gem() {
        let mut round = round_with_seed(1);
        round.start(100, 3).unwrap();
        assert_eq!(round.cash_out().unwrap_err(), GameError::NothingToCashOut);
        assert_eq!(round.ledger.snapshot().balance, 900);
    }

    #[test]
    fn test_cash_out_without_round() {
        let mut round = round_with_seed(1);
        assert_eq!(round.cash_out().unwrap_err(), GameError::InvalidAction);
    }

    #[test]
    fn test_gem_then_cash_out_balance_identity() {
        let mut round = round_with_seed(2);
        let before = round.ledger.snapshot().balance;
        round.start(100, 3).unwrap();
        let (row, col) = find_gem(&round);
        round.reveal(row, col).unwrap();
        let result = round.cash_out().unwrap();
        assert_eq!(result.outcome, Outcome::Win);
        assert!(result.payout >= 100, "multiplier above 1 after one gem");
        assert_eq!(
            round.ledger.snapshot().balance,
            before - 100 + result.payout
        );
        assert_eq!(round.ledger.snapshot().games_won, 1);
    }

    #[test]
    fn test_hazard_reveals_whole_field() {
        for seed in 0..200 {
            let mut round = round_with_seed(seed);
            round.start(100, 24).unwrap();
            // With 24 hazards on 25 cells, (0, 0) is almost always one.
            if let RevealOutcome::Hazard(result) = round.reveal(0, 0).unwrap() {
                assert_eq!(result.outcome, Outcome::Loss);
                assert_eq!(result.payout, 0);
                let view = round.view();
                let shown = view
                    .cells
                    .iter()
                    .filter(|cell| **cell == CellView::Hazard)
                    .count();
                assert_eq!(shown, 24);
                assert!(!view.round_active);
                return;
            }
        }
        panic!("24/25 hazard never hit on first reveal across 200 seeds");
    }

    #[test]
    fn test_reveal_after_round_over_is_noop() {
        let mut round = round_with_seed(3);
        round.start(100, 3).unwrap();
        let (row, col) = find_gem(&round);
        round.reveal(row, col).unwrap();
        round.cash_out().unwrap();
        let balance = round.ledger.snapshot().balance;
        assert!(matches!(
            round.reveal(0, 0).unwrap(),
            RevealOutcome::RoundOver(_)
        ));
        assert_eq!(round.ledger.snapshot().balance, balance);
    }

    #[test]
    fn test_full_clear_settles_automatically() {
        let mut round = round_with_seed(4);
        round.start(100, 24).unwrap();
        // One safe cell: the first gem revealed clears the board.
        for row in 0..5 {
            for col in 0..5 {
                if !round.cells[row * 5 + col].hazard {
                    match round.reveal(row, col).unwrap() {
                        RevealOutcome::Cleared(result) => {
                            assert_eq!(result.outcome, Outcome::Win);
                            // Near-certain-loss odds: one gem pays ~24x.
                            assert!(result.payout > 2_000);
                            return;
                        }
                        other => panic!("expected Cleared, got {other:?}"),
                    }
                }
            }
        }
    }

    #[test]
    fn test_multiplier_strictly_increases_with_reveals() {
        for hazards in [1, 3, 5, 10, 24] {
            let safe = 25 - hazards;
            let mut last = multiplier(25, hazards, 0, 0.01);
            for revealed in 1..=safe {
                let current = multiplier(25, hazards, revealed, 0.01);
                assert!(
                    current > last,
                    "multiplier must grow: h={hazards} k={revealed}"
                );
                last = current;
            }
        }
    }

    #[test]
    fn test_multiplier_grows_faster_with_more_hazards() {
        for revealed in 1..=5 {
            let low = multiplier(25, 3, revealed, 0.01);
            let high = multiplier(25, 10, revealed, 0.01);
            assert!(high > low, "k={revealed}");
        }
    }

    #[test]
    fn test_multiplier_one_before_first_reveal() {
        assert_eq!(multiplier(25, 5, 0, 0.01), 1.0);
    }

    #[test]
    fn test_high_hazard_first_gem_pays_large() {
        // 24 hazards: surviving the 1-in-25 reveal is worth ~24.75x.
        let m = multiplier(25, 24, 1, 0.01);
        assert!(m > 20.0);
    }
}
