//! Mines: minefield reveal game with an incremental multiplier
//!
//! Five mines hide among twenty-five cells, sampled once at game start.
//! Each safe reveal raises the multiplier by a fixed step (+0.40x); the
//! formula depends only on the count of safe reveals, never on which
//! cells were picked. Hitting a mine forfeits the already-debited stake.
//! The layout stays hidden until the game ends, then may be disclosed.

use crate::config::MinesConfig;
use crate::errors::{WagerError, WagerResult};
use crate::games::types::MULTIPLIER_ONE;
use crate::rng::OutcomeSource;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MinesState {
    InProgress,
    Lost,
    CashedOut,
}

/// Result of one reveal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevealOutcome {
    pub is_mine: bool,
    /// Multiplier in hundredths after this reveal.
    pub multiplier: u64,
    /// Mine layout, present only once the game has ended.
    pub mines: Option<Vec<u8>>,
}

/// One player's minefield session
#[derive(Debug)]
pub struct MinesGame {
    pub account: u64,
    pub stake: u64,
    cells: u8,
    step_hundredths: u64,
    mines: HashSet<u8>,
    revealed: HashSet<u8>,
    state: MinesState,
}

impl MinesGame {
    /// Start a game: sample the configured number of distinct mine
    /// positions by rejection sampling (draw, discard repeats).
    pub fn start(account: u64, stake: u64, config: &MinesConfig, rng: &dyn OutcomeSource) -> Self {
        let mut mines = HashSet::with_capacity(config.mines as usize);
        while mines.len() < config.mines as usize {
            mines.insert(rng.pick(config.cells as u32) as u8);
        }

        Self {
            account,
            stake,
            cells: config.cells,
            step_hundredths: config.step_hundredths,
            mines,
            revealed: HashSet::new(),
            state: MinesState::InProgress,
        }
    }

    pub fn state(&self) -> MinesState {
        self.state
    }

    /// Current multiplier in hundredths: 100 + step x safe reveals.
    pub fn multiplier(&self) -> u64 {
        MULTIPLIER_ONE + self.step_hundredths * self.revealed.len() as u64
    }

    /// Mine layout, visible only after the game has ended.
    pub fn disclosed_mines(&self) -> Option<Vec<u8>> {
        match self.state {
            MinesState::InProgress => None,
            MinesState::Lost | MinesState::CashedOut => {
                let mut mines: Vec<u8> = self.mines.iter().copied().collect();
                mines.sort_unstable();
                Some(mines)
            }
        }
    }

    pub fn reveal(&mut self, cell: u8) -> WagerResult<RevealOutcome> {
        if self.state != MinesState::InProgress {
            return Err(WagerError::InvalidState("mines game is finished"));
        }
        if cell >= self.cells {
            return Err(WagerError::Validation(format!(
                "cell {} out of range (field has {} cells)",
                cell, self.cells
            )));
        }
        if self.revealed.contains(&cell) {
            return Err(WagerError::InvalidState("cell already revealed"));
        }

        if self.mines.contains(&cell) {
            self.state = MinesState::Lost;
            return Ok(RevealOutcome {
                is_mine: true,
                multiplier: self.multiplier(),
                mines: self.disclosed_mines(),
            });
        }

        self.revealed.insert(cell);
        Ok(RevealOutcome {
            is_mine: false,
            multiplier: self.multiplier(),
            mines: None,
        })
    }

    /// Lock in the current multiplier. Requires at least one safe reveal.
    /// Returns the multiplier; the coordinator computes and credits the
    /// payout.
    pub fn cash_out(&mut self) -> WagerResult<u64> {
        if self.state != MinesState::InProgress {
            return Err(WagerError::InvalidState("mines game is finished"));
        }
        if self.revealed.is_empty() {
            return Err(WagerError::InvalidState("no safe reveals to cash out"));
        }
        self.state = MinesState::CashedOut;
        Ok(self.multiplier())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{ScriptedSource, ThreadRngSource};

    fn config() -> MinesConfig {
        MinesConfig {
            cells: 25,
            mines: 5,
            step_hundredths: 40,
        }
    }

    /// Game with mines exactly at cells 0..=4. The script includes a
    /// repeat draw to exercise the rejection path.
    fn rigged_game(stake: u64) -> MinesGame {
        let cell = |c: u8| (c as f64 + 0.5) / 25.0;
        let rng = ScriptedSource::new([cell(0), cell(1), cell(1), cell(2), cell(3), cell(4)]);
        MinesGame::start(1, stake, &config(), &rng)
    }

    #[test]
    fn test_start_samples_distinct_mines() {
        let rng = ThreadRngSource;
        for _ in 0..100 {
            let game = MinesGame::start(1, 1_500, &config(), &rng);
            assert_eq!(game.mines.len(), 5);
            assert!(game.mines.iter().all(|&m| m < 25));
        }
    }

    #[test]
    fn test_multiplier_depends_only_on_reveal_count() {
        let mut game = rigged_game(1_000);
        assert_eq!(game.multiplier(), 100);

        // Three safe reveals from arbitrary non-mine cells -> 2.20x.
        game.reveal(10).unwrap();
        game.reveal(24).unwrap();
        let out = game.reveal(7).unwrap();
        assert!(!out.is_mine);
        assert_eq!(out.multiplier, 220);
    }

    #[test]
    fn test_layout_hidden_while_in_progress() {
        let mut game = rigged_game(1_000);
        assert_eq!(game.disclosed_mines(), None);
        let out = game.reveal(9).unwrap();
        assert_eq!(out.mines, None);
    }

    #[test]
    fn test_mine_hit_forfeits_and_discloses() {
        let mut game = rigged_game(1_000);
        game.reveal(10).unwrap();

        let out = game.reveal(2).unwrap();
        assert!(out.is_mine);
        assert_eq!(game.state(), MinesState::Lost);
        assert_eq!(out.mines, Some(vec![0, 1, 2, 3, 4]));

        // Finished game rejects everything, deterministically.
        assert!(matches!(game.reveal(11), Err(WagerError::InvalidState(_))));
        assert!(matches!(game.reveal(11), Err(WagerError::InvalidState(_))));
        assert!(matches!(game.cash_out(), Err(WagerError::InvalidState(_))));
    }

    #[test]
    fn test_double_reveal_rejected() {
        let mut game = rigged_game(1_000);
        game.reveal(10).unwrap();
        assert!(matches!(game.reveal(10), Err(WagerError::InvalidState(_))));
        // The rejection did not move the multiplier.
        assert_eq!(game.multiplier(), 140);
    }

    #[test]
    fn test_out_of_range_cell_rejected() {
        let mut game = rigged_game(1_000);
        assert!(matches!(game.reveal(25), Err(WagerError::Validation(_))));
    }

    #[test]
    fn test_cashout_requires_a_safe_reveal() {
        let mut game = rigged_game(1_000);
        assert!(matches!(game.cash_out(), Err(WagerError::InvalidState(_))));

        game.reveal(10).unwrap();
        let multiplier = game.cash_out().unwrap();
        assert_eq!(multiplier, 140);
        assert_eq!(game.state(), MinesState::CashedOut);
        assert_eq!(game.disclosed_mines(), Some(vec![0, 1, 2, 3, 4]));
    }
}
