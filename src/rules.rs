use serde::{Deserialize, Serialize};

use crate::hex::HexPos;

/// Ruleset constants for a single game.
///
/// Defaults follow the published Infexion ruleset: a 7x7 toroidal board,
/// per-cell power capped at `board_n - 1`, total power capped at `board_n^2`,
/// a `board_n^3` turn limit, and a winning power gap of 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ruleset {
    pub board_n: u8,
    pub max_cell_power: u8,
    pub max_total_power: u32,
    pub max_turns: u32,
    pub win_power_diff: u32,
}

impl Default for Ruleset {
    fn default() -> Self {
        Self::for_board(7)
    }
}

impl Ruleset {
    /// Derive the standard constants for a board of size `n`.
    ///
    /// `max_cell_power < board_n` holds for every derived ruleset, which
    /// guarantees that the destinations of a spread never alias each other
    /// on the torus.
    pub fn for_board(n: u8) -> Self {
        assert!(n >= 2, "board size must be at least 2");
        Self {
            board_n: n,
            max_cell_power: n - 1,
            max_total_power: u32::from(n) * u32::from(n),
            max_turns: u32::from(n) * u32::from(n) * u32::from(n),
            win_power_diff: 2,
        }
    }

    /// In-bounds predicate for validating target cells.
    #[inline]
    pub fn contains(&self, pos: HexPos) -> bool {
        pos.r < self.board_n && pos.q < self.board_n
    }

    /// Centre cell, the canonical opening spawn target.
    #[inline]
    pub fn center(&self) -> HexPos {
        HexPos::new(self.board_n / 2, self.board_n / 2)
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        usize::from(self.board_n) * usize::from(self.board_n)
    }
}
