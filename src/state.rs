use serde::{Deserialize, Serialize};

use crate::board::{Board, CellState};
use crate::hash::recompute_zobrist;
use crate::hex::HexPos;
use crate::rules::Ruleset;
use crate::types::{HexDir, Player};

/// A legal mutation of the board: place a fresh token, or spread an owned
/// stack along one of the six directions. Actions carry no player tag; the
/// actor is always the side to move on the state they are applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Spawn { cell: HexPos },
    Spread { cell: HexPos, dir: HexDir },
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Spawn { cell } => write!(f, "SPAWN{cell}"),
            Action::Spread { cell, dir } => write!(f, "SPREAD{cell} {dir}"),
        }
    }
}

/// Before/after record for a single cell touched by an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellMutation {
    pub cell: HexPos,
    pub prev: Option<CellState>,
    pub next: Option<CellState>,
}

/// The minimal reversible record of one applied action: the action itself
/// plus the before/after state of every cell it touched. Replaying `prev`
/// states restores the board exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardMutation {
    pub action: Action,
    pub cells: Vec<CellMutation>,
}

/// Full game state: cell map, side to move, the undo stack of mutation
/// records, and the incrementally maintained zobrist key.
///
/// The turn counter is defined as the history length; `undo` is available
/// exactly while the history is non-empty.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub rules: Ruleset,
    pub board: Board,
    pub to_move: Player,
    pub(crate) history: Vec<BoardMutation>,
    pub(crate) zobrist: u128,
}

impl GameState {
    /// Empty board, Red to move.
    pub fn new(rules: Ruleset) -> Self {
        let mut state = Self {
            rules,
            board: Board::new(rules.board_n),
            to_move: Player::Red,
            history: Vec::new(),
            zobrist: 0,
        };
        state.zobrist = recompute_zobrist(&state);
        state
    }

    /// Build a mid-game position directly, with an empty history and Red to
    /// move. Intended for tests and analysis seeds.
    ///
    /// # Panics
    /// If a position is out of bounds, duplicated, or a power is outside
    /// `1..=max_cell_power`.
    pub fn with_cells(rules: Ruleset, cells: &[(HexPos, Player, u8)]) -> Self {
        let mut state = Self::new(rules);
        for &(pos, owner, power) in cells {
            assert!(rules.contains(pos), "cell {pos} out of bounds");
            assert!(
                (1..=rules.max_cell_power).contains(&power),
                "power {power} at {pos} outside 1..={}",
                rules.max_cell_power
            );
            assert!(state.board.is_empty(pos), "duplicate cell {pos}");
            state.board.set(pos, Some(CellState::new(owner, power)));
        }
        state.zobrist = recompute_zobrist(&state);
        state
    }

    #[inline]
    pub fn turn_count(&self) -> u32 {
        self.history.len() as u32
    }

    #[inline]
    pub fn history(&self) -> &[BoardMutation] {
        &self.history
    }

    /// Cached zobrist key for the current position (cells, side to move,
    /// turn count).
    #[inline]
    pub fn zobrist_key(&self) -> u128 {
        self.zobrist
    }

    /// Complete, order-stable list of legal actions for the side to move:
    /// spawns over empty cells in row-major order (only while the board is
    /// under the total power cap), then one spread per owned cell per
    /// direction.
    ///
    /// Every returned action is accepted by `apply_action` on this state.
    /// An empty list signals a terminal-adjacent position; callers must not
    /// retry.
    pub fn legal_actions(&self) -> Vec<Action> {
        self.legal_actions_for(self.to_move)
    }

    /// Legal actions as if `side` were the side to move. The mobility
    /// feature of the evaluation uses this for the non-moving perspective.
    pub fn legal_actions_for(&self, side: Player) -> Vec<Action> {
        let spawns_open = self.board.total_power() < self.rules.max_total_power;
        let mut actions = Vec::with_capacity(
            if spawns_open { self.rules.cell_count() - self.board.occupied_count() } else { 0 }
                + 6 * self.board.token_count(side) as usize,
        );
        if spawns_open {
            for cell in self.board.positions() {
                if self.board.is_empty(cell) {
                    actions.push(Action::Spawn { cell });
                }
            }
        }
        for (cell, state) in self.board.occupied() {
            if state.owner == side {
                for dir in HexDir::all() {
                    actions.push(Action::Spread { cell, dir });
                }
            }
        }
        actions
    }

    /// True iff both sides have moved at least once and either a side has
    /// no power left or the turn limit is reached.
    pub fn is_terminal(&self) -> bool {
        let turns = self.turn_count();
        if turns < 2 {
            return false;
        }
        turns >= self.rules.max_turns
            || self.board.side_power(Player::Red) == 0
            || self.board.side_power(Player::Blue) == 0
    }

    /// Winning side at a terminal position: the higher-power side, and only
    /// when the power gap reaches `win_power_diff`; `None` is a draw.
    /// Meaningful only when `is_terminal()` holds.
    pub fn winner(&self) -> Option<Player> {
        let red = self.board.side_power(Player::Red);
        let blue = self.board.side_power(Player::Blue);
        let (leader, gap) = if red >= blue {
            (Player::Red, red - blue)
        } else {
            (Player::Blue, blue - red)
        };
        if gap >= self.rules.win_power_diff {
            Some(leader)
        } else {
            None
        }
    }
}

/// Free-function surface mirroring the harness-facing API.
#[inline]
pub fn legal_actions(state: &GameState) -> Vec<Action> {
    state.legal_actions()
}

#[inline]
pub fn is_terminal(state: &GameState) -> bool {
    state.is_terminal()
}
