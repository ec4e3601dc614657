#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod agent;
pub mod board;
pub mod errors;
pub mod hash;
pub mod hex;
pub mod rng;
pub mod rules;
pub mod state;
pub mod types;

pub mod engine {
    pub mod apply;
    pub mod score;
}

pub mod solver;

// Re-exports: stable minimal API surface for external callers
pub use crate::agent::{Agent, Strategy};
pub use crate::board::{Board, CellState};
pub use crate::engine::apply::{apply_action, undo_action};
pub use crate::engine::score::{evaluate, load_weights_from_json, Weights, WIN_SCORE};
pub use crate::errors::{EmptyHistory, IllegalAction, ProtocolError, SearchError};
pub use crate::hash::{recompute_zobrist, zobrist_key};
pub use crate::hex::{toroidal_distance, HexPos};
pub use crate::rules::Ruleset;
pub use crate::solver::{decide, decide_parallel, Decision, SearchLimits, SearchStats};
pub use crate::state::{is_terminal, legal_actions, Action, BoardMutation, CellMutation, GameState};
pub use crate::types::{HexDir, Player};
