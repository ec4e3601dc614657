use thiserror::Error;

use crate::hex::HexPos;
use crate::types::Player;

/// Reasons an action is rejected by the engine.
///
/// Raised during search this indicates a move-generator bug and is treated
/// as fatal there; only externally reported actions surface it as a
/// recoverable condition (see [`ProtocolError`]).
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum IllegalAction {
    #[error("target cell {0} is out of bounds")]
    OutOfBounds(HexPos),
    #[error("spawn target {0} is occupied")]
    Occupied(HexPos),
    #[error("board is at the total power cap of {0}")]
    PowerCapReached(u32),
    #[error("spread source {0} is not owned by {1}")]
    UnownedSource(HexPos, Player),
}

/// Undo was requested with nothing recorded. During search this is an
/// apply/undo pairing bug and is fatal.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("undo with no recorded actions")]
pub struct EmptyHistory;

/// Errors raised by the decision layer.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    /// The game is over or the side to move has no legal action. The caller
    /// must treat this as a forfeit/pass signal, never retry the search.
    #[error("no legal actions for {0}")]
    NoLegalMoves(Player),
}

/// Fault in an externally reported action, distinct from internal invariant
/// violations: the harness surfaces it as a protocol error instead of
/// crashing.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("illegal reported action: {0}")]
    IllegalExternal(#[from] IllegalAction),
}
