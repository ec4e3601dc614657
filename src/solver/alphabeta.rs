use std::time::{Duration, Instant};

use log::debug;
use rayon::prelude::*;

use crate::engine::apply::{apply_action, undo_action};
use crate::engine::score::{evaluate, Weights, WIN_SCORE};
use crate::errors::SearchError;
use crate::state::{Action, GameState};
use crate::types::Player;

use super::move_order::order_actions;
use super::tt::{Bound, InMemoryTT, TTEntry, TranspositionTable};
use super::{SearchLimits, SearchStats};

/// Outcome of one decision: the chosen first-ply action, its minimax value
/// from the mover's perspective, the depth that produced it, and counters.
#[derive(Debug, Clone, Copy)]
pub struct Decision {
    pub action: Action,
    pub value: f64,
    pub depth: u8,
    pub stats: SearchStats,
}

/// Scoped apply: pairs an `apply_action` with exactly one `undo_action`,
/// fired on every exit path out of the enclosing frame, pruning
/// short-circuits and deadline aborts included.
///
/// Engine errors inside the search are generator/engine pairing bugs, never
/// recoverable conditions, so both directions assert.
struct Applied<'a> {
    state: &'a mut GameState,
}

impl<'a> Applied<'a> {
    fn new(state: &'a mut GameState, action: Action) -> Self {
        apply_action(state, action).expect("move generator produced an action the engine rejected");
        Self { state }
    }
}

impl Drop for Applied<'_> {
    fn drop(&mut self) {
        undo_action(self.state).expect("apply/undo pairing lost during search");
    }
}

#[inline]
fn expired(deadline: Option<Instant>) -> bool {
    deadline.is_some_and(|d| Instant::now() >= d)
}

/// Depth-limited minimax with alpha-beta pruning over the move generator,
/// maximizing for `me`. Returns `None` when the deadline expires; the
/// deadline is only consulted between sibling expansions, never mid
/// apply/undo.
#[allow(clippy::too_many_arguments)]
fn alphabeta(
    state: &mut GameState,
    depth: u8,
    mut alpha: f64,
    mut beta: f64,
    me: Player,
    weights: &Weights,
    tt: &mut dyn TranspositionTable,
    deadline: Option<Instant>,
    stats: &mut SearchStats,
) -> Option<f64> {
    stats.nodes += 1;
    if depth == 0 || state.is_terminal() {
        return Some(evaluate(state, me, weights));
    }

    let key = state.zobrist_key();
    let mut tt_best = None;
    if let Some(entry) = tt.get(key) {
        stats.tt_hits += 1;
        tt_best = entry.best;
        if entry.depth >= depth {
            match entry.flag {
                Bound::Exact => return Some(entry.value),
                Bound::Lower if entry.value >= beta => return Some(entry.value),
                Bound::Upper if entry.value <= alpha => return Some(entry.value),
                _ => {}
            }
        }
    }

    let mut actions = state.legal_actions();
    if actions.is_empty() {
        // Degenerate stalemate: the mover cannot act but the game is not
        // terminal. Score statically; the root reports it as NoLegalMoves.
        return Some(evaluate(state, me, weights));
    }
    order_actions(&mut actions, tt_best);

    let (alpha0, beta0) = (alpha, beta);
    let maximizing = state.to_move == me;
    let mut best = if maximizing {
        f64::NEG_INFINITY
    } else {
        f64::INFINITY
    };
    let mut best_action = None;

    for action in actions {
        if expired(deadline) {
            return None;
        }
        let applied = Applied::new(state, action);
        let Some(value) = alphabeta(
            &mut *applied.state,
            depth - 1,
            alpha,
            beta,
            me,
            weights,
            tt,
            deadline,
            stats,
        ) else {
            return None;
        };
        drop(applied);

        if maximizing {
            if value > best {
                best = value;
                best_action = Some(action);
            }
            alpha = alpha.max(best);
        } else {
            if value < best {
                best = value;
                best_action = Some(action);
            }
            beta = beta.min(best);
        }
        if alpha >= beta {
            break;
        }
    }

    let flag = if best <= alpha0 {
        Bound::Upper
    } else if best >= beta0 {
        Bound::Lower
    } else {
        Bound::Exact
    };
    tt.put(
        key,
        TTEntry {
            value: best,
            depth,
            flag,
            best: best_action,
        },
    );
    Some(best)
}

#[derive(Debug, Clone, Copy)]
struct RootOutcome {
    action: Action,
    value: f64,
}

/// Root expansion: iterates candidates in raw generator order and keeps the
/// first action reaching the best value, so the tie-break is deterministic.
/// `None` means the deadline expired before this depth completed; the
/// partial result is discarded, never half-used.
fn search_root(
    state: &mut GameState,
    depth: u8,
    weights: &Weights,
    tt: &mut dyn TranspositionTable,
    deadline: Option<Instant>,
    stats: &mut SearchStats,
) -> Option<RootOutcome> {
    let me = state.to_move;
    let mut alpha = f64::NEG_INFINITY;
    let beta = f64::INFINITY;
    let mut best: Option<RootOutcome> = None;

    for action in state.legal_actions() {
        if expired(deadline) {
            return None;
        }
        let applied = Applied::new(state, action);
        let Some(value) = alphabeta(
            &mut *applied.state,
            depth - 1,
            alpha,
            beta,
            me,
            weights,
            tt,
            deadline,
            stats,
        ) else {
            return None;
        };
        drop(applied);

        let improved = match best {
            None => true,
            Some(b) => value > b.value,
        };
        if improved {
            best = Some(RootOutcome { action, value });
            alpha = alpha.max(value);
        }
    }
    best
}

/// Choose the best first-ply action for the side to move.
///
/// Without a time budget this is a single fixed-depth search. With one, it
/// runs iterative deepening (depth 1, 2, 3, ...) and returns the action of
/// the last depth that completed fully; depth 1 always runs to completion
/// so a decision exists even on a blown budget.
///
/// The search holds exclusive access to `state` for the whole decision and
/// restores it exactly before returning.
pub fn decide(
    state: &mut GameState,
    limits: SearchLimits,
    weights: &Weights,
) -> Result<Decision, SearchError> {
    let mover = state.to_move;
    if state.is_terminal() || state.legal_actions().is_empty() {
        return Err(SearchError::NoLegalMoves(mover));
    }

    let max_depth = limits.max_depth.max(1);
    let mut tt = InMemoryTT::with_capacity(1 << 16);
    let mut stats = SearchStats::default();
    let start = Instant::now();
    let deadline = limits.time_ms.map(|ms| start + Duration::from_millis(ms));

    if deadline.is_none() {
        let outcome = search_root(state, max_depth, weights, &mut tt, None, &mut stats)
            .expect("unbounded search cannot expire");
        return Ok(Decision {
            action: outcome.action,
            value: outcome.value,
            depth: max_depth,
            stats,
        });
    }

    let mut decision: Option<Decision> = None;
    for depth in 1..=max_depth {
        // Depth 1 ignores the deadline so a completed depth always exists.
        let dl = if depth == 1 { None } else { deadline };
        match search_root(state, depth, weights, &mut tt, dl, &mut stats) {
            Some(outcome) => {
                debug!(
                    "depth {depth} complete: {} value {:.1} ({} nodes)",
                    outcome.action, outcome.value, stats.nodes
                );
                decision = Some(Decision {
                    action: outcome.action,
                    value: outcome.value,
                    depth,
                    stats,
                });
                if outcome.value >= WIN_SCORE {
                    break;
                }
            }
            None => {
                debug!("deadline expired inside depth {depth}, discarding partial result");
                break;
            }
        }
    }

    let mut decision = decision.expect("depth 1 always completes");
    decision.stats = stats;
    Ok(decision)
}

/// Root-parallel variant: expands every root candidate on its own
/// deep-copied state with a full alpha-beta window below it, then takes a
/// deterministic argmax (value first, generator order as the tie-break).
///
/// In-place mutation is not shared across workers, so this trades memory
/// and some re-search for wall-clock speedup on wide roots.
pub fn decide_parallel(
    state: &GameState,
    depth: u8,
    weights: &Weights,
) -> Result<Decision, SearchError> {
    let mover = state.to_move;
    let actions = state.legal_actions();
    if state.is_terminal() || actions.is_empty() {
        return Err(SearchError::NoLegalMoves(mover));
    }
    let depth = depth.max(1);

    let results: Vec<(f64, SearchStats)> = actions
        .par_iter()
        .map(|&action| {
            let mut local = state.clone();
            let mut tt = InMemoryTT::with_capacity(1 << 14);
            let mut stats = SearchStats::default();
            let applied = Applied::new(&mut local, action);
            let value = alphabeta(
                &mut *applied.state,
                depth - 1,
                f64::NEG_INFINITY,
                f64::INFINITY,
                mover,
                weights,
                &mut tt,
                None,
                &mut stats,
            )
            .expect("unbounded search cannot expire");
            drop(applied);
            (value, stats)
        })
        .collect();

    let mut stats = SearchStats::default();
    let mut best_idx = 0;
    let mut best_value = f64::NEG_INFINITY;
    for (idx, (value, s)) in results.iter().enumerate() {
        stats.nodes += s.nodes;
        stats.tt_hits += s.tt_hits;
        if *value > best_value {
            best_value = *value;
            best_idx = idx;
        }
    }

    Ok(Decision {
        action: actions[best_idx],
        value: best_value,
        depth,
        stats,
    })
}
