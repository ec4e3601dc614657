use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::hex::toroidal_distance;
use crate::state::GameState;
use crate::types::Player;

/// Saturating sentinel returned for decided terminal positions. Large enough
/// to dominate any linear blend of features at any depth.
pub const WIN_SCORE: f64 = 1_000_000.0;

/// Feature weights for the linear evaluation. An explicit configuration
/// value threaded into every call; any online adaptation returns an updated
/// `Weights`, it never mutates shared state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Weights {
    /// Own total power minus opponent total power.
    pub power: f64,
    /// Own cell count minus opponent cell count.
    pub tokens: f64,
    /// Highest single-stack power on our side.
    pub tallest: f64,
    /// Minimum torus distance between an own stack and an opponent stack;
    /// subtracted, so closing in on the opponent scores higher.
    pub proximity: f64,
    /// Candidate-action count for the perspective side. Off by default.
    pub mobility: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            power: 8.0,
            tokens: 5.0,
            tallest: 10.0,
            proximity: 1.0,
            mobility: 0.0,
        }
    }
}

/// Load weights from a JSON file. Missing fields fall back to the defaults.
pub fn load_weights_from_json<P: AsRef<Path>>(path: P) -> Result<Weights, String> {
    let data = std::fs::read_to_string(path.as_ref())
        .map_err(|e| format!("Failed to read weights file: {e}"))?;
    serde_json::from_str(&data).map_err(|e| format!("Failed to parse weights JSON: {e}"))
}

/// Minimum inter-stack distance between the two sides, 0 when either side
/// has no stacks.
fn closest_approach(state: &GameState, side: Player) -> u32 {
    let n = state.board.size();
    let opp = side.opponent();
    let mut best = u32::MAX;
    for (own_pos, own) in state.board.occupied() {
        if own.owner != side {
            continue;
        }
        for (opp_pos, other) in state.board.occupied() {
            if other.owner != opp {
                continue;
            }
            best = best.min(toroidal_distance(own_pos, opp_pos, n));
        }
    }
    if best == u32::MAX {
        0
    } else {
        best
    }
}

/// Static heuristic score of `state` from `side`'s perspective.
///
/// Terminal positions short-circuit to the saturating sentinels so that
/// decided outcomes always dominate heuristic noise; otherwise the score is
/// the weighted linear blend of the features described on [`Weights`].
pub fn evaluate(state: &GameState, side: Player, weights: &Weights) -> f64 {
    if state.is_terminal() {
        return match state.winner() {
            Some(winner) if winner == side => WIN_SCORE,
            Some(_) => -WIN_SCORE,
            None => 0.0,
        };
    }

    let opp = side.opponent();
    let power_diff =
        f64::from(state.board.side_power(side)) - f64::from(state.board.side_power(opp));
    let token_diff =
        f64::from(state.board.token_count(side)) - f64::from(state.board.token_count(opp));
    let tallest = f64::from(state.board.tallest_stack(side));

    let mut score = weights.power * power_diff
        + weights.tokens * token_diff
        + weights.tallest * tallest
        - weights.proximity * f64::from(closest_approach(state, side));
    if weights.mobility != 0.0 {
        score += weights.mobility * state.legal_actions_for(side).len() as f64;
    }
    score
}
