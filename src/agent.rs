use log::{info, warn};
use rand::Rng;

use crate::engine::apply::{apply_action, undo_action};
use crate::engine::score::{evaluate, Weights};
use crate::errors::{ProtocolError, SearchError};
use crate::rng::rng_for_turn;
use crate::rules::Ruleset;
use crate::solver::{decide, SearchLimits};
use crate::state::{Action, GameState};
use crate::types::Player;

/// Move-choosing policy for an [`Agent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Alpha-beta search under [`SearchLimits`].
    Minimax,
    /// One-ply evaluation argmax.
    Greedy,
    /// Uniform choice over legal actions, reproducible for a fixed seed.
    Random { seed: u64 },
}

/// Harness-facing move-choosing agent.
///
/// Holds the local copy of the game state. The driving harness reports every
/// played action (both players', this agent's own included) through
/// [`Agent::apply_external_action`]; [`Agent::decide`] itself never commits
/// the chosen action.
#[derive(Debug)]
pub struct Agent {
    color: Player,
    state: GameState,
    weights: Weights,
    limits: SearchLimits,
    strategy: Strategy,
}

impl Agent {
    pub fn new(color: Player, rules: Ruleset) -> Self {
        Self {
            color,
            state: GameState::new(rules),
            weights: Weights::default(),
            limits: SearchLimits::default(),
            strategy: Strategy::Minimax,
        }
    }

    #[must_use]
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    #[must_use]
    pub fn with_weights(mut self, weights: Weights) -> Self {
        self.weights = weights;
        self
    }

    #[must_use]
    pub fn with_limits(mut self, limits: SearchLimits) -> Self {
        self.limits = limits;
        self
    }

    #[inline]
    pub fn color(&self) -> Player {
        self.color
    }

    #[inline]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Choose the next action for this agent's colour. Only meaningful on
    /// the agent's own turn.
    ///
    /// The game's very first turn short-circuits to the centre spawn; every
    /// later decision goes through the configured strategy. `NoLegalMoves`
    /// is surfaced to the harness as a forfeit signal.
    pub fn decide(&mut self) -> Result<Action, SearchError> {
        debug_assert_eq!(self.state.to_move, self.color, "decide out of turn");

        if self.state.turn_count() == 0 {
            let cell = self.state.rules.center();
            info!("{}: opening spawn at {cell}", self.color);
            return Ok(Action::Spawn { cell });
        }

        let started = std::time::Instant::now();
        let result = match self.strategy {
            Strategy::Minimax => decide(&mut self.state, self.limits, &self.weights).map(|d| {
                info!(
                    "{}: {} depth {} value {:.1} ({} nodes, {} tt hits) in {:?}",
                    self.color,
                    d.action,
                    d.depth,
                    d.value,
                    d.stats.nodes,
                    d.stats.tt_hits,
                    started.elapsed()
                );
                d.action
            }),
            Strategy::Greedy => self.greedy(),
            Strategy::Random { seed } => self.random(seed),
        };
        if let Err(SearchError::NoLegalMoves(side)) = result {
            warn!("{side}: no legal actions, forfeiting the decision");
        }
        result
    }

    /// Fold a reported action into the local state. An illegal action here
    /// is a harness-visible protocol fault, not an internal invariant
    /// violation.
    pub fn apply_external_action(&mut self, action: Action) -> Result<(), ProtocolError> {
        apply_action(&mut self.state, action)?;
        Ok(())
    }

    fn legal_or_forfeit(&self) -> Result<Vec<Action>, SearchError> {
        let actions = self.state.legal_actions();
        if self.state.is_terminal() || actions.is_empty() {
            return Err(SearchError::NoLegalMoves(self.color));
        }
        Ok(actions)
    }

    fn greedy(&mut self) -> Result<Action, SearchError> {
        let actions = self.legal_or_forfeit()?;
        let mut best: Option<(Action, f64)> = None;
        for action in actions {
            apply_action(&mut self.state, action).expect("generator produced illegal action");
            let value = evaluate(&self.state, self.color, &self.weights);
            undo_action(&mut self.state).expect("apply/undo pairing lost");
            let improved = match best {
                None => true,
                Some((_, bv)) => value > bv,
            };
            if improved {
                best = Some((action, value));
            }
        }
        Ok(best.expect("non-empty action list").0)
    }

    fn random(&self, seed: u64) -> Result<Action, SearchError> {
        let actions = self.legal_or_forfeit()?;
        let mut rng = rng_for_turn(seed, self.state.turn_count());
        let pick = rng.gen_range(0..actions.len());
        Ok(actions[pick])
    }
}
