use crate::state::Action;

/// Hoist the TT-suggested action to the front, keeping the generator order
/// of everything else intact.
///
/// Used at interior nodes only: ordering there affects pruning efficiency
/// but never the minimax value. The root always iterates in raw generator
/// order so that the first-encountered-best tie-break stays deterministic.
#[inline]
pub fn order_actions(actions: &mut [Action], tt_best: Option<Action>) {
    if let Some(best) = tt_best {
        if let Some(pos) = actions.iter().position(|a| *a == best) {
            actions[..=pos].rotate_right(1);
        }
    }
}
