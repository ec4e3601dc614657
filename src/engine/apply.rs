use crate::board::CellState;
use crate::errors::{EmptyHistory, IllegalAction};
use crate::hash::{z_token_cell, z_token_to_move, z_token_turn};
use crate::state::{Action, BoardMutation, CellMutation, GameState};

/// Validate `action` for the side to move and compute its minimal mutation
/// record without touching the state.
///
/// Actions carry no player tag, so the actor is the side to move by
/// construction; a spread from a cell the mover does not own is the
/// wrong-actor case and is rejected as `UnownedSource`.
fn compute_mutation(state: &GameState, action: Action) -> Result<BoardMutation, IllegalAction> {
    let mover = state.to_move;
    let n = state.board.size();
    let cells = match action {
        Action::Spawn { cell } => {
            if !state.rules.contains(cell) {
                return Err(IllegalAction::OutOfBounds(cell));
            }
            if !state.board.is_empty(cell) {
                return Err(IllegalAction::Occupied(cell));
            }
            if state.board.total_power() >= state.rules.max_total_power {
                return Err(IllegalAction::PowerCapReached(state.rules.max_total_power));
            }
            vec![CellMutation {
                cell,
                prev: None,
                next: Some(CellState::new(mover, 1)),
            }]
        }
        Action::Spread { cell, dir } => {
            if !state.rules.contains(cell) {
                return Err(IllegalAction::OutOfBounds(cell));
            }
            let source = state
                .board
                .get(cell)
                .filter(|s| s.owner == mover)
                .ok_or(IllegalAction::UnownedSource(cell, mover))?;

            // One destination per step 1..=P. Derived rulesets keep
            // max_cell_power < n, making the wrapped destinations distinct;
            // aliased steps on other rulesets fold into one record so the
            // mutation list stays one-entry-per-cell.
            let mut cells = Vec::with_capacity(usize::from(source.power) + 1);
            cells.push(CellMutation {
                cell,
                prev: Some(source),
                next: None,
            });
            for step in 1..=source.power {
                let dest = cell.shift(dir, step, n);
                if let Some(existing) = cells.iter_mut().find(|cm| cm.cell == dest) {
                    let power = existing.next.map_or(0, |s| s.power) + 1;
                    existing.next = if power > state.rules.max_cell_power {
                        None
                    } else {
                        Some(CellState::new(mover, power))
                    };
                    continue;
                }
                let prev = state.board.get(dest);
                let power = prev.map_or(0, |s| s.power) + 1;
                // A stack pushed past the cell cap is removed outright.
                let next = if power > state.rules.max_cell_power {
                    None
                } else {
                    Some(CellState::new(mover, power))
                };
                cells.push(CellMutation { cell: dest, prev, next });
            }
            cells
        }
    };
    Ok(BoardMutation { action, cells })
}

/// Apply one action for the side to move: validates it, commits its mutation
/// record, pushes the record onto the history, and flips the turn. The
/// zobrist key is maintained incrementally alongside the cell writes.
pub fn apply_action(state: &mut GameState, action: Action) -> Result<(), IllegalAction> {
    let mutation = compute_mutation(state, action)?;
    let n = state.board.size();
    let turns = state.turn_count();

    for cm in &mutation.cells {
        if let Some(prev) = cm.prev {
            state.zobrist ^= z_token_cell(n, cm.cell, prev);
        }
        if let Some(next) = cm.next {
            state.zobrist ^= z_token_cell(n, cm.cell, next);
        }
        state.board.set(cm.cell, cm.next);
    }

    state.zobrist ^= z_token_to_move(state.to_move);
    state.to_move = state.to_move.opponent();
    state.zobrist ^= z_token_to_move(state.to_move);
    state.zobrist ^= z_token_turn(turns);
    state.zobrist ^= z_token_turn(turns + 1);

    state.history.push(mutation);
    Ok(())
}

/// Reverse the most recent action: pops its record, restores every touched
/// cell to its previous state, and flips the turn back. `EmptyHistory` when
/// nothing is recorded.
pub fn undo_action(state: &mut GameState) -> Result<(), EmptyHistory> {
    let mutation = state.history.pop().ok_or(EmptyHistory)?;
    let n = state.board.size();
    let turns = state.turn_count();

    for cm in &mutation.cells {
        if let Some(next) = cm.next {
            state.zobrist ^= z_token_cell(n, cm.cell, next);
        }
        if let Some(prev) = cm.prev {
            state.zobrist ^= z_token_cell(n, cm.cell, prev);
        }
        state.board.set(cm.cell, cm.prev);
    }

    state.zobrist ^= z_token_to_move(state.to_move);
    state.to_move = state.to_move.opponent();
    state.zobrist ^= z_token_to_move(state.to_move);
    state.zobrist ^= z_token_turn(turns + 1);
    state.zobrist ^= z_token_turn(turns);

    Ok(())
}
