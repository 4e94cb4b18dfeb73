//! Pull mechanic: undo a push that left a box stuck.
//!
//! After the player moves in `d` and lands on `p`, the box that was just
//! pushed sits at `p + d`. A pull puts the box back on `p` and steps the
//! player back to `p - d`, the cell it came from.
//!
//! Pulls need an anchor: the cell behind the box (`p + 2d`) must be a
//! wall, the gate, another plain box or the key. Boxes already on a
//! target are never pulled.

use tracing::trace;

use crate::core::{Cell, Direction, GameState};

use super::stuck::is_box_stuck;

/// Pull the box ahead of the player back by one cell.
///
/// Returns the new state, or `None` when the pull does not apply. The
/// input state is never modified.
#[must_use]
pub fn apply_pull(state: &GameState, direction: Direction) -> Option<GameState> {
    let player = state.player();
    let box_pos = player.offset(direction);

    if state.cell_at(box_pos) != Some(Cell::Box) {
        trace!(%direction, "pull rejected: no plain box ahead");
        return None;
    }

    let anchor = state.cell_at(box_pos.offset(direction))?;
    if !anchor.anchors_pull() {
        trace!(%direction, ?anchor, "pull rejected: no anchor behind box");
        return None;
    }

    let retreat = player.offset(direction.opposite());
    if !state.cell_at(retreat).is_some_and(Cell::is_floor) {
        trace!(%direction, %retreat, "pull rejected: retreat cell occupied");
        return None;
    }

    let mut pulled = state.clone();
    let landed = if pulled.is_target(player) {
        Cell::BoxOnTarget
    } else {
        Cell::Box
    };
    pulled.set(player, landed);
    pulled.set(box_pos, pulled.cell_under(box_pos));
    pulled.place_player(retreat);
    pulled.reveal_key_if_ready();

    trace!(%direction, from = %box_pos, to = %player, "box pulled");
    Some(pulled)
}

/// Pull the box ahead if the last move in `direction` left it stuck.
///
/// `None` means either nothing is stuck or the pull does not apply; in
/// both cases the caller keeps its current state.
#[must_use]
pub fn pull_if_stuck(state: &GameState, direction: Direction) -> Option<GameState> {
    if is_box_stuck(state, direction) {
        apply_pull(state, direction)
    } else {
        None
    }
}
