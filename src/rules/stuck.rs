//! Stuck-box detection.
//!
//! A side of a box is blocked when the neighbouring cell is a wall,
//! another box (placed or not), or off the board. The player, the gate
//! and the key do not block.

use smallvec::SmallVec;

use crate::core::{Cell, Direction, GameState, Position};

/// Is the neighbour of `pos` in `direction` blocking?
#[must_use]
pub fn is_side_blocked(state: &GameState, pos: Position, direction: Direction) -> bool {
    state
        .cell_at(pos.offset(direction))
        .map_or(true, Cell::blocks_box)
}

/// The blocked sides of `pos`, in the order up, down, left, right.
#[must_use]
pub fn blocked_sides(state: &GameState, pos: Position) -> SmallVec<[Direction; 4]> {
    Direction::ALL
        .into_iter()
        .filter(|&d| is_side_blocked(state, pos, d))
        .collect()
}

/// Three or more blocked sides: a box here can move at most one way.
#[must_use]
pub fn is_near_corner(state: &GameState, pos: Position) -> bool {
    blocked_sides(state, pos).len() >= 3
}

/// Is the box just ahead of the player stuck after moving in `direction`?
///
/// Only plain boxes are inspected; a box on a target is never reported.
///
/// - 3 or 4 blocked sides: stuck.
/// - 2 blocked sides on perpendicular axes: stuck (corner). Opposite
///   sides are not.
/// - 1 blocked side: stuck when the next cell in `direction` is a near
///   corner, since the next push would trap it there.
/// - 0 blocked sides: never stuck.
#[must_use]
pub fn is_box_stuck(state: &GameState, direction: Direction) -> bool {
    let box_pos = state.player().offset(direction);
    if state.cell_at(box_pos) != Some(Cell::Box) {
        return false;
    }

    let blocked = blocked_sides(state, box_pos);
    match blocked.len() {
        0 => false,
        1 => {
            let ahead = box_pos.offset(direction);
            state.is_within_bounds(ahead) && is_near_corner(state, ahead)
        }
        2 => blocked[0].is_vertical() != blocked[1].is_vertical(),
        _ => true,
    }
}
