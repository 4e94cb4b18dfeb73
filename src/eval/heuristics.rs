//! Distance and penalty terms shared by the evaluators.

use serde::{Deserialize, Serialize};

use crate::core::{Cell, GameState, Position};
use crate::rules::is_near_corner;

/// Cost added per box with three or more blocked sides.
pub const STUCK_PENALTY: f64 = 20.0;

/// Which part of the puzzle a state is in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Boxes still being placed; the key is hidden.
    PlaceBoxes,
    /// Key visible, not yet picked.
    FetchKey,
    /// Key picked, gate not yet reached.
    ReachGate,
    /// Player left through the gate.
    Finished,
}

impl Phase {
    /// Phase of `state`, from its key and gate flags.
    #[must_use]
    pub fn of(state: &GameState) -> Self {
        if !state.key_visible() {
            Phase::PlaceBoxes
        } else if !state.key_picked() {
            Phase::FetchKey
        } else if !state.game_over() {
            Phase::ReachGate
        } else {
            Phase::Finished
        }
    }
}

/// Sum over boxes not on a target of the distance to the nearest target.
#[must_use]
pub fn box_distance(state: &GameState) -> u32 {
    state
        .boxes()
        .filter(|&b| !state.is_target(b))
        .map(|b| nearest_target(state, b).unwrap_or(0))
        .sum()
}

/// Manhattan distance from `pos` to the closest target.
#[must_use]
pub fn nearest_target(state: &GameState, pos: Position) -> Option<u32> {
    state.targets().iter().map(|&t| pos.manhattan(t)).min()
}

/// Boxes (placed or not) with three or more blocked sides.
///
/// Unlike the move-time detector this looks at every box and ignores the
/// direction of the last move.
#[must_use]
pub fn cornered_boxes(state: &GameState) -> usize {
    state.boxes().filter(|&b| is_near_corner(state, b)).count()
}

/// Box distance plus the cornered-box penalty.
#[must_use]
pub fn placement_cost(state: &GameState) -> f64 {
    f64::from(box_distance(state)) + STUCK_PENALTY * cornered_boxes(state) as f64
}

/// Distance from the player to the key, if a key is on the board.
#[must_use]
pub fn key_distance(state: &GameState) -> Option<u32> {
    state.find(Cell::Key).map(|k| state.player().manhattan(k))
}

/// Distance from the player to the gate.
///
/// Once the player has escaped the gate cell shows [`Cell::Escaped`]
/// and the distance is zero.
#[must_use]
pub fn gate_distance(state: &GameState) -> Option<u32> {
    state
        .find(Cell::Gate)
        .or_else(|| state.find(Cell::Escaped))
        .map(|g| state.player().manhattan(g))
}
