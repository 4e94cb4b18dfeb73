//! Board engine and rules integration tests on the fixed puzzle.

use kurtan_solver::core::{Cell, Direction, GameState, MoveError, MoveOutcome, Position};
use kurtan_solver::eval::{AnnealingEvaluator, Evaluator, GeneticEvaluator, Phase};
use kurtan_solver::rules::{blocked_sides, is_box_stuck, pull_if_stuck};

use Direction::*;

/// Places all three boxes, picks the key and leaves through the gate.
const SOLUTION: [Direction; 17] = [
    Up, Down, Down, Right, Up, Down, Right, Up, Up, Down, Left, Left, Up, Left, Up, Down, Down,
];

/// Moves of the solution that place the boxes.
const PLACE_BOXES: usize = 9;

fn play(moves: &[Direction]) -> GameState {
    let mut state = GameState::initial();
    for (i, &d) in moves.iter().enumerate() {
        state
            .apply_move(d)
            .unwrap_or_else(|e| panic!("move {i} ({d}) rejected: {e}"));
    }
    state
}

fn state(rows: &[&str]) -> GameState {
    GameState::from_rows(rows).unwrap()
}

// =============================================================================
// Fixed Puzzle Walkthrough
// =============================================================================

#[test]
fn test_walkthrough_reveals_key_on_first_empty_cell() {
    let before = play(&SOLUTION[..PLACE_BOXES - 1]);
    assert!(!before.key_visible());
    assert_eq!(before.find(Cell::Key), None);

    let after = play(&SOLUTION[..PLACE_BOXES]);
    assert!(after.key_visible());
    assert!(after.all_boxes_on_targets());
    assert_eq!(after.find(Cell::Key), Some(Position::new(1, 2)));

    // Nothing before the key in row-major order was empty.
    assert!(after
        .cells()
        .take_while(|&(p, _)| p != Position::new(1, 2))
        .all(|(_, c)| c != Cell::Empty));
}

#[test]
fn test_walkthrough_outcomes() {
    let mut state = play(&SOLUTION[..14]);
    assert_eq!(state.apply_move(Up), Ok(MoveOutcome::PickedKey));
    assert!(state.key_picked());
    assert_eq!(state.apply_move(Down), Ok(MoveOutcome::Stepped));
    assert_eq!(state.apply_move(Down), Ok(MoveOutcome::Escaped));

    assert!(state.game_over());
    assert!(state.is_goal_state());
    assert_eq!(state.cell_at(Position::new(3, 2)), Some(Cell::Escaped));
    assert_eq!(state.apply_move(Up), Err(MoveError::GameOver));
}

#[test]
fn test_phases_along_solution() {
    assert_eq!(Phase::of(&play(&[])), Phase::PlaceBoxes);
    assert_eq!(Phase::of(&play(&SOLUTION[..PLACE_BOXES])), Phase::FetchKey);
    assert_eq!(Phase::of(&play(&SOLUTION[..15])), Phase::ReachGate);
    assert_eq!(Phase::of(&play(&SOLUTION)), Phase::Finished);
}

#[test]
fn test_no_pulls_along_solution() {
    let mut state = GameState::initial();
    for &d in &SOLUTION {
        state.apply_move(d).unwrap();
        assert!(pull_if_stuck(&state, d).is_none(), "unexpected pull after {d}");
    }
}

#[test]
fn test_evaluators_agree_on_goal() {
    let goal = play(&SOLUTION);
    assert_eq!(AnnealingEvaluator.evaluate(&goal), 0.0);
    assert_eq!(GeneticEvaluator::new().evaluate_genome(&SOLUTION).cost, 0.0);
}

#[test]
fn test_evaluators_differ_in_key_phase() {
    let state = play(&SOLUTION[..PLACE_BOXES]);
    let genetic = GeneticEvaluator::new().evaluate(&state);
    let annealing = AnnealingEvaluator.evaluate(&state);
    assert_eq!(genetic, 4.0);
    assert_eq!(annealing, 14.0);
}

// =============================================================================
// Move Rules
// =============================================================================

#[test]
fn test_rejected_moves_leave_state_unchanged() {
    let mut state = GameState::initial();
    let before = state.clone();

    assert_eq!(state.apply_move(Left), Err(MoveError::GateLocked));
    assert_eq!(state, before);

    // Two boxes in a row cannot be pushed.
    assert!(matches!(state.apply_move(Right), Err(MoveError::Blocked(_))));
    assert_eq!(state, before);
}

#[test]
fn test_push_relocates_two_cells() {
    let before = GameState::initial();
    let mut after = before.clone();
    after.apply_move(Down).unwrap();
    after.apply_move(Right).unwrap();
    after.apply_move(Up).unwrap();

    // Player (4,4) pushed the box at (3,4) onto the target at (2,4).
    assert_eq!(after.player(), Position::new(3, 4));
    assert_eq!(after.cell_at(Position::new(2, 4)), Some(Cell::BoxOnTarget));
    assert_eq!(after.cell_at(Position::new(4, 4)), Some(Cell::Empty));
}

#[test]
fn test_hidden_key_cell_rejected() {
    let mut state = state(&["XXXXX", "XPK*X", "X @ X", "XXXXX"]);
    assert_eq!(state.apply_move(Right), Err(MoveError::KeyHidden));
}

// =============================================================================
// Stuck Detection and Pulls
// =============================================================================

#[test]
fn test_push_against_wall_is_pulled_back() {
    let start = state(&["XXXXX", "X   X", "X @ X", "X P X", "X * X", "XXXXX"]);
    let mut pushed = start.clone();
    pushed.apply_move(Up).unwrap();

    assert!(is_box_stuck(&pushed, Up));
    let pulled = pull_if_stuck(&pushed, Up).unwrap();
    assert_eq!(pulled, start);
}

#[test]
fn test_perpendicular_and_opposite_blocks() {
    // Box at (1,3) blocked up and right.
    let corner = state(&["XXXXX", "X  @X", "X  PX", "X * X", "XXXXX"]);
    assert_eq!(blocked_sides(&corner, Position::new(1, 3)).as_slice(), &[Up, Right]);
    assert!(is_box_stuck(&corner, Up));

    // Box at (1,2) blocked up and down only.
    let tunnel = state(&["XXXXXX", "XP@  X", "XXXX*X", "XXXXXX"]);
    assert_eq!(blocked_sides(&tunnel, Position::new(1, 2)).as_slice(), &[Up, Down]);
    assert!(!is_box_stuck(&tunnel, Right));
}

#[test]
fn test_pull_needs_free_retreat() {
    // Pushed into the corner with a wall right behind the player.
    let pushed = state(&["XXXX", "X @X", "X PX", "XXXX"]);
    assert!(is_box_stuck(&pushed, Up));
    assert!(pull_if_stuck(&pushed, Up).is_none());
}
