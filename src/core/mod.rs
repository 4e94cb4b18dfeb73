//! Core engine types: positions, cells, board state, RNG, errors.
//!
//! The board engine lives in [`GameState`]: it validates and applies
//! moves, pushes boxes, reveals the key and opens the gate. Everything
//! the searches do to a board goes through it.

pub mod cell;
pub mod error;
pub mod position;
pub mod rng;
pub mod state;

pub use cell::Cell;
pub use error::{ConfigError, LayoutError, MoveError};
pub use position::{Direction, ParseDirectionError, Position};
pub use rng::SearchRng;
pub use state::{GameState, MoveOutcome, INITIAL_LAYOUT, TARGET_POSITIONS};
