//! Error types for the board engine and search configuration.

use thiserror::Error;

use super::position::Position;

/// Why a move was rejected. A rejected move never changes the state.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum MoveError {
    /// The player already left through the gate.
    #[error("game over")]
    GameOver,

    /// The destination is outside the board.
    #[error("out of bounds: {0}")]
    OutOfBounds(Position),

    /// The destination is a wall or a box that cannot be pushed.
    #[error("blocked at {0}")]
    Blocked(Position),

    /// The gate only opens once the key is picked.
    #[error("gate is locked")]
    GateLocked,

    /// The key cannot be collected before every box is placed.
    #[error("key is not visible yet")]
    KeyHidden,
}

/// Invalid search configuration. Fatal: searches refuse to start.
#[derive(Error, Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// Optimization sense must be `minimize` or `maximize`.
    #[error("sense must be 'maximize' or 'minimize', got '{0}'")]
    UnknownSense(String),

    /// A numeric parameter is out of range.
    #[error("invalid {name}: {reason}")]
    InvalidParameter {
        name: &'static str,
        reason: String,
    },
}

/// A board layout that cannot be turned into a game state.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum LayoutError {
    #[error("layout has no rows")]
    Empty,

    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        found: usize,
        expected: usize,
    },

    #[error("unknown symbol {symbol:?} at row {row}, column {col}")]
    UnknownSymbol { symbol: char, row: usize, col: usize },

    #[error("layout must contain exactly one player, found {0}")]
    PlayerCount(usize),
}

impl ConfigError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_error_reasons() {
        assert_eq!(MoveError::GameOver.to_string(), "game over");
        assert_eq!(
            MoveError::OutOfBounds(Position::new(-1, 2)).to_string(),
            "out of bounds: (-1, 2)"
        );
        assert_eq!(MoveError::Blocked(Position::new(0, 0)).to_string(), "blocked at (0, 0)");
    }

    #[test]
    fn test_config_error_message() {
        let err = ConfigError::UnknownSense("sideways".into());
        assert_eq!(err.to_string(), "sense must be 'maximize' or 'minimize', got 'sideways'");

        let err = ConfigError::invalid("cross_prob", "must be within [0, 1]");
        assert_eq!(err.to_string(), "invalid cross_prob: must be within [0, 1]");
    }
}
