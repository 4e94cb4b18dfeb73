//! Board cell kinds.
//!
//! Cell semantics are centralized here: the rules layer and the
//! evaluators ask a `Cell` what it is instead of comparing symbols.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Contents of a single board cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Wall,
    Player,
    Box,
    BoxOnTarget,
    Target,
    Gate,
    Key,
    #[default]
    Empty,
    /// Player standing in the opened gate. Only written by the winning move.
    Escaped,
}

impl Cell {
    /// Printable symbol for this cell.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Cell::Wall => 'X',
            Cell::Player => 'P',
            Cell::Box => '@',
            Cell::BoxOnTarget => '$',
            Cell::Target => '*',
            Cell::Gate => 'G',
            Cell::Key => 'K',
            Cell::Empty => ' ',
            Cell::Escaped => '♛',
        }
    }

    /// Parse a board symbol. Accepts `.` as an alias for an empty cell.
    #[must_use]
    pub fn from_symbol(symbol: char) -> Option<Self> {
        let cell = match symbol {
            'X' => Cell::Wall,
            'P' => Cell::Player,
            '@' => Cell::Box,
            '$' => Cell::BoxOnTarget,
            '*' => Cell::Target,
            'G' => Cell::Gate,
            'K' => Cell::Key,
            ' ' => Cell::Empty,
            '♛' => Cell::Escaped,
            _ => return None,
        };
        Some(cell)
    }

    /// Can a player walk into this cell without further conditions?
    #[must_use]
    pub const fn is_floor(self) -> bool {
        matches!(self, Cell::Empty | Cell::Target)
    }

    /// Is there a box (placed or not) in this cell?
    #[must_use]
    pub const fn is_box(self) -> bool {
        matches!(self, Cell::Box | Cell::BoxOnTarget)
    }

    /// Does this cell count as a blocked side of a box?
    #[must_use]
    pub const fn blocks_box(self) -> bool {
        matches!(self, Cell::Wall | Cell::Box | Cell::BoxOnTarget)
    }

    /// Can this cell anchor a pull when it sits behind a stuck box?
    #[must_use]
    pub const fn anchors_pull(self) -> bool {
        matches!(self, Cell::Wall | Cell::Gate | Cell::Box | Cell::Key)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
