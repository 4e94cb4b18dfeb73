//! Board state and the move rules.
//!
//! ## GameState
//!
//! Owns the grid exclusively. Every transition mutates one owned value;
//! searches that branch clone first, and a clone never shares storage
//! with its source.
//!
//! ## Phases
//!
//! 1. Push all boxes onto the targets. The key appears on the first empty
//!    cell (row-major) the moment the last box lands.
//! 2. Walk onto the key to pick it up.
//! 3. Walk into the gate to leave. The gate cell becomes [`Cell::Escaped`]
//!    and the game is over.

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::trace;

use super::cell::Cell;
use super::error::{LayoutError, MoveError};
use super::position::{Direction, Position};

/// Target cells of the fixed puzzle.
pub const TARGET_POSITIONS: [Position; 3] = [
    Position::new(1, 3),
    Position::new(1, 5),
    Position::new(2, 4),
];

/// The fixed puzzle, one string per row.
pub const INITIAL_LAYOUT: [&str; 6] = [
    "XXXXXXXXXX",
    "XX * *XXXX",
    "X  @* XXXX",
    "X GP@@XXXX",
    "X      XXX",
    "XXXXXXXXXX",
];

/// What a successful move did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveOutcome {
    /// Walked onto an empty or target cell.
    Stepped,
    /// Pushed a box one cell ahead.
    Pushed,
    /// Walked onto the key.
    PickedKey,
    /// Walked through the open gate. The game is over.
    Escaped,
}

/// Complete puzzle state.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameState {
    rows: usize,
    cols: usize,
    /// Row-major cells.
    cells: Vec<Cell>,
    /// Cached player position.
    player: Position,
    targets: SmallVec<[Position; 4]>,
    key_visible: bool,
    key_picked: bool,
    game_over: bool,
}

impl Default for GameState {
    fn default() -> Self {
        Self::initial()
    }
}

impl GameState {
    /// The fixed starting position of the puzzle.
    #[must_use]
    pub fn initial() -> Self {
        let cols = INITIAL_LAYOUT[0].len();
        let cells: Vec<Cell> = INITIAL_LAYOUT
            .iter()
            .flat_map(|row| row.chars())
            .map(|c| Cell::from_symbol(c).unwrap_or(Cell::Wall))
            .collect();

        Self {
            rows: INITIAL_LAYOUT.len(),
            cols,
            cells,
            player: Position::new(3, 3),
            targets: SmallVec::from_slice(&TARGET_POSITIONS),
            key_visible: false,
            key_picked: false,
            game_over: false,
        }
    }

    /// Build a state from rows of cell symbols.
    ///
    /// Every `*` and `$` cell becomes a target. The layout must be
    /// rectangular and contain exactly one `P`. Flags start cleared.
    ///
    /// ```
    /// use kurtan_solver::core::{Cell, GameState, Position};
    ///
    /// let state = GameState::from_rows(&["XXXX", "XP*X", "XXXX"]).unwrap();
    /// assert_eq!(state.player(), Position::new(1, 1));
    /// assert_eq!(state.cell_at(Position::new(1, 2)), Some(Cell::Target));
    /// ```
    pub fn from_rows(rows: &[&str]) -> Result<Self, LayoutError> {
        let first = rows.first().ok_or(LayoutError::Empty)?;
        let cols = first.chars().count();

        let mut cells = Vec::with_capacity(rows.len() * cols);
        let mut targets = SmallVec::new();
        let mut players = Vec::new();

        for (r, line) in rows.iter().enumerate() {
            let found = line.chars().count();
            if found != cols {
                return Err(LayoutError::Ragged {
                    row: r,
                    found,
                    expected: cols,
                });
            }
            for (c, symbol) in line.chars().enumerate() {
                let cell = Cell::from_symbol(symbol).ok_or(LayoutError::UnknownSymbol {
                    symbol,
                    row: r,
                    col: c,
                })?;
                let pos = Position::new(r as i32, c as i32);
                match cell {
                    Cell::Target | Cell::BoxOnTarget => targets.push(pos),
                    Cell::Player => players.push(pos),
                    _ => {}
                }
                cells.push(cell);
            }
        }

        if players.len() != 1 {
            return Err(LayoutError::PlayerCount(players.len()));
        }

        Ok(Self {
            rows: rows.len(),
            cols,
            cells,
            player: players[0],
            targets,
            key_visible: false,
            key_picked: false,
            game_over: false,
        })
    }

    // === Queries ===

    /// Number of rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Current player position.
    #[must_use]
    pub fn player(&self) -> Position {
        self.player
    }

    /// Target positions, fixed for the lifetime of the puzzle.
    #[must_use]
    pub fn targets(&self) -> &[Position] {
        &self.targets
    }

    /// Has the key been revealed?
    #[must_use]
    pub fn key_visible(&self) -> bool {
        self.key_visible
    }

    /// Has the player collected the key?
    #[must_use]
    pub fn key_picked(&self) -> bool {
        self.key_picked
    }

    /// Has the player left through the gate?
    #[must_use]
    pub fn game_over(&self) -> bool {
        self.game_over
    }

    /// Is `pos` on the board?
    #[must_use]
    pub fn is_within_bounds(&self, pos: Position) -> bool {
        pos.row >= 0
            && pos.col >= 0
            && (pos.row as usize) < self.rows
            && (pos.col as usize) < self.cols
    }

    /// Cell at `pos`, or `None` off the board.
    #[must_use]
    pub fn cell_at(&self, pos: Position) -> Option<Cell> {
        self.index(pos).map(|i| self.cells[i])
    }

    /// Is `pos` one of the targets?
    #[must_use]
    pub fn is_target(&self, pos: Position) -> bool {
        self.targets.contains(&pos)
    }

    /// What a cell shows once whatever stood on it leaves.
    #[must_use]
    pub fn cell_under(&self, pos: Position) -> Cell {
        if self.is_target(pos) {
            Cell::Target
        } else {
            Cell::Empty
        }
    }

    /// All positions with their cells, in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (Position, Cell)> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &cell)| (Position::new((i / cols) as i32, (i % cols) as i32), cell))
    }

    /// First position holding `cell`, scanning row-major.
    #[must_use]
    pub fn find(&self, cell: Cell) -> Option<Position> {
        self.cells().find(|&(_, c)| c == cell).map(|(pos, _)| pos)
    }

    /// Positions of every box, placed or not.
    pub fn boxes(&self) -> impl Iterator<Item = Position> + '_ {
        self.cells()
            .filter(|(_, cell)| cell.is_box())
            .map(|(pos, _)| pos)
    }

    /// Do all targets currently hold a box?
    #[must_use]
    pub fn all_boxes_on_targets(&self) -> bool {
        self.targets
            .iter()
            .all(|&t| self.cell_at(t) == Some(Cell::BoxOnTarget))
    }

    /// Boxes placed, key picked and the player gone through the gate.
    #[must_use]
    pub fn is_goal_state(&self) -> bool {
        self.all_boxes_on_targets() && self.key_picked && self.game_over
    }

    // === Moves ===

    /// Try to move the player one cell in `direction`.
    ///
    /// On error nothing changes.
    pub fn apply_move(&mut self, direction: Direction) -> Result<MoveOutcome, MoveError> {
        if self.game_over {
            return Err(MoveError::GameOver);
        }

        let to = self.player.offset(direction);
        let Some(dest) = self.cell_at(to) else {
            return Err(MoveError::OutOfBounds(to));
        };

        let outcome = match dest {
            Cell::Empty | Cell::Target => {
                self.step_player(to, Cell::Player);
                MoveOutcome::Stepped
            }
            Cell::Gate => {
                if !self.key_picked {
                    return Err(MoveError::GateLocked);
                }
                self.step_player(to, Cell::Escaped);
                self.game_over = true;
                MoveOutcome::Escaped
            }
            Cell::Key => {
                if !self.key_visible {
                    return Err(MoveError::KeyHidden);
                }
                self.key_picked = true;
                self.step_player(to, Cell::Player);
                MoveOutcome::PickedKey
            }
            Cell::Box | Cell::BoxOnTarget => {
                self.push_box(to, direction)?;
                self.step_player(to, Cell::Player);
                MoveOutcome::Pushed
            }
            Cell::Wall | Cell::Player | Cell::Escaped => return Err(MoveError::Blocked(to)),
        };

        trace!(%direction, player = %self.player, ?outcome, "move applied");
        self.reveal_key_if_ready();
        Ok(outcome)
    }

    /// Shift the box at `at` one cell further in `direction`.
    fn push_box(&mut self, at: Position, direction: Direction) -> Result<(), MoveError> {
        let dest = at.offset(direction);
        if !self.cell_at(dest).is_some_and(Cell::is_floor) {
            return Err(MoveError::Blocked(at));
        }

        let landed = if self.is_target(dest) {
            Cell::BoxOnTarget
        } else {
            Cell::Box
        };
        self.set(dest, landed);
        self.set(at, self.cell_under(at));
        Ok(())
    }

    /// Move the player marker, restoring the cell it leaves.
    fn step_player(&mut self, to: Position, marker: Cell) {
        let from = self.player;
        self.set(from, self.cell_under(from));
        self.set(to, marker);
        self.player = to;
    }

    /// Reveal the key once every target holds a box.
    ///
    /// Returns true only on the transition. The key goes on the first
    /// empty cell in row-major order.
    pub(crate) fn reveal_key_if_ready(&mut self) -> bool {
        if self.key_visible || !self.all_boxes_on_targets() {
            return false;
        }
        self.key_visible = true;
        if let Some(pos) = self.find(Cell::Empty) {
            self.set(pos, Cell::Key);
            trace!(key = %pos, "key revealed");
        }
        true
    }

    // === Raw access for the rules layer ===

    /// Overwrite a cell. Off-board writes are ignored.
    pub(crate) fn set(&mut self, pos: Position, cell: Cell) {
        if let Some(i) = self.index(pos) {
            self.cells[i] = cell;
        }
    }

    /// Move the cached player position and its marker.
    pub(crate) fn place_player(&mut self, pos: Position) {
        self.set(pos, Cell::Player);
        self.player = pos;
    }

    fn index(&self, pos: Position) -> Option<usize> {
        self.is_within_bounds(pos)
            .then(|| pos.row as usize * self.cols + pos.col as usize)
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.cols.max(1)) {
            let line: Vec<String> = row.iter().map(|c| c.symbol().to_string()).collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}
