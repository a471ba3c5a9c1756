//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, terminal rendering, input mapping).
//!
//! # Board Dimensions
//!
//! The playfield is a fixed 10x20 grid with a hidden spawn buffer on top:
//!
//! - **Columns**: 10 (indexed 0-9)
//! - **Visible rows**: 20
//! - **Spawn buffer**: 3 hidden rows above the visible playfield
//! - **Total rows**: 23 (indexed 0-22, row 0 is the top of the spawn buffer)
//!
//! # Game Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep interval (~60 FPS) |
//! | `MOVE_COOLDOWN_MS` | 50 | Minimum gap between input moves |
//! | `ROTATE_COOLDOWN_MS` | 200 | Minimum gap between rotations |
//! | `BASE_GRAVITY_MS` | 1000 | Gravity interval at level 1 |
//! | `GRAVITY_FLOOR_MS` | 100 | Fastest gravity interval |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Direction, GameAction, PieceKind, BOARD_COLUMNS, TOTAL_ROWS};
//!
//! assert_eq!(PieceKind::from_str("square"), Some(PieceKind::Square));
//! assert_eq!(GameAction::MoveLeft.direction(), Some(Direction::Left));
//! assert_eq!(Direction::Down.delta(), (1, 0));
//!
//! assert_eq!(BOARD_COLUMNS, 10);
//! assert_eq!(TOTAL_ROWS, 23);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_COLUMNS: u8 = 10;

/// Visible playfield height in cells (20 rows)
pub const VISIBLE_ROWS: u8 = 20;

/// Hidden rows above the visible playfield where new pieces spawn
pub const SPAWN_BUFFER_ROWS: u8 = 3;

/// Total board height including the spawn buffer
pub const TOTAL_ROWS: u8 = VISIBLE_ROWS + SPAWN_BUFFER_ROWS;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Cooldown shared by left/right/down input moves.
pub const MOVE_COOLDOWN_MS: u64 = 50;

/// Cooldown between two rotations.
pub const ROTATE_COOLDOWN_MS: u64 = 200;

/// Gravity interval at level 1 (1000ms = 1 second per row)
pub const BASE_GRAVITY_MS: u64 = 1000;

/// Gravity never gets faster than this.
pub const GRAVITY_FLOOR_MS: u64 = 100;

/// A level is gained once the cumulative line count exceeds `level * LINES_PER_LEVEL`.
pub const LINES_PER_LEVEL: u32 = 10;

/// Line clear scoring table
///
/// Base points for clearing N lines in a single lock:
/// - 1 line: 40 points
/// - 2 lines: 100 points
/// - 3 lines: 300 points
/// - 4 or more lines: 1200 points
///
/// Points are multiplied by the current level (which starts at 1).
pub const LINE_SCORES: [u32; 5] = [0, 40, 100, 300, 1200];

/// The piece kinds in the catalog
///
/// - **Square**: 2x2 block
/// - **Unit**: single 1x1 cell
/// - **T**: T-shaped, three rotation states in a 3x3 grid
/// - **L**: L-shaped, four rotation states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Square,
    Unit,
    T,
    L,
}

impl PieceKind {
    /// Every kind, in catalog order.
    pub const ALL: [PieceKind; 4] = [PieceKind::Square, PieceKind::Unit, PieceKind::T, PieceKind::L];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("T"), Some(PieceKind::T));
    /// assert_eq!(PieceKind::from_str("unit"), Some(PieceKind::Unit));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "square" | "o" => Some(PieceKind::Square),
            "unit" | "dot" => Some(PieceKind::Unit),
            "t" => Some(PieceKind::T),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::Square => "square",
            PieceKind::Unit => "unit",
            PieceKind::T => "t",
            PieceKind::L => "l",
        }
    }

    /// Non-zero code used when exporting the board as a `u8` grid.
    pub fn code(&self) -> u8 {
        match self {
            PieceKind::Square => 1,
            PieceKind::Unit => 2,
            PieceKind::T => 3,
            PieceKind::L => 4,
        }
    }

    /// Inverse of [`PieceKind::code`]; `0` and unknown codes are empty.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(PieceKind::Square),
            2 => Some(PieceKind::Unit),
            3 => Some(PieceKind::T),
            4 => Some(PieceKind::L),
            _ => None,
        }
    }
}

/// Unit translation requested of the active piece.
///
/// `Idle` is the zero delta used to re-place a piece where it stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Down,
    Idle,
}

impl Direction {
    /// `(row_delta, column_delta)` for this direction.
    pub fn delta(&self) -> (i8, i8) {
        match self {
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
            Direction::Down => (1, 0),
            Direction::Idle => (0, 0),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Down => "down",
            Direction::Idle => "idle",
        }
    }
}

/// Game actions that can be applied to modify game state
///
/// These are what the input collaborator produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down
    MoveDown,
    /// Advance to the next rotation variation
    Rotate,
    /// Start a new game (no-op while running)
    Start,
}

impl GameAction {
    /// Parse action from string
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("rotate"), Some(GameAction::Rotate));
    /// assert_eq!(GameAction::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "movedown" => Some(GameAction::MoveDown),
            "rotate" => Some(GameAction::Rotate),
            "start" => Some(GameAction::Start),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::MoveDown => "moveDown",
            GameAction::Rotate => "rotate",
            GameAction::Start => "start",
        }
    }

    /// The translation this action requests, if it is a move.
    pub fn direction(&self) -> Option<Direction> {
        match self {
            GameAction::MoveLeft => Some(Direction::Left),
            GameAction::MoveRight => Some(Direction::Right),
            GameAction::MoveDown => Some(Direction::Down),
            GameAction::Rotate | GameAction::Start => None,
        }
    }
}

/// Why a placement was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Blocked {
    /// A cell would leave the board.
    Wall,
    /// A cell would overlap an occupied cell.
    Collision,
}

impl Blocked {
    pub fn as_str(&self) -> &'static str {
        match self {
            Blocked::Wall => "wall",
            Blocked::Collision => "collision",
        }
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Occupied; the kind is kept for colouring only
pub type Cell = Option<PieceKind>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn board_dimensions_include_spawn_buffer() {
        assert_eq!(TOTAL_ROWS, 23);
        assert_eq!(BOARD_COLUMNS, 10);
    }

    #[test]
    fn cooldowns_pace_each_motion_category_differently() {
        assert!(MOVE_COOLDOWN_MS < ROTATE_COOLDOWN_MS);
        assert!(ROTATE_COOLDOWN_MS < BASE_GRAVITY_MS);
        assert!(GRAVITY_FLOOR_MS > 0);
    }
}
