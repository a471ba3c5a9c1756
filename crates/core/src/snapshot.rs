use crate::factory::ActivePiece;
use crate::types::{PieceKind, BOARD_COLUMNS, TOTAL_ROWS, VISIBLE_ROWS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub variation: usize,
    pub row: i8,
    pub column: i8,
}

impl From<ActivePiece> for ActiveSnapshot {
    fn from(value: ActivePiece) -> Self {
        Self {
            kind: value.kind(),
            variation: value.variation,
            row: value.row,
            column: value.column,
        }
    }
}

/// Read-only copy of everything a renderer needs for one frame.
///
/// `board` holds every row including the spawn buffer; cells are
/// [`PieceKind::code`] values, `0` for empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub board: [[u8; BOARD_COLUMNS as usize]; TOTAL_ROWS as usize],
    pub active: Option<ActiveSnapshot>,
    pub next: PieceKind,
    pub running: bool,
    pub over: bool,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub gravity_interval_ms: u64,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Rows below the spawn buffer, top to bottom.
    pub fn visible_board(&self) -> &[[u8; BOARD_COLUMNS as usize]] {
        let start = (TOTAL_ROWS - VISIBLE_ROWS) as usize;
        &self.board[start..]
    }

    /// Neither started nor finished.
    pub fn idle(&self) -> bool {
        !self.running && !self.over
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[0u8; BOARD_COLUMNS as usize]; TOTAL_ROWS as usize],
            active: None,
            next: PieceKind::Square,
            running: false,
            over: false,
            score: 0,
            level: 1,
            lines: 0,
            gravity_interval_ms: 0,
        }
    }
}
