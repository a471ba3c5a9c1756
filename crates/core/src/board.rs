//! Board module - manages the game grid
//!
//! The board is a 10x23 grid: 3 hidden spawn-buffer rows on top of the 20
//! visible rows. Uses a flat array for cache locality and zero allocation.
//! Coordinates are `(row, column)`; row 0 is the top of the spawn buffer.
//!
//! The active piece is drawn into the grid like any locked cell. Collision
//! queries exclude its own footprint by comparing coordinates, so a query
//! never writes to the grid.

use arrayvec::ArrayVec;

use crate::factory::Footprint;
use crate::pieces::Shape;
use crate::types::{Blocked, Cell, PieceKind, BOARD_COLUMNS, SPAWN_BUFFER_ROWS, TOTAL_ROWS};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_COLUMNS as usize) * (TOTAL_ROWS as usize);

/// Upper bound on rows removed by one scan.
pub const MAX_CLEARED_ROWS: usize = TOTAL_ROWS as usize;

/// The game board - 10 columns x 23 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (row * COLUMNS + column)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (row, column) coordinates
    #[inline(always)]
    fn index(row: i8, column: i8) -> Option<usize> {
        if row < 0 || row >= TOTAL_ROWS as i8 || column < 0 || column >= BOARD_COLUMNS as i8 {
            return None;
        }
        Some((row as usize) * (BOARD_COLUMNS as usize) + (column as usize))
    }

    pub fn columns(&self) -> u8 {
        BOARD_COLUMNS
    }

    /// Rows including the spawn buffer.
    pub fn rows(&self) -> u8 {
        TOTAL_ROWS
    }

    /// Get cell at (row, column); `None` if out of bounds
    pub fn get(&self, row: i8, column: i8) -> Option<Cell> {
        Self::index(row, column).map(|idx| self.cells[idx])
    }

    /// Set cell at (row, column); returns false if out of bounds
    pub fn set(&mut self, row: i8, column: i8, cell: Cell) -> bool {
        match Self::index(row, column) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Within bounds and filled
    pub fn is_occupied(&self, row: i8, column: i8) -> bool {
        matches!(self.get(row, column), Some(Some(_)))
    }

    /// Reallocate as an empty grid.
    pub fn reset(&mut self) {
        self.cells = [None; BOARD_SIZE];
    }

    /// Check whether `shape` fits with its top-left corner at `(row, column)`.
    ///
    /// Cells covered by `ignore` count as empty, which lets the active piece
    /// test a new position without colliding with where it currently stands.
    /// Walls are reported before collisions.
    pub fn can_place(
        &self,
        shape: Shape,
        row: i8,
        column: i8,
        ignore: Option<&Footprint>,
    ) -> Result<(), Blocked> {
        let target = Footprint { shape, row, column };

        if target.cells().any(|(r, c)| Self::index(r, c).is_none()) {
            return Err(Blocked::Wall);
        }

        let collides = target.cells().any(|(r, c)| {
            self.is_occupied(r, c) && !ignore.is_some_and(|own| own.covers(r, c))
        });
        if collides {
            return Err(Blocked::Collision);
        }

        Ok(())
    }

    /// Mark every occupied cell of `shape` at `(row, column)` as filled.
    ///
    /// Out-of-bounds cells are skipped; callers validate with [`Board::can_place`].
    pub fn place(&mut self, shape: Shape, row: i8, column: i8, kind: PieceKind) {
        let target = Footprint { shape, row, column };
        for (r, c) in target.cells() {
            self.set(r, c, Some(kind));
        }
    }

    /// Empty every occupied cell of `shape` at `(row, column)`.
    pub fn clear(&mut self, shape: Shape, row: i8, column: i8) {
        let target = Footprint { shape, row, column };
        for (r, c) in target.cells() {
            self.set(r, c, None);
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, row: usize) -> bool {
        if row >= TOTAL_ROWS as usize {
            return false;
        }
        let start = row * BOARD_COLUMNS as usize;
        let end = start + BOARD_COLUMNS as usize;
        self.cells[start..end].iter().all(|cell| cell.is_some())
    }

    /// Empty a row and shift every row above it down by one.
    ///
    /// Row `i` inherits row `i - 1` for `i` from `row` down to 1, and row 0
    /// becomes empty. The row count never changes.
    pub fn clear_row(&mut self, row: usize) {
        if row >= TOTAL_ROWS as usize {
            return;
        }

        let width = BOARD_COLUMNS as usize;

        // copy_within handles overlapping ranges safely
        for r in (1..=row).rev() {
            let src_start = (r - 1) * width;
            let dst_start = r * width;
            self.cells.copy_within(src_start..src_start + width, dst_start);
        }

        for cell in &mut self.cells[0..width] {
            *cell = None;
        }
    }

    /// Clear every full row, scanning top to bottom.
    ///
    /// Returns the cleared row indices in scan order.
    pub fn clear_full_rows(&mut self) -> ArrayVec<usize, MAX_CLEARED_ROWS> {
        let mut cleared = ArrayVec::new();

        for row in 0..TOTAL_ROWS as usize {
            if self.is_row_full(row) {
                self.clear_row(row);
                cleared.push(row);
            }
        }

        cleared
    }

    /// Export the grid as piece codes (`0` = empty).
    pub fn write_u8_grid(&self, out: &mut [[u8; BOARD_COLUMNS as usize]; TOTAL_ROWS as usize]) {
        let width = BOARD_COLUMNS as usize;
        for (row, dst) in out.iter_mut().enumerate() {
            let start = row * width;
            for (c, cell) in self.cells[start..start + width].iter().enumerate() {
                dst[c] = cell.map_or(0, |kind| kind.code());
            }
        }
    }

    /// Rows below the spawn buffer, top to bottom.
    pub fn visible_rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells
            .chunks_exact(BOARD_COLUMNS as usize)
            .skip(SPAWN_BUFFER_ROWS as usize)
    }

    /// Number of occupied cells.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Fill a whole row, optionally leaving one column empty.
    pub fn fill_row(&mut self, row: i8, gap: Option<i8>, kind: PieceKind) {
        for column in 0..BOARD_COLUMNS as i8 {
            if Some(column) != gap {
                self.set(row, column, Some(kind));
            }
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
