//! Pieces module - the fixed piece catalog
//!
//! Every piece is a list of pre-rotated shape grids. Rotation walks this list
//! with wraparound; nothing is rotated at runtime.

use crate::types::PieceKind;

/// Row-major occupancy grid: `1` = occupied, `0` = empty.
pub type ShapeGrid = &'static [&'static [u8]];

/// One rotation state of a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    grid: ShapeGrid,
}

impl Shape {
    pub const fn new(grid: ShapeGrid) -> Self {
        Self { grid }
    }

    /// Number of columns in the grid.
    pub fn width(&self) -> u8 {
        self.grid.first().map_or(0, |row| row.len() as u8)
    }

    /// Number of rows in the grid.
    pub fn height(&self) -> u8 {
        self.grid.len() as u8
    }

    pub fn grid(&self) -> ShapeGrid {
        self.grid
    }

    pub fn is_filled(&self, row: u8, column: u8) -> bool {
        self.grid
            .get(row as usize)
            .and_then(|r| r.get(column as usize))
            .is_some_and(|&v| v == 1)
    }

    /// Occupied cells as `(row, column)` offsets from the top-left corner.
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.grid.iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .filter(|&(_, &v)| v == 1)
                .map(move |(c, _)| (r as i8, c as i8))
        })
    }

    /// All rows have the same length and the grid is non-empty.
    pub fn is_rectangular(&self) -> bool {
        let width = self.width();
        width > 0 && self.grid.iter().all(|row| row.len() == width as usize)
    }
}

/// A piece: its kind plus the ordered rotation variations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceDef {
    pub kind: PieceKind,
    pub variations: &'static [Shape],
}

impl PieceDef {
    pub fn variation(&self, index: usize) -> Shape {
        self.variations[index % self.variations.len()]
    }

    pub fn variation_count(&self) -> usize {
        self.variations.len()
    }

    /// Shape shown at spawn and in the next-piece preview.
    pub fn spawn_shape(&self) -> Shape {
        self.variations[0]
    }
}

const SQUARE: [Shape; 1] = [Shape::new(&[&[1, 1], &[1, 1]])];

const UNIT: [Shape; 1] = [Shape::new(&[&[1]])];

const T: [Shape; 3] = [
    // stem down
    Shape::new(&[&[1, 1, 1], &[0, 1, 0], &[0, 1, 0]]),
    // stem right
    Shape::new(&[&[1, 0, 0], &[1, 1, 1], &[1, 0, 0]]),
    // stem up
    Shape::new(&[&[0, 1, 0], &[0, 1, 0], &[1, 1, 1]]),
];

const L: [Shape; 4] = [
    Shape::new(&[&[1, 0], &[1, 0], &[1, 0], &[1, 1]]),
    Shape::new(&[&[1, 1, 1, 1], &[1, 0, 0, 0]]),
    Shape::new(&[&[1, 1], &[0, 1], &[0, 1], &[0, 1]]),
    Shape::new(&[&[0, 0, 0, 1], &[1, 1, 1, 1]]),
];

/// The catalog, in [`PieceKind::ALL`] order.
pub static CATALOG: [PieceDef; 4] = [
    PieceDef {
        kind: PieceKind::Square,
        variations: &SQUARE,
    },
    PieceDef {
        kind: PieceKind::Unit,
        variations: &UNIT,
    },
    PieceDef {
        kind: PieceKind::T,
        variations: &T,
    },
    PieceDef {
        kind: PieceKind::L,
        variations: &L,
    },
];

/// Look up the definition of a piece kind.
pub fn piece_def(kind: PieceKind) -> &'static PieceDef {
    match kind {
        PieceKind::Square => &CATALOG[0],
        PieceKind::Unit => &CATALOG[1],
        PieceKind::T => &CATALOG[2],
        PieceKind::L => &CATALOG[3],
    }
}
