//! Factory module - random piece generation
//!
//! Picks a catalog entry uniformly at random and positions it at the top-center
//! of the spawn buffer. The random source is injected so that seeded games
//! replay the same piece sequence.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::pieces::{PieceDef, Shape, CATALOG};
use crate::types::{PieceKind, BOARD_COLUMNS};

/// The piece currently falling (or waiting as the next preview).
///
/// `row`/`column` locate the top-left corner of the current variation's grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub def: &'static PieceDef,
    pub row: i8,
    pub column: i8,
    pub variation: usize,
}

impl ActivePiece {
    /// Place a definition at the spawn position: row 0, horizontally centered.
    pub fn spawn(def: &'static PieceDef) -> Self {
        let half_board = (BOARD_COLUMNS / 2) as i8;
        let half_shape = (def.spawn_shape().width() / 2) as i8;
        Self {
            def,
            row: 0,
            column: half_board - half_shape,
            variation: 0,
        }
    }

    pub fn kind(&self) -> PieceKind {
        self.def.kind
    }

    /// Shape of the current variation.
    pub fn shape(&self) -> Shape {
        self.def.variation(self.variation)
    }

    /// Index of the variation a rotation would switch to.
    pub fn next_variation(&self) -> usize {
        (self.variation + 1) % self.def.variation_count()
    }

    /// Absolute board cells covered by the current variation.
    pub fn footprint(&self) -> Footprint {
        Footprint {
            shape: self.shape(),
            row: self.row,
            column: self.column,
        }
    }
}

/// A shape anchored at a board position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Footprint {
    pub shape: Shape,
    pub row: i8,
    pub column: i8,
}

impl Footprint {
    /// Absolute `(row, column)` of every occupied cell.
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.shape
            .cells()
            .map(move |(r, c)| (self.row + r, self.column + c))
    }

    pub fn covers(&self, row: i8, column: i8) -> bool {
        let (r, c) = (row - self.row, column - self.column);
        r >= 0 && c >= 0 && self.shape.is_filled(r as u8, c as u8)
    }
}

/// Uniform piece generator over the whole catalog.
#[derive(Debug, Clone)]
pub struct PieceFactory<R = StdRng> {
    rng: R,
}

impl PieceFactory<StdRng> {
    /// Reproducible factory: the same seed yields the same sequence.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Factory seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> PieceFactory<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Draw a new piece at its spawn position. The board is not touched.
    pub fn pick(&mut self) -> ActivePiece {
        let index = self.rng.gen_range(0..CATALOG.len());
        ActivePiece::spawn(&CATALOG[index])
    }
}

impl Default for PieceFactory<StdRng> {
    fn default() -> Self {
        Self::seeded(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::piece_def;

    #[test]
    fn test_factory_deterministic() {
        let mut f1 = PieceFactory::seeded(12345);
        let mut f2 = PieceFactory::seeded(12345);

        for _ in 0..100 {
            assert_eq!(f1.pick().kind(), f2.pick().kind());
        }
    }

    #[test]
    fn test_factory_draws_every_kind() {
        let mut factory = PieceFactory::seeded(7);
        let mut seen = Vec::new();
        for _ in 0..400 {
            let kind = factory.pick().kind();
            if !seen.contains(&kind) {
                seen.push(kind);
            }
        }

        for kind in PieceKind::ALL {
            assert!(seen.contains(&kind), "Missing piece: {:?}", kind);
        }
    }

    #[test]
    fn test_spawn_position_is_top_center() {
        // floor(10/2) - floor(width/2)
        assert_eq!(ActivePiece::spawn(piece_def(PieceKind::Square)).column, 4);
        assert_eq!(ActivePiece::spawn(piece_def(PieceKind::Unit)).column, 5);
        assert_eq!(ActivePiece::spawn(piece_def(PieceKind::T)).column, 4);
        assert_eq!(ActivePiece::spawn(piece_def(PieceKind::L)).column, 4);

        let mut factory = PieceFactory::seeded(3);
        for _ in 0..20 {
            let piece = factory.pick();
            assert_eq!(piece.row, 0);
            assert_eq!(piece.variation, 0);
        }
    }

    #[test]
    fn test_next_variation_wraps() {
        let mut piece = ActivePiece::spawn(piece_def(PieceKind::T));
        piece.variation = 2;
        assert_eq!(piece.next_variation(), 0);

        let square = ActivePiece::spawn(piece_def(PieceKind::Square));
        assert_eq!(square.next_variation(), 0);
    }

    #[test]
    fn test_footprint_cells_are_absolute() {
        let mut piece = ActivePiece::spawn(piece_def(PieceKind::Square));
        piece.row = 5;
        let cells: Vec<_> = piece.footprint().cells().collect();
        assert_eq!(cells, vec![(5, 4), (5, 5), (6, 4), (6, 5)]);
        assert!(piece.footprint().covers(6, 5));
        assert!(!piece.footprint().covers(7, 5));
        assert!(!piece.footprint().covers(5, 3));
    }
}
