//! Movement module - collision-checked translation and rotation
//!
//! Each operation checks the target placement against the board with the
//! piece's own footprint excluded, then commits by clearing the old cells and
//! drawing the new ones. The check is a pure query, so nothing can observe a
//! half-moved piece.

use crate::board::Board;
use crate::factory::ActivePiece;
use crate::types::{Blocked, Direction, SPAWN_BUFFER_ROWS};

/// Result of a translation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveOutcome {
    /// The piece now sits at the new position.
    Moved,
    /// Refused by a wall or an occupied cell; nothing changed.
    Blocked(Blocked),
    /// A downward move was refused while the piece was still entering from the
    /// spawn buffer. Nothing changed; the game is over.
    TopOut,
}

impl MoveOutcome {
    pub fn is_moved(&self) -> bool {
        matches!(self, MoveOutcome::Moved)
    }
}

/// Translate the active piece by one cell.
pub fn try_move(board: &mut Board, piece: &mut ActivePiece, direction: Direction) -> MoveOutcome {
    let (dr, dc) = direction.delta();
    let row = piece.row + dr;
    let column = piece.column + dc;
    let shape = piece.shape();
    let own = piece.footprint();

    if let Err(reason) = board.can_place(shape, row, column, Some(&own)) {
        if direction == Direction::Down && row <= SPAWN_BUFFER_ROWS as i8 {
            return MoveOutcome::TopOut;
        }
        tracing::debug!(
            direction = direction.as_str(),
            reason = reason.as_str(),
            row,
            column,
            "move blocked"
        );
        return MoveOutcome::Blocked(reason);
    }

    board.clear(shape, piece.row, piece.column);
    board.place(shape, row, column, piece.kind());
    piece.row = row;
    piece.column = column;

    MoveOutcome::Moved
}

/// Switch the active piece to its next variation, in place.
///
/// There is no wall-kick search: if the next variation does not fit at the
/// current position the piece stays as it is.
pub fn try_rotate(board: &mut Board, piece: &mut ActivePiece) -> Result<(), Blocked> {
    let next = piece.next_variation();
    let next_shape = piece.def.variation(next);
    let own = piece.footprint();

    if let Err(reason) = board.can_place(next_shape, piece.row, piece.column, Some(&own)) {
        tracing::debug!(
            kind = piece.kind().as_str(),
            variation = next,
            reason = reason.as_str(),
            "rotation blocked"
        );
        return Err(reason);
    }

    board.clear(own.shape, piece.row, piece.column);
    piece.variation = next;
    board.place(next_shape, piece.row, piece.column, piece.kind());

    Ok(())
}

/// Draw a freshly picked piece onto the board at its spawn position.
///
/// Entering the board counts as the piece's first downward step, so an
/// occupied spawn area is a top-out.
pub fn spawn(board: &mut Board, piece: &ActivePiece) -> MoveOutcome {
    match board.can_place(piece.shape(), piece.row, piece.column, None) {
        Ok(()) => {
            board.place(piece.shape(), piece.row, piece.column, piece.kind());
            MoveOutcome::Moved
        }
        Err(reason) => {
            tracing::debug!(reason = reason.as_str(), "spawn area blocked");
            MoveOutcome::TopOut
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::{piece_def, CATALOG};
    use crate::types::{PieceKind, BOARD_COLUMNS, TOTAL_ROWS};

    fn spawned(board: &mut Board, kind: PieceKind) -> ActivePiece {
        let piece = ActivePiece::spawn(piece_def(kind));
        assert_eq!(spawn(board, &piece), MoveOutcome::Moved);
        piece
    }

    #[test]
    fn test_move_left_at_wall_fails_for_every_piece() {
        for def in &CATALOG {
            let mut board = Board::new();
            let mut piece = ActivePiece::spawn(def);
            piece.column = 0;
            piece.row = 5;
            spawn(&mut board, &piece);
            let before = board.clone();

            assert_eq!(
                try_move(&mut board, &mut piece, Direction::Left),
                MoveOutcome::Blocked(Blocked::Wall)
            );
            assert_eq!(piece.column, 0);
            assert_eq!(board, before);
        }
    }

    #[test]
    fn test_move_right_at_wall_fails_for_every_piece() {
        for def in &CATALOG {
            let mut board = Board::new();
            let mut piece = ActivePiece::spawn(def);
            piece.column = (BOARD_COLUMNS - piece.shape().width()) as i8;
            piece.row = 5;
            spawn(&mut board, &piece);

            assert_eq!(
                try_move(&mut board, &mut piece, Direction::Right),
                MoveOutcome::Blocked(Blocked::Wall)
            );
            assert_eq!(
                piece.column + piece.shape().width() as i8,
                BOARD_COLUMNS as i8
            );
        }
    }

    #[test]
    fn test_move_updates_board_and_position() {
        let mut board = Board::new();
        let mut piece = spawned(&mut board, PieceKind::Square);

        assert_eq!(try_move(&mut board, &mut piece, Direction::Down), MoveOutcome::Moved);
        assert_eq!((piece.row, piece.column), (1, 4));
        assert!(!board.is_occupied(0, 4));
        assert!(board.is_occupied(2, 5));
        assert_eq!(board.occupied_count(), 4);

        assert_eq!(try_move(&mut board, &mut piece, Direction::Left), MoveOutcome::Moved);
        assert_eq!(piece.column, 3);
        assert!(board.is_occupied(1, 3));
        assert!(!board.is_occupied(1, 5));
    }

    #[test]
    fn test_square_falls_to_bottom() {
        let mut board = Board::new();
        let mut piece = spawned(&mut board, PieceKind::Square);

        for _ in 0..22 {
            try_move(&mut board, &mut piece, Direction::Down);
        }
        assert_eq!(piece.row, 21);

        assert_eq!(
            try_move(&mut board, &mut piece, Direction::Down),
            MoveOutcome::Blocked(Blocked::Wall)
        );
        assert_eq!(piece.row, 21);
        assert!(board.is_occupied(TOTAL_ROWS as i8 - 1, 4));
    }

    #[test]
    fn test_blocked_down_inside_spawn_buffer_is_top_out() {
        let mut board = Board::new();
        board.fill_row(3, Some(0), PieceKind::T);
        let mut piece = spawned(&mut board, PieceKind::Square);

        // Square at row 0 covers rows 0-1; row 1 -> 2 is free.
        assert_eq!(try_move(&mut board, &mut piece, Direction::Down), MoveOutcome::Moved);
        // Row 2 would cover row 3, which is filled.
        assert_eq!(try_move(&mut board, &mut piece, Direction::Down), MoveOutcome::TopOut);
        assert_eq!(piece.row, 1);
    }

    #[test]
    fn test_blocked_down_below_spawn_buffer_is_not_top_out() {
        let mut board = Board::new();
        board.fill_row(6, Some(0), PieceKind::T);
        let mut piece = spawned(&mut board, PieceKind::Square);

        for _ in 0..4 {
            assert!(try_move(&mut board, &mut piece, Direction::Down).is_moved());
        }
        assert_eq!(
            try_move(&mut board, &mut piece, Direction::Down),
            MoveOutcome::Blocked(Blocked::Collision)
        );
    }

    #[test]
    fn test_rotation_cycles_through_variations() {
        let mut board = Board::new();
        let mut piece = spawned(&mut board, PieceKind::T);
        piece_move_down(&mut board, &mut piece, 5);

        for expected in [1, 2, 0, 1] {
            assert_eq!(try_rotate(&mut board, &mut piece), Ok(()));
            assert_eq!(piece.variation, expected);
            assert_eq!(board.occupied_count(), 5);
        }
    }

    #[test]
    fn test_rotation_blocked_by_locked_cell_changes_nothing() {
        let mut board = Board::new();
        let mut piece = spawned(&mut board, PieceKind::T);
        piece_move_down(&mut board, &mut piece, 5);

        // Next variation (stem right) fills the left column of the 3x3 grid.
        board.set(piece.row + 2, piece.column, Some(PieceKind::Unit));
        let before = board.clone();

        assert_eq!(try_rotate(&mut board, &mut piece), Err(Blocked::Collision));
        assert_eq!(piece.variation, 0);
        assert_eq!(board, before);
    }

    #[test]
    fn test_rotation_blocked_by_wall() {
        let mut board = Board::new();
        let mut piece = ActivePiece::spawn(piece_def(PieceKind::L));
        piece.row = 5;
        piece.column = 8;
        spawn(&mut board, &piece);
        let before = board.clone();

        // Next variation is 4 wide and would cross the right wall.
        assert_eq!(try_rotate(&mut board, &mut piece), Err(Blocked::Wall));
        assert_eq!(piece.variation, 0);
        assert_eq!(board, before);
    }

    #[test]
    fn test_single_variation_pieces_rotate_in_place() {
        let mut board = Board::new();
        let mut piece = spawned(&mut board, PieceKind::Square);
        let before = board.clone();

        assert_eq!(try_rotate(&mut board, &mut piece), Ok(()));
        assert_eq!(piece.variation, 0);
        assert_eq!(board, before);
    }

    #[test]
    fn test_spawn_on_occupied_cells_is_top_out() {
        let mut board = Board::new();
        board.set(0, 5, Some(PieceKind::Unit));
        let piece = ActivePiece::spawn(piece_def(PieceKind::Square));

        assert_eq!(spawn(&mut board, &piece), MoveOutcome::TopOut);
        assert_eq!(board.occupied_count(), 1);
    }

    #[test]
    fn test_idle_move_keeps_piece_in_place() {
        let mut board = Board::new();
        let mut piece = spawned(&mut board, PieceKind::L);
        let before = board.clone();

        assert_eq!(try_move(&mut board, &mut piece, Direction::Idle), MoveOutcome::Moved);
        assert_eq!(board, before);
    }

    fn piece_move_down(board: &mut Board, piece: &mut ActivePiece, steps: usize) {
        for _ in 0..steps {
            assert!(try_move(board, piece, Direction::Down).is_moved());
        }
    }
}
