use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use blockfall::core::{piece_def, spawn, try_move, try_rotate, ActivePiece, Board, GameState};
use blockfall::types::{Direction, PieceKind, BOARD_COLUMNS, TOTAL_ROWS};

fn bench_tick(c: &mut Criterion) {
    let mut state = GameState::seeded(12345);
    state.start(0);
    let mut now = 0u64;

    c.bench_function("game_tick_16ms", |b| {
        b.iter(|| {
            now += 16;
            if !state.is_running() {
                state.start(now);
            }
            state.tick(black_box(now));
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut board = Board::new();
            for row in (TOTAL_ROWS - 4)..TOTAL_ROWS {
                board.fill_row(row as i8, None, PieceKind::L);
            }
            black_box(board.clear_full_rows());
        })
    });
}

fn bench_try_move_on_cluttered_board(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(7);
    let mut board = Board::new();
    for row in 12..TOTAL_ROWS as i8 {
        for column in 0..BOARD_COLUMNS as i8 {
            if rng.gen_bool(0.4) {
                board.set(row, column, Some(PieceKind::Unit));
            }
        }
    }
    let mut piece = ActivePiece::spawn(piece_def(PieceKind::T));
    spawn(&mut board, &piece);

    c.bench_function("try_move", |b| {
        b.iter(|| {
            let mut local = board.clone();
            let mut p = piece;
            try_move(&mut local, &mut p, black_box(Direction::Left));
            try_move(&mut local, &mut p, black_box(Direction::Down));
        })
    });

    c.bench_function("try_rotate", |b| {
        b.iter(|| {
            let _ = try_rotate(&mut board, &mut piece);
        })
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_line_clear,
    bench_try_move_on_cluttered_board
);
criterion_main!(benches);
