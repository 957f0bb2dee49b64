use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tui_blockfall::core::{shape_cells, GameState, Grid, Snapshot};
use tui_blockfall::types::{Cell, GameEvent, ShapeKind, LIMIT_X, LIMIT_Y, MARGIN_X};

fn bench_tick(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.start();

    c.bench_function("gravity_tick", |b| {
        b.iter(|| {
            if !state.running() {
                while state.wipe_step() {}
                state.restart();
            }
            state.handle(black_box(GameEvent::Tick))
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut grid = Grid::new();
            // Fill bottom 4 rows
            for row in LIMIT_Y - 4..LIMIT_Y {
                for col in MARGIN_X..LIMIT_X {
                    grid.set_cell(row, col, Cell::Block(ShapeKind::I));
                }
            }
            grid.clear_full_rows()
        })
    });
}

fn bench_player_moves(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.start();

    c.bench_function("move_left_right", |b| {
        b.iter(|| {
            state.handle(black_box(GameEvent::MoveLeft));
            state.handle(black_box(GameEvent::MoveRight))
        })
    });
}

fn bench_rotate(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.start();
    state.handle(GameEvent::SoftDrop);
    state.handle(GameEvent::SoftDrop);

    c.bench_function("rotate_cw", |b| {
        b.iter(|| state.handle(black_box(GameEvent::RotateCw)))
    });
}

fn bench_shape_cells(c: &mut Criterion) {
    c.bench_function("shape_cells_all", |b| {
        b.iter(|| {
            for kind in ShapeKind::ALL {
                for rotation in 0..4 {
                    black_box(shape_cells(kind, black_box(rotation)));
                }
            }
        })
    });
}

fn bench_snapshot(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.start();
    let mut snap = Snapshot::default();

    c.bench_function("snapshot_into", |b| {
        b.iter(|| {
            state.snapshot_into(&mut snap);
            black_box(snap.occupied_count())
        })
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_line_clear,
    bench_player_moves,
    bench_rotate,
    bench_shape_cells,
    bench_snapshot
);
criterion_main!(benches);
