use criterion::{black_box, criterion_group, criterion_main, Criterion};
use blockdrop::core::{Board, GameSnapshot, GameState};
use blockdrop::term::{FrameBuffer, GameView, Viewport};
use blockdrop::types::{GameAction, PieceKind};

fn bench_tick(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.start();

    c.bench_function("game_tick_16ms", |b| {
        b.iter(|| {
            if state.game_over() {
                state.reset();
            }
            state.tick(black_box(16));
            state.drain_events().count()
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut board = Board::default();
            for y in 0..4 {
                for x in 0..10 {
                    board.set(x, y, Some(PieceKind::I));
                }
            }
            board.set(3, 4, Some(PieceKind::T));
            board.clear_full_rows()
        })
    });
}

fn bench_hard_drop_cycle(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.start();

    c.bench_function("hard_drop_lock_spawn", |b| {
        b.iter(|| {
            if state.game_over() {
                state.reset();
            }
            state.apply_action(GameAction::HardDrop);
            state.drain_events().count()
        })
    });
}

fn bench_move_and_rotate(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.start();

    c.bench_function("move_and_rotate", |b| {
        b.iter(|| {
            state.apply_action(GameAction::MoveRight);
            state.apply_action(GameAction::Rotate);
            state.apply_action(GameAction::MoveLeft);
        })
    });
}

fn bench_render(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.start();
    let view = GameView::default();
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(80, 24);

    c.bench_function("snapshot_and_render", |b| {
        b.iter(|| {
            state.snapshot_into(&mut snap);
            view.render_into(&snap, Viewport::new(80, 24), &mut fb);
        })
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_line_clear,
    bench_hard_drop_cycle,
    bench_move_and_rotate,
    bench_render
);
criterion_main!(benches);
