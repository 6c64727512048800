use criterion::{black_box, criterion_group, criterion_main, Criterion};
use blockfall::core::{check_collision, GameState, PieceGenerator, Player, Stage};
use blockfall::engine::Driver;
use blockfall::types::{GameAction, PieceKind, RotationDir, STAGE_WIDTH};

fn bench_advance(c: &mut Criterion) {
    let mut driver = Driver::new(12345);
    driver.start();

    c.bench_function("driver_advance_16ms", |b| {
        b.iter(|| {
            if driver.is_game_over() {
                driver.apply_action(GameAction::Restart);
            }
            driver.advance(black_box(16));
        })
    });
}

fn bench_sweep(c: &mut Criterion) {
    c.bench_function("sweep_4_rows", |b| {
        b.iter(|| {
            let mut stage = Stage::new();
            // Fill bottom 4 rows
            for y in 16..20 {
                for x in 0..STAGE_WIDTH as i8 {
                    stage.set(x, y, Some(PieceKind::I));
                }
            }
            stage.sweep_rows()
        })
    });
}

fn bench_draw(c: &mut Criterion) {
    let mut generator = PieceGenerator::new(12345);

    c.bench_function("draw_piece", |b| b.iter(|| generator.draw()));
}

fn bench_collision(c: &mut Criterion) {
    let stage = Stage::new();
    let player = Player::spawn(PieceKind::T);

    c.bench_function("check_collision", |b| {
        b.iter(|| check_collision(black_box(&player), &stage, black_box((0, 1))))
    });
}

fn bench_rotate(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.start();

    c.bench_function("rotate", |b| {
        b.iter(|| {
            state.rotate(RotationDir::Clockwise);
        })
    });
}

fn bench_compose(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.start();

    c.bench_function("compose_frame", |b| b.iter(|| black_box(state.frame())));
}

criterion_group!(
    benches,
    bench_advance,
    bench_sweep,
    bench_draw,
    bench_collision,
    bench_rotate,
    bench_compose
);
criterion_main!(benches);
