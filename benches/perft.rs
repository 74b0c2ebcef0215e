use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::StdRng;
use raumschach::controller::GameController;
use raumschach::engine::player::Player;
use raumschach::engine::search::{SearchLimits, find_best_move};
use raumschach::engine::table::TranspositionTable;
use raumschach::game::board::Board;
use raumschach::game::moves::MovePool;
use raumschach::game::pieces::Color;

fn perft_benchmark(c: &mut Criterion) {
    let move_pool = MovePool::new(&mut StdRng::seed_from_u64(42));

    let mut group = c.benchmark_group("perft_starting_position");
    group.sample_size(10);

    for depth in 1..=3 {
        group.bench_with_input(BenchmarkId::new("depth", depth), &depth, |b, &depth| {
            b.iter(|| {
                let mut controller =
                    GameController::new(&move_pool, [Player::Human, Player::Human]);
                black_box(controller.perft(depth))
            });
        });
    }
    group.finish();
}

fn search_benchmark(c: &mut Criterion) {
    let move_pool = MovePool::new(&mut StdRng::seed_from_u64(42));

    let mut group = c.benchmark_group("search_starting_position");
    group.sample_size(10);

    for depth in 1..=2 {
        group.bench_with_input(BenchmarkId::new("depth", depth), &depth, |b, &depth| {
            b.iter(|| {
                let mut board = Board::starting(&move_pool);
                let mut tt = TranspositionTable::new();
                black_box(find_best_move(
                    &mut board,
                    Color::White,
                    SearchLimits { depth, threads: 1 },
                    &mut tt,
                    None,
                ))
            });
        });
    }
    group.finish();
}

criterion_group!(benches, perft_benchmark, search_benchmark);
criterion_main!(benches);
