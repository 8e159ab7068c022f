use criterion::{black_box, criterion_group, criterion_main, Criterion, BenchmarkId};
use coup_cli::{ChallengePolicy, GameConfig, GameSession, NullSink, TurnEngine};

fn complete_game(num_players: usize, seed: u64) {
    let config = GameConfig { num_players, seed: Some(seed), all_computer: true, ..GameConfig::default() };
    let mut session = black_box(GameSession::new(&config).unwrap());
    let mut engine = TurnEngine::computer_only(&session, ChallengePolicy::Random(0.2), seed);

    engine.play_game(&mut session, &mut NullSink).unwrap();
}

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("complete_game");
    for num_players in 2..=6usize {
        group.bench_with_input(BenchmarkId::from_parameter(num_players), &num_players, |b, &num_players| {
            let mut seed = 0u64;
            b.iter(|| {
                seed += 1;
                complete_game(num_players, seed)
            })
        });
    }
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
