use criterion::{black_box, criterion_group, criterion_main, Criterion};
use twenty_questions::game::input::{classify_free_text, ActionIntent};
use twenty_questions::game::{classify_directive, GameStatus, PlayerType, Players};

fn classify_all_statuses() {
    let players = Players::new(PlayerType::Human, PlayerType::Automated);
    for status in GameStatus::ALL {
        black_box(classify_directive(black_box(status), false, &players));
    }
}

fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("classify 10 statuses", |b| b.iter(classify_all_statuses));
    c.bench_function("disambiguate guess prefix", |b| {
        b.iter(|| classify_free_text(black_box("  GUESS:  red apple "), ActionIntent::Question))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
