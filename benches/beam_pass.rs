use criterion::{black_box, criterion_group, criterion_main, Criterion};
use l1t::{beam_pass, decode_level, Command, LevelSession, LevelSource};

/// A large room with a laser on every other row bouncing through mirrors.
fn mirror_hall(size: usize) -> String {
    let mut rows = Vec::with_capacity(size);
    for r in 0..size {
        let row: String = (0..size)
            .map(|c| match (r, c) {
                (0, 0) => 'X',
                (r, 0) if r % 2 == 1 => '4',
                (r, c) if c % 7 == 3 && r % 3 == 0 => '/',
                (r, c) if c % 5 == 2 && r % 4 == 1 => '\\',
                (r, c) if c == size - 1 && r % 2 == 0 => 'S',
                _ => ' ',
            })
            .collect();
        rows.push(row);
    }
    rows.join("\n")
}

fn bench_beam_pass(c: &mut Criterion) {
    let text = mirror_hall(64);
    let mut level = match decode_level(&text) {
        Ok(level) => level,
        Err(e) => panic!("bench level does not load: {}", e),
    };

    c.bench_function("beam_pass 64x64", |b| {
        b.iter(|| beam_pass(black_box(&mut level.grid), &level.markers))
    });
}

fn bench_session_step(c: &mut Criterion) {
    c.bench_function("session step on first built-in level", |b| {
        b.iter_batched(
            || LevelSession::load(LevelSource::Builtin(0)).ok(),
            |session| {
                if let Some(mut session) = session {
                    session.step(black_box(Command::MoveRight));
                }
            },
            criterion::BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_beam_pass, bench_session_step);
criterion_main!(benches);
