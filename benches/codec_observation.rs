use criterion::{black_box, criterion_group, criterion_main, Criterion};

use tetris_gym::adapter::{ActionCodec, EnvConfig, Profile, TetrisEnv};
use tetris_gym::core::{Game, GameEngine};

fn bench_decode(c: &mut Criterion) {
    c.bench_function("decode_placement_all_codes", |b| {
        b.iter(|| {
            for code in 0..41 {
                let _ = black_box(ActionCodec::Placement.decode(black_box(code)));
            }
        })
    });
}

fn bench_observation(c: &mut Criterion) {
    let engine = Game::new(12345);
    let raw = engine.state();
    let builder = Profile::Primitive.observation_builder();
    c.bench_function("build_observation", |b| {
        b.iter(|| black_box(builder.build(black_box(&raw))))
    });
}

fn bench_step(c: &mut Criterion) {
    let mut env = TetrisEnv::new(Game::new(12345), &EnvConfig::default()).unwrap();
    let _ = env.reset(None, None);
    let mut code = 0;
    c.bench_function("env_step_primitive", |b| {
        b.iter(|| {
            code = (code + 1) % 9;
            match env.step(black_box(code)) {
                Ok(result) if !result.is_over() => {}
                _ => {
                    let _ = env.reset(None, None);
                }
            }
        })
    });
}

criterion_group!(benches, bench_decode, bench_observation, bench_step);
criterion_main!(benches);
