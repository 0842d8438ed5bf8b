//! Benchmarks for the per-frame choreography pipeline

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use gesture_choreography::{
    config::Config,
    engine::ChoreographyEngine,
    gesture::HandTrackingState,
    integrator::PoseIntegrator,
    mode::Mode,
    pose::{Blend, Euler, Pose, Vec3},
};

fn engine_with(decor_count: usize) -> ChoreographyEngine {
    let mut config = Config::default();
    config.scene.seed = Some(1);
    config.scene.decor_count = decor_count;
    ChoreographyEngine::from_config(&config)
}

fn benchmark_render_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_frame");
    let tracking = HandTrackingState {
        x: 0.3,
        y: -0.2,
        is_tracking: true,
    };

    for count in [100, 500, 1000] {
        for mode in [Mode::Tree, Mode::Scatter, Mode::Focus] {
            let mut engine = engine_with(count);
            engine.set_mode(mode);

            group.bench_with_input(BenchmarkId::new(mode.to_string(), count), &count, |b, _| {
                b.iter(|| engine.render_frame(black_box(&tracking)));
            });
        }
    }

    group.finish();
}

fn benchmark_mode_switching(c: &mut Criterion) {
    let mut group = c.benchmark_group("mode_switching");
    let tracking = HandTrackingState::new();

    for count in [100, 1000] {
        let mut engine = engine_with(count);
        group.bench_with_input(BenchmarkId::new("cycle_60_frames", count), &count, |b, _| {
            b.iter(|| {
                for mode in [Mode::Scatter, Mode::Focus, Mode::Tree] {
                    black_box(engine.set_mode(mode));
                    for _ in 0..20 {
                        engine.render_frame(&tracking);
                    }
                }
            });
        });
    }

    group.finish();
}

fn benchmark_blend(c: &mut Criterion) {
    let mut group = c.benchmark_group("blend");
    let integrator = PoseIntegrator::default();
    let target = Pose {
        position: Vec3::new(3.0, -2.0, 10.0),
        rotation: Euler::new(0.4, 1.2, -0.3),
        scale: Vec3::repeat(4.5),
    };

    group.bench_function("pose", |b| {
        let mut pose = Pose::default();
        b.iter(|| integrator.integrate(black_box(&mut pose), black_box(&target)));
    });

    group.bench_function("euler", |b| {
        let current = Euler::new(0.1, 0.2, 0.3);
        b.iter(|| black_box(current.blend(black_box(&target.rotation), 0.04)));
    });

    group.finish();
}

criterion_group!(benches, benchmark_render_frame, benchmark_mode_switching, benchmark_blend);
criterion_main!(benches);
