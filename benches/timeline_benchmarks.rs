//! 时间轴插值性能基准测试
//!
//! 测试不同关键帧数量和对象数量下的采样开销

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::Vec3;
use std::hint::black_box;
use studio_engine::animation::{
    InterpolationMode, Interpolator, KeyframeStore, ObjectId, TransformSnapshot,
};

const DURATION: f32 = 250.0;

fn build_store(keyframes: usize, objects: u64) -> KeyframeStore {
    let mut store = KeyframeStore::new();
    let step = DURATION / keyframes as f32;
    for k in 0..keyframes {
        let time = k as f32 * step;
        for id in 1..=objects {
            store.add_keyframe(
                time,
                ObjectId::new(id),
                TransformSnapshot::new(
                    Vec3::new(k as f32, id as f32, 0.0),
                    Vec3::new(0.0, k as f32 * 0.1, 0.0),
                    Vec3::ONE,
                ),
            );
        }
    }
    store
}

fn bench_sample(c: &mut Criterion) {
    let mut group = c.benchmark_group("timeline_sample");

    for keyframes in [2usize, 32, 512] {
        let store = build_store(keyframes, 16);
        group.bench_with_input(
            BenchmarkId::from_parameter(keyframes),
            &store,
            |b, store| {
                let mut t = 0.0f32;
                b.iter(|| {
                    t = (t + 0.37) % DURATION;
                    black_box(Interpolator::sample(
                        store,
                        t,
                        DURATION,
                        InterpolationMode::Smooth,
                    ))
                });
            },
        );
    }

    group.finish();
}

fn bench_add_keyframe(c: &mut Criterion) {
    c.bench_function("timeline_add_keyframe_512", |b| {
        b.iter(|| black_box(build_store(512, 1)));
    });
}

criterion_group!(benches, bench_sample, bench_add_keyframe);
criterion_main!(benches);
