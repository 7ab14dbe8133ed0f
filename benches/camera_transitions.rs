use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use garment_previewer::core::{
    ease_in_out_cubic, fit_distance, CameraAnimator, ManualClock, OrbitControls,
};
use garment_previewer::math::AABB;
use garment_previewer::PerspectiveCamera;
use glam::Vec3;

/// Benchmark: Easing curve across one transition's progress range
fn bench_easing(c: &mut Criterion) {
    c.bench_function("ease_in_out_cubic_1000_samples", |b| {
        b.iter(|| {
            let mut sum = 0.0;
            for i in 0..1000 {
                sum += ease_in_out_cubic(black_box(i as f32 / 999.0));
            }
            black_box(sum)
        })
    });
}

/// Benchmark: Fit distance for a garment-sized box
fn bench_fit_distance(c: &mut Criterion) {
    c.bench_function("fit_distance", |b| {
        b.iter(|| fit_distance(black_box(2.4), black_box(50.0), black_box(1.2)))
    });
}

/// Benchmark: Full animated model switch at different frame rates
fn bench_model_switch(c: &mut Criterion) {
    let mut group = c.benchmark_group("model_switch");

    for fps in [30.0, 60.0, 144.0] {
        group.bench_with_input(BenchmarkId::new("fps", fps as u32), &fps, |b, &fps| {
            b.iter(|| {
                let mut camera = PerspectiveCamera::new(Vec3::new(0.0, 0.0, 4.5), 50.0);
                let mut controls = OrbitControls::new(Vec3::new(0.0, -1.2, 0.0));
                let clock = ManualClock::new();
                let mut animator = CameraAnimator::new(&mut camera, Some(&mut controls), 800.0)
                    .with_clock(clock.clone());

                animator.normalize_for_model("shirt2", false);
                let mut frames = 0;
                while animator.is_animating() {
                    clock.advance(1000.0 / fps);
                    animator.tick();
                    frames += 1;
                }
                black_box(frames)
            })
        });
    }

    group.finish();
}

/// Benchmark: Framing a box, immediate apply
fn bench_fit_to_object(c: &mut Criterion) {
    let bounds = AABB::from_center_size(Vec3::new(0.0, -1.2, 0.0), Vec3::new(2.0, 2.4, 0.6));

    c.bench_function("fit_camera_to_object_immediate", |b| {
        b.iter(|| {
            let mut camera = PerspectiveCamera::new(Vec3::new(1.0, 0.5, 5.0), 50.0);
            let mut controls = OrbitControls::new(Vec3::ZERO);
            let mut animator = CameraAnimator::new(&mut camera, Some(&mut controls), 800.0);
            animator.fit_camera_to_object(black_box(&bounds), 1.2, true);
            drop(animator);
            black_box(camera.position)
        })
    });
}

criterion_group!(
    benches,
    bench_easing,
    bench_fit_distance,
    bench_model_switch,
    bench_fit_to_object
);
criterion_main!(benches);
