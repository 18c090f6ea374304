use criterion::black_box;
use criterion::criterion_group;
use criterion::criterion_main;
use criterion::BenchmarkId;
use criterion::Criterion;
use hitmiss::{
    Domain, Envelope, RejectionSampler, TransformationSampler, UniformSource,
};

fn bench_rejection(c: &mut Criterion) {
    let mut group = c.benchmark_group("rejection exp(-x/3)");
    // wider domains cost more proposals per accepted sample
    for xmax in [15.0, 60.0, 240.0] {
        let sampler = RejectionSampler::new(
            |x: f64| (-x / 3.0).exp(),
            Domain::new(0.0, xmax),
            Envelope::from_max(1.0),
        )
        .unwrap();
        group.bench_with_input(
            BenchmarkId::from_parameter(xmax),
            &sampler,
            |b, sampler| {
                let mut src = UniformSource::seed_from_u64(1337);
                b.iter(|| {
                    let run = sampler.sample(1_000, &mut src).unwrap();
                    black_box(run.integral_estimate());
                })
            },
        );
    }
    group.finish();
}

fn bench_transformation(c: &mut Criterion) {
    c.bench_function("transformation exp(-x/3)", |b| {
        let sampler = TransformationSampler::new(|u: f64| -3.0 * (-u).ln_1p());
        let mut src = UniformSource::seed_from_u64(1337);
        b.iter(|| {
            let samples = sampler.sample(1_000, &mut src).unwrap();
            black_box(samples);
        })
    });
}

fn bench_uniform(c: &mut Criterion) {
    c.bench_function("uniform draw_many", |b| {
        let mut src = UniformSource::seed_from_u64(1337);
        b.iter(|| black_box(src.draw_many(-1.0, 1.0, 1_000).unwrap()))
    });
}

criterion_group!(
    samplers,
    bench_rejection,
    bench_transformation,
    bench_uniform
);
criterion_main!(samplers);
