use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use insolation::{energy, irradiance};

pub fn criterion_benchmark(c: &mut Criterion) {
    let mut g = c.benchmark_group("Clear-sky insolation");
    let timestamp = NaiveDate::from_ymd_opt(2025, 3, 3)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap();

    g.bench_function("declination_angle", |b| {
        b.iter(|| black_box(irradiance::declination_angle(black_box(62))))
    });

    g.bench_function("equation_of_time", |b| {
        b.iter(|| black_box(irradiance::equation_of_time(black_box(62))))
    });

    g.bench_function("compute_intensity", |b| {
        b.iter(|| {
            black_box(irradiance::compute_intensity(
                black_box(40.713),
                black_box(-74.006),
                &timestamp,
            ))
        })
    });

    // Entrypoint: one year at one-minute resolution
    let mut builder = irradiance::IrradianceInputsBuilder::default();
    builder.start(timestamp);
    builder.offsets((0..365 * 1440).map(|m| m * 60).collect());
    builder.latitude(30.29);
    builder.longitude(-97.74);
    builder.parallel_calcs(true);
    let inputs = builder.build().unwrap();

    g.bench_function("calculate_samples", |b| {
        b.iter(|| black_box(irradiance::calculate_samples(&inputs)))
    });

    let samples = irradiance::calculate_samples(&inputs);
    g.bench_function("integrate", |b| {
        b.iter(|| black_box(energy::integrate(&samples)))
    });

    g.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
