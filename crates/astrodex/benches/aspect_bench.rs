use astrodex::ephemeris::BodyPosition;
use astrodex::{AspectCalculator, AspectType, Body};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::collections::BTreeMap;

fn bench_calculate_aspect(c: &mut Criterion) {
    let calculator = AspectCalculator::new();

    c.bench_function("calculate_aspect", |b| {
        b.iter(|| {
            calculator.calculate_aspect(
                black_box(100.0),
                black_box(218.0),
                black_box(AspectType::Trine.degrees()),
                black_box(AspectType::Trine.max_orb()),
            )
        })
    });
}

fn bench_all_aspects(c: &mut Criterion) {
    let calculator = AspectCalculator::new();

    let mut positions = BTreeMap::new();
    let mut motions = BTreeMap::new();
    for (i, body) in Body::ALL.iter().enumerate() {
        positions.insert(
            *body,
            BodyPosition {
                longitude: (i as f64) * 47.0,
                latitude: 0.0,
                distance: 1.0,
            },
        );
        motions.insert(*body, body.average_daily_motion());
    }

    c.bench_function("all_aspects", |b| {
        b.iter(|| calculator.all_aspects(black_box(&positions), black_box(&motions)))
    });
}

criterion_group!(benches, bench_calculate_aspect, bench_all_aspects);
criterion_main!(benches);
