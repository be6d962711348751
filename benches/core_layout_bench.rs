use chrono::{DateTime, Duration, TimeZone, Utc};
use clinical_timeline::core::{
    AnchorScale, Encounter, IntervalItem, LaneItem, PointEvent, Series, ValueSample, assign_lanes,
    cluster_events,
};
use clinical_timeline::render::NullRenderer;
use clinical_timeline::{TimelineConfig, TimelineEngine};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2015, 1, 1, 8, 0, 0)
        .single()
        .expect("valid base time")
}

fn bench_anchor_scale_build_and_map_1k(c: &mut Criterion) {
    let start = base_time();
    let instants: Vec<DateTime<Utc>> = (0..1_000)
        .map(|i| start + Duration::days(i * 3 + (i % 7)))
        .collect();
    let probe = start + Duration::days(1_234);

    c.bench_function("anchor_scale_build_and_map_1k", |b| {
        b.iter(|| {
            let scale = AnchorScale::build(black_box(&instants), 1920.0, 40.0)
                .expect("valid geometry");
            let _ = scale.map(black_box(probe)).expect("non-empty scale");
        })
    });
}

fn bench_lane_assignment_10k(c: &mut Criterion) {
    let items: Vec<LaneItem> = (0..10_000)
        .map(|i| LaneItem::new(i as f64 * 13.0, 60.0))
        .collect();

    c.bench_function("lane_assignment_10k", |b| {
        b.iter(|| {
            let _ = assign_lanes(black_box(&items), black_box(8.0))
                .expect("sorted items");
        })
    });
}

fn bench_event_clustering_5k(c: &mut Criterion) {
    let start = base_time();
    let anchors: Vec<DateTime<Utc>> = (0..200).map(|i| start + Duration::days(i * 10)).collect();
    let scale = AnchorScale::build(&anchors, 1920.0, 40.0).expect("valid geometry");
    let events: Vec<PointEvent> = (0..5_000)
        .map(|i| PointEvent::new(start + Duration::hours(i * 9), format!("event-{i}")))
        .collect();

    c.bench_function("event_clustering_5k", |b| {
        b.iter(|| {
            let _ = cluster_events(black_box(&events), black_box(&scale))
                .expect("clustering should succeed");
        })
    });
}

fn bench_engine_snapshot_json(c: &mut Criterion) {
    let start = base_time();
    let config = TimelineConfig::new(1600.0, 48.0);
    let mut engine =
        TimelineEngine::new(NullRenderer::default(), config, start + Duration::days(2_000))
            .expect("engine init");

    let encounters: Vec<Encounter> = (0..120)
        .map(|i| Encounter::new(start + Duration::days(i * 15), format!("visit-{i}")))
        .collect();
    engine.set_encounters(encounters).expect("valid encounters");

    let medications: Vec<IntervalItem> = (0..60)
        .map(|i| {
            let begin = start + Duration::days(i * 30);
            let end = (i % 4 != 0).then(|| begin + Duration::days(90));
            IntervalItem::new(begin, end, format!("drug-{i}"), format!("class-{}", i % 6))
        })
        .collect();
    engine.set_medications(medications);

    let samples: Vec<ValueSample> = (0..500)
        .map(|i| ValueSample::new(start + Duration::days(i * 3), 0.8 + (i % 11) as f64 * 0.1))
        .collect();
    engine.set_lab_series(vec![
        Series::new("Creatinine")
            .with_unit("mg/dL")
            .with_samples(samples),
    ]);

    let events: Vec<PointEvent> = (0..400)
        .map(|i| PointEvent::new(start + Duration::hours(i * 40), format!("event-{i}")))
        .collect();
    engine.set_events(events);
    engine.set_metadata("patient-id", "bench-001");

    c.bench_function("engine_snapshot_json", |b| {
        b.iter(|| {
            let _ = engine
                .snapshot_json_pretty()
                .expect("snapshot json should succeed");
        })
    });
}

criterion_group!(
    benches,
    bench_anchor_scale_build_and_map_1k,
    bench_lane_assignment_10k,
    bench_event_clustering_5k,
    bench_engine_snapshot_json
);
criterion_main!(benches);
