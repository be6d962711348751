use chrono::{DateTime, TimeZone, Utc};
use clinical_timeline::TimelineError;
use clinical_timeline::core::{
    AnchorScale, BandZone, Encounter, IntervalItem, PointEvent, ReferenceBand, Series,
    ValueSample,
};
use clinical_timeline::tracks::{
    CardGeometry, IntervalGeometry, layout_encounters, layout_events, layout_medications,
    layout_value_chart, layout_value_track,
};

fn day(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .expect("valid date")
}

fn scale() -> AnchorScale {
    AnchorScale::build(
        &[day(2020, 1, 1), day(2020, 6, 1), day(2021, 1, 1)],
        900.0,
        50.0,
    )
    .expect("scale")
}

const ROWS: IntervalGeometry = IntervalGeometry {
    row_height: 20.0,
    bar_height: 12.0,
};

#[test]
fn encounter_markers_follow_chronological_order() {
    let encounters = vec![
        Encounter::new(day(2021, 1, 1), "Follow-up"),
        Encounter::new(day(2020, 1, 1), "Intake"),
        Encounter::new(day(2020, 6, 1), "Admission"),
    ];

    let track = layout_encounters(&encounters, &scale(), 30.0).expect("track");
    let xs: Vec<f64> = track.markers.iter().map(|marker| marker.x).collect();
    assert_eq!(track.markers[0].label, "Intake");
    assert!((xs[0] - 50.0).abs() <= 1e-9);
    assert!((xs[1] - 450.0).abs() <= 1e-9);
    assert!((xs[2] - 850.0).abs() <= 1e-9);
}

#[test]
fn medications_get_one_row_per_group() {
    let items = vec![
        IntervalItem::new(day(2020, 2, 1), Some(day(2020, 4, 1)), "Metformin 500mg", "metformin"),
        IntervalItem::new(day(2019, 6, 1), Some(day(2020, 1, 1)), "Lisinopril", "lisinopril"),
        IntervalItem::new(day(2020, 5, 1), None, "Metformin 1g", "metformin"),
    ];

    let track = layout_medications(&items, &scale(), day(2021, 1, 1), ROWS).expect("track");

    let keys: Vec<&str> = track.groups.iter().map(|group| group.key.as_str()).collect();
    assert_eq!(keys, vec!["lisinopril", "metformin"]);
    assert_eq!(track.row_count, 2);
    assert!((track.height - 40.0).abs() <= 1e-12);
    assert_eq!(track.bars.len(), 3);

    let lisinopril = &track.bars[0];
    assert_eq!(lisinopril.row, 0);
    assert!(lisinopril.x_start < 50.0);
    assert!((lisinopril.x_end - 50.0).abs() <= 1e-9);
    assert!((lisinopril.y - 4.0).abs() <= 1e-12);

    let ongoing = &track.bars[2];
    assert_eq!(ongoing.row, 1);
    assert!(ongoing.open_ended);
    assert_eq!(ongoing.end, day(2021, 1, 1));
    assert!((ongoing.x_end - 850.0).abs() <= 1e-9);
    assert!((ongoing.y - 24.0).abs() <= 1e-12);
}

#[test]
fn overlapping_courses_of_one_group_get_separate_sub_rows() {
    let items = vec![
        IntervalItem::new(day(2020, 5, 1), None, "Metformin 1000mg", "metformin"),
        IntervalItem::new(day(2020, 1, 1), Some(day(2020, 8, 1)), "Metformin 500mg", "metformin"),
        IntervalItem::new(day(2020, 3, 1), Some(day(2020, 4, 1)), "Lisinopril", "lisinopril"),
        IntervalItem::new(day(2020, 9, 1), Some(day(2020, 10, 1)), "Metformin XR", "metformin"),
    ];

    let track = layout_medications(&items, &scale(), day(2021, 1, 1), ROWS).expect("track");
    let by_label = |label: &str| {
        track
            .bars
            .iter()
            .find(|bar| bar.label == label)
            .expect("bar present")
    };

    let low_dose = by_label("Metformin 500mg");
    let high_dose = by_label("Metformin 1000mg");
    let extended = by_label("Metformin XR");
    let lisinopril = by_label("Lisinopril");

    assert!(high_dose.x_start < low_dose.x_end);
    assert_eq!((low_dose.row, low_dose.lane), (0, 0));
    assert_eq!((high_dose.row, high_dose.lane), (1, 1));
    assert_eq!((extended.row, extended.lane), (0, 0));
    assert_eq!(lisinopril.row, 2);
    assert!((high_dose.y - 24.0).abs() <= 1e-12);
    assert!((lisinopril.y - 44.0).abs() <= 1e-12);

    assert_eq!(track.groups[0].key, "metformin");
    assert_eq!(track.groups[0].row_count, 2);
    assert_eq!(track.groups[1].first_row, 2);
    assert_eq!(track.row_count, 3);
    assert!((track.height - 60.0).abs() <= 1e-12);

    for (i, a) in track.bars.iter().enumerate() {
        for b in &track.bars[i + 1..] {
            if a.row == b.row {
                assert!(a.x_end <= b.x_start || b.x_end <= a.x_start);
            }
        }
    }
}

#[test]
fn medication_ending_before_start_is_rejected() {
    let items = vec![IntervalItem::new(
        day(2020, 5, 1),
        Some(day(2020, 4, 1)),
        "Bad",
        "bad",
    )];
    let err = layout_medications(&items, &scale(), day(2021, 1, 1), ROWS).expect_err("bad");
    assert!(matches!(err, TimelineError::InvalidInput(_)));

    let open = vec![IntervalItem::new(day(2022, 1, 1), None, "Future", "future")];
    assert!(layout_medications(&open, &scale(), day(2021, 1, 1), ROWS).is_err());
}

#[test]
fn lab_chart_projects_samples_and_zones() {
    let series = Series::new("Potassium")
        .with_unit("mmol/L")
        .with_band(ReferenceBand::new(3.5, 5.0).expect("band"))
        .with_samples(vec![
            ValueSample::new(day(2020, 6, 1), 5.6),
            ValueSample::new(day(2020, 1, 1), 3.1),
        ]);

    let chart = layout_value_chart(&series, &scale(), 100.0)
        .expect("chart")
        .expect("non-empty series");

    assert_eq!(chart.points.len(), 2);
    assert_eq!(chart.points[0].zone, BandZone::Below);
    assert_eq!(chart.points[1].zone, BandZone::Above);
    assert!((chart.points[0].x - 50.0).abs() <= 1e-9);
    assert!(chart.points[1].y < chart.points[0].y);
    for point in &chart.points {
        assert!((0.0..=100.0).contains(&point.y));
    }
    assert_eq!(chart.segments.len(), 3);
}

#[test]
fn empty_series_renders_no_chart() {
    let chart = layout_value_chart(&Series::new("Troponin"), &scale(), 100.0).expect("layout");
    assert!(chart.is_none());
}

#[test]
fn value_track_skips_failing_series_and_stacks_the_rest() {
    let good = Series::new("CRP").with_samples(vec![ValueSample::new(day(2020, 3, 1), 12.0)]);
    let bad = Series::new("Broken").with_samples(vec![ValueSample::new(day(2020, 3, 1), f64::NAN)]);
    let empty = Series::new("Empty");
    let also_good = Series::new("WBC").with_samples(vec![ValueSample::new(day(2020, 7, 1), 9.1)]);

    let track = layout_value_track(&[good, bad, empty, also_good], &scale(), 80.0, 10.0);

    let names: Vec<&str> = track.charts.iter().map(|chart| chart.name.as_str()).collect();
    assert_eq!(names, vec!["CRP", "WBC"]);
    assert_eq!(track.skipped, vec!["Broken".to_owned()]);
    assert!((track.height - 170.0).abs() <= 1e-12);
}

#[test]
fn event_track_height_counts_rows() {
    let geometry = CardGeometry {
        half_width: 80.0,
        gap: 8.0,
        row_height: 50.0,
    };
    let events = vec![
        PointEvent::new(day(2020, 1, 1), "A"),
        PointEvent::new(day(2020, 1, 2), "B"),
        PointEvent::new(day(2020, 1, 3), "C"),
    ];

    let track = layout_events(&events, &scale(), geometry).expect("track");
    assert_eq!(track.lane_count, 3);
    assert!((track.height - 150.0).abs() <= 1e-12);
    assert!((track.card_top(2) - 100.0).abs() <= 1e-12);

    let empty = layout_events(&[], &scale(), geometry).expect("empty");
    assert_eq!(empty.lane_count, 0);
    assert_eq!(empty.height, 0.0);
}
