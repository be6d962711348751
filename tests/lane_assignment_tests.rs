use clinical_timeline::TimelineError;
use clinical_timeline::core::{
    LaneAssigner, LaneItem, assign_lanes, assign_span_lanes, lane_count,
};

#[test]
fn overlapping_neighbor_is_pushed_to_second_row() {
    let items = [
        LaneItem::new(0.0, 50.0),
        LaneItem::new(50.0, 50.0),
        LaneItem::new(200.0, 50.0),
    ];

    let rows = assign_lanes(&items, 20.0).expect("assign");
    assert_eq!(rows, vec![0, 1, 0]);
    assert_eq!(lane_count(&rows), 2);
}

#[test]
fn empty_input_uses_no_rows() {
    let rows = LaneAssigner.assign(&[], 10.0).expect("assign");
    assert!(rows.is_empty());
    assert_eq!(lane_count(&rows), 0);
}

#[test]
fn gap_is_inclusive_at_the_boundary() {
    // Second left edge is exactly `right + gap` past the first card.
    let items = [LaneItem::new(0.0, 10.0), LaneItem::new(25.0, 10.0)];
    assert_eq!(assign_lanes(&items, 5.0).expect("assign"), vec![0, 0]);
    assert_eq!(assign_lanes(&items, 5.5).expect("assign"), vec![0, 1]);
}

#[test]
fn dense_cluster_fills_rows_then_reuses_lowest_free_row() {
    let items: Vec<LaneItem> = [0.0, 10.0, 20.0, 30.0, 200.0, 205.0]
        .into_iter()
        .map(|position| LaneItem::new(position, 40.0))
        .collect();

    let rows = assign_lanes(&items, 4.0).expect("assign");
    assert_eq!(rows, vec![0, 1, 2, 3, 0, 1]);
}

#[test]
fn coincident_positions_each_get_their_own_row() {
    let items = [
        LaneItem::new(100.0, 30.0),
        LaneItem::new(100.0, 30.0),
        LaneItem::new(100.0, 30.0),
    ];
    assert_eq!(assign_lanes(&items, 0.0).expect("assign"), vec![0, 1, 2]);
}

#[test]
fn zero_width_items_share_a_row_without_gap() {
    let items = [LaneItem::new(5.0, 0.0), LaneItem::new(5.0, 0.0)];
    assert_eq!(assign_lanes(&items, 0.0).expect("assign"), vec![0, 0]);
}

#[test]
fn unsorted_input_is_rejected() {
    let items = [LaneItem::new(10.0, 1.0), LaneItem::new(5.0, 1.0)];
    let err = assign_lanes(&items, 1.0).expect_err("unsorted");
    assert!(matches!(err, TimelineError::InvalidInput(_)));
}

#[test]
fn invalid_geometry_is_rejected() {
    let nan = [LaneItem::new(f64::NAN, 1.0)];
    assert!(assign_lanes(&nan, 1.0).is_err());

    let negative_width = [LaneItem::new(1.0, -1.0)];
    assert!(assign_lanes(&negative_width, 1.0).is_err());

    let fine = [LaneItem::new(1.0, 1.0)];
    assert!(assign_lanes(&fine, -0.5).is_err());
    assert!(assign_lanes(&fine, f64::INFINITY).is_err());
}

#[test]
fn spans_of_mixed_width_share_rows_only_when_disjoint() {
    let spans = [(0.0, 300.0), (100.0, 150.0), (160.0, 400.0), (300.0, 320.0)];

    let rows = assign_span_lanes(&spans, 0.0).expect("assign");

    assert_eq!(rows, vec![0, 1, 1, 0]);
    assert_eq!(lane_count(&rows), 2);
    assert!(assign_span_lanes(&[], 0.0).expect("empty").is_empty());
}

#[test]
fn invalid_spans_are_rejected() {
    let unsorted = [(10.0, 20.0), (5.0, 30.0)];
    assert!(matches!(
        assign_span_lanes(&unsorted, 0.0),
        Err(TimelineError::InvalidInput(_))
    ));

    assert!(assign_span_lanes(&[(20.0, 10.0)], 0.0).is_err());
    assert!(assign_span_lanes(&[(0.0, f64::INFINITY)], 0.0).is_err());
    assert!(assign_span_lanes(&[(0.0, 1.0)], -1.0).is_err());
}
