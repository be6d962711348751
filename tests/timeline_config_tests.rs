use clinical_timeline::TimelineError;
use clinical_timeline::api::{RenderStyle, TimelineConfig};
use clinical_timeline::render::Color;

#[test]
fn config_roundtrips_through_json_with_defaults() {
    let json = r#"{ "width": 1024.0, "padding": 32.0 }"#;
    let config: TimelineConfig = serde_json::from_str(json).expect("parse");

    assert_eq!(config, TimelineConfig::new(1024.0, 32.0));
    config.validate().expect("defaults are valid");

    let encoded = serde_json::to_string(&config).expect("encode");
    let decoded: TimelineConfig = serde_json::from_str(&encoded).expect("decode");
    assert_eq!(decoded.card_width_px, config.card_width_px);
    assert_eq!(decoded.style.band, config.style.band);
}

#[test]
fn builders_override_geometry() {
    let config = TimelineConfig::new(800.0, 40.0)
        .with_card_geometry(120.0, 6.0)
        .with_row_height(44.0)
        .with_chart_height(90.0)
        .with_medication_rows(18.0, 10.0);

    assert_eq!(config.card_half_width(), 60.0);
    assert_eq!(config.row_height_px, 44.0);
    assert_eq!(config.chart_height_px, 90.0);
    assert_eq!(config.interval_bar_height_px, 10.0);
    config.validate().expect("valid");
}

#[test]
fn invalid_values_are_rejected() {
    let narrow = TimelineConfig::new(100.0, 60.0).validate().expect_err("narrow");
    assert!(matches!(narrow, TimelineError::InvalidTrackGeometry { .. }));

    let zero_width = TimelineConfig::new(0.0, 0.0).validate().expect_err("zero width");
    assert!(matches!(zero_width, TimelineError::InvalidTrackGeometry { .. }));

    let bar_too_tall = TimelineConfig::new(800.0, 40.0)
        .with_medication_rows(10.0, 12.0)
        .validate()
        .expect_err("bar taller than row");
    assert!(matches!(bar_too_tall, TimelineError::InvalidInput(_)));

    let negative_gap = TimelineConfig::new(800.0, 40.0)
        .with_card_geometry(100.0, -1.0)
        .validate();
    assert!(negative_gap.is_err());

    let style = RenderStyle {
        label_color: Color::rgba(0.0, 0.0, 0.0, 2.0),
        ..RenderStyle::default()
    };
    let bad_style = TimelineConfig::new(800.0, 40.0).with_style(style).validate();
    assert!(bad_style.is_err());
}
