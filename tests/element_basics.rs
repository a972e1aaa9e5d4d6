use canvas_editor::element::{Element, ElementKind, ElementType, PropertyKey, PropertyValue};
use canvas_editor::error::PropertyError;
use canvas_editor::geometry::{element_bounds, point_in_element};
use canvas_editor::text_layout::ApproxMetrics;
use egui::{Color32, Pos2, Rect, Vec2};

fn element(element_type: ElementType, x: f32, y: f32) -> Element {
    let at = Pos2::new(x, y);
    Element::new(7, at, ElementKind::with_defaults(element_type, at).unwrap())
}

#[test]
fn test_default_names_and_visibility() {
    let rect = element(ElementType::Rectangle, 0.0, 0.0);
    assert_eq!(rect.name, "rectangle 7");
    assert!(rect.visible);
    assert_eq!(rect.id(), 7);
}

#[test]
fn test_bounds_per_kind() {
    let metrics = ApproxMetrics::default();

    let rect = element(ElementType::Rectangle, 50.0, 50.0);
    assert_eq!(
        element_bounds(&rect, &metrics),
        Rect::from_min_size(Pos2::new(50.0, 50.0), Vec2::new(100.0, 60.0))
    );

    let circle = element(ElementType::Circle, 100.0, 100.0);
    assert_eq!(
        element_bounds(&circle, &metrics),
        Rect::from_min_max(Pos2::new(60.0, 60.0), Pos2::new(140.0, 140.0))
    );

    let line = element(ElementType::Line, 10.0, 10.0);
    assert_eq!(
        element_bounds(&line, &metrics),
        Rect::from_two_pos(Pos2::new(10.0, 10.0), Pos2::new(110.0, 10.0))
    );
}

#[test]
fn test_line_hit_tolerance() {
    let metrics = ApproxMetrics::default();
    let line = element(ElementType::Line, 10.0, 10.0);
    assert!(point_in_element(Pos2::new(60.0, 11.0), &line, &metrics));
    assert!(!point_in_element(Pos2::new(60.0, 20.0), &line, &metrics));
}

#[test]
fn test_text_bounds_start_above_the_baseline() {
    let metrics = ApproxMetrics::default();
    let text = element(ElementType::Text, 100.0, 100.0);
    let bounds = element_bounds(&text, &metrics);
    assert_eq!(bounds.min, Pos2::new(100.0, 82.0));
    assert!(point_in_element(Pos2::new(110.0, 95.0), &text, &metrics));
    assert!(!point_in_element(Pos2::new(110.0, 120.0), &text, &metrics));
}

#[test]
fn test_property_round_trip_through_the_contract() {
    let mut rect = element(ElementType::Rectangle, 0.0, 0.0);
    rect.set_property(PropertyKey::FillColor, &PropertyValue::Text("#ff0000".into()))
        .unwrap();
    rect.set_property(PropertyKey::Filled, &PropertyValue::Bool(true))
        .unwrap();
    rect.set_property(PropertyKey::Width, &PropertyValue::Number(42.0))
        .unwrap();

    assert_eq!(
        rect.property(PropertyKey::FillColor),
        Some(PropertyValue::Text("#ff0000".into()))
    );
    assert_eq!(rect.property(PropertyKey::Filled), Some(PropertyValue::Bool(true)));
    assert_eq!(rect.property(PropertyKey::Width), Some(PropertyValue::Number(42.0)));
    match &rect.kind {
        ElementKind::Rectangle(r) => assert_eq!(r.fill_color, Color32::from_rgb(255, 0, 0)),
        other => panic!("unexpected kind {other:?}"),
    }
}

#[test]
fn test_rejected_updates_leave_the_element_untouched() {
    let mut line = element(ElementType::Line, 0.0, 0.0);
    let before = line.clone();

    let err = line
        .set_property(PropertyKey::LineWidth, &PropertyValue::Text("thick".into()))
        .unwrap_err();
    assert!(matches!(err, PropertyError::TypeMismatch { .. }));
    assert!(matches!(
        line.set_property(PropertyKey::StrokeColor, &PropertyValue::Text("blue-ish".into())),
        Err(PropertyError::InvalidValue { .. })
    ));
    assert!(line.set_property(PropertyKey::Radius, &PropertyValue::Number(3.0)).is_err());
    assert_eq!(line, before);
}

#[test]
fn test_properties_that_do_not_apply_are_absent() {
    let circle = element(ElementType::Circle, 0.0, 0.0);
    assert_eq!(circle.property(PropertyKey::Text), None);
    assert_eq!(circle.property(PropertyKey::Radius), Some(PropertyValue::Number(40.0)));
}
