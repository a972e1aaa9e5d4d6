use egui::Pos2;

use crate::element::{Element, ElementKind};
use crate::text_layout::TextMeasure;

/// How far from a line segment, in pixels, a click still selects it
pub const LINE_HIT_TOLERANCE: f32 = 5.0;

/// Whether `pos` lies on the element's painted region
pub fn point_in_element(pos: Pos2, element: &Element, metrics: &dyn TextMeasure) -> bool {
    let anchor = element.position;
    match &element.kind {
        ElementKind::Text(text) => text.bounds(anchor, metrics).contains(pos),
        ElementKind::Line(line) => {
            distance_point_to_segment(pos, anchor, line.end) <= LINE_HIT_TOLERANCE
        }
        ElementKind::Rectangle(rect) => rect.rect(anchor).contains(pos),
        ElementKind::Circle(circle) => pos.distance(anchor) <= circle.radius,
        ElementKind::Image(image) => image.rect(anchor).contains(pos),
    }
}

/// Distance from `p` to the closest point of the finite segment `a`–`b`.
///
/// A zero-length segment is treated as the single point `a`.
pub fn distance_point_to_segment(p: Pos2, a: Pos2, b: Pos2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_sq();
    if len_sq == 0.0 {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}
