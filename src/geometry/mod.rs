//! Shape geometry: bounds, hit-testing and resize-handle placement.

use egui::{Pos2, Rect, Vec2};

use crate::element::{Element, ElementKind};
use crate::text_layout::TextMeasure;

pub mod handles;
pub mod hit_testing;

pub use handles::{Handle, HandleId, handle_at, handles_for};
pub use hit_testing::{distance_point_to_segment, point_in_element};

/// Minimal axis-aligned box around an element
pub fn element_bounds(element: &Element, metrics: &dyn TextMeasure) -> Rect {
    let anchor = element.position;
    match &element.kind {
        ElementKind::Text(text) => text.bounds(anchor, metrics),
        ElementKind::Line(line) => Rect::from_two_pos(anchor, line.end),
        ElementKind::Rectangle(rect) => rect.rect(anchor),
        ElementKind::Circle(circle) => {
            Rect::from_center_size(anchor, Vec2::splat(circle.radius * 2.0))
        }
        ElementKind::Image(image) => image.rect(anchor),
    }
}

/// Axis-aligned square centered on `center`, `half` in each direction
pub(crate) fn square_around(center: Pos2, half: f32) -> Rect {
    Rect::from_center_size(center, Vec2::splat(half * 2.0))
}
