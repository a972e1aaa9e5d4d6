use egui::{Pos2, Vec2};

use crate::element::{Element, ElementKind};
use crate::geometry::HandleId;

/// Smallest width and height a rectangle or image can be resized to
pub const MIN_BOX_SIZE: f32 = 20.0;
/// Smallest radius a circle can be resized to
pub const MIN_CIRCLE_RADIUS: f32 = 10.0;
/// Smallest wrap width a text block can be resized to
pub const MIN_TEXT_WIDTH: f32 = 50.0;

/// Apply one resize step of `handle` to `element`.
///
/// `pointer` is the current pointer position and `delta` the movement since
/// the previous step. Handles that do not apply to the element are ignored.
pub fn resize_element(element: &mut Element, handle: HandleId, pointer: Pos2, delta: Vec2) {
    let center = element.position;
    match &mut element.kind {
        ElementKind::Line(line) => match handle {
            HandleId::Start => element.position = pointer,
            HandleId::End => line.end = pointer,
            _ => {}
        },
        ElementKind::Rectangle(rect) => resize_box(
            &mut element.position,
            &mut rect.width,
            &mut rect.height,
            handle,
            delta,
        ),
        ElementKind::Image(image) => resize_box(
            &mut element.position,
            &mut image.width,
            &mut image.height,
            handle,
            delta,
        ),
        ElementKind::Circle(circle) => {
            let radius = match handle {
                HandleId::N | HandleId::S => (pointer.y - center.y).abs(),
                HandleId::W | HandleId::E => (pointer.x - center.x).abs(),
                _ => return,
            };
            circle.radius = radius.max(MIN_CIRCLE_RADIUS);
        }
        // Text height follows from the layout, so only the east side does anything.
        ElementKind::Text(text) => {
            if handle.is_east() {
                text.width = (text.width + delta.x).max(MIN_TEXT_WIDTH);
            }
        }
    }
}

/// Corner handles move two edges, side handles one. The anchor follows the
/// north and west edges; the size is clamped afterwards without moving it back.
fn resize_box(anchor: &mut Pos2, width: &mut f32, height: &mut f32, handle: HandleId, delta: Vec2) {
    let (dx, dy) = (delta.x, delta.y);
    match handle {
        HandleId::Nw => {
            anchor.x += dx;
            anchor.y += dy;
            *width -= dx;
            *height -= dy;
        }
        HandleId::Ne => {
            anchor.y += dy;
            *width += dx;
            *height -= dy;
        }
        HandleId::Sw => {
            anchor.x += dx;
            *width -= dx;
            *height += dy;
        }
        HandleId::Se => {
            *width += dx;
            *height += dy;
        }
        HandleId::N => {
            anchor.y += dy;
            *height -= dy;
        }
        HandleId::S => *height += dy,
        HandleId::W => {
            anchor.x += dx;
            *width -= dx;
        }
        HandleId::E => *width += dx,
        HandleId::Start | HandleId::End => {}
    }
    *width = width.max(MIN_BOX_SIZE);
    *height = height.max(MIN_BOX_SIZE);
}
