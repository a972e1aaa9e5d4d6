use egui::{CursorIcon, Pos2};

use super::{element_bounds, square_around};
use crate::element::{Element, ElementKind};
use crate::text_layout::TextMeasure;

/// Half-extent of the square around a handle center that grabs it
pub const HANDLE_HIT_TOLERANCE: f32 = 8.0;

/// A resize hotspot on the selected element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleId {
    Nw,
    Ne,
    Sw,
    Se,
    N,
    S,
    W,
    E,
    /// Line start point
    Start,
    /// Line end point
    End,
}

impl HandleId {
    pub fn as_str(&self) -> &'static str {
        match self {
            HandleId::Nw => "nw",
            HandleId::Ne => "ne",
            HandleId::Sw => "sw",
            HandleId::Se => "se",
            HandleId::N => "n",
            HandleId::S => "s",
            HandleId::W => "w",
            HandleId::E => "e",
            HandleId::Start => "start",
            HandleId::End => "end",
        }
    }

    /// Handles on the right-hand edge of a box
    pub fn is_east(&self) -> bool {
        matches!(self, HandleId::E | HandleId::Ne | HandleId::Se)
    }

    pub fn cursor_icon(&self) -> CursorIcon {
        match self {
            HandleId::Nw => CursorIcon::ResizeNorthWest,
            HandleId::Ne => CursorIcon::ResizeNorthEast,
            HandleId::Sw => CursorIcon::ResizeSouthWest,
            HandleId::Se => CursorIcon::ResizeSouthEast,
            HandleId::N => CursorIcon::ResizeNorth,
            HandleId::S => CursorIcon::ResizeSouth,
            HandleId::W => CursorIcon::ResizeWest,
            HandleId::E => CursorIcon::ResizeEast,
            HandleId::Start | HandleId::End => CursorIcon::Grab,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handle {
    pub id: HandleId,
    pub pos: Pos2,
}

impl Handle {
    fn new(id: HandleId, pos: Pos2) -> Self {
        Self { id, pos }
    }
}

/// Resize handles offered by an element, in hit-test priority order
pub fn handles_for(element: &Element, metrics: &dyn TextMeasure) -> Vec<Handle> {
    use HandleId::*;
    match &element.kind {
        ElementKind::Line(line) => vec![
            Handle::new(Start, element.position),
            Handle::new(End, line.end),
        ],
        ElementKind::Text(_) => {
            let b = element_bounds(element, metrics);
            vec![
                Handle::new(Nw, b.left_top()),
                Handle::new(Ne, b.right_top()),
                Handle::new(Sw, b.left_bottom()),
                Handle::new(Se, b.right_bottom()),
                Handle::new(E, b.right_center()),
            ]
        }
        ElementKind::Rectangle(_) | ElementKind::Image(_) => {
            let b = element_bounds(element, metrics);
            vec![
                Handle::new(Nw, b.left_top()),
                Handle::new(Ne, b.right_top()),
                Handle::new(Sw, b.left_bottom()),
                Handle::new(Se, b.right_bottom()),
                Handle::new(N, b.center_top()),
                Handle::new(S, b.center_bottom()),
                Handle::new(W, b.left_center()),
                Handle::new(E, b.right_center()),
            ]
        }
        ElementKind::Circle(circle) => {
            let c = element.position;
            let r = circle.radius;
            vec![
                Handle::new(N, Pos2::new(c.x, c.y - r)),
                Handle::new(S, Pos2::new(c.x, c.y + r)),
                Handle::new(W, Pos2::new(c.x - r, c.y)),
                Handle::new(E, Pos2::new(c.x + r, c.y)),
            ]
        }
    }
}

/// First handle of `element` whose grab square contains `pos`
pub fn handle_at(pos: Pos2, element: &Element, metrics: &dyn TextMeasure) -> Option<HandleId> {
    handles_for(element, metrics)
        .into_iter()
        .find(|handle| square_around(handle.pos, HANDLE_HIT_TOLERANCE).contains(pos))
        .map(|handle| handle.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{ElementType, ElementKind};
    use crate::text_layout::ApproxMetrics;

    fn element(element_type: ElementType, at: Pos2) -> Element {
        Element::new(1, at, ElementKind::with_defaults(element_type, at).unwrap())
    }

    #[test]
    fn handle_counts_per_type() {
        let m = ApproxMetrics::default();
        let at = Pos2::new(50.0, 50.0);
        assert_eq!(handles_for(&element(ElementType::Line, at), &m).len(), 2);
        assert_eq!(handles_for(&element(ElementType::Rectangle, at), &m).len(), 8);
        assert_eq!(handles_for(&element(ElementType::Circle, at), &m).len(), 4);
        assert_eq!(handles_for(&element(ElementType::Text, at), &m).len(), 5);
    }

    #[test]
    fn handles_are_grabbed_within_eight_pixels() {
        let m = ApproxMetrics::default();
        let rect = element(ElementType::Rectangle, Pos2::new(50.0, 50.0));
        // se corner is at (150, 110)
        assert_eq!(handle_at(Pos2::new(158.0, 102.0), &rect, &m), Some(HandleId::Se));
        assert_eq!(handle_at(Pos2::new(159.0, 110.0), &rect, &m), None);
        // body center is nowhere near a handle
        assert_eq!(handle_at(Pos2::new(75.0, 80.0), &rect, &m), None);
    }

    #[test]
    fn east_handles() {
        assert!(HandleId::E.is_east());
        assert!(HandleId::Ne.is_east());
        assert!(HandleId::Se.is_east());
        assert!(!HandleId::S.is_east());
        assert!(!HandleId::Nw.is_east());
    }
}
