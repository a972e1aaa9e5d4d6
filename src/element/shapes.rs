use egui::{Color32, Pos2, Rect, Vec2};

/// Straight segment. The element anchor is the start point.
#[derive(Debug, Clone, PartialEq)]
pub struct LineElement {
    pub end: Pos2,
    pub stroke_color: Color32,
    pub stroke_width: f32,
}

impl LineElement {
    /// A line starting at `start` with the default 100px horizontal run
    pub fn from_start(start: Pos2) -> Self {
        Self {
            end: start + Vec2::new(100.0, 0.0),
            stroke_color: Color32::BLACK,
            stroke_width: 2.0,
        }
    }
}

/// Axis-aligned box. The element anchor is the top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct RectangleElement {
    pub width: f32,
    pub height: f32,
    pub fill_color: Color32,
    pub stroke_color: Color32,
    pub stroke_width: f32,
    pub filled: bool,
}

impl Default for RectangleElement {
    fn default() -> Self {
        Self {
            width: 100.0,
            height: 60.0,
            fill_color: Color32::WHITE,
            stroke_color: Color32::BLACK,
            stroke_width: 2.0,
            filled: false,
        }
    }
}

impl RectangleElement {
    pub fn rect(&self, anchor: Pos2) -> Rect {
        Rect::from_min_size(anchor, Vec2::new(self.width, self.height))
    }
}

/// The element anchor is the center.
#[derive(Debug, Clone, PartialEq)]
pub struct CircleElement {
    pub radius: f32,
    pub fill_color: Color32,
    pub stroke_color: Color32,
    pub stroke_width: f32,
    pub filled: bool,
}

impl Default for CircleElement {
    fn default() -> Self {
        Self {
            radius: 40.0,
            fill_color: Color32::WHITE,
            stroke_color: Color32::BLACK,
            stroke_width: 2.0,
            filled: false,
        }
    }
}
