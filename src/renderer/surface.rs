use egui::{Color32, Pos2, Rect};

use crate::element::{Bitmap, TextAlign};
use crate::text_layout::FontSpec;

/// Outline style for strokes
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeStyle {
    pub color: Color32,
    pub width: f32,
    /// Dash and gap lengths; `None` for a solid line
    pub dash: Option<[f32; 2]>,
}

impl StrokeStyle {
    pub fn solid(color: Color32, width: f32) -> Self {
        Self {
            color,
            width,
            dash: None,
        }
    }

    pub fn dashed(color: Color32, width: f32, dash: [f32; 2]) -> Self {
        Self {
            color,
            width,
            dash: Some(dash),
        }
    }
}

/// Fill style for one run of text
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub font: FontSpec,
    pub color: Color32,
    pub align: TextAlign,
}

/// Immediate-mode 2D drawing target, modelled on a canvas context.
///
/// Coordinates are canvas-local. Text origins are baseline points; the x
/// coordinate is the left edge, center or right edge depending on
/// [`TextStyle::align`].
pub trait Surface {
    /// Push the drawing state. Surfaces without state may ignore it.
    fn save(&mut self) {}

    /// Pop the drawing state pushed by the matching [`Surface::save`]
    fn restore(&mut self) {}

    fn fill_rect(&mut self, rect: Rect, color: Color32);

    fn stroke_rect(&mut self, rect: Rect, stroke: &StrokeStyle);

    fn fill_circle(&mut self, center: Pos2, radius: f32, color: Color32);

    fn stroke_circle(&mut self, center: Pos2, radius: f32, stroke: &StrokeStyle);

    fn stroke_line(&mut self, from: Pos2, to: Pos2, stroke: &StrokeStyle);

    fn fill_text(&mut self, text: &str, origin: Pos2, style: &TextStyle);

    /// Draw `bitmap` scaled into `rect`
    fn draw_image(&mut self, bitmap: &Bitmap, rect: Rect);
}

/// Horizontal offset from the alignment point to the left edge of a run
pub fn align_offset(align: TextAlign, width: f32) -> f32 {
    match align {
        TextAlign::Left => 0.0,
        TextAlign::Center => -width / 2.0,
        TextAlign::Right => -width,
    }
}
